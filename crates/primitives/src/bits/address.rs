use crate::{utils::keccak256, wrap_fixed_bytes, FixedBytes};
use core::{fmt, str};

/// Error type for address parsing and checksum validation.
#[derive(Debug, Copy, Clone)]
pub enum AddressError {
    /// Error while decoding hex.
    Hex(hex::FromHexError),
    /// Invalid ERC-55 checksum.
    InvalidChecksum,
}

impl From<hex::FromHexError> for AddressError {
    fn from(value: hex::FromHexError) -> Self {
        Self::Hex(value)
    }
}

impl std::error::Error for AddressError {}

impl fmt::Display for AddressError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hex(err) => err.fmt(f),
            Self::InvalidChecksum => f.write_str("bad address checksum"),
        }
    }
}

wrap_fixed_bytes!(
    /// An Ethereum address, 20 bytes in length.
    Address<20>
);

impl str::FromStr for Address {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse().map_err(AddressError::Hex)?))
    }
}

impl From<Address> for FixedBytes<32> {
    #[inline]
    fn from(addr: Address) -> Self {
        addr.into_word()
    }
}

impl Address {
    /// Creates an address from an EVM word's lower 20 bytes (the convention
    /// used to recover an address from `caller()`/`sload`ed mapping keys).
    #[inline]
    pub fn from_word(word: FixedBytes<32>) -> Self {
        Self(FixedBytes::from_slice(&word.0[12..]))
    }

    /// Left-pads the address to 32 bytes, the EVM word size. This is the
    /// `pad32(address)` operation referenced throughout storage-slot
    /// derivation.
    #[inline]
    pub fn into_word(self) -> FixedBytes<32> {
        FixedBytes::left_pad_from(self.as_bytes())
    }

    /// Parses a checksummed address string, verifying its [EIP-55] checksum.
    ///
    /// [EIP-55]: https://eips.ethereum.org/EIPS/eip-55
    pub fn parse_checksummed<S: AsRef<str>>(
        s: S,
        chain_id: Option<u64>,
    ) -> Result<Self, AddressError> {
        let s = s.as_ref();
        if !s.starts_with("0x") {
            return Err(AddressError::Hex(hex::FromHexError::InvalidStringLength));
        }
        let address: Self = s.parse()?;
        if address.to_checksum(chain_id) == s {
            Ok(address)
        } else {
            Err(AddressError::InvalidChecksum)
        }
    }

    /// Encodes this address to its [EIP-55] (optionally [EIP-1191]) checksum
    /// string.
    ///
    /// [EIP-55]: https://eips.ethereum.org/EIPS/eip-55
    /// [EIP-1191]: https://eips.ethereum.org/EIPS/eip-1191
    pub fn to_checksum(&self, chain_id: Option<u64>) -> String {
        let hex_addr = hex::encode(self.as_bytes());
        let to_hash = match chain_id {
            Some(id) => format!("{id}{hex_addr}"),
            None => hex_addr.clone(),
        };
        let hash = keccak256(to_hash.as_bytes());
        let hash_hex = hex::encode(hash.as_bytes());

        let mut out = String::with_capacity(42);
        out.push_str("0x");
        for (c, h) in hex_addr.chars().zip(hash_hex.chars()) {
            if h.to_digit(16).unwrap_or(0) >= 8 {
                out.extend(c.to_uppercase());
            } else {
                out.push(c);
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_word() {
        let valid: Address = "0x00000000219ab540356cbb839cbe05303d7705f".parse().unwrap();
        assert_eq!(Address::from_word(valid.into_word()), valid);
    }

    #[test]
    fn checksum_matches_known_vector() {
        // From EIP-55's own test vectors.
        let valid: Address = "0x5aaeb6053f3e94c9b9a09f33669435e7ef1beaed".parse().unwrap();
        assert_eq!(valid.to_checksum(None), "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed");
    }
}
