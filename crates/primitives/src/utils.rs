use crate::bits::FixedBytes;

/// Computes the Keccak-256 hash of the given bytes.
///
/// Used throughout the compiler for function/error/event selector derivation
/// and for storage slot derivation of mappings and dynamic arrays.
pub fn keccak256<T: AsRef<[u8]>>(bytes: T) -> FixedBytes<32> {
    use tiny_keccak::{Hasher, Keccak};

    let mut output = [0u8; 32];
    let mut hasher = Keccak::v256();
    hasher.update(bytes.as_ref());
    hasher.finalize(&mut output);
    FixedBytes(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_preimage() {
        // keccak256("transfer(address,uint256)")[..4] == a9059cbb, the well
        // known ERC-20 `transfer` selector.
        let h = keccak256(b"transfer(address,uint256)");
        assert_eq!(&h.0[..4], &[0xa9, 0x05, 0x9c, 0xbb]);
    }

    #[test]
    fn distinct_inputs_differ() {
        assert_ne!(keccak256(b"a"), keccak256(b"b"));
    }
}
