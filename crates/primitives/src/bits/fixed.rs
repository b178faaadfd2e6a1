use core::{fmt, ops, str};
use derive_more::{Deref, DerefMut, From};

/// A byte array of fixed length.
///
/// Used directly for hashes ([`crate::B256`]) and as the backing storage of
/// newtypes created with [`crate::wrap_fixed_bytes`] (e.g.
/// [`crate::Address`]).
#[derive(Deref, DerefMut, From, Hash, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
#[repr(transparent)]
pub struct FixedBytes<const N: usize>(pub [u8; N]);

impl<const N: usize> Default for FixedBytes<N> {
    fn default() -> Self {
        Self::ZERO
    }
}

impl<const N: usize> From<&'_ [u8; N]> for FixedBytes<N> {
    #[inline]
    fn from(bytes: &[u8; N]) -> Self {
        Self(*bytes)
    }
}

impl<const N: usize> From<FixedBytes<N>> for [u8; N] {
    #[inline]
    fn from(s: FixedBytes<N>) -> Self {
        s.0
    }
}

impl<const N: usize> AsRef<[u8]> for FixedBytes<N> {
    #[inline]
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl<const N: usize> AsMut<[u8]> for FixedBytes<N> {
    #[inline]
    fn as_mut(&mut self) -> &mut [u8] {
        &mut self.0
    }
}

impl<const N: usize> FixedBytes<N> {
    /// A fixed byte array with every byte set to zero.
    pub const ZERO: Self = Self([0u8; N]);

    /// Instantiates a new fixed array from the given bytes.
    #[inline]
    pub const fn new(bytes: [u8; N]) -> Self {
        Self(bytes)
    }

    /// Utility to create a fixed array with the last byte set to `x`.
    #[inline]
    pub const fn with_last_byte(x: u8) -> Self {
        let mut bytes = [0u8; N];
        bytes[N - 1] = x;
        Self(bytes)
    }

    /// Returns a new fixed array where every byte is set to `byte`.
    #[inline]
    pub const fn repeat_byte(byte: u8) -> Self {
        Self([byte; N])
    }

    /// The length of this array in bytes.
    #[inline]
    pub const fn len_bytes() -> usize {
        N
    }

    /// Extracts a byte slice containing the entire array.
    #[inline]
    pub const fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Creates a new fixed array from the given slice.
    ///
    /// # Panics
    ///
    /// If the length of `src` does not equal `N`.
    #[track_caller]
    pub fn from_slice(src: &[u8]) -> Self {
        let mut bytes = [0; N];
        bytes.copy_from_slice(src);
        Self(bytes)
    }

    /// Left-pads `src` into a new fixed array, placing it in the low-order
    /// (rightmost) bytes. This is the EVM word-padding convention used when
    /// hashing storage keys (`pad32`).
    pub fn left_pad_from(src: &[u8]) -> Self {
        assert!(src.len() <= N, "source longer than destination");
        let mut bytes = [0u8; N];
        bytes[N - src.len()..].copy_from_slice(src);
        Self(bytes)
    }

    /// `true` if every byte is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|b| *b == 0)
    }

    /// Concatenates two fixed arrays into one of size `N + M`.
    pub fn concat<const M: usize, const Z: usize>(self, other: FixedBytes<M>) -> FixedBytes<Z> {
        assert_eq!(N + M, Z, "Z must equal N + M");
        let mut out = [0u8; Z];
        out[..N].copy_from_slice(&self.0);
        out[N..].copy_from_slice(&other.0);
        FixedBytes(out)
    }
}

impl<const N: usize> fmt::Debug for FixedBytes<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl<const N: usize> fmt::Display for FixedBytes<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("0x")?;
        for byte in &self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl<const N: usize> str::FromStr for FixedBytes<N> {
    type Err = hex::FromHexError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.strip_prefix("0x").unwrap_or(value);
        let mut bytes = [0u8; N];
        hex::decode_to_slice(value, &mut bytes)?;
        Ok(Self(bytes))
    }
}

impl<const N: usize> ops::BitAnd for FixedBytes<N> {
    type Output = Self;
    fn bitand(mut self, rhs: Self) -> Self {
        for i in 0..N {
            self.0[i] &= rhs.0[i];
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_roundtrips_from_str() {
        let b = FixedBytes::<4>::new([0xde, 0xad, 0xbe, 0xef]);
        assert_eq!(b.to_string(), "0xdeadbeef");
        assert_eq!("0xdeadbeef".parse::<FixedBytes<4>>().unwrap(), b);
    }

    #[test]
    fn left_pad_matches_evm_word_convention() {
        let padded = FixedBytes::<32>::left_pad_from(&[0x01, 0x02]);
        assert_eq!(padded.0[30], 0x01);
        assert_eq!(padded.0[31], 0x02);
        assert!(padded.0[..30].iter().all(|b| *b == 0));
    }
}
