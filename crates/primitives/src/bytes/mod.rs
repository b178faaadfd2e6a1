use core::{
    fmt,
    ops::{Deref, DerefMut},
};

/// Wrapper type around a byte vector, displaying as a "0x"-prefixed hex
/// string. Used for the Yul `data` section contents and for raw hex-string
/// literal values captured from the surface language.
#[derive(Clone, Default, Hash, PartialEq, Eq, PartialOrd, Ord)]
#[repr(transparent)]
pub struct Bytes(pub Vec<u8>);

impl fmt::Debug for Bytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Bytes({self})")
    }
}

impl fmt::Display for Bytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("0x")?;
        for byte in &self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl Deref for Bytes {
    type Target = [u8];

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for Bytes {
    #[inline]
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl AsRef<[u8]> for Bytes {
    #[inline]
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<Vec<u8>> for Bytes {
    #[inline]
    fn from(value: Vec<u8>) -> Self {
        Self(value)
    }
}

impl<const N: usize> From<[u8; N]> for Bytes {
    #[inline]
    fn from(value: [u8; N]) -> Self {
        Self(value.to_vec())
    }
}

impl From<&[u8]> for Bytes {
    #[inline]
    fn from(value: &[u8]) -> Self {
        Self(value.to_vec())
    }
}

impl FromIterator<u8> for Bytes {
    #[inline]
    fn from_iter<T: IntoIterator<Item = u8>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Bytes {
    /// The empty byte string.
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Parses a "0x"-prefixed (or bare) hex string into bytes.
    pub fn from_hex_str(s: &str) -> Result<Self, hex::FromHexError> {
        let s = s.strip_prefix("0x").unwrap_or(s);
        Ok(Self(hex::decode(s)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn displays_as_0x_hex() {
        assert_eq!(Bytes::from(vec![0xab, 0xcd]).to_string(), "0xabcd");
    }

    #[test]
    fn parses_with_or_without_prefix() {
        assert_eq!(Bytes::from_hex_str("0xabcd").unwrap().0, vec![0xab, 0xcd]);
        assert_eq!(Bytes::from_hex_str("abcd").unwrap().0, vec![0xab, 0xcd]);
    }
}
