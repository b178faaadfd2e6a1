use core::fmt;

/// An error parsing or validating an [`crate::EvmType`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypesError {
    /// `uint`/`int` bit width outside `8..=256` or not a multiple of 8.
    InvalidBitWidth,
    /// `bytes<N>` size outside `1..=32`.
    InvalidBytesSize,
    /// A type spelling that resolved to neither a built-in type nor a
    /// name known to the [`crate::TypeContext`].
    Unknown(String),
    /// A malformed type spelling (unbalanced brackets, empty tuple
    /// element, trailing garbage).
    Malformed(String),
}

impl fmt::Display for TypesError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidBitWidth => f.write_str("bit width must be 8-256 and multiple of 8"),
            Self::InvalidBytesSize => f.write_str("bytes size must be 1-32"),
            Self::Unknown(name) => write!(f, "Unknown type: {name}"),
            Self::Malformed(spelling) => write!(f, "malformed type: {spelling}"),
        }
    }
}

impl std::error::Error for TypesError {}
