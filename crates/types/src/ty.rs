/// A canonical EVM value or reference type.
///
/// Variants mirror the Solidity ABI's type grammar rather than any single
/// surface-language spelling: `uint(bits)`/`int(bits)` carry their bit
/// width, `FixedBytes` its byte size, and `Enum`/`Struct` keep the
/// surface-language name around for diagnostics even though both lower to
/// a fixed primitive representation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EvmType {
    /// An unsigned integer, `8..=256` bits wide, a multiple of 8.
    Uint(u16),
    /// A signed integer, `8..=256` bits wide, a multiple of 8.
    Int(u16),
    /// A boolean.
    Bool,
    /// An address; the canonical alias of `Uint(160)` at encoding time.
    Address,
    /// A fixed-size byte array, `1..=32` bytes.
    FixedBytes(u8),
    /// A dynamically-sized byte array.
    Bytes,
    /// A dynamically-sized UTF-8 string.
    String,
    /// A dynamically-sized array of elements.
    Array(Box<EvmType>),
    /// A storage-only key-value mapping. Never valid as a function
    /// parameter or return type.
    Mapping(Box<EvmType>, Box<EvmType>),
    /// A fixed-size tuple, used for multi-value returns.
    Tuple(Vec<EvmType>),
    /// A reference to a user-declared enum, lowered to `Uint(8)`.
    Enum(String),
    /// A reference to a user-declared struct, lowered to `Uint(256)` as an
    /// opaque storage-slot reference.
    Struct(String),
}

impl EvmType {
    /// Returns the primitive type this type is lowered to for storage and
    /// calldata encoding purposes: `Enum` as `Uint(8)`, `Struct` as
    /// `Uint(256)`, everything else unchanged.
    pub fn lowered(&self) -> EvmType {
        match self {
            Self::Enum(_) => Self::Uint(8),
            Self::Struct(_) => Self::Uint(256),
            other => other.clone(),
        }
    }

    /// Returns true if this type (after lowering) occupies exactly one
    /// 32-byte EVM word in calldata/storage: everything except `Bytes`,
    /// `String`, `Array`, `Mapping`, and non-empty `Tuple`.
    pub fn is_single_word(&self) -> bool {
        match self.lowered() {
            Self::Uint(_) | Self::Int(_) | Self::Bool | Self::Address | Self::FixedBytes(_) => {
                true
            }
            Self::Tuple(elems) => elems.is_empty(),
            _ => false,
        }
    }

    /// Returns true if this type may never appear as a function parameter
    /// or return type (only `Mapping`).
    pub const fn is_storage_only(&self) -> bool {
        matches!(self, Self::Mapping(..))
    }
}
