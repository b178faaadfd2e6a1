use crate::EvmType;

/// Name resolution supplied by the analyzer's symbol table while parsing
/// surface-language type spellings.
///
/// A bare identifier that isn't one of the built-in spellings is resolved
/// against this context before being rejected as an unknown type.
pub trait TypeContext {
    /// Returns true if `name` was declared as an enum.
    fn is_enum(&self, name: &str) -> bool;

    /// Returns the struct type for `name`, if it was declared as a
    /// field-only (struct-like) interface.
    fn get_struct_type(&self, name: &str) -> Option<EvmType>;
}

/// A [`TypeContext`] that resolves nothing; every bare identifier is
/// unknown. Useful for parsing canonical ABI type strings, which never
/// reference user-declared names.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyTypeContext;

impl TypeContext for EmptyTypeContext {
    fn is_enum(&self, _name: &str) -> bool {
        false
    }

    fn get_struct_type(&self, _name: &str) -> Option<EvmType> {
        None
    }
}
