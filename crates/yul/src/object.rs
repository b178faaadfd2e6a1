use crate::YulBlock;
use evmc_primitives::Bytes;

/// A Yul `object`, the top-level unit the assembler consumes.
///
/// A compiled contract is a creation-code object named after the contract
/// containing one nested deployed-code object (named `"<Name>_deployed"`)
/// plus any `data` sections referenced by `dataoffset`/`datasize`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YulObject {
    /// The object's name, as it appears after the `object` keyword.
    pub name: String,
    /// The object's top-level code block.
    pub code: YulBlock,
    /// Nested objects, e.g. the deployed-code object inside the creation
    /// object.
    pub sub_objects: Vec<YulObject>,
    /// Named data sections, referenced by `dataoffset(name)`/
    /// `datasize(name)` and emitted as `data "name" hex"..."`.
    pub data: Vec<(String, Bytes)>,
}

impl YulObject {
    /// Creates an object with an empty code block and no sub-objects or
    /// data sections.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), code: Vec::new(), sub_objects: Vec::new(), data: Vec::new() }
    }
}
