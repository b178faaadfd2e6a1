//! Lowers a resolved [`ContractModel`] to a Yul [`YulObject`], per
//! spec.md §4.4.

mod asm;
mod calldata;
mod calls;
mod context;
mod encode;
mod errors;
mod events;
mod expr;
mod layout;
mod storage;
mod stmt;
mod types;

use crate::diagnostics::CompileError;
use crate::model::ContractModel;
use evmc_yul::YulObject;

/// Lowers `model` into a complete creation-code `YulObject` (with the
/// deployed-code object nested inside it).
pub fn transform(model: &ContractModel) -> Result<YulObject, Vec<CompileError>> {
    layout::build(model)
}
