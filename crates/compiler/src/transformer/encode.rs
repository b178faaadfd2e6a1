//! Return-value ABI encoding, per spec.md §4.4.2. Single static values and
//! flat tuples-of-statics are encoded by sequential `mstore`; dynamic
//! return values (`bytes`/`string`/`array`) are not yet lowered.

use super::context::unsupported;
use super::types::normalize_write;
use crate::diagnostics::CompileError;
use evmc_types::EvmType;
use evmc_yul::{YulExpr, YulStatement};

/// Encodes `values` into scratch memory starting at offset 0 and returns
/// the `(offset, length)` pair to pass to the `return` opcode.
pub fn encode_return(values: &[(EvmType, YulExpr)], out: &mut Vec<YulStatement>) -> Result<(u64, u64), CompileError> {
    if values.iter().any(|(ty, _)| !ty.is_single_word()) {
        return Err(unsupported("dynamic (bytes/string/array) return values are not yet ABI-encoded"));
    }

    for (i, (ty, value)) in values.iter().enumerate() {
        let normalized = normalize_write(ty, value.clone());
        out.push(YulStatement::Expr(YulExpr::call("mstore", vec![YulExpr::number(32 * i as u64), normalized])));
    }
    Ok((0, 32 * values.len() as u64))
}
