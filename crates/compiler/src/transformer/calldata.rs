//! Calldata parameter decoding, per spec.md §4.4.2: static (single-word)
//! parameters are read directly by position; dynamic parameters
//! (`bytes`/`string`/`array`) are bound as an `(offset, length)` pair of
//! locals, per the `<name>_len` convention.

use super::context::{unsupported, Ctx, LocalSlot};
use super::expr::normalize_calldata_word;
use crate::diagnostics::CompileError;
use evmc_types::EvmType;
use evmc_yul::{YulExpr, YulStatement};

/// Lowers the decoding of `params` (a function's or constructor's
/// parameter list) starting at calldata byte `base`, binding each
/// parameter into `ctx.locals`/`ctx.local_types` and appending the
/// decoding statements to `out`.
pub fn decode_params(params: &[(String, EvmType)], base: u64, ctx: &mut Ctx<'_>, out: &mut Vec<YulStatement>) -> Result<(), CompileError> {
    for (i, (name, ty)) in params.iter().enumerate() {
        let head_offset = base + 32 * i as u64;
        if ty.is_single_word() {
            let local = ctx.fresh_name(&format!("arg_{name}"));
            let raw = YulExpr::call("calldataload", vec![YulExpr::number(head_offset)]);
            out.push(YulStatement::Let { vars: vec![local.clone()], value: Some(normalize_calldata_word(ty, raw)) });
            ctx.locals.insert(name.clone(), LocalSlot::Scalar(local));
            ctx.local_types.insert(name.clone(), ty.clone());
            continue;
        }

        match ty {
            EvmType::Bytes | EvmType::String | EvmType::Array(_) => {
                let rel = ctx.fresh_name(&format!("rel_{name}"));
                let abs = ctx.fresh_name(&format!("abs_{name}"));
                let len = ctx.fresh_name(&format!("len_{name}"));
                let data = ctx.fresh_name(&format!("data_{name}"));

                out.push(YulStatement::Let {
                    vars: vec![rel.clone()],
                    value: Some(YulExpr::call("calldataload", vec![YulExpr::number(head_offset)])),
                });
                out.push(YulStatement::Let {
                    vars: vec![abs.clone()],
                    value: Some(YulExpr::call("add", vec![YulExpr::number(base), YulExpr::Ident(rel)])),
                });
                out.push(YulStatement::Let {
                    vars: vec![len.clone()],
                    value: Some(YulExpr::call("calldataload", vec![YulExpr::Ident(abs.clone())])),
                });
                out.push(YulStatement::Let {
                    vars: vec![data.clone()],
                    value: Some(YulExpr::call("add", vec![YulExpr::Ident(abs), YulExpr::number(32u64)])),
                });
                out.push(bounds_check(&data, &len));

                ctx.locals.insert(name.clone(), LocalSlot::CalldataSlice { offset: data, len: len.clone() });
            }
            other => return Err(unsupported(format!("parameter type not yet decodable from calldata: {other:?}"))),
        }
    }
    Ok(())
}

/// `if lt(calldatasize(), add(data, len)) { revert(0, 0) }`, guarding
/// against truncated calldata for a dynamic parameter.
fn bounds_check(data: &str, len: &str) -> YulStatement {
    YulStatement::If {
        cond: YulExpr::call(
            "lt",
            vec![
                YulExpr::call0("calldatasize"),
                YulExpr::call("add", vec![YulExpr::Ident(data.to_owned()), YulExpr::Ident(len.to_owned())]),
            ],
        ),
        body: vec![YulStatement::Expr(YulExpr::call("revert", vec![YulExpr::number(0u64), YulExpr::number(0u64)]))],
    }
}
