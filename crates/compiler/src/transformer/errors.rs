//! `revert`/`require`/custom-error lowering, per spec.md §4.4.9.

use super::context::Ctx;
use super::expr::{infer_expr_type, lower_expr};
use crate::analyzer::compute_selector;
use crate::diagnostics::CompileError;
use evmc_ast::Expr;
use evmc_yul::{YulExpr, YulLiteral, YulStatement};

/// The standard `Error(string)` selector, `0x08c379a0`.
const ERROR_SELECTOR: u32 = 0x08c3_79a0;

/// `require(cond, message?)` → `if iszero(cond) { revert(...) }`.
pub fn lower_require(
    cond: &Expr,
    message: Option<&Expr>,
    ctx: &mut Ctx<'_>,
    out: &mut Vec<YulStatement>,
) -> Result<(), CompileError> {
    let cond_expr = lower_expr(cond, ctx, out)?;
    let mut revert_body = Vec::new();
    lower_revert(None, &[], message, ctx, &mut revert_body)?;
    out.push(YulStatement::If { cond: YulExpr::call("iszero", vec![cond_expr]), body: revert_body });
    Ok(())
}

/// `revert(message)` (the standard `Error(string)` form) or
/// `revert(Err(args))` (a custom error's selector plus ABI-encoded
/// arguments).
pub fn lower_revert(
    error: Option<&str>,
    args: &[Expr],
    message: Option<&Expr>,
    ctx: &mut Ctx<'_>,
    out: &mut Vec<YulStatement>,
) -> Result<(), CompileError> {
    if let Some(error_name) = error {
        return lower_custom_error(error_name, args, ctx, out);
    }
    match message {
        Some(msg) => lower_string_revert(msg, ctx, out),
        None => {
            out.push(YulStatement::Expr(YulExpr::call("revert", vec![YulExpr::number(0u64), YulExpr::number(0u64)])));
            Ok(())
        }
    }
}

/// `08c379a0` followed by the ABI encoding of a single dynamic `string`:
/// offset word (`0x20`), length word, then the UTF-8 bytes right-padded
/// to a multiple of 32. Only literal string messages are supported;
/// spec.md §4.4.9 only specifies the literal-message form.
fn lower_string_revert(message: &Expr, ctx: &mut Ctx<'_>, out: &mut Vec<YulStatement>) -> Result<(), CompileError> {
    let text = string_literal_text(message)?;
    let _ = ctx;
    let bytes = text.as_bytes();
    let padded_len = bytes.len().div_ceil(32) * 32;

    out.push(mstore_selector(ERROR_SELECTOR));
    out.push(YulStatement::Expr(YulExpr::call("mstore", vec![YulExpr::number(4u64), YulExpr::number(32u64)])));
    out.push(YulStatement::Expr(YulExpr::call(
        "mstore",
        vec![YulExpr::number(36u64), YulExpr::number(bytes.len() as u64)],
    )));
    let mut chunk = [0u8; 32];
    let mut offset = 68u64;
    for window in bytes.chunks(32) {
        chunk = [0u8; 32];
        chunk[..window.len()].copy_from_slice(window);
        out.push(YulStatement::Expr(YulExpr::call(
            "mstore",
            vec![YulExpr::number(offset), YulExpr::Literal(YulLiteral::Number(evmc_yul::BigInt::new(
                evmc_primitives::U256::from_be_bytes(chunk),
                false,
            )))],
        )));
        offset += 32;
    }
    let total = 4 + 32 + 32 + padded_len as u64;
    out.push(YulStatement::Expr(YulExpr::call("revert", vec![YulExpr::number(0u64), YulExpr::number(total)])));
    Ok(())
}

fn string_literal_text(expr: &Expr) -> Result<String, CompileError> {
    match expr {
        Expr::Literal(evmc_ast::Literal::Str(s)) => Ok(s.clone()),
        _ => Err(CompileError::Unsupported(
            "only literal revert/require messages are supported".to_owned(),
        )),
    }
}

fn lower_custom_error(
    name: &str,
    args: &[Expr],
    ctx: &mut Ctx<'_>,
    out: &mut Vec<YulStatement>,
) -> Result<(), CompileError> {
    let mut arg_exprs = Vec::with_capacity(args.len());
    let mut arg_types = Vec::with_capacity(args.len());
    for arg in args {
        arg_types.push(infer_expr_type(arg, ctx));
        arg_exprs.push(lower_expr(arg, ctx, out)?);
    }
    let selector = compute_selector(name, &arg_types);
    let selector_word = u32::from_be_bytes(selector);
    out.push(mstore_selector(selector_word));
    for (i, value) in arg_exprs.into_iter().enumerate() {
        out.push(YulStatement::Expr(YulExpr::call(
            "mstore",
            vec![YulExpr::number(4 + 32 * i as u64), value],
        )));
    }
    let total = 4 + 32 * args.len() as u64;
    out.push(YulStatement::Expr(YulExpr::call("revert", vec![YulExpr::number(0u64), YulExpr::number(total)])));
    Ok(())
}

fn mstore_selector(selector: u32) -> YulStatement {
    let word = evmc_primitives::U256::from(selector) << 224usize;
    YulStatement::Expr(YulExpr::call(
        "mstore",
        vec![YulExpr::number(0u64), YulExpr::Literal(YulLiteral::Number(evmc_yul::BigInt::new(word, false)))],
    ))
}
