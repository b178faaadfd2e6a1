//! External call lowering (spec.md §4.4.7): the lazily-generated
//! `__call_N`/`__staticcall_N`/`__delegatecall_N` helper families, the
//! `I(addr).method(args)` interface-call sugar, and internal (same-
//! contract) function calls.

use super::context::{mangled_fn_name, unsupported, CallHelper, CallKind, Ctx};
use super::expr::{infer_expr_type, lower_expr};
use crate::analyzer::compute_selector;
use crate::diagnostics::CompileError;
use evmc_ast::{Expr, Literal};
use evmc_yul::{YulBlock, YulExpr, YulStatement};

/// Lowers a call expression: internal function call, `keccak256(...)`,
/// `I(addr).method(args)`, or `call.{call,staticcall,delegatecall}(...)`.
pub fn lower_call(callee: &Expr, args: &[Expr], ctx: &mut Ctx<'_>, out: &mut Vec<YulStatement>) -> Result<YulExpr, CompileError> {
    match callee {
        Expr::Ident(name) if name == "keccak256" => lower_keccak256(args, ctx, out),
        Expr::Ident(name) if ctx.model.functions.iter().any(|f| &f.name == name) => {
            lower_internal_call(name, args, ctx, out)
        }
        Expr::Member { base, name } => lower_member_call(base, name, args, ctx, out),
        Expr::Ident(name) => Err(CompileError::Semantic(format!("call to unknown function: {name}"))),
        _ => Err(unsupported("unsupported call target")),
    }
}

fn lower_keccak256(args: &[Expr], ctx: &mut Ctx<'_>, out: &mut Vec<YulStatement>) -> Result<YulExpr, CompileError> {
    let mut words = Vec::with_capacity(args.len());
    for arg in args {
        words.push(lower_expr(arg, ctx, out)?);
    }
    for (i, word) in words.into_iter().enumerate() {
        out.push(YulStatement::Expr(YulExpr::call("mstore", vec![YulExpr::number(32 * i as u64), word])));
    }
    Ok(YulExpr::call("keccak256", vec![YulExpr::number(0u64), YulExpr::number(32 * args.len() as u64)]))
}

fn lower_internal_call(name: &str, args: &[Expr], ctx: &mut Ctx<'_>, out: &mut Vec<YulStatement>) -> Result<YulExpr, CompileError> {
    let mut lowered = Vec::with_capacity(args.len());
    for arg in args {
        lowered.push(lower_expr(arg, ctx, out)?);
    }
    Ok(YulExpr::call(mangled_fn_name(name), lowered))
}

/// `I(addr).method(args)` (interface sugar) or
/// `call.call<R>(target, selector, args...)`/`staticcall`/`delegatecall`.
fn lower_member_call(base: &Expr, name: &str, args: &[Expr], ctx: &mut Ctx<'_>, out: &mut Vec<YulStatement>) -> Result<YulExpr, CompileError> {
    if let Expr::Ident(ns) = base {
        if ns == "call" {
            let kind = match name {
                "call" => CallKind::Call,
                "staticcall" => CallKind::StaticCall,
                "delegatecall" => CallKind::DelegateCall,
                _ => return Err(unsupported(format!("call.{name}"))),
            };
            return lower_low_level_call(kind, args, ctx, out);
        }
    }

    if let Expr::Call { callee: iface_callee, args: iface_args } = base {
        if let (Expr::Ident(_interface_name), [addr_expr]) = (iface_callee.as_ref(), iface_args.as_slice()) {
            let target = lower_expr(addr_expr, ctx, out)?;
            let mut arg_exprs = Vec::with_capacity(args.len());
            let mut arg_types = Vec::with_capacity(args.len());
            for arg in args {
                arg_types.push(infer_expr_type(arg, ctx));
                arg_exprs.push(lower_expr(arg, ctx, out)?);
            }
            let selector = compute_selector(name, &arg_types);
            let selector_word = u32::from_be_bytes(selector);
            return emit_call_helper(CallKind::Call, target, selector_word, arg_exprs, ctx, out);
        }
    }

    Err(unsupported(format!("unsupported call expression `.{name}`")))
}

fn lower_low_level_call(kind: CallKind, args: &[Expr], ctx: &mut Ctx<'_>, out: &mut Vec<YulStatement>) -> Result<YulExpr, CompileError> {
    let [target_expr, selector_expr, rest @ ..] = args else {
        return Err(CompileError::Semantic("call.{call,staticcall,delegatecall} needs (target, selector, args...)".to_owned()));
    };
    let target = lower_expr(target_expr, ctx, out)?;
    let selector_word = match selector_expr {
        Expr::Literal(Literal::Hex(hex)) => {
            let bytes = evmc_primitives::Bytes::from_hex_str(hex)
                .map_err(|e| CompileError::Semantic(e.to_string()))?;
            let mut arr = [0u8; 4];
            let n = bytes.len().min(4);
            arr[..n].copy_from_slice(&bytes[..n]);
            u32::from_be_bytes(arr)
        }
        _ => return Err(unsupported("call.{call,staticcall,delegatecall}'s selector must be a hex literal")),
    };
    let mut arg_exprs = Vec::with_capacity(rest.len());
    for arg in rest {
        arg_exprs.push(lower_expr(arg, ctx, out)?);
    }
    emit_call_helper(kind, target, selector_word, arg_exprs, ctx, out)
}

fn emit_call_helper(
    kind: CallKind,
    target: YulExpr,
    selector_word: u32,
    args: Vec<YulExpr>,
    ctx: &mut Ctx<'_>,
    out: &mut Vec<YulStatement>,
) -> Result<YulExpr, CompileError> {
    let arity = args.len();
    ctx.call_helpers.insert(CallHelper { arity, kind });
    let helper_name = helper_name(kind, arity);
    let mut call_args = vec![target, YulExpr::number(u64::from(selector_word))];
    call_args.extend(args);
    Ok(YulExpr::call(helper_name, call_args))
}

/// The Yul function name for a given call-helper family member.
pub fn helper_name(kind: CallKind, arity: usize) -> String {
    let prefix = match kind {
        CallKind::Call => "__call",
        CallKind::StaticCall => "__staticcall",
        CallKind::DelegateCall => "__delegatecall",
    };
    format!("{prefix}_{arity}")
}

/// Generates the Yul `function` definition for a single call-helper
/// family member: stores the selector and arguments, invokes the
/// opcode, bubbles revert data on failure, and returns the first
/// 32-byte return word.
pub fn define_call_helper(helper: CallHelper) -> YulStatement {
    let name = helper_name(helper.kind, helper.arity);
    let mut params = vec!["target".to_owned(), "selector".to_owned()];
    for i in 0..helper.arity {
        params.push(format!("arg{i}"));
    }

    let mut body: YulBlock = vec![
        YulStatement::Expr(YulExpr::call(
            "mstore",
            vec![YulExpr::number(0u64), YulExpr::call("shl", vec![YulExpr::number(224u64), YulExpr::Ident("selector".into())])],
        )),
    ];
    for i in 0..helper.arity {
        body.push(YulStatement::Expr(YulExpr::call(
            "mstore",
            vec![YulExpr::number(4 + 32 * i as u64), YulExpr::Ident(format!("arg{i}"))],
        )));
    }
    let calldata_len = 4 + 32 * helper.arity as u64;

    let success_call = match helper.kind {
        CallKind::Call => YulExpr::call(
            "call",
            vec![
                YulExpr::call0("gas"),
                YulExpr::Ident("target".into()),
                YulExpr::number(0u64),
                YulExpr::number(0u64),
                YulExpr::number(calldata_len),
                YulExpr::number(0u64),
                YulExpr::number(32u64),
            ],
        ),
        CallKind::StaticCall => YulExpr::call(
            "staticcall",
            vec![
                YulExpr::call0("gas"),
                YulExpr::Ident("target".into()),
                YulExpr::number(0u64),
                YulExpr::number(calldata_len),
                YulExpr::number(0u64),
                YulExpr::number(32u64),
            ],
        ),
        CallKind::DelegateCall => YulExpr::call(
            "delegatecall",
            vec![
                YulExpr::call0("gas"),
                YulExpr::Ident("target".into()),
                YulExpr::number(0u64),
                YulExpr::number(calldata_len),
                YulExpr::number(0u64),
                YulExpr::number(32u64),
            ],
        ),
    };

    body.push(YulStatement::Let { vars: vec!["success".to_owned()], value: Some(success_call) });
    body.push(YulStatement::If {
        cond: YulExpr::call("iszero", vec![YulExpr::Ident("success".into())]),
        body: vec![
            YulStatement::Expr(YulExpr::call(
                "returndatacopy",
                vec![YulExpr::number(0u64), YulExpr::number(0u64), YulExpr::call0("returndatasize")],
            )),
            YulStatement::Expr(YulExpr::call("revert", vec![YulExpr::number(0u64), YulExpr::call0("returndatasize")])),
        ],
    });
    body.push(YulStatement::Assign {
        vars: vec!["result".to_owned()],
        value: YulExpr::call("mload", vec![YulExpr::number(0u64)]),
    });

    YulStatement::FunctionDef {
        name,
        params,
        returns: vec!["result".to_owned()],
        body,
    }
}
