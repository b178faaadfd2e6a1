//! Expression lowering: operator-to-opcode mapping (spec.md §4.4.5),
//! storage/local access, intrinsics, and the non-control-flow expression
//! forms (`Emit`, `Require`, `Revert`, `Try`, `Asm`, `Assign`).

use super::context::{unsupported, Ctx, LocalSlot};
use super::events::lower_emit;
use super::errors::{lower_require, lower_revert};
use super::storage::{array_element_slot, mapping_slot};
use super::types::{mask_uint, normalize_read, normalize_write};
use super::{asm, calls};
use crate::diagnostics::CompileError;
use evmc_ast::{BinaryOp, Expr, Literal, UnaryOp};
use evmc_types::EvmType;
use evmc_yul::{YulExpr, YulLiteral, YulStatement};

/// Lowers `expr` to a single-word Yul expression, emitting any
/// supporting statements (hashing, short-circuit temporaries) into `out`
/// first.
pub fn lower_expr(expr: &Expr, ctx: &mut Ctx<'_>, out: &mut Vec<YulStatement>) -> Result<YulExpr, CompileError> {
    match expr {
        Expr::Literal(lit) => lower_literal(lit),
        Expr::Ident(name) => lower_ident(name, ctx),
        Expr::Member { base, name } => lower_member(base, name, ctx, out),
        Expr::Index { base, index } => lower_index(base, index, ctx, out),
        Expr::Binary { op, lhs, rhs } => lower_binary(*op, lhs, rhs, ctx, out),
        Expr::Unary { op, expr } => lower_unary(*op, expr, ctx, out),
        Expr::Assign { target, value } => lower_assign(target, value, ctx, out),
        Expr::Call { callee, args } => calls::lower_call(callee, args, ctx, out),
        Expr::Emit { event, args } => {
            lower_emit(event, args, ctx, out)?;
            Ok(YulExpr::number(0u64))
        }
        Expr::Require { cond, message } => {
            lower_require(cond, message.as_deref(), ctx, out)?;
            Ok(YulExpr::number(0u64))
        }
        Expr::Revert { error, args, message } => {
            lower_revert(error.as_deref(), args, message.as_deref(), ctx, out)?;
            Ok(YulExpr::number(0u64))
        }
        Expr::Asm { template } => asm::lower_asm(template, ctx).map(|stmt| {
            out.push(stmt);
            YulExpr::number(0u64)
        }),
        Expr::Try { .. } => Err(unsupported("try/catch is only lowerable as a statement")),
    }
}

/// Lowers a literal to its single-word Yul representation. `pub(crate)`
/// so `layout.rs` can reuse it for storage-variable default initializers.
pub(crate) fn lower_literal(lit: &Literal) -> Result<YulExpr, CompileError> {
    Ok(match lit {
        Literal::Int(n) => YulExpr::number(*n),
        Literal::Bool(b) => YulExpr::Literal(YulLiteral::Bool(*b)),
        Literal::Hex(s) => {
            let bytes = evmc_primitives::Bytes::from_hex_str(s)
                .map_err(|e| CompileError::Semantic(format!("bad hex literal {s}: {e}")))?;
            let mut word = [0u8; 32];
            let len = bytes.len().min(32);
            word[..len].copy_from_slice(&bytes[..len]);
            YulExpr::Literal(YulLiteral::Number(evmc_yul::BigInt::new(
                evmc_primitives::U256::from_be_bytes(word),
                false,
            )))
        }
        Literal::Address(s) => {
            let addr: evmc_primitives::Address =
                s.parse().map_err(|e: evmc_primitives::AddressError| CompileError::Semantic(e.to_string()))?;
            YulExpr::Literal(YulLiteral::Number(evmc_yul::BigInt::new(
                evmc_primitives::U256::from_be_bytes(*addr.into_word()),
                false,
            )))
        }
        Literal::Str(_) => {
            return Err(unsupported(
                "a bare string literal has no single-word representation outside require/revert/emit",
            ))
        }
        Literal::Neg(inner) => {
            let YulExpr::Literal(YulLiteral::Number(n)) = lower_literal(inner)? else {
                return Err(unsupported("negation of a non-numeric literal"));
            };
            YulExpr::Literal(YulLiteral::Number(evmc_yul::BigInt::new(n.magnitude(), !n.is_negative())))
        }
    })
}

fn lower_ident(name: &str, ctx: &mut Ctx<'_>) -> Result<YulExpr, CompileError> {
    if let Some(slot) = ctx.locals.get(name) {
        return match slot {
            LocalSlot::Scalar(ident) => Ok(YulExpr::Ident(ident.clone())),
            LocalSlot::CalldataSlice { .. } => {
                Err(unsupported(format!("`{name}` is a dynamic calldata value; index or slice it")))
            }
        };
    }
    if name == "MAX_U256" {
        return Ok(YulExpr::Literal(YulLiteral::Number(evmc_yul::BigInt::new(
            evmc_primitives::U256::MAX,
            false,
        ))));
    }
    if let Some(var) = ctx.model.storage_variable(name) {
        let read = if var.transient { "tload" } else { "sload" };
        return Ok(normalize_read(&var.ty, YulExpr::call(read, vec![YulExpr::number(var.slot)])));
    }
    Err(CompileError::Semantic(format!("unresolved identifier: {name}")))
}

/// Resolves `this.field`, `msg.sender`, `block.timestamp`, and similar
/// namespaced intrinsics (spec.md §6).
fn lower_member(base: &Expr, name: &str, ctx: &mut Ctx<'_>, out: &mut Vec<YulStatement>) -> Result<YulExpr, CompileError> {
    if let Expr::Ident(ns) = base {
        match ns.as_str() {
            "this" => return lower_ident(name, ctx),
            "msg" => {
                return match name {
                    "sender" => Ok(YulExpr::call0("caller")),
                    "value" => Ok(YulExpr::call0("callvalue")),
                    _ => Err(unsupported(format!("msg.{name}"))),
                };
            }
            "block" => {
                let builtin = match name {
                    "timestamp" => "timestamp",
                    "number" => "number",
                    "difficulty" | "prevrandao" => "prevrandao",
                    "chainid" => "chainid",
                    "coinbase" => "coinbase",
                    "basefee" => "basefee",
                    "gaslimit" => "gaslimit",
                    _ => return Err(unsupported(format!("block.{name}"))),
                };
                return Ok(YulExpr::call0(builtin));
            }
            "tx" => {
                let builtin = match name {
                    "origin" => "origin",
                    "gasprice" => "gasprice",
                    _ => return Err(unsupported(format!("tx.{name}"))),
                };
                return Ok(YulExpr::call0(builtin));
            }
            _ => {}
        }
    }
    // `<slice>.length` on a calldata dynamic parameter.
    if let Expr::Ident(base_name) = base {
        if name == "length" {
            if let Some(LocalSlot::CalldataSlice { len, .. }) = ctx.locals.get(base_name) {
                return Ok(YulExpr::Ident(len.clone()));
            }
        }
    }
    let _ = out;
    Err(unsupported(format!("member access `.{name}` on a non-intrinsic base")))
}

fn lower_index(base: &Expr, index: &Expr, ctx: &mut Ctx<'_>, out: &mut Vec<YulStatement>) -> Result<YulExpr, CompileError> {
    let (base_slot, elem_ty) = storage_base(base, ctx)?;
    match elem_ty {
        EvmType::Mapping(key_ty, value_ty) => {
            let key_expr = lower_expr(index, ctx, out)?;
            let (stmts, slot) = mapping_slot(ctx, base_slot, key_expr, &key_ty);
            out.extend(stmts);
            let read = "sload";
            Ok(normalize_read(&value_ty, YulExpr::call(read, vec![slot])))
        }
        EvmType::Array(elem) => {
            let index_expr = lower_expr(index, ctx, out)?;
            let (stmts, slot) = array_element_slot(ctx, base_slot, index_expr, true);
            out.extend(stmts);
            Ok(normalize_read(&elem, YulExpr::call("sload", vec![slot])))
        }
        other => Err(unsupported(format!("indexing into non-mapping/array type {other:?}"))),
    }
}

/// Resolves the base expression of an `Index`/assignment target to a
/// storage variable's slot and its declared (mapping/array) type.
fn storage_base(base: &Expr, ctx: &Ctx<'_>) -> Result<(YulExpr, EvmType), CompileError> {
    let name = match base {
        Expr::Ident(name) => name.clone(),
        Expr::Member { base, name } if matches!(base.as_ref(), Expr::Ident(ns) if ns == "this") => name.clone(),
        _ => return Err(unsupported("indexing into a non-storage base expression")),
    };
    let var = ctx
        .model
        .storage_variable(&name)
        .ok_or_else(|| CompileError::Semantic(format!("unresolved identifier: {name}")))?;
    Ok((YulExpr::number(var.slot), var.ty.clone()))
}

fn lower_binary(op: BinaryOp, lhs: &Expr, rhs: &Expr, ctx: &mut Ctx<'_>, out: &mut Vec<YulStatement>) -> Result<YulExpr, CompileError> {
    if matches!(op, BinaryOp::And | BinaryOp::Or) {
        return lower_short_circuit(op, lhs, rhs, ctx, out);
    }

    let signed = operand_is_signed(lhs, ctx) || operand_is_signed(rhs, ctx);
    let l = lower_expr(lhs, ctx, out)?;
    let r = lower_expr(rhs, ctx, out)?;

    Ok(match op {
        BinaryOp::Add => YulExpr::call("add", vec![l, r]),
        BinaryOp::Sub => YulExpr::call("sub", vec![l, r]),
        BinaryOp::Mul => YulExpr::call("mul", vec![l, r]),
        BinaryOp::Div => YulExpr::call(if signed { "sdiv" } else { "div" }, vec![l, r]),
        BinaryOp::Mod => YulExpr::call(if signed { "smod" } else { "mod" }, vec![l, r]),
        BinaryOp::Lt => YulExpr::call(if signed { "slt" } else { "lt" }, vec![l, r]),
        BinaryOp::Gt => YulExpr::call(if signed { "sgt" } else { "gt" }, vec![l, r]),
        BinaryOp::Le => {
            let gt = if signed { "sgt" } else { "gt" };
            YulExpr::call("iszero", vec![YulExpr::call(gt, vec![l, r])])
        }
        BinaryOp::Ge => {
            let lt = if signed { "slt" } else { "lt" };
            YulExpr::call("iszero", vec![YulExpr::call(lt, vec![l, r])])
        }
        BinaryOp::Eq => YulExpr::call("eq", vec![l, r]),
        BinaryOp::Ne => YulExpr::call("iszero", vec![YulExpr::call("eq", vec![l, r])]),
        BinaryOp::BitAnd => YulExpr::call("and", vec![l, r]),
        BinaryOp::BitOr => YulExpr::call("or", vec![l, r]),
        BinaryOp::BitXor => YulExpr::call("xor", vec![l, r]),
        BinaryOp::Shl => YulExpr::call("shl", vec![r, l]),
        BinaryOp::Shr => YulExpr::call(if signed { "sar" } else { "shr" }, vec![r, l]),
        BinaryOp::And | BinaryOp::Or => unreachable!("handled above"),
    })
}

/// `&&`/`||` short-circuit by binding the result to a fresh local inside
/// an `if`, rather than lowering to `and`/`or` (which would always
/// evaluate both operands, per spec.md §4.4.5).
fn lower_short_circuit(op: BinaryOp, lhs: &Expr, rhs: &Expr, ctx: &mut Ctx<'_>, out: &mut Vec<YulStatement>) -> Result<YulExpr, CompileError> {
    let result = ctx.fresh_name("sc");
    let l = lower_expr(lhs, ctx, out)?;
    out.push(YulStatement::Let { vars: vec![result.clone()], value: Some(l) });

    let mut rhs_stmts = Vec::new();
    let r = lower_expr(rhs, ctx, &mut rhs_stmts)?;
    rhs_stmts.push(YulStatement::Assign { vars: vec![result.clone()], value: r });

    let guard = match op {
        BinaryOp::And => YulExpr::Ident(result.clone()),
        BinaryOp::Or => YulExpr::call("iszero", vec![YulExpr::Ident(result.clone())]),
        _ => unreachable!(),
    };
    out.push(YulStatement::If { cond: guard, body: rhs_stmts });
    Ok(YulExpr::Ident(result))
}

fn lower_unary(op: UnaryOp, expr: &Expr, ctx: &mut Ctx<'_>, out: &mut Vec<YulStatement>) -> Result<YulExpr, CompileError> {
    let v = lower_expr(expr, ctx, out)?;
    Ok(match op {
        UnaryOp::Neg => YulExpr::call("sub", vec![YulExpr::number(0u64), v]),
        UnaryOp::Not => YulExpr::call("iszero", vec![v]),
        UnaryOp::BitNot => YulExpr::call("not", vec![v]),
    })
}

fn lower_assign(target: &Expr, value: &Expr, ctx: &mut Ctx<'_>, out: &mut Vec<YulStatement>) -> Result<YulExpr, CompileError> {
    let rhs = lower_expr(value, ctx, out)?;
    match target {
        Expr::Ident(name) => {
            if let Some(LocalSlot::Scalar(ident)) = ctx.locals.get(name).cloned() {
                out.push(YulStatement::Assign { vars: vec![ident], value: rhs });
                return Ok(YulExpr::number(0u64));
            }
            if let Some(var) = ctx.model.storage_variable(name) {
                let write = if var.transient { "tstore" } else { "sstore" };
                let normalized = normalize_write(&var.ty, rhs);
                out.push(YulStatement::Expr(YulExpr::call(write, vec![YulExpr::number(var.slot), normalized])));
                return Ok(YulExpr::number(0u64));
            }
            Err(CompileError::Semantic(format!("unresolved assignment target: {name}")))
        }
        Expr::Member { base, name } if matches!(base.as_ref(), Expr::Ident(ns) if ns == "this") => {
            lower_assign(&Expr::Ident(name.clone()), value, ctx, out)
        }
        Expr::Index { base, index } => {
            let (base_slot, elem_ty) = storage_base(base, ctx)?;
            match elem_ty {
                EvmType::Mapping(key_ty, value_ty) => {
                    let key_expr = lower_expr(index, ctx, out)?;
                    let (stmts, slot) = mapping_slot(ctx, base_slot, key_expr, &key_ty);
                    out.extend(stmts);
                    let normalized = normalize_write(&value_ty, rhs);
                    out.push(YulStatement::Expr(YulExpr::call("sstore", vec![slot, normalized])));
                    Ok(YulExpr::number(0u64))
                }
                EvmType::Array(elem) => {
                    let index_expr = lower_expr(index, ctx, out)?;
                    let (stmts, slot) = array_element_slot(ctx, base_slot, index_expr, true);
                    out.extend(stmts);
                    let normalized = normalize_write(&elem, rhs);
                    out.push(YulStatement::Expr(YulExpr::call("sstore", vec![slot, normalized])));
                    Ok(YulExpr::number(0u64))
                }
                other => Err(unsupported(format!("assigning into non-mapping/array type {other:?}"))),
            }
        }
        _ => Err(unsupported("unsupported assignment target")),
    }
}

/// Heuristic signedness used to choose `div`/`sdiv` etc. This is not a
/// type checker (spec.md §1 excludes that): it only inspects the
/// operand's immediate identifier/storage/parameter type, defaulting to
/// unsigned when it can't tell, which matches every surface example in
/// spec.md §8.
fn operand_is_signed(expr: &Expr, ctx: &Ctx<'_>) -> bool {
    match expr {
        Expr::Ident(name) => ctx
            .local_types
            .get(name)
            .or_else(|| ctx.model.storage_variable(name).map(|v| &v.ty))
            .map(|ty| matches!(ty, EvmType::Int(_)))
            .unwrap_or(false),
        Expr::Member { base, name } if matches!(base.as_ref(), Expr::Ident(ns) if ns == "this") => {
            ctx.model.storage_variable(name).map(|v| matches!(v.ty, EvmType::Int(_))).unwrap_or(false)
        }
        Expr::Unary { op: UnaryOp::Neg, expr } => operand_is_signed(expr, ctx),
        Expr::Literal(Literal::Neg(_)) => true,
        _ => false,
    }
}

/// Best-effort type inference for a single call-argument expression, used
/// to derive an interface-call's or custom-error's ABI signature (spec.md
/// §4.4.7, §4.4.9) without a full type checker (spec.md §1's non-goal).
/// Inspects only the expression's immediate shape, same as
/// `operand_is_signed`, and falls back to `Uint(256)` when nothing is
/// known.
pub(crate) fn infer_expr_type(expr: &Expr, ctx: &Ctx<'_>) -> EvmType {
    match expr {
        Expr::Ident(name) => ctx
            .local_types
            .get(name)
            .cloned()
            .or_else(|| ctx.model.storage_variable(name).map(|v| v.ty.clone()))
            .unwrap_or(EvmType::Uint(256)),
        Expr::Member { base, name } if matches!(base.as_ref(), Expr::Ident(ns) if ns == "this") => {
            ctx.model.storage_variable(name).map(|v| v.ty.clone()).unwrap_or(EvmType::Uint(256))
        }
        Expr::Member { base, name } if matches!(base.as_ref(), Expr::Ident(ns) if ns == "msg") && name == "sender" => {
            EvmType::Address
        }
        Expr::Index { base, .. } => match storage_base(base, ctx) {
            Ok((_, EvmType::Mapping(_, value_ty))) => *value_ty,
            Ok((_, EvmType::Array(elem_ty))) => *elem_ty,
            _ => EvmType::Uint(256),
        },
        Expr::Literal(Literal::Bool(_)) => EvmType::Bool,
        Expr::Literal(Literal::Address(_)) => EvmType::Address,
        Expr::Literal(Literal::Hex(_)) => EvmType::FixedBytes(32),
        Expr::Literal(Literal::Neg(_)) => EvmType::Int(256),
        Expr::Unary { op: UnaryOp::Neg, expr } => match infer_expr_type(expr, ctx) {
            EvmType::Uint(bits) => EvmType::Int(bits),
            other => other,
        },
        _ => EvmType::Uint(256),
    }
}

/// Builds the masked/sign-extended normalization for a freshly-decoded
/// calldata word of type `ty`. Exposed for `calldata.rs`.
pub fn normalize_calldata_word(ty: &EvmType, raw: YulExpr) -> YulExpr {
    normalize_read(ty, raw)
}

/// Re-exported for submodules that mask values before storing them.
pub fn mask(bits: u16, x: YulExpr) -> YulExpr {
    mask_uint(bits, x)
}
