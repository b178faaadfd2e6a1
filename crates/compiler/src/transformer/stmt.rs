//! Statement-level lowering: control flow, `let`-bindings, and the
//! `try { call } catch { .. }` statement form.

use super::context::{unsupported, Ctx, LocalSlot};
use super::expr::lower_expr;
use crate::diagnostics::CompileError;
use evmc_ast::{Expr, Stmt};
use evmc_types::EvmType;
use evmc_yul::{BigInt, YulExpr, YulLiteral, YulStatement};

/// Lowers a function body. `return_var` is the name of the Yul function's
/// named return (if the surface function returns a value), used by
/// `Stmt::Return`.
pub fn lower_block(stmts: &[Stmt], return_var: Option<&str>, ctx: &mut Ctx<'_>, out: &mut Vec<YulStatement>) -> Result<(), CompileError> {
    for stmt in stmts {
        lower_stmt(stmt, return_var, ctx, out)?;
    }
    Ok(())
}

fn lower_stmt(stmt: &Stmt, return_var: Option<&str>, ctx: &mut Ctx<'_>, out: &mut Vec<YulStatement>) -> Result<(), CompileError> {
    match stmt {
        Stmt::If { cond, then_branch, else_branch } => lower_if(cond, then_branch, else_branch.as_deref(), return_var, ctx, out),
        Stmt::For { init, cond, post, body } => lower_for(init.as_deref(), cond.as_ref(), post.as_deref(), body, return_var, ctx, out),
        Stmt::While { cond, body } => lower_for(None, Some(cond), None, body, return_var, ctx, out),
        Stmt::DoWhile { body, cond } => lower_do_while(body, cond, return_var, ctx, out),
        Stmt::Return(value) => lower_return(value.as_ref(), return_var, ctx, out),
        Stmt::Break => {
            out.push(YulStatement::Break);
            Ok(())
        }
        Stmt::Continue => {
            out.push(YulStatement::Continue);
            Ok(())
        }
        Stmt::ExprStmt(expr) => lower_expr_stmt(expr, return_var, ctx, out),
        Stmt::Let { name, type_name, value } => lower_let(name, type_name.as_deref(), value.as_ref(), ctx, out),
    }
}

/// `if cond { then } else { else }` lowers to `switch cond case 0 {
/// else } default { then }`, per spec.md §4.4.6, rather than two guarded
/// `if`s: a single `switch` on the condition's truth value.
fn lower_if(
    cond: &Expr,
    then_branch: &[Stmt],
    else_branch: Option<&[Stmt]>,
    return_var: Option<&str>,
    ctx: &mut Ctx<'_>,
    out: &mut Vec<YulStatement>,
) -> Result<(), CompileError> {
    let cond_expr = lower_expr(cond, ctx, out)?;
    let guard = ctx.fresh_name("if");
    out.push(YulStatement::Let { vars: vec![guard.clone()], value: Some(cond_expr) });

    let mut then_out = Vec::new();
    lower_block(then_branch, return_var, ctx, &mut then_out)?;

    let mut else_out = Vec::new();
    if let Some(else_branch) = else_branch {
        lower_block(else_branch, return_var, ctx, &mut else_out)?;
    }

    out.push(YulStatement::Switch {
        cond: YulExpr::Ident(guard),
        cases: vec![(YulLiteral::Number(BigInt::ZERO), else_out)],
        default: Some(then_out),
    });
    Ok(())
}

fn lower_for(
    init: Option<&Stmt>,
    cond: Option<&Expr>,
    post: Option<&Stmt>,
    body: &[Stmt],
    return_var: Option<&str>,
    ctx: &mut Ctx<'_>,
    out: &mut Vec<YulStatement>,
) -> Result<(), CompileError> {
    let mut init_block = Vec::new();
    if let Some(init) = init {
        lower_stmt(init, return_var, ctx, &mut init_block)?;
    }

    let mut cond_scratch = Vec::new();
    let cond_expr = match cond {
        Some(cond) => lower_expr(cond, ctx, &mut cond_scratch)?,
        None => YulExpr::number(1u64),
    };
    if !cond_scratch.is_empty() {
        return Err(unsupported("a loop condition that requires intermediate statements (e.g. `&&`/`||`) is not yet lowerable"));
    }

    let mut post_block = Vec::new();
    if let Some(post) = post {
        lower_stmt(post, return_var, ctx, &mut post_block)?;
    }

    let mut body_block = Vec::new();
    lower_block(body, return_var, ctx, &mut body_block)?;

    out.push(YulStatement::For { init: init_block, cond: cond_expr, post: post_block, body: body_block });
    Ok(())
}

fn lower_do_while(body: &[Stmt], cond: &Expr, return_var: Option<&str>, ctx: &mut Ctx<'_>, out: &mut Vec<YulStatement>) -> Result<(), CompileError> {
    lower_block(body, return_var, ctx, out)?;

    let mut loop_body = Vec::new();
    lower_block(body, return_var, ctx, &mut loop_body)?;
    let mut cond_scratch = Vec::new();
    let cond_expr = lower_expr(cond, ctx, &mut cond_scratch)?;
    if !cond_scratch.is_empty() {
        return Err(unsupported("a do/while condition that requires intermediate statements is not yet lowerable"));
    }
    loop_body.push(YulStatement::If { cond: YulExpr::call("iszero", vec![cond_expr]), body: vec![YulStatement::Break] });

    out.push(YulStatement::For { init: Vec::new(), cond: YulExpr::number(1u64), post: Vec::new(), body: loop_body });
    Ok(())
}

fn lower_return(value: Option<&Expr>, return_var: Option<&str>, ctx: &mut Ctx<'_>, out: &mut Vec<YulStatement>) -> Result<(), CompileError> {
    match (value, return_var) {
        (Some(expr), Some(var)) => {
            let v = lower_expr(expr, ctx, out)?;
            out.push(YulStatement::Assign { vars: vec![var.to_owned()], value: v });
        }
        (Some(expr), None) => {
            // Evaluated for side effects only; the surface function declares no
            // return type, so the value has nowhere to go.
            lower_expr(expr, ctx, out)?;
        }
        (None, _) => {}
    }
    out.push(YulStatement::Leave);
    Ok(())
}

fn lower_expr_stmt(expr: &Expr, return_var: Option<&str>, ctx: &mut Ctx<'_>, out: &mut Vec<YulStatement>) -> Result<(), CompileError> {
    if let Expr::Try { expr: guarded, catch_body } = expr {
        return lower_try(guarded, catch_body, return_var, ctx, out);
    }
    let value = lower_expr(expr, ctx, out)?;
    if matches!(value, YulExpr::Call { .. }) {
        out.push(YulStatement::Expr(value));
    }
    Ok(())
}

/// `try { call } catch { catch_body }`.
///
/// The call-helper functions `calls.rs` generates always bubble a failed
/// call's revert data rather than returning a success flag (spec.md
/// §4.4.7 does not specify a non-reverting call form), so there is no
/// failure signal this lowering could branch `catch_body` on without
/// mis-encoding every other call site that relies on bubble-on-failure.
/// Rather than silently drop `catch_body` and let `try` behave as a bare
/// call — as an earlier draft of this lowering did — this is reported as
/// `UnsupportedError`, consistent with spec.md §7's definition of that
/// error kind.
fn lower_try(guarded: &Expr, _catch_body: &[Stmt], _return_var: Option<&str>, _ctx: &mut Ctx<'_>, _out: &mut Vec<YulStatement>) -> Result<(), CompileError> {
    match guarded {
        Expr::Call { .. } => Err(unsupported(
            "`try`/`catch` is not yet lowerable: no call form exposes a non-reverting success flag for `catch_body` to branch on",
        )),
        _ => Err(unsupported("`try` only guards a call expression")),
    }
}

fn lower_let(name: &str, type_name: Option<&str>, value: Option<&Expr>, ctx: &mut Ctx<'_>, out: &mut Vec<YulStatement>) -> Result<(), CompileError> {
    let ty = infer_local_type(type_name);
    let local = ctx.fresh_name(name);

    let init = match value {
        Some(expr) => Some(lower_expr(expr, ctx, out)?),
        None => None,
    };
    out.push(YulStatement::Let { vars: vec![local.clone()], value: init });

    ctx.locals.insert(name.to_owned(), LocalSlot::Scalar(local));
    ctx.local_types.insert(name.to_owned(), ty);
    Ok(())
}

/// A local's type, inferred only from its written annotation (spec.md §1
/// excludes full type inference): `int`-prefixed spellings are signed,
/// everything else defaults to `uint256` for the purposes of the
/// signedness heuristic in `expr.rs`.
fn infer_local_type(type_name: Option<&str>) -> EvmType {
    match type_name {
        Some(name) if name.starts_with("int") => EvmType::Int(256),
        Some("bool") => EvmType::Bool,
        Some("address") => EvmType::Address,
        _ => EvmType::Uint(256),
    }
}
