//! Whole-contract assembly: the creation object (storage-default
//! initialization, constructor, and `return(0, datasize(deployed))`) and
//! the deployed object (selector dispatcher, user functions, and the
//! lazily-requested call/panic helper functions), per spec.md §4.4.1 and
//! §4.4.11.

use super::calldata;
use super::calls::define_call_helper;
use super::context::{mangled_fn_name, Ctx};
use super::encode;
use super::expr::lower_literal;
use super::stmt;
use super::types::normalize_write;
use crate::diagnostics::CompileError;
use crate::model::{ContractModel, FunctionInfo, Visibility};
use evmc_json_abi::StateMutability;
use evmc_types::EvmType;
use evmc_yul::{YulExpr, YulLiteral, YulObject, YulStatement};

/// Builds the full `YulObject` tree for `model`: the creation object
/// wrapping a nested `"<Name>_deployed"` object.
pub fn build(model: &ContractModel) -> Result<YulObject, Vec<CompileError>> {
    let mut errors = Vec::new();
    let mut ctx = Ctx::new(model);

    let deployed = match build_deployed(model, &mut ctx) {
        Ok(obj) => obj,
        Err(e) => {
            errors.push(e);
            return Err(errors);
        }
    };

    let creation_code = match build_creation_code(model, &mut ctx, deployed.name.clone()) {
        Ok(code) => code,
        Err(e) => {
            errors.push(e);
            return Err(errors);
        }
    };

    if !errors.is_empty() {
        return Err(errors);
    }

    let mut creation = YulObject::new(model.name.clone());
    creation.code = creation_code;
    creation.sub_objects.push(deployed);
    Ok(creation)
}

fn build_creation_code(model: &ContractModel, ctx: &mut Ctx<'_>, deployed_name: String) -> Result<Vec<YulStatement>, CompileError> {
    let mut code = Vec::new();

    for var in &model.storage {
        if let Some(default) = &var.default {
            let value = lower_literal(default)?;
            let write = if var.transient { "tstore" } else { "sstore" };
            let normalized = normalize_write(&var.ty, value);
            code.push(YulStatement::Expr(YulExpr::call(write, vec![YulExpr::number(var.slot), normalized])));
        }
    }

    if let Some(ctor) = &model.constructor {
        ctx.reset_locals();
        calldata::decode_params(&ctor.params, 0, ctx, &mut code)?;
        stmt::lower_block(&ctor.body, None, ctx, &mut code)?;
    }

    code.push(YulStatement::Expr(YulExpr::call(
        "datacopy",
        vec![
            YulExpr::number(0u64),
            YulExpr::call("dataoffset", vec![YulExpr::StringLiteral(deployed_name.clone())]),
            YulExpr::call("datasize", vec![YulExpr::StringLiteral(deployed_name.clone())]),
        ],
    )));
    code.push(YulStatement::Expr(YulExpr::call(
        "return",
        vec![YulExpr::number(0u64), YulExpr::call("datasize", vec![YulExpr::StringLiteral(deployed_name)])],
    )));

    Ok(code)
}

fn build_deployed(model: &ContractModel, ctx: &mut Ctx<'_>) -> Result<YulObject, CompileError> {
    let mut code = Vec::new();

    let public_fns: Vec<&FunctionInfo> = model.functions.iter().filter(|f| f.visibility == Visibility::Public).collect();

    let mut cases = Vec::with_capacity(public_fns.len());
    for function in &public_fns {
        cases.push(lower_dispatch_case(function, ctx)?);
    }
    code.push(YulStatement::Switch {
        cond: YulExpr::call("shr", vec![YulExpr::number(224u64), YulExpr::call("calldataload", vec![YulExpr::number(0u64)])]),
        cases,
        default: Some(vec![YulStatement::Expr(YulExpr::call("revert", vec![YulExpr::number(0u64), YulExpr::number(0u64)]))]),
    });

    for function in &model.functions {
        code.push(lower_function(function, ctx)?);
    }

    for helper in ctx.call_helpers.clone() {
        code.push(define_call_helper(helper));
    }

    let mut deployed = YulObject::new(format!("{}_deployed", model.name));
    deployed.code = code;
    Ok(deployed)
}

fn lower_dispatch_case(function: &FunctionInfo, ctx: &mut Ctx<'_>) -> Result<(YulLiteral, Vec<YulStatement>), CompileError> {
    ctx.reset_locals();
    let mut body = Vec::new();

    if !matches!(function.mutability, StateMutability::Payable) {
        body.push(YulStatement::If {
            cond: YulExpr::call0("callvalue"),
            body: vec![YulStatement::Expr(YulExpr::call("revert", vec![YulExpr::number(0u64), YulExpr::number(0u64)]))],
        });
    }

    calldata::decode_params(&function.params, 4, ctx, &mut body)?;
    let args = call_args(&function.params, ctx)?;
    let call_expr = YulExpr::call(mangled_fn_name(&function.name), args);

    match &function.return_type {
        Some(ty) => {
            body.push(YulStatement::Let { vars: vec!["ret".to_owned()], value: Some(call_expr) });
            let (off, len) = encode::encode_return(&[(ty.clone(), YulExpr::Ident("ret".to_owned()))], &mut body)?;
            body.push(YulStatement::Expr(YulExpr::call("return", vec![YulExpr::number(off), YulExpr::number(len)])));
        }
        None => {
            body.push(YulStatement::Expr(call_expr));
            body.push(YulStatement::Expr(YulExpr::call("return", vec![YulExpr::number(0u64), YulExpr::number(0u64)])));
        }
    }

    let selector = function
        .selector
        .ok_or_else(|| CompileError::Internal(format!("public function `{}` has no selector", function.name)))?;
    let selector_value = u32::from_be_bytes(selector);
    Ok((YulLiteral::Number(evmc_yul::BigInt::from(u64::from(selector_value))), body))
}

fn lower_function(function: &FunctionInfo, ctx: &mut Ctx<'_>) -> Result<YulStatement, CompileError> {
    ctx.reset_locals();
    bind_params(&function.params, ctx);
    let params = yul_param_names(&function.params);
    let return_var = function.return_type.as_ref().map(|_| "ret".to_owned());

    let mut body = Vec::new();
    stmt::lower_block(&function.body, return_var.as_deref(), ctx, &mut body)?;

    Ok(YulStatement::FunctionDef {
        name: mangled_fn_name(&function.name),
        params,
        returns: return_var.map(|v| vec![v]).unwrap_or_default(),
        body,
    })
}

/// Flattens a parameter list into Yul parameter names: one name per
/// single-word parameter, or an `(offset, length)` pair for a dynamic
/// one, per the `<name>_len` convention of spec.md §4.4.2.
fn yul_param_names(params: &[(String, EvmType)]) -> Vec<String> {
    let mut names = Vec::with_capacity(params.len());
    for (name, ty) in params {
        if ty.is_single_word() {
            names.push(format!("p_{name}"));
        } else {
            names.push(format!("p_{name}_offset"));
            names.push(format!("p_{name}_len"));
        }
    }
    names
}

/// Binds a function's own parameters into its local scope, using the
/// same flattened names `yul_param_names` assigns.
fn bind_params(params: &[(String, EvmType)], ctx: &mut Ctx<'_>) {
    use super::context::LocalSlot;
    for (name, ty) in params {
        if ty.is_single_word() {
            ctx.locals.insert(name.clone(), LocalSlot::Scalar(format!("p_{name}")));
        } else {
            ctx.locals.insert(
                name.clone(),
                LocalSlot::CalldataSlice { offset: format!("p_{name}_offset"), len: format!("p_{name}_len") },
            );
        }
        ctx.local_types.insert(name.clone(), ty.clone());
    }
}

/// Flattens the already-bound locals for `params` into the argument list
/// for a call to the function that declares them, matching
/// `yul_param_names`'s flattening.
fn call_args(params: &[(String, EvmType)], ctx: &Ctx<'_>) -> Result<Vec<YulExpr>, CompileError> {
    use super::context::LocalSlot;
    let mut args = Vec::with_capacity(params.len());
    for (name, _ty) in params {
        match ctx.locals.get(name) {
            Some(LocalSlot::Scalar(ident)) => args.push(YulExpr::Ident(ident.clone())),
            Some(LocalSlot::CalldataSlice { offset, len }) => {
                args.push(YulExpr::Ident(offset.clone()));
                args.push(YulExpr::Ident(len.clone()));
            }
            None => return Err(CompileError::Internal(format!("parameter `{name}` was not decoded before use"))),
        }
    }
    Ok(args)
}
