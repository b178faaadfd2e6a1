//! `emit` lowering, per spec.md §4.4.8: `logK` where `K = 1 + indexedCount`,
//! topic0 from the event's full-type signature, indexed fields as topics
//! (hashed when dynamic), and non-indexed fields ABI-encoded into scratch
//! memory.

use super::context::{unsupported, Ctx};
use super::expr::lower_expr;
use crate::diagnostics::CompileError;
use evmc_ast::Expr;
use evmc_primitives::keccak256;
use evmc_types::{to_solidity_type, EvmType};
use evmc_yul::{YulExpr, YulLiteral, YulStatement};

/// Lowers `this.Ev.emit({ field: value, ... })` into a `logK(...)` call,
/// appending the necessary memory-encoding statements to `out`.
pub fn lower_emit(event_name: &str, args: &[(String, Expr)], ctx: &mut Ctx<'_>, out: &mut Vec<YulStatement>) -> Result<(), CompileError> {
    let schema = ctx
        .model
        .event(event_name)
        .ok_or_else(|| CompileError::Semantic(format!("unknown event: {event_name}")))?
        .clone();

    let topic0 = topic0_word(&schema);

    let mut topics = vec![YulExpr::Literal(YulLiteral::Number(topic0))];
    let mut data_fields: Vec<(EvmType, YulExpr)> = Vec::new();

    for field in &schema.fields {
        let value_expr = args
            .iter()
            .find(|(name, _)| name == &field.name)
            .map(|(_, expr)| expr)
            .ok_or_else(|| CompileError::Semantic(format!("emit missing field: {}", field.name)))?;
        let value = lower_expr(value_expr, ctx, out)?;

        if field.indexed {
            let topic = match field.ty {
                EvmType::Bytes | EvmType::String => {
                    return Err(unsupported("indexed dynamic (bytes/string) event fields require a keccak256 of their encoded value, which this compiler does not yet lower"));
                }
                _ => value,
            };
            topics.push(topic);
        } else {
            data_fields.push((field.ty.clone(), value));
        }
    }

    if data_fields.iter().any(|(ty, _)| !ty.is_single_word()) {
        return Err(unsupported("non-indexed dynamic event fields are not yet lowered"));
    }

    let mem_ptr = 0u64;
    for (i, (_, value)) in data_fields.iter().enumerate() {
        out.push(YulStatement::Expr(YulExpr::call(
            "mstore",
            vec![YulExpr::number(mem_ptr + 32 * i as u64), value.clone()],
        )));
    }
    let data_len = 32 * data_fields.len() as u64;

    let log_name = format!("log{}", topics.len());
    let mut call_args = vec![YulExpr::number(mem_ptr), YulExpr::number(data_len)];
    call_args.extend(topics);
    out.push(YulStatement::Expr(YulExpr::call(log_name, call_args)));
    Ok(())
}

fn topic0_word(schema: &crate::model::EventSchema) -> evmc_yul::BigInt {
    let mut preimage = String::with_capacity(schema.name.len() + 2);
    preimage.push_str(&schema.name);
    preimage.push('(');
    for (i, field) in schema.fields.iter().enumerate() {
        if i > 0 {
            preimage.push(',');
        }
        preimage.push_str(&to_solidity_type(&field.ty));
    }
    preimage.push(')');
    let hash = keccak256(preimage.as_bytes());
    evmc_yul::BigInt::new(evmc_primitives::U256::from_be_bytes(*hash), false)
}
