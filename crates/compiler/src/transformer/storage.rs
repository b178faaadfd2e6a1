//! Storage-slot derivation for scalars, mappings, and dynamic arrays, per
//! spec.md §4.4.3.

use super::context::Ctx;
use super::types::normalize_write;
use evmc_primitives::U256;
use evmc_types::EvmType;
use evmc_yul::{YulExpr, YulLiteral, YulStatement};

/// `keccak256(pad32(k) ‖ pad32(s))`, written via a two-word scratch
/// buffer at memory offset 0. Returns the statements that must precede
/// use of the returned slot expression.
pub fn mapping_slot(ctx: &Ctx<'_>, base: YulExpr, key: YulExpr, key_ty: &EvmType) -> (Vec<YulStatement>, YulExpr) {
    let masked_key = normalize_write(key_ty, key);
    let temp = ctx.fresh_name("slot");
    let stmts = vec![
        YulStatement::Expr(YulExpr::call("mstore", vec![YulExpr::number(0u64), masked_key])),
        YulStatement::Expr(YulExpr::call("mstore", vec![YulExpr::number(32u64), base])),
        YulStatement::Let {
            vars: vec![temp.clone()],
            value: Some(YulExpr::call("keccak256", vec![YulExpr::number(0u64), YulExpr::number(64u64)])),
        },
    ];
    (stmts, YulExpr::Ident(temp))
}

/// `keccak256(pad32(s)) + i`, the slot of a dynamic array's `i`th
/// (single-word) element. `bounds_check` additionally emits a
/// `panic(0x32)` guard against `i >= length`, where `length` is read
/// from `sload(s)`.
pub fn array_element_slot(
    ctx: &Ctx<'_>,
    base: YulExpr,
    index: YulExpr,
    bounds_check: bool,
) -> (Vec<YulStatement>, YulExpr) {
    let index_name = ctx.fresh_name("idx");
    let mut stmts = vec![YulStatement::Let { vars: vec![index_name.clone()], value: Some(index) }];

    if bounds_check {
        stmts.push(YulStatement::If {
            cond: YulExpr::call(
                "iszero",
                vec![YulExpr::call("lt", vec![YulExpr::Ident(index_name.clone()), YulExpr::call("sload", vec![base.clone()])])],
            ),
            body: vec![panic_call(0x32)],
        });
    }

    let base_name = ctx.fresh_name("elembase");
    stmts.push(YulStatement::Expr(YulExpr::call("mstore", vec![YulExpr::number(0u64), base])));
    stmts.push(YulStatement::Let {
        vars: vec![base_name.clone()],
        value: Some(YulExpr::call("keccak256", vec![YulExpr::number(0u64), YulExpr::number(32u64)])),
    });

    let slot = YulExpr::call("add", vec![YulExpr::Ident(base_name), YulExpr::Ident(index_name)]);
    (stmts, slot)
}

/// `revert(0, 0)` preceded by the standard `Panic(uint256)` encoding at
/// scratch memory, used for array out-of-bounds (`0x32`) and any other
/// EVM-standard panic code.
pub fn panic_call(code: u32) -> YulStatement {
    YulStatement::Block(vec![
        YulStatement::Expr(YulExpr::call(
            "mstore",
            vec![YulExpr::number(0u64), YulExpr::Literal(YulLiteral::Number(panic_selector_word()))],
        )),
        YulStatement::Expr(YulExpr::call("mstore", vec![YulExpr::number(4u64), YulExpr::number(u64::from(code))])),
        YulStatement::Expr(YulExpr::call("revert", vec![YulExpr::number(0u64), YulExpr::number(36u64)])),
    ])
}

/// `Panic(uint256)`'s selector, `0x4e487b71`, left-shifted into the high
/// 4 bytes of a word the way the dispatcher packs a 4-byte selector.
fn panic_selector_word() -> evmc_yul::BigInt {
    let selector: U256 = U256::from(0x4e487b71u64);
    evmc_yul::BigInt::new(selector << 224usize, false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ContractModel;

    fn empty_model() -> ContractModel {
        ContractModel {
            name: "T".into(),
            storage: Vec::new(),
            functions: Vec::new(),
            constructor: None,
            events: Vec::new(),
            enum_names: Default::default(),
            struct_names: Default::default(),
        }
    }

    #[test]
    fn mapping_slot_hashes_two_words() {
        let model = empty_model();
        let ctx = Ctx::new(&model);
        let (stmts, slot) = mapping_slot(&ctx, YulExpr::number(0u64), YulExpr::call0("caller"), &EvmType::Address);
        assert_eq!(stmts.len(), 3);
        assert!(matches!(slot, YulExpr::Ident(_)));
    }
}
