//! Type-directed normalization: masking, sign-extension, and the
//! single-word/dynamic classification spec.md §4.4.2 and §4.4.3 lean on.

use evmc_types::EvmType;
use evmc_yul::YulExpr;

/// Applies the calldata/storage-read normalization for `ty` to `raw`, per
/// spec.md §4.4.2: boolean canonicalization, unsigned masking, signed
/// sign-extension, and address masking. Fixed-size byte arrays and full
/// 256-bit words pass through unchanged.
pub fn normalize_read(ty: &EvmType, raw: YulExpr) -> YulExpr {
    match ty.lowered() {
        EvmType::Bool => YulExpr::call("iszero", vec![YulExpr::call("iszero", vec![raw])]),
        EvmType::Uint(bits) if bits < 256 => mask_uint(bits, raw),
        EvmType::Int(bits) if bits < 256 => sign_extend(bits, raw),
        EvmType::Address => mask_uint(160, raw),
        _ => raw,
    }
}

/// Applies the same normalization before a value is written to storage,
/// so a narrower type never leaks garbage high-order bits into its slot.
pub fn normalize_write(ty: &EvmType, raw: YulExpr) -> YulExpr {
    normalize_read(ty, raw)
}

/// `and(x, (1 << bits) - 1)`.
pub fn mask_uint(bits: u16, x: YulExpr) -> YulExpr {
    if bits >= 256 {
        return x;
    }
    let mask_literal = mask_for_bits(bits);
    YulExpr::call("and", vec![x, YulExpr::Literal(mask_literal)])
}

/// `signextend((bits/8)-1, x)`.
pub fn sign_extend(bits: u16, x: YulExpr) -> YulExpr {
    if bits >= 256 {
        return x;
    }
    let byte_index = (bits / 8).saturating_sub(1);
    YulExpr::call("signextend", vec![YulExpr::number(u64::from(byte_index)), x])
}

fn mask_for_bits(bits: u16) -> evmc_yul::YulLiteral {
    use evmc_primitives::U256;
    let one: U256 = U256::from(1u64);
    let mask = (one << usize::from(bits)) - one;
    evmc_yul::YulLiteral::Number(evmc_yul::BigInt::new(mask, false))
}

/// Whether `ty` occupies a single calldata/storage word, per
/// `EvmType::is_single_word`, re-exported here for callers that only
/// import the transformer's `types` module.
pub fn is_single_word(ty: &EvmType) -> bool {
    ty.is_single_word()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn masks_uint8() {
        let e = mask_uint(8, YulExpr::Ident("x".into()));
        let mut obj = evmc_yul::YulObject::new("T");
        obj.code.push(evmc_yul::YulStatement::Expr(e));
        assert!(evmc_yul::print_object(&obj).contains("and(x, 255)"));
    }
}
