//! Inline-assembly lowering, per spec.md §4.4.10: an `` asm`...` `` template
//! is copied into the output verbatim as a [`YulStatement::Raw`], with
//! `${ident}` interpolation points substituted for the identifier's current
//! Yul representation (a local's Yul name, or `sload(slot)`/`tload(slot)`
//! for a storage variable).

use super::context::{unsupported, Ctx, LocalSlot};
use crate::diagnostics::CompileError;
use evmc_yul::YulStatement;

/// Lowers an `` asm`...` `` template into a single [`YulStatement::Raw`].
pub fn lower_asm(template: &str, ctx: &mut Ctx<'_>) -> Result<YulStatement, CompileError> {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("${") {
        let Some(end) = rest[start..].find('}') else {
            return Err(CompileError::Semantic("unterminated ${..} interpolation in asm block".to_owned()));
        };
        let end = start + end;
        out.push_str(&rest[..start]);
        let ident = rest[start + 2..end].trim();
        out.push_str(&resolve_interpolation(ident, ctx)?);
        rest = &rest[end + 1..];
    }
    out.push_str(rest);

    Ok(YulStatement::Raw(out))
}

fn resolve_interpolation(ident: &str, ctx: &Ctx<'_>) -> Result<String, CompileError> {
    if let Some(local) = ctx.locals.get(ident) {
        return match local {
            LocalSlot::Scalar(name) => Ok(name.clone()),
            LocalSlot::CalldataSlice { .. } => {
                Err(unsupported(format!("asm cannot interpolate the dynamic local `{ident}` directly; use `{ident}.length` or index it")))
            }
        };
    }
    if let Some(var) = ctx.model.storage_variable(ident) {
        let op = if var.transient { "tload" } else { "sload" };
        return Ok(format!("{op}({})", var.slot));
    }
    Err(CompileError::Semantic(format!("asm interpolates unknown identifier: {ident}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ContractModel;
    use std::collections::BTreeSet;

    fn empty_model() -> ContractModel {
        ContractModel {
            name: "T".to_owned(),
            storage: Vec::new(),
            functions: Vec::new(),
            constructor: None,
            events: Vec::new(),
            enum_names: BTreeSet::new(),
            struct_names: BTreeSet::new(),
        }
    }

    #[test]
    fn substitutes_local_identifier() {
        let model = empty_model();
        let mut ctx = Ctx::new(&model);
        ctx.locals.insert("x".to_owned(), LocalSlot::Scalar("x_0".to_owned()));
        let raw = lower_asm("pop(${x})", &mut ctx).unwrap();
        assert_eq!(raw, YulStatement::Raw("pop(x_0)".to_owned()));
    }

    #[test]
    fn unterminated_interpolation_is_an_error() {
        let model = empty_model();
        let mut ctx = Ctx::new(&model);
        assert!(lower_asm("pop(${x)", &mut ctx).is_err());
    }
}
