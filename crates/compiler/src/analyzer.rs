//! Walks a parsed [`SourceFile`] and produces a [`ContractModel`].
//!
//! Mirrors spec.md §4.3: a symbol-table pre-pass so type spellings can
//! resolve enum/struct names, mixin linearization, slot assignment,
//! decorator-to-attribute resolution, and event-schema extraction. Every
//! rule here accumulates diagnostics rather than aborting on the first
//! error, per the error-handling policy in spec.md §7.

use crate::diagnostics::CompileError;
use crate::model::{ContractModel, EventField, EventSchema, FunctionInfo, StorageVariable, Visibility};
use crate::symbol_table::SymbolTable;
use evmc_ast::{ClassDecl, Decorator, EventInterfaceDecl, MethodDecl, PropertyDecl, SourceFile};
use evmc_json_abi::StateMutability;
use evmc_primitives::{keccak256, Selector, U256};
use evmc_types::{parse_type, to_solidity_type, EvmType, TypeContext};
use std::collections::HashMap;

/// Analyzes a [`SourceFile`], producing a [`ContractModel`] and every
/// diagnostic collected along the way.
///
/// A non-empty error list does not necessarily mean `model` is `None`:
/// the analyzer keeps building as much of the model as it safely can so
/// later passes (and the caller) see the fullest possible diagnostic set.
/// The facade is the one that turns any non-empty error list into an
/// empty final output, per spec.md §7.
pub fn analyze(source: &SourceFile) -> (Option<ContractModel>, Vec<CompileError>) {
    let mut errors = Vec::new();

    let root = match find_root_class(source) {
        Some(class) => class,
        None => {
            errors.push(CompileError::Semantic(
                "No contract found. Export a class to define a contract.".to_owned(),
            ));
            return (None, errors);
        }
    };

    let symbols = SymbolTable::from_source(source);
    let (properties, methods) = linearize(root, source, &mut errors);

    let storage = analyze_storage(&properties, &symbols, &mut errors);
    let events = analyze_events(&properties, source, &symbols, &mut errors);
    let (functions, constructor) = analyze_methods(&methods, &symbols, &mut errors);

    let model = ContractModel {
        name: root.name.clone(),
        storage,
        functions,
        constructor,
        events,
        enum_names: symbols.enum_names().clone(),
        struct_names: symbols.struct_names().cloned().collect(),
    };

    (Some(model), errors)
}

/// The exported class is the one no other class's `mixins` list names: a
/// mixin parent is referenced but never itself the compiled contract.
///
/// This AST carries no explicit "export" flag (the shape is a capability
/// interface any front end may produce, and the front end is out of
/// scope per spec.md §1), so this is the analyzer's own resolution rule
/// rather than something spec.md pins directly; see DESIGN.md.
fn find_root_class(source: &SourceFile) -> Option<&ClassDecl> {
    if source.classes.is_empty() {
        return None;
    }
    let referenced: std::collections::HashSet<&str> = source
        .classes
        .iter()
        .flat_map(|c| c.mixins.iter().map(String::as_str))
        .collect();
    source
        .classes
        .iter()
        .find(|c| !referenced.contains(c.name.as_str()))
        .or_else(|| source.classes.first())
}

/// Linearizes a class's mixin chain left-to-right, then appends the
/// class's own declarations, with later entries overriding earlier ones
/// by name (spec.md §4.4.11). Overrides replace the earlier entry
/// in place, preserving the position the name was first introduced at.
fn linearize<'a>(
    class: &'a ClassDecl,
    source: &'a SourceFile,
    errors: &mut Vec<CompileError>,
) -> (Vec<&'a PropertyDecl>, Vec<&'a MethodDecl>) {
    let mut properties: Vec<&PropertyDecl> = Vec::new();
    let mut prop_index: HashMap<&str, usize> = HashMap::new();
    let mut methods: Vec<&MethodDecl> = Vec::new();
    let mut method_index: HashMap<&str, usize> = HashMap::new();

    fn visit<'a>(
        class: &'a ClassDecl,
        source: &'a SourceFile,
        properties: &mut Vec<&'a PropertyDecl>,
        prop_index: &mut HashMap<&'a str, usize>,
        methods: &mut Vec<&'a MethodDecl>,
        method_index: &mut HashMap<&'a str, usize>,
        errors: &mut Vec<CompileError>,
    ) {
        for mixin_name in &class.mixins {
            match source.classes.iter().find(|c| &c.name == mixin_name) {
                Some(mixin) => {
                    visit(mixin, source, properties, prop_index, methods, method_index, errors)
                }
                None => errors
                    .push(CompileError::Semantic(format!("Unknown mixin: {mixin_name}"))),
            }
        }
        for prop in &class.properties {
            match prop_index.get(prop.name.as_str()) {
                Some(&i) => properties[i] = prop,
                None => {
                    prop_index.insert(&prop.name, properties.len());
                    properties.push(prop);
                }
            }
        }
        for method in &class.methods {
            let key: &str = if method.is_constructor { "constructor" } else { &method.name };
            match method_index.get(key) {
                Some(&i) => methods[i] = method,
                None => {
                    method_index.insert(key, methods.len());
                    methods.push(method);
                }
            }
        }
    }

    visit(class, source, &mut properties, &mut prop_index, &mut methods, &mut method_index, errors);
    (properties, methods)
}

fn analyze_storage(
    properties: &[&PropertyDecl],
    symbols: &SymbolTable,
    errors: &mut Vec<CompileError>,
) -> Vec<StorageVariable> {
    let mut out = Vec::new();
    let mut next_auto = U256::ZERO;
    let mut seen_slots: HashMap<U256, String> = HashMap::new();

    for prop in properties {
        let is_storage = prop.decorators.iter().any(|d| matches!(d, Decorator::Storage));
        let is_transient = prop.decorators.iter().any(|d| matches!(d, Decorator::Transient));
        let is_event = prop.decorators.iter().any(|d| matches!(d, Decorator::Event));
        if is_event || (!is_storage && !is_transient) {
            continue;
        }

        let ty = match parse_type(&prop.type_name, symbols as &dyn TypeContext) {
            Ok(ty) => ty,
            Err(err) => {
                errors.push(CompileError::Semantic(err.to_string()));
                continue;
            }
        };
        let explicit_slot = prop.decorators.iter().find_map(|d| match d {
            Decorator::Slot(n) => Some(*n),
            _ => None,
        });

        let slot = match explicit_slot {
            Some(n) => {
                if n < 0 {
                    errors.push(CompileError::Semantic(format!(
                        "@slot({n}) on {} must be non-negative",
                        prop.name
                    )));
                    continue;
                }
                U256::from(n as u128)
            }
            None => {
                let s = next_auto;
                next_auto += U256::from(1u64);
                s
            }
        };

        if let Some(prev) = seen_slots.insert(slot, prop.name.clone()) {
            errors.push(CompileError::Semantic(format!(
                "Slot {slot} is assigned to both {prev} and {}",
                prop.name
            )));
        }

        let default = prop.initializer.clone();
        out.push(StorageVariable { name: prop.name.clone(), ty, slot, default, transient: is_transient });
    }

    out
}

fn analyze_events(
    properties: &[&PropertyDecl],
    source: &SourceFile,
    symbols: &SymbolTable,
    errors: &mut Vec<CompileError>,
) -> Vec<EventSchema> {
    let mut out = Vec::new();
    for prop in properties {
        let is_event = prop.decorators.iter().any(|d| matches!(d, Decorator::Event));
        if !is_event {
            continue;
        }
        let Some(iface) = find_event_interface(source, &prop.type_name) else {
            errors.push(CompileError::Semantic(format!(
                "Unknown event schema: {}",
                prop.type_name
            )));
            continue;
        };
        match build_event_schema(iface, symbols) {
            Ok(schema) => out.push(schema),
            Err(err) => errors.push(err),
        }
    }
    out
}

fn find_event_interface<'a>(source: &'a SourceFile, name: &str) -> Option<&'a EventInterfaceDecl> {
    source.event_interfaces.iter().find(|e| e.name == name)
}

fn build_event_schema(
    iface: &EventInterfaceDecl,
    symbols: &SymbolTable,
) -> Result<EventSchema, CompileError> {
    let mut fields = Vec::with_capacity(iface.fields.len());
    let mut indexed_count = 0usize;
    for field in &iface.fields {
        let ty = parse_type(&field.type_name, symbols as &dyn TypeContext)
            .map_err(|err| CompileError::Semantic(err.to_string()))?;
        if field.indexed {
            indexed_count += 1;
        }
        fields.push(EventField { name: field.name.clone(), ty, indexed: field.indexed });
    }
    if indexed_count > 3 {
        return Err(CompileError::Semantic(format!(
            "event {} has {indexed_count} indexed fields, at most 3 are permitted",
            iface.name
        )));
    }
    Ok(EventSchema { name: iface.name.clone(), fields })
}

fn analyze_methods(
    methods: &[&MethodDecl],
    symbols: &SymbolTable,
    errors: &mut Vec<CompileError>,
) -> (Vec<FunctionInfo>, Option<FunctionInfo>) {
    let mut out = Vec::new();
    let mut constructor = None;

    for method in methods {
        let mut params = Vec::with_capacity(method.params.len());
        let mut param_types = Vec::with_capacity(method.params.len());
        for param in &method.params {
            if param.name == "this" {
                continue;
            }
            match parse_type(&param.type_name, symbols as &dyn TypeContext) {
                Ok(ty) => {
                    if ty.is_storage_only() {
                        errors.push(CompileError::Semantic(format!(
                            "mapping type used as parameter in {}",
                            method.name
                        )));
                    }
                    param_types.push(ty.clone());
                    params.push((param.name.clone(), ty));
                }
                Err(err) => errors.push(CompileError::Semantic(err.to_string())),
            }
        }

        let return_type = match &method.return_type {
            Some(spelling) => match parse_type(spelling, symbols as &dyn TypeContext) {
                Ok(ty) => {
                    if ty.is_storage_only() {
                        errors.push(CompileError::Semantic(format!(
                            "mapping type used as return in {}",
                            method.name
                        )));
                    }
                    Some(ty)
                }
                Err(err) => {
                    errors.push(CompileError::Semantic(err.to_string()));
                    None
                }
            },
            None => None,
        };

        let payable = method.decorators.iter().any(|d| matches!(d, Decorator::Payable));
        let view = method.decorators.iter().any(|d| matches!(d, Decorator::View));
        let pure = method.decorators.iter().any(|d| matches!(d, Decorator::Pure));
        let mutability = StateMutability::from_decorators(payable, view, pure);

        // `@external` forces public but is otherwise the default; only
        // `@internal`/`private` changes the outcome.
        let internal = method.decorators.iter().any(|d| matches!(d, Decorator::Internal))
            || matches!(method.visibility_keyword, Some(evmc_ast::Visibility::Private));
        let visibility = if internal { Visibility::Private } else { Visibility::Public };

        let is_constructor = method.is_constructor;
        let selector = if is_constructor || visibility == Visibility::Private {
            None
        } else {
            Some(compute_selector(&method.name, &param_types))
        };

        let info = FunctionInfo {
            name: method.name.clone(),
            params,
            return_type,
            visibility,
            mutability,
            is_constructor,
            selector,
            body: method.body.clone(),
        };

        if is_constructor {
            if constructor.is_some() {
                errors.push(CompileError::Semantic(
                    "a class may declare at most one constructor".to_owned(),
                ));
            } else {
                constructor = Some(info);
            }
        } else {
            out.push(info);
        }
    }

    (out, constructor)
}

/// `keccak256(name(T1,T2,…))[..4]`, canonical types via
/// [`to_solidity_type`]. Grounded on `evmc-json-abi`'s `Function::selector`.
pub fn compute_selector(name: &str, params: &[EvmType]) -> Selector {
    let mut preimage = String::with_capacity(name.len() + 2);
    preimage.push_str(name);
    preimage.push('(');
    for (i, ty) in params.iter().enumerate() {
        if i > 0 {
            preimage.push(',');
        }
        preimage.push_str(&to_solidity_type(ty));
    }
    preimage.push(')');
    let hash = keccak256(preimage.as_bytes());
    let mut out = [0u8; 4];
    out.copy_from_slice(&hash.as_bytes()[..4]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use evmc_ast::{Literal, ParamDecl};

    fn prop(name: &str, ty: &str, decorators: Vec<Decorator>) -> PropertyDecl {
        PropertyDecl { name: name.into(), type_name: ty.into(), decorators, initializer: None }
    }

    fn class_with(name: &str, properties: Vec<PropertyDecl>, methods: Vec<MethodDecl>) -> ClassDecl {
        ClassDecl { name: name.into(), mixins: Vec::new(), properties, methods }
    }

    #[test]
    fn counter_contract_slot_zero() {
        let mut value = prop("value", "u256", vec![Decorator::Storage]);
        value.initializer = Some(Literal::Int(0));
        let source = SourceFile {
            classes: vec![class_with("Counter", vec![value], Vec::new())],
            ..Default::default()
        };
        let (model, errors) = analyze(&source);
        assert!(errors.is_empty());
        let model = model.unwrap();
        assert_eq!(model.storage.len(), 1);
        assert_eq!(model.storage[0].slot, U256::ZERO);
    }

    #[test]
    fn slot_override_does_not_perturb_auto_counter() {
        let first = prop("first", "u256", vec![Decorator::Storage]);
        let middle = prop("middle", "u256", vec![Decorator::Storage, Decorator::Slot(5)]);
        let last = prop("last", "u256", vec![Decorator::Storage]);
        let source = SourceFile {
            classes: vec![class_with("C", vec![first, middle, last], Vec::new())],
            ..Default::default()
        };
        let (model, errors) = analyze(&source);
        assert!(errors.is_empty());
        let model = model.unwrap();
        let slot = |n: &str| model.storage_variable(n).unwrap().slot;
        assert_eq!(slot("first"), U256::ZERO);
        assert_eq!(slot("middle"), U256::from(5u64));
        assert_eq!(slot("last"), U256::from(1u64));
    }

    #[test]
    fn duplicate_slot_is_an_error() {
        let a = prop("a", "u256", vec![Decorator::Storage, Decorator::Slot(0)]);
        let b = prop("b", "u256", vec![Decorator::Storage]);
        let source = SourceFile {
            classes: vec![class_with("C", vec![a, b], Vec::new())],
            ..Default::default()
        };
        let (_, errors) = analyze(&source);
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn no_class_is_an_error() {
        let source = SourceFile::default();
        let (model, errors) = analyze(&source);
        assert!(model.is_none());
        assert_eq!(
            errors,
            vec![CompileError::Semantic(
                "No contract found. Export a class to define a contract.".to_owned()
            )]
        );
    }

    #[test]
    fn add_selector_matches_known_vector() {
        let add = MethodDecl {
            name: "add".into(),
            params: vec![
                ParamDecl { name: "a".into(), type_name: "u256".into() },
                ParamDecl { name: "b".into(), type_name: "u256".into() },
            ],
            return_type: Some("u256".into()),
            decorators: vec![Decorator::Pure],
            is_constructor: false,
            visibility_keyword: None,
            body: Vec::new(),
        };
        let source = SourceFile {
            classes: vec![class_with("Calc", Vec::new(), vec![add])],
            ..Default::default()
        };
        let (model, errors) = analyze(&source);
        assert!(errors.is_empty());
        let model = model.unwrap();
        let f = &model.functions[0];
        assert_eq!(hex::encode(f.selector.unwrap()), "771602f7");
        assert_eq!(f.mutability, StateMutability::Pure);
    }

    #[test]
    fn mixin_linearization_overrides_by_name() {
        let base_get = MethodDecl {
            name: "get".into(),
            params: Vec::new(),
            return_type: Some("u256".into()),
            decorators: vec![Decorator::View],
            is_constructor: false,
            visibility_keyword: None,
            body: Vec::new(),
        };
        let child_get = MethodDecl {
            name: "get".into(),
            params: Vec::new(),
            return_type: Some("u256".into()),
            decorators: vec![Decorator::Pure],
            is_constructor: false,
            visibility_keyword: None,
            body: Vec::new(),
        };
        let mut child = class_with("Child", Vec::new(), vec![child_get]);
        child.mixins = vec!["Base".into()];
        let source = SourceFile {
            classes: vec![class_with("Base", Vec::new(), vec![base_get]), child],
            ..Default::default()
        };
        let (model, errors) = analyze(&source);
        assert!(errors.is_empty());
        let model = model.unwrap();
        assert_eq!(model.functions.len(), 1);
        assert_eq!(model.functions[0].mutability, StateMutability::Pure);
    }
}
