//! Builds a [`JsonAbi`] document from a [`ContractModel`], per spec.md
//! §4.2: constructor (if any), then every public function, then every
//! event, in that order.

use crate::model::{ContractModel, EventSchema, FunctionInfo, Visibility};
use evmc_json_abi::{AbiItem, Constructor, Event, EventParam, Function, JsonAbi, Param};
use evmc_types::{to_solidity_type, EvmType};

/// Generates the JSON ABI for `model`.
pub fn generate_abi(model: &ContractModel) -> JsonAbi {
    let mut items = Vec::new();

    if let Some(ctor) = &model.constructor {
        items.push(AbiItem::Constructor(Constructor {
            inputs: ctor.params.iter().map(|(name, ty)| param(name, ty)).collect(),
            state_mutability: ctor.mutability,
        }));
    }

    for function in &model.functions {
        if function.visibility != Visibility::Public {
            continue;
        }
        items.push(AbiItem::Function(function_item(function)));
    }

    for event in &model.events {
        items.push(AbiItem::Event(event_item(event)));
    }

    items.into_iter().collect()
}

fn function_item(function: &FunctionInfo) -> Function {
    let outputs = match &function.return_type {
        None => Vec::new(),
        Some(EvmType::Tuple(elems)) => {
            elems.iter().map(|ty| param("", ty)).collect()
        }
        Some(ty) => vec![param("", ty)],
    };
    Function {
        name: function.name.clone(),
        inputs: function.params.iter().map(|(name, ty)| param(name, ty)).collect(),
        outputs,
        state_mutability: function.mutability,
    }
}

fn event_item(event: &EventSchema) -> Event {
    Event {
        name: event.name.clone(),
        inputs: event
            .fields
            .iter()
            .map(|field| event_param(&field.name, &field.ty, field.indexed))
            .collect(),
        anonymous: false,
    }
}

/// Builds a [`Param`] for `ty`, expanding tuples into Solidity's
/// `type: "tuple"` + `components` convention rather than the bare
/// `(T1,T2)` spelling used in selector preimages.
fn param(name: &str, ty: &EvmType) -> Param {
    match ty {
        EvmType::Tuple(elems) => {
            Param { name: name.to_owned(), ty: "tuple".to_owned(), components: elems.iter().map(|e| param("", e)).collect() }
        }
        EvmType::Array(elem) if matches!(**elem, EvmType::Tuple(_)) => {
            let EvmType::Tuple(elems) = elem.as_ref() else { unreachable!() };
            Param {
                name: name.to_owned(),
                ty: "tuple[]".to_owned(),
                components: elems.iter().map(|e| param("", e)).collect(),
            }
        }
        other => Param::new(name, to_solidity_type(other)),
    }
}

fn event_param(name: &str, ty: &EvmType, indexed: bool) -> EventParam {
    match ty {
        EvmType::Tuple(elems) => EventParam {
            name: name.to_owned(),
            ty: "tuple".to_owned(),
            indexed,
            components: elems.iter().map(|e| param("", e)).collect(),
        },
        other => EventParam::new(name, to_solidity_type(other), indexed),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use evmc_json_abi::StateMutability;

    #[test]
    fn constructor_then_functions_then_events() {
        let model = ContractModel {
            name: "C".into(),
            storage: Vec::new(),
            functions: vec![FunctionInfo {
                name: "get".into(),
                params: Vec::new(),
                return_type: Some(EvmType::Uint(256)),
                visibility: Visibility::Public,
                mutability: StateMutability::View,
                is_constructor: false,
                selector: Some([0, 0, 0, 0]),
                body: Vec::new(),
            }],
            constructor: Some(FunctionInfo {
                name: String::new(),
                params: Vec::new(),
                return_type: None,
                visibility: Visibility::Public,
                mutability: StateMutability::NonPayable,
                is_constructor: true,
                selector: None,
                body: Vec::new(),
            }),
            events: vec![EventSchema { name: "Ev".into(), fields: Vec::new() }],
            enum_names: Default::default(),
            struct_names: Default::default(),
        };
        let abi = generate_abi(&model);
        assert_eq!(abi.len(), 3);
        assert!(matches!(abi.items[0], AbiItem::Constructor(_)));
        assert!(matches!(abi.items[1], AbiItem::Function(_)));
        assert!(matches!(abi.items[2], AbiItem::Event(_)));
    }
}
