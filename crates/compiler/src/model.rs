use evmc_ast::Literal;
use evmc_json_abi::StateMutability;
use evmc_primitives::{Selector, U256};
use evmc_types::EvmType;
use std::collections::BTreeSet;

/// A function's or constructor's declared visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    /// Externally callable, dispatched by selector.
    Public,
    /// Only callable from within the contract.
    Private,
}

/// A persistent (or transient) storage field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageVariable {
    /// The field's name.
    pub name: String,
    /// The field's resolved type.
    pub ty: EvmType,
    /// The field's assigned storage slot.
    pub slot: U256,
    /// The field's captured literal initializer, if any.
    pub default: Option<Literal>,
    /// Whether the field uses transient storage (`tload`/`tstore`) rather
    /// than persistent storage (`sload`/`sstore`).
    pub transient: bool,
}

/// A function's signature and dispatch metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionInfo {
    /// The function's name. Meaningless for the constructor.
    pub name: String,
    /// The function's parameters, in declaration order.
    pub params: Vec<(String, EvmType)>,
    /// The function's return type, if it returns a value.
    pub return_type: Option<EvmType>,
    /// The function's visibility.
    pub visibility: Visibility,
    /// The function's state mutability.
    pub mutability: StateMutability,
    /// Whether this is the contract's constructor.
    pub is_constructor: bool,
    /// The function's 4-byte selector. `None` for private functions and
    /// for the constructor.
    pub selector: Option<Selector>,
    /// The method's body, carried through unchanged from the AST for the
    /// transformer to lower.
    pub body: Vec<evmc_ast::Stmt>,
}

/// A single field of an event schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventField {
    /// The field's name.
    pub name: String,
    /// The field's type.
    pub ty: EvmType,
    /// Whether the field's value is stored in a log topic.
    pub indexed: bool,
}

/// An event's schema, resolved from its referenced interface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventSchema {
    /// The event's name.
    pub name: String,
    /// The event's fields, in declaration order. At most 3 may be
    /// `indexed`.
    pub fields: Vec<EventField>,
}

/// The fully-resolved model of a single compiled contract, produced by the
/// analyzer and consumed immutably by the transformer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractModel {
    /// The contract's name (the exported class's name).
    pub name: String,
    /// Storage variables, auto-assigned and explicit slots combined, in
    /// declaration order.
    pub storage: Vec<StorageVariable>,
    /// Every public and private function, excluding the constructor.
    pub functions: Vec<FunctionInfo>,
    /// The constructor, if the class declares one.
    pub constructor: Option<FunctionInfo>,
    /// Every event schema referenced by an `@event` field.
    pub events: Vec<EventSchema>,
    /// Names declared as enums, for diagnostics and lowering decisions.
    pub enum_names: BTreeSet<String>,
    /// Names declared as structs, for diagnostics and lowering decisions.
    pub struct_names: BTreeSet<String>,
}

impl ContractModel {
    /// Looks up a public function's storage variable by name.
    pub fn storage_variable(&self, name: &str) -> Option<&StorageVariable> {
        self.storage.iter().find(|v| v.name == name)
    }

    /// Looks up an event schema by name.
    pub fn event(&self, name: &str) -> Option<&EventSchema> {
        self.events.iter().find(|e| e.name == name)
    }
}
