use crate::{EventParam, Param, StateMutability};
use evmc_primitives::Selector;
use serde::{Deserialize, Serialize};

/// A contract constructor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Constructor {
    /// The constructor's parameters, in declared order.
    pub inputs: Vec<Param>,
    /// The constructor's state mutability.
    pub state_mutability: StateMutability,
}

/// A public contract function.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Function {
    /// The function's name.
    pub name: String,
    /// The function's parameters, in declared order.
    pub inputs: Vec<Param>,
    /// The function's return values: empty, single, or expanded-tuple.
    pub outputs: Vec<Param>,
    /// The function's state mutability.
    pub state_mutability: StateMutability,
}

/// An event schema.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Event {
    /// The event's name.
    pub name: String,
    /// The event's fields, in declared order. At most 3 may be `indexed`.
    pub inputs: Vec<EventParam>,
    /// Always `false`; anonymous events are not a supported surface.
    pub anonymous: bool,
}

/// A custom revert error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Error {
    /// The error's name.
    pub name: String,
    /// The error's parameters, in declared order.
    pub inputs: Vec<Param>,
}

/// A single item of a JSON ABI document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum AbiItem {
    /// A [`Constructor`] item.
    Constructor(Constructor),
    /// A [`Function`] item.
    Function(Function),
    /// An [`Event`] item.
    Event(Event),
    /// An [`Error`] item.
    Error(Error),
}

impl AbiItem {
    /// Returns the item's variant name, for diagnostics.
    pub const fn debug_name(&self) -> &'static str {
        match self {
            Self::Constructor(_) => "Constructor",
            Self::Function(_) => "Function",
            Self::Event(_) => "Event",
            Self::Error(_) => "Error",
        }
    }
}

impl Error {
    /// The selector preimage: `name(T1,T2,…)`.
    pub fn selector_preimage(&self) -> String {
        preimage(&self.name, &self.inputs)
    }

    /// The 4-byte error selector.
    pub fn selector(&self) -> Selector {
        selector(&self.selector_preimage())
    }
}

impl Function {
    /// The selector preimage: `name(T1,T2,…)`.
    pub fn selector_preimage(&self) -> String {
        preimage(&self.name, &self.inputs)
    }

    /// The 4-byte function selector.
    pub fn selector(&self) -> Selector {
        selector(&self.selector_preimage())
    }
}

impl Event {
    /// The topic0 preimage: `name(T1,T2,…)`, using full (not
    /// canonical-minus-indexed) types.
    pub fn topic0_preimage(&self) -> String {
        let mut preimage = String::with_capacity(self.name.len() + 2);
        preimage.push_str(&self.name);
        preimage.push('(');
        for (i, input) in self.inputs.iter().enumerate() {
            if i > 0 {
                preimage.push(',');
            }
            preimage.push_str(&input.selector_type());
        }
        preimage.push(')');
        preimage
    }

    /// The event's `topic0`, the full 32-byte hash of [`Self::topic0_preimage`].
    pub fn topic0(&self) -> evmc_primitives::B256 {
        evmc_primitives::keccak256(self.topic0_preimage().as_bytes())
    }
}

fn preimage(name: &str, inputs: &[Param]) -> String {
    let mut preimage = String::with_capacity(name.len() + 2 + inputs.len() * 8);
    preimage.push_str(name);
    preimage.push('(');
    for (i, input) in inputs.iter().enumerate() {
        if i > 0 {
            preimage.push(',');
        }
        preimage.push_str(&input.selector_type());
    }
    preimage.push(')');
    preimage
}

/// `keccak256(preimage)[..4]`.
fn selector(preimage: &str) -> Selector {
    let hash = evmc_primitives::keccak256(preimage.as_bytes());
    let mut out = [0u8; 4];
    out.copy_from_slice(&hash.as_bytes()[..4]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn erc20_transfer_selector() {
        let f = Function {
            name: "transfer".into(),
            inputs: vec![Param::new("to", "address"), Param::new("amount", "uint256")],
            outputs: vec![Param::new("", "bool")],
            state_mutability: StateMutability::NonPayable,
        };
        assert_eq!(f.selector(), [0xa9, 0x05, 0x9c, 0xbb]);
    }
}
