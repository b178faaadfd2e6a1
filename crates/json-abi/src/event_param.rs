use crate::Param;
use serde::{Deserialize, Serialize};

/// A single field of an event schema.
///
/// Distinct from [`Param`] only in carrying `indexed`: an event's value is
/// stored in a log topic rather than the log data when indexed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EventParam {
    /// The field's name.
    pub name: String,
    /// The canonical Solidity ABI type.
    #[serde(rename = "type")]
    pub ty: String,
    /// Whether the field's value is stored in a log topic.
    pub indexed: bool,
    /// Tuple components, in order. Empty for non-tuple types.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub components: Vec<Param>,
}

impl EventParam {
    /// Creates a new scalar (non-tuple) event field.
    pub fn new(name: impl Into<String>, ty: impl Into<String>, indexed: bool) -> Self {
        Self { name: name.into(), ty: ty.into(), indexed, components: Vec::new() }
    }

    /// The type string used in the event's topic0 preimage: full (not
    /// canonical-minus-indexed) types, tuples expanded recursively.
    pub fn selector_type(&self) -> String {
        if self.components.is_empty() {
            self.ty.clone()
        } else {
            let mut out = String::from("(");
            for (i, c) in self.components.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                out.push_str(&c.selector_type());
            }
            out.push(')');
            out
        }
    }
}
