use serde::{Deserialize, Serialize};

/// A function, error, or constructor parameter.
///
/// `ty` is always a canonical Solidity ABI type spelling (`uint256`,
/// `address`, `bytes32[]`, `tuple`, …); `components` is non-empty only for
/// tuple (and tuple-array) types.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Param {
    /// The parameter's name. May be empty for unnamed return values.
    pub name: String,
    /// The canonical Solidity ABI type.
    #[serde(rename = "type")]
    pub ty: String,
    /// Tuple components, in order. Empty for non-tuple types.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub components: Vec<Param>,
}

impl Param {
    /// Creates a new scalar (non-tuple) parameter.
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self { name: name.into(), ty: ty.into(), components: Vec::new() }
    }

    /// The type string used in a selector preimage: just `ty` for scalars,
    /// `(inner,…)` expanded recursively for tuples.
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
