use serde::{Deserialize, Serialize};

/// A function's or constructor's state mutability, as declared by decorators
/// on the surface-language method (`view`, `pure`, `payable`; absence of any
/// defaults to `nonpayable`).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StateMutability {
    /// Does not read or write contract state.
    Pure,
    /// Reads but does not write contract state.
    View,
    /// May write contract state; does not accept value.
    #[default]
    NonPayable,
    /// May write contract state and accepts value.
    Payable,
}

impl StateMutability {
    /// Resolves the decorator-precedence rule `payable > view > pure`,
    /// defaulting to [`StateMutability::NonPayable`].
    pub fn from_decorators(payable: bool, view: bool, pure: bool) -> Self {
        if payable {
            Self::Payable
        } else if view {
            Self::View
        } else if pure {
            Self::Pure
        } else {
            Self::NonPayable
        }
    }
}
