use crate::AbiItem;
use serde::{Deserialize, Serialize};

/// A full JSON ABI document: an ordered list of items.
///
/// Serializes as a plain JSON array, as specified by the [Solidity ABI
/// spec](https://docs.soliditylang.org/en/latest/abi-spec.html#json).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JsonAbi {
    /// The items, in emission order: constructor (if any), then every
    /// public function, then every event, then every custom error.
    pub items: Vec<AbiItem>,
}

impl JsonAbi {
    /// An empty ABI document.
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Returns the number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if this ABI contains no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterates over the ABI's items in order.
    pub fn iter(&self) -> std::slice::Iter<'_, AbiItem> {
        self.items.iter()
    }
}

impl FromIterator<AbiItem> for JsonAbi {
    fn from_iter<T: IntoIterator<Item = AbiItem>>(iter: T) -> Self {
        Self { items: iter.into_iter().collect() }
    }
}

impl IntoIterator for JsonAbi {
    type Item = AbiItem;
    type IntoIter = std::vec::IntoIter<AbiItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Constructor, StateMutability};

    #[test]
    fn serializes_as_plain_array() {
        let abi: JsonAbi = std::iter::once(AbiItem::Constructor(Constructor {
            inputs: Vec::new(),
            state_mutability: StateMutability::NonPayable,
        }))
        .collect();
        let json = serde_json::to_string(&abi).unwrap();
        assert!(json.starts_with('['));
    }
}
