//! Type aliases for common primitive types used throughout the compiler.

use crate::FixedBytes;

pub use ruint::aliases::U256;

/// A 256-bit EVM word, used for storage slots and 32-byte Yul literals.
pub type B256 = FixedBytes<32>;

/// A 4-byte Solidity function/error selector.
pub type Selector = [u8; 4];

/// A persistent storage slot index.
pub type StorageSlot = U256;
