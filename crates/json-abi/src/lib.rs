//! JSON-ABI item model, event/function/error shapes, and 4-byte selector
//! computation for the compiler's generated contracts.
#![warn(missing_docs, unreachable_pub, clippy::missing_const_for_fn)]
#![deny(unused_must_use, rust_2018_idioms)]

mod abi;
pub use abi::JsonAbi;

mod item;
pub use item::{AbiItem, Constructor, Error, Event, Function};

mod param;
pub use param::Param;

mod event_param;
pub use event_param::EventParam;

mod state_mutability;
pub use state_mutability::StateMutability;
