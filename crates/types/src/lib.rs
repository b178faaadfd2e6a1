//! Canonical representation of EVM value and reference types, with
//! bidirectional mapping to Solidity ABI type names.
#![warn(missing_docs, unreachable_pub, clippy::missing_const_for_fn)]
#![deny(unused_must_use, rust_2018_idioms)]

mod ty;
pub use ty::EvmType;

mod context;
pub use context::TypeContext;

mod parse;
pub use parse::{from_solidity_type, parse_type, to_solidity_type};

mod error;
pub use error::TypesError;
