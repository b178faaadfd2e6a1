//! The Yul intermediate-assembly AST, a registry of EVM opcodes exposed as
//! Yul builtins, and a deterministic pretty-printer that emits text a
//! standards-conformant Yul assembler accepts in strict-assembly mode.
#![warn(missing_docs, unreachable_pub, clippy::missing_const_for_fn)]
#![deny(unused_must_use, rust_2018_idioms)]

mod bigint;
pub use bigint::BigInt;

mod ast;
pub use ast::{YulBlock, YulExpr, YulLiteral, YulStatement};

mod object;
pub use object::YulObject;

pub mod builtins;
pub use builtins::Builtin;

mod printer;
pub use printer::print_object;
