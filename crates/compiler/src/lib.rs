//! Semantic analyzer, Yul transformer, and compiler facade: turns a parsed
//! [`evmc_ast::SourceFile`] into a Yul [`evmc_yul::YulObject`] plus a JSON
//! ABI, per spec.md §4.
#![warn(missing_docs, unreachable_pub, clippy::missing_const_for_fn)]
#![deny(unused_must_use, rust_2018_idioms)]

mod abi;
mod analyzer;
mod assembler;
mod diagnostics;
mod facade;
mod model;
mod symbol_table;
mod transformer;

pub use diagnostics::CompileError;
pub use facade::{compile, CompileOutput, CompilerOptions};
