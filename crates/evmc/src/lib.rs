//! Facade crate re-exporting every layer of the compiler: primitives, the
//! JSON-ABI item model, the surface-language AST shapes, the EVM type
//! model, the Yul AST and printer, and the compiler itself.
//!
//! Most callers only need [`evmc::compiler`] and [`evmc::ast`]; the lower
//! layers are re-exported for crates that want to work with selectors,
//! EVM types, or Yul directly.
#![warn(missing_docs, unreachable_pub)]
#![deny(unused_must_use, rust_2018_idioms)]

#[doc(inline)]
pub use evmc_primitives as primitives;

#[doc(inline)]
pub use evmc_json_abi as json_abi;

#[doc(inline)]
pub use evmc_ast as ast;

#[doc(inline)]
pub use evmc_types as types;

#[doc(inline)]
pub use evmc_yul as yul;

#[doc(inline)]
pub use evmc_compiler as compiler;

#[doc(no_inline)]
pub use compiler::{compile, CompileError, CompilerOptions};
