//! Shared lowering state threaded through every transformer submodule.

use crate::diagnostics::CompileError;
use crate::model::ContractModel;
use evmc_types::EvmType;
use evmc_yul::{YulBlock, YulStatement};
use std::cell::Cell;
use std::collections::{BTreeSet, HashMap};

/// How a local (parameter or `let`-bound variable) is represented in the
/// generated Yul.
#[derive(Debug, Clone)]
pub enum LocalSlot {
    /// A single-word value bound to one Yul identifier.
    Scalar(String),
    /// A calldata-resident dynamic value (`bytes`/`string`/array),
    /// represented as a `(offset, length)` pair of Yul identifiers, per
    /// spec.md §4.4.2's `<name>_len` convention.
    CalldataSlice {
        /// Identifier holding the absolute calldata offset of the data.
        offset: String,
        /// Identifier holding the element/byte length.
        len: String,
    },
}

/// The arity and kind of an external-call helper (`__call_N`,
/// `__staticcall_N`, `__delegatecall_N`) lazily generated on first use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct CallHelper {
    /// Number of ABI-encoded arguments the call forwards.
    pub arity: usize,
    /// Which opcode family this helper wraps.
    pub kind: CallKind,
}

/// Which EVM call opcode a call helper wraps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum CallKind {
    /// `call`, forwards `msg.value`.
    Call,
    /// `staticcall`, read-only.
    StaticCall,
    /// `delegatecall`, runs in the caller's context.
    DelegateCall,
}

/// Per-function lowering context: local scope, fresh-name counter, and
/// the set of lazily-generated helpers the whole contract accumulates.
pub struct Ctx<'a> {
    /// The contract model being lowered.
    pub model: &'a ContractModel,
    /// Local variable bindings in the current function, surface name to
    /// its Yul representation.
    pub locals: HashMap<String, LocalSlot>,
    /// The declared or inferred EVM type of each local, used to choose
    /// signed vs. unsigned operator lowering (spec.md §4.4.5) without a
    /// full type checker, per spec.md §1's non-goal on type inference.
    pub local_types: HashMap<String, EvmType>,
    /// Call-helper families required so far; flushed into the deployed
    /// object's function-definition list once, after every user function.
    pub call_helpers: BTreeSet<CallHelper>,
    fresh: Cell<u32>,
}

impl<'a> Ctx<'a> {
    /// Creates a fresh context for lowering `model`.
    pub fn new(model: &'a ContractModel) -> Self {
        Self {
            model,
            locals: HashMap::new(),
            local_types: HashMap::new(),
            call_helpers: BTreeSet::new(),
            fresh: Cell::new(0),
        }
    }

    /// Returns a fresh Yul identifier, unique within this compilation.
    pub fn fresh_name(&self, prefix: &str) -> String {
        let n = self.fresh.get();
        self.fresh.set(n + 1);
        format!("__{prefix}_{n}")
    }

    /// Clears the local-variable scope between functions, while keeping
    /// the fresh-name counter and the accumulated helper-function
    /// requirements (`call_helpers`, `needs_slot_helpers`, ...), which are
    /// contract-wide rather than per-function.
    pub fn reset_locals(&mut self) {
        self.locals.clear();
        self.local_types.clear();
    }
}

/// Wraps a list of statements built across sub-passes into a single block,
/// convenience for call sites that collect into a `Vec` as they go.
pub fn block(stmts: Vec<YulStatement>) -> YulBlock {
    stmts
}

/// Shorthand for producing an `UnsupportedError`-flavored [`CompileError`].
pub fn unsupported(msg: impl Into<String>) -> CompileError {
    CompileError::Unsupported(msg.into())
}

/// Looks up the EVM type of a storage variable by name, used repeatedly
/// while lowering storage access.
pub fn storage_type<'a>(model: &'a ContractModel, name: &str) -> Option<&'a EvmType> {
    model.storage_variable(name).map(|v| &v.ty)
}

/// The Yul function name emitted for a surface-language function named
/// `name`. Prefixed so a user function can never collide with (or shadow)
/// a Yul builtin of the same name, e.g. a method called `add` or `call` -
/// every definition site, dispatcher call site, and internal-call site
/// must go through this rather than emitting `name` verbatim.
pub fn mangled_fn_name(name: &str) -> String {
    format!("fun_{name}")
}
