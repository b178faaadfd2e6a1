use thiserror::Error;

/// An error raised during analysis, transformation, or assembly.
///
/// Every pass collects as many of these as it can rather than aborting on
/// the first one; [`crate::compile`] reports the full list.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CompileError {
    /// The source tree could not be interpreted (a shape the analyzer
    /// expects is missing or malformed).
    #[error("{0}")]
    Parse(String),
    /// A semantic rule was violated: duplicate storage slot, unresolved
    /// type, bad event-field count, and similar.
    #[error("{0}")]
    Semantic(String),
    /// The source uses a construct outside what this compiler implements.
    #[error("unsupported: {0}")]
    Unsupported(String),
    /// The external assembler failed or could not be invoked.
    #[error("toolchain error: {0}")]
    Toolchain(String),
    /// An invariant the compiler itself is responsible for was violated.
    #[error("internal error: {0}")]
    Internal(String),
}
