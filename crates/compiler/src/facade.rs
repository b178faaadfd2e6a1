//! The compiler's single public entry point, per spec.md §6: parses (the
//! caller's responsibility, per spec.md §1's frontend non-goal), analyzes,
//! lowers, optionally assembles, and reports the `{ yul, abi, errors }`
//! shape.

use crate::abi;
use crate::analyzer;
use crate::assembler;
use crate::diagnostics::CompileError;
use crate::transformer;
use evmc_ast::SourceFile;
use evmc_json_abi::JsonAbi;
use std::path::PathBuf;

/// Configuration accepted by [`compile`].
///
/// The only genuinely optional behavior spec.md §6 implies: whether to
/// additionally invoke an external assembler. There is no config-file
/// surface, mirroring the teacher's own library-crate shape.
#[derive(Debug, Clone, Default)]
pub struct CompilerOptions {
    /// Path to an external Yul assembler binary. `None` skips the
    /// bytecode step entirely; `compile` then returns Yul/ABI only.
    pub assembler_path: Option<PathBuf>,
    /// Whether to generate the JSON ABI. Defaults to `true`.
    pub emit_abi: bool,
}

impl CompilerOptions {
    /// The default options: no assembler, ABI emitted.
    pub fn new() -> Self {
        Self { assembler_path: None, emit_abi: true }
    }
}

/// A completed (possibly failed) compilation.
#[derive(Debug, Clone, Default)]
pub struct CompileOutput {
    /// The pretty-printed Yul source, empty if `errors` is non-empty.
    pub yul: String,
    /// The JSON ABI, empty if `errors` is non-empty or `emit_abi` was
    /// false.
    pub abi: JsonAbi,
    /// Deployable bytecode, if an assembler path was configured and
    /// assembly succeeded.
    pub bytecode: Option<Vec<u8>>,
    /// Every diagnostic collected across analysis, lowering, and
    /// assembly.
    pub errors: Vec<CompileError>,
}

/// Compiles a parsed [`SourceFile`] to Yul (and, optionally, bytecode),
/// per spec.md §6's `{ yul, abi, errors }` contract: a non-empty `errors`
/// list is always accompanied by empty `yul`/`abi`/`bytecode`.
#[tracing::instrument(skip_all, fields(classes = source.classes.len()))]
pub fn compile(source: &SourceFile, options: &CompilerOptions) -> CompileOutput {
    let (model, mut errors) = analyzer::analyze(source);

    let Some(model) = model else {
        return CompileOutput { errors, ..Default::default() };
    };
    if !errors.is_empty() {
        tracing::warn!(count = errors.len(), "analysis reported diagnostics; aborting before lowering");
        return CompileOutput { errors, ..Default::default() };
    }

    let object = match transformer::transform(&model) {
        Ok(object) => object,
        Err(transform_errors) => {
            errors.extend(transform_errors);
            return CompileOutput { errors, ..Default::default() };
        }
    };

    let yul = evmc_yul::print_object(&object);
    let json_abi = if options.emit_abi { abi::generate_abi(&model) } else { JsonAbi::new() };

    let bytecode = match &options.assembler_path {
        Some(path) => match assembler::assemble(path, &yul) {
            Ok(bytecode) => Some(bytecode),
            Err(err) => {
                errors.push(err);
                return CompileOutput { errors, ..Default::default() };
            }
        },
        None => None,
    };

    tracing::info!(contract = %model.name, functions = model.functions.len(), "compiled");
    CompileOutput { yul, abi: json_abi, bytecode, errors }
}
