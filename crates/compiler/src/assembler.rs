//! The external Yul-to-bytecode assembler handoff (spec.md §5, §9): a
//! scoped, synchronous subprocess invocation. The assembler itself is an
//! out-of-scope black box (spec.md §1) whose only contract is "takes Yul
//! source on disk, returns hex bytecode on stdout"; this module's job is
//! only the temp-directory lifecycle around that invocation.

use crate::diagnostics::CompileError;
use std::io::Write as _;
use std::path::Path;
use std::process::Command;

/// Invokes the assembler binary at `assembler_path` on `yul` source,
/// returning the decoded bytecode.
///
/// Creates a fresh per-invocation temp directory, writes `yul` into it,
/// runs the assembler, and removes the directory on every exit path
/// (including error returns) via `TempDir`'s `Drop` impl — the scoped-
/// acquisition pattern spec.md §5 and §9 require.
#[tracing::instrument(skip(yul))]
pub fn assemble(assembler_path: &Path, yul: &str) -> Result<Vec<u8>, CompileError> {
    let dir = tempfile::tempdir()
        .map_err(|e| CompileError::Toolchain(format!("could not create temp directory: {e}")))?;

    let source_path = dir.path().join("contract.yul");
    let mut file = std::fs::File::create(&source_path)
        .map_err(|e| CompileError::Toolchain(format!("could not write Yul source: {e}")))?;
    file.write_all(yul.as_bytes())
        .map_err(|e| CompileError::Toolchain(format!("could not write Yul source: {e}")))?;
    drop(file);

    let output = Command::new(assembler_path)
        .arg(&source_path)
        .current_dir(dir.path())
        .output()
        .map_err(|e| CompileError::Toolchain(format!("could not invoke assembler at {}: {e}", assembler_path.display())))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(CompileError::Toolchain(format!(
            "assembler exited with {}: {stderr}",
            output.status
        )));
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    let hex_text = stdout.trim();
    evmc_primitives::Bytes::from_hex_str(hex_text)
        .map(|bytes| bytes.0)
        .map_err(|e| CompileError::Toolchain(format!("could not parse assembler output as hex: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_assembler_binary_is_a_toolchain_error() {
        let err = assemble(Path::new("/nonexistent/assembler-binary"), "object \"C\" { code {} }").unwrap_err();
        assert!(matches!(err, CompileError::Toolchain(_)));
    }
}
