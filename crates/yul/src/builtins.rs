//! The table of EVM opcodes exposed as Yul builtin functions.
//!
//! Read-only and shared across every compilation: a plain `&'static` slice
//! rather than a lazily-built hash map, since the table never changes at
//! runtime.

/// A single builtin function: its Yul name and stack arity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Builtin {
    /// The builtin's name, as it appears in Yul source.
    pub name: &'static str,
    /// Number of arguments the builtin consumes.
    pub inputs: u8,
    /// Number of values the builtin produces (0 or 1, except `call`-family
    /// opcodes which the EVM models as producing a single success flag).
    pub outputs: u8,
}

const fn b(name: &'static str, inputs: u8, outputs: u8) -> Builtin {
    Builtin { name, inputs, outputs }
}

/// Every EVM opcode exposed as a Yul builtin, grouped by category in the
/// order the Yul specification lists them.
pub const BUILTINS: &[Builtin] = &[
    // Control flow / system
    b("stop", 0, 0),
    b("invalid", 0, 0),
    b("revert", 2, 0),
    b("return", 2, 0),
    b("selfdestruct", 1, 0),
    // Arithmetic
    b("add", 2, 1),
    b("sub", 2, 1),
    b("mul", 2, 1),
    b("div", 2, 1),
    b("sdiv", 2, 1),
    b("mod", 2, 1),
    b("smod", 2, 1),
    b("exp", 2, 1),
    b("addmod", 3, 1),
    b("mulmod", 3, 1),
    b("signextend", 2, 1),
    // Comparison
    b("lt", 2, 1),
    b("gt", 2, 1),
    b("slt", 2, 1),
    b("sgt", 2, 1),
    b("eq", 2, 1),
    b("iszero", 1, 1),
    // Bitwise
    b("and", 2, 1),
    b("or", 2, 1),
    b("xor", 2, 1),
    b("not", 1, 1),
    b("byte", 2, 1),
    b("shl", 2, 1),
    b("shr", 2, 1),
    b("sar", 2, 1),
    // keccak256
    b("keccak256", 2, 1),
    // Memory
    b("pop", 1, 0),
    b("mload", 1, 1),
    b("mstore", 2, 0),
    b("mstore8", 2, 0),
    b("msize", 0, 1),
    // Storage
    b("sload", 1, 1),
    b("sstore", 2, 0),
    // Transient storage (EIP-1153)
    b("tload", 1, 1),
    b("tstore", 2, 0),
    // Execution context
    b("gas", 0, 1),
    b("address", 0, 1),
    b("balance", 1, 1),
    b("selfbalance", 0, 1),
    b("caller", 0, 1),
    b("callvalue", 0, 1),
    b("calldataload", 1, 1),
    b("calldatasize", 0, 1),
    b("calldatacopy", 3, 0),
    b("codesize", 0, 1),
    b("codecopy", 3, 0),
    b("extcodesize", 1, 1),
    b("extcodecopy", 4, 0),
    b("returndatasize", 0, 1),
    b("returndatacopy", 3, 0),
    b("extcodehash", 1, 1),
    // Block
    b("blockhash", 1, 1),
    b("blobhash", 1, 1),
    b("coinbase", 0, 1),
    b("timestamp", 0, 1),
    b("number", 0, 1),
    b("prevrandao", 0, 1),
    b("gaslimit", 0, 1),
    b("chainid", 0, 1),
    b("basefee", 0, 1),
    b("blobbasefee", 0, 1),
    // Transaction
    b("origin", 0, 1),
    b("gasprice", 0, 1),
    // Calls
    b("create", 3, 1),
    b("create2", 4, 1),
    b("call", 7, 1),
    b("callcode", 7, 1),
    b("delegatecall", 6, 1),
    b("staticcall", 6, 1),
    // Logging
    b("log0", 2, 0),
    b("log1", 3, 0),
    b("log2", 4, 0),
    b("log3", 5, 0),
    b("log4", 6, 0),
    // Object/data builtins
    b("datasize", 1, 1),
    b("dataoffset", 1, 1),
    b("datacopy", 3, 0),
    b("setimmutable", 3, 0),
    b("loadimmutable", 1, 1),
];

/// Looks up a builtin by name.
pub fn lookup(name: &str) -> Option<&'static Builtin> {
    BUILTINS.iter().find(|builtin| builtin.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_known_opcodes() {
        assert_eq!(lookup("sstore"), Some(&b("sstore", 2, 0)));
        assert_eq!(lookup("keccak256"), Some(&b("keccak256", 2, 1)));
        assert_eq!(lookup("nonexistent"), None);
    }

    #[test]
    fn table_has_no_duplicate_names() {
        let mut names: Vec<_> = BUILTINS.iter().map(|builtin| builtin.name).collect();
        names.sort_unstable();
        let mut deduped = names.clone();
        deduped.dedup();
        assert_eq!(names, deduped);
    }
}
