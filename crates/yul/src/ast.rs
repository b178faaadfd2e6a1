use crate::BigInt;

/// A sequence of statements, e.g. a function body or a `for` loop's init
/// block.
pub type YulBlock = Vec<YulStatement>;

/// A Yul statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum YulStatement {
    /// `{ ... }`, a nested block.
    Block(YulBlock),
    /// `let x [, y...] [:= value]`.
    Let {
        /// The bound variable names.
        vars: Vec<String>,
        /// The initializer, if any. Yul permits an uninitialized `let`.
        value: Option<YulExpr>,
    },
    /// `x [, y...] := value`.
    Assign {
        /// The assigned variable names.
        vars: Vec<String>,
        /// The assigned value.
        value: YulExpr,
    },
    /// `if cond { body }`.
    If {
        /// The guard condition.
        cond: YulExpr,
        /// The guarded block.
        body: YulBlock,
    },
    /// `switch cond case lit { block } ... default { block }`.
    Switch {
        /// The switched-on value.
        cond: YulExpr,
        /// Each case's literal and block, in order.
        cases: Vec<(YulLiteral, YulBlock)>,
        /// The `default` block, if present.
        default: Option<YulBlock>,
    },
    /// `for { init } cond { post } { body }`.
    For {
        /// The loop's initializer block.
        init: YulBlock,
        /// The loop's condition.
        cond: YulExpr,
        /// The loop's post-iteration block.
        post: YulBlock,
        /// The loop body.
        body: YulBlock,
    },
    /// `function name(params...) -> returns... { body }`.
    FunctionDef {
        /// The function's name.
        name: String,
        /// The function's parameter names.
        params: Vec<String>,
        /// The function's named return variables.
        returns: Vec<String>,
        /// The function body.
        body: YulBlock,
    },
    /// `leave`.
    Leave,
    /// `break`.
    Break,
    /// `continue`.
    Continue,
    /// An expression evaluated for its side effects (a call with no
    /// bound results).
    Expr(YulExpr),
    /// Verbatim Yul source, copied into the output unmodified. Used for
    /// the inline-assembly escape hatch.
    Raw(String),
}

/// A Yul expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum YulExpr {
    /// A literal value.
    Literal(YulLiteral),
    /// A quoted string literal, used for `dataoffset("Name")`/
    /// `datasize("Name")` operands.
    StringLiteral(String),
    /// A bare identifier.
    Ident(String),
    /// `name(args...)`, a builtin or user-defined function call.
    Call {
        /// The called function's name.
        name: String,
        /// The call's arguments, in order.
        args: Vec<YulExpr>,
    },
}

/// A Yul literal value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum YulLiteral {
    /// `true`/`false`.
    Bool(bool),
    /// An integer literal. Negative values are rewritten by the printer
    /// as `sub(0, |n|)`, since Yul has no negative literal syntax.
    Number(BigInt),
    /// A hex-string literal, emitted as `hex"..."`.
    HexString(Vec<u8>),
}

impl YulExpr {
    /// Shorthand for `YulExpr::Literal(YulLiteral::Number(n.into()))`.
    pub fn number(n: impl Into<BigInt>) -> Self {
        Self::Literal(YulLiteral::Number(n.into()))
    }

    /// Shorthand for a zero-argument call, e.g. `caller()`.
    pub fn call0(name: impl Into<String>) -> Self {
        Self::Call { name: name.into(), args: Vec::new() }
    }

    /// Shorthand for an n-ary call.
    pub fn call(name: impl Into<String>, args: Vec<YulExpr>) -> Self {
        Self::Call { name: name.into(), args }
    }
}
