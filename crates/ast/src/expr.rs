/// A literal value captured from a field initializer or an expression.
///
/// Only the forms §3 of the storage-slot spec names as capturable defaults
/// are represented: integer, bigint, hex, boolean, negated literal, and
/// address string. Anything else the surface grammar allows as an
/// initializer is simply not representable here, matching the rule that
/// non-literal initializers are dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Literal {
    /// A decimal or big integer literal.
    Int(i128),
    /// A hex-string literal, text as written (e.g. `"0xdeadbeef"`).
    Hex(String),
    /// A UTF-8 string literal, e.g. a `require`/`revert` message.
    Str(String),
    /// A boolean literal.
    Bool(bool),
    /// An address literal, written as a hex string.
    Address(String),
    /// A negated literal, e.g. `-5`.
    Neg(Box<Literal>),
}

/// A statement in a method body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stmt {
    /// `if (cond) { .. } else { .. }`.
    If {
        /// The branch condition.
        cond: Expr,
        /// The `then` branch's statements.
        then_branch: Vec<Stmt>,
        /// The `else` branch's statements, if present.
        else_branch: Option<Vec<Stmt>>,
    },
    /// `for (init; cond; post) { body }`.
    For {
        /// The loop's initializer statement, if present.
        init: Option<Box<Stmt>>,
        /// The loop's condition, if present (absent means "always true").
        cond: Option<Expr>,
        /// The loop's post-iteration statement, if present.
        post: Option<Box<Stmt>>,
        /// The loop body.
        body: Vec<Stmt>,
    },
    /// `while (cond) { body }`.
    While {
        /// The loop condition.
        cond: Expr,
        /// The loop body.
        body: Vec<Stmt>,
    },
    /// `do { body } while (cond)`.
    DoWhile {
        /// The loop body, executed at least once.
        body: Vec<Stmt>,
        /// The loop condition, checked after each iteration.
        cond: Expr,
    },
    /// `return expr?;`.
    Return(Option<Expr>),
    /// `break;`.
    Break,
    /// `continue;`.
    Continue,
    /// An expression evaluated for its side effects.
    ExprStmt(Expr),
    /// `let name: type_name? = value?;`.
    Let {
        /// The bound local's name.
        name: String,
        /// The local's declared type spelling, if written.
        type_name: Option<String>,
        /// The local's initializer, if present.
        value: Option<Expr>,
    },
}

/// A binary operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BinaryOp {
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// `/`
    Div,
    /// `%`
    Mod,
    /// `<`
    Lt,
    /// `>`
    Gt,
    /// `<=`
    Le,
    /// `>=`
    Ge,
    /// `==`
    Eq,
    /// `!=`
    Ne,
    /// `&&`
    And,
    /// `||`
    Or,
    /// `&`
    BitAnd,
    /// `|`
    BitOr,
    /// `^`
    BitXor,
    /// `<<`
    Shl,
    /// `>>`
    Shr,
}

/// A unary operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum UnaryOp {
    /// Arithmetic negation, `-x`.
    Neg,
    /// Logical negation, `!x`.
    Not,
    /// Bitwise complement, `~x`.
    BitNot,
}

/// An expression in a method body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// A binary operator application.
    Binary {
        /// The operator.
        op: BinaryOp,
        /// The left operand.
        lhs: Box<Expr>,
        /// The right operand.
        rhs: Box<Expr>,
    },
    /// A unary operator application.
    Unary {
        /// The operator.
        op: UnaryOp,
        /// The operand.
        expr: Box<Expr>,
    },
    /// A function or method call.
    Call {
        /// The called expression (an identifier or member access).
        callee: Box<Expr>,
        /// The call's arguments, in order.
        args: Vec<Expr>,
    },
    /// `base[index]`, an array or mapping index.
    Index {
        /// The indexed expression.
        base: Box<Expr>,
        /// The index expression.
        index: Box<Expr>,
    },
    /// `base.name`, a field or namespaced-intrinsic access (`msg.sender`,
    /// `block.timestamp`, …).
    Member {
        /// The base expression.
        base: Box<Expr>,
        /// The accessed member's name.
        name: String,
    },
    /// A literal value.
    Literal(Literal),
    /// A bare identifier.
    Ident(String),
    /// An `asm\`...\`` inline-assembly template, with `${ident}`
    /// interpolation points left unresolved for the transformer.
    Asm {
        /// The template text, verbatim.
        template: String,
    },
    /// `this.Ev.emit({ field: value, ... })`.
    Emit {
        /// The emitted event's name.
        event: String,
        /// The event's field values, by name, in declaration order.
        args: Vec<(String, Expr)>,
    },
    /// `require(cond, message?)`.
    Require {
        /// The asserted condition.
        cond: Box<Expr>,
        /// The revert message, if given.
        message: Option<Box<Expr>>,
    },
    /// `revert(...)`, either the built-in `Error(string)` form or a custom
    /// error constructor call.
    Revert {
        /// The custom error's name, if this is `revert(Err(args))` rather
        /// than `revert(message)`.
        error: Option<String>,
        /// The custom error's arguments, if `error` is set.
        args: Vec<Expr>,
        /// The plain revert message, if `error` is unset.
        message: Option<Box<Expr>>,
    },
    /// `try { expr } catch { catch_body }`.
    Try {
        /// The guarded expression, typically an external call.
        expr: Box<Expr>,
        /// The statements run on failure.
        catch_body: Vec<Stmt>,
    },
    /// `target = value`, where `target` is an `Ident`, a storage/local
    /// `Member` access, or an `Index` (mapping/array element write).
    Assign {
        /// The assigned-to location.
        target: Box<Expr>,
        /// The assigned value.
        value: Box<Expr>,
    },
}
