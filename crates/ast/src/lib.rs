//! Shapes of the parsed surface-language tree that the analyzer and
//! transformer consume.
//!
//! This crate ships no lexer or grammar. The surface language's concrete
//! parser is an external collaborator; any front end that produces these
//! shapes — a [`SourceFile`] of [`ClassDecl`]s built from decorator-annotated
//! fields and methods — can be lowered by `evmc-compiler` without change.
//! The shapes double as the capability interface the analyzer walks:
//! classes, properties, methods, decorators, initializers, and type
//! spellings, each a plain field on a plain struct.
#![warn(missing_docs, unreachable_pub, clippy::missing_const_for_fn)]
#![deny(unused_must_use, rust_2018_idioms)]

mod decl;
pub use decl::{
    ClassDecl, Decorator, EnumDecl, EventFieldDecl, EventInterfaceDecl, MethodDecl, ParamDecl,
    PropertyDecl, SourceFile, StructDecl, Visibility,
};

mod expr;
pub use expr::{BinaryOp, Expr, Literal, Stmt, UnaryOp};
