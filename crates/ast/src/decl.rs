use crate::Stmt;

/// A single parsed source file: zero or more classes, at most one of which
/// may be exported as the compiled contract, plus the event-schema
/// interfaces its classes reference.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceFile {
    /// Every class declaration found in the file, in source order.
    pub classes: Vec<ClassDecl>,
    /// Every `interface`-style event-schema declaration found in the file.
    pub event_interfaces: Vec<EventInterfaceDecl>,
    /// Every enum declaration found in the file.
    pub enums: Vec<EnumDecl>,
    /// Every struct-like (field-only, parameterless) interface declaration
    /// found in the file.
    pub structs: Vec<StructDecl>,
}

/// An enum declaration. Lowered to `uint8` wherever referenced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnumDecl {
    /// The enum's name.
    pub name: String,
    /// The enum's variant names, in declaration order (variant `i` lowers
    /// to the literal `i`).
    pub variants: Vec<String>,
}

/// A struct-like declaration: a parameterless, field-only type. Lowered to
/// an opaque `uint256` storage-slot reference wherever referenced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StructDecl {
    /// The struct's name.
    pub name: String,
    /// The struct's fields, as `(name, type_name)` pairs.
    pub fields: Vec<(String, String)>,
}

/// A class declaration. A class with no `mixins` and default visibility is
/// an ordinary contract; `mixins` names the `Mixin(A, B, C)` parent list in
/// left-to-right linearization order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassDecl {
    /// The class's name.
    pub name: String,
    /// Parent classes named in an `extends Mixin(...)` clause, in
    /// left-to-right order.
    pub mixins: Vec<String>,
    /// The class's fields, in declaration order.
    pub properties: Vec<PropertyDecl>,
    /// The class's methods (including any constructor), in declaration
    /// order.
    pub methods: Vec<MethodDecl>,
}

/// A single field declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyDecl {
    /// The field's name.
    pub name: String,
    /// The field's surface-language type spelling, e.g. `"u256"` or
    /// `"Mapping<address, u256>"`.
    pub type_name: String,
    /// Decorators attached to the field (`@storage`, `@transient`,
    /// `@event`, `@slot(N)`).
    pub decorators: Vec<Decorator>,
    /// The field's literal initializer, if any. Only literal forms are
    /// captured; any other initializer expression is dropped (see
    /// `StorageVariable::default` in `evmc-compiler`).
    pub initializer: Option<Literal>,
}

/// A single method declaration, including the constructor if present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDecl {
    /// The method's name. Ignored for the constructor.
    pub name: String,
    /// The method's parameters, in declaration order. A parameter literally
    /// named `this` is dropped by the analyzer, not here.
    pub params: Vec<ParamDecl>,
    /// The method's surface-language return type spelling, if it returns a
    /// value.
    pub return_type: Option<String>,
    /// Decorators attached to the method (`@view`, `@pure`, `@payable`,
    /// `@external`, `@internal`, `@virtual`).
    pub decorators: Vec<Decorator>,
    /// Whether this declaration is the class's constructor.
    pub is_constructor: bool,
    /// The keyword-based visibility modifier (`private`), if written, as
    /// distinct from a visibility decorator.
    pub visibility_keyword: Option<Visibility>,
    /// The method's body, as a statement list.
    pub body: Vec<Stmt>,
}

/// A single parameter declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamDecl {
    /// The parameter's name.
    pub name: String,
    /// The parameter's surface-language type spelling.
    pub type_name: String,
}

/// A decorator attached to a field or method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decorator {
    /// `@storage`: the field is a persistent storage variable.
    Storage,
    /// `@transient`: the field uses EIP-1153 transient storage.
    Transient,
    /// `@event`: the field's type names an event-schema interface.
    Event,
    /// `@slot(N)`: an explicit storage slot override.
    Slot(i128),
    /// `@view`: the method reads but does not write contract state.
    View,
    /// `@pure`: the method neither reads nor writes contract state.
    Pure,
    /// `@payable`: the method accepts value.
    Payable,
    /// `@external`: forces public visibility.
    External,
    /// `@internal`: forces private visibility.
    Internal,
    /// `@virtual`: the method may be overridden by a mixin consumer.
    Virtual,
}

/// A keyword-based visibility modifier, distinct from the `@external`/
/// `@internal` decorators.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Visibility {
    /// The `private` keyword modifier.
    Private,
}

/// An `interface`-style declaration of an event's schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventInterfaceDecl {
    /// The event's name.
    pub name: String,
    /// The event's fields, in declaration order.
    pub fields: Vec<EventFieldDecl>,
}

/// A single field of an event-schema interface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventFieldDecl {
    /// The field's name.
    pub name: String,
    /// The field's surface-language type spelling, with any `indexed<...>`
    /// wrapper already stripped.
    pub type_name: String,
    /// Whether the field's declared type was wrapped in `indexed<T>`.
    pub indexed: bool,
}
