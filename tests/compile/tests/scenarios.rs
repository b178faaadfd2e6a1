//! End-to-end compile scenarios, grounded in spec.md §8's literal
//! expectations, exercised solely through the `evmc` facade's public
//! `compile` entry point against hand-built `SourceFile` fixtures (this
//! repo has no front-end parser to drive from source text).

use evmc::{compile, CompileError, CompilerOptions};
use evmc_ast::{
    ClassDecl, Decorator, EventFieldDecl, EventInterfaceDecl, Expr, Literal, MethodDecl, ParamDecl,
    PropertyDecl, SourceFile, Stmt,
};
use evmc::json_abi::{AbiItem, StateMutability};
use evmc_types::{from_solidity_type, to_solidity_type};

fn prop(name: &str, ty: &str, decorators: Vec<Decorator>) -> PropertyDecl {
    PropertyDecl { name: name.into(), type_name: ty.into(), decorators, initializer: None }
}

fn prop_with_default(name: &str, ty: &str, decorators: Vec<Decorator>, default: Literal) -> PropertyDecl {
    PropertyDecl { name: name.into(), type_name: ty.into(), decorators, initializer: Some(default) }
}

fn method(
    name: &str,
    params: Vec<(&str, &str)>,
    return_type: Option<&str>,
    decorators: Vec<Decorator>,
    body: Vec<Stmt>,
) -> MethodDecl {
    MethodDecl {
        name: name.into(),
        params: params
            .into_iter()
            .map(|(n, t)| ParamDecl { name: n.into(), type_name: t.into() })
            .collect(),
        return_type: return_type.map(str::to_owned),
        decorators,
        is_constructor: false,
        visibility_keyword: None,
        body,
    }
}

fn this_field(name: &str) -> Expr {
    Expr::Member { base: Box::new(Expr::Ident("this".into())), name: name.into() }
}

fn msg_sender() -> Expr {
    Expr::Member { base: Box::new(Expr::Ident("msg".into())), name: "sender".into() }
}

fn class(name: &str, properties: Vec<PropertyDecl>, methods: Vec<MethodDecl>) -> ClassDecl {
    ClassDecl { name: name.into(), mixins: Vec::new(), properties, methods }
}

fn source(classes: Vec<ClassDecl>) -> SourceFile {
    SourceFile { classes, ..Default::default() }
}

// Scenario 1: `Counter { @storage value: u256 = 0n; public increment(): void; public get(): u256 }`.
#[test]
fn counter_increment_and_get() {
    let value = prop_with_default("value", "u256", vec![Decorator::Storage], Literal::Int(0));

    let increment = method(
        "increment",
        vec![],
        None,
        vec![],
        vec![Stmt::ExprStmt(Expr::Assign {
            target: Box::new(this_field("value")),
            value: Box::new(Expr::Binary {
                op: evmc_ast::BinaryOp::Add,
                lhs: Box::new(this_field("value")),
                rhs: Box::new(Expr::Literal(Literal::Int(1))),
            }),
        })],
    );
    let get = method("get", vec![], Some("u256"), vec![Decorator::View], vec![Stmt::Return(Some(this_field("value")))]);

    let src = source(vec![class("Counter", vec![value], vec![increment, get])]);
    let out = compile(&src, &CompilerOptions::new());
    assert!(out.errors.is_empty(), "unexpected errors: {:?}", out.errors);

    assert!(out.yul.contains("object \"Counter\" {"));
    assert!(out.yul.contains("object \"Counter_deployed\" {"));
    assert!(out.yul.contains("shr(224, calldataload(0))"));
    assert!(out.yul.contains("default {"));
    assert!(out.yul.contains("revert(0, 0)"));
    assert!(out.yul.contains("sstore(0, add(sload(0), 1))"));
}

// Scenario 2: `Calc { @pure add(a:u256,b:u256):u256 { return a+b } }`.
#[test]
fn calc_add_selector_and_abi() {
    let add = method(
        "add",
        vec![("a", "u256"), ("b", "u256")],
        Some("u256"),
        vec![Decorator::Pure],
        vec![Stmt::Return(Some(Expr::Binary {
            op: evmc_ast::BinaryOp::Add,
            lhs: Box::new(Expr::Ident("a".into())),
            rhs: Box::new(Expr::Ident("b".into())),
        }))],
    );

    let src = source(vec![class("Calc", vec![], vec![add])]);
    let out = compile(&src, &CompilerOptions::new());
    assert!(out.errors.is_empty(), "unexpected errors: {:?}", out.errors);

    let AbiItem::Function(function) = &out.abi.items[0] else { panic!("expected a function item") };
    assert_eq!(hex::encode(function.selector()), "771602f7");
    assert_eq!(function.state_mutability, StateMutability::Pure);
    assert_eq!(function.inputs[0].name, "a");
    assert_eq!(function.inputs[0].ty, "uint256");
    assert_eq!(function.inputs[1].name, "b");
    assert_eq!(function.inputs[1].ty, "uint256");
    assert_eq!(function.outputs[0].name, "");
    assert_eq!(function.outputs[0].ty, "uint256");
}

// Scenario 3: `@storage balances: Mapping<address, u256>` at slot 0, read via
// `balances[msg.sender]`.
#[test]
fn mapping_index_hashes_scratch_buffer() {
    let balances = prop("balances", "Mapping<address, u256>", vec![Decorator::Storage]);
    let balance_of = method(
        "balanceOf",
        vec![],
        Some("u256"),
        vec![Decorator::View],
        vec![Stmt::Return(Some(Expr::Index {
            base: Box::new(Expr::Ident("balances".into())),
            index: Box::new(msg_sender()),
        }))],
    );

    let src = source(vec![class("Ledger", vec![balances], vec![balance_of])]);
    let out = compile(&src, &CompilerOptions::new());
    assert!(out.errors.is_empty(), "unexpected errors: {:?}", out.errors);

    assert!(out.yul.contains("mstore(32, 0)"), "base slot 0 must be mstore'd at offset 32:\n{}", out.yul);
    assert!(out.yul.contains("keccak256(0, 64)"));
    assert!(out.yul.contains("caller()"));
}

// Scenario 4: three `@storage` fields, `@slot(5)` on the middle one. The
// auto counter must continue at 0, 5, 1 rather than renumbering around the
// override; verified end-to-end by giving each field a distinct default so
// the creation code's initializer `sstore`s land at the expected slots.
#[test]
fn slot_override_does_not_perturb_auto_counter() {
    let first = prop_with_default("first", "u256", vec![Decorator::Storage], Literal::Int(10));
    let middle =
        prop_with_default("middle", "u256", vec![Decorator::Storage, Decorator::Slot(5)], Literal::Int(20));
    let last = prop_with_default("last", "u256", vec![Decorator::Storage], Literal::Int(30));

    let src = source(vec![class("Triple", vec![first, middle, last], vec![])]);
    let out = compile(&src, &CompilerOptions::new());
    assert!(out.errors.is_empty(), "unexpected errors: {:?}", out.errors);

    assert!(out.yul.contains("sstore(0, 10)"), "first at slot 0:\n{}", out.yul);
    assert!(out.yul.contains("sstore(5, 20)"), "middle at slot 5:\n{}", out.yul);
    assert!(out.yul.contains("sstore(1, 30)"), "last at slot 1, not 2:\n{}", out.yul);
}

// Scenario 5: `Transfer(from: indexed<address>, to: indexed<address>, value: u256)`,
// emitted as `log3(memPtr, 32, keccak256("Transfer(address,address,uint256)"), from, to)`.
#[test]
fn transfer_event_emits_log3() {
    let iface = EventInterfaceDecl {
        name: "Transfer".into(),
        fields: vec![
            EventFieldDecl { name: "from".into(), type_name: "address".into(), indexed: true },
            EventFieldDecl { name: "to".into(), type_name: "address".into(), indexed: true },
            EventFieldDecl { name: "value".into(), type_name: "u256".into(), indexed: false },
        ],
    };

    let transfer_event = prop("Ev", "Transfer", vec![Decorator::Event]);
    let transfer_method = method(
        "transfer",
        vec![("to", "address"), ("value", "u256")],
        None,
        vec![],
        vec![Stmt::ExprStmt(Expr::Emit {
            event: "Transfer".into(),
            args: vec![
                ("from".into(), msg_sender()),
                ("to".into(), Expr::Ident("to".into())),
                ("value".into(), Expr::Ident("value".into())),
            ],
        })],
    );

    let mut src = source(vec![class("Token", vec![transfer_event], vec![transfer_method])]);
    src.event_interfaces.push(iface);

    let out = compile(&src, &CompilerOptions::new());
    assert!(out.errors.is_empty(), "unexpected errors: {:?}", out.errors);

    let topic0 = evmc::primitives::keccak256(b"Transfer(address,address,uint256)");
    let topic0_decimal = evmc::primitives::U256::from_be_bytes(*topic0).to_string();

    assert!(out.yul.contains(&format!("log3(0, 32, {topic0_decimal}, caller(), p_to)")), "{}", out.yul);
    assert!(out.yul.contains("mstore(0, p_value)"));
}

// Scenario 6: no exported class.
#[test]
fn no_class_reports_expected_error_and_empty_output() {
    let src = SourceFile::default();
    let out = compile(&src, &CompilerOptions::new());
    assert_eq!(
        out.errors,
        vec![CompileError::Semantic("No contract found. Export a class to define a contract.".to_owned())]
    );
    assert!(out.yul.is_empty());
    assert!(out.abi.is_empty());
}

// Invariant: selector format is 10-character lowercase `0x`-prefixed hex.
#[test]
fn selector_format_invariant() {
    let add = method(
        "add",
        vec![("a", "u256"), ("b", "u256")],
        Some("u256"),
        vec![Decorator::Pure],
        vec![Stmt::Return(Some(Expr::Literal(Literal::Int(0))))],
    );
    let src = source(vec![class("Calc", vec![], vec![add])]);
    let out = compile(&src, &CompilerOptions::new());
    assert!(out.errors.is_empty());

    let AbiItem::Function(function) = &out.abi.items[0] else { panic!("expected a function item") };
    let rendered = format!("0x{}", hex::encode(function.selector()));
    assert_eq!(rendered.len(), 10);
    assert_eq!(rendered, rendered.to_lowercase());
}

// Invariant: storage slots never collide; `@slot(N)` colliding with an
// already-assigned slot is a semantic error, not silently accepted.
#[test]
fn duplicate_storage_slot_is_reported() {
    let a = prop("a", "u256", vec![Decorator::Storage, Decorator::Slot(0)]);
    let b = prop("b", "u256", vec![Decorator::Storage]);
    let src = source(vec![class("Dup", vec![a, b], vec![])]);
    let out = compile(&src, &CompilerOptions::new());

    assert_eq!(out.errors.len(), 1);
    let CompileError::Semantic(message) = &out.errors[0] else { panic!("expected a semantic error") };
    assert!(message.contains("is assigned to both"), "{message}");
    assert!(out.yul.is_empty());
}

// Invariant: `fromSolidityType(toSolidityType(t)) == t` for constructible
// non-struct, non-mapping types.
#[test]
fn solidity_type_round_trips() {
    for spelling in [
        "uint256", "uint8", "int128", "bool", "address", "bytes32", "bytes", "string", "uint256[]",
        "(uint256,address)",
    ] {
        let ty = from_solidity_type(spelling).unwrap();
        assert_eq!(to_solidity_type(&ty), spelling, "round trip failed for {spelling}");
    }
}

// Invariant: a dynamic array's `i`th element slot is `keccak256(pad32(s)) + i`,
// with a bounds check against the stored length.
#[test]
fn array_element_access_hashes_base_and_bounds_checks() {
    let items = prop("items", "u256[]", vec![Decorator::Storage]);
    let get = method(
        "itemAt",
        vec![("i", "u256")],
        Some("u256"),
        vec![Decorator::View],
        vec![Stmt::Return(Some(Expr::Index {
            base: Box::new(Expr::Ident("items".into())),
            index: Box::new(Expr::Ident("i".into())),
        }))],
    );
    let src = source(vec![class("List", vec![items], vec![get])]);
    let out = compile(&src, &CompilerOptions::new());
    assert!(out.errors.is_empty(), "unexpected errors: {:?}", out.errors);

    assert!(out.yul.contains("keccak256(0, 32)"), "{}", out.yul);
    assert!(out.yul.contains("revert(0, 36)"), "out-of-bounds panic must revert:\n{}", out.yul);
    assert!(out.yul.contains("add(__elembase"), "{}", out.yul);
}

// Invariant: non-payable functions revert (empty return data) when called
// with nonzero value; the dispatcher guards every non-payable case.
#[test]
fn non_payable_function_guards_callvalue() {
    let touch = method("touch", vec![], None, vec![], vec![]);
    let src = source(vec![class("Guarded", vec![], vec![touch])]);
    let out = compile(&src, &CompilerOptions::new());
    assert!(out.errors.is_empty());

    assert!(out.yul.contains("if callvalue() {"), "{}", out.yul);
}

// Invariant: `revert("m")` begins with the standard `Error(string)`
// selector `08c379a0` packed into the top 4 bytes of a word, followed by
// the ABI-encoded string.
#[test]
fn revert_with_message_encodes_error_selector() {
    let guarded = method(
        "guarded",
        vec![],
        None,
        vec![],
        vec![Stmt::ExprStmt(Expr::Revert {
            error: None,
            args: vec![],
            message: Some(Box::new(Expr::Literal(Literal::Str("nope".into())))),
        })],
    );
    let src = source(vec![class("Reverts", vec![], vec![guarded])]);
    let out = compile(&src, &CompilerOptions::new());
    assert!(out.errors.is_empty(), "unexpected errors: {:?}", out.errors);

    let selector_word = evmc::primitives::U256::from(0x08c3_79a0u64) << 224usize;
    assert!(out.yul.contains(&format!("mstore(0, {selector_word})")), "{}", out.yul);
    assert!(out.yul.contains("mstore(4, 32)"));
    assert!(out.yul.contains("mstore(36, 4)"));
}

// Invariant: a user function named after a Yul builtin (`add`, `call`,
// `return`, ...) must not be emitted verbatim, or it would either collide
// with the builtin of the same name or self-recurse infinitely.
#[test]
fn function_named_after_builtin_is_mangled() {
    let add = method(
        "add",
        vec![("a", "u256"), ("b", "u256")],
        Some("u256"),
        vec![Decorator::Pure],
        vec![Stmt::Return(Some(Expr::Binary {
            op: evmc_ast::BinaryOp::Add,
            lhs: Box::new(Expr::Ident("a".into())),
            rhs: Box::new(Expr::Ident("b".into())),
        }))],
    );
    let src = source(vec![class("Calc", vec![], vec![add])]);
    let out = compile(&src, &CompilerOptions::new());
    assert!(out.errors.is_empty(), "unexpected errors: {:?}", out.errors);

    assert!(!out.yul.contains("function add("), "{}", out.yul);
    assert!(out.yul.contains("function fun_add(p_a, p_b) -> ret"), "{}", out.yul);
    assert!(out.yul.contains("ret := add(p_a, p_b)"), "{}", out.yul);
    assert!(out.yul.contains("fun_add(p_a, p_b)"), "{}", out.yul);
}
