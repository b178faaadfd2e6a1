use crate::{YulBlock, YulExpr, YulLiteral, YulObject, YulStatement};
use std::fmt::Write as _;

const INDENT: &str = "    ";

/// Pretty-prints a [`YulObject`] as strict-assembly Yul source text.
///
/// Deterministic: the same `YulObject` always produces the same byte-for-
/// byte output. 4-space indentation; negative integer literals are
/// rewritten as `sub(0, |n|)`, since Yul has no negative-literal syntax;
/// `dataoffset`/`datasize` operands are quoted string literals.
pub fn print_object(object: &YulObject) -> String {
    let mut out = String::new();
    write_object(&mut out, object, 0);
    out
}

fn indent(out: &mut String, level: usize) {
    for _ in 0..level {
        out.push_str(INDENT);
    }
}

fn write_object(out: &mut String, object: &YulObject, level: usize) {
    indent(out, level);
    let _ = writeln!(out, "object \"{}\" {{", object.name);

    indent(out, level + 1);
    out.push_str("code {\n");
    write_block(out, &object.code, level + 2);
    indent(out, level + 1);
    out.push_str("}\n");

    for sub in &object.sub_objects {
        write_object(out, sub, level + 1);
    }

    for (name, data) in &object.data {
        indent(out, level + 1);
        let _ = writeln!(out, "data \"{name}\" hex\"{}\"", hex::encode(data.as_ref()));
    }

    indent(out, level);
    out.push_str("}\n");
}

fn write_block(out: &mut String, block: &YulBlock, level: usize) {
    for stmt in block {
        write_stmt(out, stmt, level);
    }
}

fn write_stmt(out: &mut String, stmt: &YulStatement, level: usize) {
    match stmt {
        YulStatement::Block(body) => {
            indent(out, level);
            out.push_str("{\n");
            write_block(out, body, level + 1);
            indent(out, level);
            out.push_str("}\n");
        }
        YulStatement::Let { vars, value } => {
            indent(out, level);
            out.push_str("let ");
            out.push_str(&vars.join(", "));
            if let Some(value) = value {
                out.push_str(" := ");
                out.push_str(&expr_str(value));
            }
            out.push('\n');
        }
        YulStatement::Assign { vars, value } => {
            indent(out, level);
            out.push_str(&vars.join(", "));
            out.push_str(" := ");
            out.push_str(&expr_str(value));
            out.push('\n');
        }
        YulStatement::If { cond, body } => {
            indent(out, level);
            let _ = writeln!(out, "if {} {{", expr_str(cond));
            write_block(out, body, level + 1);
            indent(out, level);
            out.push_str("}\n");
        }
        YulStatement::Switch { cond, cases, default } => {
            indent(out, level);
            let _ = writeln!(out, "switch {}", expr_str(cond));
            for (lit, body) in cases {
                indent(out, level);
                let _ = writeln!(out, "case {} {{", literal_str(lit));
                write_block(out, body, level + 1);
                indent(out, level);
                out.push_str("}\n");
            }
            if let Some(default) = default {
                indent(out, level);
                out.push_str("default {\n");
                write_block(out, default, level + 1);
                indent(out, level);
                out.push_str("}\n");
            }
        }
        YulStatement::For { init, cond, post, body } => {
            indent(out, level);
            out.push_str("for ");
            out.push_str(&inline_block(init));
            out.push(' ');
            out.push_str(&expr_str(cond));
            out.push(' ');
            out.push_str(&inline_block(post));
            out.push_str(" {\n");
            write_block(out, body, level + 1);
            indent(out, level);
            out.push_str("}\n");
        }
        YulStatement::FunctionDef { name, params, returns, body } => {
            indent(out, level);
            out.push_str("function ");
            out.push_str(name);
            out.push('(');
            out.push_str(&params.join(", "));
            out.push(')');
            if !returns.is_empty() {
                out.push_str(" -> ");
                out.push_str(&returns.join(", "));
            }
            out.push_str(" {\n");
            write_block(out, body, level + 1);
            indent(out, level);
            out.push_str("}\n");
        }
        YulStatement::Leave => {
            indent(out, level);
            out.push_str("leave\n");
        }
        YulStatement::Break => {
            indent(out, level);
            out.push_str("break\n");
        }
        YulStatement::Continue => {
            indent(out, level);
            out.push_str("continue\n");
        }
        YulStatement::Expr(expr) => {
            indent(out, level);
            out.push_str(&expr_str(expr));
            out.push('\n');
        }
        YulStatement::Raw(code) => {
            indent(out, level);
            out.push_str(code);
            out.push('\n');
        }
    }
}

/// Renders a `for`-loop init/post block on a single line, as is
/// conventional for the short statement lists those blocks usually hold.
fn inline_block(block: &YulBlock) -> String {
    if block.is_empty() {
        return "{}".to_owned();
    }
    let mut out = String::from("{ ");
    for (i, stmt) in block.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        out.push_str(inline_stmt(stmt).trim_end());
    }
    out.push_str(" }");
    out
}

fn inline_stmt(stmt: &YulStatement) -> String {
    let mut buf = String::new();
    write_stmt(&mut buf, stmt, 0);
    buf
}

fn expr_str(expr: &YulExpr) -> String {
    match expr {
        YulExpr::Literal(lit) => literal_str(lit),
        YulExpr::StringLiteral(s) => quote(s),
        YulExpr::Ident(name) => name.clone(),
        YulExpr::Call { name, args } => {
            let args = args.iter().map(expr_str).collect::<Vec<_>>().join(", ");
            format!("{name}({args})")
        }
    }
}

fn literal_str(lit: &YulLiteral) -> String {
    match lit {
        YulLiteral::Bool(true) => "true".to_owned(),
        YulLiteral::Bool(false) => "false".to_owned(),
        YulLiteral::Number(n) => {
            if n.is_negative() {
                format!("sub(0, {})", n.magnitude())
            } else {
                n.magnitude().to_string()
            }
        }
        YulLiteral::HexString(bytes) => format!("hex\"{}\"", hex::encode(bytes)),
    }
}

fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prints_minimal_contract_shell() {
        let mut deployed = YulObject::new("C_deployed");
        deployed.code.push(YulStatement::Expr(YulExpr::call(
            "sstore",
            vec![YulExpr::number(0u64), YulExpr::number(1u64)],
        )));

        let mut creation = YulObject::new("C");
        creation.code.push(YulStatement::Expr(YulExpr::call(
            "return",
            vec![
                YulExpr::number(0u64),
                YulExpr::call("datasize", vec![YulExpr::StringLiteral("C_deployed".into())]),
            ],
        )));
        creation.sub_objects.push(deployed);

        let text = print_object(&creation);
        assert!(text.starts_with("object \"C\" {\n"));
        assert!(text.contains("object \"C_deployed\" {\n"));
        assert!(text.contains("datasize(\"C_deployed\")"));
        assert!(text.contains("sstore(0, 1)"));
    }

    #[test]
    fn negative_literal_becomes_sub() {
        let expr = YulExpr::number(-5i128);
        assert_eq!(expr_str(&expr), "sub(0, 5)");
    }

    #[test]
    fn for_loop_renders_inline_init_and_post() {
        let stmt = YulStatement::For {
            init: vec![YulStatement::Let {
                vars: vec!["i".into()],
                value: Some(YulExpr::number(0u64)),
            }],
            cond: YulExpr::call("lt", vec![YulExpr::Ident("i".into()), YulExpr::number(10u64)]),
            post: vec![YulStatement::Assign {
                vars: vec!["i".into()],
                value: YulExpr::call("add", vec![YulExpr::Ident("i".into()), YulExpr::number(1u64)]),
            }],
            body: vec![],
        };
        let mut out = String::new();
        write_stmt(&mut out, &stmt, 0);
        assert_eq!(out, "for { let i := 0 } lt(i, 10) { i := add(i, 1) } {\n}\n");
    }
}
