//! Pretty-printer that turns a syntax tree back into canonical source.
//!
//! Output uses four-space indentation, one statement per line and a blank
//! line around function and struct declarations. Parentheses are emitted
//! only where the precedence table needs them, plus wherever the tree has
//! an explicit `Group`. Formatting is idempotent: parsing the output and
//! formatting again yields the same text.

use std::fmt::Write as _;

use crate::ast::{
    ASSIGN_PRECEDENCE, Assoc, Expr, ExprKind, FnDecl, Ident, Item, Literal, POSTFIX_PRECEDENCE,
    PREFIX_PRECEDENCE, Program, Statement, StatementKind, StructDecl,
};

const INDENT: &str = "    ";

/// Binds tighter than anything, so never needs parentheses.
const ATOM_PRECEDENCE: u8 = POSTFIX_PRECEDENCE + 1;
/// A lambda body extends as far right as possible.
const LAMBDA_PRECEDENCE: u8 = 0;

/// Format a whole program.
#[must_use]
pub fn format(program: &Program) -> String {
    let mut out = String::new();
    let mut prev_spaced = false;

    for (i, item) in program.items.iter().enumerate() {
        let spaced = matches!(item, Item::Function(_) | Item::Struct(_));
        if i > 0 && (spaced || prev_spaced) {
            out.push('\n');
        }
        format_item(&mut out, item);
        prev_spaced = spaced;
    }

    out
}

/// Format a single expression on one line (blocks still span lines).
#[must_use]
pub fn format_expr(expr: &Expr) -> String {
    let mut out = String::new();
    write_expr(&mut out, expr, 0, 0);
    out
}

fn format_item(out: &mut String, item: &Item) {
    match item {
        Item::Function(f) => format_function(out, f),
        Item::Struct(s) => format_struct(out, s),
        Item::TypeAlias(alias) => {
            let _ = writeln!(out, "type {} = {};", alias.name, alias.ty);
        }
        Item::Import(import) => {
            out.push_str("import ");
            let path: Vec<&str> = import.path.iter().map(|p| p.name.as_str()).collect();
            out.push_str(&path.join("."));
            out.push_str(";\n");
        }
        Item::Statement(s) => format_statement(out, s, 0),
    }
}

fn format_function(out: &mut String, f: &FnDecl) {
    let _ = write!(out, "def :: {} {}(", f.ty, f.name);
    write_names(out, &f.params);
    out.push_str(") = ");
    write_expr(out, &f.body, 0, 0);
    out.push_str(";\n");
}

fn format_struct(out: &mut String, s: &StructDecl) {
    if s.fields.is_empty() {
        let _ = writeln!(out, "struct {} {{}}", s.name);
        return;
    }
    let _ = writeln!(out, "struct {} {{", s.name);
    for field in &s.fields {
        let _ = writeln!(out, "{INDENT}{} :: {},", field.name, field.ty);
    }
    out.push_str("}\n");
}

fn format_statement(out: &mut String, statement: &Statement, indent: usize) {
    push_indent(out, indent);
    match &statement.kind {
        StatementKind::Let { name, ty, value } => {
            let _ = write!(out, "let {name}");
            if let Some(ty) = ty {
                let _ = write!(out, " :: {ty}");
            }
            out.push_str(" = ");
            write_expr(out, value, 0, indent);
        }
        StatementKind::Return(value) => {
            out.push_str("return ");
            write_expr(out, value, 0, indent);
        }
        StatementKind::Expression(expr) => write_expr(out, expr, 0, indent),
    }
    out.push_str(";\n");
}

/// Precedence level an expression prints at.
fn precedence(expr: &Expr) -> u8 {
    match &expr.kind {
        ExprKind::Assign { .. } => ASSIGN_PRECEDENCE,
        ExprKind::Binary { op, .. } => op.precedence(),
        ExprKind::Unary { .. } => PREFIX_PRECEDENCE,
        ExprKind::Literal(Literal::Integer(n)) if *n < 0 => PREFIX_PRECEDENCE,
        ExprKind::Literal(Literal::Real(r)) if r.is_sign_negative() => PREFIX_PRECEDENCE,
        ExprKind::Call { .. } | ExprKind::Member { .. } | ExprKind::Index { .. } => {
            POSTFIX_PRECEDENCE
        }
        ExprKind::Lambda { .. } => LAMBDA_PRECEDENCE,
        ExprKind::Literal(_)
        | ExprKind::Identifier(_)
        | ExprKind::Block(_)
        | ExprKind::Group(_)
        | ExprKind::Missing
        | ExprKind::Error => ATOM_PRECEDENCE,
    }
}

/// Write `expr`, parenthesized if it binds looser than `min`.
fn write_expr(out: &mut String, expr: &Expr, min: u8, indent: usize) {
    if precedence(expr) < min {
        out.push('(');
        write_bare(out, expr, indent);
        out.push(')');
    } else {
        write_bare(out, expr, indent);
    }
}

fn write_bare(out: &mut String, expr: &Expr, indent: usize) {
    match &expr.kind {
        ExprKind::Literal(lit) => write_literal(out, lit),
        ExprKind::Identifier(name) => out.push_str(name),
        ExprKind::Unary { op, operand } => {
            out.push_str(op.symbol());
            write_expr(out, operand, PREFIX_PRECEDENCE, indent);
        }
        ExprKind::Binary { op, lhs, rhs } => {
            let level = op.precedence();
            let (left_min, right_min) = match op.assoc() {
                Assoc::Left => (level, level + 1),
                Assoc::Right => (level + 1, level),
            };
            write_expr(out, lhs, left_min, indent);
            let _ = write!(out, " {} ", op.symbol());
            write_expr(out, rhs, right_min, indent);
        }
        ExprKind::Assign { target, value } => {
            write_expr(out, target, ASSIGN_PRECEDENCE + 1, indent);
            out.push_str(" = ");
            write_expr(out, value, ASSIGN_PRECEDENCE, indent);
        }
        ExprKind::Call { callee, args } => {
            write_expr(out, callee, POSTFIX_PRECEDENCE, indent);
            out.push('(');
            for (i, arg) in args.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_expr(out, arg, 0, indent);
            }
            out.push(')');
        }
        ExprKind::Member { object, name } => {
            // `1.x` would lex as a malformed number.
            if matches!(object.kind, ExprKind::Literal(Literal::Integer(_))) {
                out.push('(');
                write_bare(out, object, indent);
                out.push(')');
            } else {
                write_expr(out, object, POSTFIX_PRECEDENCE, indent);
            }
            let _ = write!(out, ".{name}");
        }
        ExprKind::Index { object, index } => {
            write_expr(out, object, POSTFIX_PRECEDENCE, indent);
            out.push_str(".(");
            write_expr(out, index, 0, indent);
            out.push(')');
        }
        ExprKind::Lambda { params, body } => {
            out.push_str("\\(");
            write_names(out, params);
            out.push_str(") -> ");
            write_expr(out, body, LAMBDA_PRECEDENCE, indent);
        }
        ExprKind::Block(statements) => {
            if statements.is_empty() {
                out.push_str("{}");
                return;
            }
            out.push_str("{\n");
            for s in statements {
                format_statement(out, s, indent + 1);
            }
            push_indent(out, indent);
            out.push('}');
        }
        ExprKind::Group(inner) => {
            out.push('(');
            write_expr(out, inner, 0, indent);
            out.push(')');
        }
        ExprKind::Missing | ExprKind::Error => {}
    }
}

fn write_literal(out: &mut String, lit: &Literal) {
    match lit {
        Literal::Integer(n) => {
            let _ = write!(out, "{n}");
        }
        Literal::Real(r) => {
            let _ = write!(out, "{r:?}");
        }
        Literal::String(s) => write_string(out, s),
    }
}

fn write_string(out: &mut String, value: &str) {
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            '\0' => out.push_str("\\0"),
            c => out.push(c),
        }
    }
    out.push('"');
}

fn write_names(out: &mut String, names: &[Ident]) {
    for (i, name) in names.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        out.push_str(&name.name);
    }
}

fn push_indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push_str(INDENT);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{BinaryOp, UnaryOp};

    fn bin(op: BinaryOp, lhs: Expr, rhs: Expr) -> Expr {
        Expr::binary(op, lhs, rhs)
    }

    fn x() -> Expr {
        Expr::ident("x")
    }

    #[test]
    fn no_parens_when_precedence_allows() {
        let e = bin(
            BinaryOp::Add,
            Expr::int(1),
            bin(BinaryOp::Mul, Expr::int(2), Expr::int(3)),
        );
        assert_eq!(format_expr(&e), "1 + 2 * 3");
    }

    #[test]
    fn parens_for_looser_operand() {
        let e = bin(
            BinaryOp::Mul,
            bin(BinaryOp::Add, Expr::int(1), Expr::int(2)),
            Expr::int(3),
        );
        assert_eq!(format_expr(&e), "(1 + 2) * 3");
    }

    #[test]
    fn associativity_decides_side() {
        let left = bin(BinaryOp::Sub, bin(BinaryOp::Sub, x(), x()), x());
        assert_eq!(format_expr(&left), "x - x - x");
        let right = bin(BinaryOp::Sub, x(), bin(BinaryOp::Sub, x(), x()));
        assert_eq!(format_expr(&right), "x - (x - x)");

        let compose = bin(BinaryOp::Compose, x(), bin(BinaryOp::Compose, x(), x()));
        assert_eq!(format_expr(&compose), "x .. x .. x");
        let compose_left = bin(BinaryOp::Compose, bin(BinaryOp::Compose, x(), x()), x());
        assert_eq!(format_expr(&compose_left), "(x .. x) .. x");
    }

    #[test]
    fn unary_and_postfix() {
        let neg_call = Expr::unary(UnaryOp::Neg, x().call([Expr::int(1)]));
        assert_eq!(format_expr(&neg_call), "-x(1)");
        let call_of_neg = Expr::unary(UnaryOp::Neg, x()).call([]);
        assert_eq!(format_expr(&call_of_neg), "(-x)()");
        let neg_sum = Expr::unary(UnaryOp::Not, bin(BinaryOp::And, x(), x()));
        assert_eq!(format_expr(&neg_sum), "!(x && x)");
    }

    #[test]
    fn member_on_integer_is_parenthesized() {
        assert_eq!(format_expr(&Expr::int(1).member("abs")), "(1).abs");
        assert_eq!(format_expr(&Expr::int(-1).member("abs")), "(-1).abs");
        assert_eq!(format_expr(&Expr::real(1.5).member("floor")), "1.5.floor");
        assert_eq!(format_expr(&Expr::int(1).index(Expr::int(0))), "1.(0)");
    }

    #[test]
    fn lambda_and_assignment() {
        let lam = Expr::lambda(["a", "b"], bin(BinaryOp::Add, Expr::ident("a"), Expr::ident("b")));
        assert_eq!(format_expr(&lam), "\\(a, b) -> a + b");
        let applied = lam.clone().call([Expr::int(1), Expr::int(2)]);
        assert_eq!(format_expr(&applied), "(\\(a, b) -> a + b)(1, 2)");
        let assign = x().assign(lam);
        assert_eq!(format_expr(&assign), "x = (\\(a, b) -> a + b)");
        let chain = x().assign(Expr::ident("y").assign(Expr::int(0)));
        assert_eq!(format_expr(&chain), "x = y = 0");
    }

    #[test]
    fn strings_are_escaped() {
        let s = Expr::string("say \"hi\"\n\\");
        assert_eq!(format_expr(&s), r#""say \"hi\"\n\\""#);
    }

    #[test]
    fn blocks_indent() {
        let program = Program::new().item(
            FnDecl::new("f", crate::ast::Type::named("Int"))
                .param("x")
                .body(Expr::block([
                    Statement::bind("y", bin(BinaryOp::Add, x(), Expr::int(1))),
                    Statement::ret(Expr::block([Statement::expr(Expr::ident("y"))])),
                ])),
        );
        let expected = "\
def :: Int f(x) = {
    let y = x + 1;
    return {
        y;
    };
};
";
        assert_eq!(format(&program), expected);
    }

    #[test]
    fn declarations_are_separated() {
        let program = Program::new()
            .item(crate::ast::Import::new("std.io"))
            .item(crate::ast::Import::new("std.math"))
            .item(StructDecl::new("Empty"))
            .expr(Expr::int(1))
            .expr(Expr::int(2));
        assert_eq!(
            format(&program),
            "import std.io;\nimport std.math;\n\nstruct Empty {}\n\n1;\n2;\n"
        );
    }
}
