//! Syntax tree produced by the parser.
//!
//! Every node records the [`Span`] of source text it was built from.
//! Nodes built by hand (see the builder methods) carry a default span.
//! The `Display` impls print a compact S-expression form that is used
//! for debugging dumps and tests; [`crate::formatter`] prints source text.

use std::fmt;

use crate::source::Span;

/// A whole compilation unit.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub items: Vec<Item>,
    pub span: Span,
}

/// A top-level entry.
#[derive(Debug, Clone, PartialEq)]
pub enum Item {
    Function(FnDecl),
    Struct(StructDecl),
    TypeAlias(TypeAlias),
    Import(Import),
    Statement(Statement),
}

/// A name with the span it was written at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ident {
    pub name: String,
    pub span: Span,
}

/// `def :: Type name(params) = body;`
#[derive(Debug, Clone, PartialEq)]
pub struct FnDecl {
    pub ty: Type,
    pub name: Ident,
    pub params: Vec<Ident>,
    pub body: Expr,
    pub span: Span,
}

/// `struct Name { field :: Type, ... }`
#[derive(Debug, Clone, PartialEq)]
pub struct StructDecl {
    pub name: Ident,
    pub fields: Vec<Field>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: Ident,
    pub ty: Type,
    pub span: Span,
}

/// `type Name = Type;`
#[derive(Debug, Clone, PartialEq)]
pub struct TypeAlias {
    pub name: Ident,
    pub ty: Type,
    pub span: Span,
}

/// `import a.b.c;`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Import {
    pub path: Vec<Ident>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub kind: StatementKind,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StatementKind {
    /// `let name :: Type = value;`, the annotation is optional.
    Let {
        name: Ident,
        ty: Option<Type>,
        value: Expr,
    },
    Return(Expr),
    Expression(Expr),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    Literal(Literal),
    Identifier(String),
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },
    Binary {
        op: BinaryOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    Assign {
        target: Box<Expr>,
        value: Box<Expr>,
    },
    Call {
        callee: Box<Expr>,
        args: Vec<Expr>,
    },
    /// `object.name`
    Member {
        object: Box<Expr>,
        name: Ident,
    },
    /// `object.(index)`
    Index {
        object: Box<Expr>,
        index: Box<Expr>,
    },
    /// `\(params) -> body` or `(params) -> body`.
    Lambda {
        params: Vec<Ident>,
        body: Box<Expr>,
    },
    Block(Vec<Statement>),
    /// A parenthesized expression, kept so spans and formatting stay
    /// faithful to the input.
    Group(Box<Expr>),
    /// Placeholder for an expression the parser expected but did not find.
    Missing,
    /// An invalid token in expression position.
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Integer(i64),
    Real(f64),
    /// The decoded value, escapes already resolved.
    String(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Type {
    pub kind: TypeKind,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeKind {
    /// `Int`
    Named(String),
    /// `List[Int]`, `Map[String, Int]`
    Applied { base: String, args: Vec<Type> },
    /// `A -> B`, right associative.
    Function { from: Box<Type>, to: Box<Type> },
    Missing,
}

/// Prefix operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    Neg,
    Not,
    BitNot,
}

impl UnaryOp {
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Neg => "-",
            Self::Not => "!",
            Self::BitNot => "~",
        }
    }
}

/// Infix operators, excluding assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    /// `$`
    Apply,
    Or,
    And,
    Eq,
    Ne,
    /// `<=>`
    Cmp,
    Lt,
    Le,
    Gt,
    Ge,
    BitOr,
    BitXor,
    BitAnd,
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    /// `..`
    Compose,
}

/// Operator associativity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Assoc {
    Left,
    Right,
}

/// Precedence level of assignment, the loosest binding operator.
pub const ASSIGN_PRECEDENCE: u8 = 1;
/// Precedence level of prefix operators.
pub const PREFIX_PRECEDENCE: u8 = 13;
/// Precedence level of calls, member access and indexing.
pub const POSTFIX_PRECEDENCE: u8 = 14;

impl BinaryOp {
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Apply => "$",
            Self::Or => "||",
            Self::And => "&&",
            Self::Eq => "==",
            Self::Ne => "!=",
            Self::Cmp => "<=>",
            Self::Lt => "<",
            Self::Le => "<=",
            Self::Gt => ">",
            Self::Ge => ">=",
            Self::BitOr => "|",
            Self::BitXor => "^",
            Self::BitAnd => "&",
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Rem => "%",
            Self::Compose => "..",
        }
    }

    /// Precedence level, higher binds tighter.
    ///
    /// | level | operators          |
    /// |-------|--------------------|
    /// | 2     | `$`                |
    /// | 3     | `\|\|`             |
    /// | 4     | `&&`               |
    /// | 5     | `==` `!=` `<=>`    |
    /// | 6     | `<` `<=` `>` `>=`  |
    /// | 7     | `\|`               |
    /// | 8     | `^`                |
    /// | 9     | `&`                |
    /// | 10    | `+` `-`            |
    /// | 11    | `*` `/` `%`        |
    /// | 12    | `..`               |
    #[must_use]
    pub const fn precedence(self) -> u8 {
        match self {
            Self::Apply => 2,
            Self::Or => 3,
            Self::And => 4,
            Self::Eq | Self::Ne | Self::Cmp => 5,
            Self::Lt | Self::Le | Self::Gt | Self::Ge => 6,
            Self::BitOr => 7,
            Self::BitXor => 8,
            Self::BitAnd => 9,
            Self::Add | Self::Sub => 10,
            Self::Mul | Self::Div | Self::Rem => 11,
            Self::Compose => 12,
        }
    }

    #[must_use]
    pub const fn assoc(self) -> Assoc {
        match self {
            Self::Apply | Self::Compose => Assoc::Right,
            _ => Assoc::Left,
        }
    }
}

impl Program {
    /// Iterate over function declarations.
    pub fn functions(&self) -> impl Iterator<Item = &FnDecl> {
        self.items.iter().filter_map(|item| match item {
            Item::Function(f) => Some(f),
            _ => None,
        })
    }

    /// Iterate over top-level statements.
    pub fn statements(&self) -> impl Iterator<Item = &Statement> {
        self.items.iter().filter_map(|item| match item {
            Item::Statement(s) => Some(s),
            _ => None,
        })
    }
}

impl Item {
    #[must_use]
    pub const fn span(&self) -> Span {
        match self {
            Self::Function(f) => f.span,
            Self::Struct(s) => s.span,
            Self::TypeAlias(t) => t.span,
            Self::Import(i) => i.span,
            Self::Statement(s) => s.span,
        }
    }
}

impl Expr {
    #[must_use]
    pub const fn new(kind: ExprKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Whether this node or any node below it is a `Missing` or `Error`
    /// placeholder.
    #[must_use]
    pub fn has_placeholder(&self) -> bool {
        match &self.kind {
            ExprKind::Missing | ExprKind::Error => true,
            ExprKind::Literal(_) | ExprKind::Identifier(_) => false,
            ExprKind::Unary { operand, .. } => operand.has_placeholder(),
            ExprKind::Binary { lhs, rhs, .. } => lhs.has_placeholder() || rhs.has_placeholder(),
            ExprKind::Assign { target, value } => {
                target.has_placeholder() || value.has_placeholder()
            }
            ExprKind::Call { callee, args } => {
                callee.has_placeholder() || args.iter().any(Self::has_placeholder)
            }
            ExprKind::Member { object, .. } => object.has_placeholder(),
            ExprKind::Index { object, index } => {
                object.has_placeholder() || index.has_placeholder()
            }
            ExprKind::Lambda { body, .. } => body.has_placeholder(),
            ExprKind::Group(inner) => inner.has_placeholder(),
            ExprKind::Block(statements) => statements.iter().any(|s| match &s.kind {
                StatementKind::Let { value, .. } => value.has_placeholder(),
                StatementKind::Return(e) | StatementKind::Expression(e) => e.has_placeholder(),
            }),
        }
    }

    /// Whether the expression may appear on the left of `=`.
    #[must_use]
    pub const fn is_assignable(&self) -> bool {
        matches!(
            self.kind,
            ExprKind::Identifier(_) | ExprKind::Member { .. } | ExprKind::Index { .. }
        )
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for item in &self.items {
            writeln!(f, "{item}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Function(func) => {
                write!(f, "(def {} :: {} (", func.name, func.ty)?;
                write_names(f, &func.params)?;
                write!(f, ") {})", func.body)
            }
            Self::Struct(s) => {
                write!(f, "(struct {}", s.name)?;
                for field in &s.fields {
                    write!(f, " ({} :: {})", field.name, field.ty)?;
                }
                write!(f, ")")
            }
            Self::TypeAlias(alias) => write!(f, "(type {} {})", alias.name, alias.ty),
            Self::Import(import) => {
                write!(f, "(import ")?;
                for (i, part) in import.path.iter().enumerate() {
                    if i > 0 {
                        write!(f, ".")?;
                    }
                    write!(f, "{part}")?;
                }
                write!(f, ")")
            }
            Self::Statement(s) => write!(f, "{s}"),
        }
    }
}

impl fmt::Display for Ident {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            StatementKind::Let { name, ty, value } => match ty {
                Some(ty) => write!(f, "(let {name} :: {ty} {value})"),
                None => write!(f, "(let {name} {value})"),
            },
            StatementKind::Return(value) => write!(f, "(return {value})"),
            StatementKind::Expression(e) => write!(f, "{e}"),
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ExprKind::Literal(lit) => write!(f, "{lit}"),
            ExprKind::Identifier(name) => f.write_str(name),
            ExprKind::Unary { op, operand } => write!(f, "({} {operand})", op.symbol()),
            ExprKind::Binary { op, lhs, rhs } => write!(f, "({} {lhs} {rhs})", op.symbol()),
            ExprKind::Assign { target, value } => write!(f, "(= {target} {value})"),
            ExprKind::Call { callee, args } => {
                write!(f, "(call {callee}")?;
                for arg in args {
                    write!(f, " {arg}")?;
                }
                write!(f, ")")
            }
            ExprKind::Member { object, name } => write!(f, "(. {object} {name})"),
            ExprKind::Index { object, index } => write!(f, "(index {object} {index})"),
            ExprKind::Lambda { params, body } => {
                write!(f, "(lambda (")?;
                write_names(f, params)?;
                write!(f, ") {body})")
            }
            ExprKind::Block(statements) => {
                write!(f, "(block")?;
                for s in statements {
                    write!(f, " {s}")?;
                }
                write!(f, ")")
            }
            ExprKind::Group(inner) => write!(f, "{inner}"),
            ExprKind::Missing => write!(f, "<missing>"),
            ExprKind::Error => write!(f, "<error>"),
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(n) => write!(f, "{n}"),
            Self::Real(r) => write!(f, "{r:?}"),
            Self::String(s) => write!(f, "{s:?}"),
        }
    }
}

/// Types print in source syntax, parenthesizing a function type that
/// appears as the argument of another arrow.
impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            TypeKind::Named(name) => f.write_str(name),
            TypeKind::Applied { base, args } => {
                write!(f, "{base}[")?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{arg}")?;
                }
                write!(f, "]")
            }
            TypeKind::Function { from, to } => {
                if matches!(from.kind, TypeKind::Function { .. }) {
                    write!(f, "({from}) -> {to}")
                } else {
                    write!(f, "{from} -> {to}")
                }
            }
            TypeKind::Missing => write!(f, "<missing>"),
        }
    }
}

fn write_names(f: &mut fmt::Formatter<'_>, names: &[Ident]) -> fmt::Result {
    for (i, name) in names.iter().enumerate() {
        if i > 0 {
            write!(f, " ")?;
        }
        write!(f, "{name}")?;
    }
    Ok(())
}
