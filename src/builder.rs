//! Chained constructors for building syntax trees by hand.
//!
//! Built nodes carry default spans; they are meant for generating code
//! with [`crate::formatter::format`], not for diagnostics.

use crate::ast::{
    BinaryOp, Expr, ExprKind, Field, FnDecl, Ident, Import, Item, Literal, Program, Statement,
    StatementKind, StructDecl, Type, TypeAlias, TypeKind, UnaryOp,
};
use crate::source::Span;

impl Program {
    /// Create an empty program.
    #[must_use]
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            span: Span::default(),
        }
    }

    /// Append any top-level item.
    #[must_use]
    pub fn item(mut self, item: impl Into<Item>) -> Self {
        self.items.push(item.into());
        self
    }

    /// Append an expression statement.
    #[must_use]
    pub fn expr(self, expr: Expr) -> Self {
        self.item(Statement::expr(expr))
    }
}

impl Default for Program {
    fn default() -> Self {
        Self::new()
    }
}

impl From<FnDecl> for Item {
    fn from(f: FnDecl) -> Self {
        Self::Function(f)
    }
}

impl From<StructDecl> for Item {
    fn from(s: StructDecl) -> Self {
        Self::Struct(s)
    }
}

impl From<TypeAlias> for Item {
    fn from(t: TypeAlias) -> Self {
        Self::TypeAlias(t)
    }
}

impl From<Import> for Item {
    fn from(i: Import) -> Self {
        Self::Import(i)
    }
}

impl From<Statement> for Item {
    fn from(s: Statement) -> Self {
        Self::Statement(s)
    }
}

impl Ident {
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            span: Span::default(),
        }
    }
}

impl FnDecl {
    /// Create a function with no parameters and a `Missing` body.
    #[must_use]
    pub fn new(name: &str, ty: Type) -> Self {
        Self {
            ty,
            name: Ident::new(name),
            params: Vec::new(),
            body: Expr::missing(),
            span: Span::default(),
        }
    }

    /// Add a parameter.
    #[must_use]
    pub fn param(mut self, name: &str) -> Self {
        self.params.push(Ident::new(name));
        self
    }

    /// Set the body expression.
    #[must_use]
    pub fn body(mut self, body: Expr) -> Self {
        self.body = body;
        self
    }
}

impl StructDecl {
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: Ident::new(name),
            fields: Vec::new(),
            span: Span::default(),
        }
    }

    /// Add a field.
    #[must_use]
    pub fn field(mut self, name: &str, ty: Type) -> Self {
        self.fields.push(Field {
            name: Ident::new(name),
            ty,
            span: Span::default(),
        });
        self
    }
}

impl TypeAlias {
    #[must_use]
    pub fn new(name: &str, ty: Type) -> Self {
        Self {
            name: Ident::new(name),
            ty,
            span: Span::default(),
        }
    }
}

impl Import {
    /// Create an import from a dotted path such as `std.io`.
    #[must_use]
    pub fn new(path: &str) -> Self {
        Self {
            path: path.split('.').map(Ident::new).collect(),
            span: Span::default(),
        }
    }
}

impl Statement {
    /// `let name = value;`
    #[must_use]
    pub fn bind(name: &str, value: Expr) -> Self {
        Self::from_kind(StatementKind::Let {
            name: Ident::new(name),
            ty: None,
            value,
        })
    }

    /// Add a type annotation to a `let`. Other statements are unchanged.
    #[must_use]
    pub fn typed(mut self, annotation: Type) -> Self {
        if let StatementKind::Let { ty, .. } = &mut self.kind {
            *ty = Some(annotation);
        }
        self
    }

    /// `return value;`
    #[must_use]
    pub fn ret(value: Expr) -> Self {
        Self::from_kind(StatementKind::Return(value))
    }

    /// `expr;`
    #[must_use]
    pub fn expr(expr: Expr) -> Self {
        Self::from_kind(StatementKind::Expression(expr))
    }

    fn from_kind(kind: StatementKind) -> Self {
        Self {
            kind,
            span: Span::default(),
        }
    }
}

impl Type {
    #[must_use]
    pub fn named(name: &str) -> Self {
        Self::from_kind(TypeKind::Named(name.to_string()))
    }

    /// `base[args]`
    #[must_use]
    pub fn applied(base: &str, args: impl IntoIterator<Item = Self>) -> Self {
        Self::from_kind(TypeKind::Applied {
            base: base.to_string(),
            args: args.into_iter().collect(),
        })
    }

    /// The function type `self -> to`.
    #[must_use]
    pub fn to(self, to: Self) -> Self {
        Self::from_kind(TypeKind::Function {
            from: Box::new(self),
            to: Box::new(to),
        })
    }

    fn from_kind(kind: TypeKind) -> Self {
        Self {
            kind,
            span: Span::default(),
        }
    }
}

impl Expr {
    fn bare(kind: ExprKind) -> Self {
        Self::new(kind, Span::default())
    }

    #[must_use]
    pub fn int(value: i64) -> Self {
        Self::bare(ExprKind::Literal(Literal::Integer(value)))
    }

    #[must_use]
    pub fn real(value: f64) -> Self {
        Self::bare(ExprKind::Literal(Literal::Real(value)))
    }

    #[must_use]
    pub fn string(value: &str) -> Self {
        Self::bare(ExprKind::Literal(Literal::String(value.to_string())))
    }

    #[must_use]
    pub fn ident(name: &str) -> Self {
        Self::bare(ExprKind::Identifier(name.to_string()))
    }

    #[must_use]
    pub fn missing() -> Self {
        Self::bare(ExprKind::Missing)
    }

    #[must_use]
    pub fn unary(op: UnaryOp, operand: Self) -> Self {
        Self::bare(ExprKind::Unary {
            op,
            operand: Box::new(operand),
        })
    }

    #[must_use]
    pub fn binary(op: BinaryOp, lhs: Self, rhs: Self) -> Self {
        Self::bare(ExprKind::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        })
    }

    /// `\(params) -> body`
    #[must_use]
    pub fn lambda<'a>(params: impl IntoIterator<Item = &'a str>, body: Self) -> Self {
        Self::bare(ExprKind::Lambda {
            params: params.into_iter().map(Ident::new).collect(),
            body: Box::new(body),
        })
    }

    #[must_use]
    pub fn block(statements: impl IntoIterator<Item = Statement>) -> Self {
        Self::bare(ExprKind::Block(statements.into_iter().collect()))
    }

    /// `self = value`
    #[must_use]
    pub fn assign(self, value: Self) -> Self {
        Self::bare(ExprKind::Assign {
            target: Box::new(self),
            value: Box::new(value),
        })
    }

    /// `self(args)`
    #[must_use]
    pub fn call(self, args: impl IntoIterator<Item = Self>) -> Self {
        Self::bare(ExprKind::Call {
            callee: Box::new(self),
            args: args.into_iter().collect(),
        })
    }

    /// `self.name`
    #[must_use]
    pub fn member(self, name: &str) -> Self {
        Self::bare(ExprKind::Member {
            object: Box::new(self),
            name: Ident::new(name),
        })
    }

    /// `self.(index)`
    #[must_use]
    pub fn index(self, index: Self) -> Self {
        Self::bare(ExprKind::Index {
            object: Box::new(self),
            index: Box::new(index),
        })
    }

    /// `(self)`
    #[must_use]
    pub fn group(self) -> Self {
        Self::bare(ExprKind::Group(Box::new(self)))
    }
}
