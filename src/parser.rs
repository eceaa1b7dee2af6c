//! Error-recovering recursive-descent parser.
//!
//! Statements and declarations are parsed by recursive descent and
//! expressions by precedence climbing. Syntax errors never abort the
//! parse: the parser reports one diagnostic, enters recovery mode and
//! discards tokens until it reaches one of the configured sync tokens,
//! so every input produces a [`Program`], possibly with `Missing`
//! placeholders where input was absent.

use std::collections::HashSet;

use tracing::{debug, trace};

use crate::ast::{
    ASSIGN_PRECEDENCE, Assoc, BinaryOp, Expr, ExprKind, Field, FnDecl, Ident, Import, Item,
    Literal, Program, Statement, StatementKind, StructDecl, Type, TypeAlias, TypeKind, UnaryOp,
};
use crate::config::Config;
use crate::diagnostic::{Category, Diagnostic};
use crate::error::Error;
use crate::lexer::{Lexer, unescape};
use crate::source::{Position, Source, Span};
use crate::stream::{CancellationToken, TokenStream};
use crate::token::{Keyword, Token, TokenKind};

/// Deepest expression or type nesting the parser descends into.
/// Anything deeper is reported and replaced by a `Missing` node.
pub const MAX_NESTING_DEPTH: usize = 128;

/// Whether the parser got through the input on its own terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Every error, if any, was followed by a synchronization point.
    Complete,
    /// Error recovery ran into the end of input, so the tail of the
    /// tree is a best-effort reconstruction.
    Partial,
}

/// Everything a parse produces.
#[derive(Debug, Clone, PartialEq)]
pub struct Parse {
    pub program: Program,
    /// Lexer and parser diagnostics in the order they were reported.
    pub diagnostics: Vec<Diagnostic>,
    pub outcome: Outcome,
}

impl Parse {
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| d.is_error())
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.outcome == Outcome::Complete
    }
}

/// Parse a whole source.
///
/// # Errors
///
/// Returns `Error::InvalidConfig` if `config` does not validate.
pub fn parse(source: &Source, config: &Config) -> Result<Parse, Error> {
    Parser::new(source, config)?.parse()
}

/// Left and right binding power of an infix operator. An operator keeps
/// extending the expression on its left while its left power is at least
/// the current minimum, and parses its right operand with its right power.
#[derive(Debug, Clone, Copy)]
struct BindingPower {
    left: u8,
    right: u8,
}

impl BindingPower {
    const fn left_assoc(level: u8) -> Self {
        Self {
            left: level * 2,
            right: level * 2 + 1,
        }
    }

    const fn right_assoc(level: u8) -> Self {
        Self {
            left: level * 2 + 1,
            right: level * 2,
        }
    }

    const fn of(level: u8, assoc: Assoc) -> Self {
        match assoc {
            Assoc::Left => Self::left_assoc(level),
            Assoc::Right => Self::right_assoc(level),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Infix {
    Assign,
    Binary(BinaryOp),
}

const fn binary_op(kind: TokenKind) -> Option<BinaryOp> {
    Some(match kind {
        TokenKind::Dollar => BinaryOp::Apply,
        TokenKind::OrOr => BinaryOp::Or,
        TokenKind::AndAnd => BinaryOp::And,
        TokenKind::EqEq => BinaryOp::Eq,
        TokenKind::NotEq => BinaryOp::Ne,
        TokenKind::Cmp => BinaryOp::Cmp,
        TokenKind::Lt => BinaryOp::Lt,
        TokenKind::Le => BinaryOp::Le,
        TokenKind::Gt => BinaryOp::Gt,
        TokenKind::Ge => BinaryOp::Ge,
        TokenKind::Pipe => BinaryOp::BitOr,
        TokenKind::Caret => BinaryOp::BitXor,
        TokenKind::Amp => BinaryOp::BitAnd,
        TokenKind::Plus => BinaryOp::Add,
        TokenKind::Minus => BinaryOp::Sub,
        TokenKind::Star => BinaryOp::Mul,
        TokenKind::Slash => BinaryOp::Div,
        TokenKind::Percent => BinaryOp::Rem,
        TokenKind::Compose => BinaryOp::Compose,
        _ => return None,
    })
}

fn infix_binding_power(kind: TokenKind) -> Option<(Infix, BindingPower)> {
    if kind == TokenKind::Bind {
        return Some((Infix::Assign, BindingPower::right_assoc(ASSIGN_PRECEDENCE)));
    }
    let op = binary_op(kind)?;
    Some((
        Infix::Binary(op),
        BindingPower::of(op.precedence(), op.assoc()),
    ))
}

const fn unary_op(kind: TokenKind) -> Option<UnaryOp> {
    match kind {
        TokenKind::Minus => Some(UnaryOp::Neg),
        TokenKind::Bang => Some(UnaryOp::Not),
        TokenKind::Tilde => Some(UnaryOp::BitNot),
        _ => None,
    }
}

/// How a token reads after "found" in a diagnostic.
fn found(token: Token<'_>) -> String {
    match token.kind {
        TokenKind::Identifier
        | TokenKind::Integer
        | TokenKind::Real
        | TokenKind::String
        | TokenKind::Keyword(_) => format!("'{}'", token.lexeme),
        kind => kind.describe().to_string(),
    }
}

pub struct Parser<'src> {
    stream: TokenStream<'src>,
    sync: HashSet<TokenKind>,
    /// Set after an error is reported; cleared at the next sync point.
    recovering: bool,
    /// Recovery hit end of input before finding a sync point.
    truncated: bool,
    /// Stream index of the token the current error was reported at.
    error_index: usize,
    depth: usize,
    /// Blocks currently open.
    blocks: usize,
    /// The most recently consumed token and its stream index.
    last: Option<Token<'src>>,
    last_index: usize,
}

impl<'src> Parser<'src> {
    /// # Errors
    ///
    /// Returns `Error::InvalidConfig` if `config` does not validate.
    pub fn new(source: &'src Source, config: &Config) -> Result<Self, Error> {
        let lexer = Lexer::new(source, config)?;
        Ok(Self {
            stream: TokenStream::new(lexer, config.max_lookahead),
            sync: config.recovery_sync_tokens.clone(),
            recovering: false,
            truncated: false,
            error_index: 0,
            depth: 0,
            blocks: 0,
            last: None,
            last_index: 0,
        })
    }

    /// Abort the parse once `token` is cancelled.
    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.stream = self.stream.with_cancellation(token);
        self
    }

    /// Parse the whole input.
    ///
    /// # Errors
    ///
    /// Returns `Error::Cancelled` if the cancellation token fired. Syntax
    /// errors are reported in [`Parse::diagnostics`] instead.
    pub fn parse(mut self) -> Result<Parse, Error> {
        let start = self.current().start;
        let mut items = Vec::new();

        while !self.at(TokenKind::EndOfInput) {
            let before = self.stream.position();
            if self.at(TokenKind::RBrace) {
                let brace = self.bump();
                self.error_at(brace, "unexpected '}'");
                self.recovering = false;
            } else if let Some(item) = self.parse_item() {
                items.push(item);
            }
            self.finish_statement();
            if self.stream.position() == before && !self.at(TokenKind::EndOfInput) {
                self.bump();
            }
        }

        if self.stream.is_cancelled() {
            debug!("parse cancelled");
            return Err(Error::Cancelled);
        }

        let end = self.current().end;
        let outcome = if self.truncated {
            Outcome::Partial
        } else {
            Outcome::Complete
        };
        let diagnostics = self.stream.into_diagnostics();
        debug!(
            items = items.len(),
            diagnostics = diagnostics.len(),
            errors = diagnostics.error_count(),
            ?outcome,
            "parse finished"
        );

        Ok(Parse {
            program: Program {
                items,
                span: Span::new(start, end),
            },
            diagnostics: diagnostics.into_vec(),
            outcome,
        })
    }

    // ----- token helpers -----

    fn current(&mut self) -> Token<'src> {
        self.stream.current()
    }

    fn at(&mut self, kind: TokenKind) -> bool {
        self.current().kind == kind
    }

    fn bump(&mut self) -> Token<'src> {
        let index = self.stream.position();
        let token = self.stream.advance();
        if token.kind != TokenKind::EndOfInput {
            self.last = Some(token);
            self.last_index = index;
        }
        token
    }

    fn eat(&mut self, kind: TokenKind) -> Option<Token<'src>> {
        if self.at(kind) {
            Some(self.bump())
        } else {
            None
        }
    }

    fn expect(&mut self, kind: TokenKind) -> Option<Token<'src>> {
        let token = self.eat(kind);
        if token.is_none() {
            self.error_expected(kind.describe());
        }
        token
    }

    fn prev_end(&self) -> Option<Position> {
        self.last.map(|t| t.end)
    }

    /// Span from `start` to the end of the last consumed token.
    fn span_from(&self, start: Position) -> Span {
        match self.prev_end() {
            Some(end) if end.offset >= start.offset => Span::new(start, end),
            _ => Span::point(start),
        }
    }

    fn ident(&mut self) -> Ident {
        let token = self.bump();
        Ident {
            name: token.lexeme.to_string(),
            span: token.span(),
        }
    }

    fn expect_ident(&mut self, what: &str) -> Ident {
        if self.at(TokenKind::Identifier) {
            return self.ident();
        }
        self.error_expected(what);
        Ident {
            name: String::new(),
            span: Span::point(self.current().start),
        }
    }

    fn missing_here(&mut self) -> Expr {
        Expr::new(ExprKind::Missing, Span::point(self.current().start))
    }

    // ----- diagnostics and recovery -----

    /// Report a syntax error at `token` and enter recovery mode. Nothing
    /// more is reported until the parser resynchronizes.
    fn error_at(&mut self, token: Token<'_>, message: &str) {
        if self.recovering {
            return;
        }
        self.start_recovery();
        // The lexer already reported this one.
        if token.kind == TokenKind::Invalid {
            return;
        }
        let message = if token.kind == TokenKind::EndOfInput {
            "unexpected end of input"
        } else {
            message
        };
        self.stream
            .diagnostics_mut()
            .error(Category::Syntax, message, token.start);
    }

    fn error_expected(&mut self, what: &str) {
        let token = self.current();
        let message = format!("expected {what}, found {}", found(token));
        self.error_at(token, &message);
    }

    /// Report an error that leaves the token stream in a sensible state,
    /// so no recovery is needed.
    fn error_in_place(&mut self, message: &str, at: Position) {
        if !self.recovering {
            self.stream
                .diagnostics_mut()
                .error(Category::Syntax, message, at);
        }
    }

    fn warning(&mut self, message: &str, at: Position) {
        if !self.recovering {
            self.stream
                .diagnostics_mut()
                .warning(Category::Syntax, message, at);
        }
    }

    fn start_recovery(&mut self) {
        self.recovering = true;
        self.error_index = self.stream.position();
    }

    fn finish_statement(&mut self) {
        if self.recovering {
            self.synchronize();
        }
    }

    /// Discard tokens up to the next sync token at the current brace depth.
    /// A `;` is consumed; anything else is left for the statement loop.
    /// The `}` closing an open block always stops recovery.
    fn synchronize(&mut self) {
        let semicolon_since_error = self.sync.contains(&TokenKind::Semicolon)
            && self.last_index >= self.error_index
            && self.last.is_some_and(|t| t.kind == TokenKind::Semicolon);
        if semicolon_since_error {
            self.recovering = false;
            return;
        }
        let mut depth = 0usize;
        loop {
            let token = self.current();
            match token.kind {
                TokenKind::EndOfInput => {
                    trace!("recovery reached end of input");
                    self.truncated = true;
                    return;
                }
                TokenKind::LBrace => depth += 1,
                TokenKind::RBrace if depth > 0 => depth -= 1,
                TokenKind::RBrace if self.blocks > 0 => {
                    trace!(at = %token.start, "resynchronized at end of block");
                    self.recovering = false;
                    return;
                }
                kind if depth == 0 && self.sync.contains(&kind) => {
                    if kind == TokenKind::Semicolon {
                        self.bump();
                    }
                    trace!(at = %token.start, "resynchronized");
                    self.recovering = false;
                    return;
                }
                _ => {}
            }
            self.bump();
        }
    }

    fn enter(&mut self) -> bool {
        if self.depth >= MAX_NESTING_DEPTH {
            let at = self.current().start;
            self.error_in_place("nesting too deep", at);
            if !self.recovering {
                self.start_recovery();
            }
            return false;
        }
        self.depth += 1;
        true
    }

    const fn leave(&mut self) {
        self.depth -= 1;
    }

    // ----- declarations and statements -----

    fn parse_item(&mut self) -> Option<Item> {
        match self.current().kind {
            TokenKind::Keyword(Keyword::Def) => Some(Item::Function(self.parse_function())),
            TokenKind::Keyword(Keyword::Struct) => Some(Item::Struct(self.parse_struct())),
            TokenKind::Keyword(Keyword::Type) => Some(Item::TypeAlias(self.parse_type_alias())),
            TokenKind::Keyword(Keyword::Import) => Some(Item::Import(self.parse_import())),
            _ => self.parse_statement().map(Item::Statement),
        }
    }

    /// `def :: Type name(params) = body;`
    fn parse_function(&mut self) -> FnDecl {
        let def = self.bump();
        self.expect(TokenKind::TypedAs);
        let ty = self.parse_type();
        let name = self.expect_ident("function name");
        self.expect(TokenKind::LParen);
        let params = self.parse_params();
        self.expect(TokenKind::RParen);
        self.expect(TokenKind::Bind);
        let body = self.parse_expr();
        self.expect_terminator();
        FnDecl {
            ty,
            name,
            params,
            body,
            span: self.span_from(def.start),
        }
    }

    /// `struct Name { field :: Type, ... }`, the trailing `;` is optional.
    fn parse_struct(&mut self) -> StructDecl {
        let kw = self.bump();
        let name = self.expect_ident("struct name");
        self.expect(TokenKind::LBrace);
        let mut fields = Vec::new();
        while self.at(TokenKind::Identifier) {
            let field_name = self.ident();
            self.expect(TokenKind::TypedAs);
            let ty = self.parse_type();
            let span = self.span_from(field_name.span.start);
            fields.push(Field {
                name: field_name,
                ty,
                span,
            });
            if self.eat(TokenKind::Comma).is_none() {
                break;
            }
        }
        self.expect(TokenKind::RBrace);
        self.eat(TokenKind::Semicolon);
        StructDecl {
            name,
            fields,
            span: self.span_from(kw.start),
        }
    }

    /// `type Name = Type;`
    fn parse_type_alias(&mut self) -> TypeAlias {
        let kw = self.bump();
        let name = self.expect_ident("type name");
        self.expect(TokenKind::Bind);
        let ty = self.parse_type();
        self.expect_terminator();
        TypeAlias {
            name,
            ty,
            span: self.span_from(kw.start),
        }
    }

    /// `import a.b.c;`
    fn parse_import(&mut self) -> Import {
        let kw = self.bump();
        let mut path = vec![self.expect_ident("module name")];
        while self.eat(TokenKind::Dot).is_some() {
            path.push(self.expect_ident("module name"));
        }
        self.expect_terminator();
        Import {
            path,
            span: self.span_from(kw.start),
        }
    }

    /// Parameter names up to, not including, the closing `)`. A trailing
    /// comma is accepted. Never reports.
    fn parse_params(&mut self) -> Vec<Ident> {
        let mut params = Vec::new();
        while self.at(TokenKind::Identifier) {
            params.push(self.ident());
            if self.eat(TokenKind::Comma).is_none() {
                break;
            }
        }
        params
    }

    /// A statement, or `None` for an empty one.
    fn parse_statement(&mut self) -> Option<Statement> {
        let token = self.current();
        let kind = match token.kind {
            TokenKind::Semicolon => {
                self.bump();
                self.warning("empty statement", token.start);
                return None;
            }
            TokenKind::Keyword(Keyword::Let) => self.parse_let(),
            TokenKind::Keyword(Keyword::Return) => {
                self.bump();
                let value = self.parse_expr();
                self.expect_terminator();
                StatementKind::Return(value)
            }
            _ => {
                let expr = self.parse_expr();
                self.expect_terminator();
                StatementKind::Expression(expr)
            }
        };
        Some(Statement {
            kind,
            span: self.span_from(token.start),
        })
    }

    /// `let name :: Type = value;`
    fn parse_let(&mut self) -> StatementKind {
        self.bump();
        let name = self.expect_ident("binding name");
        let ty = self
            .eat(TokenKind::TypedAs)
            .is_some()
            .then(|| self.parse_type());
        self.expect(TokenKind::Bind);
        let value = self.parse_expr();
        self.expect_terminator();
        StatementKind::Let { name, ty, value }
    }

    /// A statement inside a block. Declarations are rejected but still
    /// parsed, so recovery picks up right after them.
    fn parse_block_statement(&mut self) -> Option<Statement> {
        let token = self.current();
        if let TokenKind::Keyword(Keyword::Def | Keyword::Struct | Keyword::Type | Keyword::Import) =
            token.kind
        {
            let message = format!("'{}' is only allowed at the top level", token.lexeme);
            self.error_at(token, &message);
            let _ = self.parse_item();
            return None;
        }
        self.parse_statement()
    }

    /// A `;` ends a statement. It may be left out before `}`, at the end
    /// of input, and after a statement that ends in a block.
    fn expect_terminator(&mut self) {
        if self.eat(TokenKind::Semicolon).is_some() {
            return;
        }
        let next = self.current().kind;
        let after_block = self.last.is_some_and(|t| t.kind == TokenKind::RBrace);
        if after_block || matches!(next, TokenKind::RBrace | TokenKind::EndOfInput) {
            return;
        }
        self.error_expected("';'");
    }

    // ----- expressions -----

    fn parse_expr(&mut self) -> Expr {
        self.parse_expr_bp(0)
    }

    fn parse_expr_bp(&mut self, min_bp: u8) -> Expr {
        if !self.enter() {
            return self.missing_here();
        }
        let mut lhs = self.parse_prefix();

        loop {
            let Some((infix, bp)) = infix_binding_power(self.current().kind) else {
                break;
            };
            if bp.left < min_bp {
                break;
            }
            self.bump();
            let rhs = self.parse_expr_bp(bp.right);
            let span = self.span_from(lhs.span.start);

            lhs = match infix {
                Infix::Assign => {
                    if !lhs.is_assignable()
                        && !matches!(lhs.kind, ExprKind::Missing | ExprKind::Error)
                    {
                        self.error_in_place("invalid assignment target", lhs.span.start);
                    }
                    Expr::new(
                        ExprKind::Assign {
                            target: Box::new(lhs),
                            value: Box::new(rhs),
                        },
                        span,
                    )
                }
                Infix::Binary(op) => Expr::new(
                    ExprKind::Binary {
                        op,
                        lhs: Box::new(lhs),
                        rhs: Box::new(rhs),
                    },
                    span,
                ),
            };
        }

        self.leave();
        lhs
    }

    fn parse_prefix(&mut self) -> Expr {
        let token = self.current();
        let Some(op) = unary_op(token.kind) else {
            return self.parse_postfix();
        };
        if !self.enter() {
            return self.missing_here();
        }
        self.bump();
        let operand = self.parse_prefix();
        self.leave();
        Expr::new(
            ExprKind::Unary {
                op,
                operand: Box::new(operand),
            },
            self.span_from(token.start),
        )
    }

    /// Calls `f(a, b)`, member access `x.name` and indexing `x.(i)`.
    fn parse_postfix(&mut self) -> Expr {
        let mut expr = self.parse_primary();
        loop {
            let start = expr.span.start;
            let kind = match self.current().kind {
                TokenKind::LParen => {
                    self.bump();
                    let args = self.parse_args();
                    self.expect(TokenKind::RParen);
                    ExprKind::Call {
                        callee: Box::new(expr),
                        args,
                    }
                }
                TokenKind::Dot => {
                    self.bump();
                    if !self.at(TokenKind::Identifier) {
                        self.error_expected("member name");
                        break;
                    }
                    let name = self.ident();
                    ExprKind::Member {
                        object: Box::new(expr),
                        name,
                    }
                }
                TokenKind::IndexOpen => {
                    self.bump();
                    let index = self.parse_expr();
                    self.expect(TokenKind::RParen);
                    ExprKind::Index {
                        object: Box::new(expr),
                        index: Box::new(index),
                    }
                }
                _ => break,
            };
            expr = Expr::new(kind, self.span_from(start));
        }
        expr
    }

    fn parse_args(&mut self) -> Vec<Expr> {
        let mut args = Vec::new();
        if self.at(TokenKind::RParen) {
            return args;
        }
        loop {
            args.push(self.parse_expr());
            if self.eat(TokenKind::Comma).is_none() || self.at(TokenKind::RParen) {
                break;
            }
        }
        args
    }

    fn parse_primary(&mut self) -> Expr {
        let token = self.current();
        let kind = match token.kind {
            TokenKind::Integer => {
                self.bump();
                token
                    .lexeme
                    .parse()
                    .map_or(ExprKind::Error, |n| ExprKind::Literal(Literal::Integer(n)))
            }
            TokenKind::Real => {
                self.bump();
                token
                    .lexeme
                    .parse()
                    .map_or(ExprKind::Error, |r| ExprKind::Literal(Literal::Real(r)))
            }
            TokenKind::String => {
                self.bump();
                ExprKind::Literal(Literal::String(unescape(token.lexeme)))
            }
            TokenKind::Identifier => {
                self.bump();
                ExprKind::Identifier(token.lexeme.to_string())
            }
            TokenKind::LBrace => return self.parse_block(),
            TokenKind::Backslash => return self.parse_lambda(),
            TokenKind::LParen => return self.parse_paren(),
            TokenKind::Invalid => {
                self.bump();
                ExprKind::Error
            }
            _ => {
                self.error_expected("expression");
                return self.missing_here();
            }
        };
        Expr::new(kind, token.span())
    }

    /// `{ statement* }`
    fn parse_block(&mut self) -> Expr {
        let open = self.bump();
        self.blocks += 1;
        let mut statements = Vec::new();
        while !self.at(TokenKind::RBrace) && !self.at(TokenKind::EndOfInput) {
            let before = self.stream.position();
            if let Some(statement) = self.parse_block_statement() {
                statements.push(statement);
            }
            self.finish_statement();
            if self.stream.position() == before
                && !self.at(TokenKind::RBrace)
                && !self.at(TokenKind::EndOfInput)
            {
                self.bump();
            }
        }
        self.blocks -= 1;
        self.expect(TokenKind::RBrace);
        Expr::new(ExprKind::Block(statements), self.span_from(open.start))
    }

    /// `\(params) -> body`
    fn parse_lambda(&mut self) -> Expr {
        let start = self.bump().start;
        self.expect(TokenKind::LParen);
        let params = self.parse_params();
        self.expect(TokenKind::RParen);
        self.expect(TokenKind::Arrow);
        let body = self.parse_expr();
        Expr::new(
            ExprKind::Lambda {
                params,
                body: Box::new(body),
            },
            self.span_from(start),
        )
    }

    /// `(expr)`, or the arrow lambda `(params) -> body`.
    fn parse_paren(&mut self) -> Expr {
        let open = self.current();
        let maybe_lambda = self
            .stream
            .peek(1)
            .is_ok_and(|t| matches!(t.kind, TokenKind::Identifier | TokenKind::RParen));
        if maybe_lambda {
            if let Some(params) = self.try_lambda_head() {
                let body = self.parse_expr();
                return Expr::new(
                    ExprKind::Lambda {
                        params,
                        body: Box::new(body),
                    },
                    self.span_from(open.start),
                );
            }
        }

        self.bump();
        let inner = self.parse_expr();
        self.expect(TokenKind::RParen);
        Expr::new(ExprKind::Group(Box::new(inner)), self.span_from(open.start))
    }

    /// Speculatively consume `( params ) ->`. On a mismatch the stream is
    /// rewound and nothing has been reported.
    fn try_lambda_head(&mut self) -> Option<Vec<Ident>> {
        let mark = self.stream.checkpoint();
        let last = self.last;

        self.bump();
        let params = self.parse_params();
        let matched =
            self.eat(TokenKind::RParen).is_some() && self.eat(TokenKind::Arrow).is_some();

        if matched {
            self.stream.release(mark);
            return Some(params);
        }
        let rewound = self.stream.restore(mark);
        debug_assert!(rewound.is_ok(), "a fresh checkpoint is always live");
        self.stream.release(mark);
        self.last = last;
        trace!(token = mark.index(), "not a lambda, reparsing as a group");
        None
    }

    // ----- types -----

    fn parse_type(&mut self) -> Type {
        if !self.enter() {
            return Type {
                kind: TypeKind::Missing,
                span: Span::point(self.current().start),
            };
        }
        let from = self.parse_type_atom();
        let ty = if self.eat(TokenKind::Arrow).is_some() {
            let to = self.parse_type();
            let span = self.span_from(from.span.start);
            Type {
                kind: TypeKind::Function {
                    from: Box::new(from),
                    to: Box::new(to),
                },
                span,
            }
        } else {
            from
        };
        self.leave();
        ty
    }

    /// `Name`, `Name[Type, ...]` or `(Type)`.
    fn parse_type_atom(&mut self) -> Type {
        let token = self.current();
        let kind = match token.kind {
            TokenKind::Identifier => {
                self.bump();
                let base = token.lexeme.to_string();
                if self.eat(TokenKind::LBracket).is_some() {
                    let mut args = Vec::new();
                    while !self.at(TokenKind::RBracket) {
                        args.push(self.parse_type());
                        if self.eat(TokenKind::Comma).is_none() {
                            break;
                        }
                    }
                    self.expect(TokenKind::RBracket);
                    TypeKind::Applied { base, args }
                } else {
                    TypeKind::Named(base)
                }
            }
            TokenKind::LParen => {
                self.bump();
                let inner = self.parse_type();
                self.expect(TokenKind::RParen);
                inner.kind
            }
            _ => {
                self.error_expected("type");
                return Type {
                    kind: TypeKind::Missing,
                    span: Span::point(token.start),
                };
            }
        };
        Type {
            kind,
            span: self.span_from(token.start),
        }
    }
}
