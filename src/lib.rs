//! Lexer, error-recovering parser, formatter and builder for noctern.
//!
//! Source text goes through an on-demand [`Lexer`], a buffered
//! [`TokenStream`] with bounded lookahead and backtracking, and a
//! recursive-descent [`Parser`]. Malformed input never aborts a parse:
//! every problem becomes a [`Diagnostic`] and the parser recovers at the
//! next statement boundary, so the caller always gets a tree back.
//!
//! # Quick start
//!
//! ## Parse and inspect
//!
//! ```
//! use noctern::parse_str;
//!
//! let parsed = parse_str("let x = 1 + 2 * 3;").unwrap();
//! assert!(!parsed.has_errors());
//! assert_eq!(parsed.program.to_string(), "(let x (+ 1 (* 2 3)))\n");
//! ```
//!
//! ## Recover from errors
//!
//! ```
//! use noctern::parse_str;
//!
//! let parsed = parse_str("1 @ 2; 3 + 4").unwrap();
//! assert_eq!(parsed.diagnostics.len(), 1);
//! assert_eq!(parsed.diagnostics[0].message, "unexpected character '@'");
//! assert_eq!(parsed.program.items.len(), 2);
//! ```
//!
//! ## Build and format
//!
//! ```
//! use noctern::{BinaryOp, Expr, FnDecl, Program, Type, format};
//!
//! let program = Program::new().item(
//!     FnDecl::new("inc", Type::named("Int").to(Type::named("Int")))
//!         .param("x")
//!         .body(Expr::binary(BinaryOp::Add, Expr::ident("x"), Expr::int(1))),
//! );
//! assert_eq!(format(&program), "def :: Int -> Int inc(x) = x + 1;\n");
//! ```

// Allow noisy pedantic lints that don't add value for
// a library crate.
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions
)]

pub mod ast;
pub mod builder;
pub mod config;
pub mod diagnostic;
pub mod error;
pub mod formatter;
pub mod lexer;
pub mod parser;
pub mod source;
pub mod stream;
pub mod token;

pub use ast::{
    BinaryOp, Expr, ExprKind, Field, FnDecl, Ident, Import, Item, Literal, Program, Statement,
    StatementKind, StructDecl, Type, TypeAlias, TypeKind, UnaryOp,
};
pub use config::{Config, NewlineMode};
pub use diagnostic::{Category, Diagnostic, Diagnostics, Severity};
pub use error::Error;
pub use formatter::{format, format_expr};
pub use lexer::{Lexer, tokenize, tokenize_with_trivia};
pub use parser::{Outcome, Parse, Parser, parse};
pub use source::{Position, Source, Span};
pub use stream::{CancellationToken, Mark, TokenStream};
pub use token::{Keyword, Token, TokenKind};

/// Parse a string with the default configuration.
pub fn parse_str(text: &str) -> Result<Parse, Error> {
    parse(&Source::anonymous(text), &Config::default())
}
