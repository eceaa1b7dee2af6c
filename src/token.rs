use std::fmt;

use crate::source::{Position, Span};

/// Reserved words. An identifier whose text matches one exactly is
/// lexed as a keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    /// `def`, introduces a function.
    Def,
    /// `let`, introduces a value binding.
    Let,
    /// `struct`
    Struct,
    /// `type`, introduces a type alias.
    Type,
    /// `import`
    Import,
    /// `return`
    Return,
}

impl Keyword {
    pub const ALL: [Self; 6] = [
        Self::Def,
        Self::Let,
        Self::Struct,
        Self::Type,
        Self::Import,
        Self::Return,
    ];

    /// Look up a reserved word.
    #[must_use]
    pub fn from_word(word: &str) -> Option<Self> {
        match word {
            "def" => Some(Self::Def),
            "let" => Some(Self::Let),
            "struct" => Some(Self::Struct),
            "type" => Some(Self::Type),
            "import" => Some(Self::Import),
            "return" => Some(Self::Return),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Def => "def",
            Self::Let => "let",
            Self::Struct => "struct",
            Self::Type => "type",
            Self::Import => "import",
            Self::Return => "return",
        }
    }
}

/// Token kinds produced by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Identifier,
    /// Decimal integer literal.
    Integer,
    /// Real literal (`1.5`, `2.`, `.5`, `1e9`).
    Real,
    /// Double-quoted string literal, quotes included in the lexeme.
    String,
    Keyword(Keyword),

    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `[`
    LBracket,
    /// `]`
    RBracket,
    /// `{`
    LBrace,
    /// `}`
    RBrace,
    /// `.(`, opens an index expression.
    IndexOpen,
    /// `::`
    TypedAs,
    /// `=`
    Bind,
    /// `,`
    Comma,
    /// `;`
    Semicolon,

    /// `.`
    Dot,
    /// `..`, function composition.
    Compose,
    /// `$`, low-precedence application.
    Dollar,
    /// `->`
    Arrow,
    /// `\`, starts a lambda.
    Backslash,
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    EqEq,
    NotEq,
    Lt,
    Le,
    Gt,
    Ge,
    /// `<=>`
    Cmp,
    AndAnd,
    OrOr,
    Bang,
    Amp,
    Pipe,
    Tilde,
    Caret,

    /// Spaces, tabs and a leading byte-order mark (trivia mode only).
    Whitespace,
    /// `\n`, `\r\n` or `\r` (trivia mode only).
    Newline,
    /// `# ...` to end of line (trivia mode only).
    Comment,

    /// Text that matches no token pattern. The lexer has already
    /// reported a diagnostic for it.
    Invalid,
    EndOfInput,
}

impl TokenKind {
    /// Whether the lexer skips this kind unless trivia is requested.
    #[must_use]
    pub const fn is_trivia(self) -> bool {
        matches!(self, Self::Whitespace | Self::Newline | Self::Comment)
    }

    /// Short name used in dumps.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Identifier => "identifier",
            Self::Integer => "integer",
            Self::Real => "real",
            Self::String => "string",
            Self::Keyword(kw) => kw.as_str(),
            Self::LParen => "lparen",
            Self::RParen => "rparen",
            Self::LBracket => "lbracket",
            Self::RBracket => "rbracket",
            Self::LBrace => "lbrace",
            Self::RBrace => "rbrace",
            Self::IndexOpen => "index_open",
            Self::TypedAs => "typed_as",
            Self::Bind => "bind",
            Self::Comma => "comma",
            Self::Semicolon => "semicolon",
            Self::Dot => "member",
            Self::Compose => "compose",
            Self::Dollar => "apply",
            Self::Arrow => "arrow",
            Self::Backslash => "lambda",
            Self::Plus => "add",
            Self::Minus => "sub",
            Self::Star => "mul",
            Self::Slash => "div",
            Self::Percent => "mod",
            Self::EqEq => "eq",
            Self::NotEq => "ne",
            Self::Lt => "lt",
            Self::Le => "le",
            Self::Gt => "gt",
            Self::Ge => "ge",
            Self::Cmp => "cmp",
            Self::AndAnd => "logical_and",
            Self::OrOr => "logical_or",
            Self::Bang => "logical_not",
            Self::Amp => "bitwise_and",
            Self::Pipe => "bitwise_or",
            Self::Tilde => "bitwise_not",
            Self::Caret => "bitwise_xor",
            Self::Whitespace => "space",
            Self::Newline => "newline",
            Self::Comment => "comment",
            Self::Invalid => "invalid",
            Self::EndOfInput => "end_of_input",
        }
    }

    /// How the kind reads in "expected X" messages.
    #[must_use]
    pub const fn describe(self) -> &'static str {
        match self {
            Self::Identifier => "identifier",
            Self::Integer => "integer literal",
            Self::Real => "real literal",
            Self::String => "string literal",
            Self::Keyword(kw) => kw.as_str(),
            Self::LParen => "'('",
            Self::RParen => "')'",
            Self::LBracket => "'['",
            Self::RBracket => "']'",
            Self::LBrace => "'{'",
            Self::RBrace => "'}'",
            Self::IndexOpen => "'.('",
            Self::TypedAs => "'::'",
            Self::Bind => "'='",
            Self::Comma => "','",
            Self::Semicolon => "';'",
            Self::Dot => "'.'",
            Self::Compose => "'..'",
            Self::Dollar => "'$'",
            Self::Arrow => "'->'",
            Self::Backslash => "'\\'",
            Self::Plus => "'+'",
            Self::Minus => "'-'",
            Self::Star => "'*'",
            Self::Slash => "'/'",
            Self::Percent => "'%'",
            Self::EqEq => "'=='",
            Self::NotEq => "'!='",
            Self::Lt => "'<'",
            Self::Le => "'<='",
            Self::Gt => "'>'",
            Self::Ge => "'>='",
            Self::Cmp => "'<=>'",
            Self::AndAnd => "'&&'",
            Self::OrOr => "'||'",
            Self::Bang => "'!'",
            Self::Amp => "'&'",
            Self::Pipe => "'|'",
            Self::Tilde => "'~'",
            Self::Caret => "'^'",
            Self::Whitespace => "whitespace",
            Self::Newline => "newline",
            Self::Comment => "comment",
            Self::Invalid => "invalid token",
            Self::EndOfInput => "end of input",
        }
    }
}

/// A single token: its kind, the exact source text it covers, and
/// where that text starts and ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'src> {
    pub kind: TokenKind,
    pub lexeme: &'src str,
    pub start: Position,
    pub end: Position,
}

impl Token<'_> {
    #[must_use]
    pub const fn span(&self) -> Span {
        Span::new(self.start, self.end)
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Identifier
            | TokenKind::Integer
            | TokenKind::Real
            | TokenKind::String
            | TokenKind::Invalid
            | TokenKind::Comment => {
                write!(f, "<{}: {:?}>", self.kind.name(), self.lexeme)
            }
            kind => write!(f, "<{}>", kind.name()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_table_round_trips() {
        for kw in Keyword::ALL {
            assert_eq!(Keyword::from_word(kw.as_str()), Some(kw));
        }
        assert_eq!(Keyword::from_word("define"), None);
        assert_eq!(Keyword::from_word("Def"), None);
    }

    #[test]
    fn display_with_and_without_data() {
        let tok = Token {
            kind: TokenKind::Identifier,
            lexeme: "silly_add",
            start: Position::START,
            end: Position::new(1, 10, 9),
        };
        assert_eq!(tok.to_string(), "<identifier: \"silly_add\">");

        let plus = Token {
            kind: TokenKind::Plus,
            lexeme: "+",
            start: Position::START,
            end: Position::new(1, 2, 1),
        };
        assert_eq!(plus.to_string(), "<add>");
    }
}
