use tracing::trace;

use crate::config::{Config, NewlineMode};
use crate::diagnostic::{Category, Diagnostics};
use crate::error::Error;
use crate::source::{Position, Source};
use crate::token::{Keyword, Token, TokenKind};

const BOM: char = '\u{FEFF}';

/// Tokenize a whole source, skipping trivia. The returned vector always
/// ends with an `EndOfInput` token.
///
/// # Errors
///
/// Returns `Error::InvalidConfig` if `config` does not validate. Malformed
/// input is reported through the returned diagnostics instead.
pub fn tokenize<'src>(
    source: &'src Source,
    config: &Config,
) -> Result<(Vec<Token<'src>>, Diagnostics), Error> {
    let mut lexer = Lexer::new(source, config)?;
    let tokens = lexer.by_ref().collect();
    Ok((tokens, lexer.into_diagnostics()))
}

/// Like [`tokenize`] but keeps whitespace, newline and comment tokens, so
/// the lexemes concatenate back to the exact input.
pub fn tokenize_with_trivia<'src>(
    source: &'src Source,
    config: &Config,
) -> Result<(Vec<Token<'src>>, Diagnostics), Error> {
    let mut lexer = Lexer::new(source, config)?.with_trivia();
    let tokens = lexer.by_ref().collect();
    Ok((tokens, lexer.into_diagnostics()))
}

/// On-demand tokenizer over a borrowed [`Source`].
///
/// Call [`Lexer::next_token`] until it returns `EndOfInput`; one more call
/// fails with [`Error::ExhaustedInput`]. Iterating yields the same tokens,
/// `EndOfInput` included, then stops.
#[derive(Debug)]
pub struct Lexer<'src> {
    text: &'src str,
    input: &'src [u8],
    pos: usize,
    line: usize,
    col: usize,
    tab_width: usize,
    newline: NewlineMode,
    keep_trivia: bool,
    finished: bool,
    diagnostics: Diagnostics,
}

impl<'src> Lexer<'src> {
    /// # Errors
    ///
    /// Returns `Error::InvalidConfig` if `config` does not validate.
    pub fn new(source: &'src Source, config: &Config) -> Result<Self, Error> {
        config.validate()?;
        let text = source.text();
        Ok(Self {
            text,
            input: text.as_bytes(),
            pos: 0,
            line: 1,
            col: 1,
            tab_width: config.tab_width,
            newline: config.newline,
            keep_trivia: false,
            finished: false,
            diagnostics: Diagnostics::new(),
        })
    }

    /// Return whitespace, newlines and comments as tokens instead of
    /// skipping them.
    #[must_use]
    pub const fn with_trivia(mut self) -> Self {
        self.keep_trivia = true;
        self
    }

    #[must_use]
    pub const fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub const fn diagnostics_mut(&mut self) -> &mut Diagnostics {
        &mut self.diagnostics
    }

    #[must_use]
    pub fn into_diagnostics(self) -> Diagnostics {
        self.diagnostics
    }

    /// Whether `EndOfInput` has already been handed out.
    #[must_use]
    pub const fn is_finished(&self) -> bool {
        self.finished
    }

    /// Produce the next token.
    ///
    /// # Errors
    ///
    /// Returns `Error::ExhaustedInput` once `EndOfInput` has been returned.
    pub fn next_token(&mut self) -> Result<Token<'src>, Error> {
        if self.finished {
            return Err(Error::ExhaustedInput);
        }
        loop {
            let start = self.here();
            let Some(ch) = self.peek() else {
                self.finished = true;
                return Ok(self.token(TokenKind::EndOfInput, start));
            };

            let kind = self.lex_at(ch, start);
            debug_assert!(self.pos > start.offset, "lexer made no progress");

            if self.keep_trivia || !kind.is_trivia() {
                return Ok(self.token(kind, start));
            }
        }
    }

    const fn here(&self) -> Position {
        Position {
            line: self.line,
            column: self.col,
            offset: self.pos,
        }
    }

    fn token(&self, kind: TokenKind, start: Position) -> Token<'src> {
        Token {
            kind,
            lexeme: &self.text[start.offset..self.pos],
            start,
            end: self.here(),
        }
    }

    fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.input.get(self.pos + offset).copied()
    }

    fn peek_char(&self) -> Option<char> {
        self.text[self.pos..].chars().next()
    }

    /// Consume one character, updating line and column.
    fn advance(&mut self) {
        let Some(ch) = self.peek_char() else {
            return;
        };
        match ch {
            '\n' => {
                self.line += 1;
                self.col = 1;
            }
            '\r' if self.newline == NewlineMode::Both => {
                // `\r\n` is one line break; the `\n` does the bump.
                if self.peek_at(1) != Some(b'\n') {
                    self.line += 1;
                    self.col = 1;
                }
            }
            '\t' => {
                self.col = ((self.col - 1) / self.tab_width + 1) * self.tab_width + 1;
            }
            _ => self.col += 1,
        }
        self.pos += ch.len_utf8();
    }

    fn advance_n(&mut self, n: usize) {
        for _ in 0..n {
            self.advance();
        }
    }

    fn advance_while(&mut self, pred: impl Fn(u8) -> bool) {
        while self.peek().is_some_and(&pred) {
            self.advance();
        }
    }

    fn lex_at(&mut self, ch: u8, start: Position) -> TokenKind {
        match ch {
            b' ' | b'\t' | b'\x0C' => self.read_whitespace(),
            b'\r' if self.newline == NewlineMode::Lf => self.read_whitespace(),
            b'\n' | b'\r' => self.read_newline(),
            b'#' => self.read_comment(),
            b'"' => self.read_string(start),
            b'0'..=b'9' => self.read_number(start),
            b'.' if self.peek_at(1).is_some_and(|c| c.is_ascii_digit()) => {
                self.read_number(start)
            }
            c if is_ident_start(c) => self.read_identifier(start),
            _ if start.offset == 0 && self.peek_char() == Some(BOM) => {
                self.advance();
                TokenKind::Whitespace
            }
            _ => self.read_operator(start),
        }
    }

    fn read_whitespace(&mut self) -> TokenKind {
        let lf_only = self.newline == NewlineMode::Lf;
        self.advance_while(|c| matches!(c, b' ' | b'\t' | b'\x0C') || (lf_only && c == b'\r'));
        TokenKind::Whitespace
    }

    fn read_newline(&mut self) -> TokenKind {
        if self.peek() == Some(b'\r') && self.peek_at(1) == Some(b'\n') {
            self.advance();
        }
        self.advance();
        TokenKind::Newline
    }

    fn read_comment(&mut self) -> TokenKind {
        let stop_at_cr = self.newline == NewlineMode::Both;
        self.advance_while(|c| c != b'\n' && !(stop_at_cr && c == b'\r'));
        TokenKind::Comment
    }

    fn read_identifier(&mut self, start: Position) -> TokenKind {
        self.advance_while(is_ident_continue);
        Keyword::from_word(&self.text[start.offset..self.pos])
            .map_or(TokenKind::Identifier, TokenKind::Keyword)
    }

    /// Longest match over `[0-9]+ ('.' [0-9]*)? exponent?` and
    /// `'.' [0-9]+ exponent?`.
    fn read_number(&mut self, start: Position) -> TokenKind {
        let mut is_real = false;

        if self.peek() == Some(b'.') {
            self.advance();
            is_real = true;
        }
        self.advance_while(|c| c.is_ascii_digit());

        // `1..x` is composition and `1.(` an index, not a real.
        if !is_real
            && self.peek() == Some(b'.')
            && !matches!(self.peek_at(1), Some(b'.' | b'('))
        {
            self.advance();
            self.advance_while(|c| c.is_ascii_digit());
            is_real = true;
        }

        if matches!(self.peek(), Some(b'e' | b'E')) {
            let sign = usize::from(matches!(self.peek_at(1), Some(b'+' | b'-')));
            if self.peek_at(1 + sign).is_some_and(|c| c.is_ascii_digit()) {
                self.advance_n(1 + sign);
                self.advance_while(|c| c.is_ascii_digit());
                is_real = true;
            }
        }

        if self.peek().is_some_and(is_ident_continue) {
            self.advance_while(is_ident_continue);
            self.lex_error("malformed numeric literal", start);
            return TokenKind::Invalid;
        }

        if is_real {
            let value = self.text[start.offset..self.pos].parse::<f64>();
            if !value.is_ok_and(f64::is_finite) {
                self.lex_error("real literal out of range", start);
                return TokenKind::Invalid;
            }
            return TokenKind::Real;
        }

        if self.text[start.offset..self.pos].parse::<i64>().is_err() {
            self.lex_error("integer literal out of range", start);
            return TokenKind::Invalid;
        }
        TokenKind::Integer
    }

    fn read_string(&mut self, start: Position) -> TokenKind {
        self.advance(); // opening quote

        loop {
            match self.peek() {
                None | Some(b'\n') => break,
                Some(b'\r') if self.newline == NewlineMode::Both => break,
                Some(b'"') => {
                    self.advance();
                    return TokenKind::String;
                }
                Some(b'\\') => {
                    let escape_at = self.here();
                    self.advance();
                    match self.peek() {
                        None | Some(b'\n' | b'\r') => {}
                        Some(b'n' | b't' | b'r' | b'0' | b'\\' | b'"') => self.advance(),
                        Some(_) => {
                            let escaped = self.peek_char().unwrap_or_default();
                            self.advance();
                            self.lex_error(
                                format!("unknown escape sequence '\\{escaped}'"),
                                escape_at,
                            );
                        }
                    }
                }
                Some(_) => self.advance(),
            }
        }

        self.lex_error("unterminated string literal", start);
        TokenKind::Invalid
    }

    fn read_operator(&mut self, start: Position) -> TokenKind {
        let (kind, len) = match (self.peek(), self.peek_at(1), self.peek_at(2)) {
            (Some(b'<'), Some(b'='), Some(b'>')) => (TokenKind::Cmp, 3),
            (Some(b'<'), Some(b'='), _) => (TokenKind::Le, 2),
            (Some(b'<'), _, _) => (TokenKind::Lt, 1),
            (Some(b'>'), Some(b'='), _) => (TokenKind::Ge, 2),
            (Some(b'>'), _, _) => (TokenKind::Gt, 1),
            (Some(b'='), Some(b'='), _) => (TokenKind::EqEq, 2),
            (Some(b'='), _, _) => (TokenKind::Bind, 1),
            (Some(b'!'), Some(b'='), _) => (TokenKind::NotEq, 2),
            (Some(b'!'), _, _) => (TokenKind::Bang, 1),
            (Some(b'&'), Some(b'&'), _) => (TokenKind::AndAnd, 2),
            (Some(b'&'), _, _) => (TokenKind::Amp, 1),
            (Some(b'|'), Some(b'|'), _) => (TokenKind::OrOr, 2),
            (Some(b'|'), _, _) => (TokenKind::Pipe, 1),
            (Some(b'-'), Some(b'>'), _) => (TokenKind::Arrow, 2),
            (Some(b'-'), _, _) => (TokenKind::Minus, 1),
            (Some(b'.'), Some(b'.'), _) => (TokenKind::Compose, 2),
            (Some(b'.'), Some(b'('), _) => (TokenKind::IndexOpen, 2),
            (Some(b'.'), _, _) => (TokenKind::Dot, 1),
            (Some(b':'), Some(b':'), _) => (TokenKind::TypedAs, 2),
            (Some(b'('), _, _) => (TokenKind::LParen, 1),
            (Some(b')'), _, _) => (TokenKind::RParen, 1),
            (Some(b'['), _, _) => (TokenKind::LBracket, 1),
            (Some(b']'), _, _) => (TokenKind::RBracket, 1),
            (Some(b'{'), _, _) => (TokenKind::LBrace, 1),
            (Some(b'}'), _, _) => (TokenKind::RBrace, 1),
            (Some(b','), _, _) => (TokenKind::Comma, 1),
            (Some(b';'), _, _) => (TokenKind::Semicolon, 1),
            (Some(b'$'), _, _) => (TokenKind::Dollar, 1),
            (Some(b'\\'), _, _) => (TokenKind::Backslash, 1),
            (Some(b'+'), _, _) => (TokenKind::Plus, 1),
            (Some(b'*'), _, _) => (TokenKind::Star, 1),
            (Some(b'/'), _, _) => (TokenKind::Slash, 1),
            (Some(b'%'), _, _) => (TokenKind::Percent, 1),
            (Some(b'~'), _, _) => (TokenKind::Tilde, 1),
            (Some(b'^'), _, _) => (TokenKind::Caret, 1),
            _ => return self.read_invalid(start),
        };
        self.advance_n(len);
        kind
    }

    /// Swallow a run of characters that cannot start any token.
    fn read_invalid(&mut self, start: Position) -> TokenKind {
        let first = self.peek_char().unwrap_or_default();
        self.advance();
        while let Some(ch) = self.peek_char() {
            if starts_token(ch) {
                break;
            }
            self.advance();
        }
        self.lex_error(format!("unexpected character {first:?}"), start);
        TokenKind::Invalid
    }

    fn lex_error(&mut self, message: impl Into<String>, at: Position) {
        let message = message.into();
        trace!(line = at.line, column = at.column, %message, "lex error");
        self.diagnostics.error(Category::Lex, message, at);
    }
}

impl<'src> Iterator for Lexer<'src> {
    type Item = Token<'src>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token().ok()
    }
}

const fn is_ident_start(c: u8) -> bool {
    c.is_ascii_alphabetic() || c == b'_'
}

const fn is_ident_continue(c: u8) -> bool {
    c.is_ascii_alphanumeric() || c == b'_'
}

/// Whether `ch` can begin some token, which ends an invalid run. A lone
/// `:` counts, so `a : b` reports one invalid token per colon.
fn starts_token(ch: char) -> bool {
    ch.is_ascii_alphanumeric()
        || matches!(
            ch,
            '_' | ' '
                | '\t'
                | '\x0C'
                | '\n'
                | '\r'
                | '#'
                | '"'
                | '('
                | ')'
                | '['
                | ']'
                | '{'
                | '}'
                | '.'
                | ':'
                | '='
                | ','
                | ';'
                | '$'
                | '-'
                | '\\'
                | '+'
                | '*'
                | '/'
                | '%'
                | '!'
                | '<'
                | '>'
                | '&'
                | '|'
                | '~'
                | '^'
        )
}

/// Decode the contents of a string literal lexeme, quotes included.
///
/// Unknown escapes are kept verbatim; the lexer has already reported them.
#[must_use]
pub fn unescape(lexeme: &str) -> String {
    let inner = lexeme.strip_prefix('"').unwrap_or(lexeme);
    let inner = inner.strip_suffix('"').unwrap_or(inner);

    let mut value = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            value.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => value.push('\n'),
            Some('t') => value.push('\t'),
            Some('r') => value.push('\r'),
            Some('0') => value.push('\0'),
            Some('\\') => value.push('\\'),
            Some('"') => value.push('"'),
            Some(other) => {
                value.push('\\');
                value.push(other);
            }
            None => value.push('\\'),
        }
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<TokenKind> {
        let source = Source::anonymous(input);
        let (tokens, _) = tokenize(&source, &Config::default()).expect("valid config");
        tokens.iter().map(|t| t.kind).collect()
    }

    fn lexemes(input: &str) -> Vec<String> {
        let source = Source::anonymous(input);
        let (tokens, _) = tokenize(&source, &Config::default()).expect("valid config");
        tokens.iter().map(|t| t.lexeme.to_string()).collect()
    }

    #[test]
    fn simple_expression() {
        assert_eq!(
            kinds("1 + 2"),
            [
                TokenKind::Integer,
                TokenKind::Plus,
                TokenKind::Integer,
                TokenKind::EndOfInput
            ]
        );
    }

    #[test]
    fn function_definition() {
        use TokenKind::*;
        assert_eq!(
            kinds("def :: Int -> Int inc(x) = x + 1;"),
            [
                Keyword(crate::token::Keyword::Def),
                TypedAs,
                Identifier,
                Arrow,
                Identifier,
                Identifier,
                LParen,
                Identifier,
                RParen,
                Bind,
                Identifier,
                Plus,
                Integer,
                Semicolon,
                EndOfInput
            ]
        );
    }

    #[test]
    fn keyword_needs_exact_match() {
        assert_eq!(
            kinds("let letter"),
            [
                TokenKind::Keyword(Keyword::Let),
                TokenKind::Identifier,
                TokenKind::EndOfInput
            ]
        );
    }

    #[test]
    fn real_literal_shapes() {
        assert_eq!(lexemes("0.2 2. .1 1e9 2.5E-3"), [
            "0.2", "2.", ".1", "1e9", "2.5E-3", ""
        ]);
        assert!(
            kinds("0.2 2. .1 1e9")
                .iter()
                .take(4)
                .all(|k| *k == TokenKind::Real)
        );
    }

    #[test]
    fn dots_after_integer() {
        assert_eq!(
            kinds("1..f"),
            [
                TokenKind::Integer,
                TokenKind::Compose,
                TokenKind::Identifier,
                TokenKind::EndOfInput
            ]
        );
        assert_eq!(
            kinds("xs.(1)"),
            [
                TokenKind::Identifier,
                TokenKind::IndexOpen,
                TokenKind::Integer,
                TokenKind::RParen,
                TokenKind::EndOfInput
            ]
        );
    }

    #[test]
    fn longest_match_operators() {
        use TokenKind::*;
        assert_eq!(
            kinds("<=> <= < == = != ! && & || | -> - :: .."),
            [
                Cmp, Le, Lt, EqEq, Bind, NotEq, Bang, AndAnd, Amp, OrOr, Pipe, Arrow, Minus,
                TypedAs, Compose, EndOfInput
            ]
        );
    }

    #[test]
    fn comments_are_skipped() {
        assert_eq!(
            kinds("a # the rest is ignored ;;;\nb"),
            [TokenKind::Identifier, TokenKind::Identifier, TokenKind::EndOfInput]
        );
    }

    #[test]
    fn string_with_escapes() {
        let source = Source::anonymous(r#""say \"hi\"\n""#);
        let (tokens, diags) = tokenize(&source, &Config::default()).expect("valid config");
        assert_eq!(tokens[0].kind, TokenKind::String);
        assert_eq!(unescape(tokens[0].lexeme), "say \"hi\"\n");
        assert!(diags.is_empty());
    }

    #[test]
    fn unknown_escape_keeps_string() {
        let source = Source::anonymous(r#""a\qb""#);
        let (tokens, diags) = tokenize(&source, &Config::default()).expect("valid config");
        assert_eq!(tokens[0].kind, TokenKind::String);
        assert_eq!(diags.len(), 1);
        assert_eq!(diags.all()[0].message, "unknown escape sequence '\\q'");
        assert_eq!(diags.all()[0].position.column, 3);
        assert_eq!(unescape(tokens[0].lexeme), "a\\qb");
    }

    #[test]
    fn unterminated_string_stops_at_newline() {
        let source = Source::anonymous("\"open\nnext");
        let (tokens, diags) = tokenize(&source, &Config::default()).expect("valid config");
        assert_eq!(tokens[0].kind, TokenKind::Invalid);
        assert_eq!(tokens[0].lexeme, "\"open");
        assert_eq!(tokens[1].kind, TokenKind::Identifier);
        assert_eq!(diags.all()[0].message, "unterminated string literal");
    }

    #[test]
    fn invalid_run_is_one_token() {
        let source = Source::anonymous("a @@` b");
        let (tokens, diags) = tokenize(&source, &Config::default()).expect("valid config");
        assert_eq!(tokens[1].kind, TokenKind::Invalid);
        assert_eq!(tokens[1].lexeme, "@@`");
        assert_eq!(diags.len(), 1);
        assert_eq!(diags.all()[0].message, "unexpected character '@'");
        assert_eq!(diags.all()[0].position.column, 3);
    }

    #[test]
    fn lone_colon_is_invalid() {
        let source = Source::anonymous("a : b");
        let (tokens, diags) = tokenize(&source, &Config::default()).expect("valid config");
        assert_eq!(tokens[1].kind, TokenKind::Invalid);
        assert_eq!(tokens[1].lexeme, ":");
        assert_eq!(diags.len(), 1);
    }

    #[test]
    fn malformed_number() {
        let source = Source::anonymous("123abc + 1");
        let (tokens, diags) = tokenize(&source, &Config::default()).expect("valid config");
        assert_eq!(tokens[0].kind, TokenKind::Invalid);
        assert_eq!(tokens[0].lexeme, "123abc");
        assert_eq!(diags.all()[0].message, "malformed numeric literal");
    }

    #[test]
    fn integer_overflow() {
        let source = Source::anonymous("99999999999999999999");
        let (tokens, diags) = tokenize(&source, &Config::default()).expect("valid config");
        assert_eq!(tokens[0].kind, TokenKind::Invalid);
        assert_eq!(diags.all()[0].message, "integer literal out of range");
    }

    #[test]
    fn real_overflow() {
        let source = Source::anonymous("1e999 1e308");
        let (tokens, diags) = tokenize(&source, &Config::default()).expect("valid config");
        assert_eq!(tokens[0].kind, TokenKind::Invalid);
        assert_eq!(tokens[0].lexeme, "1e999");
        assert_eq!(tokens[1].kind, TokenKind::Real);
        assert_eq!(diags.len(), 1);
        assert_eq!(diags.all()[0].message, "real literal out of range");
    }

    #[test]
    fn exhausted_after_end_of_input() {
        let source = Source::anonymous("x");
        let mut lexer = Lexer::new(&source, &Config::default()).expect("valid config");
        assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Identifier);
        assert_eq!(lexer.next_token().unwrap().kind, TokenKind::EndOfInput);
        assert!(matches!(lexer.next_token(), Err(Error::ExhaustedInput)));
        assert!(lexer.is_finished());
    }

    #[test]
    fn iterator_ends_after_end_of_input() {
        let source = Source::anonymous("");
        let lexer = Lexer::new(&source, &Config::default()).expect("valid config");
        let tokens: Vec<_> = lexer.collect();
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::EndOfInput);
        assert_eq!(tokens[0].start, Position::START);
    }

    #[test]
    fn positions_track_lines_and_tabs() {
        let source = Source::anonymous("a\n\tb c");
        let config = Config::new().tab_width(4);
        let (tokens, _) = tokenize(&source, &config).expect("valid config");
        assert_eq!(tokens[0].start, Position::new(1, 1, 0));
        assert_eq!(tokens[1].start, Position::new(2, 5, 3));
        assert_eq!(tokens[2].start, Position::new(2, 7, 5));
    }

    #[test]
    fn tab_stops_are_relative() {
        let source = Source::anonymous("ab\tc");
        let config = Config::new().tab_width(8);
        let (tokens, _) = tokenize(&source, &config).expect("valid config");
        assert_eq!(tokens[1].start.column, 9);
    }

    #[test]
    fn crlf_counts_once_in_both_mode() {
        let source = Source::anonymous("a\r\nb\rc");
        let (tokens, _) = tokenize(&source, &Config::default()).expect("valid config");
        assert_eq!(tokens[1].start.line, 2);
        assert_eq!(tokens[2].start.line, 3);
        assert_eq!(tokens[2].start.column, 1);
    }

    #[test]
    fn lf_mode_treats_cr_as_space() {
        let source = Source::anonymous("a\r\nb\rc");
        let config = Config::new().newline(NewlineMode::Lf);
        let (tokens, _) = tokenize(&source, &config).expect("valid config");
        assert_eq!(tokens[1].start, Position::new(2, 1, 3));
        assert_eq!(tokens[2].start, Position::new(2, 3, 5));
    }

    #[test]
    fn bom_is_trivia() {
        let source = Source::anonymous("\u{FEFF}x");
        let (tokens, diags) = tokenize_with_trivia(&source, &Config::default()).expect("config");
        assert_eq!(tokens[0].kind, TokenKind::Whitespace);
        assert_eq!(tokens[1].kind, TokenKind::Identifier);
        assert!(diags.is_empty());
    }

    #[test]
    fn trivia_round_trip() {
        let input = "def :: Int f() = 1; # c\r\n\t\"s\" @ 2.5\n";
        let source = Source::anonymous(input);
        let (tokens, _) = tokenize_with_trivia(&source, &Config::default()).expect("config");
        let rebuilt: String = tokens.iter().map(|t| t.lexeme).collect();
        assert_eq!(rebuilt, input);
    }

    #[test]
    fn non_ascii_invalid_character() {
        let source = Source::anonymous("x = λ;");
        let (tokens, diags) = tokenize(&source, &Config::default()).expect("config");
        assert_eq!(tokens[2].kind, TokenKind::Invalid);
        assert_eq!(tokens[2].lexeme, "λ");
        assert_eq!(tokens[3].start.column, 6);
        assert_eq!(diags.all()[0].message, "unexpected character 'λ'");
    }
}
