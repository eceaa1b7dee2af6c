use noctern::{
    Category, Config, Error, Keyword, Lexer, NewlineMode, Position, Source, TokenKind, tokenize,
    tokenize_with_trivia,
};

fn kinds(input: &str) -> Vec<TokenKind> {
    let source = Source::anonymous(input);
    let (tokens, _) = tokenize(&source, &Config::default()).unwrap();
    tokens.iter().map(|t| t.kind).collect()
}

fn lexemes(input: &str) -> Vec<String> {
    let source = Source::anonymous(input);
    let (tokens, _) = tokenize(&source, &Config::default()).unwrap();
    tokens.iter().map(|t| t.lexeme.to_string()).collect()
}

#[test]
fn function_declaration_tokens() {
    use TokenKind as K;
    assert_eq!(
        kinds("def :: Int -> Int inc(x) = x + 1;"),
        [
            K::Keyword(Keyword::Def),
            K::TypedAs,
            K::Identifier,
            K::Arrow,
            K::Identifier,
            K::Identifier,
            K::LParen,
            K::Identifier,
            K::RParen,
            K::Bind,
            K::Identifier,
            K::Plus,
            K::Integer,
            K::Semicolon,
            K::EndOfInput,
        ]
    );
}

#[test]
fn every_keyword_is_reserved() {
    for kw in Keyword::ALL {
        assert_eq!(kinds(kw.as_str())[0], TokenKind::Keyword(kw));
    }
    assert_eq!(kinds("definitely")[0], TokenKind::Identifier);
    assert_eq!(kinds("_let")[0], TokenKind::Identifier);
}

#[test]
fn operators_use_longest_match() {
    use TokenKind::{
        AndAnd, Amp, Arrow, Backslash, Bang, Bind, Caret, Cmp, Compose, Dollar, Dot, EqEq, Ge,
        Gt, Identifier, IndexOpen, Integer, Le, Lt, Minus, NotEq, OrOr, Pipe, RParen, Tilde,
    };
    assert_eq!(kinds("<=>")[0], Cmp);
    assert_eq!(kinds("<= <")[..2], [Le, Lt]);
    assert_eq!(kinds(">= > == != =")[..5], [Ge, Gt, EqEq, NotEq, Bind]);
    assert_eq!(kinds("&& & || | ! ~ ^")[..7], [AndAnd, Amp, OrOr, Pipe, Bang, Tilde, Caret]);
    assert_eq!(kinds("f..g")[..3], [Identifier, Compose, Identifier]);
    assert_eq!(kinds("xs.(0)")[..4], [Identifier, IndexOpen, Integer, RParen]);
    assert_eq!(kinds("p.x")[..3], [Identifier, Dot, Identifier]);
    assert_eq!(kinds("$ \\ -> -")[..4], [Dollar, Backslash, Arrow, Minus]);
}

#[test]
fn numbers() {
    use TokenKind::{Integer, Real};
    assert_eq!(kinds("42")[0], Integer);
    assert_eq!(kinds("4.2")[0], Real);
    assert_eq!(kinds("4.")[0], Real);
    assert_eq!(kinds(".5")[0], Real);
    assert_eq!(kinds("1e9")[0], Real);
    assert_eq!(kinds("2.5E-3")[0], Real);
    assert_eq!(lexemes("1..2")[..3], ["1", "..", "2"]);
    assert_eq!(lexemes("1.(0)")[..2], ["1", ".("]);
}

#[test]
fn number_errors() {
    let source = Source::anonymous("12abc 99999999999999999999");
    let (tokens, diags) = tokenize(&source, &Config::default()).unwrap();
    assert_eq!(tokens[0].kind, TokenKind::Invalid);
    assert_eq!(tokens[0].lexeme, "12abc");
    assert_eq!(tokens[1].kind, TokenKind::Invalid);
    let messages: Vec<_> = diags.all().iter().map(|d| d.message.as_str()).collect();
    assert_eq!(
        messages,
        ["malformed numeric literal", "integer literal out of range"]
    );
}

#[test]
fn strings_and_escapes() {
    let source = Source::anonymous(r#""ok\n" "bad\q""#);
    let (tokens, diags) = tokenize(&source, &Config::default()).unwrap();
    assert_eq!(tokens[0].kind, TokenKind::String);
    assert_eq!(tokens[1].kind, TokenKind::String);
    assert_eq!(diags.len(), 1);
    assert_eq!(diags.all()[0].message, "unknown escape sequence '\\q'");
    assert_eq!(diags.all()[0].position, Position::new(1, 12, 11));
    assert_eq!(noctern::lexer::unescape(tokens[0].lexeme), "ok\n");
}

#[test]
fn unterminated_string_is_invalid() {
    let source = Source::anonymous("\"open\nnext");
    let (tokens, diags) = tokenize(&source, &Config::default()).unwrap();
    assert_eq!(tokens[0].kind, TokenKind::Invalid);
    assert_eq!(tokens[0].lexeme, "\"open");
    assert_eq!(tokens[1].lexeme, "next");
    assert_eq!(diags.all()[0].category, Category::Lex);
}

#[test]
fn unknown_characters_group_into_one_token() {
    let source = Source::anonymous("a @@` b");
    let (tokens, diags) = tokenize(&source, &Config::default()).unwrap();
    assert_eq!(tokens[1].kind, TokenKind::Invalid);
    assert_eq!(tokens[1].lexeme, "@@`");
    assert_eq!(tokens[2].lexeme, "b");
    assert_eq!(diags.len(), 1);
    assert_eq!(diags.all()[0].message, "unexpected character '@'");
}

#[test]
fn comments_are_skipped() {
    assert_eq!(lexemes("a # comment ; b\nc")[..2], ["a", "c"]);
}

#[test]
fn trivia_mode_reconstructs_input() {
    let input = "\u{FEFF}def :: Int f() = { # hi\r\n\treturn 1 @ \"s\";\r}\n";
    let source = Source::anonymous(input);
    let (tokens, _) = tokenize_with_trivia(&source, &Config::default()).unwrap();
    let rebuilt: String = tokens.iter().map(|t| t.lexeme).collect();
    assert_eq!(rebuilt, input);
    assert_eq!(tokens[0].kind, TokenKind::Whitespace);
    assert!(tokens.iter().any(|t| t.kind == TokenKind::Comment));
}

#[test]
fn positions_track_lines_tabs_and_crlf() {
    let source = Source::anonymous("a\r\n\tb\rc\nd");
    let (tokens, _) = tokenize(&source, &Config::default().tab_width(8)).unwrap();
    let starts: Vec<(usize, usize)> = tokens.iter().map(|t| (t.start.line, t.start.column)).collect();
    assert_eq!(starts, [(1, 1), (2, 9), (3, 1), (4, 1), (4, 2)]);
}

#[test]
fn lf_mode_treats_carriage_return_as_space() {
    let source = Source::anonymous("a\rb\nc");
    let config = Config::default().newline(NewlineMode::Lf);
    let (tokens, _) = tokenize(&source, &config).unwrap();
    assert_eq!(tokens[1].start, Position::new(1, 3, 2));
    assert_eq!(tokens[2].start.line, 2);
}

#[test]
fn columns_count_characters_not_bytes() {
    let source = Source::anonymous("\"héllo\" x");
    let (tokens, _) = tokenize(&source, &Config::default()).unwrap();
    assert_eq!(tokens[1].start.column, 9);
    assert_eq!(tokens[1].start.offset, 9);
}

#[test]
fn exhausted_after_end_of_input() {
    let source = Source::anonymous("x");
    let mut lexer = Lexer::new(&source, &Config::default()).unwrap();
    assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Identifier);
    assert_eq!(lexer.next_token().unwrap().kind, TokenKind::EndOfInput);
    assert!(lexer.is_finished());
    assert!(matches!(lexer.next_token(), Err(Error::ExhaustedInput)));
}

#[test]
fn empty_input_is_just_end() {
    assert_eq!(kinds(""), [TokenKind::EndOfInput]);
    assert_eq!(kinds("  \n # only a comment"), [TokenKind::EndOfInput]);
}

#[test]
fn token_dump_format() {
    let source = Source::anonymous("inc(x) + 1");
    let (tokens, _) = tokenize(&source, &Config::default()).unwrap();
    let dump: Vec<String> = tokens.iter().map(ToString::to_string).collect();
    assert_eq!(
        dump,
        [
            "<identifier: \"inc\">",
            "<lparen>",
            "<identifier: \"x\">",
            "<rparen>",
            "<add>",
            "<integer: \"1\">",
            "<end_of_input>",
        ]
    );
}

#[test]
fn invalid_config_is_rejected() {
    let source = Source::anonymous("x");
    let err = Lexer::new(&source, &Config::default().tab_width(99)).unwrap_err();
    assert!(matches!(err, Error::InvalidConfig(_)));
}
