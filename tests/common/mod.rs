#![allow(dead_code)]

use noctern::{Config, Parse, Program, Source, format, parse, parse_str};

/// Parse `input`, requiring no diagnostics at all.
pub fn parse_clean(input: &str) -> Parse {
    let parsed = parse_str(input).expect("parse failed");
    assert!(
        parsed.diagnostics.is_empty(),
        "unexpected diagnostics for {input:?}:\n{:#?}",
        parsed.diagnostics
    );
    parsed
}

/// Parse then format should reproduce `input` exactly.
pub fn roundtrip(input: &str) {
    let output = format(&parse_clean(input).program);
    assert_eq!(
        output, input,
        "round-trip mismatch:\n--- expected ---\n{input}\n--- got ---\n{output}"
    );
}

/// Tree dump of the first item.
pub fn sexpr(input: &str) -> String {
    let parsed = parse_clean(input);
    parsed.program.items[0].to_string()
}

/// Messages of every diagnostic, in emission order.
pub fn messages(parsed: &Parse) -> Vec<&str> {
    parsed
        .diagnostics
        .iter()
        .map(|d| d.message.as_str())
        .collect()
}

/// Format an AST, parse it back, and check the text is stable.
pub fn assert_format_stable(original: &Program) {
    let formatted = format(original);
    let reparsed = parse(&Source::anonymous(formatted.as_str()), &Config::default())
        .expect("parse failed");
    assert!(
        reparsed.diagnostics.is_empty(),
        "formatted output has diagnostics: {:#?}\n--- formatted ---\n{formatted}",
        reparsed.diagnostics
    );
    let again = format(&reparsed.program);
    assert_eq!(
        formatted, again,
        "formatting is not idempotent\n--- first ---\n{formatted}\n--- second ---\n{again}"
    );
}
