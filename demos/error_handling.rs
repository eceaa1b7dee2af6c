//! Show how the parser reports and recovers from broken input.

use noctern::{Outcome, Source};

fn main() {
    let source = Source::new(
        Some("broken.nct"),
        "let a = 1 @ 2;\nlet b = ;\ndef :: Int f() = { return 1 };\nlet c = (a + b;\n",
    );

    let parsed = match noctern::parse(&source, &noctern::Config::default()) {
        Ok(parsed) => parsed,
        Err(e) => {
            eprintln!("error: {e}");
            return;
        }
    };

    for diagnostic in &parsed.diagnostics {
        print!("{}", diagnostic.render(&source));
        println!("  Category: {:?}", diagnostic.category);
    }

    println!("\nRecovered tree:\n{}", parsed.program);
    if parsed.outcome == Outcome::Partial {
        println!("(input ended while recovering)");
    }
}
