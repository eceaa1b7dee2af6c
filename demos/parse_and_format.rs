//! Parse a noctern program and re-format it.

fn main() {
    let input = "\
import std.io;
def::Int->Int  square( x )=x*x
let total=square(3)+square(4);print(total)
";

    let parsed = noctern::parse_str(input).expect("valid configuration");

    println!("Items: {}", parsed.program.items.len());
    for f in parsed.program.functions() {
        println!("  Function: {} :: {}", f.name, f.ty);
    }
    println!("\nTree:\n{}", parsed.program);

    let output = noctern::format(&parsed.program);
    println!("Formatted output:\n{output}");
}
