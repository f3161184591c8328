//! Number grammar example.
//! Classifies numeric literals with the stock `number` grammar.
//!
//! Usage: `number-grammar [LITERAL]...`; without arguments a built-in sample
//! list is used.

use grammar_framework::grammars::number;

const SAMPLES: &[&str] = &[
    "0", "42", "-17", "3.14", "-0.5", "0b1010", "0o755", "0644", "0xff", "-0x0000", "-0", "1.",
    "abc",
];

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let inputs: Vec<&str> = if args.is_empty() {
        SAMPLES.to_vec()
    } else {
        args.iter().map(String::as_str).collect()
    };

    let grammar = number();
    for input in inputs {
        match grammar.parse_complete(input) {
            Ok(parsed) => {
                let kind = parsed.fragment().name().unwrap_or("Number");
                println!("{:<10} {}", input, kind);
            }
            Err(error) => println!("{:<10} not a number ({})", input, error),
        }
    }
}
