//! Key/value list example.
//! Builds a small config-line grammar from builders and operators and prints
//! the fragment tree for a few inputs.

use matcher_framework::builders::*;
use matcher_framework::{Matcher, Pattern};

/// `key = value` pairs separated by commas, where a value is a bare word or
/// a double-quoted string.
fn pairs() -> Pattern {
    let key = group(chars("abcdefghijklmnopqrstuvwxyz_") + optional(chars("0123456789")));
    let quoted = select(
        literal("\"") + chars_not("\"") + literal("\""),
        1isize,
    );
    let bare = chars_not(", \t\r\n\"");
    let value = quoted | bare;
    let pair = token(key) + literal("=").suppressed() + token(value);
    separated_by(",", pair)
}

fn main() {
    let inputs = vec![
        "name = demo",
        "host = localhost, port = 8080",
        "title = \"hello, world\", retries2 = 3",
        "broken = ",
    ];

    let pattern = pairs();
    println!("Pattern: {}", pattern);
    println!();

    for input in inputs {
        println!("Input: {:?}", input);
        match pattern.parse(input) {
            Ok(fragment) => println!("  {:?}", fragment),
            Err(error) => println!("  error: {}", error),
        }
        println!();
    }
}
