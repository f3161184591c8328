//! Stock grammars for the literals most languages share.
//!
//! Each function builds a fresh [`NamedGrammar`]; build once and reuse it
//! for many parses.

use crate::grammar::NamedGrammar;
use matcher_framework::builders::*;
use matcher_framework::Pattern;

pub const DIGITS: &str = "0123456789";
pub const OCTAL_DIGITS: &str = "01234567";
pub const HEX_DIGITS: &str = "0123456789abcdefABCDEF";
pub const LETTERS: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Operators recognised by [`operator`], longest first where one is a
/// prefix of another.
pub const DEFAULT_OPERATORS: &[&str] = &[
    "+", "-", "/", "*", "%", "<", ">", "==", "!=", "&&", "||", "&", "|",
];

pub const PYTHON_RESERVED_WORDS: &[&str] = &[
    "False", "None", "True", "and", "as", "assert", "async", "await", "break", "class",
    "continue", "def", "del", "elif", "else", "except", "finally", "for", "from", "global", "if",
    "import", "in", "is", "lambda", "nonlocal", "not", "or", "pass", "raise", "return", "try",
    "while", "with", "yield",
];

/// Symbols allowed after a backslash in quoted strings.
const ESCAPED: &str = "nrtabfv'\"\n\\";

/// `0`, or an optionally negative run of digits without a leading zero.
pub fn integer() -> NamedGrammar {
    NamedGrammar::new(
        "Integer",
        group(literal("0") | (optional("-") + next_is_not("0") + chars(DIGITS))),
    )
}

/// `0b101`, `-0B1`; negative zero is rejected.
pub fn binary_integer() -> NamedGrammar {
    NamedGrammar::new(
        "BinaryInteger",
        group(optional("-") + "0" + char_of("bB") + chars("01")),
    )
    .with_bad_pattern(literal("-0") + char_of("bB") + chars("0"))
}

/// `017`, `0o17`, `-0O17`; negative zero is rejected.
pub fn octal_integer() -> NamedGrammar {
    NamedGrammar::new(
        "OctalInteger",
        group(optional("-") + "0" + optional(char_of("oO")) + chars(OCTAL_DIGITS)),
    )
    .with_bad_pattern(literal("-0") + optional(char_of("oO")) + chars("0"))
}

/// `0x1f`, `-0XAB`; negative zero is rejected.
pub fn hexadecimal_integer() -> NamedGrammar {
    NamedGrammar::new(
        "HexadecimalInteger",
        group(optional("-") + "0" + char_of("xX") + chars(HEX_DIGITS)),
    )
    .with_bad_pattern(literal("-0") + char_of("xX") + chars("0"))
}

/// `1.5`, `-0.25`, `0.0`: an integer part without leading zeros, a point
/// and at least one fractional digit.
pub fn float() -> NamedGrammar {
    let whole = literal("0") | (next_is_not("0") + chars(DIGITS));
    NamedGrammar::new(
        "Float",
        group(optional("-") + whole + "." + chars(DIGITS)),
    )
}

/// Any numeric literal, tried in an order where no earlier grammar can
/// steal a prefix of a later one.
pub fn number() -> NamedGrammar {
    NamedGrammar::new(
        "Number",
        any_of(vec![
            binary_integer().into(),
            hexadecimal_integer().into(),
            float().into(),
            octal_integer().into(),
            integer().into(),
        ]),
    )
}

/// A backslash and the symbol it escapes.
pub fn escape_sequence() -> NamedGrammar {
    NamedGrammar::new("EscapeSequence", group(literal("\\") + char_of(ESCAPED)))
}

/// A string between single-symbol quotes. The body cannot contain a bare
/// quote, backslash or newline.
fn quoted(name: &str, quote: &str) -> NamedGrammar {
    let plain = chars_not(&format!("{}\\\n", quote));
    let body = zero_or_more(Pattern::from(escape_sequence()) | plain);
    NamedGrammar::new(name, group(literal(quote) + body + literal(quote)))
}

/// A string between tripled quotes. The body may span lines and contain
/// single quotes.
fn triple_quoted(name: &str, quote: &str) -> NamedGrammar {
    let fence = quote.repeat(3);
    let plain = chars_not(&format!("{}\\", quote));
    let lone_quote = literal(quote) + next_is_not(quote.repeat(2).as_str());
    let body = zero_or_more(Pattern::from(escape_sequence()) | plain | lone_quote);
    NamedGrammar::new(
        name,
        group(literal(&fence) + body + literal(&fence)),
    )
}

pub fn single_quoted_string() -> NamedGrammar {
    quoted("SingleQuotedString", "'")
}

pub fn double_quoted_string() -> NamedGrammar {
    quoted("DoubleQuotedString", "\"")
}

pub fn triple_single_quoted_string() -> NamedGrammar {
    triple_quoted("TripleSingleQuotedString", "'")
}

pub fn triple_double_quoted_string() -> NamedGrammar {
    triple_quoted("TripleDoubleQuotedString", "\"")
}

/// Any quoted string; tripled quotes are tried first so `''''''` is not read
/// as an empty string followed by more quotes.
pub fn string() -> NamedGrammar {
    NamedGrammar::new(
        "String",
        any_of(vec![
            triple_single_quoted_string().into(),
            triple_double_quoted_string().into(),
            single_quoted_string().into(),
            double_quoted_string().into(),
        ]),
    )
}

pub fn operator() -> NamedGrammar {
    operator_of("Operator", DEFAULT_OPERATORS)
}

/// One of `operators`, tried in the given order.
pub fn operator_of(name: &str, operators: &[&str]) -> NamedGrammar {
    NamedGrammar::new(
        name,
        any_of(operators.iter().map(|op| literal(op)).collect()),
    )
}

/// A letter or underscore followed by letters, digits and underscores.
pub fn variable() -> NamedGrammar {
    let start = char_of(&format!("{}_", LETTERS));
    let tail = chars_bounded(&format!("{}{}_", LETTERS, DIGITS), 0, None);
    variable_of("Variable", start, tail)
}

/// A variable whose first symbol matches `starts_with` and whose remaining
/// symbols match `ends_with`.
pub fn variable_of(
    name: &str,
    starts_with: impl Into<Pattern>,
    ends_with: impl Into<Pattern>,
) -> NamedGrammar {
    NamedGrammar::new(name, group(starts_with.into() + ends_with.into()))
}

/// A variable name that is not a Python keyword.
pub fn python_variable() -> NamedGrammar {
    let plain = variable();
    NamedGrammar::new("PythonVariable", plain.pattern().clone())
        .with_bad_pattern(python_reserved_word())
}

/// One of `words`, ending at a word boundary.
pub fn reserved_word(name: &str, words: &[&str]) -> NamedGrammar {
    let choices = words.iter().map(|word| literal(word) + word_end()).collect();
    NamedGrammar::new(name, group(any_of(choices)))
}

pub fn python_reserved_word() -> NamedGrammar {
    reserved_word("PythonReservedWord", PYTHON_RESERVED_WORDS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stock_names() {
        assert_eq!(integer().name(), "Integer");
        assert_eq!(number().name(), "Number");
        assert_eq!(string().name(), "String");
        assert_eq!(python_variable().name(), "PythonVariable");
    }

    #[test]
    fn test_number_pattern_lists_grammars_in_order() {
        assert_eq!(
            number().pattern().to_string(),
            "Any(BinaryInteger, HexadecimalInteger, Float, OctalInteger, Integer)"
        );
    }

    #[test]
    fn test_only_integers_reject_negative_zero() {
        assert!(integer().bad_pattern().is_none());
        assert!(binary_integer().bad_pattern().is_some());
        assert!(octal_integer().bad_pattern().is_some());
        assert!(hexadecimal_integer().bad_pattern().is_some());
    }
}
