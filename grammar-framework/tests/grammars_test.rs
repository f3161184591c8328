use grammar_framework::grammars::*;
use grammar_framework::{Fragment, NamedGrammar};

fn accepts(grammar: &NamedGrammar, input: &str) {
    let parsed = grammar
        .parse(input)
        .unwrap_or_else(|error| panic!("{:?} should accept {:?}: {}", grammar, input, error));
    assert_eq!(parsed.to_string(), input, "{:?} on {:?}", grammar, input);
}

fn rejects(grammar: &NamedGrammar, input: &str) {
    assert!(
        grammar.parse(input).is_err(),
        "{:?} should reject {:?}",
        grammar,
        input
    );
}

#[test]
fn test_integer() {
    let grammar = integer();
    for input in ["0", "1", "-1", "123", "-123"] {
        accepts(&grammar, input);
    }
    rejects(&grammar, "-0");
    rejects(&grammar, "a");
    assert_eq!(grammar.parse("123").unwrap().repr(), "Integer(\"123\")");
}

#[test]
fn test_binary_integer() {
    let grammar = binary_integer();
    for input in ["0b0", "0B1", "0b00010", "-0b1", "-0b1110", "-0B0010"] {
        accepts(&grammar, input);
    }
    rejects(&grammar, "-0b000");
    rejects(&grammar, "a");
    assert_eq!(grammar.parse("0b001").unwrap().repr(), "BinaryInteger(\"0b001\")");
}

#[test]
fn test_octal_integer() {
    let grammar = octal_integer();
    for input in [
        "00", "0o0", "0O00", "01234567", "0o1234567", "0O1234567", "0001234567", "-0001",
        "-0O00100",
    ] {
        accepts(&grammar, input);
    }
    rejects(&grammar, "-00");
    rejects(&grammar, "-00000");
    rejects(&grammar, "a");
}

#[test]
fn test_hexadecimal_integer() {
    let grammar = hexadecimal_integer();
    for input in [
        "0x0",
        "0X00",
        "0x123abc",
        "0x001234567890abcdefABCDEF",
        "-0x001",
        "-0X00100",
    ] {
        accepts(&grammar, input);
    }
    rejects(&grammar, "-0x0");
    rejects(&grammar, "-0x0000");
    rejects(&grammar, "a");
    assert_eq!(
        grammar.parse("0x123").unwrap().repr(),
        "HexadecimalInteger(\"0x123\")"
    );
}

#[test]
fn test_float() {
    let grammar = float();
    for input in ["0.0", "0.1", "1.0", "0.00001", "0.00000", "-1.0", "123.456", "-123.456"] {
        accepts(&grammar, input);
    }
    rejects(&grammar, "-0");
    rejects(&grammar, "a");
}

#[test]
fn test_float_stops_at_operator() {
    let parsed = float().parse("2.0+1").unwrap();
    assert_eq!(parsed.to_string(), "2.0");
    assert_eq!(parsed.consumed(), 3);
    assert_eq!(parsed.repr(), "Float(\"2.0+1\")");
}

#[test]
fn test_number_picks_the_right_kind() {
    let number = number();
    let cases = [
        ("1", integer()),
        ("11323", integer()),
        ("1.321", float()),
        ("-0.321", float()),
        ("0b1", binary_integer()),
        ("0B1", binary_integer()),
        ("01", octal_integer()),
        ("07314", octal_integer()),
        ("0x1", hexadecimal_integer()),
        ("0Xabf7314", hexadecimal_integer()),
    ];
    for (input, expected) in cases {
        let parsed = number.parse(input).unwrap();
        assert_eq!(
            parsed.fragment(),
            &expected.parse(input).unwrap().to_named(),
            "Number on {:?}",
            input
        );
    }
}

#[test]
fn test_escape_sequence() {
    let grammar = escape_sequence();
    for escaped in "nrtabfv'\"\n\\".chars() {
        accepts(&grammar, &format!("\\{}", escaped));
    }
    rejects(&grammar, "\\G");
    assert_eq!(
        grammar.parse("\\\"").unwrap().repr(),
        "EscapeSequence(\"\\\\\\\"\")"
    );
}

#[test]
fn test_quoted_strings() {
    accepts(&single_quoted_string(), "''");
    accepts(&single_quoted_string(), "'foo'");
    accepts(&single_quoted_string(), r"'foo\t\a\b\\'");
    accepts(&single_quoted_string(), "'foo\\\n'");
    accepts(&double_quoted_string(), "\"\"");
    accepts(&double_quoted_string(), "\"foo\"");
    accepts(&double_quoted_string(), r#""foo\t\a\b\\""#);
    accepts(&double_quoted_string(), "\"foo\\\n\"");
    rejects(&single_quoted_string(), "'foo\n'");
    rejects(&double_quoted_string(), "'foo'");
}

#[test]
fn test_triple_quoted_strings() {
    accepts(&triple_single_quoted_string(), "''''''");
    accepts(&triple_single_quoted_string(), "'''hi!'''");
    accepts(&triple_single_quoted_string(), "'''foo\\\n'''");
    accepts(&triple_single_quoted_string(), "'''it's'''");
    accepts(&triple_double_quoted_string(), "\"\"\"\"\"\"");
    accepts(&triple_double_quoted_string(), "\"\"\"hi!\"\"\"");
    accepts(&triple_double_quoted_string(), "\"\"\"two\nlines\"\"\"");
}

#[test]
fn test_string_prefers_triple_quotes() {
    let string = string();
    let parsed = string.parse("''''''").unwrap();
    assert_eq!(
        parsed.fragment(),
        &triple_single_quoted_string()
            .parse("''''''")
            .unwrap()
            .to_named()
    );
    assert_eq!(parsed.repr(), "String(\"''''''\")");

    let parsed = string.parse("\"double\"").unwrap();
    assert_eq!(parsed.fragment().name(), Some("DoubleQuotedString"));
    let parsed = string.parse(r"'single-escaped\n\''").unwrap();
    assert_eq!(parsed.fragment().name(), Some("SingleQuotedString"));
    assert_eq!(parsed.to_string(), r"'single-escaped\n\''");
}

#[test]
fn test_operator() {
    let grammar = operator();
    for input in ["-", "+", "==", "&&", "|", "||"] {
        accepts(&grammar, input);
    }
    rejects(&grammar, "a");
    assert_eq!(grammar.parse("-").unwrap().repr(), "Operator(\"-\")");

    let division = operator_of("UnicodeOperator", &["÷"]);
    accepts(&division, "÷");
    assert_eq!(division.parse("÷").unwrap().consumed(), 1);
}

#[test]
fn test_variable() {
    let grammar = variable();
    for input in ["abcd", "_abcd", "abcd123", "_abcd_123_"] {
        accepts(&grammar, input);
    }
    rejects(&grammar, "-abcd");
    rejects(&grammar, "123");
    assert_eq!(grammar.parse("abcd").unwrap().repr(), "Variable(\"abcd\")");
}

#[test]
fn test_variable_with_custom_start() {
    use matcher_framework::builders::{char_of, chars_bounded};
    let tail = || chars_bounded(&format!("{}{}_", LETTERS, DIGITS), 0, None);

    let percent = variable_of("PercentVariable", char_of("%"), tail());
    accepts(&percent, "%abcd_123_");
    rejects(&percent, "_abc");

    let dashed = variable_of("DashVariable", char_of("–"), tail());
    accepts(&dashed, "–abcd_123_");
    rejects(&dashed, "-abc");
}

#[test]
fn test_python_variable_rejects_keywords() {
    let grammar = python_variable();
    accepts(&grammar, "abcd");
    accepts(&grammar, "define");
    accepts(&grammar, "import_path");
    rejects(&grammar, "def");
    rejects(&grammar, "None");
}

#[test]
fn test_reserved_words() {
    let grammar = reserved_word("TestReservedWord", &["def"]);
    accepts(&grammar, "def");
    rejects(&grammar, "function");
    rejects(&grammar, "define");
    assert_eq!(grammar.parse("def").unwrap().repr(), "TestReservedWord(\"def\")");

    let python = python_reserved_word();
    accepts(&python, "def");
    accepts(&python, "in");
    accepts(&python, "import");
    assert_eq!(
        python.parse("in x").unwrap().fragment(),
        &Fragment::from("in")
    );
}
