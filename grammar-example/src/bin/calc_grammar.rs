//! Calculator grammar example.
//!
//! Builds a recursive arithmetic grammar with `GrammarSet`, parses a few
//! expressions and evaluates the resulting fragment trees.
//!
//! Grammar:
//! - `Expression := Term (("+" | "-") Term)*`
//! - `Term := Factor (("*" | "/") Factor)*`
//! - `Factor := Number | "(" Expression ")" | "-" Factor`
//!
//! Operators of equal precedence associate to the left, so `8 - 2 - 1` is 5.

use grammar_framework::grammars::number;
use grammar_framework::{Fragment, GrammarError, GrammarSet, NamedGrammar};
use matcher_framework::builders::*;

fn calc_grammars() -> Result<GrammarSet, GrammarError> {
    let mut set = GrammarSet::new();
    let expression = set.declare("Expression");
    let term = set.declare("Term");
    let factor = set.declare("Factor");

    let parenthesized =
        token("(").suppressed() + expression.clone() + token(")").suppressed();
    let negated = token("-") + factor.clone();
    set.define(NamedGrammar::new(
        "Factor",
        any_of(vec![token(number()), parenthesized, negated]),
    ))?;

    let mul_op = token(literal("*") | literal("/"));
    set.define(NamedGrammar::new(
        "Term",
        factor.clone() + zero_or_more(mul_op + factor),
    ))?;

    let add_op = token(literal("+") | literal("-"));
    set.define(NamedGrammar::new(
        "Expression",
        term.clone() + zero_or_more(add_op + term),
    ))?;

    set.resolve()?;
    Ok(set)
}

/// Evaluates a fragment produced by the calculator grammars.
fn evaluate(fragment: &Fragment) -> Result<f64, String> {
    match fragment {
        Fragment::Named { name, fragment } => match name.as_ref() {
            "Expression" | "Term" => fold(fragment),
            "Factor" => evaluate_factor(fragment),
            "Number" => evaluate(fragment),
            kind => literal_value(kind, &fragment.text()),
        },
        other => Err(format!("unexpected fragment {:?}", other)),
    }
}

/// `[first, [[op, operand], ...]]`, folded left to right.
fn fold(items: &Fragment) -> Result<f64, String> {
    let first = items.get(0).ok_or("missing operand")?;
    let mut value = evaluate(first)?;
    let rest = items.get(1).and_then(Fragment::as_list).unwrap_or(&[]);
    for pair in rest {
        let op = pair.get(0).and_then(Fragment::as_text).ok_or("missing operator")?;
        let operand = evaluate(pair.get(1).ok_or("missing operand")?)?;
        value = match op {
            "+" => value + operand,
            "-" => value - operand,
            "*" => value * operand,
            "/" if operand == 0.0 => return Err("division by zero".to_string()),
            "/" => value / operand,
            other => return Err(format!("unknown operator {:?}", other)),
        };
    }
    Ok(value)
}

fn evaluate_factor(fragment: &Fragment) -> Result<f64, String> {
    match fragment.as_list() {
        // "(" Expression ")": the parentheses are suppressed.
        Some([inner]) => evaluate(inner),
        // "-" Factor
        Some([_, inner]) => Ok(-evaluate(inner)?),
        Some(_) => Err(format!("malformed factor {:?}", fragment)),
        None => evaluate(fragment),
    }
}

fn literal_value(kind: &str, text: &str) -> Result<f64, String> {
    let (negative, digits) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };
    let magnitude = match kind {
        "Integer" | "Float" => digits.parse::<f64>().map_err(|e| e.to_string())?,
        "BinaryInteger" => radix(&digits[2..], 2)?,
        "HexadecimalInteger" => radix(&digits[2..], 16)?,
        "OctalInteger" => radix(digits.trim_start_matches(&['0', 'o', 'O'][..]), 8)?,
        other => return Err(format!("unknown literal kind {}", other)),
    };
    Ok(if negative { -magnitude } else { magnitude })
}

fn radix(digits: &str, base: u32) -> Result<f64, String> {
    if digits.is_empty() {
        return Ok(0.0);
    }
    i64::from_str_radix(digits, base)
        .map(|n| n as f64)
        .map_err(|e| e.to_string())
}

fn main() {
    let set = match calc_grammars() {
        Ok(set) => set,
        Err(error) => {
            eprintln!("failed to build grammar: {}", error);
            return;
        }
    };
    let Some(expression) = set.get("Expression") else {
        eprintln!("Expression grammar missing");
        return;
    };

    let inputs = vec![
        "3 + 4",
        "2 * 3.14",
        "(1 + 2) * 3",
        "8 - 2 - 1",
        "-(0x10 + 0b11) / 0o7",
        "10 / (5 - 5)",
        "3 + ",
    ];

    for input in inputs {
        println!("Expression: {}", input);
        match expression.parse_complete(input) {
            Ok(parsed) => {
                println!("  Tree:  {:?}", parsed.fragment());
                match evaluate(&parsed.to_named()) {
                    Ok(value) => println!("  Value: {}", value),
                    Err(error) => println!("  Error: {}", error),
                }
            }
            Err(error) => println!("  Parse error: {}", error),
        }
        println!();
    }
}
