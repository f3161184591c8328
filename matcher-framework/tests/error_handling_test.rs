use matcher_framework::builders::*;
use matcher_framework::{
    Buffer, Fragment, MatchConfig, MatchError, MatchResult, Matched, Matcher, MaxLength, Position,
    RuleSet,
};
use std::sync::Arc;

/// A matcher that always reports engine misuse.
#[derive(Debug)]
struct Broken;

impl Matcher for Broken {
    fn consume(&self, buffer: &mut Buffer) -> MatchResult<Fragment> {
        Err(MatchError::MarkUnderflow {
            offset: buffer.position(),
        })
    }
}

/// Consumes one symbol, then pops a mark it never pushed.
#[derive(Debug)]
struct Unbalanced;

impl Matcher for Unbalanced {
    fn consume(&self, buffer: &mut Buffer) -> MatchResult<Fragment> {
        buffer.advance(1);
        buffer.forget_mark()?;
        Ok(Fragment::Empty)
    }
}

fn broken() -> matcher_framework::Pattern {
    custom(Broken)
}

#[test]
fn test_engine_error_passes_through_alternative() {
    let matcher = broken() | literal("a");
    let mut buffer = Buffer::new("a");
    assert_eq!(
        matcher.consume(&mut buffer),
        Err(MatchError::MarkUnderflow { offset: 0 })
    );
    assert_eq!(buffer.position(), 0);
    assert_eq!(buffer.mark_depth(), 0);
}

#[test]
fn test_engine_error_passes_through_sequence() {
    let matcher = literal("a") + broken();
    let mut buffer = Buffer::new("ab");
    let error = matcher.consume(&mut buffer).unwrap_err();
    assert!(!error.is_recoverable());
    assert_eq!(buffer.position(), 0);
    assert_eq!(buffer.mark_depth(), 0);
}

#[test]
fn test_engine_error_passes_through_repeat_and_lookahead() {
    assert!(!zero_or_more(broken()).parse("").unwrap_err().is_recoverable());
    assert!(!optional(broken()).parse("").unwrap_err().is_recoverable());
    assert!(!next_is_not(broken()).parse("").unwrap_err().is_recoverable());
    assert!(!token(broken()).parse("  ").unwrap_err().is_recoverable());
    assert!(!separated_by(",", broken()).parse("").unwrap_err().is_recoverable());
}

#[test]
fn test_unbalanced_custom_matcher_is_reported() {
    let mut buffer = Buffer::new("x");
    assert_eq!(
        custom(Unbalanced).consume(&mut buffer),
        Err(MatchError::MarkUnderflow { offset: 1 })
    );
}

#[test]
fn test_failures_restore_position() {
    let cases = vec![
        (literal("abd"), "abc"),
        (chars_bounded("a", 3, None), "aab"),
        (literal("a") + "b" + "d", "abc"),
        (literal("x") | literal("y"), "abc"),
        (one_or_more("b"), "abc"),
        (separated_by(",", chars("a")) + "!", "a,a,"),
        (token("b"), "  a"),
        (group(literal("a") + "c"), "abc"),
    ];
    for (matcher, input) in cases {
        let mut buffer = Buffer::new(input);
        let error = matcher.consume(&mut buffer).unwrap_err();
        assert!(error.is_recoverable(), "{} on {:?}", matcher, input);
        assert_eq!(buffer.position(), 0, "{} on {:?}", matcher, input);
        assert_eq!(buffer.mark_depth(), 0, "{} on {:?}", matcher, input);
    }
}

#[test]
fn test_failure_in_middle_of_input() {
    let matcher = literal("b") + "d";
    let mut buffer = Buffer::new("abc");
    buffer.advance(1);
    let failure = matcher.consume(&mut buffer).unwrap_err();
    assert_eq!(failure.as_failure().unwrap().offset(), 2);
    assert_eq!(buffer.position(), 1);
}

#[test]
fn test_custom_matcher_inside_combinators() {
    let shared: Arc<dyn Matcher> = Arc::new(literal("ab"));
    let matcher = matcher_framework::Pattern::from(shared) + "!";
    assert_eq!(
        matcher.parse("ab!").unwrap(),
        matcher_framework::fragment!(["ab", "!"])
    );
}

#[test]
fn test_depth_limit_counts_rule_references() {
    let mut rules = RuleSet::new();
    let outer = rules.declare("outer");
    let middle = rules.declare("middle");
    let inner = rules.declare("inner");
    rules.define("outer", group(middle)).unwrap();
    rules.define("middle", group(inner)).unwrap();
    rules.define("inner", group(group(literal("a")))).unwrap();

    let mut shallow = Buffer::with_config("a", MatchConfig::default().with_max_depth(2));
    assert!(matches!(
        outer.consume(&mut shallow),
        Err(MatchError::DepthExceeded { limit: 2, .. })
    ));
    assert_eq!(shallow.depth(), 0);
    assert_eq!(shallow.position(), 0);

    let mut deep = Buffer::with_config("a", MatchConfig::default().with_max_depth(3));
    assert_eq!(outer.consume(&mut deep).unwrap(), "a");
    assert_eq!(deep.depth(), 0);
}

#[test]
fn test_nested_patterns_do_not_count_towards_depth() {
    let mut nested = literal("a");
    for _ in 0..50 {
        nested = group(nested);
    }
    let mut buffer = Buffer::with_config("a", MatchConfig::default().with_max_depth(1));
    assert_eq!(nested.consume(&mut buffer).unwrap(), "a");
}

#[test]
fn test_failed_branches_on_long_input() {
    let pattern = zero_or_more(literal("c") | literal("b") | literal("a"));
    let input = "a".repeat(50_000);
    let fragment = pattern.parse(&input).unwrap();
    assert_eq!(fragment.len(), 50_000);
}

#[test]
fn test_failure_location_on_later_line() {
    let pattern = literal("xxxxxxxxxx\n") + literal("ab") + literal("!");
    let error = pattern.parse("xxxxxxxxxx\nab?").unwrap_err();
    let failure = error.as_failure().unwrap();
    assert_eq!(failure.offset(), 13);
    assert_eq!(failure.position(), Position::at(2, 3, 13));
    assert_eq!(error.to_string(), "Expected Literal(\"!\") at 2:3");
}

#[test]
fn test_default_rollback_is_fixed() {
    let matched = Matched::fixed(Fragment::from("x"));
    assert!(Broken.rollback(&matched).is_none());
    assert_eq!(Broken.minimum_length(), 0);
    assert_eq!(Broken.maximum_length(), MaxLength::Unbounded);
    assert_eq!(Broken.describe(), "Broken");
}
