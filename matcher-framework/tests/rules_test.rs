use matcher_framework::builders::*;
use matcher_framework::{fragment, Buffer, MatchConfig, MatchError, Matcher, PatternError, RuleSet};

/// Deep recursion needs more stack than a test thread gets by default.
fn with_large_stack(test: impl FnOnce() + Send + 'static) {
    std::thread::Builder::new()
        .stack_size(64 * 1024 * 1024)
        .spawn(test)
        .unwrap()
        .join()
        .unwrap();
}

/// `list := "(" item* ")"`, `item := letter | list`
fn nested_lists() -> RuleSet {
    let mut rules = RuleSet::new();
    let list = rules.declare("list");
    let item = char_of("abc") | list;
    rules
        .define("list", literal("(") + zero_or_more(item) + literal(")"))
        .unwrap();
    rules.resolve().unwrap();
    rules
}

#[test]
fn test_recursive_rule() {
    let rules = nested_lists();
    let list = rules.reference("list").unwrap();
    assert_eq!(list.parse("()").unwrap(), fragment!(["(", [], ")"]));
    assert_eq!(
        list.parse("(a(b)c)").unwrap(),
        fragment!(["(", ["a", ["(", ["b"], ")"], "c"], ")"])
    );
    assert!(list.parse("(a").is_err());
}

#[test]
fn test_rule_used_before_definition() {
    let mut rules = RuleSet::new();
    let digit = rules.declare("digit");
    let pair = digit.clone() + "," + digit;
    rules.define("digit", char_of("0123456789")).unwrap();
    rules.resolve().unwrap();
    assert_eq!(pair.parse("1,2").unwrap(), fragment!(["1", ",", "2"]));
}

#[test]
fn test_undefined_rule_reported_on_resolve() {
    let mut rules = RuleSet::new();
    rules.declare("expr");
    rules.declare("term");
    rules.define("term", literal("x")).unwrap();
    match rules.resolve() {
        Err(PatternError::UndefinedRules(names)) => assert_eq!(names, vec!["expr".to_string()]),
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn test_consuming_undefined_rule_is_engine_error() {
    let mut rules = RuleSet::new();
    let expr = rules.declare("expr");
    let error = expr.parse("x").unwrap_err();
    assert_eq!(
        error,
        MatchError::UnresolvedRule {
            name: "expr".to_string()
        }
    );
    assert!(!error.is_recoverable());

    // Alternatives do not swallow it.
    let either = expr | literal("x");
    assert!(matches!(
        either.parse("x"),
        Err(MatchError::UnresolvedRule { .. })
    ));
}

#[test]
fn test_dropped_rule_set_unresolves_references() {
    let list = nested_lists().reference("list").unwrap();
    assert!(matches!(
        list.parse("()"),
        Err(MatchError::UnresolvedRule { .. })
    ));
}

#[test]
fn test_duplicate_and_unknown_rules() {
    let mut rules = RuleSet::new();
    rules.define("a", literal("a")).unwrap();
    assert!(matches!(
        rules.define("a", literal("b")),
        Err(PatternError::DuplicateRule(name)) if name == "a"
    ));
    assert!(matches!(
        rules.reference("missing"),
        Err(PatternError::UnknownRule(name)) if name == "missing"
    ));
}

#[test]
fn test_rule_set_lookup() {
    let rules = nested_lists();
    assert!(rules.contains("list"));
    assert_eq!(rules.len(), 1);
    assert_eq!(rules.names().collect::<Vec<_>>(), vec!["list"]);
    assert!(rules.get("list").is_some());
    assert!(rules.get("item").is_none());
}

#[test]
fn test_rule_rollback_delegates() {
    let mut rules = RuleSet::new();
    let digits = rules.declare("digits");
    rules.define("digits", chars("0123456789")).unwrap();
    let matcher = digits + literal("9x");
    assert_eq!(matcher.parse("1239x").unwrap(), fragment!(["123", "9x"]));
}

#[test]
fn test_left_recursion_hits_depth_limit() {
    let mut rules = RuleSet::new();
    let expr = rules.declare("expr");
    rules
        .define("expr", (expr.clone() + "+" + "x") | literal("x"))
        .unwrap();

    let mut buffer = Buffer::with_config("x+x", MatchConfig::default().with_max_depth(50));
    let error = expr.consume(&mut buffer).unwrap_err();
    assert!(matches!(error, MatchError::DepthExceeded { limit: 50, .. }));
    assert_eq!(buffer.position(), 0);
    assert_eq!(buffer.mark_depth(), 0);
    assert_eq!(buffer.depth(), 0);
}

#[test]
fn test_right_recursion_over_long_input() {
    with_large_stack(|| {
        let mut rules = RuleSet::new();
        let list = rules.declare("list");
        rules
            .define("list", literal("a") + optional(list.clone()))
            .unwrap();

        let input = "a".repeat(300);
        assert_eq!(list.parse(&input).unwrap().text(), input);

        let config = MatchConfig::default().with_max_depth(299);
        let mut buffer = Buffer::with_config(input.as_str(), config);
        assert!(matches!(
            list.consume(&mut buffer),
            Err(MatchError::DepthExceeded { limit: 299, .. })
        ));
        assert_eq!(buffer.depth(), 0);
    });
}
