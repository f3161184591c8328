use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use matcher_framework::builders::*;
use matcher_framework::{Matcher, Pattern, RuleSet};

/// `key=value` pairs separated by `;`, where every value run has to give
/// back its last digit to the literal after it.
fn generate_pairs(count: usize) -> String {
    (0..count)
        .map(|i| format!("key{}={}9x", i, i * 37))
        .collect::<Vec<_>>()
        .join(";")
}

fn pair_pattern() -> Pattern {
    let key = group(chars("abcdefghijklmnopqrstuvwxyz") + chars("0123456789"));
    let value = chars("0123456789") + literal("9x");
    separated_by(";", key + literal("=").suppressed() + value)
}

/// `expr := term (("+" | "-") term)*`, `term := digits | "(" expr ")"`
fn expression_rules() -> RuleSet {
    let mut rules = RuleSet::new();
    let expr = rules.declare("expr");
    let term = chars("0123456789") | (literal("(") + expr + literal(")"));
    let expr_body = term.clone() + zero_or_more((literal("+") | literal("-")) + term);
    rules.define("expr", expr_body).expect("expr is defined once");
    rules
}

fn generate_expression(depth: usize) -> String {
    let mut text = String::from("1");
    for i in 0..depth {
        text = format!("({}+{})-{}", text, i, i + 1);
    }
    text
}

fn bench_backtracking(c: &mut Criterion) {
    let mut group = c.benchmark_group("backtracking");

    let size = 1_000;
    let input = generate_pairs(size);
    let pattern = pair_pattern();

    group.throughput(Throughput::Elements(size as u64));
    group.bench_function("separated_pairs_with_rollback", |b| {
        b.iter(|| {
            let result = pattern.parse(black_box(input.as_str()));
            assert!(result.is_ok());
        })
    });

    group.finish();
}

/// Every iteration tries two failing branches before the one that matches,
/// so time per symbol stays flat only if failures are cheap to build.
fn bench_failing_branches(c: &mut Criterion) {
    let mut group = c.benchmark_group("failing_branches");

    let pattern = zero_or_more(literal("c") | literal("b") | literal("a"));
    for size in [10_000, 20_000, 40_000] {
        let input = "a".repeat(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_function(format!("alternatives_{}", size), |b| {
            b.iter(|| {
                let result = pattern.parse(black_box(input.as_str()));
                assert!(result.is_ok());
            })
        });
    }

    group.finish();
}

fn bench_recursive_rules(c: &mut Criterion) {
    let mut group = c.benchmark_group("rules");

    let rules = expression_rules();
    let expr = rules.reference("expr").expect("expr is declared");
    let input = generate_expression(30);

    group.throughput(Throughput::Bytes(input.len() as u64));
    group.bench_function("nested_expression", |b| {
        b.iter(|| {
            let result = expr.parse(black_box(input.as_str()));
            assert!(result.is_ok());
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_backtracking,
    bench_failing_branches,
    bench_recursive_rules
);
criterion_main!(benches);
