//! Functions that build [`Pattern`] trees.
//!
//! Arguments that take a pattern also accept anything convertible into one,
//! so `"x"` can stand in for `literal("x")`.

use crate::combinators::{Alternative, Repeat, Select, Selection, SeparatedBy, Sequence};
use crate::error::PatternError;
use crate::pattern::{Pattern, PatternKind, SharedMatcher};
use crate::primitives::{Boundary, Char, CharClass, CharRun, Literal, Lookaround, RegexMatcher, RegexOptions};
use crate::traits::Matcher;
use std::sync::Arc;

/// One symbol from `chars`.
pub fn char_of(chars: &str) -> Pattern {
    Pattern::new(PatternKind::Char(Char::new(CharClass::of(chars))))
}

/// One symbol not in `chars`.
pub fn char_not_of(chars: &str) -> Pattern {
    Pattern::new(PatternKind::Char(Char::new(CharClass::not_of(chars))))
}

/// Any single symbol.
pub fn any_char() -> Pattern {
    Pattern::new(PatternKind::Char(Char::new(CharClass::any())))
}

pub fn literal(text: &str) -> Pattern {
    Pattern::new(PatternKind::Literal(Literal::new(text)))
}

/// One or more symbols from `chars`, as many as possible.
pub fn chars(chars: &str) -> Pattern {
    char_run(CharClass::of(chars), 1, None)
}

/// One or more symbols not in `chars`, as many as possible.
pub fn chars_not(chars: &str) -> Pattern {
    char_run(CharClass::not_of(chars), 1, None)
}

/// Between `min` and `max` symbols from `chars`.
pub fn chars_bounded(chars: &str, min: usize, max: Option<usize>) -> Pattern {
    char_run(CharClass::of(chars), min, max)
}

pub fn char_run(class: CharClass, min: usize, max: Option<usize>) -> Pattern {
    Pattern::new(PatternKind::Chars(CharRun::new(class, min, max)))
}

/// Optional run of whitespace. Suppressed by default.
///
/// The symbols come from [`MatchConfig::whitespace`](crate::MatchConfig) of
/// the buffer being matched, spaces, tabs and newlines unless configured.
pub fn whitespace() -> Pattern {
    Pattern::new(PatternKind::Whitespace(CharRun::configured_whitespace(0, None)))
}

/// Optional run of the given whitespace symbols. Suppressed by default.
pub fn whitespace_of(chars: &str) -> Pattern {
    whitespace_bounded(chars, 0, None)
}

pub fn whitespace_bounded(chars: &str, min: usize, max: Option<usize>) -> Pattern {
    Pattern::new(PatternKind::Whitespace(CharRun::new(
        CharClass::of(chars),
        min,
        max,
    )))
}

/// A regular expression anchored at the cursor.
pub fn regex(source: &str) -> Result<Pattern, PatternError> {
    regex_with(source, RegexOptions::default())
}

pub fn regex_with(source: &str, options: RegexOptions) -> Result<Pattern, PatternError> {
    let matcher = RegexMatcher::new(source, options)?;
    Ok(Pattern::new(PatternKind::Regex(matcher)))
}

pub fn string_start() -> Pattern {
    Pattern::new(PatternKind::Boundary(Boundary::StringStart))
}

pub fn string_end() -> Pattern {
    Pattern::new(PatternKind::Boundary(Boundary::StringEnd))
}

pub fn line_start() -> Pattern {
    Pattern::new(PatternKind::Boundary(Boundary::LineStart))
}

pub fn line_end() -> Pattern {
    Pattern::new(PatternKind::Boundary(Boundary::LineEnd))
}

pub fn word_start() -> Pattern {
    Pattern::new(PatternKind::Boundary(Boundary::WordStart))
}

pub fn word_end() -> Pattern {
    Pattern::new(PatternKind::Boundary(Boundary::WordEnd))
}

/// Succeeds, consuming nothing, if `pattern` matches at the cursor.
pub fn next_is(pattern: impl Into<Pattern>) -> Pattern {
    Pattern::new(PatternKind::NextIs(Lookaround::new(pattern.into(), false)))
}

/// Succeeds, consuming nothing, if `pattern` does not match at the cursor.
pub fn next_is_not(pattern: impl Into<Pattern>) -> Pattern {
    Pattern::new(PatternKind::NextIs(Lookaround::new(pattern.into(), true)))
}

/// Succeeds, consuming nothing, if the text just before the cursor matches
/// `pattern` exactly.
pub fn prev_is(pattern: impl Into<Pattern>) -> Pattern {
    Pattern::new(PatternKind::PrevIs(Lookaround::new(pattern.into(), false)))
}

pub fn prev_is_not(pattern: impl Into<Pattern>) -> Pattern {
    Pattern::new(PatternKind::PrevIs(Lookaround::new(pattern.into(), true)))
}

/// An explicit sequence.
///
/// Unlike one built with `+`, later `+` calls nest it instead of appending
/// to it. A single operator-built sequence argument is adopted as-is.
pub fn sequence(children: Vec<Pattern>) -> Pattern {
    let children = match <[Pattern; 1]>::try_from(children) {
        Ok([only]) => only.into_sequence_parts(),
        Err(children) => children,
    };
    Pattern::new(PatternKind::Sequence(Sequence::new(children)))
}

/// A sequence with `separator` matched between each pair of children.
pub fn sequence_sep(children: Vec<Pattern>, separator: impl Into<Pattern>) -> Pattern {
    Pattern::new(PatternKind::Sequence(Sequence::with_separator(
        children,
        separator.into(),
    )))
}

/// Ordered choice over `children`.
pub fn any_of(children: Vec<Pattern>) -> Pattern {
    Pattern::new(PatternKind::Alternative(Alternative::new(children)))
}

/// Between `min` and `max` matches of `pattern`.
pub fn n_matches(pattern: impl Into<Pattern>, min: usize, max: Option<usize>) -> Pattern {
    Pattern::new(PatternKind::Repeat(Repeat::new(pattern.into(), min, max)))
}

pub fn optional(pattern: impl Into<Pattern>) -> Pattern {
    n_matches(pattern, 0, Some(1))
}

pub fn zero_or_more(pattern: impl Into<Pattern>) -> Pattern {
    n_matches(pattern, 0, None)
}

pub fn one_or_more(pattern: impl Into<Pattern>) -> Pattern {
    n_matches(pattern, 1, None)
}

pub fn exactly(pattern: impl Into<Pattern>, count: usize) -> Pattern {
    n_matches(pattern, count, Some(count))
}

/// One or more `element`s with a suppressed `separator` between them.
pub fn separated_by(separator: impl Into<Pattern>, element: impl Into<Pattern>) -> Pattern {
    separated_by_bounded(separator, element, 1, None)
}

pub fn separated_by_bounded(
    separator: impl Into<Pattern>,
    element: impl Into<Pattern>,
    min: usize,
    max: Option<usize>,
) -> Pattern {
    Pattern::new(PatternKind::SeparatedBy(SeparatedBy::new(
        separator.into().suppressed(),
        element.into(),
        min,
        max,
    )))
}

/// Collapses everything `pattern` matched into one text fragment.
pub fn group(pattern: impl Into<Pattern>) -> Pattern {
    Pattern::new(PatternKind::Group(Box::new(pattern.into())))
}

/// Flattens nested results of `pattern` into a single list.
pub fn flatten(pattern: impl Into<Pattern>) -> Pattern {
    Pattern::new(PatternKind::Flatten(Box::new(pattern.into())))
}

/// Keeps only the selected items of `pattern`'s result.
pub fn select(pattern: impl Into<Pattern>, selection: impl Into<Selection>) -> Pattern {
    Pattern::new(PatternKind::Select(Select::new(
        pattern.into(),
        selection.into(),
    )))
}

/// Matches `pattern` with surrounding whitespace skipped.
pub fn token(pattern: impl Into<Pattern>) -> Pattern {
    Pattern::new(PatternKind::Token(Box::new(pattern.into())))
}

/// Embeds any matcher in a pattern tree.
pub fn custom(matcher: impl Matcher + 'static) -> Pattern {
    Pattern::new(PatternKind::Custom(SharedMatcher(Arc::new(matcher))))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_adopts_operator_sequence() {
        let adopted = sequence(vec![chars("ab") + chars("cd")]);
        assert_eq!(adopted, sequence(vec![chars("ab"), chars("cd")]));
        assert_eq!(adopted.to_string(), "Sequence(Chars(\"ab\"), Chars(\"cd\"))");
    }

    #[test]
    fn test_explicit_sequence_is_not_spliced() {
        let nested = sequence(vec![chars("ab")]) + chars("cd");
        match nested.kind() {
            PatternKind::Sequence(seq) => assert_eq!(seq.children().len(), 2),
            other => panic!("unexpected {:?}", other),
        }
    }
}
