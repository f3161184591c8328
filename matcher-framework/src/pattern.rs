use crate::buffer::Buffer;
use crate::combinators::{shape, Alternative, Repeat, Select, SeparatedBy, Sequence};
use crate::error::{MatchError, MatchResult};
use crate::fragment::Fragment;
use crate::primitives::{Boundary, Char, CharRun, Literal, Lookaround, RegexMatcher};
use crate::rules::RuleRef;
use crate::traits::{Matched, Matcher, MaxLength};
use log::trace;
use std::fmt;
use std::ops::{Add, BitOr, Mul};
use std::sync::Arc;

/// Any [`Matcher`] embedded in a pattern tree.
///
/// Two shared matchers are equal only if they are the same object.
#[derive(Clone)]
pub struct SharedMatcher(pub Arc<dyn Matcher>);

impl PartialEq for SharedMatcher {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for SharedMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.0, f)
    }
}

/// The shape of a [`Pattern`] node.
#[derive(Debug, Clone, PartialEq)]
pub enum PatternKind {
    Char(Char),
    Chars(CharRun),
    Whitespace(CharRun),
    Literal(Literal),
    Regex(RegexMatcher),
    Boundary(Boundary),
    NextIs(Lookaround),
    PrevIs(Lookaround),
    Sequence(Sequence),
    Alternative(Alternative),
    Repeat(Repeat),
    SeparatedBy(SeparatedBy),
    Group(Box<Pattern>),
    Flatten(Box<Pattern>),
    Select(Select),
    Token(Box<Pattern>),
    Rule(RuleRef),
    Custom(SharedMatcher),
}

impl PatternKind {
    /// Zero-width and whitespace patterns are suppressed unless asked otherwise.
    fn suppressed_by_default(&self) -> bool {
        matches!(
            self,
            PatternKind::Whitespace(_)
                | PatternKind::Boundary(_)
                | PatternKind::NextIs(_)
                | PatternKind::PrevIs(_)
        )
    }
}

/// A node in a grammar expression tree.
///
/// Patterns are immutable once built and can be shared between any number
/// of parses. Build them with the functions in [`builders`](crate::builders)
/// and the `+`, `|` and `*` operators.
#[derive(Clone, PartialEq)]
pub struct Pattern {
    kind: Arc<PatternKind>,
    suppress: bool,
}

impl Pattern {
    pub fn new(kind: PatternKind) -> Self {
        let suppress = kind.suppressed_by_default();
        Self {
            kind: Arc::new(kind),
            suppress,
        }
    }

    pub fn kind(&self) -> &PatternKind {
        &self.kind
    }

    /// Drops this pattern's fragment from its parent's result.
    pub fn suppressed(self) -> Self {
        self.with_suppress(true)
    }

    pub fn with_suppress(mut self, suppress: bool) -> Self {
        self.suppress = suppress;
        self
    }

    /// Whether `+` may append to this pattern instead of nesting it.
    fn is_open_sequence(&self) -> bool {
        matches!(self.kind.as_ref(), PatternKind::Sequence(seq) if seq.auto && seq.separator.is_none())
            && !self.suppress
    }

    fn is_open_alternative(&self) -> bool {
        matches!(self.kind.as_ref(), PatternKind::Alternative(alt) if alt.auto) && !self.suppress
    }

    /// Children to splice into a sequence built with `+`.
    pub(crate) fn into_sequence_parts(self) -> Vec<Pattern> {
        if self.is_open_sequence() {
            if let PatternKind::Sequence(seq) = into_kind(self.kind) {
                return seq.children;
            }
            unreachable!("checked by is_open_*");
        }
        vec![self]
    }

    fn into_alternative_parts(self) -> Vec<Pattern> {
        if self.is_open_alternative() {
            if let PatternKind::Alternative(alt) = into_kind(self.kind) {
                return alt.children;
            }
            unreachable!("checked by is_open_*");
        }
        vec![self]
    }

    fn dispatch(&self, buffer: &mut Buffer) -> MatchResult<Matched> {
        let zero_width = |()| Matched::fixed(Fragment::Empty);
        match self.kind.as_ref() {
            PatternKind::Char(single) => single.consume(buffer, self),
            PatternKind::Chars(run) | PatternKind::Whitespace(run) => run.consume(buffer, self),
            PatternKind::Literal(literal) => literal.consume(buffer, self),
            PatternKind::Regex(regex) => regex.consume(buffer, self),
            PatternKind::Boundary(boundary) => boundary.consume(buffer, self).map(zero_width),
            PatternKind::NextIs(look) => look.ahead(buffer, self).map(zero_width),
            PatternKind::PrevIs(look) => look.behind(buffer, self).map(zero_width),
            PatternKind::Sequence(seq) => seq.consume(buffer, self),
            PatternKind::Alternative(alt) => alt.consume(buffer, self),
            PatternKind::Repeat(repeat) => repeat.consume(buffer, self),
            PatternKind::SeparatedBy(list) => list.consume(buffer, self),
            PatternKind::Group(inner) => shape::group(inner, buffer),
            PatternKind::Flatten(inner) => shape::flatten(inner, buffer),
            PatternKind::Select(select) => select.consume(buffer),
            PatternKind::Token(inner) => shape::token(inner, buffer),
            PatternKind::Rule(rule) => rule.consume(buffer),
            PatternKind::Custom(custom) => custom.0.consume_tracked(buffer),
        }
    }

    fn name(&self) -> &'static str {
        match self.kind.as_ref() {
            PatternKind::Char(_) => "Char",
            PatternKind::Chars(_) => "Chars",
            PatternKind::Whitespace(_) => "Whitespace",
            PatternKind::Literal(_) => "Literal",
            PatternKind::Regex(_) => "Regex",
            PatternKind::Boundary(boundary) => boundary.name(),
            PatternKind::NextIs(look) if look.negate => "NextIsNot",
            PatternKind::NextIs(_) => "NextIs",
            PatternKind::PrevIs(look) if look.negate => "PrevIsNot",
            PatternKind::PrevIs(_) => "PrevIs",
            PatternKind::Sequence(_) => "Sequence",
            PatternKind::Alternative(_) => "Any",
            PatternKind::Repeat(repeat) => repeat.name(),
            PatternKind::SeparatedBy(_) => "SeparatedBy",
            PatternKind::Group(_) => "Group",
            PatternKind::Flatten(_) => "Flatten",
            PatternKind::Select(_) => "Select",
            PatternKind::Token(_) => "Token",
            PatternKind::Rule(_) => "Rule",
            PatternKind::Custom(_) => "Custom",
        }
    }

    /// Writes the pattern as a constructor argument: sequences and
    /// alternatives built with operators lose their wrapper.
    pub(crate) fn fmt_arg(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind.as_ref() {
            PatternKind::Sequence(seq) if self.is_open_sequence() => seq.fmt_children(f),
            PatternKind::Alternative(alt) if self.is_open_alternative() => alt.fmt_children(f),
            _ => write!(f, "{}", self),
        }
    }
}

/// Takes the node out of a pattern, cloning it only if it is shared.
fn into_kind(kind: Arc<PatternKind>) -> PatternKind {
    Arc::try_unwrap(kind).unwrap_or_else(|shared| (*shared).clone())
}

/// Constructor arguments of a pattern, without the suppress flag.
struct Args<'a>(&'a Pattern);

impl fmt::Display for Args<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.kind.as_ref() {
            PatternKind::Char(single) => single.class.fmt_args(f),
            PatternKind::Chars(run) => {
                run.class.fmt_args(f)?;
                let mut comma = if run.class.is_any() { "" } else { ", " };
                if run.min != 1 {
                    write!(f, "{}min={}", comma, run.min)?;
                    comma = ", ";
                }
                if let Some(max) = run.max {
                    write!(f, "{}max={}", comma, max)?;
                }
                Ok(())
            }
            PatternKind::Whitespace(run) => {
                let mut comma = "";
                if !run.configured {
                    write!(f, "{:?}", run.class.chars())?;
                    comma = ", ";
                }
                if run.min != 0 {
                    write!(f, "{}min={}", comma, run.min)?;
                    comma = ", ";
                }
                if let Some(max) = run.max {
                    write!(f, "{}max={}", comma, max)?;
                }
                Ok(())
            }
            PatternKind::Literal(literal) => write!(f, "{:?}", literal.text()),
            PatternKind::Regex(regex) => regex.fmt_args(f),
            PatternKind::Boundary(_) => Ok(()),
            PatternKind::NextIs(look) | PatternKind::PrevIs(look) => look.inner.fmt_arg(f),
            PatternKind::Sequence(seq) => seq.fmt_children(f),
            PatternKind::Alternative(alt) => alt.fmt_children(f),
            PatternKind::Repeat(repeat) => repeat.fmt_args(f),
            PatternKind::SeparatedBy(list) => list.fmt_args(f),
            PatternKind::Group(inner) | PatternKind::Flatten(inner) | PatternKind::Token(inner) => {
                inner.fmt_arg(f)
            }
            PatternKind::Select(select) => {
                select.inner.fmt_arg(f)?;
                write!(f, ", {}", select.selection)
            }
            PatternKind::Rule(rule) => write!(f, "{:?}", rule.name()),
            PatternKind::Custom(custom) => write!(f, "{:?}", custom),
        }
    }
}

/// Renders the constructor form, listing only options that differ from
/// their defaults, e.g. `Chars("aeiou", min=2)` or `StringStart(suppress=false)`.
impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let PatternKind::Custom(custom) = self.kind.as_ref() {
            return write!(f, "{:?}", custom);
        }
        let args = Args(self).to_string();
        write!(f, "{}({}", self.name(), args)?;
        if self.suppress != self.kind.suppressed_by_default() {
            let comma = if args.is_empty() { "" } else { ", " };
            write!(f, "{}suppress={}", comma, self.suppress)?;
        }
        f.write_str(")")
    }
}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl Matcher for Pattern {
    fn consume(&self, buffer: &mut Buffer) -> MatchResult<Fragment> {
        self.consume_tracked(buffer).map(Matched::into_fragment)
    }

    fn consume_tracked(&self, buffer: &mut Buffer) -> MatchResult<Matched> {
        let result = self.dispatch(buffer);
        if let Err(MatchError::Failure(failure)) = &result {
            trace!("{} failed: {}", self, failure);
        }
        result
    }

    fn rollback(&self, matched: &Matched) -> Option<(Matched, usize)> {
        match self.kind.as_ref() {
            PatternKind::Chars(run) | PatternKind::Whitespace(run) => run.rollback(matched),
            PatternKind::Repeat(repeat) => repeat.rollback(matched),
            PatternKind::SeparatedBy(list) => list.rollback(matched),
            PatternKind::Rule(rule) => rule.rollback(matched),
            PatternKind::Custom(custom) => custom.0.rollback(matched),
            _ => None,
        }
    }

    fn minimum_length(&self) -> usize {
        match self.kind.as_ref() {
            PatternKind::Char(_) => 1,
            PatternKind::Chars(run) | PatternKind::Whitespace(run) => run.min,
            PatternKind::Literal(literal) => literal.len(),
            PatternKind::Regex(_)
            | PatternKind::Boundary(_)
            | PatternKind::NextIs(_)
            | PatternKind::PrevIs(_) => 0,
            PatternKind::Sequence(seq) => seq.minimum_length(),
            PatternKind::Alternative(alt) => alt.minimum_length(),
            PatternKind::Repeat(repeat) => repeat.minimum_length(),
            PatternKind::SeparatedBy(list) => list.minimum_length(),
            PatternKind::Group(inner) | PatternKind::Flatten(inner) | PatternKind::Token(inner) => {
                inner.minimum_length()
            }
            PatternKind::Select(select) => select.inner.minimum_length(),
            PatternKind::Rule(rule) => rule.minimum_length(),
            PatternKind::Custom(custom) => custom.0.minimum_length(),
        }
    }

    fn maximum_length(&self) -> MaxLength {
        match self.kind.as_ref() {
            PatternKind::Char(_) => MaxLength::Finite(1),
            PatternKind::Chars(run) | PatternKind::Whitespace(run) => run.maximum_length(),
            PatternKind::Literal(literal) => MaxLength::Finite(literal.len()),
            PatternKind::Boundary(_) | PatternKind::NextIs(_) | PatternKind::PrevIs(_) => {
                MaxLength::Finite(0)
            }
            PatternKind::Sequence(seq) => seq.maximum_length(),
            PatternKind::Alternative(alt) => alt.maximum_length(),
            PatternKind::Repeat(repeat) => repeat.maximum_length(),
            PatternKind::SeparatedBy(list) => list.maximum_length(),
            PatternKind::Group(inner) | PatternKind::Flatten(inner) => inner.maximum_length(),
            PatternKind::Select(select) => select.inner.maximum_length(),
            PatternKind::Custom(custom) => custom.0.maximum_length(),
            PatternKind::Regex(_) | PatternKind::Token(_) | PatternKind::Rule(_) => {
                MaxLength::Unbounded
            }
        }
    }

    fn is_suppressed(&self) -> bool {
        self.suppress
    }

    fn describe(&self) -> String {
        self.to_string()
    }
}

impl Add for Pattern {
    type Output = Pattern;

    fn add(self, rhs: Pattern) -> Pattern {
        let mut children = self.into_sequence_parts();
        children.extend(rhs.into_sequence_parts());
        Pattern::new(PatternKind::Sequence(Sequence::auto(children)))
    }
}

impl Add<&str> for Pattern {
    type Output = Pattern;

    fn add(self, rhs: &str) -> Pattern {
        self + Pattern::from(rhs)
    }
}

impl Add<Pattern> for &str {
    type Output = Pattern;

    fn add(self, rhs: Pattern) -> Pattern {
        Pattern::from(self) + rhs
    }
}

impl BitOr for Pattern {
    type Output = Pattern;

    fn bitor(self, rhs: Pattern) -> Pattern {
        let mut children = self.into_alternative_parts();
        children.extend(rhs.into_alternative_parts());
        Pattern::new(PatternKind::Alternative(Alternative::auto(children)))
    }
}

impl BitOr<&str> for Pattern {
    type Output = Pattern;

    fn bitor(self, rhs: &str) -> Pattern {
        self | Pattern::from(rhs)
    }
}

impl BitOr<Pattern> for &str {
    type Output = Pattern;

    fn bitor(self, rhs: Pattern) -> Pattern {
        Pattern::from(self) | rhs
    }
}

/// `p * n` matches `p` exactly `n` times, each match a separate result item.
impl Mul<usize> for Pattern {
    type Output = Pattern;

    fn mul(self, count: usize) -> Pattern {
        Pattern::new(PatternKind::Sequence(Sequence::auto(vec![self; count])))
    }
}

impl From<&str> for Pattern {
    fn from(text: &str) -> Self {
        Pattern::new(PatternKind::Literal(Literal::new(text)))
    }
}

impl From<String> for Pattern {
    fn from(text: String) -> Self {
        Pattern::new(PatternKind::Literal(Literal::new(text)))
    }
}

impl From<char> for Pattern {
    fn from(ch: char) -> Self {
        Pattern::new(PatternKind::Literal(Literal::new(ch.to_string())))
    }
}

impl From<Vec<Pattern>> for Pattern {
    fn from(children: Vec<Pattern>) -> Self {
        crate::builders::sequence(children)
    }
}

impl From<Arc<dyn Matcher>> for Pattern {
    fn from(matcher: Arc<dyn Matcher>) -> Self {
        Pattern::new(PatternKind::Custom(SharedMatcher(matcher)))
    }
}
