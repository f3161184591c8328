use crate::buffer::Buffer;
use crate::error::MatchResult;
use crate::fragment::Fragment;
use log::debug;
use std::fmt;
use std::ops::Add;

/// Upper bound on how many symbols a matcher can consume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MaxLength {
    Finite(usize),
    Unbounded,
}

impl MaxLength {
    pub fn is_unbounded(self) -> bool {
        matches!(self, MaxLength::Unbounded)
    }

    pub fn finite(self) -> Option<usize> {
        match self {
            MaxLength::Finite(n) => Some(n),
            MaxLength::Unbounded => None,
        }
    }

    /// Multiplies the bound by a repeat count; `None` means "no ceiling".
    pub fn times(self, count: Option<usize>) -> MaxLength {
        match (self, count) {
            (MaxLength::Finite(n), Some(count)) => MaxLength::Finite(n.saturating_mul(count)),
            (MaxLength::Finite(0), None) => MaxLength::Finite(0),
            _ => MaxLength::Unbounded,
        }
    }
}

impl Add for MaxLength {
    type Output = MaxLength;

    fn add(self, other: MaxLength) -> MaxLength {
        match (self, other) {
            (MaxLength::Finite(a), MaxLength::Finite(b)) => MaxLength::Finite(a.saturating_add(b)),
            _ => MaxLength::Unbounded,
        }
    }
}

impl PartialEq<usize> for MaxLength {
    fn eq(&self, other: &usize) -> bool {
        *self == MaxLength::Finite(*other)
    }
}

impl fmt::Display for MaxLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MaxLength::Finite(n) => write!(f, "{}", n),
            MaxLength::Unbounded => f.write_str("Infinity"),
        }
    }
}

/// One repeatable unit of a shrinkable match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Unit {
    /// Symbols the unit consumed.
    pub len: usize,
    /// Fragments the unit appended to the match's list.
    pub items: usize,
}

/// A successful match together with what is needed to shrink it later.
///
/// `units` is empty for matches that cannot give anything back.
#[derive(Debug, Clone, PartialEq)]
pub struct Matched {
    pub fragment: Fragment,
    units: Vec<Unit>,
}

impl Matched {
    /// A match that cannot be shrunk.
    pub fn fixed(fragment: Fragment) -> Self {
        Self {
            fragment,
            units: Vec::new(),
        }
    }

    /// A match made of repeatable units, oldest first.
    pub fn with_units(fragment: Fragment, units: Vec<Unit>) -> Self {
        Self { fragment, units }
    }

    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    pub fn into_fragment(self) -> Fragment {
        self.fragment
    }

    /// Splits off the last unit, returning the shortened unit list and the
    /// unit that was given back.
    pub(crate) fn pop_unit(&self) -> Option<(Vec<Unit>, Unit)> {
        let (last, rest) = self.units.split_last()?;
        Some((rest.to_vec(), *last))
    }
}

/// Anything that can consume input from a [`Buffer`].
///
/// Primitive patterns, combinators, rule references and named grammars all
/// implement this, so any of them can appear inside any combinator.
///
/// A failed consume must leave the buffer position exactly where it was.
pub trait Matcher: fmt::Debug + Send + Sync {
    /// Matches at the cursor, advancing past what was consumed.
    fn consume(&self, buffer: &mut Buffer) -> MatchResult<Fragment>;

    /// Like [`consume`](Matcher::consume), but also records the units a later
    /// [`rollback`](Matcher::rollback) may give back.
    ///
    /// The default records nothing, making the match non-shrinkable.
    fn consume_tracked(&self, buffer: &mut Buffer) -> MatchResult<Matched> {
        self.consume(buffer).map(Matched::fixed)
    }

    /// Gives back the last unit of a previous match.
    ///
    /// Returns the shortened match and how many symbols were given back, or
    /// `None` if the match cannot shrink without dropping below its minimum.
    /// The caller is responsible for moving the cursor back.
    fn rollback(&self, matched: &Matched) -> Option<(Matched, usize)> {
        let _ = matched;
        None
    }

    /// Fewest symbols a successful match consumes.
    fn minimum_length(&self) -> usize {
        0
    }

    /// Most symbols a successful match consumes.
    fn maximum_length(&self) -> MaxLength {
        MaxLength::Unbounded
    }

    /// Whether the parent should drop this matcher's fragment.
    fn is_suppressed(&self) -> bool {
        false
    }

    /// Human-readable form used in failure messages.
    fn describe(&self) -> String {
        format!("{:?}", self)
    }

    /// Matches against a fresh buffer over `input`.
    fn parse(&self, input: &str) -> MatchResult<Fragment> {
        debug!("parsing {:?} with {}", input, self.describe());
        let mut buffer = Buffer::new(input);
        let result = self.consume(&mut buffer);
        debug!("consumed {} of {} symbols", buffer.position(), buffer.len());
        result
    }

    /// Reports whether the matcher would match at the cursor, leaving the
    /// cursor where it was either way.
    fn test(&self, buffer: &mut Buffer) -> bool {
        buffer.mark();
        let matched = self.consume(buffer).is_ok();
        buffer.restore_mark().is_ok() && matched
    }

    /// Reports whether the matcher matches at the start of `input`.
    fn test_str(&self, input: &str) -> bool {
        self.test(&mut Buffer::new(input))
    }
}
