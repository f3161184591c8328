//! Combinators that reshape what their inner pattern matched.

use crate::buffer::Buffer;
use crate::error::{recover, MatchResult};
use crate::fragment::Fragment;
use crate::pattern::Pattern;
use crate::traits::{Matched, Matcher};
use std::fmt;

/// Collapses the inner fragment tree into one text span.
pub(crate) fn group(inner: &Pattern, buffer: &mut Buffer) -> MatchResult<Matched> {
    let start = buffer.position();
    let fragment = inner.consume(buffer)?;
    let text = fragment.text();
    // Reuse the input slice when nothing inside was suppressed.
    let consumed = buffer.taken_since(start);
    let grouped = if consumed.as_str() == text {
        Fragment::Text(consumed)
    } else {
        fragment.grouped()
    };
    Ok(Matched::fixed(grouped))
}

/// Flattens the inner fragment tree into a single list of leaves.
pub(crate) fn flatten(inner: &Pattern, buffer: &mut Buffer) -> MatchResult<Matched> {
    let fragment = inner.consume(buffer)?;
    Ok(Matched::fixed(Fragment::List(fragment.flatten())))
}

/// Skips whitespace on both sides of the inner match.
pub(crate) fn token(inner: &Pattern, buffer: &mut Buffer) -> MatchResult<Matched> {
    buffer.mark();
    skip_whitespace(buffer);
    match recover(inner.consume(buffer)) {
        Ok(Ok(fragment)) => {
            skip_whitespace(buffer);
            buffer.forget_mark()?;
            Ok(Matched::fixed(fragment))
        }
        Ok(Err(failure)) => {
            buffer.restore_mark()?;
            Err(failure.into())
        }
        Err(error) => {
            buffer.restore_mark()?;
            Err(error)
        }
    }
}

fn skip_whitespace(buffer: &mut Buffer) {
    while let Some(ch) = buffer.peek() {
        if !buffer.config().whitespace.contains(ch) {
            break;
        }
        buffer.advance(1);
    }
}

/// Which items of a list result to keep.
///
/// Negative indices count from the end, as in `-1` for the last item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    Index(isize),
    Range(Option<isize>, Option<isize>),
    Indices(Vec<isize>),
}

impl Selection {
    /// Applies the selection to a fragment; a non-list fragment is treated as
    /// a one-item list.
    pub fn apply(&self, fragment: Fragment) -> Fragment {
        let items = match fragment {
            Fragment::List(items) => items,
            Fragment::Empty => Vec::new(),
            leaf => vec![leaf],
        };
        let len = items.len();
        match self {
            Selection::Index(index) => resolve(*index, len)
                .and_then(|i| items.into_iter().nth(i))
                .unwrap_or(Fragment::Empty),
            Selection::Range(start, end) => {
                let from = start.map_or(0, |s| clamp(s, len));
                let to = end.map_or(len, |e| clamp(e, len));
                Fragment::List(items.into_iter().take(to).skip(from).collect())
            }
            Selection::Indices(indices) => Fragment::List(
                indices
                    .iter()
                    .filter_map(|&index| resolve(index, len))
                    .filter_map(|i| items.get(i).cloned())
                    .collect(),
            ),
        }
    }
}

/// Turns a possibly negative index into a position, if it is in range.
fn resolve(index: isize, len: usize) -> Option<usize> {
    let resolved = if index < 0 {
        len.checked_sub(index.unsigned_abs())?
    } else {
        index as usize
    };
    (resolved < len).then_some(resolved)
}

/// Turns a possibly negative range bound into a position within `0..=len`.
fn clamp(bound: isize, len: usize) -> usize {
    if bound < 0 {
        len.saturating_sub(bound.unsigned_abs())
    } else {
        (bound as usize).min(len)
    }
}

impl From<isize> for Selection {
    fn from(index: isize) -> Self {
        Selection::Index(index)
    }
}

impl From<std::ops::Range<isize>> for Selection {
    fn from(range: std::ops::Range<isize>) -> Self {
        Selection::Range(Some(range.start), Some(range.end))
    }
}

impl From<std::ops::RangeFrom<isize>> for Selection {
    fn from(range: std::ops::RangeFrom<isize>) -> Self {
        Selection::Range(Some(range.start), None)
    }
}

impl From<std::ops::RangeTo<isize>> for Selection {
    fn from(range: std::ops::RangeTo<isize>) -> Self {
        Selection::Range(None, Some(range.end))
    }
}

impl From<Vec<isize>> for Selection {
    fn from(indices: Vec<isize>) -> Self {
        Selection::Indices(indices)
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selection::Index(index) => write!(f, "{}", index),
            Selection::Range(start, end) => {
                if let Some(start) = start {
                    write!(f, "{}", start)?;
                }
                f.write_str("..")?;
                if let Some(end) = end {
                    write!(f, "{}", end)?;
                }
                Ok(())
            }
            Selection::Indices(indices) => write!(f, "{:?}", indices),
        }
    }
}

/// Runs the inner pattern and keeps only the selected items.
#[derive(Debug, Clone, PartialEq)]
pub struct Select {
    pub(crate) inner: Box<Pattern>,
    pub(crate) selection: Selection,
}

impl Select {
    pub fn new(inner: Pattern, selection: Selection) -> Self {
        Self {
            inner: Box::new(inner),
            selection,
        }
    }

    pub fn inner(&self) -> &Pattern {
        &self.inner
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub(crate) fn consume(&self, buffer: &mut Buffer) -> MatchResult<Matched> {
        let fragment = self.inner.consume(buffer)?;
        Ok(Matched::fixed(self.selection.apply(fragment)))
    }
}
