use crate::buffer::Buffer;
use crate::error::{recover, MatchResult};
use crate::fragment::Fragment;
use crate::pattern::Pattern;
use crate::traits::{Matched, Matcher, MaxLength, Unit};
use log::trace;
use std::fmt;

/// Matches its inner pattern between `min` and `max` times.
///
/// Every iteration is a rollback unit: a sequence may ask for the last one
/// back while the count stays at or above `min`.
#[derive(Debug, Clone, PartialEq)]
pub struct Repeat {
    pub(crate) inner: Box<Pattern>,
    pub(crate) min: usize,
    pub(crate) max: Option<usize>,
}

impl Repeat {
    pub fn new(inner: Pattern, min: usize, max: Option<usize>) -> Self {
        Self {
            inner: Box::new(inner),
            min,
            max,
        }
    }

    pub fn inner(&self) -> &Pattern {
        &self.inner
    }

    pub fn min(&self) -> usize {
        self.min
    }

    pub fn max(&self) -> Option<usize> {
        self.max
    }

    fn below_max(&self, count: usize) -> bool {
        self.max.map_or(true, |max| count < max)
    }

    pub(crate) fn consume(
        &self,
        buffer: &mut Buffer,
        expected: &Pattern,
    ) -> MatchResult<Matched> {
        buffer.mark();
        let mut items = Vec::new();
        let mut units = Vec::new();

        while self.below_max(units.len()) {
            let start = buffer.position();
            let matched = match recover(self.inner.consume_tracked(buffer)) {
                Ok(Ok(matched)) => matched,
                Ok(Err(_)) => break,
                Err(error) => {
                    buffer.restore_mark()?;
                    return Err(error);
                }
            };
            let len = buffer.position() - start;
            // A zero-width iteration would repeat forever; past the minimum it
            // ends the loop and adds nothing.
            if len == 0 && units.len() >= self.min {
                break;
            }
            let pushed = push_item(&mut items, &self.inner, matched.fragment);
            units.push(Unit { len, items: pushed });
        }

        if units.len() < self.min {
            buffer.restore_mark()?;
            return Err(buffer.expected(expected));
        }
        buffer.forget_mark()?;
        Ok(Matched::with_units(Fragment::List(items), units))
    }

    pub(crate) fn rollback(&self, matched: &Matched) -> Option<(Matched, usize)> {
        drop_last_unit(matched, self.min)
    }

    pub(crate) fn minimum_length(&self) -> usize {
        self.inner.minimum_length().saturating_mul(self.min)
    }

    pub(crate) fn maximum_length(&self) -> MaxLength {
        self.inner.maximum_length().times(self.max)
    }

    /// Constructor name for the bounds, e.g. `Optional` for `0..=1`.
    pub(crate) fn name(&self) -> &'static str {
        match (self.min, self.max) {
            (0, Some(1)) => "Optional",
            (0, None) => "ZeroOrMore",
            (1, None) => "OneOrMore",
            _ => "NMatches",
        }
    }

    pub(crate) fn fmt_args(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.inner.fmt_arg(f)?;
        if self.name() == "NMatches" {
            write!(f, ", min={}", self.min)?;
            if let Some(max) = self.max {
                write!(f, ", max={}", max)?;
            }
        }
        Ok(())
    }
}

/// Matches one or more elements with a separator between each pair.
///
/// Each separator and the element after it form one rollback unit. The
/// separator is normally suppressed, so only elements appear in the result.
#[derive(Debug, Clone, PartialEq)]
pub struct SeparatedBy {
    pub(crate) separator: Box<Pattern>,
    pub(crate) element: Box<Pattern>,
    pub(crate) min: usize,
    pub(crate) max: Option<usize>,
}

impl SeparatedBy {
    pub fn new(separator: Pattern, element: Pattern, min: usize, max: Option<usize>) -> Self {
        Self {
            separator: Box::new(separator),
            element: Box::new(element),
            min,
            max,
        }
    }

    pub fn separator(&self) -> &Pattern {
        &self.separator
    }

    pub fn element(&self) -> &Pattern {
        &self.element
    }

    pub(crate) fn consume(
        &self,
        buffer: &mut Buffer,
        expected: &Pattern,
    ) -> MatchResult<Matched> {
        buffer.mark();
        let mut items = Vec::new();
        let mut units = Vec::new();

        while self.max.map_or(true, |max| units.len() < max) {
            let start = buffer.position();
            let attempt = if units.is_empty() {
                self.first(buffer)
            } else {
                self.next(buffer)
            };
            let fragments = match attempt {
                Ok(Some(fragments)) => fragments,
                Ok(None) => break,
                Err(error) => {
                    buffer.restore_mark()?;
                    return Err(error);
                }
            };
            let len = buffer.position() - start;
            if len == 0 && units.len() >= self.min {
                break;
            }
            let mut pushed = 0;
            for (pattern, fragment) in fragments {
                pushed += push_item(&mut items, pattern, fragment);
            }
            units.push(Unit { len, items: pushed });
        }

        if units.len() < self.min {
            buffer.restore_mark()?;
            return Err(buffer.expected(expected));
        }
        buffer.forget_mark()?;
        Ok(Matched::with_units(Fragment::List(items), units))
    }

    fn first(&self, buffer: &mut Buffer) -> MatchResult<Option<Vec<(&Pattern, Fragment)>>> {
        Ok(recover(self.element.consume(buffer))?
            .ok()
            .map(|fragment| vec![(self.element.as_ref(), fragment)]))
    }

    /// Matches a separator and the element after it, or nothing at all.
    fn next(&self, buffer: &mut Buffer) -> MatchResult<Option<Vec<(&Pattern, Fragment)>>> {
        buffer.mark();
        let separator = match recover(self.separator.consume(buffer)) {
            Ok(Ok(fragment)) => fragment,
            Ok(Err(_)) => {
                buffer.restore_mark()?;
                return Ok(None);
            }
            Err(error) => {
                buffer.restore_mark()?;
                return Err(error);
            }
        };
        match recover(self.element.consume(buffer)) {
            Ok(Ok(element)) => {
                buffer.forget_mark()?;
                Ok(Some(vec![
                    (self.separator.as_ref(), separator),
                    (self.element.as_ref(), element),
                ]))
            }
            Ok(Err(failure)) => {
                trace!("separator matched without a following element: {}", failure);
                buffer.restore_mark()?;
                Ok(None)
            }
            Err(error) => {
                buffer.restore_mark()?;
                Err(error)
            }
        }
    }

    pub(crate) fn rollback(&self, matched: &Matched) -> Option<(Matched, usize)> {
        drop_last_unit(matched, self.min)
    }

    pub(crate) fn minimum_length(&self) -> usize {
        match self.min {
            0 => 0,
            n => {
                let element = self.element.minimum_length();
                let separator = self.separator.minimum_length();
                element * n + separator * (n - 1)
            }
        }
    }

    pub(crate) fn maximum_length(&self) -> MaxLength {
        match self.max {
            Some(0) => MaxLength::Finite(0),
            Some(n) => {
                self.element.maximum_length().times(Some(n))
                    + self.separator.maximum_length().times(Some(n - 1))
            }
            None => MaxLength::Unbounded,
        }
    }

    pub(crate) fn fmt_args(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.separator, self.element)?;
        if self.min != 1 {
            write!(f, ", min={}", self.min)?;
        }
        if let Some(max) = self.max {
            write!(f, ", max={}", max)?;
        }
        Ok(())
    }
}

/// Appends a fragment unless the pattern is suppressed or matched nothing.
/// Returns how many fragments were appended.
fn push_item(items: &mut Vec<Fragment>, pattern: &Pattern, fragment: Fragment) -> usize {
    if pattern.is_suppressed() || fragment.is_nothing() {
        0
    } else {
        items.push(fragment);
        1
    }
}

/// Gives back the last iteration of a repetition while at least `min`
/// iterations remain.
fn drop_last_unit(matched: &Matched, min: usize) -> Option<(Matched, usize)> {
    if matched.units().len() <= min {
        return None;
    }
    let (units, last) = matched.pop_unit()?;
    let mut items = matched.fragment.as_list()?.to_vec();
    items.truncate(items.len().saturating_sub(last.items));
    Some((
        Matched::with_units(Fragment::List(items), units),
        last.len,
    ))
}
