use crate::buffer::Buffer;
use crate::config::DEFAULT_WHITESPACE;
use crate::error::MatchResult;
use crate::fragment::Fragment;
use crate::pattern::Pattern;
use crate::primitives::charset::CharClass;
use crate::traits::{Matched, MaxLength, Unit};

/// Greedily consumes a run of symbols from a [`CharClass`].
///
/// The run holds between `min` and `max` symbols. Each symbol is a
/// rollback unit, so a sequence can ask the run to give symbols back one at a
/// time while it stays at or above `min`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharRun {
    pub(crate) class: CharClass,
    pub(crate) min: usize,
    pub(crate) max: Option<usize>,
    /// Reads its symbols from [`MatchConfig::whitespace`](crate::MatchConfig)
    /// at match time instead of from `class`.
    pub(crate) configured: bool,
}

impl CharRun {
    pub fn new(class: CharClass, min: usize, max: Option<usize>) -> Self {
        Self {
            class,
            min,
            max,
            configured: false,
        }
    }

    /// A run of whatever the buffer's configuration treats as whitespace.
    pub fn configured_whitespace(min: usize, max: Option<usize>) -> Self {
        Self {
            class: CharClass::of(DEFAULT_WHITESPACE),
            min,
            max,
            configured: true,
        }
    }

    pub fn class(&self) -> &CharClass {
        &self.class
    }

    pub fn min(&self) -> usize {
        self.min
    }

    pub fn max(&self) -> Option<usize> {
        self.max
    }

    pub fn is_configured(&self) -> bool {
        self.configured
    }

    pub(crate) fn consume(
        &self,
        buffer: &mut Buffer,
        expected: &Pattern,
    ) -> MatchResult<Matched> {
        let config = buffer.shared_config();
        let accepts = |ch: char| {
            if self.configured {
                config.whitespace.contains(ch)
            } else {
                self.class.accepts(ch)
            }
        };
        buffer.mark();
        let start = buffer.position();
        let mut count = 0;
        while self.max.map_or(true, |max| count < max) {
            match buffer.peek() {
                Some(ch) if accepts(ch) => {
                    buffer.advance(1);
                    count += 1;
                }
                _ => break,
            }
        }

        if count < self.min {
            buffer.restore_mark()?;
            return Err(buffer.expected(expected));
        }
        buffer.forget_mark()?;

        let units = vec![Unit { len: 1, items: 1 }; count];
        Ok(Matched::with_units(
            Fragment::Text(buffer.taken_since(start)),
            units,
        ))
    }

    /// Drops the last symbol of the run if that keeps it at or above `min`.
    pub(crate) fn rollback(&self, matched: &Matched) -> Option<(Matched, usize)> {
        if matched.units().len() <= self.min {
            return None;
        }
        let (units, given_back) = matched.pop_unit()?;
        let text = match &matched.fragment {
            Fragment::Text(slice) => slice.without_last_char()?,
            _ => return None,
        };
        Some((Matched::with_units(Fragment::Text(text), units), given_back.len))
    }

    pub(crate) fn maximum_length(&self) -> MaxLength {
        self.max.map_or(MaxLength::Unbounded, MaxLength::Finite)
    }
}
