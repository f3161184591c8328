use crate::buffer::Buffer;
use crate::error::{recover, MatchResult};
use crate::pattern::Pattern;
use crate::traits::Matcher;
use log::trace;

/// A zero-width test of the text next to the cursor.
///
/// Lookahead runs the inner pattern at the cursor and always puts the
/// cursor back. Lookbehind tries the inner pattern against windows that end
/// exactly at the cursor, widening from the inner pattern's minimum length
/// until a window matches in full or no wider window is possible.
#[derive(Debug, Clone, PartialEq)]
pub struct Lookaround {
    pub(crate) inner: Box<Pattern>,
    pub(crate) negate: bool,
}

impl Lookaround {
    pub fn new(inner: Pattern, negate: bool) -> Self {
        Self {
            inner: Box::new(inner),
            negate,
        }
    }

    pub fn inner(&self) -> &Pattern {
        &self.inner
    }

    pub fn is_negated(&self) -> bool {
        self.negate
    }

    pub(crate) fn ahead(&self, buffer: &mut Buffer, expected: &Pattern) -> MatchResult<()> {
        buffer.mark();
        let outcome = recover(self.inner.consume(buffer));
        buffer.restore_mark()?;
        self.decide(buffer, outcome?.is_ok(), expected)
    }

    pub(crate) fn behind(&self, buffer: &mut Buffer, expected: &Pattern) -> MatchResult<()> {
        let found = self.matches_before(buffer)?;
        self.decide(buffer, found, expected)
    }

    fn decide(&self, buffer: &Buffer, found: bool, expected: &Pattern) -> MatchResult<()> {
        match (found, self.negate) {
            (true, false) | (false, true) => Ok(()),
            (false, false) => Err(buffer.expected(expected)),
            (true, true) => Err(buffer.unexpected(&self.inner)),
        }
    }

    fn matches_before(&self, buffer: &Buffer) -> MatchResult<bool> {
        let mut limit = buffer.position();
        if let Some(cap) = buffer.config().max_lookbehind {
            limit = limit.min(cap);
        }
        if let Some(max) = self.inner.maximum_length().finite() {
            limit = limit.min(max);
        }

        for width in self.inner.minimum_length()..=limit {
            let Some(mut window) = buffer.window_before(width) else {
                break;
            };
            if recover(self.inner.consume(&mut window))?.is_ok() && window.is_eof() {
                trace!("lookbehind matched {} symbols before {}", width, buffer.position());
                return Ok(true);
            }
        }
        Ok(false)
    }
}
