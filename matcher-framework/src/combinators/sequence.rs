use crate::buffer::Buffer;
use crate::error::{recover, MatchResult};
use crate::fragment::Fragment;
use crate::pattern::Pattern;
use crate::traits::{Matched, Matcher, MaxLength};
use log::trace;
use std::fmt;

/// Matches its children in order, optionally with a separator between them.
///
/// When a child fails, the sequence walks back over the steps that already
/// matched and asks each one to give back its last unit. The first step that
/// can shrink becomes the new resume point; everything after it is matched
/// again from the shortened position.
#[derive(Debug, Clone)]
pub struct Sequence {
    pub(crate) children: Vec<Pattern>,
    pub(crate) separator: Option<Box<Pattern>>,
    /// Built by `+`; later `+` calls append to it.
    pub(crate) auto: bool,
}

/// One matched step on the rollback stack.
struct Step {
    index: usize,
    start: usize,
    matched: Matched,
}

impl Sequence {
    pub fn new(children: Vec<Pattern>) -> Self {
        Self {
            children,
            separator: None,
            auto: false,
        }
    }

    pub fn with_separator(children: Vec<Pattern>, separator: Pattern) -> Self {
        Self {
            children,
            separator: Some(Box::new(separator)),
            auto: false,
        }
    }

    pub(crate) fn auto(children: Vec<Pattern>) -> Self {
        Self {
            children,
            separator: None,
            auto: true,
        }
    }

    pub fn children(&self) -> &[Pattern] {
        &self.children
    }

    pub fn separator(&self) -> Option<&Pattern> {
        self.separator.as_deref()
    }

    pub fn is_auto(&self) -> bool {
        self.auto
    }

    /// Number of steps: children interleaved with separators.
    fn step_count(&self) -> usize {
        match (&self.separator, self.children.len()) {
            (_, 0) => 0,
            (Some(_), n) => 2 * n - 1,
            (None, n) => n,
        }
    }

    fn step(&self, index: usize) -> &Pattern {
        match &self.separator {
            Some(separator) if index % 2 == 1 => separator,
            Some(_) => &self.children[index / 2],
            None => &self.children[index],
        }
    }

    pub(crate) fn consume(
        &self,
        buffer: &mut Buffer,
        expected: &Pattern,
    ) -> MatchResult<Matched> {
        buffer.mark();
        let mut stack: Vec<Step> = Vec::with_capacity(self.step_count());
        let mut index = 0;

        while index < self.step_count() {
            let pattern = self.step(index);
            let start = buffer.position();
            match recover(pattern.consume_tracked(buffer)) {
                Ok(Ok(matched)) => {
                    stack.push(Step {
                        index,
                        start,
                        matched,
                    });
                    index += 1;
                }
                Ok(Err(failure)) => match self.roll_back(buffer, &mut stack) {
                    Some(resume) => index = resume,
                    None => {
                        trace!("{} failed at step {}: {}", expected, index, failure);
                        buffer.restore_mark()?;
                        return Err(failure.into());
                    }
                },
                Err(error) => {
                    buffer.restore_mark()?;
                    return Err(error);
                }
            }
        }

        buffer.forget_mark()?;
        let items = stack
            .into_iter()
            .filter(|step| !self.step(step.index).is_suppressed())
            .map(|step| step.matched.fragment)
            .filter(|fragment| !fragment.is_nothing())
            .collect();
        Ok(Matched::fixed(Fragment::List(items)))
    }

    /// Pops the stack until some step gives back a unit, returning the step
    /// to resume at. The cursor follows every pop.
    fn roll_back(&self, buffer: &mut Buffer, stack: &mut Vec<Step>) -> Option<usize> {
        while let Some(step) = stack.pop() {
            let pattern = self.step(step.index);
            if let Some((shrunk, given_back)) = pattern.rollback(&step.matched) {
                buffer.retreat(given_back);
                trace!(
                    "rolled back {} by {} symbols to {}",
                    pattern,
                    given_back,
                    buffer.position()
                );
                let resume = step.index + 1;
                stack.push(Step {
                    matched: shrunk,
                    ..step
                });
                return Some(resume);
            }
            let consumed = buffer.position().saturating_sub(step.start);
            buffer.retreat(consumed);
        }
        None
    }

    pub(crate) fn minimum_length(&self) -> usize {
        (0..self.step_count())
            .map(|index| self.step(index).minimum_length())
            .sum()
    }

    pub(crate) fn maximum_length(&self) -> MaxLength {
        (0..self.step_count())
            .map(|index| self.step(index).maximum_length())
            .fold(MaxLength::Finite(0), |total, max| total + max)
    }

    /// Writes the children, as `A + B` for sequences built with `+` or as
    /// `A, B` otherwise.
    pub(crate) fn fmt_children(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joiner = if self.auto { " + " } else { ", " };
        for (i, child) in self.children.iter().enumerate() {
            if i > 0 {
                f.write_str(joiner)?;
            }
            write!(f, "{}", child)?;
        }
        if let Some(separator) = &self.separator {
            write!(f, ", sep={}", separator)?;
        }
        Ok(())
    }
}

/// Sequences built with `+` compare equal to explicit ones with the same
/// children.
impl PartialEq for Sequence {
    fn eq(&self, other: &Self) -> bool {
        self.children == other.children && self.separator == other.separator
    }
}
