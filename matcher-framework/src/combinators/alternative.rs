use crate::buffer::Buffer;
use crate::error::{recover, MatchResult};
use crate::pattern::Pattern;
use crate::traits::{Matched, Matcher, MaxLength};
use std::fmt;

/// Ordered choice: the first child that matches wins.
///
/// Children are tried in the order given, not by match length, so `"**"`
/// must come before `"*"` for the longer operator to ever match.
#[derive(Debug, Clone)]
pub struct Alternative {
    pub(crate) children: Vec<Pattern>,
    pub(crate) auto: bool,
}

impl Alternative {
    pub fn new(children: Vec<Pattern>) -> Self {
        Self {
            children,
            auto: false,
        }
    }

    pub(crate) fn auto(children: Vec<Pattern>) -> Self {
        Self {
            children,
            auto: true,
        }
    }

    pub fn children(&self) -> &[Pattern] {
        &self.children
    }

    pub fn is_auto(&self) -> bool {
        self.auto
    }

    pub(crate) fn consume(
        &self,
        buffer: &mut Buffer,
        expected: &Pattern,
    ) -> MatchResult<Matched> {
        buffer.mark();
        for child in &self.children {
            match recover(child.consume_tracked(buffer)) {
                Ok(Ok(matched)) => {
                    buffer.forget_mark()?;
                    return Ok(Matched::fixed(matched.fragment));
                }
                Ok(Err(_)) => {
                    buffer.restore_mark()?;
                    buffer.mark();
                }
                Err(error) => {
                    buffer.restore_mark()?;
                    return Err(error);
                }
            }
        }
        buffer.restore_mark()?;
        Err(buffer.expected(expected))
    }

    pub(crate) fn minimum_length(&self) -> usize {
        self.children
            .iter()
            .map(Matcher::minimum_length)
            .min()
            .unwrap_or(0)
    }

    pub(crate) fn maximum_length(&self) -> MaxLength {
        self.children
            .iter()
            .map(Matcher::maximum_length)
            .max()
            .unwrap_or(MaxLength::Finite(0))
    }

    pub(crate) fn fmt_children(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joiner = if self.auto { " | " } else { ", " };
        for (i, child) in self.children.iter().enumerate() {
            if i > 0 {
                f.write_str(joiner)?;
            }
            write!(f, "{}", child)?;
        }
        Ok(())
    }
}

impl PartialEq for Alternative {
    fn eq(&self, other: &Self) -> bool {
        self.children == other.children
    }
}
