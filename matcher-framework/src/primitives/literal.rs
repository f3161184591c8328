use crate::buffer::Buffer;
use crate::error::MatchResult;
use crate::fragment::Fragment;
use crate::pattern::Pattern;
use crate::traits::Matched;

/// Consumes a fixed string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Literal {
    text: String,
    len: usize,
}

impl Literal {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let len = text.chars().count();
        Self { text, len }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Length in symbols.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub(crate) fn consume(
        &self,
        buffer: &mut Buffer,
        expected: &Pattern,
    ) -> MatchResult<Matched> {
        if !buffer.rest().starts_with(self.text.as_str()) {
            return Err(buffer.expected(expected));
        }
        let start = buffer.position();
        buffer.advance(self.len);
        Ok(Matched::fixed(Fragment::Text(buffer.taken_since(start))))
    }
}
