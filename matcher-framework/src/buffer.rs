use crate::config::MatchConfig;
use crate::error::{MatchError, MatchResult, ParseFailure};
use crate::pattern::Pattern;
use common_framework::{Position, TextSlice};
use std::borrow::Cow;
use std::fmt;
use std::ops::{Bound, RangeBounds};
use std::sync::Arc;

/// A cursor over an immutable input with a stack of saved positions.
///
/// Positions count symbols (characters), not bytes. Patterns move the cursor
/// with [`advance`](Buffer::advance) / [`retreat`](Buffer::retreat) and bracket
/// their work with [`mark`](Buffer::mark) followed by exactly one of
/// [`restore_mark`](Buffer::restore_mark) or [`forget_mark`](Buffer::forget_mark).
#[derive(Clone)]
pub struct Buffer {
    text: Arc<str>,
    /// Byte offset of every symbol, plus one trailing entry for the end.
    offsets: Arc<[usize]>,
    position: usize,
    marks: Vec<usize>,
    depth: usize,
    config: Arc<MatchConfig>,
}

impl Buffer {
    /// Creates a new buffer from the input string.
    pub fn new<S: Into<String>>(input: S) -> Self {
        Self::with_config(input, MatchConfig::default())
    }

    /// Creates a buffer that matches under the given configuration.
    pub fn with_config<S: Into<String>>(input: S, config: MatchConfig) -> Self {
        let owned = input.into();
        Self::from_parts(Arc::from(owned), Arc::new(config))
    }

    /// Creates a buffer from an existing shared text.
    pub fn with_arc(text: Arc<str>) -> Self {
        Self::from_parts(text, Arc::new(MatchConfig::default()))
    }

    fn from_parts(text: Arc<str>, config: Arc<MatchConfig>) -> Self {
        let offsets: Arc<[usize]> = text
            .char_indices()
            .map(|(i, _)| i)
            .chain(std::iter::once(text.len()))
            .collect();
        Self {
            text,
            offsets,
            position: 0,
            marks: Vec::new(),
            depth: 0,
            config,
        }
    }

    /// Returns the number of symbols in the whole input.
    pub fn len(&self) -> usize {
        self.offsets.len() - 1
    }

    /// Returns true if the input has no symbols.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the current symbol offset.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Returns true if the cursor is at the end of the input.
    pub fn is_eof(&self) -> bool {
        self.position >= self.len()
    }

    /// Returns the number of symbols left after the cursor.
    pub fn remaining(&self) -> usize {
        self.len().saturating_sub(self.position)
    }

    /// Returns the whole input.
    pub fn input(&self) -> &str {
        &self.text
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    pub(crate) fn shared_config(&self) -> Arc<MatchConfig> {
        Arc::clone(&self.config)
    }

    /// Returns the symbol `index` places after the cursor.
    ///
    /// Reading past the end fails with an "unexpected end of input" failure,
    /// which primitives treat as "no more symbols to try".
    pub fn get(&self, index: usize) -> MatchResult<char> {
        self.symbol(self.position + index)
            .ok_or_else(|| self.failure("Unexpected end of input"))
    }

    /// Returns the next symbol without advancing the cursor.
    pub fn peek(&self) -> Option<char> {
        self.symbol(self.position)
    }

    /// Returns the symbol just before the cursor.
    pub fn prev(&self) -> Option<char> {
        self.position.checked_sub(1).and_then(|i| self.symbol(i))
    }

    fn symbol(&self, index: usize) -> Option<char> {
        if index >= self.len() {
            return None;
        }
        self.text[self.offsets[index]..].chars().next()
    }

    /// Moves the cursor forward by `n` symbols.
    ///
    /// Callers only advance over symbols they have already examined.
    pub fn advance(&mut self, n: usize) {
        debug_assert!(self.position + n <= self.len(), "advance past end of input");
        self.position = (self.position + n).min(self.len());
    }

    /// Moves the cursor back by `n` symbols.
    pub fn retreat(&mut self, n: usize) {
        debug_assert!(n <= self.position, "retreat before start of input");
        self.position = self.position.saturating_sub(n);
    }

    /// Returns the unconsumed text after the cursor.
    pub fn rest(&self) -> &str {
        &self.text[self.offsets[self.position]..]
    }

    /// Returns the text between two absolute symbol offsets as a shared slice.
    pub fn text(&self, start: usize, end: usize) -> TextSlice {
        let end = end.min(self.len());
        let start = start.min(end);
        TextSlice::new(
            Arc::clone(&self.text),
            self.offsets[start],
            self.offsets[end],
        )
    }

    /// Returns the text consumed since the absolute offset `start`.
    pub fn taken_since(&self, start: usize) -> TextSlice {
        self.text(start, self.position)
    }

    /// Returns a fresh buffer over a range of symbols relative to the cursor.
    ///
    /// `..` covers the rest of the input and `..n` the next `n` symbols. The
    /// new buffer starts at position 0 with an empty mark stack and shares the
    /// configuration of this one.
    pub fn slice<R: RangeBounds<usize>>(&self, range: R) -> Buffer {
        let start = match range.start_bound() {
            Bound::Included(&s) => self.position.saturating_add(s),
            Bound::Excluded(&s) => self.position.saturating_add(s).saturating_add(1),
            Bound::Unbounded => self.position,
        };
        let end = match range.end_bound() {
            Bound::Included(&e) => self.position.saturating_add(e).saturating_add(1),
            Bound::Excluded(&e) => self.position.saturating_add(e),
            Bound::Unbounded => self.len(),
        };
        self.sub_buffer(start, end)
    }

    /// Returns a fresh buffer over the `width` symbols that end at the cursor.
    ///
    /// Returns `None` if fewer than `width` symbols precede the cursor.
    pub fn window_before(&self, width: usize) -> Option<Buffer> {
        let start = self.position.checked_sub(width)?;
        Some(self.sub_buffer(start, self.position))
    }

    fn sub_buffer(&self, start: usize, end: usize) -> Buffer {
        let slice = self.text(start, end);
        let mut buffer = Self::from_parts(Arc::from(slice.as_str()), Arc::clone(&self.config));
        buffer.depth = self.depth;
        buffer
    }

    /// Saves the current position on the mark stack.
    pub fn mark(&mut self) {
        self.marks.push(self.position);
    }

    /// Pops the last mark and moves the cursor back to it.
    pub fn restore_mark(&mut self) -> MatchResult<()> {
        let mark = self.marks.pop().ok_or(MatchError::MarkUnderflow {
            offset: self.position,
        })?;
        self.position = mark;
        Ok(())
    }

    /// Pops the last mark without moving the cursor.
    pub fn forget_mark(&mut self) -> MatchResult<()> {
        self.marks
            .pop()
            .map(|_| ())
            .ok_or(MatchError::MarkUnderflow {
                offset: self.position,
            })
    }

    /// Returns the number of marks currently pushed.
    pub fn mark_depth(&self) -> usize {
        self.marks.len()
    }

    /// Computes the line and column of an absolute symbol offset.
    pub fn location(&self, offset: usize) -> Position {
        Position::locate(&self.text, offset)
    }

    /// Builds a recoverable failure at the current position.
    pub fn failure(&self, message: impl Into<Cow<'static, str>>) -> MatchError {
        self.failure_at(self.position, message)
    }

    /// Builds a recoverable failure at an absolute offset.
    pub fn failure_at(&self, offset: usize, message: impl Into<Cow<'static, str>>) -> MatchError {
        ParseFailure::message_at(message, Arc::clone(&self.text), offset).into()
    }

    /// Fails at the cursor because `pattern` did not match.
    pub fn expected(&self, pattern: &Pattern) -> MatchError {
        ParseFailure::expected_at(pattern, Arc::clone(&self.text), self.position).into()
    }

    /// Fails at the cursor because `pattern` matched where it must not.
    pub fn unexpected(&self, pattern: &Pattern) -> MatchError {
        ParseFailure::absent_at(pattern, Arc::clone(&self.text), self.position).into()
    }

    /// Records one more level of rule nesting.
    pub fn enter(&mut self) -> MatchResult<()> {
        if self.depth >= self.config.max_depth {
            return Err(MatchError::DepthExceeded {
                limit: self.config.max_depth,
                offset: self.position,
            });
        }
        self.depth += 1;
        Ok(())
    }

    /// Leaves one level of rule nesting.
    pub fn leave(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// Returns the current nesting depth.
    pub fn depth(&self) -> usize {
        self.depth
    }
}

impl fmt::Debug for Buffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let split = self.offsets[self.position];
        write!(
            f,
            "Buffer({:?} + {:?})",
            &self.text[..split],
            &self.text[split..]
        )
    }
}

impl fmt::Display for Buffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_len_counts_symbols() {
        let buffer = Buffer::new("aあい");
        assert_eq!(buffer.len(), 3);
        assert_eq!(buffer.input().len(), 7);
    }

    #[test]
    fn test_rest_follows_cursor_across_multibyte() {
        let mut buffer = Buffer::new("あいう");
        buffer.advance(1);
        assert_eq!(buffer.rest(), "いう");
        assert_eq!(buffer.get(1).unwrap(), 'う');
    }

    #[test]
    fn test_debug_shows_split() {
        let mut buffer = Buffer::new("abcd");
        buffer.advance(2);
        assert_eq!(format!("{:?}", buffer), "Buffer(\"ab\" + \"cd\")");
    }

    #[test]
    fn test_depth_guard() {
        let mut buffer = Buffer::with_config("", MatchConfig::default().with_max_depth(2));
        buffer.enter().unwrap();
        buffer.enter().unwrap();
        assert_eq!(
            buffer.enter(),
            Err(MatchError::DepthExceeded {
                limit: 2,
                offset: 0
            })
        );
        buffer.leave();
        assert!(buffer.enter().is_ok());
    }

    #[test]
    fn test_slice_clamps_huge_bounds() {
        let mut buffer = Buffer::new("abcd");
        buffer.advance(1);
        assert_eq!(buffer.slice(..=usize::MAX).input(), "bcd");
        assert_eq!(buffer.slice(..usize::MAX).input(), "bcd");
        assert_eq!(buffer.slice(usize::MAX..).input(), "");
        assert_eq!(buffer.slice(1..=1).input(), "c");
    }

    #[test]
    fn test_sub_buffer_inherits_depth() {
        let mut buffer = Buffer::new("abc");
        buffer.enter().unwrap();
        buffer.advance(2);
        let window = buffer.window_before(2).unwrap();
        assert_eq!(window.depth(), 1);
        assert_eq!(window.input(), "ab");
    }
}
