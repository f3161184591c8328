use crate::buffer::Buffer;
use crate::error::MatchResult;
use crate::pattern::Pattern;

/// Zero-width position checks.
///
/// None of these consume anything, so a failure cannot leave the cursor
/// anywhere but where it started.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Boundary {
    StringStart,
    StringEnd,
    /// At the start of input or just after a newline.
    LineStart,
    /// At the end of input or just before a newline.
    LineEnd,
    /// Between a non-word symbol (or the start of input) and a word symbol.
    WordStart,
    /// Between a word symbol and a non-word symbol (or the end of input).
    WordEnd,
}

impl Boundary {
    pub fn name(self) -> &'static str {
        match self {
            Boundary::StringStart => "StringStart",
            Boundary::StringEnd => "StringEnd",
            Boundary::LineStart => "LineStart",
            Boundary::LineEnd => "LineEnd",
            Boundary::WordStart => "WordStart",
            Boundary::WordEnd => "WordEnd",
        }
    }

    /// Checks the boundary at the cursor.
    pub fn holds(self, buffer: &Buffer) -> bool {
        let prev = buffer.prev();
        let next = buffer.peek();
        match self {
            Boundary::StringStart => buffer.position() == 0,
            Boundary::StringEnd => buffer.is_eof(),
            Boundary::LineStart => prev.map_or(true, |ch| ch == '\n'),
            Boundary::LineEnd => next.map_or(true, |ch| ch == '\n'),
            Boundary::WordStart => !prev.is_some_and(is_word_char) && next.is_some_and(is_word_char),
            Boundary::WordEnd => prev.is_some_and(is_word_char) && !next.is_some_and(is_word_char),
        }
    }

    pub(crate) fn consume(self, buffer: &Buffer, expected: &Pattern) -> MatchResult<()> {
        if self.holds(buffer) {
            Ok(())
        } else {
            Err(buffer.expected(expected))
        }
    }
}

/// Symbols that make up words for [`Boundary::WordStart`] and [`Boundary::WordEnd`].
pub fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(input: &str, position: usize) -> Buffer {
        let mut buffer = Buffer::new(input);
        buffer.advance(position);
        buffer
    }

    #[test]
    fn test_line_boundaries() {
        assert!(Boundary::LineStart.holds(&at("ab\ncd", 0)));
        assert!(Boundary::LineStart.holds(&at("ab\ncd", 3)));
        assert!(!Boundary::LineStart.holds(&at("ab\ncd", 1)));
        assert!(Boundary::LineEnd.holds(&at("ab\ncd", 2)));
        assert!(Boundary::LineEnd.holds(&at("ab\ncd", 5)));
        assert!(!Boundary::LineEnd.holds(&at("ab\ncd", 3)));
    }

    #[test]
    fn test_word_boundaries() {
        assert!(Boundary::WordStart.holds(&at("foo bar", 0)));
        assert!(Boundary::WordStart.holds(&at("foo bar", 4)));
        assert!(!Boundary::WordStart.holds(&at("foo bar", 1)));
        assert!(!Boundary::WordStart.holds(&at("foo bar", 7)));
        assert!(Boundary::WordEnd.holds(&at("foo bar", 3)));
        assert!(Boundary::WordEnd.holds(&at("foo bar", 7)));
        assert!(!Boundary::WordEnd.holds(&at("foo bar", 0)));
        assert!(!Boundary::WordEnd.holds(&at("foo_bar", 3)));
    }

    #[test]
    fn test_string_boundaries() {
        assert!(Boundary::StringStart.holds(&at("", 0)));
        assert!(Boundary::StringEnd.holds(&at("", 0)));
        assert!(!Boundary::StringEnd.holds(&at("a", 0)));
        assert!(!Boundary::StringStart.holds(&at("a", 1)));
    }
}
