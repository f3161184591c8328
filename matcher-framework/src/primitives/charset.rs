use crate::buffer::Buffer;
use crate::error::MatchResult;
use crate::fragment::Fragment;
use crate::pattern::Pattern;
use crate::traits::Matched;
use std::fmt;

/// A set of acceptable symbols, optionally inverted.
///
/// An empty inverted class accepts every symbol.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CharClass {
    chars: String,
    inverse: bool,
}

impl CharClass {
    pub fn of(chars: impl Into<String>) -> Self {
        Self {
            chars: chars.into(),
            inverse: false,
        }
    }

    pub fn not_of(chars: impl Into<String>) -> Self {
        Self {
            chars: chars.into(),
            inverse: true,
        }
    }

    /// Accepts any symbol.
    pub fn any() -> Self {
        Self::not_of("")
    }

    pub fn chars(&self) -> &str {
        &self.chars
    }

    pub fn is_inverse(&self) -> bool {
        self.inverse
    }

    pub fn is_any(&self) -> bool {
        self.inverse && self.chars.is_empty()
    }

    #[inline]
    pub fn accepts(&self, ch: char) -> bool {
        self.chars.contains(ch) != self.inverse
    }

    /// Writes the constructor arguments, e.g. `"abc", inverse=true`.
    pub(crate) fn fmt_args(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_any() {
            return Ok(());
        }
        write!(f, "{:?}", self.chars)?;
        if self.inverse {
            f.write_str(", inverse=true")?;
        }
        Ok(())
    }
}

/// Consumes exactly one symbol from a [`CharClass`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Char {
    pub(crate) class: CharClass,
}

impl Char {
    pub fn new(class: CharClass) -> Self {
        Self { class }
    }

    pub fn class(&self) -> &CharClass {
        &self.class
    }

    pub(crate) fn consume(
        &self,
        buffer: &mut Buffer,
        expected: &Pattern,
    ) -> MatchResult<Matched> {
        let ch = buffer.get(0)?;
        if !self.class.accepts(ch) {
            return Err(buffer.expected(expected));
        }
        let start = buffer.position();
        buffer.advance(1);
        Ok(Matched::fixed(Fragment::Text(buffer.taken_since(start))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_accepts() {
        assert!(CharClass::of("abc").accepts('b'));
        assert!(!CharClass::of("abc").accepts('d'));
        assert!(CharClass::not_of("abc").accepts('d'));
        assert!(!CharClass::not_of("abc").accepts('a'));
        assert!(CharClass::any().accepts('あ'));
    }
}
