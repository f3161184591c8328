use std::fmt;

/// A location in the input text.
///
/// `offset` counts symbols (Unicode scalar values), not bytes, so it lines up
/// with the cursor positions used while matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    /// Line number (1-indexed)
    pub line: usize,
    /// Column number (1-indexed)
    pub column: usize,
    /// Symbol offset from the start of the input
    pub offset: usize,
}

impl Position {
    /// Creates a new position at the start of the input.
    pub fn new() -> Self {
        Self {
            line: 1,
            column: 1,
            offset: 0,
        }
    }

    /// Creates a position with the given values.
    pub fn at(line: usize, column: usize, offset: usize) -> Self {
        Self {
            line,
            column,
            offset,
        }
    }

    /// Computes the line and column of the symbol `offset` in `text`.
    ///
    /// Offsets past the end are clamped to the end of the text.
    pub fn locate(text: &str, offset: usize) -> Self {
        let mut position = Self::new();
        for ch in text.chars().take(offset) {
            if ch == '\n' {
                position.line += 1;
                position.column = 1;
            } else {
                position.column += 1;
            }
            position.offset += 1;
        }
        position
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_new() {
        let pos = Position::new();
        assert_eq!(pos.line, 1);
        assert_eq!(pos.column, 1);
        assert_eq!(pos.offset, 0);
    }

    #[test]
    fn test_position_at() {
        let pos = Position::at(5, 10, 100);
        assert_eq!(pos.line, 5);
        assert_eq!(pos.column, 10);
        assert_eq!(pos.offset, 100);
    }

    #[test]
    fn test_position_default() {
        let pos = Position::default();
        assert_eq!(pos, Position::new());
    }

    #[test]
    fn test_position_locate() {
        assert_eq!(Position::locate("ab\ncd", 0), Position::at(1, 1, 0));
        assert_eq!(Position::locate("ab\ncd", 2), Position::at(1, 3, 2));
        assert_eq!(Position::locate("ab\ncd", 3), Position::at(2, 1, 3));
        assert_eq!(Position::locate("ab\ncd", 5), Position::at(2, 3, 5));
    }

    #[test]
    fn test_position_locate_counts_symbols() {
        assert_eq!(Position::locate("あい\nう", 4), Position::at(2, 2, 4));
    }

    #[test]
    fn test_position_locate_clamps() {
        assert_eq!(Position::locate("ab", 10), Position::at(1, 3, 2));
    }

    #[test]
    fn test_position_display() {
        assert_eq!(Position::at(3, 7, 20).to_string(), "3:7");
    }
}
