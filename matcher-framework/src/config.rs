/// Default whitespace set used by `whitespace()` and `token()`.
pub const DEFAULT_WHITESPACE: &str = " \t\r\n";

/// Default limit on nested rule references.
pub const DEFAULT_MAX_DEPTH: usize = 1_000;

/// Settings carried by a [`Buffer`](crate::Buffer) for the lifetime of one parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchConfig {
    /// Maximum nesting of rule references before the parse is aborted with
    /// [`MatchError::DepthExceeded`](crate::MatchError::DepthExceeded).
    /// Other patterns nest only as deep as they were written, so they are not
    /// counted.
    pub max_depth: usize,
    /// Optional cap on how many symbols a lookbehind scans back from the
    /// cursor. `None` scans as far as the inner pattern allows.
    pub max_lookbehind: Option<usize>,
    /// Symbols matched by `whitespace()` and skipped by `token()` patterns.
    pub whitespace: String,
}

impl MatchConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_max_lookbehind(mut self, max_lookbehind: usize) -> Self {
        self.max_lookbehind = Some(max_lookbehind);
        self
    }

    pub fn with_whitespace(mut self, whitespace: impl Into<String>) -> Self {
        self.whitespace = whitespace.into();
        self
    }
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_lookbehind: None,
            whitespace: DEFAULT_WHITESPACE.to_string(),
        }
    }
}
