use crate::pattern::Pattern;
use common_framework::Position;
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// What a failed match was looking for.
///
/// Pattern expectations hold a cheap clone of the pattern and are only
/// rendered when the message is asked for.
#[derive(Debug, Clone)]
enum Expectation {
    Message(Cow<'static, str>),
    Pattern(Pattern),
    Absent(Pattern),
}

#[derive(Debug, Clone)]
enum Location {
    Known(Position),
    /// Resolved to a line and column against `input` on demand.
    Offset { input: Arc<str>, offset: usize },
}

/// The single recoverable failure produced while matching.
///
/// Carries the expectation and the symbol offset where it happened. Ancestor
/// alternatives and sequences recover from it by trying another branch or
/// rolling back; it only reaches the caller when nothing could. Failures are
/// created on every backtrack, so the message text and the line/column are
/// computed only when read.
#[derive(Clone)]
pub struct ParseFailure {
    expectation: Expectation,
    location: Location,
}

impl ParseFailure {
    pub fn new(message: impl Into<Cow<'static, str>>, position: Position) -> Self {
        Self {
            expectation: Expectation::Message(message.into()),
            location: Location::Known(position),
        }
    }

    pub(crate) fn message_at(
        message: impl Into<Cow<'static, str>>,
        input: Arc<str>,
        offset: usize,
    ) -> Self {
        Self {
            expectation: Expectation::Message(message.into()),
            location: Location::Offset { input, offset },
        }
    }

    pub(crate) fn expected_at(pattern: &Pattern, input: Arc<str>, offset: usize) -> Self {
        Self {
            expectation: Expectation::Pattern(pattern.clone()),
            location: Location::Offset { input, offset },
        }
    }

    pub(crate) fn absent_at(pattern: &Pattern, input: Arc<str>, offset: usize) -> Self {
        Self {
            expectation: Expectation::Absent(pattern.clone()),
            location: Location::Offset { input, offset },
        }
    }

    pub fn message(&self) -> Cow<'_, str> {
        match &self.expectation {
            Expectation::Message(message) => Cow::Borrowed(message.as_ref()),
            Expectation::Pattern(pattern) => Cow::Owned(format!("Expected {}", pattern)),
            Expectation::Absent(pattern) => Cow::Owned(format!("Did not expect {}", pattern)),
        }
    }

    /// Line and column of the failure.
    pub fn position(&self) -> Position {
        match &self.location {
            Location::Known(position) => *position,
            Location::Offset { input, offset } => Position::locate(input, *offset),
        }
    }

    /// Symbol offset of the failure.
    pub fn offset(&self) -> usize {
        match &self.location {
            Location::Known(position) => position.offset,
            Location::Offset { offset, .. } => *offset,
        }
    }
}

impl PartialEq for ParseFailure {
    fn eq(&self, other: &Self) -> bool {
        self.offset() == other.offset() && self.message() == other.message()
    }
}

impl Eq for ParseFailure {}

impl fmt::Display for ParseFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}", self.message(), self.position())
    }
}

impl fmt::Debug for ParseFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParseFailure")
            .field("message", &self.message())
            .field("offset", &self.offset())
            .finish()
    }
}

impl std::error::Error for ParseFailure {}

/// Error returned by every consume call.
///
/// Only [`MatchError::Failure`] participates in backtracking. The other
/// variants report engine misuse or a tripped guard and pass straight through
/// every combinator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatchError {
    #[error(transparent)]
    Failure(#[from] ParseFailure),

    #[error("cannot pop mark: mark stack is empty (offset {offset})")]
    MarkUnderflow { offset: usize },

    #[error("nesting depth limit of {limit} exceeded at offset {offset}")]
    DepthExceeded { limit: usize, offset: usize },

    #[error("rule `{name}` is not defined")]
    UnresolvedRule { name: String },
}

impl MatchError {
    /// Returns true for failures an ancestor may recover from by backtracking.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, MatchError::Failure(_))
    }

    pub fn as_failure(&self) -> Option<&ParseFailure> {
        match self {
            MatchError::Failure(failure) => Some(failure),
            _ => None,
        }
    }
}

pub type MatchResult<T> = Result<T, MatchError>;

/// Errors raised while building patterns or rule sets.
#[derive(Debug, Error)]
pub enum PatternError {
    #[error("invalid regular expression: {0}")]
    Regex(#[from] regex::Error),

    #[error("regular expression `{pattern}` has no capture group {group}")]
    NoSuchGroup { pattern: String, group: usize },

    #[error("rule `{0}` is already defined")]
    DuplicateRule(String),

    #[error("rule `{0}` was never declared")]
    UnknownRule(String),

    #[error("rules declared but never defined: {}", .0.join(", "))]
    UndefinedRules(Vec<String>),
}

/// Recovers from a [`MatchError::Failure`], passing every other error through.
///
/// Combinators use this to turn "the child did not match" into a value while
/// letting engine errors abort the whole parse.
pub(crate) fn recover<T>(result: MatchResult<T>) -> MatchResult<Result<T, ParseFailure>> {
    match result {
        Ok(value) => Ok(Ok(value)),
        Err(MatchError::Failure(failure)) => Ok(Err(failure)),
        Err(other) => Err(other),
    }
}
