use matcher_framework::{MatchError, PatternError};
use thiserror::Error;

/// Errors from building or running a [`GrammarSet`](crate::GrammarSet).
#[derive(Debug, Error)]
pub enum GrammarError {
    #[error(transparent)]
    Match(#[from] MatchError),

    #[error(transparent)]
    Pattern(#[from] PatternError),

    #[error("no grammar named `{0}`")]
    UnknownGrammar(String),
}

impl GrammarError {
    /// The match failure, if this error came from running a grammar.
    pub fn as_match_error(&self) -> Option<&MatchError> {
        match self {
            GrammarError::Match(error) => Some(error),
            _ => None,
        }
    }
}
