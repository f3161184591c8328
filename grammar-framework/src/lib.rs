pub mod error;
pub mod grammar;
pub mod grammars;
pub mod set;

pub use error::GrammarError;
pub use grammar::{NamedGrammar, Parsed};
pub use matcher_framework::{Fragment, MatchError, Matcher, Pattern};
pub use set::GrammarSet;
