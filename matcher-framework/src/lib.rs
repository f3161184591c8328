pub mod buffer;
pub mod builders;
pub mod combinators;
pub mod config;
pub mod error;
pub mod fragment;
pub mod pattern;
pub mod primitives;
pub mod rules;
pub mod traits;

pub use buffer::Buffer;
pub use combinators::Selection;
pub use common_framework::{Position, TextSlice};
pub use config::MatchConfig;
pub use error::{MatchError, MatchResult, ParseFailure, PatternError};
pub use fragment::Fragment;
pub use pattern::{Pattern, PatternKind, SharedMatcher};
pub use primitives::{Boundary, CharClass, Groups, RegexOptions};
pub use rules::{RuleRef, RuleSet};
pub use traits::{Matched, Matcher, MaxLength, Unit};
