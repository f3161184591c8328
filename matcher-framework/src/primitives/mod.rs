//! Patterns that consume directly from the buffer.

pub mod boundary;
pub mod chars;
pub mod charset;
pub mod literal;
pub mod lookaround;
pub mod regexp;

pub use boundary::{is_word_char, Boundary};
pub use chars::CharRun;
pub use charset::{Char, CharClass};
pub use literal::Literal;
pub use lookaround::Lookaround;
pub use regexp::{Groups, RegexMatcher, RegexOptions};
