//! Patterns built from other patterns.

pub mod alternative;
pub mod repeat;
pub mod sequence;
pub mod shape;

pub use alternative::Alternative;
pub use repeat::{Repeat, SeparatedBy};
pub use sequence::Sequence;
pub use shape::{Select, Selection};
