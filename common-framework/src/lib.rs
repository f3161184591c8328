//! Common Framework
//!
//! Leaf types shared by matcher-framework and grammar-framework.

pub mod position;
pub mod text_slice;

pub use position::Position;
pub use text_slice::TextSlice;
