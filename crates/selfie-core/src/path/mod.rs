//! Path helpers for saved captures.
//!
//! - [`relative_path`] renders a saved file's location relative to a
//!   configured root, for embedding in copied HTML or Markdown.
//! - [`expand_tilde`] and [`file_stem`] cover the small conversions the
//!   preferences and copy formatting need.

mod relative;
mod segments;

pub use relative::relative_path;
pub use segments::{expand_tilde, file_stem, PathSegments, SEPARATOR};
