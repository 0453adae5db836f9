//! Intermediate document model.
//!
//! This module defines the data structures that describe a word-processor
//! document in a format-agnostic way. The builder produces these structures,
//! the DOCX writer serialises them and the renderers turn them into previews.

mod document;
mod paragraph;
mod table;

pub use document::*;
pub use paragraph::*;
pub use table::*;
