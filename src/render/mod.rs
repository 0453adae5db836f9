//! Output rendering for documents.
//!
//! Besides DOCX, a manual can be previewed as Markdown, plain text or JSON.
//!
//! # Example
//!
//! ```
//! use rostermanual::builder::DocumentBuilder;
//! use rostermanual::render::*;
//!
//! let mut builder = DocumentBuilder::new();
//! builder.add_heading("Manual", 0).add_bullet("Client Panel");
//! let doc = builder.build();
//!
//! let md = to_markdown(&doc, &RenderOptions::default())?;
//! assert!(md.starts_with("# Manual"));
//!
//! let text = to_text(&doc, &RenderOptions::default())?;
//! assert!(text.contains("• Client Panel"));
//!
//! let json = to_json(&doc, JsonFormat::Compact)?;
//! assert!(json.contains("\"Client Panel\""));
//! # Ok::<(), rostermanual::Error>(())
//! ```

mod json;
mod markdown;
mod options;
mod text;

pub use json::{to_json, JsonFormat};
pub use markdown::to_markdown;
pub use options::RenderOptions;
pub use text::to_text;
