//! # rostermanual
//!
//! Generates the Cartup CxP Roster Management System user manual as a
//! Word (DOCX) document.
//!
//! The manual content is assembled into a format-agnostic [`Document`] with
//! [`builder::DocumentBuilder`], serialised to WordprocessingML by
//! [`docx::DocxWriter`], and can be previewed as Markdown, plain text or JSON.
//!
//! ## Quick Start
//!
//! ```no_run
//! use rostermanual::{generate_to_file, ManualConfig};
//!
//! // Writes USER_MANUAL.docx with the stock content
//! let config = ManualConfig::default();
//! generate_to_file(&config, &config.output)?;
//! # Ok::<(), rostermanual::Error>(())
//! ```
//!
//! ## Reproducible builds
//!
//! ```
//! use rostermanual::{generate, ManualConfig};
//!
//! let config = ManualConfig {
//!     created: Some("2025-10-01T00:00:00Z".to_string()),
//!     ..Default::default()
//! };
//! assert_eq!(generate(&config)?, generate(&config)?);
//! # Ok::<(), rostermanual::Error>(())
//! ```
//!
//! ## Inspecting a package
//!
//! ```no_run
//! use rostermanual::inspect;
//!
//! let doc = inspect("USER_MANUAL.docx")?;
//! println!("Sections: {}", doc.sections.len());
//! println!("Tables: {}", doc.stats().tables);
//! # Ok::<(), rostermanual::Error>(())
//! ```
//!
//! ## Features
//!
//! - `async`: `DocxWriter::save_async` with Tokio

pub mod builder;
pub mod config;
pub mod container;
pub mod docx;
pub mod error;
pub mod manual;
pub mod model;
pub mod render;

// Re-exports
pub use config::{ManualConfig, SupportContact};
pub use container::{OoxmlContainer, Relationship, Relationships};
pub use error::{Error, Result};
pub use manual::build_manual;
pub use model::{
    Block, BlockStats, Cell, Document, HeadingLevel, ListInfo, ListType, Metadata, Paragraph,
    Row, Section, Table, TextAlignment, TextRun, TextStyle,
};

use std::path::Path;

/// Output formats the manual can be produced in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// WordprocessingML package
    #[default]
    Docx,
    /// Markdown preview
    Markdown,
    /// Plain text preview
    Text,
    /// JSON dump of the document model
    Json,
}

impl OutputFormat {
    /// Conventional file extension for the format.
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Docx => "docx",
            OutputFormat::Markdown => "md",
            OutputFormat::Text => "txt",
            OutputFormat::Json => "json",
        }
    }
}

fn writer_for(config: &ManualConfig) -> Result<docx::DocxWriter> {
    let writer = docx::DocxWriter::new();
    Ok(match config.created_timestamp()? {
        Some(created) => writer.with_created(created),
        None => writer,
    })
}

/// Build the manual and serialise it to DOCX bytes.
pub fn generate(config: &ManualConfig) -> Result<Vec<u8>> {
    config.validate()?;
    let doc = build_manual(config);
    writer_for(config)?.to_bytes(&doc)
}

/// Build the manual and write it as a DOCX file.
pub fn generate_to_file(config: &ManualConfig, path: impl AsRef<Path>) -> Result<()> {
    config.validate()?;
    let doc = build_manual(config);
    writer_for(config)?.save(&doc, path)?;
    Ok(())
}

/// Build the manual and render it in the requested format.
///
/// DOCX output is binary; the text formats are UTF-8.
///
/// # Example
///
/// ```
/// use rostermanual::{render_manual, ManualConfig, OutputFormat};
///
/// let md = render_manual(&ManualConfig::default(), OutputFormat::Markdown)?;
/// assert!(md.starts_with(b"# Cartup CxP Roster Management System"));
/// # Ok::<(), rostermanual::Error>(())
/// ```
pub fn render_manual(config: &ManualConfig, format: OutputFormat) -> Result<Vec<u8>> {
    config.validate()?;
    let doc = build_manual(config);
    let options = render::RenderOptions::default();
    let text = match format {
        OutputFormat::Docx => return writer_for(config)?.to_bytes(&doc),
        OutputFormat::Markdown => render::to_markdown(&doc, &options)?,
        OutputFormat::Text => render::to_text(&doc, &options)?,
        OutputFormat::Json => render::to_json(&doc, render::JsonFormat::Pretty)?,
    };
    Ok(text.into_bytes())
}

/// Read a DOCX file back into the document model.
pub fn inspect(path: impl AsRef<Path>) -> Result<Document> {
    docx::DocxReader::open(path)?.parse()
}

/// Read DOCX bytes back into the document model.
pub fn inspect_bytes(data: &[u8]) -> Result<Document> {
    docx::DocxReader::from_bytes(data.to_vec())?.parse()
}
