//! DOCX (Word) document writing and reading.
//!
//! [`DocxWriter`] turns a [`Document`](crate::model::Document) into an Office
//! Open XML WordprocessingML package; [`DocxReader`] parses such a package back
//! into the model.

pub mod numbering;
pub mod parts;
mod reader;
pub mod styles;
mod writer;
mod xml;

pub use numbering::NumberingMap;
pub use reader::DocxReader;
pub use styles::{Style, StyleSheet, StyleType};
pub use writer::{DocxWriter, TIMESTAMP_FORMAT};
