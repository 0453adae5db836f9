//! Error types for the rostermanual library.

use std::io;
use thiserror::Error;

/// Result type alias for rostermanual operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building, writing or inspecting a manual.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Error reading or writing the ZIP archive.
    #[error("ZIP archive error: {0}")]
    ZipArchive(String),

    /// Error reading or writing XML content.
    #[error("XML error: {0}")]
    Xml(String),

    /// Invalid or malformed data in the document.
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// A required package part is missing.
    #[error("Missing component: {0}")]
    MissingComponent(String),

    /// The manual configuration could not be loaded or is invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error during rendering to an alternative output format.
    #[error("Render error: {0}")]
    Render(String),
}

impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        Error::ZipArchive(err.to_string())
    }
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::Xml(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<chrono::ParseError> for Error {
    fn from(err: chrono::ParseError) -> Self {
        Error::Config(format!("invalid timestamp: {}", err))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Render(format!("JSON serialization error: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::MissingComponent("word/document.xml".to_string());
        assert_eq!(err.to_string(), "Missing component: word/document.xml");

        let err = Error::Config("unknown field `colour`".to_string());
        assert_eq!(err.to_string(), "Configuration error: unknown field `colour`");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_error_from_timestamp() {
        let parse_err = chrono::DateTime::parse_from_rfc3339("yesterday").unwrap_err();
        let err: Error = parse_err.into();
        assert!(err.to_string().starts_with("Configuration error: invalid timestamp"));
    }
}
