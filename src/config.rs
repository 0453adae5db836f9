//! Manual configuration.
//!
//! Every field has a default that reproduces the stock Cartup CxP manual, so
//! an empty TOML file (or no file at all) yields the canonical document.
//!
//! ```
//! use rostermanual::ManualConfig;
//!
//! let config = ManualConfig::from_toml_str(r#"
//!     version = "1.1"
//!     created = "2025-10-01T09:00:00Z"
//! "#)?;
//! assert_eq!(config.version, "1.1");
//! assert_eq!(config.output, "USER_MANUAL.docx");
//! # Ok::<(), rostermanual::Error>(())
//! ```

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::docx::TIMESTAMP_FORMAT;
use crate::error::{Error, Result};
use crate::model::Metadata;

/// Contact details printed in the "Support & Contact" page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SupportContact {
    pub team: String,
    pub email: String,
    pub phone: String,
    pub hours: String,
    pub admin_title: String,
    pub admin_email: String,
}

impl Default for SupportContact {
    fn default() -> Self {
        Self {
            team: "IT Support Team".to_string(),
            email: "support@cartup.com".to_string(),
            phone: "+1-XXX-XXX-XXXX".to_string(),
            hours: "Monday - Friday, 9 AM - 5 PM".to_string(),
            admin_title: "System Administrator".to_string(),
            admin_email: "admin@cartup.com".to_string(),
        }
    }
}

/// Settings for one manual build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ManualConfig {
    /// Product name, used as the document title.
    pub product_name: String,
    pub subtitle: String,
    pub version: String,
    pub author: String,
    /// Free-form label printed in the footer ("October 2025").
    pub last_updated: String,
    pub copyright: String,
    /// Default output path for `generate`.
    pub output: String,
    /// Fixed creation timestamp (RFC 3339). When absent the current time is
    /// used and the output is no longer byte-for-byte reproducible.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
    /// Base URL of the client application quoted in login steps.
    pub app_url: String,
    /// Directory the screenshot references point into.
    pub screenshot_dir: String,
    pub support: SupportContact,
}

impl Default for ManualConfig {
    fn default() -> Self {
        Self {
            product_name: "Cartup CxP Roster Management System".to_string(),
            subtitle: "Complete User Manual".to_string(),
            version: "1.0".to_string(),
            author: "Cartup CxP Team".to_string(),
            last_updated: "October 2025".to_string(),
            copyright: "© 2025 Cartup CxP. All rights reserved.".to_string(),
            output: "USER_MANUAL.docx".to_string(),
            created: None,
            app_url: "http://localhost:3000".to_string(),
            screenshot_dir: "MANUAL_SCREENSHOTS".to_string(),
            support: SupportContact::default(),
        }
    }
}

impl ManualConfig {
    /// Load and validate a TOML configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("failed to read {}: {}", path.display(), e)))?;
        let config = Self::from_toml_str(&content)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
        tracing::debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialise to pretty TOML.
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Check the fields that end up in the package structure.
    pub fn validate(&self) -> Result<()> {
        if self.product_name.trim().is_empty() {
            return Err(Error::Config("product_name must not be empty".to_string()));
        }
        if self.output.trim().is_empty() {
            return Err(Error::Config("output must not be empty".to_string()));
        }
        self.created_timestamp()?;
        Ok(())
    }

    /// The configured creation time in the layout docProps/core.xml uses.
    pub fn created_timestamp(&self) -> Result<Option<String>> {
        self.created
            .as_deref()
            .map(|raw| {
                let parsed = DateTime::parse_from_rfc3339(raw)?;
                Ok(parsed.with_timezone(&Utc).format(TIMESTAMP_FORMAT).to_string())
            })
            .transpose()
    }

    /// Document title written to the package properties.
    pub fn title(&self) -> String {
        format!("{} - User Manual", self.product_name)
    }

    /// Package metadata for this manual.
    pub fn metadata(&self) -> Result<Metadata> {
        let created = self.created_timestamp()?;
        Ok(Metadata {
            title: Some(self.title()),
            author: Some(self.author.clone()),
            modified: created.clone(),
            created,
            ..Default::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_stock_manual() {
        let config = ManualConfig::default();
        assert_eq!(
            config.title(),
            "Cartup CxP Roster Management System - User Manual"
        );
        assert_eq!(config.author, "Cartup CxP Team");
        assert_eq!(config.support.email, "support@cartup.com");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_toml_is_default() {
        let config = ManualConfig::from_toml_str("").unwrap();
        assert_eq!(config, ManualConfig::default());
    }

    #[test]
    fn test_partial_override() {
        let config = ManualConfig::from_toml_str(
            r#"
            version = "2.0"

            [support]
            phone = "+1-555-0100"
            "#,
        )
        .unwrap();
        assert_eq!(config.version, "2.0");
        assert_eq!(config.support.phone, "+1-555-0100");
        assert_eq!(config.support.email, "support@cartup.com");
    }

    #[test]
    fn test_unknown_keys_rejected() {
        let err = ManualConfig::from_toml_str("colour = \"blue\"").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_created_is_normalised_to_utc() {
        let config = ManualConfig {
            created: Some("2025-10-01T12:30:00+02:00".to_string()),
            ..Default::default()
        };
        assert_eq!(
            config.created_timestamp().unwrap().as_deref(),
            Some("2025-10-01T10:30:00Z")
        );
        let meta = config.metadata().unwrap();
        assert_eq!(meta.created, meta.modified);
    }

    #[test]
    fn test_invalid_created_rejected() {
        let err = ManualConfig::from_toml_str("created = \"yesterday\"").unwrap_err();
        assert!(err.to_string().contains("invalid timestamp"));
    }

    #[test]
    fn test_empty_product_name_rejected() {
        let err = ManualConfig::from_toml_str("product_name = \"  \"").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = ManualConfig {
            created: Some("2025-10-01T00:00:00Z".to_string()),
            ..Default::default()
        };
        let toml = config.to_toml().unwrap();
        assert!(toml.contains("[support]"));
        assert_eq!(ManualConfig::from_toml_str(&toml).unwrap(), config);
    }

    #[test]
    fn test_load_reports_path() {
        let err = ManualConfig::load("/nonexistent/manual.toml").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/manual.toml"));
    }
}
