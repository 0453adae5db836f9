//! Content of the Cartup CxP Roster Management System user manual.
//!
//! The manual is literal prose laid out with [`DocumentBuilder`]. Each
//! chapter lives in its own module and opens a named section, so the
//! section list of the built [`Document`] doubles as a chapter index.
//!
//! ```
//! use rostermanual::{manual, ManualConfig};
//!
//! let doc = manual::build_manual(&ManualConfig::default());
//! let names: Vec<_> = doc.sections.iter().filter_map(|s| s.name.as_deref()).collect();
//! assert_eq!(names[1], "1. Introduction");
//! ```

mod admin;
mod api;
mod appendix;
mod client;
mod faq;
mod front;
mod intro;

use crate::builder::DocumentBuilder;
use crate::config::ManualConfig;
use crate::model::Document;

/// Parts of the manual reported after a successful build.
pub const INCLUDED_PARTS: &[&str] = &[
    "Table of Contents",
    "Client Panel Guide (with screenshots)",
    "Admin Panel Guide (with screenshots)",
    "Comprehensive API Documentation",
    "FAQ Section",
    "Appendices with Quick Reference",
];

/// Table style used for the contents, credentials and shift-code tables.
pub(crate) const GRID_TABLE_STYLE: &str = "LightGridAccent1";
/// Table style used for the quick reference tables.
pub(crate) const LIST_TABLE_STYLE: &str = "LightListAccent1";

/// Build the complete manual.
pub fn build_manual(config: &ManualConfig) -> Document {
    let metadata = config.metadata().unwrap_or_else(|err| {
        tracing::warn!(error = %err, "ignoring invalid creation timestamp");
        crate::model::Metadata {
            title: Some(config.title()),
            author: Some(config.author.clone()),
            ..Default::default()
        }
    });

    let mut b = DocumentBuilder::with_metadata(metadata);
    front::add_title_page(&mut b, config);
    front::add_contents(&mut b);
    intro::add_introduction(&mut b, config);
    client::add_client_guide(&mut b, config);
    admin::add_admin_guide(&mut b, config);
    api::add_api_documentation(&mut b, config);
    faq::add_faq(&mut b);
    appendix::add_appendices(&mut b);
    appendix::add_support(&mut b, config);

    let doc = b.build();
    tracing::debug!(
        sections = doc.sections.len(),
        blocks = doc.total_blocks(),
        "manual built"
    );
    doc
}

/// Open a chapter: a new section headed by a level 1 heading.
fn chapter(b: &mut DocumentBuilder, title: &str) {
    tracing::info!(chapter = title, "building chapter");
    b.start_section(title).add_heading(title, 1);
}

/// "📸 Screenshot: See <dir>/<file>".
fn screenshot(b: &mut DocumentBuilder, config: &ManualConfig, file: &str) {
    b.add_paragraph(format!(
        "📸 Screenshot: See {}/{}",
        config.screenshot_dir, file
    ));
}

/// "📸 Screenshots:" followed by one "- caption: path" line per shot.
fn screenshots(b: &mut DocumentBuilder, config: &ManualConfig, shots: &[(&str, &str)]) {
    b.add_paragraph("📸 Screenshots:");
    for (caption, file) in shots {
        b.add_paragraph(format!(
            "- {}: {}/{}",
            caption, config.screenshot_dir, file
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Block, HeadingLevel, Paragraph};

    fn headings(doc: &Document, level: HeadingLevel) -> Vec<String> {
        doc.blocks()
            .filter_map(|b| match b {
                Block::Paragraph(p) if p.heading == level => Some(p.plain_text()),
                _ => None,
            })
            .collect()
    }

    fn paragraphs(doc: &Document) -> Vec<&Paragraph> {
        doc.blocks()
            .filter_map(|b| match b {
                Block::Paragraph(p) => Some(p),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_chapter_order() {
        let doc = build_manual(&ManualConfig::default());
        assert_eq!(
            headings(&doc, HeadingLevel::H1),
            vec![
                "Table of Contents",
                "1. Introduction",
                "2. Client Panel User Guide",
                "3. Admin Panel User Guide",
                "4. API Documentation",
                "5. Frequently Asked Questions (FAQ)",
                "6. Appendices",
                "Support & Contact",
            ]
        );
    }

    #[test]
    fn test_sections_follow_chapters() {
        let doc = build_manual(&ManualConfig::default());
        assert_eq!(doc.sections.len(), 9);
        assert_eq!(doc.sections[0].name, None);
        assert_eq!(doc.sections[1].name.as_deref(), Some("Table of Contents"));
        assert_eq!(doc.sections[8].name.as_deref(), Some("Support & Contact"));
    }

    #[test]
    fn test_every_subsection_is_present() {
        let doc = build_manual(&ManualConfig::default());
        let h2 = headings(&doc, HeadingLevel::H2);
        assert_eq!(h2.len(), 3 + 10 + 10 + 5 + 4 + 2);
        assert_eq!(h2[3], "2.1 Logging In to the Client Panel");
        assert_eq!(h2[22], "3.10 User Management Tab");
        assert_eq!(h2.last().map(String::as_str), Some("6.2 Quick Reference Guide"));
    }

    #[test]
    fn test_title_page() {
        let doc = build_manual(&ManualConfig::default());
        let title = headings(&doc, HeadingLevel::Title);
        assert_eq!(title, vec!["Cartup CxP Roster Management System"]);
        assert_eq!(
            doc.metadata.title.as_deref(),
            Some("Cartup CxP Roster Management System - User Manual")
        );
    }

    #[test]
    fn test_table_count() {
        let doc = build_manual(&ManualConfig::default());
        let stats = doc.stats();
        // contents, credentials, shift codes, two quick reference tables
        assert_eq!(stats.tables, 5);
    }

    #[test]
    fn test_config_flows_into_content() {
        let config = ManualConfig {
            app_url: "https://roster.example.com".to_string(),
            screenshot_dir: "shots".to_string(),
            ..Default::default()
        };
        let text = build_manual(&config).plain_text();
        assert!(text.contains("https://roster.example.com/admin/login"));
        assert!(text.contains("See shots/client/01_client_login_page.png"));
        assert!(!text.contains("MANUAL_SCREENSHOTS"));
    }

    #[test]
    fn test_footer_lines() {
        let doc = build_manual(&ManualConfig::default());
        let paras = paragraphs(&doc);
        let tail: Vec<String> = paras[paras.len() - 4..]
            .iter()
            .map(|p| p.plain_text())
            .collect();
        assert_eq!(
            tail,
            vec![
                "---",
                "Document Version: 1.0",
                "Last Updated: October 2025",
                "© 2025 Cartup CxP. All rights reserved.",
            ]
        );
    }

    #[test]
    fn test_build_is_deterministic() {
        let config = ManualConfig::default();
        assert_eq!(build_manual(&config), build_manual(&config));
    }
}
