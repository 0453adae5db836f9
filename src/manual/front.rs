//! Title page and table of contents.

use crate::builder::DocumentBuilder;
use crate::config::ManualConfig;
use crate::model::{Row, TextAlignment, TextStyle};

use super::GRID_TABLE_STYLE;

/// (number, title, page) rows of the contents table. Sub-entries are
/// indented with two spaces.
const CONTENTS: &[(&str, &str, &str)] = &[
    ("1.", "Introduction", "4"),
    ("  1.1", "About This Manual", "4"),
    ("  1.2", "System Overview", "4"),
    ("  1.3", "Key Features", "5"),
    ("2.", "Client Panel User Guide", "6"),
    ("  2.1", "Logging In", "6"),
    ("  2.2", "Dashboard Overview", "7"),
    ("  2.3", "Refresh Function", "8"),
    ("  2.4", "Theme Customization", "9"),
    ("  2.5", "Calendar Feature", "10"),
    ("  2.6", "Requesting Shift Changes", "12"),
    ("  2.7", "Requesting Shift Swaps", "15"),
    ("  2.8", "Shift View", "18"),
    ("  2.9", "Employee Search", "20"),
    ("  2.10", "Statistics Cards", "22"),
    ("3.", "Admin Panel User Guide", "25"),
    ("  3.1", "Admin Login", "25"),
    ("  3.2", "Dashboard Tab", "26"),
    ("  3.3", "Schedule Requests Tab", "30"),
    ("  3.4", "Data Sync Tab", "33"),
    ("  3.5", "Google Sheets Tab", "35"),
    ("  3.6", "Roster Data Tab", "37"),
    ("  3.7", "CSV Import/Export Tab", "40"),
    ("  3.8", "My Profile Tab", "43"),
    ("  3.9", "Team Management Tab", "45"),
    ("  3.10", "User Management Tab", "48"),
    ("4.", "API Documentation", "51"),
    ("  4.1", "Authentication APIs", "51"),
    ("  4.2", "Schedule APIs", "53"),
    ("  4.3", "Request APIs", "56"),
    ("  4.4", "Admin APIs", "59"),
    ("  4.5", "Data Sync APIs", "62"),
    ("5.", "Frequently Asked Questions (FAQ)", "65"),
    ("  5.1", "General Questions", "65"),
    ("  5.2", "Client Panel Questions", "67"),
    ("  5.3", "Admin Panel Questions", "69"),
    ("  5.4", "Troubleshooting", "71"),
    ("6.", "Appendices", "73"),
    ("  6.1", "Shift Codes Reference", "73"),
    ("  6.2", "Quick Reference Guide", "74"),
];

pub(super) fn add_title_page(b: &mut DocumentBuilder, config: &ManualConfig) {
    b.add_heading(config.product_name.as_str(), 0)
        .align_last(TextAlignment::Center)
        .add_styled_paragraph(
            config.subtitle.as_str(),
            TextStyle::new().with_point_size(18),
            TextAlignment::Center,
        )
        .add_paragraph(format!("Version {}", config.version))
        .align_last(TextAlignment::Center)
        .add_page_break();
}

pub(super) fn add_contents(b: &mut DocumentBuilder) {
    super::chapter(b, "Table of Contents");
    let rows = CONTENTS
        .iter()
        .map(|&(number, title, page)| Row::from_texts([number, title, page]))
        .collect();
    b.add_table(None, rows, GRID_TABLE_STYLE).add_page_break();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Block, Paragraph};

    #[test]
    fn test_contents_has_forty_entries() {
        assert_eq!(CONTENTS.len(), 40);
        let chapters = CONTENTS.iter().filter(|(n, _, _)| !n.starts_with(' ')).count();
        assert_eq!(chapters, 6);
    }

    #[test]
    fn test_title_page_layout() {
        let mut b = DocumentBuilder::new();
        add_title_page(&mut b, &ManualConfig::default());
        let doc = b.build();
        let blocks: Vec<&Block> = doc.blocks().collect();
        assert_eq!(blocks.len(), 4);

        let Block::Paragraph(Paragraph { runs, alignment, .. }) = blocks[1] else {
            panic!("expected subtitle paragraph");
        };
        assert_eq!(*alignment, TextAlignment::Center);
        assert_eq!(runs[0].text, "Complete User Manual");
        assert_eq!(runs[0].style.size, Some(36));
        assert!(matches!(blocks[3], Block::PageBreak));
    }

    #[test]
    fn test_contents_table_has_no_header() {
        let mut b = DocumentBuilder::new();
        add_contents(&mut b);
        let doc = b.build();
        let table = doc
            .blocks()
            .find_map(|block| match block {
                Block::Table(t) => Some(t),
                _ => None,
            })
            .expect("contents table");
        assert_eq!(table.row_count(), 40);
        assert!(table.header_rows().is_empty());
        assert_eq!(table.style_id.as_deref(), Some(GRID_TABLE_STYLE));
        assert_eq!(table.rows[1].cells[0].plain_text(), "  1.1");
    }
}
