//! Chapter 6: Appendices, followed by the support page and footer.

use crate::builder::DocumentBuilder;
use crate::config::ManualConfig;
use crate::model::Row;

use super::{GRID_TABLE_STYLE, LIST_TABLE_STYLE};

/// (code, time or type, description)
const SHIFT_CODES: &[(&str, &str, &str)] = &[
    ("M2", "8 AM – 5 PM", "Morning Shift 2"),
    ("M3", "9 AM – 6 PM", "Morning Shift 3"),
    ("M4", "10 AM – 7 PM", "Morning Shift 4"),
    ("D1", "12 PM – 9 PM", "Day Shift 1"),
    ("D2", "1 PM – 10 PM", "Day Shift 2"),
    ("DO", "Day Off", "Scheduled day off"),
    ("SL", "Sick Leave", "Medical leave"),
    ("CL", "Casual Leave", "Personal leave"),
    ("EL", "Emergency Leave", "Urgent/emergency leave"),
    ("HL", "Holiday Leave", "Public holiday or scheduled holiday"),
];

const CLIENT_ACTIONS: &[(&str, &str)] = &[
    ("View Schedule", "Login → Dashboard shows today/tomorrow"),
    ("Change Theme", "Click Theme button → Select from dropdown"),
    (
        "Request Shift Change",
        "Click Request Shift Change → Select date → Choose shift → Submit",
    ),
    (
        "Request Swap",
        "Click Request Swap → Select date → Choose employee → Submit",
    ),
    ("View Team Schedule", "Click Shift View → Select date and team"),
    ("Search Employee", "Type in search box → Click employee"),
];

const ADMIN_ACTIONS: &[(&str, &str)] = &[
    (
        "Approve Request",
        "Schedule Requests tab → Find request → Click Approve",
    ),
    (
        "Modify Shift",
        "Roster Data tab → Select date → Click shift → Choose new shift",
    ),
    ("Sync Data", "Data Sync tab → Click Sync Now"),
    (
        "Add Employee",
        "Team Management tab → Add Employee → Fill form → Save",
    ),
    ("Export CSV", "CSV Import tab → Select months → Click Export"),
    (
        "Add Admin User",
        "User Management tab → Add New User → Fill details → Create",
    ),
];

pub(super) fn add_appendices(b: &mut DocumentBuilder) {
    super::chapter(b, "6. Appendices");

    let codes = SHIFT_CODES
        .iter()
        .map(|&(code, time, desc)| Row::from_texts([code, time, desc]))
        .collect();
    b.add_heading("6.1 Shift Codes Reference", 2)
        .add_paragraph("Complete list of all shift codes used in the system:")
        .add_table(
            Some(Row::header(["Code", "Time/Type", "Description"])),
            codes,
            GRID_TABLE_STYLE,
        );

    b.add_heading("6.2 Quick Reference Guide", 2)
        .add_bold_paragraph("Client Panel Quick Actions:");
    add_actions_table(b, CLIENT_ACTIONS);
    b.add_empty_paragraph()
        .add_bold_paragraph("Admin Panel Quick Actions:");
    add_actions_table(b, ADMIN_ACTIONS);
}

fn add_actions_table(b: &mut DocumentBuilder, actions: &[(&str, &str)]) {
    let rows = actions
        .iter()
        .map(|&(action, how_to)| Row::from_texts([action, how_to]))
        .collect();
    b.add_table(
        Some(Row::header(["Action", "How To"])),
        rows,
        LIST_TABLE_STYLE,
    );
}

/// Support page and document footer.
pub(super) fn add_support(b: &mut DocumentBuilder, config: &ManualConfig) {
    let support = &config.support;
    b.add_page_break();
    super::chapter(b, "Support & Contact");

    b.add_paragraph(format!(
        "For technical support, questions, or issues with the {}, please contact:",
        config.product_name
    ))
    .add_empty_paragraph()
    .add_paragraph(support.team.as_str())
    .add_paragraph(format!("Email: {}", support.email))
    .add_paragraph(format!("Phone: {}", support.phone))
    .add_paragraph(format!("Hours: {}", support.hours))
    .add_empty_paragraph()
    .add_paragraph(support.admin_title.as_str())
    .add_paragraph(format!("Email: {}", support.admin_email))
    .add_empty_paragraph()
    .add_paragraph("---")
    .add_paragraph(format!("Document Version: {}", config.version))
    .add_paragraph(format!("Last Updated: {}", config.last_updated))
    .add_paragraph(config.copyright.as_str());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SupportContact;
    use crate::model::{Block, Table};

    fn tables(b: DocumentBuilder) -> Vec<Table> {
        b.build()
            .blocks()
            .filter_map(|block| match block {
                Block::Table(t) => Some(t.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_reference_tables() {
        let mut b = DocumentBuilder::new();
        add_appendices(&mut b);
        let tables = tables(b);
        assert_eq!(tables.len(), 3);

        assert_eq!(tables[0].row_count(), 11);
        assert_eq!(tables[0].column_count(), 3);
        assert_eq!(tables[0].rows[10].cells[0].plain_text(), "HL");

        for table in &tables[1..] {
            assert_eq!(table.row_count(), 7);
            assert_eq!(table.style_id.as_deref(), Some(LIST_TABLE_STYLE));
            assert!(table.rows[0].is_header);
        }
    }

    #[test]
    fn test_support_uses_config() {
        let config = ManualConfig {
            version: "1.1".to_string(),
            support: SupportContact {
                phone: "+1-555-0100".to_string(),
                ..Default::default()
            },
            ..Default::default()
        };
        let mut b = DocumentBuilder::new();
        add_support(&mut b, &config);
        let doc = b.build();

        // the page break stays with the preceding chapter
        assert_eq!(doc.sections.len(), 2);
        assert!(matches!(doc.sections[0].content[..], [Block::PageBreak]));

        let text = doc.plain_text();
        assert!(text.contains("Phone: +1-555-0100"));
        assert!(text.contains("Document Version: 1.1"));
        assert!(text.contains("Email: admin@cartup.com"));
    }
}
