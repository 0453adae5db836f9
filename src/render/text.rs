//! Plain text renderer implementation.

use unicode_width::UnicodeWidthStr;

use crate::error::Result;
use crate::model::{Block, Document, HeadingLevel, ListType, Paragraph, Table};

use super::options::RenderOptions;

/// Convert a Document to plain text.
///
/// The title and chapter headings are underlined; tables are drawn as ASCII
/// grids sized by display width so wide glyphs stay aligned.
pub fn to_text(doc: &Document, options: &RenderOptions) -> Result<String> {
    let mut output = String::new();

    for block in doc.blocks() {
        match block {
            Block::Paragraph(para) => {
                let text = render_paragraph_text(para, options);
                if text.is_empty() && !options.include_empty_paragraphs {
                    continue;
                }
                output.push_str(&text);
                output.push('\n');
                if options.paragraph_spacing && !para.is_list_item() {
                    output.push('\n');
                }
            }
            Block::Table(table) => {
                output.push_str(&render_table_text(table));
                output.push('\n');
            }
            Block::PageBreak => output.push_str("\n\x0C\n\n"),
        }
    }

    Ok(format!("{}\n", output.trim_end()))
}

/// Render a paragraph to plain text.
fn render_paragraph_text(para: &Paragraph, options: &RenderOptions) -> String {
    let mut output = String::new();

    if let Some(ref list_info) = para.list_info {
        output.push_str(&"  ".repeat(list_info.level as usize));
        match list_info.list_type {
            ListType::Bullet => output.push_str("• "),
            ListType::Numbered => {
                output.push_str(&format!("{}. ", list_info.number.unwrap_or(1)));
            }
        }
    }

    let text = para.plain_text();
    if options.preserve_line_breaks {
        output.push_str(&text);
    } else {
        output.push_str(&text.replace('\n', " "));
    }

    let underline = match para.heading {
        HeadingLevel::Title => Some('='),
        HeadingLevel::H1 => Some('-'),
        _ => None,
    };
    if let Some(c) = underline {
        let width = output.width();
        output.push('\n');
        output.push_str(&c.to_string().repeat(width));
    }

    output.trim_end().to_string()
}

/// Render a table to plain text (ASCII table).
fn render_table_text(table: &Table) -> String {
    let col_count = table.column_count();
    if col_count == 0 {
        return String::new();
    }

    let rows: Vec<Vec<String>> = table
        .rows
        .iter()
        .map(|row| {
            (0..col_count)
                .map(|i| {
                    row.cells
                        .get(i)
                        .map(|c| c.plain_text().replace('\n', " "))
                        .unwrap_or_default()
                })
                .collect()
        })
        .collect();

    let mut widths = vec![3usize; col_count];
    for row in &rows {
        for (i, text) in row.iter().enumerate() {
            widths[i] = widths[i].max(text.width());
        }
    }

    let border = {
        let mut line = String::from("+");
        for w in &widths {
            line.push_str(&"-".repeat(w + 2));
            line.push('+');
        }
        line.push('\n');
        line
    };

    let mut output = border.clone();
    for (row_idx, row) in rows.iter().enumerate() {
        output.push('|');
        for (text, w) in row.iter().zip(&widths) {
            let padding = w - text.width();
            output.push_str(&format!(" {}{} |", text, " ".repeat(padding)));
        }
        output.push('\n');

        if row_idx == 0 && table.rows[0].is_header {
            output.push_str(&border.replace('-', "="));
        }
    }
    output.push_str(&border);

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::DocumentBuilder;
    use crate::model::Row;

    #[test]
    fn test_headings_are_underlined() {
        let mut builder = DocumentBuilder::new();
        builder
            .add_heading("Manual", 0)
            .add_heading("1. Intro", 1)
            .add_heading("1.1 About", 2);
        let text = to_text(&builder.build(), &RenderOptions::default()).unwrap();
        assert_eq!(text, "Manual\n======\n\n1. Intro\n--------\n\n1.1 About\n");
    }

    #[test]
    fn test_list_markers() {
        let mut builder = DocumentBuilder::new();
        builder
            .add_numbered_list(["Open", "Log in"])
            .add_bullet("Dashboard")
            .add_bullet_level("Calendar", 1);
        let text = to_text(&builder.build(), &RenderOptions::default()).unwrap();
        assert_eq!(text, "1. Open\n2. Log in\n• Dashboard\n  • Calendar\n");
    }

    #[test]
    fn test_table_uses_display_width() {
        let mut builder = DocumentBuilder::new();
        builder.add_table(
            Some(Row::header(["Code", "Meaning"])),
            vec![Row::from_texts(["DO", "休み"])],
            "LightGridAccent1",
        );
        let text = to_text(&builder.build(), &RenderOptions::default()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "+------+---------+");
        assert_eq!(lines[1], "| Code | Meaning |");
        assert_eq!(lines[2], "+======+=========+");
        assert_eq!(lines[3], "| DO   | 休み    |");
        assert_eq!(lines[4], "+------+---------+");
    }

    #[test]
    fn test_page_break_is_form_feed() {
        let mut builder = DocumentBuilder::new();
        builder.add_paragraph("a").add_page_break().add_paragraph("b");
        let text = to_text(&builder.build(), &RenderOptions::default()).unwrap();
        assert_eq!(text, "a\n\n\n\x0C\n\nb\n");
    }
}
