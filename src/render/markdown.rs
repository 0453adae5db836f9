//! Markdown renderer implementation.

use crate::error::Result;
use crate::model::{Block, Document, HeadingLevel, ListType, Paragraph, Table, TextRun};

use super::options::RenderOptions;

/// Convert a Document to Markdown.
///
/// The document title becomes `#` and each heading level sits one below it,
/// so chapter headings render as `##`.
pub fn to_markdown(doc: &Document, options: &RenderOptions) -> Result<String> {
    let mut output = String::new();

    if options.include_frontmatter {
        output.push_str(&render_frontmatter(doc));
    }

    let mut prev_was_list = false;
    for block in doc.blocks() {
        match block {
            Block::Paragraph(para) => {
                let is_list = para.is_list_item();
                // Consecutive list items stay in one list.
                if prev_was_list && !is_list && options.paragraph_spacing {
                    output.push('\n');
                }
                let rendered = render_paragraph(para, options);
                if rendered.is_empty() && !options.include_empty_paragraphs {
                    prev_was_list = is_list;
                    continue;
                }
                output.push_str(&rendered);
                output.push('\n');
                if !is_list && options.paragraph_spacing {
                    output.push('\n');
                }
                prev_was_list = is_list;
            }
            Block::Table(table) => {
                if prev_was_list {
                    output.push('\n');
                }
                output.push_str(&render_table(table, options));
                output.push('\n');
                prev_was_list = false;
            }
            Block::PageBreak => {
                if prev_was_list {
                    output.push('\n');
                }
                output.push_str("---\n\n");
                prev_was_list = false;
            }
        }
    }

    Ok(format!("{}\n", output.trim_end()))
}

/// Render YAML frontmatter from document metadata.
fn render_frontmatter(doc: &Document) -> String {
    let mut fm = String::from("---\n");
    let meta = &doc.metadata;

    if let Some(ref title) = meta.title {
        fm.push_str(&format!("title: \"{}\"\n", escape_yaml(title)));
    }
    if let Some(ref author) = meta.author {
        fm.push_str(&format!("author: \"{}\"\n", escape_yaml(author)));
    }
    if let Some(ref subject) = meta.subject {
        fm.push_str(&format!("subject: \"{}\"\n", escape_yaml(subject)));
    }
    if let Some(ref created) = meta.created {
        fm.push_str(&format!("created: \"{}\"\n", created));
    }
    if let Some(ref modified) = meta.modified {
        fm.push_str(&format!("modified: \"{}\"\n", modified));
    }
    if !meta.keywords.is_empty() {
        fm.push_str("keywords:\n");
        for keyword in &meta.keywords {
            fm.push_str(&format!("  - \"{}\"\n", escape_yaml(keyword)));
        }
    }
    if let Some(ref app) = meta.application {
        fm.push_str(&format!("application: \"{}\"\n", escape_yaml(app)));
    }

    fm.push_str("---\n\n");
    fm
}

/// Escape special characters in YAML strings.
fn escape_yaml(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

fn heading_prefix(level: HeadingLevel, options: &RenderOptions) -> Option<String> {
    let depth = match level {
        HeadingLevel::None => return None,
        HeadingLevel::Title => 1,
        other => other.level().unwrap_or(1) + 1,
    };
    Some("#".repeat(depth.min(options.max_heading_level) as usize))
}

/// Render a paragraph to Markdown.
fn render_paragraph(para: &Paragraph, options: &RenderOptions) -> String {
    let mut para = para.clone();
    para.merge_adjacent_runs();

    let text: String = para.runs.iter().map(|r| render_run(r, options)).collect();
    let text = text.trim_end();

    if let Some(prefix) = heading_prefix(para.heading, options) {
        // Headings cannot span lines or carry emphasis.
        let plain = para.plain_text().replace('\n', " ");
        return format!("{} {}", prefix, plain.trim());
    }

    match para.list_info {
        Some(ref info) => {
            let indent = "  ".repeat(info.level as usize);
            let marker = match info.list_type {
                ListType::Bullet => options.list_marker.to_string(),
                ListType::Numbered => format!("{}.", info.number.unwrap_or(1)),
            };
            format!("{}{} {}", indent, marker, text)
        }
        None => text.to_string(),
    }
}

/// Render a text run to Markdown.
fn render_run(run: &TextRun, options: &RenderOptions) -> String {
    if run.is_empty() {
        return String::new();
    }

    let text = if options.escape_special_chars {
        escape_markdown(&run.text)
    } else {
        run.text.clone()
    };
    let break_marker = if options.preserve_line_breaks { "  \n" } else { " " };
    let text = text.replace('\n', break_marker);

    let marker = match (run.style.bold, run.style.italic) {
        (true, true) => "***",
        (true, false) => "**",
        (false, true) => "*",
        (false, false) => return text,
    };
    emphasize(&text, marker)
}

/// Wrap text in emphasis markers, keeping surrounding whitespace outside
/// them so `**Note:** ` stays valid.
fn emphasize(text: &str, marker: &str) -> String {
    let inner = text.trim();
    if inner.is_empty() {
        return text.to_string();
    }
    let leading = &text[..text.len() - text.trim_start().len()];
    let trailing = &text[text.trim_end().len()..];
    format!("{}{}{}{}{}", leading, marker, inner, marker, trailing)
}

/// Escape Markdown special characters.
///
/// `\`, `` ` `` and `|` are always escaped; `*` and `_` only where they
/// could open or close emphasis.
fn escape_markdown(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let chars: Vec<char> = s.chars().collect();

    for (i, &c) in chars.iter().enumerate() {
        match c {
            '\\' | '`' | '|' => {
                result.push('\\');
                result.push(c);
            }
            '*' | '_' => {
                let prev = if i > 0 { Some(chars[i - 1]) } else { None };
                let next = chars.get(i + 1).copied();
                let after_opener = prev.is_none_or(|p| {
                    matches!(p, '(' | '[' | '{' | ':' | '-' | '/' | '\\') || p.is_whitespace()
                });
                let before_closer = next.is_none_or(|n| {
                    matches!(n, ')' | ']' | '}' | ':' | '-' | '/' | '\\') || n.is_whitespace()
                });
                if !(after_opener || before_closer) {
                    result.push('\\');
                }
                result.push(c);
            }
            _ => result.push(c),
        }
    }
    result
}

/// Render a table as a pipe table.
///
/// Markdown needs a header row; a table without one promotes its first row.
fn render_table(table: &Table, options: &RenderOptions) -> String {
    let col_count = table.column_count();
    if col_count == 0 {
        return String::new();
    }

    let mut output = String::new();
    for (i, row) in table.rows.iter().enumerate() {
        output.push('|');
        for index in 0..col_count {
            let text = row
                .cells
                .get(index)
                .map(|cell| {
                    cell.content
                        .iter()
                        .map(|p| {
                            p.runs
                                .iter()
                                .map(|r| render_run(r, options))
                                .collect::<String>()
                        })
                        .collect::<Vec<_>>()
                        .join("<br>")
                        .replace("  \n", "<br>")
                        .replace('\n', " ")
                })
                .unwrap_or_default();
            if text.is_empty() {
                output.push_str(" |");
            } else {
                output.push_str(&format!(" {} |", text.trim()));
            }
        }
        output.push('\n');

        if i == 0 {
            output.push('|');
            output.push_str(&" --- |".repeat(col_count));
            output.push('\n');
        }
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::DocumentBuilder;
    use crate::model::{Metadata, Row};

    fn render(builder: DocumentBuilder) -> String {
        to_markdown(&builder.build(), &RenderOptions::default()).unwrap()
    }

    #[test]
    fn test_heading_levels() {
        let mut builder = DocumentBuilder::new();
        builder
            .add_heading("Cartup CxP", 0)
            .add_heading("1. Introduction", 1)
            .add_heading("1.1 About", 2);
        let md = render(builder);
        assert!(md.starts_with("# Cartup CxP\n\n## 1. Introduction\n\n### 1.1 About\n"));
    }

    #[test]
    fn test_max_heading_level_capped() {
        let mut builder = DocumentBuilder::new();
        builder.add_heading("Deep", 6);
        let options = RenderOptions::new().with_max_heading(4);
        let md = to_markdown(&builder.build(), &options).unwrap();
        assert_eq!(md, "#### Deep\n");
    }

    #[test]
    fn test_lists_and_callouts() {
        let mut builder = DocumentBuilder::new();
        builder
            .add_bold_paragraph("Steps:")
            .add_numbered_list(["Open", "Log in"])
            .add_bullet_level("Nested", 1)
            .add_callout("Note:", "Remember *this*");
        let md = render(builder);
        assert!(md.contains("**Steps:**\n\n1. Open\n2. Log in\n  - Nested\n\n"));
        assert!(md.contains("**Note:** Remember *this*"));
    }

    #[test]
    fn test_table_without_header_promotes_first_row() {
        let mut builder = DocumentBuilder::new();
        builder.add_table(
            None,
            vec![
                Row::from_texts(["1.", "Introduction", "3"]),
                Row::from_texts(["2.", "Client | Panel"]),
            ],
            "LightGridAccent1",
        );
        let md = render(builder);
        assert!(md.contains("| 1. | Introduction | 3 |\n| --- | --- | --- |\n"));
        assert!(md.contains("| 2. | Client \\| Panel | |\n"));
    }

    #[test]
    fn test_page_break_and_line_breaks() {
        let mut builder = DocumentBuilder::new();
        builder
            .add_paragraph("Line one\nLine two")
            .add_page_break()
            .add_paragraph("After");
        let md = render(builder);
        assert_eq!(md, "Line one  \nLine two\n\n---\n\nAfter\n");

        let mut builder = DocumentBuilder::new();
        builder.add_paragraph("a\nb");
        let options = RenderOptions::new().with_preserve_breaks(false);
        assert_eq!(to_markdown(&builder.build(), &options).unwrap(), "a b\n");
    }

    #[test]
    fn test_frontmatter() {
        let builder = DocumentBuilder::with_metadata(Metadata {
            title: Some("Test \"Title\"".to_string()),
            author: Some("Test Author".to_string()),
            ..Default::default()
        });
        let options = RenderOptions::new().with_frontmatter(true);
        let md = to_markdown(&builder.build(), &options).unwrap();
        assert!(md.starts_with("---\n"));
        assert!(md.contains("title: \"Test \\\"Title\\\"\""));
        assert!(md.contains("author: \"Test Author\""));
    }

    #[test]
    fn test_escape_markdown() {
        assert_eq!(escape_markdown("snake_case_name"), "snake\\_case\\_name");
        assert_eq!(escape_markdown("GET /api/*"), "GET /api/*");
        assert_eq!(escape_markdown("a|b"), "a\\|b");
    }

    #[test]
    fn test_emphasize_keeps_whitespace_outside() {
        assert_eq!(emphasize("Note: ", "**"), "**Note:** ");
        assert_eq!(emphasize("  ", "**"), "  ");
    }
}
