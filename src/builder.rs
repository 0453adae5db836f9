//! Fluent construction of [`Document`] values.
//!
//! The builder mirrors the calls a word-processor API offers ("add heading",
//! "add paragraph", "add table") and takes care of list numbering so callers
//! only supply literal content.
//!
//! # Example
//!
//! ```
//! use rostermanual::builder::DocumentBuilder;
//! use rostermanual::model::Row;
//!
//! let mut builder = DocumentBuilder::new();
//! builder
//!     .start_section("Introduction")
//!     .add_heading("1. Introduction", 1)
//!     .add_paragraph("Welcome.")
//!     .add_numbered("Open the app")
//!     .add_numbered("Log in")
//!     .add_table(
//!         Some(Row::header(["Code", "Meaning"])),
//!         vec![Row::from_texts(["DO", "Day Off"])],
//!         "LightGridAccent1",
//!     );
//! let doc = builder.build();
//! assert_eq!(doc.stats().list_items, 2);
//! ```

use crate::model::{
    Block, Document, HeadingLevel, ListInfo, ListType, Metadata, Paragraph, Row, Section, Table,
    TextAlignment, TextRun, TextStyle,
};

/// Incrementally assembles a [`Document`].
#[derive(Debug, Default)]
pub struct DocumentBuilder {
    metadata: Metadata,
    sections: Vec<Section>,
    current: Option<Section>,
    /// Number of the last numbered item in the current list run (0 = no run)
    list_counter: u32,
}

impl DocumentBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder with document metadata.
    pub fn with_metadata(metadata: Metadata) -> Self {
        Self {
            metadata,
            ..Default::default()
        }
    }

    /// Close the current section and start a new, named one.
    pub fn start_section(&mut self, name: impl Into<String>) -> &mut Self {
        self.finish_section();
        self.list_counter = 0;
        let name = name.into();
        tracing::debug!(section = %name, "starting section");
        self.current = Some(Section::with_name(self.sections.len(), name));
        self
    }

    /// Add a heading. Level 0 is the document title, 1-6 are headings.
    pub fn add_heading(&mut self, text: impl Into<String>, level: u8) -> &mut Self {
        self.push_paragraph(Paragraph::heading(HeadingLevel::from_number(level), text))
    }

    /// Add a plain paragraph.
    pub fn add_paragraph(&mut self, text: impl Into<String>) -> &mut Self {
        self.push_paragraph(Paragraph::with_text(text))
    }

    /// Add an empty paragraph, used as vertical spacing.
    pub fn add_empty_paragraph(&mut self) -> &mut Self {
        self.push_paragraph(Paragraph::new())
    }

    /// Add a paragraph whose single run is bold.
    pub fn add_bold_paragraph(&mut self, text: impl Into<String>) -> &mut Self {
        self.push_paragraph(Paragraph::with_runs(vec![TextRun::bold(text)]))
    }

    /// Add a paragraph made of explicit runs.
    pub fn add_runs(&mut self, runs: Vec<TextRun>) -> &mut Self {
        self.push_paragraph(Paragraph::with_runs(runs))
    }

    /// Add a paragraph with a single styled run and an alignment.
    pub fn add_styled_paragraph(
        &mut self,
        text: impl Into<String>,
        style: TextStyle,
        alignment: TextAlignment,
    ) -> &mut Self {
        let mut para = Paragraph::with_runs(vec![TextRun::styled(text, style)]);
        para.alignment = alignment;
        self.push_paragraph(para)
    }

    /// Add a "**Label** text" paragraph (notes, tips, warnings).
    pub fn add_callout(&mut self, label: &str, text: impl Into<String>) -> &mut Self {
        self.add_runs(vec![TextRun::bold(format!("{} ", label)), TextRun::plain(text)])
    }

    /// Add a bullet item at the top level.
    pub fn add_bullet(&mut self, text: impl Into<String>) -> &mut Self {
        self.add_bullet_level(text, 0)
    }

    /// Add a bullet item at the given nesting level.
    pub fn add_bullet_level(&mut self, text: impl Into<String>, level: u8) -> &mut Self {
        let mut para = Paragraph::with_text(text);
        para.list_info = Some(ListInfo::bullet(level));
        self.push_paragraph(para)
    }

    /// Add a bullet item of the form "**label:** description".
    pub fn add_labeled_bullet(&mut self, label: &str, text: impl Into<String>) -> &mut Self {
        let mut para = Paragraph::with_runs(vec![
            TextRun::bold(format!("{}: ", label)),
            TextRun::plain(text),
        ]);
        para.list_info = Some(ListInfo::bullet(0));
        self.push_paragraph(para)
    }

    /// Add every item as a top-level bullet.
    pub fn add_bullets<I, S>(&mut self, items: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for item in items {
            self.add_bullet(item);
        }
        self
    }

    /// Add a numbered list item.
    ///
    /// Contiguous numbered items form one list; any other block ends the run
    /// and the next numbered item starts again at 1.
    pub fn add_numbered(&mut self, text: impl Into<String>) -> &mut Self {
        let number = self.list_counter + 1;
        let mut para = Paragraph::with_text(text);
        para.list_info = Some(ListInfo::numbered(number));
        self.push_block(Block::Paragraph(para));
        self.list_counter = number;
        self
    }

    /// Add every item as a numbered list item.
    pub fn add_numbered_list<I, S>(&mut self, items: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for item in items {
            self.add_numbered(item);
        }
        self
    }

    /// Add steps as plain paragraphs carrying a literal "n. " prefix.
    pub fn add_enumerated<I, S>(&mut self, items: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for (i, item) in items.into_iter().enumerate() {
            self.add_paragraph(format!("{}. {}", i + 1, item.as_ref()));
        }
        self
    }

    /// Add a table with an optional header row.
    pub fn add_table(
        &mut self,
        header: Option<Row>,
        rows: Vec<Row>,
        style_id: impl Into<String>,
    ) -> &mut Self {
        let mut table = Table::with_style(style_id);
        if let Some(header) = header {
            table.add_row(header);
        }
        for row in rows {
            table.add_row(row);
        }
        self.push_block(Block::Table(table))
    }

    /// Add a page break.
    pub fn add_page_break(&mut self) -> &mut Self {
        self.push_block(Block::PageBreak)
    }

    /// Set the alignment of the most recently added paragraph.
    pub fn align_last(&mut self, alignment: TextAlignment) -> &mut Self {
        if let Some(Block::Paragraph(para)) = self
            .current
            .as_mut()
            .and_then(|section| section.content.last_mut())
        {
            para.alignment = alignment;
        }
        self
    }

    /// Add an arbitrary paragraph.
    pub fn push_paragraph(&mut self, para: Paragraph) -> &mut Self {
        self.push_block(Block::Paragraph(para))
    }

    fn push_block(&mut self, block: Block) -> &mut Self {
        self.list_counter = 0;
        let index = self.sections.len();
        self.current
            .get_or_insert_with(|| Section::new(index))
            .add_block(block);
        self
    }

    fn finish_section(&mut self) {
        if let Some(section) = self.current.take() {
            self.sections.push(section);
        }
    }

    /// Finish building and return the document.
    pub fn build(mut self) -> Document {
        self.finish_section();
        Document {
            metadata: self.metadata,
            sections: self.sections,
        }
    }
}

/// True when a block continues a numbered list run started by `prev`.
pub(crate) fn continues_numbered_list(prev: Option<&Block>) -> bool {
    matches!(
        prev,
        Some(Block::Paragraph(Paragraph {
            list_info: Some(ListInfo {
                list_type: ListType::Numbered,
                ..
            }),
            ..
        }))
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbers(doc: &Document) -> Vec<Option<u32>> {
        doc.blocks()
            .filter_map(|b| match b {
                Block::Paragraph(p) => p.list_info.as_ref().and_then(|l| l.number),
                _ => None,
            })
            .map(Some)
            .collect()
    }

    #[test]
    fn test_numbering_restarts_after_other_blocks() {
        let mut builder = DocumentBuilder::new();
        builder
            .add_numbered_list(["a", "b", "c"])
            .add_bold_paragraph("Next:")
            .add_numbered_list(["d", "e"]);
        let doc = builder.build();
        assert_eq!(
            numbers(&doc),
            vec![Some(1), Some(2), Some(3), Some(1), Some(2)]
        );
    }

    #[test]
    fn test_sections_are_indexed() {
        let mut builder = DocumentBuilder::new();
        builder
            .add_heading("Title", 0)
            .start_section("One")
            .add_paragraph("x")
            .start_section("Two")
            .add_paragraph("y");
        let doc = builder.build();
        assert_eq!(doc.sections.len(), 3);
        assert_eq!(doc.sections[0].name, None);
        assert_eq!(doc.sections[1].name.as_deref(), Some("One"));
        assert_eq!(doc.sections[2].index, 2);
    }

    #[test]
    fn test_labeled_bullet_runs() {
        let mut builder = DocumentBuilder::new();
        builder.add_labeled_bullet("Client Panel", "For employees");
        let doc = builder.build();
        let Some(Block::Paragraph(para)) = doc.blocks().next() else {
            panic!("expected a paragraph");
        };
        assert_eq!(para.runs.len(), 2);
        assert!(para.runs[0].style.bold);
        assert_eq!(para.runs[0].text, "Client Panel: ");
        assert_eq!(para.effective_style_id(), "ListBullet");
    }

    #[test]
    fn test_align_last_and_enumerated() {
        let mut builder = DocumentBuilder::new();
        builder
            .add_heading("Manual", 0)
            .align_last(TextAlignment::Center)
            .add_enumerated(["Find the user", "Click Delete"]);
        let doc = builder.build();
        let paras: Vec<&Paragraph> = doc
            .blocks()
            .filter_map(|b| match b {
                Block::Paragraph(p) => Some(p),
                _ => None,
            })
            .collect();
        assert_eq!(paras[0].alignment, TextAlignment::Center);
        assert_eq!(paras[1].plain_text(), "1. Find the user");
        assert_eq!(paras[2].plain_text(), "2. Click Delete");
        assert!(!paras[2].is_list_item());
    }

    #[test]
    fn test_table_without_header() {
        let mut builder = DocumentBuilder::new();
        builder.add_table(None, vec![Row::from_texts(["1.", "Intro", "4"])], "LightGridAccent1");
        let doc = builder.build();
        let stats = doc.stats();
        assert_eq!(stats.tables, 1);
        assert_eq!(stats.table_rows, 1);
    }

    #[test]
    fn test_continues_numbered_list() {
        let mut numbered = Paragraph::with_text("x");
        numbered.list_info = Some(ListInfo::numbered(1));
        assert!(continues_numbered_list(Some(&Block::Paragraph(numbered))));
        assert!(!continues_numbered_list(Some(&Block::PageBreak)));
        assert!(!continues_numbered_list(None));
    }
}
