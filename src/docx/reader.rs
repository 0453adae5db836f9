//! Reads a DOCX package back into the document model.
//!
//! Only the constructs the writer produces are interpreted: paragraph styles,
//! direct and style-inherited numbering, basic run formatting, tables and
//! page breaks. Everything else is skipped.

use std::collections::HashMap;
use std::path::Path;

use quick_xml::events::{BytesStart, Event};

use crate::container::OoxmlContainer;
use crate::error::Result;
use crate::model::{
    Block, Cell, Document, HeadingLevel, ListInfo, ListType, Paragraph, Row, Section, Table,
    TextAlignment, TextRun,
};

use super::numbering::NumberingMap;
use super::parts;
use super::styles::StyleSheet;
use super::xml;

/// Parser for DOCX (Word) documents.
pub struct DocxReader {
    container: OoxmlContainer,
    styles: StyleSheet,
    numbering: NumberingMap,
}

impl DocxReader {
    /// Open a DOCX file for reading.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_container(OoxmlContainer::open(path)?)
    }

    /// Create a reader from bytes.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        Self::from_container(OoxmlContainer::from_bytes(data)?)
    }

    fn from_container(container: OoxmlContainer) -> Result<Self> {
        let styles = if container.exists(parts::STYLES_PART) {
            StyleSheet::parse(&container.read_xml(parts::STYLES_PART)?)?
        } else {
            StyleSheet::default()
        };
        let numbering = if container.exists(parts::NUMBERING_PART) {
            NumberingMap::parse(&container.read_xml(parts::NUMBERING_PART)?)?
        } else {
            NumberingMap::default()
        };

        Ok(Self {
            container,
            styles,
            numbering,
        })
    }

    /// The underlying package.
    pub fn container(&self) -> &OoxmlContainer {
        &self.container
    }

    /// Parse the document and return a Document model.
    ///
    /// Each Heading 1 paragraph opens a new section named after it.
    pub fn parse(&self) -> Result<Document> {
        let metadata = self.container.parse_core_metadata()?;
        let xml = self.container.read_xml(parts::DOCUMENT_PART)?;

        let mut body = BodyParser::new(&self.styles, &self.numbering);
        body.parse_body(&xml)?;

        let mut doc = Document::new();
        doc.metadata = metadata;
        for section in body.finish() {
            doc.add_section(section);
        }

        tracing::debug!(
            sections = doc.sections.len(),
            blocks = doc.total_blocks(),
            "parsed document body"
        );
        Ok(doc)
    }
}

/// A table being assembled, with its open row and cell.
#[derive(Default)]
struct TableState {
    table: Table,
    row: Option<Row>,
    cell: Option<Cell>,
}

struct BodyParser<'a> {
    styles: &'a StyleSheet,
    numbering: &'a NumberingMap,
    /// Last number emitted per numbering instance
    counters: HashMap<u32, u32>,
    sections: Vec<Section>,
    current: Section,
    tables: Vec<TableState>,
    para: Option<Paragraph>,
    /// Direct numbering (numId, ilvl) of the open paragraph
    para_num: (Option<u32>, u8),
    page_break: bool,
    run: Option<TextRun>,
    in_ppr: bool,
    in_num_pr: bool,
    in_rpr: bool,
    in_text: bool,
}

impl<'a> BodyParser<'a> {
    fn new(styles: &'a StyleSheet, numbering: &'a NumberingMap) -> Self {
        Self {
            styles,
            numbering,
            counters: HashMap::new(),
            sections: Vec::new(),
            current: Section::new(0),
            tables: Vec::new(),
            para: None,
            para_num: (None, 0),
            page_break: false,
            run: None,
            in_ppr: false,
            in_num_pr: false,
            in_rpr: false,
            in_text: false,
        }
    }

    fn parse_body(&mut self, xml: &str) -> Result<()> {
        let mut reader = quick_xml::Reader::from_str(xml);
        // xml:space="preserve" text must keep its whitespace
        reader.config_mut().trim_text(false);

        loop {
            match reader.read_event()? {
                Event::Start(ref e) => self.start(e),
                Event::Empty(ref e) => {
                    if e.name().as_ref() == b"w:p" {
                        self.begin_paragraph();
                        self.end_paragraph();
                    } else {
                        self.empty(e);
                    }
                }
                Event::Text(ref e) if self.in_text => {
                    let text = e.unescape()?;
                    if let Some(run) = self.run.as_mut() {
                        run.text.push_str(&text);
                    }
                }
                Event::End(ref e) => self.end(e.name().as_ref()),
                Event::Eof => break,
                _ => {}
            }
        }
        Ok(())
    }

    fn start(&mut self, e: &BytesStart) {
        match e.name().as_ref() {
            b"w:p" => self.begin_paragraph(),
            b"w:pPr" if self.para.is_some() => self.in_ppr = true,
            b"w:numPr" if self.in_ppr => self.in_num_pr = true,
            b"w:r" if self.para.is_some() => self.run = Some(TextRun::plain("")),
            b"w:rPr" if self.run.is_some() => self.in_rpr = true,
            b"w:t" if self.run.is_some() => self.in_text = true,
            b"w:tbl" => self.tables.push(TableState::default()),
            b"w:tr" => {
                if let Some(state) = self.tables.last_mut() {
                    state.row = Some(Row::new());
                }
            }
            b"w:tc" => {
                if let Some(state) = self.tables.last_mut() {
                    state.cell = Some(Cell::new());
                }
            }
            _ => {}
        }
    }

    fn empty(&mut self, e: &BytesStart) {
        let name = e.name();
        let value = || xml::attr_value(e, b"w:val");

        if self.in_rpr {
            if let Some(run) = self.run.as_mut() {
                let style = &mut run.style;
                match name.as_ref() {
                    b"w:b" => style.bold = xml::toggle_value(e),
                    b"w:i" => style.italic = xml::toggle_value(e),
                    b"w:u" => style.underline = value().is_some_and(|v| v != "none"),
                    b"w:sz" => style.size = value().and_then(|v| v.parse().ok()),
                    b"w:color" => style.color = value().filter(|v| v != "auto"),
                    _ => {}
                }
            }
            return;
        }

        match name.as_ref() {
            b"w:pStyle" if self.in_ppr => {
                if let (Some(para), Some(id)) = (self.para.as_mut(), value()) {
                    para.style_id = Some(id);
                }
            }
            b"w:jc" if self.in_ppr => {
                if let (Some(para), Some(v)) = (self.para.as_mut(), value()) {
                    para.alignment = TextAlignment::from_ooxml(&v);
                }
            }
            b"w:ilvl" if self.in_num_pr => {
                self.para_num.1 = value().and_then(|v| v.parse().ok()).unwrap_or(0);
            }
            b"w:numId" if self.in_num_pr => {
                self.para_num.0 = value().and_then(|v| v.parse().ok());
            }
            b"w:br" if self.run.is_some() => {
                if xml::attr_value(e, b"w:type").as_deref() == Some("page") {
                    self.page_break = true;
                } else if let Some(run) = self.run.as_mut() {
                    run.text.push('\n');
                }
            }
            b"w:tab" if self.run.is_some() => {
                if let Some(run) = self.run.as_mut() {
                    run.text.push('\t');
                }
            }
            b"w:tblStyle" => {
                if let Some(state) = self.tables.last_mut() {
                    state.table.style_id = value();
                }
            }
            b"w:tblHeader" => {
                if let Some(row) = self.tables.last_mut().and_then(|s| s.row.as_mut()) {
                    row.is_header = xml::toggle_value(e);
                }
            }
            _ => {}
        }
    }

    fn end(&mut self, name: &[u8]) {
        match name {
            b"w:pPr" => self.in_ppr = false,
            b"w:numPr" => self.in_num_pr = false,
            b"w:rPr" => self.in_rpr = false,
            b"w:t" => self.in_text = false,
            b"w:r" => {
                if let (Some(run), Some(para)) = (self.run.take(), self.para.as_mut()) {
                    if !run.is_empty() {
                        para.add_run(run);
                    }
                }
            }
            b"w:p" => self.end_paragraph(),
            b"w:tc" => {
                if let Some(state) = self.tables.last_mut() {
                    if let (Some(mut cell), Some(row)) = (state.cell.take(), state.row.as_mut()) {
                        cell.is_header = row.is_header;
                        row.add_cell(cell);
                    }
                }
            }
            b"w:tr" => {
                if let Some(state) = self.tables.last_mut() {
                    if let Some(row) = state.row.take() {
                        state.table.add_row(row);
                    }
                }
            }
            b"w:tbl" => {
                if let Some(state) = self.tables.pop() {
                    self.finish_table(state.table);
                }
            }
            _ => {}
        }
    }

    fn begin_paragraph(&mut self) {
        self.para = Some(Paragraph::new());
        self.para_num = (None, 0);
        self.page_break = false;
    }

    fn end_paragraph(&mut self) {
        let Some(mut para) = self.para.take() else {
            return;
        };
        para.merge_adjacent_runs();
        self.resolve_style(&mut para);

        // Paragraphs inside a table belong to the open cell.
        if let Some(cell) = self.tables.last_mut().and_then(|s| s.cell.as_mut()) {
            cell.content.push(para);
            return;
        }

        let page_break = std::mem::take(&mut self.page_break);
        if !(page_break && para.is_empty()) {
            if para.heading == HeadingLevel::H1 {
                self.open_section(para.plain_text());
            }
            self.current.add_block(Block::Paragraph(para));
        }
        if page_break {
            self.current.add_block(Block::PageBreak);
        }
    }

    /// Derive heading level and list membership from the paragraph style and
    /// numbering, keeping an explicit style only when it is not implied.
    fn resolve_style(&mut self, para: &mut Paragraph) {
        let style_id = para.style_id.take();
        let style = style_id.as_deref().and_then(|id| self.styles.get(id));

        para.heading = match (style, style_id.as_deref()) {
            (Some(style), _) => style.heading_level(),
            (None, Some(id)) => HeadingLevel::from_style_id(id),
            (None, None) => HeadingLevel::None,
        };

        let inherited = style.and_then(|s| s.paragraph_props.numbering);
        let numbering = match self.para_num {
            (Some(num_id), level) => Some((num_id, level)),
            (None, _) => inherited,
        };
        para.list_info = numbering
            .filter(|(num_id, _)| *num_id != 0)
            .and_then(|(num_id, level)| self.list_info(num_id, level));

        if let Some(id) = style_id {
            if para.effective_style_id() != id {
                para.style_id = Some(id);
            }
        }
    }

    fn list_info(&mut self, num_id: u32, level: u8) -> Option<ListInfo> {
        let list_type = self.numbering.list_type(num_id, level)?;
        let number = match list_type {
            ListType::Bullet => None,
            ListType::Numbered => {
                let start = self
                    .numbering
                    .instances
                    .iter()
                    .find(|n| n.num_id == num_id)
                    .and_then(|n| n.start_override)
                    .unwrap_or(1);
                let counter = self
                    .counters
                    .entry(num_id)
                    .and_modify(|n| *n += 1)
                    .or_insert(start);
                Some(*counter)
            }
        };
        Some(ListInfo {
            list_type,
            level,
            number,
        })
    }

    fn finish_table(&mut self, table: Table) {
        // A nested table is flattened into the enclosing cell as text.
        if let Some(cell) = self.tables.last_mut().and_then(|s| s.cell.as_mut()) {
            cell.content.push(Paragraph::with_text(table.plain_text()));
            return;
        }
        self.current.add_block(Block::Table(table));
    }

    fn open_section(&mut self, name: String) {
        let index = self.sections.len() + 1;
        let previous = std::mem::replace(&mut self.current, Section::with_name(index, name));
        if !previous.is_empty() || previous.name.is_some() {
            self.sections.push(previous);
        } else {
            self.current.index -= 1;
        }
    }

    fn finish(mut self) -> Vec<Section> {
        if !self.current.is_empty() || self.current.name.is_some() {
            self.sections.push(self.current);
        }
        self.sections
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::DocumentBuilder;
    use crate::docx::DocxWriter;
    use crate::model::TextStyle;

    fn roundtrip(builder: DocumentBuilder) -> Document {
        let bytes = DocxWriter::new()
            .with_created("2025-10-01T00:00:00Z")
            .to_bytes(&builder.build())
            .unwrap();
        DocxReader::from_bytes(bytes).unwrap().parse().unwrap()
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
    fn test_headings_open_sections() {
        let mut builder = DocumentBuilder::new();
        builder
            .add_heading("Manual", 0)
            .add_page_break()
            .add_heading("1. Introduction", 1)
            .add_heading("1.1 About", 2)
            .add_heading("2. Client Panel", 1);
        let doc = roundtrip(builder);

        assert_eq!(doc.sections.len(), 3);
        assert_eq!(doc.sections[0].name, None);
        assert_eq!(doc.sections[0].content[1], Block::PageBreak);
        assert_eq!(doc.sections[1].name.as_deref(), Some("1. Introduction"));
        assert_eq!(doc.sections[2].index, 2);

        let paras = paragraphs(&doc);
        assert_eq!(paras[0].heading, HeadingLevel::Title);
        assert_eq!(paras[2].heading, HeadingLevel::H2);
        assert_eq!(paras[2].style_id, None);
    }

    #[test]
    fn test_list_numbers_restart_per_run() {
        let mut builder = DocumentBuilder::new();
        builder
            .add_numbered_list(["a", "b", "c"])
            .add_bold_paragraph("Then:")
            .add_numbered_list(["d", "e"])
            .add_bullet_level("nested", 1);
        let doc = roundtrip(builder);

        let lists: Vec<(ListType, u8, Option<u32>)> = paragraphs(&doc)
            .iter()
            .filter_map(|p| p.list_info.as_ref())
            .map(|l| (l.list_type, l.level, l.number))
            .collect();
        assert_eq!(
            lists,
            vec![
                (ListType::Numbered, 0, Some(1)),
                (ListType::Numbered, 0, Some(2)),
                (ListType::Numbered, 0, Some(3)),
                (ListType::Numbered, 0, Some(1)),
                (ListType::Numbered, 0, Some(2)),
                (ListType::Bullet, 1, None),
            ]
        );
    }

    #[test]
    fn test_runs_and_alignment_survive() {
        let mut builder = DocumentBuilder::new();
        builder
            .add_styled_paragraph(
                "Complete User Manual",
                TextStyle::new().with_point_size(18),
                TextAlignment::Center,
            )
            .add_labeled_bullet("Client Panel", "For employees\nand leads");
        let doc = roundtrip(builder);
        let paras = paragraphs(&doc);

        assert_eq!(paras[0].alignment, TextAlignment::Center);
        assert_eq!(paras[0].runs[0].style.size, Some(36));
        assert!(paras[1].runs[0].style.bold);
        assert_eq!(paras[1].plain_text(), "Client Panel: For employees\nand leads");
        assert_eq!(paras[1].effective_style_id(), "ListBullet");
    }

    #[test]
    fn test_tables_roundtrip() {
        let mut builder = DocumentBuilder::new();
        builder.add_table(
            Some(Row::header(["Code", "Meaning"])),
            vec![Row::from_texts(["DO", "Day Off"]), Row::from_texts(["L"])],
            "LightGridAccent1",
        );
        let doc = roundtrip(builder);
        let Some(Block::Table(table)) = doc.blocks().next() else {
            panic!("expected a table");
        };

        assert_eq!(table.style_id.as_deref(), Some("LightGridAccent1"));
        assert_eq!(table.header_rows().len(), 1);
        assert_eq!(table.row_count(), 3);
        assert_eq!(table.rows[1].cells[1].plain_text(), "Day Off");
        assert!(table.rows[2].cells[1].is_empty());
        assert!(table.rows[0].cells[0].is_header);
    }

    #[test]
    fn test_metadata_is_read() {
        let meta = crate::model::Metadata {
            title: Some("Roster Manual".to_string()),
            ..Default::default()
        };
        let mut builder = DocumentBuilder::with_metadata(meta);
        builder.add_paragraph("x");
        let doc = roundtrip(builder);
        assert_eq!(doc.metadata.title.as_deref(), Some("Roster Manual"));
        assert_eq!(doc.metadata.created.as_deref(), Some("2025-10-01T00:00:00Z"));
    }
}
