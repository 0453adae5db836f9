//! Serialises a [`Document`] into a WordprocessingML package.

use std::path::Path;

use unicode_normalization::UnicodeNormalization;

use crate::builder::continues_numbered_list;
use crate::container::PackageWriter;
use crate::error::Result;
use crate::model::{Block, Document, ListType, Paragraph, Table, TextAlignment, TextRun};

use super::numbering::{NumberingMap, BULLET_NUM_ID};
use super::parts;
use super::styles::StyleSheet;
use super::xml::{self, XmlWriter, NS_R, NS_W};

/// Usable text width of a Letter page with one-inch margins, in twips.
const TEXT_WIDTH: u32 = 9360;
const DEFAULT_TABLE_STYLE: &str = "TableGrid";
const NORMAL_STYLE: &str = "Normal";

/// W3CDTF layout used in docProps/core.xml.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Writes documents as DOCX packages.
///
/// # Example
///
/// ```
/// use rostermanual::builder::DocumentBuilder;
/// use rostermanual::docx::DocxWriter;
///
/// let mut builder = DocumentBuilder::new();
/// builder.add_heading("Manual", 0).add_paragraph("Hello");
/// let bytes = DocxWriter::new()
///     .with_created("2025-10-01T00:00:00Z")
///     .to_bytes(&builder.build())?;
/// assert_eq!(&bytes[..2], b"PK");
/// # Ok::<(), rostermanual::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct DocxWriter {
    styles: StyleSheet,
    numbering: NumberingMap,
    created: Option<String>,
}

impl DocxWriter {
    /// A writer using the built-in style sheet and list definitions.
    pub fn new() -> Self {
        Self {
            styles: StyleSheet::builtin(),
            numbering: NumberingMap::standard(),
            created: None,
        }
    }

    /// Fix the creation timestamp used when the document metadata has none.
    pub fn with_created(mut self, created: impl Into<String>) -> Self {
        self.created = Some(created.into());
        self
    }

    /// Replace the style sheet.
    pub fn with_styles(mut self, styles: StyleSheet) -> Self {
        self.styles = styles;
        self
    }

    /// The style sheet paragraphs and tables are resolved against.
    pub fn styles(&self) -> &StyleSheet {
        &self.styles
    }

    /// Serialise the document to DOCX bytes.
    pub fn to_bytes(&self, doc: &Document) -> Result<Vec<u8>> {
        let mut numbering = self.numbering.clone();
        let body = BodyWriter::new(&self.styles, &mut numbering)?.write(doc)?;

        let created = self
            .created
            .clone()
            .unwrap_or_else(|| chrono::Utc::now().format(TIMESTAMP_FORMAT).to_string());

        let mut package = PackageWriter::new();
        package.add_part(parts::CONTENT_TYPES_PART, &parts::content_types()?)?;
        package.add_part(
            parts::PACKAGE_RELS_PART,
            &parts::relationships_xml(&parts::package_relationships())?,
        )?;
        package.add_part(parts::DOCUMENT_PART, &body)?;
        package.add_part(
            parts::DOCUMENT_RELS_PART,
            &parts::relationships_xml(&parts::document_relationships())?,
        )?;
        package.add_part(parts::STYLES_PART, &self.styles.to_xml()?)?;
        package.add_part(parts::NUMBERING_PART, &numbering.to_xml()?)?;
        package.add_part(parts::SETTINGS_PART, &parts::settings()?)?;
        package.add_part(
            parts::CORE_PART,
            &parts::core_properties(&doc.metadata, &created)?,
        )?;
        package.add_part(parts::APP_PART, &parts::app_properties(&doc.metadata)?)?;

        tracing::debug!(
            parts = package.part_count(),
            document_bytes = body.len(),
            numbering_instances = numbering.instances.len(),
            "assembled DOCX package"
        );

        package.finish()
    }

    /// Serialise the document and write it to `path`.
    pub fn save(&self, doc: &Document, path: impl AsRef<Path>) -> Result<()> {
        let bytes = self.to_bytes(doc)?;
        std::fs::write(path.as_ref(), &bytes)?;
        tracing::debug!(path = %path.as_ref().display(), bytes = bytes.len(), "saved document");
        Ok(())
    }

    /// Serialise the document and write it to `path` without blocking the runtime.
    #[cfg(feature = "async")]
    pub async fn save_async(&self, doc: &Document, path: impl AsRef<Path>) -> Result<()> {
        let bytes = self.to_bytes(doc)?;
        tokio::fs::write(path.as_ref(), bytes).await?;
        Ok(())
    }
}

impl Default for DocxWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// Writes word/document.xml.
struct BodyWriter<'a> {
    w: XmlWriter,
    styles: &'a StyleSheet,
    numbering: &'a mut NumberingMap,
    /// Numbering instance of the numbered list run in progress
    current_list: Option<u32>,
}

impl<'a> BodyWriter<'a> {
    fn new(styles: &'a StyleSheet, numbering: &'a mut NumberingMap) -> Result<Self> {
        Ok(Self {
            w: xml::new_writer()?,
            styles,
            numbering,
            current_list: None,
        })
    }

    fn write(mut self, doc: &Document) -> Result<Vec<u8>> {
        xml::start(
            &mut self.w,
            "w:document",
            &[("xmlns:w", NS_W), ("xmlns:r", NS_R)],
        )?;
        xml::start(&mut self.w, "w:body", &[])?;

        let mut prev: Option<&Block> = None;
        for block in doc.blocks() {
            match block {
                Block::Paragraph(para) => {
                    let num_id = self.list_num_id(para, prev);
                    self.paragraph(para, num_id)?;
                }
                Block::Table(table) => self.table(table)?,
                Block::PageBreak => self.page_break()?,
            }
            prev = Some(block);
        }

        self.section_properties()?;
        xml::end(&mut self.w, "w:body")?;
        xml::end(&mut self.w, "w:document")?;
        xml::finish(self.w)
    }

    /// Numbering instance for a list paragraph; numbered runs each get
    /// their own instance so they restart at 1.
    fn list_num_id(&mut self, para: &Paragraph, prev: Option<&Block>) -> Option<u32> {
        let info = para.list_info.as_ref()?;
        match info.list_type {
            ListType::Bullet => Some(BULLET_NUM_ID),
            ListType::Numbered => {
                let restart = info.number == Some(1) || !continues_numbered_list(prev);
                match self.current_list {
                    Some(id) if !restart => Some(id),
                    _ => {
                        let id = self.numbering.start_numbered_list();
                        self.current_list = Some(id);
                        Some(id)
                    }
                }
            }
        }
    }

    fn paragraph_style(&self, para: &Paragraph) -> String {
        let id = para.effective_style_id();
        if self.styles.contains(&id) {
            id
        } else {
            tracing::warn!(style = %id, "unknown paragraph style, using Normal");
            NORMAL_STYLE.to_string()
        }
    }

    fn paragraph(&mut self, para: &Paragraph, num_id: Option<u32>) -> Result<()> {
        let style = self.paragraph_style(para);
        let level = para.list_info.as_ref().map(|l| l.level).unwrap_or(0);
        let has_props =
            style != NORMAL_STYLE || num_id.is_some() || para.alignment != TextAlignment::Left;

        xml::start(&mut self.w, "w:p", &[])?;
        if has_props {
            xml::start(&mut self.w, "w:pPr", &[])?;
            if style != NORMAL_STYLE {
                xml::val(&mut self.w, "w:pStyle", &style)?;
            }
            if let Some(num_id) = num_id {
                xml::start(&mut self.w, "w:numPr", &[])?;
                xml::val(&mut self.w, "w:ilvl", &level.to_string())?;
                xml::val(&mut self.w, "w:numId", &num_id.to_string())?;
                xml::end(&mut self.w, "w:numPr")?;
            }
            if para.alignment != TextAlignment::Left {
                xml::val(&mut self.w, "w:jc", para.alignment.as_ooxml())?;
            }
            xml::end(&mut self.w, "w:pPr")?;
        }
        for run in para.runs.iter().filter(|r| !r.is_empty()) {
            self.run(run)?;
        }
        xml::end(&mut self.w, "w:p")
    }

    fn run(&mut self, run: &TextRun) -> Result<()> {
        xml::start(&mut self.w, "w:r", &[])?;

        let style = &run.style;
        if style.has_formatting() {
            xml::start(&mut self.w, "w:rPr", &[])?;
            if style.bold {
                xml::empty(&mut self.w, "w:b", &[])?;
            }
            if style.italic {
                xml::empty(&mut self.w, "w:i", &[])?;
            }
            if let Some(ref color) = style.color {
                xml::val(&mut self.w, "w:color", color)?;
            }
            if let Some(size) = style.size {
                let size = size.to_string();
                xml::val(&mut self.w, "w:sz", &size)?;
                xml::val(&mut self.w, "w:szCs", &size)?;
            }
            if style.underline {
                xml::val(&mut self.w, "w:u", "single")?;
            }
            xml::end(&mut self.w, "w:rPr")?;
        }

        let text: String = sanitize(&run.text).nfc().collect();
        let mut segment = String::new();
        for c in text.chars() {
            match c {
                '\n' | '\t' => {
                    self.text_segment(&segment)?;
                    segment.clear();
                    let name = if c == '\n' { "w:br" } else { "w:tab" };
                    xml::empty(&mut self.w, name, &[])?;
                }
                _ => segment.push(c),
            }
        }
        self.text_segment(&segment)?;

        xml::end(&mut self.w, "w:r")
    }

    fn text_segment(&mut self, segment: &str) -> Result<()> {
        if segment.is_empty() {
            return Ok(());
        }
        xml::text_element(&mut self.w, "w:t", &[("xml:space", "preserve")], segment)
    }

    fn page_break(&mut self) -> Result<()> {
        xml::start(&mut self.w, "w:p", &[])?;
        xml::start(&mut self.w, "w:r", &[])?;
        xml::empty(&mut self.w, "w:br", &[("w:type", "page")])?;
        xml::end(&mut self.w, "w:r")?;
        xml::end(&mut self.w, "w:p")
    }

    fn table(&mut self, table: &Table) -> Result<()> {
        let columns = table.column_count();
        if columns == 0 {
            tracing::debug!("skipping empty table");
            return Ok(());
        }

        let style = match table.style_id.as_deref() {
            Some(id) if self.styles.contains(id) => id.to_string(),
            Some(id) => {
                tracing::warn!(style = %id, "unknown table style, using {}", DEFAULT_TABLE_STYLE);
                DEFAULT_TABLE_STYLE.to_string()
            }
            None => DEFAULT_TABLE_STYLE.to_string(),
        };
        let has_header = table.rows.first().is_some_and(|r| r.is_header);
        let col_width = (TEXT_WIDTH / columns as u32).to_string();

        xml::start(&mut self.w, "w:tbl", &[])?;
        xml::start(&mut self.w, "w:tblPr", &[])?;
        xml::val(&mut self.w, "w:tblStyle", &style)?;
        xml::empty(&mut self.w, "w:tblW", &[("w:w", "0"), ("w:type", "auto")])?;
        xml::empty(
            &mut self.w,
            "w:tblLook",
            &[
                ("w:val", "04A0"),
                ("w:firstRow", if has_header { "1" } else { "0" }),
                ("w:lastRow", "0"),
                ("w:firstColumn", "0"),
                ("w:lastColumn", "0"),
                ("w:noHBand", "0"),
                ("w:noVBand", "1"),
            ],
        )?;
        xml::end(&mut self.w, "w:tblPr")?;

        xml::start(&mut self.w, "w:tblGrid", &[])?;
        for _ in 0..columns {
            xml::empty(&mut self.w, "w:gridCol", &[("w:w", col_width.as_str())])?;
        }
        xml::end(&mut self.w, "w:tblGrid")?;

        for row in &table.rows {
            xml::start(&mut self.w, "w:tr", &[])?;
            if row.is_header {
                xml::start(&mut self.w, "w:trPr", &[])?;
                xml::empty(&mut self.w, "w:tblHeader", &[])?;
                xml::end(&mut self.w, "w:trPr")?;
            }
            for index in 0..columns {
                xml::start(&mut self.w, "w:tc", &[])?;
                xml::start(&mut self.w, "w:tcPr", &[])?;
                xml::empty(
                    &mut self.w,
                    "w:tcW",
                    &[("w:w", col_width.as_str()), ("w:type", "dxa")],
                )?;
                xml::end(&mut self.w, "w:tcPr")?;

                // A cell must hold at least one paragraph.
                match row.cells.get(index) {
                    Some(cell) if !cell.content.is_empty() => {
                        for para in &cell.content {
                            let num_id = para
                                .list_info
                                .as_ref()
                                .filter(|l| l.list_type == ListType::Bullet)
                                .map(|_| BULLET_NUM_ID);
                            self.paragraph(para, num_id)?;
                        }
                    }
                    _ => xml::empty(&mut self.w, "w:p", &[])?,
                }
                xml::end(&mut self.w, "w:tc")?;
            }
            xml::end(&mut self.w, "w:tr")?;
        }

        xml::end(&mut self.w, "w:tbl")?;
        self.current_list = None;
        Ok(())
    }

    /// US Letter with one-inch margins.
    fn section_properties(&mut self) -> Result<()> {
        xml::start(&mut self.w, "w:sectPr", &[])?;
        xml::empty(&mut self.w, "w:pgSz", &[("w:w", "12240"), ("w:h", "15840")])?;
        xml::empty(
            &mut self.w,
            "w:pgMar",
            &[
                ("w:top", "1440"),
                ("w:right", "1440"),
                ("w:bottom", "1440"),
                ("w:left", "1440"),
                ("w:header", "720"),
                ("w:footer", "720"),
                ("w:gutter", "0"),
            ],
        )?;
        xml::end(&mut self.w, "w:sectPr")
    }
}

/// Drop characters XML 1.0 cannot carry; carriage returns fold into breaks.
fn sanitize(text: &str) -> String {
    text.replace("\r\n", "\n")
        .chars()
        .filter_map(|c| match c {
            '\r' => Some('\n'),
            '\t' | '\n' => Some(c),
            c if c < ' ' || c == '\u{FFFE}' || c == '\u{FFFF}' => None,
            c => Some(c),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::DocumentBuilder;
    use crate::container::OoxmlContainer;
    use crate::model::Row;

    fn document_xml(doc: &Document) -> String {
        let bytes = DocxWriter::new()
            .with_created("2025-10-01T00:00:00Z")
            .to_bytes(doc)
            .unwrap();
        OoxmlContainer::from_bytes(bytes)
            .unwrap()
            .read_xml(parts::DOCUMENT_PART)
            .unwrap()
    }

    #[test]
    fn test_package_contains_all_parts() {
        let doc = DocumentBuilder::new().build();
        let bytes = DocxWriter::new().to_bytes(&doc).unwrap();
        let container = OoxmlContainer::from_bytes(bytes).unwrap();
        for part in [
            parts::CONTENT_TYPES_PART,
            parts::PACKAGE_RELS_PART,
            parts::DOCUMENT_PART,
            parts::DOCUMENT_RELS_PART,
            parts::STYLES_PART,
            parts::NUMBERING_PART,
            parts::SETTINGS_PART,
            parts::CORE_PART,
            parts::APP_PART,
        ] {
            assert!(container.exists(part), "missing {}", part);
        }
    }

    #[test]
    fn test_heading_and_run_formatting() {
        let mut builder = DocumentBuilder::new();
        builder
            .add_heading("Cartup Manual", 0)
            .align_last(TextAlignment::Center)
            .add_callout("Note:", "Keep < and & intact");
        let xml = document_xml(&builder.build());

        assert!(xml.contains("<w:pStyle w:val=\"Title\"/><w:jc w:val=\"center\"/>"));
        assert!(xml.contains("<w:rPr><w:b/></w:rPr><w:t xml:space=\"preserve\">Note: </w:t>"));
        assert!(xml.contains("Keep &lt; and &amp; intact"));
    }

    #[test]
    fn test_line_breaks_tabs_and_control_characters() {
        let mut builder = DocumentBuilder::new();
        builder.add_paragraph("a\nb\tc\u{0007}d");
        let xml = document_xml(&builder.build());
        assert!(xml.contains(
            "<w:t xml:space=\"preserve\">a</w:t><w:br/><w:t xml:space=\"preserve\">b</w:t><w:tab/><w:t xml:space=\"preserve\">cd</w:t>"
        ));
    }

    #[test]
    fn test_text_is_nfc_normalized() {
        let mut builder = DocumentBuilder::new();
        builder.add_paragraph("Caf\u{0065}\u{0301}");
        let xml = document_xml(&builder.build());
        assert!(xml.contains("Caf\u{00E9}"));
    }

    #[test]
    fn test_numbered_runs_get_separate_instances() {
        let mut builder = DocumentBuilder::new();
        builder
            .add_numbered_list(["one", "two"])
            .add_paragraph("between")
            .add_numbered("again")
            .add_bullet("dot");
        let xml = document_xml(&builder.build());

        assert_eq!(xml.matches("<w:numId w:val=\"3\"/>").count(), 2);
        assert_eq!(xml.matches("<w:numId w:val=\"4\"/>").count(), 1);
        assert_eq!(
            xml.matches(&format!("<w:numId w:val=\"{}\"/>", BULLET_NUM_ID)).count(),
            1
        );
    }

    #[test]
    fn test_table_layout() {
        let mut builder = DocumentBuilder::new();
        builder
            .add_table(
                Some(Row::header(["Role", "Username", "Password"])),
                vec![Row::from_texts(["Admin", "admin"])],
                "LightGridAccent1",
            )
            .add_table(None, vec![Row::from_texts(["1.", "Intro"])], "NoSuchStyle");
        let xml = document_xml(&builder.build());

        assert!(xml.contains("<w:tblStyle w:val=\"LightGridAccent1\"/>"));
        assert!(xml.contains("<w:tblStyle w:val=\"TableGrid\"/>"));
        assert!(xml.contains("<w:gridCol w:w=\"3120\"/>"));
        assert!(xml.contains("<w:trPr><w:tblHeader/></w:trPr>"));
        assert!(xml.contains("w:firstRow=\"1\""));
        assert!(xml.contains("w:firstRow=\"0\""));
        // The short row is padded with an empty cell.
        assert!(xml.contains("<w:tcW w:w=\"3120\" w:type=\"dxa\"/></w:tcPr><w:p/></w:tc>"));
    }

    #[test]
    fn test_page_break_and_section_properties() {
        let mut builder = DocumentBuilder::new();
        builder.add_paragraph("x").add_page_break();
        let xml = document_xml(&builder.build());
        assert!(xml.contains("<w:p><w:r><w:br w:type=\"page\"/></w:r></w:p>"));
        assert!(xml.contains("<w:pgSz w:w=\"12240\" w:h=\"15840\"/>"));
    }

    #[test]
    fn test_fixed_timestamp_is_deterministic() {
        let mut builder = DocumentBuilder::new();
        builder.add_heading("Title", 1).add_numbered_list(["a", "b"]);
        let doc = builder.build();
        let writer = DocxWriter::new().with_created("2025-10-01T00:00:00Z");
        assert_eq!(writer.to_bytes(&doc).unwrap(), writer.to_bytes(&doc).unwrap());
    }

    #[test]
    fn test_sanitize() {
        assert_eq!(sanitize("a\r\nb\rc\u{0000}"), "a\nb\nc");
    }
}
