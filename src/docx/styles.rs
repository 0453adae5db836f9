//! DOCX style sheet (word/styles.xml).
//!
//! The writer emits a fixed set of paragraph and table styles close to the
//! ones in Word's default template; the parser reads enough of a style sheet
//! back to map paragraph styles to headings and lists.

use crate::error::Result;
use crate::model::HeadingLevel;

use super::numbering::{BULLET_NUM_ID, DECIMAL_NUM_ID};
use super::xml::{self, XmlWriter, NS_W};

/// Style type (paragraph, character, table, etc.)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleType {
    Paragraph,
    Character,
    Table,
    Numbering,
}

impl StyleType {
    fn as_str(&self) -> &'static str {
        match self {
            StyleType::Paragraph => "paragraph",
            StyleType::Character => "character",
            StyleType::Table => "table",
            StyleType::Numbering => "numbering",
        }
    }

    fn parse(value: &str) -> Option<Self> {
        match value {
            "paragraph" => Some(StyleType::Paragraph),
            "character" => Some(StyleType::Character),
            "table" => Some(StyleType::Table),
            "numbering" => Some(StyleType::Numbering),
            _ => None,
        }
    }
}

/// Paragraph-level properties of a style.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParagraphProps {
    pub keep_next: bool,
    /// (numId, ilvl) for list styles
    pub numbering: Option<(u32, u8)>,
    pub spacing_before: Option<u32>,
    pub spacing_after: Option<u32>,
    pub indent_left: Option<u32>,
    pub indent_hanging: Option<u32>,
    pub contextual_spacing: bool,
}

/// Run-level (character) properties of a style.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunProps {
    pub bold: Option<bool>,
    pub italic: Option<bool>,
    pub font_name: Option<String>,
    /// Half-points
    pub font_size: Option<u32>,
    pub color: Option<String>,
}

/// Banded table look: border colour and header row treatment.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableProps {
    pub border_color: String,
    /// Draw inside horizontal/vertical borders (grid) or only the outline (list)
    pub inside_borders: bool,
    pub header_fill: Option<String>,
    pub header_color: Option<String>,
}

/// A style definition.
#[derive(Debug, Clone, PartialEq)]
pub struct Style {
    /// Style ID (e.g., "Heading1")
    pub id: String,
    /// Style name (e.g., "heading 1")
    pub name: String,
    /// Style type
    pub style_type: StyleType,
    /// Whether this is the default style of its type
    pub is_default: bool,
    /// Based on another style
    pub based_on: Option<String>,
    /// Style for the following paragraph
    pub next: Option<String>,
    /// Outline level (for headings, 0-based)
    pub outline_level: Option<u8>,
    pub paragraph_props: ParagraphProps,
    pub run_props: RunProps,
    pub table_props: Option<TableProps>,
}

impl Style {
    fn paragraph(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            style_type: StyleType::Paragraph,
            is_default: false,
            based_on: Some("Normal".to_string()),
            next: None,
            outline_level: None,
            paragraph_props: ParagraphProps::default(),
            run_props: RunProps::default(),
            table_props: None,
        }
    }

    fn table(id: &str, name: &str, props: Option<TableProps>) -> Self {
        Self {
            style_type: StyleType::Table,
            based_on: Some("TableNormal".to_string()),
            table_props: props,
            ..Self::paragraph(id, name)
        }
    }

    /// The heading level this style represents.
    pub fn heading_level(&self) -> HeadingLevel {
        match self.outline_level {
            Some(level) => HeadingLevel::from_number(level + 1),
            None => HeadingLevel::from_style_id(&self.id),
        }
    }

    fn write(&self, w: &mut XmlWriter) -> Result<()> {
        let mut attrs = vec![("w:type", self.style_type.as_str())];
        if self.is_default {
            attrs.push(("w:default", "1"));
        }
        attrs.push(("w:styleId", self.id.as_str()));
        xml::start(w, "w:style", &attrs)?;
        xml::val(w, "w:name", &self.name)?;
        if let Some(ref based_on) = self.based_on {
            xml::val(w, "w:basedOn", based_on)?;
        }
        if let Some(ref next) = self.next {
            xml::val(w, "w:next", next)?;
        }
        xml::val(w, "w:uiPriority", if self.is_default { "0" } else { "9" })?;
        xml::empty(w, "w:qFormat", &[])?;

        if self.style_type == StyleType::Paragraph {
            self.write_paragraph_props(w)?;
        }
        write_run_props(w, &self.run_props)?;
        if self.style_type == StyleType::Table {
            self.write_table_props(w)?;
        }

        if let Some(ref table) = self.table_props {
            if table.header_fill.is_some() || table.header_color.is_some() {
                xml::start(w, "w:tblStylePr", &[("w:type", "firstRow")])?;
                xml::start(w, "w:rPr", &[])?;
                xml::empty(w, "w:b", &[])?;
                if let Some(ref color) = table.header_color {
                    xml::val(w, "w:color", color)?;
                }
                xml::end(w, "w:rPr")?;
                if let Some(ref fill) = table.header_fill {
                    xml::start(w, "w:tcPr", &[])?;
                    xml::empty(
                        w,
                        "w:shd",
                        &[("w:val", "clear"), ("w:color", "auto"), ("w:fill", fill.as_str())],
                    )?;
                    xml::end(w, "w:tcPr")?;
                }
                xml::end(w, "w:tblStylePr")?;
            }
        }

        xml::end(w, "w:style")
    }

    fn write_paragraph_props(&self, w: &mut XmlWriter) -> Result<()> {
        let props = &self.paragraph_props;
        if *props == ParagraphProps::default() && self.outline_level.is_none() {
            return Ok(());
        }
        xml::start(w, "w:pPr", &[])?;
        if props.keep_next {
            xml::empty(w, "w:keepNext", &[])?;
            xml::empty(w, "w:keepLines", &[])?;
        }
        if let Some((num_id, ilvl)) = props.numbering {
            xml::start(w, "w:numPr", &[])?;
            xml::val(w, "w:ilvl", &ilvl.to_string())?;
            xml::val(w, "w:numId", &num_id.to_string())?;
            xml::end(w, "w:numPr")?;
        }
        if props.spacing_before.is_some() || props.spacing_after.is_some() {
            let before = props.spacing_before.unwrap_or(0).to_string();
            let after = props.spacing_after.unwrap_or(0).to_string();
            xml::empty(w, "w:spacing", &[("w:before", before.as_str()), ("w:after", after.as_str())])?;
        }
        if let Some(left) = props.indent_left {
            let left = left.to_string();
            let hanging = props.indent_hanging.unwrap_or(0).to_string();
            xml::empty(w, "w:ind", &[("w:left", left.as_str()), ("w:hanging", hanging.as_str())])?;
        }
        if props.contextual_spacing {
            xml::empty(w, "w:contextualSpacing", &[])?;
        }
        if let Some(level) = self.outline_level {
            xml::val(w, "w:outlineLvl", &level.to_string())?;
        }
        xml::end(w, "w:pPr")
    }

    fn write_table_props(&self, w: &mut XmlWriter) -> Result<()> {
        xml::start(w, "w:tblPr", &[])?;
        xml::empty(w, "w:tblInd", &[("w:w", "0"), ("w:type", "dxa")])?;
        if let Some(ref table) = self.table_props {
            xml::start(w, "w:tblBorders", &[])?;
            let mut edges = vec!["w:top", "w:left", "w:bottom", "w:right"];
            if table.inside_borders {
                edges.extend(["w:insideH", "w:insideV"]);
            }
            for edge in edges {
                xml::empty(
                    w,
                    edge,
                    &[
                        ("w:val", "single"),
                        ("w:sz", "8"),
                        ("w:space", "0"),
                        ("w:color", table.border_color.as_str()),
                    ],
                )?;
            }
            xml::end(w, "w:tblBorders")?;
        }
        xml::start(w, "w:tblCellMar", &[])?;
        xml::empty(w, "w:left", &[("w:w", "108"), ("w:type", "dxa")])?;
        xml::empty(w, "w:right", &[("w:w", "108"), ("w:type", "dxa")])?;
        xml::end(w, "w:tblCellMar")?;
        xml::end(w, "w:tblPr")
    }
}

fn write_run_props(w: &mut XmlWriter, props: &RunProps) -> Result<()> {
    if *props == RunProps::default() {
        return Ok(());
    }
    xml::start(w, "w:rPr", &[])?;
    if let Some(ref font) = props.font_name {
        xml::empty(
            w,
            "w:rFonts",
            &[
                ("w:ascii", font.as_str()),
                ("w:hAnsi", font.as_str()),
                ("w:cs", font.as_str()),
            ],
        )?;
    }
    if let Some(bold) = props.bold {
        xml::val(w, "w:b", if bold { "1" } else { "0" })?;
    }
    if let Some(italic) = props.italic {
        xml::val(w, "w:i", if italic { "1" } else { "0" })?;
    }
    if let Some(ref color) = props.color {
        xml::val(w, "w:color", color)?;
    }
    if let Some(size) = props.font_size {
        let size = size.to_string();
        xml::val(w, "w:sz", &size)?;
        xml::val(w, "w:szCs", &size)?;
    }
    xml::end(w, "w:rPr")
}

/// Collection of styles for styles.xml.
#[derive(Debug, Clone, Default)]
pub struct StyleSheet {
    /// Styles in document order
    pub styles: Vec<Style>,
}

const HEADING_COLORS: [&str; 6] = ["365F91", "4F81BD", "4F81BD", "4F81BD", "243F60", "243F60"];
const HEADING_SIZES: [u32; 6] = [28, 26, 24, 22, 22, 22];
const ACCENT_1: &str = "4F81BD";

impl StyleSheet {
    /// The built-in styles every generated document carries.
    pub fn builtin() -> Self {
        let mut styles = Vec::new();

        let mut normal = Style::paragraph("Normal", "Normal");
        normal.is_default = true;
        normal.based_on = None;
        normal.paragraph_props.spacing_after = Some(200);
        normal.run_props.font_name = Some("Calibri".to_string());
        normal.run_props.font_size = Some(22);
        styles.push(normal);

        let mut title = Style::paragraph("Title", "Title");
        title.next = Some("Normal".to_string());
        title.paragraph_props.spacing_after = Some(300);
        title.paragraph_props.contextual_spacing = true;
        title.run_props.font_name = Some("Cambria".to_string());
        title.run_props.font_size = Some(52);
        title.run_props.color = Some("17365D".to_string());
        styles.push(title);

        let mut subtitle = Style::paragraph("Subtitle", "Subtitle");
        subtitle.next = Some("Normal".to_string());
        subtitle.run_props.italic = Some(true);
        subtitle.run_props.font_size = Some(24);
        subtitle.run_props.color = Some(ACCENT_1.to_string());
        styles.push(subtitle);

        for level in 1..=6u8 {
            let idx = (level - 1) as usize;
            let mut heading = Style::paragraph(
                &format!("Heading{}", level),
                &format!("heading {}", level),
            );
            heading.next = Some("Normal".to_string());
            heading.outline_level = Some(level - 1);
            heading.paragraph_props.keep_next = true;
            heading.paragraph_props.spacing_before = Some(if level == 1 { 480 } else { 200 });
            heading.paragraph_props.spacing_after = Some(0);
            heading.run_props.font_name = Some("Cambria".to_string());
            heading.run_props.bold = Some(true);
            heading.run_props.font_size = Some(HEADING_SIZES[idx]);
            heading.run_props.color = Some(HEADING_COLORS[idx].to_string());
            styles.push(heading);
        }

        let list_styles = [
            ("ListBullet", "List Bullet", BULLET_NUM_ID, 0u8, 360u32),
            ("ListBullet2", "List Bullet 2", BULLET_NUM_ID, 1, 720),
            ("ListNumber", "List Number", DECIMAL_NUM_ID, 0, 360),
        ];
        for (id, name, num_id, ilvl, indent) in list_styles {
            let mut style = Style::paragraph(id, name);
            style.paragraph_props.numbering = Some((num_id, ilvl));
            style.paragraph_props.indent_left = Some(indent);
            style.paragraph_props.indent_hanging = Some(360);
            style.paragraph_props.contextual_spacing = true;
            styles.push(style);
        }

        let mut table_normal = Style::table("TableNormal", "Normal Table", None);
        table_normal.is_default = true;
        table_normal.based_on = None;
        styles.push(table_normal);

        styles.push(Style::table(
            "TableGrid",
            "Table Grid",
            Some(TableProps {
                border_color: "000000".to_string(),
                inside_borders: true,
                header_fill: None,
                header_color: None,
            }),
        ));
        styles.push(Style::table(
            "LightGridAccent1",
            "Light Grid Accent 1",
            Some(TableProps {
                border_color: ACCENT_1.to_string(),
                inside_borders: true,
                header_fill: None,
                header_color: None,
            }),
        ));
        styles.push(Style::table(
            "LightListAccent1",
            "Light List Accent 1",
            Some(TableProps {
                border_color: ACCENT_1.to_string(),
                inside_borders: false,
                header_fill: Some(ACCENT_1.to_string()),
                header_color: Some("FFFFFF".to_string()),
            }),
        ));

        Self { styles }
    }

    /// Get a style by ID.
    pub fn get(&self, id: &str) -> Option<&Style> {
        self.styles.iter().find(|s| s.id == id)
    }

    /// Check if a style ID is defined.
    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Find a style ID from its display name ("Light Grid Accent 1").
    pub fn id_for_name(&self, name: &str) -> Option<&str> {
        self.styles
            .iter()
            .find(|s| s.name.eq_ignore_ascii_case(name))
            .map(|s| s.id.as_str())
    }

    /// Serialise to styles.xml.
    pub fn to_xml(&self) -> Result<Vec<u8>> {
        let mut w = xml::new_writer()?;
        xml::start(&mut w, "w:styles", &[("xmlns:w", NS_W)])?;

        xml::start(&mut w, "w:docDefaults", &[])?;
        xml::start(&mut w, "w:rPrDefault", &[])?;
        write_run_props(
            &mut w,
            &RunProps {
                font_name: Some("Calibri".to_string()),
                font_size: Some(22),
                ..Default::default()
            },
        )?;
        xml::end(&mut w, "w:rPrDefault")?;
        xml::start(&mut w, "w:pPrDefault", &[])?;
        xml::start(&mut w, "w:pPr", &[])?;
        xml::empty(
            &mut w,
            "w:spacing",
            &[("w:after", "200"), ("w:line", "276"), ("w:lineRule", "auto")],
        )?;
        xml::end(&mut w, "w:pPr")?;
        xml::end(&mut w, "w:pPrDefault")?;
        xml::end(&mut w, "w:docDefaults")?;

        for style in &self.styles {
            style.write(&mut w)?;
        }

        xml::end(&mut w, "w:styles")?;
        xml::finish(w)
    }

    /// Parse a style sheet from XML content.
    ///
    /// Only identity, outline level and list numbering are recovered.
    pub fn parse(xml_content: &str) -> Result<Self> {
        use quick_xml::events::Event;

        if xml_content.trim().is_empty() {
            return Ok(Self::default());
        }

        let mut sheet = StyleSheet::default();
        let mut reader = quick_xml::Reader::from_str(xml_content);
        reader.config_mut().trim_text(true);

        let mut buf = Vec::new();
        let mut current: Option<Style> = None;

        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Start(ref e) if e.name().as_ref() == b"w:style" => {
                    let style_type = xml::attr_value(e, b"w:type")
                        .and_then(|t| StyleType::parse(&t))
                        .unwrap_or(StyleType::Paragraph);
                    let id = xml::attr_value(e, b"w:styleId").unwrap_or_default();
                    let mut style = Style::paragraph(&id, &id);
                    style.style_type = style_type;
                    style.based_on = None;
                    style.is_default = xml::attr_value(e, b"w:default").as_deref() == Some("1");
                    current = Some(style);
                }
                Event::Empty(ref e) => {
                    if let Some(ref mut style) = current {
                        match e.name().as_ref() {
                            b"w:name" => {
                                if let Some(name) = xml::attr_value(e, b"w:val") {
                                    style.name = name;
                                }
                            }
                            b"w:basedOn" => style.based_on = xml::attr_value(e, b"w:val"),
                            b"w:next" => style.next = xml::attr_value(e, b"w:val"),
                            b"w:outlineLvl" => {
                                style.outline_level =
                                    xml::attr_value(e, b"w:val").and_then(|v| v.parse().ok());
                            }
                            b"w:numId" => {
                                let num_id = xml::attr_value(e, b"w:val").and_then(|v| v.parse().ok());
                                let level = style.paragraph_props.numbering.map_or(0, |(_, l)| l);
                                style.paragraph_props.numbering = num_id.map(|id| (id, level));
                            }
                            b"w:ilvl" => {
                                let level = xml::attr_value(e, b"w:val")
                                    .and_then(|v| v.parse().ok())
                                    .unwrap_or(0);
                                let num_id = style.paragraph_props.numbering.map_or(0, |(id, _)| id);
                                style.paragraph_props.numbering = Some((num_id, level));
                            }
                            _ => {}
                        }
                    }
                }
                Event::End(ref e) if e.name().as_ref() == b"w:style" => {
                    if let Some(style) = current.take() {
                        if !style.id.is_empty() {
                            sheet.styles.push(style);
                        }
                    }
                }
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        Ok(sheet)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_contains_manual_styles() {
        let sheet = StyleSheet::builtin();
        for id in [
            "Normal",
            "Title",
            "Heading1",
            "Heading2",
            "ListBullet",
            "ListBullet2",
            "ListNumber",
            "LightGridAccent1",
            "LightListAccent1",
        ] {
            assert!(sheet.contains(id), "missing style {}", id);
        }
        assert_eq!(sheet.id_for_name("Light Grid Accent 1"), Some("LightGridAccent1"));
        assert_eq!(sheet.id_for_name("list bullet 2"), Some("ListBullet2"));
    }

    #[test]
    fn test_roundtrip_through_xml() {
        let sheet = StyleSheet::builtin();
        let bytes = sheet.to_xml().unwrap();
        let xml = String::from_utf8(bytes).unwrap();
        assert!(xml.contains("w:styleId=\"Heading1\""));
        assert!(xml.contains("<w:tblStylePr w:type=\"firstRow\">"));

        let parsed = StyleSheet::parse(&xml).unwrap();
        assert_eq!(parsed.styles.len(), sheet.styles.len());

        let h2 = parsed.get("Heading2").unwrap();
        assert_eq!(h2.name, "heading 2");
        assert_eq!(h2.outline_level, Some(1));
        assert_eq!(h2.heading_level(), HeadingLevel::H2);
        assert_eq!(parsed.get("Title").unwrap().heading_level(), HeadingLevel::Title);
        assert_eq!(
            parsed.get("ListBullet").unwrap().heading_level(),
            HeadingLevel::None
        );
        assert!(parsed.get("Normal").unwrap().is_default);
        assert_eq!(
            parsed.get("LightListAccent1").unwrap().style_type,
            StyleType::Table
        );
    }

    #[test]
    fn test_parse_empty() {
        let sheet = StyleSheet::parse("  ").unwrap();
        assert!(sheet.styles.is_empty());
    }
}
