//! DOCX numbering (list) definitions (word/numbering.xml).

use crate::error::Result;
use crate::model::ListType;

use super::xml::{self, NS_W};

/// Numbering instance used by bullet lists (and the List Bullet styles).
pub const BULLET_NUM_ID: u32 = 1;
/// Numbering instance used by the List Number style.
pub const DECIMAL_NUM_ID: u32 = 2;

const BULLET_ABSTRACT_ID: u32 = 0;
const DECIMAL_ABSTRACT_ID: u32 = 1;
const BULLET_GLYPHS: [&str; 3] = ["•", "◦", "▪"];

/// Abstract numbering definition.
#[derive(Debug, Clone, PartialEq)]
pub struct AbstractNum {
    /// Abstract numbering ID
    pub id: u32,
    /// Levels (0-8)
    pub levels: Vec<NumLevel>,
}

/// A numbering level definition.
#[derive(Debug, Clone, PartialEq)]
pub struct NumLevel {
    /// Level index (0-8)
    pub level: u8,
    /// Start value
    pub start: u32,
    /// Number format (decimal, bullet, lowerLetter, etc.)
    pub num_fmt: String,
    /// Level text (e.g., "%1.", "•")
    pub level_text: String,
    /// Left indent in twips
    pub indent_left: u32,
}

impl NumLevel {
    /// Get the list type for this level.
    pub fn list_type(&self) -> ListType {
        match self.num_fmt.as_str() {
            "decimal" | "lowerLetter" | "upperLetter" | "lowerRoman" | "upperRoman" => {
                ListType::Numbered
            }
            _ => ListType::Bullet,
        }
    }
}

/// Concrete numbering instance.
#[derive(Debug, Clone, PartialEq)]
pub struct NumInstance {
    /// Numbering ID referenced from paragraphs
    pub num_id: u32,
    /// Abstract numbering ID
    pub abstract_num_id: u32,
    /// Restart level 0 at this value
    pub start_override: Option<u32>,
}

/// Collection of numbering definitions.
#[derive(Debug, Clone, Default)]
pub struct NumberingMap {
    /// Abstract numbering definitions
    pub abstract_nums: Vec<AbstractNum>,
    /// Numbering instances
    pub instances: Vec<NumInstance>,
}

impl NumberingMap {
    /// Definitions for one bullet list and one decimal list.
    pub fn standard() -> Self {
        let bullet = AbstractNum {
            id: BULLET_ABSTRACT_ID,
            levels: BULLET_GLYPHS
                .iter()
                .enumerate()
                .map(|(i, glyph)| NumLevel {
                    level: i as u8,
                    start: 1,
                    num_fmt: "bullet".to_string(),
                    level_text: glyph.to_string(),
                    indent_left: 360 * (i as u32 + 1),
                })
                .collect(),
        };
        let decimal = AbstractNum {
            id: DECIMAL_ABSTRACT_ID,
            levels: (0..3u8)
                .map(|i| NumLevel {
                    level: i,
                    start: 1,
                    num_fmt: "decimal".to_string(),
                    level_text: format!("%{}.", i + 1),
                    indent_left: 360 * (i as u32 + 1),
                })
                .collect(),
        };

        Self {
            abstract_nums: vec![bullet, decimal],
            instances: vec![
                NumInstance {
                    num_id: BULLET_NUM_ID,
                    abstract_num_id: BULLET_ABSTRACT_ID,
                    start_override: None,
                },
                NumInstance {
                    num_id: DECIMAL_NUM_ID,
                    abstract_num_id: DECIMAL_ABSTRACT_ID,
                    start_override: None,
                },
            ],
        }
    }

    /// Allocate a numbering instance for a new numbered list restarting at 1.
    pub fn start_numbered_list(&mut self) -> u32 {
        let num_id = self.instances.iter().map(|n| n.num_id).max().unwrap_or(0) + 1;
        self.instances.push(NumInstance {
            num_id,
            abstract_num_id: DECIMAL_ABSTRACT_ID,
            start_override: Some(1),
        });
        num_id
    }

    /// Resolve the list type of a numbering instance at a level.
    pub fn list_type(&self, num_id: u32, level: u8) -> Option<ListType> {
        let instance = self.instances.iter().find(|n| n.num_id == num_id)?;
        let abstract_num = self
            .abstract_nums
            .iter()
            .find(|a| a.id == instance.abstract_num_id)?;
        abstract_num
            .levels
            .iter()
            .find(|l| l.level == level)
            .or_else(|| abstract_num.levels.first())
            .map(|l| l.list_type())
    }

    /// Serialise to numbering.xml.
    pub fn to_xml(&self) -> Result<Vec<u8>> {
        let mut w = xml::new_writer()?;
        xml::start(&mut w, "w:numbering", &[("xmlns:w", NS_W)])?;

        for abstract_num in &self.abstract_nums {
            let id = abstract_num.id.to_string();
            xml::start(&mut w, "w:abstractNum", &[("w:abstractNumId", id.as_str())])?;
            xml::val(&mut w, "w:multiLevelType", "hybridMultilevel")?;
            for level in &abstract_num.levels {
                let ilvl = level.level.to_string();
                xml::start(&mut w, "w:lvl", &[("w:ilvl", ilvl.as_str())])?;
                xml::val(&mut w, "w:start", &level.start.to_string())?;
                xml::val(&mut w, "w:numFmt", &level.num_fmt)?;
                xml::val(&mut w, "w:lvlText", &level.level_text)?;
                xml::val(&mut w, "w:lvlJc", "left")?;
                xml::start(&mut w, "w:pPr", &[])?;
                let left = level.indent_left.to_string();
                xml::empty(
                    &mut w,
                    "w:ind",
                    &[("w:left", left.as_str()), ("w:hanging", "360")],
                )?;
                xml::end(&mut w, "w:pPr")?;
                xml::end(&mut w, "w:lvl")?;
            }
            xml::end(&mut w, "w:abstractNum")?;
        }

        for instance in &self.instances {
            let num_id = instance.num_id.to_string();
            xml::start(&mut w, "w:num", &[("w:numId", num_id.as_str())])?;
            xml::val(&mut w, "w:abstractNumId", &instance.abstract_num_id.to_string())?;
            if let Some(start) = instance.start_override {
                xml::start(&mut w, "w:lvlOverride", &[("w:ilvl", "0")])?;
                xml::val(&mut w, "w:startOverride", &start.to_string())?;
                xml::end(&mut w, "w:lvlOverride")?;
            }
            xml::end(&mut w, "w:num")?;
        }

        xml::end(&mut w, "w:numbering")?;
        xml::finish(w)
    }

    /// Parse numbering from XML content.
    pub fn parse(xml_content: &str) -> Result<Self> {
        use quick_xml::events::Event;

        let mut map = NumberingMap::default();
        let mut reader = quick_xml::Reader::from_str(xml_content);
        reader.config_mut().trim_text(true);

        let mut buf = Vec::new();
        let mut current_abstract: Option<AbstractNum> = None;
        let mut current_level: Option<NumLevel> = None;
        let mut current_num: Option<NumInstance> = None;

        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Start(ref e) => match e.name().as_ref() {
                    b"w:abstractNum" => {
                        let id = xml::attr_value(e, b"w:abstractNumId")
                            .and_then(|v| v.parse().ok())
                            .unwrap_or(0);
                        current_abstract = Some(AbstractNum {
                            id,
                            levels: Vec::new(),
                        });
                    }
                    b"w:lvl" if current_abstract.is_some() => {
                        let level = xml::attr_value(e, b"w:ilvl")
                            .and_then(|v| v.parse().ok())
                            .unwrap_or(0);
                        current_level = Some(NumLevel {
                            level,
                            start: 1,
                            num_fmt: "bullet".to_string(),
                            level_text: String::new(),
                            indent_left: 0,
                        });
                    }
                    b"w:num" => {
                        let num_id = xml::attr_value(e, b"w:numId")
                            .and_then(|v| v.parse().ok())
                            .unwrap_or(0);
                        current_num = Some(NumInstance {
                            num_id,
                            abstract_num_id: 0,
                            start_override: None,
                        });
                    }
                    _ => {}
                },
                Event::Empty(ref e) => {
                    let value = xml::attr_value(e, b"w:val");
                    match e.name().as_ref() {
                        b"w:start" => {
                            if let Some(ref mut level) = current_level {
                                level.start = value.and_then(|v| v.parse().ok()).unwrap_or(1);
                            }
                        }
                        b"w:numFmt" => {
                            if let (Some(level), Some(v)) = (current_level.as_mut(), value) {
                                level.num_fmt = v;
                            }
                        }
                        b"w:lvlText" => {
                            if let (Some(level), Some(v)) = (current_level.as_mut(), value) {
                                level.level_text = v;
                            }
                        }
                        b"w:ind" => {
                            if let Some(ref mut level) = current_level {
                                level.indent_left = xml::attr_value(e, b"w:left")
                                    .and_then(|v| v.parse().ok())
                                    .unwrap_or(0);
                            }
                        }
                        b"w:abstractNumId" => {
                            if let Some(ref mut num) = current_num {
                                num.abstract_num_id =
                                    value.and_then(|v| v.parse().ok()).unwrap_or(0);
                            }
                        }
                        b"w:startOverride" => {
                            if let Some(ref mut num) = current_num {
                                num.start_override = value.and_then(|v| v.parse().ok());
                            }
                        }
                        _ => {}
                    }
                }
                Event::End(ref e) => match e.name().as_ref() {
                    b"w:lvl" => {
                        if let (Some(abstract_num), Some(level)) =
                            (current_abstract.as_mut(), current_level.take())
                        {
                            abstract_num.levels.push(level);
                        }
                    }
                    b"w:abstractNum" => {
                        if let Some(abstract_num) = current_abstract.take() {
                            map.abstract_nums.push(abstract_num);
                        }
                    }
                    b"w:num" => {
                        if let Some(num) = current_num.take() {
                            map.instances.push(num);
                        }
                    }
                    _ => {}
                },
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        tracing::trace!(
            abstract_nums = map.abstract_nums.len(),
            instances = map.instances.len(),
            "parsed numbering definitions"
        );

        Ok(map)
    }
}
