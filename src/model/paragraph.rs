//! Paragraph and text run models.

use serde::{Deserialize, Serialize};

/// Text alignment within a paragraph.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlignment {
    #[default]
    Left,
    Center,
    Right,
    Justify,
}

impl TextAlignment {
    /// The `w:jc` value for this alignment.
    pub fn as_ooxml(&self) -> &'static str {
        match self {
            TextAlignment::Left => "left",
            TextAlignment::Center => "center",
            TextAlignment::Right => "right",
            TextAlignment::Justify => "both",
        }
    }

    /// Parse a `w:jc` value.
    pub fn from_ooxml(value: &str) -> Self {
        match value {
            "center" => TextAlignment::Center,
            "right" | "end" => TextAlignment::Right,
            "both" | "distribute" => TextAlignment::Justify,
            _ => TextAlignment::Left,
        }
    }
}

/// Heading level: the document title, h1-h6, or none.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum HeadingLevel {
    #[default]
    None,
    Title,
    H1,
    H2,
    H3,
    H4,
    H5,
    H6,
}

impl HeadingLevel {
    /// Create a heading level from a number.
    ///
    /// Level 0 is the document title, 1-6 are regular headings.
    pub fn from_number(n: u8) -> Self {
        match n {
            0 => HeadingLevel::Title,
            1 => HeadingLevel::H1,
            2 => HeadingLevel::H2,
            3 => HeadingLevel::H3,
            4 => HeadingLevel::H4,
            5 => HeadingLevel::H5,
            6 => HeadingLevel::H6,
            _ => HeadingLevel::None,
        }
    }

    /// Get the numeric level (0 for the title, 1-6 for headings).
    pub fn level(&self) -> Option<u8> {
        match self {
            HeadingLevel::None => None,
            HeadingLevel::Title => Some(0),
            HeadingLevel::H1 => Some(1),
            HeadingLevel::H2 => Some(2),
            HeadingLevel::H3 => Some(3),
            HeadingLevel::H4 => Some(4),
            HeadingLevel::H5 => Some(5),
            HeadingLevel::H6 => Some(6),
        }
    }

    /// The paragraph style ID used for this heading level.
    pub fn style_id(&self) -> Option<String> {
        match self {
            HeadingLevel::None => None,
            HeadingLevel::Title => Some("Title".to_string()),
            other => other.level().map(|n| format!("Heading{}", n)),
        }
    }

    /// Map a paragraph style ID back to a heading level.
    pub fn from_style_id(style_id: &str) -> Self {
        if style_id == "Title" {
            return HeadingLevel::Title;
        }
        style_id
            .strip_prefix("Heading")
            .and_then(|n| n.parse::<u8>().ok())
            .filter(|n| (1..=6).contains(n))
            .map(HeadingLevel::from_number)
            .unwrap_or(HeadingLevel::None)
    }

    /// Check if this is a heading (not None).
    pub fn is_heading(&self) -> bool {
        !matches!(self, HeadingLevel::None)
    }

    fn is_none(&self) -> bool {
        matches!(self, HeadingLevel::None)
    }
}

/// List type for paragraphs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListType {
    /// Unordered (bulleted) list
    #[default]
    Bullet,
    /// Ordered (numbered) list
    Numbered,
}

/// List information for a paragraph.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListInfo {
    /// Type of list
    pub list_type: ListType,
    /// Nesting level (0 = top level)
    pub level: u8,
    /// Item number (for numbered lists)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<u32>,
}

impl ListInfo {
    /// A bullet item at the given nesting level.
    pub fn bullet(level: u8) -> Self {
        Self {
            list_type: ListType::Bullet,
            level,
            number: None,
        }
    }

    /// A numbered item carrying its position in the list.
    pub fn numbered(number: u32) -> Self {
        Self {
            list_type: ListType::Numbered,
            level: 0,
            number: Some(number),
        }
    }
}

/// Text style properties.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    /// Bold text
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub bold: bool,

    /// Italic text
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub italic: bool,

    /// Underlined text
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub underline: bool,

    /// Font size in half-points (e.g., 36 = 18pt)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u32>,

    /// Text color (hex, e.g., "1F3864")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl TextStyle {
    /// Create a new default style.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a bold style.
    pub fn bold() -> Self {
        Self {
            bold: true,
            ..Default::default()
        }
    }

    /// Create an italic style.
    pub fn italic() -> Self {
        Self {
            italic: true,
            ..Default::default()
        }
    }

    /// Set the font size in points.
    pub fn with_point_size(mut self, points: u32) -> Self {
        self.size = Some(points * 2);
        self
    }

    /// Check if style has any formatting.
    pub fn has_formatting(&self) -> bool {
        self.bold || self.italic || self.underline || self.size.is_some() || self.color.is_some()
    }
}

/// A run of text with consistent styling.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextRun {
    /// The text content
    pub text: String,

    /// Text styling
    #[serde(default, skip_serializing_if = "is_default_style")]
    pub style: TextStyle,
}

fn is_default_style(style: &TextStyle) -> bool {
    *style == TextStyle::default()
}

impl TextRun {
    /// Create a plain text run with no styling.
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: TextStyle::default(),
        }
    }

    /// Create a bold text run.
    pub fn bold(text: impl Into<String>) -> Self {
        Self::styled(text, TextStyle::bold())
    }

    /// Create a styled text run.
    pub fn styled(text: impl Into<String>, style: TextStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }

    /// Check if this run is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// A paragraph of text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Paragraph {
    /// Text runs in this paragraph
    #[serde(default)]
    pub runs: Vec<TextRun>,

    /// Heading level
    #[serde(default, skip_serializing_if = "HeadingLevel::is_none")]
    pub heading: HeadingLevel,

    /// Text alignment
    #[serde(default, skip_serializing_if = "is_default_alignment")]
    pub alignment: TextAlignment,

    /// List information
    #[serde(skip_serializing_if = "Option::is_none")]
    pub list_info: Option<ListInfo>,

    /// Explicit paragraph style ID (headings and lists derive theirs)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style_id: Option<String>,
}

fn is_default_alignment(a: &TextAlignment) -> bool {
    *a == TextAlignment::Left
}

impl Paragraph {
    /// Create a new empty paragraph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a paragraph with the given text.
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            runs: vec![TextRun::plain(text)],
            ..Default::default()
        }
    }

    /// Create a paragraph from runs.
    pub fn with_runs(runs: Vec<TextRun>) -> Self {
        Self {
            runs,
            ..Default::default()
        }
    }

    /// Create a heading paragraph.
    pub fn heading(level: HeadingLevel, text: impl Into<String>) -> Self {
        Self {
            runs: vec![TextRun::plain(text)],
            heading: level,
            ..Default::default()
        }
    }

    /// Add a text run to this paragraph.
    pub fn add_run(&mut self, run: TextRun) {
        self.runs.push(run);
    }

    /// Get the plain text content.
    pub fn plain_text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }

    /// Check if this paragraph is empty.
    pub fn is_empty(&self) -> bool {
        self.runs.is_empty() || self.runs.iter().all(|r| r.is_empty())
    }

    /// Check if this paragraph is a heading.
    pub fn is_heading(&self) -> bool {
        self.heading.is_heading()
    }

    /// Check if this paragraph is a list item.
    pub fn is_list_item(&self) -> bool {
        self.list_info.is_some()
    }

    /// The style ID this paragraph is written with.
    ///
    /// Headings and list items derive their style; everything else uses the
    /// explicit style, falling back to Normal.
    pub fn effective_style_id(&self) -> String {
        if let Some(id) = self.heading.style_id() {
            return id;
        }
        if let Some(ref id) = self.style_id {
            return id.clone();
        }
        match self.list_info {
            Some(ListInfo {
                list_type: ListType::Numbered,
                ..
            }) => "ListNumber".to_string(),
            Some(ListInfo { level: 0, .. }) => "ListBullet".to_string(),
            Some(ListInfo { .. }) => "ListBullet2".to_string(),
            None => "Normal".to_string(),
        }
    }

    /// Merge consecutive runs with the same style.
    pub fn merge_adjacent_runs(&mut self) {
        if self.runs.len() <= 1 {
            return;
        }

        let mut merged: Vec<TextRun> = Vec::with_capacity(self.runs.len());

        for run in self.runs.drain(..) {
            match merged.last_mut() {
                Some(last) if last.style == run.style => last.text.push_str(&run.text),
                _ => merged.push(run),
            }
        }

        self.runs = merged;
    }
}
