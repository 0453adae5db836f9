//! Rendering options configuration.

/// Options for rendering documents.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Maximum heading level (1-6)
    pub max_heading_level: u8,

    /// Include YAML frontmatter with metadata
    pub include_frontmatter: bool,

    /// Preserve line breaks within paragraphs
    pub preserve_line_breaks: bool,

    /// Include empty paragraphs in output
    pub include_empty_paragraphs: bool,

    /// Character for unordered list markers
    pub list_marker: char,

    /// Add blank line between paragraphs
    pub paragraph_spacing: bool,

    /// Escape special Markdown characters
    pub escape_special_chars: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            max_heading_level: 6,
            include_frontmatter: false,
            preserve_line_breaks: true,
            include_empty_paragraphs: false,
            list_marker: '-',
            paragraph_spacing: true,
            escape_special_chars: true,
        }
    }
}

impl RenderOptions {
    /// Create new render options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable YAML frontmatter.
    pub fn with_frontmatter(mut self, include: bool) -> Self {
        self.include_frontmatter = include;
        self
    }

    /// Set maximum heading level.
    pub fn with_max_heading(mut self, level: u8) -> Self {
        self.max_heading_level = level.clamp(1, 6);
        self
    }

    /// Preserve line breaks within paragraphs.
    pub fn with_preserve_breaks(mut self, preserve: bool) -> Self {
        self.preserve_line_breaks = preserve;
        self
    }

    /// Set the unordered list marker (`-`, `*` or `+`).
    pub fn with_list_marker(mut self, marker: char) -> Self {
        if matches!(marker, '-' | '*' | '+') {
            self.list_marker = marker;
        }
        self
    }

    /// Toggle escaping of Markdown special characters.
    pub fn with_escaping(mut self, escape: bool) -> Self {
        self.escape_special_chars = escape;
        self
    }

    /// Keep or drop empty paragraphs.
    pub fn with_empty_paragraphs(mut self, include: bool) -> Self {
        self.include_empty_paragraphs = include;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let opts = RenderOptions::default();
        assert!(!opts.include_frontmatter);
        assert_eq!(opts.list_marker, '-');
        assert_eq!(opts.max_heading_level, 6);
    }

    #[test]
    fn test_builder_pattern() {
        let opts = RenderOptions::new()
            .with_frontmatter(true)
            .with_list_marker('*')
            .with_list_marker('x')
            .with_escaping(false);

        assert!(opts.include_frontmatter);
        assert_eq!(opts.list_marker, '*');
        assert!(!opts.escape_special_chars);
    }

    #[test]
    fn test_max_heading_clamp() {
        let opts = RenderOptions::new().with_max_heading(10);
        assert_eq!(opts.max_heading_level, 6);

        let opts = RenderOptions::new().with_max_heading(0);
        assert_eq!(opts.max_heading_level, 1);
    }
}
