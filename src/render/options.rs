//! Rendering options and configuration.

/// Options for rendering segmented documents.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Maximum heading level (1-6)
    pub max_heading_level: u8,

    /// Include YAML frontmatter with the document metadata
    pub include_frontmatter: bool,

    /// Render sections that have a heading but no content
    pub include_empty_sections: bool,

    /// Collapse runs of whitespace (including line breaks) into single spaces
    pub collapse_whitespace: bool,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum heading level.
    pub fn with_max_heading(mut self, level: u8) -> Self {
        self.max_heading_level = level.clamp(1, 6);
        self
    }

    /// Enable or disable frontmatter.
    pub fn with_frontmatter(mut self, include: bool) -> Self {
        self.include_frontmatter = include;
        self
    }

    /// Enable or disable rendering of sections without content.
    pub fn with_empty_sections(mut self, include: bool) -> Self {
        self.include_empty_sections = include;
        self
    }

    /// Enable or disable whitespace collapsing.
    pub fn with_collapse_whitespace(mut self, collapse: bool) -> Self {
        self.collapse_whitespace = collapse;
        self
    }

    /// Apply the whitespace setting to a piece of text.
    pub(crate) fn normalize(&self, text: &str) -> String {
        if self.collapse_whitespace {
            text.split_whitespace().collect::<Vec<_>>().join(" ")
        } else {
            text.trim().to_string()
        }
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            max_heading_level: 6,
            include_frontmatter: false,
            include_empty_sections: true,
            collapse_whitespace: true,
        }
    }
}
