//! Raw styled text fragments.

use serde::{Deserialize, Serialize};

use crate::segment::StyleParser;

/// A single styled text unit, in extraction order.
///
/// The style is kept as the raw CSS-like string produced by the extractor
/// (`font-family:<name>;font-size:<N>px;...`). Use [`RawFragment::style`] to
/// get the parsed descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawFragment {
    /// Inline text content
    pub text: String,

    /// Raw style attribute
    #[serde(default)]
    pub style: String,
}

impl RawFragment {
    /// Create a fragment from text and a raw style string.
    pub fn new(text: impl Into<String>, style: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: style.into(),
        }
    }

    /// Create a fragment with a synthesized style string.
    pub fn styled(text: impl Into<String>, font_family: &str, font_size: u32) -> Self {
        Self::new(text, StyleDescriptor::new(font_family, font_size).to_css())
    }

    /// Parse the style string. Returns `None` when the family or size is missing.
    pub fn style(&self) -> Option<StyleDescriptor> {
        StyleParser::new().parse(&self.style)
    }
}

/// Font information parsed from a fragment's style string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StyleDescriptor {
    /// Font family name (e.g., "Arial-BoldMT")
    pub font_family: String,

    /// Font size in pixels
    pub font_size: u32,
}

impl StyleDescriptor {
    /// Create a new style descriptor.
    pub fn new(font_family: impl Into<String>, font_size: u32) -> Self {
        Self {
            font_family: font_family.into(),
            font_size,
        }
    }

    /// Format as a style attribute string.
    pub fn to_css(&self) -> String {
        format!(
            "font-family: {}; font-size:{}px",
            self.font_family, self.font_size
        )
    }
}
