//! Style string parsing and heading-marker detection.

use std::sync::OnceLock;

use regex::Regex;

use crate::model::StyleDescriptor;

use super::options::DEFAULT_HEADING_PROBE_CHARS;

fn font_family_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"font-family:(.*?);").expect("font-family pattern is valid"))
}

fn font_size_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"font-size:(\d+)px").expect("font-size pattern is valid"))
}

fn heading_marker_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\w+\.\w*|§").expect("heading marker pattern is valid"))
}

/// Parser for extractor style attributes such as
/// `font-family: Times-Bold; font-size:14px; top:120px`.
///
/// Only the first `font-family` and `font-size` declarations are read.
/// The family declaration must be terminated by `;`. A size of `0px`, or one
/// too large for a `u32`, is treated as malformed like a missing size.
#[derive(Debug, Clone, Copy, Default)]
pub struct StyleParser {
    _private: (),
}

impl StyleParser {
    /// Create a new style parser.
    pub fn new() -> Self {
        Self { _private: () }
    }

    /// Parse a style string, returning `None` when it lacks a usable
    /// font family or font size.
    pub fn parse(&self, style: &str) -> Option<StyleDescriptor> {
        let family = font_family_regex()
            .captures(style)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().trim())?;
        if family.is_empty() {
            return None;
        }

        let size = font_size_regex()
            .captures(style)
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().parse::<u32>().ok())
            .filter(|&size| size > 0)?;

        Some(StyleDescriptor::new(family, size))
    }
}

/// Detects fragments that begin like a numbered or labeled heading:
/// `3.2`, `A.1`, `IV.`, `1.` or a section sign `§`.
#[derive(Debug, Clone, Copy)]
pub struct HeadingProbe {
    chars: usize,
}

impl HeadingProbe {
    /// Create a probe inspecting the first `chars` characters of a text.
    pub fn new(chars: usize) -> Self {
        Self { chars }
    }

    /// Check whether the leading characters of `text` contain a heading marker.
    pub fn is_heading_like(&self, text: &str) -> bool {
        let head = match text.char_indices().nth(self.chars) {
            Some((idx, _)) => &text[..idx],
            None => text,
        };
        heading_marker_regex().is_match(head)
    }
}

impl Default for HeadingProbe {
    fn default() -> Self {
        Self::new(DEFAULT_HEADING_PROBE_CHARS)
    }
}
