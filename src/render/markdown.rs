//! Markdown rendering for segmented documents.

use serde_json::Value;

use crate::error::Result;
use crate::model::{SectionRecord, SegmentedDocument};

use super::RenderOptions;

/// Convert a segmented document to Markdown.
pub fn to_markdown(doc: &SegmentedDocument, options: &RenderOptions) -> Result<String> {
    let renderer = MarkdownRenderer::new(options.clone());
    renderer.render(doc)
}

/// Markdown renderer.
///
/// Heading levels follow the heading font sizes: the largest heading size in
/// the document becomes `#`, the next largest `##`, and so on, capped at the
/// configured maximum level.
pub struct MarkdownRenderer {
    options: RenderOptions,
}

impl MarkdownRenderer {
    /// Create a new Markdown renderer.
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Render a document to Markdown.
    pub fn render(&self, doc: &SegmentedDocument) -> Result<String> {
        let mut output = String::new();

        if self.options.include_frontmatter {
            output.push_str(&frontmatter(doc));
        }

        let sizes = doc.heading_sizes();
        for section in &doc.sections {
            if !self.options.include_empty_sections && section.content.trim().is_empty() {
                continue;
            }
            let level = self.heading_level(&sizes, section);
            self.render_section(&mut output, section, level);
        }

        Ok(output.trim_end().to_string())
    }

    fn heading_level(&self, sizes: &[u32], section: &SectionRecord) -> u8 {
        let rank = sizes
            .iter()
            .position(|&s| s == section.heading_font_size)
            .unwrap_or(0);
        let max = self.options.max_heading_level.clamp(1, 6) as usize;
        (rank + 1).min(max) as u8
    }

    fn render_section(&self, output: &mut String, section: &SectionRecord, level: u8) {
        let heading = self.options.normalize(&section.heading);
        if !heading.is_empty() {
            output.push_str(&"#".repeat(level as usize));
            output.push(' ');
            output.push_str(&heading);
            output.push_str("\n\n");
        }

        let content = self.options.normalize(&section.content);
        if !content.is_empty() {
            output.push_str(&content);
            output.push_str("\n\n");
        }
    }
}

/// YAML frontmatter with the document name and metadata.
fn frontmatter(doc: &SegmentedDocument) -> String {
    let mut lines = vec!["---".to_string()];
    lines.push(format!("name: \"{}\"", escape_yaml(&doc.name)));
    for (key, value) in &doc.metadata {
        let rendered = match value {
            Value::String(s) => format!("\"{}\"", escape_yaml(s)),
            other => other.to_string(),
        };
        lines.push(format!("{}: {}", key, rendered));
    }
    lines.push(format!("sections: {}", doc.section_count()));
    lines.push("---".to_string());
    lines.push(String::new());
    lines.push(String::new());
    lines.join("\n")
}

/// Escape special characters for YAML strings.
fn escape_yaml(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CoalescedRun, Metadata};

    fn section(heading: &str, size: u32, content: &str) -> SectionRecord {
        let mut s =
            SectionRecord::from_heading(&CoalescedRun::new(heading, "Arial", size, false), &Metadata::new());
        if !content.is_empty() {
            s.absorb(&CoalescedRun::new(content, "Arial", 10, false));
        }
        s
    }

    fn sample() -> SegmentedDocument {
        let mut meta = Metadata::new();
        meta.insert("source".into(), Value::from("paper \"v2\".pdf"));
        meta.insert("pages".into(), Value::from(4));
        SegmentedDocument::new(
            "paper",
            meta,
            vec![
                section("Paper\nTitle", 24, ""),
                section("1. Intro", 16, "Some\ntext."),
                section("1.1 Detail", 13, "More."),
                section("2. End", 16, ""),
            ],
        )
    }

    #[test]
    fn test_heading_levels_follow_font_sizes() {
        let md = to_markdown(&sample(), &RenderOptions::default()).unwrap();
        assert!(md.starts_with("# Paper Title\n\n"));
        assert!(md.contains("## 1. Intro\n\nSome text.\n\n"));
        assert!(md.contains("### 1.1 Detail\n\nMore."));
        assert!(md.ends_with("## 2. End"));
    }

    #[test]
    fn test_max_heading_level() {
        let options = RenderOptions::new().with_max_heading(2);
        let md = to_markdown(&sample(), &options).unwrap();
        assert!(md.contains("## 1.1 Detail"));
        assert!(!md.contains("###"));
    }

    #[test]
    fn test_skip_empty_sections() {
        let options = RenderOptions::new().with_empty_sections(false);
        let md = to_markdown(&sample(), &options).unwrap();
        assert!(!md.contains("Paper Title"));
        assert!(!md.contains("2. End"));
        assert!(md.starts_with("## 1. Intro"));
    }

    #[test]
    fn test_frontmatter() {
        let options = RenderOptions::new().with_frontmatter(true);
        let md = to_markdown(&sample(), &options).unwrap();
        assert!(md.starts_with("---\nname: \"paper\"\n"));
        assert!(md.contains("pages: 4\n"));
        assert!(md.contains("source: \"paper \\\"v2\\\".pdf\"\n"));
        assert!(md.contains("sections: 4\n---\n\n# Paper Title"));
    }
}
