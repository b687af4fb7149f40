//! # snipdf
//!
//! Segments the styled text of a PDF into heading/content sections.
//!
//! An extraction backend renders the PDF to styled text fragments (for
//! example pdfminer's HTML layout output). snipdf merges adjacent fragments
//! with the same font into runs, then walks the runs and uses font size and
//! font style to decide where new sections begin.
//!
//! ## Quick Start
//!
//! ```no_run
//! use snipdf::{segment_file, render};
//!
//! fn main() -> snipdf::Result<()> {
//!     let doc = segment_file("paper.html")?;
//!
//!     for section in &doc.sections {
//!         println!("{} ({} chars)", section.heading, section.content.len());
//!     }
//!
//!     let markdown = render::to_markdown(&doc, &render::RenderOptions::default())?;
//!     println!("{}", markdown);
//!     Ok(())
//! }
//! ```
//!
//! ## Pipeline
//!
//! - **Sources**: read pdfminer HTML or JSON fragment dumps
//! - **Coalescing**: merge fragments sharing family, size and heading marker
//! - **Structuring**: fold runs into [`SectionRecord`]s
//! - **Batch**: one document per task on a Rayon worker pool
//! - **Output**: JSON, Markdown, plain text, one file per document

pub mod batch;
pub mod detect;
pub mod error;
pub mod model;
pub mod output;
pub mod render;
pub mod segment;
pub mod source;

// Re-export commonly used types
pub use batch::{BatchProcessor, BatchSummary, DocumentOutcome};
pub use detect::{detect_format_from_bytes, detect_format_from_path, InputFormat};
pub use error::{Error, Result};
pub use model::{
    CoalescedRun, Metadata, RawFragment, SectionRecord, SegmentedDocument, SourceDocument,
    StyleDescriptor,
};
pub use render::{JsonFormat, RenderOptions};
pub use segment::{coalesce, structure, ErrorMode, SegmentOptions, Segmenter};
pub use source::{FragmentSource, HtmlSource, JsonSource, SourceRegistry};

use std::path::Path;

/// Segment a document already in memory.
///
/// # Example
///
/// ```
/// use snipdf::{segment_document, RawFragment, SourceDocument};
///
/// let doc = SourceDocument::new("paper").with_fragments(vec![
///     RawFragment::styled("1. Intro", "Arial", 18),
///     RawFragment::styled("This is text.", "Arial", 12),
/// ]);
/// let result = segment_document(&doc).unwrap();
/// assert_eq!(result.sections[0].content, "This is text.");
/// ```
pub fn segment_document(doc: &SourceDocument) -> Result<SegmentedDocument> {
    Segmenter::default().segment(doc)
}

/// Load a fragment file (`.html`, `.htm`, `.json`) and segment it.
///
/// # Example
///
/// ```no_run
/// use snipdf::segment_file;
///
/// let doc = segment_file("paper.html").unwrap();
/// println!("Sections: {}", doc.section_count());
/// ```
pub fn segment_file<P: AsRef<Path>>(path: P) -> Result<SegmentedDocument> {
    let doc = SourceRegistry::with_defaults().load(path.as_ref())?;
    segment_document(&doc)
}

/// Segment a fragment file with custom options.
pub fn segment_file_with_options<P: AsRef<Path>>(
    path: P,
    options: SegmentOptions,
) -> Result<SegmentedDocument> {
    let doc = SourceRegistry::with_defaults().load(path.as_ref())?;
    Segmenter::new(options).segment(&doc)
}

/// Segment fragment input held in memory; the format is sniffed.
///
/// # Example
///
/// ```no_run
/// use snipdf::segment_bytes;
///
/// let data = std::fs::read("paper.html").unwrap();
/// let doc = segment_bytes("paper", &data).unwrap();
/// ```
pub fn segment_bytes(name: &str, data: &[u8]) -> Result<SegmentedDocument> {
    let doc = SourceRegistry::with_defaults().load_bytes(name, data)?;
    segment_document(&doc)
}

/// Builder for loading, segmenting and rendering documents.
///
/// # Example
///
/// ```no_run
/// use snipdf::Snipdf;
///
/// let markdown = Snipdf::new()
///     .with_frontmatter()
///     .with_max_heading(3)
///     .segment("paper.html")?
///     .to_markdown()?;
/// # Ok::<(), snipdf::Error>(())
/// ```
pub struct Snipdf {
    segment_options: SegmentOptions,
    render_options: RenderOptions,
    registry: SourceRegistry,
}

impl Snipdf {
    /// Create a new builder with the default sources.
    pub fn new() -> Self {
        Self {
            segment_options: SegmentOptions::default(),
            render_options: RenderOptions::default(),
            registry: SourceRegistry::with_defaults(),
        }
    }

    /// Use a custom source registry.
    pub fn with_registry(mut self, registry: SourceRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Set how many leading characters are probed for a heading marker.
    pub fn with_heading_probe(mut self, chars: usize) -> Self {
        self.segment_options = self.segment_options.with_heading_probe_chars(chars);
        self
    }

    /// Enable frontmatter in Markdown output.
    pub fn with_frontmatter(mut self) -> Self {
        self.render_options = self.render_options.with_frontmatter(true);
        self
    }

    /// Set the maximum Markdown heading level.
    pub fn with_max_heading(mut self, level: u8) -> Self {
        self.render_options = self.render_options.with_max_heading(level);
        self
    }

    /// Omit sections without content from rendered output.
    pub fn skip_empty_sections(mut self) -> Self {
        self.render_options = self.render_options.with_empty_sections(false);
        self
    }

    /// Load and segment a file.
    pub fn segment<P: AsRef<Path>>(self, path: P) -> Result<SnipdfResult> {
        let doc = self.registry.load(path.as_ref())?;
        self.finish(&doc)
    }

    /// Segment a document already in memory.
    pub fn segment_document(self, doc: &SourceDocument) -> Result<SnipdfResult> {
        self.finish(doc)
    }

    fn finish(self, doc: &SourceDocument) -> Result<SnipdfResult> {
        let document = Segmenter::new(self.segment_options).segment(doc)?;
        Ok(SnipdfResult {
            document,
            render_options: self.render_options,
        })
    }
}

impl Default for Snipdf {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of segmenting a document.
pub struct SnipdfResult {
    /// The segmented document
    pub document: SegmentedDocument,
    /// Render options to use
    render_options: RenderOptions,
}

impl SnipdfResult {
    /// Convert to Markdown.
    pub fn to_markdown(&self) -> Result<String> {
        render::to_markdown(&self.document, &self.render_options)
    }

    /// Convert to plain text.
    pub fn to_text(&self) -> Result<String> {
        render::to_text(&self.document, &self.render_options)
    }

    /// Convert to JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        render::to_json(&self.document, format)
    }

    /// Get the sections.
    pub fn sections(&self) -> &[SectionRecord] {
        &self.document.sections
    }

    /// Get the document.
    pub fn document(&self) -> &SegmentedDocument {
        &self.document
    }
}
