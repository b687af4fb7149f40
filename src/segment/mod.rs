//! Segmentation pipeline: fragments → runs → sections.

mod coalesce;
mod options;
mod structure;
mod style;

pub use coalesce::{coalesce, Coalescer};
pub use options::{ErrorMode, SegmentOptions, DEFAULT_HEADING_PROBE_CHARS};
pub use structure::{decide, structure, Decision, Structurer, STYLE_MARKERS};
pub use style::{HeadingProbe, StyleParser};

use crate::error::Result;
use crate::model::{SegmentedDocument, SourceDocument};

/// Segments single documents according to [`SegmentOptions`].
#[derive(Debug, Clone, Default)]
pub struct Segmenter {
    options: SegmentOptions,
}

impl Segmenter {
    /// Create a segmenter.
    pub fn new(options: SegmentOptions) -> Self {
        Self { options }
    }

    /// Get the options.
    pub fn options(&self) -> &SegmentOptions {
        &self.options
    }

    /// Coalesce and structure one document.
    pub fn segment(&self, doc: &SourceDocument) -> Result<SegmentedDocument> {
        let mut coalescer = Coalescer::new(self.options.heading_probe_chars);
        let runs = coalescer.coalesce(&doc.fragments);
        let sections = structure(&doc.metadata, &runs)?;

        log::info!(
            "Segmented '{}': {} fragments ({} skipped), {} runs, {} sections",
            doc.name,
            doc.fragment_count(),
            coalescer.skipped(),
            runs.len(),
            sections.len()
        );

        Ok(SegmentedDocument::new(
            doc.name.clone(),
            doc.metadata.clone(),
            sections,
        ))
    }
}
