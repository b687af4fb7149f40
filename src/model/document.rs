//! Document-level types.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{RawFragment, SectionRecord};

/// Document metadata: arbitrary values keyed by name, e.g. `source`, `pages`.
///
/// Ordered so serialized output is stable across runs.
pub type Metadata = BTreeMap<String, Value>;

/// A document as delivered by an extraction backend.
///
/// When deserialized, `fragments` is required and unknown keys are rejected,
/// so a segmentation result or a misspelled dump is not read as an empty
/// document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SourceDocument {
    /// Document name, used as the persistence key
    #[serde(default)]
    pub name: String,

    /// Document metadata propagated into every section
    #[serde(default)]
    pub metadata: Metadata,

    /// Styled fragments in extraction order
    pub fragments: Vec<RawFragment>,
}

impl SourceDocument {
    /// Create a new empty document.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            metadata: Metadata::new(),
            fragments: Vec::new(),
        }
    }

    /// Set a metadata entry.
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Append a fragment.
    pub fn add_fragment(&mut self, fragment: RawFragment) {
        self.fragments.push(fragment);
    }

    /// Set the fragments.
    pub fn with_fragments(mut self, fragments: Vec<RawFragment>) -> Self {
        self.fragments = fragments;
        self
    }

    /// Number of fragments.
    pub fn fragment_count(&self) -> usize {
        self.fragments.len()
    }

    /// Check if the document has no fragments.
    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }
}

/// The segmentation result for one document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SegmentedDocument {
    /// Document name
    pub name: String,

    /// When the segmentation was produced
    pub generated_at: DateTime<Utc>,

    /// Document metadata
    pub metadata: Metadata,

    /// Sections in document order
    pub sections: Vec<SectionRecord>,
}

impl SegmentedDocument {
    /// Create a result stamped with the current time.
    pub fn new(name: impl Into<String>, metadata: Metadata, sections: Vec<SectionRecord>) -> Self {
        Self {
            name: name.into(),
            generated_at: Utc::now(),
            metadata,
            sections,
        }
    }

    /// Number of sections.
    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    /// Check if no sections were produced.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Distinct heading font sizes, largest first.
    pub fn heading_sizes(&self) -> Vec<u32> {
        let mut sizes: Vec<u32> = self.sections.iter().map(|s| s.heading_font_size).collect();
        sizes.sort_unstable_by(|a, b| b.cmp(a));
        sizes.dedup();
        sizes
    }
}
