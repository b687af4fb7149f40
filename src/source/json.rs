//! JSON fragment source.
//!
//! Accepts either a full document object
//! `{"name": ..., "metadata": {...}, "fragments": [{"text", "style"}]}`
//! or a bare array of fragments. The `fragments` key is required and unknown
//! keys are rejected.

use serde::Deserialize;

use crate::detect::InputFormat;
use crate::error::Result;
use crate::model::{RawFragment, SourceDocument};

use super::FragmentSource;

#[derive(Deserialize)]
#[serde(untagged)]
enum JsonInput {
    Document(SourceDocument),
    Fragments(Vec<RawFragment>),
}

/// Source for JSON fragment dumps.
#[derive(Debug, Clone, Default)]
pub struct JsonSource {
    _private: (),
}

impl JsonSource {
    /// Create a new JSON source.
    pub fn new() -> Self {
        Self { _private: () }
    }
}

impl FragmentSource for JsonSource {
    fn supported_extensions(&self) -> &[&str] {
        &["json"]
    }

    fn name(&self) -> &str {
        "json"
    }

    fn format(&self) -> InputFormat {
        InputFormat::Json
    }

    fn load_bytes(&self, name: &str, bytes: &[u8]) -> Result<SourceDocument> {
        let mut doc = match serde_json::from_slice::<JsonInput>(bytes)? {
            JsonInput::Document(doc) => doc,
            JsonInput::Fragments(fragments) => SourceDocument::new(name).with_fragments(fragments),
        };
        if doc.name.is_empty() {
            doc.name = name.to_string();
        }
        Ok(doc)
    }
}
