//! Fragment sources: adapters that read an extraction backend's output into
//! a [`SourceDocument`].
//!
//! Sources are registered by file extension and dispatched by a
//! [`SourceRegistry`]. Inputs without an extension are sniffed with
//! [`detect_format_from_bytes`].
//!
//! # Example
//!
//! ```no_run
//! use snipdf::source::{HtmlSource, SourceRegistry};
//! use std::sync::Arc;
//! use std::path::Path;
//!
//! fn main() -> snipdf::Result<()> {
//!     let mut registry = SourceRegistry::new();
//!     registry.register(Arc::new(HtmlSource::new()));
//!
//!     let doc = registry.load(Path::new("paper.html"))?;
//!     println!("{} fragments", doc.fragment_count());
//!     Ok(())
//! }
//! ```

mod html;
mod json;

pub use html::HtmlSource;
pub use json::JsonSource;

use crate::detect::{detect_format_from_bytes, InputFormat};
use crate::error::{Error, Result};
use crate::model::SourceDocument;
use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

/// Trait for fragment sources.
///
/// Implement this trait to read fragments from a new extraction backend.
pub trait FragmentSource: Send + Sync {
    /// Get the supported file extensions for this source.
    ///
    /// Extensions should be lowercase without the leading dot (e.g., `["html"]`).
    fn supported_extensions(&self) -> &[&str];

    /// Get the name of this source.
    fn name(&self) -> &str;

    /// The input format this source reads.
    fn format(&self) -> InputFormat;

    /// Read a document from bytes, naming it `name`.
    fn load_bytes(&self, name: &str, bytes: &[u8]) -> Result<SourceDocument>;

    /// Read a document from a file.
    ///
    /// The document is named after the file stem and records the path under
    /// the `source` metadata key unless the input already provides one.
    fn load(&self, path: &Path) -> Result<SourceDocument> {
        let bytes = fs::read(path)?;
        let mut doc = self.load_bytes(&document_name(path), &bytes)?;
        doc.metadata
            .entry("source".to_string())
            .or_insert_with(|| Value::from(path.display().to_string()));
        Ok(doc)
    }

    /// Check if this source supports the given extension.
    fn supports_extension(&self, ext: &str) -> bool {
        let ext_lower = ext.to_lowercase();
        self.supported_extensions().iter().any(|e| *e == ext_lower)
    }
}

/// Document name derived from a path: the file stem, or `document`.
pub fn document_name(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "document".to_string())
}

/// Registry for fragment sources.
///
/// Maps file extensions and input formats to sources.
pub struct SourceRegistry {
    sources: HashMap<String, Arc<dyn FragmentSource>>,
    by_name: HashMap<String, Arc<dyn FragmentSource>>,
    by_format: HashMap<InputFormat, Arc<dyn FragmentSource>>,
}

impl SourceRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            sources: HashMap::new(),
            by_name: HashMap::new(),
            by_format: HashMap::new(),
        }
    }

    /// Create a registry with the HTML and JSON sources.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(HtmlSource::new()));
        registry.register(Arc::new(JsonSource::new()));
        registry
    }

    /// Register a source for all its supported extensions and its format.
    pub fn register(&mut self, source: Arc<dyn FragmentSource>) {
        for ext in source.supported_extensions() {
            self.sources.insert(ext.to_lowercase(), source.clone());
        }
        self.by_format.insert(source.format(), source.clone());
        self.by_name.insert(source.name().to_lowercase(), source);
    }

    /// Get a source by file extension.
    pub fn get_by_extension(&self, ext: &str) -> Option<Arc<dyn FragmentSource>> {
        self.sources.get(&ext.to_lowercase()).cloned()
    }

    /// Get a source by name.
    pub fn get_by_name(&self, name: &str) -> Option<Arc<dyn FragmentSource>> {
        self.by_name.get(&name.to_lowercase()).cloned()
    }

    /// Get a source by input format.
    pub fn get_by_format(&self, format: InputFormat) -> Option<Arc<dyn FragmentSource>> {
        self.by_format.get(&format).cloned()
    }

    /// Check if an extension is supported.
    pub fn supports(&self, ext: &str) -> bool {
        self.sources.contains_key(&ext.to_lowercase())
    }

    /// Get all supported extensions.
    pub fn supported_extensions(&self) -> Vec<&str> {
        self.sources.keys().map(|s| s.as_str()).collect()
    }

    /// Load a file with the source registered for its extension, sniffing
    /// the content when the file has no extension.
    pub fn load(&self, path: &Path) -> Result<SourceDocument> {
        let source = match path.extension().and_then(|e| e.to_str()) {
            Some(ext) => self
                .get_by_extension(ext)
                .ok_or_else(|| Error::UnsupportedSource(format!("extension: {}", ext)))?,
            None => {
                let format = crate::detect::detect_format_from_path(path)?;
                self.get_by_format(format)
                    .ok_or_else(|| Error::UnsupportedSource(format!("format: {}", format)))?
            }
        };

        log::debug!("Loading {} with {} source", path.display(), source.name());
        source.load(path)
    }

    /// Load bytes, sniffing the format from the content.
    pub fn load_bytes(&self, name: &str, bytes: &[u8]) -> Result<SourceDocument> {
        let format = detect_format_from_bytes(bytes)?;
        let source = self
            .get_by_format(format)
            .ok_or_else(|| Error::UnsupportedSource(format!("format: {}", format)))?;
        source.load_bytes(name, bytes)
    }
}

impl Default for SourceRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
