//! Persistence of segmentation results, one JSON file per document.

use std::fs;
use std::path::{Path, PathBuf};

use crate::batch::DocumentOutcome;
use crate::error::Result;
use crate::model::SegmentedDocument;
use crate::render::{to_json, JsonFormat};

/// Replace characters that are unsafe in file names.
pub fn sanitize_file_name(name: &str) -> String {
    let cleaned: String = name
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    let cleaned = cleaned.trim_start_matches('.');
    if cleaned.is_empty() {
        "document".to_string()
    } else {
        cleaned.to_string()
    }
}

/// Path the document's JSON is written to inside `dir`.
pub fn output_path(dir: &Path, doc: &SegmentedDocument) -> PathBuf {
    dir.join(format!("{}.json", sanitize_file_name(&doc.name)))
}

/// Write a document as `<dir>/<name>.json`, creating `dir` if needed.
///
/// Documents are written independently; an existing file is overwritten.
pub fn write_document(dir: &Path, doc: &SegmentedDocument, format: JsonFormat) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = output_path(dir, doc);
    let json = to_json(doc, format)?;
    fs::write(&path, json)?;
    log::debug!(
        "Wrote {} sections to {}",
        doc.section_count(),
        path.display()
    );
    Ok(path)
}

/// Write a batch outcome's document, folding a write failure into the
/// outcome so it counts against that document only.
pub fn write_outcome(dir: &Path, outcome: DocumentOutcome, format: JsonFormat) -> DocumentOutcome {
    let DocumentOutcome { name, result } = outcome;
    let result = result.and_then(|doc| write_document(dir, &doc, format).map(|_| doc));
    DocumentOutcome { name, result }
}

/// Read back a document written by [`write_document`].
pub fn read_document(path: &Path) -> Result<SegmentedDocument> {
    let data = fs::read(path)?;
    Ok(serde_json::from_slice(&data)?)
}
