//! Error types for snipdf library.

use std::io;
use thiserror::Error;

/// Result type alias for snipdf operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during segmentation.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The input is neither pdfminer HTML nor a JSON fragment dump.
    #[error("Unknown input format")]
    UnknownFormat,

    /// No registered source handles the given input.
    #[error("Unsupported source: {0}")]
    UnsupportedSource(String),

    /// The HTML input could not be read as a fragment stream.
    #[error("HTML input error: {0}")]
    Html(String),

    /// JSON (de)serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A structuring step was invoked without the state it requires.
    #[error("Contract violation: {0}")]
    ContractViolation(String),

    /// Error during rendering (Markdown, text, JSON).
    #[error("Rendering error: {0}")]
    Render(String),

    /// A single document of a batch failed.
    #[error("Document '{name}' failed: {source}")]
    Document {
        /// Document name
        name: String,
        /// Underlying failure
        #[source]
        source: Box<Error>,
    },

    /// The worker pool could not be built.
    #[error("Worker pool error: {0}")]
    WorkerPool(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Wrap an error with the name of the document it belongs to.
    pub fn for_document(name: impl Into<String>, err: Error) -> Self {
        Error::Document {
            name: name.into(),
            source: Box::new(err),
        }
    }
}

impl From<rayon::ThreadPoolBuildError> for Error {
    fn from(err: rayon::ThreadPoolBuildError) -> Self {
        Error::WorkerPool(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::UnknownFormat;
        assert_eq!(err.to_string(), "Unknown input format");

        let err = Error::ContractViolation("no current section".into());
        assert_eq!(err.to_string(), "Contract violation: no current section");
    }

    #[test]
    fn test_document_error_display() {
        let err = Error::for_document("paper", Error::ContractViolation("zero font size".into()));
        assert_eq!(
            err.to_string(),
            "Document 'paper' failed: Contract violation: zero font size"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
