//! Input format detection.

use crate::error::{Error, Result};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Kind of fragment source recognized from its leading bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputFormat {
    /// HTML rendering with styled `span` elements (pdfminer layout)
    Html,
    /// JSON fragment dump
    Json,
}

impl InputFormat {
    /// Default file extension for the format.
    pub fn extension(&self) -> &'static str {
        match self {
            InputFormat::Html => "html",
            InputFormat::Json => "json",
        }
    }
}

impl std::fmt::Display for InputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputFormat::Html => write!(f, "HTML"),
            InputFormat::Json => write!(f, "JSON"),
        }
    }
}

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";
const SNIFF_LEN: u64 = 512;

/// Detect the input format from a file path.
///
/// # Example
/// ```no_run
/// use snipdf::detect::detect_format_from_path;
///
/// let format = detect_format_from_path("paper.html").unwrap();
/// println!("Input format: {}", format);
/// ```
pub fn detect_format_from_path<P: AsRef<Path>>(path: P) -> Result<InputFormat> {
    let file = File::open(path)?;
    let mut header = Vec::with_capacity(SNIFF_LEN as usize);
    file.take(SNIFF_LEN).read_to_end(&mut header)?;
    detect_format_from_bytes(&header)
}

/// Detect the input format from the leading bytes of the input.
///
/// Leading whitespace and a UTF-8 byte order mark are ignored. Input that
/// opens with `{` or `[` is JSON, input that opens with `<` is HTML.
pub fn detect_format_from_bytes(data: &[u8]) -> Result<InputFormat> {
    let data = data.strip_prefix(UTF8_BOM).unwrap_or(data);
    let first = data
        .iter()
        .find(|b| !b.is_ascii_whitespace())
        .ok_or(Error::UnknownFormat)?;

    match first {
        b'{' | b'[' => Ok(InputFormat::Json),
        b'<' => Ok(InputFormat::Html),
        _ => Err(Error::UnknownFormat),
    }
}
