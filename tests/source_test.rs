//! Integration tests for fragment sources and file-level segmentation.

use std::fs;
use std::sync::Arc;

use serde_json::Value;
use snipdf::detect::InputFormat;
use snipdf::error::Result;
use snipdf::model::{RawFragment, SourceDocument};
use snipdf::output::write_document;
use snipdf::source::{FragmentSource, SourceRegistry};
use snipdf::{segment_file, Error, JsonFormat};

const PDFMINER_HTML: &str = r#"<html><head>
<meta http-equiv="Content-Type" content="text/html">
</head><body>
<span style="position:absolute; border: gray 1px solid; left:0px; top:50px; width:612px; height:792px;"></span>
<div style="position:absolute; top:50px;"><a name="1">Page 1</a></div>
<div style="position:absolute; border: textbox 1px solid; writing-mode:lr-tb; left:72px; top:90px; width:300px; height:20px;"><span style="font-family: Helvetica-Bold; font-size:18px">1. Introduction
<br></span></div>
<div style="position:absolute; left:72px; top:120px;"><span style="font-family: Helvetica; font-size:11px">Fonts encode
<br>hierarchy. </span><span style="font-family: Helvetica; font-size:11px">Mostly.
<br></span></div>
<div style="position:absolute; top:842px;"><a name="2">Page 2</a></div>
<div style="position:absolute; left:72px; top:880px;"><span style="font-family: Helvetica-Bold; font-size:18px">2. Method
<br></span></div>
<div style="position:absolute; left:72px; top:910px;"><span style="font-family: Helvetica; font-size:11px">We read spans.
<br></span></div>
</body></html>"#;

/// Mock source for testing registry dispatch.
struct UpperSource;

impl FragmentSource for UpperSource {
    fn supported_extensions(&self) -> &[&str] {
        &["up"]
    }

    fn name(&self) -> &str {
        "upper"
    }

    fn format(&self) -> InputFormat {
        InputFormat::Json
    }

    fn load_bytes(&self, name: &str, bytes: &[u8]) -> Result<SourceDocument> {
        let text = String::from_utf8_lossy(bytes).to_uppercase();
        let mut doc = SourceDocument::new(name);
        doc.add_fragment(RawFragment::styled(text, "Mono", 10));
        Ok(doc)
    }
}

#[test]
fn test_segment_pdfminer_html_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("paper.html");
    fs::write(&path, PDFMINER_HTML).unwrap();

    let doc = segment_file(&path).unwrap();
    assert_eq!(doc.name, "paper");
    assert_eq!(doc.section_count(), 2);

    let first = &doc.sections[0];
    assert_eq!(first.heading, "1. Introduction\n");
    assert_eq!(first.content, "Fonts encode\nhierarchy. Mostly.\n");
    assert_eq!(first.content_font_family.as_deref(), Some("Helvetica"));
    assert_eq!(doc.sections[1].heading, "2. Method\n");

    for section in &doc.sections {
        assert_eq!(section.metadata.get("pages"), Some(&Value::from(2)));
        assert_eq!(
            section.metadata.get("source"),
            Some(&Value::from(path.display().to_string()))
        );
    }
}

#[test]
fn test_extensionless_file_is_sniffed() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fragments");
    fs::write(
        &path,
        r#"{"metadata": {"lang": "en"}, "fragments": [
            {"text": "Heading", "style": "font-family: Arial; font-size:16px"},
            {"text": "Body", "style": "font-family: Arial; font-size:10px"}
        ]}"#,
    )
    .unwrap();

    let doc = segment_file(&path).unwrap();
    assert_eq!(doc.name, "fragments");
    assert_eq!(doc.sections[0].metadata["lang"], Value::from("en"));
    assert_eq!(doc.sections[0].content, "Body");
}

#[test]
fn test_written_result_is_not_read_as_fragments() {
    let dir = tempfile::tempdir().unwrap();
    let html = dir.path().join("paper.html");
    fs::write(&html, PDFMINER_HTML).unwrap();

    let doc = segment_file(&html).unwrap();
    let written = write_document(&dir.path().join("out"), &doc, JsonFormat::Pretty).unwrap();

    let result = segment_file(&written);
    assert!(matches!(result, Err(Error::Json(_))));
}

#[test]
fn test_unsupported_extension() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("paper.pdf");
    fs::write(&path, b"%PDF-1.7").unwrap();

    let result = SourceRegistry::with_defaults().load(&path);
    assert!(matches!(result, Err(Error::UnsupportedSource(_))));
}

#[test]
fn test_custom_source_registration() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("note.up");
    fs::write(&path, "shout").unwrap();

    let mut registry = SourceRegistry::new();
    assert!(!registry.supports("up"));
    registry.register(Arc::new(UpperSource));
    assert!(registry.supports("UP"));

    let doc = registry.load(&path).unwrap();
    assert_eq!(doc.fragments[0].text, "SHOUT");
    assert_eq!(
        doc.metadata.get("source"),
        Some(&Value::from(path.display().to_string()))
    );
}

#[test]
fn test_html_and_json_sources_agree() {
    let registry = SourceRegistry::with_defaults();
    let from_html = registry
        .load_bytes("paper", PDFMINER_HTML.as_bytes())
        .unwrap();

    let json = serde_json::to_vec(&from_html).unwrap();
    let from_json = registry.load_bytes("paper", &json).unwrap();

    assert_eq!(from_html.fragments, from_json.fragments);
    assert_eq!(from_html.metadata, from_json.metadata);
}
