//! HTML fragment source.
//!
//! Reads the HTML layout rendering produced by pdfminer-style extractors,
//! where every text run is a `<span style="font-family: ...; font-size:Npx">`
//! and every page starts with an `<a name="N">` anchor.

use scraper::{Html, Selector};
use serde_json::Value;

use crate::detect::InputFormat;
use crate::error::{Error, Result};
use crate::model::{RawFragment, SourceDocument};

use super::FragmentSource;

/// Source for pdfminer-style HTML.
#[derive(Debug, Clone, Default)]
pub struct HtmlSource {
    _private: (),
}

impl HtmlSource {
    /// Create a new HTML source.
    pub fn new() -> Self {
        Self { _private: () }
    }

    /// Extract the styled spans of an HTML string, in document order.
    pub fn parse_str(&self, name: &str, html: &str) -> Result<SourceDocument> {
        let document = Html::parse_document(html);
        let span_selector = selector("span")?;
        let anchor_selector = selector("a[name]")?;

        let mut doc = SourceDocument::new(name);
        for span in document.select(&span_selector) {
            // Spans without a style attribute carry no font information.
            let Some(style) = span.value().attr("style") else {
                continue;
            };
            let text: String = span.text().collect();
            doc.add_fragment(RawFragment::new(text, style));
        }

        let pages = document.select(&anchor_selector).count();
        if pages > 0 {
            doc.metadata.insert("pages".to_string(), Value::from(pages));
        }

        log::debug!(
            "HtmlSource: '{}' has {} styled spans on {} pages",
            name,
            doc.fragment_count(),
            pages
        );
        Ok(doc)
    }
}

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| Error::Html(format!("invalid selector {}: {:?}", css, e)))
}

impl FragmentSource for HtmlSource {
    fn supported_extensions(&self) -> &[&str] {
        &["html", "htm"]
    }

    fn name(&self) -> &str {
        "html"
    }

    fn format(&self) -> InputFormat {
        InputFormat::Html
    }

    fn load_bytes(&self, name: &str, bytes: &[u8]) -> Result<SourceDocument> {
        let html = String::from_utf8_lossy(bytes);
        self.parse_str(name, &html)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<html><body>
<div style="position:absolute; top:50px;"><a name="1">Page 1</a></div>
<div style="position:absolute; left:72px; top:90px;">
<span style="font-family: Arial-BoldMT; font-size:18px">1. Intro</span>
<span style="font-family: ArialMT; font-size:12px">This is </span><span>unstyled</span>
<span style="font-family: ArialMT; font-size:12px">text.</span>
</div>
<div style="position:absolute; top:800px;"><a name="2">Page 2</a></div>
</body></html>"#;

    #[test]
    fn test_parse_spans_in_order() {
        let doc = HtmlSource::new().parse_str("sample", SAMPLE).unwrap();
        let texts: Vec<_> = doc.fragments.iter().map(|f| f.text.as_str()).collect();
        assert_eq!(texts, vec!["1. Intro", "This is ", "text."]);
        assert_eq!(
            doc.fragments[0].style,
            "font-family: Arial-BoldMT; font-size:18px"
        );
    }

    #[test]
    fn test_page_count_metadata() {
        let doc = HtmlSource::new().parse_str("sample", SAMPLE).unwrap();
        assert_eq!(doc.metadata.get("pages"), Some(&Value::from(2)));
    }

    #[test]
    fn test_entities_decoded() {
        let html = r#"<span style="font-family: A; font-size:9px">R&amp;D &sect; 2</span>"#;
        let doc = HtmlSource::new().parse_str("e", html).unwrap();
        assert_eq!(doc.fragments[0].text, "R&D § 2");
        assert!(!doc.metadata.contains_key("pages"));
    }
}
