//! Semantic structuring of coalesced runs into sections.
//!
//! Assumes headings are set in a larger font than their content. Each run is
//! classified against the most recent section: it either starts a new
//! section or is absorbed into the current one's content.

use crate::error::{Error, Result};
use crate::model::{CoalescedRun, Metadata, SectionRecord};

/// Font family fragments that mark a bold or italic variant.
pub const STYLE_MARKERS: [&str; 4] = ["Bold", "Italic", "BoldItalic", "BoldOblique"];

/// What to do with a run, relative to the current section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Start a new section headed by the run.
    NewSection,
    /// Append the run to the current section's content.
    Absorb,
    /// Start a new section headed by the run, flagged as heading-like.
    Promote,
}

/// Classify `run` against the current section (if any).
///
/// Rules are checked in order and the first match wins:
///
/// 1. no current section, or the run is larger than the current heading
/// 2. the run switches to a bold/italic family while the section already
///    has content in another family
/// 3. the run looks numbered/labeled and the section already has content
/// 4. absorb, unless the section has settled content that is heading-like,
///    the run's family carries every style marker, and the run is larger
///    than the content so far
/// 5. the run sits strictly between the content and heading sizes (promote)
/// 6. anything else (promote)
pub fn decide(current: Option<&SectionRecord>, run: &CoalescedRun) -> Decision {
    let Some(current) = current else {
        return Decision::NewSection;
    };

    if run.font_size > current.heading_font_size {
        return Decision::NewSection;
    }

    if current.content_font_family.as_deref() != Some(run.font_family.as_str())
        && current.has_content()
        && STYLE_MARKERS.iter().any(|m| run.font_family.contains(m))
    {
        return Decision::NewSection;
    }

    if run.heading_likelihood && current.has_content() {
        return Decision::NewSection;
    }

    // The marker test is true for nearly every family name; it only fails
    // when a single family contains all four markers.
    if current.content_font_size == 0
        || current.content_font_family.is_none()
        || current.content_has_heading_likelihood != Some(true)
        || !STYLE_MARKERS.iter().all(|m| run.font_family.contains(m))
        || run.font_size <= current.content_font_size
    {
        return Decision::Absorb;
    }

    // Between the content and heading sizes, or anything left over.
    Decision::Promote
}

/// Fold state: the sections built so far, the last one being current.
#[derive(Debug)]
pub struct Structurer<'a> {
    metadata: &'a Metadata,
    sections: Vec<SectionRecord>,
}

impl<'a> Structurer<'a> {
    /// Create an empty structurer for a document's metadata.
    pub fn new(metadata: &'a Metadata) -> Self {
        Self {
            metadata,
            sections: Vec::new(),
        }
    }

    /// The section runs are currently absorbed into.
    pub fn current(&self) -> Option<&SectionRecord> {
        self.sections.last()
    }

    /// Classify and apply one run.
    pub fn push(&mut self, run: &CoalescedRun) -> Result<Decision> {
        validate_run(run)?;

        let decision = decide(self.current(), run);
        match decision {
            Decision::NewSection => self
                .sections
                .push(SectionRecord::from_heading(run, self.metadata)),
            Decision::Promote => self
                .sections
                .push(SectionRecord::promoted(run, self.metadata)),
            Decision::Absorb => self.absorb(run)?,
        }

        log::trace!(
            "Structurer: {:?} run ({}px, {}) -> {} sections",
            decision,
            run.font_size,
            run.font_family,
            self.sections.len()
        );
        Ok(decision)
    }

    /// Append a run to the current section's content.
    pub fn absorb(&mut self, run: &CoalescedRun) -> Result<()> {
        let current = self.sections.last_mut().ok_or_else(|| {
            Error::ContractViolation("cannot absorb content without a current section".into())
        })?;
        current.absorb(run);
        Ok(())
    }

    /// Finish and return the sections in document order.
    pub fn finish(self) -> Vec<SectionRecord> {
        self.sections
    }
}

fn validate_run(run: &CoalescedRun) -> Result<()> {
    if run.font_family.trim().is_empty() {
        return Err(Error::ContractViolation(format!(
            "run {:?} has no font family",
            truncate(&run.text)
        )));
    }
    if run.font_size == 0 {
        return Err(Error::ContractViolation(format!(
            "run {:?} has a zero font size",
            truncate(&run.text)
        )));
    }
    Ok(())
}

fn truncate(text: &str) -> String {
    text.chars().take(24).collect()
}

/// Build the section sequence for one document.
///
/// Every section receives a copy of `metadata`. Zero runs produce zero
/// sections. A run with no font family or a zero font size fails the whole
/// document with [`Error::ContractViolation`].
pub fn structure(metadata: &Metadata, runs: &[CoalescedRun]) -> Result<Vec<SectionRecord>> {
    let structurer = runs
        .iter()
        .try_fold(Structurer::new(metadata), |mut structurer, run| {
            structurer.push(run)?;
            Ok::<_, Error>(structurer)
        })?;
    Ok(structurer.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn run(text: &str, family: &str, size: u32, heading: bool) -> CoalescedRun {
        CoalescedRun::new(text, family, size, heading)
    }

    fn headings(sections: &[SectionRecord]) -> Vec<&str> {
        sections.iter().map(|s| s.heading.as_str()).collect()
    }

    #[test]
    fn test_empty_runs() {
        let sections = structure(&Metadata::new(), &[]).unwrap();
        assert!(sections.is_empty());
    }

    #[test]
    fn test_numbered_headings_split_sections() {
        let runs = vec![
            run("1. Intro", "Arial", 18, true),
            run("This is text.", "Arial", 12, false),
            run("2. Methods", "Arial", 18, true),
        ];
        let sections = structure(&Metadata::new(), &runs).unwrap();

        assert_eq!(headings(&sections), vec!["1. Intro", "2. Methods"]);
        assert_eq!(sections[0].content, "This is text.");
        assert_eq!(sections[1].content, "");
    }

    #[test]
    fn test_larger_font_starts_section() {
        let runs = vec![
            run("Chapter", "Arial", 16, false),
            run("body", "Arial", 11, false),
            run("Title", "Arial", 24, false),
        ];
        let sections = structure(&Metadata::new(), &runs).unwrap();
        assert_eq!(headings(&sections), vec!["Chapter", "Title"]);
    }

    #[test]
    fn test_bold_family_after_content_starts_section() {
        let runs = vec![
            run("Overview", "Times", 16, false),
            run("Plain prose. ", "Times", 11, false),
            run("Key Points", "Times-Bold", 11, false),
            run("more prose", "Times", 11, false),
        ];
        let sections = structure(&Metadata::new(), &runs).unwrap();

        assert_eq!(headings(&sections), vec!["Overview", "Key Points"]);
        assert_eq!(sections[0].content, "Plain prose. ");
        assert_eq!(sections[1].content, "more prose");
    }

    #[test]
    fn test_bold_family_without_content_is_absorbed() {
        let runs = vec![
            run("Overview", "Times", 16, false),
            run("Lead in", "Times-Bold", 11, false),
        ];
        let sections = structure(&Metadata::new(), &runs).unwrap();
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].content, "Lead in");
        assert_eq!(sections[0].content_font_family.as_deref(), Some("Times-Bold"));
    }

    #[test]
    fn test_heading_like_run_without_content_is_absorbed() {
        let runs = vec![
            run("Report", "Arial", 20, false),
            run("1.1 Scope", "Arial", 12, true),
        ];
        let sections = structure(&Metadata::new(), &runs).unwrap();
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].content_has_heading_likelihood, Some(true));
    }

    #[test]
    fn test_mid_size_run_with_plain_family_is_absorbed() {
        let runs = vec![
            run("Title", "Arial", 20, false),
            run("body", "Arial", 12, false),
            run("Sub", "Arial", 14, false),
        ];
        let sections = structure(&Metadata::new(), &runs).unwrap();
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].content, "bodySub");
        assert_eq!(sections[0].content_font_size, 14);
    }

    #[test]
    fn test_mid_size_run_is_promoted_when_absorb_rule_fails() {
        let family = "Font-BoldItalicBoldOblique";
        let runs = vec![
            run("Title", family, 20, false),
            run("a.b body", family, 12, true),
            run("Sub", family, 14, false),
        ];
        let sections = structure(&Metadata::new(), &runs).unwrap();

        assert_eq!(headings(&sections), vec!["Title", "Sub"]);
        assert_eq!(sections[0].content, "a.b body");
        assert!(sections[1].heading_has_heading_likelihood);
    }

    #[test]
    fn test_decide_fallback_promotes() {
        let family = "Font-BoldItalicBoldOblique";
        let meta = Metadata::new();
        let mut section = SectionRecord::from_heading(&run("Title", family, 14, false), &meta);
        section.absorb(&run("x.y", family, 10, true));

        // Equal to the heading size: not between content and heading.
        assert_eq!(decide(Some(&section), &run("Same", family, 14, false)), Decision::Promote);
        assert_eq!(decide(Some(&section), &run("Mid", family, 12, false)), Decision::Promote);
        assert_eq!(decide(Some(&section), &run("Small", family, 9, false)), Decision::Absorb);
        assert_eq!(decide(None, &run("Any", family, 9, false)), Decision::NewSection);
    }

    #[test]
    fn test_metadata_copied_into_every_section() {
        let mut meta = Metadata::new();
        meta.insert("source".into(), Value::from("paper.pdf"));
        meta.insert("pages".into(), Value::from(12));

        let runs = vec![
            run("1. A", "Arial", 18, true),
            run("text", "Arial", 12, false),
            run("2. B", "Arial", 18, true),
            run("text", "Arial", 12, false),
        ];
        let sections = structure(&meta, &runs).unwrap();
        assert_eq!(sections.len(), 2);
        for section in &sections {
            assert_eq!(section.metadata, meta);
        }
    }

    #[test]
    fn test_invalid_run_is_contract_violation() {
        let runs = vec![run("Title", "Arial", 20, false), run("bad", "", 12, false)];
        let err = structure(&Metadata::new(), &runs).unwrap_err();
        assert!(matches!(err, Error::ContractViolation(_)));

        let runs = vec![run("zero", "Arial", 0, false)];
        let err = structure(&Metadata::new(), &runs).unwrap_err();
        assert!(matches!(err, Error::ContractViolation(_)));
    }

    #[test]
    fn test_absorb_without_section_is_contract_violation() {
        let meta = Metadata::new();
        let mut structurer = Structurer::new(&meta);
        let err = structurer
            .absorb(&run("orphan", "Arial", 12, false))
            .unwrap_err();
        assert!(matches!(err, Error::ContractViolation(_)));
    }
}
