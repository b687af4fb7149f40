//! Section records: one heading plus the content absorbed under it.

use serde::{Deserialize, Serialize};

use super::{CoalescedRun, Metadata};

/// A heading and its accumulated content.
///
/// Content fields start unset and are filled in as runs are absorbed:
/// the content font family is fixed by the first absorbed run, the content
/// font size tracks the largest absorbed size, and the content heading flag
/// reflects the most recently absorbed run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionRecord {
    /// Heading text
    pub heading: String,

    /// Font family of the heading run
    pub heading_font_family: String,

    /// Font size of the heading run in pixels
    pub heading_font_size: u32,

    /// Whether the heading looked numbered/labeled (or was promoted)
    pub heading_has_heading_likelihood: bool,

    /// Accumulated content text
    pub content: String,

    /// Font family of the first absorbed content run
    pub content_font_family: Option<String>,

    /// Largest absorbed content font size (0 = nothing absorbed)
    pub content_font_size: u32,

    /// Heading flag of the last absorbed content run
    pub content_has_heading_likelihood: Option<bool>,

    /// Document metadata, copied at creation
    pub metadata: Metadata,
}

impl SectionRecord {
    /// Start a section headed by `run`.
    pub fn from_heading(run: &CoalescedRun, metadata: &Metadata) -> Self {
        Self {
            heading: run.text.clone(),
            heading_font_family: run.font_family.clone(),
            heading_font_size: run.font_size,
            heading_has_heading_likelihood: run.heading_likelihood,
            content: String::new(),
            content_font_family: None,
            content_font_size: 0,
            content_has_heading_likelihood: None,
            metadata: metadata.clone(),
        }
    }

    /// Start a section headed by `run`, marking the heading as heading-like
    /// regardless of the run's own flag.
    pub fn promoted(run: &CoalescedRun, metadata: &Metadata) -> Self {
        let mut section = Self::from_heading(run, metadata);
        section.heading_has_heading_likelihood = true;
        section
    }

    /// Append a run's text to the content and update the content style.
    pub fn absorb(&mut self, run: &CoalescedRun) {
        self.content.push_str(&run.text);
        if self.content_font_family.is_none() {
            self.content_font_family = Some(run.font_family.clone());
        }
        self.content_font_size = self.content_font_size.max(run.font_size);
        self.content_has_heading_likelihood = Some(run.heading_likelihood);
    }

    /// Check if any content has been absorbed.
    pub fn has_content(&self) -> bool {
        !self.content.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absorb_keeps_first_family_and_max_size() {
        let heading = CoalescedRun::new("Title", "Arial", 20, false);
        let mut section = SectionRecord::from_heading(&heading, &Metadata::new());

        section.absorb(&CoalescedRun::new("one ", "Times", 12, true));
        section.absorb(&CoalescedRun::new("two", "Courier", 10, false));

        assert_eq!(section.content, "one two");
        assert_eq!(section.content_font_family.as_deref(), Some("Times"));
        assert_eq!(section.content_font_size, 12);
        assert_eq!(section.content_has_heading_likelihood, Some(false));
    }

    #[test]
    fn test_promoted_forces_flag() {
        let run = CoalescedRun::new("Sub", "Arial", 14, false);
        let section = SectionRecord::promoted(&run, &Metadata::new());
        assert!(section.heading_has_heading_likelihood);
        assert!(!section.has_content());
    }
}
