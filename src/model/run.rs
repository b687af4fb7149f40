//! Coalesced runs of fragments.

use serde::{Deserialize, Serialize};

/// A maximal sequence of adjacent fragments sharing font family, font size
/// and heading likelihood, with their texts concatenated in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoalescedRun {
    /// Concatenated text of the fragments in the run
    pub text: String,

    /// Font family shared by the fragments
    pub font_family: String,

    /// Font size in pixels shared by the fragments
    pub font_size: u32,

    /// Whether the first fragment looked like a numbered/labeled heading
    pub heading_likelihood: bool,
}

impl CoalescedRun {
    /// Create a new run.
    pub fn new(
        text: impl Into<String>,
        font_family: impl Into<String>,
        font_size: u32,
        heading_likelihood: bool,
    ) -> Self {
        Self {
            text: text.into(),
            font_family: font_family.into(),
            font_size,
            heading_likelihood,
        }
    }

    /// Whether another fragment with this style and flag belongs to this run.
    pub fn accepts(&self, font_family: &str, font_size: u32, heading_likelihood: bool) -> bool {
        self.font_family == font_family
            && self.font_size == font_size
            && self.heading_likelihood == heading_likelihood
    }

    /// Whether this run shares its grouping key with another run.
    pub fn same_style(&self, other: &CoalescedRun) -> bool {
        self.accepts(&other.font_family, other.font_size, other.heading_likelihood)
    }

    /// Check if the run has no text.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}
