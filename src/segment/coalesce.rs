//! Fragment coalescing.
//!
//! Adjacent fragments that share font family, font size and heading
//! likelihood are merged into a single [`CoalescedRun`]. Fragments whose
//! style cannot be parsed are dropped without interrupting the run in
//! progress.

use crate::model::{CoalescedRun, RawFragment};

use super::style::{HeadingProbe, StyleParser};

/// Merge fragments into runs using the default heading probe.
///
/// An input with no well-formed fragments yields no runs.
pub fn coalesce(fragments: &[RawFragment]) -> Vec<CoalescedRun> {
    Coalescer::default().coalesce(fragments)
}

/// Stateful coalescer that also records how many fragments were skipped.
#[derive(Debug, Clone, Default)]
pub struct Coalescer {
    parser: StyleParser,
    probe: HeadingProbe,
    skipped: usize,
}

impl Coalescer {
    /// Create a coalescer probing `heading_probe_chars` leading characters
    /// of each fragment for a heading marker.
    pub fn new(heading_probe_chars: usize) -> Self {
        Self {
            parser: StyleParser::new(),
            probe: HeadingProbe::new(heading_probe_chars),
            skipped: 0,
        }
    }

    /// Number of fragments skipped for malformed styles in the last call.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Merge fragments into maximal runs, in order.
    pub fn coalesce(&mut self, fragments: &[RawFragment]) -> Vec<CoalescedRun> {
        self.skipped = 0;
        let mut runs = Vec::new();
        let mut current: Option<CoalescedRun> = None;

        for fragment in fragments {
            let Some(style) = self.parser.parse(&fragment.style) else {
                self.skipped += 1;
                continue;
            };
            let heading_like = self.probe.is_heading_like(&fragment.text);

            if let Some(run) = current
                .as_mut()
                .filter(|run| run.accepts(&style.font_family, style.font_size, heading_like))
            {
                run.text.push_str(&fragment.text);
                continue;
            }

            let next = CoalescedRun::new(
                fragment.text.clone(),
                style.font_family,
                style.font_size,
                heading_like,
            );
            if let Some(done) = current.replace(next) {
                runs.push(done);
            }
        }
        runs.extend(current);

        if self.skipped > 0 {
            log::debug!(
                "Coalescer: skipped {} of {} fragments with malformed style",
                self.skipped,
                fragments.len()
            );
        }
        log::debug!(
            "Coalescer: {} fragments -> {} runs",
            fragments.len(),
            runs.len()
        );

        runs
    }
}
