//! Segmentation options and configuration.

/// Number of leading characters inspected for a heading marker.
pub const DEFAULT_HEADING_PROBE_CHARS: usize = 5;

/// Options for segmenting documents.
#[derive(Debug, Clone)]
pub struct SegmentOptions {
    /// Error handling mode for multi-document runs
    pub error_mode: ErrorMode,

    /// Whether to process documents in parallel
    pub parallel: bool,

    /// Worker threads for parallel processing (0 = one per CPU)
    pub threads: usize,

    /// Leading characters of a fragment checked for a heading marker
    pub heading_probe_chars: usize,
}

impl SegmentOptions {
    /// Create new segment options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set error mode.
    pub fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }

    /// Enable lenient mode (log failed documents and continue).
    pub fn lenient(mut self) -> Self {
        self.error_mode = ErrorMode::Lenient;
        self
    }

    /// Enable or disable parallel processing.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Set the worker thread count.
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    /// Set how many leading characters are probed for a heading marker.
    pub fn with_heading_probe_chars(mut self, chars: usize) -> Self {
        self.heading_probe_chars = chars;
        self
    }
}

impl Default for SegmentOptions {
    fn default() -> Self {
        Self {
            error_mode: ErrorMode::Strict,
            parallel: true,
            threads: 0,
            heading_probe_chars: DEFAULT_HEADING_PROBE_CHARS,
        }
    }
}

/// Error handling mode when processing several documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Abort on the first failed document
    #[default]
    Strict,
    /// Log failed documents and continue with the rest
    Lenient,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_options_builder() {
        let options = SegmentOptions::new()
            .lenient()
            .with_threads(4)
            .with_heading_probe_chars(8)
            .sequential();

        assert_eq!(options.error_mode, ErrorMode::Lenient);
        assert_eq!(options.threads, 4);
        assert_eq!(options.heading_probe_chars, 8);
        assert!(!options.parallel);
    }

    #[test]
    fn test_default_options() {
        let options = SegmentOptions::default();
        assert_eq!(options.error_mode, ErrorMode::Strict);
        assert!(options.parallel);
        assert_eq!(options.threads, 0);
        assert_eq!(options.heading_probe_chars, 5);
    }
}
