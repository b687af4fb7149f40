//! Multi-document processing on a worker pool.
//!
//! Each document is one task. Tasks share no mutable state, so a failure in
//! one document never affects another; [`ErrorMode`] decides whether such a
//! failure aborts the batch or is logged and reported alongside the rest.
//! Results come back in input order from [`BatchProcessor::process`], or in
//! completion order from the streaming variants.

use std::path::PathBuf;
use std::sync::Arc;

use crossbeam_channel::{unbounded, Receiver};
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::error::{Error, Result};
use crate::model::{SegmentedDocument, SourceDocument};
use crate::segment::{ErrorMode, SegmentOptions, Segmenter};
use crate::source::{document_name, SourceRegistry};

/// The result of processing one document.
#[derive(Debug)]
pub struct DocumentOutcome {
    /// Document name
    pub name: String,

    /// Segmentation result, or the document's failure
    pub result: Result<SegmentedDocument>,
}

impl DocumentOutcome {
    /// Check if the document was segmented.
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }

    /// Number of sections produced (0 on failure).
    pub fn section_count(&self) -> usize {
        self.result
            .as_ref()
            .map(SegmentedDocument::section_count)
            .unwrap_or(0)
    }
}

/// Counts over a set of outcomes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// Documents processed
    pub documents: usize,
    /// Documents segmented successfully
    pub succeeded: usize,
    /// Documents that failed
    pub failed: usize,
    /// Sections across all successful documents
    pub sections: usize,
}

impl BatchSummary {
    /// Summarize a set of outcomes.
    pub fn from_outcomes(outcomes: &[DocumentOutcome]) -> Self {
        let mut summary = Self::default();
        for outcome in outcomes {
            summary.add(outcome);
        }
        summary
    }

    /// Count one more outcome.
    pub fn add(&mut self, outcome: &DocumentOutcome) {
        self.documents += 1;
        if outcome.is_ok() {
            self.succeeded += 1;
            self.sections += outcome.section_count();
        } else {
            self.failed += 1;
        }
    }
}

/// Runs segmentation over many documents, one task per document.
#[derive(Debug, Clone, Default)]
pub struct BatchProcessor {
    options: SegmentOptions,
    segmenter: Segmenter,
}

impl BatchProcessor {
    /// Create a batch processor.
    pub fn new(options: SegmentOptions) -> Self {
        Self {
            segmenter: Segmenter::new(options.clone()),
            options,
        }
    }

    /// Get the options.
    pub fn options(&self) -> &SegmentOptions {
        &self.options
    }

    /// Segment documents already in memory.
    ///
    /// Outcomes are returned in input order. In strict mode the first failed
    /// document (in input order) is returned as [`Error::Document`].
    pub fn process(&self, docs: Vec<SourceDocument>) -> Result<Vec<DocumentOutcome>> {
        let segmenter = &self.segmenter;
        let outcomes = self.run(docs, |doc| DocumentOutcome {
            name: doc.name.clone(),
            result: segmenter.segment(&doc),
        })?;
        self.check(outcomes)
    }

    /// Load and segment files. A file that cannot be loaded counts as a
    /// failure of that document only.
    pub fn process_paths(
        &self,
        registry: &SourceRegistry,
        paths: &[PathBuf],
    ) -> Result<Vec<DocumentOutcome>> {
        let segmenter = &self.segmenter;
        let outcomes = self.run(paths.to_vec(), |path| DocumentOutcome {
            name: document_name(&path),
            result: registry.load(&path).and_then(|doc| segmenter.segment(&doc)),
        })?;
        self.check(outcomes)
    }

    /// Segment documents in the background, delivering outcomes as they
    /// complete. The channel closes once every document has been handled.
    ///
    /// The error mode is left to the consumer: every outcome is delivered.
    pub fn stream(&self, docs: Vec<SourceDocument>) -> Result<Receiver<DocumentOutcome>> {
        let segmenter = self.segmenter.clone();
        self.spawn_all(docs, move |doc| DocumentOutcome {
            name: doc.name.clone(),
            result: segmenter.segment(&doc),
        })
    }

    /// Load and segment files in the background; see [`BatchProcessor::stream`].
    pub fn stream_paths(
        &self,
        registry: Arc<SourceRegistry>,
        paths: Vec<PathBuf>,
    ) -> Result<Receiver<DocumentOutcome>> {
        let segmenter = self.segmenter.clone();
        self.spawn_all(paths, move |path| DocumentOutcome {
            name: document_name(&path),
            result: registry.load(&path).and_then(|doc| segmenter.segment(&doc)),
        })
    }

    fn build_pool(&self) -> Result<ThreadPool> {
        let threads = if self.options.parallel {
            self.options.threads
        } else {
            1
        };
        let pool = ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("snipdf-worker-{}", i))
            .build()?;
        Ok(pool)
    }

    fn run<T, F>(&self, items: Vec<T>, task: F) -> Result<Vec<DocumentOutcome>>
    where
        T: Send,
        F: Fn(T) -> DocumentOutcome + Sync + Send,
    {
        if !self.options.parallel {
            return Ok(items.into_iter().map(task).collect());
        }

        let pool = self.build_pool()?;
        log::debug!(
            "Processing {} documents on {} workers",
            items.len(),
            pool.current_num_threads()
        );
        Ok(pool.install(|| items.into_par_iter().map(&task).collect()))
    }

    fn spawn_all<T, F>(&self, items: Vec<T>, task: F) -> Result<Receiver<DocumentOutcome>>
    where
        T: Send + 'static,
        F: Fn(T) -> DocumentOutcome + Sync + Send + 'static,
    {
        let pool = self.build_pool()?;
        let task = Arc::new(task);
        let (tx, rx) = unbounded();

        for item in items {
            let tx = tx.clone();
            let task = Arc::clone(&task);
            pool.spawn(move || {
                // The receiver may have been dropped; the outcome is then discarded.
                let _ = tx.send(task(item));
            });
        }

        // Dropping the pool lets its workers exit once the spawned tasks finish.
        Ok(rx)
    }

    fn check(&self, outcomes: Vec<DocumentOutcome>) -> Result<Vec<DocumentOutcome>> {
        match self.options.error_mode {
            ErrorMode::Strict => {
                if outcomes.iter().all(DocumentOutcome::is_ok) {
                    return Ok(outcomes);
                }
                let failed = outcomes.into_iter().find_map(|o| match o.result {
                    Err(err) => Some(Error::for_document(o.name, err)),
                    Ok(_) => None,
                });
                Err(failed.unwrap_or_else(|| Error::Other("batch failed".into())))
            }
            ErrorMode::Lenient => {
                for outcome in &outcomes {
                    if let Err(ref err) = outcome.result {
                        log::warn!("Skipping document '{}': {}", outcome.name, err);
                    }
                }
                Ok(outcomes)
            }
        }
    }
}
