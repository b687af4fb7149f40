//! Data model for the segmentation pipeline.
//!
//! Fragments flow one way through the model: a [`SourceDocument`] holds the
//! [`RawFragment`]s read from an extraction backend, the coalescer turns them
//! into [`CoalescedRun`]s, and the structurer folds those into
//! [`SectionRecord`]s collected in a [`SegmentedDocument`].

mod document;
mod fragment;
mod run;
mod section;

pub use document::{Metadata, SegmentedDocument, SourceDocument};
pub use fragment::{RawFragment, StyleDescriptor};
pub use run::CoalescedRun;
pub use section::SectionRecord;
