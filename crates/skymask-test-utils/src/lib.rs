//! Test utilities and mock types for skymask development.
//!
//! Provides a mock [`FeatureReader`] and fixtures for conditions
//! snapshots and region label maps.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::collections::HashMap;

use skymask_core::{FeatureKind, FeatureReader};

pub mod fixtures;

pub use fixtures::{conditions_with_hour_angles, labels_with, single_pixel_conditions};

/// Mock implementation of [`FeatureReader`].
///
/// Backed by a `HashMap<FeatureKind, Vec<u32>>` for flexible test setup.
/// Pre-populate counters with [`set_counts`](MockFeatureReader::set_counts)
/// before passing to code under test.
#[derive(Clone, Debug, Default)]
pub struct MockFeatureReader {
    counts: HashMap<FeatureKind, Vec<u32>>,
}

impl MockFeatureReader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate a counter.
    pub fn set_counts(&mut self, kind: FeatureKind, counts: Vec<u32>) {
        self.counts.insert(kind, counts);
    }

    /// Builder form of [`set_counts`](MockFeatureReader::set_counts).
    pub fn with_counts(mut self, kind: FeatureKind, counts: Vec<u32>) -> Self {
        self.set_counts(kind, counts);
        self
    }

    /// Mutable access to a counter, e.g. to mutate it between evaluations.
    pub fn counts_mut(&mut self, kind: FeatureKind) -> Option<&mut Vec<u32>> {
        self.counts.get_mut(&kind)
    }
}

impl FeatureReader for MockFeatureReader {
    fn counts(&self, kind: FeatureKind) -> Option<&[u32]> {
        self.counts.get(&kind).map(|v| v.as_slice())
    }
}
