//! Observation counters for skymask.
//!
//! Counters are the only mutable state stateful basis functions read.
//! The feature pipeline owns them in a [`FeatureRegistry`], feeds each
//! completed [`ObservationRecord`] to every counter, and lends the
//! registry to basis functions as a read-only
//! [`FeatureReader`](skymask_core::FeatureReader).

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod counter;
pub mod record;
pub mod registry;

pub use counter::{instantiate, NightObsCounter, ObsCounter, SurveyFeature};
pub use record::ObservationRecord;
pub use registry::FeatureRegistry;
