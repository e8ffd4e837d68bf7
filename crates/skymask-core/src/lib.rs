//! Core types and traits for the skymask survey masking engine.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the vocabulary shared by the rest of the workspace: photometric bands
//! and survey constants, the observing-conditions snapshot, counter
//! feature kinds with their reader trait, and the error taxonomy.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod band;
pub mod conditions;
pub mod error;
pub mod feature;

pub use band::{
    Band, BANDS, DEFAULT_NSIDE, MAX_NSIDE, N_BANDS, STANDARD_EXP_TIME, STANDARD_EXP_TIME_U,
};
pub use conditions::Conditions;
pub use error::{ConfigError, EvalError, FeatureError};
pub use feature::{FeatureDeps, FeatureKind, FeatureReader};

/// Sentinel stored in per-pixel value maps for excluded pixels.
pub const EXCLUDED: f64 = f64::NAN;
