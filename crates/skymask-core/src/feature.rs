//! Counter feature kinds and the [`FeatureReader`] trait.
//!
//! Stateful basis functions do not look counters up by string key. Each
//! declares the [`FeatureKind`]s it reads; the feature pipeline owns the
//! counters and exposes them through a [`FeatureReader`].

use std::fmt;

use smallvec::SmallVec;

use crate::band::Band;

/// Identifies one observation counter.
///
/// The set of counters is closed: a registry can instantiate any kind
/// without further configuration beyond the grid resolution.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FeatureKind {
    /// Observations of each pixel during the current night.
    NightCount {
        /// Count only visits in this band; `None` counts every band.
        band: Option<Band>,
    },
    /// Observations of each pixel since the survey started.
    TotalCount {
        /// Count only visits in this band; `None` counts every band.
        band: Option<Band>,
    },
}

impl FeatureKind {
    /// Band filter of this counter, if any.
    pub fn band(self) -> Option<Band> {
        match self {
            Self::NightCount { band } | Self::TotalCount { band } => band,
        }
    }
}

impl fmt::Display for FeatureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::NightCount { .. } => "night_count",
            Self::TotalCount { .. } => "total_count",
        };
        match self.band() {
            Some(band) => write!(f, "{name}[{band}]"),
            None => write!(f, "{name}[all]"),
        }
    }
}

/// Feature declarations of a single basis function.
///
/// Inline capacity covers every basis function in this workspace.
pub type FeatureDeps = SmallVec<[FeatureKind; 2]>;

/// Read-only access to per-pixel observation counters.
///
/// Implemented by the feature registry for production and by mocks for
/// tests. Returns `None` if the counter is not registered.
pub trait FeatureReader {
    /// Per-pixel counts for a feature, indexed by pixel id.
    fn counts(&self, kind: FeatureKind) -> Option<&[u32]>;
}
