//! Feature planning and basis-set validation.
//!
//! [`plan_features`] collects the counters a list of basis functions
//! declares so the feature pipeline can instantiate exactly those.
//! [`validate_basis_set`] runs once at startup to check that a feature
//! source actually provides them, so no cycle ever hits a missing counter.

use indexmap::IndexMap;
use skymask_core::{FeatureKind, FeatureReader};
use thiserror::Error;
use tracing::debug;

use crate::basis::BasisFunction;

// ── Plan ───────────────────────────────────────────────────────────

/// Distinct counters required by a basis set, in first-declared order,
/// each with the names of the basis functions that read it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[must_use]
pub struct FeaturePlan {
    consumers: IndexMap<FeatureKind, Vec<String>>,
}

impl FeaturePlan {
    /// Number of distinct counters.
    pub fn len(&self) -> usize {
        self.consumers.len()
    }

    /// Whether no counters are required.
    pub fn is_empty(&self) -> bool {
        self.consumers.is_empty()
    }

    /// Required kinds in first-declared order.
    pub fn kinds(&self) -> impl Iterator<Item = FeatureKind> + '_ {
        self.consumers.keys().copied()
    }

    /// Names of the basis functions reading `kind`.
    pub fn consumers(&self, kind: FeatureKind) -> Option<&[String]> {
        self.consumers.get(&kind).map(Vec::as_slice)
    }
}

/// Collect the counters declared by `basis_fns`.
pub fn plan_features(basis_fns: &[&dyn BasisFunction]) -> FeaturePlan {
    let mut consumers: IndexMap<FeatureKind, Vec<String>> = IndexMap::new();
    for basis in basis_fns {
        for kind in basis.required_features() {
            let names = consumers.entry(kind).or_default();
            if !names.iter().any(|n| n == basis.name()) {
                names.push(basis.name().to_string());
            }
        }
    }
    FeaturePlan { consumers }
}

// ── Validation ─────────────────────────────────────────────────────

/// Errors from basis-set validation (startup-time, not per-cycle).
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum BasisSetError {
    /// No basis functions supplied.
    #[error("basis set is empty")]
    EmptySet,
    /// A declared counter is not provided by the feature source.
    #[error("basis function '{basis}' requires feature {feature}, which is not registered")]
    MissingFeature {
        /// First basis function declaring the counter.
        basis: String,
        /// The absent counter.
        feature: FeatureKind,
    },
    /// A provided counter covers the wrong number of pixels.
    #[error("feature {feature} has {actual} pixels, expected {expected}")]
    FeatureShape {
        /// The mis-sized counter.
        feature: FeatureKind,
        /// Grid pixel count.
        expected: usize,
        /// Counter length.
        actual: usize,
    },
}

/// Check that `features` provides every counter `basis_fns` declares, at
/// `npix` pixels.
///
/// Returns the [`FeaturePlan`] on success.
pub fn validate_basis_set(
    basis_fns: &[&dyn BasisFunction],
    features: &dyn FeatureReader,
    npix: usize,
) -> Result<FeaturePlan, BasisSetError> {
    if basis_fns.is_empty() {
        return Err(BasisSetError::EmptySet);
    }
    let plan = plan_features(basis_fns);
    for (&feature, names) in &plan.consumers {
        let basis = names.first().cloned().unwrap_or_default();
        let counts = features
            .counts(feature)
            .ok_or(BasisSetError::MissingFeature { basis, feature })?;
        if counts.len() != npix {
            return Err(BasisSetError::FeatureShape {
                feature,
                expected: npix,
                actual: counts.len(),
            });
        }
    }
    debug!(
        basis_fns = basis_fns.len(),
        features = plan.len(),
        npix,
        "basis set validated"
    );
    Ok(plan)
}
