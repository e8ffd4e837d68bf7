//! Evaluation context passed to basis functions.

use skymask_core::{Conditions, EvalError, FeatureKind, FeatureReader};

/// Read-only inputs of one decision cycle.
///
/// Uses dynamic dispatch (`&dyn FeatureReader`) to keep the
/// [`BasisFunction`](crate::BasisFunction) trait object-safe while
/// supporting mock-based testing.
#[derive(Clone, Copy)]
pub struct EvalContext<'a> {
    conditions: &'a Conditions,
    features: &'a dyn FeatureReader,
}

impl<'a> EvalContext<'a> {
    /// Construct a context.
    ///
    /// Typically called by the scheduling engine. For testing, pass a mock
    /// reader from `skymask-test-utils`.
    pub fn new(conditions: &'a Conditions, features: &'a dyn FeatureReader) -> Self {
        Self {
            conditions,
            features,
        }
    }

    /// The conditions snapshot.
    pub fn conditions(&self) -> &'a Conditions {
        self.conditions
    }

    /// Counter access.
    pub fn features(&self) -> &'a dyn FeatureReader {
        self.features
    }

    /// Counts of `kind`, checked to cover `npix` pixels.
    ///
    /// Fails with [`EvalError::MissingFeature`] if the counter is absent
    /// and [`EvalError::ResolutionMismatch`] if its length is wrong.
    /// `basis` names the caller in either error.
    pub fn require_counts(
        &self,
        basis: &str,
        kind: FeatureKind,
        npix: usize,
    ) -> Result<&'a [u32], EvalError> {
        let counts = self
            .features
            .counts(kind)
            .ok_or_else(|| EvalError::MissingFeature {
                basis: basis.to_string(),
                feature: kind,
            })?;
        if counts.len() != npix {
            return Err(EvalError::ResolutionMismatch {
                basis: basis.to_string(),
                what: "feature counts",
                expected: npix,
                actual: counts.len(),
            });
        }
        Ok(counts)
    }

    /// Per-pixel hour angle, checked to cover `npix` pixels.
    pub fn require_hour_angle(&self, basis: &str, npix: usize) -> Result<&'a [f64], EvalError> {
        let ha = self.conditions.hour_angle();
        if ha.len() != npix {
            return Err(EvalError::ResolutionMismatch {
                basis: basis.to_string(),
                what: "hour angle",
                expected: npix,
                actual: ha.len(),
            });
        }
        Ok(ha)
    }
}

impl std::fmt::Debug for EvalContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EvalContext")
            .field("conditions", self.conditions)
            .finish_non_exhaustive()
    }
}
