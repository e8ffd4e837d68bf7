//! Observation-count masks.
//!
//! Both masks start all-zero and set NaN on every pixel whose counter has
//! reached the limit. They only read counters; the feature pipeline owns
//! and updates them.

use skymask_basis::{BasisFunction, BasisValue, EvalContext};
use skymask_core::{Band, EvalError, FeatureDeps, FeatureKind, EXCLUDED};
use skymask_sphere::HealpixGrid;
use smallvec::smallvec;

/// Visits per pixel per night allowed by [`NightCountMask::default_for`].
pub const DEFAULT_N_LIMIT: u32 = 1;

/// Lifetime visits per pixel allowed by [`TotalCountMask::default_for`].
pub const DEFAULT_N_MAX: u32 = 3;

/// Zero where `counts < limit`, NaN elsewhere.
fn limit_mask(template: &[f64], counts: &[u32], limit: u32) -> Vec<f64> {
    let mut out = template.to_vec();
    for (value, &count) in out.iter_mut().zip(counts) {
        if count >= limit {
            *value = EXCLUDED;
        }
    }
    out
}

// ── NightCountMask ─────────────────────────────────────────────────

/// Excludes pixels already observed `n_limit` times tonight.
#[derive(Clone, Debug)]
pub struct NightCountMask {
    n_limit: u32,
    band: Option<Band>,
    template: Vec<f64>,
}

impl NightCountMask {
    /// Mask over `grid` with limit `n_limit`, counting only `band` if given.
    pub fn new(grid: &HealpixGrid, n_limit: u32, band: Option<Band>) -> Self {
        Self {
            n_limit,
            band,
            template: vec![0.0; grid.npix()],
        }
    }

    /// One visit per night in any band.
    pub fn default_for(grid: &HealpixGrid) -> Self {
        Self::new(grid, DEFAULT_N_LIMIT, None)
    }

    /// The limit.
    pub fn n_limit(&self) -> u32 {
        self.n_limit
    }

    /// The counter this mask reads.
    pub fn feature(&self) -> FeatureKind {
        FeatureKind::NightCount { band: self.band }
    }
}

impl BasisFunction for NightCountMask {
    fn name(&self) -> &str {
        "NightCountMask"
    }

    fn required_features(&self) -> FeatureDeps {
        smallvec![self.feature()]
    }

    fn calc_value(&self, ctx: &EvalContext<'_>) -> Result<BasisValue, EvalError> {
        let counts = ctx.require_counts(self.name(), self.feature(), self.template.len())?;
        Ok(BasisValue::Map(limit_mask(&self.template, counts, self.n_limit)))
    }
}

// ── TotalCountMask ─────────────────────────────────────────────────

/// Excludes pixels already observed `n_max` times over the survey.
#[derive(Clone, Debug)]
pub struct TotalCountMask {
    n_max: u32,
    band: Option<Band>,
    template: Vec<f64>,
}

impl TotalCountMask {
    /// Mask over `grid` with limit `n_max`, counting only `band` if given.
    pub fn new(grid: &HealpixGrid, n_max: u32, band: Option<Band>) -> Self {
        Self {
            n_max,
            band,
            template: vec![0.0; grid.npix()],
        }
    }

    /// Three visits in any band.
    pub fn default_for(grid: &HealpixGrid) -> Self {
        Self::new(grid, DEFAULT_N_MAX, None)
    }

    /// The limit.
    pub fn n_max(&self) -> u32 {
        self.n_max
    }

    /// The counter this mask reads.
    pub fn feature(&self) -> FeatureKind {
        FeatureKind::TotalCount { band: self.band }
    }
}

impl BasisFunction for TotalCountMask {
    fn name(&self) -> &str {
        "TotalCountMask"
    }

    fn required_features(&self) -> FeatureDeps {
        smallvec![self.feature()]
    }

    fn calc_value(&self, ctx: &EvalContext<'_>) -> Result<BasisValue, EvalError> {
        let counts = ctx.require_counts(self.name(), self.feature(), self.template.len())?;
        Ok(BasisValue::Map(limit_mask(&self.template, counts, self.n_max)))
    }
}
