//! Feasibility gates.
//!
//! Gates produce no per-pixel signal: `calc_value` is the scalar 0 and
//! the decision is made entirely by `check_feasibility`.

use skymask_basis::{BasisFunction, BasisValue, EvalContext};
use skymask_core::{ConfigError, EvalError};

/// Last feasible night of [`NightRangeGate::default`].
pub const DEFAULT_NIGHT_MAX: u32 = 366;

/// Moon altitude limit of [`MoonAltGate::default`], degrees.
pub const DEFAULT_MOON_ALT_LIMIT: f64 = -5.0;

// ── NightRangeGate ─────────────────────────────────────────────────

/// Feasible up to and including night `night_max`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NightRangeGate {
    night_max: u32,
}

impl NightRangeGate {
    /// Gate closing after `night_max`.
    pub fn new(night_max: u32) -> Self {
        Self { night_max }
    }

    /// Last feasible night.
    pub fn night_max(&self) -> u32 {
        self.night_max
    }
}

impl Default for NightRangeGate {
    fn default() -> Self {
        Self::new(DEFAULT_NIGHT_MAX)
    }
}

impl BasisFunction for NightRangeGate {
    fn name(&self) -> &str {
        "NightRangeGate"
    }

    fn check_feasibility(&self, ctx: &EvalContext<'_>) -> Result<bool, EvalError> {
        Ok(ctx.conditions().night() <= self.night_max)
    }

    fn calc_value(&self, _ctx: &EvalContext<'_>) -> Result<BasisValue, EvalError> {
        Ok(BasisValue::Scalar(0.0))
    }
}

// ── MoonAltGate ────────────────────────────────────────────────────

/// Infeasible while the moon is above an altitude limit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MoonAltGate {
    alt_limit: f64,
}

impl MoonAltGate {
    /// Gate at `alt_limit` degrees. The limit must be finite.
    pub fn new(alt_limit: f64) -> Result<Self, ConfigError> {
        if !alt_limit.is_finite() {
            return Err(ConfigError::InvalidParameter {
                name: "alt_limit",
                reason: format!("must be finite, got {alt_limit}"),
            });
        }
        Ok(Self {
            alt_limit: alt_limit.to_radians(),
        })
    }

    /// The limit in radians.
    pub fn alt_limit(&self) -> f64 {
        self.alt_limit
    }
}

impl Default for MoonAltGate {
    fn default() -> Self {
        Self {
            alt_limit: DEFAULT_MOON_ALT_LIMIT.to_radians(),
        }
    }
}

impl BasisFunction for MoonAltGate {
    fn name(&self) -> &str {
        "MoonAltGate"
    }

    fn check_feasibility(&self, ctx: &EvalContext<'_>) -> Result<bool, EvalError> {
        Ok(ctx.conditions().moon_alt() <= self.alt_limit)
    }

    fn calc_value(&self, _ctx: &EvalContext<'_>) -> Result<BasisValue, EvalError> {
        Ok(BasisValue::Scalar(0.0))
    }
}
