//! The [`BasisFunction`] trait and [`BasisValue`] enum.
//!
//! Basis functions are modular transforms evaluated once per decision
//! cycle. They declare their counter dependencies at registration, so the
//! feature pipeline can be checked against them before the first cycle.

use skymask_core::{EvalError, FeatureDeps};

use crate::context::EvalContext;

/// Output of [`BasisFunction::calc_value`].
#[derive(Clone, Debug, PartialEq)]
pub enum BasisValue {
    /// The same value for every pixel.
    Scalar(f64),
    /// One value per pixel; NaN marks an excluded pixel.
    Map(Vec<f64>),
}

impl BasisValue {
    /// The per-pixel map, if this is one.
    pub fn as_map(&self) -> Option<&[f64]> {
        match self {
            Self::Map(values) => Some(values),
            Self::Scalar(_) => None,
        }
    }

    /// Consume into the per-pixel map, if this is one.
    pub fn into_map(self) -> Option<Vec<f64>> {
        match self {
            Self::Map(values) => Some(values),
            Self::Scalar(_) => None,
        }
    }

    /// The scalar, if this is one.
    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            Self::Scalar(value) => Some(*value),
            Self::Map(_) => None,
        }
    }

    /// Value at `pix`: the scalar everywhere, or the map entry.
    pub fn at(&self, pix: usize) -> Option<f64> {
        match self {
            Self::Scalar(value) => Some(*value),
            Self::Map(values) => values.get(pix).copied(),
        }
    }
}

/// A per-cycle transform from observing state to a sky signal.
///
/// # Contract
///
/// - Evaluation MUST be deterministic: the same context produces the same
///   output.
/// - `&self`: basis functions never mutate during evaluation. Mutable
///   survey state lives in counters owned by the feature pipeline.
/// - Every returned map is a fresh allocation the caller owns.
/// - `required_features()` is called once at startup, not per cycle.
///
/// # Object safety
///
/// This trait is object-safe; an engine stores basis functions as
/// `Vec<Box<dyn BasisFunction>>`.
///
/// # Examples
///
/// A basis function that prefers pixels near the meridian:
///
/// ```
/// use skymask_basis::{BasisFunction, BasisValue, EvalContext};
/// use skymask_core::{Conditions, EvalError, FeatureKind, FeatureReader};
///
/// struct MeridianBonus;
///
/// impl BasisFunction for MeridianBonus {
///     fn name(&self) -> &str { "meridian_bonus" }
///
///     fn calc_value(&self, ctx: &EvalContext<'_>) -> Result<BasisValue, EvalError> {
///         let values = ctx.conditions().hour_angle().iter().map(|ha| ha.cos()).collect();
///         Ok(BasisValue::Map(values))
///     }
/// }
///
/// struct NoFeatures;
/// impl FeatureReader for NoFeatures {
///     fn counts(&self, _: FeatureKind) -> Option<&[u32]> { None }
/// }
///
/// let conditions = Conditions::new(12);
/// let ctx = EvalContext::new(&conditions, &NoFeatures);
/// let value = MeridianBonus.calc_value(&ctx).unwrap();
/// assert_eq!(value.at(0), Some(1.0));
/// assert!(MeridianBonus.check_feasibility(&ctx).unwrap());
/// ```
pub trait BasisFunction: Send + 'static {
    /// Human-readable name for error reporting and logs.
    fn name(&self) -> &str;

    /// Counters this basis function reads through
    /// [`EvalContext::features`].
    ///
    /// Default: none.
    fn required_features(&self) -> FeatureDeps {
        FeatureDeps::new()
    }

    /// Whether the survey may observe at all under these conditions.
    ///
    /// Default: always feasible.
    fn check_feasibility(&self, _ctx: &EvalContext<'_>) -> Result<bool, EvalError> {
        Ok(true)
    }

    /// Per-pixel desirability, or a scalar applying to every pixel.
    fn calc_value(&self, ctx: &EvalContext<'_>) -> Result<BasisValue, EvalError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessors_match_variant() {
        let scalar = BasisValue::Scalar(0.0);
        assert_eq!(scalar.as_scalar(), Some(0.0));
        assert_eq!(scalar.as_map(), None);
        assert_eq!(scalar.at(1_000), Some(0.0));

        let map = BasisValue::Map(vec![1.0, f64::NAN]);
        assert_eq!(map.as_scalar(), None);
        assert_eq!(map.at(0), Some(1.0));
        assert!(map.at(1).unwrap().is_nan());
        assert_eq!(map.at(2), None);
        assert_eq!(map.into_map().map(|m| m.len()), Some(2));
    }
}
