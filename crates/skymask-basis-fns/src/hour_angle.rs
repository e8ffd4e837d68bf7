//! Hour-angle window mask.
//!
//! # Semantics
//!
//! The output starts all-NaN. A pixel is set to 0 if its hour angle is
//! below `ha_min` **or** above `ha_max` (each bound optional, in hours).
//! The two tests are applied independently, so with `ha_min = 6` and
//! `ha_max = 18` the mask allows hour angles outside `[6h, 18h]`, the
//! region around the meridian (hour angles wrap at 24h), and excludes the
//! anti-meridian half of the sky. With neither bound set every pixel is
//! excluded.
//!
//! # Construction
//!
//! ```
//! use skymask_basis_fns::HourAngleMask;
//! use skymask_sphere::HealpixGrid;
//!
//! let grid = HealpixGrid::new(16).unwrap();
//! let mask = HourAngleMask::new(&grid, Some(6.0), Some(18.0)).unwrap();
//! assert!(HourAngleMask::new(&grid, Some(f64::NAN), None).is_err());
//! ```

use std::f64::consts::PI;

use skymask_basis::{BasisFunction, BasisValue, EvalContext};
use skymask_core::{ConfigError, EvalError, EXCLUDED};
use skymask_sphere::HealpixGrid;

/// Allows pixels whose hour angle lies outside an optional window.
#[derive(Clone, Debug)]
pub struct HourAngleMask {
    ha_min: Option<f64>,
    ha_max: Option<f64>,
    template: Vec<f64>,
}

impl HourAngleMask {
    /// Mask over `grid` with bounds `ha_min` and `ha_max` in hours.
    ///
    /// Each bound must be finite if given. The bounds are not required to
    /// be ordered.
    pub fn new(grid: &HealpixGrid, ha_min: Option<f64>, ha_max: Option<f64>) -> Result<Self, ConfigError> {
        for (name, bound) in [("ha_min", ha_min), ("ha_max", ha_max)] {
            if let Some(hours) = bound {
                if !hours.is_finite() {
                    return Err(ConfigError::InvalidParameter {
                        name,
                        reason: format!("must be finite, got {hours}"),
                    });
                }
            }
        }
        Ok(Self {
            ha_min,
            ha_max,
            template: vec![EXCLUDED; grid.npix()],
        })
    }

    /// Lower bound in hours.
    pub fn ha_min(&self) -> Option<f64> {
        self.ha_min
    }

    /// Upper bound in hours.
    pub fn ha_max(&self) -> Option<f64> {
        self.ha_max
    }
}

impl BasisFunction for HourAngleMask {
    fn name(&self) -> &str {
        "HourAngleMask"
    }

    fn calc_value(&self, ctx: &EvalContext<'_>) -> Result<BasisValue, EvalError> {
        let hour_angle = ctx.require_hour_angle(self.name(), self.template.len())?;
        let min = self.ha_min.map(|h| h * PI / 12.0);
        let max = self.ha_max.map(|h| h * PI / 12.0);

        let mut out = self.template.clone();
        for (value, &ha) in out.iter_mut().zip(hour_angle) {
            let below = min.is_some_and(|m| ha < m);
            let above = max.is_some_and(|m| ha > m);
            if below || above {
                *value = 0.0;
            }
        }
        Ok(BasisValue::Map(out))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use skymask_core::Conditions;
    use skymask_test_utils::{conditions_with_hour_angles, single_pixel_conditions, MockFeatureReader};

    fn mask(npix: usize, ha_min: Option<f64>, ha_max: Option<f64>) -> HourAngleMask {
        HourAngleMask {
            ha_min,
            ha_max,
            template: vec![EXCLUDED; npix],
        }
    }

    fn eval(mask: &HourAngleMask, conditions: &Conditions) -> Result<Vec<f64>, EvalError> {
        let reader = MockFeatureReader::new();
        let ctx = EvalContext::new(conditions, &reader);
        Ok(mask.calc_value(&ctx)?.into_map().unwrap_or_default())
    }

    #[test]
    fn window_is_a_union_of_tails() {
        let m = mask(3, Some(6.0), Some(18.0));
        let out = eval(&m, &conditions_with_hour_angles(&[3.0, 21.0, 12.0])).unwrap();
        assert_eq!(out[0], 0.0);
        assert_eq!(out[1], 0.0);
        assert!(out[2].is_nan());
    }

    #[test]
    fn bounds_are_strict() {
        let m = mask(2, Some(6.0), Some(18.0));
        let out = eval(&m, &conditions_with_hour_angles(&[6.0, 18.0])).unwrap();
        assert!(out.iter().all(|v| v.is_nan()));
    }

    #[test]
    fn single_bounds() {
        let hours = [1.0, 11.0, 23.0];
        let only_min = eval(&mask(3, Some(10.0), None), &conditions_with_hour_angles(&hours)).unwrap();
        assert_eq!(only_min[0], 0.0);
        assert!(only_min[1].is_nan() && only_min[2].is_nan());

        let only_max = eval(&mask(3, None, Some(10.0)), &conditions_with_hour_angles(&hours)).unwrap();
        assert!(only_max[0].is_nan());
        assert_eq!(only_max[1], 0.0);
        assert_eq!(only_max[2], 0.0);
    }

    #[test]
    fn meridian_pixel_passes_a_night_window() {
        let m = mask(1, Some(3.0), Some(21.0));
        assert_eq!(eval(&m, &single_pixel_conditions(0.0)).unwrap(), vec![0.0]);
        assert!(eval(&m, &single_pixel_conditions(12.0)).unwrap()[0].is_nan());
    }

    #[test]
    fn unbounded_mask_excludes_everything() {
        let out = eval(&mask(3, None, None), &conditions_with_hour_angles(&[0.0, 6.0, 12.0])).unwrap();
        assert!(out.iter().all(|v| v.is_nan()));
    }

    #[test]
    fn wrong_resolution_is_an_error() {
        let grid = HealpixGrid::new(1).unwrap();
        let m = HourAngleMask::new(&grid, Some(6.0), None).unwrap();
        let err = eval(&m, &conditions_with_hour_angles(&[1.0; 4])).unwrap_err();
        assert_eq!(
            err,
            EvalError::ResolutionMismatch {
                basis: "HourAngleMask".into(),
                what: "hour angle",
                expected: 12,
                actual: 4,
            }
        );
    }

    #[test]
    fn rejects_non_finite_bounds() {
        let grid = HealpixGrid::new(1).unwrap();
        assert!(matches!(
            HourAngleMask::new(&grid, None, Some(f64::INFINITY)),
            Err(ConfigError::InvalidParameter { name: "ha_max", .. })
        ));
    }

    proptest! {
        #[test]
        fn evaluation_is_idempotent(hours in proptest::collection::vec(0.0f64..24.0, 1..64)) {
            let m = mask(hours.len(), Some(6.0), Some(18.0));
            let conditions = conditions_with_hour_angles(&hours);
            let first = eval(&m, &conditions).unwrap();
            let second = eval(&m, &conditions).unwrap();
            for (a, b) in first.iter().zip(&second) {
                prop_assert!(a == b || (a.is_nan() && b.is_nan()));
            }
            for (v, h) in first.iter().zip(&hours) {
                let allowed = *h < 6.0 || *h > 18.0;
                prop_assert_eq!(*v == 0.0, allowed, "hour {}", h);
            }
        }
    }
}
