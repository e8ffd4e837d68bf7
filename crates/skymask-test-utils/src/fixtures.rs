//! Reusable conditions and label-map fixtures.
//!
//! - [`conditions_with_hour_angles`]: snapshot whose pixels sit at given
//!   hour angles, in hours.
//! - [`single_pixel_conditions`]: one-pixel snapshot at one hour angle.
//! - [`labels_with`]: label map with chosen pixels set to one region.

use std::f64::consts::PI;

use skymask_core::Conditions;
use skymask_footprint::{RegionLabelMap, SurveyRegion};

/// Snapshot with one pixel per entry of `hours`, each at that hour angle.
pub fn conditions_with_hour_angles(hours: &[f64]) -> Conditions {
    let ha = hours.iter().map(|h| h * PI / 12.0).collect::<Vec<_>>();
    Conditions::new(ha.len())
        .with_hour_angle(ha)
        .expect("hour angle length matches by construction")
}

/// Single-pixel snapshot at `hours` of hour angle.
pub fn single_pixel_conditions(hours: f64) -> Conditions {
    conditions_with_hour_angles(&[hours])
}

/// Label map over `npix` pixels with `pixels` labeled `region` and the
/// rest unlabeled.
pub fn labels_with(npix: usize, region: SurveyRegion, pixels: &[usize]) -> RegionLabelMap {
    let mut labels = RegionLabelMap::new(npix);
    for &pix in pixels {
        assert!(labels.assign(pix, region), "pixel {pix} out of range or relabeled");
    }
    labels
}
