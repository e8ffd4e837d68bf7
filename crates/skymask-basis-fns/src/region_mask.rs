//! Static mask selecting one survey region.
//!
//! # Construction
//!
//! ```
//! use skymask_basis_fns::StaticRegionMask;
//! use skymask_footprint::{RegionLabelMap, SurveyRegion};
//!
//! let mut labels = RegionLabelMap::new(12);
//! labels.assign(5, SurveyRegion::Nes);
//! let mask = StaticRegionMask::new(&labels, SurveyRegion::Nes);
//! assert_eq!(mask.template()[5], 0.0);
//! assert!(mask.template()[4].is_nan());
//! ```

use skymask_basis::{BasisFunction, BasisValue, EvalContext};
use skymask_core::{EvalError, EXCLUDED};
use skymask_footprint::{FootprintMaps, RegionLabelMap, SurveyRegion};

/// Zero on the pixels of one region, NaN everywhere else.
///
/// The map is computed once from the label map; every evaluation returns
/// a fresh copy of it, independent of the conditions.
#[derive(Clone, Debug)]
pub struct StaticRegionMask {
    region: SurveyRegion,
    template: Vec<f64>,
}

impl StaticRegionMask {
    /// Mask of the pixels `labels` assigns to `region`.
    pub fn new(labels: &RegionLabelMap, region: SurveyRegion) -> Self {
        let template = labels
            .as_slice()
            .iter()
            .map(|&label| if label == Some(region) { 0.0 } else { EXCLUDED })
            .collect();
        Self { region, template }
    }

    /// Mask of `region` in a built footprint.
    pub fn from_footprint(maps: &FootprintMaps, region: SurveyRegion) -> Self {
        Self::new(maps.labels(), region)
    }

    /// The selected region.
    pub fn region(&self) -> SurveyRegion {
        self.region
    }

    /// The precomputed mask.
    pub fn template(&self) -> &[f64] {
        &self.template
    }
}

impl BasisFunction for StaticRegionMask {
    fn name(&self) -> &str {
        "StaticRegionMask"
    }

    fn calc_value(&self, _ctx: &EvalContext<'_>) -> Result<BasisValue, EvalError> {
        Ok(BasisValue::Map(self.template.clone()))
    }
}
