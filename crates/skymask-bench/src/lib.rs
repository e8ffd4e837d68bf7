//! Benchmark profiles for the skymask engine.
//!
//! - [`reference_footprint`]: the default footprint at `nside = 32` (12 288 pixels)
//! - [`reference_basis_set`]: every mask and gate, wired to one footprint
//! - [`reference_registry`]: a feature registry satisfying that basis set
//! - [`seeded_visits`]: a deterministic visit history

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use skymask_basis::{plan_features, BasisFunction};
use skymask_basis_fns::{
    HourAngleMask, MoonAltGate, NightCountMask, NightRangeGate, StaticRegionMask, TotalCountMask,
};
use skymask_core::{Band, ConfigError, FeatureError, BANDS};
use skymask_features::{FeatureRegistry, ObservationRecord};
use skymask_footprint::{FootprintBuilder, FootprintConfig, FootprintMaps, SurveyRegion};

/// Build the default footprint at `nside`.
pub fn reference_footprint(nside: u32) -> Result<FootprintMaps, ConfigError> {
    FootprintBuilder::new(FootprintConfig::with_nside(nside)?)?.build()
}

/// One of each basis function over the grid of `maps`.
///
/// Hour-angle window 4h to 20h, at most two visits per night, three
/// lifetime r-band visits, default gates.
pub fn reference_basis_set(maps: &FootprintMaps) -> Result<Vec<Box<dyn BasisFunction>>, ConfigError> {
    let grid = maps.grid();
    Ok(vec![
        Box::new(StaticRegionMask::from_footprint(maps, SurveyRegion::LowDust)),
        Box::new(HourAngleMask::new(grid, Some(4.0), Some(20.0))?),
        Box::new(NightCountMask::new(grid, 2, None)),
        Box::new(TotalCountMask::new(grid, 3, Some(Band::R))),
        Box::new(NightRangeGate::default()),
        Box::new(MoonAltGate::default()),
    ])
}

/// A registry holding every counter `basis_fns` needs.
pub fn reference_registry(npix: usize, basis_fns: &[Box<dyn BasisFunction>]) -> FeatureRegistry {
    let refs: Vec<&dyn BasisFunction> = basis_fns.iter().map(|b| &**b).collect();
    FeatureRegistry::with_kinds(npix, plan_features(&refs).kinds())
}

/// `count` visits spread over `nights` nights, each touching `pixels_per_visit`
/// pixels. Pixel and band choices come from a fixed LCG so runs are repeatable.
pub fn seeded_visits(
    npix: usize,
    nights: u32,
    count: usize,
    pixels_per_visit: usize,
    seed: u64,
) -> Vec<ObservationRecord> {
    let mut state = seed;
    let mut next = move || {
        state = state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        state >> 33
    };
    (0..count)
        .map(|i| {
            let night = (i as u64 * u64::from(nights.max(1)) / count.max(1) as u64) as u32;
            let band = BANDS[(next() % BANDS.len() as u64) as usize];
            let pixels = (0..pixels_per_visit)
                .map(|_| (next() % npix as u64) as usize)
                .collect();
            ObservationRecord::new(night, band, pixels)
        })
        .collect()
}

/// Replay `visits` into `registry`, calling `start_night` on each night change.
pub fn replay_visits(
    registry: &mut FeatureRegistry,
    visits: &[ObservationRecord],
) -> Result<(), FeatureError> {
    let mut night = None;
    for visit in visits {
        if night != Some(visit.night) {
            registry.start_night(visit.night);
            night = Some(visit.night);
        }
        registry.add_observation(visit)?;
    }
    Ok(())
}
