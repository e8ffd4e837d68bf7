//! The [`SurveyFeature`] trait and the two counter implementations.

use skymask_core::{Band, FeatureKind};
use tracing::trace;

use crate::record::ObservationRecord;

/// A per-pixel counter updated by completed observations.
///
/// # Contract
///
/// - `add_observation()` is only called with records whose pixels are all
///   inside the grid; the registry checks this first.
/// - `counts()` has exactly one entry per pixel for the counter's lifetime.
///
/// # Object safety
///
/// This trait is object-safe; the registry stores counters as
/// `Box<dyn SurveyFeature>`.
pub trait SurveyFeature: Send + 'static {
    /// Which counter this is.
    fn kind(&self) -> FeatureKind;

    /// Current counts, indexed by pixel.
    fn counts(&self) -> &[u32];

    /// Fold one observation into the counts. A pixel listed more than
    /// once in `obs.pixels` is counted once.
    fn add_observation(&mut self, obs: &ObservationRecord);

    /// Notify the counter that `night` has begun.
    ///
    /// Default: no-op.
    fn start_night(&mut self, _night: u32) {}
}

/// Create the counter for `kind` over `npix` pixels.
pub fn instantiate(kind: FeatureKind, npix: usize) -> Box<dyn SurveyFeature> {
    match kind {
        FeatureKind::NightCount { band } => Box::new(NightObsCounter::new(npix, band)),
        FeatureKind::TotalCount { band } => Box::new(ObsCounter::new(npix, band)),
    }
}

fn band_matches(filter: Option<Band>, band: Band) -> bool {
    filter.is_none_or(|f| f == band)
}

/// Add one to each distinct pixel in `pixels`; repeats within a visit
/// count once.
fn increment(counts: &mut [u32], pixels: &[usize]) {
    let mut distinct = pixels.to_vec();
    distinct.sort_unstable();
    distinct.dedup();
    for pix in distinct {
        if let Some(c) = counts.get_mut(pix) {
            *c = c.saturating_add(1);
        }
    }
}

// ── NightObsCounter ────────────────────────────────────────────────

/// Observations of each pixel during the current night.
///
/// The counts reset to zero when a record from a different night
/// arrives, before that record is counted.
#[derive(Clone, Debug)]
pub struct NightObsCounter {
    band: Option<Band>,
    night: Option<u32>,
    counts: Vec<u32>,
}

impl NightObsCounter {
    /// Zero counts over `npix` pixels, counting only `band` if given.
    pub fn new(npix: usize, band: Option<Band>) -> Self {
        Self {
            band,
            night: None,
            counts: vec![0; npix],
        }
    }

    /// Night the current counts belong to, if any record has arrived.
    pub fn night(&self) -> Option<u32> {
        self.night
    }

    fn roll_to(&mut self, night: u32) {
        if self.night != Some(night) {
            if self.night.is_some() {
                trace!(
                    feature = %self.kind(),
                    from = ?self.night,
                    to = night,
                    "nightly counts reset"
                );
            }
            self.counts.fill(0);
            self.night = Some(night);
        }
    }
}

impl SurveyFeature for NightObsCounter {
    fn kind(&self) -> FeatureKind {
        FeatureKind::NightCount { band: self.band }
    }

    fn counts(&self) -> &[u32] {
        &self.counts
    }

    fn add_observation(&mut self, obs: &ObservationRecord) {
        self.roll_to(obs.night);
        if band_matches(self.band, obs.band) {
            increment(&mut self.counts, &obs.pixels);
        }
    }

    fn start_night(&mut self, night: u32) {
        self.roll_to(night);
    }
}

// ── ObsCounter ─────────────────────────────────────────────────────

/// Observations of each pixel since the survey started.
#[derive(Clone, Debug)]
pub struct ObsCounter {
    band: Option<Band>,
    counts: Vec<u32>,
}

impl ObsCounter {
    /// Zero counts over `npix` pixels, counting only `band` if given.
    pub fn new(npix: usize, band: Option<Band>) -> Self {
        Self {
            band,
            counts: vec![0; npix],
        }
    }
}

impl SurveyFeature for ObsCounter {
    fn kind(&self) -> FeatureKind {
        FeatureKind::TotalCount { band: self.band }
    }

    fn counts(&self) -> &[u32] {
        &self.counts
    }

    fn add_observation(&mut self, obs: &ObservationRecord) {
        if band_matches(self.band, obs.band) {
            increment(&mut self.counts, &obs.pixels);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn night_counter_resets_on_new_night() {
        let mut c = NightObsCounter::new(4, None);
        c.add_observation(&ObservationRecord::new(1, Band::G, vec![0, 1]));
        c.add_observation(&ObservationRecord::new(1, Band::R, vec![1]));
        assert_eq!(c.counts(), &[1, 2, 0, 0]);

        c.add_observation(&ObservationRecord::new(2, Band::R, vec![3]));
        assert_eq!(c.counts(), &[0, 0, 0, 1]);
        assert_eq!(c.night(), Some(2));
    }

    #[test]
    fn filtered_night_counter_still_resets() {
        let mut c = NightObsCounter::new(2, Some(Band::G));
        c.add_observation(&ObservationRecord::new(1, Band::G, vec![0]));
        // An r visit on a new night resets g counts without adding to them.
        c.add_observation(&ObservationRecord::new(2, Band::R, vec![0]));
        assert_eq!(c.counts(), &[0, 0]);
    }

    #[test]
    fn start_night_clears_stale_counts() {
        let mut c = NightObsCounter::new(2, None);
        c.add_observation(&ObservationRecord::new(5, Band::I, vec![0, 1]));
        c.start_night(5);
        assert_eq!(c.counts(), &[1, 1]);
        c.start_night(6);
        assert_eq!(c.counts(), &[0, 0]);
    }

    #[test]
    fn total_counter_accumulates_across_nights() {
        let mut c = ObsCounter::new(3, Some(Band::Z));
        for night in 0..4 {
            c.add_observation(&ObservationRecord::new(night, Band::Z, vec![2]));
            c.add_observation(&ObservationRecord::new(night, Band::Y, vec![1]));
        }
        assert_eq!(c.counts(), &[0, 0, 4]);
    }

    #[test]
    fn repeated_pixels_count_once_per_visit() {
        let mut night = NightObsCounter::new(3, None);
        let mut total = ObsCounter::new(3, None);
        let visit = ObservationRecord::new(1, Band::G, vec![1, 2, 1, 1]);
        night.add_observation(&visit);
        total.add_observation(&visit);
        assert_eq!(night.counts(), &[0, 1, 1]);
        assert_eq!(total.counts(), &[0, 1, 1]);

        total.add_observation(&visit);
        assert_eq!(total.counts(), &[0, 2, 2]);
    }

    #[test]
    fn instantiate_preserves_kind() {
        for kind in [
            FeatureKind::NightCount { band: None },
            FeatureKind::NightCount { band: Some(Band::U) },
            FeatureKind::TotalCount { band: Some(Band::Y) },
        ] {
            let feature = instantiate(kind, 12);
            assert_eq!(feature.kind(), kind);
            assert_eq!(feature.counts().len(), 12);
        }
    }
}
