//! Builder outputs: the region label map, the band ratio map, and
//! footprint products derived from them.

use indexmap::IndexMap;
use skymask_core::{Band, ConfigError, N_BANDS};
use skymask_sphere::HealpixGrid;

use crate::config::BandRatios;
use crate::region::SurveyRegion;

// ── RegionLabelMap ─────────────────────────────────────────────────

/// One optional region label per pixel.
///
/// A label, once written, is never changed: [`RegionLabelMap::assign`]
/// refuses to relabel a pixel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegionLabelMap {
    labels: Vec<Option<SurveyRegion>>,
}

impl RegionLabelMap {
    /// All pixels unlabeled.
    pub fn new(npix: usize) -> Self {
        Self {
            labels: vec![None; npix],
        }
    }

    /// Adopt an existing labeling.
    pub fn from_labels(labels: Vec<Option<SurveyRegion>>) -> Self {
        Self { labels }
    }

    /// Label `pix` with `region` if it is still unlabeled.
    ///
    /// Returns `true` if the label was written. Out-of-range pixels are
    /// never written.
    pub fn assign(&mut self, pix: usize, region: SurveyRegion) -> bool {
        match self.labels.get_mut(pix) {
            Some(slot) if slot.is_none() => {
                *slot = Some(region);
                true
            }
            _ => false,
        }
    }

    /// Number of pixels.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Whether the map covers no pixels.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Region of `pix`, if labeled.
    pub fn get(&self, pix: usize) -> Option<SurveyRegion> {
        self.labels.get(pix).copied().flatten()
    }

    /// Label string of `pix`; empty for unlabeled or out-of-range pixels.
    pub fn label(&self, pix: usize) -> &'static str {
        self.get(pix).map_or("", SurveyRegion::label)
    }

    /// All labels, indexed by pixel.
    pub fn as_slice(&self) -> &[Option<SurveyRegion>] {
        &self.labels
    }

    /// Pixels labeled `region`, ascending.
    pub fn pixels_in(&self, region: SurveyRegion) -> Vec<usize> {
        self.labels
            .iter()
            .enumerate()
            .filter_map(|(pix, label)| (*label == Some(region)).then_some(pix))
            .collect()
    }

    /// Number of pixels labeled `region`.
    pub fn count(&self, region: SurveyRegion) -> usize {
        self.labels.iter().filter(|l| **l == Some(region)).count()
    }

    /// Number of pixels without a label.
    pub fn unlabeled(&self) -> usize {
        self.labels.iter().filter(|l| l.is_none()).count()
    }
}

// ── BandRatioMap ───────────────────────────────────────────────────

/// Desired exposure-time ratio per band per pixel.
#[derive(Clone, Debug, PartialEq)]
pub struct BandRatioMap {
    npix: usize,
    values: [Vec<f64>; N_BANDS],
}

impl BandRatioMap {
    /// Zero in every band for every pixel.
    pub fn new(npix: usize) -> Self {
        Self {
            npix,
            values: std::array::from_fn(|_| vec![0.0; npix]),
        }
    }

    /// Number of pixels.
    pub fn npix(&self) -> usize {
        self.npix
    }

    /// Per-pixel ratios of `band`.
    pub fn band(&self, band: Band) -> &[f64] {
        &self.values[band.index()]
    }

    /// Ratio of `band` at `pix`, or `None` if `pix` is out of range.
    pub fn get(&self, band: Band, pix: usize) -> Option<f64> {
        self.values[band.index()].get(pix).copied()
    }

    /// Copy a region's six ratios into `pix`.
    pub(crate) fn set(&mut self, pix: usize, ratios: &BandRatios) {
        for (column, value) in self.values.iter_mut().zip(ratios.to_array()) {
            column[pix] = value;
        }
    }
}

// ── FootprintMaps ──────────────────────────────────────────────────

/// Result of a footprint build.
#[derive(Clone, Debug, PartialEq)]
pub struct FootprintMaps {
    grid: HealpixGrid,
    ratios: BandRatioMap,
    labels: RegionLabelMap,
}

impl FootprintMaps {
    /// Assemble maps built elsewhere. Both must match the grid.
    pub fn from_parts(
        grid: HealpixGrid,
        ratios: BandRatioMap,
        labels: RegionLabelMap,
    ) -> Result<Self, ConfigError> {
        for (what, actual) in [("band ratio map", ratios.npix()), ("label map", labels.len())] {
            if actual != grid.npix() {
                return Err(ConfigError::LengthMismatch {
                    what,
                    expected: grid.npix(),
                    actual,
                });
            }
        }
        Ok(Self {
            grid,
            ratios,
            labels,
        })
    }

    /// Grid the maps cover.
    pub fn grid(&self) -> &HealpixGrid {
        &self.grid
    }

    /// Band ratio map.
    pub fn ratios(&self) -> &BandRatioMap {
        &self.ratios
    }

    /// Region label map.
    pub fn labels(&self) -> &RegionLabelMap {
        &self.labels
    }

    /// Split into `(band_ratio_map, label_map)`.
    pub fn into_parts(self) -> (BandRatioMap, RegionLabelMap) {
        (self.ratios, self.labels)
    }

    /// Pixels of the wide-fast-deep footprint.
    pub fn wfd_pixels(&self) -> Vec<usize> {
        self.labels
            .as_slice()
            .iter()
            .enumerate()
            .filter_map(|(pix, label)| label.is_some_and(SurveyRegion::is_wfd).then_some(pix))
            .collect()
    }

    /// 1 on wide-fast-deep pixels, 0 elsewhere.
    pub fn wfd_footprint(&self) -> Vec<f64> {
        self.labels
            .as_slice()
            .iter()
            .map(|label| if label.is_some_and(SurveyRegion::is_wfd) { 1.0 } else { 0.0 })
            .collect()
    }

    /// 1 where `band` has a positive ratio, 0 elsewhere.
    pub fn footprint_mask(&self, band: Band) -> Vec<f64> {
        self.ratios
            .band(band)
            .iter()
            .map(|&r| if r > 0.0 { 1.0 } else { 0.0 })
            .collect()
    }

    /// Target-of-opportunity footprint: 1 where the r ratio is positive,
    /// NaN elsewhere.
    pub fn too_footprint(&self) -> Vec<f64> {
        self.ratios
            .band(Band::R)
            .iter()
            .map(|&r| if r > 0.0 { 1.0 } else { f64::NAN })
            .collect()
    }

    /// Pixel count of every region, in priority order.
    pub fn region_counts(&self) -> IndexMap<SurveyRegion, usize> {
        let mut counts: IndexMap<SurveyRegion, usize> =
            SurveyRegion::PRIORITY.iter().map(|&r| (r, 0)).collect();
        for region in self.labels.as_slice().iter().flatten() {
            if let Some(n) = counts.get_mut(region) {
                *n += 1;
            }
        }
        counts
    }
}
