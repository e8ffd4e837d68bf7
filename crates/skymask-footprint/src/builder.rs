//! The layered footprint builder.

use skymask_core::ConfigError;
use skymask_sphere::SkyPixels;
use tracing::{debug, info};

use crate::config::FootprintConfig;
use crate::dust::ExtinctionMap;
use crate::maps::{BandRatioMap, FootprintMaps, RegionLabelMap};
use crate::region::SurveyRegion;

/// Builds [`FootprintMaps`] from a validated [`FootprintConfig`].
///
/// Regions are applied in [`SurveyRegion::PRIORITY`] order. Each region
/// claims only the pixels its rule selects that no earlier region has
/// claimed, and writes its band ratios to exactly those pixels.
///
/// # Examples
///
/// ```
/// use skymask_footprint::{FootprintBuilder, FootprintConfig, SurveyRegion};
///
/// let config = FootprintConfig::with_nside(8).unwrap();
/// let maps = FootprintBuilder::new(config).unwrap().build().unwrap();
///
/// assert_eq!(maps.labels().len(), 768);
/// assert!(maps.labels().count(SurveyRegion::LowDust) > 0);
/// ```
#[derive(Clone, Debug)]
pub struct FootprintBuilder {
    config: FootprintConfig,
    extinction: ExtinctionMap,
}

impl FootprintBuilder {
    /// Validate `config` and use the default extinction model.
    pub fn new(config: FootprintConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            extinction: ExtinctionMap::default(),
        })
    }

    /// Replace the extinction source. Its values were validated when the
    /// map was constructed; only its length is checked at build time.
    pub fn with_extinction(mut self, extinction: ExtinctionMap) -> Self {
        self.extinction = extinction;
        self
    }

    /// The configuration being built.
    pub fn config(&self) -> &FootprintConfig {
        &self.config
    }

    /// Run the layered assignment.
    ///
    /// Fails only if a caller-supplied extinction map does not match the
    /// configured resolution.
    pub fn build(&self) -> Result<FootprintMaps, ConfigError> {
        let grid = self.config.nside;
        let sky = SkyPixels::new(&grid);
        self.build_on(&sky)
    }

    /// Run the layered assignment on precomputed pixel coordinates.
    ///
    /// `sky` must belong to the configured grid.
    pub fn build_on(&self, sky: &SkyPixels) -> Result<FootprintMaps, ConfigError> {
        let grid = *sky.grid();
        if grid != self.config.nside {
            return Err(ConfigError::LengthMismatch {
                what: "sky pixels",
                expected: self.config.nside.npix(),
                actual: grid.npix(),
            });
        }
        let ebv = self.extinction.values(sky)?;
        let geometry = &self.config.geometry;

        let mut labels = RegionLabelMap::new(grid.npix());
        let mut ratios = BandRatioMap::new(grid.npix());

        for region in SurveyRegion::PRIORITY {
            let table = self.config.ratios.get(region);
            let selected = region.select(sky, &ebv, geometry);
            let mut assigned = 0usize;
            for &pix in &selected {
                if labels.assign(pix, region) {
                    ratios.set(pix, table);
                    assigned += 1;
                }
            }
            debug!(
                region = %region,
                selected = selected.len(),
                assigned,
                "region layered"
            );
        }

        let maps = FootprintMaps::from_parts(grid, ratios, labels)?;
        info!(
            nside = grid.nside(),
            npix = grid.npix(),
            wfd = maps.wfd_pixels().len(),
            unlabeled = maps.labels().unlabeled(),
            "footprint built"
        );
        Ok(maps)
    }
}
