//! Footprint configuration: per-region band ratios and region geometry.
//!
//! [`FootprintConfig::default()`] reproduces the reference survey
//! footprint. A TOML document only needs to name what it overrides:
//!
//! ```toml
//! nside = 64
//!
//! [ratios.nes]
//! u = 0.0
//! g = 0.24
//! r = 0.33
//! i = 0.33
//! z = 0.23
//! y = 0.0
//!
//! [geometry]
//! ebv_limit = 0.2
//! ```
//!
//! Region tables are replaced wholesale, so every table must list all
//! six bands.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use skymask_core::{Band, ConfigError, BANDS, N_BANDS};
use skymask_sphere::{Cap, HealpixGrid};

use crate::region::SurveyRegion;

// ── BandRatios ─────────────────────────────────────────────────────

/// Desired exposure-time ratio for each band.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BandRatios {
    /// u band.
    pub u: f64,
    /// g band.
    pub g: f64,
    /// r band.
    pub r: f64,
    /// i band.
    pub i: f64,
    /// z band.
    pub z: f64,
    /// y band.
    pub y: f64,
}

impl BandRatios {
    /// Same ratio in every band.
    pub const fn uniform(value: f64) -> Self {
        Self {
            u: value,
            g: value,
            r: value,
            i: value,
            z: value,
            y: value,
        }
    }

    /// Build a table from `(band name, ratio)` pairs.
    ///
    /// Every band must appear. Unknown names fail with
    /// [`ConfigError::UnknownBand`], absent bands with
    /// [`ConfigError::MissingBand`]. A repeated band keeps the last value.
    pub fn from_pairs<'a, I>(region: &str, pairs: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (&'a str, f64)>,
    {
        let mut values = [None; N_BANDS];
        for (name, value) in pairs {
            let band: Band = name.parse()?;
            values[band.index()] = Some(value);
        }
        let mut ratios = Self::uniform(0.0);
        for band in BANDS {
            let value = values[band.index()].ok_or_else(|| ConfigError::MissingBand {
                region: region.to_string(),
                band: band.to_string(),
            })?;
            *ratios.get_mut(band) = value;
        }
        Ok(ratios)
    }

    /// Ratio for `band`.
    pub fn get(&self, band: Band) -> f64 {
        match band {
            Band::U => self.u,
            Band::G => self.g,
            Band::R => self.r,
            Band::I => self.i,
            Band::Z => self.z,
            Band::Y => self.y,
        }
    }

    /// Mutable ratio for `band`.
    pub fn get_mut(&mut self, band: Band) -> &mut f64 {
        match band {
            Band::U => &mut self.u,
            Band::G => &mut self.g,
            Band::R => &mut self.r,
            Band::I => &mut self.i,
            Band::Z => &mut self.z,
            Band::Y => &mut self.y,
        }
    }

    /// Ratios in canonical band order.
    pub fn to_array(&self) -> [f64; N_BANDS] {
        BANDS.map(|band| self.get(band))
    }

    /// Check every ratio is finite and non-negative.
    pub fn validate(&self, region: &str) -> Result<(), ConfigError> {
        for band in BANDS {
            let value = self.get(band);
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidRatio {
                    region: region.to_string(),
                    band: band.to_string(),
                    value,
                });
            }
        }
        Ok(())
    }
}

// ── RegionRatios ───────────────────────────────────────────────────

/// One [`BandRatios`] table per survey region.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegionRatios {
    /// Magellanic Clouds.
    pub magellanic_clouds: BandRatios,
    /// Low-extinction wide-fast-deep sky.
    pub lowdust: BandRatios,
    /// Virgo cluster.
    pub virgo: BandRatios,
    /// Galactic bulge.
    pub bulge: BandRatios,
    /// North ecliptic spur. The reference survey does not visit it in u or y.
    pub nes: BandRatios,
    /// Dusty Galactic plane.
    pub dusty_plane: BandRatios,
    /// Euclid overlap fields.
    pub euclid_overlap: BandRatios,
    /// South celestial pole.
    pub scp: BandRatios,
}

impl Default for RegionRatios {
    fn default() -> Self {
        let wfd = BandRatios {
            u: 0.35,
            g: 0.4,
            r: 1.0,
            i: 1.0,
            z: 0.9,
            y: 0.9,
        };
        Self {
            magellanic_clouds: BandRatios {
                u: 0.65,
                g: 0.65,
                r: 1.1,
                i: 1.1,
                z: 0.34,
                y: 0.35,
            },
            lowdust: wfd,
            virgo: wfd,
            bulge: BandRatios {
                u: 0.17,
                g: 0.93,
                r: 0.98,
                i: 0.98,
                z: 0.93,
                y: 0.21,
            },
            nes: BandRatios {
                u: 0.0,
                g: 0.255 * 0.938,
                r: 0.33,
                i: 0.33,
                z: 0.23,
                y: 0.0,
            },
            dusty_plane: BandRatios {
                u: 0.093,
                g: 0.26,
                r: 0.26,
                i: 0.26,
                z: 0.26,
                y: 0.093,
            },
            euclid_overlap: wfd,
            scp: BandRatios {
                u: 0.1,
                g: 0.175,
                r: 0.1,
                i: 0.135,
                z: 0.046,
                y: 0.047,
            },
        }
    }
}

impl RegionRatios {
    /// Table for `region`.
    pub fn get(&self, region: SurveyRegion) -> &BandRatios {
        match region {
            SurveyRegion::MagellanicClouds => &self.magellanic_clouds,
            SurveyRegion::LowDust => &self.lowdust,
            SurveyRegion::Virgo => &self.virgo,
            SurveyRegion::Bulge => &self.bulge,
            SurveyRegion::Nes => &self.nes,
            SurveyRegion::DustyPlane => &self.dusty_plane,
            SurveyRegion::EuclidOverlap => &self.euclid_overlap,
            SurveyRegion::Scp => &self.scp,
        }
    }

    /// Mutable table for `region`.
    pub fn get_mut(&mut self, region: SurveyRegion) -> &mut BandRatios {
        match region {
            SurveyRegion::MagellanicClouds => &mut self.magellanic_clouds,
            SurveyRegion::LowDust => &mut self.lowdust,
            SurveyRegion::Virgo => &mut self.virgo,
            SurveyRegion::Bulge => &mut self.bulge,
            SurveyRegion::Nes => &mut self.nes,
            SurveyRegion::DustyPlane => &mut self.dusty_plane,
            SurveyRegion::EuclidOverlap => &mut self.euclid_overlap,
            SurveyRegion::Scp => &mut self.scp,
        }
    }
}

// ── FootprintGeometry ──────────────────────────────────────────────

/// Selection-rule constants for the survey regions. Angles in degrees.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FootprintGeometry {
    /// Large Magellanic Cloud.
    pub lmc: Cap,
    /// Small Magellanic Cloud.
    pub smc: Cap,
    /// Reddening threshold separating low-dust from dusty sky.
    pub ebv_limit: f64,
    /// Exclusive lower declination bound of the low-dust region.
    pub lowdust_dec_min: f64,
    /// Exclusive upper declination bound of the low-dust region.
    pub lowdust_dec_max: f64,
    /// Virgo cluster.
    pub virgo: Cap,
    /// Half extent of the bulge in Galactic longitude around l = 0.
    pub bulge_half_length: f64,
    /// Galactic latitude half-width of the bulge at l = 0.
    pub bulge_width_center: f64,
    /// Galactic latitude half-width at the longitude ends.
    pub bulge_width_edge: f64,
    /// Exclusive upper declination bound of the bulge.
    pub bulge_dec_max: f64,
    /// Exclusive ecliptic latitude half-width of the spur.
    pub nes_ecl_lat_max: f64,
    /// Exclusive lower declination bound of the spur.
    pub nes_dec_min: f64,
    /// Minimum |l| keeping the spur clear of the Galactic centre.
    pub nes_gal_l_min: f64,
    /// Exclusive lower declination bound of the dusty plane.
    pub dusty_dec_min: f64,
    /// Exclusive upper declination bound of the dusty plane.
    pub dusty_dec_max: f64,
    /// Euclid overlap box, inclusive bounds.
    pub euclid_ra_min: f64,
    /// See [`FootprintGeometry::euclid_ra_min`].
    pub euclid_ra_max: f64,
    /// See [`FootprintGeometry::euclid_ra_min`].
    pub euclid_dec_min: f64,
    /// See [`FootprintGeometry::euclid_ra_min`].
    pub euclid_dec_max: f64,
    /// Exclusive upper declination bound of the south-pole cap.
    pub scp_dec_max: f64,
}

impl Default for FootprintGeometry {
    fn default() -> Self {
        Self {
            lmc: Cap::new(80.893_860, -69.756_126, 6.0),
            smc: Cap::new(13.186_588, -72.828_599, 4.0),
            ebv_limit: 0.199,
            lowdust_dec_min: -70.0,
            lowdust_dec_max: 15.0,
            virgo: Cap::new(186.75, 12.717, 8.75),
            bulge_half_length: 25.0,
            bulge_width_center: 12.0,
            bulge_width_edge: 4.0,
            bulge_dec_max: 12.0,
            nes_ecl_lat_max: 10.0,
            nes_dec_min: 0.0,
            nes_gal_l_min: 45.0,
            dusty_dec_min: -90.0,
            dusty_dec_max: 15.0,
            euclid_ra_min: 52.0,
            euclid_ra_max: 72.0,
            euclid_dec_min: -50.0,
            euclid_dec_max: -28.0,
            scp_dec_max: -60.0,
        }
    }
}

impl FootprintGeometry {
    /// Check every constant is finite and every range is ordered.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let scalars: [(&'static str, f64); 23] = [
            ("lmc.center.ra", self.lmc.center.ra),
            ("lmc.center.dec", self.lmc.center.dec),
            ("smc.center.ra", self.smc.center.ra),
            ("smc.center.dec", self.smc.center.dec),
            ("virgo.center.ra", self.virgo.center.ra),
            ("virgo.center.dec", self.virgo.center.dec),
            ("lmc.radius", self.lmc.radius),
            ("smc.radius", self.smc.radius),
            ("virgo.radius", self.virgo.radius),
            ("ebv_limit", self.ebv_limit),
            ("lowdust_dec_min", self.lowdust_dec_min),
            ("lowdust_dec_max", self.lowdust_dec_max),
            ("bulge_half_length", self.bulge_half_length),
            ("bulge_width_center", self.bulge_width_center),
            ("bulge_width_edge", self.bulge_width_edge),
            ("bulge_dec_max", self.bulge_dec_max),
            ("nes_ecl_lat_max", self.nes_ecl_lat_max),
            ("nes_dec_min", self.nes_dec_min),
            ("nes_gal_l_min", self.nes_gal_l_min),
            ("dusty_dec_min", self.dusty_dec_min),
            ("dusty_dec_max", self.dusty_dec_max),
            ("euclid_ra_min", self.euclid_ra_min),
            ("scp_dec_max", self.scp_dec_max),
        ];
        for (name, value) in scalars {
            if !value.is_finite() {
                return Err(invalid(name, format!("must be finite, got {value}")));
            }
        }
        for (name, value) in [
            ("lmc.radius", self.lmc.radius),
            ("smc.radius", self.smc.radius),
            ("virgo.radius", self.virgo.radius),
            ("bulge_width_edge", self.bulge_width_edge),
        ] {
            if value < 0.0 {
                return Err(invalid(name, format!("must be non-negative, got {value}")));
            }
        }
        if self.bulge_half_length <= 0.0 {
            return Err(invalid("bulge_half_length", "must be positive".into()));
        }
        if self.bulge_width_center < self.bulge_width_edge {
            return Err(invalid(
                "bulge_width_center",
                format!(
                    "{} is narrower than bulge_width_edge {}",
                    self.bulge_width_center, self.bulge_width_edge
                ),
            ));
        }
        ordered("lowdust_dec_min", self.lowdust_dec_min, self.lowdust_dec_max)?;
        ordered("dusty_dec_min", self.dusty_dec_min, self.dusty_dec_max)?;
        ordered("euclid_ra_min", self.euclid_ra_min, self.euclid_ra_max)?;
        ordered("euclid_dec_min", self.euclid_dec_min, self.euclid_dec_max)?;
        Ok(())
    }
}

fn invalid(name: &'static str, reason: String) -> ConfigError {
    ConfigError::InvalidParameter { name, reason }
}

/// `min <= max`, both finite.
fn ordered(name: &'static str, min: f64, max: f64) -> Result<(), ConfigError> {
    if min.is_finite() && max.is_finite() && min <= max {
        Ok(())
    } else {
        Err(invalid(name, format!("range [{min}, {max}] is empty or not finite")))
    }
}

// ── FootprintConfig ────────────────────────────────────────────────

/// Complete input of the footprint builder.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawFootprintConfig")]
pub struct FootprintConfig {
    /// Grid resolution. Serialized as `nside`.
    pub nside: HealpixGrid,
    /// Band ratio table of every region.
    pub ratios: RegionRatios,
    /// Region selection constants.
    pub geometry: FootprintGeometry,
}

/// Document shape accepted by the loader. Region tables are read as
/// plain maps so band errors can name their region.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawFootprintConfig {
    #[serde(default)]
    nside: HealpixGrid,
    #[serde(default)]
    ratios: BTreeMap<String, BTreeMap<String, f64>>,
    #[serde(default)]
    geometry: FootprintGeometry,
}

impl TryFrom<RawFootprintConfig> for FootprintConfig {
    type Error = ConfigError;

    fn try_from(raw: RawFootprintConfig) -> Result<Self, Self::Error> {
        let mut ratios = RegionRatios::default();
        for (name, table) in &raw.ratios {
            let region: SurveyRegion = name.parse()?;
            *ratios.get_mut(region) =
                BandRatios::from_pairs(name, table.iter().map(|(b, v)| (b.as_str(), *v)))?;
        }
        let config = Self {
            nside: raw.nside,
            ratios,
            geometry: raw.geometry,
        };
        config.validate()?;
        Ok(config)
    }
}

impl FootprintConfig {
    /// Default footprint at resolution `nside`.
    pub fn with_nside(nside: u32) -> Result<Self, ConfigError> {
        Ok(Self {
            nside: HealpixGrid::new(nside)?,
            ..Self::default()
        })
    }

    /// Parse and validate a TOML document. Omitted sections keep their
    /// defaults.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let raw: RawFootprintConfig =
            toml::from_str(s).map_err(|e| ConfigError::Parse { reason: e.to_string() })?;
        Self::try_from(raw)
    }

    /// Check every ratio table and the region geometry.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for region in SurveyRegion::PRIORITY {
            self.ratios.get(region).validate(region.label())?;
        }
        self.geometry.validate()
    }
}
