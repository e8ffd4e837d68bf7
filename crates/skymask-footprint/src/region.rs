//! Survey regions and their pixel-selection rules.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use skymask_core::ConfigError;
use skymask_sphere::{wrap_longitude, Equatorial, SkyPixels};

use crate::config::FootprintGeometry;

/// A labeled region of the survey footprint.
///
/// Regions are mutually exclusive in a finished footprint: each pixel
/// carries the label of the first region in [`SurveyRegion::PRIORITY`]
/// whose rule selects it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SurveyRegion {
    /// Large and Small Magellanic Clouds.
    MagellanicClouds,
    /// Low-extinction extragalactic sky.
    #[serde(rename = "lowdust")]
    LowDust,
    /// The Virgo cluster.
    Virgo,
    /// Galactic bulge.
    Bulge,
    /// North ecliptic spur.
    Nes,
    /// High-extinction Galactic plane.
    DustyPlane,
    /// Overlap with the Euclid deep fields.
    EuclidOverlap,
    /// South celestial pole.
    Scp,
}

impl SurveyRegion {
    /// Assignment order of the layered builder, highest priority first.
    pub const PRIORITY: [SurveyRegion; 8] = [
        Self::MagellanicClouds,
        Self::LowDust,
        Self::Virgo,
        Self::Bulge,
        Self::Nes,
        Self::DustyPlane,
        Self::EuclidOverlap,
        Self::Scp,
    ];

    /// Regions that make up the wide-fast-deep footprint.
    pub const WFD: [SurveyRegion; 2] = [Self::LowDust, Self::Virgo];

    /// Label string stored in region maps.
    pub fn label(self) -> &'static str {
        match self {
            Self::MagellanicClouds => "magellanic_clouds",
            Self::LowDust => "lowdust",
            Self::Virgo => "virgo",
            Self::Bulge => "bulge",
            Self::Nes => "nes",
            Self::DustyPlane => "dusty_plane",
            Self::EuclidOverlap => "euclid_overlap",
            Self::Scp => "scp",
        }
    }

    /// Position in [`SurveyRegion::PRIORITY`]; lower wins.
    pub fn priority(self) -> usize {
        match self {
            Self::MagellanicClouds => 0,
            Self::LowDust => 1,
            Self::Virgo => 2,
            Self::Bulge => 3,
            Self::Nes => 4,
            Self::DustyPlane => 5,
            Self::EuclidOverlap => 6,
            Self::Scp => 7,
        }
    }

    /// Whether this region is part of the wide-fast-deep footprint.
    pub fn is_wfd(self) -> bool {
        Self::WFD.contains(&self)
    }

    /// Whether the region's rule selects pixel `pix`.
    ///
    /// `ebv` is the per-pixel reddening; only the dust-dependent regions
    /// read it. A pixel outside `sky`, or without an `ebv` entry for a
    /// dust-dependent region, is never selected.
    pub fn selects(self, sky: &SkyPixels, ebv: &[f64], geom: &FootprintGeometry, pix: usize) -> bool {
        let (Some(&ra), Some(&dec)) = (sky.ra().get(pix), sky.dec().get(pix)) else {
            return false;
        };
        let gal_l = || sky.gal_l().get(pix).map(|&l| wrap_longitude(l).abs());
        match self {
            Self::MagellanicClouds => {
                let pos = Equatorial::new(ra, dec);
                geom.lmc.contains(&pos) || geom.smc.contains(&pos)
            }
            Self::LowDust => {
                dec > geom.lowdust_dec_min
                    && dec < geom.lowdust_dec_max
                    && ebv.get(pix).is_some_and(|&e| e < geom.ebv_limit)
            }
            Self::Virgo => geom.virgo.contains(&Equatorial::new(ra, dec)),
            Self::Bulge => {
                let (Some(l), Some(&b)) = (gal_l(), sky.gal_b().get(pix)) else {
                    return false;
                };
                if l > geom.bulge_half_length || dec >= geom.bulge_dec_max {
                    return false;
                }
                let taper = (geom.bulge_width_center - geom.bulge_width_edge) * l / geom.bulge_half_length;
                b.abs() <= geom.bulge_width_center - taper
            }
            Self::Nes => {
                sky.ecl_lat().get(pix).is_some_and(|b| b.abs() < geom.nes_ecl_lat_max)
                    && dec > geom.nes_dec_min
                    && gal_l().is_some_and(|l| l > geom.nes_gal_l_min)
            }
            Self::DustyPlane => {
                dec > geom.dusty_dec_min
                    && dec < geom.dusty_dec_max
                    && ebv.get(pix).is_some_and(|&e| e >= geom.ebv_limit)
            }
            Self::EuclidOverlap => {
                (geom.euclid_ra_min..=geom.euclid_ra_max).contains(&ra)
                    && (geom.euclid_dec_min..=geom.euclid_dec_max).contains(&dec)
            }
            Self::Scp => dec < geom.scp_dec_max,
        }
    }

    /// Every pixel the rule selects, in ascending order.
    pub fn select(self, sky: &SkyPixels, ebv: &[f64], geom: &FootprintGeometry) -> Vec<usize> {
        (0..sky.len())
            .filter(|&pix| self.selects(sky, ebv, geom, pix))
            .collect()
    }
}

impl fmt::Display for SurveyRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for SurveyRegion {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::PRIORITY
            .iter()
            .copied()
            .find(|r| r.label() == s)
            .ok_or_else(|| ConfigError::UnknownRegion { name: s.to_string() })
    }
}
