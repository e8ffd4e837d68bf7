//! Photometric bands and survey-wide constants.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Number of photometric bands.
pub const N_BANDS: usize = 6;

/// All bands in canonical (blue to red) order.
pub const BANDS: [Band; N_BANDS] = [Band::U, Band::G, Band::R, Band::I, Band::Z, Band::Y];

/// Standard visit exposure time in seconds.
pub const STANDARD_EXP_TIME: f64 = 30.0;

/// Visit exposure time for the u band in seconds.
pub const STANDARD_EXP_TIME_U: f64 = 38.0;

/// Default HEALPix resolution for scheduler maps.
pub const DEFAULT_NSIDE: u32 = 32;

/// Largest accepted HEALPix resolution.
pub const MAX_NSIDE: u32 = 8192;

/// A photometric band of the survey camera.
///
/// # Examples
///
/// ```
/// use skymask_core::Band;
///
/// let band: Band = "r".parse().unwrap();
/// assert_eq!(band, Band::R);
/// assert_eq!(band.index(), 2);
/// assert_eq!(band.to_string(), "r");
/// assert!("w".parse::<Band>().is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Band {
    /// Ultraviolet.
    U,
    /// Green.
    G,
    /// Red.
    R,
    /// Near infrared.
    I,
    /// z.
    Z,
    /// y.
    Y,
}

impl Band {
    /// Position of this band in [`BANDS`].
    pub fn index(self) -> usize {
        match self {
            Self::U => 0,
            Self::G => 1,
            Self::R => 2,
            Self::I => 3,
            Self::Z => 4,
            Self::Y => 5,
        }
    }

    /// Single-letter band name.
    pub fn name(self) -> &'static str {
        match self {
            Self::U => "u",
            Self::G => "g",
            Self::R => "r",
            Self::I => "i",
            Self::Z => "z",
            Self::Y => "y",
        }
    }

    /// Nominal exposure time for a visit in this band, in seconds.
    pub fn exposure_time(self) -> f64 {
        match self {
            Self::U => STANDARD_EXP_TIME_U,
            _ => STANDARD_EXP_TIME,
        }
    }
}

impl fmt::Display for Band {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Band {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BANDS
            .iter()
            .copied()
            .find(|b| b.name() == s)
            .ok_or_else(|| ConfigError::UnknownBand { name: s.to_string() })
    }
}
