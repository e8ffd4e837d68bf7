//! The observing-conditions snapshot read by basis functions.

use std::f64::consts::FRAC_PI_2;

use crate::error::ConfigError;

/// Sky and telescope state for one decision cycle.
///
/// Produced once per cycle by the scheduling engine and only read by basis
/// functions. The per-pixel hour angle is validated against the pixel
/// count at construction, so evaluation never has to re-check it.
///
/// # Examples
///
/// ```
/// use skymask_core::Conditions;
///
/// let conditions = Conditions::new(12)
///     .with_night(3)
///     .with_moon_alt_degrees(-12.0)
///     .with_hour_angle(vec![0.5; 12])
///     .unwrap();
///
/// assert_eq!(conditions.night(), 3);
/// assert_eq!(conditions.hour_angle().len(), 12);
/// assert!(Conditions::new(12).with_hour_angle(vec![0.0; 11]).is_err());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Conditions {
    npix: usize,
    mjd: f64,
    night: u32,
    moon_alt: f64,
    hour_angle: Vec<f64>,
}

impl Conditions {
    /// Snapshot for a grid of `npix` pixels with every pixel on the
    /// meridian, the moon at the nadir, night 0 and MJD 0.
    pub fn new(npix: usize) -> Self {
        Self {
            npix,
            mjd: 0.0,
            night: 0,
            moon_alt: -FRAC_PI_2,
            hour_angle: vec![0.0; npix],
        }
    }

    /// Set the modified Julian date.
    pub fn with_mjd(mut self, mjd: f64) -> Self {
        self.mjd = mjd;
        self
    }

    /// Set the survey night index.
    pub fn with_night(mut self, night: u32) -> Self {
        self.night = night;
        self
    }

    /// Set the moon altitude in radians.
    pub fn with_moon_alt(mut self, radians: f64) -> Self {
        self.moon_alt = radians;
        self
    }

    /// Set the moon altitude in degrees.
    pub fn with_moon_alt_degrees(self, degrees: f64) -> Self {
        self.with_moon_alt(degrees.to_radians())
    }

    /// Set the per-pixel hour angle in radians.
    ///
    /// Returns [`ConfigError::LengthMismatch`] unless `hour_angle` has one
    /// entry per pixel.
    pub fn with_hour_angle(mut self, hour_angle: Vec<f64>) -> Result<Self, ConfigError> {
        if hour_angle.len() != self.npix {
            return Err(ConfigError::LengthMismatch {
                what: "hour_angle",
                expected: self.npix,
                actual: hour_angle.len(),
            });
        }
        self.hour_angle = hour_angle;
        Ok(self)
    }

    /// Pixel count of the grid this snapshot describes.
    pub fn npix(&self) -> usize {
        self.npix
    }

    /// Modified Julian date.
    pub fn mjd(&self) -> f64 {
        self.mjd
    }

    /// Survey night index, starting at 0.
    pub fn night(&self) -> u32 {
        self.night
    }

    /// Moon altitude in radians.
    pub fn moon_alt(&self) -> f64 {
        self.moon_alt
    }

    /// Hour angle of each pixel in radians, in `[0, 2π)`.
    pub fn hour_angle(&self) -> &[f64] {
        &self.hour_angle
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_dark_and_on_meridian() {
        let c = Conditions::new(48);
        assert_eq!(c.npix(), 48);
        assert_eq!(c.night(), 0);
        assert!(c.moon_alt() < 0.0);
        assert!(c.hour_angle().iter().all(|&ha| ha == 0.0));
    }

    #[test]
    fn hour_angle_length_is_checked() {
        let err = Conditions::new(48).with_hour_angle(vec![0.0; 12]).unwrap_err();
        assert_eq!(
            err,
            ConfigError::LengthMismatch {
                what: "hour_angle",
                expected: 48,
                actual: 12,
            }
        );
    }

    #[test]
    fn moon_alt_degrees_converts_to_radians() {
        let c = Conditions::new(1).with_moon_alt_degrees(-10.0);
        assert!((c.moon_alt() - (-10.0f64).to_radians()).abs() < 1e-15);
    }
}
