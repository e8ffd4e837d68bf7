//! HEALPix equal-area pixelization in RING ordering.

use std::f64::consts::{FRAC_PI_2, PI, TAU};

use serde::{Deserialize, Serialize};
use skymask_core::{ConfigError, DEFAULT_NSIDE, MAX_NSIDE};

use crate::coords::Equatorial;

/// A HEALPix tessellation of the sphere at resolution `nside`.
///
/// Pixels are numbered in RING order: `0` is the first pixel of the
/// northernmost ring, `npix - 1` the last pixel of the southernmost.
/// All pixels have area `4π / npix`.
///
/// # Examples
///
/// ```
/// use skymask_sphere::HealpixGrid;
///
/// let grid = HealpixGrid::new(4).unwrap();
/// assert_eq!(grid.npix(), 192);
///
/// // Pixel centres map back to the same pixel.
/// let (theta, phi) = grid.pix2ang(100).unwrap();
/// assert_eq!(grid.ang2pix(theta, phi), 100);
///
/// assert!(HealpixGrid::new(3).is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct HealpixGrid {
    nside: u32,
}

impl HealpixGrid {
    /// Create a grid at resolution `nside`.
    ///
    /// Returns [`ConfigError::UnsupportedResolution`] unless `nside` is a
    /// power of two no larger than [`MAX_NSIDE`].
    pub fn new(nside: u32) -> Result<Self, ConfigError> {
        if nside == 0 || !nside.is_power_of_two() || nside > MAX_NSIDE {
            return Err(ConfigError::UnsupportedResolution {
                nside,
                max: MAX_NSIDE,
            });
        }
        Ok(Self { nside })
    }

    /// Resolution parameter.
    pub fn nside(&self) -> u32 {
        self.nside
    }

    /// Total number of pixels, `12 * nside^2`.
    pub fn npix(&self) -> usize {
        npix_for(self.nside)
    }

    /// Solid angle of one pixel in steradians.
    pub fn pixel_area(&self) -> f64 {
        4.0 * PI / self.npix() as f64
    }

    /// Approximate pixel side length in degrees.
    pub fn resolution_degrees(&self) -> f64 {
        self.pixel_area().sqrt().to_degrees()
    }

    /// Colatitude and longitude (radians) of a pixel centre.
    ///
    /// Returns `None` if `pix` is not a pixel of this grid.
    pub fn pix2ang(&self, pix: usize) -> Option<(f64, f64)> {
        let n = self.nside as u64;
        let p = pix as u64;
        let npix = 12 * n * n;
        if p >= npix {
            return None;
        }
        let ncap = 2 * n * (n - 1);
        let fact2 = 4.0 / npix as f64;

        let (z, phi) = if p < ncap {
            let iring = (1 + isqrt(1 + 2 * p)) >> 1;
            let iphi = (p + 1) - 2 * iring * (iring - 1);
            let z = 1.0 - (iring * iring) as f64 * fact2;
            (z, (iphi as f64 - 0.5) * FRAC_PI_2 / iring as f64)
        } else if p < npix - ncap {
            let nl4 = 4 * n;
            let ip = p - ncap;
            let tmp = ip / nl4;
            let iring = tmp + n;
            let iphi = ip - nl4 * tmp + 1;
            // Rings alternate between shifted and unshifted pixel centres.
            let fodd = if (iring + n) & 1 == 1 { 1.0 } else { 0.5 };
            let z = (2 * n) as f64 - iring as f64;
            let z = z * (2 * n) as f64 * fact2;
            (z, (iphi as f64 - fodd) * PI / (2 * n) as f64)
        } else {
            let ip = npix - p;
            let iring = (1 + isqrt(2 * ip - 1)) >> 1;
            let iphi = 4 * iring + 1 - (ip - 2 * iring * (iring - 1));
            let z = -1.0 + (iring * iring) as f64 * fact2;
            (z, (iphi as f64 - 0.5) * FRAC_PI_2 / iring as f64)
        };

        Some((z.clamp(-1.0, 1.0).acos(), phi))
    }

    /// Pixel containing the direction at colatitude `theta` and longitude
    /// `phi` (radians).
    pub fn ang2pix(&self, theta: f64, phi: f64) -> usize {
        let n = self.nside as i64;
        let nl4 = 4 * n;
        let ncap = 2 * n * (n - 1);
        let npix = 12 * n * n;

        let z = theta.cos();
        let za = z.abs();
        let tt = phi.rem_euclid(TAU) / FRAC_PI_2;

        let pix = if za <= 2.0 / 3.0 {
            let temp1 = n as f64 * (0.5 + tt);
            let temp2 = n as f64 * z * 0.75;
            let jp = (temp1 - temp2) as i64;
            let jm = (temp1 + temp2) as i64;
            let ir = n + 1 + jp - jm;
            let kshift = 1 - (ir & 1);
            let t1 = jp + jm - n + kshift + 1 + nl4 + nl4;
            let ip = (t1 >> 1).rem_euclid(nl4);
            ncap + (ir - 1) * nl4 + ip
        } else {
            let tp = tt - tt.floor();
            let tmp = n as f64 * (3.0 * (1.0 - za)).sqrt();
            let jp = (tp * tmp) as i64;
            let jm = ((1.0 - tp) * tmp) as i64;
            let ir = jp + jm + 1;
            let ip = ((tt * ir as f64) as i64).rem_euclid(4 * ir);
            if z > 0.0 {
                2 * ir * (ir - 1) + ip
            } else {
                npix - 2 * ir * (ir + 1) + ip
            }
        };
        pix as usize
    }

    /// Equatorial coordinates (degrees) of a pixel centre.
    ///
    /// Uses the convention `ra = phi`, `dec = 90° - theta`.
    pub fn pix2radec(&self, pix: usize) -> Option<Equatorial> {
        self.pix2ang(pix)
            .map(|(theta, phi)| Equatorial::new(phi.to_degrees(), 90.0 - theta.to_degrees()))
    }

    /// Pixel containing the equatorial direction `(ra, dec)` in degrees.
    pub fn radec2pix(&self, ra: f64, dec: f64) -> usize {
        self.ang2pix((90.0 - dec).to_radians(), ra.to_radians())
    }
}

impl Default for HealpixGrid {
    /// The scheduler's default resolution, [`DEFAULT_NSIDE`].
    fn default() -> Self {
        Self {
            nside: DEFAULT_NSIDE,
        }
    }
}

impl TryFrom<u32> for HealpixGrid {
    type Error = ConfigError;

    fn try_from(nside: u32) -> Result<Self, Self::Error> {
        Self::new(nside)
    }
}

impl From<HealpixGrid> for u32 {
    fn from(grid: HealpixGrid) -> Self {
        grid.nside
    }
}

/// Pixel count for a resolution, `12 * nside^2`.
pub fn npix_for(nside: u32) -> usize {
    12 * (nside as usize) * (nside as usize)
}

/// Integer square root (floor).
fn isqrt(x: u64) -> u64 {
    let mut r = (x as f64).sqrt() as u64;
    while r * r > x {
        r -= 1;
    }
    while (r + 1) * (r + 1) <= x {
        r += 1;
    }
    r
}
