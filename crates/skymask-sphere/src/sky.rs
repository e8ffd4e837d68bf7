//! Per-pixel coordinate cache.

use crate::coords::{hour_angle, Equatorial};
use crate::healpix::HealpixGrid;

/// Pixel-centre coordinates in every frame, computed once per grid.
///
/// Region rules and the hour-angle helper read these arrays instead of
/// converting pixel ids inside their loops. All angles are degrees.
#[derive(Clone, Debug)]
pub struct SkyPixels {
    grid: HealpixGrid,
    ra: Vec<f64>,
    dec: Vec<f64>,
    gal_l: Vec<f64>,
    gal_b: Vec<f64>,
    ecl_lon: Vec<f64>,
    ecl_lat: Vec<f64>,
}

impl SkyPixels {
    /// Compute pixel-centre coordinates for every pixel of `grid`.
    pub fn new(grid: &HealpixGrid) -> Self {
        let npix = grid.npix();
        let mut sky = Self {
            grid: *grid,
            ra: Vec::with_capacity(npix),
            dec: Vec::with_capacity(npix),
            gal_l: Vec::with_capacity(npix),
            gal_b: Vec::with_capacity(npix),
            ecl_lon: Vec::with_capacity(npix),
            ecl_lat: Vec::with_capacity(npix),
        };
        for (theta, phi) in (0..npix).filter_map(|pix| grid.pix2ang(pix)) {
            let eq = Equatorial::new(phi.to_degrees(), 90.0 - theta.to_degrees());
            let gal = eq.to_galactic();
            let ecl = eq.to_ecliptic();
            sky.ra.push(eq.ra);
            sky.dec.push(eq.dec);
            sky.gal_l.push(gal.l);
            sky.gal_b.push(gal.b);
            sky.ecl_lon.push(ecl.lon);
            sky.ecl_lat.push(ecl.lat);
        }
        sky
    }

    /// The grid these coordinates belong to.
    pub fn grid(&self) -> &HealpixGrid {
        &self.grid
    }

    /// Number of pixels.
    pub fn len(&self) -> usize {
        self.ra.len()
    }

    /// Always false; every grid has at least twelve pixels.
    pub fn is_empty(&self) -> bool {
        self.ra.is_empty()
    }

    /// Right ascension of each pixel centre.
    pub fn ra(&self) -> &[f64] {
        &self.ra
    }

    /// Declination of each pixel centre.
    pub fn dec(&self) -> &[f64] {
        &self.dec
    }

    /// Galactic longitude of each pixel centre, in `[0, 360)`.
    pub fn gal_l(&self) -> &[f64] {
        &self.gal_l
    }

    /// Galactic latitude of each pixel centre.
    pub fn gal_b(&self) -> &[f64] {
        &self.gal_b
    }

    /// Ecliptic longitude of each pixel centre.
    pub fn ecl_lon(&self) -> &[f64] {
        &self.ecl_lon
    }

    /// Ecliptic latitude of each pixel centre.
    pub fn ecl_lat(&self) -> &[f64] {
        &self.ecl_lat
    }

    /// Equatorial position of pixel `pix`, if it exists.
    pub fn equatorial(&self, pix: usize) -> Option<Equatorial> {
        Some(Equatorial::new(*self.ra.get(pix)?, *self.dec.get(pix)?))
    }

    /// Hour angle of every pixel, radians in `[0, 2π)`, for a local mean
    /// sidereal time of `lmst` hours.
    pub fn hour_angles(&self, lmst: f64) -> Vec<f64> {
        self.ra.iter().map(|&ra| hour_angle(lmst, ra)).collect()
    }
}
