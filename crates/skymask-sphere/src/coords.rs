//! Celestial coordinate frames and spherical geometry helpers.
//!
//! All public angles are in degrees except hour angles, which are radians
//! because that is what the conditions snapshot carries.

use std::f64::consts::TAU;

use nalgebra::{Matrix3, Vector3};
use serde::{Deserialize, Serialize};

/// Mean obliquity of the ecliptic at J2000, degrees.
pub const OBLIQUITY_J2000: f64 = 23.439_291_1;

/// Rotation from ICRS unit vectors to Galactic unit vectors.
fn icrs_to_galactic() -> Matrix3<f64> {
    Matrix3::new(
        -0.054_875_560_416_215_4,
        -0.873_437_090_234_885_0,
        -0.483_835_015_548_713_2,
        0.494_109_427_875_583_7,
        -0.444_829_629_960_011_2,
        0.746_982_244_497_218_9,
        -0.867_666_149_019_004_7,
        -0.198_076_373_431_201_5,
        0.455_983_776_175_066_9,
    )
}

/// Rotation about the x axis by the J2000 obliquity.
fn icrs_to_ecliptic() -> Matrix3<f64> {
    let (s, c) = OBLIQUITY_J2000.to_radians().sin_cos();
    Matrix3::new(1.0, 0.0, 0.0, 0.0, c, s, 0.0, -s, c)
}

fn unit_vector(lon_deg: f64, lat_deg: f64) -> Vector3<f64> {
    let (sl, cl) = lon_deg.to_radians().sin_cos();
    let (sb, cb) = lat_deg.to_radians().sin_cos();
    Vector3::new(cb * cl, cb * sl, sb)
}

/// Longitude in `[0, 360)` and latitude in `[-90, 90]`, degrees.
fn spherical(v: &Vector3<f64>) -> (f64, f64) {
    let lon = v.y.atan2(v.x).to_degrees().rem_euclid(360.0);
    let lat = v.z.clamp(-1.0, 1.0).asin().to_degrees();
    (lon, lat)
}

// ── Frames ──────────────────────────────────────────────────────

/// ICRS right ascension and declination, degrees.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Equatorial {
    /// Right ascension in `[0, 360)`.
    pub ra: f64,
    /// Declination in `[-90, 90]`.
    pub dec: f64,
}

impl Equatorial {
    /// Create a position. RA is not normalized.
    pub fn new(ra: f64, dec: f64) -> Self {
        Self { ra, dec }
    }

    /// Cartesian unit vector.
    pub fn to_unit_vector(&self) -> Vector3<f64> {
        unit_vector(self.ra, self.dec)
    }

    /// Galactic coordinates of this position.
    pub fn to_galactic(&self) -> Galactic {
        let (l, b) = spherical(&(icrs_to_galactic() * self.to_unit_vector()));
        Galactic { l, b }
    }

    /// Mean J2000 ecliptic coordinates of this position.
    pub fn to_ecliptic(&self) -> Ecliptic {
        let (lon, lat) = spherical(&(icrs_to_ecliptic() * self.to_unit_vector()));
        Ecliptic { lon, lat }
    }
}

/// Galactic longitude and latitude, degrees.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Galactic {
    /// Longitude in `[0, 360)`.
    pub l: f64,
    /// Latitude in `[-90, 90]`.
    pub b: f64,
}

impl Galactic {
    /// Equatorial coordinates of this position.
    pub fn to_equatorial(&self) -> Equatorial {
        let v = icrs_to_galactic().transpose() * unit_vector(self.l, self.b);
        let (ra, dec) = spherical(&v);
        Equatorial { ra, dec }
    }
}

/// Ecliptic longitude and latitude, degrees.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Ecliptic {
    /// Longitude in `[0, 360)`.
    pub lon: f64,
    /// Latitude in `[-90, 90]`.
    pub lat: f64,
}

// ── Geometry ────────────────────────────────────────────────────

/// Great-circle separation between two positions, degrees.
///
/// Uses the Vincenty form, which stays accurate at both tiny and
/// near-antipodal separations.
pub fn angular_separation(a: &Equatorial, b: &Equatorial) -> f64 {
    let (s1, c1) = a.dec.to_radians().sin_cos();
    let (s2, c2) = b.dec.to_radians().sin_cos();
    let (sd, cd) = (b.ra - a.ra).to_radians().sin_cos();

    let num1 = c2 * sd;
    let num2 = c1 * s2 - s1 * c2 * cd;
    let denom = s1 * s2 + c1 * c2 * cd;
    num1.hypot(num2).atan2(denom).to_degrees()
}

/// Wrap a longitude in degrees into `(-180, 180]`.
pub fn wrap_longitude(deg: f64) -> f64 {
    let w = deg.rem_euclid(360.0);
    if w > 180.0 {
        w - 360.0
    } else {
        w
    }
}

/// Hour angle in radians, in `[0, 2π)`, of a direction at right ascension
/// `ra` (degrees) when the local mean sidereal time is `lmst` hours.
pub fn hour_angle(lmst: f64, ra: f64) -> f64 {
    let ha = (lmst * 15.0 - ra).to_radians().rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs.
    if ha >= TAU {
        0.0
    } else {
        ha
    }
}

/// A circular patch of sky.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Cap {
    /// Centre of the cap.
    pub center: Equatorial,
    /// Angular radius, degrees.
    pub radius: f64,
}

impl Cap {
    /// Cap of `radius` degrees around `(ra, dec)`.
    pub fn new(ra: f64, dec: f64, radius: f64) -> Self {
        Self {
            center: Equatorial::new(ra, dec),
            radius,
        }
    }

    /// Whether `pos` lies strictly inside the cap.
    pub fn contains(&self, pos: &Equatorial) -> bool {
        angular_separation(&self.center, pos) < self.radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const TOL: f64 = 1e-4;

    #[test]
    fn galactic_centre_and_pole() {
        let gc = Equatorial::new(266.404_996, -28.936_172).to_galactic();
        assert!(wrap_longitude(gc.l).abs() < 1e-3, "l = {}", gc.l);
        assert!(gc.b.abs() < 1e-3, "b = {}", gc.b);

        let ngp = Equatorial::new(192.859_508, 27.128_336).to_galactic();
        assert!((ngp.b - 90.0).abs() < 1e-3);
    }

    #[test]
    fn ecliptic_pole_and_equinox() {
        let equinox = Equatorial::new(0.0, 0.0).to_ecliptic();
        assert!(equinox.lon.abs() < TOL && equinox.lat.abs() < TOL);

        let nep = Equatorial::new(270.0, 90.0 - OBLIQUITY_J2000).to_ecliptic();
        assert!((nep.lat - 90.0).abs() < TOL);
    }

    #[test]
    fn separation_reference_values() {
        let a = Equatorial::new(0.0, 0.0);
        assert!((angular_separation(&a, &Equatorial::new(90.0, 0.0)) - 90.0).abs() < 1e-10);
        assert!((angular_separation(&a, &Equatorial::new(0.0, 90.0)) - 90.0).abs() < 1e-10);
        assert!((angular_separation(&a, &Equatorial::new(180.0, 0.0)) - 180.0).abs() < 1e-10);
        assert_eq!(angular_separation(&a, &a), 0.0);
    }

    #[test]
    fn wrap_longitude_range() {
        assert_eq!(wrap_longitude(0.0), 0.0);
        assert_eq!(wrap_longitude(180.0), 180.0);
        assert_eq!(wrap_longitude(190.0), -170.0);
        assert_eq!(wrap_longitude(-190.0), 170.0);
        assert_eq!(wrap_longitude(720.0), 0.0);
    }

    #[test]
    fn hour_angle_is_normalized() {
        assert_eq!(hour_angle(0.0, 0.0), 0.0);
        // Six hours west of the meridian.
        assert!((hour_angle(6.0, 0.0) - TAU / 4.0).abs() < 1e-12);
        // East of the meridian wraps to the top of the range.
        assert!((hour_angle(0.0, 90.0) - 3.0 * TAU / 4.0).abs() < 1e-12);
    }

    #[test]
    fn cap_membership_is_strict() {
        let cap = Cap::new(186.75, 12.717, 8.75);
        assert!(cap.contains(&Equatorial::new(186.75, 12.717)));
        assert!(cap.contains(&Equatorial::new(186.75, 21.0)));
        assert!(!cap.contains(&Equatorial::new(186.75, 22.0)));
    }

    proptest! {
        #[test]
        fn galactic_round_trip(ra in 0.0f64..360.0, dec in -89.0f64..89.0) {
            let back = Equatorial::new(ra, dec).to_galactic().to_equatorial();
            let sep = angular_separation(&Equatorial::new(ra, dec), &back);
            prop_assert!(sep < 1e-8, "sep {}", sep);
        }

        #[test]
        fn separation_is_symmetric_and_bounded(
            ra1 in 0.0f64..360.0, dec1 in -90.0f64..90.0,
            ra2 in 0.0f64..360.0, dec2 in -90.0f64..90.0,
        ) {
            let a = Equatorial::new(ra1, dec1);
            let b = Equatorial::new(ra2, dec2);
            let ab = angular_separation(&a, &b);
            prop_assert!((ab - angular_separation(&b, &a)).abs() < 1e-9);
            prop_assert!((0.0..=180.0).contains(&ab));
        }

        #[test]
        fn hour_angle_in_range(lmst in -48.0f64..48.0, ra in -720.0f64..720.0) {
            let ha = hour_angle(lmst, ra);
            prop_assert!((0.0..TAU).contains(&ha));
        }
    }
}
