//! Galactic reddening, E(B-V), per pixel.

use std::borrow::Cow;

use skymask_core::ConfigError;
use skymask_sphere::SkyPixels;

/// Reddening at the Galactic poles used by [`ExtinctionMap::default()`].
pub const DEFAULT_E_POLE: f64 = 0.05;

/// Source of per-pixel E(B-V) values for the dust-dependent regions.
///
/// Only obtainable through [`ExtinctionMap::cosecant`],
/// [`ExtinctionMap::from_pixels`] or [`Default`], so every map holds
/// finite, non-negative reddening.
#[derive(Clone, Debug, PartialEq)]
pub struct ExtinctionMap {
    source: Source,
}

#[derive(Clone, Debug, PartialEq)]
enum Source {
    /// Plane-parallel dust layer: `E(B-V) = e_pole / |sin b|`, with `|b|`
    /// floored at one degree so the plane stays finite.
    Cosecant { e_pole: f64 },
    /// Values supplied by the caller, indexed by pixel.
    Pixels(Vec<f64>),
}

impl Default for ExtinctionMap {
    fn default() -> Self {
        Self {
            source: Source::Cosecant {
                e_pole: DEFAULT_E_POLE,
            },
        }
    }
}

impl ExtinctionMap {
    /// Cosecant model with the given polar reddening.
    pub fn cosecant(e_pole: f64) -> Result<Self, ConfigError> {
        if !e_pole.is_finite() || e_pole < 0.0 {
            return Err(ConfigError::InvalidParameter {
                name: "e_pole",
                reason: format!("must be finite and non-negative, got {e_pole}"),
            });
        }
        Ok(Self {
            source: Source::Cosecant { e_pole },
        })
    }

    /// Caller-supplied reddening, one finite non-negative value per pixel
    /// of a grid with `npix` pixels.
    pub fn from_pixels(values: Vec<f64>, npix: usize) -> Result<Self, ConfigError> {
        if values.len() != npix {
            return Err(ConfigError::LengthMismatch {
                what: "extinction map",
                expected: npix,
                actual: values.len(),
            });
        }
        if let Some((pix, bad)) = values
            .iter()
            .enumerate()
            .find(|(_, v)| !v.is_finite() || **v < 0.0)
        {
            return Err(ConfigError::InvalidParameter {
                name: "extinction map",
                reason: format!("pixel {pix} holds {bad}, must be finite and non-negative"),
            });
        }
        Ok(Self {
            source: Source::Pixels(values),
        })
    }

    /// Polar reddening of the cosecant model, `None` for supplied maps.
    pub fn e_pole(&self) -> Option<f64> {
        match self.source {
            Source::Cosecant { e_pole } => Some(e_pole),
            Source::Pixels(_) => None,
        }
    }

    /// Reddening of every pixel of `sky`.
    pub fn values<'a>(&'a self, sky: &SkyPixels) -> Result<Cow<'a, [f64]>, ConfigError> {
        match &self.source {
            Source::Cosecant { e_pole } => {
                let floor = 1.0f64.to_radians().sin();
                Ok(Cow::Owned(
                    sky.gal_b()
                        .iter()
                        .map(|b| e_pole / b.to_radians().sin().abs().max(floor))
                        .collect(),
                ))
            }
            Source::Pixels(values) if values.len() == sky.len() => Ok(Cow::Borrowed(values)),
            Source::Pixels(values) => Err(ConfigError::LengthMismatch {
                what: "extinction map",
                expected: sky.len(),
                actual: values.len(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skymask_sphere::HealpixGrid;

    #[test]
    fn cosecant_is_smallest_at_the_poles() {
        let sky = SkyPixels::new(&HealpixGrid::new(8).unwrap());
        let model = ExtinctionMap::default();
        let ebv = model.values(&sky).unwrap();
        for (b, e) in sky.gal_b().iter().zip(ebv.iter()) {
            assert!(*e >= DEFAULT_E_POLE - 1e-12);
            if b.abs() > 60.0 {
                assert!(*e < 0.06);
            }
            if b.abs() < 5.0 {
                assert!(*e > 0.199);
            }
        }
    }

    #[test]
    fn supplied_values_are_length_checked() {
        assert!(matches!(
            ExtinctionMap::from_pixels(vec![0.1; 10], 12),
            Err(ConfigError::LengthMismatch { expected: 12, actual: 10, .. })
        ));
        for bad in [f64::NAN, f64::INFINITY, -0.1] {
            let mut values = vec![0.1; 12];
            values[4] = bad;
            assert!(matches!(
                ExtinctionMap::from_pixels(values, 12),
                Err(ConfigError::InvalidParameter { name: "extinction map", .. })
            ));
        }

        let map = ExtinctionMap::from_pixels(vec![0.3; 12], 12).unwrap();
        let sky = SkyPixels::new(&HealpixGrid::new(1).unwrap());
        assert_eq!(map.values(&sky).unwrap().as_ref(), &[0.3; 12][..]);

        let sky = SkyPixels::new(&HealpixGrid::new(2).unwrap());
        assert!(map.values(&sky).is_err());
    }

    #[test]
    fn cosecant_rejects_negative_pole() {
        assert!(ExtinctionMap::cosecant(-0.01).is_err());
        assert!(ExtinctionMap::cosecant(f64::NAN).is_err());
        assert_eq!(ExtinctionMap::default().e_pole(), Some(DEFAULT_E_POLE));
        assert_eq!(
            ExtinctionMap::cosecant(0.05).unwrap(),
            ExtinctionMap::default()
        );
    }
}
