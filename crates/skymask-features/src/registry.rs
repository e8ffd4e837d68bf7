//! The [`FeatureRegistry`]: owner of every live counter.

use indexmap::IndexMap;
use skymask_core::{FeatureError, FeatureKind, FeatureReader};
use tracing::debug;

use crate::counter::{instantiate, SurveyFeature};
use crate::record::ObservationRecord;

/// Counters keyed by [`FeatureKind`], all over the same grid.
///
/// Registration order is preserved. Observations are applied to every
/// counter or to none: a record covering a pixel outside the grid is
/// rejected before any counter changes.
///
/// # Examples
///
/// ```
/// use skymask_core::{Band, FeatureKind, FeatureReader};
/// use skymask_features::{FeatureRegistry, ObservationRecord};
///
/// let tonight = FeatureKind::NightCount { band: None };
/// let mut registry = FeatureRegistry::new(12);
/// registry.register(tonight);
///
/// registry
///     .add_observation(&ObservationRecord::new(0, Band::R, vec![3, 4]))
///     .unwrap();
/// assert_eq!(registry.counts(tonight).unwrap()[3], 1);
///
/// let bad = ObservationRecord::new(0, Band::R, vec![3, 99]);
/// assert!(registry.add_observation(&bad).is_err());
/// assert_eq!(registry.counts(tonight).unwrap()[3], 1);
/// ```
pub struct FeatureRegistry {
    npix: usize,
    features: IndexMap<FeatureKind, Box<dyn SurveyFeature>>,
}

impl FeatureRegistry {
    /// Empty registry for a grid of `npix` pixels.
    pub fn new(npix: usize) -> Self {
        Self {
            npix,
            features: IndexMap::new(),
        }
    }

    /// Registry holding a fresh counter for each of `kinds`.
    pub fn with_kinds<I>(npix: usize, kinds: I) -> Self
    where
        I: IntoIterator<Item = FeatureKind>,
    {
        let mut registry = Self::new(npix);
        for kind in kinds {
            registry.register(kind);
        }
        registry
    }

    /// Pixel count every counter covers.
    pub fn npix(&self) -> usize {
        self.npix
    }

    /// Number of registered counters.
    pub fn len(&self) -> usize {
        self.features.len()
    }

    /// Whether no counters are registered.
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Whether `kind` is registered.
    pub fn contains(&self, kind: FeatureKind) -> bool {
        self.features.contains_key(&kind)
    }

    /// Registered kinds in registration order.
    pub fn kinds(&self) -> impl Iterator<Item = FeatureKind> + '_ {
        self.features.keys().copied()
    }

    /// Create a zeroed counter for `kind` unless one exists.
    ///
    /// Returns `true` if a counter was created.
    pub fn register(&mut self, kind: FeatureKind) -> bool {
        if self.features.contains_key(&kind) {
            return false;
        }
        debug!(feature = %kind, npix = self.npix, "feature registered");
        self.features.insert(kind, instantiate(kind, self.npix));
        true
    }

    /// Install an existing counter, replacing any counter of the same kind.
    ///
    /// Fails with [`FeatureError::ShapeMismatch`] if the counter covers a
    /// different number of pixels.
    pub fn insert(&mut self, feature: Box<dyn SurveyFeature>) -> Result<(), FeatureError> {
        let kind = feature.kind();
        let actual = feature.counts().len();
        if actual != self.npix {
            return Err(FeatureError::ShapeMismatch {
                feature: kind,
                expected: self.npix,
                actual,
            });
        }
        self.features.insert(kind, feature);
        Ok(())
    }

    /// Fold a completed observation into every counter.
    pub fn add_observation(&mut self, obs: &ObservationRecord) -> Result<(), FeatureError> {
        if let Some(&pixel) = obs.pixels.iter().find(|&&p| p >= self.npix) {
            return Err(FeatureError::PixelOutOfRange {
                pixel,
                npix: self.npix,
            });
        }
        for feature in self.features.values_mut() {
            feature.add_observation(obs);
        }
        Ok(())
    }

    /// Tell every counter that `night` has begun.
    pub fn start_night(&mut self, night: u32) {
        for feature in self.features.values_mut() {
            feature.start_night(night);
        }
    }
}

impl FeatureReader for FeatureRegistry {
    fn counts(&self, kind: FeatureKind) -> Option<&[u32]> {
        self.features.get(&kind).map(|f| f.counts())
    }
}

impl std::fmt::Debug for FeatureRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeatureRegistry")
            .field("npix", &self.npix)
            .field("features", &self.features.keys().collect::<Vec<_>>())
            .finish()
    }
}
