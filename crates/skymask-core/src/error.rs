//! Error types for the skymask engine.
//!
//! Split by lifecycle phase: [`ConfigError`] is raised while maps and basis
//! functions are constructed, [`EvalError`] while a basis function is
//! evaluated, and [`FeatureError`] while counters ingest observations.

use thiserror::Error;

use crate::feature::FeatureKind;

/// Construction-time configuration errors.
///
/// Raised before any decision cycle runs so that per-cycle evaluation
/// stays free of validation paths.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ConfigError {
    /// The HEALPix resolution is not a supported power of two.
    #[error("unsupported nside {nside}: must be a power of two in [1, {max}]")]
    UnsupportedResolution {
        /// The rejected resolution.
        nside: u32,
        /// Largest accepted resolution.
        max: u32,
    },
    /// A ratio table names a band outside the six survey bands.
    #[error("unknown band '{name}'")]
    UnknownBand {
        /// The unrecognized band name.
        name: String,
    },
    /// A configuration names a survey region that does not exist.
    #[error("unknown survey region '{name}'")]
    UnknownRegion {
        /// The unrecognized region name.
        name: String,
    },
    /// A ratio table omits one of the six survey bands.
    #[error("region '{region}' is missing a ratio for band '{band}'")]
    MissingBand {
        /// Region whose table is incomplete.
        region: String,
        /// The band with no ratio.
        band: String,
    },
    /// A ratio is negative, NaN or infinite.
    #[error("region '{region}' has invalid ratio {value} for band '{band}'")]
    InvalidRatio {
        /// Region whose table holds the value.
        region: String,
        /// Band of the offending entry.
        band: String,
        /// The rejected value.
        value: f64,
    },
    /// A scalar parameter is out of its valid domain.
    #[error("invalid parameter '{name}': {reason}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// What is wrong with it.
        reason: String,
    },
    /// A per-pixel array does not match the grid's pixel count.
    #[error("{what} has {actual} entries, expected {expected}")]
    LengthMismatch {
        /// Which array was supplied.
        what: &'static str,
        /// Pixel count of the grid.
        expected: usize,
        /// Length actually supplied.
        actual: usize,
    },
    /// A configuration document could not be parsed.
    #[error("failed to parse configuration: {reason}")]
    Parse {
        /// Parser diagnostic.
        reason: String,
    },
}

/// Errors from evaluating a basis function against a conditions snapshot.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EvalError {
    /// A stateful basis function was evaluated before the counter it
    /// declared was registered.
    #[error("basis function '{basis}' requires feature {feature}, which is not registered")]
    MissingFeature {
        /// Name of the basis function.
        basis: String,
        /// The declared feature that could not be read.
        feature: FeatureKind,
    },
    /// An input array has a different pixel count than the basis function
    /// was built for.
    #[error("{what} has {actual} pixels, basis function '{basis}' expects {expected}")]
    ResolutionMismatch {
        /// Name of the basis function.
        basis: String,
        /// Which input disagreed.
        what: &'static str,
        /// Pixel count the basis function was built for.
        expected: usize,
        /// Pixel count of the input.
        actual: usize,
    },
}

/// Errors raised while counters ingest an observation.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum FeatureError {
    /// The observation covers a pixel id outside the grid.
    #[error("observation covers pixel {pixel}, grid has {npix} pixels")]
    PixelOutOfRange {
        /// The offending pixel id.
        pixel: usize,
        /// Pixel count of the grid.
        npix: usize,
    },
    /// A counter was requested at a different resolution than the registry.
    #[error("feature {feature} has {actual} pixels, registry expects {expected}")]
    ShapeMismatch {
        /// The feature in question.
        feature: FeatureKind,
        /// Registry pixel count.
        expected: usize,
        /// Counter pixel count.
        actual: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::band::Band;

    #[test]
    fn messages_carry_context() {
        let err = ConfigError::MissingBand {
            region: "nes".into(),
            band: "u".into(),
        };
        assert_eq!(err.to_string(), "region 'nes' is missing a ratio for band 'u'");

        let err = EvalError::MissingFeature {
            basis: "NightCountMask".into(),
            feature: FeatureKind::NightCount { band: Some(Band::R) },
        };
        assert!(err.to_string().contains("night_count[r]"));
    }
}
