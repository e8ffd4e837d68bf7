//! skymask: spatial scoring and feasibility for a telescope survey scheduler.
//!
//! This is the top-level facade crate that re-exports the public API from all
//! skymask sub-crates. For most users, adding `skymask` as a single dependency
//! is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use skymask::prelude::*;
//!
//! // Lay out the default footprint on a coarse grid.
//! let config = FootprintConfig::with_nside(8).unwrap();
//! let maps = FootprintBuilder::new(config).unwrap().build().unwrap();
//! let grid = *maps.grid();
//!
//! // Two masks and a gate.
//! let basis: Vec<Box<dyn BasisFunction>> = vec![
//!     Box::new(StaticRegionMask::from_footprint(&maps, SurveyRegion::LowDust)),
//!     Box::new(NightCountMask::default_for(&grid)),
//!     Box::new(MoonAltGate::default()),
//! ];
//! let refs: Vec<&dyn BasisFunction> = basis.iter().map(|b| &**b).collect();
//!
//! // Counters for whatever the set reads, checked before the first night.
//! let mut registry = FeatureRegistry::with_kinds(grid.npix(), plan_features(&refs).kinds());
//! validate_basis_set(&refs, &registry, grid.npix()).unwrap();
//! registry.add_observation(&ObservationRecord::new(0, Band::R, vec![0])).unwrap();
//!
//! let conditions = Conditions::new(grid.npix()).with_moon_alt_degrees(-12.0);
//! let ctx = EvalContext::new(&conditions, &registry);
//! assert!(basis[2].check_feasibility(&ctx).unwrap());
//! let night = basis[1].calc_value(&ctx).unwrap().into_map().unwrap();
//! assert!(night[0].is_nan());
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `skymask-core` | Bands, conditions, feature kinds, errors |
//! | [`sphere`] | `skymask-sphere` | HEALPix grid, coordinate frames, hour angle |
//! | [`footprint`] | `skymask-footprint` | Region predicates, layered footprint builder |
//! | [`features`] | `skymask-features` | Visit counters and the feature registry |
//! | [`basis`] | `skymask-basis` | Basis-function trait, evaluation context, set validation |
//! | [`basis_fns`] | `skymask-basis-fns` | Region, hour-angle, and count masks; gates |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types and errors (`skymask-core`).
///
/// Contains [`types::Band`], [`types::Conditions`], [`types::FeatureKind`],
/// the [`types::FeatureReader`] trait, and the error enums.
pub use skymask_core as types;

/// Sky geometry (`skymask-sphere`).
///
/// [`sphere::HealpixGrid`] pixelises the sphere; [`sphere::SkyPixels`]
/// caches each pixel centre in equatorial, Galactic, and ecliptic frames.
pub use skymask_sphere as sphere;

/// Survey footprint construction (`skymask-footprint`).
///
/// [`footprint::FootprintBuilder`] turns a [`footprint::FootprintConfig`]
/// into a label map and per-band exposure ratio maps.
pub use skymask_footprint as footprint;

/// Visit counters (`skymask-features`).
pub use skymask_features as features;

/// Basis-function trait and set validation (`skymask-basis`).
pub use skymask_basis as basis;

/// Reference masks and gates (`skymask-basis-fns`).
pub use skymask_basis_fns as basis_fns;

/// Common imports for typical skymask usage.
///
/// ```rust
/// use skymask::prelude::*;
/// ```
pub mod prelude {
    // Core
    pub use skymask_core::{Band, Conditions, FeatureKind, FeatureReader, BANDS, EXCLUDED};

    // Errors
    pub use skymask_core::{ConfigError, EvalError, FeatureError};

    // Geometry
    pub use skymask_sphere::{HealpixGrid, SkyPixels};

    // Footprint
    pub use skymask_footprint::{
        BandRatios, FootprintBuilder, FootprintConfig, FootprintMaps, RegionLabelMap,
        SurveyRegion,
    };

    // Features
    pub use skymask_features::{FeatureRegistry, ObservationRecord, SurveyFeature};

    // Basis functions
    pub use skymask_basis::{
        plan_features, validate_basis_set, BasisFunction, BasisSetError, BasisValue, EvalContext,
    };
    pub use skymask_basis_fns::{
        HourAngleMask, MoonAltGate, NightCountMask, NightRangeGate, StaticRegionMask,
        TotalCountMask,
    };
}
