//! Layered survey-region footprint for skymask.
//!
//! The builder partitions the sky into mutually exclusive labeled regions
//! under a strict priority rule and records each region's desired
//! exposure-time ratio in every band:
//!
//! | priority | region |
//! |---|---|
//! | 0 | `magellanic_clouds` |
//! | 1 | `lowdust` |
//! | 2 | `virgo` |
//! | 3 | `bulge` |
//! | 4 | `nes` |
//! | 5 | `dusty_plane` |
//! | 6 | `euclid_overlap` |
//! | 7 | `scp` |
//!
//! A pixel belongs to the first region whose rule selects it. Pixels no
//! rule selects stay unlabeled with zero ratio in every band.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod builder;
pub mod config;
pub mod dust;
pub mod maps;
pub mod region;

pub use builder::FootprintBuilder;
pub use config::{BandRatios, FootprintConfig, FootprintGeometry, RegionRatios};
pub use dust::{ExtinctionMap, DEFAULT_E_POLE};
pub use maps::{BandRatioMap, FootprintMaps, RegionLabelMap};
pub use region::SurveyRegion;
