//! Masking and feasibility basis functions for skymask.
//!
//! | basis function | output | reads |
//! |---|---|---|
//! | [`StaticRegionMask`] | 0 inside one region, NaN outside | label map, at construction |
//! | [`HourAngleMask`] | 0 outside an hour-angle window, NaN inside | hour angle |
//! | [`NightCountMask`] | NaN once a pixel hits tonight's limit | `NightCount` counter |
//! | [`TotalCountMask`] | NaN once a pixel hits its lifetime limit | `TotalCount` counter |
//! | [`NightRangeGate`] | infeasible after the last survey night | night index |
//! | [`MoonAltGate`] | infeasible while the moon is up | moon altitude |
//!
//! Masks contribute 0 to a pixel they allow, so they can be summed with
//! scoring terms without changing the score; NaN excludes the pixel.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod count_mask;
pub mod gates;
pub mod hour_angle;
pub mod region_mask;

pub use count_mask::{NightCountMask, TotalCountMask, DEFAULT_N_LIMIT, DEFAULT_N_MAX};
pub use gates::{MoonAltGate, NightRangeGate, DEFAULT_MOON_ALT_LIMIT, DEFAULT_NIGHT_MAX};
pub use hour_angle::HourAngleMask;
pub use region_mask::StaticRegionMask;
