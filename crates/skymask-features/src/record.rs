//! Completed-observation records.

use serde::{Deserialize, Serialize};
use skymask_core::Band;

/// One completed visit as seen by the counters.
///
/// `pixels` lists every grid pixel the visit's field of view covered.
/// Order does not matter and repeats are counted once.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ObservationRecord {
    /// Survey night the visit was taken on.
    pub night: u32,
    /// Band of the visit.
    pub band: Band,
    /// Modified Julian date of the visit.
    pub mjd: f64,
    /// Covered pixels.
    pub pixels: Vec<usize>,
}

impl ObservationRecord {
    /// A visit on `night` in `band` covering `pixels`, at MJD 0.
    pub fn new(night: u32, band: Band, pixels: Vec<usize>) -> Self {
        Self {
            night,
            band,
            mjd: 0.0,
            pixels,
        }
    }

    /// Set the MJD.
    pub fn with_mjd(mut self, mjd: f64) -> Self {
        self.mjd = mjd;
        self
    }
}
