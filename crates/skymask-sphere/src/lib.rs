//! Spherical pixelization and sky coordinates for skymask.
//!
//! This crate defines [`HealpixGrid`], the equal-area tessellation every
//! per-pixel array in the workspace is indexed by, together with the
//! coordinate frames region rules are written in.
//!
//! # Frames
//!
//! - [`Equatorial`]: ICRS right ascension / declination
//! - [`Galactic`]: IAU 1958 Galactic longitude / latitude
//! - [`Ecliptic`]: mean J2000 ecliptic longitude / latitude
//!
//! [`SkyPixels`] caches all three for every pixel centre so region rules
//! never recompute a rotation inside a selection loop.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod coords;
pub mod healpix;
pub mod sky;

pub use coords::{
    angular_separation, hour_angle, wrap_longitude, Cap, Ecliptic, Equatorial, Galactic,
    OBLIQUITY_J2000,
};
pub use healpix::HealpixGrid;
pub use sky::SkyPixels;
