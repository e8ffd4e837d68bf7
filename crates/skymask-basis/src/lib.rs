//! Basis function trait and evaluation context for skymask.
//!
//! The [`BasisFunction`] trait defines the `&self` evaluation contract:
//! a basis function reads an [`EvalContext`] (the conditions snapshot and
//! the counter features) and returns either a per-pixel value map or a
//! feasibility verdict. [`validate_basis_set`] checks a list of basis
//! functions against a feature source once, before the first cycle.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod basis;
pub mod context;
pub mod plan;

pub use basis::{BasisFunction, BasisValue};
pub use context::EvalContext;
pub use plan::{plan_features, validate_basis_set, BasisSetError, FeaturePlan};
