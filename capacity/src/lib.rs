//! Monthly hours-capacity reconciliation.
//!
//! Raw storage rows go through the [`normalize`] step, are summed per window
//! month by [`aggregate`], and each sum is compared to the resource's derived
//! capacity with [`classify`]. Everything in this crate is pure and
//! synchronous; persistence lives in the service crate.

mod aggregator;
mod classifier;
mod domain;
mod draft;
mod error;
mod normalizer;
mod raw;
mod reassignment;
mod reconciler;

pub use aggregator::*;
pub use classifier::*;
pub use domain::*;
pub use draft::*;
pub use error::*;
pub use normalizer::*;
pub use raw::*;
pub use reassignment::*;
pub use reconciler::*;
