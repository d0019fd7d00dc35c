//! Spatial-subsystem error type.

use thiserror::Error;

use cs_core::{Coord, CsError};

/// Errors produced by `cs-spatial`.
///
/// An infeasible match (no site in range) is not an error: the matcher
/// returns `None`.
#[derive(Debug, Error)]
pub enum SpatialError {
    #[error("no drivable route from {from} to {to}")]
    NoRoute { from: Coord, to: Coord },

    #[error(transparent)]
    Core(#[from] CsError),
}

pub type SpatialResult<T> = Result<T, SpatialError>;
