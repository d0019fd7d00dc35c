//! Engine-wide error type.
//!
//! Sub-crates define their own error enums and convert `CsError` into them
//! via `From` where a core failure can surface.

use thiserror::Error;

use crate::{SiteId, VehicleId};

#[derive(Debug, Error)]
pub enum CsError {
    #[error("site {0} not found")]
    SiteNotFound(SiteId),

    #[error("vehicle {0} not found")]
    VehicleNotFound(VehicleId),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for all `cs-*` crates.
pub type CsResult<T> = Result<T, CsError>;
