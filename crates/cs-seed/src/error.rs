use thiserror::Error;

use cs_fleet::FleetError;

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("station file parse error: {0}")]
    Parse(String),

    #[error("station {station:?} has no {field} value")]
    MissingField { station: String, field: &'static str },

    #[error("invalid seeding parameter: {0}")]
    InvalidParameter(String),

    #[error(transparent)]
    Fleet(#[from] FleetError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type SeedResult<T> = Result<T, SeedError>;
