use cs_core::OperatorId;
use cs_spatial::SpatialError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RelocationError {
    #[error("operator {0} is not registered")]
    UnknownOperator(OperatorId),

    #[error("operator {0} is already driving")]
    AlreadyInTransit(OperatorId),

    #[error("routing failed: {0}")]
    Routing(#[from] SpatialError),
}

pub type RelocationResult<T> = Result<T, RelocationError>;
