use cs_core::{CsError, SiteId, VehicleId, VehicleTypeId};
use thiserror::Error;

use crate::RoadTrain;

/// Errors raised while assembling a fleet.
#[derive(Debug, Error)]
pub enum FleetError {
    #[error("duplicate site key {0:?}")]
    DuplicateSiteKey(String),

    #[error("duplicate vehicle key {0:?}")]
    DuplicateVehicleKey(String),

    #[error("site {0} not found")]
    SiteNotFound(SiteId),

    #[error("vehicle type {0} not found")]
    VehicleTypeNotFound(VehicleTypeId),

    #[error("site {site} is full (capacity {capacity})")]
    SiteFull { site: SiteId, capacity: u32 },

    #[error("site {site}: capacity {capacity} is below its {deployed} deployed vehicle(s)")]
    CapacityBelowDeployment { site: SiteId, capacity: u32, deployed: u32 },

    #[error(transparent)]
    Core(#[from] CsError),
}

pub type FleetResult<T> = Result<T, FleetError>;

/// Why a pickup was refused.  Always recoverable: parking is untouched.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PickupError {
    #[error("site {0} not found")]
    UnknownSite(SiteId),

    #[error("site {0} has no idle vehicle to pick up")]
    NoVehicles(SiteId),

    #[error("vehicle {vehicle} at site {site} needs {required_kwh:.3} kWh but holds {available_kwh:.3} kWh")]
    InsufficientEnergy {
        site:          SiteId,
        vehicle:       VehicleId,
        required_kwh:  f64,
        available_kwh: f64,
    },
}

/// A dropoff the target site could not absorb.  The train is handed back so
/// the holder keeps ownership.
#[derive(Debug, Error)]
#[error("site {site} has {free_slots} free slot(s) for a road train of {}", .train.len())]
pub struct DropoffRejected {
    pub site:       SiteId,
    pub free_slots: u32,
    pub train:      RoadTrain,
}
