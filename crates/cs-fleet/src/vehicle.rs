//! Shared vehicle entity.

use cs_core::{TripStatus, VehicleId, VehicleTypeId};

use crate::Battery;

/// One shared vehicle.
///
/// The vehicle does not record who holds it: the holder (a site's parking
/// list, an operator's road train, or a booking) is the single source of
/// truth, so ownership can never be recorded in two places.
#[derive(Clone, Debug)]
pub struct Vehicle {
    pub(crate) id:      VehicleId,
    pub(crate) key:     String,
    pub(crate) name:    String,
    pub(crate) vtype:   VehicleTypeId,
    pub(crate) battery: Battery,
    pub(crate) status:  TripStatus,
}

impl Vehicle {
    pub fn id(&self) -> VehicleId { self.id }
    /// External identifier (e.g. `veh.id.12`).
    pub fn key(&self) -> &str { &self.key }
    pub fn name(&self) -> &str { &self.name }
    pub fn vehicle_type(&self) -> VehicleTypeId { self.vtype }
    pub fn battery(&self) -> &Battery { &self.battery }
    pub fn status(&self) -> TripStatus { self.status }
}
