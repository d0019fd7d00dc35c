//! Road trains: ordered chains of vehicles moved together by one operator.

use cs_core::VehicleId;

/// An ordered chain of vehicles held by a single operator.
///
/// A `RoadTrain` can only be created by [`Fleet::pickup`](crate::FleetOps::pickup),
/// so owning one is proof of holding those vehicles.  It is moved (not
/// copied) between the fleet and the operator; a rejected dropoff hands it
/// back inside the error.
#[derive(Debug, PartialEq, Eq)]
pub struct RoadTrain {
    vehicles: Vec<VehicleId>,
}

impl RoadTrain {
    pub(crate) fn new(vehicles: Vec<VehicleId>) -> Self {
        debug_assert!(!vehicles.is_empty());
        Self { vehicles }
    }

    /// The lead vehicle (the one the operator drives).
    pub fn head(&self) -> VehicleId {
        self.vehicles[0]
    }

    pub fn len(&self) -> usize {
        self.vehicles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }

    pub fn vehicles(&self) -> &[VehicleId] {
        &self.vehicles
    }

    pub fn iter(&self) -> impl Iterator<Item = VehicleId> + '_ {
        self.vehicles.iter().copied()
    }

    /// Couple `other` behind this train.
    pub fn append(&mut self, other: RoadTrain) {
        self.vehicles.extend(other.vehicles);
    }

    pub(crate) fn into_vehicles(self) -> Vec<VehicleId> {
        self.vehicles
    }
}
