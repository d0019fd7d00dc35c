//! Docking site entity.

use cs_core::{Coord, LinkId, SiteId, VehicleId};

/// A fixed docking location with finite capacity.
///
/// `parking` is only mutated through [`Fleet`](crate::Fleet) operations,
/// which keep `parking.len() <= capacity` at all times.  `capacity` is fixed
/// once the fleet is built.
#[derive(Clone, Debug)]
pub struct Site {
    pub(crate) id:         SiteId,
    pub(crate) key:        String,
    pub(crate) name:       String,
    pub(crate) coord:      Coord,
    pub(crate) link:       LinkId,
    pub(crate) capacity:   u32,
    /// Parked vehicles in arrival order.
    pub(crate) parking:    Vec<VehicleId>,
    /// Initial assignment, moved into `parking` when the fleet is built.
    pub(crate) deployment: Vec<VehicleId>,
}

impl Site {
    pub fn id(&self) -> SiteId { self.id }
    /// External identifier (e.g. `stat.id.17`).
    pub fn key(&self) -> &str { &self.key }
    pub fn name(&self) -> &str { &self.name }
    pub fn coord(&self) -> Coord { self.coord }
    pub fn link(&self) -> LinkId { self.link }
    pub fn capacity(&self) -> u32 { self.capacity }
    pub fn parking(&self) -> &[VehicleId] { &self.parking }
    pub fn deployment(&self) -> &[VehicleId] { &self.deployment }

    #[inline]
    pub fn occupancy(&self) -> u32 {
        self.parking.len() as u32
    }

    #[inline]
    pub fn free_slots(&self) -> u32 {
        self.capacity.saturating_sub(self.occupancy())
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.free_slots() == 0
    }
}
