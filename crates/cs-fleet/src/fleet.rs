//! The `Fleet` arena and its read/mutate capabilities.
//!
//! # Capability split
//!
//! | Trait         | Who gets it                                              |
//! |---------------|----------------------------------------------------------|
//! | [`FleetView`] | read-only queries for matchers and observers             |
//! | [`FleetOps`]  | pickup/dropoff for relocation and bookings               |
//!
//! Both are implemented by [`Fleet`].  Code that only needs to look at the
//! inventory takes `&impl FleetView` and therefore cannot move vehicles.
//!
//! # Atomicity
//!
//! `pickup` and `dropoff` each run inside a single `&mut self` call: the
//! energy gate, the removal from parking and the status update are applied
//! together or not at all, and no other code can observe a site in between.

use rustc_hash::FxHashMap;

use cs_core::{SimTime, SiteId, TripStatus, VehicleId, VehicleTypeId};

use crate::booking::BookingRecord;
use crate::{DropoffRejected, PickupError, RoadTrain, Site, Vehicle, VehicleType};

// ── Capabilities ──────────────────────────────────────────────────────────────

/// Read-only inventory queries.
pub trait FleetView {
    fn sites(&self) -> &[Site];
    fn vehicles(&self) -> &[Vehicle];
    fn vehicle_type(&self, id: VehicleTypeId) -> Option<&VehicleType>;
    fn site_by_key(&self, key: &str) -> Option<SiteId>;
    fn vehicle_by_key(&self, key: &str) -> Option<VehicleId>;

    fn site(&self, id: SiteId) -> Option<&Site> {
        self.sites().get(id.index())
    }

    fn vehicle(&self, id: VehicleId) -> Option<&Vehicle> {
        self.vehicles().get(id.index())
    }

    /// Total number of vehicles currently parked at any site.
    fn parked_count(&self) -> usize {
        self.sites().iter().map(|s| s.parking.len()).sum()
    }

    /// The site whose parking list holds `vehicle`, if any.
    fn site_of(&self, vehicle: VehicleId) -> Option<SiteId> {
        self.sites()
            .iter()
            .find(|s| s.parking.contains(&vehicle))
            .map(|s| s.id)
    }
}

/// Inventory mutations.  Failures are recoverable values, never panics.
pub trait FleetOps: FleetView {
    /// Remove up to `count` idle vehicles from `site` as one road train.
    ///
    /// Every candidate (scanned in parking order) must be charged enough to
    /// cover `distance_m` at its type's maximum speed; one failing candidate
    /// aborts the whole pickup with parking unchanged.
    fn pickup(
        &mut self,
        site:       SiteId,
        count:      usize,
        distance_m: f64,
        time:       SimTime,
    ) -> Result<RoadTrain, PickupError>;

    /// Check that vehicles already held can also cover a further carry of
    /// `distance_m`, with the same gate and error as [`pickup`](Self::pickup).
    /// Nothing is mutated.
    fn gate_carry(
        &self,
        site:       SiteId,
        held:       &[VehicleId],
        distance_m: f64,
        time:       SimTime,
    ) -> Result<(), PickupError>;

    /// Park every vehicle of `train` at `site`, or hand the train back if the
    /// site lacks room for all of them.
    fn dropoff(&mut self, site: SiteId, train: RoadTrain, time: SimTime) -> Result<(), DropoffRejected>;

    /// Drain each of `vehicles` for a leg of `distance_m` at its type's
    /// maximum speed.
    fn drive_vehicles(&mut self, vehicles: &[VehicleId], distance_m: f64);

    /// Drain each vehicle of `train` for a leg of `distance_m`.
    fn drive_train(&mut self, train: &RoadTrain, distance_m: f64) {
        self.drive_vehicles(train.vehicles(), distance_m);
    }
}

// ── Fleet ─────────────────────────────────────────────────────────────────────

/// Arena of sites, vehicles and vehicle types, indexed by typed ids.
///
/// Construct with [`FleetBuilder`](crate::FleetBuilder).  After `build` the
/// set of sites and vehicles and every site's capacity are fixed.
pub struct Fleet {
    pub(crate) vehicle_types: Vec<VehicleType>,
    pub(crate) sites:         Vec<Site>,
    pub(crate) vehicles:      Vec<Vehicle>,
    pub(crate) site_keys:     FxHashMap<String, SiteId>,
    pub(crate) vehicle_keys:  FxHashMap<String, VehicleId>,
    pub(crate) bookings:      Vec<BookingRecord>,
}

impl Fleet {
    pub fn site_count(&self) -> usize {
        self.sites.len()
    }

    pub fn vehicle_count(&self) -> usize {
        self.vehicles.len()
    }

    /// Sum of all site capacities.
    pub fn total_capacity(&self) -> u64 {
        self.sites.iter().map(|s| s.capacity as u64).sum()
    }

    /// `true` when every site satisfies `|parking| <= capacity`.
    pub fn capacity_invariant_holds(&self) -> bool {
        self.sites.iter().all(|s| s.parking.len() <= s.capacity as usize)
    }

    /// Energy the lead-speed gate would require of `vehicle` for `distance_m`.
    pub(crate) fn gate_energy(&self, vehicle: VehicleId, distance_m: f64) -> (f64, f64, bool) {
        let v = &self.vehicles[vehicle.index()];
        let max_speed = self.vehicle_types[v.vtype.index()].max_velocity_mps;
        let avg_speed = max_speed;
        let required = v.battery.energy_for_consumption(distance_m, max_speed, avg_speed);
        let enough = v.battery.is_charged_enough(distance_m, max_speed, avg_speed);
        (required, max_speed, enough)
    }

    /// Run the energy gate over `vehicles`; the first one short of charge
    /// fails the lot.
    fn gate_vehicles(
        &self,
        site:       SiteId,
        vehicles:   &[VehicleId],
        distance_m: f64,
        time:       SimTime,
    ) -> Result<(), PickupError> {
        let site_key = self.sites.get(site.index()).map_or("?", |s| s.key.as_str());
        for &v in vehicles {
            if v.index() >= self.vehicles.len() {
                continue;
            }
            let (required, speed, enough) = self.gate_energy(v, distance_m);
            let vehicle = &self.vehicles[v.index()];
            log::debug!(
                "[ENERGY] T:{time} |staId:{site_key} |vehId:{} |soc:{:.3} |speed:{speed:.2} |distance:{distance_m:.1} |consume:{required:.3}",
                vehicle.key,
                vehicle.battery.soc(),
            );
            if !enough {
                return Err(PickupError::InsufficientEnergy {
                    site,
                    vehicle:       v,
                    required_kwh:  required,
                    available_kwh: vehicle.battery.available_kwh(),
                });
            }
        }
        Ok(())
    }

    pub(crate) fn discharge(&mut self, vehicle: VehicleId, distance_m: f64) {
        let v = &mut self.vehicles[vehicle.index()];
        let max_speed = self.vehicle_types[v.vtype.index()].max_velocity_mps;
        let kwh = v.battery.energy_for_consumption(distance_m, max_speed, max_speed);
        v.battery.discharge(kwh);
    }
}

impl FleetView for Fleet {
    fn sites(&self) -> &[Site] {
        &self.sites
    }

    fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    fn vehicle_type(&self, id: VehicleTypeId) -> Option<&VehicleType> {
        self.vehicle_types.get(id.index())
    }

    fn site_by_key(&self, key: &str) -> Option<SiteId> {
        self.site_keys.get(key).copied()
    }

    fn vehicle_by_key(&self, key: &str) -> Option<VehicleId> {
        self.vehicle_keys.get(key).copied()
    }
}

impl FleetOps for Fleet {
    fn pickup(
        &mut self,
        site:       SiteId,
        count:      usize,
        distance_m: f64,
        time:       SimTime,
    ) -> Result<RoadTrain, PickupError> {
        let Some(s) = self.sites.get(site.index()) else {
            return Err(PickupError::UnknownSite(site));
        };

        let candidates: Vec<VehicleId> = s
            .parking
            .iter()
            .copied()
            .filter(|v| self.vehicles[v.index()].status == TripStatus::Idle)
            .take(count)
            .collect();
        if candidates.is_empty() {
            return Err(PickupError::NoVehicles(site));
        }

        // Road-train gate: all candidates or none.
        self.gate_vehicles(site, &candidates, distance_m, time)?;

        let s = &mut self.sites[site.index()];
        s.parking.retain(|v| !candidates.contains(v));
        for &v in &candidates {
            self.vehicles[v.index()].status = TripStatus::Relocating;
        }
        debug_assert!(self.capacity_invariant_holds());

        Ok(RoadTrain::new(candidates))
    }

    fn gate_carry(
        &self,
        site:       SiteId,
        held:       &[VehicleId],
        distance_m: f64,
        time:       SimTime,
    ) -> Result<(), PickupError> {
        self.gate_vehicles(site, held, distance_m, time)
    }

    fn dropoff(&mut self, site: SiteId, train: RoadTrain, time: SimTime) -> Result<(), DropoffRejected> {
        let Some(s) = self.sites.get_mut(site.index()) else {
            return Err(DropoffRejected { site, free_slots: 0, train });
        };

        let free_slots = s.free_slots();
        if (free_slots as usize) < train.len() {
            return Err(DropoffRejected { site, free_slots, train });
        }

        let vehicles = train.into_vehicles();
        s.parking.extend_from_slice(&vehicles);
        log::debug!("T:{time} parked {} vehicle(s) at {}", vehicles.len(), s.key);
        for v in vehicles {
            self.vehicles[v.index()].status = TripStatus::Idle;
        }
        debug_assert!(self.capacity_invariant_holds());
        Ok(())
    }

    fn drive_vehicles(&mut self, vehicles: &[VehicleId], distance_m: f64) {
        for &v in vehicles {
            if v.index() < self.vehicles.len() {
                self.discharge(v, distance_m);
            }
        }
    }
}
