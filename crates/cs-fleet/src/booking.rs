//! Customer bookings.
//!
//! A booking walks through three steps:
//!
//! ```text
//! book          → vehicle reserved at the site (EnRouteToPickup, still parked)
//! start_rental  → vehicle leaves the site      (Rented, held by the booking)
//! end_rental    → vehicle parked at any site with room (Idle)
//! ```
//!
//! `cancel` releases a reservation that was never picked up.  A reserved
//! vehicle is skipped by relocation pickups because they only take `Idle`
//! vehicles.

use thiserror::Error;

use cs_core::{BookingId, CustomerId, SimTime, SiteId, TripStatus, VehicleId};

use crate::{Fleet, FleetView};

/// Where a booking is in its lifecycle.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BookingState {
    Reserved,
    InRental,
    Completed,
    Cancelled,
}

/// Links a customer to the vehicle assigned for one rental.
#[derive(Clone, Debug, PartialEq)]
pub struct BookingRecord {
    pub id:           BookingId,
    pub customer:     CustomerId,
    pub vehicle:      VehicleId,
    pub pickup_site:  SiteId,
    pub booked_at:    SimTime,
    pub picked_up_at: Option<SimTime>,
    pub returned_at:  Option<SimTime>,
    pub return_site:  Option<SiteId>,
    pub state:        BookingState,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum BookingError {
    #[error("site {0} not found")]
    UnknownSite(SiteId),

    #[error("booking {0} not found")]
    UnknownBooking(BookingId),

    #[error("no idle vehicle at site {site} can cover {distance_m:.0} m")]
    NoVehicleAvailable { site: SiteId, distance_m: f64 },

    #[error("booking {id} is {state:?}, expected {expected:?}")]
    WrongState { id: BookingId, state: BookingState, expected: BookingState },

    #[error("site {0} has no free slot")]
    SiteFull(SiteId),
}

impl Fleet {
    pub fn booking(&self, id: BookingId) -> Option<&BookingRecord> {
        self.bookings.get(id.index())
    }

    pub fn bookings(&self) -> &[BookingRecord] {
        &self.bookings
    }

    /// Number of vehicles currently driven by customers.
    pub fn rented_count(&self) -> usize {
        self.bookings.iter().filter(|b| b.state == BookingState::InRental).count()
    }

    /// Reserve the first idle vehicle at `site` charged enough for `distance_m`.
    pub fn book(
        &mut self,
        site:       SiteId,
        customer:   CustomerId,
        distance_m: f64,
        time:       SimTime,
    ) -> Result<BookingId, BookingError> {
        let s = self.site(site).ok_or(BookingError::UnknownSite(site))?;
        let vehicle = s
            .parking
            .iter()
            .copied()
            .filter(|v| self.vehicles[v.index()].status == TripStatus::Idle)
            .find(|&v| self.gate_energy(v, distance_m).2)
            .ok_or(BookingError::NoVehicleAvailable { site, distance_m })?;

        self.vehicles[vehicle.index()].status = TripStatus::EnRouteToPickup;
        let id = BookingId(self.bookings.len() as u32);
        self.bookings.push(BookingRecord {
            id,
            customer,
            vehicle,
            pickup_site:  site,
            booked_at:    time,
            picked_up_at: None,
            returned_at:  None,
            return_site:  None,
            state:        BookingState::Reserved,
        });
        log::debug!("T:{time} booking {id} reserves {vehicle} at {site} for {customer}");
        Ok(id)
    }

    /// The customer takes the reserved vehicle out of its site.
    pub fn start_rental(&mut self, id: BookingId, time: SimTime) -> Result<VehicleId, BookingError> {
        let record = self.expect_state(id, BookingState::Reserved)?;
        let (vehicle, site) = (record.vehicle, record.pickup_site);

        self.sites[site.index()].parking.retain(|&v| v != vehicle);
        self.vehicles[vehicle.index()].status = TripStatus::Rented;

        let record = &mut self.bookings[id.index()];
        record.picked_up_at = Some(time);
        record.state = BookingState::InRental;
        Ok(vehicle)
    }

    /// Return the rented vehicle at `site` after driving `distance_m`.
    ///
    /// Fails with [`BookingError::SiteFull`] if the site has no room; the
    /// rental stays open so the customer can try another site.
    pub fn end_rental(
        &mut self,
        id:         BookingId,
        site:       SiteId,
        distance_m: f64,
        time:       SimTime,
    ) -> Result<(), BookingError> {
        let vehicle = self.expect_state(id, BookingState::InRental)?.vehicle;
        let s = self.sites.get(site.index()).ok_or(BookingError::UnknownSite(site))?;
        if s.is_full() {
            return Err(BookingError::SiteFull(site));
        }

        self.discharge(vehicle, distance_m);
        self.sites[site.index()].parking.push(vehicle);
        self.vehicles[vehicle.index()].status = TripStatus::Idle;

        let record = &mut self.bookings[id.index()];
        record.returned_at = Some(time);
        record.return_site = Some(site);
        record.state = BookingState::Completed;
        debug_assert!(self.capacity_invariant_holds());
        Ok(())
    }

    /// Release a reservation that was never picked up.
    pub fn cancel(&mut self, id: BookingId, time: SimTime) -> Result<(), BookingError> {
        let vehicle = self.expect_state(id, BookingState::Reserved)?.vehicle;
        self.vehicles[vehicle.index()].status = TripStatus::Idle;
        self.bookings[id.index()].state = BookingState::Cancelled;
        log::debug!("T:{time} booking {id} cancelled");
        Ok(())
    }

    fn expect_state(&self, id: BookingId, expected: BookingState) -> Result<&BookingRecord, BookingError> {
        let record = self.bookings.get(id.index()).ok_or(BookingError::UnknownBooking(id))?;
        if record.state != expected {
            return Err(BookingError::WrongState { id, state: record.state, expected });
        }
        Ok(record)
    }
}
