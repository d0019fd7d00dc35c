//! `cs-fleet`: the authoritative site/vehicle inventory.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                         |
//! |-------------|------------------------------------------------------------------|
//! | [`energy`]  | `Battery`, `ConsumptionCurve`, `VehicleType`                     |
//! | [`site`]    | `Site`: capacity, parking, deployment                            |
//! | [`vehicle`] | `Vehicle`: battery and trip status                               |
//! | [`train`]   | `RoadTrain`: ordered chain of vehicles held by one operator      |
//! | [`fleet`]   | `Fleet` arena, `FleetView` (read) / `FleetOps` (mutate)          |
//! | [`builder`] | `FleetBuilder`: used by loaders and seeding before the run       |
//! | [`booking`] | customer `BookingRecord`s on top of the inventory                |
//! | [`error`]   | `FleetError`, `PickupError`, `DropoffRejected`                   |
//!
//! # Invariants
//!
//! - `|parking| <= capacity` for every site after every operation.
//! - A vehicle is in at most one place: one site's parking, one road train,
//!   or one open rental.
//! - Capacities are frozen once [`FleetBuilder::build`] returns.

pub mod booking;
pub mod builder;
pub mod energy;
pub mod error;
pub mod fleet;
pub mod site;
pub mod train;
pub mod vehicle;

#[cfg(test)]
mod tests;

pub use booking::{BookingError, BookingRecord, BookingState};
pub use builder::FleetBuilder;
pub use energy::{Battery, ConsumptionCurve, VehicleType};
pub use error::{DropoffRejected, FleetError, FleetResult, PickupError};
pub use fleet::{Fleet, FleetOps, FleetView};
pub use site::Site;
pub use train::RoadTrain;
pub use vehicle::Vehicle;
