//! `cs-core`: foundational types for the carsharing fleet engine.
//!
//! This crate is a dependency of every other `cs-*` crate.  It intentionally
//! has no `cs-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module      | Contents                                                  |
//! |-------------|-----------------------------------------------------------|
//! | [`ids`]     | `SiteId`, `VehicleId`, `OperatorId`, `TaskId`, …          |
//! | [`geo`]     | `Coord`, euclidean distance                               |
//! | [`time`]    | `SimTime`                                                 |
//! | [`rng`]     | `SimRng` (explicit, seedable)                             |
//! | [`status`]  | `TripStatus` enum                                         |
//! | [`config`]  | `FleetConfig`, `BeelineParams`                            |
//! | [`error`]   | `CsError`, `CsResult`                                     |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod config;
pub mod error;
pub mod geo;
pub mod ids;
pub mod rng;
pub mod status;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{BeelineParams, FleetConfig};
pub use error::{CsError, CsResult};
pub use geo::Coord;
pub use ids::{BookingId, CustomerId, LinkId, OperatorId, SiteId, TaskId, VehicleId, VehicleTypeId};
pub use rng::SimRng;
pub use status::TripStatus;
pub use time::SimTime;
