//! `cs-spatial`: site index, nearest-site matching and trip itineraries.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                   |
//! |---------------|------------------------------------------------------------|
//! | [`index`]     | `SiteIndex` (R-tree over site coordinates)                 |
//! | [`matcher`]   | `NearestSiteMatcher`, `TripPattern`, `TripMatch`           |
//! | [`itinerary`] | `build_itinerary`, `Itinerary`, `PlanElement`              |
//! | [`oracle`]    | `PathOracle` trait, `DriveLeg`, `BeelineOracle`            |
//! | [`error`]     | `SpatialError`, `SpatialResult<T>`                         |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on `TripPattern`.          |

pub mod error;
pub mod index;
pub mod itinerary;
pub mod matcher;
pub mod oracle;

#[cfg(test)]
mod tests;

pub use error::{SpatialError, SpatialResult};
pub use index::SiteIndex;
pub use itinerary::{build_itinerary, Itinerary, LegRole, PlanElement};
pub use matcher::{NearestSiteMatcher, SiteMatch, TripMatch, TripPattern};
pub use oracle::{BeelineOracle, DriveLeg, PathOracle};
