//! `cs-seed`: raw station files and initial fleet seeding.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                        |
//! |---------------|-----------------------------------------------------------------|
//! | [`raw`]       | `RawStation`, `read_stations`, delimiter detection              |
//! | [`transform`] | `CoordTransform` trait, `Identity`, `Equirectangular`           |
//! | [`seeding`]   | `seed_explicit`, `seed_weighted_random`, `seed_coefficient`     |
//! | [`error`]     | `SeedError`, `SeedResult<T>`                                    |
//!
//! Seeding runs once, on a [`FleetBuilder`](cs_fleet::FleetBuilder), before
//! the simulation starts.  Random draws come from an explicit
//! [`SimRng`](cs_core::SimRng) so a seed reproduces the same fleet.

pub mod error;
pub mod raw;
pub mod seeding;
pub mod transform;


pub use error::{SeedError, SeedResult};
pub use raw::{detect_delimiter, read_stations, read_stations_reader, RawStation};
pub use seeding::{
    seed_coefficient, seed_explicit, seed_weighted_random, CoefficientParams, FleetAllocation,
    FleetTarget, SeedOptions, SeedReport, WeightedParams,
};
pub use transform::{CoordTransform, Equirectangular, Identity};
