//! Path-cost oracle for the drive portion of an itinerary.
//!
//! # Pluggability
//!
//! Shortest-path routing belongs to the host simulation.  The engine only
//! calls [`PathOracle::drive`], so hosts plug in their own network router.
//! [`BeelineOracle`] is a straight-line stand-in for tests and demos.

use cs_core::{Coord, SimTime};

use crate::SpatialError;

/// A costed drive leg between two points.
#[derive(Debug, Clone, PartialEq)]
pub struct DriveLeg {
    pub from:        Coord,
    pub to:          Coord,
    pub departure:   SimTime,
    pub travel_secs: f64,
    pub distance_m:  f64,
}

impl DriveLeg {
    #[inline]
    pub fn arrival(&self) -> SimTime {
        self.departure + self.travel_secs
    }
}

/// Host-provided travel-time oracle.
///
/// Implementations must be `Send + Sync` so one oracle can be shared by
/// every operator and matcher.
pub trait PathOracle: Send + Sync {
    fn drive(&self, from: Coord, to: Coord, departure: SimTime) -> Result<DriveLeg, SpatialError>;
}

/// Straight-line drive at a constant speed with a detour factor.
#[derive(Debug, Clone, Copy)]
pub struct BeelineOracle {
    pub speed_mps:     f64,
    pub detour_factor: f64,
}

impl Default for BeelineOracle {
    /// 30 km/h urban average, 1.3 detour.
    fn default() -> Self {
        Self { speed_mps: 30.0 / 3.6, detour_factor: 1.3 }
    }
}

impl PathOracle for BeelineOracle {
    fn drive(&self, from: Coord, to: Coord, departure: SimTime) -> Result<DriveLeg, SpatialError> {
        if self.speed_mps <= 0.0 {
            return Err(SpatialError::NoRoute { from, to });
        }
        let distance_m = from.distance(to) * self.detour_factor;
        Ok(DriveLeg {
            from,
            to,
            departure,
            travel_secs: distance_m / self.speed_mps,
            distance_m,
        })
    }
}
