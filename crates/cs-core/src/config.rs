//! Fleet-wide configuration.
//!
//! Typically deserialized from JSON by the application (feature `serde`) and
//! passed by reference to the matcher and the seeding routines.  `Default`
//! holds the values used when the host scenario provides no carsharing
//! section.

use crate::{CsError, CsResult};

/// Beeline model for a walk leg: `distance = euclid × distance_factor`,
/// `time = euclid × secs_per_m`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BeelineParams {
    /// Detour factor applied to the straight-line distance.
    pub distance_factor: f64,
    /// Walking pace in seconds per straight-line metre.
    pub secs_per_m: f64,
}

impl Default for BeelineParams {
    fn default() -> Self {
        // 3 km/h walking speed.
        Self { distance_factor: 1.3, secs_per_m: 3.6 / 3.0 }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FleetConfig {
    /// Radius of the disk query around a trip origin/destination, metres.
    pub search_distance_m: f64,

    /// Walk from the trip origin to the access site.
    pub access_walk: BeelineParams,

    /// Walk from the egress site to the trip destination.
    pub egress_walk: BeelineParams,

    /// Dwell time of the station interaction activity (unlock, check-in).
    pub interaction_offset_secs: f64,

    /// Station capacity when a raw station file has no `capacity` column.
    pub default_site_capacity: u32,

    /// Lower bound on any site capacity assigned by coefficient seeding.
    pub coefficient_floor_capacity: u32,

    /// Master seed for `SimRng`.
    pub seed: u64,
}

impl Default for FleetConfig {
    fn default() -> Self {
        Self {
            search_distance_m:          200.0,
            access_walk:                BeelineParams::default(),
            egress_walk:                BeelineParams::default(),
            interaction_offset_secs:    60.0,
            default_site_capacity:      20,
            coefficient_floor_capacity: 1,
            seed:                       42,
        }
    }
}

impl FleetConfig {
    /// Reject values that would make the matcher or the seeding meaningless.
    pub fn validate(&self) -> CsResult<()> {
        if !non_negative(self.search_distance_m) {
            return Err(CsError::Config(format!(
                "search_distance_m must be a non-negative number, got {}",
                self.search_distance_m
            )));
        }
        for (what, p) in [("access_walk", &self.access_walk), ("egress_walk", &self.egress_walk)] {
            if !(non_negative(p.distance_factor) && non_negative(p.secs_per_m)) {
                return Err(CsError::Config(format!("{what} parameters must be non-negative")));
            }
        }
        if !non_negative(self.interaction_offset_secs) {
            return Err(CsError::Config("interaction_offset_secs must be non-negative".into()));
        }
        Ok(())
    }
}

/// Finite and `>= 0`; NaN fails.
fn non_negative(x: f64) -> bool {
    x.is_finite() && x >= 0.0
}
