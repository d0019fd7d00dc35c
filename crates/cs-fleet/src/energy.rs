//! Battery state and the consumption/feasibility arithmetic.
//!
//! # Consumption model
//!
//! ```text
//! kwh_per_km = base_kwh_per_km + speed_kwh_per_km × (avg_speed / max_speed)²
//! energy     = distance_km × kwh_per_km
//! ```
//!
//! The model is deterministic (no randomness) and monotone in distance.
//! [`Battery::is_charged_enough`] is defined directly in terms of
//! [`Battery::energy_for_consumption`] so the two can never disagree.

/// Per-type consumption curve.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConsumptionCurve {
    /// Consumption at walking pace, kWh per km.
    pub base_kwh_per_km: f64,
    /// Extra consumption when driving at `max_speed`, kWh per km.
    pub speed_kwh_per_km: f64,
}

impl ConsumptionCurve {
    pub fn kwh_per_km(&self, max_speed: f64, avg_speed: f64) -> f64 {
        if max_speed <= 0.0 {
            return self.base_kwh_per_km;
        }
        let ratio = (avg_speed / max_speed).clamp(0.0, 1.0);
        self.base_kwh_per_km + self.speed_kwh_per_km * ratio * ratio
    }
}

impl Default for ConsumptionCurve {
    fn default() -> Self {
        Self { base_kwh_per_km: 0.12, speed_kwh_per_km: 0.06 }
    }
}

/// Performance attributes shared by all vehicles of one type.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VehicleType {
    pub name: String,
    /// Maximum velocity in m/s.  The relocation gate uses it as both the
    /// maximum and the average speed of a carry leg.
    pub max_velocity_mps: f64,
    pub battery_kwh: f64,
    pub consumption: ConsumptionCurve,
}

impl VehicleType {
    /// A fresh battery of this type at state of charge `soc`.
    pub fn battery(&self, soc: f64) -> Battery {
        Battery::new(self.battery_kwh, soc, self.consumption)
    }
}

impl Default for VehicleType {
    /// Small urban EV.
    fn default() -> Self {
        Self {
            name:             "ev".to_owned(),
            max_velocity_mps: 130.0 / 3.6,
            battery_kwh:      24.0,
            consumption:      ConsumptionCurve::default(),
        }
    }
}

/// Battery state of one vehicle.
///
/// SoC is normalised to `[0, 1]` and only ever decreases through
/// [`discharge`](Self::discharge); charging is outside this engine.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Battery {
    capacity_kwh: f64,
    soc:          f64,
    curve:        ConsumptionCurve,
}

impl Battery {
    pub fn new(capacity_kwh: f64, soc: f64, curve: ConsumptionCurve) -> Self {
        Self {
            capacity_kwh: capacity_kwh.max(0.0),
            soc:          soc.clamp(0.0, 1.0),
            curve,
        }
    }

    #[inline]
    pub fn soc(&self) -> f64 {
        self.soc
    }

    #[inline]
    pub fn capacity_kwh(&self) -> f64 {
        self.capacity_kwh
    }

    /// Remaining energy in kWh.
    #[inline]
    pub fn available_kwh(&self) -> f64 {
        self.soc * self.capacity_kwh
    }

    /// Energy in kWh needed to drive `distance_m`.
    pub fn energy_for_consumption(&self, distance_m: f64, max_speed: f64, avg_speed: f64) -> f64 {
        (distance_m.max(0.0) / 1_000.0) * self.curve.kwh_per_km(max_speed, avg_speed)
    }

    /// `true` iff the trip's consumption fits in the remaining energy.
    pub fn is_charged_enough(&self, distance_m: f64, max_speed: f64, avg_speed: f64) -> bool {
        self.energy_for_consumption(distance_m, max_speed, avg_speed) <= self.available_kwh()
    }

    /// Remove `kwh` from the battery.  SoC saturates at zero.
    pub fn discharge(&mut self, kwh: f64) {
        if self.capacity_kwh <= 0.0 || kwh <= 0.0 {
            return;
        }
        self.soc = (self.soc - kwh / self.capacity_kwh).max(0.0);
    }
}
