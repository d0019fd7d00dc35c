//! Per-operator mode and drive state.

use cs_core::{Coord, SimTime};

/// The two modes of the relocation cycle.  There is no terminal mode.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum OperatorMode {
    /// Not holding a train, or redirected to collect more vehicles.
    #[default]
    ReadyToPickup,
    /// Holding a road train on its way to a dropoff site.
    Carrying,
}

impl OperatorMode {
    pub fn as_str(self) -> &'static str {
        match self {
            OperatorMode::ReadyToPickup => "ready_to_pickup",
            OperatorMode::Carrying      => "carrying",
        }
    }
}

/// The drive leg an operator is on.
///
/// Teleport-at-arrival: the operator stays at `from` until `arrival`, then
/// [`RelocationEngine::tick_arrivals`](crate::RelocationEngine::tick_arrivals)
/// places it at `to`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MovementState {
    pub in_transit: bool,
    pub from:       Coord,
    /// Equals `from` when `!in_transit`.
    pub to:         Coord,
    pub departure:  SimTime,
    pub arrival:    SimTime,
}

impl MovementState {
    #[inline]
    pub fn stationary(at: Coord, time: SimTime) -> Self {
        Self {
            in_transit: false,
            from:       at,
            to:         at,
            departure:  time,
            arrival:    time,
        }
    }

    /// Fraction of the leg completed at `now`, in `[0.0, 1.0]`.
    pub fn progress(&self, now: SimTime) -> f64 {
        let total = self.arrival - self.departure;
        if !self.in_transit || total <= 0.0 {
            return 1.0;
        }
        ((now - self.departure) / total).clamp(0.0, 1.0)
    }

    /// Linear interpolation between `from` and `to` at `now`.
    pub fn position(&self, now: SimTime) -> Coord {
        let t = self.progress(now);
        Coord::new(
            self.from.x + (self.to.x - self.from.x) * t,
            self.from.y + (self.to.y - self.from.y) * t,
        )
    }
}
