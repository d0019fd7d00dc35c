//! Vehicle-side trip status shared by the inventory and the operator engine.

/// What a shared vehicle is currently doing.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TripStatus {
    /// Parked at a site and available.
    #[default]
    Idle,
    /// Parked but reserved for a customer who is walking to the site.
    EnRouteToPickup,
    /// Driven by a customer.
    Rented,
    /// Held in an operator's road train.
    Relocating,
}

impl TripStatus {
    /// `true` while the vehicle is away from any site.
    #[inline]
    pub fn is_moving(self) -> bool {
        matches!(self, TripStatus::Rented | TripStatus::Relocating)
    }

    /// Label used in audit lines and CSV columns.
    pub fn as_str(self) -> &'static str {
        match self {
            TripStatus::Idle            => "idle",
            TripStatus::EnRouteToPickup => "en_route_to_pickup",
            TripStatus::Rented          => "rented",
            TripStatus::Relocating      => "relocating",
        }
    }
}

impl std::fmt::Display for TripStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
