//! Strongly typed, zero-cost identifier wrappers.
//!
//! Every entity in the engine lives in an arena (`Vec`) and is addressed by
//! one of these ids.  Relationships (site → parked vehicles, operator → held
//! road train) are stored as id lists, never as references, so there is no
//! cyclic ownership between sites, vehicles and operators.

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Sentinel meaning "no valid ID".
            pub const INVALID: $name = $name(<$inner>::MAX);

            /// Cast to `usize` for direct use as an arena index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }

            #[inline(always)]
            pub fn is_valid(self) -> bool {
                self != Self::INVALID
            }
        }

        impl Default for $name {
            /// Returns the `INVALID` sentinel so uninitialized IDs are visibly invalid.
            #[inline(always)]
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl From<$name> for usize {
            #[inline(always)]
            fn from(id: $name) -> usize {
                id.0 as usize
            }
        }

        impl TryFrom<usize> for $name {
            type Error = std::num::TryFromIntError;
            fn try_from(n: usize) -> Result<$name, Self::Error> {
                <$inner>::try_from(n).map($name)
            }
        }
    };
}

typed_id! {
    /// Index of a docking site in the fleet arena.
    pub struct SiteId(u32);
}

typed_id! {
    /// Index of a shared vehicle in the fleet arena.
    pub struct VehicleId(u32);
}

typed_id! {
    /// Index of a vehicle type (performance + consumption profile).
    pub struct VehicleTypeId(u16);
}

typed_id! {
    /// Index of a relocation operator.
    pub struct OperatorId(u32);
}

typed_id! {
    /// Identity of a relocation task issued by the rebalancing policy.
    pub struct TaskId(u32);
}

typed_id! {
    /// Host-network link a site is attached to.  Only used for audit output.
    pub struct LinkId(u32);
}

typed_id! {
    /// Identity of a customer booking.
    pub struct BookingId(u32);
}

typed_id! {
    /// Host-simulation customer (person) identity.
    pub struct CustomerId(u32);
}
