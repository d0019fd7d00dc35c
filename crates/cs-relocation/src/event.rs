//! Relocation audit events and the observer that receives them.

use cs_core::{LinkId, OperatorId, SimTime, SiteId, TaskId, TripStatus, VehicleId};
use cs_fleet::FleetView;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RelocationEventKind {
    /// A vehicle joined a road train.
    Pickup,
    /// A candidate failed the energy gate; the pickup was aborted.
    PickupEnergyKo,
    /// The pickup failed for any other reason (no idle vehicle, unknown site).
    PickupKo,
    /// A carrying operator was redirected to collect more vehicles.
    Deferred,
    /// A vehicle was parked at the task site.
    Dropoff,
    /// The dropoff site lacked room; the vehicle stays in the road train.
    DropoffKo,
}

impl RelocationEventKind {
    pub fn as_str(self) -> &'static str {
        match self {
            RelocationEventKind::Pickup         => "pickup",
            RelocationEventKind::PickupEnergyKo => "pickup_energy_ko",
            RelocationEventKind::PickupKo       => "pickup_ko",
            RelocationEventKind::Deferred       => "deferred",
            RelocationEventKind::Dropoff        => "dropoff",
            RelocationEventKind::DropoffKo      => "dropoff_ko",
        }
    }

    pub fn is_failure(self) -> bool {
        matches!(
            self,
            RelocationEventKind::PickupEnergyKo
                | RelocationEventKind::PickupKo
                | RelocationEventKind::DropoffKo
        )
    }
}

impl std::fmt::Display for RelocationEventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One audit record.  Vehicle-level fields are `None` for task-level events.
#[derive(Debug, Clone, PartialEq)]
pub struct RelocationEvent {
    pub time:    SimTime,
    pub kind:    RelocationEventKind,
    pub task:    TaskId,
    pub site:    SiteId,
    pub link:    LinkId,
    pub agent:   OperatorId,
    pub vehicle: Option<VehicleId>,
    pub status:  Option<TripStatus>,
    pub soc:     Option<f64>,
}

/// Callbacks invoked by [`RelocationEngine`](crate::RelocationEngine).
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
pub trait RelocationObserver {
    /// Called for every audit event, in emission order.
    fn on_event(&mut self, _event: &RelocationEvent) {}

    /// Called by the host at reporting intervals with read-only access to the
    /// inventory.
    fn on_snapshot(&mut self, _time: SimTime, _fleet: &dyn FleetView) {}

    /// Called once when the run ends.
    fn on_finish(&mut self, _time: SimTime) {}
}

/// A [`RelocationObserver`] that does nothing.
pub struct NoopObserver;

impl RelocationObserver for NoopObserver {}

/// Collects every event in memory.
#[derive(Default)]
pub struct EventLog {
    pub events: Vec<RelocationEvent>,
}

impl EventLog {
    pub fn of_kind(&self, kind: RelocationEventKind) -> impl Iterator<Item = &RelocationEvent> {
        self.events.iter().filter(move |e| e.kind == kind)
    }
}

impl RelocationObserver for EventLog {
    fn on_event(&mut self, event: &RelocationEvent) {
        self.events.push(event.clone());
    }
}
