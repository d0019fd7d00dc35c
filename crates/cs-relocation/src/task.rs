//! Relocation work orders.

use cs_core::{OperatorId, SiteId, TaskId};

/// One pickup or dropoff order for one operator.
///
/// Tasks are created by the host's relocation planner and handed to
/// [`RelocationEngine::process_pickup`](crate::RelocationEngine::process_pickup)
/// or [`process_dropoff`](crate::RelocationEngine::process_dropoff) once.
#[derive(Debug, Clone, PartialEq)]
pub struct RelocationTask {
    pub id:    TaskId,
    /// Site to pick up from or drop off at.
    pub site:  SiteId,
    /// Operator executing the task.
    pub agent: OperatorId,
    /// Requested road-train length (pickup only).
    pub size:  usize,
    /// Distance of the carry leg that follows the pickup, metres.  Gates the
    /// energy check at pickup and is discharged at dropoff.
    pub distance_m: f64,
}

impl RelocationTask {
    pub fn new(id: TaskId, site: SiteId, agent: OperatorId, size: usize, distance_m: f64) -> Self {
        Self { id, site, agent, size, distance_m }
    }
}
