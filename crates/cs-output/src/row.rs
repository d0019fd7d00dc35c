//! Plain data row types written by output backends.

use cs_relocation::RelocationEvent;

/// One relocation audit line, flattened to primitive columns.
#[derive(Debug, Clone, PartialEq)]
pub struct RelocationEventRow {
    pub time_secs: f64,
    pub kind:      &'static str,
    pub task:      u32,
    pub site:      u32,
    /// `u32::MAX` when the site has no link.
    pub link:      u32,
    pub agent:     u32,
    /// `u32::MAX` for task-level events.
    pub vehicle:   u32,
    /// Empty for task-level events.
    pub status:    &'static str,
    /// `NaN` for task-level events.
    pub soc:       f64,
}

impl From<&RelocationEvent> for RelocationEventRow {
    fn from(e: &RelocationEvent) -> Self {
        Self {
            time_secs: e.time.secs(),
            kind:      e.kind.as_str(),
            task:      e.task.0,
            site:      e.site.0,
            link:      e.link.0,
            agent:     e.agent.0,
            vehicle:   e.vehicle.map_or(u32::MAX, |v| v.0),
            status:    e.status.map_or("", |s| s.as_str()),
            soc:       e.soc.unwrap_or(f64::NAN),
        }
    }
}

/// Occupancy of one site at a reporting instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SiteOccupancyRow {
    pub time_secs: i64,
    pub site:      u32,
    pub parked:    u32,
    pub capacity:  u32,
    /// Parked vehicles with status `Idle`.
    pub idle:      u32,
}
