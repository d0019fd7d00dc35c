//! `RelocationOutputObserver<W>`: bridges `RelocationObserver` to an `OutputWriter`.

use cs_core::{SimTime, TripStatus};
use cs_fleet::FleetView;
use cs_relocation::{RelocationEvent, RelocationObserver};

use crate::row::{RelocationEventRow, SiteOccupancyRow};
use crate::writer::OutputWriter;
use crate::OutputError;

/// A [`RelocationObserver`] that writes every audit event and occupancy
/// snapshot to an [`OutputWriter`] backend.
///
/// Errors from the writer are stored internally because observer methods
/// have no return value.  After the run, check with
/// [`take_error`][Self::take_error].
pub struct RelocationOutputObserver<W: OutputWriter> {
    writer:     W,
    events:     u64,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> RelocationOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, events: 0, last_error: None }
    }

    /// Take the stored write error (if any).  `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Number of events handed to the writer.
    pub fn event_count(&self) -> u64 {
        self.events
    }

    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: crate::OutputResult<()>) {
        if let Err(e) = result {
            log::error!("output write failed: {e}");
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> RelocationObserver for RelocationOutputObserver<W> {
    fn on_event(&mut self, event: &RelocationEvent) {
        self.events += 1;
        let result = self.writer.write_event(&RelocationEventRow::from(event));
        self.store_err(result);
    }

    fn on_snapshot(&mut self, time: SimTime, fleet: &dyn FleetView) {
        let rows: Vec<SiteOccupancyRow> = fleet
            .sites()
            .iter()
            .map(|s| SiteOccupancyRow {
                time_secs: time.whole_secs(),
                site:      s.id().0,
                parked:    s.occupancy(),
                capacity:  s.capacity(),
                idle:      s
                    .parking()
                    .iter()
                    .filter(|&&v| fleet.vehicle(v).is_some_and(|v| v.status() == TripStatus::Idle))
                    .count() as u32,
            })
            .collect();

        if !rows.is_empty() {
            let result = self.writer.write_occupancy(&rows);
            self.store_err(result);
        }
    }

    fn on_finish(&mut self, _time: SimTime) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
