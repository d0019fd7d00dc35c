//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `relocation_events.csv`
//! - `site_occupancy.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{OutputResult, RelocationEventRow, SiteOccupancyRow};

pub const EVENTS_FILE: &str = "relocation_events.csv";
pub const OCCUPANCY_FILE: &str = "site_occupancy.csv";

pub struct CsvWriter {
    events:    Writer<File>,
    occupancy: Writer<File>,
    finished:  bool,
}

impl CsvWriter {
    /// Create the two CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut events = Writer::from_path(dir.join(EVENTS_FILE))?;
        events.write_record(["time", "kind", "task", "site", "link", "agent", "vehicle", "status", "soc"])?;

        let mut occupancy = Writer::from_path(dir.join(OCCUPANCY_FILE))?;
        occupancy.write_record(["time", "site", "parked", "capacity", "idle"])?;

        Ok(Self { events, occupancy, finished: false })
    }
}

/// Empty string for the `u32::MAX` sentinel.
fn id_field(id: u32) -> String {
    if id == u32::MAX { String::new() } else { id.to_string() }
}

impl OutputWriter for CsvWriter {
    fn write_event(&mut self, row: &RelocationEventRow) -> OutputResult<()> {
        self.events.write_record(&[
            format!("{:.0}", row.time_secs),
            row.kind.to_owned(),
            row.task.to_string(),
            row.site.to_string(),
            id_field(row.link),
            row.agent.to_string(),
            id_field(row.vehicle),
            row.status.to_owned(),
            if row.soc.is_nan() { String::new() } else { format!("{:.4}", row.soc) },
        ])?;
        Ok(())
    }

    fn write_occupancy(&mut self, rows: &[SiteOccupancyRow]) -> OutputResult<()> {
        for row in rows {
            self.occupancy.write_record(&[
                row.time_secs.to_string(),
                row.site.to_string(),
                row.parked.to_string(),
                row.capacity.to_string(),
                row.idle.to_string(),
            ])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.events.flush()?;
        self.occupancy.flush()?;
        Ok(())
    }
}
