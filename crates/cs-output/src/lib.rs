//! `cs-output`: relocation audit writers.
//!
//! | Backend | Files created                                    |
//! |---------|--------------------------------------------------|
//! | CSV     | `relocation_events.csv`, `site_occupancy.csv`    |
//!
//! Backends implement [`OutputWriter`] and are driven by
//! [`RelocationOutputObserver`], which implements
//! `cs_relocation::RelocationObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use cs_output::{CsvWriter, RelocationOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = RelocationOutputObserver::new(writer);
//! engine.process_dropoff(&mut fleet, time, &task, &mut obs);
//! obs.on_finish(time);
//! if let Some(e) = obs.take_error() { eprintln!("output error: {e}"); }
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;


pub use self::csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::RelocationOutputObserver;
pub use row::{RelocationEventRow, SiteOccupancyRow};
pub use writer::OutputWriter;
