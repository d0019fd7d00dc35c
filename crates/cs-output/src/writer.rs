//! The `OutputWriter` trait implemented by backend writers.

use crate::{OutputResult, RelocationEventRow, SiteOccupancyRow};

/// All methods are infallible from the observer's perspective: errors are
/// stored internally and retrieved with
/// [`RelocationOutputObserver::take_error`](crate::RelocationOutputObserver::take_error).
pub trait OutputWriter {
    fn write_event(&mut self, row: &RelocationEventRow) -> OutputResult<()>;

    /// Write one row per site.
    fn write_occupancy(&mut self, rows: &[SiteOccupancyRow]) -> OutputResult<()>;

    /// Flush all underlying file handles.
    ///
    /// Idempotent: safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
