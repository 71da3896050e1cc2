//! The `OutputWriter` trait implemented by all backend writers.

use crate::{OccupancyRow, OutputResult, TickSummaryRow};

/// Trait implemented by output backends.
///
/// Errors surface to [`SimOutputObserver`][crate::SimOutputObserver], which
/// stores them for retrieval with `take_error`.
pub trait OutputWriter {
    /// Write a batch of occupancy rows.
    fn write_snapshots(&mut self, rows: &[OccupancyRow]) -> OutputResult<()>;

    /// Write one tick summary row.
    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent — safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
