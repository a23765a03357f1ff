//! Import progress reporting.

use esim_catalog::CsvRow;

use crate::batch::RowFailure;
use crate::upsert::UpsertOutcome;

/// Trait for receiving import progress updates.
pub trait ImportProgress {
    /// Called after each row is written.
    fn on_row(&self, current: usize, total: usize, row: &CsvRow, outcome: UpsertOutcome);

    /// Called when a row is skipped or its write fails.
    fn on_row_failed(&self, failure: &RowFailure);

    /// Called when a phase starts (e.g., "Importing 120 rows").
    fn on_phase(&self, message: &str);

    /// Called when the import is complete.
    fn on_complete(&self, message: &str);
}

/// The default reporter: every 100th row, failures, and phase messages go to
/// the `log` crate.
pub struct LogProgress;

impl ImportProgress for LogProgress {
    fn on_row(&self, current: usize, total: usize, row: &CsvRow, _outcome: UpsertOutcome) {
        if current.is_multiple_of(100) || current == total {
            log::info!("  [{}/{}] {}", current, total, row.plan_name);
        }
    }

    fn on_row_failed(&self, failure: &RowFailure) {
        log::warn!("{}", failure);
    }

    fn on_phase(&self, message: &str) {
        log::info!("{}", message);
    }

    fn on_complete(&self, message: &str) {
        log::info!("{}", message);
    }
}
