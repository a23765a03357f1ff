//! The batch driver: validation gate, commit loop, and run bookkeeping.
//!
//! Nothing is written unless the operator asked for a commit. With a commit,
//! rows are processed strictly in file order, each in its own transaction, and
//! a failing row is recorded and skipped rather than aborting the run.

use std::borrow::Borrow;
use std::fmt;

use esim_catalog::types::ImportLog;
use esim_catalog::{CsvRow, FIRST_DATA_LINE, ValidationReport};
use esim_db::{Connection, operations};

use crate::ImportError;
use crate::category::{ResolvedCategory, resolve_category};
use crate::progress::{ImportProgress, LogProgress};
use crate::upsert::{UpsertOutcome, upsert_plan};

// ── Gate ────────────────────────────────────────────────────────────────────

/// What to do after validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate {
    /// Validation found errors and no commit was requested.
    Blocked,
    /// No commit was requested; report only.
    DryRun,
    /// Write rows to the catalog.
    Import,
}

/// Decide the next step from the validation error count and the commit flag.
///
/// A commit overrides validation errors; without one, errors block the run
/// and a clean run stops as a dry run.
pub fn gate(error_count: usize, commit: bool) -> Gate {
    match (commit, error_count) {
        (true, _) => Gate::Import,
        (false, 0) => Gate::DryRun,
        (false, _) => Gate::Blocked,
    }
}

/// Whether the run goes on to write rows.
pub fn should_proceed(error_count: usize, commit: bool) -> bool {
    gate(error_count, commit) == Gate::Import
}

// ── Run Results ─────────────────────────────────────────────────────────────

/// A row that was not written, with enough context to find it in the sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowFailure {
    pub row_number: usize,
    pub plan_name: String,
    pub plan_id: String,
    pub reason: String,
}

impl fmt::Display for RowFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Row {} failed (Plan Name: '{}', PlanId: '{}'): {}",
            self.row_number, self.plan_name, self.plan_id, self.reason
        )
    }
}

/// Statistics from a committed import run.
#[derive(Debug, Default)]
pub struct ImportStats {
    pub total_rows: u64,
    pub plans_created: u64,
    pub plans_updated: u64,
    pub categories_created: u64,
    /// Rows not written because they carry validation errors
    pub skipped_invalid: u64,
    /// Every unwritten row, skipped or failed, in file order
    pub failures: Vec<RowFailure>,
}

impl ImportStats {
    pub fn succeeded(&self) -> u64 {
        self.plans_created + self.plans_updated
    }

    pub fn failed(&self) -> u64 {
        self.failures.len() as u64
    }

    /// The closing line of a committed run.
    pub fn summary(&self) -> String {
        format!(
            "Import complete: {} successful, {} failed",
            self.succeeded(),
            self.failed()
        )
    }
}

/// How a batch run ended.
#[derive(Debug)]
pub enum BatchOutcome {
    /// Stopped by validation errors; nothing written.
    Blocked { errors: usize },
    /// Validation only; nothing written.
    DryRun,
    /// Rows were written.
    Completed(ImportStats),
}

// ── Commit Loop ─────────────────────────────────────────────────────────────

/// Run the gate and, when it allows, write every row.
///
/// `open_store` is called only when rows are actually going to be written, so
/// dry runs and blocked runs never touch the catalog. An owned handle it returns
/// is released before this function returns. A completed run is recorded in
/// the import log under `source_name`.
pub fn run_batch<S, F>(
    rows: &[CsvRow],
    report: &ValidationReport,
    commit: bool,
    source_name: &str,
    open_store: F,
    progress: Option<&dyn ImportProgress>,
) -> Result<BatchOutcome, ImportError>
where
    F: FnOnce() -> Result<S, ImportError>,
    S: Borrow<Connection>,
{
    let errors = report.error_count();
    match gate(errors, commit) {
        Gate::Blocked => Ok(BatchOutcome::Blocked { errors }),
        Gate::DryRun => Ok(BatchOutcome::DryRun),
        Gate::Import => {
            let store = open_store()?;
            let conn: &Connection = store.borrow();
            let stats = commit_rows(conn, rows, report, progress);
            if let Err(e) = log_import(conn, source_name, &stats) {
                log::warn!("Failed to log import: {}", e);
            }
            Ok(BatchOutcome::Completed(stats))
        }
    }
}

/// Write rows in file order, collecting per-row failures.
///
/// Rows with validation errors are skipped and counted as failures. Each
/// remaining row resolves its category and upserts its plan inside one
/// transaction; a row that fails leaves nothing behind. Without a `progress`
/// reporter, progress goes to the log.
pub fn commit_rows(
    conn: &Connection,
    rows: &[CsvRow],
    report: &ValidationReport,
    progress: Option<&dyn ImportProgress>,
) -> ImportStats {
    let progress: &dyn ImportProgress = progress.unwrap_or(&LogProgress);
    let mut stats = ImportStats {
        total_rows: rows.len() as u64,
        ..Default::default()
    };

    progress.on_phase(&format!("Importing {} rows", rows.len()));

    for (i, row) in rows.iter().enumerate() {
        let row_number = i + FIRST_DATA_LINE;

        let result = if report.row_has_errors(row_number) {
            stats.skipped_invalid += 1;
            Err("skipped: row failed validation".to_string())
        } else {
            import_row(conn, row).map_err(|e| e.to_string())
        };

        match result {
            Ok((outcome, category)) => {
                match outcome {
                    UpsertOutcome::Created(_) => stats.plans_created += 1,
                    UpsertOutcome::Updated(_) => stats.plans_updated += 1,
                }
                if category.is_some_and(|c| c.created) {
                    stats.categories_created += 1;
                }
                progress.on_row(i + 1, rows.len(), row, outcome);
            }
            Err(reason) => {
                let failure = RowFailure {
                    row_number,
                    plan_name: row.plan_name.clone(),
                    plan_id: row.plan_id.clone(),
                    reason,
                };
                progress.on_row_failed(&failure);
                stats.failures.push(failure);
            }
        }
    }

    progress.on_complete(&stats.summary());

    stats
}

/// Resolve the category and upsert the plan for one row, atomically.
fn import_row(
    conn: &Connection,
    row: &CsvRow,
) -> Result<(UpsertOutcome, Option<ResolvedCategory>), ImportError> {
    let tx = conn.unchecked_transaction()?;
    let category = resolve_category(&tx, &row.plan_category)?;
    let outcome = upsert_plan(&tx, row, category.map(|c| c.id))?;
    tx.commit()?;
    Ok((outcome, category))
}

/// Record a committed run in the import_log table.
pub fn log_import(
    conn: &Connection,
    source_name: &str,
    stats: &ImportStats,
) -> Result<i64, ImportError> {
    let entry = ImportLog {
        id: 0,
        source_name: source_name.to_string(),
        imported_at: chrono::Utc::now().to_rfc3339(),
        rows_total: stats.total_rows as i64,
        plans_created: stats.plans_created as i64,
        plans_updated: stats.plans_updated as i64,
        rows_failed: stats.failed() as i64,
        categories_created: stats.categories_created as i64,
    };
    let id = operations::insert_import_log(conn, &entry)?;
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_block_without_commit() {
        assert_eq!(gate(3, false), Gate::Blocked);
        assert!(!should_proceed(3, false));
    }

    #[test]
    fn clean_run_without_commit_is_dry() {
        assert_eq!(gate(0, false), Gate::DryRun);
        assert!(!should_proceed(0, false));
    }

    #[test]
    fn commit_overrides_errors() {
        assert_eq!(gate(0, true), Gate::Import);
        assert_eq!(gate(5, true), Gate::Import);
        assert!(should_proceed(5, true));
    }

    #[test]
    fn summary_counts_skips_as_failures() {
        let stats = ImportStats {
            plans_created: 1,
            plans_updated: 2,
            failures: vec![RowFailure {
                row_number: 3,
                plan_name: String::new(),
                plan_id: "X".to_string(),
                reason: "skipped: row failed validation".to_string(),
            }],
            ..Default::default()
        };
        assert_eq!(stats.summary(), "Import complete: 3 successful, 1 failed");
    }
}
