use std::path::{Path, PathBuf};

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use esim_catalog::{CsvRow, ValidationReport, validate_rows};
use esim_import::{BatchOutcome, ImportProgress, RowFailure, UpsertOutcome, run_batch};

use crate::{CliError, SUMMARY_TARGET};

/// Per-row terminal output for a committed import.
struct CliImportProgress {
    verbose: bool,
}

impl ImportProgress for CliImportProgress {
    fn on_row(&self, current: usize, total: usize, row: &CsvRow, outcome: UpsertOutcome) {
        if !self.verbose {
            return;
        }
        let action = match outcome {
            UpsertOutcome::Created(_) => "created",
            UpsertOutcome::Updated(_) => "updated",
        };
        log::info!(
            "  {} [{}/{}] {} ({})",
            "\u{2714}".if_supports_color(Stdout, |t| t.green()),
            current,
            total,
            row.plan_name,
            action,
        );
    }

    fn on_row_failed(&self, failure: &RowFailure) {
        log::warn!(
            "  {} {}",
            "\u{2718}".if_supports_color(Stdout, |t| t.red()),
            failure,
        );
    }

    fn on_phase(&self, message: &str) {
        log::info!("{}", message.if_supports_color(Stdout, |t| t.bold()));
    }

    fn on_complete(&self, message: &str) {
        crate::log_blank();
        log::info!(
            target: SUMMARY_TARGET,
            "{}",
            message.if_supports_color(Stdout, |t| t.bold())
        );
    }
}

/// Validate the pricing spreadsheet and, with `commit`, write it to the catalog.
///
/// Returns `Ok(false)` when validation errors stopped the run.
pub(crate) fn run_import(
    file: Option<PathBuf>,
    commit: bool,
    db_path: PathBuf,
    verbose: bool,
) -> Result<bool, CliError> {
    let cwd = std::env::current_dir()?;
    let csv_path = esim_import::resolve_csv_path(file.as_deref(), &cwd)?;
    log::info!("Reading {}", csv_path.display());

    let rows = esim_import::read_plan_csv(&csv_path)?;
    log::info!("Parsed {} rows", rows.len());

    let report = validate_rows(&rows);
    print_report(&report, verbose);

    let progress = CliImportProgress { verbose };
    let source_name = source_name(&csv_path);
    let outcome = run_batch(
        &rows,
        &report,
        commit,
        &source_name,
        || {
            log::debug!("Opening catalog database at {}", db_path.display());
            Ok(esim_db::open_database(&db_path)?)
        },
        Some(&progress),
    )?;

    match outcome {
        BatchOutcome::Blocked { errors } => {
            crate::log_blank();
            log::error!(
                "Validation failed with {} error{}",
                errors,
                if errors == 1 { "" } else { "s" },
            );
            log::info!(target: SUMMARY_TARGET, "Use --commit to import despite errors");
            Ok(false)
        }
        BatchOutcome::DryRun => {
            crate::log_blank();
            log::info!(
                target: SUMMARY_TARGET,
                "{} Dry run complete. Use --commit to write {} rows to the catalog.",
                "\u{2714}".if_supports_color(Stdout, |t| t.green()),
                rows.len(),
            );
            Ok(true)
        }
        BatchOutcome::Completed(stats) => {
            log::info!("  Plans created:      {:>6}", stats.plans_created);
            log::info!("  Plans updated:      {:>6}", stats.plans_updated);
            log::info!("  Categories created: {:>6}", stats.categories_created);
            if stats.skipped_invalid > 0 {
                log::info!("  Skipped (invalid):  {:>6}", stats.skipped_invalid);
            }
            log::info!("  Database: {}", db_path.display());
            Ok(true)
        }
    }
}

fn print_report(report: &ValidationReport, verbose: bool) {
    log::info!(
        target: SUMMARY_TARGET,
        "Validation complete: {} rows, {} errors, {} warnings",
        report.rows,
        report.error_count(),
        report.warning_count(),
    );

    if report.error_count() > 0 {
        crate::log_blank();
        log::info!("{}", "Errors:".if_supports_color(Stdout, |t| t.red()));
        for issue in report.errors() {
            log::info!("  {}", issue);
        }
    }

    if report.warning_count() > 0 {
        if verbose {
            crate::log_blank();
            log::info!("{}", "Warnings:".if_supports_color(Stdout, |t| t.yellow()));
            for issue in report.warnings() {
                log::info!("  {}", issue);
            }
        } else {
            log::info!("  (use --verbose to list warnings)");
        }
    }
}

/// File name recorded in the import log.
fn source_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
