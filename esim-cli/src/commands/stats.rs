use std::path::Path;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::CliError;

pub(crate) fn run_catalog_stats(db_path: &Path, recent_imports: u32) -> Result<(), CliError> {
    if !db_path.exists() {
        log::warn!("No catalog database found at {}", db_path.display());
        log::info!("Run 'esim-store import --commit' to create one.");
        return Ok(());
    }

    let conn = esim_db::open_database(db_path)
        .map_err(|e| CliError::database(format!("Failed to open catalog database: {}", e)))?;

    let stats = esim_db::catalog_stats(&conn)
        .map_err(|e| CliError::database(format!("Failed to query catalog stats: {}", e)))?;

    log::info!(
        "{}",
        "Plan Catalog Statistics".if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!("  Database: {}", db_path.display());
    crate::log_blank();
    log::info!("  Plans:          {:>8}", stats.plans);
    log::info!("  Active:         {:>8}", stats.active_plans);
    log::info!("  Uncategorized:  {:>8}", stats.uncategorized_plans);
    log::info!("  Categories:     {:>8}", stats.categories);
    log::info!("  Imports:        {:>8}", stats.imports);

    if recent_imports == 0 || stats.imports == 0 {
        return Ok(());
    }

    let logs = esim_db::list_import_logs(&conn, Some(recent_imports))
        .map_err(|e| CliError::database(format!("Failed to query import log: {}", e)))?;

    crate::log_blank();
    log::info!("{}", "Recent Imports".if_supports_color(Stdout, |t| t.bold()));
    for entry in &logs {
        log::info!(
            "  {}  {}  {} rows: {} created, {} updated, {} failed",
            entry.imported_at,
            entry.source_name,
            entry.rows_total,
            entry.plans_created,
            entry.plans_updated,
            entry.rows_failed,
        );
    }

    Ok(())
}
