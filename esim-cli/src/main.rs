//! esim-store CLI
//!
//! Command-line interface for importing and inspecting the eSIM plan catalog.

mod cli_types;
mod commands;
mod error;

use std::io::Write;
use std::process::ExitCode;

use clap::Parser;
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use cli_types::{Cli, Commands};
use commands::default_catalog_db_path;
pub(crate) use error::CliError;

/// Log target for run summaries that `--quiet` does not suppress.
pub(crate) const SUMMARY_TARGET: &str = "esim_store::summary";

/// Emit an empty line through the logger so quiet mode suppresses it too.
pub(crate) fn log_blank() {
    log::info!("");
}

/// Route `log` output to stdout. Info lines are printed bare; warnings and
/// errors get a colored level prefix. `RUST_LOG` can still override filters.
fn logger_builder(verbose: bool, quiet: bool) -> env_logger::Builder {
    let level = if quiet {
        log::LevelFilter::Warn
    } else if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(level)
        .filter_module(SUMMARY_TARGET, level.max(log::LevelFilter::Info))
        .parse_default_env()
        .target(env_logger::Target::Stdout)
        .format(|buf, record| match record.level() {
            log::Level::Info => writeln!(buf, "{}", record.args()),
            log::Level::Warn => writeln!(
                buf,
                "{} {}",
                "warning:".if_supports_color(Stdout, |t| t.yellow()),
                record.args()
            ),
            log::Level::Error => writeln!(
                buf,
                "{} {}",
                "error:".if_supports_color(Stdout, |t| t.red()),
                record.args()
            ),
            _ => writeln!(
                buf,
                "{}",
                record.args().if_supports_color(Stdout, |t| t.dimmed())
            ),
        });
    builder
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logger_builder(cli.verbose, cli.quiet).init();

    let db_path = cli.db.unwrap_or_else(default_catalog_db_path);

    let result = match cli.command {
        Commands::Import { file, commit } => {
            commands::import::run_import(file, commit, db_path, cli.verbose)
        }
        Commands::Stats { imports } => {
            commands::stats::run_catalog_stats(&db_path, imports).map(|()| true)
        }
        Commands::Plans { category, limit } => {
            commands::plans::run_list_plans(&db_path, category.as_deref(), limit).map(|()| true)
        }
    };

    match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            log::error!("Fatal error: {}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use log::{Level, Log, Metadata};

    use super::*;

    fn enabled(logger: &env_logger::Logger, target: &str, level: Level) -> bool {
        logger.enabled(&Metadata::builder().target(target).level(level).build())
    }

    #[test]
    fn quiet_keeps_summaries_and_warnings() {
        let logger = logger_builder(false, true).build();
        assert!(enabled(&logger, SUMMARY_TARGET, Level::Info));
        assert!(enabled(&logger, "esim_store::commands::import", Level::Warn));
        assert!(!enabled(&logger, "esim_store::commands::import", Level::Info));
    }

    #[test]
    fn verbose_enables_debug_everywhere() {
        let logger = logger_builder(true, false).build();
        assert!(enabled(&logger, SUMMARY_TARGET, Level::Debug));
        assert!(enabled(&logger, "esim_store::commands::import", Level::Debug));
    }
}
