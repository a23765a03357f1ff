//! CLI type definitions: command enums and argument structs.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "esim-store")]
#[command(about = "Manage the eSIM storefront plan catalog", long_about = None)]
pub(crate) struct Cli {
    /// Catalog database path
    #[arg(long, global = true, env = "ESIM_STORE_DB")]
    pub db: Option<PathBuf>,

    /// Only show warnings and errors (suppress normal output)
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Verbose output: per-row import markers, warning details, debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Validate a plan pricing CSV and optionally import it into the catalog
    Import {
        /// CSV file to import (defaults to the standard pricing export names)
        file: Option<PathBuf>,

        /// Write to the catalog. Without this flag the run only validates,
        /// and with it rows are imported even if validation found errors
        #[arg(long)]
        commit: bool,
    },

    /// Show catalog statistics and recent imports
    Stats {
        /// Number of recent imports to show
        #[arg(long, default_value_t = 5)]
        imports: u32,
    },

    /// List plans in the catalog
    Plans {
        /// Only show plans in this category
        #[arg(short, long)]
        category: Option<String>,

        /// Maximum number of plans to list
        #[arg(short, long, default_value_t = 50)]
        limit: u32,
    },
}
