//! Bulk import of the plan pricing spreadsheet into the catalog database.
//!
//! This crate owns the ETL pipeline: locating and parsing the CSV, gating on
//! validation results, resolving categories, and upserting plans.

pub mod batch;
pub mod category;
pub mod csv_source;
mod error;
pub mod progress;
pub mod upsert;

pub use batch::{
    BatchOutcome, Gate, ImportStats, RowFailure, commit_rows, gate, log_import, run_batch,
    should_proceed,
};
pub use category::{ResolvedCategory, resolve_category};
pub use csv_source::{
    FALLBACK_FILENAMES, candidate_paths, parse_plan_csv, read_plan_csv, resolve_csv_path,
};
pub use error::ImportError;
pub use progress::{ImportProgress, LogProgress};
pub use upsert::{PlanIdentity, PlanLookup, UpsertOutcome, resolve_identity, upsert_plan};
