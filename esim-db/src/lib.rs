//! SQLite persistence layer for the plan catalog.
//!
//! Provides schema creation, write operations, and query APIs
//! backed by SQLite (via rusqlite with bundled feature).

pub mod operations;
pub mod queries;
pub mod schema;

pub use operations::{
    OperationError, find_category_by_name, find_plan_by_plan_id, find_plan_by_slug,
    insert_category, insert_import_log, insert_plan, update_plan,
};
pub use queries::{
    CatalogStats, catalog_stats, get_plan, list_categories, list_import_logs, list_plans,
};
pub use rusqlite::Connection;
pub use schema::{SchemaError, open_database, open_memory};
