//! Read queries for the catalog database.
//!
//! Provides plan lookup and listing, category listing, import history, and
//! summary statistics.

use esim_catalog::types::*;
use rusqlite::{Connection, params};

use crate::operations::OperationError;

const PLAN_COLUMNS: &str = "id, plan_id, slug, plan_name, price, gbs, days, pre_activation_days,
     location_name, country_name, country_codes, plan_type, csv_type, plan_category,
     sms, reloadable, operators, proposed_price_usd, our_cost, applied_markup_pct,
     features, status, max_speed, activation_type, is_esim_enabled, is_popular,
     stock_quantity, category_id, created_at, updated_at";

// ── Plan Lookups ────────────────────────────────────────────────────────────

/// Load a plan by row ID.
pub fn get_plan(conn: &Connection, id: i64) -> Result<Option<Plan>, OperationError> {
    let mut stmt = conn.prepare(&format!("SELECT {PLAN_COLUMNS} FROM plans WHERE id = ?1"))?;
    let result = stmt.query_row(params![id], row_to_plan);
    match result {
        Ok(p) => Ok(Some(p)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// List plans ordered by name, optionally restricted to one category name.
pub fn list_plans(
    conn: &Connection,
    category: Option<&str>,
    limit: Option<u32>,
) -> Result<Vec<Plan>, OperationError> {
    let limit = limit.unwrap_or(100);
    let rows = match category {
        Some(name) => {
            let mut stmt = conn.prepare(&format!(
                "SELECT {PLAN_COLUMNS} FROM plans
                 WHERE category_id = (SELECT id FROM plan_categories WHERE name = ?1)
                 ORDER BY plan_name LIMIT {limit}"
            ))?;
            let plans = stmt
                .query_map(params![name], row_to_plan)?
                .collect::<Result<Vec<_>, _>>()?;
            plans
        }
        None => {
            let mut stmt = conn.prepare(&format!(
                "SELECT {PLAN_COLUMNS} FROM plans ORDER BY plan_name LIMIT {limit}"
            ))?;
            let plans = stmt
                .query_map([], row_to_plan)?
                .collect::<Result<Vec<_>, _>>()?;
            plans
        }
    };
    Ok(rows)
}

// ── Category Queries ────────────────────────────────────────────────────────

/// List all categories by name.
pub fn list_categories(conn: &Connection) -> Result<Vec<PlanCategory>, OperationError> {
    let mut stmt = conn.prepare(
        "SELECT id, name, is_active, created_at FROM plan_categories ORDER BY name",
    )?;
    let rows = stmt.query_map([], |row| {
        Ok(PlanCategory {
            id: row.get(0)?,
            name: row.get(1)?,
            is_active: row.get(2)?,
            created_at: row.get(3)?,
        })
    })?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

// ── Statistics ──────────────────────────────────────────────────────────────

/// Get overall catalog statistics.
pub fn catalog_stats(conn: &Connection) -> Result<CatalogStats, OperationError> {
    let plans: i64 = conn.query_row("SELECT COUNT(*) FROM plans", [], |r| r.get(0))?;
    let active_plans: i64 = conn.query_row(
        "SELECT COUNT(*) FROM plans WHERE status = 'ACTIVE'",
        [],
        |r| r.get(0),
    )?;
    let uncategorized: i64 = conn.query_row(
        "SELECT COUNT(*) FROM plans WHERE category_id IS NULL",
        [],
        |r| r.get(0),
    )?;
    let categories: i64 =
        conn.query_row("SELECT COUNT(*) FROM plan_categories", [], |r| r.get(0))?;
    let imports: i64 = conn.query_row("SELECT COUNT(*) FROM import_log", [], |r| r.get(0))?;

    Ok(CatalogStats {
        plans,
        active_plans,
        uncategorized_plans: uncategorized,
        categories,
        imports,
    })
}

/// Summary statistics for the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogStats {
    pub plans: i64,
    pub active_plans: i64,
    pub uncategorized_plans: i64,
    pub categories: i64,
    pub imports: i64,
}

// ── Import Log Queries ──────────────────────────────────────────────────────

/// List recent import logs, newest first.
pub fn list_import_logs(
    conn: &Connection,
    limit: Option<u32>,
) -> Result<Vec<ImportLog>, OperationError> {
    let limit = limit.unwrap_or(20);
    let mut stmt = conn.prepare(&format!(
        "SELECT id, source_name, imported_at, rows_total, plans_created, plans_updated,
                rows_failed, categories_created
         FROM import_log ORDER BY imported_at DESC, id DESC LIMIT {limit}"
    ))?;
    let rows = stmt.query_map([], |row| {
        Ok(ImportLog {
            id: row.get(0)?,
            source_name: row.get(1)?,
            imported_at: row.get(2)?,
            rows_total: row.get(3)?,
            plans_created: row.get(4)?,
            plans_updated: row.get(5)?,
            rows_failed: row.get(6)?,
            categories_created: row.get(7)?,
        })
    })?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

// ── Row Mapping Helpers ─────────────────────────────────────────────────────

fn row_to_plan(row: &rusqlite::Row<'_>) -> rusqlite::Result<Plan> {
    let features_json: String = row.get(20)?;
    let features: Vec<String> = serde_json::from_str(&features_json).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(20, rusqlite::types::Type::Text, Box::new(e))
    })?;
    let status: String = row.get(21)?;
    let activation_type: String = row.get(23)?;

    Ok(Plan {
        id: row.get(0)?,
        plan_id: row.get(1)?,
        slug: row.get(2)?,
        plan_name: row.get(3)?,
        price: row.get(4)?,
        gbs: row.get(5)?,
        days: row.get(6)?,
        pre_activation_days: row.get(7)?,
        location_name: row.get(8)?,
        country_name: row.get(9)?,
        country_codes: row.get(10)?,
        plan_type: row.get(11)?,
        csv_type: row.get(12)?,
        plan_category: row.get(13)?,
        sms: row.get(14)?,
        reloadable: row.get(15)?,
        operators: row.get(16)?,
        proposed_price_usd: row.get(17)?,
        our_cost: row.get(18)?,
        applied_markup_pct: row.get(19)?,
        features,
        status: PlanStatus::from_str_loose(&status),
        max_speed: row.get(22)?,
        activation_type: ActivationType::from_str_loose(&activation_type),
        is_esim_enabled: row.get(24)?,
        is_popular: row.get(25)?,
        stock_quantity: row.get(26)?,
        category_id: row.get(27)?,
        created_at: row.get(28)?,
        updated_at: row.get(29)?,
    })
}
