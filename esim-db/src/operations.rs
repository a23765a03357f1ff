//! Write operations and natural-key lookups for catalog entities.

use esim_catalog::types::*;
use rusqlite::{Connection, OptionalExtension, params};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OperationError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Entity not found: {entity_type} with id '{id}'")]
    NotFound { entity_type: String, id: String },
}

// ── Category Operations ─────────────────────────────────────────────────────

/// Find a category by exact name. Returns its ID.
pub fn find_category_by_name(conn: &Connection, name: &str) -> Result<Option<i64>, OperationError> {
    let mut stmt = conn.prepare("SELECT id FROM plan_categories WHERE name = ?1 LIMIT 1")?;
    let id = stmt
        .query_row(params![name], |row| row.get::<_, i64>(0))
        .optional()?;
    Ok(id)
}

/// Insert an active category unless one with this name already exists.
///
/// Returns `true` when a row was created.
pub fn insert_category(conn: &Connection, name: &str) -> Result<bool, OperationError> {
    let changed = conn.execute(
        "INSERT INTO plan_categories (name, is_active) VALUES (?1, 1)
         ON CONFLICT(name) DO NOTHING",
        params![name],
    )?;
    Ok(changed > 0)
}

// ── Plan Operations ─────────────────────────────────────────────────────────

/// Find a plan's row ID by its external plan identifier.
pub fn find_plan_by_plan_id(conn: &Connection, plan_id: &str) -> Result<Option<i64>, OperationError> {
    let mut stmt = conn.prepare("SELECT id FROM plans WHERE plan_id = ?1")?;
    let id = stmt
        .query_row(params![plan_id], |row| row.get::<_, i64>(0))
        .optional()?;
    Ok(id)
}

/// Find a plan's row ID by its URL slug.
pub fn find_plan_by_slug(conn: &Connection, slug: &str) -> Result<Option<i64>, OperationError> {
    let mut stmt = conn.prepare("SELECT id FROM plans WHERE slug = ?1 LIMIT 1")?;
    let id = stmt
        .query_row(params![slug], |row| row.get::<_, i64>(0))
        .optional()?;
    Ok(id)
}

/// Insert a new plan with creation defaults. Returns the generated ID.
pub fn insert_plan(
    conn: &Connection,
    fields: &PlanFields,
    category_id: Option<i64>,
) -> Result<i64, OperationError> {
    let features = serde_json::to_string(&fields.features)?;
    conn.execute(
        "INSERT INTO plans (plan_id, slug, plan_name, price, gbs, days, pre_activation_days,
             location_name, country_name, country_codes, plan_type, csv_type, plan_category,
             sms, reloadable, operators, proposed_price_usd, our_cost, applied_markup_pct,
             features, status, max_speed, activation_type, is_esim_enabled, is_popular,
             stock_quantity, category_id)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16,
             ?17, ?18, ?19, ?20, ?21, ?22, ?23, ?24, 0, ?25, ?26)",
        params![
            fields.plan_id,
            fields.slug,
            fields.plan_name,
            fields.price,
            fields.gbs,
            fields.days,
            fields.pre_activation_days,
            fields.location_name,
            fields.country_name,
            fields.country_codes,
            fields.plan_type,
            fields.csv_type,
            fields.plan_category,
            fields.sms,
            fields.reloadable,
            fields.operators,
            fields.proposed_price_usd,
            fields.our_cost,
            fields.applied_markup_pct,
            features,
            fields.status.as_str(),
            fields.max_speed,
            fields.activation_type.as_str(),
            fields.is_esim_enabled,
            DEFAULT_STOCK_QUANTITY,
            category_id,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Overwrite the imported columns of an existing plan.
///
/// The category link is only replaced when `category_id` is `Some`;
/// `is_popular` and `stock_quantity` are storefront-managed and left alone.
pub fn update_plan(
    conn: &Connection,
    id: i64,
    fields: &PlanFields,
    category_id: Option<i64>,
) -> Result<(), OperationError> {
    let features = serde_json::to_string(&fields.features)?;
    let changed = conn.execute(
        "UPDATE plans SET
             plan_id = ?2,
             slug = ?3,
             plan_name = ?4,
             price = ?5,
             gbs = ?6,
             days = ?7,
             pre_activation_days = ?8,
             location_name = ?9,
             country_name = ?10,
             country_codes = ?11,
             plan_type = ?12,
             csv_type = ?13,
             plan_category = ?14,
             sms = ?15,
             reloadable = ?16,
             operators = ?17,
             proposed_price_usd = ?18,
             our_cost = ?19,
             applied_markup_pct = ?20,
             features = ?21,
             status = ?22,
             max_speed = ?23,
             activation_type = ?24,
             is_esim_enabled = ?25,
             category_id = COALESCE(?26, category_id),
             updated_at = datetime('now')
         WHERE id = ?1",
        params![
            id,
            fields.plan_id,
            fields.slug,
            fields.plan_name,
            fields.price,
            fields.gbs,
            fields.days,
            fields.pre_activation_days,
            fields.location_name,
            fields.country_name,
            fields.country_codes,
            fields.plan_type,
            fields.csv_type,
            fields.plan_category,
            fields.sms,
            fields.reloadable,
            fields.operators,
            fields.proposed_price_usd,
            fields.our_cost,
            fields.applied_markup_pct,
            features,
            fields.status.as_str(),
            fields.max_speed,
            fields.activation_type.as_str(),
            fields.is_esim_enabled,
            category_id,
        ],
    )?;
    if changed == 0 {
        return Err(OperationError::NotFound {
            entity_type: "plan".to_string(),
            id: id.to_string(),
        });
    }
    Ok(())
}

// ── Import Log Operations ───────────────────────────────────────────────────

/// Insert an import log entry. Returns the generated ID.
pub fn insert_import_log(conn: &Connection, log: &ImportLog) -> Result<i64, OperationError> {
    conn.execute(
        "INSERT INTO import_log (source_name, imported_at, rows_total, plans_created,
             plans_updated, rows_failed, categories_created)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            log.source_name,
            log.imported_at,
            log.rows_total,
            log.plans_created,
            log.plans_updated,
            log.rows_failed,
            log.categories_created,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}
