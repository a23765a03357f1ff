//! Mapping spreadsheet rows onto catalog plans.
//!
//! A row is matched to an existing plan by its `PlanId` first and its `Slug`
//! second. A match is updated in place; otherwise a new plan is created.

use esim_catalog::{CsvRow, PlanFields};
use esim_db::{Connection, OperationError, operations};

use crate::ImportError;

/// Natural-key lookups needed to decide between insert and update.
pub trait PlanLookup {
    fn find_by_plan_id(&self, plan_id: &str) -> Result<Option<i64>, OperationError>;
    fn find_by_slug(&self, slug: &str) -> Result<Option<i64>, OperationError>;
}

impl PlanLookup for Connection {
    fn find_by_plan_id(&self, plan_id: &str) -> Result<Option<i64>, OperationError> {
        operations::find_plan_by_plan_id(self, plan_id)
    }

    fn find_by_slug(&self, slug: &str) -> Result<Option<i64>, OperationError> {
        operations::find_plan_by_slug(self, slug)
    }
}

/// Whether a row refers to a plan that is already stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanIdentity {
    Found(i64),
    NotFound,
}

/// Resolve a row's identity: `plan_id` first, then `slug`. Blank keys are ignored.
pub fn resolve_identity<L: PlanLookup + ?Sized>(
    plan_id: Option<&str>,
    slug: Option<&str>,
    lookup: &L,
) -> Result<PlanIdentity, OperationError> {
    if let Some(plan_id) = plan_id.map(str::trim).filter(|s| !s.is_empty()) {
        if let Some(id) = lookup.find_by_plan_id(plan_id)? {
            return Ok(PlanIdentity::Found(id));
        }
    }
    if let Some(slug) = slug.map(str::trim).filter(|s| !s.is_empty()) {
        if let Some(id) = lookup.find_by_slug(slug)? {
            return Ok(PlanIdentity::Found(id));
        }
    }
    Ok(PlanIdentity::NotFound)
}

/// What a successful upsert did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Created(i64),
    Updated(i64),
}

impl UpsertOutcome {
    pub fn id(&self) -> i64 {
        match self {
            Self::Created(id) | Self::Updated(id) => *id,
        }
    }
}

/// Write one row to the catalog with exactly one insert or update.
///
/// `category_id` links the plan to a category; `None` leaves an existing
/// plan's link as it was.
pub fn upsert_plan(
    conn: &Connection,
    row: &CsvRow,
    category_id: Option<i64>,
) -> Result<UpsertOutcome, ImportError> {
    let fields = PlanFields::from_row(row);
    let identity = resolve_identity(fields.plan_id.as_deref(), fields.slug.as_deref(), conn)?;

    match identity {
        PlanIdentity::Found(id) => {
            operations::update_plan(conn, id, &fields, category_id)?;
            Ok(UpsertOutcome::Updated(id))
        }
        PlanIdentity::NotFound => {
            let id = operations::insert_plan(conn, &fields, category_id)?;
            Ok(UpsertOutcome::Created(id))
        }
    }
}
