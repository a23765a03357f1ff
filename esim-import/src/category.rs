//! Read-or-create resolution of plan categories.

use esim_db::{Connection, OperationError, operations};

use crate::ImportError;

/// A category ID together with whether this call created it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedCategory {
    pub id: i64,
    pub created: bool,
}

/// Find the category called `name`, creating an active one if it is missing.
///
/// A blank name means "no category" and returns `None`. Creation relies on the
/// unique name constraint, so a category created concurrently by another
/// importer is picked up instead of duplicated.
pub fn resolve_category(
    conn: &Connection,
    name: &str,
) -> Result<Option<ResolvedCategory>, ImportError> {
    let name = name.trim();
    if name.is_empty() {
        return Ok(None);
    }

    if let Some(id) = operations::find_category_by_name(conn, name)? {
        return Ok(Some(ResolvedCategory { id, created: false }));
    }

    let created = operations::insert_category(conn, name)?;
    let id = operations::find_category_by_name(conn, name)?.ok_or_else(|| {
        OperationError::NotFound {
            entity_type: "plan category".to_string(),
            id: name.to_string(),
        }
    })?;
    if created {
        log::debug!("Created plan category '{}'", name);
    }

    Ok(Some(ResolvedCategory { id, created }))
}
