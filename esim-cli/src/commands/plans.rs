use std::path::Path;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::CliError;

use super::truncate_str;

/// List catalog plans, optionally restricted to one category.
pub(crate) fn run_list_plans(
    db_path: &Path,
    category: Option<&str>,
    limit: u32,
) -> Result<(), CliError> {
    if !db_path.exists() {
        log::warn!("No catalog database found at {}", db_path.display());
        return Ok(());
    }

    let conn = esim_db::open_database(db_path)
        .map_err(|e| CliError::database(format!("Failed to open catalog database: {}", e)))?;

    let plans = esim_db::list_plans(&conn, category, Some(limit))
        .map_err(|e| CliError::database(format!("Failed to list plans: {}", e)))?;

    if plans.is_empty() {
        match category {
            Some(name) => log::info!("No plans in category '{}'", name),
            None => log::info!("No plans in the catalog"),
        }
        return Ok(());
    }

    log::info!(
        "{}",
        format!(
            "  {:<14} {:<36} {:>9} {:>5} {:>7}  {}",
            "PlanId", "Plan Name", "Price", "Days", "GBs", "Status"
        )
        .if_supports_color(Stdout, |t| t.bold()),
    );
    for plan in &plans {
        let status = plan.status.as_str();
        log::info!(
            "  {:<14} {:<36} {:>9} {:>5} {:>7}  {}",
            truncate_str(plan.plan_id.as_deref().unwrap_or("-"), 14),
            truncate_str(&plan.plan_name, 36),
            plan.price,
            plan.days,
            plan.gbs.as_deref().unwrap_or("-"),
            if plan.status == esim_catalog::PlanStatus::Active {
                status.if_supports_color(Stdout, |t| t.green()).to_string()
            } else {
                status.if_supports_color(Stdout, |t| t.dimmed()).to_string()
            },
        );
    }
    crate::log_blank();
    log::info!("{} plan{}", plans.len(), if plans.len() == 1 { "" } else { "s" });

    Ok(())
}
