//! Data model types for the plan catalog.
//!
//! These types represent the spreadsheet rows consumed by the importer and the
//! persistent catalog schema: plans, plan categories, and import tracking.

use serde::Deserialize;

use crate::normalize::{non_empty, parse_bool, parse_decimal, parse_whole_number};

// ── CSV Row ─────────────────────────────────────────────────────────────────

/// One line of the pricing spreadsheet, keyed by its header names.
///
/// Every column is kept as the raw (trimmed) cell text. Columns missing from
/// the header read as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CsvRow {
    #[serde(rename = "Plan Name")]
    pub plan_name: String,
    #[serde(rename = "Price")]
    pub price: String,
    #[serde(rename = "Days")]
    pub days: String,
    #[serde(rename = "GBs")]
    pub gbs: String,
    #[serde(rename = "Country Codes")]
    pub country_codes: String,
    #[serde(rename = "Type")]
    pub plan_type: String,
    #[serde(rename = "Plan Category")]
    pub plan_category: String,
    #[serde(rename = "Location Name")]
    pub location_name: String,
    #[serde(rename = "Pre-activation days")]
    pub pre_activation_days: String,
    #[serde(rename = "SMS")]
    pub sms: String,
    #[serde(rename = "Reloadable")]
    pub reloadable: String,
    #[serde(rename = "Operators")]
    pub operators: String,
    #[serde(rename = "Slug")]
    pub slug: String,
    #[serde(rename = "PlanId")]
    pub plan_id: String,
    #[serde(rename = "proposed_price_usd")]
    pub proposed_price_usd: String,
    #[serde(rename = "Country")]
    pub country: String,
    #[serde(rename = "our_cost")]
    pub our_cost: String,
    #[serde(rename = "applied_markup_pct")]
    pub applied_markup_pct: String,
}

// ── Plan Category ───────────────────────────────────────────────────────────

/// A storefront grouping for plans (e.g., "Regional", "Global").
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanCategory {
    pub id: i64,
    pub name: String,
    pub is_active: bool,
    pub created_at: String,
}

// ── Plan ────────────────────────────────────────────────────────────────────

/// Lifecycle status of a plan in the storefront.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PlanStatus {
    #[default]
    Active,
    Inactive,
    Discontinued,
}

impl PlanStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::Inactive => "INACTIVE",
            Self::Discontinued => "DISCONTINUED",
        }
    }

    pub fn from_str_loose(s: &str) -> Self {
        match s.to_uppercase().as_str() {
            "INACTIVE" => Self::Inactive,
            "DISCONTINUED" => Self::Discontinued,
            _ => Self::Active,
        }
    }
}

/// How a purchased eSIM profile becomes active.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ActivationType {
    #[default]
    Instant,
    FirstUse,
    Manual,
}

impl ActivationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Instant => "INSTANT",
            Self::FirstUse => "FIRST_USE",
            Self::Manual => "MANUAL",
        }
    }

    pub fn from_str_loose(s: &str) -> Self {
        match s.to_uppercase().as_str() {
            "FIRST_USE" => Self::FirstUse,
            "MANUAL" => Self::Manual,
            _ => Self::Instant,
        }
    }
}

/// Network generation advertised for every imported plan.
pub const DEFAULT_MAX_SPEED: &str = "5G";

/// Stock assigned to a plan when it is first created.
pub const DEFAULT_STOCK_QUANTITY: i64 = 1000;

/// A sellable eSIM data plan as stored in the catalog.
#[derive(Debug, Clone)]
pub struct Plan {
    pub id: i64,
    pub plan_id: Option<String>,
    pub slug: Option<String>,
    pub plan_name: String,
    /// Canonical decimal string, e.g. `"9.99"`.
    pub price: String,
    pub gbs: Option<String>,
    pub days: i64,
    pub pre_activation_days: Option<i64>,
    pub location_name: Option<String>,
    pub country_name: Option<String>,
    pub country_codes: String,
    pub plan_type: Option<String>,
    pub csv_type: Option<String>,
    pub plan_category: Option<String>,
    pub sms: Option<bool>,
    pub reloadable: Option<bool>,
    pub operators: Option<String>,
    pub proposed_price_usd: Option<String>,
    pub our_cost: Option<String>,
    pub applied_markup_pct: Option<String>,
    pub features: Vec<String>,
    pub status: PlanStatus,
    pub max_speed: String,
    pub activation_type: ActivationType,
    pub is_esim_enabled: bool,
    pub is_popular: bool,
    pub stock_quantity: i64,
    pub category_id: Option<i64>,
    pub created_at: String,
    pub updated_at: String,
}

/// The set of plan columns the importer writes on both insert and update.
///
/// Required columns stay optional here: a row that never passed validation
/// can still be mapped, and the store's NOT NULL constraints reject it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanFields {
    pub plan_id: Option<String>,
    pub slug: Option<String>,
    pub plan_name: Option<String>,
    pub price: Option<String>,
    pub gbs: Option<String>,
    pub days: Option<i64>,
    pub pre_activation_days: Option<i64>,
    pub location_name: Option<String>,
    pub country_name: Option<String>,
    pub country_codes: Option<String>,
    pub plan_type: Option<String>,
    pub csv_type: Option<String>,
    pub plan_category: Option<String>,
    pub sms: Option<bool>,
    pub reloadable: Option<bool>,
    pub operators: Option<String>,
    pub proposed_price_usd: Option<String>,
    pub our_cost: Option<String>,
    pub applied_markup_pct: Option<String>,
    pub features: Vec<String>,
    pub status: PlanStatus,
    pub max_speed: String,
    pub activation_type: ActivationType,
    pub is_esim_enabled: bool,
}

impl PlanFields {
    /// Map a spreadsheet row onto plan columns.
    ///
    /// `Type` fills both `plan_type` and `csv_type`, and `Location Name` fills
    /// both `location_name` and `country_name`.
    pub fn from_row(row: &CsvRow) -> Self {
        let plan_type = non_empty(&row.plan_type);
        let location = non_empty(&row.location_name);

        Self {
            plan_id: non_empty(&row.plan_id),
            slug: non_empty(&row.slug),
            plan_name: non_empty(&row.plan_name),
            price: parse_decimal(&row.price),
            gbs: parse_decimal(&row.gbs),
            days: parse_whole_number(&row.days),
            pre_activation_days: parse_whole_number(&row.pre_activation_days),
            location_name: location.clone(),
            country_name: location,
            country_codes: non_empty(&row.country_codes),
            csv_type: plan_type.clone(),
            plan_type,
            plan_category: non_empty(&row.plan_category),
            sms: parse_bool(&row.sms),
            reloadable: parse_bool(&row.reloadable),
            operators: non_empty(&row.operators),
            proposed_price_usd: parse_decimal(&row.proposed_price_usd),
            our_cost: parse_decimal(&row.our_cost),
            applied_markup_pct: parse_decimal(&row.applied_markup_pct),
            features: plan_features(row),
            status: PlanStatus::Active,
            max_speed: DEFAULT_MAX_SPEED.to_string(),
            activation_type: ActivationType::Instant,
            is_esim_enabled: true,
        }
    }
}

/// Build the denormalized feature list shown on the storefront.
///
/// Always three entries, in the order SMS, Reloadable, Operators. Cells are
/// shown as written; empty cells become `N/A`.
pub fn plan_features(row: &CsvRow) -> Vec<String> {
    let show = |s: &str| non_empty(s).unwrap_or_else(|| "N/A".to_string());
    vec![
        format!("SMS: {}", show(&row.sms)),
        format!("Reloadable: {}", show(&row.reloadable)),
        format!("Operators: {}", show(&row.operators)),
    ]
}

// ── Import Tracking ─────────────────────────────────────────────────────────

/// Log entry for a committed import run.
#[derive(Debug, Clone)]
pub struct ImportLog {
    pub id: i64,
    pub source_name: String,
    pub imported_at: String,
    pub rows_total: i64,
    pub plans_created: i64,
    pub plans_updated: i64,
    pub rows_failed: i64,
    pub categories_created: i64,
}
