//! Per-row business rules for the pricing spreadsheet.
//!
//! Every rule runs on every row; a row can report several problems at once.
//! Problems that make a plan unsellable are errors, the rest are warnings.

use std::fmt;

use crate::normalize::{parse_number, parse_whole_number};
use crate::types::CsvRow;

/// Offset from a zero-based row index to the spreadsheet line number
/// (one for the header row, one for one-based numbering).
pub const FIRST_DATA_LINE: usize = 2;

/// How much a validation finding matters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Blocks the import unless the operator overrides with `--commit`.
    Error,
    /// Reported for follow-up; never blocks.
    Warning,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single problem found in a spreadsheet row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    /// Spreadsheet line number (the first data row is 2).
    pub row_number: usize,
    pub severity: Severity,
    pub message: String,
}

impl ValidationIssue {
    fn error(row_number: usize, message: impl Into<String>) -> Self {
        Self {
            row_number,
            severity: Severity::Error,
            message: message.into(),
        }
    }

    fn warning(row_number: usize, message: impl Into<String>) -> Self {
        Self {
            row_number,
            severity: Severity::Warning,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Row {}: {}", self.row_number, self.message)
    }
}

/// Check one row. `index` is the zero-based position among data rows.
pub fn validate_row(row: &CsvRow, index: usize) -> Vec<ValidationIssue> {
    let line = index + FIRST_DATA_LINE;
    let mut issues = Vec::new();

    if row.plan_name.trim().is_empty() {
        issues.push(ValidationIssue::error(line, "Missing Plan Name"));
    }

    if !parse_number(&row.price).is_some_and(|p| p > 0.0) {
        issues.push(ValidationIssue::error(
            line,
            format!("Invalid Price: '{}'", row.price),
        ));
    }

    if !parse_whole_number(&row.days).is_some_and(|d| d > 0) {
        issues.push(ValidationIssue::error(
            line,
            format!("Invalid Days: '{}'", row.days),
        ));
    }

    if !parse_number(&row.gbs).is_some_and(|g| g > 0.0) {
        issues.push(ValidationIssue::warning(
            line,
            format!("Invalid GBs: '{}'", row.gbs),
        ));
    }

    if row.country_codes.trim().is_empty() {
        issues.push(ValidationIssue::error(line, "Missing Country Codes"));
    }

    issues
}

/// All findings for a parsed spreadsheet, in file order.
#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    pub rows: usize,
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn errors(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.issues.iter().filter(|i| i.severity == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.issues.iter().filter(|i| i.severity == Severity::Warning)
    }

    pub fn error_count(&self) -> usize {
        self.errors().count()
    }

    pub fn warning_count(&self) -> usize {
        self.warnings().count()
    }

    /// Whether the row at spreadsheet line `row_number` has a blocking error.
    pub fn row_has_errors(&self, row_number: usize) -> bool {
        self.errors().any(|i| i.row_number == row_number)
    }
}

/// Validate every row and collect the findings.
pub fn validate_rows(rows: &[CsvRow]) -> ValidationReport {
    let issues = rows
        .iter()
        .enumerate()
        .flat_map(|(i, row)| validate_row(row, i))
        .collect();
    ValidationReport {
        rows: rows.len(),
        issues,
    }
}
