//! eSIM plan catalog data model, cell normalization, and row validation.
//!
//! This crate defines the spreadsheet row shape and the persistent catalog
//! types without any database dependencies. Consumers pass these types to
//! `esim-db` for persistence or to `esim-import` for the batch pipeline.

pub mod normalize;
pub mod types;
pub mod validation;

pub use normalize::{non_empty, parse_bool, parse_decimal, parse_number, parse_whole_number};
pub use types::*;
pub use validation::{
    FIRST_DATA_LINE, Severity, ValidationIssue, ValidationReport, validate_row, validate_rows,
};
