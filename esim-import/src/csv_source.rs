//! Locating and parsing the pricing spreadsheet.

use std::path::{Path, PathBuf};

use esim_catalog::CsvRow;

use crate::ImportError;

/// Spreadsheet exports looked for when no path is given, in order.
pub const FALLBACK_FILENAMES: [&str; 2] = [
    "single_full_speed_plans_pricing_ready (1).csv",
    "single_full_speed_plans_pricing_ready.csv",
];

/// Every path the importer will try, in order, without duplicates.
///
/// The explicit path (if any) comes first, then the fallback filenames. Each
/// name is tried as given and again relative to `cwd`.
pub fn candidate_paths(explicit: Option<&Path>, cwd: &Path) -> Vec<PathBuf> {
    let names = explicit
        .into_iter()
        .map(Path::to_path_buf)
        .chain(FALLBACK_FILENAMES.iter().map(PathBuf::from));

    let mut candidates: Vec<PathBuf> = Vec::new();
    for name in names {
        for path in [name.clone(), cwd.join(&name)] {
            if !candidates.contains(&path) {
                candidates.push(path);
            }
        }
    }
    candidates
}

/// Return the first candidate that exists as a file.
pub fn resolve_csv_path(explicit: Option<&Path>, cwd: &Path) -> Result<PathBuf, ImportError> {
    let tried = candidate_paths(explicit, cwd);
    match tried.iter().find(|p| p.is_file()) {
        Some(found) => Ok(found.clone()),
        None => Err(ImportError::FileNotFound { tried }),
    }
}

/// Read and parse a spreadsheet from disk.
pub fn read_plan_csv(path: &Path) -> Result<Vec<CsvRow>, ImportError> {
    let contents = std::fs::read_to_string(path).map_err(|source| ImportError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_plan_csv(&contents)
}

/// Parse spreadsheet text whose first line is the header row.
///
/// Values are trimmed and blank lines skipped. A row with the wrong number of
/// fields fails the whole parse.
pub fn parse_plan_csv(content: &str) -> Result<Vec<CsvRow>, ImportError> {
    // Spreadsheet tools like to prepend a BOM, which would corrupt the first header
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let rows = reader.deserialize().collect::<Result<Vec<CsvRow>, _>>()?;
    Ok(rows)
}
