pub(crate) mod import;
pub(crate) mod plans;
pub(crate) mod stats;

use std::path::PathBuf;

/// Default catalog database location: the platform data directory, or a
/// local `.esim-store` directory when none is known.
pub(crate) fn default_catalog_db_path() -> PathBuf {
    dirs::data_dir()
        .map(|d| d.join("esim-store"))
        .unwrap_or_else(|| PathBuf::from(".esim-store"))
        .join("catalog.db")
}

/// Truncate a string to a maximum width, appending "..." if needed.
pub(crate) fn truncate_str(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else if max > 3 {
        let head: String = s.chars().take(max - 3).collect();
        format!("{}...", head)
    } else {
        s.chars().take(max).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_keeps_short_strings() {
        assert_eq!(truncate_str("Japan 5GB", 20), "Japan 5GB");
    }

    #[test]
    fn truncate_is_char_safe() {
        assert_eq!(truncate_str("Türkiye 10GB 30 days", 10), "Türkiye...");
        assert_eq!(truncate_str("日本のプラン", 2), "日本");
    }

    #[test]
    fn default_db_is_named_catalog() {
        assert!(default_catalog_db_path().ends_with("esim-store/catalog.db")
            || default_catalog_db_path().ends_with(".esim-store/catalog.db"));
    }
}
