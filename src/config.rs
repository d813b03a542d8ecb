// src/config.rs
use std::env;

pub const MAIN_DOC_URL: &str = "https://docs.python.org/3/";
pub const PEP_URL: &str = "https://peps.python.org/";

pub const DEFAULT_CACHE_DIR: &str = ".docscrape_cache";
pub const DEFAULT_DOWNLOADS_DIR: &str = "downloads";
pub const DEFAULT_RESULTS_DIR: &str = "results";

/// Filename timestamp for CSV results, e.g. `pep_2026-08-07_12-30-00.csv`.
pub const DATETIME_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

// PEP index table geometry
pub const PEP_TYPE_STATUS_COLUMN: usize = 0;
pub const PEP_NUMBER_COLUMN: usize = 1;
pub const MIN_PEP_TABLE_COLUMNS: usize = 2;
pub const PEP_STATUS_CHAR_INDEX: usize = 1;

/// Link shapes identifying the aggregate "PEP 0" index entry, which is not a
/// real specification and must stay out of the tally. Substring match.
pub const PEP_ZERO_PATTERNS: &[&str] = &["pep-0000", "pep-0/"];

/// Acceptable authoritative statuses for a preview status letter taken from
/// the index table. Unknown letters get an empty set, so the mismatch warning
/// always fires for them.
pub fn expected_statuses(preview: &str) -> &'static [&'static str] {
    match preview {
        "A" => &["Active", "Accepted"],
        "D" => &["Deferred"],
        "F" => &["Final"],
        "P" => &["Provisional"],
        "R" => &["Rejected"],
        "S" => &["Superseded"],
        "W" => &["Withdrawn"],
        "" => &["Draft", "Active"],
        _ => &[],
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    pub docs_url: String,
    pub pep_url: String,
    pub cache_dir: String,
    pub downloads_dir: String,
    pub results_dir: String,
}

impl Config {
    pub fn from_env() -> Self {
        Config {
            docs_url: env_or("DOCSCRAPE_DOCS_URL", MAIN_DOC_URL),
            pep_url: env_or("DOCSCRAPE_PEP_URL", PEP_URL),
            cache_dir: env_or("DOCSCRAPE_CACHE_DIR", DEFAULT_CACHE_DIR),
            downloads_dir: env_or("DOCSCRAPE_DOWNLOADS_DIR", DEFAULT_DOWNLOADS_DIR),
            results_dir: env_or("DOCSCRAPE_RESULTS_DIR", DEFAULT_RESULTS_DIR),
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expected_statuses_known_letters() {
        assert_eq!(expected_statuses("A"), &["Active", "Accepted"]);
        assert_eq!(expected_statuses("F"), &["Final"]);
        assert_eq!(expected_statuses(""), &["Draft", "Active"]);
    }

    #[test]
    fn expected_statuses_unknown_letter_is_empty() {
        assert!(expected_statuses("X").is_empty());
        assert!(expected_statuses("zz").is_empty());
    }

    #[test]
    fn zero_patterns_do_not_match_real_entries() {
        for pattern in PEP_ZERO_PATTERNS {
            assert!(!"pep-0008/".contains(pattern));
        }
        assert!(PEP_ZERO_PATTERNS.iter().any(|p| "pep-0000/".contains(p)));
        assert!(PEP_ZERO_PATTERNS.iter().any(|p| "https://peps.python.org/pep-0/".contains(p)));
    }
}
