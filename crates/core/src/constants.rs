//! Constants used throughout the pharma core crate.
//!
//! File names, defaults and the catalog target list live here so the loader, the services and
//! the binaries agree on them.

/// Default directory holding the raw BDPM exports when no explicit directory is configured.
pub const DEFAULT_DATA_DIR: &str = "data/raw";

/// Drug specialities export (CIS code, name, ...).
pub const CIS_FILENAME: &str = "CIS_bdpm.txt";

/// Drug composition export (CIS code, element, substance code, substance name, dosage, ...).
pub const COMPOSITION_FILENAME: &str = "CIS_COMPO_bdpm.txt";

/// Default base URL of the search/analysis service consumed by the CLI.
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";

/// Default timeout for outbound HTTP calls.
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;

/// Default file backing the CLI selection store.
pub const DEFAULT_SELECTION_FILE: &str = "selection.json";

/// Upper bound on search hits returned for a single query.
pub const MAX_SEARCH_RESULTS: usize = 20;

/// Minimum number of selected drugs before an interaction analysis makes sense.
pub const MIN_DRUGS_FOR_ANALYSIS: usize = 2;

/// Brand names kept when loading the catalog. Matched as substrings of the upper-cased name.
pub const TARGET_DRUGS: &[&str] = &[
    "DOLIPRANE",
    "ADVIL",
    "KARDEGIC",
    "PREVISCAN",
    "XARELTO",
    "TAHOR",
    "CLAMOXYL",
    "AUGMENTIN",
    "SPASFON",
    "VENTOLINE",
    "LASILIX",
    "INEXIUM",
    "PLAVIX",
    "LEVOTHYROX",
    "MILLEPERTUIS",
];
