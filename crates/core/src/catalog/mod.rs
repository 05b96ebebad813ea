//! Drug catalog built from the public BDPM exports.
//!
//! ## Source files
//!
//! ```text
//! <data_dir>/
//!   CIS_bdpm.txt        # CIS code \t name \t ...
//!   CIS_COMPO_bdpm.txt  # CIS code \t element \t substance code \t substance name \t dosage \t ...
//! ```
//!
//! Both files are tab separated and ISO-8859-1 encoded. Only the drugs listed in
//! [`TARGET_DRUGS`](crate::constants::TARGET_DRUGS) are kept.

mod loader;
mod search;

pub use loader::{load_drugs, load_substances};

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::constants::MAX_SEARCH_RESULTS;

/// An active substance contained in a drug.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Substance {
    #[serde(default)]
    pub code_substance: String,
    pub nom: String,
    #[serde(default)]
    pub dosage: String,
}

/// A drug product, identified by its CIS code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Drug {
    pub cis: String,
    pub nom: String,
    #[serde(default)]
    pub substances: Vec<Substance>,
}

/// In-memory, read-only catalog.
#[derive(Debug, Clone, Default)]
pub struct DrugCatalog {
    drugs: Vec<Drug>,
}

impl DrugCatalog {
    pub fn new(drugs: Vec<Drug>) -> Self {
        Self { drugs }
    }

    /// Loads the catalog from a BDPM data directory. Missing files give an empty catalog.
    pub fn load(data_dir: &Path) -> Self {
        let drugs = load_drugs(data_dir);
        tracing::info!(
            drugs = drugs.len(),
            dir = %data_dir.display(),
            "drug catalog loaded"
        );
        Self { drugs }
    }

    pub fn drugs(&self) -> &[Drug] {
        &self.drugs
    }

    pub fn len(&self) -> usize {
        self.drugs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drugs.is_empty()
    }

    pub fn get(&self, cis: &str) -> Option<&Drug> {
        self.drugs.iter().find(|d| d.cis == cis)
    }

    /// Search with the default result limit.
    pub fn search(&self, term: &str) -> Vec<&Drug> {
        search::search(&self.drugs, term, MAX_SEARCH_RESULTS)
    }

    pub fn search_limited(&self, term: &str, limit: usize) -> Vec<&Drug> {
        search::search(&self.drugs, term, limit)
    }
}
