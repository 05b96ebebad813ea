//! The current drug selection.
//!
//! A small key-value store of drugs keyed by CIS code, kept in insertion order. Every change
//! bumps [`SelectionStore::revision`], which lets an [`AnalysisSession`](crate::interaction::AnalysisSession)
//! notice that a pending analysis no longer matches the selection.
//!
//! The CLI persists the store as JSON between invocations:
//!
//! ```json
//! { "saved_at": "2026-01-01T10:00:00Z", "drugs": [ { "cis": "...", "nom": "...", "substances": [] } ] }
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::catalog::Drug;
use crate::{PharmaError, PharmaResult};

#[derive(Debug, Clone, Default)]
pub struct SelectionStore {
    drugs: Vec<Drug>,
    revision: u64,
}

#[derive(Serialize, Deserialize)]
struct StoredSelection {
    saved_at: DateTime<Utc>,
    drugs: Vec<Drug>,
}

impl SelectionStore {
    pub fn new() -> Self {
        Self::default()
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

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn contains(&self, cis: &str) -> bool {
        self.drugs.iter().any(|d| d.cis == cis)
    }

    /// Adds a drug. Returns `false` if a drug with the same CIS is already selected.
    pub fn add(&mut self, drug: Drug) -> bool {
        if self.contains(&drug.cis) {
            return false;
        }
        self.drugs.push(drug);
        self.revision += 1;
        true
    }

    /// Removes the drug with this CIS code, if present.
    pub fn remove(&mut self, cis: &str) -> Option<Drug> {
        let index = self.drugs.iter().position(|d| d.cis == cis)?;
        self.revision += 1;
        Some(self.drugs.remove(index))
    }

    pub fn clear(&mut self) {
        if !self.drugs.is_empty() {
            self.drugs.clear();
            self.revision += 1;
        }
    }

    /// Loads a store saved by [`SelectionStore::save`]. A missing file is an empty selection.
    pub fn load(path: &Path) -> PharmaResult<Self> {
        if !path.exists() {
            return Ok(Self::new());
        }
        let contents = fs::read_to_string(path).map_err(PharmaError::FileRead)?;
        let stored: StoredSelection =
            serde_json::from_str(&contents).map_err(PharmaError::Deserialization)?;

        Ok(Self {
            drugs: stored.drugs,
            revision: 0,
        })
    }

    pub fn save(&self, path: &Path) -> PharmaResult<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(PharmaError::FileWrite)?;
        }
        let stored = StoredSelection {
            saved_at: Utc::now(),
            drugs: self.drugs.clone(),
        };
        let json = serde_json::to_string_pretty(&stored).map_err(PharmaError::Serialization)?;
        fs::write(path, json).map_err(PharmaError::FileWrite)
    }
}
