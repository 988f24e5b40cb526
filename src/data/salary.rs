//! Instructor salary records and name lookup.
//!
//! Loaded once at startup from a CSV (preferred) or JSON file; a missing
//! file is an empty table, not an error. Lookup runs an exact -> component ->
//! single-token cascade and returns at most one record; when several
//! component matches exist the first wins, a known precision/recall
//! tradeoff.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::data::names::{extract_components, last_first_to_first_last, normalize_text};

/// Minimum length for a name component to participate in matching; shorter
/// fragments match far too much.
const MIN_COMPONENT_LEN: usize = 3;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalaryRecord {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Department")]
    pub department: String,
    #[serde(rename = "Campus")]
    pub campus: String,
    #[serde(rename = "Base Pay")]
    pub base_pay: String,
    #[serde(rename = "Gross Pay")]
    pub gross_pay: String,
    #[serde(rename = "Hire Date")]
    pub hire_date: String,
}

#[derive(Debug, Default)]
pub struct SalaryStore {
    records: Vec<SalaryRecord>,
}

impl SalaryStore {
    /// Load records from `salaries.csv` or `salaries.json` under `dir`.
    pub fn load(dir: &Path) -> Self {
        let csv_path = dir.join("salaries.csv");
        if csv_path.exists() {
            match Self::load_csv(&csv_path) {
                Ok(store) => return store,
                Err(e) => warn!(path = %csv_path.display(), error = %e, "failed to load salary CSV"),
            }
        }

        let json_path = dir.join("salaries.json");
        if json_path.exists() {
            match Self::load_json(&json_path) {
                Ok(store) => return store,
                Err(e) => {
                    warn!(path = %json_path.display(), error = %e, "failed to load salary JSON")
                }
            }
        }

        info!("no salary data file found, salary lookups will be empty");
        Self::default()
    }

    fn load_csv(path: &Path) -> anyhow::Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(path)?;
        let records: Vec<SalaryRecord> = reader.deserialize().collect::<Result<_, _>>()?;
        info!(count = records.len(), path = %path.display(), "loaded salary records");
        Ok(Self { records })
    }

    fn load_json(path: &Path) -> anyhow::Result<Self> {
        let body = std::fs::read_to_string(path)?;
        let records: Vec<SalaryRecord> = serde_json::from_str(&body)?;
        info!(count = records.len(), path = %path.display(), "loaded salary records");
        Ok(Self { records })
    }

    pub fn from_records(records: Vec<SalaryRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Look up an instructor's salary record by name in any common format.
    pub fn find_by_instructor(&self, name: &str) -> Option<&SalaryRecord> {
        let normalized = normalize_text(name);
        let converted = normalize_text(&last_first_to_first_last(name));

        // Exact hit on either reading of the name.
        if let Some(record) = self.records.iter().find(|r| {
            let entry = normalize_text(&r.name);
            entry == normalized || entry == converted
        }) {
            return Some(record);
        }

        // Whole-word component matches; first of the deduplicated set wins.
        let components = extract_components(name);
        let mut matches: Vec<&SalaryRecord> = Vec::new();
        for component in &components {
            if component.len() < MIN_COMPONENT_LEN {
                continue;
            }
            let component = normalize_text(component);
            for record in &self.records {
                if normalize_text(&record.name)
                    .split_whitespace()
                    .any(|word| word == component)
                    && !matches.iter().any(|m| m.name == record.name)
                {
                    matches.push(record);
                }
            }
        }
        if let Some(first) = matches.first() {
            if matches.len() > 1 {
                warn!(
                    name,
                    candidates = matches.len(),
                    "ambiguous salary match, returning first"
                );
            }
            return Some(first);
        }

        // Last resort for a bare single token.
        if !normalized.contains(' ') {
            return self.records.iter().find(|r| {
                normalize_text(&r.name)
                    .split_whitespace()
                    .any(|word| word == normalized)
            });
        }

        None
    }
}
