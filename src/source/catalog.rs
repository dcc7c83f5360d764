//! Local catalog source
//!
//! Answers queries from a JSON file of candidates, matching the way the
//! medication-suggestions endpoint does: case-insensitive substring on the
//! name or brand name, file order preserved, capped at the requested limit.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use crate::candidate::{Candidate, parse_candidates};
use crate::error::MedfillError;

#[derive(Debug, Clone, Default)]
pub struct CatalogSource {
    entries: Arc<Vec<Candidate>>,
}

impl CatalogSource {
    pub fn new(entries: Vec<Candidate>) -> Self {
        Self {
            entries: Arc::new(entries),
        }
    }

    pub fn load(path: &Path) -> Result<Self, MedfillError> {
        let catalog_error = |reason: String| MedfillError::Catalog {
            path: path.display().to_string(),
            reason,
        };

        let body = fs::read_to_string(path).map_err(|e| catalog_error(e.to_string()))?;
        let entries = parse_candidates(&body).map_err(|e| catalog_error(e.to_string()))?;
        log::info!("Loaded {} catalog entries from {}", entries.len(), path.display());

        Ok(Self::new(entries))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries whose name or brand contains `term`
    pub fn search(&self, term: &str, limit: usize) -> Vec<Candidate> {
        let needle = term.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }

        let contains_term = |value: Option<&str>| {
            value.is_some_and(|v| v.to_lowercase().contains(&needle))
        };

        self.entries
            .iter()
            .filter(|c| {
                contains_term(Some(c.name.as_str())) || contains_term(c.brand_name.as_deref())
            })
            .take(limit)
            .cloned()
            .collect()
    }
}
