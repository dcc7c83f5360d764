//! Suggestion sources
//!
//! The remote medication-suggestions endpoint, or a local catalog file in the
//! same format. Exactly one source is configured per run.

use std::path::Path;

use thiserror::Error;

use crate::candidate::Candidate;
use crate::config::SuggestConfig;
use crate::error::MedfillError;

mod catalog;
mod http;
pub mod worker;

pub use catalog::CatalogSource;
pub use http::HttpSource;
pub use worker::{FetchHandle, FetchResponse, spawn_worker};

/// Errors that can occur while fetching suggestions
///
/// All of them resolve to "no results" in the widget; they are only logged.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Connection failure or interrupted body
    #[error("Network error: {0}")]
    Network(String),

    /// Endpoint answered with a non-success status
    #[error("HTTP status {0}")]
    Status(u16),

    /// Body is not a JSON array of candidates
    #[error("Malformed response: {0}")]
    Malformed(String),

    /// No answer within the configured timeout
    #[error("Request timed out after {0} ms")]
    Timeout(u64),
}

/// Suggestion source implementations
#[derive(Debug, Clone)]
pub enum SuggestionSource {
    /// Remote endpoint queried over HTTP
    Http(HttpSource),
    /// Local catalog file
    Catalog(CatalogSource),
}

impl SuggestionSource {
    /// Build the source for this run: a catalog file if given, otherwise the configured endpoint
    pub fn from_config(config: &SuggestConfig, catalog: Option<&Path>) -> Result<Self, MedfillError> {
        match catalog {
            Some(path) => Ok(SuggestionSource::Catalog(CatalogSource::load(path)?)),
            None => Ok(SuggestionSource::Http(HttpSource::new(&config.endpoint)?)),
        }
    }

    /// Fetch candidates for `term`, at most `limit` of them, in source order
    pub async fn fetch(&self, term: &str, limit: usize) -> Result<Vec<Candidate>, SourceError> {
        match self {
            SuggestionSource::Http(source) => source.fetch(term, limit).await,
            SuggestionSource::Catalog(source) => Ok(source.search(term, limit)),
        }
    }

    /// Short description for the status line
    pub fn describe(&self) -> String {
        match self {
            SuggestionSource::Http(source) => source.endpoint().to_string(),
            SuggestionSource::Catalog(source) => format!("catalog ({} entries)", source.len()),
        }
    }
}

#[cfg(test)]
#[path = "source_tests.rs"]
mod source_tests;
