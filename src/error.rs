use thiserror::Error;

/// Custom error types for medfill
#[derive(Debug, Error)]
pub enum MedfillError {
    #[error("Invalid suggestion endpoint '{url}': {reason}")]
    InvalidEndpoint { url: String, reason: String },

    #[error("Failed to load catalog {path}: {reason}")]
    Catalog { path: String, reason: String },

    #[error("Invalid config: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod error_tests;
