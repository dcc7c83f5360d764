//! HTTP suggestion endpoint client

use reqwest::{Client, Url};

use super::SourceError;
use crate::candidate::{Candidate, parse_candidates};
use crate::error::MedfillError;

/// Client for `GET <endpoint>?term=<query>&limit=<n>`
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: Client,
    endpoint: Url,
}

impl HttpSource {
    /// Validate the endpoint URL and build the client
    pub fn new(endpoint: &str) -> Result<Self, MedfillError> {
        let invalid = |reason: String| MedfillError::InvalidEndpoint {
            url: endpoint.to_string(),
            reason,
        };

        let url = Url::parse(endpoint).map_err(|e| invalid(e.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
        }

        let client = Client::builder()
            .user_agent(concat!("medfill/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| invalid(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: url,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub async fn fetch(&self, term: &str, limit: usize) -> Result<Vec<Candidate>, SourceError> {
        let limit = limit.to_string();
        let response = self
            .client
            .get(self.endpoint.clone())
            .query(&[("term", term), ("limit", limit.as_str())])
            .send()
            .await
            .map_err(|e| SourceError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status(status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| SourceError::Network(e.to_string()))?;

        parse_candidates(&body).map_err(|e| SourceError::Malformed(e.to_string()))
    }
}
