//! Where the catalogue comes from.

use std::future::Future;
use std::time::Duration;

use tracing::debug;

use crate::catalogue::{DeadlineItem, parse_catalogue};
use crate::error::{DeadlineError, DeadlineResult};

/// Produces a complete, well-formed catalogue or an error. Never a partial one.
pub trait CatalogueSource: Send + Sync {
    fn fetch(&self) -> impl Future<Output = DeadlineResult<Vec<DeadlineItem>>> + Send;
}

/// One unauthenticated GET against a JSON endpoint.
#[derive(Debug, Clone)]
pub struct HttpSource {
    http: reqwest::Client,
    endpoint: String,
}

impl HttpSource {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> DeadlineResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DeadlineError::Fetch(format!("Could not build HTTP client: {e}")))?;

        Ok(HttpSource {
            http,
            endpoint: endpoint.into(),
        })
    }
}

impl CatalogueSource for HttpSource {
    async fn fetch(&self) -> DeadlineResult<Vec<DeadlineItem>> {
        debug!(endpoint = %self.endpoint, "GET catalogue");

        let response = self
            .http
            .get(&self.endpoint)
            .send()
            .await
            .map_err(|e| DeadlineError::Fetch(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DeadlineError::Fetch(format!(
                "{} returned HTTP {}",
                self.endpoint, status
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| DeadlineError::Fetch(format!("Failed to read response body: {e}")))?;

        parse_catalogue(&body)
    }
}

/// Serves a fixed JSON body. Useful offline and in tests.
#[derive(Debug, Clone)]
pub struct StaticSource {
    body: String,
}

impl StaticSource {
    pub fn new(body: impl Into<String>) -> Self {
        StaticSource { body: body.into() }
    }
}

impl CatalogueSource for StaticSource {
    async fn fetch(&self) -> DeadlineResult<Vec<DeadlineItem>> {
        parse_catalogue(&self.body)
    }
}
