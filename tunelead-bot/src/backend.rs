//! Backend API client
//!
//! One synchronous HTTP call per operator command, with a bounded
//! timeout. Callers map any error to a generic connectivity notice.

use std::time::Duration;

use thiserror::Error;
use tracing::error;
use tunelead_common::db::models::{Lead, Stats};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Backend returned HTTP {0}")]
    Status(u16),

    #[error("Parse error: {0}")]
    Parse(String),
}

/// HTTP client for the tunelead-api backend.
pub struct BackendClient {
    client: reqwest::Client,
    base_url: String,
}

impl BackendClient {
    pub fn new(base_url: String) -> Result<Self, BackendError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| BackendError::Network(e.to_string()))?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetch the most recent leads.
    pub async fn list_leads(&self, limit: i64) -> Result<Vec<Lead>, BackendError> {
        let url = format!("{}/api/leads?limit={}", self.base_url, limit);
        self.get_json(&url).await
    }

    /// Fetch landing statistics.
    pub async fn stats(&self) -> Result<Stats, BackendError> {
        let url = format!("{}/api/stats", self.base_url);
        self.get_json(&url).await
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
    ) -> Result<T, BackendError> {
        let response = self.client.get(url).send().await.map_err(|e| {
            error!("Error fetching {}: {}", url, e);
            BackendError::Network(e.to_string())
        })?;

        if !response.status().is_success() {
            error!("Backend returned HTTP {} for {}", response.status(), url);
            return Err(BackendError::Status(response.status().as_u16()));
        }

        response
            .json()
            .await
            .map_err(|e| BackendError::Parse(e.to_string()))
    }
}
