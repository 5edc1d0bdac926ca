use crate::models::RawResultRow;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when talking to the timing provider
#[derive(Debug, Error)]
pub enum TimingError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Provider returned error: {0}")]
    ApiError(String),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// HTTP client for the external race-timing provider
///
/// The provider exposes one endpoint per category returning raw
/// string-keyed result rows. This client only reports failures; the
/// feed cache above it is what absorbs them into empty row sets.
pub struct TimingClient {
    client: Client,
}

impl TimingClient {
    /// Create a new timing client with the given fetch timeout
    pub fn new(timeout_secs: u64) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self { client }
    }

    /// Fetch the raw result rows for one category endpoint
    ///
    /// Accepts either a bare JSON array of row objects or an object
    /// with a "data" array, which is how the provider wraps paged
    /// responses. Rows that are not objects are skipped.
    pub async fn fetch_results(
        &self,
        endpoint_url: &str,
    ) -> Result<Vec<RawResultRow>, TimingError> {
        tracing::debug!("Fetching timing results from: {}", endpoint_url);

        let response = self.client.get(endpoint_url).send().await?;

        if !response.status().is_success() {
            return Err(TimingError::ApiError(format!(
                "Timing provider returned {}",
                response.status()
            )));
        }

        let json: Value = response.json().await?;

        let rows = json
            .as_array()
            .or_else(|| json.get("data").and_then(|d| d.as_array()))
            .ok_or_else(|| {
                TimingError::InvalidResponse("Expected an array of result rows".into())
            })?;

        let rows: Vec<RawResultRow> = rows
            .iter()
            .filter(|v| v.is_object())
            .filter_map(|v| serde_json::from_value(v.clone()).ok())
            .collect();

        tracing::debug!("Fetched {} result rows", rows.len());

        Ok(rows)
    }
}
