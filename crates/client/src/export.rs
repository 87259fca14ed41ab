//! Published-sheet CSV export download.

use std::time::Duration;

use crate::error::ClientError;

/// Fetches the delimited text behind a resolved export URL.
pub struct ExportClient {
    http: reqwest::blocking::Client,
}

impl ExportClient {
    pub fn new(timeout: Duration) -> Self {
        let http = reqwest::blocking::Client::builder()
            .user_agent(format!("pdeck/{}", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self { http }
    }

    /// GET the export URL and return its body as text.
    ///
    /// Any failure here is batch-fatal for the caller: a non-success
    /// status is an error, not a degraded result.
    pub fn fetch_csv(&self, export_url: &str) -> Result<String, ClientError> {
        let response = self
            .http
            .get(export_url)
            .send()
            .map_err(|e| ClientError::Network(e.to_string()))?;

        let status = response.status().as_u16();
        if !response.status().is_success() {
            let body = response.text().unwrap_or_default();
            return Err(ClientError::Http(status, body));
        }

        response.text().map_err(|e| ClientError::Network(e.to_string()))
    }
}
