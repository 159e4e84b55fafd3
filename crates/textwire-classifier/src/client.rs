// SPDX-FileCopyrightText: 2026 Textwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the Anthropic Messages API.
//!
//! Provides [`ClassifierClient`] which handles request construction and
//! authentication. Calls are strictly single-shot: no retry, no streaming.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue};
use textwire_core::TextwireError;
use tracing::debug;

use crate::types::{ApiErrorResponse, MessageRequest, MessageResponse};

/// Base URL for the Anthropic Messages API.
const API_BASE_URL: &str = "https://api.anthropic.com/v1/messages";

/// HTTP client for Anthropic API communication.
#[derive(Debug, Clone)]
pub struct ClassifierClient {
    client: reqwest::Client,
    base_url: String,
}

impl ClassifierClient {
    /// Creates a new Anthropic API client.
    ///
    /// # Arguments
    /// * `api_key` - Anthropic API key for authentication
    /// * `api_version` - API version string (e.g., "2023-06-01")
    pub fn new(api_key: &str, api_version: &str) -> Result<Self, TextwireError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-api-key",
            HeaderValue::from_str(api_key).map_err(|e| {
                TextwireError::Config(format!("invalid API key header value: {e}"))
            })?,
        );
        headers.insert(
            "anthropic-version",
            HeaderValue::from_str(api_version).map_err(|e| {
                TextwireError::Config(format!("invalid API version header value: {e}"))
            })?,
        );
        headers.insert("content-type", HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(60))
            .build()
            .map_err(|e| TextwireError::Classifier {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            base_url: API_BASE_URL.to_string(),
        })
    }

    /// Overrides the base URL (for testing with wiremock).
    #[cfg(test)]
    pub(crate) fn with_base_url(mut self, url: String) -> Self {
        self.base_url = url;
        self
    }

    /// Sends one request and returns the full response.
    ///
    /// Single-shot by design: a transient API error surfaces to the caller
    /// like any other failure, and the orchestrator degrades to the
    /// sentinel payload.
    pub async fn complete(&self, request: &MessageRequest) -> Result<MessageResponse, TextwireError> {
        let response = self
            .client
            .post(&self.base_url)
            .json(request)
            .send()
            .await
            .map_err(|e| TextwireError::Classifier {
                message: format!("HTTP request failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        debug!(status = %status, "classification response received");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = if let Ok(api_err) = serde_json::from_str::<ApiErrorResponse>(&body) {
                format!(
                    "Anthropic API error ({}): {}",
                    api_err.error.type_, api_err.error.message
                )
            } else {
                format!("API returned {status}: {body}")
            };
            return Err(TextwireError::Classifier {
                message,
                source: None,
            });
        }

        let body = response.text().await.map_err(|e| TextwireError::Classifier {
            message: format!("failed to read response body: {e}"),
            source: Some(Box::new(e)),
        })?;
        serde_json::from_str(&body).map_err(|e| TextwireError::Classifier {
            message: format!("failed to parse API response: {e}"),
            source: Some(Box::new(e)),
        })
    }
}
