// SPDX-FileCopyrightText: 2026 Textwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Intent classifier backed by the Anthropic Messages API.
//!
//! Implements [`IntentClassifier`] with a single-shot call: one fixed
//! system instruction, one user turn, no retries, no streaming. Failures
//! come back as typed errors; the orchestrator decides whether to degrade
//! to the sentinel payload.

pub mod client;
pub mod types;

use async_trait::async_trait;
use textwire_config::model::ClassifierConfig;
use textwire_core::traits::IntentClassifier;
use textwire_core::types::Classification;
use textwire_core::TextwireError;
use tracing::{debug, info};

use crate::client::ClassifierClient;
use crate::types::{ApiMessage, MessageRequest};

/// Fixed system instruction for the classification call.
///
/// Directs the model to emit only a tagged JSON object so the raw output
/// can be stored opaquely and parsed best-effort downstream.
const SYSTEM_INSTRUCTION: &str = "\
You are a personal assistant that categorizes incoming text messages. \
Categorize the message into exactly one of: task, habit, or note. \
Respond with only a JSON object and no other text. \
For a task: {\"kind\": \"task\", \"description\": \"...\", \"due_date\": \"...\"} \
(due_date optional). \
For a habit: {\"kind\": \"habit\", \"name\": \"...\", \"frequency\": \"...\"} \
(frequency optional). \
For a note: {\"kind\": \"note\", \"content\": \"...\"}.";

/// Anthropic-backed classifier implementing [`IntentClassifier`].
pub struct AnthropicClassifier {
    client: ClassifierClient,
    model: String,
    max_tokens: u32,
}

impl AnthropicClassifier {
    /// Creates a new classifier from the given configuration.
    ///
    /// # API Key Resolution
    /// 1. `config.api_key` if set
    /// 2. `ANTHROPIC_API_KEY` environment variable
    /// 3. Returns error if neither is available
    pub fn new(config: &ClassifierConfig) -> Result<Self, TextwireError> {
        let api_key = resolve_api_key(&config.api_key)?;
        let client = ClassifierClient::new(&api_key, &config.api_version)?;

        info!(model = config.model, "intent classifier initialized");

        Ok(Self {
            client,
            model: config.model.clone(),
            max_tokens: config.max_tokens,
        })
    }

    /// Creates a classifier with an existing client (for testing).
    #[cfg(test)]
    fn with_client(client: ClassifierClient, model: String, max_tokens: u32) -> Self {
        Self {
            client,
            model,
            max_tokens,
        }
    }

    fn to_request(&self, text: &str) -> MessageRequest {
        MessageRequest {
            model: self.model.clone(),
            messages: vec![ApiMessage {
                role: "user".to_string(),
                content: text.to_string(),
            }],
            system: Some(SYSTEM_INSTRUCTION.to_string()),
            max_tokens: self.max_tokens,
        }
    }
}

#[async_trait]
impl IntentClassifier for AnthropicClassifier {
    async fn classify(&self, text: &str) -> Result<Classification, TextwireError> {
        let request = self.to_request(text);
        let response = self.client.complete(&request).await?;
        let raw = response.text();
        debug!(
            input_tokens = response.usage.input_tokens,
            output_tokens = response.usage.output_tokens,
            "classification complete"
        );
        Ok(Classification::from_raw(raw))
    }
}

/// Resolves the API key: config value first, then `ANTHROPIC_API_KEY`.
fn resolve_api_key(config_key: &Option<String>) -> Result<String, TextwireError> {
    if let Some(key) = config_key
        && !key.is_empty()
    {
        return Ok(key.clone());
    }

    std::env::var("ANTHROPIC_API_KEY").map_err(|_| {
        TextwireError::Config(
            "Anthropic API key not found. Set classifier.api_key in config or ANTHROPIC_API_KEY environment variable.".into(),
        )
    })
}
