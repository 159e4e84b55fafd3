// SPDX-FileCopyrightText: 2026 Textwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Anthropic Messages API request/response types.
//!
//! Only the non-streaming, text-only subset the classifier needs.

use serde::{Deserialize, Serialize};

/// A request to the Anthropic Messages API.
#[derive(Debug, Clone, Serialize)]
pub struct MessageRequest {
    /// Model identifier (e.g., "claude-haiku-4-5-20250901").
    pub model: String,

    /// Conversation messages. The classifier always sends one user turn.
    pub messages: Vec<ApiMessage>,

    /// System prompt (optional).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,

    /// Maximum tokens to generate.
    pub max_tokens: u32,
}

/// A single message in the Anthropic conversation format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiMessage {
    /// Role: "user" or "assistant".
    pub role: String,

    /// Plain text content.
    pub content: String,
}

/// A full response from the Anthropic Messages API.
#[derive(Debug, Clone, Deserialize)]
pub struct MessageResponse {
    /// Response ID.
    pub id: String,
    /// Response type (always "message").
    #[serde(rename = "type")]
    pub type_: String,
    /// Role (always "assistant").
    pub role: String,
    /// Content blocks in the response.
    pub content: Vec<ResponseContentBlock>,
    /// Model that generated the response.
    pub model: String,
    /// Reason the generation stopped.
    pub stop_reason: Option<String>,
    /// Token usage statistics.
    pub usage: ApiUsage,
}

impl MessageResponse {
    /// Concatenated text of all text content blocks.
    pub fn text(&self) -> String {
        self.content
            .iter()
            .map(|b| match b {
                ResponseContentBlock::Text { text } => text.as_str(),
            })
            .collect()
    }
}

/// A content block in a response.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(tag = "type")]
pub enum ResponseContentBlock {
    /// Text content block.
    #[serde(rename = "text")]
    Text { text: String },
}

/// Token usage statistics from the API.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ApiUsage {
    /// Number of input tokens consumed.
    pub input_tokens: u32,
    /// Number of output tokens generated.
    pub output_tokens: u32,
}

/// Error envelope returned by the API on non-2xx responses.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorResponse {
    /// The error detail.
    pub error: ApiErrorDetail,
}

/// Detail of an API error.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorDetail {
    /// Error type (e.g., "invalid_request_error").
    #[serde(rename = "type")]
    pub type_: String,
    /// Human-readable error message.
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_omits_absent_system_prompt() {
        let request = MessageRequest {
            model: "m".into(),
            messages: vec![ApiMessage {
                role: "user".into(),
                content: "hi".into(),
            }],
            system: None,
            max_tokens: 16,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("system").is_none());
        assert_eq!(json["messages"][0]["content"], "hi");
    }

    #[test]
    fn response_text_joins_blocks() {
        let response: MessageResponse = serde_json::from_value(serde_json::json!({
            "id": "msg_1",
            "type": "message",
            "role": "assistant",
            "content": [
                {"type": "text", "text": "{\"kind\": "},
                {"type": "text", "text": "\"note\", \"content\": \"hi\"}"}
            ],
            "model": "m",
            "stop_reason": "end_turn",
            "usage": {"input_tokens": 1, "output_tokens": 2}
        }))
        .unwrap();
        assert_eq!(response.text(), r#"{"kind": "note", "content": "hi"}"#);
    }

    #[test]
    fn api_error_envelope_parses() {
        let err: ApiErrorResponse = serde_json::from_str(
            r#"{"error": {"type": "overloaded_error", "message": "busy"}}"#,
        )
        .unwrap();
        assert_eq!(err.error.type_, "overloaded_error");
        assert_eq!(err.error.message, "busy");
    }
}
