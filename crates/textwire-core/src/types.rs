// SPDX-FileCopyrightText: 2026 Textwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared across the Textwire workspace.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// The literal payload logged in place of a classification when the
/// classifier call fails. The orchestrator applies it; the classifier
/// itself returns a typed error.
pub const CLASSIFY_ERROR_SENTINEL: &str = r#"{"error": "Unable to process the message"}"#;

/// One text message extracted from a gateway email.
///
/// Constructed per fetched mail item and consumed within a single relay
/// run; the only durable trace is its Message Log row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundSms {
    /// Sender phone number, digits only (any leading `+` already stripped).
    pub phone_number: String,
    /// Carrier identifier resolved from the gateway domain.
    pub carrier: String,
    /// Plain-text message body, whitespace-trimmed, never empty.
    pub body: String,
}

/// Mailbox filter criterion for one relay run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// Every mailbox message; the most recent `limit`, oldest first.
    All { limit: usize },
    /// Unread messages in natural mailbox order.
    Unread,
    /// Unread messages whose decoded sender equals `phone` exactly.
    /// Non-matching messages are skipped and left unread.
    UnreadMatching { phone: String },
}

/// Which deployment variant a run uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum RelayMode {
    /// Classify, persist, and confirm each message independently.
    Individual,
    /// Concatenate all bodies, classify once, reply the result to every sender.
    Digest,
}

/// Which selection filter a run uses; combined with the configured limit
/// or target phone to build a [`Selection`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum SelectionKind {
    All,
    Unread,
    UnreadMatching,
}

/// Structured record parsed from the classifier's JSON output.
///
/// The wire shape is a tagged object: `{"kind": "task", ...}`. Unknown
/// extra fields are ignored so a chatty model does not break parsing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Intent {
    Task {
        description: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        due_date: Option<String>,
    },
    Habit {
        name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        frequency: Option<String>,
    },
    Note { content: String },
}

/// Classifier output: the raw model text plus a best-effort structured parse.
///
/// `intent` is `None` when the model produced text that is not a recognized
/// tagged JSON object; the raw string is still stored opaquely.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub raw: String,
    pub intent: Option<Intent>,
}

impl Classification {
    /// Builds a classification from raw model text, attempting the
    /// structured parse without failing on unrecognized shapes.
    pub fn from_raw(raw: String) -> Self {
        let intent = serde_json::from_str::<Intent>(&raw).ok();
        Self { raw, intent }
    }
}
