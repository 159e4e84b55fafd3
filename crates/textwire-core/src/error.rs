// SPDX-FileCopyrightText: 2026 Textwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Textwire relay.

use thiserror::Error;

/// The primary error type used across all Textwire seam traits and core operations.
#[derive(Debug, Error)]
pub enum TextwireError {
    /// Configuration errors (invalid TOML, missing required fields, type mismatches).
    #[error("configuration error: {0}")]
    Config(String),

    /// The mailbox selection matched zero messages, or none survived filtering.
    ///
    /// A distinguishable outcome, not a defect: the caller ends the run
    /// quietly instead of treating it as an empty batch.
    #[error("no messages found matching the selection")]
    NoMessagesFound,

    /// Mail transport errors (IMAP/SMTP connection, authentication, protocol).
    #[error("mail error: {message}")]
    Mail {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Classifier errors (API failure, malformed response, missing credentials).
    #[error("classifier error: {message}")]
    Classifier {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Storage backend errors (database open, query failure).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}
