// SPDX-FileCopyrightText: 2026 Textwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Message log trait for the append-only inbound record.

use async_trait::async_trait;

use crate::error::TextwireError;
use crate::types::Intent;

/// Append-only store for relayed messages and their derived records.
#[async_trait]
pub trait MessageLog: Send + Sync {
    /// Appends one inbound message row and returns its auto-assigned id.
    ///
    /// Ids increase monotonically across successive calls. The creation
    /// timestamp is assigned by the store.
    async fn append(
        &self,
        phone_number: &str,
        carrier: &str,
        raw_message: &str,
        parsed_intent: &str,
        response: &str,
    ) -> Result<i64, TextwireError>;

    /// Routes a parsed classification into its structured table
    /// (task, habit, or note).
    async fn record_intent(&self, intent: &Intent) -> Result<(), TextwireError>;
}
