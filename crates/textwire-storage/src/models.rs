// SPDX-FileCopyrightText: 2026 Textwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Row types for the message log.

/// One row of the append-only `messages` table.
///
/// `id` and `created_at` are assigned by SQLite on insert; the row is
/// never updated or deleted by this codebase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageRow {
    pub id: i64,
    pub phone_number: String,
    pub carrier: String,
    pub raw_message: String,
    pub parsed_intent: Option<String>,
    pub created_at: String,
    pub response: Option<String>,
}
