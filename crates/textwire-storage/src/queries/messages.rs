// SPDX-FileCopyrightText: 2026 Textwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Insert and read-back operations for the `messages` log.
//!
//! The core contract is insert-only; the read helpers exist for tests
//! and `textwire doctor`.

use rusqlite::params;
use textwire_core::TextwireError;

use crate::database::{map_tr_err, Database};
use crate::models::MessageRow;

/// Insert one message row and return its auto-assigned id.
pub async fn insert_message(
    db: &Database,
    phone_number: &str,
    carrier: &str,
    raw_message: &str,
    parsed_intent: &str,
    response: &str,
) -> Result<i64, TextwireError> {
    let phone_number = phone_number.to_string();
    let carrier = carrier.to_string();
    let raw_message = raw_message.to_string();
    let parsed_intent = parsed_intent.to_string();
    let response = response.to_string();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO messages (phone_number, carrier, raw_message, parsed_intent, response)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![phone_number, carrier, raw_message, parsed_intent, response],
            )?;
            Ok(conn.last_insert_rowid())
        })
        .await
        .map_err(map_tr_err)
}

/// Get a message row by id.
pub async fn get_message(db: &Database, id: i64) -> Result<Option<MessageRow>, TextwireError> {
    db.connection()
        .call(move |conn| {
            use rusqlite::OptionalExtension;
            let row = conn
                .query_row(
                    "SELECT id, phone_number, carrier, raw_message, parsed_intent, created_at, response
                     FROM messages WHERE id = ?1",
                    params![id],
                    |row| {
                        Ok(MessageRow {
                            id: row.get(0)?,
                            phone_number: row.get(1)?,
                            carrier: row.get(2)?,
                            raw_message: row.get(3)?,
                            parsed_intent: row.get(4)?,
                            created_at: row.get(5)?,
                            response: row.get(6)?,
                        })
                    },
                )
                .optional()?;
            Ok(row)
        })
        .await
        .map_err(map_tr_err)
}

/// Count logged messages.
pub async fn count_messages(db: &Database) -> Result<i64, TextwireError> {
    db.connection()
        .call(|conn| {
            let count = conn.query_row("SELECT COUNT(*) FROM messages", [], |row| row.get(0))?;
            Ok(count)
        })
        .await
        .map_err(map_tr_err)
}
