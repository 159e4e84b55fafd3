// SPDX-FileCopyrightText: 2026 Textwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! [`MessageLog`] implementation over the SQLite store.

use async_trait::async_trait;
use textwire_core::traits::MessageLog;
use textwire_core::types::Intent;
use textwire_core::TextwireError;
use tracing::debug;

use crate::database::Database;
use crate::queries;

/// SQLite-backed message log.
///
/// Owns the [`Database`] handle for the duration of one relay run.
pub struct SqliteLog {
    db: Database,
}

impl SqliteLog {
    /// Opens (and migrates) the database at `path`.
    pub async fn open(path: &str) -> Result<Self, TextwireError> {
        let db = Database::open(path).await?;
        Ok(Self { db })
    }

    /// Wraps an existing database handle.
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Access to the underlying database (read-back helpers, doctor).
    pub fn database(&self) -> &Database {
        &self.db
    }

    /// Checkpoints and closes the underlying connection.
    pub async fn close(self) -> Result<(), TextwireError> {
        self.db.close().await
    }
}

#[async_trait]
impl MessageLog for SqliteLog {
    async fn append(
        &self,
        phone_number: &str,
        carrier: &str,
        raw_message: &str,
        parsed_intent: &str,
        response: &str,
    ) -> Result<i64, TextwireError> {
        let id = queries::messages::insert_message(
            &self.db,
            phone_number,
            carrier,
            raw_message,
            parsed_intent,
            response,
        )
        .await?;
        debug!(id, phone_number, "message row appended");
        Ok(id)
    }

    async fn record_intent(&self, intent: &Intent) -> Result<(), TextwireError> {
        match intent {
            Intent::Task {
                description,
                due_date,
            } => {
                queries::records::insert_task(&self.db, description, due_date.as_deref()).await?;
            }
            Intent::Habit { name, frequency } => {
                queries::records::insert_habit(&self.db, name, frequency.as_deref()).await?;
            }
            Intent::Note { content } => {
                queries::records::insert_note(&self.db, content).await?;
            }
        }
        Ok(())
    }
}
