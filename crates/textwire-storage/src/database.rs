// SPDX-FileCopyrightText: 2026 Textwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Database connection management with PRAGMA setup, WAL mode, and lifecycle.
//!
//! All writes are serialized through tokio-rusqlite's single background
//! thread. Do NOT create additional Connection instances for writes.

use tokio_rusqlite::Connection;

use textwire_core::TextwireError;

use crate::migrations;

/// Convert tokio_rusqlite errors into `TextwireError::Storage`.
pub(crate) fn map_tr_err(e: tokio_rusqlite::Error) -> TextwireError {
    TextwireError::Storage {
        source: Box::new(e),
    }
}

/// Handle to the SQLite message store.
///
/// Opening runs migrations and enables WAL journaling plus foreign keys.
/// The connection is opened at run start and closed before exit; there is
/// no concurrent access from this process.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Opens (creating if necessary) the database at `path` and migrates it.
    pub async fn open(path: &str) -> Result<Self, TextwireError> {
        if let Some(parent) = std::path::Path::new(path).parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| TextwireError::Storage {
                source: Box::new(e),
            })?;
        }

        let conn = Connection::open(path)
            .await
            .map_err(|e| map_tr_err(e.into()))?;

        conn.call(|conn| {
            conn.execute_batch(
                "PRAGMA journal_mode=WAL;
                 PRAGMA foreign_keys=ON;
                 PRAGMA busy_timeout=5000;",
            )?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)?;

        conn.call(|conn| migrations::run_migrations(conn))
            .await
            .map_err(|e| TextwireError::Storage {
                source: Box::new(e),
            })?;

        Ok(Self { conn })
    }

    /// Returns the underlying tokio-rusqlite connection.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Checkpoints the WAL and closes the connection.
    pub async fn close(self) -> Result<(), TextwireError> {
        self.conn
            .call(|conn| {
                conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
                Ok(())
            })
            .await
            .map_err(map_tr_err)?;
        self.conn
            .close()
            .await
            .map_err(|e| TextwireError::Storage {
                source: Box::new(e),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn open_creates_schema_and_reopens_cleanly() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("textwire.db");
        let path_str = path.to_str().unwrap();

        let db = Database::open(path_str).await.unwrap();
        let tables: Vec<String> = db
            .connection()
            .call(|conn| {
                let mut stmt = conn.prepare(
                    "SELECT name FROM sqlite_master WHERE type='table' ORDER BY name",
                )?;
                let names = stmt
                    .query_map([], |row| row.get(0))?
                    .collect::<Result<Vec<String>, _>>()?;
                Ok::<_, rusqlite::Error>(names)
            })
            .await
            .unwrap();
        for table in ["messages", "tasks", "habits", "notes"] {
            assert!(tables.iter().any(|t| t == table), "missing table {table}");
        }
        db.close().await.unwrap();

        // Re-opening re-runs the (already applied) migrations without error.
        let db = Database::open(path_str).await.unwrap();
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn open_creates_missing_parent_directory() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested/data/textwire.db");
        let db = Database::open(path.to_str().unwrap()).await.unwrap();
        db.close().await.unwrap();
        assert!(path.exists());
    }
}
