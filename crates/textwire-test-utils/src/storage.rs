// SPDX-FileCopyrightText: 2026 Textwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Real SQLite storage on a temporary directory.

use tempfile::TempDir;
use textwire_core::TextwireError;
use textwire_storage::SqliteLog;

/// Opens a migrated SQLite log in a fresh temporary directory.
///
/// The returned [`TempDir`] must outlive the log; dropping it removes the
/// database file.
pub async fn temp_log() -> Result<(SqliteLog, TempDir), TextwireError> {
    let dir = TempDir::new().map_err(|e| TextwireError::Storage {
        source: Box::new(e),
    })?;
    let path = dir.path().join("textwire.db");
    let log = SqliteLog::open(&path.to_string_lossy()).await?;
    Ok((log, dir))
}
