// SPDX-FileCopyrightText: 2026 Textwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Inserts into the structured record tables (tasks, habits, notes).
//!
//! Column defaults (`status='pending'`, `streak=0`, timestamps) are left
//! to SQLite.

use rusqlite::params;
use textwire_core::TextwireError;

use crate::database::{map_tr_err, Database};

/// Insert a task record.
pub async fn insert_task(
    db: &Database,
    description: &str,
    due_date: Option<&str>,
) -> Result<i64, TextwireError> {
    let description = description.to_string();
    let due_date = due_date.map(str::to_string);
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO tasks (description, due_date) VALUES (?1, ?2)",
                params![description, due_date],
            )?;
            Ok(conn.last_insert_rowid())
        })
        .await
        .map_err(map_tr_err)
}

/// Insert a habit record.
pub async fn insert_habit(
    db: &Database,
    habit_name: &str,
    frequency: Option<&str>,
) -> Result<i64, TextwireError> {
    let habit_name = habit_name.to_string();
    let frequency = frequency.map(str::to_string);
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO habits (habit_name, frequency) VALUES (?1, ?2)",
                params![habit_name, frequency],
            )?;
            Ok(conn.last_insert_rowid())
        })
        .await
        .map_err(map_tr_err)
}

/// Insert a note record.
pub async fn insert_note(db: &Database, note: &str) -> Result<i64, TextwireError> {
    let note = note.to_string();
    db.connection()
        .call(move |conn| {
            conn.execute("INSERT INTO notes (note) VALUES (?1)", params![note])?;
            Ok(conn.last_insert_rowid())
        })
        .await
        .map_err(map_tr_err)
}

/// Count rows in one of the record tables (test and doctor helper).
pub async fn count_rows(db: &Database, table: &'static str) -> Result<i64, TextwireError> {
    db.connection()
        .call(move |conn| {
            let count = conn.query_row(
                &format!("SELECT COUNT(*) FROM {table}"),
                [],
                |row| row.get(0),
            )?;
            Ok(count)
        })
        .await
        .map_err(map_tr_err)
}
