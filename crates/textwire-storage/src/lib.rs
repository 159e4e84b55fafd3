// SPDX-FileCopyrightText: 2026 Textwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite persistence layer for the Textwire relay.
//!
//! Provides WAL-mode SQLite storage with embedded migrations, a
//! single-writer model via `tokio-rusqlite`, and the [`MessageLog`]
//! implementation the orchestrator writes through.
//!
//! [`MessageLog`]: textwire_core::traits::MessageLog

pub mod database;
pub mod log;
pub mod migrations;
pub mod models;
pub mod queries;

pub use database::Database;
pub use log::SqliteLog;
pub use models::MessageRow;
