// SPDX-FileCopyrightText: 2026 Textwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test support for the Textwire workspace: scriptable mock adapters for
//! the seam traits and a tempdir-backed real SQLite log for end-to-end
//! tests.

pub mod mocks;
pub mod storage;

pub use mocks::{
    FlakyLog, LoggedRow, MemoryLog, MockClassifier, MockMailbox, MockSender, SentMessage,
};
pub use storage::temp_log;
