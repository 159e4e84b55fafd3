// SPDX-FileCopyrightText: 2026 Textwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Textwire relay.
//!
//! This crate provides the foundational trait definitions, error types, and
//! common types used throughout the Textwire workspace. Every external
//! integration (mailbox, sender, classifier, store) implements a seam trait
//! defined here.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::TextwireError;
pub use types::{Classification, InboundSms, Intent, RelayMode, Selection, SelectionKind};

// Re-export all seam traits at crate root.
pub use traits::{IntentClassifier, MailboxReader, MessageLog, MessageSender};
