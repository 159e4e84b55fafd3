// SPDX-FileCopyrightText: 2026 Textwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Seam trait definitions for the Textwire pipeline.
//!
//! Every external integration sits behind one of these `#[async_trait]`
//! traits so the orchestrator can be driven with mocks in tests.

pub mod classifier;
pub mod log;
pub mod mailbox;
pub mod sender;

// Re-export all traits at the traits module level for convenience.
pub use classifier::IntentClassifier;
pub use log::MessageLog;
pub use mailbox::MailboxReader;
pub use sender::MessageSender;
