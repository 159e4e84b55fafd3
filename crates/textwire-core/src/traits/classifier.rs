// SPDX-FileCopyrightText: 2026 Textwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Classifier trait for the hosted language-model call.

use async_trait::async_trait;

use crate::error::TextwireError;
use crate::types::Classification;

/// Single-shot text classifier backed by a hosted language model.
///
/// The call carries no retry or streaming machinery. Transport and model
/// failures surface as `Err`; the orchestrator decides whether to degrade
/// to the sentinel payload.
#[async_trait]
pub trait IntentClassifier: Send + Sync {
    /// Classifies `text` into a task, habit, or note record.
    async fn classify(&self, text: &str) -> Result<Classification, TextwireError>;
}
