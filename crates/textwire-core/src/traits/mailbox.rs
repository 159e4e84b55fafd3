// SPDX-FileCopyrightText: 2026 Textwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Inbound mailbox trait for fetching gateway messages.

use async_trait::async_trait;

use crate::error::TextwireError;
use crate::types::{InboundSms, Selection};

/// Reader for the inbound side of the relay.
///
/// Implementations connect to a mailbox, apply the selection filter, and
/// return fully decoded messages: sender address parsed into phone/carrier,
/// body extracted and trimmed. Messages with a missing `From`, an
/// unrecognized sender address, or an empty body are filtered out silently.
#[async_trait]
pub trait MailboxReader: Send + Sync {
    /// Fetches the messages matching `selection`.
    ///
    /// Fails with [`TextwireError::NoMessagesFound`] when the selection
    /// matches nothing or nothing survives filtering, so the caller can
    /// distinguish "nothing to do" from a transport failure.
    async fn fetch(&self, selection: &Selection) -> Result<Vec<InboundSms>, TextwireError>;
}
