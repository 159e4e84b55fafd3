// SPDX-FileCopyrightText: 2026 Textwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Outbound sender trait for SMS-via-email delivery.

use async_trait::async_trait;

use crate::error::TextwireError;

/// Sender for the outbound side of the relay.
///
/// Implementations resolve `(phone_number, carrier)` to a gateway address
/// and transmit one plain-text message. Failures — unknown carrier,
/// authentication, network — come back as `Err` for the caller to check;
/// they are never fatal to the process.
#[async_trait]
pub trait MessageSender: Send + Sync {
    /// Sends `body` to the given phone number through its carrier gateway.
    ///
    /// `subject` is included only when `Some` and non-empty.
    async fn send(
        &self,
        phone_number: &str,
        carrier: &str,
        body: &str,
        subject: Option<&str>,
    ) -> Result<(), TextwireError>;
}
