// SPDX-FileCopyrightText: 2026 Textwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Pure message-extraction helpers for the inbound reader.
//!
//! Everything here is free of IMAP state so it can be unit-tested against
//! raw RFC 822 bytes: sender extraction, plain-text body extraction, the
//! most-recent-N sequence window, and the mail-to-[`InboundSms`] filter.

use mail_parser::{Message, MessageParser};
use textwire_carriers::CarrierDirectory;
use textwire_core::types::InboundSms;
use tracing::debug;

/// Extracts the sender address from the `From` header.
///
/// Returns `None` when the header is absent, matching the reader's
/// skip-silently contract.
pub fn sender_address(message: &Message<'_>) -> Option<String> {
    message
        .from()
        .and_then(|from| from.first())
        .and_then(|addr| addr.address())
        .map(|a| a.to_string())
}

/// Extracts the first `text/plain` body part (multipart) or the sole
/// payload (single-part), trimmed of surrounding whitespace.
///
/// Returns `None` when no text body exists or it trims to empty.
pub fn plain_body(message: &Message<'_>) -> Option<String> {
    let body = message.body_text(0)?;
    let trimmed = body.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Converts raw message bytes into an [`InboundSms`], or `None` when the
/// message is filtered out.
///
/// Filtering outcomes (all expected, all silent beyond a debug line):
/// undecodable bytes, missing `From`, sender that fails the address codec,
/// and an empty body.
pub fn to_inbound(directory: &CarrierDirectory, raw: &[u8]) -> Option<InboundSms> {
    let message = MessageParser::default().parse(raw)?;

    let from = match sender_address(&message) {
        Some(from) => from,
        None => {
            debug!("skipping message without From header");
            return None;
        }
    };

    let (phone_number, carrier) = match textwire_carriers::decode(directory, &from) {
        Ok(decoded) => decoded,
        Err(e) => {
            debug!(from, error = %e, "skipping message from non-gateway sender");
            return None;
        }
    };

    let body = match plain_body(&message) {
        Some(body) => body,
        None => {
            debug!(from, "skipping message with empty body");
            return None;
        }
    };

    Some(InboundSms {
        phone_number,
        carrier,
        body,
    })
}

/// Whether `from` decodes to exactly the target phone number.
///
/// Used by the targeted selection's envelope peek; a sender that fails to
/// decode simply does not match.
pub fn matches_target(directory: &CarrierDirectory, from: &str, target: &str) -> bool {
    matches!(textwire_carriers::decode(directory, from), Ok((phone, _)) if phone == target)
}

/// Sequence set covering the most recent `limit` of `total` messages,
/// oldest first. `None` when the mailbox is empty or the limit is zero.
pub fn recent_window(total: u32, limit: usize) -> Option<String> {
    if total == 0 || limit == 0 {
        return None;
    }
    let start = total.saturating_sub(limit as u32 - 1).max(1);
    Some(format!("{start}:{total}"))
}
