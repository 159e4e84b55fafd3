// SPDX-FileCopyrightText: 2026 Textwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Batch reporting for a relay run.
//!
//! Per-message failures never abort the batch, so the caller needs a
//! structured account of what actually happened. One [`ItemReport`] per
//! processed message, collected into the [`RunReport`] that `run()` returns.

/// Outcome of processing one inbound message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemReport {
    /// Sender phone number, digits only.
    pub phone_number: String,
    /// Carrier identifier for the sender.
    pub carrier: String,
    /// Message Log row id, `None` when the store write failed.
    pub row_id: Option<i64>,
    /// The classifier call failed and the sentinel payload was logged.
    pub classifier_failed: bool,
    /// The reply was handed to the outbound sender successfully.
    pub reply_sent: bool,
    /// Human-readable descriptions of every failure this item hit.
    pub errors: Vec<String>,
}

impl ItemReport {
    pub(crate) fn new(phone_number: &str, carrier: &str) -> Self {
        Self {
            phone_number: phone_number.to_string(),
            carrier: carrier.to_string(),
            row_id: None,
            classifier_failed: false,
            reply_sent: false,
            errors: Vec::new(),
        }
    }

    /// Item completed without any recorded failure.
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty() && !self.classifier_failed
    }
}

/// Outcome of one relay run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    /// Messages the reader returned for this run.
    pub fetched: usize,
    /// One entry per fetched message, in processing order.
    pub items: Vec<ItemReport>,
}

impl RunReport {
    /// Messages whose confirmation reply went out.
    pub fn replies_sent(&self) -> usize {
        self.items.iter().filter(|i| i.reply_sent).count()
    }

    /// Messages that logged a Message Log row.
    pub fn logged(&self) -> usize {
        self.items.iter().filter(|i| i.row_id.is_some()).count()
    }

    /// Messages that hit at least one failure.
    pub fn failed(&self) -> usize {
        self.items.iter().filter(|i| !i.is_clean()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_reflect_item_outcomes() {
        let clean = ItemReport {
            row_id: Some(1),
            reply_sent: true,
            ..ItemReport::new("15052897944", "tmobile")
        };
        let degraded = ItemReport {
            row_id: Some(2),
            classifier_failed: true,
            reply_sent: true,
            ..ItemReport::new("15055551234", "verizon")
        };
        let abandoned = ItemReport {
            errors: vec!["storage error: disk full".into()],
            ..ItemReport::new("15055556789", "at&t")
        };

        let report = RunReport {
            fetched: 3,
            items: vec![clean, degraded, abandoned],
        };
        assert_eq!(report.replies_sent(), 2);
        assert_eq!(report.logged(), 2);
        assert_eq!(report.failed(), 2);
    }
}
