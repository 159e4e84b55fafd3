// SPDX-FileCopyrightText: 2026 Textwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The fetch-classify-log-reply pipeline.
//!
//! One [`RelayPipeline::run`] call processes exactly one batch and returns a
//! [`RunReport`]. Per-message failures are contained to the message; only a
//! fetch failure (including [`TextwireError::NoMessagesFound`]) aborts the
//! run.

use std::sync::Arc;

use textwire_config::model::RelayConfig;
use textwire_core::traits::{IntentClassifier, MailboxReader, MessageLog, MessageSender};
use textwire_core::types::{
    Classification, InboundSms, RelayMode, Selection, SelectionKind, CLASSIFY_ERROR_SENTINEL,
};
use textwire_core::TextwireError;
use tracing::{debug, info, warn};

use crate::report::{ItemReport, RunReport};

/// Builds the run's [`Selection`] from relay configuration.
///
/// `unread-matching` without a target phone is a configuration error; the
/// validation layer catches it earlier, this is the last line.
pub fn build_selection(relay: &RelayConfig) -> Result<Selection, TextwireError> {
    match relay.selection {
        SelectionKind::All => Ok(Selection::All {
            limit: relay.fetch_limit,
        }),
        SelectionKind::Unread => Ok(Selection::Unread),
        SelectionKind::UnreadMatching => {
            let phone = relay.target_phone.clone().ok_or_else(|| {
                TextwireError::Config(
                    "relay.selection = \"unread-matching\" requires relay.target_phone".into(),
                )
            })?;
            Ok(Selection::UnreadMatching { phone })
        }
    }
}

/// The relay orchestrator.
///
/// Owns trait objects for the four seams so tests can substitute any of
/// them independently.
pub struct RelayPipeline {
    mailbox: Arc<dyn MailboxReader>,
    classifier: Arc<dyn IntentClassifier>,
    log: Arc<dyn MessageLog>,
    sender: Arc<dyn MessageSender>,
    mode: RelayMode,
    selection: Selection,
    confirmation: String,
}

impl RelayPipeline {
    pub fn new(
        mailbox: Arc<dyn MailboxReader>,
        classifier: Arc<dyn IntentClassifier>,
        log: Arc<dyn MessageLog>,
        sender: Arc<dyn MessageSender>,
        relay: &RelayConfig,
    ) -> Result<Self, TextwireError> {
        let selection = build_selection(relay)?;
        Ok(Self {
            mailbox,
            classifier,
            log,
            sender,
            mode: relay.mode,
            selection,
            confirmation: relay.confirmation.clone(),
        })
    }

    /// Performs one fetch-classify-log-reply pass.
    ///
    /// Returns `Err` only for fetch failures; everything after the fetch is
    /// captured in the report.
    pub async fn run(&self) -> Result<RunReport, TextwireError> {
        let messages = self.mailbox.fetch(&self.selection).await?;
        info!(count = messages.len(), mode = %self.mode, "processing batch");

        let report = match self.mode {
            RelayMode::Individual => self.run_individual(&messages).await,
            RelayMode::Digest => self.run_digest(&messages).await,
        };
        info!(
            fetched = report.fetched,
            logged = report.logged(),
            replied = report.replies_sent(),
            failed = report.failed(),
            "run complete"
        );
        Ok(report)
    }

    /// Classifies `text`, degrading a classifier failure to the sentinel
    /// payload. Returns the payload to log, the best-effort parse, and
    /// whether the call failed.
    async fn classify_or_sentinel(&self, text: &str) -> (Classification, bool) {
        match self.classifier.classify(text).await {
            Ok(classification) => (classification, false),
            Err(e) => {
                warn!(error = %e, "classification failed, logging sentinel");
                (
                    Classification {
                        raw: CLASSIFY_ERROR_SENTINEL.to_string(),
                        intent: None,
                    },
                    true,
                )
            }
        }
    }

    async fn run_individual(&self, messages: &[InboundSms]) -> RunReport {
        let mut report = RunReport {
            fetched: messages.len(),
            ..RunReport::default()
        };

        for sms in messages {
            let mut item = ItemReport::new(&sms.phone_number, &sms.carrier);

            let (classification, failed) = self.classify_or_sentinel(&sms.body).await;
            item.classifier_failed = failed;

            match self
                .log
                .append(
                    &sms.phone_number,
                    &sms.carrier,
                    &sms.body,
                    &classification.raw,
                    &self.confirmation,
                )
                .await
            {
                Ok(id) => item.row_id = Some(id),
                Err(e) => {
                    // A message that cannot be logged gets no reply.
                    warn!(phone = %sms.phone_number, error = %e, "store write failed, abandoning message");
                    item.errors.push(format!("store write failed: {e}"));
                    report.items.push(item);
                    continue;
                }
            }

            // Structured dispatch is best-effort; the opaque message row is
            // the source of truth.
            if let Some(intent) = &classification.intent {
                if let Err(e) = self.log.record_intent(intent).await {
                    warn!(phone = %sms.phone_number, error = %e, "intent dispatch failed");
                    item.errors.push(format!("intent dispatch failed: {e}"));
                }
            } else {
                debug!(phone = %sms.phone_number, "no structured intent to dispatch");
            }

            match self
                .sender
                .send(&sms.phone_number, &sms.carrier, &self.confirmation, None)
                .await
            {
                Ok(()) => item.reply_sent = true,
                Err(e) => {
                    warn!(phone = %sms.phone_number, error = %e, "reply delivery failed");
                    item.errors.push(format!("reply delivery failed: {e}"));
                }
            }

            report.items.push(item);
        }

        report
    }

    async fn run_digest(&self, messages: &[InboundSms]) -> RunReport {
        let mut report = RunReport {
            fetched: messages.len(),
            ..RunReport::default()
        };

        let blob = messages
            .iter()
            .map(|sms| format!("{}: {}", sms.phone_number, sms.body))
            .collect::<Vec<_>>()
            .join("\n");
        let (classification, failed) = self.classify_or_sentinel(&blob).await;
        let reply = classification.raw.as_str();

        for sms in messages {
            let mut item = ItemReport::new(&sms.phone_number, &sms.carrier);
            item.classifier_failed = failed;

            match self
                .log
                .append(
                    &sms.phone_number,
                    &sms.carrier,
                    &sms.body,
                    reply,
                    reply,
                )
                .await
            {
                Ok(id) => item.row_id = Some(id),
                Err(e) => {
                    warn!(phone = %sms.phone_number, error = %e, "store write failed, abandoning message");
                    item.errors.push(format!("store write failed: {e}"));
                    report.items.push(item);
                    continue;
                }
            }

            match self
                .sender
                .send(&sms.phone_number, &sms.carrier, reply, None)
                .await
            {
                Ok(()) => item.reply_sent = true,
                Err(e) => {
                    warn!(phone = %sms.phone_number, error = %e, "reply delivery failed");
                    item.errors.push(format!("reply delivery failed: {e}"));
                }
            }

            report.items.push(item);
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use textwire_core::types::Intent;
    use textwire_test_utils::{FlakyLog, MemoryLog, MockClassifier, MockMailbox, MockSender};

    fn sms(phone: &str, body: &str) -> InboundSms {
        InboundSms {
            phone_number: phone.to_string(),
            carrier: "tmobile".to_string(),
            body: body.to_string(),
        }
    }

    fn relay_config(mode: RelayMode) -> RelayConfig {
        RelayConfig {
            mode,
            ..RelayConfig::default()
        }
    }

    struct Fixture {
        mailbox: Arc<MockMailbox>,
        classifier: Arc<MockClassifier>,
        log: Arc<MemoryLog>,
        sender: Arc<MockSender>,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                mailbox: Arc::new(MockMailbox::new()),
                classifier: Arc::new(MockClassifier::new()),
                log: Arc::new(MemoryLog::new()),
                sender: Arc::new(MockSender::new()),
            }
        }

        fn pipeline(&self, mode: RelayMode) -> RelayPipeline {
            self.pipeline_with_log(mode, Arc::clone(&self.log) as Arc<dyn MessageLog>)
        }

        fn pipeline_with_log(&self, mode: RelayMode, log: Arc<dyn MessageLog>) -> RelayPipeline {
            RelayPipeline::new(
                Arc::clone(&self.mailbox) as Arc<dyn MailboxReader>,
                Arc::clone(&self.classifier) as Arc<dyn IntentClassifier>,
                log,
                Arc::clone(&self.sender) as Arc<dyn MessageSender>,
                &relay_config(mode),
            )
            .unwrap()
        }
    }

    #[test]
    fn build_selection_requires_target_phone_for_matching() {
        let relay = RelayConfig {
            selection: SelectionKind::UnreadMatching,
            target_phone: None,
            ..RelayConfig::default()
        };
        assert!(matches!(
            build_selection(&relay),
            Err(TextwireError::Config(_))
        ));

        let relay = RelayConfig {
            selection: SelectionKind::UnreadMatching,
            target_phone: Some("15052897944".into()),
            ..RelayConfig::default()
        };
        assert_eq!(
            build_selection(&relay).unwrap(),
            Selection::UnreadMatching {
                phone: "15052897944".into()
            }
        );
    }

    #[tokio::test]
    async fn empty_mailbox_aborts_with_no_messages_found() {
        let fx = Fixture::new();
        // MockMailbox with no queued batches reports NoMessagesFound.
        let err = fx
            .pipeline(RelayMode::Individual)
            .run()
            .await
            .unwrap_err();
        assert!(matches!(err, TextwireError::NoMessagesFound));
        assert!(fx.sender.sent().is_empty());
    }

    #[tokio::test]
    async fn individual_mode_logs_and_confirms_each_message() {
        let fx = Fixture::new();
        fx.mailbox
            .push_batch(vec![sms("15052897944", "buy milk"), sms("15055551234", "ran 5k")]);
        fx.classifier
            .push_ok(r#"{"kind": "task", "description": "buy milk"}"#);
        fx.classifier
            .push_ok(r#"{"kind": "habit", "name": "running"}"#);

        let report = fx.pipeline(RelayMode::Individual).run().await.unwrap();

        assert_eq!(report.fetched, 2);
        assert_eq!(report.logged(), 2);
        assert_eq!(report.replies_sent(), 2);
        assert_eq!(report.failed(), 0);

        let rows = fx.log.rows();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].raw_message, "buy milk");
        assert_eq!(rows[0].response, "Got it! Your message has been processed.");

        let intents = fx.log.intents();
        assert_eq!(intents.len(), 2);
        assert!(matches!(intents[0], Intent::Task { .. }));

        let sent = fx.sender.sent();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].body, "Got it! Your message has been processed.");
        assert_eq!(sent[0].subject, None);
    }

    #[tokio::test]
    async fn classifier_failure_logs_sentinel_and_still_replies() {
        let fx = Fixture::new();
        fx.mailbox.push_batch(vec![sms("15052897944", "???")]);
        fx.classifier.push_err(TextwireError::Classifier {
            message: "api returned 500".into(),
            source: None,
        });

        let report = fx.pipeline(RelayMode::Individual).run().await.unwrap();

        assert!(report.items[0].classifier_failed);
        assert!(report.items[0].reply_sent);
        assert_eq!(fx.log.rows()[0].parsed_intent, CLASSIFY_ERROR_SENTINEL);
        assert!(fx.log.intents().is_empty());
        assert_eq!(fx.sender.sent().len(), 1);
    }

    #[tokio::test]
    async fn store_failure_abandons_message_but_not_batch() {
        let fx = Fixture::new();
        fx.mailbox
            .push_batch(vec![sms("15052897944", "first"), sms("15055551234", "second")]);
        fx.classifier.push_ok(r#"{"kind": "note", "content": "first"}"#);
        fx.classifier.push_ok(r#"{"kind": "note", "content": "second"}"#);

        let flaky = FlakyLog::failing_on(Arc::clone(&fx.log) as Arc<dyn MessageLog>, 1);
        let report = fx
            .pipeline_with_log(RelayMode::Individual, Arc::new(flaky))
            .run()
            .await
            .unwrap();

        // First message abandoned, no reply; second fully processed.
        assert_eq!(report.items[0].row_id, None);
        assert!(!report.items[0].reply_sent);
        assert!(report.items[1].row_id.is_some());
        assert!(report.items[1].reply_sent);

        let sent = fx.sender.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].phone_number, "15055551234");
    }

    #[tokio::test]
    async fn send_failure_is_reported_and_batch_continues() {
        let fx = Fixture::new();
        fx.mailbox
            .push_batch(vec![sms("15052897944", "first"), sms("15055551234", "second")]);
        fx.classifier.push_ok(r#"{"kind": "note", "content": "a"}"#);
        fx.classifier.push_ok(r#"{"kind": "note", "content": "b"}"#);
        fx.sender.fail_for("15052897944");

        let report = fx.pipeline(RelayMode::Individual).run().await.unwrap();

        assert!(!report.items[0].reply_sent);
        assert!(report.items[0].row_id.is_some(), "row logged before reply");
        assert!(report.items[1].reply_sent);
        assert_eq!(report.replies_sent(), 1);
    }

    #[tokio::test]
    async fn intent_dispatch_failure_does_not_block_reply() {
        let fx = Fixture::new();
        fx.mailbox.push_batch(vec![sms("15052897944", "buy milk")]);
        fx.classifier
            .push_ok(r#"{"kind": "task", "description": "buy milk"}"#);

        // Append 1 succeeds, the intent dispatch (call 2) fails.
        let flaky = FlakyLog::failing_on(Arc::clone(&fx.log) as Arc<dyn MessageLog>, 2);
        let report = fx
            .pipeline_with_log(RelayMode::Individual, Arc::new(flaky))
            .run()
            .await
            .unwrap();

        assert!(report.items[0].row_id.is_some());
        assert!(report.items[0].reply_sent);
        assert_eq!(report.items[0].errors.len(), 1);
    }

    #[tokio::test]
    async fn digest_mode_classifies_once_and_replies_to_every_sender() {
        let fx = Fixture::new();
        fx.mailbox
            .push_batch(vec![sms("15052897944", "buy milk"), sms("15055551234", "ran 5k")]);
        fx.classifier
            .push_ok(r#"{"kind": "note", "content": "summary of two messages"}"#);

        let report = fx.pipeline(RelayMode::Digest).run().await.unwrap();

        assert_eq!(fx.classifier.calls().len(), 1);
        let blob = &fx.classifier.calls()[0];
        assert!(blob.contains("15052897944: buy milk"));
        assert!(blob.contains("15055551234: ran 5k"));

        assert_eq!(report.logged(), 2);
        let rows = fx.log.rows();
        assert_eq!(rows[0].parsed_intent, rows[1].parsed_intent);

        // Digest mode never dispatches structured records.
        assert!(fx.log.intents().is_empty());

        let sent = fx.sender.sent();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].body, sent[1].body);
        assert!(sent[0].body.contains("summary of two messages"));
    }

    #[tokio::test]
    async fn digest_classifier_failure_replies_with_sentinel() {
        let fx = Fixture::new();
        fx.mailbox.push_batch(vec![sms("15052897944", "hello")]);
        fx.classifier.push_err(TextwireError::Classifier {
            message: "timeout".into(),
            source: None,
        });

        let report = fx.pipeline(RelayMode::Digest).run().await.unwrap();

        assert!(report.items[0].classifier_failed);
        assert_eq!(fx.sender.sent()[0].body, CLASSIFY_ERROR_SENTINEL);
        assert_eq!(fx.log.rows()[0].parsed_intent, CLASSIFY_ERROR_SENTINEL);
    }

    #[tokio::test]
    async fn fetch_transport_failure_propagates() {
        let fx = Fixture::new();
        fx.mailbox.push_error(TextwireError::Mail {
            message: "login failed".into(),
            source: None,
        });

        let err = fx
            .pipeline(RelayMode::Individual)
            .run()
            .await
            .unwrap_err();
        assert!(matches!(err, TextwireError::Mail { .. }));
    }
}
