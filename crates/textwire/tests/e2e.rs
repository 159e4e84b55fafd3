// SPDX-FileCopyrightText: 2026 Textwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end pipeline tests: mock mailbox, classifier, and sender around a
//! real tempdir SQLite store.

use std::sync::Arc;

use textwire_config::model::RelayConfig;
use textwire_core::traits::{IntentClassifier, MailboxReader, MessageLog, MessageSender};
use textwire_core::types::{InboundSms, RelayMode, CLASSIFY_ERROR_SENTINEL};
use textwire_core::TextwireError;
use textwire_relay::RelayPipeline;
use textwire_storage::{queries, SqliteLog};
use textwire_test_utils::{temp_log, MockClassifier, MockMailbox, MockSender};

struct Harness {
    mailbox: Arc<MockMailbox>,
    classifier: Arc<MockClassifier>,
    sender: Arc<MockSender>,
    log: Arc<SqliteLog>,
    _dir: tempfile::TempDir,
}

impl Harness {
    async fn new() -> Self {
        let (log, dir) = temp_log().await.expect("tempdir store");
        Self {
            mailbox: Arc::new(MockMailbox::new()),
            classifier: Arc::new(MockClassifier::new()),
            sender: Arc::new(MockSender::new()),
            log: Arc::new(log),
            _dir: dir,
        }
    }

    fn pipeline(&self, mode: RelayMode) -> RelayPipeline {
        let relay = RelayConfig {
            mode,
            ..RelayConfig::default()
        };
        RelayPipeline::new(
            Arc::clone(&self.mailbox) as Arc<dyn MailboxReader>,
            Arc::clone(&self.classifier) as Arc<dyn IntentClassifier>,
            Arc::clone(&self.log) as Arc<dyn MessageLog>,
            Arc::clone(&self.sender) as Arc<dyn MessageSender>,
            &relay,
        )
        .expect("pipeline construction")
    }
}

fn sms(phone: &str, carrier: &str, body: &str) -> InboundSms {
    InboundSms {
        phone_number: phone.to_string(),
        carrier: carrier.to_string(),
        body: body.to_string(),
    }
}

#[tokio::test]
async fn individual_run_persists_rows_and_records() {
    let h = Harness::new().await;
    h.mailbox.push_batch(vec![
        sms("15052897944", "tmobile", "buy milk tomorrow"),
        sms("15055551234", "verizon", "note: great taco place on 4th"),
    ]);
    h.classifier.push_ok(
        r#"{"kind": "task", "description": "buy milk", "due_date": "2026-08-27"}"#,
    );
    h.classifier
        .push_ok(r#"{"kind": "note", "content": "great taco place on 4th"}"#);

    let report = h.pipeline(RelayMode::Individual).run().await.unwrap();
    assert_eq!(report.fetched, 2);
    assert_eq!(report.failed(), 0);

    let db = h.log.database();
    assert_eq!(queries::messages::count_messages(db).await.unwrap(), 2);
    assert_eq!(queries::records::count_rows(db, "tasks").await.unwrap(), 1);
    assert_eq!(queries::records::count_rows(db, "notes").await.unwrap(), 1);
    assert_eq!(queries::records::count_rows(db, "habits").await.unwrap(), 0);

    let first = queries::messages::get_message(db, 1).await.unwrap().unwrap();
    assert_eq!(first.phone_number, "15052897944");
    assert_eq!(first.carrier, "tmobile");
    assert_eq!(first.raw_message, "buy milk tomorrow");
    assert_eq!(
        first.response.as_deref(),
        Some("Got it! Your message has been processed.")
    );

    let sent = h.sender.sent();
    assert_eq!(sent.len(), 2);
    assert!(sent.iter().all(|s| s.subject.is_none()));
}

#[tokio::test]
async fn classifier_outage_logs_sentinel_and_replies() {
    let h = Harness::new().await;
    h.mailbox
        .push_batch(vec![sms("15052897944", "tmobile", "gibberish")]);
    h.classifier.push_err(TextwireError::Classifier {
        message: "connection reset".into(),
        source: None,
    });

    let report = h.pipeline(RelayMode::Individual).run().await.unwrap();
    assert!(report.items[0].classifier_failed);
    assert!(report.items[0].reply_sent);

    let db = h.log.database();
    let row = queries::messages::get_message(db, 1).await.unwrap().unwrap();
    assert_eq!(row.parsed_intent.as_deref(), Some(CLASSIFY_ERROR_SENTINEL));
    // No structured record is created from the sentinel.
    assert_eq!(queries::records::count_rows(db, "tasks").await.unwrap(), 0);
    assert_eq!(h.sender.sent().len(), 1);
}

#[tokio::test]
async fn digest_run_shares_one_classification() {
    let h = Harness::new().await;
    h.mailbox.push_batch(vec![
        sms("15052897944", "tmobile", "buy milk"),
        sms("15055551234", "verizon", "ran 5k today"),
    ]);
    h.classifier
        .push_ok(r#"{"kind": "note", "content": "one errand, one workout"}"#);

    let report = h.pipeline(RelayMode::Digest).run().await.unwrap();
    assert_eq!(report.logged(), 2);
    assert_eq!(h.classifier.calls().len(), 1);

    let db = h.log.database();
    let a = queries::messages::get_message(db, 1).await.unwrap().unwrap();
    let b = queries::messages::get_message(db, 2).await.unwrap().unwrap();
    assert_eq!(a.parsed_intent, b.parsed_intent);
    assert_eq!(a.response, b.response);
    // Digest mode leaves the structured tables alone.
    assert_eq!(queries::records::count_rows(db, "notes").await.unwrap(), 0);

    let sent = h.sender.sent();
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[0].body, sent[1].body);
}

#[tokio::test]
async fn empty_selection_leaves_store_untouched() {
    let h = Harness::new().await;

    let err = h.pipeline(RelayMode::Individual).run().await.unwrap_err();
    assert!(matches!(err, TextwireError::NoMessagesFound));

    let db = h.log.database();
    assert_eq!(queries::messages::count_messages(db).await.unwrap(), 0);
    assert!(h.sender.sent().is_empty());
}

#[tokio::test]
async fn row_ids_increase_across_runs_on_one_store() {
    let h = Harness::new().await;
    h.mailbox
        .push_batch(vec![sms("15052897944", "tmobile", "first")]);
    h.mailbox
        .push_batch(vec![sms("15052897944", "tmobile", "second")]);
    h.classifier.push_ok(r#"{"kind": "note", "content": "first"}"#);
    h.classifier.push_ok(r#"{"kind": "note", "content": "second"}"#);

    let pipeline = h.pipeline(RelayMode::Individual);
    let first = pipeline.run().await.unwrap();
    let second = pipeline.run().await.unwrap();

    let first_id = first.items[0].row_id.unwrap();
    let second_id = second.items[0].row_id.unwrap();
    assert!(second_id > first_id);
}
