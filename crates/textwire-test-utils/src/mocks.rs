// SPDX-FileCopyrightText: 2026 Textwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Scriptable mock implementations of the four seam traits.
//!
//! Responses are queued ahead of the run and consumed in order; recorded
//! calls are readable afterwards. All state sits behind `Arc<Mutex<…>>` so
//! a mock can be shared with the pipeline and inspected from the test.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use textwire_core::traits::{IntentClassifier, MailboxReader, MessageLog, MessageSender};
use textwire_core::types::{Classification, InboundSms, Intent, Selection};
use textwire_core::TextwireError;

/// Mailbox returning pre-queued batches (or errors) in order.
///
/// An exhausted queue reports [`TextwireError::NoMessagesFound`], matching
/// the real reader's empty-selection contract.
#[derive(Default)]
pub struct MockMailbox {
    queue: Mutex<VecDeque<Result<Vec<InboundSms>, TextwireError>>>,
    selections: Mutex<Vec<Selection>>,
}

impl MockMailbox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_batch(&self, batch: Vec<InboundSms>) {
        self.queue.lock().unwrap().push_back(Ok(batch));
    }

    pub fn push_error(&self, error: TextwireError) {
        self.queue.lock().unwrap().push_back(Err(error));
    }

    /// The selections passed to `fetch`, in call order.
    pub fn selections(&self) -> Vec<Selection> {
        self.selections.lock().unwrap().clone()
    }
}

#[async_trait]
impl MailboxReader for MockMailbox {
    async fn fetch(&self, selection: &Selection) -> Result<Vec<InboundSms>, TextwireError> {
        self.selections.lock().unwrap().push(selection.clone());
        self.queue
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(TextwireError::NoMessagesFound))
    }
}

/// Classifier returning pre-queued results in order and recording the
/// text of every call.
#[derive(Default)]
pub struct MockClassifier {
    queue: Mutex<VecDeque<Result<Classification, TextwireError>>>,
    calls: Mutex<Vec<String>>,
}

impl MockClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_ok(&self, raw: &str) {
        self.queue
            .lock()
            .unwrap()
            .push_back(Ok(Classification::from_raw(raw.to_string())));
    }

    pub fn push_err(&self, error: TextwireError) {
        self.queue.lock().unwrap().push_back(Err(error));
    }

    /// The texts passed to `classify`, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl IntentClassifier for MockClassifier {
    async fn classify(&self, text: &str) -> Result<Classification, TextwireError> {
        self.calls.lock().unwrap().push(text.to_string());
        self.queue
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| {
                Err(TextwireError::Internal(
                    "mock classifier has no scripted response".into(),
                ))
            })
    }
}

/// One message handed to [`MockSender::send`] successfully.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentMessage {
    pub phone_number: String,
    pub carrier: String,
    pub body: String,
    pub subject: Option<String>,
}

/// Sender recording successful deliveries, with per-phone scripted failures.
#[derive(Default)]
pub struct MockSender {
    sent: Mutex<Vec<SentMessage>>,
    failing: Mutex<Vec<String>>,
}

impl MockSender {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every `send` to `phone_number` fail with a mail error.
    pub fn fail_for(&self, phone_number: &str) {
        self.failing.lock().unwrap().push(phone_number.to_string());
    }

    /// Successfully delivered messages, in call order.
    pub fn sent(&self) -> Vec<SentMessage> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl MessageSender for MockSender {
    async fn send(
        &self,
        phone_number: &str,
        carrier: &str,
        body: &str,
        subject: Option<&str>,
    ) -> Result<(), TextwireError> {
        if self.failing.lock().unwrap().iter().any(|p| p == phone_number) {
            return Err(TextwireError::Mail {
                message: format!("scripted delivery failure for {phone_number}"),
                source: None,
            });
        }
        self.sent.lock().unwrap().push(SentMessage {
            phone_number: phone_number.to_string(),
            carrier: carrier.to_string(),
            body: body.to_string(),
            subject: subject.map(str::to_string),
        });
        Ok(())
    }
}

/// One row appended to a [`MemoryLog`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggedRow {
    pub id: i64,
    pub phone_number: String,
    pub carrier: String,
    pub raw_message: String,
    pub parsed_intent: String,
    pub response: String,
}

/// In-memory [`MessageLog`] with sequential row ids.
#[derive(Default)]
pub struct MemoryLog {
    rows: Mutex<Vec<LoggedRow>>,
    intents: Mutex<Vec<Intent>>,
}

impl MemoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows(&self) -> Vec<LoggedRow> {
        self.rows.lock().unwrap().clone()
    }

    pub fn intents(&self) -> Vec<Intent> {
        self.intents.lock().unwrap().clone()
    }
}

#[async_trait]
impl MessageLog for MemoryLog {
    async fn append(
        &self,
        phone_number: &str,
        carrier: &str,
        raw_message: &str,
        parsed_intent: &str,
        response: &str,
    ) -> Result<i64, TextwireError> {
        let mut rows = self.rows.lock().unwrap();
        let id = rows.len() as i64 + 1;
        rows.push(LoggedRow {
            id,
            phone_number: phone_number.to_string(),
            carrier: carrier.to_string(),
            raw_message: raw_message.to_string(),
            parsed_intent: parsed_intent.to_string(),
            response: response.to_string(),
        });
        Ok(id)
    }

    async fn record_intent(&self, intent: &Intent) -> Result<(), TextwireError> {
        self.intents.lock().unwrap().push(intent.clone());
        Ok(())
    }
}

/// Wrapper failing the N-th log call (1-based, counting `append` and
/// `record_intent` together) with a storage error, delegating the rest.
pub struct FlakyLog {
    inner: Arc<dyn MessageLog>,
    fail_on: usize,
    calls: AtomicUsize,
}

impl FlakyLog {
    pub fn failing_on(inner: Arc<dyn MessageLog>, fail_on: usize) -> Self {
        Self {
            inner,
            fail_on,
            calls: AtomicUsize::new(0),
        }
    }

    fn should_fail(&self) -> bool {
        self.calls.fetch_add(1, Ordering::SeqCst) + 1 == self.fail_on
    }

    fn injected() -> TextwireError {
        TextwireError::Storage {
            source: Box::new(std::io::Error::other("injected storage failure")),
        }
    }
}

#[async_trait]
impl MessageLog for FlakyLog {
    async fn append(
        &self,
        phone_number: &str,
        carrier: &str,
        raw_message: &str,
        parsed_intent: &str,
        response: &str,
    ) -> Result<i64, TextwireError> {
        if self.should_fail() {
            return Err(Self::injected());
        }
        self.inner
            .append(phone_number, carrier, raw_message, parsed_intent, response)
            .await
    }

    async fn record_intent(&self, intent: &Intent) -> Result<(), TextwireError> {
        if self.should_fail() {
            return Err(Self::injected());
        }
        self.inner.record_intent(intent).await
    }
}
