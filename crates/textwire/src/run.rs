// SPDX-FileCopyrightText: 2026 Textwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `textwire run` (and the bare invocation): one relay pass.

use std::sync::Arc;

use textwire_carriers::CarrierDirectory;
use textwire_classifier::AnthropicClassifier;
use textwire_config::TextwireConfig;
use textwire_core::traits::{IntentClassifier, MailboxReader, MessageLog, MessageSender};
use textwire_core::TextwireError;
use textwire_mail::{ImapMailbox, SmtpSender};
use textwire_relay::RelayPipeline;
use textwire_storage::{Database, SqliteLog};
use tracing::info;

/// Performs exactly one fetch-classify-log-reply pass.
///
/// An empty selection is a quiet success; every component is constructed
/// (credentials resolved, selection validated) before the store or the
/// network is touched.
pub async fn run_relay(config: &TextwireConfig) -> Result<(), TextwireError> {
    let directory = CarrierDirectory::from_map(config.carriers.clone())?;
    let mailbox = Arc::new(ImapMailbox::new(&config.mail, directory.clone())?);
    let classifier = Arc::new(AnthropicClassifier::new(&config.classifier)?);
    let sender = Arc::new(SmtpSender::new(&config.mail, directory)?);
    let log = Arc::new(SqliteLog::open(&config.storage.database_path).await?);

    let pipeline = RelayPipeline::new(
        mailbox as Arc<dyn MailboxReader>,
        classifier as Arc<dyn IntentClassifier>,
        Arc::clone(&log) as Arc<dyn MessageLog>,
        sender as Arc<dyn MessageSender>,
        &config.relay,
    )?;

    let result = pipeline.run().await;
    drop(pipeline);
    // The pipeline held the only other reference; close the store cleanly.
    if let Ok(log) = Arc::try_unwrap(log) {
        log.close().await?;
    }

    match result {
        Ok(report) => {
            println!(
                "processed {} message(s): {} logged, {} replied, {} with failures",
                report.fetched,
                report.logged(),
                report.replies_sent(),
                report.failed()
            );
            Ok(())
        }
        Err(TextwireError::NoMessagesFound) => {
            info!("no messages matched the selection; nothing to do");
            Ok(())
        }
        Err(e) => Err(e),
    }
}

/// `textwire init-db`: create or migrate the database, then exit.
pub async fn run_init_db(config: &TextwireConfig) -> Result<(), TextwireError> {
    let db = Database::open(&config.storage.database_path).await?;
    db.close().await?;
    println!("database ready at {}", config.storage.database_path);
    Ok(())
}
