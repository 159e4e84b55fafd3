// SPDX-FileCopyrightText: 2026 Textwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Outbound SMTP sender.
//!
//! Delivers plain-text replies to carrier gateway addresses over a
//! STARTTLS relay. Every failure path surfaces as `TextwireError::Mail`;
//! nothing here panics the run.

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use textwire_carriers::CarrierDirectory;
use textwire_config::model::MailConfig;
use textwire_core::traits::MessageSender;
use textwire_core::TextwireError;
use tracing::debug;

use crate::resolve_credentials;

/// Subject line to actually send, if any. `None` and blank subjects both
/// produce a subjectless message.
fn effective_subject(subject: Option<&str>) -> Option<&str> {
    subject.map(str::trim).filter(|s| !s.is_empty())
}

/// SMTP-backed outbound sender implementing [`MessageSender`].
#[derive(Debug)]
pub struct SmtpSender {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    directory: CarrierDirectory,
}

impl SmtpSender {
    /// Creates a sender from mail configuration and the carrier directory.
    ///
    /// The transport is built eagerly but connects lazily, so this fails
    /// only on missing credentials, an unparseable account address, or an
    /// unusable relay host.
    pub fn new(config: &MailConfig, directory: CarrierDirectory) -> Result<Self, TextwireError> {
        let (address, password) = resolve_credentials(config)?;
        let from: Mailbox = address.parse().map_err(|e| {
            TextwireError::Config(format!("mail.address `{address}` is not a valid mailbox: {e}"))
        })?;
        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)
            .map_err(|e| TextwireError::Mail {
                message: format!("cannot build SMTP relay for {}", config.smtp_host),
                source: Some(Box::new(e)),
            })?
            .port(config.smtp_port)
            .credentials(Credentials::new(address, password))
            .build();
        Ok(Self {
            transport,
            from,
            directory,
        })
    }
}

#[async_trait]
impl MessageSender for SmtpSender {
    async fn send(
        &self,
        phone_number: &str,
        carrier: &str,
        body: &str,
        subject: Option<&str>,
    ) -> Result<(), TextwireError> {
        let to = textwire_carriers::encode(&self.directory, phone_number, carrier).map_err(|e| {
            TextwireError::Mail {
                message: format!("cannot resolve gateway address for carrier `{carrier}`"),
                source: Some(Box::new(e)),
            }
        })?;
        let to_mailbox: Mailbox = to.parse().map_err(|e| TextwireError::Mail {
            message: format!("gateway address `{to}` is not a valid mailbox: {e}"),
            source: None,
        })?;

        let mut builder = Message::builder()
            .from(self.from.clone())
            .to(to_mailbox)
            .header(ContentType::TEXT_PLAIN);
        if let Some(subject) = effective_subject(subject) {
            builder = builder.subject(subject);
        }
        let email = builder
            .body(body.to_string())
            .map_err(|e| TextwireError::Mail {
                message: format!("cannot assemble message for {to}"),
                source: Some(Box::new(e)),
            })?;

        self.transport
            .send(email)
            .await
            .map_err(|e| TextwireError::Mail {
                message: format!("SMTP delivery to {to} failed"),
                source: Some(Box::new(e)),
            })?;
        debug!(to, "reply delivered");
        Ok(())
    }
}
