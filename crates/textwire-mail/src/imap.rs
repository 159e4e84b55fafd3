// SPDX-FileCopyrightText: 2026 Textwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Inbound IMAP reader.
//!
//! Connects over implicit TLS, operates on `INBOX` only, and applies the
//! run's [`Selection`]. Targeted selection peeks envelopes first so that
//! non-matching messages are never body-fetched and therefore stay unread;
//! the full-body fetch marking retrieved messages read is accepted IMAP
//! fetch semantics, not a state transition this crate manages.

use std::sync::Arc;

use async_trait::async_trait;
use futures::TryStreamExt;
use textwire_carriers::CarrierDirectory;
use textwire_config::model::MailConfig;
use textwire_core::traits::MailboxReader;
use textwire_core::types::{InboundSms, Selection};
use textwire_core::TextwireError;
use tokio::net::TcpStream;
use tokio_rustls::client::TlsStream;
use tokio_rustls::TlsConnector;
use tracing::debug;

use crate::{extract, resolve_credentials};

type ImapSession = async_imap::Session<TlsStream<TcpStream>>;

/// Converts a transport-layer failure into `TextwireError::Mail`.
fn mail_err<E>(message: String, e: E) -> TextwireError
where
    E: std::error::Error + Send + Sync + 'static,
{
    TextwireError::Mail {
        message,
        source: Some(Box::new(e)),
    }
}

/// Renders explicit sequence numbers as an IMAP sequence set.
fn seq_set(seqs: &[u32]) -> String {
    seqs.iter()
        .map(u32::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

/// IMAP-backed inbound reader implementing [`MailboxReader`].
#[derive(Debug)]
pub struct ImapMailbox {
    host: String,
    port: u16,
    address: String,
    password: String,
    directory: CarrierDirectory,
}

impl ImapMailbox {
    /// Creates a reader from mail configuration and the carrier directory.
    ///
    /// Credentials resolve config-first with `EMAIL_ADDRESS` /
    /// `EMAIL_PASSWORD` env fallbacks; missing credentials fail here,
    /// before any network I/O.
    pub fn new(config: &MailConfig, directory: CarrierDirectory) -> Result<Self, TextwireError> {
        let (address, password) = resolve_credentials(config)?;
        Ok(Self {
            host: config.imap_host.clone(),
            port: config.imap_port,
            address,
            password,
            directory,
        })
    }

    async fn connect(&self) -> Result<ImapSession, TextwireError> {
        let mut roots = tokio_rustls::rustls::RootCertStore::empty();
        roots.extend(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());
        let tls_config = tokio_rustls::rustls::ClientConfig::builder()
            .with_root_certificates(roots)
            .with_no_client_auth();
        let connector = TlsConnector::from(Arc::new(tls_config));

        let tcp = TcpStream::connect((self.host.as_str(), self.port))
            .await
            .map_err(|e| mail_err(format!("cannot reach {}:{}", self.host, self.port), e))?;
        let server_name = rustls_pki_types::ServerName::try_from(self.host.clone())
            .map_err(|e| mail_err(format!("invalid IMAP host `{}`", self.host), e))?;
        let tls = connector
            .connect(server_name, tcp)
            .await
            .map_err(|e| mail_err(format!("TLS handshake with {} failed", self.host), e))?;

        let client = async_imap::Client::new(tls);
        let session = client
            .login(&self.address, &self.password)
            .await
            .map_err(|(e, _)| mail_err(format!("IMAP login as {} failed", self.address), e))?;
        Ok(session)
    }

    /// Unseen sequence numbers in natural mailbox order.
    async fn search_unseen(&self, session: &mut ImapSession) -> Result<Vec<u32>, TextwireError> {
        let set = session
            .search("UNSEEN")
            .await
            .map_err(|e| mail_err("IMAP UNSEEN search failed".into(), e))?;
        let mut seqs: Vec<u32> = set.into_iter().collect();
        seqs.sort_unstable();
        Ok(seqs)
    }

    /// Envelope-only peek returning the sequence numbers whose decoded
    /// sender phone equals `target`. Leaves all peeked messages unread.
    async fn filter_by_sender(
        &self,
        session: &mut ImapSession,
        seqs: &[u32],
        target: &str,
    ) -> Result<Vec<u32>, TextwireError> {
        let mut matching = Vec::new();
        {
            let mut stream = session
                .fetch(seq_set(seqs), "ENVELOPE")
                .await
                .map_err(|e| mail_err("IMAP envelope fetch failed".into(), e))?;
            while let Some(fetch) = stream
                .try_next()
                .await
                .map_err(|e| mail_err("IMAP envelope fetch failed".into(), e))?
            {
                let Some(envelope) = fetch.envelope() else {
                    continue;
                };
                let Some(from) = envelope
                    .from
                    .as_ref()
                    .and_then(|addrs| addrs.first())
                    .and_then(|addr| {
                        let mailbox = addr.mailbox.as_ref()?;
                        let host = addr.host.as_ref()?;
                        Some(format!(
                            "{}@{}",
                            String::from_utf8_lossy(mailbox),
                            String::from_utf8_lossy(host)
                        ))
                    })
                else {
                    continue;
                };
                if extract::matches_target(&self.directory, &from, target) {
                    matching.push(fetch.message);
                } else {
                    debug!(from, "leaving unread message from non-target sender");
                }
            }
        }
        matching.sort_unstable();
        Ok(matching)
    }

    /// Full-body fetch of `set`, filtered down to decodable messages.
    async fn fetch_bodies(
        &self,
        session: &mut ImapSession,
        set: &str,
    ) -> Result<Vec<InboundSms>, TextwireError> {
        let mut messages = Vec::new();
        let mut stream = session
            .fetch(set, "RFC822")
            .await
            .map_err(|e| mail_err("IMAP body fetch failed".into(), e))?;
        while let Some(fetch) = stream
            .try_next()
            .await
            .map_err(|e| mail_err("IMAP body fetch failed".into(), e))?
        {
            let Some(raw) = fetch.body() else {
                debug!(seq = fetch.message, "fetch item carried no body");
                continue;
            };
            if let Some(sms) = extract::to_inbound(&self.directory, raw) {
                messages.push(sms);
            }
        }
        Ok(messages)
    }

    async fn fetch_selection(
        &self,
        session: &mut ImapSession,
        selection: &Selection,
    ) -> Result<Vec<InboundSms>, TextwireError> {
        let mailbox = session
            .select("INBOX")
            .await
            .map_err(|e| mail_err("cannot select INBOX".into(), e))?;

        let messages = match selection {
            Selection::All { limit } => {
                let Some(window) = extract::recent_window(mailbox.exists, *limit) else {
                    return Err(TextwireError::NoMessagesFound);
                };
                self.fetch_bodies(session, &window).await?
            }
            Selection::Unread => {
                let seqs = self.search_unseen(session).await?;
                if seqs.is_empty() {
                    return Err(TextwireError::NoMessagesFound);
                }
                self.fetch_bodies(session, &seq_set(&seqs)).await?
            }
            Selection::UnreadMatching { phone } => {
                let seqs = self.search_unseen(session).await?;
                if seqs.is_empty() {
                    return Err(TextwireError::NoMessagesFound);
                }
                let matching = self.filter_by_sender(session, &seqs, phone).await?;
                if matching.is_empty() {
                    return Err(TextwireError::NoMessagesFound);
                }
                self.fetch_bodies(session, &seq_set(&matching)).await?
            }
        };

        // Zero survivors after filtering is the same distinguishable
        // outcome as an empty selection.
        if messages.is_empty() {
            return Err(TextwireError::NoMessagesFound);
        }
        Ok(messages)
    }
}

#[async_trait]
impl MailboxReader for ImapMailbox {
    async fn fetch(&self, selection: &Selection) -> Result<Vec<InboundSms>, TextwireError> {
        let mut session = self.connect().await?;
        let result = self.fetch_selection(&mut session, selection).await;
        // Best-effort logout; the fetch outcome is what matters.
        let _ = session.logout().await;
        result
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    fn config(address: Option<&str>, password: Option<&str>) -> MailConfig {
        MailConfig {
            address: address.map(str::to_string),
            password: password.map(str::to_string),
            ..MailConfig::default()
        }
    }

    fn directory() -> CarrierDirectory {
        let map: BTreeMap<String, String> =
            [("tmobile".to_string(), "tmomail.net".to_string())].into_iter().collect();
        CarrierDirectory::from_map(map).unwrap()
    }

    #[test]
    fn seq_set_joins_with_commas() {
        assert_eq!(seq_set(&[3]), "3");
        assert_eq!(seq_set(&[1, 4, 9]), "1,4,9");
    }

    #[test]
    fn new_requires_credentials() {
        let err = ImapMailbox::new(&config(None, None), directory()).unwrap_err();
        assert!(matches!(err, TextwireError::Config(_)));

        let err = ImapMailbox::new(&config(Some("a@example.com"), None), directory()).unwrap_err();
        assert!(matches!(err, TextwireError::Config(_)));
    }

    #[test]
    fn new_accepts_config_credentials() {
        let mailbox =
            ImapMailbox::new(&config(Some("a@example.com"), Some("pw")), directory()).unwrap();
        assert_eq!(mailbox.host, "imap.gmail.com");
        assert_eq!(mailbox.port, 993);
        assert_eq!(mailbox.address, "a@example.com");
    }
}
