// SPDX-FileCopyrightText: 2026 Textwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Textwire relay.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use textwire_core::types::{RelayMode, SelectionKind};

/// Top-level Textwire configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable
/// overrides. All sections are optional and default to sensible values; the
/// two credentials (`mail.password`, `classifier.api_key`) additionally fall
/// back to environment variables at component construction time.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TextwireConfig {
    /// Relay pipeline behavior.
    #[serde(default)]
    pub relay: RelayConfig,

    /// Mail account and endpoint settings (IMAP + SMTP).
    #[serde(default)]
    pub mail: MailConfig,

    /// Intent classifier (Anthropic Messages API) settings.
    #[serde(default)]
    pub classifier: ClassifierConfig,

    /// Storage backend settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Carrier-id-to-gateway-domain map.
    ///
    /// Defaults to the seven reference carriers. Adding a carrier is a
    /// config edit, never a code change.
    #[serde(default = "default_carriers")]
    pub carriers: BTreeMap<String, String>,
}

impl Default for TextwireConfig {
    fn default() -> Self {
        Self {
            relay: RelayConfig::default(),
            mail: MailConfig::default(),
            classifier: ClassifierConfig::default(),
            storage: StorageConfig::default(),
            carriers: default_carriers(),
        }
    }
}

fn default_carriers() -> BTreeMap<String, String> {
    [
        ("verizon", "vtext.com"),
        ("tmobile", "tmomail.net"),
        ("sprint", "messaging.sprintpcs.com"),
        ("at&t", "txt.att.net"),
        ("boost", "smsmyboostmobile.com"),
        ("cricket", "sms.cricketwireless.net"),
        ("uscellular", "email.uscc.net"),
    ]
    .into_iter()
    .map(|(c, d)| (c.to_string(), d.to_string()))
    .collect()
}

/// Relay pipeline configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RelayConfig {
    /// Deployment variant: `individual` (per-message confirmation) or
    /// `digest` (one combined classification replied to every sender).
    #[serde(default = "default_mode")]
    pub mode: RelayMode,

    /// Mailbox filter: `all`, `unread`, or `unread-matching`.
    #[serde(default = "default_selection")]
    pub selection: SelectionKind,

    /// Most-recent-message window for `selection = "all"`.
    #[serde(default = "default_fetch_limit")]
    pub fetch_limit: usize,

    /// The phone number this deployment serves. Required when
    /// `selection = "unread-matching"`.
    #[serde(default)]
    pub target_phone: Option<String>,

    /// Fixed confirmation text sent in individual mode.
    #[serde(default = "default_confirmation")]
    pub confirmation: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            mode: default_mode(),
            selection: default_selection(),
            fetch_limit: default_fetch_limit(),
            target_phone: None,
            confirmation: default_confirmation(),
            log_level: default_log_level(),
        }
    }
}

fn default_mode() -> RelayMode {
    RelayMode::Individual
}

fn default_selection() -> SelectionKind {
    SelectionKind::Unread
}

fn default_fetch_limit() -> usize {
    10
}

fn default_confirmation() -> String {
    "Got it! Your message has been processed.".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Mail account and endpoint configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct MailConfig {
    /// Mail account identity. `None` falls back to `EMAIL_ADDRESS`.
    #[serde(default)]
    pub address: Option<String>,

    /// Mail account credential. `None` falls back to `EMAIL_PASSWORD`.
    #[serde(default)]
    pub password: Option<String>,

    /// IMAP host for the inbound reader.
    #[serde(default = "default_imap_host")]
    pub imap_host: String,

    /// IMAP port (implicit TLS).
    #[serde(default = "default_imap_port")]
    pub imap_port: u16,

    /// SMTP host for the outbound sender.
    #[serde(default = "default_smtp_host")]
    pub smtp_host: String,

    /// SMTP submission port (STARTTLS upgrade).
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            address: None,
            password: None,
            imap_host: default_imap_host(),
            imap_port: default_imap_port(),
            smtp_host: default_smtp_host(),
            smtp_port: default_smtp_port(),
        }
    }
}

fn default_imap_host() -> String {
    "imap.gmail.com".to_string()
}

fn default_imap_port() -> u16 {
    993
}

fn default_smtp_host() -> String {
    "smtp.gmail.com".to_string()
}

fn default_smtp_port() -> u16 {
    587
}

/// Intent classifier configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ClassifierConfig {
    /// Anthropic API key. `None` falls back to `ANTHROPIC_API_KEY`.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Model to use for classification. Categorizing a text message does
    /// not need a frontier model.
    #[serde(default = "default_model")]
    pub model: String,

    /// Maximum tokens to generate per classification.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Anthropic API version string.
    #[serde(default = "default_api_version")]
    pub api_version: String,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
            max_tokens: default_max_tokens(),
            api_version: default_api_version(),
        }
    }
}

fn default_model() -> String {
    "claude-haiku-4-5-20250901".to_string()
}

fn default_max_tokens() -> u32 {
    1024
}

fn default_api_version() -> String {
    "2023-06-01".to_string()
}

/// Storage backend configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_database_path")]
    pub database_path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
        }
    }
}

fn default_database_path() -> String {
    dirs::data_dir()
        .map(|p| p.join("textwire").join("textwire.db"))
        .unwrap_or_else(|| std::path::PathBuf::from("textwire.db"))
        .to_string_lossy()
        .into_owned()
}
