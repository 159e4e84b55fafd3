// SPDX-FileCopyrightText: 2026 Textwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Email transport for the Textwire relay.
//!
//! Inbound side: an IMAP reader that selects gateway messages and turns
//! them into [`InboundSms`] values. Outbound side: an SMTP sender that
//! addresses replies back through the carrier gateways. Both sides share
//! one mail account whose credentials resolve config-first with
//! environment fallbacks.
//!
//! [`InboundSms`]: textwire_core::types::InboundSms

pub mod extract;
pub mod imap;
pub mod smtp;

pub use imap::ImapMailbox;
pub use smtp::SmtpSender;

use textwire_config::model::MailConfig;
use textwire_core::TextwireError;

/// Environment fallback for the mail account address.
pub const EMAIL_ADDRESS_VAR: &str = "EMAIL_ADDRESS";
/// Environment fallback for the mail account password.
pub const EMAIL_PASSWORD_VAR: &str = "EMAIL_PASSWORD";

/// Resolves the mail account credentials: config value first, then the
/// `EMAIL_ADDRESS` / `EMAIL_PASSWORD` environment variables.
///
/// A present-but-empty config value counts as unset so that an empty
/// string in a checked-in config file does not shadow the environment.
pub fn resolve_credentials(config: &MailConfig) -> Result<(String, String), TextwireError> {
    let address = config
        .address
        .clone()
        .filter(|s| !s.trim().is_empty())
        .or_else(|| std::env::var(EMAIL_ADDRESS_VAR).ok().filter(|s| !s.trim().is_empty()))
        .ok_or_else(|| {
            TextwireError::Config(format!(
                "mail account address not found. Set mail.address in the config file \
                 or the {EMAIL_ADDRESS_VAR} environment variable."
            ))
        })?;
    let password = config
        .password
        .clone()
        .filter(|s| !s.trim().is_empty())
        .or_else(|| std::env::var(EMAIL_PASSWORD_VAR).ok().filter(|s| !s.trim().is_empty()))
        .ok_or_else(|| {
            TextwireError::Config(format!(
                "mail account password not found. Set mail.password in the config file \
                 or the {EMAIL_PASSWORD_VAR} environment variable."
            ))
        })?;
    Ok((address, password))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_credentials_win_without_touching_env() {
        let config = MailConfig {
            address: Some("assistant@example.com".into()),
            password: Some("pw".into()),
            ..MailConfig::default()
        };
        let (address, password) = resolve_credentials(&config).unwrap();
        assert_eq!(address, "assistant@example.com");
        assert_eq!(password, "pw");
    }

    #[test]
    fn empty_config_values_count_as_unset() {
        let config = MailConfig {
            address: Some("  ".into()),
            password: Some(String::new()),
            ..MailConfig::default()
        };
        // Neither config nor (in the test environment) the env vars carry
        // usable values, so resolution reports the config error.
        let err = resolve_credentials(&config).unwrap_err();
        assert!(matches!(err, TextwireError::Config(_)));
    }

    #[test]
    fn missing_password_names_the_env_fallback() {
        let config = MailConfig {
            address: Some("assistant@example.com".into()),
            password: None,
            ..MailConfig::default()
        };
        let err = resolve_credentials(&config).unwrap_err();
        assert!(err.to_string().contains(EMAIL_PASSWORD_VAR));
    }
}
