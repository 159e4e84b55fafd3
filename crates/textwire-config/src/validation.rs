// SPDX-FileCopyrightText: 2026 Textwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes: selection-mode preconditions, carrier domain shape, and
//! non-empty endpoint values. Runs before any network I/O.

use textwire_core::types::SelectionKind;

use crate::diagnostic::ConfigError;
use crate::model::TextwireConfig;

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &TextwireConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if config.storage.database_path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "storage.database_path must not be empty".to_string(),
        });
    }

    if config.mail.imap_host.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "mail.imap_host must not be empty".to_string(),
        });
    }

    if config.mail.smtp_host.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "mail.smtp_host must not be empty".to_string(),
        });
    }

    match config.relay.selection {
        SelectionKind::All => {
            if config.relay.fetch_limit == 0 {
                errors.push(ConfigError::Validation {
                    message: "relay.fetch_limit must be at least 1 when relay.selection = \"all\""
                        .to_string(),
                });
            }
        }
        SelectionKind::UnreadMatching => {
            let target_ok = config
                .relay
                .target_phone
                .as_deref()
                .is_some_and(|p| !p.trim().is_empty());
            if !target_ok {
                errors.push(ConfigError::Validation {
                    message: "relay.target_phone is required when relay.selection = \"unread-matching\""
                        .to_string(),
                });
            } else if let Some(phone) = config.relay.target_phone.as_deref()
                && !phone.trim().chars().all(|c| c.is_ascii_digit())
            {
                errors.push(ConfigError::Validation {
                    message: format!(
                        "relay.target_phone must contain only digits, got `{}`",
                        phone.trim()
                    ),
                });
            }
        }
        SelectionKind::Unread => {}
    }

    if config.carriers.is_empty() {
        errors.push(ConfigError::Validation {
            message: "[carriers] must contain at least one entry".to_string(),
        });
    }

    for (carrier, domain) in &config.carriers {
        if domain.contains('@') || domain.chars().any(char::is_whitespace) || domain.is_empty() {
            errors.push(ConfigError::Validation {
                message: format!("carriers.{carrier}: `{domain}` is not a valid gateway domain"),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
