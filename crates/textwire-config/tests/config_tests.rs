// SPDX-FileCopyrightText: 2026 Textwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the Textwire configuration system.

use textwire_config::diagnostic::{suggest_key, ConfigError};
use textwire_config::{load_and_validate_str, load_config_from_str};
use textwire_core::types::{RelayMode, SelectionKind};

/// Valid TOML with all known fields deserializes successfully.
#[test]
fn valid_toml_deserializes_into_textwire_config() {
    let toml = r#"
[relay]
mode = "digest"
selection = "unread-matching"
fetch_limit = 5
target_phone = "15052897944"
confirmation = "Noted."
log_level = "debug"

[mail]
address = "assistant@example.com"
password = "app-password"
imap_host = "imap.example.com"
imap_port = 993
smtp_host = "smtp.example.com"
smtp_port = 587

[classifier]
api_key = "sk-ant-123"
model = "claude-haiku-4-5-20250901"
max_tokens = 512

[storage]
database_path = "/tmp/textwire-test.db"

[carriers]
tmobile = "tmomail.net"
verizon = "vtext.com"
"#;

    let config = load_config_from_str(toml).expect("valid TOML should deserialize");
    assert_eq!(config.relay.mode, RelayMode::Digest);
    assert_eq!(config.relay.selection, SelectionKind::UnreadMatching);
    assert_eq!(config.relay.fetch_limit, 5);
    assert_eq!(config.relay.target_phone.as_deref(), Some("15052897944"));
    assert_eq!(config.relay.confirmation, "Noted.");
    assert_eq!(config.mail.address.as_deref(), Some("assistant@example.com"));
    assert_eq!(config.mail.imap_host, "imap.example.com");
    assert_eq!(config.classifier.api_key.as_deref(), Some("sk-ant-123"));
    assert_eq!(config.classifier.max_tokens, 512);
    assert_eq!(config.storage.database_path, "/tmp/textwire-test.db");
    assert_eq!(config.carriers.get("tmobile").map(String::as_str), Some("tmomail.net"));
}

/// Unknown field in [relay] section produces an error.
#[test]
fn unknown_field_in_relay_produces_error() {
    let toml = r#"
[relay]
confimation = "ok"
"#;

    let err = load_config_from_str(toml).expect_err("should reject unknown field");
    let err_str = format!("{err}");
    assert!(
        err_str.contains("unknown field") || err_str.contains("confimation"),
        "error should mention unknown field or the bad key, got: {err_str}"
    );
}

/// Missing optional sections use defaults without error.
#[test]
fn missing_optional_sections_use_defaults() {
    let config = load_config_from_str("").expect("empty TOML should use defaults");

    assert_eq!(config.relay.mode, RelayMode::Individual);
    assert_eq!(config.relay.selection, SelectionKind::Unread);
    assert_eq!(config.relay.fetch_limit, 10);
    assert!(config.relay.target_phone.is_none());
    assert_eq!(config.relay.confirmation, "Got it! Your message has been processed.");
    assert!(config.mail.address.is_none());
    assert_eq!(config.mail.imap_host, "imap.gmail.com");
    assert_eq!(config.mail.smtp_host, "smtp.gmail.com");
    assert!(config.classifier.api_key.is_none());
    assert_eq!(config.classifier.model, "claude-haiku-4-5-20250901");
    assert_eq!(config.classifier.api_version, "2023-06-01");
    assert_eq!(config.carriers.len(), 7);
}

/// Validation errors surface through load_and_validate_str.
#[test]
fn unread_matching_without_target_phone_is_rejected() {
    let toml = r#"
[relay]
selection = "unread-matching"
"#;

    let errors = load_and_validate_str(toml).expect_err("should fail validation");
    assert!(errors.iter().any(|e| matches!(
        e,
        ConfigError::Validation { message } if message.contains("target_phone")
    )));
}

/// Wrong value type produces an InvalidType-shaped error.
#[test]
fn wrong_type_for_fetch_limit_produces_error() {
    let toml = r#"
[relay]
fetch_limit = "ten"
"#;

    let errors = load_and_validate_str(toml).expect_err("should reject string fetch_limit");
    assert!(!errors.is_empty());
}

/// Typo suggestions work for relay section keys.
#[test]
fn suggest_key_catches_relay_typos() {
    let valid = &[
        "mode",
        "selection",
        "fetch_limit",
        "target_phone",
        "confirmation",
        "log_level",
    ];
    assert_eq!(suggest_key("selectoin", valid), Some("selection".to_string()));
    assert_eq!(suggest_key("fetch_limti", valid), Some("fetch_limit".to_string()));
}

/// A complete valid config passes validation end to end.
#[test]
fn valid_config_passes_load_and_validate() {
    let toml = r#"
[relay]
selection = "unread-matching"
target_phone = "15052897944"
"#;
    let config = load_and_validate_str(toml).expect("should validate");
    assert_eq!(config.relay.target_phone.as_deref(), Some("15052897944"));
}
