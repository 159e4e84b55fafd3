// SPDX-FileCopyrightText: 2026 Textwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `textwire doctor` command implementation.
//!
//! Runs diagnostic checks against the Textwire environment: configuration,
//! carrier directory, database, credentials, and classifier reachability.

use std::io::IsTerminal;
use std::path::Path;
use std::time::{Duration, Instant};

use textwire_carriers::CarrierDirectory;
use textwire_config::TextwireConfig;
use textwire_storage::{queries, Database};

/// Status of a diagnostic check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckStatus {
    /// Check passed successfully.
    Pass,
    /// Check passed with a warning.
    Warn,
    /// Check failed.
    Fail,
}

/// Result of a single diagnostic check.
#[derive(Debug, Clone)]
pub struct CheckResult {
    /// Name of the check.
    pub name: String,
    /// Check status.
    pub status: CheckStatus,
    /// Human-readable message.
    pub message: String,
    /// Duration the check took.
    pub duration: Duration,
}

/// Run the `textwire doctor` command. Returns `true` when any check failed.
pub async fn run_doctor(config: &TextwireConfig, config_path: Option<&Path>) -> bool {
    let use_color = std::io::stdout().is_terminal();
    let mut results = Vec::new();

    results.push(check_config(config_path));
    results.push(check_carriers(config));
    results.push(check_database(&config.storage.database_path).await);
    results.push(check_mail_credentials(config));
    results.push(check_classifier_key(config));
    results.push(check_classifier_reachability().await);

    println!();
    println!("  textwire doctor");
    println!("  {}", "-".repeat(50));

    let mut fail_count = 0;
    let mut warn_count = 0;

    for result in &results {
        let duration_ms = result.duration.as_millis();
        let line = match result.status {
            CheckStatus::Pass => {
                if use_color {
                    use colored::Colorize;
                    format!(
                        "    {} {:<20} {} ({duration_ms}ms)",
                        "✓".green(),
                        result.name,
                        result.message
                    )
                } else {
                    format!(
                        "    [OK]   {:<20} {} ({duration_ms}ms)",
                        result.name, result.message
                    )
                }
            }
            CheckStatus::Warn => {
                warn_count += 1;
                if use_color {
                    use colored::Colorize;
                    format!(
                        "    {} {:<20} {} ({duration_ms}ms)",
                        "!".yellow(),
                        result.name,
                        result.message.yellow()
                    )
                } else {
                    format!(
                        "    [WARN] {:<20} {} ({duration_ms}ms)",
                        result.name, result.message
                    )
                }
            }
            CheckStatus::Fail => {
                fail_count += 1;
                if use_color {
                    use colored::Colorize;
                    format!(
                        "    {} {:<20} {} ({duration_ms}ms)",
                        "✗".red(),
                        result.name,
                        result.message.red()
                    )
                } else {
                    format!(
                        "    [FAIL] {:<20} {} ({duration_ms}ms)",
                        result.name, result.message
                    )
                }
            }
        };
        println!("{line}");
    }

    println!();
    if fail_count > 0 || warn_count > 0 {
        let issues = fail_count + warn_count;
        let issue_word = if issues == 1 { "issue" } else { "issues" };
        println!("  {issues} {issue_word} found.");
    } else {
        println!("  All checks passed.");
    }
    println!();

    fail_count > 0
}

/// Check configuration loads and validates.
fn check_config(config_path: Option<&Path>) -> CheckResult {
    let start = Instant::now();
    let result = match config_path {
        Some(path) => textwire_config::load_and_validate_path(path),
        None => textwire_config::load_and_validate(),
    };
    match result {
        Ok(_) => CheckResult {
            name: "Configuration".to_string(),
            status: CheckStatus::Pass,
            message: "valid".to_string(),
            duration: start.elapsed(),
        },
        Err(errors) => CheckResult {
            name: "Configuration".to_string(),
            status: CheckStatus::Fail,
            message: format!("{} error(s)", errors.len()),
            duration: start.elapsed(),
        },
    }
}

/// Check the carrier directory is non-empty and well-formed.
fn check_carriers(config: &TextwireConfig) -> CheckResult {
    let start = Instant::now();
    match CarrierDirectory::from_map(config.carriers.clone()) {
        Ok(directory) => CheckResult {
            name: "Carrier directory".to_string(),
            status: CheckStatus::Pass,
            message: format!("{} carrier(s)", directory.len()),
            duration: start.elapsed(),
        },
        Err(e) => CheckResult {
            name: "Carrier directory".to_string(),
            status: CheckStatus::Fail,
            message: e.to_string(),
            duration: start.elapsed(),
        },
    }
}

/// Check the database can be opened, migrated, and queried.
async fn check_database(db_path: &str) -> CheckResult {
    let start = Instant::now();
    let existed = Path::new(db_path).exists();

    match Database::open(db_path).await {
        Ok(db) => {
            let counted = queries::messages::count_messages(&db).await;
            let closed = db.close().await;
            match (counted, closed) {
                (Ok(count), Ok(())) => CheckResult {
                    name: "Database".to_string(),
                    status: CheckStatus::Pass,
                    message: if existed {
                        format!("connected ({count} message(s) logged)")
                    } else {
                        "created and migrated".to_string()
                    },
                    duration: start.elapsed(),
                },
                (Err(e), _) | (_, Err(e)) => CheckResult {
                    name: "Database".to_string(),
                    status: CheckStatus::Fail,
                    message: format!("query failed: {e}"),
                    duration: start.elapsed(),
                },
            }
        }
        Err(e) => CheckResult {
            name: "Database".to_string(),
            status: CheckStatus::Fail,
            message: format!("open failed: {e}"),
            duration: start.elapsed(),
        },
    }
}

/// Check the mail account credentials resolve from config or environment.
fn check_mail_credentials(config: &TextwireConfig) -> CheckResult {
    let start = Instant::now();
    match textwire_mail::resolve_credentials(&config.mail) {
        Ok((address, _)) => CheckResult {
            name: "Mail credentials".to_string(),
            status: CheckStatus::Pass,
            message: format!("account {address}"),
            duration: start.elapsed(),
        },
        Err(e) => CheckResult {
            name: "Mail credentials".to_string(),
            status: CheckStatus::Warn,
            message: e.to_string(),
            duration: start.elapsed(),
        },
    }
}

/// Check an Anthropic API key is configured.
fn check_classifier_key(config: &TextwireConfig) -> CheckResult {
    let start = Instant::now();
    let has_api_key =
        config.classifier.api_key.is_some() || std::env::var("ANTHROPIC_API_KEY").is_ok();

    CheckResult {
        name: "Classifier key".to_string(),
        status: if has_api_key {
            CheckStatus::Pass
        } else {
            CheckStatus::Warn
        },
        message: if has_api_key {
            "configured".to_string()
        } else {
            "no API key configured".to_string()
        },
        duration: start.elapsed(),
    }
}

/// Check the classifier endpoint is reachable (no key required).
async fn check_classifier_reachability() -> CheckResult {
    let start = Instant::now();

    let client = match reqwest::Client::builder()
        .timeout(Duration::from_secs(5))
        .build()
    {
        Ok(c) => c,
        Err(e) => {
            return CheckResult {
                name: "Classifier API".to_string(),
                status: CheckStatus::Fail,
                message: format!("HTTP client error: {e}"),
                duration: start.elapsed(),
            };
        }
    };

    match client
        .head("https://api.anthropic.com/v1/messages")
        .send()
        .await
    {
        Ok(_resp) => CheckResult {
            name: "Classifier API".to_string(),
            status: CheckStatus::Pass,
            message: "reachable".to_string(),
            duration: start.elapsed(),
        },
        Err(e) => {
            let msg = if e.is_timeout() {
                "timeout (5s)".to_string()
            } else if e.is_connect() {
                "connection refused".to_string()
            } else {
                format!("error: {e}")
            };
            CheckResult {
                name: "Classifier API".to_string(),
                status: CheckStatus::Fail,
                message: msg,
                duration: start.elapsed(),
            }
        }
    }
}
