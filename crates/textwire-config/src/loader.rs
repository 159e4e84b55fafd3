// SPDX-FileCopyrightText: 2026 Textwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./textwire.toml` > `~/.config/textwire/textwire.toml`
//! > `/etc/textwire/textwire.toml` with environment variable overrides via the
//! `TEXTWIRE_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::TextwireConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/textwire/textwire.toml` (system-wide)
/// 3. `~/.config/textwire/textwire.toml` (user XDG config)
/// 4. `./textwire.toml` (local directory)
/// 5. `TEXTWIRE_*` environment variables
pub fn load_config() -> Result<TextwireConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(TextwireConfig::default()))
        .merge(Toml::file("/etc/textwire/textwire.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("textwire/textwire.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("textwire.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no XDG lookup).
///
/// Used for testing and explicit inline configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<TextwireConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(TextwireConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
///
/// Backs the `--config <path>` CLI flag.
pub fn load_config_from_path(path: &Path) -> Result<TextwireConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(TextwireConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` NOT `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names: `TEXTWIRE_RELAY_TARGET_PHONE` must map
/// to `relay.target_phone`, not `relay.target.phone`.
fn env_provider() -> Env {
    Env::prefixed("TEXTWIRE_").map(|key| {
        // `key` is the lowercased env var name with prefix stripped.
        // Example: TEXTWIRE_MAIL_SMTP_HOST -> "mail_smtp_host"
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("relay_", "relay.", 1)
            .replacen("mail_", "mail.", 1)
            .replacen("classifier_", "classifier.", 1)
            .replacen("storage_", "storage.", 1)
            .replacen("carriers_", "carriers.", 1);
        mapped.into()
    })
}
