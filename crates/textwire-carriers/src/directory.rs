// SPDX-FileCopyrightText: 2026 Textwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Static carrier-id-to-gateway-domain directory.
//!
//! Loaded once from configuration at process start and never mutated.
//! The mapping is pluggable data, not an enum, so a new carrier is a
//! config edit rather than a code change.

use std::collections::BTreeMap;

use textwire_core::TextwireError;

/// Immutable lookup table from carrier identifier to gateway domain.
///
/// Forward lookup is by carrier id; reverse lookup scans for an exact
/// domain match (never case-insensitive, never suffix-based).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarrierDirectory {
    entries: BTreeMap<String, String>,
}

impl CarrierDirectory {
    /// Builds a directory from a carrier-id-to-domain map.
    ///
    /// Fails on an empty map and on domains that could never appear in a
    /// mail address (embedded `@` or whitespace).
    pub fn from_map(entries: BTreeMap<String, String>) -> Result<Self, TextwireError> {
        if entries.is_empty() {
            return Err(TextwireError::Config(
                "carrier directory must contain at least one entry".into(),
            ));
        }
        for (carrier, domain) in &entries {
            if domain.contains('@') || domain.chars().any(char::is_whitespace) {
                return Err(TextwireError::Config(format!(
                    "carriers.{carrier}: `{domain}` is not a valid gateway domain"
                )));
            }
        }
        Ok(Self { entries })
    }

    /// Returns the gateway domain for `carrier_id`, if known.
    pub fn domain_for(&self, carrier_id: &str) -> Option<&str> {
        self.entries.get(carrier_id).map(String::as_str)
    }

    /// Returns the carrier id whose gateway domain equals `domain` exactly.
    pub fn carrier_for(&self, domain: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(_, d)| d.as_str() == domain)
            .map(|(c, _)| c.as_str())
    }

    /// Iterates over `(carrier_id, gateway_domain)` entries.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(c, d)| (c.as_str(), d.as_str()))
    }

    /// Number of configured carriers.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the directory holds no entries. Unreachable after
    /// construction, present for completeness.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
