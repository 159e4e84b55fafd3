// SPDX-FileCopyrightText: 2026 Textwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gateway address codec.
//!
//! Decodes a mail `From` address of the form `{digits}@{domain}` into a
//! `(phone_number, carrier)` pair by reverse lookup against the carrier
//! directory, and composes the inverse for outbound delivery.

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use crate::directory::CarrierDirectory;

/// Accepted `From` shape: optional leading `+`, one or more digits, `@`,
/// then a domain of letters and dots.
static GATEWAY_ADDRESS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\+?(\d+)@([A-Za-z.]+)$").unwrap()
});

/// Failures of the address codec.
///
/// Both are expected filtering outcomes on the inbound path, not defects:
/// the mailbox reader skips messages whose sender fails to decode.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AddressError {
    /// The string does not have the `digits@domain` gateway shape.
    #[error("malformed gateway address: `{0}`")]
    MalformedAddress(String),

    /// The domain (or carrier id, on encode) matches no directory entry.
    #[error("unknown carrier: `{0}`")]
    UnknownCarrier(String),
}

/// Parses a `From` header into `(phone_number, carrier_id)`.
///
/// A leading `+` is stripped from the returned phone number. The domain
/// must equal a directory entry exactly.
pub fn decode(
    directory: &CarrierDirectory,
    from_header: &str,
) -> Result<(String, String), AddressError> {
    let captures = GATEWAY_ADDRESS
        .captures(from_header)
        .ok_or_else(|| AddressError::MalformedAddress(from_header.to_string()))?;
    let phone = captures[1].to_string();
    let domain = &captures[2];

    let carrier = directory
        .carrier_for(domain)
        .ok_or_else(|| AddressError::UnknownCarrier(domain.to_string()))?;
    Ok((phone, carrier.to_string()))
}

/// Composes the gateway address for `(phone_number, carrier_id)`.
///
/// Produces `{phone}@{domain}` with no leading `+` and no whitespace.
pub fn encode(
    directory: &CarrierDirectory,
    phone_number: &str,
    carrier_id: &str,
) -> Result<String, AddressError> {
    let domain = directory
        .domain_for(carrier_id)
        .ok_or_else(|| AddressError::UnknownCarrier(carrier_id.to_string()))?;
    Ok(format!("{}@{domain}", phone_number.trim_start_matches('+')))
}
