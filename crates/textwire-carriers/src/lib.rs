// SPDX-FileCopyrightText: 2026 Textwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Carrier gateway directory and SMS address codec.
//!
//! Mobile carriers expose an email domain for SMS-via-email delivery
//! (e.g. `tmomail.net`). This crate owns the carrier-id-to-domain mapping
//! and the codec between `(phone_number, carrier)` pairs and gateway
//! addresses of the form `{digits}@{domain}`.

pub mod address;
pub mod directory;

pub use address::{decode, encode, AddressError};
pub use directory::CarrierDirectory;
