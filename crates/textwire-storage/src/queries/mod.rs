// SPDX-FileCopyrightText: 2026 Textwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Query modules for the message log and structured record tables.

pub mod messages;
pub mod records;
