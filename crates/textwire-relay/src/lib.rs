// SPDX-FileCopyrightText: 2026 Textwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Relay orchestration: the fetch-classify-log-reply state machine.
//!
//! [`RelayPipeline`] wires the four seam traits together and runs one
//! bounded batch per invocation, returning a [`RunReport`] that accounts
//! for every message individually.

pub mod pipeline;
pub mod report;

pub use pipeline::{build_selection, RelayPipeline};
pub use report::{ItemReport, RunReport};
