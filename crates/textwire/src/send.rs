// SPDX-FileCopyrightText: 2026 Textwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `textwire send`: operator test path for the outbound sender.

use textwire_carriers::CarrierDirectory;
use textwire_config::TextwireConfig;
use textwire_core::traits::MessageSender;
use textwire_core::TextwireError;
use textwire_mail::SmtpSender;

pub async fn run_send(
    config: &TextwireConfig,
    to: &str,
    carrier: &str,
    message: &str,
    subject: Option<&str>,
) -> Result<(), TextwireError> {
    let directory = CarrierDirectory::from_map(config.carriers.clone())?;
    let sender = SmtpSender::new(&config.mail, directory)?;
    sender.send(to, carrier, message, subject).await?;
    println!("sent to {to} via {carrier}");
    Ok(())
}
