// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: AGPL-3.0-or-later

/// Email provider configuration records.
mod config;
/// The default verification sender.
mod sender;
#[cfg(feature = "smtp")]
/// Delivery over SMTP.
mod smtp;
/// Verification email bodies.
pub mod template;
mod tests;
/// The mail transport seam.
mod transport;

pub use self::config::{
    EmailConfig, EmailSection, EmailServer, EmailUserConfig, SmtpAuth, SmtpOptions,
    DEFAULT_FROM,
};
pub use self::sender::{default_sender, email, url_host, TransportVerificationSender};
#[cfg(feature = "smtp")]
pub use self::smtp::SmtpTransportFactory;
pub use self::transport::{MailMessage, MailTransport, SentMessageInfo, TransportFactory};
