// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: AGPL-3.0-or-later

use super::EmailServer;
use crate::common::Error;
use async_trait::async_trait;

/// One outbound message.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct MailMessage {
    /// Recipient address.
    pub to: String,
    /// Sender, e.g. `Example <no-reply@example.com>`.
    pub from: String,
    /// Subject line.
    pub subject: String,
    /// Plain-text body.
    pub text: String,
    /// HTML body.
    pub html: String,
}

/// Per-recipient outcome reported by a transport.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SentMessageInfo {
    /// Recipients the server accepted.
    pub accepted: Vec<String>,
    /// Recipients the server refused.
    pub rejected: Vec<String>,
    /// Recipients the server deferred.
    pub pending: Vec<String>,
}

impl SentMessageInfo {
    /// Rejected then pending recipients, skipping blanks.
    pub fn failed(&self) -> Vec<String> {
        self.rejected
            .iter()
            .chain(&self.pending)
            .filter(|recipient| !recipient.is_empty())
            .cloned()
            .collect()
    }
}

/// Sends mail.
#[async_trait]
pub trait MailTransport: Send + Sync {
    /// Sends `message`, reporting what happened to each recipient.
    async fn send_mail(&self, message: MailMessage) -> Result<SentMessageInfo, Error>;
}

/// Opens a `MailTransport` for a server configuration.
pub trait TransportFactory: Send + Sync {
    /// Creates the transport. Nothing is sent yet.
    fn create_transport(&self, server: &EmailServer) -> Result<Box<dyn MailTransport>, Error>;
}
