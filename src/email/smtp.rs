// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: AGPL-3.0-or-later

use super::{EmailServer, MailMessage, MailTransport, SentMessageInfo, SmtpOptions, TransportFactory};
use crate::common::Error;
use async_trait::async_trait;
use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::transport::smtp::client::{Tls, TlsParameters};
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

type Smtp = AsyncSmtpTransport<Tokio1Executor>;

/// Opens SMTP transports with `lettre`.
#[derive(Copy, Clone, Debug, Default)]
pub struct SmtpTransportFactory;

impl TransportFactory for SmtpTransportFactory {
    fn create_transport(&self, server: &EmailServer) -> Result<Box<dyn MailTransport>, Error> {
        let inner = match server {
            EmailServer::Url(url) => Smtp::from_url(url)
                .map_err(|e| Error::Configuration(format!("smtp url: {e}")))?
                .build(),
            EmailServer::Options(options) => {
                let SmtpOptions {
                    host, auth, secure, ..
                } = options;
                let builder = if *secure {
                    Smtp::relay(host).map_err(|e| Error::Configuration(format!("smtp: {e}")))?
                } else {
                    let tls = TlsParameters::new(host.clone())
                        .map_err(|e| Error::Configuration(format!("smtp: {e}")))?;
                    Smtp::builder_dangerous(host).tls(Tls::Opportunistic(tls))
                };
                let builder = builder.port(options.port());
                match auth.as_ref().filter(|auth| !auth.user.is_empty()) {
                    Some(auth) => builder
                        .credentials(Credentials::new(auth.user.clone(), auth.pass.clone()))
                        .build(),
                    None => builder.build(),
                }
            }
        };
        Ok(Box::new(SmtpMailTransport { inner }))
    }
}

struct SmtpMailTransport {
    inner: Smtp,
}

#[async_trait]
impl MailTransport for SmtpMailTransport {
    async fn send_mail(&self, message: MailMessage) -> Result<SentMessageInfo, Error> {
        let MailMessage {
            to,
            from,
            subject,
            text,
            html,
        } = message;
        let from: Mailbox = from
            .parse()
            .map_err(|e| Error::Configuration(format!("from: {e}")))?;
        let recipient: Mailbox = to
            .parse()
            .map_err(|_| Error::Identifier("invalid email address".to_string()))?;
        let email = Message::builder()
            .from(from)
            .to(recipient)
            .subject(subject)
            .multipart(MultiPart::alternative_plain_html(text, html))
            .map_err(|e| Error::String(format!("message: {e}")))?;

        // One recipient, so the SMTP reply decides its fate.
        match self.inner.send(email).await {
            Ok(_) => Ok(SentMessageInfo {
                accepted: vec![to],
                ..Default::default()
            }),
            Err(e) if e.is_permanent() => Ok(SentMessageInfo {
                rejected: vec![to],
                ..Default::default()
            }),
            Err(e) if e.is_transient() => Ok(SentMessageInfo {
                pending: vec![to],
                ..Default::default()
            }),
            Err(e) => Err(Error::String(format!("smtp: {e}"))),
        }
    }
}
