// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: AGPL-3.0-or-later

use super::template::{html, subject, text};
use super::{EmailConfig, EmailUserConfig, MailMessage, TransportFactory};
use crate::common::Error;
use crate::log::StringLogger;
use crate::token::{SendVerificationRequestParams, VerificationSender};
use async_trait::async_trait;
use reqwest::Url;
use std::sync::Arc;

/// Sends the sign-in link as an email through a `TransportFactory`.
///
/// One message per request. Any rejected or pending recipient fails the
/// request with `Error::Delivery`.
#[derive(Clone)]
pub struct TransportVerificationSender {
    factory: Arc<dyn TransportFactory>,
    log: Option<StringLogger>,
}

impl TransportVerificationSender {
    /// Sends through transports made by `factory`.
    pub fn new(factory: Arc<dyn TransportFactory>) -> Self {
        Self { factory, log: None }
    }

    /// Records every delivery outcome in `log`. Only the host is logged.
    pub fn with_logger(self, log: StringLogger) -> Self {
        Self {
            log: Some(log),
            ..self
        }
    }

    async fn deliver(
        &self,
        params: SendVerificationRequestParams<'_, EmailConfig>,
        host: &str,
    ) -> Result<(), Error> {
        let SendVerificationRequestParams {
            identifier,
            url,
            provider,
            theme,
            ..
        } = params;
        let transport = self.factory.create_transport(provider.server())?;
        let message = MailMessage {
            to: identifier.to_string(),
            from: provider.from().to_string(),
            subject: subject(host),
            text: text(url.as_str(), host),
            html: html(url.as_str(), host, theme),
        };
        let failed = transport.send_mail(message).await?.failed();
        if failed.is_empty() {
            Ok(())
        } else {
            Err(Error::Delivery(failed))
        }
    }
}

#[async_trait]
impl VerificationSender<EmailConfig> for TransportVerificationSender {
    async fn send_verification_request(
        &self,
        params: SendVerificationRequestParams<'_, EmailConfig>,
    ) -> Result<(), Error> {
        let host = url_host(params.url);
        let result = self.deliver(params, &host).await;
        if let Some(log) = &self.log {
            match &result {
                Ok(()) => log.trace(format!("sign-in email for {host} sent")),
                Err(Error::Delivery(failed)) => log.warn(format!(
                    "sign-in email for {host} failed: {} recipient(s) not accepted",
                    failed.len()
                )),
                Err(e) => log.warn(format!("sign-in email for {host} failed: {e}")),
            }
        }
        result
    }
}

/// The host of `url`, with the port if it has one.
pub fn url_host(url: &Url) -> String {
    let host = url.host_str().unwrap_or_default();
    match url.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_string(),
    }
}

/// The sender used when the application supplies none.
pub fn default_sender() -> Arc<dyn VerificationSender<EmailConfig>> {
    #[cfg(feature = "smtp")]
    {
        Arc::new(TransportVerificationSender::new(Arc::new(
            super::SmtpTransportFactory,
        )))
    }
    #[cfg(not(feature = "smtp"))]
    {
        Arc::new(crate::token::UnimplementedSender)
    }
}

/// Add sign-in with a link sent by email.
///
/// Without a sender override, mail goes out over SMTP (feature `smtp`).
pub fn email(options: EmailUserConfig) -> EmailConfig {
    EmailConfig::defaults(default_sender()).merge(options)
}
