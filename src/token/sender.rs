// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: AGPL-3.0-or-later

use crate::common::Error;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Url;
use serde::{Deserialize, Serialize};

/// Colors and branding of the sign-in page, shared with verification emails.
///
/// Empty strings count as unset.
#[derive(Clone, Debug, Default, Eq, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
    /// `auto`, `dark` or `light`.
    #[serde(default)]
    pub color_scheme: Option<String>,
    /// Logo URL.
    #[serde(default)]
    pub logo: Option<String>,
    /// Button background color.
    #[serde(default)]
    pub brand_color: Option<String>,
    /// Button text color.
    #[serde(default)]
    pub button_text: Option<String>,
}

impl Theme {
    /// The brand color, or `default`.
    pub fn brand_color_or<'a>(&'a self, default: &'a str) -> &'a str {
        non_empty(&self.brand_color).unwrap_or(default)
    }

    /// The button text color, or `default`.
    pub fn button_text_or<'a>(&'a self, default: &'a str) -> &'a str {
        non_empty(&self.button_text).unwrap_or(default)
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|value| !value.is_empty())
}

/// Everything a verification sender is given. `P` is the provider's configuration.
pub struct SendVerificationRequestParams<'a, P: ?Sized> {
    /// The normalized identifier to deliver to.
    pub identifier: &'a str,
    /// The sign-in link, which embeds `token`.
    pub url: &'a Url,
    /// When the token stops being accepted.
    pub expires: DateTime<Utc>,
    /// The provider's configuration.
    pub provider: &'a P,
    /// The verification token.
    pub token: &'a str,
    /// The sign-in page theme.
    pub theme: &'a Theme,
}

/// Delivers a sign-in link or token to the user through some external channel.
///
/// Exactly one delivery is attempted per call; failures are returned, not retried.
#[async_trait]
pub trait VerificationSender<P: ?Sized + Sync>: Send + Sync {
    /// Delivers the verification request.
    async fn send_verification_request(
        &self,
        params: SendVerificationRequestParams<'_, P>,
    ) -> Result<(), Error>;
}

/// The sender of a token provider that was not given one. Always fails.
#[derive(Copy, Clone, Debug, Default)]
pub struct UnimplementedSender;

#[async_trait]
impl<P: ?Sized + Sync> VerificationSender<P> for UnimplementedSender {
    async fn send_verification_request(
        &self,
        _params: SendVerificationRequestParams<'_, P>,
    ) -> Result<(), Error> {
        Err(Error::Unimplemented(
            "Not implemented. When using the vanilla token provider, the application must supply send_verification_request.".to_string(),
        ))
    }
}

/// Creates verification tokens in place of the engine's random ones.
///
/// Any `Fn() -> String` is a generator.
#[async_trait]
pub trait VerificationTokenGenerator: Send + Sync {
    /// Returns a new token.
    async fn generate_verification_token(&self) -> Result<String, Error>;
}

#[async_trait]
impl<F> VerificationTokenGenerator for F
where
    F: Fn() -> String + Send + Sync,
{
    async fn generate_verification_token(&self) -> Result<String, Error> {
        Ok(self())
    }
}
