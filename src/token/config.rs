// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: AGPL-3.0-or-later

use super::normalize::{normalize_with, MISSING_IDENTIFIER};
use super::{
    IdentifierNormalizer, SendVerificationRequestParams, Theme, UnimplementedSender,
    VerificationSender, VerificationTokenGenerator,
};
use crate::common::{Error, ProviderId};
use crate::provider::ProviderType;
use chrono::{DateTime, TimeDelta, Utc};
use reqwest::Url;
use serde::Deserialize;
use std::fmt::{self, Debug, Formatter};
use std::sync::Arc;

/// Provider ID.
pub const ID: &str = "token";
/// Display name.
pub const NAME: &str = "Token";
/// Tokens are accepted for a day unless configured otherwise.
pub const DEFAULT_MAX_AGE: u64 = 24 * 60 * 60;

/// Settings shared by the token and email providers.
#[derive(Clone)]
pub struct TokenSettings {
    pub(crate) id: ProviderId,
    pub(crate) name: String,
    pub(crate) max_age: u64,
    pub(crate) generate_verification_token: Option<Arc<dyn VerificationTokenGenerator>>,
    pub(crate) normalize_identifier: Option<Arc<dyn IdentifierNormalizer>>,
    pub(crate) secret: Option<String>,
}

impl TokenSettings {
    /// Settings with `DEFAULT_MAX_AGE` and no hooks.
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: ProviderId::from(id),
            name: name.to_string(),
            max_age: DEFAULT_MAX_AGE,
            generate_verification_token: None,
            normalize_identifier: None,
            secret: None,
        }
    }

    /// Returns the provider ID.
    pub fn id(&self) -> &ProviderId {
        &self.id
    }

    /// Returns the display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// How long a token is accepted, in seconds.
    pub fn max_age(&self) -> u64 {
        self.max_age
    }

    /// When a token issued at `now` stops being accepted.
    pub fn expires_at(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        i64::try_from(self.max_age)
            .ok()
            .and_then(TimeDelta::try_seconds)
            .and_then(|max_age| now.checked_add_signed(max_age))
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }

    /// The secret used to hash tokens before they are stored.
    pub fn secret(&self) -> Option<&str> {
        self.secret.as_deref()
    }

    /// The custom normalizer, if any.
    pub fn normalizer(&self) -> Option<&Arc<dyn IdentifierNormalizer>> {
        self.normalize_identifier.as_ref()
    }

    /// Runs the custom token generator. `None` means the engine generates one.
    pub async fn generate_verification_token(&self) -> Result<Option<String>, Error> {
        match &self.generate_verification_token {
            Some(generator) => generator.generate_verification_token().await.map(Some),
            None => Ok(None),
        }
    }

    /// Layers `options` over these settings, returning the sender override
    /// for the caller to apply.
    pub(crate) fn merge<P: ?Sized>(
        self,
        options: TokenUserConfig<P>,
    ) -> (Self, Option<Arc<dyn VerificationSender<P>>>)
    where
        P: Sync,
    {
        let TokenUserConfig {
            id,
            name,
            max_age,
            send_verification_request,
            generate_verification_token,
            normalize_identifier,
            secret,
        } = options;
        let settings = Self {
            id: id.unwrap_or(self.id),
            name: name.unwrap_or(self.name),
            max_age: max_age.unwrap_or(self.max_age),
            generate_verification_token: generate_verification_token
                .or(self.generate_verification_token),
            normalize_identifier: normalize_identifier.or(self.normalize_identifier),
            secret: secret.or(self.secret),
        };
        (settings, send_verification_request)
    }
}

impl Debug for TokenSettings {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenSettings")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("max_age", &self.max_age)
            .field(
                "generate_verification_token",
                &self.generate_verification_token.as_ref().map(|_| "<generator>"),
            )
            .field(
                "normalize_identifier",
                &self.normalize_identifier.as_ref().map(|_| "<normalizer>"),
            )
            .field("secret", &self.secret.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Developer-supplied options for a token provider. `P` is the configuration
/// the sender is handed.
///
/// Every `Some` value replaces the built-in one when merged.
pub struct TokenUserConfig<P: ?Sized + Sync = TokenConfig> {
    /// Replaces the provider ID.
    pub id: Option<ProviderId>,
    /// Replaces the display name.
    pub name: Option<String>,
    /// Replaces the token lifetime in seconds.
    pub max_age: Option<u64>,
    /// Replaces the verification sender.
    pub send_verification_request: Option<Arc<dyn VerificationSender<P>>>,
    /// Generates tokens in place of the engine.
    pub generate_verification_token: Option<Arc<dyn VerificationTokenGenerator>>,
    /// Replaces the identifier normalizer.
    pub normalize_identifier: Option<Arc<dyn IdentifierNormalizer>>,
    /// Hashes tokens before they are stored.
    pub secret: Option<String>,
}

impl<P: ?Sized + Sync> TokenUserConfig<P> {
    /// Options with no overrides.
    pub fn new() -> Self {
        Self {
            id: None,
            name: None,
            max_age: None,
            send_verification_request: None,
            generate_verification_token: None,
            normalize_identifier: None,
            secret: None,
        }
    }

    /// Overrides the provider ID.
    pub fn with_id(mut self, id: impl Into<ProviderId>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Overrides the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Overrides the token lifetime.
    pub fn with_max_age(mut self, max_age: u64) -> Self {
        self.max_age = Some(max_age);
        self
    }

    /// Overrides the verification sender.
    pub fn with_sender(mut self, sender: Arc<dyn VerificationSender<P>>) -> Self {
        self.send_verification_request = Some(sender);
        self
    }

    /// Sets a token generator.
    pub fn with_token_generator(mut self, generator: Arc<dyn VerificationTokenGenerator>) -> Self {
        self.generate_verification_token = Some(generator);
        self
    }

    /// Overrides the identifier normalizer.
    pub fn with_normalizer(mut self, normalizer: Arc<dyn IdentifierNormalizer>) -> Self {
        self.normalize_identifier = Some(normalizer);
        self
    }

    /// Sets the token hashing secret.
    pub fn with_secret(mut self, secret: impl Into<String>) -> Self {
        self.secret = Some(secret.into());
        self
    }
}

impl<P: ?Sized + Sync> Default for TokenUserConfig<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: ?Sized + Sync> Clone for TokenUserConfig<P> {
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            name: self.name.clone(),
            max_age: self.max_age,
            send_verification_request: self.send_verification_request.clone(),
            generate_verification_token: self.generate_verification_token.clone(),
            normalize_identifier: self.normalize_identifier.clone(),
            secret: self.secret.clone(),
        }
    }
}

/// The TOML form of `TokenUserConfig`, e.g. a `[token]` table.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct TokenSection {
    /// Replaces the provider ID.
    #[serde(default)]
    pub id: Option<String>,
    /// Replaces the display name.
    #[serde(default)]
    pub name: Option<String>,
    /// Replaces the token lifetime in seconds.
    #[serde(default)]
    pub max_age: Option<u64>,
    /// Hashes tokens before they are stored.
    #[serde(default)]
    pub secret: Option<String>,
}

impl<P: ?Sized + Sync> From<TokenSection> for TokenUserConfig<P> {
    fn from(section: TokenSection) -> Self {
        Self {
            id: section.id.map(ProviderId::from),
            name: section.name,
            max_age: section.max_age,
            secret: section.secret,
            ..Self::new()
        }
    }
}

/// The configuration of a token provider, as handed to the engine.
///
/// Delivery is entirely up to the application: the built-in sender fails.
#[derive(Clone)]
pub struct TokenConfig {
    settings: TokenSettings,
    sender: Arc<dyn VerificationSender<TokenConfig>>,
}

impl TokenConfig {
    /// The built-in token provider.
    pub fn defaults() -> Self {
        Self {
            settings: TokenSettings::new(ID, NAME),
            sender: Arc::new(UnimplementedSender),
        }
    }

    /// Layers the caller's options over this configuration; the caller wins.
    pub fn merge(self, options: TokenUserConfig) -> Self {
        let (settings, sender) = self.settings.merge(options);
        Self {
            settings,
            sender: sender.unwrap_or(self.sender),
        }
    }

    /// Returns the provider ID.
    pub fn id(&self) -> &ProviderId {
        &self.settings.id
    }

    /// Returns the display name.
    pub fn name(&self) -> &str {
        &self.settings.name
    }

    /// Always `ProviderType::Token`.
    pub fn provider_type(&self) -> ProviderType {
        ProviderType::Token
    }

    /// Returns the shared settings.
    pub fn settings(&self) -> &TokenSettings {
        &self.settings
    }

    /// Rejects a missing or empty identifier, then runs the normalizer if one
    /// is configured. Without one the identifier is returned unchanged.
    pub fn normalize_identifier(&self, identifier: Option<&str>) -> Result<String, Error> {
        normalize_with(
            self.settings.normalizer().map(|n| &**n),
            identifier,
            MISSING_IDENTIFIER,
        )
    }

    /// Hands a verification request to the configured sender.
    pub async fn send_verification_request(
        &self,
        identifier: &str,
        url: &Url,
        expires: DateTime<Utc>,
        token: &str,
        theme: &Theme,
    ) -> Result<(), Error> {
        self.sender
            .send_verification_request(SendVerificationRequestParams {
                identifier,
                url,
                expires,
                provider: self,
                token,
                theme,
            })
            .await
    }
}

impl Debug for TokenConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenConfig")
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

/// Add sign-in with a verification token delivered by the application.
pub fn token(options: TokenUserConfig) -> TokenConfig {
    TokenConfig::defaults().merge(options)
}
