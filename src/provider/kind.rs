// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: AGPL-3.0-or-later

use crate::common::{Error, ProviderId};
#[cfg(feature = "email")]
use crate::email::EmailConfig;
#[cfg(feature = "oauth")]
use crate::oauth::OAuthConfig;
#[cfg(feature = "token")]
use crate::token::TokenConfig;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// The `ProviderType` enum tells the engine which flow a provider takes part in.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderType {
    /// Redirect to a third party, then exchange an authorization code.
    OAuth,
    /// Email a sign-in link.
    Email,
    /// Deliver a sign-in token through a channel chosen by the application.
    Token,
}

impl ProviderType {
    /// The lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OAuth => "oauth",
            Self::Email => "email",
            Self::Token => "token",
        }
    }
}

impl Display for ProviderType {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        Display::fmt(self.as_str(), f)
    }
}

/// Convert from a lowercase type name to `ProviderType`.
impl TryFrom<&str> for ProviderType {
    type Error = Error;
    fn try_from(provider_type: &str) -> Result<Self, Error> {
        match provider_type {
            "oauth" => Ok(Self::OAuth),
            "email" => Ok(Self::Email),
            "token" => Ok(Self::Token),
            _ => Err(Error::Configuration(format!(
                "{provider_type}: not a provider type"
            ))),
        }
    }
}

impl TryFrom<String> for ProviderType {
    type Error = Error;
    fn try_from(provider_type: String) -> Result<Self, Error> {
        Self::try_from(provider_type.as_str())
    }
}

/// A provider configuration record, tagged by type.
#[derive(Clone, Debug)]
pub enum Provider {
    #[cfg(feature = "oauth")]
    /// An OAuth2 provider.
    OAuth(OAuthConfig),
    #[cfg(feature = "email")]
    /// The email provider.
    Email(EmailConfig),
    #[cfg(feature = "token")]
    /// A token provider.
    Token(TokenConfig),
}

impl Provider {
    /// Returns the provider ID.
    pub fn id(&self) -> &ProviderId {
        match self {
            #[cfg(feature = "oauth")]
            Self::OAuth(config) => config.id(),
            #[cfg(feature = "email")]
            Self::Email(config) => config.id(),
            #[cfg(feature = "token")]
            Self::Token(config) => config.id(),
        }
    }

    /// Returns the display name.
    pub fn name(&self) -> &str {
        match self {
            #[cfg(feature = "oauth")]
            Self::OAuth(config) => config.name(),
            #[cfg(feature = "email")]
            Self::Email(config) => config.name(),
            #[cfg(feature = "token")]
            Self::Token(config) => config.name(),
        }
    }

    /// Returns the tag.
    pub fn provider_type(&self) -> ProviderType {
        match self {
            #[cfg(feature = "oauth")]
            Self::OAuth(config) => config.provider_type(),
            #[cfg(feature = "email")]
            Self::Email(config) => config.provider_type(),
            #[cfg(feature = "token")]
            Self::Token(config) => config.provider_type(),
        }
    }

    #[cfg(feature = "oauth")]
    /// The OAuth2 configuration, if this is an OAuth2 provider.
    pub fn as_oauth(&self) -> Option<&OAuthConfig> {
        match self {
            Self::OAuth(config) => Some(config),
            #[allow(unreachable_patterns)]
            _ => None,
        }
    }

    #[cfg(feature = "email")]
    /// The email configuration, if this is the email provider.
    pub fn as_email(&self) -> Option<&EmailConfig> {
        match self {
            Self::Email(config) => Some(config),
            #[allow(unreachable_patterns)]
            _ => None,
        }
    }

    #[cfg(feature = "token")]
    /// The token configuration, if this is a token provider.
    pub fn as_token(&self) -> Option<&TokenConfig> {
        match self {
            Self::Token(config) => Some(config),
            #[allow(unreachable_patterns)]
            _ => None,
        }
    }
}

#[cfg(feature = "oauth")]
impl From<OAuthConfig> for Provider {
    fn from(config: OAuthConfig) -> Self {
        Self::OAuth(config)
    }
}

#[cfg(feature = "email")]
impl From<EmailConfig> for Provider {
    fn from(config: EmailConfig) -> Self {
        Self::Email(config)
    }
}

#[cfg(feature = "token")]
impl From<TokenConfig> for Provider {
    fn from(config: TokenConfig) -> Self {
        Self::Token(config)
    }
}
