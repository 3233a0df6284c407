// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: AGPL-3.0-or-later

use super::{
    AuthorizationEndpoint, CallbackChecks, CallbackExtras, OAuthClient, Params, ProfileFrom,
    ProfileMapper, TokenEndpoint, TokenRequestContext, TokenSet, UserinfoEndpoint,
    UserinfoOptions, UserinfoRequestContext, Url,
};
use crate::common::{Error, NormalizedIdentity, ProviderId};
use crate::provider::ProviderType;
use crate::serde_utils::is_default;
use oauth2::{ClientId, ClientSecret};
use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt::{self, Debug, Formatter};
use std::sync::Arc;

/// Presentation metadata for the sign-in page. Cosmetic only.
#[derive(Clone, Debug, Default, Eq, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderStyle {
    /// Path or URL of the logo.
    #[serde(default, skip_serializing_if = "is_default")]
    pub logo: Option<String>,
    /// Logo for dark mode.
    #[serde(default, skip_serializing_if = "is_default")]
    pub logo_dark: Option<String>,
    /// Button background color.
    #[serde(default, skip_serializing_if = "is_default")]
    pub bg: Option<String>,
    /// Button background color in dark mode.
    #[serde(default, skip_serializing_if = "is_default")]
    pub bg_dark: Option<String>,
    /// Button text color.
    #[serde(default, skip_serializing_if = "is_default")]
    pub text: Option<String>,
    /// Button text color in dark mode.
    #[serde(default, skip_serializing_if = "is_default")]
    pub text_dark: Option<String>,
}

impl ProviderStyle {
    /// A light-mode style.
    pub fn new(logo: &str, bg: &str, text: &str) -> Self {
        Self {
            logo: Some(logo.to_string()),
            bg: Some(bg.to_string()),
            text: Some(text.to_string()),
            ..Default::default()
        }
    }
}

/// Developer-supplied options for an OAuth2 provider.
///
/// Every `Some` override replaces the provider's built-in value as a whole
/// when merged; see `OAuthConfig::merge`.
#[derive(Clone)]
pub struct OAuthUserConfig {
    /// The client ID issued by the provider.
    pub client_id: ClientId,
    /// The client secret issued by the provider.
    pub client_secret: ClientSecret,
    /// Replaces the provider ID, e.g. to register the same provider twice.
    pub id: Option<ProviderId>,
    /// Replaces the display name.
    pub name: Option<String>,
    /// Replaces the authorization endpoint.
    pub authorization: Option<AuthorizationEndpoint>,
    /// Replaces the token endpoint.
    pub token: Option<TokenEndpoint>,
    /// Replaces the user-info endpoint.
    pub userinfo: Option<UserinfoEndpoint>,
    /// Replaces the profile mapper.
    pub profile: Option<Arc<dyn ProfileMapper>>,
    /// Replaces the style.
    pub style: Option<ProviderStyle>,
}

impl OAuthUserConfig {
    /// Options with credentials and no overrides.
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: ClientId::new(client_id.into()),
            client_secret: ClientSecret::new(client_secret.into()),
            id: None,
            name: None,
            authorization: None,
            token: None,
            userinfo: None,
            profile: None,
            style: None,
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

    /// Overrides the authorization endpoint.
    pub fn with_authorization(mut self, endpoint: impl Into<AuthorizationEndpoint>) -> Self {
        self.authorization = Some(endpoint.into());
        self
    }

    /// Overrides the token endpoint.
    pub fn with_token(mut self, endpoint: impl Into<TokenEndpoint>) -> Self {
        self.token = Some(endpoint.into());
        self
    }

    /// Overrides the user-info endpoint.
    pub fn with_userinfo(mut self, endpoint: impl Into<UserinfoEndpoint>) -> Self {
        self.userinfo = Some(endpoint.into());
        self
    }

    /// Overrides the profile mapper.
    pub fn with_profile(mut self, profile: Arc<dyn ProfileMapper>) -> Self {
        self.profile = Some(profile);
        self
    }

    /// Overrides the style.
    pub fn with_style(mut self, style: ProviderStyle) -> Self {
        self.style = Some(style);
        self
    }
}

impl Debug for OAuthUserConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("OAuthUserConfig")
            .field("client_id", &self.client_id)
            .field("client_secret", &self.client_secret)
            .field("id", &self.id)
            .field("name", &self.name)
            .field("authorization", &self.authorization)
            .field("token", &self.token)
            .field("userinfo", &self.userinfo)
            .field("profile", &self.profile.as_ref().map(|_| "<profile>"))
            .field("style", &self.style)
            .finish()
    }
}

/// The TOML form of `OAuthUserConfig`. Endpoint overrides are bare URLs.
#[derive(Clone, Debug, Deserialize)]
pub struct OAuthSection {
    /// The client ID issued by the provider.
    pub client_id: String,
    /// The client secret issued by the provider.
    pub client_secret: String,
    /// Replaces the provider ID.
    #[serde(default)]
    pub id: Option<String>,
    /// Replaces the display name.
    #[serde(default)]
    pub name: Option<String>,
    /// Replaces the authorization endpoint.
    #[serde(default)]
    pub authorization: Option<String>,
    /// Replaces the token endpoint.
    #[serde(default)]
    pub token: Option<String>,
    /// Replaces the user-info endpoint.
    #[serde(default)]
    pub userinfo: Option<String>,
    /// Replaces the style.
    #[serde(default)]
    pub style: Option<ProviderStyle>,
}

impl From<OAuthSection> for OAuthUserConfig {
    fn from(section: OAuthSection) -> Self {
        let OAuthSection {
            client_id,
            client_secret,
            id,
            name,
            authorization,
            token,
            userinfo,
            style,
        } = section;
        Self {
            id: id.map(ProviderId::from),
            name,
            authorization: authorization.map(Into::into),
            token: token.map(Into::into),
            userinfo: userinfo.map(Into::into),
            style,
            ..Self::new(client_id, client_secret)
        }
    }
}

/// The configuration of an OAuth2 provider, as handed to the engine.
///
/// Built once with `new` and the `with_*` methods (normally by a provider
/// factory such as `wechat`), then only read.
#[derive(Clone)]
pub struct OAuthConfig {
    id: ProviderId,
    name: String,
    client_id: ClientId,
    client_secret: ClientSecret,
    authorization: AuthorizationEndpoint,
    token: TokenEndpoint,
    userinfo: UserinfoEndpoint,
    profile: Arc<dyn ProfileMapper>,
    style: ProviderStyle,
}

impl OAuthConfig {
    /// A provider with the credentials from `options` and empty endpoints.
    ///
    /// The default profile mapper expects a payload that is already shaped
    /// like a `NormalizedIdentity`.
    pub fn new(id: &str, name: &str, options: &OAuthUserConfig) -> Self {
        Self {
            id: ProviderId::from(id),
            name: name.to_string(),
            client_id: options.client_id.clone(),
            client_secret: options.client_secret.clone(),
            authorization: AuthorizationEndpoint::Url(String::new()),
            token: TokenEndpoint::Url(String::new()),
            userinfo: UserinfoEndpoint::Url(String::new()),
            profile: Arc::new(ProfileFrom::<NormalizedIdentity>::new()),
            style: ProviderStyle::default(),
        }
    }

    /// Sets the authorization endpoint.
    pub fn with_authorization(mut self, endpoint: impl Into<AuthorizationEndpoint>) -> Self {
        self.authorization = endpoint.into();
        self
    }

    /// Sets the token endpoint.
    pub fn with_token(mut self, endpoint: impl Into<TokenEndpoint>) -> Self {
        self.token = endpoint.into();
        self
    }

    /// Sets the user-info endpoint.
    pub fn with_userinfo(mut self, endpoint: impl Into<UserinfoEndpoint>) -> Self {
        self.userinfo = endpoint.into();
        self
    }

    /// Sets the profile mapper.
    pub fn with_profile(mut self, profile: Arc<dyn ProfileMapper>) -> Self {
        self.profile = profile;
        self
    }

    /// Sets the style.
    pub fn with_style(mut self, style: ProviderStyle) -> Self {
        self.style = style;
        self
    }

    /// Layers the caller's options over these defaults; the caller wins.
    ///
    /// Credentials are always taken from `options`. Every other overridden
    /// field is replaced whole: an endpoint override brings its own URL,
    /// parameters and request hook, and a style override replaces every
    /// style field. Nothing is merged field by field.
    pub fn merge(self, options: OAuthUserConfig) -> Self {
        let OAuthUserConfig {
            client_id,
            client_secret,
            id,
            name,
            authorization,
            token,
            userinfo,
            profile,
            style,
        } = options;
        Self {
            id: id.unwrap_or(self.id),
            name: name.unwrap_or(self.name),
            client_id,
            client_secret,
            authorization: authorization.unwrap_or(self.authorization),
            token: token.unwrap_or(self.token),
            userinfo: userinfo.unwrap_or(self.userinfo),
            profile: profile.unwrap_or(self.profile),
            style: style.unwrap_or(self.style),
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

    /// Always `ProviderType::OAuth`.
    pub fn provider_type(&self) -> ProviderType {
        ProviderType::OAuth
    }

    /// Returns the client ID.
    pub fn client_id(&self) -> &ClientId {
        &self.client_id
    }

    /// Returns the client secret.
    pub fn client_secret(&self) -> &ClientSecret {
        &self.client_secret
    }

    /// Returns the authorization endpoint.
    pub fn authorization(&self) -> &AuthorizationEndpoint {
        &self.authorization
    }

    /// Returns the token endpoint.
    pub fn token(&self) -> &TokenEndpoint {
        &self.token
    }

    /// Returns the user-info endpoint.
    pub fn userinfo(&self) -> &UserinfoEndpoint {
        &self.userinfo
    }

    /// Returns the style.
    pub fn style(&self) -> &ProviderStyle {
        &self.style
    }

    /// Exchanges the callback parameters for tokens, through the token
    /// endpoint's request hook if it has one.
    pub async fn exchange_tokens(
        &self,
        client: &dyn OAuthClient,
        callback_url: &Url,
        params: &Params,
        checks: &CallbackChecks,
    ) -> Result<TokenSet, Error> {
        match self.token.request() {
            Some(request) => {
                request
                    .request(TokenRequestContext {
                        provider: self,
                        client,
                        callback_url,
                        params,
                        checks,
                    })
                    .await
            }
            None => {
                let extras = CallbackExtras {
                    exchange_body: self.token.params(),
                };
                client
                    .oauth_callback(callback_url, params, checks, extras)
                    .await
            }
        }
    }

    /// Fetches the raw profile, through the user-info endpoint's request hook
    /// if it has one.
    pub async fn fetch_userinfo(
        &self,
        client: &dyn OAuthClient,
        tokens: &TokenSet,
    ) -> Result<Value, Error> {
        match self.userinfo.request() {
            Some(request) => {
                request
                    .request(UserinfoRequestContext {
                        provider: self,
                        client,
                        tokens,
                    })
                    .await
            }
            None => {
                let options = UserinfoOptions {
                    params: self.userinfo.params(),
                    method: Method::GET,
                };
                client.userinfo(&tokens.access_token, options).await
            }
        }
    }

    /// Runs the profile mapper, rejecting identities without an ID.
    pub async fn map_profile(
        &self,
        profile: Value,
        tokens: &TokenSet,
    ) -> Result<NormalizedIdentity, Error> {
        let identity = self.profile.profile(profile, tokens).await?;
        if identity.id.is_empty() {
            return Err(Error::Profile(format!("{}: profile has no id", self.id)));
        }
        Ok(identity)
    }
}

impl Debug for OAuthConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("OAuthConfig")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("client_id", &self.client_id)
            .field("authorization", &self.authorization)
            .field("token", &self.token)
            .field("userinfo", &self.userinfo)
            .field("style", &self.style)
            .finish()
    }
}
