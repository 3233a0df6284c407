// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: AGPL-3.0-or-later

use super::{OAuthConfig, Params, Url};
use crate::common::Error;
use async_trait::async_trait;
use oauth2::{AccessToken, CsrfToken, PkceCodeVerifier, RefreshToken};
use reqwest::Method;
use serde::Deserialize;
use serde_json::{Map, Value};

/// Tokens returned by a provider's token endpoint.
///
/// Fields outside the OAuth2 standard (e.g. WeChat's `openid`) are kept in `extra`.
#[derive(Clone, Debug, Deserialize)]
pub struct TokenSet {
    /// The access token.
    pub access_token: AccessToken,
    /// Usually `Bearer`.
    pub token_type: Option<String>,
    /// The refresh token, if issued.
    pub refresh_token: Option<RefreshToken>,
    /// Lifetime of the access token in seconds.
    pub expires_in: Option<u64>,
    /// Granted scopes.
    pub scope: Option<String>,
    /// OpenID Connect ID token.
    pub id_token: Option<String>,
    /// Every other field of the token response.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TokenSet {
    /// A token set holding only an access token.
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: AccessToken::new(access_token.into()),
            token_type: None,
            refresh_token: None,
            expires_in: None,
            scope: None,
            id_token: None,
            extra: Map::new(),
        }
    }

    /// A string field outside the OAuth2 standard.
    pub fn extra_str(&self, name: &str) -> Option<&str> {
        self.extra.get(name).and_then(Value::as_str)
    }
}

/// Values the engine stored when it redirected the user, to be checked on callback.
#[derive(Debug, Default)]
pub struct CallbackChecks {
    /// The `state` sent with the authorization request.
    pub state: Option<CsrfToken>,
    /// The PKCE verifier matching the challenge sent with the authorization request.
    pub code_verifier: Option<PkceCodeVerifier>,
    /// The OpenID Connect nonce.
    pub nonce: Option<String>,
}

/// Extra inputs to an authorization code exchange.
#[derive(Clone, Debug, Default)]
pub struct CallbackExtras {
    /// Form fields sent to the token endpoint.
    pub exchange_body: Params,
}

/// How a user-info request is made.
#[derive(Clone, Debug)]
pub struct UserinfoOptions {
    /// Query parameters.
    pub params: Params,
    /// HTTP method.
    pub method: Method,
}

/// The HTTP-capable OAuth2 client owned by the authentication engine.
///
/// Providers never talk to the network themselves; their request hooks go
/// through this client.
#[async_trait]
pub trait OAuthClient: Send + Sync {
    /// Exchanges the callback parameters (e.g. `code`) for tokens.
    async fn oauth_callback(
        &self,
        callback_url: &Url,
        params: &Params,
        checks: &CallbackChecks,
        extras: CallbackExtras,
    ) -> Result<TokenSet, Error>;

    /// Fetches the user's profile.
    async fn userinfo(
        &self,
        access_token: &AccessToken,
        options: UserinfoOptions,
    ) -> Result<Value, Error>;
}

/// Everything a token request hook is given.
pub struct TokenRequestContext<'a> {
    /// The provider being signed in with.
    pub provider: &'a OAuthConfig,
    /// The engine's client.
    pub client: &'a dyn OAuthClient,
    /// The callback URL registered with the provider.
    pub callback_url: &'a Url,
    /// The parameters the provider sent to the callback URL.
    pub params: &'a Params,
    /// Values to check the callback against.
    pub checks: &'a CallbackChecks,
}

/// Everything a user-info request hook is given.
pub struct UserinfoRequestContext<'a> {
    /// The provider being signed in with.
    pub provider: &'a OAuthConfig,
    /// The engine's client.
    pub client: &'a dyn OAuthClient,
    /// Tokens from the token request.
    pub tokens: &'a TokenSet,
}

/// Replaces the engine's default authorization code exchange.
#[async_trait]
pub trait TokenRequest: Send + Sync {
    /// Performs the exchange.
    async fn request(&self, context: TokenRequestContext<'_>) -> Result<TokenSet, Error>;
}

/// Replaces the engine's default user-info request.
#[async_trait]
pub trait UserinfoRequest: Send + Sync {
    /// Fetches the raw profile.
    async fn request(&self, context: UserinfoRequestContext<'_>) -> Result<Value, Error>;
}
