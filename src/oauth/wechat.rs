// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: AGPL-3.0-or-later

use super::{
    AuthorizationEndpoint, CallbackExtras, OAuthConfig, OAuthUserConfig, Params, ProfileFrom,
    TokenEndpoint, TokenRequest, TokenRequestContext, TokenSet, UserinfoEndpoint,
    UserinfoOptions, UserinfoRequest, UserinfoRequestContext,
};
use crate::common::{Error, NormalizedIdentity};
use async_trait::async_trait;
use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

/// Provider ID.
pub const ID: &str = "wechat";
/// Display name.
pub const NAME: &str = "Wechat";
/// https://developers.weixin.qq.com/doc/offiaccount/OA_Web_Apps/Wechat_webpage_authorization.html
pub const AUTHORIZATION_URL: &str = "https://open.weixin.qq.com/connect/oauth2/authorize";
/// Exchanges the code for an access token and the user's `openid`.
pub const TOKEN_URL: &str = "https://api.weixin.qq.com/sns/oauth2/access_token";
/// Returns a `WechatProfile`.
pub const USERINFO_URL: &str = "https://api.weixin.qq.com/sns/userinfo";
/// Silent authorization; only the `openid` is granted.
pub const SCOPE: &str = "snsapi_base";
/// Language of the user-info response.
pub const LANG: &str = "zh_CN";

/// https://developers.weixin.qq.com/doc/offiaccount/OA_Web_Apps/Wechat_webpage_authorization.html#3
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct WechatProfile {
    /// Unique per user and official account.
    pub openid: String,
    /// Nickname.
    #[serde(default)]
    pub nickname: Option<String>,
    /// 1 is male, 2 is female, 0 is unknown.
    #[serde(default)]
    pub sex: Option<i64>,
    /// Province.
    #[serde(default)]
    pub province: Option<String>,
    /// City.
    #[serde(default)]
    pub city: Option<String>,
    /// Country.
    #[serde(default)]
    pub country: Option<String>,
    /// Avatar URL.
    #[serde(default)]
    pub headimgurl: Option<String>,
    /// Privileges, e.g. `chinaunicom`.
    #[serde(default)]
    pub privilege: Vec<String>,
    /// Unique per user across the developer's applications.
    #[serde(default)]
    pub unionid: Option<String>,
}

impl From<WechatProfile> for NormalizedIdentity {
    fn from(profile: WechatProfile) -> Self {
        NormalizedIdentity {
            id: profile.openid,
            name: profile.nickname,
            // WeChat never discloses an email address.
            email: None,
            image: profile.headimgurl,
        }
    }
}

/// WeChat wants `appid` and `secret` in the exchange body rather than
/// `client_id` and `client_secret`.
pub struct WechatTokenRequest;

#[async_trait]
impl TokenRequest for WechatTokenRequest {
    async fn request(&self, context: TokenRequestContext<'_>) -> Result<TokenSet, Error> {
        let TokenRequestContext {
            provider,
            client,
            callback_url,
            params,
            checks,
        } = context;
        // Configured parameters win over whatever arrived on the callback.
        let mut exchange_body = params.clone();
        exchange_body.extend(provider.token().params());
        client
            .oauth_callback(callback_url, params, checks, CallbackExtras { exchange_body })
            .await
    }
}

/// WeChat identifies the user by the `openid` returned with the token and
/// expects the access token as a query parameter.
pub struct WechatUserinfoRequest;

#[async_trait]
impl UserinfoRequest for WechatUserinfoRequest {
    async fn request(&self, context: UserinfoRequestContext<'_>) -> Result<Value, Error> {
        let UserinfoRequestContext {
            provider,
            client,
            tokens,
        } = context;
        let openid = tokens
            .extra_str("openid")
            .ok_or_else(|| Error::Profile(format!("{ID}: token response has no openid")))?;
        let mut params = Params::new();
        params.insert(
            "access_token".to_string(),
            tokens.access_token.secret().clone(),
        );
        params.insert("openid".to_string(), openid.to_string());
        params.extend(provider.userinfo().params());
        client
            .userinfo(
                &tokens.access_token,
                UserinfoOptions {
                    params,
                    method: Method::GET,
                },
            )
            .await
    }
}

/// The built-in WeChat configuration for `options`, before overrides.
pub fn defaults(options: &OAuthUserConfig) -> OAuthConfig {
    let appid = options.client_id.as_str();
    let secret = options.client_secret.secret().as_str();
    OAuthConfig::new(ID, NAME, options)
        .with_authorization(AuthorizationEndpoint::descriptor(
            AUTHORIZATION_URL,
            [("appid", appid), ("scope", SCOPE)],
        ))
        .with_token(
            TokenEndpoint::descriptor(
                TOKEN_URL,
                [
                    ("appid", appid),
                    ("secret", secret),
                    ("grant_type", "authorization_code"),
                ],
            )
            .with_request(Arc::new(WechatTokenRequest)),
        )
        .with_userinfo(
            UserinfoEndpoint::descriptor(USERINFO_URL, [("lang", LANG)])
                .with_request(Arc::new(WechatUserinfoRequest)),
        )
        .with_profile(Arc::new(ProfileFrom::<WechatProfile>::new()))
}

/// Add WeChat sign-in.
///
/// Callback URL: `https://example.com/api/auth/callback/wechat`.
pub fn wechat(options: OAuthUserConfig) -> OAuthConfig {
    defaults(&options).merge(options)
}
