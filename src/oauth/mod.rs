// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: LGPL-3.0-or-later

/// The engine-facing OAuth2 client seam and request hooks.
mod client;
/// OAuth2 provider configuration records.
mod config;
/// Discord sign-in.
pub mod discord;
/// Provider endpoints.
mod endpoint;
/// Freshbooks sign-in.
pub mod freshbooks;
/// Google sign-in.
pub mod google;
mod profile;
mod tests;
/// WeChat sign-in.
pub mod wechat;

pub use self::client::{
    CallbackChecks, CallbackExtras, OAuthClient, TokenRequest, TokenRequestContext, TokenSet,
    UserinfoOptions, UserinfoRequest, UserinfoRequestContext,
};
pub use self::config::{OAuthConfig, OAuthSection, OAuthUserConfig, ProviderStyle};
pub use self::discord::{discord, DiscordProfile};
pub use self::endpoint::{
    AuthorizationEndpoint, Endpoint, NoRequest, Params, TokenEndpoint, UserinfoEndpoint,
};
pub use self::freshbooks::{freshbooks, FreshbooksProfile, FreshbooksUser};
pub use self::google::{google, GoogleProfile};
pub use self::profile::{ProfileFrom, ProfileMapper};
pub use self::wechat::{wechat, WechatProfile, WechatTokenRequest, WechatUserinfoRequest};

/// A URL.
pub type Url = reqwest::Url;
