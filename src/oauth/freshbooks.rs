// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: AGPL-3.0-or-later

use super::{OAuthConfig, OAuthUserConfig, ProfileFrom, ProviderStyle};
use crate::common::NormalizedIdentity;
use crate::serde_utils::string_or_number;
use serde::Deserialize;
use std::sync::Arc;

/// Provider ID.
pub const ID: &str = "freshbooks";
/// Display name.
pub const NAME: &str = "Freshbooks";
/// Authorization endpoint.
pub const AUTHORIZATION_URL: &str = "https://auth.freshbooks.com/service/auth/oauth/authorize";
/// Token endpoint.
pub const TOKEN_URL: &str = "https://api.freshbooks.com/auth/oauth/token";
/// Returns a `FreshbooksProfile`.
pub const USERINFO_URL: &str = "https://api.freshbooks.com/auth/api/v1/users/me";

/// The `users/me` response.
#[derive(Clone, Debug, Deserialize)]
pub struct FreshbooksProfile {
    /// The identity.
    pub response: FreshbooksUser,
}

/// The identity part of `FreshbooksProfile`.
///
/// Empty or missing name halves are left out of the display name.
#[derive(Clone, Debug, Deserialize)]
pub struct FreshbooksUser {
    /// Numeric identity ID.
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    /// Given name.
    #[serde(default)]
    pub first_name: Option<String>,
    /// Family name.
    #[serde(default)]
    pub last_name: Option<String>,
    /// Email address.
    #[serde(default)]
    pub email: Option<String>,
}

impl From<FreshbooksProfile> for NormalizedIdentity {
    fn from(profile: FreshbooksProfile) -> Self {
        let FreshbooksUser {
            id,
            first_name,
            last_name,
            email,
        } = profile.response;
        let non_empty = |name: Option<String>| name.filter(|name| !name.is_empty());
        let name = match (non_empty(first_name), non_empty(last_name)) {
            (Some(first), Some(last)) => Some(format!("{first} {last}")),
            (Some(name), None) | (None, Some(name)) => Some(name),
            (None, None) => None,
        };
        NormalizedIdentity {
            id,
            name,
            email,
            image: None,
        }
    }
}

/// The built-in Freshbooks style.
pub fn style() -> ProviderStyle {
    ProviderStyle::new("/freshbooks-dark.svg", "#0075dd", "#fff")
}

/// The built-in Freshbooks configuration for `options`, before overrides.
pub fn defaults(options: &OAuthUserConfig) -> OAuthConfig {
    OAuthConfig::new(ID, NAME, options)
        .with_authorization(AUTHORIZATION_URL)
        .with_token(TOKEN_URL)
        .with_userinfo(USERINFO_URL)
        .with_profile(Arc::new(ProfileFrom::<FreshbooksProfile>::new()))
        .with_style(style())
}

/// Add Freshbooks sign-in.
pub fn freshbooks(options: OAuthUserConfig) -> OAuthConfig {
    defaults(&options).merge(options)
}
