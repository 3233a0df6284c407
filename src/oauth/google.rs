// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: AGPL-3.0-or-later

use super::{AuthorizationEndpoint, OAuthConfig, OAuthUserConfig, ProfileFrom, ProviderStyle};
use crate::common::NormalizedIdentity;
use serde::Deserialize;
use std::sync::Arc;

/// Provider ID.
pub const ID: &str = "google";
/// Display name.
pub const NAME: &str = "Google";
/// Authorization endpoint.
pub const AUTHORIZATION_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
/// Token endpoint.
pub const TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
/// Returns a `GoogleProfile`.
pub const USERINFO_URL: &str = "https://www.googleapis.com/oauth2/v1/userinfo?alt=json";
/// Requested scopes.
pub const SCOPE: &str = "openid email profile";

/// The v1 user-info response.
#[derive(Clone, Debug, Deserialize)]
pub struct GoogleProfile {
    /// Account ID.
    pub id: String,
    /// Email address.
    #[serde(default)]
    pub email: Option<String>,
    /// Whether the email address is verified.
    #[serde(default)]
    pub verified_email: Option<bool>,
    /// Full name.
    #[serde(default)]
    pub name: Option<String>,
    /// Given name.
    #[serde(default)]
    pub given_name: Option<String>,
    /// Family name.
    #[serde(default)]
    pub family_name: Option<String>,
    /// Avatar URL.
    #[serde(default)]
    pub picture: Option<String>,
}

impl From<GoogleProfile> for NormalizedIdentity {
    fn from(profile: GoogleProfile) -> Self {
        NormalizedIdentity {
            id: profile.id,
            name: profile.name,
            email: profile.email,
            image: profile.picture,
        }
    }
}

/// The built-in Google style.
pub fn style() -> ProviderStyle {
    ProviderStyle::new("/google.svg", "#fff", "#000")
}

/// The built-in Google configuration for `options`, before overrides.
pub fn defaults(options: &OAuthUserConfig) -> OAuthConfig {
    OAuthConfig::new(ID, NAME, options)
        .with_authorization(AuthorizationEndpoint::descriptor(
            AUTHORIZATION_URL,
            [("scope", SCOPE)],
        ))
        .with_token(TOKEN_URL)
        .with_userinfo(USERINFO_URL)
        .with_profile(Arc::new(ProfileFrom::<GoogleProfile>::new()))
        .with_style(style())
}

/// Add Google sign-in.
pub fn google(options: OAuthUserConfig) -> OAuthConfig {
    defaults(&options).merge(options)
}
