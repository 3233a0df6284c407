// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: AGPL-3.0-or-later

use super::{OAuthConfig, OAuthUserConfig, ProfileFrom, ProviderStyle};
use crate::common::NormalizedIdentity;
use serde::Deserialize;
use std::sync::Arc;

/// Provider ID.
pub const ID: &str = "discord";
/// Display name.
pub const NAME: &str = "Discord";
/// Authorization endpoint, requesting the `identify` and `email` scopes.
pub const AUTHORIZATION_URL: &str = "https://discord.com/api/oauth2/authorize?scope=identify+email";
/// Token endpoint.
pub const TOKEN_URL: &str = "https://discord.com/api/oauth2/token";
/// Returns a `DiscordProfile`.
pub const USERINFO_URL: &str = "https://discord.com/api/users/@me";

const CDN_URL: &str = "https://cdn.discordapp.com";

/// https://discord.com/developers/docs/resources/user#user-object
#[derive(Clone, Debug, Deserialize)]
pub struct DiscordProfile {
    /// Snowflake.
    pub id: String,
    /// Unique handle.
    pub username: String,
    /// `"0"` for users on the new username system.
    #[serde(default)]
    pub discriminator: Option<String>,
    /// Display name, if set.
    #[serde(default)]
    pub global_name: Option<String>,
    /// Avatar hash; animated avatars start with `a_`.
    #[serde(default)]
    pub avatar: Option<String>,
    /// Email address (needs the `email` scope).
    #[serde(default)]
    pub email: Option<String>,
    /// Whether the email address is verified.
    #[serde(default)]
    pub verified: Option<bool>,
}

impl DiscordProfile {
    /// The avatar URL, or Discord's default avatar when none is set.
    pub fn image_url(&self) -> String {
        let DiscordProfile {
            id,
            avatar,
            discriminator,
            ..
        } = self;
        match avatar {
            Some(avatar) => {
                let format = if avatar.starts_with("a_") { "gif" } else { "png" };
                format!("{CDN_URL}/avatars/{id}/{avatar}.{format}")
            }
            None => {
                let index = match discriminator.as_deref() {
                    None | Some("0") => id.parse::<u64>().map(|id| (id >> 22) % 6),
                    Some(discriminator) => discriminator.parse::<u64>().map(|d| d % 5),
                }
                .unwrap_or(0);
                format!("{CDN_URL}/embed/avatars/{index}.png")
            }
        }
    }
}

impl From<DiscordProfile> for NormalizedIdentity {
    fn from(profile: DiscordProfile) -> Self {
        let image = Some(profile.image_url());
        NormalizedIdentity {
            id: profile.id,
            name: Some(profile.global_name.unwrap_or(profile.username)),
            email: profile.email,
            image,
        }
    }
}

/// The built-in Discord style.
pub fn style() -> ProviderStyle {
    ProviderStyle::new("/discord.svg", "#5865F2", "#fff")
}

/// The built-in Discord configuration for `options`, before overrides.
pub fn defaults(options: &OAuthUserConfig) -> OAuthConfig {
    OAuthConfig::new(ID, NAME, options)
        .with_authorization(AUTHORIZATION_URL)
        .with_token(TOKEN_URL)
        .with_userinfo(USERINFO_URL)
        .with_profile(Arc::new(ProfileFrom::<DiscordProfile>::new()))
        .with_style(style())
}

/// Add Discord sign-in.
pub fn discord(options: OAuthUserConfig) -> OAuthConfig {
    defaults(&options).merge(options)
}
