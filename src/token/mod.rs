// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: AGPL-3.0-or-later

/// Token provider configuration records.
mod config;
/// Identifier normalizers.
mod normalize;
/// The verification sender seam.
mod sender;
mod tests;

pub use self::config::{
    token, TokenConfig, TokenSection, TokenSettings, TokenUserConfig, DEFAULT_MAX_AGE,
};
pub use self::normalize::{EmailNormalizer, IdentifierNormalizer};
#[cfg(feature = "email")]
pub(crate) use self::normalize::{normalize_with, MISSING_EMAIL};
pub use self::sender::{
    SendVerificationRequestParams, Theme, UnimplementedSender, VerificationSender,
    VerificationTokenGenerator,
};
