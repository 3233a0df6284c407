// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: LGPL-3.0-or-later

#![warn(missing_docs)]
//! This crate is a collection of provider configuration adapters that plug
//! third-party identity services into an authentication engine.

/// Types common to multiple providers.
pub mod common;
pub use common::*;

#[cfg(feature = "email")]
/// Sign-in links delivered by email.
pub mod email;
#[cfg(feature = "email")]
pub use email::*;

#[cfg(feature = "log")]
/// Thread-safe logging.
pub mod log;
#[cfg(feature = "log")]
pub use log::*;

#[cfg(feature = "oauth")]
/// OAuth2 provider configurations.
pub mod oauth;
#[cfg(feature = "oauth")]
pub use oauth::*;

#[cfg(any(feature = "oauth", feature = "token"))]
/// The provider tagged union and registry.
pub mod provider;
#[cfg(any(feature = "oauth", feature = "token"))]
pub use provider::*;

/// Macros used with `serde` serialization and deserialization.
pub mod serde_utils;
pub use serde_utils::*;

#[cfg(feature = "token")]
/// Sign-in tokens delivered by the application.
pub mod token;
#[cfg(feature = "token")]
pub use token::*;
