// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: AGPL-3.0-or-later

/// The provider tag and tagged union.
mod kind;
/// Lookup of configured providers.
mod registry;

pub use self::kind::{Provider, ProviderType};
pub use self::registry::ProviderRegistry;
