// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: LGPL-3.0-or-later

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, Eq, Hash, PartialEq, Deserialize, Serialize)]
/// The stable key under which the engine registers and looks up a provider.
pub struct ProviderId(pub String);
crate::impl_wrapper_str!(ProviderId);

/// The `NormalizedIdentity` struct is what every profile mapper hands back to the engine.
///
/// Fields the provider did not supply are `None` and serialize as `null`; they
/// are never left out.
#[derive(Clone, Debug, Default, Eq, PartialEq, Deserialize, Serialize)]
pub struct NormalizedIdentity {
    /// The user's ID at the provider.
    pub id: String,
    /// The display name, if any.
    pub name: Option<String>,
    /// The email address, if the provider discloses one.
    pub email: Option<String>,
    /// The avatar URL, if any.
    pub image: Option<String>,
}

impl NormalizedIdentity {
    /// Creates an identity with only an ID.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }
}
