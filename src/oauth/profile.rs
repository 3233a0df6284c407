// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: AGPL-3.0-or-later

use super::TokenSet;
use crate::common::{Error, NormalizedIdentity};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::marker::PhantomData;

/// Converts a provider's user-info payload into a `NormalizedIdentity`.
///
/// Any `Fn(Value, &TokenSet) -> Result<NormalizedIdentity, Error>` is a mapper.
#[async_trait]
pub trait ProfileMapper: Send + Sync {
    /// Maps the payload.
    async fn profile(&self, profile: Value, tokens: &TokenSet) -> Result<NormalizedIdentity, Error>;
}

#[async_trait]
impl<F> ProfileMapper for F
where
    F: Fn(Value, &TokenSet) -> Result<NormalizedIdentity, Error> + Send + Sync,
{
    async fn profile(&self, profile: Value, tokens: &TokenSet) -> Result<NormalizedIdentity, Error> {
        self(profile, tokens)
    }
}

/// Deserializes the payload as `P` and converts it with `Into<NormalizedIdentity>`.
pub struct ProfileFrom<P>(PhantomData<fn() -> P>);

impl<P> ProfileFrom<P> {
    /// Creates the mapper.
    pub fn new() -> Self {
        Self(PhantomData)
    }
}

impl<P> Default for ProfileFrom<P> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<P> ProfileMapper for ProfileFrom<P>
where
    P: DeserializeOwned + Into<NormalizedIdentity>,
{
    async fn profile(&self, profile: Value, _tokens: &TokenSet) -> Result<NormalizedIdentity, Error> {
        let typed: P = serde_json::from_value(profile)?;
        Ok(typed.into())
    }
}
