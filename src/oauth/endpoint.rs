// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: AGPL-3.0-or-later

use super::{TokenRequest, UserinfoRequest, Url};
use crate::common::Error;
use std::collections::BTreeMap;
use std::fmt::{self, Debug, Formatter};
use std::sync::Arc;

/// Request parameters, sorted by name.
pub type Params = BTreeMap<String, String>;

/// Authorization endpoints are only ever redirected to, so they carry no request hook.
pub enum NoRequest {}

/// An endpoint of an OAuth2 provider: either a bare URL or a URL with fixed
/// parameters and an optional hook `R` that performs the exchange instead of
/// the engine's default.
pub enum Endpoint<R: ?Sized> {
    /// A bare URL.
    Url(String),
    /// A URL with parameters and an optional request hook.
    Descriptor {
        /// The endpoint URL.
        url: String,
        /// Parameters sent with every request to this endpoint.
        params: Params,
        /// Performs the request in place of the engine's default.
        request: Option<Arc<R>>,
    },
}

/// Where the user is sent to grant access.
pub type AuthorizationEndpoint = Endpoint<NoRequest>;
/// Where the authorization code is exchanged for tokens.
pub type TokenEndpoint = Endpoint<dyn TokenRequest>;
/// Where the user's profile is fetched.
pub type UserinfoEndpoint = Endpoint<dyn UserinfoRequest>;

impl<R: ?Sized> Endpoint<R> {
    /// An endpoint with parameters and no request hook.
    pub fn descriptor<K, V>(url: impl Into<String>, params: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Endpoint::Descriptor {
            url: url.into(),
            params: params
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            request: None,
        }
    }

    /// Attaches a request hook, turning a bare URL into a descriptor.
    pub fn with_request(self, request: Arc<R>) -> Self {
        match self {
            Endpoint::Url(url) => Endpoint::Descriptor {
                url,
                params: Params::new(),
                request: Some(request),
            },
            Endpoint::Descriptor { url, params, .. } => Endpoint::Descriptor {
                url,
                params,
                request: Some(request),
            },
        }
    }

    /// The endpoint URL, without parameters.
    pub fn url(&self) -> &str {
        match self {
            Endpoint::Url(url) | Endpoint::Descriptor { url, .. } => url,
        }
    }

    /// A copy of the parameters (empty for a bare URL).
    pub fn params(&self) -> Params {
        match self {
            Endpoint::Url(_) => Params::new(),
            Endpoint::Descriptor { params, .. } => params.clone(),
        }
    }

    /// A single parameter.
    pub fn param(&self, name: &str) -> Option<&str> {
        match self {
            Endpoint::Url(_) => None,
            Endpoint::Descriptor { params, .. } => params.get(name).map(String::as_str),
        }
    }

    /// The request hook, if any.
    pub fn request(&self) -> Option<&Arc<R>> {
        match self {
            Endpoint::Url(_) => None,
            Endpoint::Descriptor { request, .. } => request.as_ref(),
        }
    }

    /// The URL with the parameters appended as query pairs.
    pub fn to_url(&self) -> Result<Url, Error> {
        let mut url = Url::parse(self.url())
            .map_err(|e| Error::Configuration(format!("{}: {e}", self.url())))?;
        if let Endpoint::Descriptor { params, .. } = self {
            if !params.is_empty() {
                url.query_pairs_mut().extend_pairs(params.iter());
            }
        }
        Ok(url)
    }
}

impl<R: ?Sized> Clone for Endpoint<R> {
    fn clone(&self) -> Self {
        match self {
            Endpoint::Url(url) => Endpoint::Url(url.clone()),
            Endpoint::Descriptor {
                url,
                params,
                request,
            } => Endpoint::Descriptor {
                url: url.clone(),
                params: params.clone(),
                request: request.clone(),
            },
        }
    }
}

impl<R: ?Sized> Debug for Endpoint<R> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Url(url) => f.debug_tuple("Url").field(url).finish(),
            Endpoint::Descriptor {
                url,
                params,
                request,
            } => f
                .debug_struct("Descriptor")
                .field("url", url)
                // Token endpoint parameters may include the client secret.
                .field("params", &params.keys().collect::<Vec<_>>())
                .field("request", &request.as_ref().map(|_| "<request>"))
                .finish(),
        }
    }
}

impl<R: ?Sized> From<&str> for Endpoint<R> {
    fn from(url: &str) -> Self {
        Endpoint::Url(url.to_string())
    }
}

impl<R: ?Sized> From<String> for Endpoint<R> {
    fn from(url: String) -> Self {
        Endpoint::Url(url)
    }
}
