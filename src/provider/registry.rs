// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: AGPL-3.0-or-later

use super::{Provider, ProviderType};
use crate::common::{AuthConfig, Error, ProviderId};
use crate::log::StringLogger;
use std::collections::HashMap;

/// The `ProviderRegistry` holds the providers the engine was configured with.
///
/// IDs are non-empty and unique; `new` refuses anything else.
#[derive(Clone, Debug)]
pub struct ProviderRegistry {
    providers: Vec<Provider>,
    by_id: HashMap<ProviderId, usize>,
    log: StringLogger,
}

impl ProviderRegistry {
    /// Returns a registry of `providers`, in order.
    pub fn new(providers: impl IntoIterator<Item = Provider>) -> Result<Self, Error> {
        Self::with_log(providers, StringLogger::default())
    }

    fn with_log(
        providers: impl IntoIterator<Item = Provider>,
        log: StringLogger,
    ) -> Result<Self, Error> {
        let providers: Vec<Provider> = providers.into_iter().collect();
        let mut by_id = HashMap::with_capacity(providers.len());
        for (i, provider) in providers.iter().enumerate() {
            let id = provider.id();
            if id.is_empty() {
                return Err(Error::Configuration(format!(
                    "{} provider has an empty id",
                    provider.provider_type()
                )));
            }
            if by_id.insert(id.clone(), i).is_some() {
                return Err(Error::Configuration(format!("{id}: duplicate provider id")));
            }
        }
        Ok(Self {
            providers,
            by_id,
            log,
        })
    }

    /// Loads every provider that has a table in `config`, e.g. `[wechat]`
    /// or `[email]`.
    pub fn from_config(config: &AuthConfig) -> Result<Self, Error> {
        let log = StringLogger::new(config.debug());
        let mut providers = Vec::<Provider>::new();

        #[cfg(feature = "oauth")]
        {
            use crate::oauth::{discord, freshbooks, google, wechat, OAuthConfig, OAuthSection};
            let factories: [(&str, fn(crate::oauth::OAuthUserConfig) -> OAuthConfig); 4] = [
                ("wechat", wechat),
                ("freshbooks", freshbooks),
                ("discord", discord),
                ("google", google),
            ];
            for (name, factory) in factories {
                let section =
                    log.call(format!("reading [{name}]"), config.section::<OAuthSection>(name))?;
                match section {
                    Some(section) => {
                        let provider = factory(section.into());
                        log.trace(format!("loaded {name} as {}", provider.id()));
                        providers.push(provider.into());
                    }
                    None => log.trace(format!("skipped {name}")),
                }
            }
        }

        #[cfg(feature = "email")]
        {
            use crate::email::{email, EmailSection, EmailUserConfig};
            let section =
                log.call("reading [email]".to_string(), config.section::<EmailSection>("email"))?;
            match section {
                Some(section) => {
                    let options = EmailUserConfig::from(section);
                    #[cfg(feature = "smtp")]
                    let options = {
                        use crate::email::{SmtpTransportFactory, TransportVerificationSender};
                        use std::sync::Arc;
                        let sender = TransportVerificationSender::new(Arc::new(SmtpTransportFactory))
                            .with_logger(log.clone());
                        options.with_sender(Arc::new(sender))
                    };
                    let provider = email(options);
                    log.trace(format!("loaded email as {}", provider.id()));
                    providers.push(provider.into());
                }
                None => log.trace("skipped email".to_string()),
            }
        }

        #[cfg(feature = "token")]
        {
            use crate::token::{token, TokenSection};
            let section =
                log.call("reading [token]".to_string(), config.section::<TokenSection>("token"))?;
            match section {
                Some(section) => {
                    let provider = token(section.into());
                    log.trace(format!("loaded token as {}", provider.id()));
                    providers.push(provider.into());
                }
                None => log.trace("skipped token".to_string()),
            }
        }

        let registry = Self::with_log(providers, log.clone());
        log.call("registering providers".to_string(), registry)
    }

    /// Looks up a provider by ID.
    pub fn get(&self, id: &str) -> Option<&Provider> {
        self.by_id.get(id).map(|&i| &self.providers[i])
    }

    /// Looks up a provider by ID, only if it has the given type.
    pub fn get_typed(&self, id: &str, provider_type: ProviderType) -> Option<&Provider> {
        self.get(id)
            .filter(|provider| provider.provider_type() == provider_type)
    }

    /// Enumerate registered provider IDs, in order.
    pub fn ids(&self) -> Vec<ProviderId> {
        self.providers
            .iter()
            .map(|provider| provider.id().clone())
            .collect()
    }

    /// All providers, in order.
    pub fn providers(&self) -> &[Provider] {
        &self.providers
    }

    /// What `from_config` did, plus any delivery outcomes of senders it created.
    pub fn log(&self) -> &StringLogger {
        &self.log
    }
}
