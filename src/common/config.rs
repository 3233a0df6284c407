// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: LGPL-3.0-or-later

use super::Error;
use serde::de::DeserializeOwned;
#[allow(deprecated)]
use std::env::home_dir;
use std::fs::read_to_string;

/// Developer-supplied provider options, read from TOML.
///
/// Each provider reads its own table, e.g. `[wechat]` or `[email]`.
#[derive(Debug)]
pub struct AuthConfig {
    debug_enabled: bool,
    table: toml::Table,
}

impl AuthConfig {
    /// Creates a configuration builder.
    pub fn builder() -> AuthConfigBuilder {
        AuthConfigBuilder {
            debug_enabled: false,
            source: Err(Error::Configuration("config not set".to_string())),
        }
    }

    /// Returns `true` if debug is enabled.
    pub fn debug(&self) -> bool {
        self.debug_enabled
    }

    /// Deserializes the whole document.
    pub fn get<T: DeserializeOwned>(&self) -> Result<T, Error> {
        toml::Value::Table(self.table.clone())
            .try_into()
            .map_err(|e: toml::de::Error| Error::Configuration(format!("toml: {e}")))
    }

    /// Deserializes the table called `name`, or returns `None` if there isn't one.
    pub fn section<T: DeserializeOwned>(&self, name: &str) -> Result<Option<T>, Error> {
        let Some(value) = self.table.get(name) else {
            return Ok(None);
        };
        value
            .clone()
            .try_into()
            .map(Some)
            .map_err(|e: toml::de::Error| Error::Configuration(format!("[{name}]: {e}")))
    }

    /// Whether a table called `name` is present.
    pub fn has_section(&self, name: &str) -> bool {
        self.table.contains_key(name)
    }
}

/// Builds an `AuthConfig` from a file or a string.
pub struct AuthConfigBuilder {
    debug_enabled: bool,
    source: Result<String, Error>,
}

impl AuthConfigBuilder {
    /// Parses the TOML source.
    pub fn build(self) -> Result<AuthConfig, Error> {
        let toml = self.source?;
        let table = toml::from_str::<toml::Table>(&toml)
            .map_err(|e| Error::Configuration(format!("toml: {e}")))?;
        Ok(AuthConfig {
            debug_enabled: self.debug_enabled,
            table,
        })
    }

    /// Echo log lines to stdout.
    pub fn debug(self, debug_enabled: bool) -> Self {
        Self {
            debug_enabled,
            ..self
        }
    }

    /// Reads `file_name` from the home directory, falling back to the working directory.
    pub fn toml_file(self, file_name: &str) -> Self {
        #[allow(deprecated)]
        let home_path = home_dir()
            .and_then(|pathbuf| pathbuf.to_str().map(|path| format!("{path}/{file_name}")));
        let local_path = format!("./{file_name}");
        let source = match home_path.and_then(|path| read_to_string(path).ok()) {
            Some(s) => Ok(s),
            None => read_to_string(&local_path)
                .map_err(|_| Error::Configuration(format!("{local_path}: cannot read"))),
        };
        Self { source, ..self }
    }

    /// Uses `toml` as the source.
    pub fn toml_str(self, toml: &str) -> Self {
        self.toml_string(toml.to_string())
    }

    /// Uses `toml` as the source.
    pub fn toml_string(self, toml: String) -> Self {
        Self {
            source: Ok(toml),
            ..self
        }
    }
}
