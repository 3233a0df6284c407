// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: LGPL-3.0-or-later

use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Eq, PartialEq)]
/// An enum that encapsulates the failures a provider or one of its hooks can report.
///
/// None of these are handled inside this crate. The authentication engine
/// decides how each one is presented to the end user.
///
/// # Example
///
/// Error::Delivery(vec!["alice@example.com".to_string()])
pub enum Error {
    /// A required option is missing or malformed.
    Configuration(String),
    /// One or more recipients were rejected, or left pending, by the mail transport.
    Delivery(Vec<String>),
    /// An identifier (email address, phone number, ...) is missing or malformed.
    Identifier(String),
    /// A user-info payload does not have the shape the provider documents.
    Profile(String),
    /// A hook that must be supplied by the application was not.
    Unimplemented(String),
    /// String error.
    String(String),
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        match self {
            Error::Configuration(s) => Display::fmt(&format!("configuration: {s}"), f),
            Error::Delivery(failed) => Display::fmt(
                &format!("Email ({}) could not be sent", failed.join(", ")),
                f,
            ),
            Error::Identifier(s) => Display::fmt(s, f),
            Error::Profile(s) => Display::fmt(&format!("profile: {s}"), f),
            Error::Unimplemented(s) => Display::fmt(s, f),
            Error::String(s) => Display::fmt(s, f),
        }
    }
}

impl std::error::Error for Error {}

impl Error {
    /// Returns the recipients named by a delivery failure, if any.
    pub fn failed_recipients(&self) -> &[String] {
        match self {
            Error::Delivery(failed) => failed,
            _ => &[],
        }
    }
}

#[cfg(feature = "serde_json")]
impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Profile(e.to_string())
    }
}
