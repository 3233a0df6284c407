// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: AGPL-3.0-or-later

use crate::common::Error;

/// Canonicalizes a user-entered identifier before it is stored or compared.
///
/// Any `Fn(&str) -> Result<String, Error>` is a normalizer.
pub trait IdentifierNormalizer: Send + Sync {
    /// Normalizes a non-empty identifier.
    fn normalize(&self, identifier: &str) -> Result<String, Error>;
}

impl<F> IdentifierNormalizer for F
where
    F: Fn(&str) -> Result<String, Error> + Send + Sync,
{
    fn normalize(&self, identifier: &str) -> Result<String, Error> {
        self(identifier)
    }
}

/// The email provider's normalizer.
///
/// Lower-cases and trims the address, keeps only the first two `@`-separated
/// parts and cuts the domain at the first `,`.
#[derive(Copy, Clone, Debug, Default)]
pub struct EmailNormalizer;

impl IdentifierNormalizer for EmailNormalizer {
    fn normalize(&self, identifier: &str) -> Result<String, Error> {
        if identifier.is_empty() {
            return Err(Error::Identifier(MISSING_EMAIL.to_string()));
        }
        let lower = identifier.to_lowercase();
        let mut parts = lower.trim().split('@');
        let local = parts.next().unwrap_or_default();
        let domain = parts
            .next()
            .ok_or_else(|| Error::Identifier("Email address has no domain.".to_string()))?;
        // The local part may contain a `,`; the domain may not.
        let domain = domain.split(',').next().unwrap_or_default();
        Ok(format!("{local}@{domain}"))
    }
}

/// Reported when an email provider gets no identifier.
pub(crate) const MISSING_EMAIL: &str = "Missing email from request body.";
/// Reported when a token provider gets no identifier.
pub(crate) const MISSING_IDENTIFIER: &str = "Missing identifier from request body.";

/// Rejects a missing or empty identifier, then applies `normalizer`, if any.
pub(crate) fn normalize_with(
    normalizer: Option<&dyn IdentifierNormalizer>,
    identifier: Option<&str>,
    missing: &str,
) -> Result<String, Error> {
    let identifier = identifier
        .filter(|identifier| !identifier.is_empty())
        .ok_or_else(|| Error::Identifier(missing.to_string()))?;
    match normalizer {
        Some(normalizer) => normalizer.normalize(identifier),
        None => Ok(identifier.to_string()),
    }
}
