// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: LGPL-3.0-or-later

use serde::de::{self, Deserializer, Visitor};
use std::fmt;

/// Accepts a JSON string or number and yields it as a `String`.
///
/// Providers disagree on whether user IDs are numbers or strings.
/// # Example
/// `#[serde(deserialize_with = "string_or_number")]`
pub fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(StringOrNumberVisitor)
}

struct StringOrNumberVisitor;

impl<'de> Visitor<'de> for StringOrNumberVisitor {
    type Value = String;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a string or a number")
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
        Ok(value.to_string())
    }

    fn visit_string<E: de::Error>(self, value: String) -> Result<Self::Value, E> {
        Ok(value)
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Self::Value, E> {
        Ok(value.to_string())
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Self::Value, E> {
        Ok(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::string_or_number;
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Payload {
        #[serde(deserialize_with = "string_or_number")]
        id: String,
    }

    #[test]
    fn numbers_and_strings() {
        let p: Payload = toml::from_str("id = 42").unwrap();
        assert_eq!(p.id, "42");

        let p: Payload = toml::from_str("id = \"x1\"").unwrap();
        assert_eq!(p.id, "x1");

        assert!(toml::from_str::<Payload>("id = true").is_err());
    }
}
