//! Locale value object

use crate::constants::DEFAULT_LOCALE;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A language tag such as `en` or `de-AT`
///
/// Stored normalized: lower-case language, upper-case region.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Locale(String);

impl Locale {
    /// Parse and normalize a language tag
    pub fn parse(tag: &str) -> Result<Self> {
        let mut parts = tag.trim().split(['-', '_']);
        let language = parts.next().unwrap_or_default();
        if !(2..=3).contains(&language.len()) || !language.chars().all(|c| c.is_ascii_alphabetic())
        {
            return Err(Error::invalid_argument(format!("invalid language tag '{tag}'")));
        }
        let mut normalized = language.to_ascii_lowercase();
        match (parts.next(), parts.next()) {
            (None, _) => {}
            (Some(region), None)
                if region.len() == 2 && region.chars().all(|c| c.is_ascii_alphabetic()) =>
            {
                normalized.push('-');
                normalized.push_str(&region.to_ascii_uppercase());
            }
            _ => return Err(Error::invalid_argument(format!("invalid language tag '{tag}'"))),
        }
        Ok(Self(normalized))
    }

    /// The normalized tag
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The language part without region
    pub fn language(&self) -> &str {
        self.0.split('-').next().unwrap_or(&self.0)
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self(DEFAULT_LOCALE.to_string())
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Locale {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Locale {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<Locale> for String {
    fn from(locale: Locale) -> Self {
        locale.0
    }
}
