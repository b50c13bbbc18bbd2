//! Currency codes as published by the rate feed.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DomainError;

/// A lowercase currency code (`usd`, `inr`, `1inch`, ...).
///
/// The feed is not limited to ISO-4217, so any non-empty ASCII alphanumeric
/// code is accepted. Input is trimmed and lowercased.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CurrencyCode(String);

impl CurrencyCode {
    /// Parses and normalizes a currency code.
    pub fn new(code: &str) -> Result<Self, DomainError> {
        let code = code.trim();
        if code.is_empty() || !code.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(DomainError::InvalidCurrencyCode(code.to_string()));
        }
        Ok(Self(code.to_ascii_lowercase()))
    }

    /// Returns the lowercase code, as used in feed URLs and mapping keys.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the code as shown to users (`USD`).
    pub fn display_code(&self) -> String {
        self.0.to_ascii_uppercase()
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for CurrencyCode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for CurrencyCode {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<CurrencyCode> for String {
    fn from(code: CurrencyCode) -> Self {
        code.0
    }
}

impl AsRef<str> for CurrencyCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
