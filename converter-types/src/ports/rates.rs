//! Rate provider port.
//!
//! This trait defines the interface for exchange rate sources.
//! Implementations can be HTTP feed clients, static tables, mocks, etc.

use crate::domain::{CurrencyCode, RateMapping};

/// Error type for rate fetches.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RateError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Rate feed returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Malformed rate document: {0}")]
    Parse(String),

    #[error("Rate document has no rates for base {0}")]
    MissingBase(CurrencyCode),

    #[error("Unsupported currency: {0}")]
    UnsupportedCurrency(CurrencyCode),
}

/// Port trait for exchange rate providers.
#[async_trait::async_trait]
pub trait RateProvider: Send + Sync {
    /// Fetches every known rate relative to `base`.
    /// `rate(c)` of the result is how many units of `c` one unit of `base` buys.
    async fn fetch_rates(&self, base: &CurrencyCode) -> Result<RateMapping, RateError>;
}

#[async_trait::async_trait]
impl<P: RateProvider + ?Sized> RateProvider for std::sync::Arc<P> {
    async fn fetch_rates(&self, base: &CurrencyCode) -> Result<RateMapping, RateError> {
        (**self).fetch_rates(base).await
    }
}

#[async_trait::async_trait]
impl<P: RateProvider + ?Sized> RateProvider for Box<P> {
    async fn fetch_rates(&self, base: &CurrencyCode) -> Result<RateMapping, RateError> {
        (**self).fetch_rates(base).await
    }
}
