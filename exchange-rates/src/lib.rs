//! Static Exchange Rates
//!
//! A [`RateProvider`] backed by a built-in table of USD-relative rates, for
//! running the converter offline and for tests. Cross rates for any base in
//! the table are derived through USD.
//!
//! # Adding a New Currency
//! Add a line to `USD_RATES`:
//! ```ignore
//! ("sek", 10.4),
//! ```
//!
//! # Example
//! ```
//! use converter_types::CurrencyCode;
//! use exchange_rates::StaticRateProvider;
//!
//! let provider = StaticRateProvider::new();
//! let inr = CurrencyCode::new("inr").unwrap();
//! let rates = provider.rates_for(&CurrencyCode::new("usd").unwrap()).unwrap();
//! assert_eq!(rates.rate(&inr), Some(83.12));
//! ```

use std::collections::BTreeMap;

use converter_types::{CurrencyCode, RateError, RateMapping, RateProvider};

// ─────────────────────────────────────────────────────────────────────────────
// CURRENCY DEFINITIONS - 1 USD buys this many units
// ─────────────────────────────────────────────────────────────────────────────

const USD_RATES: &[(&str, f64)] = &[
    ("usd", 1.0),
    ("eur", 0.92),
    ("gbp", 0.79),
    ("inr", 83.12),
    ("jpy", 149.5),
    ("aud", 1.52),
    ("cad", 1.35),
    ("chf", 0.88),
    ("cny", 7.19),
    ("sgd", 1.34),
];

/// Rate provider answering from an in-memory USD-relative table.
#[derive(Debug, Clone)]
pub struct StaticRateProvider {
    usd_rates: BTreeMap<CurrencyCode, f64>,
}

impl StaticRateProvider {
    /// Provider with the built-in table.
    pub fn new() -> Self {
        Self::from_usd_rates(
            USD_RATES
                .iter()
                .filter_map(|(code, rate)| Some((CurrencyCode::new(code).ok()?, *rate))),
        )
    }

    /// Provider with a custom table; each rate is units per 1 USD.
    /// Non-positive rates are ignored.
    pub fn from_usd_rates(rates: impl IntoIterator<Item = (CurrencyCode, f64)>) -> Self {
        let usd_rates = rates
            .into_iter()
            .filter(|(_, rate)| rate.is_finite() && *rate > 0.0)
            .collect();
        Self { usd_rates }
    }

    /// Every supported code, sorted.
    pub fn currencies(&self) -> impl Iterator<Item = &CurrencyCode> {
        self.usd_rates.keys()
    }

    /// Cross rates relative to `base`, computed synchronously.
    pub fn rates_for(&self, base: &CurrencyCode) -> Result<RateMapping, RateError> {
        let base_per_usd = self
            .usd_rates
            .get(base)
            .copied()
            .ok_or_else(|| RateError::UnsupportedCurrency(base.clone()))?;

        let rates = self.usd_rates.iter().map(|(code, per_usd)| {
            let rate = if code == base {
                1.0
            } else {
                per_usd / base_per_usd
            };
            (code.clone(), rate)
        });
        Ok(RateMapping::new(base.clone(), rates))
    }
}

impl Default for StaticRateProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl RateProvider for StaticRateProvider {
    async fn fetch_rates(&self, base: &CurrencyCode) -> Result<RateMapping, RateError> {
        self.rates_for(base)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
