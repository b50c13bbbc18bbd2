//! Rate mapping for a single base currency.

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

use super::currency::CurrencyCode;

/// Every known rate relative to one base currency.
///
/// `rates[c]` is how many units of `c` one unit of `base` buys. A mapping is
/// replaced wholesale on every successful fetch, never merged.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RateMapping {
    base: CurrencyCode,
    #[serde(skip_serializing_if = "Option::is_none")]
    date: Option<NaiveDate>,
    rates: BTreeMap<CurrencyCode, f64>,
}

impl RateMapping {
    /// Builds a mapping, dropping any rate that is not finite and positive.
    pub fn new(base: CurrencyCode, rates: impl IntoIterator<Item = (CurrencyCode, f64)>) -> Self {
        let rates = rates
            .into_iter()
            .filter(|(_, rate)| rate.is_finite() && *rate > 0.0)
            .collect();
        Self {
            base,
            date: None,
            rates,
        }
    }

    /// Attaches the feed's publication date.
    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn base(&self) -> &CurrencyCode {
        &self.base
    }

    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    /// Rate for `code`, if the feed published one.
    pub fn rate(&self, code: &CurrencyCode) -> Option<f64> {
        self.rates.get(code).copied()
    }

    /// Currency codes in sorted order.
    pub fn currencies(&self) -> impl Iterator<Item = &CurrencyCode> {
        self.rates.keys()
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(s: &str) -> CurrencyCode {
        CurrencyCode::new(s).unwrap()
    }

    #[test]
    fn test_rate_lookup() {
        let mapping = RateMapping::new(code("usd"), [(code("inr"), 83.0), (code("eur"), 0.92)]);
        assert_eq!(mapping.base(), &code("usd"));
        assert_eq!(mapping.rate(&code("inr")), Some(83.0));
        assert_eq!(mapping.rate(&code("gbp")), None);
    }

    #[test]
    fn test_non_positive_rates_are_dropped() {
        let mapping = RateMapping::new(
            code("usd"),
            [
                (code("inr"), 83.0),
                (code("xxx"), 0.0),
                (code("yyy"), -1.0),
                (code("zzz"), f64::NAN),
            ],
        );
        assert_eq!(mapping.len(), 1);
    }

    #[test]
    fn test_currencies_are_sorted() {
        let mapping = RateMapping::new(
            code("usd"),
            [(code("inr"), 83.0), (code("eur"), 0.92), (code("gbp"), 0.79)],
        );
        let codes: Vec<&str> = mapping.currencies().map(|c| c.as_str()).collect();
        assert_eq!(codes, vec!["eur", "gbp", "inr"]);
    }
}
