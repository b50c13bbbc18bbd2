//! User-visible conversion state.

use serde::Serialize;

use super::currency::CurrencyCode;
use crate::error::DomainError;

/// What the widget shows: inputs, the last result, and progress flags.
///
/// `converted_amount` is `amount * rate[target_currency]` as of the last
/// completed conversion and is stale while `is_loading` is set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConversionState {
    pub amount: f64,
    pub source_currency: CurrencyCode,
    pub target_currency: CurrencyCode,
    pub converted_amount: f64,
    pub is_loading: bool,
    /// Set when the last conversion found no rate for the target.
    pub rate_unavailable: bool,
}

impl ConversionState {
    pub fn new(
        amount: f64,
        source_currency: CurrencyCode,
        target_currency: CurrencyCode,
    ) -> Result<Self, DomainError> {
        Ok(Self {
            amount: validate_amount(amount)?,
            source_currency,
            target_currency,
            converted_amount: 0.0,
            is_loading: false,
            rate_unavailable: false,
        })
    }

    /// Exchanges source with target and amount with converted amount.
    pub fn swap(&mut self) {
        std::mem::swap(&mut self.source_currency, &mut self.target_currency);
        std::mem::swap(&mut self.amount, &mut self.converted_amount);
    }
}

/// Amounts must be finite and non-negative.
pub fn validate_amount(amount: f64) -> Result<f64, DomainError> {
    if !amount.is_finite() || amount < 0.0 {
        return Err(DomainError::InvalidAmount(amount));
    }
    Ok(amount)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> ConversionState {
        ConversionState::new(
            10.0,
            CurrencyCode::new("usd").unwrap(),
            CurrencyCode::new("inr").unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_swap_exchanges_both_pairs() {
        let mut s = state();
        s.converted_amount = 830.0;
        s.swap();
        assert_eq!(s.source_currency.as_str(), "inr");
        assert_eq!(s.target_currency.as_str(), "usd");
        assert_eq!(s.amount, 830.0);
        assert_eq!(s.converted_amount, 10.0);
    }

    #[test]
    fn test_double_swap_is_identity() {
        let mut s = state();
        s.converted_amount = 830.0;
        let before = s.clone();
        s.swap();
        s.swap();
        assert_eq!(s, before);
    }

    #[test]
    fn test_invalid_amounts_rejected() {
        assert!(validate_amount(0.0).is_ok());
        assert!(matches!(
            validate_amount(-1.0),
            Err(DomainError::InvalidAmount(_))
        ));
        assert!(validate_amount(f64::NAN).is_err());
        assert!(validate_amount(f64::INFINITY).is_err());
    }
}
