//! Error types for the currency converter.

use crate::domain::CurrencyCode;

/// Domain-level errors (invalid input).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DomainError {
    #[error("Amount must be a finite, non-negative number (got {0})")]
    InvalidAmount(f64),

    #[error("Invalid currency code: {0:?}")]
    InvalidCurrencyCode(String),
}

/// Conversion errors raised by the controller.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConvertError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Rates for {0} are not loaded yet")]
    RatesNotLoaded(CurrencyCode),

    #[error("Rate unavailable for {base} -> {target}")]
    RateUnavailable {
        base: CurrencyCode,
        target: CurrencyCode,
    },

    #[error("Converting {amount} at rate {rate} is out of range")]
    Overflow { amount: f64, rate: f64 },
}

/// Application-level errors (for HTTP responses).
///
/// Maps cleanly to HTTP status codes.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unprocessable: {0}")]
    Unprocessable(String),

    #[error("Service unavailable: {0}")]
    Unavailable(String),
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        AppError::BadRequest(err.to_string())
    }
}

impl From<ConvertError> for AppError {
    fn from(err: ConvertError) -> Self {
        match err {
            ConvertError::Domain(e) => e.into(),
            ConvertError::RatesNotLoaded(_) => AppError::Unavailable(err.to_string()),
            ConvertError::RateUnavailable { .. } | ConvertError::Overflow { .. } => {
                AppError::Unprocessable(err.to_string())
            }
        }
    }
}
