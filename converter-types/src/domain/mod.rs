//! Domain models for the currency converter.

pub mod currency;
pub mod history;
pub mod rates;
pub mod state;

pub use currency::CurrencyCode;
pub use history::{ConversionHistory, HISTORY_CAPACITY, HistoryEntry};
pub use rates::RateMapping;
pub use state::{ConversionState, validate_amount};
