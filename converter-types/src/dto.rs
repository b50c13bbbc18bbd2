//! Data Transfer Objects (DTOs) for requests and responses.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::{ConversionState, CurrencyCode, HistoryEntry};

// ─────────────────────────────────────────────────────────────────────────────
// Input DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Request to change the amount being converted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetAmountRequest {
    pub amount: f64,
}

/// Request to pick a currency in one of the two selectors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectCurrencyRequest {
    pub currency: CurrencyCode,
}

// ─────────────────────────────────────────────────────────────────────────────
// View DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// One row of the history panel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryItem {
    #[serde(flatten)]
    pub entry: HistoryEntry,
    /// `10 USD → 830.00 INR`
    pub label: String,
    /// `HH:MM:SS`
    pub time: String,
}

impl From<HistoryEntry> for HistoryItem {
    fn from(entry: HistoryEntry) -> Self {
        Self {
            label: entry.to_string(),
            time: entry.time_of_day(),
            entry,
        }
    }
}

/// Everything the widget renders in one payload.
#[derive(Debug, Clone, Serialize)]
pub struct WidgetView {
    pub state: ConversionState,
    /// `1 source = live_rate target`; absent until known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub live_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rates_base: Option<CurrencyCode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rates_date: Option<NaiveDate>,
    pub rates_loading: bool,
    pub currencies: Vec<CurrencyCode>,
    pub history: Vec<HistoryItem>,
}

/// Result of a submitted conversion.
#[derive(Debug, Clone, Serialize)]
pub struct ConversionResponse {
    pub entry: HistoryItem,
    pub state: ConversionState,
}
