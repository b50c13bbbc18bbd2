//! # Rate Feed Client
//!
//! A typed client for the public currency feed
//! (`{base_url}/currencies/{code}.json`).
//!
//! The feed answers with a document whose key equal to the requested base
//! holds the rates, next to a publication `date`:
//!
//! ```json
//! { "date": "2024-03-01", "usd": { "eur": 0.92, "inr": 83.0 } }
//! ```

use chrono::NaiveDate;
use converter_types::{CurrencyCode, RateError, RateMapping, RateProvider};
use reqwest::Client;
use serde_json::Value;

/// Public jsDelivr mirror of the currency feed.
pub const DEFAULT_FEED_URL: &str = "https://cdn.jsdelivr.net/npm/@fawazahmed0/currency-api@latest/v1";

/// Error type for client operations.
#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Feed error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Document has no rates for {0}")]
    MissingBase(CurrencyCode),

    #[error("Rates for {0} are not an object of numbers")]
    Malformed(CurrencyCode),
}

impl From<FeedError> for RateError {
    fn from(err: FeedError) -> Self {
        match err {
            FeedError::Http(e) => RateError::Network(e.to_string()),
            FeedError::Api { status, message } => RateError::Status { status, message },
            FeedError::Json(e) => RateError::Parse(e.to_string()),
            FeedError::MissingBase(base) => RateError::MissingBase(base),
            e @ FeedError::Malformed(_) => RateError::Parse(e.to_string()),
        }
    }
}

/// Currency feed client.
pub struct CurrencyApiClient {
    base_url: String,
    http: Client,
}

impl CurrencyApiClient {
    /// Creates a new client.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    fn rates_url(&self, base: &CurrencyCode) -> String {
        format!("{}/currencies/{}.json", self.base_url, base.as_str())
    }

    /// Fetches the rate document for `base`.
    pub async fn latest(&self, base: &CurrencyCode) -> Result<RateMapping, FeedError> {
        let url = self.rates_url(base);
        tracing::debug!(%url, "fetching rates");
        let resp = self.http.get(&url).send().await?;
        let status = resp.status();
        let body = resp.text().await?;
        if !status.is_success() {
            return Err(FeedError::Api {
                status: status.as_u16(),
                message: body,
            });
        }
        parse_rates(base, &body)
    }
}

impl Default for CurrencyApiClient {
    fn default() -> Self {
        Self::new(DEFAULT_FEED_URL)
    }
}

#[async_trait::async_trait]
impl RateProvider for CurrencyApiClient {
    async fn fetch_rates(&self, base: &CurrencyCode) -> Result<RateMapping, RateError> {
        self.latest(base).await.map_err(Into::into)
    }
}

/// Parses a feed document into a mapping for `base`.
///
/// Keys that are not valid codes or values that are not numbers are skipped;
/// a missing or non-object base entry is an error.
pub fn parse_rates(base: &CurrencyCode, body: &str) -> Result<RateMapping, FeedError> {
    let doc: Value = serde_json::from_str(body)?;
    let rates = doc
        .get(base.as_str())
        .ok_or_else(|| FeedError::MissingBase(base.clone()))?
        .as_object()
        .ok_or_else(|| FeedError::Malformed(base.clone()))?;

    let entries = rates.iter().filter_map(|(code, rate)| {
        let code = CurrencyCode::new(code).ok()?;
        Some((code, rate.as_f64()?))
    });
    let mut mapping = RateMapping::new(base.clone(), entries);

    if let Some(date) = doc
        .get("date")
        .and_then(Value::as_str)
        .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
    {
        mapping = mapping.with_date(date);
    }
    Ok(mapping)
}
