//! Configuration loading from environment.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use anyhow::Context;
use converter_types::CurrencyCode;

/// Where rates come from.
#[derive(Debug, Clone, PartialEq)]
pub enum RateSource {
    /// Public HTTP feed at the given base URL.
    Feed(String),
    /// Built-in table, no network.
    Static,
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

/// Application configuration.
#[derive(Debug)]
pub struct Config {
    pub port: u16,
    pub rate_source: RateSource,
    pub conversion_delay: Duration,
    pub default_source: CurrencyCode,
    pub default_target: CurrencyCode,
    pub default_amount: f64,
    pub log_format: LogFormat,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Loads configuration through `lookup`, applying defaults for unset keys.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let port = parse_or(&lookup, "PORT", 3000)?;

        let rate_source = match lookup("RATE_PROVIDER").as_deref() {
            None | Some("feed") => RateSource::Feed(
                lookup("RATE_FEED_URL")
                    .unwrap_or_else(|| rate_feed::DEFAULT_FEED_URL.to_string()),
            ),
            Some("static") => RateSource::Static,
            Some(other) => {
                anyhow::bail!("RATE_PROVIDER must be 'feed' or 'static', got {other:?}")
            }
        };

        let conversion_delay =
            Duration::from_millis(parse_or(&lookup, "CONVERSION_DELAY_MS", 600)?);
        let default_source = parse_or(&lookup, "DEFAULT_SOURCE", CurrencyCode::new("usd")?)?;
        let default_target = parse_or(&lookup, "DEFAULT_TARGET", CurrencyCode::new("inr")?)?;
        let default_amount = parse_or(&lookup, "DEFAULT_AMOUNT", 1.0)?;

        let log_format = match lookup("LOG_FORMAT").as_deref() {
            Some("json") => LogFormat::Json,
            _ => LogFormat::Text,
        };

        Ok(Self {
            port,
            rate_source,
            conversion_delay,
            default_source,
            default_target,
            default_amount,
            log_format,
        })
    }
}

fn parse_or<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("invalid value for {key}: {raw:?}")),
        None => Ok(default),
    }
}
