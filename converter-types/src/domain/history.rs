//! Conversion history for the current session.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;
use uuid::Uuid;

use super::currency::CurrencyCode;

/// Number of conversions kept in the history panel.
pub const HISTORY_CAPACITY: usize = 5;

/// One completed conversion. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: Uuid,
    pub source_currency: CurrencyCode,
    pub target_currency: CurrencyCode,
    pub amount: f64,
    pub result: f64,
    pub timestamp: DateTime<Utc>,
}

impl HistoryEntry {
    pub fn new(
        source_currency: CurrencyCode,
        target_currency: CurrencyCode,
        amount: f64,
        result: f64,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            source_currency,
            target_currency,
            amount,
            result,
            timestamp: Utc::now(),
        }
    }

    /// Wall-clock time of the conversion, `HH:MM:SS`.
    pub fn time_of_day(&self) -> String {
        self.timestamp.format("%H:%M:%S").to_string()
    }
}

impl fmt::Display for HistoryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} → {:.2} {}",
            self.amount,
            self.source_currency.display_code(),
            self.result,
            self.target_currency.display_code()
        )
    }
}

/// Newest-first, bounded list of conversions.
///
/// Recording an entry beyond capacity evicts the oldest one.
#[derive(Debug, Clone)]
pub struct ConversionHistory {
    entries: VecDeque<HistoryEntry>,
    capacity: usize,
}

impl ConversionHistory {
    /// Creates an empty history holding at most `capacity` entries, clamped
    /// to `1..=HISTORY_CAPACITY`.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.clamp(1, HISTORY_CAPACITY);
        Self {
            entries: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    pub fn record(&mut self, entry: HistoryEntry) {
        self.entries.push_front(entry);
        self.entries.truncate(self.capacity);
    }

    pub fn latest(&self) -> Option<&HistoryEntry> {
        self.entries.front()
    }

    pub fn entries(&self) -> Vec<HistoryEntry> {
        self.entries.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for ConversionHistory {
    fn default() -> Self {
        Self::with_capacity(HISTORY_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(amount: f64) -> HistoryEntry {
        HistoryEntry::new(
            CurrencyCode::new("usd").unwrap(),
            CurrencyCode::new("inr").unwrap(),
            amount,
            amount * 83.0,
        )
    }

    #[test]
    fn test_history_is_newest_first() {
        let mut history = ConversionHistory::default();
        history.record(entry(1.0));
        history.record(entry(2.0));
        assert_eq!(history.latest().unwrap().amount, 2.0);
        assert_eq!(history.entries()[1].amount, 1.0);
    }

    #[test]
    fn test_history_evicts_oldest_beyond_capacity() {
        let mut history = ConversionHistory::default();
        for i in 1..=6 {
            history.record(entry(i as f64));
        }
        let amounts: Vec<f64> = history.entries().iter().map(|e| e.amount).collect();
        assert_eq!(amounts, vec![6.0, 5.0, 4.0, 3.0, 2.0]);
    }

    #[test]
    fn test_zero_capacity_keeps_one() {
        let mut history = ConversionHistory::with_capacity(0);
        history.record(entry(1.0));
        history.record(entry(2.0));
        assert_eq!(history.len(), 1);
        assert_eq!(history.capacity(), 1);
    }

    #[test]
    fn test_capacity_never_exceeds_five() {
        let mut history = ConversionHistory::with_capacity(50);
        for i in 1..=10 {
            history.record(entry(i as f64));
        }
        assert_eq!(history.capacity(), HISTORY_CAPACITY);
        assert_eq!(history.len(), 5);
        assert_eq!(history.latest().unwrap().amount, 10.0);
    }

    #[test]
    fn test_entry_display() {
        assert_eq!(entry(10.0).to_string(), "10 USD → 830.00 INR");
    }
}
