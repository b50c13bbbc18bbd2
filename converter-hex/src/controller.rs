//! Conversion Controller
//!
//! Owns the widget state and drives the fetch → convert cycle through the
//! rate provider port. Contains NO transport logic.
//!
//! All state sits behind one `std::sync::Mutex` that is never held across an
//! `.await`. The two suspension points are the rate fetch and the artificial
//! conversion delay:
//! - every fetch takes a generation id, and only the latest issued fetch may
//!   touch state;
//! - conversions are serialized through a single async slot, so history is
//!   written in the order conversions were requested.

use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use converter_types::{
    ConversionHistory, ConversionState, ConvertError, CurrencyCode, DomainError,
    HistoryEntry, RateError, RateMapping, RateProvider, WidgetView, domain::validate_amount,
};

/// Perceived-latency pause applied to every conversion.
pub const DEFAULT_CONVERSION_DELAY: Duration = Duration::from_millis(600);

/// Initial state and pacing for a controller.
#[derive(Debug, Clone)]
pub struct ControllerSettings {
    pub source_currency: CurrencyCode,
    pub target_currency: CurrencyCode,
    pub amount: f64,
    pub conversion_delay: Duration,
}

impl ControllerSettings {
    pub fn new(source_currency: CurrencyCode, target_currency: CurrencyCode) -> Self {
        Self {
            source_currency,
            target_currency,
            amount: 1.0,
            conversion_delay: DEFAULT_CONVERSION_DELAY,
        }
    }

    pub fn with_amount(mut self, amount: f64) -> Self {
        self.amount = amount;
        self
    }

    pub fn with_conversion_delay(mut self, delay: Duration) -> Self {
        self.conversion_delay = delay;
        self
    }
}

/// How a rate refresh ended.
#[derive(Debug, Clone, PartialEq)]
pub enum RefreshOutcome {
    /// The fetched mapping is now the current one.
    Applied,
    /// A newer fetch or a source change made this result irrelevant.
    Superseded,
    /// The provider failed; the previous mapping is kept.
    Failed(RateError),
}

struct Inner {
    state: ConversionState,
    rates: Option<RateMapping>,
    rates_loading: bool,
    fetch_generation: u64,
    history: ConversionHistory,
}

impl Inner {
    /// Mapping for the current source, if resident.
    fn current_rates(&self) -> Option<&RateMapping> {
        self.rates
            .as_ref()
            .filter(|rates| rates.base() == &self.state.source_currency)
    }

    fn conversion_request(&self) -> ConversionRequest {
        ConversionRequest {
            amount: self.state.amount,
            source: self.state.source_currency.clone(),
            target: self.state.target_currency.clone(),
        }
    }

    fn complete_conversion(
        &mut self,
        request: ConversionRequest,
    ) -> Result<HistoryEntry, ConvertError> {
        let ConversionRequest {
            amount,
            source,
            target,
        } = request;

        let rates = self
            .rates
            .as_ref()
            .filter(|rates| rates.base() == &source)
            .ok_or_else(|| ConvertError::RatesNotLoaded(source.clone()))?;
        let Some(rate) = rates.rate(&target) else {
            self.state.rate_unavailable = true;
            return Err(ConvertError::RateUnavailable {
                base: source,
                target,
            });
        };

        let result = amount * rate;
        if !result.is_finite() {
            return Err(ConvertError::Overflow { amount, rate });
        }
        self.state.converted_amount = result;
        self.state.rate_unavailable = false;

        let entry = HistoryEntry::new(source, target, amount, result);
        self.history.record(entry.clone());
        Ok(entry)
    }
}

/// Inputs of a conversion, captured when it is requested.
struct ConversionRequest {
    amount: f64,
    source: CurrencyCode,
    target: CurrencyCode,
}

/// Clears `is_loading` when a conversion finishes or its future is dropped.
struct LoadingGuard<'a> {
    inner: &'a Mutex<Inner>,
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        lock(self.inner).state.is_loading = false;
    }
}

/// Clears `rates_loading` when a fetch future is dropped mid-flight, unless a
/// newer fetch has taken over the flag.
struct FetchGuard<'a> {
    inner: &'a Mutex<Inner>,
    generation: u64,
    armed: bool,
}

impl FetchGuard<'_> {
    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for FetchGuard<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let mut inner = lock(self.inner);
        if inner.fetch_generation == self.generation {
            inner.rates_loading = false;
        }
    }
}

fn lock(inner: &Mutex<Inner>) -> MutexGuard<'_, Inner> {
    inner.lock().unwrap_or_else(PoisonError::into_inner)
}

/// State-owning controller for the conversion widget.
///
/// Generic over `P: RateProvider`, so the feed adapter, the static table, or
/// a test double can be injected.
pub struct ConversionController<P: RateProvider> {
    provider: P,
    inner: Mutex<Inner>,
    conversion_slot: tokio::sync::Mutex<()>,
    conversion_delay: Duration,
}

impl<P: RateProvider> ConversionController<P> {
    /// Creates a controller with no rates loaded yet.
    pub fn new(provider: P, settings: ControllerSettings) -> Result<Self, DomainError> {
        let state = ConversionState::new(
            settings.amount,
            settings.source_currency,
            settings.target_currency,
        )?;
        Ok(Self {
            provider,
            inner: Mutex::new(Inner {
                state,
                rates: None,
                rates_loading: false,
                fetch_generation: 0,
                history: ConversionHistory::default(),
            }),
            conversion_slot: tokio::sync::Mutex::new(()),
            conversion_delay: settings.conversion_delay,
        })
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        lock(&self.inner)
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Read Side
    // ─────────────────────────────────────────────────────────────────────────────

    pub fn state(&self) -> ConversionState {
        self.lock().state.clone()
    }

    /// Past conversions, newest first.
    pub fn history(&self) -> Vec<HistoryEntry> {
        self.lock().history.entries()
    }

    /// Options for both selectors: the codes of the resident mapping.
    pub fn currencies(&self) -> Vec<CurrencyCode> {
        self.lock()
            .rates
            .as_ref()
            .map(|rates| rates.currencies().cloned().collect())
            .unwrap_or_default()
    }

    pub fn rates(&self) -> Option<RateMapping> {
        self.lock().rates.clone()
    }

    pub fn rates_base(&self) -> Option<CurrencyCode> {
        self.lock().rates.as_ref().map(|rates| rates.base().clone())
    }

    pub fn rates_loading(&self) -> bool {
        self.lock().rates_loading
    }

    /// `1 source = live_rate target`, when the mapping for the source is resident.
    pub fn live_rate(&self) -> Option<f64> {
        let inner = self.lock();
        inner
            .current_rates()
            .and_then(|rates| rates.rate(&inner.state.target_currency))
    }

    /// Snapshot of everything the widget renders.
    pub fn view(&self) -> WidgetView {
        let inner = self.lock();
        let live_rate = inner
            .current_rates()
            .and_then(|rates| rates.rate(&inner.state.target_currency));
        WidgetView {
            state: inner.state.clone(),
            live_rate,
            rates_base: inner.rates.as_ref().map(|rates| rates.base().clone()),
            rates_date: inner.rates.as_ref().and_then(RateMapping::date),
            rates_loading: inner.rates_loading,
            currencies: inner
                .rates
                .as_ref()
                .map(|rates| rates.currencies().cloned().collect())
                .unwrap_or_default(),
            history: inner.history.entries().into_iter().map(Into::into).collect(),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Input Operations
    // ─────────────────────────────────────────────────────────────────────────────

    /// Replaces the amount. Does not convert.
    pub fn set_amount(&self, amount: f64) -> Result<(), DomainError> {
        let amount = validate_amount(amount)?;
        self.lock().state.amount = amount;
        Ok(())
    }

    /// Selects the source currency, fetching its rates if needed, then converts.
    ///
    /// Returns `Ok(None)` when the fetch failed or was superseded.
    #[tracing::instrument(skip_all, fields(currency = %currency))]
    pub async fn set_source_currency(
        &self,
        currency: CurrencyCode,
    ) -> Result<Option<HistoryEntry>, ConvertError> {
        self.lock().state.source_currency = currency;
        self.sync().await
    }

    /// Selects the target currency, then converts.
    #[tracing::instrument(skip_all, fields(currency = %currency))]
    pub async fn set_target_currency(
        &self,
        currency: CurrencyCode,
    ) -> Result<Option<HistoryEntry>, ConvertError> {
        self.lock().state.target_currency = currency;
        self.sync().await
    }

    /// Exchanges source with target and amount with converted amount in one
    /// transition. Never fetches; follow with [`sync`](Self::sync) to
    /// recompute for the new base.
    pub fn swap(&self) {
        let mut inner = self.lock();
        inner.state.swap();
        tracing::debug!(
            source = %inner.state.source_currency,
            target = %inner.state.target_currency,
            "swapped currencies"
        );
    }

    /// Initial load: fetch rates for the configured source and convert.
    pub async fn start(&self) -> Result<Option<HistoryEntry>, ConvertError> {
        tracing::info!("loading initial rates");
        self.sync().await
    }

    /// Makes sure the mapping for the current source is resident, then converts.
    ///
    /// Fetches only when the resident mapping has a different base.
    pub async fn sync(&self) -> Result<Option<HistoryEntry>, ConvertError> {
        let needs_fetch = self.lock().current_rates().is_none();
        if needs_fetch && self.refresh_rates().await != RefreshOutcome::Applied {
            return Ok(None);
        }

        match self.convert().await {
            Ok(entry) => Ok(Some(entry)),
            // The source moved on before the conversion completed; its own sync converts.
            Err(ConvertError::RatesNotLoaded(_)) => Ok(None),
            Err(err) => Err(err),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Rate Fetch
    // ─────────────────────────────────────────────────────────────────────────────

    /// Fetches rates for the current source and applies them if still relevant.
    ///
    /// Provider failures are logged and swallowed; the previous mapping stays.
    pub async fn refresh_rates(&self) -> RefreshOutcome {
        let (generation, base) = {
            let mut inner = self.lock();
            inner.fetch_generation += 1;
            inner.rates_loading = true;
            (inner.fetch_generation, inner.state.source_currency.clone())
        };

        let guard = FetchGuard {
            inner: &self.inner,
            generation,
            armed: true,
        };
        let result = self.provider.fetch_rates(&base).await;
        guard.disarm();

        let mut inner = self.lock();
        if generation != inner.fetch_generation {
            tracing::debug!(%base, generation, "discarding rates from superseded fetch");
            return RefreshOutcome::Superseded;
        }
        inner.rates_loading = false;
        if base != inner.state.source_currency {
            tracing::debug!(%base, "discarding rates for previous source");
            return RefreshOutcome::Superseded;
        }

        match result {
            Ok(rates) => {
                tracing::info!(%base, currencies = rates.len(), "rates loaded");
                inner.rates = Some(rates);
                RefreshOutcome::Applied
            }
            Err(err) => {
                tracing::warn!(
                    %base,
                    error = %err,
                    "failed to fetch rates, keeping previous mapping"
                );
                RefreshOutcome::Failed(err)
            }
        }
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Conversion
    // ─────────────────────────────────────────────────────────────────────────────

    /// Converts the amount and currencies as they are at call time, after the
    /// conversion delay, and records the result.
    ///
    /// Waits for any conversion already in flight. Fails with
    /// `RatesNotLoaded` when no mapping for the source is resident, with
    /// `RateUnavailable` when the mapping has no rate for the target and with
    /// `Overflow` when the result is not a finite number; none of them touch
    /// history.
    pub async fn convert(&self) -> Result<HistoryEntry, ConvertError> {
        let request = self.lock().conversion_request();
        let _slot = self.conversion_slot.lock().await;

        self.lock().state.is_loading = true;
        let _loading = LoadingGuard { inner: &self.inner };

        if !self.conversion_delay.is_zero() {
            tokio::time::sleep(self.conversion_delay).await;
        }

        let result = self.lock().complete_conversion(request);
        match &result {
            Ok(entry) => tracing::debug!(%entry, "conversion recorded"),
            Err(err) => tracing::info!(error = %err, "conversion skipped"),
        }
        result
    }
}
