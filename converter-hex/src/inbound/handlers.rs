//! HTTP request handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use converter_types::{
    AppError, ConversionResponse, ConvertError, DomainError, HistoryItem, RateProvider,
    SelectCurrencyRequest, SetAmountRequest,
};

use crate::ConversionController;

/// Application state shared across handlers.
pub struct AppState<P: RateProvider> {
    pub controller: Arc<ConversionController<P>>,
}

/// Wrapper to implement IntoResponse for AppError (orphan rule workaround).
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        ApiError(err)
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        ApiError(err.into())
    }
}

impl From<ConvertError> for ApiError {
    fn from(err: ConvertError) -> Self {
        ApiError(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Unprocessable(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg.clone()),
            AppError::Unavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg.clone()),
        };

        let body = serde_json::json!({
            "error": message,
            "code": status.as_u16()
        });

        (status, Json(body)).into_response()
    }
}

/// Health check endpoint.
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "healthy" }))
}

/// Whole widget view.
pub async fn get_state<P: RateProvider>(
    State(state): State<Arc<AppState<P>>>,
) -> impl IntoResponse {
    Json(state.controller.view())
}

/// Amount input. Does not convert; the submit button does.
#[tracing::instrument(skip(state), fields(amount = req.amount))]
pub async fn set_amount<P: RateProvider>(
    State(state): State<Arc<AppState<P>>>,
    Json(req): Json<SetAmountRequest>,
) -> Result<impl IntoResponse, ApiError> {
    state.controller.set_amount(req.amount)?;
    Ok(Json(state.controller.view()))
}

/// "From" selector.
///
/// A failed conversion still answers with the view; the state flags tell the
/// page what went wrong.
#[tracing::instrument(skip(state), fields(currency = %req.currency))]
pub async fn set_source<P: RateProvider>(
    State(state): State<Arc<AppState<P>>>,
    Json(req): Json<SelectCurrencyRequest>,
) -> impl IntoResponse {
    if let Err(err) = state.controller.set_source_currency(req.currency).await {
        tracing::info!(error = %err, "source changed without conversion");
    }
    Json(state.controller.view())
}

/// "To" selector.
#[tracing::instrument(skip(state), fields(currency = %req.currency))]
pub async fn set_target<P: RateProvider>(
    State(state): State<Arc<AppState<P>>>,
    Json(req): Json<SelectCurrencyRequest>,
) -> impl IntoResponse {
    if let Err(err) = state.controller.set_target_currency(req.currency).await {
        tracing::info!(error = %err, "target changed without conversion");
    }
    Json(state.controller.view())
}

/// Swap button: exchange the pair, then recompute for the new base.
#[tracing::instrument(skip(state))]
pub async fn swap<P: RateProvider>(State(state): State<Arc<AppState<P>>>) -> impl IntoResponse {
    state.controller.swap();
    if let Err(err) = state.controller.sync().await {
        tracing::info!(error = %err, "swapped without conversion");
    }
    Json(state.controller.view())
}

/// Submit button.
#[tracing::instrument(skip(state))]
pub async fn convert<P: RateProvider>(
    State(state): State<Arc<AppState<P>>>,
) -> Result<impl IntoResponse, ApiError> {
    let entry = state.controller.convert().await?;
    Ok(Json(ConversionResponse {
        entry: entry.into(),
        state: state.controller.state(),
    }))
}

/// Re-fetch rates for the current source.
#[tracing::instrument(skip(state))]
pub async fn refresh_rates<P: RateProvider>(
    State(state): State<Arc<AppState<P>>>,
) -> impl IntoResponse {
    let outcome = state.controller.refresh_rates().await;
    tracing::debug!(?outcome, "manual refresh");
    Json(state.controller.view())
}

/// Selector options.
pub async fn list_currencies<P: RateProvider>(
    State(state): State<Arc<AppState<P>>>,
) -> impl IntoResponse {
    Json(state.controller.currencies())
}

/// History panel, newest first.
pub async fn list_history<P: RateProvider>(
    State(state): State<Arc<AppState<P>>>,
) -> impl IntoResponse {
    let items: Vec<HistoryItem> = state
        .controller
        .history()
        .into_iter()
        .map(Into::into)
        .collect();
    Json(items)
}
