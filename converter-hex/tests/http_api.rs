//! Integration tests for the HTTP surface.
//!
//! These drive the router end to end with the static rate table, so every
//! request goes through the real controller.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode},
};
use converter_hex::{ControllerSettings, ConversionController, inbound::HttpServer};
use converter_types::CurrencyCode;
use exchange_rates::StaticRateProvider;
use http_body_util::BodyExt;
use tower::ServiceExt;

fn code(s: &str) -> CurrencyCode {
    CurrencyCode::new(s).unwrap()
}

/// Helper to create a server with a started controller (usd → inr, amount 10).
async fn create_test_server() -> HttpServer<StaticRateProvider> {
    let settings = ControllerSettings::new(code("usd"), code("inr"))
        .with_amount(10.0)
        .with_conversion_delay(Duration::ZERO);
    let controller =
        Arc::new(ConversionController::new(StaticRateProvider::new(), settings).unwrap());
    controller.start().await.unwrap();
    HttpServer::new(controller)
}

fn json_request(method: Method, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn empty_request(method: Method, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// Sends a request and returns the status and JSON body.
async fn send(app: Router, req: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.oneshot(req).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null);
    (status, json)
}

#[tokio::test]
async fn test_health() {
    let server = create_test_server().await;
    let (status, body) = send(server.router(), empty_request(Method::GET, "/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_state_after_start() {
    let server = create_test_server().await;
    let (status, body) = send(server.router(), empty_request(Method::GET, "/api/state")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["state"]["source_currency"], "usd");
    assert_eq!(body["state"]["target_currency"], "inr");
    assert_eq!(body["state"]["is_loading"], false);
    assert_eq!(body["live_rate"], 83.12);
    assert_eq!(body["rates_base"], "usd");
    assert_eq!(body["history"].as_array().unwrap().len(), 1);
    assert_eq!(body["history"][0]["label"], "10 USD → 831.20 INR");
}

#[tokio::test]
async fn test_set_amount_then_convert() {
    let server = create_test_server().await;
    let app = server.router();

    let (status, body) = send(
        app.clone(),
        json_request(Method::PUT, "/api/amount", serde_json::json!({ "amount": 2 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["state"]["amount"], 2.0);

    let (status, body) = send(app, empty_request(Method::POST, "/api/convert")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["entry"]["amount"], 2.0);
    assert_eq!(body["entry"]["result"], 166.24);
    assert_eq!(body["state"]["converted_amount"], 166.24);
}

#[tokio::test]
async fn test_negative_amount_is_bad_request() {
    let server = create_test_server().await;
    let (status, body) = send(
        server.router(),
        json_request(Method::PUT, "/api/amount", serde_json::json!({ "amount": -1 })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 400);
    assert_eq!(server.controller().state().amount, 10.0);
}

#[tokio::test]
async fn test_select_target_converts() {
    let server = create_test_server().await;
    let (status, body) = send(
        server.router(),
        json_request(Method::PUT, "/api/target", serde_json::json!({ "currency": "EUR" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["state"]["target_currency"], "eur");
    let converted = body["state"]["converted_amount"].as_f64().unwrap();
    assert!((converted - 9.2).abs() < 1e-9);
    assert_eq!(body["history"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_select_source_loads_new_base() {
    let server = create_test_server().await;
    let (status, body) = send(
        server.router(),
        json_request(Method::PUT, "/api/source", serde_json::json!({ "currency": "gbp" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["rates_base"], "gbp");
    assert_eq!(body["rates_loading"], false);
    let live = body["live_rate"].as_f64().unwrap();
    assert!((live - 83.12 / 0.79).abs() < 1e-9);
}

#[tokio::test]
async fn test_unknown_target_sets_rate_unavailable() {
    let server = create_test_server().await;
    let app = server.router();

    let (status, body) = send(
        app.clone(),
        json_request(Method::PUT, "/api/target", serde_json::json!({ "currency": "xyz" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["state"]["rate_unavailable"], true);

    let (status, body) = send(app, empty_request(Method::POST, "/api/convert")).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], 422);
}

#[tokio::test]
async fn test_invalid_currency_code_rejected() {
    let server = create_test_server().await;
    let (status, _) = send(
        server.router(),
        json_request(Method::PUT, "/api/source", serde_json::json!({ "currency": "u$d" })),
    )
    .await;

    assert!(status.is_client_error());
    assert_eq!(server.controller().state().source_currency, code("usd"));
}

#[tokio::test]
async fn test_swap_reverses_conversion() {
    let server = create_test_server().await;
    let (status, body) = send(server.router(), empty_request(Method::POST, "/api/swap")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["state"]["source_currency"], "inr");
    assert_eq!(body["state"]["target_currency"], "usd");
    assert_eq!(body["rates_base"], "inr");
    let amount = body["state"]["amount"].as_f64().unwrap();
    let converted = body["state"]["converted_amount"].as_f64().unwrap();
    assert!((amount - 831.2).abs() < 1e-9);
    assert!((converted - 10.0).abs() < 1e-9);
}

#[tokio::test]
async fn test_currencies_and_history() {
    let server = create_test_server().await;
    let app = server.router();

    let (status, body) = send(app.clone(), empty_request(Method::GET, "/api/currencies")).await;
    assert_eq!(status, StatusCode::OK);
    let currencies = body.as_array().unwrap();
    assert!(currencies.iter().any(|c| c == "inr"));
    assert_eq!(currencies[0], "aud");

    for _ in 0..6 {
        send(app.clone(), empty_request(Method::POST, "/api/convert")).await;
    }
    let (status, body) = send(app, empty_request(Method::GET, "/api/history")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 5);
    assert!(body[0]["time"].as_str().is_some());
}

#[tokio::test]
async fn test_refresh_rates() {
    let server = create_test_server().await;
    let (status, body) = send(
        server.router(),
        empty_request(Method::POST, "/api/rates/refresh"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["rates_base"], "usd");
    assert_eq!(body["rates_loading"], false);
}
