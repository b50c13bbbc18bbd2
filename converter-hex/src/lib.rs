//! # Converter Hex
//!
//! Conversion controller and HTTP adapter for the currency converter.
//!
//! ## Architecture
//!
//! - `controller/` - State-owning controller (drives fetch → convert)
//! - `inbound/` - HTTP adapter (Axum server exposing the widget surface)
//!
//! The controller is generic over `P: RateProvider`, allowing
//! different rate sources to be injected.

pub mod controller;
pub mod inbound;


pub use controller::{
    ControllerSettings, ConversionController, DEFAULT_CONVERSION_DELAY, RefreshOutcome,
};
