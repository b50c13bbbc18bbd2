//! # Converter Types
//!
//! Domain types and port traits for the currency converter.
//! This crate has ZERO external IO dependencies - only data structures,
//! conversion rules, and trait definitions.
//!
//! ## Architecture
//!
//! This crate is the **innermost core** of the hexagonal architecture:
//! - `domain/` - Pure domain types (CurrencyCode, RateMapping, HistoryEntry)
//! - `ports/` - Trait definitions that rate adapters must implement
//! - `dto/` - Data Transfer Objects for the HTTP surface
//! - `error/` - Domain, conversion and application error types

pub mod domain;
pub mod dto;
pub mod error;
pub mod ports;

// Re-export commonly used types
pub use domain::{
    ConversionHistory, ConversionState, CurrencyCode, HISTORY_CAPACITY, HistoryEntry,
    RateMapping,
};
pub use dto::*;
pub use error::{AppError, ConvertError, DomainError};
pub use ports::{RateError, RateProvider};
