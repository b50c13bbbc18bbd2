//! Port traits (interfaces for adapters).
//!
//! These are the contracts that adapters must implement.
//! The controller depends on these traits, not concrete implementations.

mod rates;

pub use rates::{RateError, RateProvider};
