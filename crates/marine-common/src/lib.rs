//! Shared utilities for the marine economy explorer crates.
//!
//! This crate provides Polars `AnyValue` helpers used across the workspace:
//! rendering cells as text and parsing numbers leniently.

pub mod polars;

// Re-export commonly used functions at crate root for convenience
pub use polars::{
    any_to_f64, any_to_integral, any_to_string, any_to_text, format_numeric, parse_f64,
    parse_integral,
};
