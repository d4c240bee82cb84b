//! Intrinsic-value estimation and risk/quality scoring from historical
//! financial time series.
//!
//! The pipeline consumes a read-only [`types::Database`] (metric to
//! chronological series) plus scalar parameters and reference tables, and
//! produces numeric results and named mappings. Every stage is a pure,
//! synchronous function over immutable inputs; values that cannot be
//! computed are explicit `None`s, so aggregates can tell "genuinely zero"
//! from "not derivable".

pub mod beta;
pub mod error;
pub mod evaluation;
pub mod growth;
pub mod reference;
pub mod scoring;
pub mod stats;
pub mod types;
pub mod valuation;

pub use error::StockvalError;
pub use types::*;

/// Standard result type for all stockval operations.
pub type StockvalResult<T> = Result<T, StockvalError>;
