//! # BankStax Ratio Engine
//!
//! This crate derives bank ratios from balance-sheet line items. It is the pure
//! calculation core of the dashboard.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** This is a pure logic crate with no knowledge of files or terminals.
//!   It depends only on `core-types` (Layer 0).
//! - **Stateless Calculation:** `RatioEngine` takes a `BankRecord` and returns a
//!   `RatioResult`. Nothing is cached; every query recomputes.
//! - **Per-Entry Failure:** A missing input or zero denominator makes a single entry
//!   `Err(Unavailable)`. It never aborts the other ratios.
//!
//! ## Public API
//!
//! - `RatioEngine`: Record lookup plus key, stress and generic metric calculations.
//! - `RatioResult` / `RatioValue` / `Unavailable`: The per-ratio outputs and reason codes.
//! - `AnalyticsError`: Returned when a bank name is not in the table.

pub mod engine;
pub mod error;
pub mod report;

pub use engine::RatioEngine;
pub use error::AnalyticsError;
pub use report::{RatioResult, RatioValue, Unavailable};
