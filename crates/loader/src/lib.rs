//! # BankStax Loader
//!
//! This crate turns the line-items spreadsheet export into an in-memory `FinancialTable`.
//! It is the only component that performs I/O.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Adapter:** Knows the file layout (23 positional columns, a header row,
//!   and possibly a repeated header in the body) and hides it from the rest of the system.
//! - **No Cleaning:** Apart from dropping repeated header rows, values are kept as found.
//!   Unparseable numbers become missing values rather than errors.
//! - **Explicit Caching:** `TableCache` replaces an implicit process-wide memo. It reloads
//!   on path change and exposes `invalidate`/`reload`.
//!
//! ## Public API
//!
//! - `load` / `load_with` / `from_reader`: Parse a file or reader into a `FinancialTable`.
//! - `list_banks`: The sorted, de-duplicated bank names.
//! - `TableCache`: The load-once holder for the table.
//! - `LoadError`: The single error type for load-time failures.

pub mod cache;
pub mod error;
pub mod reader;

pub use cache::TableCache;
pub use error::LoadError;
pub use reader::{COLUMN_COUNT, COMPANY_COLUMN, LoaderOptions, from_reader, list_banks, load, load_with};
