//! # Storefront Analytics Engine
//!
//! This crate turns a table of order line items into the summary views the
//! dashboard displays.
//!
//! ## Architectural Principles
//!
//! - **Pure logic:** It depends only on `core-types` and has no knowledge of
//!   files, configuration or HTTP.
//! - **Stateless Calculation:** The `Aggregator` borrows the order table, a
//!   date filter yields a `Subset`, and every view is recomputed from that
//!   subset on demand. Nothing is cached between calls.
//! - **Explicit tie-breaks:** Every "most common" value and every ordering of
//!   equal counts is defined by the code, never by hash iteration order.
//!
//! ## Public API
//!
//! - `Aggregator`: binds to the table, exposes the default range and the date filter.
//! - `Subset`: the filtered rows and the five summary views.
//! - `DashboardReport` and the per-view structs in `report`.
//! - `AnalyticsError`: the specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod engine;
pub mod error;
pub mod report;

// Re-export the key components to create a clean, public-facing API.
pub use engine::{filter_by_date_range, Aggregator, Subset, DEFAULT_CHART_SIZE, DEFAULT_TOP_N};
pub use error::AnalyticsError;
pub use report::{
    CategoryRanking, CategorySales, CityCustomerCount, CitySummary, DailyRevenue,
    DashboardReport, PaymentMethodCount, PaymentSummary, ReviewSummary, ScoreCount,
};
