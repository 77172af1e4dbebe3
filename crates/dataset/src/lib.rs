//! # Storefront Dataset Crate
//!
//! This crate is the only place that knows how the transaction dataset is
//! stored on disk. Everything downstream sees an immutable `OrderRepository`.
//!
//! ## Public API
//!
//! - `load_orders` / `load_orders_file`: parse the merged orders CSV, checking
//!   the header for every required column before reading any rows.
//! - `OrderRepository`: the shared, read-only table plus its default date range.
//! - `DatasetError`: the specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod error;
pub mod loader;
pub mod repository;

// Re-export the key components to create a clean, public-facing API.
pub use error::DatasetError;
pub use loader::{load_orders, load_orders_file};
pub use repository::OrderRepository;
