//! # trail-core
//!
//! Core crate for the audit trail query engine. Contains configuration
//! schemas, the filter and pagination types callers build queries from,
//! the reader trait implemented by storage backends, and the unified
//! error system.
//!
//! This crate has **no** internal dependencies on other workspace crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
