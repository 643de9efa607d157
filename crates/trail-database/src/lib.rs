//! # trail-database
//!
//! SQLite connection management and the audit log query engine: predicate
//! construction, the two-phase count/fetch, and defensive row decoding.
//! This crate only reads; schema and writes belong to the producers.

pub mod connection;
pub mod decode;
pub mod query;
pub mod repositories;

pub use connection::DatabasePool;
pub use repositories::AuditLogRepository;
