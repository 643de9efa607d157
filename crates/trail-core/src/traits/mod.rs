//! Core traits defined in `trail-core` and implemented by other crates.

pub mod reader;

pub use reader::AuditReader;
