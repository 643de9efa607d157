//! Audit log domain records.

pub mod action;
pub mod model;

pub use model::{AuditDetails, AuditLogEntry};
