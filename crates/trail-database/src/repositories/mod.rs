//! Repository implementations.

pub mod audit;

pub use audit::AuditLogRepository;
