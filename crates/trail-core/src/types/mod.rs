//! Core type definitions used across the workspace.

pub mod filter;
pub mod pagination;

pub use filter::AuditFilter;
pub use pagination::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, Page, PageWindow};
