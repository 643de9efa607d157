//! Action tags written by the known producers.
//!
//! `AuditLogEntry::action` is free-form so that new producers never break
//! the reader; these constants only name the tags in use today.

/// An entity was created.
pub const CREATE: &str = "create";
/// An entity was updated.
pub const UPDATE: &str = "update";
/// An entity was deleted.
pub const DELETE: &str = "delete";
/// A command was dispatched to a device.
pub const COMMAND: &str = "command";
/// A user logged in.
pub const LOGIN: &str = "login";
