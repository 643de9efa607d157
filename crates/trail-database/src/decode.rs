//! Row decoding for audit log entries.
//!
//! Identity columns (`id`, `action`, `entity_type`) must decode or the whole
//! page fails. The `details` payload and `created_at` timestamp degrade to
//! an absent value or the epoch instead, with a warning.

use chrono::{DateTime, NaiveDateTime, Utc};
use sqlx::Row;
use sqlx::sqlite::SqliteRow;
use tracing::warn;

use trail_core::error::{AppError, ErrorKind};
use trail_core::result::AppResult;
use trail_entity::audit::{AuditDetails, AuditLogEntry};

/// Formats tried after RFC 3339, in order.
const FALLBACK_TIMESTAMP_FORMATS: &[&str] = &[
    // Second-precision UTC as written by older producers.
    "%Y-%m-%dT%H:%M:%SZ",
    // SQLite `CURRENT_TIMESTAMP`.
    "%Y-%m-%d %H:%M:%S",
];

/// Decode one stored row into an entry.
pub fn decode_entry(row: &SqliteRow) -> AppResult<AuditLogEntry> {
    let id: String = required(row, "id")?;
    let action: String = required(row, "action")?;
    let entity_type: String = required(row, "entity_type")?;
    let entity_id = nullable(row, "entity_id")?;
    let user_id = nullable(row, "user_id")?;
    let source = nullable(row, "source")?.unwrap_or_default();

    let raw_details = lenient(row, "details");
    let details = parse_details(raw_details.as_deref());
    if details.is_none() && raw_details.as_deref().is_some_and(|raw| !raw.trim().is_empty()) {
        warn!(id = %id, "Ignoring malformed audit log details");
    }

    let raw_created_at = lenient(row, "created_at");
    let (created_at, created_at_unparsed) =
        match raw_created_at.as_deref().and_then(parse_timestamp) {
            Some(ts) => (ts, false),
            None => {
                warn!(
                    id = %id,
                    created_at = raw_created_at.as_deref().unwrap_or("<null>"),
                    "Unrecognised audit log timestamp"
                );
                (DateTime::<Utc>::UNIX_EPOCH, true)
            }
        };

    Ok(AuditLogEntry {
        id,
        action,
        entity_type,
        entity_id,
        user_id,
        source,
        details,
        created_at,
        created_at_unparsed,
    })
}

/// Parse a stored details payload.
///
/// Returns `None` for a missing, blank, or malformed payload, and for any
/// JSON value that is not an object.
pub fn parse_details(raw: Option<&str>) -> Option<AuditDetails> {
    let raw = raw?.trim();
    if raw.is_empty() {
        return None;
    }
    serde_json::from_str(raw).ok()
}

/// Parse a stored timestamp, trying RFC 3339 first and then the fallback
/// formats as UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    FALLBACK_TIMESTAMP_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .map(|naive| naive.and_utc())
}

fn required(row: &SqliteRow, column: &str) -> AppResult<String> {
    row.try_get::<String, _>(column).map_err(|e| {
        AppError::with_source(
            ErrorKind::DecodeFailure,
            format!("Failed to decode audit log column `{column}`"),
            e,
        )
    })
}

fn nullable(row: &SqliteRow, column: &str) -> AppResult<Option<String>> {
    row.try_get::<Option<String>, _>(column).map_err(|e| {
        AppError::with_source(
            ErrorKind::DecodeFailure,
            format!("Failed to decode audit log column `{column}`"),
            e,
        )
    })
}

/// Read an auxiliary text column; any failure reads as absent.
fn lenient(row: &SqliteRow, column: &str) -> Option<String> {
    row.try_get::<Option<String>, _>(column).ok().flatten()
}
