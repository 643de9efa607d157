//! Shared helpers for audit log integration tests.

#![allow(dead_code)]

use chrono::{DateTime, Duration, TimeZone, Utc};
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};

/// Mirrors the producer-owned table, without NOT NULL constraints so tests
/// can store rows a well-behaved producer never would.
const SCHEMA: &str = "CREATE TABLE audit_logs (
    id          TEXT PRIMARY KEY,
    action      TEXT,
    entity_type TEXT,
    entity_id   TEXT,
    user_id     TEXT,
    source      TEXT,
    details     TEXT,
    created_at  TEXT
)";

/// A row to insert verbatim.
#[derive(Debug, Clone)]
pub struct SeedRow {
    pub id: Option<String>,
    pub action: Option<String>,
    pub entity_type: Option<String>,
    pub entity_id: Option<String>,
    pub user_id: Option<String>,
    pub source: Option<String>,
    pub details: Option<String>,
    pub created_at: Option<String>,
}

impl SeedRow {
    /// A well-formed device row.
    pub fn new(id: &str, action: &str, created_at: DateTime<Utc>) -> Self {
        Self {
            id: Some(id.to_string()),
            action: Some(action.to_string()),
            entity_type: Some("device".to_string()),
            entity_id: Some("light-kitchen".to_string()),
            user_id: Some("usr-admin".to_string()),
            source: Some("api".to_string()),
            details: None,
            created_at: Some(created_at.to_rfc3339()),
        }
    }

    pub fn entity(mut self, entity_type: &str, entity_id: Option<&str>) -> Self {
        self.entity_type = Some(entity_type.to_string());
        self.entity_id = entity_id.map(String::from);
        self
    }

    pub fn details(mut self, details: Option<&str>) -> Self {
        self.details = details.map(String::from);
        self
    }

    pub fn raw_created_at(mut self, created_at: Option<&str>) -> Self {
        self.created_at = created_at.map(String::from);
        self
    }
}

/// A single-connection in-memory database with the audit table created.
pub async fn memory_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to open in-memory database");

    sqlx::query(SCHEMA)
        .execute(&pool)
        .await
        .expect("Failed to create audit_logs");

    pool
}

/// Insert one row exactly as given.
pub async fn insert(pool: &SqlitePool, row: SeedRow) {
    sqlx::query(
        "INSERT INTO audit_logs (id, action, entity_type, entity_id, user_id, source, details, created_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(row.id)
    .bind(row.action)
    .bind(row.entity_type)
    .bind(row.entity_id)
    .bind(row.user_id)
    .bind(row.source)
    .bind(row.details)
    .bind(row.created_at)
    .execute(pool)
    .await
    .expect("Failed to insert audit row");
}

/// A fixed reference instant, offset by `seconds`.
pub fn at(seconds: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap() + Duration::seconds(seconds)
}

/// Insert `count` well-formed rows one second apart, oldest first.
pub async fn seed_sequence(pool: &SqlitePool, action: &str, count: usize) {
    for i in 0..count {
        insert(pool, SeedRow::new(&format!("aud-{i:04}"), action, at(i as i64))).await;
    }
}
