//! Audit log entry entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Event-specific context attached to an entry (diffs, command parameters).
pub type AuditDetails = serde_json::Map<String, serde_json::Value>;

/// An immutable audit log entry recording one historical fact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditLogEntry {
    /// Unique entry identifier, assigned by the producer.
    pub id: String,
    /// The action that was performed (e.g., `"create"`, `"command"`).
    pub action: String,
    /// The type of the affected entity (e.g., `"device"`, `"scene"`).
    pub entity_type: String,
    /// The affected entity, absent for system-level events.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity_id: Option<String>,
    /// The acting user, absent for system-triggered events.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    /// The subsystem that produced the entry (e.g., `"api"`, `"mqtt"`).
    #[serde(default)]
    pub source: String,
    /// Event context. Absent when none was stored or the stored payload
    /// was not a valid JSON object.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<AuditDetails>,
    /// When the event occurred. The Unix epoch when the stored value could
    /// not be parsed; see [`created_at_unparsed`](Self::created_at_unparsed).
    pub created_at: DateTime<Utc>,
    /// Set when the stored timestamp matched no known format.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub created_at_unparsed: bool,
}

impl AuditLogEntry {
    /// The timestamp, or `None` when the stored value was unparseable.
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        (!self.created_at_unparsed).then_some(self.created_at)
    }

    /// Look up one key in the details payload.
    pub fn detail(&self, key: &str) -> Option<&serde_json::Value> {
        self.details.as_ref().and_then(|d| d.get(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry() -> AuditLogEntry {
        AuditLogEntry {
            id: "aud-1a2b3c4d".to_string(),
            action: "command".to_string(),
            entity_type: "device".to_string(),
            entity_id: Some("light-kitchen".to_string()),
            user_id: None,
            source: "api".to_string(),
            details: None,
            created_at: DateTime::<Utc>::UNIX_EPOCH,
            created_at_unparsed: true,
        }
    }

    #[test]
    fn test_unparsed_timestamp_is_hidden() {
        let entry = entry();
        assert_eq!(entry.timestamp(), None);
    }

    #[test]
    fn test_serialization_omits_absent_fields() {
        let mut entry = entry();
        entry.created_at_unparsed = false;
        let json = serde_json::to_value(&entry).expect("serialize");
        assert!(json.get("user_id").is_none());
        assert!(json.get("details").is_none());
        assert!(json.get("created_at_unparsed").is_none());
        assert_eq!(json["entity_id"], "light-kitchen");
    }

    #[test]
    fn test_detail_lookup() {
        let mut entry = entry();
        let mut details = AuditDetails::new();
        details.insert("level".to_string(), serde_json::json!(80));
        entry.details = Some(details);
        assert_eq!(entry.detail("level"), Some(&serde_json::json!(80)));
        assert_eq!(entry.detail("missing"), None);
    }
}
