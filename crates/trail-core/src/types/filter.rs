//! Caller-supplied filter for audit log queries.

use serde::{Deserialize, Serialize};

/// Which audit log entries to return and which page of them.
///
/// Every field is optional. Text fields are exact-match only; an empty
/// string is treated the same as an unset field. `limit` and `offset` are
/// the raw request and are clamped by [`PageWindow`](super::PageWindow)
/// before execution, so out-of-range values are never rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditFilter {
    /// Filter by action (create, update, delete, command, login, ...).
    #[serde(default)]
    pub action: Option<String>,
    /// Filter by entity type (device, scene, site, ...).
    #[serde(default)]
    pub entity_type: Option<String>,
    /// Filter by a specific entity ID.
    #[serde(default)]
    pub entity_id: Option<String>,
    /// Requested page size.
    #[serde(default)]
    pub limit: i64,
    /// Requested number of entries to skip.
    #[serde(default)]
    pub offset: i64,
}

impl AuditFilter {
    /// Create an empty filter that matches every entry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict to one action.
    pub fn with_action(mut self, action: impl Into<String>) -> Self {
        self.action = Some(action.into());
        self
    }

    /// Restrict to one entity type.
    pub fn with_entity_type(mut self, entity_type: impl Into<String>) -> Self {
        self.entity_type = Some(entity_type.into());
        self
    }

    /// Restrict to one entity.
    pub fn with_entity_id(mut self, entity_id: impl Into<String>) -> Self {
        self.entity_id = Some(entity_id.into());
        self
    }

    /// Set the requested page size.
    pub fn with_limit(mut self, limit: i64) -> Self {
        self.limit = limit;
        self
    }

    /// Set the requested skip count.
    pub fn with_offset(mut self, offset: i64) -> Self {
        self.offset = offset;
        self
    }

    /// Build a filter from string pairs as received by a transport
    /// (query string, form fields).
    ///
    /// Recognised keys are `action`, `entity_type`, `entity_id`, `limit`
    /// and `offset`. Unknown keys, empty values and unparseable numbers are
    /// ignored rather than rejected.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut filter = Self::default();
        for (key, value) in pairs {
            let value = value.as_ref().trim();
            if value.is_empty() {
                continue;
            }
            match key.as_ref() {
                "action" => filter.action = Some(value.to_string()),
                "entity_type" => filter.entity_type = Some(value.to_string()),
                "entity_id" => filter.entity_id = Some(value.to_string()),
                "limit" => {
                    if let Ok(n) = value.parse() {
                        filter.limit = n;
                    }
                }
                "offset" => {
                    if let Ok(n) = value.parse() {
                        filter.offset = n;
                    }
                }
                _ => {}
            }
        }
        filter
    }

    /// The action to match, if set and non-empty.
    pub fn action(&self) -> Option<&str> {
        non_empty(self.action.as_deref())
    }

    /// The entity type to match, if set and non-empty.
    pub fn entity_type(&self) -> Option<&str> {
        non_empty(self.entity_type.as_deref())
    }

    /// The entity ID to match, if set and non-empty.
    pub fn entity_id(&self) -> Option<&str> {
        non_empty(self.entity_id.as_deref())
    }

    /// Whether no field restricts the result set.
    pub fn is_unrestricted(&self) -> bool {
        self.action().is_none() && self.entity_type().is_none() && self.entity_id().is_none()
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
