//! Predicate and window construction for audit log queries.
//!
//! Column names come from the closed [`Column`] enum and every filter value
//! is attached with `push_bind`, so caller input only ever reaches SQLite
//! as a bound parameter.

use sqlx::{QueryBuilder, Sqlite};

use trail_core::types::{AuditFilter, PageWindow};

/// Table holding audit log entries.
pub const TABLE: &str = "audit_logs";

/// Columns selected for every entry, in decode order.
const COLUMNS: &str = "id, action, entity_type, entity_id, user_id, source, details, created_at";

/// A filterable column of the audit log table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    /// `action`
    Action,
    /// `entity_type`
    EntityType,
    /// `entity_id`
    EntityId,
}

impl Column {
    /// The SQL column name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Action => "action",
            Self::EntityType => "entity_type",
            Self::EntityId => "entity_id",
        }
    }
}

/// An equality condition on one column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Predicate {
    /// The column compared.
    pub column: Column,
    /// The value bound to the placeholder.
    pub value: String,
}

/// The AND-ed predicates derived from a filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PredicateSet {
    predicates: Vec<Predicate>,
}

impl PredicateSet {
    /// One predicate per non-empty filter field, always in the order
    /// action, entity type, entity ID.
    pub fn from_filter(filter: &AuditFilter) -> Self {
        let fields = [
            (Column::Action, filter.action()),
            (Column::EntityType, filter.entity_type()),
            (Column::EntityId, filter.entity_id()),
        ];

        let predicates = fields
            .into_iter()
            .filter_map(|(column, value)| {
                value.map(|v| Predicate {
                    column,
                    value: v.to_string(),
                })
            })
            .collect();

        Self { predicates }
    }

    /// Whether every row matches.
    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    /// Iterate the predicates in bind order.
    pub fn iter(&self) -> impl Iterator<Item = &Predicate> {
        self.predicates.iter()
    }

    /// Append ` WHERE a = ? AND b = ?` to `builder`, binding each value.
    /// Appends nothing when the set is empty.
    fn push_where(&self, builder: &mut QueryBuilder<'static, Sqlite>) {
        for (idx, predicate) in self.predicates.iter().enumerate() {
            builder.push(if idx == 0 { " WHERE " } else { " AND " });
            builder.push(predicate.column.as_str());
            builder.push(" = ");
            builder.push_bind(predicate.value.clone());
        }
    }
}

/// A fully resolved audit log query: predicates plus clamped window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditQuery {
    predicates: PredicateSet,
    window: PageWindow,
}

impl AuditQuery {
    /// Resolve a filter into predicates and an effective window.
    pub fn new(filter: &AuditFilter) -> Self {
        Self {
            predicates: PredicateSet::from_filter(filter),
            window: PageWindow::clamp(filter.limit, filter.offset),
        }
    }

    /// The predicates shared by the count and fetch phases.
    pub fn predicates(&self) -> &PredicateSet {
        &self.predicates
    }

    /// The clamped window applied to the fetch phase.
    pub fn window(&self) -> PageWindow {
        self.window
    }

    /// `SELECT COUNT(*)` over the predicates, without a window.
    pub fn count_builder(&self) -> QueryBuilder<'static, Sqlite> {
        let mut builder = QueryBuilder::new(format!("SELECT COUNT(*) FROM {TABLE}"));
        self.predicates.push_where(&mut builder);
        builder
    }

    /// The windowed select, newest first.
    ///
    /// Timestamps are stored in several text encodings, so ordering goes
    /// through `julianday` rather than comparing the raw text. Values it
    /// cannot read become NULL and sort last. `id` breaks ties between
    /// entries sharing an instant so consecutive pages do not overlap.
    pub fn select_builder(&self) -> QueryBuilder<'static, Sqlite> {
        let mut builder = QueryBuilder::new(format!("SELECT {COLUMNS} FROM {TABLE}"));
        self.predicates.push_where(&mut builder);
        builder.push(" ORDER BY julianday(created_at) DESC, id DESC LIMIT ");
        builder.push_bind(i64::from(self.window.limit()));
        builder.push(" OFFSET ");
        builder.push_bind(self.window.offset() as i64);
        builder
    }
}

/// Select a single entry by identifier.
pub fn find_by_id_builder(id: &str) -> QueryBuilder<'static, Sqlite> {
    let mut builder = QueryBuilder::new(format!("SELECT {COLUMNS} FROM {TABLE} WHERE id = "));
    builder.push_bind(id.to_string());
    builder
}
