//! Read-side contract for audit log storage.

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::result::AppResult;
use crate::types::filter::AuditFilter;
use crate::types::pagination::Page;

/// Read access to a store of audit log entries.
///
/// Implementations are stateless between calls and safe to share across
/// tasks. Each operation observes `cancel` through every storage round-trip
/// and returns a `Cancelled` error as soon as it fires, without retrying.
///
/// `query` runs a count and a fetch against the same predicate. Unless the
/// implementation reads both from one snapshot, `total` is best-effort as
/// of the count, and concurrent writers may cause an offset to skip or
/// repeat a boundary entry.
#[async_trait]
pub trait AuditReader<Entry>: Send + Sync + 'static
where
    Entry: Send + Sync + 'static,
{
    /// Return one page of entries matching `filter`, newest first.
    async fn query(&self, filter: &AuditFilter, cancel: &CancellationToken)
    -> AppResult<Page<Entry>>;

    /// Count entries matching `filter`, ignoring its window.
    async fn count(&self, filter: &AuditFilter, cancel: &CancellationToken) -> AppResult<u64>;

    /// Find a single entry by its identifier.
    async fn find_by_id(&self, id: &str, cancel: &CancellationToken)
    -> AppResult<Option<Entry>>;
}
