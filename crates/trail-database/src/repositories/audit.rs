//! Audit log repository implementation.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use sqlx::sqlite::{SqlitePool, SqliteRow};
use sqlx::{Executor, Sqlite};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use trail_core::config::QueryConfig;
use trail_core::error::{AppError, ErrorKind};
use trail_core::result::AppResult;
use trail_core::traits::AuditReader;
use trail_core::types::{AuditFilter, Page};
use trail_entity::audit::AuditLogEntry;

use crate::decode::decode_entry;
use crate::query::{self, AuditQuery};

/// Read-only repository for audit log entries.
///
/// The repository holds no state besides its pool and settings; clones
/// share the pool and may query concurrently.
///
/// With `snapshot_reads` enabled the count and fetch of a page run inside
/// one read transaction, so `total` and the entries describe the same
/// snapshot. Without it, `total` is best-effort as of the count, and an
/// insert or delete landing between the two phases can make an offset skip
/// or repeat a boundary entry.
#[derive(Debug, Clone)]
pub struct AuditLogRepository {
    pool: SqlitePool,
    snapshot_reads: bool,
    phase_timeout: Option<Duration>,
}

impl AuditLogRepository {
    /// Create a new audit log repository with default query settings.
    pub fn new(pool: SqlitePool) -> Self {
        Self::with_config(pool, &QueryConfig::default())
    }

    /// Create a new audit log repository with explicit query settings.
    pub fn with_config(pool: SqlitePool, config: &QueryConfig) -> Self {
        Self {
            pool,
            snapshot_reads: config.snapshot_reads,
            phase_timeout: config.timeout(),
        }
    }

    /// Return a page of entries matching `filter`, newest first.
    pub async fn query(
        &self,
        filter: &AuditFilter,
        cancel: &CancellationToken,
    ) -> AppResult<Page<AuditLogEntry>> {
        let query = AuditQuery::new(filter);
        let window = query.window();

        let (total, rows) = if self.snapshot_reads {
            let mut tx = self
                .guard(cancel, "begin read transaction", self.pool.begin())
                .await?;
            let total = self
                .guard(cancel, "count audit logs", count_matching(&mut *tx, &query))
                .await?;
            let rows = self
                .guard(cancel, "query audit logs", fetch_window(&mut *tx, &query))
                .await?;
            self.guard(cancel, "end read transaction", tx.commit()).await?;
            (total, rows)
        } else {
            let total = self
                .guard(cancel, "count audit logs", count_matching(&self.pool, &query))
                .await?;
            let rows = self
                .guard(cancel, "query audit logs", fetch_window(&self.pool, &query))
                .await?;
            (total, rows)
        };

        let entries = rows
            .iter()
            .map(decode_entry)
            .collect::<AppResult<Vec<_>>>()?;

        debug!(
            total,
            returned = entries.len(),
            limit = window.limit(),
            offset = window.offset(),
            "Audit log query complete"
        );

        Ok(Page::new(entries, total, window))
    }

    /// Count entries matching `filter`, ignoring its window.
    pub async fn count(&self, filter: &AuditFilter, cancel: &CancellationToken) -> AppResult<u64> {
        let query = AuditQuery::new(filter);
        self.guard(cancel, "count audit logs", count_matching(&self.pool, &query))
            .await
    }

    /// Find an audit entry by ID.
    pub async fn find_by_id(
        &self,
        id: &str,
        cancel: &CancellationToken,
    ) -> AppResult<Option<AuditLogEntry>> {
        let mut builder = query::find_by_id_builder(id);
        let row = self
            .guard(
                cancel,
                "find audit log entry",
                builder.build().fetch_optional(&self.pool),
            )
            .await?;
        row.as_ref().map(decode_entry).transpose()
    }

    /// Run one storage round-trip, racing it against the caller's
    /// cancellation token and the configured deadline.
    async fn guard<T, F>(
        &self,
        cancel: &CancellationToken,
        phase: &'static str,
        operation: F,
    ) -> AppResult<T>
    where
        F: Future<Output = Result<T, sqlx::Error>>,
    {
        let bounded = async {
            match self.phase_timeout {
                Some(limit) => match tokio::time::timeout(limit, operation).await {
                    Ok(outcome) => outcome.map_err(|e| storage_error(phase, e)),
                    Err(_) => Err(AppError::timeout(format!(
                        "Failed to {phase}: no response within {}s",
                        limit.as_secs()
                    ))),
                },
                None => operation.await.map_err(|e| storage_error(phase, e)),
            }
        };

        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                debug!(phase, "Audit log query cancelled");
                Err(AppError::cancelled(format!("Cancelled while trying to {phase}")))
            }
            result = bounded => result,
        }
    }
}

#[async_trait]
impl AuditReader<AuditLogEntry> for AuditLogRepository {
    async fn query(
        &self,
        filter: &AuditFilter,
        cancel: &CancellationToken,
    ) -> AppResult<Page<AuditLogEntry>> {
        AuditLogRepository::query(self, filter, cancel).await
    }

    async fn count(&self, filter: &AuditFilter, cancel: &CancellationToken) -> AppResult<u64> {
        AuditLogRepository::count(self, filter, cancel).await
    }

    async fn find_by_id(
        &self,
        id: &str,
        cancel: &CancellationToken,
    ) -> AppResult<Option<AuditLogEntry>> {
        AuditLogRepository::find_by_id(self, id, cancel).await
    }
}

async fn count_matching<'c, E>(executor: E, query: &AuditQuery) -> Result<u64, sqlx::Error>
where
    E: Executor<'c, Database = Sqlite>,
{
    let mut builder = query.count_builder();
    let total: i64 = builder.build_query_scalar().fetch_one(executor).await?;
    Ok(total.max(0) as u64)
}

async fn fetch_window<'c, E>(
    executor: E,
    query: &AuditQuery,
) -> Result<Vec<SqliteRow>, sqlx::Error>
where
    E: Executor<'c, Database = Sqlite>,
{
    let mut builder = query.select_builder();
    builder.build().fetch_all(executor).await
}

/// Column-level failures are decode errors; everything else means the
/// query could not run.
fn storage_error(phase: &str, err: sqlx::Error) -> AppError {
    let kind = match &err {
        sqlx::Error::ColumnDecode { .. }
        | sqlx::Error::ColumnNotFound(_)
        | sqlx::Error::ColumnIndexOutOfBounds { .. }
        | sqlx::Error::Decode(_) => ErrorKind::DecodeFailure,
        _ => ErrorKind::StorageUnavailable,
    };
    AppError::with_source(kind, format!("Failed to {phase}: {err}"), err)
}
