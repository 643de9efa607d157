//! Pagination types for audit log queries.

use serde::{Deserialize, Serialize};

/// Page size applied when the caller asks for zero or a negative count.
pub const DEFAULT_PAGE_SIZE: u32 = 50;
/// Largest page size ever applied.
pub const MAX_PAGE_SIZE: u32 = 200;

/// The effective `LIMIT`/`OFFSET` pair applied to a query.
///
/// Built only through [`PageWindow::clamp`], so a window always holds a
/// limit in `1..=MAX_PAGE_SIZE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    limit: u32,
    offset: u64,
}

impl PageWindow {
    /// Force a raw request into the valid range.
    ///
    /// `limit <= 0` becomes [`DEFAULT_PAGE_SIZE`], `limit > MAX_PAGE_SIZE`
    /// becomes [`MAX_PAGE_SIZE`], and a negative offset becomes 0.
    pub fn clamp(limit: i64, offset: i64) -> Self {
        let limit = if limit <= 0 {
            DEFAULT_PAGE_SIZE
        } else {
            limit.min(MAX_PAGE_SIZE as i64) as u32
        };
        Self {
            limit,
            offset: offset.max(0) as u64,
        }
    }

    /// Return the SQL `LIMIT` value.
    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Return the SQL `OFFSET` value.
    pub fn offset(&self) -> u64 {
        self.offset
    }
}

impl Default for PageWindow {
    fn default() -> Self {
        Self::clamp(0, 0)
    }
}

/// One bounded slice of a filtered result set.
///
/// `total` counts every entry matching the filter, independent of the
/// window. `limit` and `offset` are the clamped values that were actually
/// applied, so callers can tell when their request was adjusted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    /// The entries on this page, newest first. Never absent.
    pub entries: Vec<T>,
    /// Number of entries matching the filter across the whole store.
    pub total: u64,
    /// Effective page size.
    pub limit: u32,
    /// Effective skip count.
    pub offset: u64,
}

impl<T> Page<T> {
    /// Create a page from fetched entries and the window that produced them.
    pub fn new(entries: Vec<T>, total: u64, window: PageWindow) -> Self {
        Self {
            entries,
            total,
            limit: window.limit(),
            offset: window.offset(),
        }
    }

    /// Create an empty page.
    pub fn empty(window: PageWindow) -> Self {
        Self::new(Vec::new(), 0, window)
    }

    /// Whether more matching entries exist past this page.
    pub fn has_more(&self) -> bool {
        self.offset + (self.entries.len() as u64) < self.total
    }

    /// The offset to request for the following page, if there is one.
    pub fn next_offset(&self) -> Option<u64> {
        if self.entries.is_empty() || !self.has_more() {
            return None;
        }
        Some(self.offset + self.entries.len() as u64)
    }
}
