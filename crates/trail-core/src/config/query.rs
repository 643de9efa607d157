//! Query execution configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Settings that shape how the count and fetch phases run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryConfig {
    /// Run count and fetch inside one read transaction so `total` and the
    /// returned entries come from the same snapshot.
    #[serde(default = "default_snapshot_reads")]
    pub snapshot_reads: bool,
    /// Deadline for each query phase in seconds (0 = no deadline).
    #[serde(default)]
    pub timeout_seconds: u64,
}

impl QueryConfig {
    /// The per-phase deadline, if one is configured.
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_seconds > 0).then(|| Duration::from_secs(self.timeout_seconds))
    }
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            snapshot_reads: default_snapshot_reads(),
            timeout_seconds: 0,
        }
    }
}

fn default_snapshot_reads() -> bool {
    true
}
