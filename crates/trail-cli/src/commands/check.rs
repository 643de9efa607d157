//! Storage health check command.

use crate::output;
use trail_core::error::AppError;
use trail_database::DatabasePool;

/// Execute the health check
pub async fn execute(db: &DatabasePool) -> Result<(), AppError> {
    if db.health_check().await? {
        output::print_success("Audit store is reachable");
        Ok(())
    } else {
        Err(AppError::storage_unavailable(
            "Audit store answered the health check unexpectedly",
        ))
    }
}
