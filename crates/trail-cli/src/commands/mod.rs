//! CLI command definitions and dispatch.

pub mod audit;
pub mod check;

use clap::{Parser, Subcommand};
use tokio_util::sync::CancellationToken;

use crate::output::OutputFormat;
use trail_core::config::AppConfig;
use trail_core::error::AppError;
use trail_database::{AuditLogRepository, DatabasePool};

/// Browse the audit trail of system activity
#[derive(Debug, Parser)]
#[command(name = "audit-trail", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Audit log queries
    #[command(flatten)]
    Audit(audit::AuditCommand),
    /// Verify the audit store is reachable
    Check,
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(
        &self,
        config: &AppConfig,
        cancel: &CancellationToken,
    ) -> Result<(), AppError> {
        let db = DatabasePool::connect(&config.database).await?;

        let result = match &self.command {
            Commands::Audit(command) => {
                let repo = AuditLogRepository::with_config(db.pool().clone(), &config.query);
                audit::execute(command, &repo, self.format, cancel).await
            }
            Commands::Check => check::execute(&db).await,
        };

        db.close().await;
        result
    }
}
