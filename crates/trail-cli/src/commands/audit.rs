//! Audit log CLI commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;
use tokio_util::sync::CancellationToken;

use crate::output::{self, OutputFormat};
use trail_core::error::AppError;
use trail_core::types::{AuditFilter, MAX_PAGE_SIZE, Page};
use trail_database::AuditLogRepository;
use trail_entity::audit::AuditLogEntry;

/// Exact-match filters shared by the audit commands
#[derive(Debug, Clone, Args)]
pub struct FilterArgs {
    /// Filter by action (create, update, delete, command, login)
    #[arg(short, long)]
    pub action: Option<String>,
    /// Filter by entity type (device, scene, site, ...)
    #[arg(short = 't', long)]
    pub entity_type: Option<String>,
    /// Filter by entity ID
    #[arg(short, long)]
    pub entity_id: Option<String>,
}

impl FilterArgs {
    fn to_filter(&self) -> AuditFilter {
        AuditFilter {
            action: self.action.clone(),
            entity_type: self.entity_type.clone(),
            entity_id: self.entity_id.clone(),
            ..AuditFilter::default()
        }
    }
}

/// Audit subcommands
#[derive(Debug, Subcommand)]
pub enum AuditCommand {
    /// Search the audit log, newest first
    Search {
        #[command(flatten)]
        filter: FilterArgs,
        /// Page size (values outside 1..=200 are clamped)
        #[arg(short, long, default_value = "50", allow_negative_numbers = true)]
        limit: i64,
        /// Entries to skip
        #[arg(short, long, default_value = "0", allow_negative_numbers = true)]
        offset: i64,
    },
    /// Show a single audit entry
    Show {
        /// Entry ID
        id: String,
    },
    /// Count matching audit entries
    Count {
        #[command(flatten)]
        filter: FilterArgs,
    },
    /// Export every matching audit entry to a JSON file
    Export {
        #[command(flatten)]
        filter: FilterArgs,
        /// Output file path
        #[arg(short, long, default_value = "audit_export.json")]
        output: String,
    },
}

/// Audit display row
#[derive(Debug, Serialize, Tabled)]
struct AuditRow {
    /// Time
    time: String,
    /// Action
    action: String,
    /// Entity
    entity: String,
    /// User
    user: String,
    /// Source
    source: String,
    /// ID
    id: String,
}

impl From<&AuditLogEntry> for AuditRow {
    fn from(e: &AuditLogEntry) -> Self {
        Self {
            time: format_time(e),
            action: e.action.clone(),
            entity: match &e.entity_id {
                Some(id) => format!("{}/{}", e.entity_type, id),
                None => e.entity_type.clone(),
            },
            user: e.user_id.clone().unwrap_or_else(|| "-".to_string()),
            source: e.source.clone(),
            id: e.id.clone(),
        }
    }
}

/// Execute audit commands
pub async fn execute(
    command: &AuditCommand,
    repo: &AuditLogRepository,
    format: OutputFormat,
    cancel: &CancellationToken,
) -> Result<(), AppError> {
    match command {
        AuditCommand::Search {
            filter,
            limit,
            offset,
        } => {
            let filter = filter.to_filter().with_limit(*limit).with_offset(*offset);
            let page = repo.query(&filter, cancel).await?;
            print_page(&page, format);
        }
        AuditCommand::Show { id } => match repo.find_by_id(id, cancel).await? {
            Some(entry) => print_entry(&entry, format),
            None => output::print_warning(&format!("No audit entry with ID '{id}'")),
        },
        AuditCommand::Count { filter } => {
            let total = repo.count(&filter.to_filter(), cancel).await?;
            match format {
                OutputFormat::Table => output::print_kv("Matching entries", &total.to_string()),
                OutputFormat::Json => output::print_json(&serde_json::json!({ "total": total })),
            }
        }
        AuditCommand::Export {
            filter,
            output: out_path,
        } => {
            let entries = collect_all(repo, filter.to_filter(), cancel).await?;
            let json = serde_json::to_string_pretty(&entries)?;
            tokio::fs::write(out_path, json).await?;

            output::print_success(&format!(
                "Exported {} audit entries to '{}'",
                entries.len(),
                out_path
            ));
        }
    }

    Ok(())
}

/// Walk every page of a filter. Pages are read independently, so entries
/// written during the export may be skipped or repeated at page borders.
async fn collect_all(
    repo: &AuditLogRepository,
    filter: AuditFilter,
    cancel: &CancellationToken,
) -> Result<Vec<AuditLogEntry>, AppError> {
    let mut filter = filter.with_limit(i64::from(MAX_PAGE_SIZE)).with_offset(0);
    let mut entries = Vec::new();

    loop {
        let page = repo.query(&filter, cancel).await?;
        let next = page.next_offset();
        entries.extend(page.entries);
        match next {
            Some(offset) => filter.offset = offset as i64,
            None => break,
        }
    }

    Ok(entries)
}

fn print_page(page: &Page<AuditLogEntry>, format: OutputFormat) {
    match format {
        OutputFormat::Json => output::print_json(page),
        OutputFormat::Table => {
            let rows: Vec<AuditRow> = page.entries.iter().map(AuditRow::from).collect();
            output::print_table(&rows);

            output::print_kv("Showing", &range_summary(page));
            if let Some(next) = page.next_offset() {
                output::print_kv("Next offset", &next.to_string());
            }
        }
    }
}

/// One-based range of the page within the full result set.
fn range_summary<T>(page: &Page<T>) -> String {
    if page.entries.is_empty() {
        return format!(
            "none of {} (offset {}, limit {})",
            page.total, page.offset, page.limit
        );
    }
    let first = page.offset + 1;
    let last = page.offset + page.entries.len() as u64;
    format!("{first}-{last} of {} (limit {})", page.total, page.limit)
}

fn print_entry(entry: &AuditLogEntry, format: OutputFormat) {
    match format {
        OutputFormat::Json => output::print_json(entry),
        OutputFormat::Table => {
            output::print_kv("ID", &entry.id);
            output::print_kv("Time", &format_time(entry));
            output::print_kv("Action", &entry.action);
            output::print_kv("Entity type", &entry.entity_type);
            output::print_kv("Entity ID", entry.entity_id.as_deref().unwrap_or("-"));
            output::print_kv("User", entry.user_id.as_deref().unwrap_or("-"));
            output::print_kv("Source", &entry.source);
            if let Some(details) = &entry.details {
                output::print_kv("Details", "");
                output::print_json(details);
            }
        }
    }
}

fn format_time(entry: &AuditLogEntry) -> String {
    entry
        .timestamp()
        .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| "(unparsed)".to_string())
}
