//! Database migration management commands.

use clap::{Args, Subcommand};
use tracing::info;

use unidesk_core::config::AppConfig;
use unidesk_core::error::AppError;
use unidesk_database::DatabasePool;
use unidesk_database::migration;

use crate::output;

/// Arguments for the migrate command
#[derive(Debug, Args)]
pub struct MigrateArgs {
    /// Migration subcommand
    #[command(subcommand)]
    pub command: MigrateCommand,
}

/// Migration subcommands
#[derive(Debug, Subcommand)]
pub enum MigrateCommand {
    /// Run all pending migrations
    Run,
    /// Show migration status
    Status,
}

/// Execute migration commands
pub async fn execute(args: &MigrateArgs, config: &AppConfig) -> Result<(), AppError> {
    let pool = DatabasePool::connect(&config.database).await?;

    match &args.command {
        MigrateCommand::Run => {
            migration::run_migrations(pool.pool()).await?;
            output::print_success("All migrations applied successfully.");
        }
        MigrateCommand::Status => {
            let status = migration::migration_status(pool.pool()).await?;
            let pending = status.iter().filter(|m| !m.applied).count();
            info!(total = status.len(), pending, "Migration status");

            println!("Migration status:");
            for entry in &status {
                let state = if entry.applied { "applied" } else { "pending" };
                println!("  {} - {} ({})", entry.version, entry.description, state);
            }
            if pending > 0 {
                output::print_warning(&format!("{pending} migration(s) pending"));
            }
        }
    }

    pool.close().await;
    Ok(())
}
