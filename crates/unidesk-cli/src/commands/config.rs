//! Configuration management CLI commands.

use clap::{Args, Subcommand};

use unidesk_core::config::AppConfig;
use unidesk_core::error::AppError;
use unidesk_database::connection::mask_password;

use crate::output::{self, OutputFormat};

/// Arguments for config commands
#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// Config subcommand
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show the merged configuration
    Show,
    /// Validate the merged configuration
    Validate,
}

/// Execute config commands
pub fn execute(args: &ConfigArgs, config: &AppConfig, format: OutputFormat) -> Result<(), AppError> {
    match &args.command {
        ConfigCommand::Show => {
            let mut shown = config.clone();
            shown.database.url = mask_password(&shown.database.url);
            match format {
                OutputFormat::Json => output::print_json(&shown),
                OutputFormat::Table => {
                    output::print_kv("database.url", &shown.database.url);
                    output::print_kv(
                        "database.max_connections",
                        &shown.database.max_connections.to_string(),
                    );
                    output::print_kv(
                        "database.min_connections",
                        &shown.database.min_connections.to_string(),
                    );
                    output::print_kv(
                        "database.run_migrations",
                        &shown.database.run_migrations.to_string(),
                    );
                    output::print_kv(
                        "query.default_page_size",
                        &shown.query.default_page_size.to_string(),
                    );
                    output::print_kv(
                        "query.unknown_fields",
                        &format!("{:?}", shown.query.unknown_fields),
                    );
                    output::print_kv(
                        "query.delete_guid_mismatch",
                        &format!("{:?}", shown.query.delete_guid_mismatch),
                    );
                    output::print_kv("logging.level", &shown.logging.level);
                    output::print_kv("logging.format", &shown.logging.format);
                }
            }
        }
        ConfigCommand::Validate => {
            if config.query.default_page_size == 0 {
                return Err(AppError::configuration(
                    "query.default_page_size must be at least 1",
                ));
            }
            if !matches!(config.logging.format.as_str(), "json" | "pretty") {
                output::print_warning(&format!(
                    "Unknown logging format '{}', falling back to pretty",
                    config.logging.format
                ));
            }
            output::print_success("Configuration is valid");
            output::print_kv("Database", &mask_password(&config.database.url));
        }
    }

    Ok(())
}
