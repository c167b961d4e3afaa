//! CLI command definitions and dispatch.

pub mod config;
pub mod entity;
pub mod health;
pub mod migrate;

use clap::{Parser, Subcommand};

use unidesk_core::config::AppConfig;
use unidesk_core::error::AppError;
use unidesk_database::{DatabasePool, Repositories};
use unidesk_entity::{Department, Honor, Publication, Role, Teacher, User};

use crate::output::OutputFormat;

/// Unidesk administrative backend
#[derive(Debug, Parser)]
#[command(name = "unidesk", version, about, long_about = None)]
pub struct Cli {
    /// Directory holding `default.toml` and environment overlays
    #[arg(short, long, default_value = "config")]
    pub config: String,

    /// Environment overlay to merge over the defaults
    #[arg(short, long, default_value = "development")]
    pub env: String,

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
    /// Database migration management
    Migrate(migrate::MigrateArgs),
    /// Check database connectivity
    Health,
    /// Configuration management
    Config(config::ConfigArgs),
    /// Roles
    Role(entity::EntityArgs),
    /// Users
    User(entity::EntityArgs),
    /// Departments
    Department(entity::EntityArgs),
    /// Teachers
    Teacher(entity::EntityArgs),
    /// Publications
    Publication(entity::EntityArgs),
    /// Honors
    Honor(entity::EntityArgs),
}

impl Cli {
    /// Load the merged configuration for the selected environment.
    pub fn load_config(&self) -> Result<AppConfig, AppError> {
        AppConfig::load(&self.config, &self.env)
    }

    /// Execute the CLI command
    pub async fn execute(&self, config: &AppConfig) -> Result<(), AppError> {
        match &self.command {
            Commands::Migrate(args) => migrate::execute(args, config).await,
            Commands::Health => health::execute(config, self.format).await,
            Commands::Config(args) => config::execute(args, config, self.format),
            Commands::Role(args) => {
                let repos = repositories(config).await?;
                entity::execute::<Role, _>(&repos.roles, args, self.format).await
            }
            Commands::User(args) => {
                let repos = repositories(config).await?;
                entity::execute::<User, _>(&repos.users, args, self.format).await
            }
            Commands::Department(args) => {
                let repos = repositories(config).await?;
                entity::execute::<Department, _>(&repos.departments, args, self.format).await
            }
            Commands::Teacher(args) => {
                let repos = repositories(config).await?;
                entity::execute::<Teacher, _>(&repos.teachers, args, self.format).await
            }
            Commands::Publication(args) => {
                let repos = repositories(config).await?;
                entity::execute::<Publication, _>(&repos.publications, args, self.format).await
            }
            Commands::Honor(args) => {
                let repos = repositories(config).await?;
                entity::execute::<Honor, _>(&repos.honors, args, self.format).await
            }
        }
    }
}

/// Helper: connect to the database, applying migrations when configured.
pub async fn connect(config: &AppConfig) -> Result<DatabasePool, AppError> {
    let pool = DatabasePool::connect(&config.database).await?;
    if config.database.run_migrations {
        unidesk_database::migration::run_migrations(pool.pool()).await?;
    }
    Ok(pool)
}

/// Helper: repositories over the configured database.
async fn repositories(config: &AppConfig) -> Result<Repositories, AppError> {
    let pool = connect(config).await?;
    Ok(Repositories::postgres(pool.pool().clone(), &config.query))
}
