//! Database health check.

use unidesk_core::config::AppConfig;
use unidesk_core::error::AppError;
use unidesk_database::connection::mask_password;

use crate::output::{self, OutputFormat};

/// Connect and run a trivial query.
pub async fn execute(config: &AppConfig, format: OutputFormat) -> Result<(), AppError> {
    let pool = super::connect(config).await?;
    let healthy = pool.health_check().await?;
    pool.close().await;

    let url = mask_password(&config.database.url);
    match format {
        OutputFormat::Json => {
            output::print_json(&serde_json::json!({ "database": url, "healthy": healthy }))
        }
        OutputFormat::Table => {
            output::print_kv("Database", &url);
            output::print_kv("Healthy", &healthy.to_string());
        }
    }

    if healthy {
        Ok(())
    } else {
        Err(AppError::database("Database health check returned an unexpected result"))
    }
}
