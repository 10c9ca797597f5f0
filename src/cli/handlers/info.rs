//! Information display handlers (stats, config)

use crate::cli::output::print_config;
use crate::cli::output::print_info;
use crate::database::Database;
use crate::AppConfig;
use crate::Result;

/// Handle stats command
pub async fn handle_stats_command(database: &Database, user: Option<&str>) -> Result<()> {
    database.verify_schema_or_error().await?;
    let count = database.count_messages(user).await?;
    match user {
        Some(user) => print_info(&format!("📊 {count} stored messages for {user}")),
        None => print_info(&format!("📊 {count} stored messages")),
    }
    Ok(())
}

/// Handle config command
pub fn handle_config_command(config: &AppConfig) -> Result<()> {
    print_config(config);
    Ok(())
}
