//! Database initialization handler

use crate::cli::output::print_info;
use crate::cli::output::print_success;
use crate::cli::output::print_warning;
use crate::database::Database;
use crate::Result;

/// Handle database initialization command
pub async fn handle_init_command(database: &Database, force: bool) -> Result<()> {
    print_info("🗄️  Initializing MindMap database...");

    if force {
        print_warning("Dropping existing mind map tables (--force)");
        database.drop_schema().await?;
    }

    database.init_schema().await?;
    print_success("Tables conversation_messages, mindmap_keywords and mindmap_relations ready");

    println!();
    print_info("To load conversations, run:");
    println!("   mindmap import <conversations.json>");

    Ok(())
}
