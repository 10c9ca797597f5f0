//! CLI command definitions and argument parsing

use std::path::PathBuf;

use clap::Parser;
use clap::Subcommand;

#[derive(Parser)]
#[command(name = "mindmap")]
#[command(about = "Topic mind maps from stored conversation history")]
#[command(version)]
pub struct Cli {
    /// Enable verbose debug logging (default: info level)
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize database schema
    Init {
        /// Drop existing mind map tables first
        #[arg(short, long)]
        force: bool,
    },
    /// Import conversations from a JSON file into the database
    Import {
        /// JSON array of conversations: [{"user_id", "messages": [{"author_kind", "text", "timestamp"}]}]
        file: PathBuf,
    },
    /// Build the mind map of one user
    Analyze {
        /// User identifier of the conversation
        user_id: String,
        /// Maximum number of user messages (default: from config)
        #[arg(short, long)]
        limit: Option<usize>,
        /// Recency window in days (default: from config)
        #[arg(short, long)]
        days_back: Option<i64>,
        /// Number of ranked terms before deduplication (default: from config)
        #[arg(long)]
        top_n: Option<usize>,
        /// Minimum similarity for an edge (default: from config)
        #[arg(long)]
        threshold: Option<f64>,
        /// Read conversations from a JSON file instead of the database
        #[arg(short, long)]
        input: Option<PathBuf>,
        /// Save keywords and relations to the database
        #[arg(long)]
        persist: bool,
        /// Write the mind map as JSON to this path
        #[arg(short, long)]
        export: Option<PathBuf>,
    },
    /// Show stored message counts
    Stats {
        /// Only count messages of this user
        #[arg(short, long)]
        user: Option<String>,
    },
    /// Show current configuration
    Config,
}
