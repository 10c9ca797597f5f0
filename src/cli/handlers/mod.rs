//! CLI command handlers module
//!
//! This module is organized by functional domains:
//! - init: Database schema initialization
//! - import: Loading conversations from JSON files
//! - analyze: Mind map analysis of one user
//! - info: Information display (stats, config)

pub mod analyze;
pub mod import;
pub mod info;
pub mod init;

// Re-export all public handlers
pub use analyze::*;
pub use import::*;
pub use info::*;
pub use init::*;
