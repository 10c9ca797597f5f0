//! Topic mind maps from stored conversation history
//!
//! A run fetches a user's recent messages, extracts and deduplicates salient
//! keywords, scores how related they are from the contexts they appear in,
//! and returns a thresholded keyword graph with importance tiers.

pub mod analysis;
pub mod cli;
pub mod config;
pub mod database;
pub mod errors;
pub mod logging;
pub mod models;
pub mod store;
pub mod text;

#[cfg(test)]
mod config_tests;
#[cfg(test)]
mod errors_tests;

pub use analysis::{AnalysisOutcome, MindMap, MindMapAnalyzer, MindMapExport, NoDataReason};
pub use config::AppConfig;
pub use errors::*;
pub use store::{AnalysisSink, InMemoryMessageStore, MessageStore};
pub use text::{LanguageModel, PortugueseModel};
