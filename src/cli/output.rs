//! CLI output formatting utilities
//!
//! This module provides consistent output formatting for the `mindmap` CLI

use crate::analysis::{ImportanceTier, MindMap, NoDataReason};
use crate::AppConfig;

/// Safely truncate a string at character boundary (not byte boundary)
#[must_use]
pub fn truncate_str(s: &str, max_chars: usize) -> String {
    if s.chars().count() > max_chars {
        let truncated: String = s.chars().take(max_chars).collect();
        format!("{truncated}...")
    } else {
        s.to_string()
    }
}

fn tier_marker(tier: Option<ImportanceTier>) -> &'static str {
    match tier {
        Some(ImportanceTier::High) => "🔴",
        Some(ImportanceTier::Medium) => "🟠",
        Some(ImportanceTier::Low) => "🔵",
        Some(ImportanceTier::Minimal) | None => "🟢",
    }
}

/// Print keywords, tiers and graph edges of a mind map
pub fn print_mind_map(user_id: &str, map: &MindMap) {
    println!("🧠 Mind map for {user_id}");
    println!();

    println!("🔑 Keywords ({}):", map.keywords.len());
    for (index, keyword) in map.keywords.iter().enumerate() {
        let tier = map.tier_of(index);
        let in_graph = if map.graph.contains_keyword(index) {
            ""
        } else {
            " (isolated)"
        };
        println!(
            "  {} {:<24} score: {:.3}  tier: {}{}",
            tier_marker(tier),
            truncate_str(keyword, 24),
            map.score_of(index),
            tier.map_or("-", ImportanceTier::as_str),
            in_graph
        );
    }
    println!();

    let edges = map.graph.edges();
    println!(
        "🕸️  Graph: {} nodes, {} edges",
        map.graph.node_count(),
        edges.len()
    );
    for edge in &edges {
        println!(
            "  - {} ↔ {} ({:.3})",
            map.keywords[edge.source], map.keywords[edge.target], edge.weight
        );
    }
    if map.graph.is_empty() {
        print_warning("No keyword pair is related strongly enough to draw a graph");
    }
}

pub fn print_no_data(user_id: &str, reason: NoDataReason) {
    match reason {
        NoDataReason::NoMessages => {
            print_warning(&format!("No recent messages from {user_id} in the window"));
        }
        NoDataReason::NoKeywords => {
            print_warning(&format!("Messages from {user_id} yielded no keywords"));
        }
    }
}

/// Print configuration
pub fn print_config(config: &AppConfig) {
    println!("📋 MindMap Configuration:");
    println!();

    println!("🗄️  Database:");
    println!("  URL: {}", mask_database_url(config.database_url()));
    println!("  Max connections: {}", config.max_connections());
    println!("  Min connections: {}", config.min_connections());
    println!("  Connection timeout: {}s", config.connection_timeout());
    println!();

    println!("📝 Logging:");
    println!("  Level: {}", config.logging.level);
    println!("  Backtrace: {}", config.logging.backtrace);
    println!();

    let analysis = config.analysis();
    println!("🔎 Analysis:");
    println!("  Message limit: {}", analysis.message_limit);
    println!("  Days back: {}", analysis.days_back);
    println!("  Top N: {}", analysis.top_n);
    println!("  Dedup threshold: {}", analysis.dedup_threshold);
    println!("  Context limit: {}", analysis.context_limit);
    println!("  Similarity floor: {}", analysis.similarity_floor);
    println!("  Edge threshold: {}", analysis.edge_threshold);
    println!("  Persist results: {}", analysis.persist_results);
}

/// Mask database URL for logging (hide password)
fn mask_database_url(url: &str) -> String {
    if let Ok(parsed) = url::Url::parse(url) {
        if let Some(host) = parsed.host_str() {
            format!(
                "{}://{}@{}:{}",
                parsed.scheme(),
                parsed.username(),
                host,
                parsed.port().unwrap_or(5432)
            )
        } else {
            "***masked***".to_string()
        }
    } else {
        "***invalid***".to_string()
    }
}

pub fn print_info(msg: &str) {
    println!("ℹ️  {msg}");
}

pub fn print_success(msg: &str) {
    println!("✅ {msg}");
}

pub fn print_warning(msg: &str) {
    println!("⚠️  {msg}");
}

pub fn print_error(msg: &str) {
    eprintln!("❌ {msg}");
}
