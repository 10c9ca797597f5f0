//! Mind map analysis pipeline
//!
//! - fetcher: recent user-authored messages of one conversation
//! - keywords: TF-IDF ranking and near-duplicate merging
//! - similarity: keyword relatedness from shared corpus context
//! - graph: thresholded keyword graph without isolated nodes
//! - importance: quartile tiers of keyword scores
//! - pipeline: the stages wired together
//! - export: renderer-facing JSON shape

pub mod export;
pub mod fetcher;
pub mod graph;
pub mod importance;
pub mod keywords;
pub mod pipeline;
pub mod similarity;

pub use export::{ExportNode, MindMapExport};
pub use fetcher::MessageFetcher;
pub use graph::{GraphBuilder, GraphEdge, MindMapGraph, TopicNode, EDGE_THRESHOLD};
pub use importance::{classify, ImportanceTier, Quartiles};
pub use keywords::{KeywordClusters, KeywordExtraction, KeywordExtractor, DEDUP_SIMILARITY_THRESHOLD};
pub use pipeline::{AnalysisOutcome, MindMap, MindMapAnalyzer, NoDataReason};
pub use similarity::{score_contexts, SimilarityEngine, SimilarityMatrix, SIMILARITY_FLOOR};
