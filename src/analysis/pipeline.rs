//! End-to-end mind map analysis for one user
//!
//! fetch -> extract keywords -> similarity -> graph -> importance tiers.
//! Missing data ends the run early with [`AnalysisOutcome::NoData`]; only
//! contract violations surface as errors.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::Mutex;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use super::fetcher::MessageFetcher;
use super::graph::{GraphBuilder, MindMapGraph};
use super::importance::{classify, ImportanceTier};
use super::keywords::KeywordExtractor;
use super::similarity::{SimilarityEngine, SimilarityMatrix};
use crate::config::AnalysisConfig;
use crate::models::{KeywordRecord, RelationRecord};
use crate::store::{AnalysisSink, MessageStore};
use crate::text::LanguageModel;
use crate::Result;

/// Why a run produced no mind map
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoDataReason {
    /// No user-authored messages in the window
    NoMessages,
    /// Messages exist but none yielded a keyword
    NoKeywords,
}

/// Complete result of one run
#[derive(Debug, Clone)]
pub struct MindMap {
    pub graph: MindMapGraph,
    /// Keyword labels; graph node indices refer to positions in this list
    pub keywords: Vec<String>,
    pub similarity: SimilarityMatrix,
    /// Score of every term in the filtered vocabulary
    pub scores: BTreeMap<String, f64>,
    /// Tier per keyword index
    pub tiers: BTreeMap<usize, ImportanceTier>,
}

impl MindMap {
    pub fn score_of(&self, index: usize) -> f64 {
        self.keywords
            .get(index)
            .and_then(|k| self.scores.get(k))
            .copied()
            .unwrap_or(0.0)
    }

    pub fn tier_of(&self, index: usize) -> Option<ImportanceTier> {
        self.tiers.get(&index).copied()
    }
}

#[derive(Debug, Clone)]
pub enum AnalysisOutcome {
    NoData(NoDataReason),
    Complete(MindMap),
}

impl AnalysisOutcome {
    pub fn is_complete(&self) -> bool {
        matches!(self, AnalysisOutcome::Complete(_))
    }

    pub fn mind_map(&self) -> Option<&MindMap> {
        match self {
            AnalysisOutcome::Complete(map) => Some(map),
            AnalysisOutcome::NoData(_) => None,
        }
    }

    pub fn into_mind_map(self) -> Option<MindMap> {
        match self {
            AnalysisOutcome::Complete(map) => Some(map),
            AnalysisOutcome::NoData(_) => None,
        }
    }
}

/// Runs the analysis stages over a message store
pub struct MindMapAnalyzer {
    fetcher: MessageFetcher,
    extractor: KeywordExtractor,
    similarity: SimilarityEngine,
    graph_builder: GraphBuilder,
    sink: Option<Arc<dyn AnalysisSink>>,
    pending_writes: Mutex<JoinSet<()>>,
    config: AnalysisConfig,
}

impl MindMapAnalyzer {
    pub fn new(
        store: Arc<dyn MessageStore>,
        language: Arc<dyn LanguageModel>,
        config: AnalysisConfig,
    ) -> Self {
        let extractor = KeywordExtractor::new(Arc::clone(&language))
            .with_top_n(config.top_n)
            .with_dedup_threshold(config.dedup_threshold);
        let similarity = SimilarityEngine::new(Arc::clone(&store), language)
            .with_context_limit(config.context_limit)
            .with_floor(config.similarity_floor);

        Self {
            fetcher: MessageFetcher::new(store),
            extractor,
            similarity,
            graph_builder: GraphBuilder::new(config.edge_threshold),
            sink: None,
            pending_writes: Mutex::new(JoinSet::new()),
            config,
        }
    }

    /// Write keywords and graph edges to `sink` after each complete run.
    /// Writes run in the background and never delay the returned outcome.
    pub fn with_sink(mut self, sink: Arc<dyn AnalysisSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Analyze with the configured message limit and window
    pub async fn run(&self, user_id: &str) -> Result<AnalysisOutcome> {
        self.run_at(
            user_id,
            self.config.message_limit,
            self.config.days_back,
            Utc::now(),
        )
        .await
    }

    pub async fn run_at(
        &self,
        user_id: &str,
        limit: usize,
        days_back: i64,
        now: DateTime<Utc>,
    ) -> Result<AnalysisOutcome> {
        info!(
            "Analyzing {} (limit={}, days_back={})",
            user_id, limit, days_back
        );

        let messages = self.fetcher.fetch_at(user_id, limit, days_back, now).await;
        if messages.is_empty() {
            info!("No recent user messages for {}", user_id);
            return Ok(AnalysisOutcome::NoData(NoDataReason::NoMessages));
        }

        let extraction = self.extractor.extract(&messages);
        if extraction.is_empty() {
            info!(
                "No keywords in {} messages for {}",
                messages.len(),
                user_id
            );
            return Ok(AnalysisOutcome::NoData(NoDataReason::NoKeywords));
        }
        debug!("Keywords for {}: {:?}", user_id, extraction.keywords);

        let similarity = self.similarity.similarity(&extraction.keywords).await;
        let graph = self.graph_builder.build(&extraction.keywords, &similarity)?;
        let tiers = classify(&extraction.keywords, &extraction.scores);

        info!(
            "Mind map for {}: {} keywords, {} nodes, {} edges",
            user_id,
            extraction.keywords.len(),
            graph.node_count(),
            graph.edge_count()
        );

        let map = MindMap {
            graph,
            keywords: extraction.keywords,
            similarity,
            scores: extraction.scores,
            tiers,
        };

        if let Some(sink) = &self.sink {
            let (keywords, relations) = records(&map, now);
            let sink = Arc::clone(sink);
            let mut pending = self.pending_writes.lock().await;
            // drop handles of writes that already finished
            while pending.try_join_next().is_some() {}
            pending.spawn(persist(sink, keywords, relations));
        }

        Ok(AnalysisOutcome::Complete(map))
    }

    /// Wait for every background write started by earlier runs
    pub async fn flush_persistence(&self) {
        let mut pending = self.pending_writes.lock().await;
        while let Some(joined) = pending.join_next().await {
            if let Err(e) = joined {
                warn!("Persistence task did not finish: {}", e);
            }
        }
    }
}

fn records(map: &MindMap, now: DateTime<Utc>) -> (Vec<KeywordRecord>, Vec<RelationRecord>) {
    let keywords: Vec<KeywordRecord> = map
        .keywords
        .iter()
        .map(|keyword| KeywordRecord {
            keyword: keyword.clone(),
            created_at: now,
        })
        .collect();

    let relations: Vec<RelationRecord> = map
        .graph
        .edges()
        .into_iter()
        .map(|edge| RelationRecord {
            source: map.keywords[edge.source].clone(),
            target: map.keywords[edge.target].clone(),
            weight: edge.weight,
            created_at: now,
        })
        .collect();

    (keywords, relations)
}

/// Write a run's keywords and edges; failures are logged and dropped
async fn persist(
    sink: Arc<dyn AnalysisSink>,
    keywords: Vec<KeywordRecord>,
    relations: Vec<RelationRecord>,
) {
    if let Err(e) = sink.save_keywords(&keywords).await {
        warn!("Failed to save {} keywords: {}", keywords.len(), e);
    }
    if relations.is_empty() {
        return;
    }
    if let Err(e) = sink.save_relations(&relations).await {
        warn!("Failed to save {} relations: {}", relations.len(), e);
    }
}
