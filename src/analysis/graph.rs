//! Keyword graph construction
//!
//! Nodes are keywords, edges connect pairs whose similarity reaches the
//! threshold. Keywords left without any edge are removed, so node indices
//! stay those of the original keyword list but may have gaps.

use petgraph::stable_graph::{NodeIndex, StableUnGraph};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::similarity::SimilarityMatrix;
use crate::{MindMapError, Result};

/// Default minimum similarity for an edge
pub const EDGE_THRESHOLD: f64 = 0.1;

/// A keyword node; `index` is its position in the keyword list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicNode {
    pub index: usize,
    pub label: String,
}

/// An undirected edge between two keyword indices, `source < target`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphEdge {
    pub source: usize,
    pub target: usize,
    pub weight: f64,
}

/// Undirected weighted graph of related keywords
#[derive(Debug, Clone, Default)]
pub struct MindMapGraph {
    graph: StableUnGraph<TopicNode, f64>,
}

impl MindMapGraph {
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    fn node(&self, index: usize) -> Option<NodeIndex> {
        let node = NodeIndex::new(index);
        self.graph.contains_node(node).then_some(node)
    }

    pub fn contains_keyword(&self, index: usize) -> bool {
        self.node(index).is_some()
    }

    pub fn label(&self, index: usize) -> Option<&str> {
        self.node(index)
            .and_then(|n| self.graph.node_weight(n))
            .map(|node| node.label.as_str())
    }

    pub fn degree(&self, index: usize) -> usize {
        self.node(index)
            .map_or(0, |n| self.graph.neighbors(n).count())
    }

    /// Surviving keyword indices, ascending
    pub fn node_indices(&self) -> Vec<usize> {
        let mut indices: Vec<usize> = self.graph.node_indices().map(|n| n.index()).collect();
        indices.sort_unstable();
        indices
    }

    pub fn nodes(&self) -> Vec<&TopicNode> {
        self.node_indices()
            .into_iter()
            .filter_map(|i| self.node(i).and_then(|n| self.graph.node_weight(n)))
            .collect()
    }

    /// All edges ordered by `(source, target)`
    pub fn edges(&self) -> Vec<GraphEdge> {
        let mut edges: Vec<GraphEdge> = self
            .graph
            .edge_indices()
            .filter_map(|e| {
                let (a, b) = self.graph.edge_endpoints(e)?;
                let weight = *self.graph.edge_weight(e)?;
                let (source, target) = if a.index() < b.index() {
                    (a.index(), b.index())
                } else {
                    (b.index(), a.index())
                };
                Some(GraphEdge {
                    source,
                    target,
                    weight,
                })
            })
            .collect();
        edges.sort_by_key(|e| (e.source, e.target));
        edges
    }

    /// Weight of the edge between two keyword indices
    pub fn edge_weight(&self, a: usize, b: usize) -> Option<f64> {
        let edge = self.graph.find_edge(self.node(a)?, self.node(b)?)?;
        self.graph.edge_weight(edge).copied()
    }

    /// Neighbor keyword indices, ascending
    pub fn neighbors(&self, index: usize) -> Vec<usize> {
        let mut neighbors: Vec<usize> = self
            .node(index)
            .map(|n| self.graph.neighbors(n).map(|m| m.index()).collect())
            .unwrap_or_default();
        neighbors.sort_unstable();
        neighbors
    }

    pub fn as_petgraph(&self) -> &StableUnGraph<TopicNode, f64> {
        &self.graph
    }
}

/// Builds a [`MindMapGraph`] from keywords and their similarity matrix
#[derive(Debug, Clone, Copy)]
pub struct GraphBuilder {
    threshold: f64,
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self::new(EDGE_THRESHOLD)
    }
}

impl GraphBuilder {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Edge (i, j) exists iff `matrix[i][j] >= threshold`. Nodes without
    /// edges are dropped.
    pub fn build(&self, keywords: &[String], matrix: &SimilarityMatrix) -> Result<MindMapGraph> {
        if keywords.len() > matrix.len() {
            return Err(MindMapError::InvalidInput(format!(
                "{} keywords but a {}x{} similarity matrix",
                keywords.len(),
                matrix.len(),
                matrix.len()
            )));
        }

        let mut graph = StableUnGraph::<TopicNode, f64>::default();
        let nodes: Vec<NodeIndex> = keywords
            .iter()
            .enumerate()
            .map(|(index, label)| {
                graph.add_node(TopicNode {
                    index,
                    label: label.clone(),
                })
            })
            .collect();

        for i in 0..nodes.len() {
            for j in (i + 1)..nodes.len() {
                let weight = matrix.get(i, j);
                if weight >= self.threshold {
                    graph.add_edge(nodes[i], nodes[j], weight);
                }
            }
        }

        let isolated: Vec<NodeIndex> = graph
            .node_indices()
            .filter(|n| graph.neighbors(*n).next().is_none())
            .collect();
        for node in &isolated {
            graph.remove_node(*node);
        }

        debug!(
            "Built graph with {} nodes and {} edges ({} isolated keywords dropped)",
            graph.node_count(),
            graph.edge_count(),
            isolated.len()
        );

        Ok(MindMapGraph { graph })
    }
}
