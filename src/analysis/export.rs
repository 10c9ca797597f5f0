//! Serializable mind map for rendering surfaces

use serde::{Deserialize, Serialize};

use super::graph::GraphEdge;
use super::importance::ImportanceTier;
use super::pipeline::MindMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportNode {
    pub id: usize,
    pub label: String,
    pub score: f64,
    pub tier: ImportanceTier,
}

/// Nodes and edges of a mind map, as handed to a renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MindMapExport {
    pub nodes: Vec<ExportNode>,
    pub edges: Vec<GraphEdge>,
}

impl MindMapExport {
    pub fn from_mind_map(map: &MindMap) -> Self {
        let nodes = map
            .graph
            .node_indices()
            .into_iter()
            .map(|id| ExportNode {
                id,
                label: map.keywords[id].clone(),
                score: map.score_of(id),
                tier: map.tier_of(id).unwrap_or(ImportanceTier::Minimal),
            })
            .collect();

        Self {
            nodes,
            edges: map.graph.edges(),
        }
    }

    pub fn to_json_pretty(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl From<&MindMap> for MindMapExport {
    fn from(map: &MindMap) -> Self {
        Self::from_mind_map(map)
    }
}
