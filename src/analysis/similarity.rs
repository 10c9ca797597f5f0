//! Keyword-to-keyword similarity from shared message context
//!
//! Every keyword gets a context document built from corpus messages that
//! mention it. Contexts are TF-IDF vectorized with stop words removed and
//! compared by cosine similarity. The result is symmetric with a unit
//! diagonal, and values under the noise floor are snapped to zero.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::store::MessageStore;
use crate::text::{clean_text, LanguageModel, StopWords, TfIdfVectorizer};
use crate::{MindMapError, Result};

/// Similarities below this are treated as noise
pub const SIMILARITY_FLOOR: f64 = 0.1;

/// Default number of corpus messages gathered per keyword
pub const DEFAULT_CONTEXT_LIMIT: usize = 20;

/// Square row-major matrix indexed by keyword position.
/// Serialized as a list of rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<f64>>", into = "Vec<Vec<f64>>")]
pub struct SimilarityMatrix {
    size: usize,
    values: Vec<f64>,
}

impl SimilarityMatrix {
    pub fn identity(size: usize) -> Self {
        let mut values = vec![0.0; size * size];
        for i in 0..size {
            values[i * size + i] = 1.0;
        }
        Self { size, values }
    }

    /// Matrix from its rows, which must form a square
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        let size = rows.len();
        if let Some((i, row)) = rows.iter().enumerate().find(|(_, row)| row.len() != size) {
            return Err(MindMapError::InvalidInput(format!(
                "similarity row {} has {} values, expected {}",
                i,
                row.len(),
                size
            )));
        }
        Ok(Self {
            size,
            values: rows.into_iter().flatten().collect(),
        })
    }

    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.values[i * self.size + j]
    }

    fn set_pair(&mut self, i: usize, j: usize, value: f64) {
        self.values[i * self.size + j] = value;
        self.values[j * self.size + i] = value;
    }

    pub fn row(&self, i: usize) -> &[f64] {
        &self.values[i * self.size..(i + 1) * self.size]
    }

    pub fn is_symmetric(&self) -> bool {
        (0..self.size).all(|i| (0..i).all(|j| self.get(i, j) == self.get(j, i)))
    }

    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        (0..self.size).map(|i| self.row(i).to_vec()).collect()
    }
}

impl TryFrom<Vec<Vec<f64>>> for SimilarityMatrix {
    type Error = MindMapError;

    fn try_from(rows: Vec<Vec<f64>>) -> Result<Self> {
        Self::from_rows(rows)
    }
}

impl From<SimilarityMatrix> for Vec<Vec<f64>> {
    fn from(matrix: SimilarityMatrix) -> Self {
        matrix.to_rows()
    }
}

/// Computes keyword similarity against the message corpus
#[derive(Clone)]
pub struct SimilarityEngine {
    store: Arc<dyn MessageStore>,
    language: Arc<dyn LanguageModel>,
    context_limit: usize,
    floor: f64,
}

impl SimilarityEngine {
    pub fn new(store: Arc<dyn MessageStore>, language: Arc<dyn LanguageModel>) -> Self {
        Self {
            store,
            language,
            context_limit: DEFAULT_CONTEXT_LIMIT,
            floor: SIMILARITY_FLOOR,
        }
    }

    pub fn with_context_limit(mut self, limit: usize) -> Self {
        self.context_limit = limit;
        self
    }

    pub fn with_floor(mut self, floor: f64) -> Self {
        self.floor = floor;
        self
    }

    /// Pairwise similarity of `keywords`. Fewer than two keywords yield a
    /// 1x1 identity.
    pub async fn similarity(&self, keywords: &[String]) -> SimilarityMatrix {
        if keywords.len() < 2 {
            return SimilarityMatrix::identity(1);
        }

        let contexts = self.build_contexts(keywords).await;
        score_contexts(&contexts, self.language.stopwords(), self.floor)
    }

    /// One context document per keyword, in keyword order
    pub async fn build_contexts(&self, keywords: &[String]) -> Vec<String> {
        let mut contexts = Vec::with_capacity(keywords.len());
        for keyword in keywords {
            contexts.push(self.keyword_context(keyword).await);
        }
        contexts
    }

    /// Cleaned text of corpus messages mentioning `keyword`. Falls back to
    /// the keyword when nothing usable is found.
    ///
    /// A keyword with no verbatim hit is searched once more by its
    /// [`LanguageModel::search_stem`]. The stem strips an infinitive ending,
    /// so the retry only reaches verbs whose infinitive never occurs in the
    /// corpus ("precisar" found through "preciso").
    pub async fn keyword_context(&self, keyword: &str) -> String {
        let needle = keyword.to_lowercase();
        let mut context = match self.search_context(&needle).await {
            Ok(context) => context,
            Err(e) => {
                warn!("Context search failed for '{}': {}", keyword, e);
                return keyword.to_string();
            }
        };

        if context.is_empty() {
            if let Some(stem) = self.language.search_stem(&needle) {
                match self.search_context(&stem).await {
                    Ok(stem_context) => context = stem_context,
                    Err(e) => warn!("Context search failed for stem '{}': {}", stem, e),
                }
            }
        }

        if context.is_empty() {
            debug!("No corpus context for '{}', using the keyword", keyword);
            keyword.to_string()
        } else {
            context
        }
    }

    async fn search_context(&self, needle: &str) -> Result<String> {
        let messages = self.store.search_messages(needle, self.context_limit).await?;
        Ok(messages
            .iter()
            .filter(|m| m.text.to_lowercase().contains(needle))
            .map(|m| clean_text(&m.text))
            .filter(|cleaned| !cleaned.is_empty())
            .collect::<Vec<String>>()
            .join(" "))
    }
}

/// Cosine similarity of context documents.
///
/// Scores are clamped to [0, 1], values under `floor` become zero and the
/// diagonal is 1. When the contexts have no usable terms the result is the
/// identity.
pub fn score_contexts(contexts: &[String], stop_words: &StopWords, floor: f64) -> SimilarityMatrix {
    let size = contexts.len();
    let matrix = match TfIdfVectorizer::with_stop_words(stop_words).fit_transform(contexts) {
        Ok(matrix) => matrix,
        Err(e) => {
            warn!("Similarity fell back to identity for {} contexts: {}", size, e);
            return SimilarityMatrix::identity(size);
        }
    };

    let mut result = SimilarityMatrix::identity(size);
    for i in 0..size {
        for j in (i + 1)..size {
            let value = matrix.cosine_similarity(i, j).clamp(0.0, 1.0);
            let value = if value < floor { 0.0 } else { value };
            result.set_pair(i, j, value);
        }
    }
    result
}
