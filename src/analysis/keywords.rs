//! Keyword extraction
//!
//! Each message is reduced to the lemmas of its nouns and verbs, the filtered
//! corpus is TF-IDF weighted, terms are ranked by total weight, and the top
//! terms are merged into clusters of near-duplicate spellings.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{debug, info};

use crate::models::UserMessage;
use crate::text::{similarity_ratio, LanguageModel, TfIdfVectorizer};

/// Default gestalt ratio at or above which two terms are the same keyword
pub const DEDUP_SIMILARITY_THRESHOLD: f64 = 0.85;

/// Default number of ranked terms considered before deduplication
pub const DEFAULT_TOP_N: usize = 30;

/// Deduplicated keywords with the aggregate score of every scored term
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KeywordExtraction {
    /// Cluster representatives, in order of first appearance in the ranking
    pub keywords: Vec<String>,
    /// Scores of the whole vocabulary, including terms past the top-N cut
    /// and merged-away variants
    pub scores: BTreeMap<String, f64>,
}

impl KeywordExtraction {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }

    /// Score of `keyword`, zero when it was never scored
    pub fn score_of(&self, keyword: &str) -> f64 {
        self.scores.get(keyword).copied().unwrap_or(0.0)
    }
}

/// Greedy buckets of mutually similar terms
///
/// A term joins the first bucket whose seed (its first member) it matches at
/// or above the threshold; otherwise it seeds a new bucket.
#[derive(Debug, Clone)]
pub struct KeywordClusters {
    threshold: f64,
    buckets: Vec<Vec<String>>,
}

impl KeywordClusters {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            buckets: Vec::new(),
        }
    }

    pub fn insert(&mut self, term: &str) {
        let threshold = self.threshold;
        match self
            .buckets
            .iter_mut()
            .find(|bucket| similarity_ratio(term, &bucket[0]) >= threshold)
        {
            Some(bucket) => bucket.push(term.to_string()),
            None => self.buckets.push(vec![term.to_string()]),
        }
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn buckets(&self) -> &[Vec<String>] {
        &self.buckets
    }

    /// Shortest member of each bucket, ties to the earliest inserted
    pub fn representatives(&self) -> Vec<String> {
        self.buckets
            .iter()
            .filter_map(|bucket| bucket.iter().min_by_key(|term| term.chars().count()))
            .cloned()
            .collect()
    }
}

/// Ranks and deduplicates the salient terms of a message list
#[derive(Clone)]
pub struct KeywordExtractor {
    language: Arc<dyn LanguageModel>,
    top_n: usize,
    dedup_threshold: f64,
}

impl KeywordExtractor {
    pub fn new(language: Arc<dyn LanguageModel>) -> Self {
        Self {
            language,
            top_n: DEFAULT_TOP_N,
            dedup_threshold: DEDUP_SIMILARITY_THRESHOLD,
        }
    }

    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }

    pub fn with_dedup_threshold(mut self, threshold: f64) -> Self {
        self.dedup_threshold = threshold;
        self
    }

    /// Space-joined lemmas of the alphabetic nouns and verbs of `text` that
    /// are not stop words
    pub fn filter_document(&self, text: &str) -> String {
        let stop_words = self.language.domain_stopwords();
        self.language
            .analyze(text)
            .into_iter()
            .filter(|token| token.is_alpha() && token.is_content_word())
            .filter(|token| !stop_words.contains(&token.lemma))
            .map(|token| token.lemma)
            .collect::<Vec<String>>()
            .join(" ")
    }

    pub fn extract(&self, messages: &[UserMessage]) -> KeywordExtraction {
        if messages.is_empty() {
            return KeywordExtraction::empty();
        }

        let documents: Vec<String> = messages
            .iter()
            .map(|m| self.filter_document(&m.text))
            .collect();

        let matrix = match TfIdfVectorizer::new().fit_transform(&documents) {
            Ok(matrix) => matrix,
            Err(e) => {
                info!("No keyword candidates in {} messages: {}", messages.len(), e);
                return KeywordExtraction::empty();
            }
        };

        let scores: BTreeMap<String, f64> = matrix
            .vocabulary()
            .iter()
            .cloned()
            .zip(matrix.column_sums())
            .collect();

        // vocabulary is sorted, so the stable sort breaks ties alphabetically
        let mut ranked: Vec<(&String, f64)> = scores.iter().map(|(t, s)| (t, *s)).collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
        ranked.truncate(self.top_n);

        let mut clusters = KeywordClusters::new(self.dedup_threshold);
        for (term, _) in &ranked {
            clusters.insert(term);
        }

        let keywords = clusters.representatives();
        debug!(
            "Ranked {} of {} terms into {} keywords from {} messages",
            ranked.len(),
            scores.len(),
            keywords.len(),
            messages.len()
        );

        KeywordExtraction { keywords, scores }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::PortugueseModel;

    fn extractor() -> KeywordExtractor {
        KeywordExtractor::new(Arc::new(PortugueseModel::new()))
    }

    fn messages(texts: &[&str]) -> Vec<UserMessage> {
        texts.iter().map(|t| UserMessage::new(*t)).collect()
    }

    #[test]
    fn test_filter_document_keeps_content_lemmas() {
        let ex = extractor();
        assert_eq!(ex.filter_document("Preciso de ajuda"), "precisar ajuda");
        assert_eq!(ex.filter_document("Ajuda urgente necessária"), "ajuda");
        assert_eq!(
            ex.filter_document("Quero denunciar violência"),
            "querer denunciar violência"
        );
        assert_eq!(ex.filter_document("Eu sou, eu estou, eu vou"), "");
    }

    #[test]
    fn test_filter_document_drops_domain_stopwords() {
        let ex = extractor();
        assert_eq!(ex.filter_document("Minha pergunta sobre a vez"), "");
    }

    #[test]
    fn test_extract_ranks_by_total_weight() {
        let result = extractor().extract(&messages(&[
            "Preciso de ajuda",
            "Ajuda urgente necessária",
            "Quero denunciar violência",
        ]));
        assert_eq!(
            result.keywords,
            vec!["ajuda", "precisar", "denunciar", "querer", "violência"]
        );
        assert!(result.score_of("ajuda") > result.score_of("precisar"));
        assert!(result.score_of("precisar") > result.score_of("denunciar"));
        assert!((result.score_of("denunciar") - result.score_of("violência")).abs() < 1e-9);
        assert_eq!(result.score_of("urgente"), 0.0);
    }

    #[test]
    fn test_extract_empty_and_stopword_only() {
        let ex = extractor();
        assert!(ex.extract(&[]).is_empty());
        assert!(ex.extract(&messages(&["eu sou", "ok tchau"])).is_empty());
    }

    #[test]
    fn test_extract_merges_near_duplicates() {
        let result = extractor().extract(&messages(&[
            "violência violênciaa",
            "violência em casa",
        ]));
        assert_eq!(result.keywords, vec!["violência", "casa"]);
        assert!(result.scores.contains_key("violênciaa"));
    }

    #[test]
    fn test_top_n_limits_ranked_terms() {
        let result = extractor()
            .with_top_n(2)
            .extract(&messages(&["casa escola trabalho", "casa escola", "casa"]));
        assert_eq!(result.keywords, vec!["casa", "escola"]);
        // terms cut from the ranking keep their score
        assert_eq!(result.scores.len(), 3);
        assert!(result.scores.contains_key("trabalho"));
        assert!(result.score_of("trabalho") < result.score_of("escola"));
    }

    #[test]
    fn test_clusters_pick_shortest_member() {
        let mut clusters = KeywordClusters::new(0.85);
        clusters.insert("denunciar");
        clusters.insert("denunciara");
        clusters.insert("medo");
        clusters.insert("denuncia");
        assert_eq!(clusters.len(), 2);
        assert_eq!(clusters.representatives(), vec!["denuncia", "medo"]);
    }

    #[test]
    fn test_clusters_tie_goes_to_earliest() {
        let mut clusters = KeywordClusters::new(0.5);
        clusters.insert("casa");
        clusters.insert("cass");
        assert_eq!(clusters.representatives(), vec!["casa"]);
    }

    #[test]
    fn test_clusters_compare_against_seed() {
        let mut clusters = KeywordClusters::new(0.85);
        assert!(clusters.is_empty());
        clusters.insert("ajuda");
        clusters.insert("ajudas");
        clusters.insert("ajudass");
        // "ajudass" vs seed "ajuda": 10 / 12 < 0.85
        assert_eq!(clusters.buckets()[0], vec!["ajuda", "ajudas"]);
        assert_eq!(clusters.len(), 2);
    }
}
