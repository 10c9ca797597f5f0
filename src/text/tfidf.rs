//! TF-IDF vectorization over a small in-memory corpus
//!
//! Terms are lowercase runs of two or more word characters. Weights use raw
//! term counts times a smoothed inverse document frequency
//! `ln((1 + n) / (1 + df)) + 1`, and every document row is L2-normalized.
//! The vocabulary is sorted, so column order is deterministic.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use thiserror::Error;

use super::stopwords::StopWords;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VectorizeError {
    #[error("No documents to vectorize")]
    NoDocuments,

    #[error("Empty vocabulary; documents contain only stop words or short tokens")]
    EmptyVocabulary,
}

/// Builds a [`TfIdfMatrix`] from documents
#[derive(Debug, Clone, Copy, Default)]
pub struct TfIdfVectorizer<'a> {
    stop_words: Option<&'a StopWords>,
}

impl<'a> TfIdfVectorizer<'a> {
    pub fn new() -> Self {
        Self { stop_words: None }
    }

    pub fn with_stop_words(stop_words: &'a StopWords) -> Self {
        Self {
            stop_words: Some(stop_words),
        }
    }

    /// Terms of one document, in order of appearance
    pub fn tokenize(&self, document: &str) -> Vec<String> {
        document
            .to_lowercase()
            .split(|c: char| !(c.is_alphanumeric() || c == '_'))
            .filter(|token| token.chars().count() >= 2)
            .filter(|token| !self.stop_words.is_some_and(|sw| sw.contains(token)))
            .map(str::to_string)
            .collect()
    }

    /// Learn the vocabulary and weights of `documents` and return one row each
    pub fn fit_transform<S: AsRef<str>>(
        &self,
        documents: &[S],
    ) -> Result<TfIdfMatrix, VectorizeError> {
        if documents.is_empty() {
            return Err(VectorizeError::NoDocuments);
        }

        let tokenized: Vec<Vec<String>> = documents
            .iter()
            .map(|doc| self.tokenize(doc.as_ref()))
            .collect();

        let vocabulary: Vec<String> = tokenized
            .iter()
            .flatten()
            .cloned()
            .collect::<BTreeSet<String>>()
            .into_iter()
            .collect();
        if vocabulary.is_empty() {
            return Err(VectorizeError::EmptyVocabulary);
        }
        let index: HashMap<&str, usize> = vocabulary
            .iter()
            .enumerate()
            .map(|(i, term)| (term.as_str(), i))
            .collect();

        let counts: Vec<BTreeMap<usize, f64>> = tokenized
            .iter()
            .map(|tokens| {
                let mut row = BTreeMap::new();
                for token in tokens {
                    *row.entry(index[token.as_str()]).or_insert(0.0) += 1.0;
                }
                row
            })
            .collect();

        let mut document_frequency = vec![0usize; vocabulary.len()];
        for row in &counts {
            for term in row.keys() {
                document_frequency[*term] += 1;
            }
        }

        let n = documents.len() as f64;
        let idf: Vec<f64> = document_frequency
            .iter()
            .map(|df| ((1.0 + n) / (1.0 + *df as f64)).ln() + 1.0)
            .collect();

        let rows = counts
            .into_iter()
            .map(|row| {
                let weighted: Vec<(usize, f64)> = row
                    .into_iter()
                    .map(|(term, count)| (term, count * idf[term]))
                    .collect();
                let norm = weighted.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
                if norm == 0.0 {
                    weighted
                } else {
                    weighted.into_iter().map(|(t, w)| (t, w / norm)).collect()
                }
            })
            .collect();

        Ok(TfIdfMatrix { vocabulary, rows })
    }
}

/// Sparse document-term matrix with L2-normalized rows
#[derive(Debug, Clone, PartialEq)]
pub struct TfIdfMatrix {
    vocabulary: Vec<String>,
    rows: Vec<Vec<(usize, f64)>>,
}

impl TfIdfMatrix {
    /// Sorted terms; column `i` is `vocabulary()[i]`
    pub fn vocabulary(&self) -> &[String] {
        &self.vocabulary
    }

    pub fn n_docs(&self) -> usize {
        self.rows.len()
    }

    /// Non-zero `(column, weight)` pairs of one document, by column
    pub fn row(&self, doc: usize) -> &[(usize, f64)] {
        self.rows.get(doc).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Weight of `term` in document `doc`; zero if absent
    pub fn weight(&self, doc: usize, term: &str) -> f64 {
        let Ok(column) = self.vocabulary.binary_search_by(|t| t.as_str().cmp(term)) else {
            return 0.0;
        };
        self.row(doc)
            .iter()
            .find(|(c, _)| *c == column)
            .map_or(0.0, |(_, w)| *w)
    }

    /// Sum of each column over all documents
    pub fn column_sums(&self) -> Vec<f64> {
        let mut sums = vec![0.0; self.vocabulary.len()];
        for row in &self.rows {
            for (column, weight) in row {
                sums[*column] += weight;
            }
        }
        sums
    }

    /// Cosine similarity of two documents; zero when either row is empty
    pub fn cosine_similarity(&self, a: usize, b: usize) -> f64 {
        let (left, right) = (self.row(a), self.row(b));
        let dot = sparse_dot(left, right);
        let norm_l = sparse_dot(left, left).sqrt();
        let norm_r = sparse_dot(right, right).sqrt();
        if norm_l == 0.0 || norm_r == 0.0 {
            return 0.0;
        }
        dot / (norm_l * norm_r)
    }
}

/// Dot product of two column-sorted sparse rows
fn sparse_dot(a: &[(usize, f64)], b: &[(usize, f64)]) -> f64 {
    let (mut i, mut j, mut dot) = (0, 0, 0.0);
    while i < a.len() && j < b.len() {
        match a[i].0.cmp(&b[j].0) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                dot += a[i].1 * b[j].1;
                i += 1;
                j += 1;
            }
        }
    }
    dot
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_tokenize_keeps_two_char_terms() {
        let v = TfIdfVectorizer::new();
        assert_eq!(
            v.tokenize("A casa, o Rio e 42 anos_x!"),
            vec!["casa", "rio", "42", "anos_x"]
        );
    }

    #[test]
    fn test_tokenize_filters_stop_words() {
        let stop = StopWords::portuguese();
        let v = TfIdfVectorizer::with_stop_words(&stop);
        assert_eq!(v.tokenize("medo do meu marido"), vec!["medo", "marido"]);
    }

    #[test]
    fn test_empty_inputs() {
        let v = TfIdfVectorizer::new();
        let none: [&str; 0] = [];
        assert_eq!(v.fit_transform(&none), Err(VectorizeError::NoDocuments));
        assert_eq!(
            v.fit_transform(&["", "a b"]),
            Err(VectorizeError::EmptyVocabulary)
        );
    }

    #[test]
    fn test_vocabulary_sorted_and_rows_normalized() {
        let v = TfIdfVectorizer::new();
        let m = v
            .fit_transform(&["precisar ajuda", "ajuda", "querer denunciar violência"])
            .unwrap();
        assert_eq!(
            m.vocabulary(),
            &["ajuda", "denunciar", "precisar", "querer", "violência"]
        );
        assert_eq!(m.n_docs(), 3);
        for doc in 0..3 {
            let norm: f64 = m.row(doc).iter().map(|(_, w)| w * w).sum();
            assert!((norm - 1.0).abs() < EPS);
        }
        assert!((m.weight(1, "ajuda") - 1.0).abs() < EPS);
        assert_eq!(m.weight(1, "precisar"), 0.0);
        assert_eq!(m.weight(1, "inexistente"), 0.0);
    }

    #[test]
    fn test_smoothed_idf_weights() {
        // idf(ajuda) = ln(4/3) + 1, idf(precisar) = ln(4/2) + 1
        let m = TfIdfVectorizer::new()
            .fit_transform(&["precisar ajuda", "ajuda", "outro"])
            .unwrap();
        let idf_ajuda = (4.0f64 / 3.0).ln() + 1.0;
        let idf_precisar = 2.0f64.ln() + 1.0;
        let norm = (idf_ajuda * idf_ajuda + idf_precisar * idf_precisar).sqrt();
        assert!((m.weight(0, "ajuda") - idf_ajuda / norm).abs() < EPS);
        assert!((m.weight(0, "precisar") - idf_precisar / norm).abs() < EPS);
    }

    #[test]
    fn test_column_sums() {
        let m = TfIdfVectorizer::new()
            .fit_transform(&["ajuda", "ajuda", "medo"])
            .unwrap();
        let sums = m.column_sums();
        assert!((sums[0] - 2.0).abs() < EPS);
        assert!((sums[1] - 1.0).abs() < EPS);
    }

    #[test]
    fn test_cosine_similarity() {
        let m = TfIdfVectorizer::new()
            .fit_transform(&["denunciar violência", "denunciar violência", "ajuda", ""])
            .unwrap();
        assert!((m.cosine_similarity(0, 1) - 1.0).abs() < EPS);
        assert_eq!(m.cosine_similarity(0, 2), 0.0);
        assert_eq!(m.cosine_similarity(0, 3), 0.0);
        assert_eq!(m.cosine_similarity(3, 3), 0.0);
    }
}
