//! Text processing building blocks for keyword analysis
//!
//! - normalize: cleaning of raw message text
//! - stopwords: Portuguese stop word lists
//! - language: tokenization, part-of-speech tagging and lemmatization
//! - tfidf: TF-IDF vectorization and cosine similarity
//! - fuzzy: gestalt string similarity used for keyword deduplication

pub mod fuzzy;
pub mod language;
pub mod normalize;
pub mod stopwords;
pub mod tfidf;

pub use fuzzy::similarity_ratio;
pub use language::{AnalyzedToken, LanguageModel, PartOfSpeech, PortugueseModel};
pub use normalize::clean_text;
pub use stopwords::StopWords;
pub use tfidf::{TfIdfMatrix, TfIdfVectorizer, VectorizeError};
