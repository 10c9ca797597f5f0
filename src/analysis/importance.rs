//! Relative importance tiers from keyword score quartiles

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImportanceTier {
    High,
    Medium,
    Low,
    Minimal,
}

impl ImportanceTier {
    pub fn as_str(self) -> &'static str {
        match self {
            ImportanceTier::High => "high",
            ImportanceTier::Medium => "medium",
            ImportanceTier::Low => "low",
            ImportanceTier::Minimal => "minimal",
        }
    }
}

impl fmt::Display for ImportanceTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 25th, 50th and 75th percentiles of a score set
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quartiles {
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
}

impl Quartiles {
    /// `None` for an empty slice
    pub fn of(scores: &[f64]) -> Option<Self> {
        if scores.is_empty() {
            return None;
        }
        let mut sorted = scores.to_vec();
        sorted.sort_by(f64::total_cmp);
        Some(Self {
            q1: percentile(&sorted, 25.0),
            median: percentile(&sorted, 50.0),
            q3: percentile(&sorted, 75.0),
        })
    }

    pub fn tier(&self, score: f64) -> ImportanceTier {
        if score >= self.q3 {
            ImportanceTier::High
        } else if score >= self.median {
            ImportanceTier::Medium
        } else if score >= self.q1 {
            ImportanceTier::Low
        } else {
            ImportanceTier::Minimal
        }
    }
}

/// Percentile `p` (0-100) of ascending `sorted` values, linearly
/// interpolated between closest ranks
pub fn percentile(sorted: &[f64], p: f64) -> f64 {
    match sorted.len() {
        0 => 0.0,
        1 => sorted[0],
        n => {
            let rank = (p / 100.0).clamp(0.0, 1.0) * (n - 1) as f64;
            let lower = rank.floor() as usize;
            let upper = (lower + 1).min(n - 1);
            let fraction = rank - lower as f64;
            sorted[lower] + (sorted[upper] - sorted[lower]) * fraction
        }
    }
}

/// Tier of every keyword, keyed by keyword index. Keywords without a score
/// count as zero.
pub fn classify(keywords: &[String], scores: &BTreeMap<String, f64>) -> BTreeMap<usize, ImportanceTier> {
    let values: Vec<f64> = keywords
        .iter()
        .map(|k| scores.get(k).copied().unwrap_or(0.0))
        .collect();

    let Some(quartiles) = Quartiles::of(&values) else {
        return BTreeMap::new();
    };

    values
        .iter()
        .enumerate()
        .map(|(index, score)| (index, quartiles.tier(*score)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scored(pairs: &[(&str, f64)]) -> (Vec<String>, BTreeMap<String, f64>) {
        let keywords = pairs.iter().map(|(k, _)| k.to_string()).collect();
        let scores = pairs.iter().map(|(k, s)| (k.to_string(), *s)).collect();
        (keywords, scores)
    }

    #[test]
    fn test_percentile_interpolates() {
        let sorted = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(percentile(&sorted, 25.0), 1.75);
        assert_eq!(percentile(&sorted, 50.0), 2.5);
        assert_eq!(percentile(&sorted, 75.0), 3.25);
        assert_eq!(percentile(&sorted, 100.0), 4.0);
        assert_eq!(percentile(&[7.0], 75.0), 7.0);
        assert_eq!(percentile(&[], 50.0), 0.0);
    }

    #[test]
    fn test_classify_quartile_rule() {
        let (keywords, scores) = scored(&[("a", 1.0), ("b", 2.0), ("c", 3.0), ("d", 4.0)]);
        let tiers = classify(&keywords, &scores);
        assert_eq!(tiers[&0], ImportanceTier::Minimal);
        assert_eq!(tiers[&1], ImportanceTier::Low);
        assert_eq!(tiers[&2], ImportanceTier::Medium);
        assert_eq!(tiers[&3], ImportanceTier::High);
    }

    #[test]
    fn test_equal_scores_are_all_high() {
        let (keywords, scores) = scored(&[("a", 0.5), ("b", 0.5), ("c", 0.5)]);
        let tiers = classify(&keywords, &scores);
        assert!(tiers.values().all(|t| *t == ImportanceTier::High));
    }

    #[test]
    fn test_every_keyword_gets_one_tier() {
        let (keywords, scores) = scored(&[
            ("ajuda", 1.6),
            ("precisar", 0.8),
            ("denunciar", 0.58),
            ("querer", 0.58),
            ("violência", 0.58),
        ]);
        let tiers = classify(&keywords, &scores);
        assert_eq!(tiers.len(), keywords.len());
        assert_eq!(tiers[&0], ImportanceTier::High);
        // median and q1 are both 0.58
        assert_eq!(tiers[&4], ImportanceTier::Medium);
    }

    #[test]
    fn test_missing_score_counts_as_zero() {
        let keywords = vec!["ajuda".to_string(), "medo".to_string()];
        let scores = BTreeMap::from([("ajuda".to_string(), 1.0)]);
        let tiers = classify(&keywords, &scores);
        assert_eq!(tiers[&0], ImportanceTier::High);
        assert_eq!(tiers[&1], ImportanceTier::Minimal);
    }

    #[test]
    fn test_empty_keywords() {
        assert!(classify(&[], &BTreeMap::new()).is_empty());
    }

    #[test]
    fn test_tier_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&ImportanceTier::Minimal).unwrap(),
            "\"minimal\""
        );
        assert_eq!(ImportanceTier::High.to_string(), "high");
    }
}
