//! Gestalt pattern matching (Ratcliff/Obershelp) over characters

/// Similarity in [0, 1]: `2 * M / (len(a) + len(b))`, where `M` counts the
/// characters in matching blocks found by recursively taking the longest
/// common substring and repeating on both sides of it.
pub fn similarity_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    2.0 * matching_characters(&a, &b) as f64 / total as f64
}

fn matching_characters(a: &[char], b: &[char]) -> usize {
    let mut matched = 0;
    let mut pending = vec![(0, a.len(), 0, b.len())];
    while let Some((a_lo, a_hi, b_lo, b_hi)) = pending.pop() {
        let (i, j, size) = longest_common_block(&a[a_lo..a_hi], &b[b_lo..b_hi]);
        if size == 0 {
            continue;
        }
        matched += size;
        let (i, j) = (a_lo + i, b_lo + j);
        if a_lo < i && b_lo < j {
            pending.push((a_lo, i, b_lo, j));
        }
        if i + size < a_hi && j + size < b_hi {
            pending.push((i + size, a_hi, j + size, b_hi));
        }
    }
    matched
}

/// Longest common substring as `(start_in_a, start_in_b, len)`.
/// Ties go to the block ending earliest in `a`, then earliest in `b`.
fn longest_common_block(a: &[char], b: &[char]) -> (usize, usize, usize) {
    let mut best = (0, 0, 0);
    let mut previous = vec![0usize; b.len() + 1];
    let mut current = vec![0usize; b.len() + 1];
    for (i, ca) in a.iter().enumerate() {
        for (j, cb) in b.iter().enumerate() {
            current[j + 1] = if ca == cb { previous[j] + 1 } else { 0 };
            let run = current[j + 1];
            if run > best.2 {
                best = (i + 1 - run, j + 1 - run, run);
            }
        }
        std::mem::swap(&mut previous, &mut current);
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_identical_and_empty() {
        assert!(approx(similarity_ratio("ajuda", "ajuda"), 1.0));
        assert!(approx(similarity_ratio("", ""), 1.0));
        assert!(approx(similarity_ratio("ajuda", ""), 0.0));
    }

    #[test]
    fn test_disjoint() {
        assert!(approx(similarity_ratio("abc", "xyz"), 0.0));
    }

    #[test]
    fn test_known_ratios() {
        // "abcd" / "bcde": one block "bcd"
        assert!(approx(similarity_ratio("abcd", "bcde"), 0.75));
        // plural differs by one trailing character
        assert!(approx(similarity_ratio("violência", "violências"), 18.0 / 19.0));
        // prefix match
        assert!(approx(similarity_ratio("denunciar", "denuncia"), 16.0 / 17.0));
    }

    #[test]
    fn test_recurses_on_both_sides() {
        // "ab" and "cd" both match around the differing middle
        assert!(approx(similarity_ratio("abXcd", "abYcd"), 0.8));
    }

    #[test]
    fn test_symmetric_on_simple_pairs() {
        for (a, b) in [("medo", "mede"), ("casa", "casas"), ("ajuda", "ajudar")] {
            assert!(approx(similarity_ratio(a, b), similarity_ratio(b, a)));
        }
    }

    #[test]
    fn test_counts_characters_not_bytes() {
        assert!(approx(similarity_ratio("ação", "açao"), 0.75));
    }
}
