//! Fuzzy matching utilities
//!
//! Ranks catalog names by similarity to a spoken name so unmatched cart
//! lines can be offered "did you mean" candidates.

use strsim::normalized_levenshtein;

/// Result of a fuzzy match with the candidate position and score
#[derive(Debug, Clone, PartialEq)]
pub struct FuzzyMatch {
    pub index: usize,
    pub value: String,
    pub score: f64,
}

/// Find matches in a list of candidates
///
/// Returns up to `n` matches with scores at or above `cutoff`, best first.
/// Equal scores keep candidate order.
pub fn find_matches(search_term: &str, candidates: &[&str], n: usize, cutoff: f64) -> Vec<FuzzyMatch> {
    let search_lower = search_term.trim().to_lowercase();

    let mut matches: Vec<FuzzyMatch> = Vec::new();

    // 1. Exact matches first
    for (index, candidate) in candidates.iter().enumerate() {
        if candidate.trim().to_lowercase() == search_lower {
            matches.push(FuzzyMatch {
                index,
                value: candidate.to_string(),
                score: 1.0,
            });
        }
    }

    // 2. Fuzzy match using normalized_levenshtein
    for (index, candidate) in candidates.iter().enumerate() {
        if matches.iter().any(|m| m.index == index) {
            continue;
        }

        let score = similarity(&search_lower, candidate);
        if score >= cutoff {
            matches.push(FuzzyMatch {
                index,
                value: candidate.to_string(),
                score,
            });
        }
    }

    // 3. Sort by score descending (stable, so ties keep catalog order)
    matches.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.index.cmp(&b.index))
    });

    matches.truncate(n);
    matches
}

/// Calculate similarity score between two strings
pub fn similarity(a: &str, b: &str) -> f64 {
    normalized_levenshtein(&a.trim().to_lowercase(), &b.trim().to_lowercase())
}
