//! OverlapMatcher: longest unambiguous suffix/prefix match
//!
//! A match is ambiguous when its content is too repetitive to tell which
//! adjacency produced it: a homopolymer of 3+ bases, or a 2-base period
//! repeated for at least 3 full periods.

use serde::{Deserialize, Serialize};

/// Shortest homopolymer treated as ambiguous
pub const AMBIGUOUS_HOMOPOLYMER: usize = 3;
/// Shortest dinucleotide repeat treated as ambiguous
pub const AMBIGUOUS_DINUCLEOTIDE: usize = 6;

/// Search window for [`find_best_overlap`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverlapParams {
    pub min_overlap: usize,
    pub max_search: usize,
}

impl Default for OverlapParams {
    fn default() -> Self {
        Self {
            min_overlap: 3,
            max_search: usize::MAX,
        }
    }
}

/// True when `candidate` is too repetitive to identify an adjacency
pub fn is_ambiguous(candidate: &[u8]) -> bool {
    let Some(&first) = candidate.first() else {
        return false;
    };
    if candidate.len() >= AMBIGUOUS_HOMOPOLYMER && candidate.iter().all(|&b| b == first) {
        return true;
    }
    candidate.len() >= AMBIGUOUS_DINUCLEOTIDE
        && candidate.iter().enumerate().all(|(i, &b)| b == candidate[i % 2])
}

fn suffix_matches_prefix(prev: &[u8], curr: &[u8], k: usize) -> bool {
    k <= prev.len() && k <= curr.len() && prev[prev.len() - k..] == curr[..k]
}

/// Length of the best overlap between the end of `prev` and the start of `curr`
///
/// `declared` is tried first and wins outright when it matches cleanly.
/// Otherwise the longest clean match in `[min_overlap, max_search]` is
/// returned, then the longest ambiguous one, then 0.
pub fn find_best_overlap(prev: &str, curr: &str, declared: usize, params: OverlapParams) -> usize {
    let prev = prev.as_bytes();
    let curr = curr.as_bytes();
    let min_k = params.min_overlap.max(1);

    if declared >= min_k
        && declared <= params.max_search
        && suffix_matches_prefix(prev, curr, declared)
        && !is_ambiguous(&curr[..declared])
    {
        return declared;
    }

    let longest = prev.len().min(curr.len()).min(params.max_search);
    let mut fallback = 0;
    for k in (min_k..=longest).rev() {
        if !suffix_matches_prefix(prev, curr, k) {
            continue;
        }
        if !is_ambiguous(&curr[..k]) {
            return k;
        }
        if fallback == 0 {
            fallback = k;
        }
    }
    fallback
}
