//! SimilarityScorer: position-wise agreement with the reference

use serde::{Deserialize, Serialize};

/// Threshold used by lenient levels
pub const LENIENT_THRESHOLD: f64 = 0.95;

/// How strictly a level judges the assembled sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuccessTier {
    /// Every base must match
    Strict,
    /// At least [`LENIENT_THRESHOLD`] of the bases must match
    Lenient,
}

impl SuccessTier {
    pub fn threshold(self) -> f64 {
        match self {
            SuccessTier::Strict => 1.0,
            SuccessTier::Lenient => LENIENT_THRESHOLD,
        }
    }
}

/// Fraction of reference positions the assembly reproduces
///
/// Positions beyond the shorter of the two strings count as mismatches; the
/// denominator is always the reference length. An empty reference scores 0.
pub fn similarity(assembled: &str, target: &str) -> f64 {
    if target.is_empty() {
        return 0.0;
    }
    let matches = assembled
        .bytes()
        .zip(target.bytes())
        .filter(|(a, b)| a == b)
        .count();
    matches as f64 / target.len() as f64
}

/// Whether `similarity` clears the bar for `tier`
pub fn is_success(similarity: f64, tier: SuccessTier) -> bool {
    match tier {
        SuccessTier::Strict => similarity == 1.0,
        SuccessTier::Lenient => similarity >= LENIENT_THRESHOLD,
    }
}
