//! Fingerprint: a SHA-256 hash chain over a generated puzzle
//!
//! Two runs with the same seed and level must produce the same fingerprint.
//! The chain starts from the seed and level, folds in the reference, then
//! every read's placement and decorations in reference order.

use super::builder::Puzzle;
use crate::reads::Read;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Hash chain over one puzzle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fingerprint {
    /// Hash of the seed, level number, success tier and generation parameters
    pub genesis_hash: String,
    /// Hash of the reference sequence
    pub reference_hash: String,
    /// Chained hash after each read, in reference order
    pub read_hashes: Vec<String>,
    /// Final link of the chain
    pub root_hash: String,
}

impl Fingerprint {
    pub fn of(puzzle: &Puzzle) -> Self {
        let c = &puzzle.config;
        let genesis_hash = hash_str(&format!(
            "genesis:{}:{:?}:{:?}:{}:{}:{}:{}:{}:{}:{}:{}",
            puzzle.seed,
            c.level,
            c.tier,
            c.reference_length,
            c.num_reads,
            c.avg_read_length,
            c.length_variation,
            c.error_reads,
            c.reverse_reads,
            c.min_overlap,
            c.max_overlap,
        ));
        let reference_hash = hash_str(&puzzle.reference);

        let mut link = hash_str(&format!("{}:{}", genesis_hash, reference_hash));
        let mut read_hashes = Vec::with_capacity(puzzle.reads.len());
        for read in puzzle.reads.in_reference_order() {
            link = hash_str(&format!("{}:{}", link, read_digest_input(read)));
            read_hashes.push(link.clone());
        }

        Self {
            genesis_hash,
            reference_hash,
            read_hashes,
            root_hash: link,
        }
    }

    /// Recompute the chain for `puzzle` and compare
    pub fn verify(&self, puzzle: &Puzzle) -> bool {
        Self::of(puzzle) == *self
    }

    /// First 16 hex digits of the root, for display
    pub fn short(&self) -> &str {
        &self.root_hash[..16.min(self.root_hash.len())]
    }
}

fn read_digest_input(read: &Read) -> String {
    format!(
        "{}:{}:{}:{}:{}:{}:{}:{:?}:{}",
        read.id,
        read.original_start,
        read.length,
        read.overlap_with_prev,
        read.overlap_with_next,
        read.is_reverse,
        read.has_error,
        read.error_position,
        read.forward_seq,
    )
}

fn hash_str(s: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(s.as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assembly::SuccessTier;
    use crate::puzzle::LevelConfig;

    #[test]
    fn test_same_seed_same_fingerprint() {
        let config = LevelConfig::preset(2).unwrap();
        let a = Fingerprint::of(&Puzzle::generate(2718, &config).unwrap());
        let b = Fingerprint::of(&Puzzle::generate(2718, &config).unwrap());
        assert_eq!(a, b);
        assert_eq!(a.root_hash.len(), 64);
        assert_eq!(a.read_hashes.len(), config.num_reads);
        assert_eq!(a.short().len(), 16);
    }

    #[test]
    fn test_fingerprint_changes_with_seed_and_level() {
        let l2 = LevelConfig::preset(2).unwrap();
        let l3 = LevelConfig::preset(3).unwrap();
        let a = Fingerprint::of(&Puzzle::generate(1, &l2).unwrap());
        let b = Fingerprint::of(&Puzzle::generate(2, &l2).unwrap());
        let c = Fingerprint::of(&Puzzle::generate(1, &l3).unwrap());
        assert_ne!(a.root_hash, b.root_hash);
        assert_ne!(a.root_hash, c.root_hash);
    }

    #[test]
    fn test_fingerprint_covers_level_and_tier() {
        let lenient = LevelConfig::preset(2).unwrap();
        let mut strict = lenient.clone();
        strict.tier = SuccessTier::Strict;
        let mut custom = lenient.clone();
        custom.level = None;

        let a = Fingerprint::of(&Puzzle::generate(31, &lenient).unwrap());
        let b = Fingerprint::of(&Puzzle::generate(31, &strict).unwrap());
        let c = Fingerprint::of(&Puzzle::generate(31, &custom).unwrap());
        assert_eq!(a.reference_hash, b.reference_hash);
        assert_ne!(a.genesis_hash, b.genesis_hash);
        assert_ne!(a.root_hash, b.root_hash);
        assert_ne!(a.root_hash, c.root_hash);
    }

    #[test]
    fn test_verify_detects_tampering() {
        let config = LevelConfig::preset(3).unwrap();
        let mut puzzle = Puzzle::generate(161, &config).unwrap();
        let fp = Fingerprint::of(&puzzle);
        assert!(fp.verify(&puzzle));

        puzzle.reference.replace_range(0..1, if puzzle.reference.starts_with('A') { "C" } else { "A" });
        assert!(!fp.verify(&puzzle));
    }
}
