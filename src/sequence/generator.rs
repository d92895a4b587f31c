//! SequenceGenerator: random reference with a soft run-length cap
//!
//! A base that would complete a run of [`MAX_RUN`] + 1 identical bases is
//! redrawn. After [`MAX_BASE_ATTEMPTS`] draws the last candidate is kept, so
//! generation always terminates; rare longer runs are an accepted relaxation.

use super::nucleotide::BASES;
use crate::random::SeededRandom;
use log::{debug, warn};

/// Longest homopolymer run the generator aims for
pub const MAX_RUN: usize = 3;

/// Draws per position before the run-length rule is relaxed
pub const MAX_BASE_ATTEMPTS: usize = 1000;

/// Generate a reference of `length` bases from `rng`
pub fn generate(length: usize, rng: &mut SeededRandom) -> String {
    let mut seq: Vec<u8> = Vec::with_capacity(length);
    let mut relaxed = 0usize;

    for _ in 0..length {
        let mut base = BASES[rng.next_index(BASES.len())];
        let mut attempts = 1;
        while completes_run(&seq, base) {
            if attempts >= MAX_BASE_ATTEMPTS {
                relaxed += 1;
                break;
            }
            base = BASES[rng.next_index(BASES.len())];
            attempts += 1;
        }
        seq.push(base);
    }

    if relaxed > 0 {
        warn!(
            "Run-length rule relaxed at {} position(s) after {} attempts",
            relaxed, MAX_BASE_ATTEMPTS
        );
    }
    debug!("Generated {}bp reference", length);

    seq.into_iter().map(char::from).collect()
}

fn completes_run(seq: &[u8], candidate: u8) -> bool {
    seq.len() >= MAX_RUN && seq[seq.len() - MAX_RUN..].iter().all(|&b| b == candidate)
}

/// Length of the longest homopolymer run in `seq`
pub(crate) fn longest_run(seq: &str) -> usize {
    let bytes = seq.as_bytes();
    let mut best = 0;
    let mut i = 0;
    while i < bytes.len() {
        let mut j = i + 1;
        while j < bytes.len() && bytes[j] == bytes[i] {
            j += 1;
        }
        best = best.max(j - i);
        i = j;
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sequence::is_valid_dna;

    #[test]
    fn test_generate_length_and_alphabet() {
        let mut rng = SeededRandom::new(2024);
        let seq = generate(120, &mut rng);
        assert_eq!(seq.len(), 120);
        assert!(is_valid_dna(&seq));
    }

    #[test]
    fn test_generate_is_deterministic() {
        let a = generate(200, &mut SeededRandom::new(77));
        let b = generate(200, &mut SeededRandom::new(77));
        let c = generate(200, &mut SeededRandom::new(78));
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_no_long_homopolymers() {
        for seed in 0..50 {
            let seq = generate(500, &mut SeededRandom::new(seed));
            assert!(longest_run(&seq) <= MAX_RUN, "seed {} produced {}", seed, seq);
        }
    }

    #[test]
    fn test_zero_length() {
        assert_eq!(generate(0, &mut SeededRandom::new(1)), "");
    }

    #[test]
    fn test_longest_run() {
        assert_eq!(longest_run("ATTTGCC"), 3);
        assert_eq!(longest_run("A"), 1);
        assert_eq!(longest_run(""), 0);
    }
}
