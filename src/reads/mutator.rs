//! ReadMutator: sequencing errors and reverse-strand reads
//!
//! Errors are single-base substitutions placed strictly outside the declared
//! overlaps, so the bases a player matches across neighbours are never
//! corrupted. Reverse-strand reads only change what is displayed.

use super::read::{Read, ReadSet};
use crate::random::SeededRandom;
use crate::sequence::{reverse_complement, substitute};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

/// How many reads receive each decoration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MutationRequest {
    pub error_reads: usize,
    pub reverse_reads: usize,
}

/// Which reads were decorated, in draw order
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MutationSummary {
    pub error_ids: Vec<usize>,
    pub reverse_ids: Vec<usize>,
}

/// Decorate `reads` in place. Errors are assigned first; reverse strands are
/// drawn from the reads left untouched.
pub fn mutate(reads: &mut ReadSet, request: MutationRequest, rng: &mut SeededRandom) -> MutationSummary {
    let error_ids = choose_error_reads(reads, request.error_reads, rng);
    for &id in &error_ids {
        inject_error(reads, id, rng);
    }

    let untouched: Vec<usize> = (0..reads.len()).filter(|id| !error_ids.contains(id)).collect();
    let reverse_ids = rng.choose_distinct(&untouched, request.reverse_reads);
    for &id in &reverse_ids {
        if let Some(read) = reads.get_mut(id) {
            read.is_reverse = true;
            read.display_seq = reverse_complement(&read.forward_seq);
            debug!("Read #{} shown as reverse complement", id);
        }
    }

    MutationSummary { error_ids, reverse_ids }
}

/// Reads with room outside their overlaps are drawn first; the rest only
/// make up a shortfall. Empty reads have no base to substitute.
fn choose_error_reads(reads: &ReadSet, count: usize, rng: &mut SeededRandom) -> Vec<usize> {
    let (roomy, crowded): (Vec<&Read>, Vec<&Read>) = reads
        .iter()
        .filter(|r| r.length > 0)
        .partition(|r| !r.unprotected_middle().is_empty());
    let roomy: Vec<usize> = roomy.iter().map(|r| r.id).collect();
    let crowded: Vec<usize> = crowded.iter().map(|r| r.id).collect();

    let mut chosen = rng.choose_distinct(&roomy, count);
    if chosen.len() < count {
        chosen.extend(rng.choose_distinct(&crowded, count - chosen.len()));
    }
    chosen
}

fn inject_error(reads: &mut ReadSet, id: usize, rng: &mut SeededRandom) {
    let Some(read) = reads.get_mut(id) else {
        return;
    };
    if read.forward_seq.is_empty() {
        return;
    }

    let middle = read.unprotected_middle();
    let pos = if middle.is_empty() {
        warn!(
            "Read #{} has no base outside its overlaps, mutating midpoint",
            read.id
        );
        read.length / 2
    } else {
        rng.range_inclusive(middle.start, middle.end - 1)
    };

    let mut bytes = read.forward_seq.as_bytes().to_vec();
    let original = bytes[pos];
    bytes[pos] = substitute(original, rng.next_index(3));
    debug!(
        "Read #{}: {} -> {} at offset {}",
        read.id, original as char, bytes[pos] as char, pos
    );

    read.forward_seq = bytes.into_iter().map(char::from).collect();
    read.display_seq = read.forward_seq.clone();
    read.has_error = true;
    read.error_position = Some(pos);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{plan, LayoutRequest};
    use crate::sequence::generate;

    fn read_set(seed: u32) -> (String, ReadSet) {
        let request = LayoutRequest {
            num_reads: 6,
            avg_read_length: 18,
            length_variation: 0.2,
            min_overlap: 6,
            max_overlap: 12,
            reference_length: 60,
        };
        let layout = plan(&request, &mut SeededRandom::new(seed));
        let reference = generate(60, &mut SeededRandom::new(seed ^ 0xFFFF));
        let reads = ReadSet::cut(&reference, &layout);
        (reference, reads)
    }

    #[test]
    fn test_exactly_one_substitution_per_error_read() {
        for seed in 0..100 {
            let (reference, mut reads) = read_set(seed);
            let summary = mutate(
                &mut reads,
                MutationRequest { error_reads: 2, reverse_reads: 0 },
                &mut SeededRandom::new(seed),
            );
            assert_eq!(summary.error_ids.len(), 2);
            for read in &reads {
                let truth = &reference[read.original_start..read.original_start + read.length];
                let diffs = truth
                    .bytes()
                    .zip(read.forward_seq.bytes())
                    .filter(|(a, b)| a != b)
                    .count();
                if summary.error_ids.contains(&read.id) {
                    assert!(read.has_error);
                    assert_eq!(diffs, 1);
                } else {
                    assert!(!read.has_error);
                    assert_eq!(diffs, 0);
                }
            }
        }
    }

    #[test]
    fn test_errors_avoid_overlaps() {
        for seed in 0..200 {
            let (_, mut reads) = read_set(seed);
            mutate(
                &mut reads,
                MutationRequest { error_reads: 2, reverse_reads: 0 },
                &mut SeededRandom::new(seed.wrapping_mul(31)),
            );
            for read in reads.iter().filter(|r| r.has_error) {
                let pos = read.error_position.unwrap();
                assert!(pos >= read.overlap_with_prev);
                assert!(pos < read.length - read.overlap_with_next);
            }
        }
    }

    #[test]
    fn test_reverse_reads_keep_forward_orientation() {
        let (reference, mut reads) = read_set(12);
        let summary = mutate(
            &mut reads,
            MutationRequest { error_reads: 1, reverse_reads: 2 },
            &mut SeededRandom::new(12),
        );
        assert_eq!(summary.reverse_ids.len(), 2);
        for id in &summary.reverse_ids {
            assert!(!summary.error_ids.contains(id));
            let read = reads.get(*id).unwrap();
            assert!(read.is_reverse);
            assert_eq!(
                read.forward_seq,
                &reference[read.original_start..read.original_start + read.length]
            );
            assert_eq!(read.display_seq, reverse_complement(&read.forward_seq));
        }
    }

    #[test]
    fn test_requests_larger_than_set_are_capped() {
        let (_, mut reads) = read_set(3);
        let summary = mutate(
            &mut reads,
            MutationRequest { error_reads: 4, reverse_reads: 4 },
            &mut SeededRandom::new(3),
        );
        assert_eq!(summary.error_ids.len(), 4);
        assert_eq!(summary.reverse_ids.len(), 2);
    }

    #[test]
    fn test_mutation_is_deterministic() {
        let (_, mut a) = read_set(8);
        let (_, mut b) = read_set(8);
        let request = MutationRequest { error_reads: 1, reverse_reads: 1 };
        let sa = mutate(&mut a, request, &mut SeededRandom::new(8));
        let sb = mutate(&mut b, request, &mut SeededRandom::new(8));
        assert_eq!(sa, sb);
        assert_eq!(a, b);
    }
}
