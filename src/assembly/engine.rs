//! AssemblyEngine: greedy single-pass merge of an ordered read list
//!
//! Each read is merged onto the running assembly using its `forward_seq`.
//! Display orientation plays no part. When no overlap is found the read is
//! appended whole; nothing is ever inserted between reads.

use super::overlap::{find_best_overlap, OverlapParams};
use crate::reads::Read;
use log::debug;

/// Merge `ordered` left to right into one sequence
pub fn assemble(ordered: &[&Read], params: OverlapParams) -> String {
    let Some((first, rest)) = ordered.split_first() else {
        return String::new();
    };

    let mut assembled = first.forward_seq.clone();
    for read in rest {
        let overlap = find_best_overlap(&assembled, &read.forward_seq, read.overlap_with_prev, params);
        if overlap == 0 {
            debug!("Read #{}: no overlap, concatenating {}bp", read.id, read.length);
        } else {
            debug!(
                "Read #{}: overlap {}bp (declared {}bp)",
                read.id, overlap, read.overlap_with_prev
            );
        }
        assembled.push_str(&read.forward_seq[overlap..]);
    }
    assembled
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::LayoutPlan;
    use crate::reads::ReadSet;
    use crate::sequence::reverse_complement;

    const REFERENCE: &str = "ATCGGTTACG";

    fn reads() -> ReadSet {
        let plan = LayoutPlan {
            lengths: vec![6, 6],
            overlaps: vec![2],
            starts: vec![0, 4],
            reference_length: 10,
        };
        ReadSet::cut(REFERENCE, &plan)
    }

    fn params() -> OverlapParams {
        OverlapParams { min_overlap: 2, max_search: 4 }
    }

    #[test]
    fn test_reference_order_round_trip() {
        let set = reads();
        let ordered = set.in_reference_order();
        assert_eq!(assemble(&ordered, params()), REFERENCE);
    }

    #[test]
    fn test_wrong_order_concatenates() {
        let set = reads();
        let ordered = set.resolve(&[1, 0]).unwrap();
        // "GTTACG" then "ATCGGT": no suffix/prefix match of 2..=4
        assert_eq!(assemble(&ordered, params()), "GTTACGATCGGT");
    }

    #[test]
    fn test_display_orientation_is_ignored() {
        let mut set = reads();
        let read = set.get_mut(1).unwrap();
        read.is_reverse = true;
        read.display_seq = reverse_complement(&read.forward_seq);
        let ordered = set.in_reference_order();
        assert_eq!(assemble(&ordered, params()), REFERENCE);
    }

    #[test]
    fn test_single_and_empty() {
        let set = reads();
        let first = set.get(0).unwrap();
        assert_eq!(assemble(&[first], params()), "ATCGGT");
        assert_eq!(assemble(&[], params()), "");
    }
}
