//! Reads and read sets
//!
//! A read is a contiguous slice of the reference. `forward_seq` always keeps
//! reference orientation and is what assembly consumes; `display_seq` is what
//! the player sees and may be reverse-complemented.

use crate::error::{Result, ShotgunError};
use crate::layout::LayoutPlan;
use log::warn;
use serde::{Deserialize, Serialize};

/// A single fragment of the reference
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Read {
    /// Index of the read in reference order
    pub id: usize,
    pub forward_seq: String,
    pub display_seq: String,
    /// Declared overlap with the read before this one in reference order
    pub overlap_with_prev: usize,
    /// Declared overlap with the read after this one in reference order
    pub overlap_with_next: usize,
    pub is_reverse: bool,
    pub has_error: bool,
    /// Offset of the injected substitution inside the read
    pub error_position: Option<usize>,
    pub original_start: usize,
    pub length: usize,
}

impl Read {
    /// Offsets of the region not covered by either declared overlap
    ///
    /// Empty when the two overlaps meet or cross.
    pub fn unprotected_middle(&self) -> std::ops::Range<usize> {
        let start = self.overlap_with_prev;
        let end = self.length.saturating_sub(self.overlap_with_next);
        if start < end {
            start..end
        } else {
            start..start
        }
    }

    pub fn is_anchor(&self) -> bool {
        self.original_start == 0
    }

    /// Shell-facing projection
    pub fn view(&self) -> ReadView {
        ReadView {
            id: self.id,
            display_sequence: self.display_seq.clone(),
            length: self.length,
            is_reverse: self.is_reverse,
            has_error: self.has_error,
            overlap_with_prev: self.overlap_with_prev,
            overlap_with_next: self.overlap_with_next,
        }
    }

    /// One-line description for log output
    pub fn summary(&self) -> String {
        format!(
            "Read #{} | start={} | len={} | ov={}/{} | {}{}",
            self.id,
            self.original_start,
            self.length,
            self.overlap_with_prev,
            self.overlap_with_next,
            if self.is_reverse { "reverse " } else { "" },
            if self.has_error { "error" } else { "" },
        )
    }
}

/// What the game shell is allowed to see of a read
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadView {
    pub id: usize,
    pub display_sequence: String,
    pub length: usize,
    pub is_reverse: bool,
    pub has_error: bool,
    pub overlap_with_prev: usize,
    pub overlap_with_next: usize,
}

/// All reads of a puzzle, stored in reference order (`reads[i].id == i`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadSet {
    reads: Vec<Read>,
}

impl ReadSet {
    /// Cut undecorated reads out of `reference` following `plan`
    ///
    /// Spans past the reference end are clipped, which only happens for
    /// layouts the planner could not tile exactly.
    pub fn cut(reference: &str, plan: &LayoutPlan) -> Self {
        if !plan.is_exact_tiling() || plan.reference_length != reference.len() {
            warn!(
                "Layout covers {}bp but reference is {}bp; clipping reads to fit",
                plan.covered_length(),
                reference.len()
            );
        }
        let reads = (0..plan.num_reads())
            .map(|i| {
                let span = plan.span(i);
                let end = span.end.min(reference.len());
                let start = span.start.min(end);
                let seq = reference[start..end].to_string();
                Read {
                    id: i,
                    length: seq.len(),
                    display_seq: seq.clone(),
                    forward_seq: seq,
                    overlap_with_prev: plan.overlap_with_prev(i),
                    overlap_with_next: plan.overlap_with_next(i),
                    is_reverse: false,
                    has_error: false,
                    error_position: None,
                    original_start: start,
                }
            })
            .collect();
        Self { reads }
    }

    pub fn len(&self) -> usize {
        self.reads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reads.is_empty()
    }

    pub fn get(&self, id: usize) -> Option<&Read> {
        self.reads.get(id)
    }

    pub(crate) fn get_mut(&mut self, id: usize) -> Option<&mut Read> {
        self.reads.get_mut(id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Read> {
        self.reads.iter()
    }

    /// The read starting at reference position 0
    pub fn anchor(&self) -> Option<&Read> {
        self.reads.iter().find(|r| r.is_anchor())
    }

    pub fn anchor_id(&self) -> Option<usize> {
        self.anchor().map(|r| r.id)
    }

    /// Reads sorted by `original_start`
    pub fn in_reference_order(&self) -> Vec<&Read> {
        let mut ordered: Vec<&Read> = self.reads.iter().collect();
        ordered.sort_by_key(|r| r.original_start);
        ordered
    }

    /// Resolve a list of ids into reads, rejecting anything but a permutation
    pub fn resolve(&self, ids: &[usize]) -> Result<Vec<&Read>> {
        if ids.len() != self.reads.len() {
            return Err(ShotgunError::InvalidOrdering(format!(
                "expected {} read ids, got {}",
                self.reads.len(),
                ids.len()
            )));
        }
        let mut seen = vec![false; self.reads.len()];
        let mut ordered = Vec::with_capacity(ids.len());
        for &id in ids {
            let read = self
                .reads
                .get(id)
                .ok_or_else(|| ShotgunError::InvalidOrdering(format!("unknown read id {}", id)))?;
            if seen[id] {
                return Err(ShotgunError::InvalidOrdering(format!("read id {} repeated", id)));
            }
            seen[id] = true;
            ordered.push(read);
        }
        Ok(ordered)
    }

    pub fn views(&self) -> Vec<ReadView> {
        self.reads.iter().map(Read::view).collect()
    }
}

impl<'a> IntoIterator for &'a ReadSet {
    type Item = &'a Read;
    type IntoIter = std::slice::Iter<'a, Read>;

    fn into_iter(self) -> Self::IntoIter {
        self.reads.iter()
    }
}
