//! ReadLayoutPlanner: read lengths and overlaps that exactly tile a reference
//!
//! The planner never looks at sequence content. It works purely on lengths,
//! so the layout can be fixed before the reference is drawn.
//!
//! Tiling identity: `sum(lengths) - sum(overlaps) == reference_length`.
//! Infeasible requests are repaired deterministically: deficits always extend
//! the last read, excesses shrink reads from the last one backward. When even
//! reads at the length floor cannot fit, the floor (and then the overlap cap)
//! is lowered just enough to tile; see [`LayoutRequest::bounds`].

use crate::random::SeededRandom;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

/// Absolute lower bound on a read's length
pub const MIN_READ_LENGTH: usize = 10;

/// Parameters the planner needs from a level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutRequest {
    pub num_reads: usize,
    pub avg_read_length: usize,
    pub length_variation: f64,
    pub min_overlap: usize,
    pub max_overlap: usize,
    pub reference_length: usize,
}

impl LayoutRequest {
    /// Shortest length any read may be shrunk to
    ///
    /// Reads must stay longer than the largest overlap they can take part in,
    /// otherwise a read could sit entirely inside its neighbour.
    pub fn length_floor(&self) -> usize {
        if self.num_reads <= 1 {
            return 1;
        }
        MIN_READ_LENGTH.max(self.max_overlap + 1)
    }

    /// Whether reads at the length floor can tile the reference within
    /// `max_overlap`
    pub fn is_feasible(&self) -> bool {
        self.num_reads <= 1
            || self.num_reads * self.length_floor()
                <= self.reference_length + self.slots() * self.max_overlap
    }

    /// Floor and overlap bounds the planner works with
    ///
    /// Equal to the requested ones whenever the request is feasible. Otherwise
    /// the floor drops to the largest value that still tiles, keeping reads
    /// strictly longer than any overlap. If that needs a floor at or below
    /// `max_overlap`, the overlap cap becomes `floor - 1` and `min_overlap` is
    /// capped to it. A reference shorter than the read count cannot be tiled
    /// at all; the bounds then collapse to 1bp reads with no overlap.
    pub fn bounds(&self) -> LayoutBounds {
        let requested = LayoutBounds {
            floor: self.length_floor(),
            min_overlap: self.min_overlap,
            max_overlap: self.max_overlap,
        };
        if self.is_feasible() {
            return requested;
        }

        let n = self.num_reads;
        let r = self.reference_length;
        let widest = (r + self.slots() * self.max_overlap) / n;
        if widest > self.max_overlap {
            return LayoutBounds {
                floor: widest,
                ..requested
            };
        }

        let floor = (r + 1).saturating_sub(n).max(1);
        let max_overlap = floor - 1;
        LayoutBounds {
            floor,
            min_overlap: self.min_overlap.min(max_overlap),
            max_overlap,
        }
    }

    fn slots(&self) -> usize {
        self.num_reads.saturating_sub(1)
    }
}

/// Effective length floor and overlap range for one plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutBounds {
    pub floor: usize,
    pub min_overlap: usize,
    pub max_overlap: usize,
}

/// Result of planning: one entry per read, plus one overlap per adjacent pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutPlan {
    pub lengths: Vec<usize>,
    /// `overlaps[i]` is shared by read `i` and read `i + 1`
    pub overlaps: Vec<usize>,
    pub starts: Vec<usize>,
    pub reference_length: usize,
}

impl LayoutPlan {
    pub fn num_reads(&self) -> usize {
        self.lengths.len()
    }

    /// Overlap with the reference-order predecessor of read `i`
    pub fn overlap_with_prev(&self, i: usize) -> usize {
        if i == 0 {
            0
        } else {
            self.overlaps.get(i - 1).copied().unwrap_or(0)
        }
    }

    /// Overlap with the reference-order successor of read `i`
    pub fn overlap_with_next(&self, i: usize) -> usize {
        self.overlaps.get(i).copied().unwrap_or(0)
    }

    /// End offset (exclusive) of read `i`
    pub fn end(&self, i: usize) -> usize {
        self.starts[i] + self.lengths[i]
    }

    /// `sum(lengths) - sum(overlaps)`; equals the reference length for a valid plan
    pub fn covered_length(&self) -> usize {
        let total: usize = self.lengths.iter().sum();
        let shared: usize = self.overlaps.iter().sum();
        total.saturating_sub(shared)
    }

    /// Every read lies inside the reference and the tiling identity holds
    pub fn is_exact_tiling(&self) -> bool {
        let n = self.num_reads();
        n > 0
            && self.starts[0] == 0
            && self.end(n - 1) == self.reference_length
            && self.covered_length() == self.reference_length
            && (0..n).all(|i| self.end(i) <= self.reference_length)
    }

    /// Half-open reference range of read `i`
    pub fn span(&self, i: usize) -> std::ops::Range<usize> {
        self.starts[i]..self.end(i)
    }
}

/// Plan a layout for `request`, drawing every random choice from `rng`
pub fn plan(request: &LayoutRequest, rng: &mut SeededRandom) -> LayoutPlan {
    let r = request.reference_length;
    if request.num_reads <= 1 {
        debug!("Single-read layout covering {}bp", r);
        return LayoutPlan {
            lengths: vec![r],
            overlaps: Vec::new(),
            starts: vec![0],
            reference_length: r,
        };
    }

    let bounds = request.bounds();
    if !request.is_feasible() {
        warn!(
            "{} reads of at least {}bp cannot tile {}bp with overlaps up to {}bp; relaxing to {:?}",
            request.num_reads,
            request.length_floor(),
            r,
            request.max_overlap,
            bounds
        );
    }
    let floor = bounds.floor;
    let mut lengths = draw_lengths(request, floor, rng);
    let overlap_sum = reconcile_lengths(request, &bounds, &mut lengths);
    let overlaps = distribute_overlaps(request.slots(), &bounds, overlap_sum, rng);
    let starts = cumulative_starts(&lengths, &overlaps);

    let mut plan = LayoutPlan {
        lengths,
        overlaps,
        starts,
        reference_length: r,
    };
    patch_tail(&mut plan, floor);

    debug!(
        "Layout: lengths={:?} overlaps={:?} starts={:?}",
        plan.lengths, plan.overlaps, plan.starts
    );
    plan
}

fn draw_lengths(request: &LayoutRequest, floor: usize, rng: &mut SeededRandom) -> Vec<usize> {
    (0..request.num_reads)
        .map(|_| {
            let jitter = rng.next_jitter(request.length_variation);
            let raw = (request.avg_read_length as f64 * (1.0 + jitter)).floor();
            // no read ever needs to exceed the reference
            let cap = request.reference_length.max(floor) as f64;
            (raw.clamp(0.0, cap) as usize).max(floor)
        })
        .collect()
}

/// Adjust `lengths` until the required overlap sum fits the feasible range.
/// Returns the overlap sum to distribute.
fn reconcile_lengths(request: &LayoutRequest, bounds: &LayoutBounds, lengths: &mut [usize]) -> usize {
    let r = request.reference_length as i64;
    let floor = bounds.floor;
    let last = lengths.len() - 1;

    let mut required = total_length(lengths) - r;
    if required < 0 {
        debug!("Reads short of reference by {}bp, extending last read", -required);
        lengths[last] += (-required) as usize;
    }

    for len in lengths.iter_mut() {
        if *len < floor {
            *len = floor;
        }
    }
    required = total_length(lengths) - r;

    let slots = request.slots() as i64;
    let lo = slots * bounds.min_overlap as i64;
    let hi = slots * bounds.max_overlap as i64;

    if required < lo {
        debug!("Overlap sum {} below {}, extending last read", required, lo);
        lengths[last] += (lo - required) as usize;
        required = lo;
    } else if required > hi {
        let mut excess = (required - hi) as usize;
        for len in lengths.iter_mut().rev() {
            if excess == 0 {
                break;
            }
            let cut = excess.min(len.saturating_sub(floor));
            *len -= cut;
            excess -= cut;
        }
        required = total_length(lengths) - r;
        if required > hi {
            warn!(
                "Reads cannot shrink further; clamping overlap sum {} to {}",
                required, hi
            );
            required = hi;
        }
    }

    required.max(0) as usize
}

fn total_length(lengths: &[usize]) -> i64 {
    lengths.iter().sum::<usize>() as i64
}

/// Split `total` over the slots, each within `[min_overlap, max_overlap]`
fn distribute_overlaps(slots: usize, bounds: &LayoutBounds, total: usize, rng: &mut SeededRandom) -> Vec<usize> {
    let (min_o, max_o) = (bounds.min_overlap, bounds.max_overlap);
    let mut remaining = total;
    let mut overlaps = Vec::with_capacity(slots);

    for slot in 0..slots {
        let left_after = slots - slot - 1;
        let lo = min_o.max(remaining.saturating_sub(max_o * left_after));
        let hi = max_o.min(remaining.saturating_sub(min_o * left_after));
        let value = rng.range_inclusive(lo, hi.max(lo));
        overlaps.push(value);
        remaining = remaining.saturating_sub(value);
    }
    overlaps
}

fn cumulative_starts(lengths: &[usize], overlaps: &[usize]) -> Vec<usize> {
    let mut starts = Vec::with_capacity(lengths.len());
    starts.push(0);
    for i in 1..lengths.len() {
        let prev = starts[i - 1] + lengths[i - 1];
        starts.push(prev.saturating_sub(overlaps[i - 1]));
    }
    starts
}

/// Make the last read end exactly at the reference end
fn patch_tail(plan: &mut LayoutPlan, floor: usize) {
    let last = plan.num_reads() - 1;
    let r = plan.reference_length;
    let end = plan.end(last);

    if end < r {
        debug!("Extending last read by {}bp to reach the reference end", r - end);
        plan.lengths[last] += r - end;
    } else if end > r {
        let target = (r - plan.starts[last].min(r)).max(floor);
        warn!(
            "Last read overshoots reference by {}bp, shrinking to {}bp",
            end - r,
            target
        );
        plan.lengths[last] = target.min(plan.lengths[last]);
    }
}
