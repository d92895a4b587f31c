//! Read layout: where each read sits on the reference
//!
//! A layout fixes read lengths, pairwise overlaps and start offsets before
//! any sequence content exists.

mod planner;

pub use planner::{plan, LayoutBounds, LayoutPlan, LayoutRequest, MIN_READ_LENGTH};
