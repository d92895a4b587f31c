//! Shotgun: read generation and overlap assembly for a genome-assembly puzzle
//!
//! A seed and a level produce a reference sequence plus overlapping reads
//! (some mutated, some shown reverse-complemented). Any ordering of those
//! reads can be merged back into a candidate sequence and scored against the
//! reference. Everything is synchronous and deterministic in the seed.

pub mod assembly;
pub mod error;
pub mod layout;
pub mod puzzle;
pub mod random;
pub mod reads;
pub mod sequence;

#[cfg(target_arch = "wasm32")]
mod wasm;

pub use assembly::{assemble, find_best_overlap, similarity, OverlapParams, SuccessTier};
pub use error::{Result, ShotgunError};
pub use layout::{LayoutPlan, LayoutRequest};
pub use puzzle::{AssemblyReport, Fingerprint, LevelConfig, Puzzle, Session};
pub use random::SeededRandom;
pub use reads::{Read, ReadSet, ReadView};

#[cfg(target_arch = "wasm32")]
pub use wasm::ShotgunWebEngine;
