//! Puzzle: levels, generation, fingerprints and the player session
//!
//! A puzzle = reference + read set, built atomically from a seed and a level.
//! A session wraps one puzzle with the presentation order the player edits.

mod builder;
mod fingerprint;
mod level;
mod session;

pub use builder::{AssemblyReport, Puzzle, MAX_REFERENCE_ATTEMPTS};
pub use fingerprint::Fingerprint;
pub use level::{LevelConfig, LEVEL_COUNT, POINTS_PER_LEVEL};
pub use session::Session;
