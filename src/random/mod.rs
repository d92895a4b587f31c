//! Seeded randomness for puzzle generation
//!
//! Every random decision in a puzzle is drawn from a [`SeededRandom`] stream.
//! One base seed fans out into independent streams, one per generation stage,
//! so that changing how one stage consumes randomness never perturbs another.

mod lcg;

pub use lcg::{fresh_seed, SeededRandom, Stream};
