//! Reference sequences: the nucleotide alphabet and the random generator
//!
//! References are plain `String`s over `{A, T, G, C}`.

mod generator;
mod nucleotide;

pub use generator::{generate, MAX_BASE_ATTEMPTS, MAX_RUN};
pub use nucleotide::{complement, is_valid_dna, reverse_complement, substitute, BASES};
