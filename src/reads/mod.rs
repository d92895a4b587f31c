//! Reads: fragments of the reference and their decorations

mod mutator;
mod read;

pub use mutator::{mutate, MutationRequest, MutationSummary};
pub use read::{Read, ReadSet, ReadView};
