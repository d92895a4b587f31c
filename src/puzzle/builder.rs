//! Puzzle: a reference and its read set, created together from one seed
//!
//! Generation order:
//! 1. plan the layout from the layout stream (lengths only)
//! 2. draw a reference from the sequence stream
//! 3. cut reads and decorate them from a snapshot of the layout stream
//! 4. check that the reads, merged in reference order, rebuild the reference
//!    (up to the injected substitutions); otherwise draw a new reference
//!
//! Step 4 only ever redraws sequence content, so read lengths, overlaps,
//! error offsets and strand assignments are fixed by the seed alone.

use super::level::LevelConfig;
use crate::assembly::{assemble, is_success, similarity};
use crate::error::Result;
use crate::layout::{plan, LayoutPlan};
use crate::random::{fresh_seed, SeededRandom, Stream};
use crate::reads::{mutate, MutationSummary, Read, ReadSet, ReadView};
use crate::sequence::generate;
use log::{info, warn};
use serde::{Deserialize, Serialize};

/// References drawn before accepting one that fails the rebuild check
pub const MAX_REFERENCE_ATTEMPTS: usize = 64;

/// Outcome of merging one ordering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssemblyReport {
    pub assembled: String,
    pub similarity: f64,
    pub success: bool,
}

/// One generated puzzle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Puzzle {
    pub seed: u32,
    pub config: LevelConfig,
    pub reference: String,
    pub layout: LayoutPlan,
    pub reads: ReadSet,
    pub mutations: MutationSummary,
}

impl Puzzle {
    /// Generate the puzzle for `seed` and `config`
    pub fn generate(seed: u32, config: &LevelConfig) -> Result<Self> {
        config.validate()?;

        let mut layout_rng = SeededRandom::for_stream(seed, Stream::Layout);
        let layout = plan(&config.layout_request(), &mut layout_rng);
        let mut sequence_rng = SeededRandom::for_stream(seed, Stream::Sequence);

        let mut attempt = 0;
        let puzzle = loop {
            attempt += 1;
            let reference = generate(config.reference_length, &mut sequence_rng);
            let mut reads = ReadSet::cut(&reference, &layout);
            let mutations = mutate(&mut reads, config.mutation_request(), &mut layout_rng.clone());

            let puzzle = Self {
                seed,
                config: config.clone(),
                reference,
                layout: layout.clone(),
                reads,
                mutations,
            };
            if puzzle.rebuilds_reference() {
                break puzzle;
            }
            if attempt >= MAX_REFERENCE_ATTEMPTS {
                warn!(
                    "Seed {:#010x}: no reference rebuilt cleanly after {} attempts, keeping the last one",
                    seed, attempt
                );
                break puzzle;
            }
        };

        info!(
            "Generated puzzle seed={:#010x} | {}bp | {} reads | errors={:?} reverse={:?}",
            seed,
            puzzle.reference.len(),
            puzzle.reads.len(),
            puzzle.mutations.error_ids,
            puzzle.mutations.reverse_ids
        );
        Ok(puzzle)
    }

    /// Generate from OS entropy
    pub fn generate_fresh(config: &LevelConfig) -> Result<Self> {
        Self::generate(fresh_seed(), config)
    }

    /// Read ids in reference order; always starts with the anchor
    pub fn solution_order(&self) -> Vec<usize> {
        self.reads.in_reference_order().iter().map(|r| r.id).collect()
    }

    pub fn anchor_id(&self) -> usize {
        self.reads.anchor_id().unwrap_or(0)
    }

    pub fn read_views(&self) -> Vec<ReadView> {
        self.reads.views()
    }

    /// The reference with every injected substitution applied: the best any
    /// ordering can assemble
    pub fn expected_assembly(&self) -> String {
        let mut bytes = self.reference.as_bytes().to_vec();
        for read in self.reads.iter().filter(|r| r.has_error) {
            if let Some(offset) = read.error_position {
                let pos = read.original_start + offset;
                if let Some(slot) = bytes.get_mut(pos) {
                    *slot = read.forward_seq.as_bytes()[offset];
                }
            }
        }
        bytes.into_iter().map(char::from).collect()
    }

    /// Merge reads in the order given by `ids` and score the result
    pub fn recompute(&self, ids: &[usize]) -> Result<AssemblyReport> {
        let ordered = self.reads.resolve(ids)?;
        Ok(self.recompute_reads(&ordered))
    }

    /// Merge already-resolved reads and score the result
    pub fn recompute_reads(&self, ordered: &[&Read]) -> AssemblyReport {
        let assembled = assemble(ordered, self.config.overlap_params());
        let similarity = similarity(&assembled, &self.reference);
        let success = is_success(similarity, self.config.tier);
        AssemblyReport {
            assembled,
            similarity,
            success,
        }
    }

    fn rebuilds_reference(&self) -> bool {
        let ordered = self.reads.in_reference_order();
        assemble(&ordered, self.config.overlap_params()) == self.expected_assembly()
    }

    pub fn summary(&self) -> String {
        format!(
            "Puzzle seed={:#010x} | {} | {} reads | errors={} reverse={}",
            self.seed,
            self.config.level.map_or_else(|| "custom".to_string(), |l| format!("level {}", l)),
            self.reads.len(),
            self.mutations.error_ids.len(),
            self.mutations.reverse_ids.len(),
        )
    }
}
