//! Level configuration: the difficulty presets and custom levels
//!
//! Custom levels are plain JSON in camelCase, e.g.
//!
//! ```json
//! { "referenceLength": 80, "numReads": 5, "avgReadLength": 22,
//!   "lengthVariation": 0.2, "errorReads": 1, "reverseReads": 1,
//!   "minOverlap": 6, "maxOverlap": 12, "tier": "lenient" }
//! ```

use crate::assembly::{OverlapParams, SuccessTier};
use crate::error::{Result, ShotgunError};
use crate::layout::LayoutRequest;
use crate::reads::MutationRequest;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Number of built-in levels
pub const LEVEL_COUNT: u8 = 3;

/// Points awarded per level number on success
pub const POINTS_PER_LEVEL: u32 = 150;

/// Everything needed to generate and judge one puzzle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelConfig {
    /// Preset number, `None` for custom levels
    #[serde(default)]
    pub level: Option<u8>,
    pub reference_length: usize,
    pub num_reads: usize,
    pub avg_read_length: usize,
    #[serde(default)]
    pub length_variation: f64,
    #[serde(default)]
    pub error_reads: usize,
    #[serde(default)]
    pub reverse_reads: usize,
    pub min_overlap: usize,
    pub max_overlap: usize,
    #[serde(default = "default_tier")]
    pub tier: SuccessTier,
    #[serde(default)]
    pub description: String,
}

fn default_tier() -> SuccessTier {
    SuccessTier::Lenient
}

impl LevelConfig {
    /// Built-in preset `level` (1-based)
    pub fn preset(level: u8) -> Result<Self> {
        let config = match level {
            1 => Self {
                level: Some(1),
                reference_length: 40,
                num_reads: 4,
                avg_read_length: 15,
                length_variation: 0.1,
                error_reads: 0,
                reverse_reads: 0,
                min_overlap: 5,
                max_overlap: 9,
                tier: SuccessTier::Strict,
                description: "Basics: no errors, forward strand only, 4 reads".into(),
            },
            2 => Self {
                level: Some(2),
                reference_length: 60,
                num_reads: 6,
                avg_read_length: 18,
                length_variation: 0.2,
                error_reads: 1,
                reverse_reads: 1,
                min_overlap: 6,
                max_overlap: 12,
                tier: SuccessTier::Lenient,
                description: "Applied: 1 error, 1 reverse read, 6 reads".into(),
            },
            3 => Self {
                level: Some(3),
                reference_length: 120,
                num_reads: 6,
                avg_read_length: 30,
                length_variation: 0.25,
                error_reads: 1,
                reverse_reads: 1,
                min_overlap: 8,
                max_overlap: 16,
                tier: SuccessTier::Lenient,
                description: "Practice: long reference, 1 error, 1 reverse read, 6 reads".into(),
            },
            other => return Err(ShotgunError::UnknownLevel(other)),
        };
        Ok(config)
    }

    /// All built-in presets in order
    pub fn presets() -> Vec<Self> {
        (1..=LEVEL_COUNT).filter_map(|l| Self::preset(l).ok()).collect()
    }

    /// Level that follows `level`, wrapping back to the first
    pub fn next_level_number(level: u8) -> u8 {
        if level >= LEVEL_COUNT {
            1
        } else {
            level + 1
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        Self::from_json_str(&data)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject configurations outside the documented ranges
    ///
    /// Anything inside them generates: oversized decoration counts are capped
    /// by the mutator and layouts that cannot fit are relaxed by the planner.
    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: String| -> Result<()> { Err(ShotgunError::InvalidConfig(msg)) };

        if self.num_reads == 0 {
            return invalid("numReads must be at least 1".into());
        }
        if self.reference_length == 0 {
            return invalid("referenceLength must be positive".into());
        }
        if self.min_overlap > self.max_overlap {
            return invalid(format!(
                "minOverlap {} exceeds maxOverlap {}",
                self.min_overlap, self.max_overlap
            ));
        }
        if self.num_reads > 1 && self.max_overlap >= self.avg_read_length {
            return invalid(format!(
                "maxOverlap {} must be below avgReadLength {}",
                self.max_overlap, self.avg_read_length
            ));
        }
        Ok(())
    }

    pub fn layout_request(&self) -> LayoutRequest {
        LayoutRequest {
            num_reads: self.num_reads,
            avg_read_length: self.avg_read_length,
            length_variation: self.length_variation,
            min_overlap: self.min_overlap,
            max_overlap: self.max_overlap,
            reference_length: self.reference_length,
        }
    }

    pub fn mutation_request(&self) -> MutationRequest {
        MutationRequest {
            error_reads: self.error_reads,
            reverse_reads: self.reverse_reads,
        }
    }

    /// Overlap search window used when assembling a player's ordering
    pub fn overlap_params(&self) -> OverlapParams {
        OverlapParams {
            min_overlap: self.min_overlap,
            max_search: self.max_overlap,
        }
    }

    /// Points for solving a puzzle of this level
    pub fn points(&self) -> u32 {
        u32::from(self.level.unwrap_or(1)) * POINTS_PER_LEVEL
    }

    pub fn summary(&self) -> String {
        format!(
            "Level {} | {}bp | {} reads of ~{}bp (±{:.0}%) | overlap {}-{}bp | errors={} reverse={} | {:?}",
            self.level.map_or_else(|| "custom".to_string(), |l| l.to_string()),
            self.reference_length,
            self.num_reads,
            self.avg_read_length,
            self.length_variation * 100.0,
            self.min_overlap,
            self.max_overlap,
            self.error_reads,
            self.reverse_reads,
            self.tier,
        )
    }
}
