//! Error type shared by every layer of the engine
//!
//! Generation and assembly never fail for inputs inside the documented
//! ranges. Errors only surface for malformed level configurations, orderings
//! that break the pinned-anchor rule, and I/O at the CLI boundary.

/// Engine errors
#[derive(Debug, thiserror::Error)]
pub enum ShotgunError {
    #[error("Invalid level configuration: {0}")]
    InvalidConfig(String),

    #[error("Unknown level: {0}")]
    UnknownLevel(u8),

    #[error("Invalid ordering: {0}")]
    InvalidOrdering(String),

    #[error("The anchor read is pinned at position 0")]
    AnchorPinned,

    #[error("Position {index} out of range for {len} reads")]
    PositionOutOfRange { index: usize, len: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Crate-wide result alias
pub type Result<T> = std::result::Result<T, ShotgunError>;
