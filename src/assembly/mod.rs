//! Assembly: merging a player's ordering and scoring the result

mod engine;
mod overlap;
mod scorer;

pub use engine::assemble;
pub use overlap::{find_best_overlap, is_ambiguous, OverlapParams};
pub use scorer::{is_success, similarity, SuccessTier, LENIENT_THRESHOLD};
