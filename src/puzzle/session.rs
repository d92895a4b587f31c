//! Session: the state a game shell holds between player actions
//!
//! A session owns one puzzle and the current presentation order. Every change
//! to the order immediately re-runs assembly and scoring; there is no other
//! derived state to keep in sync.

use super::builder::{AssemblyReport, Puzzle};
use super::fingerprint::Fingerprint;
use super::level::LevelConfig;
use crate::error::{Result, ShotgunError};
use crate::random::{fresh_seed, SeededRandom, Stream};
use crate::reads::ReadView;
use log::{debug, info};

#[derive(Debug, Clone)]
pub struct Session {
    puzzle: Puzzle,
    initial_order: Vec<usize>,
    order: Vec<usize>,
    report: AssemblyReport,
    reveal_reference: bool,
    score: u32,
    solved: bool,
}

impl Session {
    /// Start preset `level` with `seed`
    pub fn new(level: u8, seed: u32) -> Result<Self> {
        Self::with_config(LevelConfig::preset(level)?, seed)
    }

    /// Start preset `level` from OS entropy
    pub fn fresh(level: u8) -> Result<Self> {
        Self::new(level, fresh_seed())
    }

    /// Start a session on an arbitrary level configuration
    pub fn with_config(config: LevelConfig, seed: u32) -> Result<Self> {
        let puzzle = Puzzle::generate(seed, &config)?;
        let initial_order = presentation_order(&puzzle);
        let report = puzzle.recompute(&initial_order)?;
        let mut session = Self {
            puzzle,
            order: initial_order.clone(),
            initial_order,
            report,
            reveal_reference: false,
            score: 0,
            solved: false,
        };
        session.award_if_solved();
        Ok(session)
    }

    pub fn puzzle(&self) -> &Puzzle {
        &self.puzzle
    }

    pub fn config(&self) -> &LevelConfig {
        &self.puzzle.config
    }

    pub fn seed(&self) -> u32 {
        self.puzzle.seed
    }

    /// Current presentation order as read ids
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    /// Reads in presentation order, as the shell should show them
    pub fn ordered_views(&self) -> Vec<ReadView> {
        self.order
            .iter()
            .filter_map(|&id| self.puzzle.reads.get(id).map(|r| r.view()))
            .collect()
    }

    pub fn report(&self) -> &AssemblyReport {
        &self.report
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// True once the current puzzle has reached success at least once
    pub fn is_solved(&self) -> bool {
        self.solved
    }

    pub fn fingerprint(&self) -> Fingerprint {
        Fingerprint::of(&self.puzzle)
    }

    pub fn set_reveal(&mut self, reveal: bool) {
        self.reveal_reference = reveal;
    }

    pub fn toggle_reveal(&mut self) -> bool {
        self.reveal_reference = !self.reveal_reference;
        self.reveal_reference
    }

    /// The reference, when the player has asked to see it
    pub fn visible_reference(&self) -> Option<&str> {
        self.reveal_reference.then_some(self.puzzle.reference.as_str())
    }

    /// Replace the whole order. The anchor must stay first.
    pub fn reorder(&mut self, ids: &[usize]) -> Result<&AssemblyReport> {
        if ids.first() != Some(&self.puzzle.anchor_id()) {
            return Err(ShotgunError::AnchorPinned);
        }
        self.puzzle.reads.resolve(ids)?;
        self.order = ids.to_vec();
        self.refresh()
    }

    /// Move the read at position `from` to position `to`, shifting the reads
    /// in between, as a drag and drop would.
    pub fn move_read(&mut self, from: usize, to: usize) -> Result<&AssemblyReport> {
        let len = self.order.len();
        for index in [from, to] {
            if index >= len {
                return Err(ShotgunError::PositionOutOfRange { index, len });
            }
        }
        if from == 0 || to == 0 {
            return Err(ShotgunError::AnchorPinned);
        }
        if from != to {
            let id = self.order.remove(from);
            self.order.insert(to, id);
            debug!("Moved read #{} from {} to {}", id, from, to);
        }
        self.refresh()
    }

    /// Back to the order the puzzle was first presented in
    pub fn reset(&mut self) -> Result<&AssemblyReport> {
        self.order = self.initial_order.clone();
        self.refresh()
    }

    /// Discard the puzzle and start the same level with a new seed
    pub fn regenerate(&mut self, seed: u32) -> Result<()> {
        let score = self.score;
        *self = Self::with_config(self.puzzle.config.clone(), seed)?;
        self.score += score;
        Ok(())
    }

    /// Advance to the next preset level (wrapping), keeping the score.
    /// Custom levels restart at level 1.
    pub fn next_level(&mut self, seed: u32) -> Result<()> {
        let next = self
            .puzzle
            .config
            .level
            .map_or(1, LevelConfig::next_level_number);
        let score = self.score;
        *self = Self::new(next, seed)?;
        self.score += score;
        Ok(())
    }

    fn refresh(&mut self) -> Result<&AssemblyReport> {
        self.report = self.puzzle.recompute(&self.order)?;
        self.award_if_solved();
        Ok(&self.report)
    }

    fn award_if_solved(&mut self) {
        if self.report.success && !self.solved {
            self.solved = true;
            self.score += self.puzzle.config.points();
            info!(
                "Solved seed={:#010x} with similarity {:.3}, score now {}",
                self.puzzle.seed, self.report.similarity, self.score
            );
        }
    }
}

/// Anchor first, the rest shuffled from the order stream. A shuffle that
/// happens to reproduce the solution is rotated once.
fn presentation_order(puzzle: &Puzzle) -> Vec<usize> {
    let solution = puzzle.solution_order();
    let anchor = puzzle.anchor_id();
    let mut rest: Vec<usize> = solution.iter().copied().filter(|&id| id != anchor).collect();

    let mut rng = SeededRandom::for_stream(puzzle.seed, Stream::Order);
    rng.shuffle(&mut rest);
    if rest.len() > 1 && rest[..] == solution[1..] {
        rest.rotate_left(1);
    }

    let mut order = Vec::with_capacity(solution.len());
    order.push(anchor);
    order.extend(rest);
    order
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anchor_presented_first() {
        for seed in 0..50 {
            let session = Session::new(2, seed).unwrap();
            assert_eq!(session.order()[0], session.puzzle().anchor_id());
            assert_eq!(session.order().len(), 6);
            assert!(session.ordered_views()[0].id == session.puzzle().anchor_id());
        }
    }

    #[test]
    fn test_initial_order_is_not_the_solution() {
        for seed in 0..50 {
            let session = Session::new(1, seed).unwrap();
            assert_ne!(session.order(), session.puzzle().solution_order().as_slice());
        }
    }

    #[test]
    fn test_presentation_is_deterministic() {
        let a = Session::new(3, 555).unwrap();
        let b = Session::new(3, 555).unwrap();
        assert_eq!(a.order(), b.order());
        assert_eq!(a.report(), b.report());
    }

    #[test]
    fn test_solving_awards_points_once() {
        let mut session = Session::new(2, 808).unwrap();
        let solution = session.puzzle().solution_order();
        let report = session.reorder(&solution).unwrap();
        assert!(report.success);
        assert_eq!(session.score(), 300);
        assert!(session.is_solved());

        session.reset().unwrap();
        session.reorder(&solution).unwrap();
        assert_eq!(session.score(), 300);
    }

    #[test]
    fn test_anchor_is_pinned() {
        let mut session = Session::new(1, 42).unwrap();
        let mut order = session.order().to_vec();
        order.swap(0, 1);
        assert!(matches!(session.reorder(&order), Err(ShotgunError::AnchorPinned)));
        assert!(matches!(session.move_read(0, 2), Err(ShotgunError::AnchorPinned)));
        assert!(matches!(session.move_read(2, 0), Err(ShotgunError::AnchorPinned)));
        assert!(matches!(
            session.move_read(1, 9),
            Err(ShotgunError::PositionOutOfRange { index: 9, len: 4 })
        ));
    }

    #[test]
    fn test_move_read_splices() {
        let mut session = Session::new(2, 77).unwrap();
        let before = session.order().to_vec();
        session.move_read(1, 4).unwrap();
        let after = session.order().to_vec();
        assert_eq!(after[0], before[0]);
        assert_eq!(after[4], before[1]);
        assert_eq!(&after[1..4], &before[2..5]);
        assert_eq!(after[5], before[5]);
    }

    #[test]
    fn test_reset_restores_initial_order() {
        let mut session = Session::new(3, 9).unwrap();
        let initial = session.order().to_vec();
        let initial_report = session.report().clone();
        session.move_read(2, 5).unwrap();
        session.reset().unwrap();
        assert_eq!(session.order(), initial.as_slice());
        assert_eq!(session.report(), &initial_report);
    }

    #[test]
    fn test_reveal_toggle() {
        let mut session = Session::new(1, 1).unwrap();
        assert!(session.visible_reference().is_none());
        assert!(session.toggle_reveal());
        assert_eq!(session.visible_reference(), Some(session.puzzle().reference.as_str()));
        session.set_reveal(false);
        assert!(session.visible_reference().is_none());
    }

    #[test]
    fn test_next_level_cycles_and_keeps_score() {
        let mut session = Session::new(3, 12).unwrap();
        let solution = session.puzzle().solution_order();
        session.reorder(&solution).unwrap();
        assert_eq!(session.score(), 450);

        session.next_level(13).unwrap();
        assert_eq!(session.config().level, Some(1));
        assert_eq!(session.score(), 450);
        assert!(!session.is_solved());

        session.regenerate(14).unwrap();
        assert_eq!(session.seed(), 14);
        assert_eq!(session.score(), 450);
    }

    #[test]
    fn test_single_read_session_is_solved_immediately() {
        let mut config = LevelConfig::preset(1).unwrap();
        config.num_reads = 1;
        let session = Session::with_config(config, 3).unwrap();
        assert_eq!(session.order(), &[0]);
        assert!(session.report().success);
        assert_eq!(session.score(), 150);
    }
}
