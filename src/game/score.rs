use tracing::{info, warn};

use crate::{constants::game, game::slot::BestScoreSlot};

pub struct ScoreTracker {
    pub score: u32,
    pub best_score: u32,
    pub speed_multiplier: f32,
    slot: Box<dyn BestScoreSlot>,
}

impl ScoreTracker {
    /// Reads the best score from the slot, falling back to 0.
    pub fn new(slot: Box<dyn BestScoreSlot>) -> Self {
        let best_score = slot.load().unwrap_or(0);
        ScoreTracker { score: 0, best_score, speed_multiplier: game::INITIAL_SPEED, slot }
    }

    pub fn on_pipe_passed(&mut self) {
        self.score += 1;
        self.speed_multiplier += game::SPEED_INCREMENT;
    }

    /// Records a new best score. Call once per game over.
    pub fn on_game_over(&mut self) {
        if self.score <= self.best_score {
            return;
        }
        self.best_score = self.score;
        info!(best_score = self.best_score, "new best score");
        if let Err(e) = self.slot.store(self.best_score) {
            warn!("failed to persist best score: {e:?}");
        }
    }

    pub fn reset(&mut self) {
        self.score = 0;
        self.speed_multiplier = game::INITIAL_SPEED;
    }
}

#[cfg(test)]
mod tests {
    use color_eyre::eyre::{eyre, Result};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::game::slot::MemorySlot;

    struct BrokenSlot;

    impl BestScoreSlot for BrokenSlot {
        fn load(&self) -> Option<u32> {
            None
        }

        fn store(&mut self, _best_score: u32) -> Result<()> {
            Err(eyre!("read-only"))
        }
    }

    #[test]
    fn test_new_reads_slot() {
        let tracker = ScoreTracker::new(Box::new(MemorySlot::new(Some(12))));
        assert_eq!(tracker.best_score, 12);
        assert_eq!(tracker.score, 0);
        assert_eq!(tracker.speed_multiplier, 1.0);
    }

    #[test]
    fn test_missing_slot_defaults_to_zero() {
        let tracker = ScoreTracker::new(Box::new(BrokenSlot));
        assert_eq!(tracker.best_score, 0);
    }

    #[test]
    fn test_pipe_passed_increments_score_and_speed() {
        let mut tracker = ScoreTracker::new(Box::new(MemorySlot::default()));
        tracker.on_pipe_passed();
        tracker.on_pipe_passed();
        assert_eq!(tracker.score, 2);
        assert!((tracker.speed_multiplier - 1.14).abs() < 1e-6);
    }

    #[test]
    fn test_game_over_keeps_higher_best() {
        let mut tracker = ScoreTracker::new(Box::new(MemorySlot::new(Some(5))));
        tracker.on_pipe_passed();
        tracker.on_game_over();
        assert_eq!(tracker.best_score, 5);

        tracker.reset();
        for _ in 0..7 {
            tracker.on_pipe_passed();
        }
        tracker.on_game_over();
        assert_eq!(tracker.best_score, 7);
    }

    #[test]
    fn test_failed_store_keeps_best_in_memory() {
        let mut tracker = ScoreTracker::new(Box::new(BrokenSlot));
        tracker.on_pipe_passed();
        tracker.on_game_over();
        assert_eq!(tracker.best_score, 1);
    }

    #[test]
    fn test_reset_leaves_best_score() {
        let mut tracker = ScoreTracker::new(Box::new(MemorySlot::default()));
        tracker.on_pipe_passed();
        tracker.on_game_over();
        tracker.reset();
        assert_eq!(tracker.score, 0);
        assert_eq!(tracker.speed_multiplier, 1.0);
        assert_eq!(tracker.best_score, 1);
    }
}
