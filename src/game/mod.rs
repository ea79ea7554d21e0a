//! The simulation behind the game page: bird physics, pipes, collisions and scoring.
//!
//! The host calls [`Game::tick`] once per display refresh and draws the returned
//! [`RenderState`]. Input is applied between ticks through [`Game::on_jump_or_reset`]
//! and [`Game::on_resize`].

pub mod bird;
pub mod collision;
pub mod dimensions;
pub mod pipe;
pub mod score;
pub mod slot;

use rand::{rngs::StdRng, SeedableRng};
use strum::Display;
use tracing::{debug, info};

use crate::game::{
    bird::{Bird, Bounds},
    dimensions::Dimensions,
    pipe::PipeField,
    score::ScoreTracker,
    slot::BestScoreSlot,
};

#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Display)]
pub enum GameState {
    #[default]
    NotStarted,
    Running,
    Over,
}

/// Everything the host needs to draw one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderState {
    pub bird: Bounds,
    /// Top and bottom segment of every pipe, in spawn order.
    pub pipes: Vec<(Bounds, Bounds)>,
    pub state: GameState,
    pub game_over: bool,
    pub score: u32,
    pub best_score: u32,
    pub speed_multiplier: f32,
}

pub struct Game {
    dims: Dimensions,
    state: GameState,
    bird: Bird,
    pipes: PipeField,
    score: ScoreTracker,
    rng: StdRng,
}

impl Game {
    pub fn new(width: f32, height: f32, slot: Box<dyn BestScoreSlot>) -> Self {
        Self::with_rng(width, height, slot, StdRng::from_entropy())
    }

    pub fn with_rng(width: f32, height: f32, slot: Box<dyn BestScoreSlot>, rng: StdRng) -> Self {
        let dims = Dimensions::new(width, height);
        let score = ScoreTracker::new(slot);
        debug!(?dims, best_score = score.best_score, "game created");
        Game { dims, state: GameState::NotStarted, bird: Bird::new(&dims), pipes: PipeField::new(), score, rng }
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn dimensions(&self) -> &Dimensions {
        &self.dims
    }

    pub fn score(&self) -> u32 {
        self.score.score
    }

    pub fn best_score(&self) -> u32 {
        self.score.best_score
    }

    pub fn speed_multiplier(&self) -> f32 {
        self.score.speed_multiplier
    }

    pub fn bird(&self) -> &Bird {
        &self.bird
    }

    /// Swaps in sizes for the new surface. A started run is thrown away.
    pub fn on_resize(&mut self, width: f32, height: f32) {
        self.dims = Dimensions::new(width, height);
        self.bird.resize(&self.dims);
        debug!(dims = ?self.dims, "surface resized");
        if self.state != GameState::NotStarted {
            self.reset();
        }
    }

    /// Flap while playing, start on the first flap, start over after a crash.
    pub fn on_jump_or_reset(&mut self) {
        match self.state {
            GameState::Over => self.reset(),
            GameState::NotStarted => {
                self.state = GameState::Running;
                self.bird.up();
            },
            GameState::Running => self.bird.up(),
        }
    }

    pub fn reset(&mut self) {
        self.state = GameState::NotStarted;
        self.bird.reset(&self.dims);
        self.pipes.reset();
        self.score.reset();
    }

    fn game_over(&mut self) {
        if self.state != GameState::Running {
            return;
        }
        self.state = GameState::Over;
        info!(score = self.score.score, "game over");
        self.score.on_game_over();
    }

    /// Advances the simulation by one frame.
    pub fn tick(&mut self, elapsed_ms: f32) -> RenderState {
        if self.state == GameState::Running {
            if self.bird.integrate(self.dims.height) {
                self.game_over();
            }
        } else {
            self.bird.clamp(self.dims.height);
        }

        if self.state == GameState::Running {
            self.pipes.tick(elapsed_ms, self.score.speed_multiplier, &self.dims, &mut self.rng);

            let crashed = collision::collides_any(&self.bird, self.pipes.iter(), &self.dims);

            for pipe in self.pipes.iter_mut() {
                if !pipe.passed && pipe.x + self.dims.pipe_width < self.bird.x {
                    pipe.passed = true;
                    self.score.on_pipe_passed();
                }
            }

            if crashed {
                self.game_over();
            }
        }

        self.render_state()
    }

    pub fn render_state(&self) -> RenderState {
        RenderState {
            bird: self.bird.bounds(),
            pipes: self.pipes.iter().map(|pipe| pipe.segments(&self.dims)).collect(),
            state: self.state,
            game_over: self.state == GameState::Over,
            score: self.score.score,
            best_score: self.score.best_score,
            speed_multiplier: self.score.speed_multiplier,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rand::Rng;

    use super::*;
    use crate::game::{pipe::Pipe, slot::MemorySlot};

    const FRAME_MS: f32 = 16.0;

    fn game_with(slot: MemorySlot) -> Game {
        Game::with_rng(1200.0, 900.0, Box::new(slot), StdRng::seed_from_u64(42))
    }

    fn game() -> Game {
        game_with(MemorySlot::default())
    }

    fn assert_bird_on_surface(game: &Game) {
        let y = game.bird().y;
        assert!(y >= 0.0 && y <= game.dimensions().bird_max_y(), "bird left the surface at y = {y}");
    }

    #[test]
    fn test_first_flap_starts_game() {
        let mut game = game();
        assert_eq!(game.state(), GameState::NotStarted);
        game.on_jump_or_reset();
        assert_eq!(game.state(), GameState::Running);
        assert_eq!(game.bird().velocity, crate::constants::game::JUMP_VELOCITY);
    }

    #[test]
    fn test_idle_bird_rests_and_no_pipes_spawn() {
        let mut game = game();
        for _ in 0..500 {
            let state = game.tick(FRAME_MS);
            assert!(state.pipes.is_empty());
        }
        assert_eq!(game.bird().y, game.dimensions().bird_start_y());
    }

    #[test]
    fn test_pipes_spawn_while_running() {
        let mut game = game();
        game.on_jump_or_reset();
        let mut ticks = 0;
        while game.pipes.is_empty() {
            if game.bird().y > 500.0 {
                game.on_jump_or_reset();
            }
            game.tick(FRAME_MS);
            ticks += 1;
        }
        assert_eq!(ticks, 188);
        assert_eq!(game.state(), GameState::Running);
    }

    #[test]
    fn test_bird_stays_on_surface() {
        let mut game = game();
        let mut input = StdRng::seed_from_u64(3);
        for _ in 0..5000 {
            if input.gen_bool(0.04) {
                game.on_jump_or_reset();
            }
            game.tick(FRAME_MS);
            assert_bird_on_surface(&game);
        }
    }

    #[test]
    fn test_best_score_is_max_of_finished_runs() {
        let mut game = game_with(MemorySlot::new(Some(2)));
        let mut input = StdRng::seed_from_u64(9);
        let mut best = 2;
        let mut previous_best = game.best_score();
        for _ in 0..20000 {
            let previous_score = game.score();
            let mut restarted = false;
            if input.gen_bool(0.05) {
                restarted = game.state() == GameState::Over;
                game.on_jump_or_reset();
            }
            let was_running = game.state() == GameState::Running;
            game.tick(FRAME_MS);
            if was_running && game.state() == GameState::Over {
                best = best.max(game.score());
            }
            assert!(game.best_score() >= previous_best);
            previous_best = game.best_score();

            let baseline = if restarted { 0 } else { previous_score };
            assert!(
                game.score() == baseline || game.score() == baseline + 1,
                "score jumped from {previous_score} to {}",
                game.score()
            );
            let expected_speed = 1.0 + 0.07 * game.score() as f32;
            assert!((game.speed_multiplier() - expected_speed).abs() < 1e-4);
        }
        assert_eq!(game.best_score(), best);
    }

    #[test]
    fn test_passing_pipe_scores_once() {
        let mut game = game();
        game.on_jump_or_reset();
        let dims = *game.dimensions();
        let x = game.bird().x - dims.pipe_width + 1.0;
        game.pipes.push(Pipe::new(x, 200.0));

        let state = game.tick(FRAME_MS);
        assert_eq!(state.score, 1);
        assert!((state.speed_multiplier - 1.07).abs() < 1e-6);
        assert!(game.pipes.iter().all(|pipe| pipe.passed));

        let state = game.tick(FRAME_MS);
        assert_eq!(state.score, 1);
        assert_eq!(state.state, GameState::Running);
    }

    #[test]
    fn test_pipe_collision_ends_game() {
        let mut game = game();
        game.on_jump_or_reset();
        let x = game.bird().x;
        game.pipes.push(Pipe::new(x, 500.0));

        let state = game.tick(FRAME_MS);
        assert!(state.game_over);
        assert_eq!(game.state(), GameState::Over);
    }

    #[test]
    fn test_crash_persists_best_score_once() {
        let slot = MemorySlot::new(Some(1));
        let mut game = game_with(slot.clone());
        game.on_jump_or_reset();
        game.score.score = 3;

        for _ in 0..400 {
            game.tick(FRAME_MS);
        }

        assert_eq!(game.state(), GameState::Over);
        assert_eq!(game.best_score(), 3);
        assert_eq!(slot.load(), Some(3));
        assert_eq!(slot.writes(), 1);
    }

    #[test]
    fn test_lower_score_does_not_persist() {
        let slot = MemorySlot::new(Some(10));
        let mut game = game_with(slot.clone());
        game.on_jump_or_reset();
        for _ in 0..400 {
            game.tick(FRAME_MS);
        }
        assert_eq!(game.state(), GameState::Over);
        assert_eq!(game.best_score(), 10);
        assert_eq!(slot.writes(), 0);
    }

    #[test]
    fn test_reset_after_game_over() {
        let mut game = game_with(MemorySlot::new(Some(4)));
        game.on_jump_or_reset();
        let x = game.bird().x;
        game.pipes.push(Pipe::new(x, 500.0));
        game.score.on_pipe_passed();
        game.tick(FRAME_MS);
        assert_eq!(game.state(), GameState::Over);

        game.on_jump_or_reset();

        assert_eq!(game.state(), GameState::NotStarted);
        assert_eq!(game.score(), 0);
        assert_eq!(game.speed_multiplier(), 1.0);
        assert!(game.pipes.is_empty());
        assert_eq!(game.bird().y, game.dimensions().bird_start_y());
        assert_eq!(game.bird().velocity, 0.0);
        assert_eq!(game.best_score(), 4);
    }

    #[test]
    fn test_resize_while_running_resets() {
        let mut game = game();
        game.on_jump_or_reset();
        for _ in 0..10 {
            game.tick(FRAME_MS);
        }

        game.on_resize(800.0, 600.0);

        assert_eq!(game.state(), GameState::NotStarted);
        assert_eq!(*game.dimensions(), Dimensions::new(800.0, 600.0));
        assert_eq!(game.bird().y, 200.0);
        assert_eq!(game.bird().width, 120.0);
    }

    #[test]
    fn test_resize_after_game_over_resets() {
        let mut game = game();
        game.on_jump_or_reset();
        let x = game.bird().x;
        game.pipes.push(Pipe::new(x, 500.0));
        game.score.on_pipe_passed();
        game.tick(FRAME_MS);
        assert_eq!(game.state(), GameState::Over);

        game.on_resize(800.0, 600.0);

        assert_eq!(game.state(), GameState::NotStarted);
        assert_eq!(game.score(), 0);
        assert_eq!(game.speed_multiplier(), 1.0);
        assert!(game.pipes.is_empty());
        assert_eq!(game.bird().y, 200.0);
        assert_eq!(game.bird().velocity, 0.0);
    }

    #[test]
    fn test_resize_before_start_keeps_state() {
        let mut game = game();
        game.on_resize(2000.0, 1000.0);
        assert_eq!(game.state(), GameState::NotStarted);
        assert_eq!(game.bird().x, 300.0);
        assert_eq!(game.bird().height, 100.0);

        game.on_resize(1000.0, 200.0);
        game.tick(FRAME_MS);
        assert_bird_on_surface(&game);
    }
}
