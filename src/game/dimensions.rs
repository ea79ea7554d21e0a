use crate::constants::game;

/// Sizes derived from the drawable surface. Recomputed as a whole on init and resize.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dimensions {
    pub width: f32,
    pub height: f32,
    pub bird_x: f32,
    pub bird_width: f32,
    pub bird_height: f32,
    pub pipe_width: f32,
    pub pipe_gap: f32,
    pub pipe_speed: f32,
}

impl Dimensions {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            bird_x: width * game::BIRD_X_RATIO,
            bird_width: (width * game::BIRD_SIZE_RATIO).max(game::BIRD_MIN_WIDTH),
            bird_height: (height * game::BIRD_SIZE_RATIO).max(game::BIRD_MIN_HEIGHT),
            pipe_width: width * game::PIPE_WIDTH_RATIO,
            pipe_gap: height * game::PIPE_GAP_RATIO,
            pipe_speed: width * game::PIPE_SPEED_RATIO,
        }
    }

    pub fn bird_start_y(&self) -> f32 {
        self.height * game::BIRD_START_RATIO
    }

    /// Minimum height of either pipe segment.
    pub fn pipe_min_height(&self) -> f32 {
        self.height * game::PIPE_MIN_HEIGHT_RATIO
    }

    /// Lowest y the top of the bird can take while staying on the surface.
    pub fn bird_max_y(&self) -> f32 {
        self.height - self.bird_height
    }
}
