use crate::{constants::game, game::dimensions::Dimensions};

/// Axis-aligned box in surface coordinates, y growing downwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Bird {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub velocity: f32,
    gravity: f32,
    jump: f32,
    hitbox_padding: f32,
}

impl Bird {
    pub fn new(dims: &Dimensions) -> Self {
        Bird {
            x: dims.bird_x,
            y: dims.bird_start_y(),
            width: dims.bird_width,
            height: dims.bird_height,
            velocity: 0.0,
            gravity: game::GRAVITY,
            jump: game::JUMP_VELOCITY,
            hitbox_padding: game::HITBOX_PADDING,
        }
    }

    /// Picks up new sizes after a resize. Position along y is kept.
    pub fn resize(&mut self, dims: &Dimensions) {
        self.x = dims.bird_x;
        self.width = dims.bird_width;
        self.height = dims.bird_height;
    }

    pub fn reset(&mut self, dims: &Dimensions) {
        self.y = dims.bird_start_y();
        self.velocity = 0.0;
    }

    pub fn up(&mut self) {
        self.velocity = self.jump;
    }

    /// One physics step. Returns true when the bird hit the floor or the ceiling.
    /// Like [`Bird::clamp`], the result stays on the surface only when it is at least as tall as the bird.
    ///
    /// Gravity is applied once per call regardless of how much time passed.
    pub fn integrate(&mut self, surface_height: f32) -> bool {
        self.velocity += self.gravity;
        self.y += self.velocity;

        if self.y + self.height >= surface_height {
            self.y = surface_height - self.height;
            self.velocity = 0.0;
            true
        } else if self.y <= 0.0 {
            self.y = 0.0;
            self.velocity = 0.0;
            true
        } else {
            false
        }
    }

    /// Keeps a resting bird on the surface without advancing physics.
    ///
    /// Only holds when `surface_height >= height`. On a shorter surface the floor wins and `y` goes negative.
    pub fn clamp(&mut self, surface_height: f32) {
        if self.y + self.height > surface_height {
            self.y = surface_height - self.height;
            self.velocity = 0.0;
        } else if self.y < 0.0 {
            self.y = 0.0;
            self.velocity = 0.0;
        }
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.x, self.y, self.width, self.height)
    }

    /// The gameplay hitbox used against pipes, inset on every side.
    pub fn padded_bounds(&self) -> Bounds {
        let pad_w = self.width * self.hitbox_padding;
        let pad_h = self.height * self.hitbox_padding;
        Bounds::new(self.x + pad_w, self.y + pad_h, self.width - 2.0 * pad_w, self.height - 2.0 * pad_h)
    }
}
