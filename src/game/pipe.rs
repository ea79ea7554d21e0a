use std::collections::VecDeque;

use rand::Rng;
use tracing::trace;

use crate::{
    constants::game,
    game::{bird::Bounds, dimensions::Dimensions},
};

#[derive(Debug, Clone, PartialEq)]
pub struct Pipe {
    pub x: f32,
    pub top_height: f32,
    pub passed: bool,
}

impl Pipe {
    pub fn new(x: f32, top_height: f32) -> Self {
        Pipe { x, top_height, passed: false }
    }

    pub fn move_left(&mut self, step: f32) {
        self.x -= step;
    }

    pub fn visible(&self, pipe_width: f32) -> bool {
        self.x + pipe_width >= 0.0
    }

    /// Top and bottom segments as drawable boxes.
    pub fn segments(&self, dims: &Dimensions) -> (Bounds, Bounds) {
        let bottom_y = self.top_height + dims.pipe_gap;
        (
            Bounds::new(self.x, 0.0, dims.pipe_width, self.top_height),
            Bounds::new(self.x, bottom_y, dims.pipe_width, dims.height - bottom_y),
        )
    }
}

/// Samples the height of the top segment so that both segments are at least the minimum height.
///
/// When the surface is too small for that, the gap is centered instead.
pub fn sample_top_height<R: Rng + ?Sized>(rng: &mut R, dims: &Dimensions) -> f32 {
    let min_height = dims.pipe_min_height();
    let max_height = dims.height - dims.pipe_gap - min_height;
    if max_height < min_height {
        return ((dims.height - dims.pipe_gap) / 2.0).max(0.0);
    }
    rng.gen_range(min_height..=max_height)
}

/// Pipes in spawn order, which is also right-to-left order.
#[derive(Debug, Default)]
pub struct PipeField {
    pipes: VecDeque<Pipe>,
    timer: f32,
}

impl PipeField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.pipes.clear();
        self.timer = 0.0;
    }

    pub fn len(&self) -> usize {
        self.pipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pipes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Pipe> {
        self.pipes.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Pipe> {
        self.pipes.iter_mut()
    }

    pub fn push(&mut self, pipe: Pipe) {
        self.pipes.push_back(pipe);
    }

    fn generate_pipe<R: Rng + ?Sized>(&mut self, rng: &mut R, dims: &Dimensions) {
        let top_height = sample_top_height(rng, dims);
        trace!(top_height, "spawning pipe");
        self.pipes.push_back(Pipe::new(dims.width, top_height));
    }

    /// Spawns on the timer, scrolls every pipe and drops the ones that left the surface.
    ///
    /// Only the spawn timer looks at `elapsed_ms`; scrolling is a fixed step per tick.
    pub fn tick<R: Rng + ?Sized>(&mut self, elapsed_ms: f32, speed_multiplier: f32, dims: &Dimensions, rng: &mut R) {
        self.timer += elapsed_ms;
        if self.timer > game::PIPE_SPACING_MS {
            self.generate_pipe(rng, dims);
            self.timer = 0.0;
        }

        let step = dims.pipe_speed * speed_multiplier;
        for pipe in self.pipes.iter_mut() {
            pipe.move_left(step);
        }
        self.pipes.retain(|pipe| pipe.visible(dims.pipe_width));
    }
}
