use crate::game::{bird::Bird, dimensions::Dimensions, pipe::Pipe};

fn overlaps(l1: f32, r1: f32, l2: f32, r2: f32) -> bool {
    r1 > l2 && l1 < r2
}

/// Whether the bird touches the floor or the ceiling. Uses the full, unpadded box.
pub fn hits_boundary(bird: &Bird, surface_height: f32) -> bool {
    let bounds = bird.bounds();
    bounds.bottom() >= surface_height || bounds.top() <= 0.0
}

/// Whether the bird's padded hitbox touches either segment of the pipe.
pub fn hits_pipe(bird: &Bird, pipe: &Pipe, pipe_width: f32, pipe_gap: f32) -> bool {
    let hitbox = bird.padded_bounds();
    overlaps(hitbox.left(), hitbox.right(), pipe.x, pipe.x + pipe_width)
        && (hitbox.top() < pipe.top_height || hitbox.bottom() > pipe.top_height + pipe_gap)
}

pub fn collides(bird: &Bird, pipe: &Pipe, dims: &Dimensions) -> bool {
    hits_pipe(bird, pipe, dims.pipe_width, dims.pipe_gap) || hits_boundary(bird, dims.height)
}

/// Checks every pipe and the surface bounds.
pub fn collides_any<'a>(bird: &Bird, pipes: impl IntoIterator<Item = &'a Pipe>, dims: &Dimensions) -> bool {
    let mut pipes = pipes.into_iter().peekable();
    if pipes.peek().is_none() {
        return hits_boundary(bird, dims.height);
    }
    pipes.any(|pipe| collides(bird, pipe, dims))
}
