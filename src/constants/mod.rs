pub mod game;

/// Size of the framed playfield when fullscreen is off.
pub const WIDTH: u16 = 120;
pub const HEIGHT: u16 = 40;
