use ratatui::style::Color;

// Bird
pub const BIRD_X_RATIO: f32 = 0.15;
pub const BIRD_SIZE_RATIO: f32 = 0.10;
pub const BIRD_MIN_WIDTH: f32 = 120.0;
pub const BIRD_MIN_HEIGHT: f32 = 90.0;
pub const BIRD_START_RATIO: f32 = 1.0 / 3.0;
pub const GRAVITY: f32 = 0.09; // per tick
pub const JUMP_VELOCITY: f32 = -5.0; // per tick
pub const HITBOX_PADDING: f32 = 0.2;

// Pipes
pub const PIPE_WIDTH_RATIO: f32 = 0.1;
pub const PIPE_GAP_RATIO: f32 = 0.35;
pub const PIPE_MIN_HEIGHT_RATIO: f32 = 0.15;
pub const PIPE_SPEED_RATIO: f32 = 0.002; // per tick
pub const PIPE_SPACING_MS: f32 = 3000.0;

// Scoring
pub const SPEED_INCREMENT: f32 = 0.07;
pub const INITIAL_SPEED: f32 = 1.0;

// Virtual pixels per terminal cell
pub const CELL_WIDTH: f32 = 8.0;
pub const CELL_HEIGHT: f32 = 16.0;

pub const SKY_COLOR: Color = Color::Rgb(0x70, 0xC5, 0xCE);
pub const PIPE_COLOR: Color = Color::Rgb(0x73, 0xBF, 0x2E);
pub const BIRD_COLOR: Color = Color::Rgb(0xF7, 0xDC, 0x6F);
pub const BIRD_EYE: char = 'o';
pub const BIRD_BEAK: char = '>';

pub const GAME_OVER_TEXT: &str = r#"
GAME OVER
press <space> to play again
"#;
pub const START_TEXT: &str = "press <space> to flap";
