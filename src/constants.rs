// Game timing constants
pub const TICK_INTERVAL_MS: u64 = 33; // ~30 FPS, the original cadence
pub const MAX_FRAME_DT: f64 = 0.25; // dt clamp after a suspended terminal

// Playfield layout constants
pub const GROUND_FRACTION: f64 = 0.85; // playable height; bottom strip is ground
pub const GAP_MARGIN_FRACTION: f64 = 0.2;
pub const PIPE_WIDTH: f64 = 52.0; // sprite dimensions from the original assets
pub const PIPE_BODY_HEIGHT: f64 = 320.0;
pub const BIRD_SPRITE_SIZE: f64 = 34.0;
pub const BIRD_SCALE: f64 = 1.8;
pub const BIRD_X_FRACTION: f64 = 0.2;
pub const SPAWN_LEAD_X: f64 = 10.0; // cadence spawns enter just off-screen right

// Difficulty ramp constants
pub const DIFFICULTY_SCORE_STEP: u32 = 25;
pub const GAP_SHRINK_PX: f64 = 10.0;
pub const MIN_PIPE_GAP: f64 = 100.0;
pub const SPEED_BOOST: f64 = 20.0;
pub const MAX_PIPE_SPEED: f64 = 400.0;
pub const SPAWN_INTERVAL_CUT: f64 = 0.1;
pub const MIN_SPAWN_INTERVAL: f64 = 0.5;

// Leaderboard constants
pub const LEADERBOARD_TOP_N: usize = 10;
pub const DEFAULT_SERVER_PORT: u16 = 3000;

// Cosmetic variants
pub const VARIANT_COUNT: u32 = 6;

// Terminal cell to logical pixel mapping (a cell is roughly 8x16 px)
pub const CELL_PX_W: f64 = 8.0;
pub const CELL_PX_H: f64 = 16.0;

// Menu button layout, in logical pixels
pub const BUTTON_W: f64 = 150.0;
pub const BUTTON_H: f64 = 50.0;
