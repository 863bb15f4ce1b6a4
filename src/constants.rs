// Play area dimensions in world units
pub const PLAY_WIDTH: f64 = 1000.0;
pub const PLAY_HEIGHT: f64 = 700.0;

// Avatar geometry (x center is fixed, y is the sprite center)
pub const AVATAR_WIDTH: f64 = 50.0;
pub const AVATAR_HEIGHT: f64 = 50.0;
pub const AVATAR_X: f64 = 100.0;
pub const AVATAR_SPAWN_Y: f64 = 350.0;

// Physics, per 16ms step
pub const GRAVITY: f64 = 0.5;
pub const MAX_FALL_SPEED: f64 = 10.0;
pub const FLAP_IMPULSE: f64 = -8.0;

// Display rotation in degrees, derived from velocity
pub const ROTATION_PER_VELOCITY: f64 = -3.0;
pub const MIN_ROTATION: f64 = -30.0;
pub const MAX_ROTATION: f64 = 45.0;

// Pipe geometry and motion
pub const PIPE_WIDTH: f64 = 80.0;
pub const PIPE_GAP: f64 = 200.0;
pub const PIPE_SPEED: f64 = 5.0;
pub const GAP_MARGIN: f64 = 100.0;

// Spawn cadence and difficulty ramp
pub const SPAWN_INTERVAL_START_MS: u64 = 1500;
pub const SPAWN_INTERVAL_DECREMENT_MS: u64 = 100;
pub const SPAWN_INTERVAL_FLOOR_MS: u64 = 800;
pub const RAMP_SCORE_STEP: u32 = 5;

// Obstacles pre-seeded at session start
pub const INITIAL_OBSTACLE_COUNT: usize = 2;
pub const INITIAL_OBSTACLE_SPACING: f64 = 400.0;

// Game timing constants
pub const PHYSICS_TICK_MS: u64 = 16;
pub const MAX_FRAME_DT_MS: u64 = 100;
pub const FRAME_INTERVAL_MS: u64 = 16;
