//! Core simulation state: avatar, obstacles, obstacle field, and the
//! session state machine.

use crate::constants::*;
use rand::Rng;

/// Axis-aligned bounding rectangle in play-area units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Rect {
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left < other.right
            && self.right > other.left
            && self.top < other.bottom
            && self.bottom > other.top
    }
}

/// Top-level session states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    Menu,
    Playing,
    GameOver,
}

/// UI-agnostic input actions. Key/mouse mapping happens in the binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    /// Space, Up, or Enter. Starts a round, flaps, or restarts.
    Activate,
    /// q or Esc. Handled by the main loop, never by the session.
    Quit,
}

/// Discrete cues emitted by the simulation for the audio layer.
/// The simulation never depends on them being consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    Flap,
    Score,
    Hit,
}

/// The player-controlled bird.
#[derive(Debug, Clone)]
pub struct Avatar {
    /// Vertical center position. The horizontal center is fixed at AVATAR_X.
    pub y: f64,
    /// Vertical velocity, positive = downward.
    pub velocity: f64,
    /// Display rotation in degrees. Never affects collision geometry.
    pub rotation: f64,
}

impl Avatar {
    pub fn new() -> Self {
        Self {
            y: AVATAR_SPAWN_Y,
            velocity: 0.0,
            rotation: 0.0,
        }
    }

    /// Apply the flap impulse. Velocity is set, not added, so repeated
    /// flaps never stack. No cooldown.
    pub fn flap(&mut self) {
        self.velocity = FLAP_IMPULSE;
    }

    /// Bounding rectangle at the current position.
    pub fn bounds(&self) -> Rect {
        Rect {
            left: AVATAR_X - AVATAR_WIDTH / 2.0,
            top: self.y - AVATAR_HEIGHT / 2.0,
            right: AVATAR_X + AVATAR_WIDTH / 2.0,
            bottom: self.y + AVATAR_HEIGHT / 2.0,
        }
    }
}

impl Default for Avatar {
    fn default() -> Self {
        Self::new()
    }
}

/// A single pipe pair (top + bottom with a fixed gap between them).
#[derive(Debug, Clone)]
pub struct Obstacle {
    /// Left edge x position (float for smooth scrolling).
    pub x: f64,
    /// Top edge of the gap, fixed for the obstacle's lifetime.
    pub gap_top: f64,
    /// Whether this obstacle has been credited to the score.
    pub scored: bool,
}

impl Obstacle {
    /// Create an obstacle at `spawn_x` with a randomly placed gap. The gap
    /// always lies fully inside the play area with GAP_MARGIN clearance
    /// from the top and the ground.
    pub fn new<R: Rng>(spawn_x: f64, rng: &mut R) -> Self {
        let gap_top = rng.gen_range(GAP_MARGIN..=PLAY_HEIGHT - PIPE_GAP - GAP_MARGIN);
        Self {
            x: spawn_x,
            gap_top,
            scored: false,
        }
    }

    /// Rectangle of the upper pipe (play-area top down to the gap).
    pub fn top_rect(&self) -> Rect {
        Rect {
            left: self.x,
            top: 0.0,
            right: self.x + PIPE_WIDTH,
            bottom: self.gap_top,
        }
    }

    /// Rectangle of the lower pipe (gap bottom down to the ground).
    pub fn bottom_rect(&self) -> Rect {
        Rect {
            left: self.x,
            top: self.gap_top + PIPE_GAP,
            right: self.x + PIPE_WIDTH,
            bottom: PLAY_HEIGHT,
        }
    }

    /// True if `avatar_rect` overlaps either pipe of this obstacle.
    pub fn collides_with(&self, avatar_rect: &Rect) -> bool {
        avatar_rect.intersects(&self.top_rect()) || avatar_rect.intersects(&self.bottom_rect())
    }
}

/// The ordered set of live obstacles plus the spawn timer state.
/// Order is creation order, which is left-to-right on screen.
#[derive(Debug, Clone)]
pub struct ObstacleField {
    pub obstacles: Vec<Obstacle>,
    /// Current time between spawns. Only ever decreases, never below
    /// SPAWN_INTERVAL_FLOOR_MS.
    pub spawn_interval_ms: u64,
    /// Elapsed time since the last spawn.
    pub spawn_timer_ms: u64,
}

impl ObstacleField {
    /// Create a field pre-seeded with the session's starting obstacles,
    /// spaced evenly past the right edge of the view.
    pub fn new<R: Rng>(rng: &mut R) -> Self {
        let mut obstacles = Vec::with_capacity(INITIAL_OBSTACLE_COUNT);
        for i in 0..INITIAL_OBSTACLE_COUNT {
            let spawn_x = PLAY_WIDTH + i as f64 * INITIAL_OBSTACLE_SPACING;
            obstacles.push(Obstacle::new(spawn_x, rng));
        }
        Self {
            obstacles,
            spawn_interval_ms: SPAWN_INTERVAL_START_MS,
            spawn_timer_ms: 0,
        }
    }

    /// Shorten the spawn interval by one difficulty step, floored.
    pub fn ramp_difficulty(&mut self) {
        self.spawn_interval_ms = self
            .spawn_interval_ms
            .saturating_sub(SPAWN_INTERVAL_DECREMENT_MS)
            .max(SPAWN_INTERVAL_FLOOR_MS);
    }
}

/// One play-through: the state machine plus everything it owns.
#[derive(Debug, Clone)]
pub struct GameSession {
    pub state: GameState,
    /// Obstacles cleared this round.
    pub score: u32,
    /// Best score across rounds. Persisted between runs.
    pub high_score: u32,
    pub avatar: Avatar,
    pub field: ObstacleField,
    /// Sub-step time accumulator for the fixed physics step.
    pub tick_accum_ms: u64,
}

impl GameSession {
    /// Create a session in the Menu state with a pre-seeded field.
    pub fn new<R: Rng>(high_score: u32, rng: &mut R) -> Self {
        Self {
            state: GameState::Menu,
            score: 0,
            high_score,
            avatar: Avatar::new(),
            field: ObstacleField::new(rng),
            tick_accum_ms: 0,
        }
    }

    /// Discard the current round: fresh avatar, fresh field, score back
    /// to zero. The high score survives.
    pub fn reset<R: Rng>(&mut self, rng: &mut R) {
        self.avatar = Avatar::new();
        self.field = ObstacleField::new(rng);
        self.score = 0;
        self.tick_accum_ms = 0;
    }
}
