//! Session logic: input handling, fixed-step physics, obstacle spawning,
//! scoring, and collision detection.

use crate::constants::*;
use crate::game_state::{
    Avatar, GameEvent, GameSession, GameState, InputAction, Obstacle, ObstacleField, Rect,
};
use rand::Rng;

/// Process a single input action. Every state transition the player can
/// trigger lives here.
pub fn process_input<R: Rng>(
    session: &mut GameSession,
    action: InputAction,
    rng: &mut R,
) -> Vec<GameEvent> {
    let mut events = Vec::new();

    match (session.state, action) {
        (GameState::Menu, InputAction::Activate) => {
            session.state = GameState::Playing;
        }
        (GameState::Playing, InputAction::Activate) => {
            session.avatar.flap();
            events.push(GameEvent::Flap);
        }
        (GameState::GameOver, InputAction::Activate) => {
            session.reset(rng);
            session.state = GameState::Playing;
        }
        // Quit is handled by the main loop; nothing else transitions
        _ => {}
    }

    events
}

/// Advance the simulation by `dt_ms` of wall-clock time.
///
/// Physics runs in fixed 16ms steps behind an accumulator. Returns the
/// cues produced across the elapsed steps, in order.
pub fn tick_session<R: Rng>(
    session: &mut GameSession,
    dt_ms: u64,
    rng: &mut R,
) -> Vec<GameEvent> {
    let mut events = Vec::new();

    if session.state != GameState::Playing {
        return events;
    }

    // Clamp dt so a stalled terminal cannot produce a physics explosion
    let dt_ms = dt_ms.min(MAX_FRAME_DT_MS);
    session.tick_accum_ms += dt_ms;

    while session.tick_accum_ms >= PHYSICS_TICK_MS {
        session.tick_accum_ms -= PHYSICS_TICK_MS;
        step_session(session, rng, &mut events);

        if session.state != GameState::Playing {
            break;
        }
    }

    events
}

/// Single 16ms physics step.
fn step_session<R: Rng>(session: &mut GameSession, rng: &mut R, events: &mut Vec<GameEvent>) {
    // 1. Avatar physics
    step_avatar(&mut session.avatar);

    // 2. Obstacle field: spawn, scroll, score, retire
    let avatar_rect = session.avatar.bounds();
    for event in update_field(&mut session.field, &avatar_rect, rng) {
        if event == GameEvent::Score {
            session.score += 1;
            // 3. Difficulty ramp, exactly once per threshold crossing.
            // Safe because each obstacle scores at most once.
            if session.score % RAMP_SCORE_STEP == 0 {
                session.field.ramp_difficulty();
            }
        }
        events.push(event);
    }

    // 4. Death check: pipe hit, or the ground. The ceiling clamps, the
    // ground kills.
    if field_collides(&session.field, &avatar_rect) || avatar_rect.bottom >= PLAY_HEIGHT {
        session.high_score = session.high_score.max(session.score);
        session.state = GameState::GameOver;
        events.push(GameEvent::Hit);
    }
}

/// Avatar physics for one fixed step.
fn step_avatar(avatar: &mut Avatar) {
    // 1. Gravity, clamped to terminal fall speed
    avatar.velocity += GRAVITY;
    if avatar.velocity > MAX_FALL_SPEED {
        avatar.velocity = MAX_FALL_SPEED;
    }

    // 2. Integrate position
    avatar.y += avatar.velocity;

    // 3. Display rotation follows velocity (visual only)
    avatar.rotation = (ROTATION_PER_VELOCITY * avatar.velocity).clamp(MIN_ROTATION, MAX_ROTATION);

    // 4. Ceiling clamp. The floor is a death condition, not a boundary.
    if avatar.y - AVATAR_HEIGHT / 2.0 < 0.0 {
        avatar.y = AVATAR_HEIGHT / 2.0;
        avatar.velocity = 0.0;
    }
}

/// Advance the obstacle field by one fixed step. Emits a Score cue for
/// each obstacle whose trailing edge passes the avatar's leading edge.
fn update_field<R: Rng>(
    field: &mut ObstacleField,
    avatar_rect: &Rect,
    rng: &mut R,
) -> Vec<GameEvent> {
    let mut events = Vec::new();

    // 1. Spawn on the interval timer
    field.spawn_timer_ms += PHYSICS_TICK_MS;
    if field.spawn_timer_ms >= field.spawn_interval_ms {
        field.obstacles.push(Obstacle::new(PLAY_WIDTH, rng));
        field.spawn_timer_ms = 0;
    }

    // 2. Scroll obstacles left
    for obstacle in &mut field.obstacles {
        obstacle.x -= PIPE_SPEED;
    }

    // 3. Score obstacles the avatar has fully passed, once each
    for obstacle in &mut field.obstacles {
        if !obstacle.scored && obstacle.x + PIPE_WIDTH < avatar_rect.left {
            obstacle.scored = true;
            events.push(GameEvent::Score);
        }
    }

    // 4. Retire obstacles fully off the left edge
    field.obstacles.retain(|o| o.x + PIPE_WIDTH >= 0.0);

    events
}

/// Read-only collision sweep over all live obstacles. First hit wins.
fn field_collides(field: &ObstacleField, avatar_rect: &Rect) -> bool {
    field
        .obstacles
        .iter()
        .any(|obstacle| obstacle.collides_with(avatar_rect))
}
