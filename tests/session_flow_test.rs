//! Integration test: session flow
//!
//! Tests the full round lifecycle end to end: the menu / playing /
//! game-over state machine, scoring, the difficulty ramp, and high-score
//! persistence.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use skyward::constants::{
    AVATAR_HEIGHT, AVATAR_WIDTH, AVATAR_X, FLAP_IMPULSE, GAP_MARGIN, MAX_FALL_SPEED, PHYSICS_TICK_MS,
    PIPE_GAP, PIPE_SPEED, PIPE_WIDTH, PLAY_HEIGHT, RAMP_SCORE_STEP, SPAWN_INTERVAL_DECREMENT_MS,
    SPAWN_INTERVAL_FLOOR_MS, SPAWN_INTERVAL_START_MS,
};
use skyward::game_logic::{process_input, tick_session};
use skyward::game_state::{GameEvent, GameSession, GameState, InputAction, Obstacle};
use skyward::persistence::{load_high_score_from, save_high_score_to};

/// Advance the session by exactly one physics step.
fn step(session: &mut GameSession, rng: &mut ChaCha8Rng) -> Vec<GameEvent> {
    tick_session(session, PHYSICS_TICK_MS, rng)
}

/// Hold the avatar at a fixed height for one step, defeating gravity so
/// obstacle behavior can be observed in isolation.
fn step_held(session: &mut GameSession, y: f64, rng: &mut ChaCha8Rng) -> Vec<GameEvent> {
    session.avatar.y = y;
    session.avatar.velocity = 0.0;
    step(session, rng)
}

/// A session in the Playing state whose pre-seeded obstacles have been
/// pushed far off to the right so they never interfere.
fn playing_session(seed: u64) -> (GameSession, ChaCha8Rng) {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut session = GameSession::new(0, &mut rng);
    process_input(&mut session, InputAction::Activate, &mut rng);
    for obstacle in &mut session.field.obstacles {
        obstacle.x += 100_000.0;
    }
    (session, rng)
}

/// An obstacle whose trailing edge will pass the avatar after
/// `steps_away` scroll steps, with the gap centered on `gap_top`.
fn obstacle_near_avatar(steps_away: u64, gap_top: f64) -> Obstacle {
    let avatar_left = AVATAR_X - AVATAR_WIDTH / 2.0;
    Obstacle {
        x: avatar_left - PIPE_WIDTH + steps_away as f64 * PIPE_SPEED - PIPE_SPEED / 2.0,
        gap_top,
        scored: false,
    }
}

// =============================================================================
// Scenario A: menu start
// =============================================================================

#[test]
fn test_activate_from_menu_starts_playing_at_zero() {
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let mut session = GameSession::new(42, &mut rng);
    assert_eq!(session.state, GameState::Menu);

    process_input(&mut session, InputAction::Activate, &mut rng);

    assert_eq!(session.state, GameState::Playing);
    assert_eq!(session.score, 0);
    assert_eq!(session.high_score, 42);
}

#[test]
fn test_menu_ignores_everything_but_activate() {
    let mut rng = ChaCha8Rng::seed_from_u64(2);
    let mut session = GameSession::new(0, &mut rng);

    process_input(&mut session, InputAction::Quit, &mut rng);

    assert_eq!(session.state, GameState::Menu);
}

// =============================================================================
// Scenario B: free fall ends the round
// =============================================================================

#[test]
fn test_free_fall_reaches_game_over() {
    let (mut session, mut rng) = playing_session(3);
    session.high_score = 10;
    session.score = 0;

    let mut saw_hit = false;
    for _ in 0..500 {
        let events = step(&mut session, &mut rng);
        if events.contains(&GameEvent::Hit) {
            saw_hit = true;
            break;
        }
    }

    assert!(saw_hit);
    assert_eq!(session.state, GameState::GameOver);
    // Score never beat the record, so the record stands
    assert_eq!(session.high_score, 10);
    // The avatar reached the ground and was not clamped there
    assert!(session.avatar.bounds().bottom >= PLAY_HEIGHT);
}

#[test]
fn test_game_over_updates_beaten_high_score() {
    let (mut session, mut rng) = playing_session(4);
    session.high_score = 2;
    session.score = 7;
    session.avatar.y = PLAY_HEIGHT - AVATAR_HEIGHT / 2.0 - 1.0;
    session.avatar.velocity = MAX_FALL_SPEED;

    step(&mut session, &mut rng);

    assert_eq!(session.state, GameState::GameOver);
    assert_eq!(session.high_score, 7);
}

// =============================================================================
// Scenario C: scoring is exact
// =============================================================================

#[test]
fn test_obstacle_scores_exactly_once_at_the_passing_tick() {
    let (mut session, mut rng) = playing_session(5);
    session.field.obstacles.push(obstacle_near_avatar(3, 300.0));

    let mut score_history = Vec::new();
    for _ in 0..10 {
        step_held(&mut session, 400.0, &mut rng);
        score_history.push(session.score);
    }

    assert_eq!(session.state, GameState::Playing);
    // Not before the passing tick, not after
    assert_eq!(score_history, vec![0, 0, 1, 1, 1, 1, 1, 1, 1, 1]);
}

#[test]
fn test_score_is_non_decreasing() {
    let (mut session, mut rng) = playing_session(6);
    for i in 0..8 {
        session
            .field
            .obstacles
            .push(obstacle_near_avatar(2 + i * 7, 300.0));
    }

    let mut last_score = 0;
    for _ in 0..80 {
        step_held(&mut session, 400.0, &mut rng);
        assert!(session.score >= last_score);
        last_score = session.score;
    }

    assert_eq!(session.score, 8);
}

// =============================================================================
// Scenario D: high-score persistence
// =============================================================================

#[test]
fn test_persistence_file_with_42_loads_42() {
    let path = std::env::temp_dir().join(format!("skyward_flow_{}_42.txt", std::process::id()));
    std::fs::write(&path, "42").unwrap();
    assert_eq!(load_high_score_from(&path), 42);
    std::fs::remove_file(&path).ok();
}

#[test]
fn test_persistence_missing_or_corrupt_loads_zero() {
    let missing = std::env::temp_dir().join(format!(
        "skyward_flow_{}_does_not_exist.txt",
        std::process::id()
    ));
    assert_eq!(load_high_score_from(&missing), 0);

    let corrupt = std::env::temp_dir().join(format!(
        "skyward_flow_{}_corrupt.txt",
        std::process::id()
    ));
    std::fs::write(&corrupt, "forty-two").unwrap();
    assert_eq!(load_high_score_from(&corrupt), 0);
    std::fs::remove_file(&corrupt).ok();
}

#[test]
fn test_persistence_roundtrip_through_a_session() {
    let path = std::env::temp_dir().join(format!(
        "skyward_flow_{}_roundtrip.txt",
        std::process::id()
    ));
    save_high_score_to(&path, 9);

    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let session = GameSession::new(load_high_score_from(&path), &mut rng);
    assert_eq!(session.high_score, 9);

    std::fs::remove_file(&path).ok();
}

// =============================================================================
// Scenario E: difficulty ramp
// =============================================================================

#[test]
fn test_spawn_interval_drops_exactly_once_at_score_five() {
    let (mut session, mut rng) = playing_session(8);
    for i in 0..RAMP_SCORE_STEP as u64 {
        session
            .field
            .obstacles
            .push(obstacle_near_avatar(2 + i * 10, 300.0));
    }

    let mut interval_history = Vec::new();
    for _ in 0..70 {
        step_held(&mut session, 400.0, &mut rng);
        interval_history.push(session.field.spawn_interval_ms);
    }

    assert_eq!(session.score, RAMP_SCORE_STEP);
    let dropped = SPAWN_INTERVAL_START_MS - SPAWN_INTERVAL_DECREMENT_MS;
    assert_eq!(*interval_history.last().unwrap(), dropped);
    // The interval changed exactly once over the whole run
    let changes = interval_history
        .windows(2)
        .filter(|w| w[0] != w[1])
        .count();
    assert_eq!(changes, 1);
}

#[test]
fn test_spawn_interval_never_ramps_below_floor() {
    let (mut session, mut rng) = playing_session(9);
    session.field.spawn_interval_ms = SPAWN_INTERVAL_FLOOR_MS;
    session.score = RAMP_SCORE_STEP - 1;
    session.field.obstacles.push(obstacle_near_avatar(2, 300.0));

    for _ in 0..10 {
        step_held(&mut session, 400.0, &mut rng);
    }

    assert_eq!(session.score, RAMP_SCORE_STEP);
    assert_eq!(session.field.spawn_interval_ms, SPAWN_INTERVAL_FLOOR_MS);
}

// =============================================================================
// Physics invariants over long runs
// =============================================================================

#[test]
fn test_velocity_and_ceiling_invariants_hold_with_flapping() {
    let (mut session, mut rng) = playing_session(10);

    for tick in 0..600 {
        if session.state == GameState::GameOver {
            process_input(&mut session, InputAction::Activate, &mut rng);
            for obstacle in &mut session.field.obstacles {
                obstacle.x += 100_000.0;
            }
        }
        if tick % 12 == 0 {
            let events = process_input(&mut session, InputAction::Activate, &mut rng);
            assert_eq!(events, vec![GameEvent::Flap]);
            assert!((session.avatar.velocity - FLAP_IMPULSE).abs() < f64::EPSILON);
        }
        step(&mut session, &mut rng);

        assert!(session.avatar.velocity <= MAX_FALL_SPEED + f64::EPSILON);
        assert!(session.avatar.bounds().top >= 0.0);
    }
}

#[test]
fn test_spawned_gaps_always_fit_within_margins() {
    let (mut session, mut rng) = playing_session(11);
    // Run long enough for several spawns at the starting cadence
    for _ in 0..400 {
        step_held(&mut session, 400.0, &mut rng);
    }

    assert!(session.field.obstacles.len() > 2);
    for obstacle in &session.field.obstacles {
        assert!(obstacle.gap_top >= GAP_MARGIN);
        assert!(obstacle.gap_top <= PLAY_HEIGHT - PIPE_GAP - GAP_MARGIN);
    }
}

// =============================================================================
// Replay flow
// =============================================================================

#[test]
fn test_replay_resets_round_and_keeps_record() {
    let (mut session, mut rng) = playing_session(12);
    session.high_score = 1;
    session.score = 4;

    // Crash into the ground
    session.avatar.y = PLAY_HEIGHT;
    session.avatar.velocity = MAX_FALL_SPEED;
    step(&mut session, &mut rng);
    assert_eq!(session.state, GameState::GameOver);
    assert_eq!(session.high_score, 4);

    // Quit does nothing on the game-over screen
    process_input(&mut session, InputAction::Quit, &mut rng);
    assert_eq!(session.state, GameState::GameOver);

    // Activate starts a fresh round
    process_input(&mut session, InputAction::Activate, &mut rng);
    assert_eq!(session.state, GameState::Playing);
    assert_eq!(session.score, 0);
    assert_eq!(session.high_score, 4);
    assert_eq!(session.field.spawn_interval_ms, SPAWN_INTERVAL_START_MS);
    assert!((session.avatar.velocity).abs() < f64::EPSILON);
}
