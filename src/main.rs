mod audio;
mod constants;
mod game_logic;
mod game_state;
mod persistence;
mod ui;

use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use rand::rngs::ThreadRng;
use ratatui::{backend::CrosstermBackend, Terminal};

use audio::AudioPlayer;
use constants::FRAME_INTERVAL_MS;
use game_logic::{process_input, tick_session};
use game_state::{GameEvent, GameSession, InputAction};

fn main() -> io::Result<()> {
    env_logger::init();

    let high_score = persistence::load_high_score();
    let mut rng = rand::thread_rng();
    let mut session = GameSession::new(high_score, &mut rng);
    let audio = AudioPlayer::new();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_loop(&mut terminal, &mut session, audio.as_ref(), &mut rng);

    // Restore the terminal even when the loop errored
    disable_raw_mode()?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;

    persistence::save_high_score(session.high_score);

    result
}

fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    session: &mut GameSession,
    audio: Option<&AudioPlayer>,
    rng: &mut ThreadRng,
) -> io::Result<()> {
    let mut last_frame = Instant::now();

    loop {
        terminal.draw(|frame| ui::render(frame, session))?;

        let mut events = Vec::new();

        // The poll timeout doubles as the ~60 FPS frame pacing sleep
        if event::poll(Duration::from_millis(FRAME_INTERVAL_MS))? {
            if let Event::Key(key_event) = event::read()? {
                match map_key(key_event.code) {
                    Some(InputAction::Quit) => return Ok(()),
                    Some(InputAction::Activate) => {
                        events.extend(process_input(session, InputAction::Activate, rng));
                    }
                    None => {}
                }
            }
        }

        let dt_ms = last_frame.elapsed().as_millis() as u64;
        last_frame = Instant::now();
        events.extend(tick_session(session, dt_ms, rng));

        // A Hit means the round just ended: persist the record right away
        // so an abnormal exit cannot lose it
        if events.contains(&GameEvent::Hit) {
            persistence::save_high_score(session.high_score);
        }

        if let Some(audio) = audio {
            for event in &events {
                audio.play(*event);
            }
        }
    }
}

/// Map raw key codes to the reduced input alphabet. Unrecognized keys
/// are dropped.
fn map_key(code: KeyCode) -> Option<InputAction> {
    match code {
        KeyCode::Char(' ') | KeyCode::Up | KeyCode::Enter => Some(InputAction::Activate),
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(InputAction::Quit),
        _ => None,
    }
}
