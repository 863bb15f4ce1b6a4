//! Terminal rendering over read-only simulation snapshots.
//!
//! The simulation works in a 1000x700 world; everything here scales those
//! coordinates to whatever terminal area is available.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::constants::{
    AVATAR_X, PIPE_GAP, PIPE_WIDTH, PLAY_HEIGHT, PLAY_WIDTH,
};
use crate::game_state::{GameSession, GameState};

/// Render the full game screen for the current session state.
pub fn render(frame: &mut Frame, session: &GameSession) {
    let area = frame.size();
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Skyward ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(10), Constraint::Length(2)])
        .split(inner);

    render_play_area(frame, chunks[0], session);
    render_status_bar(frame, chunks[1], session);

    match session.state {
        GameState::Menu => render_menu_overlay(frame, chunks[0], session),
        GameState::GameOver => render_game_over_overlay(frame, chunks[0], session),
        GameState::Playing => {}
    }
}

/// Render the scrolling play area with the avatar and pipes.
fn render_play_area(frame: &mut Frame, area: Rect, session: &GameSession) {
    let width = area.width as usize;
    let height = area.height as usize;

    if width == 0 || height == 0 {
        return;
    }

    let cell_w = PLAY_WIDTH / width as f64;
    let cell_h = PLAY_HEIGHT / height as f64;

    // On the menu screen the avatar is shown re-centered. Display only,
    // the simulated position is untouched.
    let avatar_y = match session.state {
        GameState::Menu => PLAY_HEIGHT / 2.0,
        _ => session.avatar.y,
    };
    let avatar_row = ((avatar_y / PLAY_HEIGHT) * height as f64) as usize;
    let avatar_col = ((AVATAR_X / PLAY_WIDTH) * width as f64) as usize;

    let avatar_char = if session.avatar.rotation > 10.0 {
        "▲"
    } else if session.avatar.rotation < -10.0 {
        "▼"
    } else {
        "►"
    };

    let mut lines = Vec::with_capacity(height);

    for display_row in 0..height {
        let world_y = (display_row as f64 + 0.5) * cell_h;
        let mut spans = Vec::with_capacity(width);

        for display_col in 0..width {
            if display_row == avatar_row && display_col == avatar_col {
                spans.push(Span::styled(
                    avatar_char,
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                ));
                continue;
            }

            let world_x = (display_col as f64 + 0.5) * cell_w;

            let mut is_pipe = false;
            let mut is_gap_edge = false;
            for obstacle in &session.field.obstacles {
                if world_x >= obstacle.x && world_x < obstacle.x + PIPE_WIDTH {
                    let gap_bottom = obstacle.gap_top + PIPE_GAP;
                    if world_y < obstacle.gap_top || world_y >= gap_bottom {
                        is_pipe = true;
                    } else if world_y < obstacle.gap_top + cell_h
                        || world_y >= gap_bottom - cell_h
                    {
                        is_gap_edge = true;
                    }
                    break;
                }
            }

            if is_pipe {
                spans.push(Span::styled("█", Style::default().fg(Color::Green)));
            } else if is_gap_edge {
                spans.push(Span::styled("░", Style::default().fg(Color::DarkGray)));
            } else {
                spans.push(Span::raw(" "));
            }
        }

        lines.push(Line::from(spans));
    }

    frame.render_widget(Paragraph::new(lines), area);
}

/// Render the score line and key hints at the bottom.
fn render_status_bar(frame: &mut Frame, area: Rect, session: &GameSession) {
    let (message, color) = match session.state {
        GameState::Menu => ("Press Space to start!".to_string(), Color::Yellow),
        GameState::Playing => (
            format!("Score: {}   Best: {}", session.score, session.high_score),
            Color::Green,
        ),
        GameState::GameOver => (
            format!("Crashed at {}   Best: {}", session.score, session.high_score),
            Color::Red,
        ),
    };

    let lines = vec![
        Line::from(Span::styled(
            format!(" {}", message),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled(" [Space/Up/Enter] ", Style::default().fg(Color::Cyan)),
            Span::styled("Flap  ", Style::default().fg(Color::DarkGray)),
            Span::styled("[Q/Esc] ", Style::default().fg(Color::Cyan)),
            Span::styled("Quit", Style::default().fg(Color::DarkGray)),
        ]),
    ];

    frame.render_widget(Paragraph::new(lines), area);
}

/// Render the title screen overlay.
fn render_menu_overlay(frame: &mut Frame, area: Rect, session: &GameSession) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "S K Y W A R D",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(format!("High Score: {}", session.high_score)),
        Line::from(""),
        Line::from(Span::styled(
            "Press Space to start",
            Style::default().fg(Color::Green),
        )),
    ];
    render_overlay(frame, area, lines, Color::Yellow);
}

/// Render the end-of-round overlay.
fn render_game_over_overlay(frame: &mut Frame, area: Rect, session: &GameSession) {
    let best_line = if session.score >= session.high_score && session.score > 0 {
        Line::from(Span::styled(
            "New best!",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ))
    } else {
        Line::from(format!("Best: {}", session.high_score))
    };

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "GAME OVER",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(format!("Score: {}", session.score)),
        best_line,
        Line::from(""),
        Line::from(Span::styled(
            "Press Space to retry",
            Style::default().fg(Color::Green),
        )),
    ];
    render_overlay(frame, area, lines, Color::Red);
}

/// Draw a centered bordered box with the given lines over the play area.
fn render_overlay(frame: &mut Frame, area: Rect, lines: Vec<Line>, border: Color) {
    let box_height = (lines.len() as u16 + 2).min(area.height);
    let box_width = 34.min(area.width);
    let overlay = Rect {
        x: area.x + (area.width.saturating_sub(box_width)) / 2,
        y: area.y + (area.height.saturating_sub(box_height)) / 2,
        width: box_width,
        height: box_height,
    };

    frame.render_widget(Clear, overlay);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border));
    let inner = block.inner(overlay);
    frame.render_widget(block, overlay);
    frame.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center),
        inner,
    );
}
