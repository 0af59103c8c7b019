//! Rendering for the mode-select, welcome and game-over screens.

use super::{button_widget, to_cells};
use crate::game::input::{
    leaderboard_button, mode_select_classic_button, mode_select_speed_run_button, start_button,
    variants_button,
};
use crate::game::types::{GameSession, Scene};
use crate::ui::play_scene::variant_color;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

pub fn render(frame: &mut Frame, area: Rect, session: &GameSession, tick: u64) {
    match session.scene {
        Scene::ModeSelect => render_mode_select(frame, area, session, tick),
        Scene::GameOver => render_game_over(frame, area, session),
        _ => render_welcome(frame, area, session, tick),
    }
}

fn render_mode_select(frame: &mut Frame, area: Rect, session: &GameSession, tick: u64) {
    render_title(frame, area, "Flappy Quakks", "Pick a mode");
    render_idle_bird(frame, area, session, tick);
    button_widget(frame, to_cells(mode_select_classic_button(session.screen)), "Classic");
    button_widget(
        frame,
        to_cells(mode_select_speed_run_button(session.screen)),
        "Speed Run",
    );
}

fn render_welcome(frame: &mut Frame, area: Rect, session: &GameSession, tick: u64) {
    render_title(frame, area, "Flappy Quakks", session.mode.label());
    render_idle_bird(frame, area, session, tick);
    button_widget(
        frame,
        to_cells(start_button(session.screen, Scene::Welcome)),
        "Start",
    );
    button_widget(
        frame,
        to_cells(leaderboard_button(session.screen, Scene::Welcome)),
        "Leaderboard",
    );
    button_widget(frame, to_cells(variants_button(session.screen)), "Quakk Skins");
}

fn render_game_over(frame: &mut Frame, area: Rect, session: &GameSession) {
    render_title(frame, area, "Game Over", "");

    let score_line = format!("Score: {}", session.score);
    let score_area = Rect::new(
        area.x,
        area.y + (area.height as f64 * 0.4) as u16,
        area.width,
        1,
    )
    .intersection(area);
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            score_line,
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center),
        score_area,
    );

    button_widget(
        frame,
        to_cells(start_button(session.screen, Scene::GameOver)),
        "Start",
    );
    button_widget(
        frame,
        to_cells(leaderboard_button(session.screen, Scene::GameOver)),
        "Leaderboard",
    );
}

fn render_title(frame: &mut Frame, area: Rect, title: &str, subtitle: &str) {
    let title_area = Rect::new(
        area.x,
        area.y + (area.height as f64 * 0.12) as u16,
        area.width,
        2,
    )
    .intersection(area);
    let lines = vec![
        Line::from(Span::styled(
            title.to_string(),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            subtitle.to_string(),
            Style::default().fg(Color::Gray),
        )),
    ];
    frame.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center),
        title_area,
    );
}

/// The bird swaying on menu screens, like the original's idle animation.
fn render_idle_bird(frame: &mut Frame, area: Rect, session: &GameSession, tick: u64) {
    if area.width < 2 || area.height == 0 {
        return;
    }
    let sway = ((tick as f64 * 0.2).sin() * 1.5).round() as i32;
    let row = (area.height as i32 / 3 + sway).clamp(0, area.height as i32 - 1) as u16;
    let col = area.width / 5;
    if col >= area.width || row >= area.height {
        return;
    }
    let bird_area = Rect::new(area.x + col, area.y + row, 2.min(area.width - col), 1);
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            "o>",
            Style::default()
                .fg(variant_color(session.variant))
                .add_modifier(Modifier::BOLD),
        ))),
        bird_area,
    );
}
