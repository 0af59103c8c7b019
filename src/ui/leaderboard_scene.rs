//! Rendering for the top-10 leaderboard screen.

use crate::constants::LEADERBOARD_TOP_N;
use crate::game::types::GameSession;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn render(frame: &mut Frame, area: Rect, session: &GameSession) {
    let block = Block::default()
        .title(format!(" Top 10 {} ", session.mode.label()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines = vec![Line::from("")];
    if session.top_list.is_empty() {
        lines.push(Line::from(Span::styled(
            "No scores yet",
            Style::default().fg(Color::Gray),
        )));
    } else {
        for (i, entry) in session.top_list.iter().take(LEADERBOARD_TOP_N).enumerate() {
            let style = if i == 0 {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            lines.push(Line::from(Span::styled(
                format!("{:>2}. {}: {}", i + 1, entry.username, entry.score),
                style,
            )));
        }
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Tap anywhere to return",
        Style::default().fg(Color::Gray),
    )));

    frame.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center),
        inner,
    );
}
