//! Rendering for the cosmetic skin gallery.

use super::to_cells;
use crate::game::input::variant_tiles;
use crate::game::types::GameSession;
use crate::ui::play_scene::variant_color;
use crate::variants::variant_name;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn render(frame: &mut Frame, area: Rect, session: &GameSession) {
    let header = Rect::new(area.x, area.y + 1, area.width, 2).intersection(area);
    frame.render_widget(
        Paragraph::new(vec![
            Line::from(Span::styled(
                "Pick your Quakk",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "1-6 picks, R surprises, Esc backs out",
                Style::default().fg(Color::Gray),
            )),
        ])
        .alignment(Alignment::Center),
        header,
    );

    for (i, tile) in variant_tiles(session.screen).iter().enumerate() {
        let cells = to_cells(*tile).intersection(area);
        if cells.width < 2 || cells.height < 2 {
            continue;
        }
        let selected = session.variant == i as u32;
        let border_style = if selected {
            Style::default()
                .fg(variant_color(i as u32))
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let block = Block::default().borders(Borders::ALL).border_style(border_style);
        let inner = block.inner(cells);
        frame.render_widget(block, cells);

        let marker = if selected { "o> *" } else { "o>" };
        frame.render_widget(
            Paragraph::new(vec![
                Line::from(Span::styled(
                    marker,
                    Style::default()
                        .fg(variant_color(i as u32))
                        .add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(
                    variant_name(i as u32),
                    Style::default().fg(Color::White),
                )),
            ])
            .alignment(Alignment::Center),
            inner,
        );
    }
}
