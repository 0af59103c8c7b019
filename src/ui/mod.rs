//! Terminal rendering for every scene.
//!
//! All game logic speaks logical pixels; this module maps logical rects onto
//! terminal cells (one cell is CELL_PX_W x CELL_PX_H logical pixels) so the
//! same button geometry drives hit-testing and drawing.

mod leaderboard_scene;
mod menu_scene;
pub mod play_scene;
mod variant_scene;

use crate::constants::{CELL_PX_H, CELL_PX_W};
use crate::game::types::{GameSession, Scene};
use crate::geometry;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Draws the active scene. `tick` drives idle animations only.
pub fn draw(frame: &mut Frame, session: &GameSession, tick: u64) {
    let area = frame.size();
    match session.scene {
        Scene::Play => play_scene::render(frame, area, session),
        Scene::Leaderboard => leaderboard_scene::render(frame, area, session),
        Scene::PickVariant => variant_scene::render(frame, area, session),
        Scene::ModeSelect | Scene::Welcome | Scene::GameOver => {
            menu_scene::render(frame, area, session, tick)
        }
    }
}

/// Converts a logical-pixel rect to a terminal cell rect.
pub fn to_cells(logical: geometry::Rect) -> Rect {
    Rect::new(
        (logical.x / CELL_PX_W).round() as u16,
        (logical.y / CELL_PX_H).round() as u16,
        (logical.w / CELL_PX_W).round().max(1.0) as u16,
        (logical.h / CELL_PX_H).round().max(1.0) as u16,
    )
}

/// A bordered, centered-label button box.
fn button_widget(frame: &mut Frame, cells: Rect, label: &str) {
    let frame_area = frame.size();
    let cells = cells.intersection(frame_area);
    if cells.width < 2 || cells.height < 2 {
        return;
    }
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::White));
    let inner = block.inner(cells);
    frame.render_widget(block, cells);
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            label.to_string(),
            Style::default().fg(Color::White),
        )))
        .alignment(Alignment::Center),
        inner,
    );
}
