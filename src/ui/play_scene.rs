//! Rendering for the play screen: pipes, bird, ground strip and score.

use crate::constants::*;
use crate::game::types::GameSession;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Skin colors, indexed by variant id.
pub fn variant_color(variant: u32) -> Color {
    match variant {
        1 => Color::LightYellow,
        2 => Color::Blue,
        3 => Color::Green,
        4 => Color::White,
        5 => Color::LightRed,
        _ => Color::Yellow,
    }
}

/// Paints the whole playfield cell by cell, mapping each cell center into
/// logical pixel space.
pub fn render(frame: &mut Frame, area: Rect, session: &GameSession) {
    let ground_y = GROUND_FRACTION * session.screen.height;
    let bird = session.bird.rect();
    let gap = session.settings.pipe_gap;

    let mut lines = Vec::with_capacity(area.height as usize);
    for row in 0..area.height {
        let y = (row as f64 + 0.5) * CELL_PX_H;
        let mut spans = Vec::with_capacity(area.width as usize);
        for col in 0..area.width {
            let x = (col as f64 + 0.5) * CELL_PX_W;

            if bird.contains(x, y) {
                let glyph = if session.bird.velocity < -50.0 {
                    "^"
                } else {
                    ">"
                };
                spans.push(Span::styled(
                    glyph,
                    Style::default()
                        .fg(variant_color(session.bird.variant))
                        .add_modifier(Modifier::BOLD),
                ));
                continue;
            }

            if y >= ground_y {
                spans.push(Span::styled("▒", Style::default().fg(Color::LightGreen)));
                continue;
            }

            let in_pipe = session.obstacles.iter().any(|o| {
                x >= o.x && x < o.x + PIPE_WIDTH && (y < o.gap_y || y >= o.gap_y + gap)
            });
            if in_pipe {
                spans.push(Span::styled("█", Style::default().fg(Color::Green)));
            } else {
                spans.push(Span::raw(" "));
            }
        }
        lines.push(Line::from(spans));
    }
    frame.render_widget(Paragraph::new(lines), area);

    // Score, centered near the top
    let score_text = session.score.to_string();
    let score_area = Rect::new(
        area.x + (area.width.saturating_sub(score_text.len() as u16)) / 2,
        area.y + 1,
        score_text.len() as u16,
        1,
    )
    .intersection(area);
    if score_area.height == 0 {
        return;
    }
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            score_text,
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ))),
        score_area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variant_colors_are_distinct() {
        let colors: Vec<Color> = (0..VARIANT_COUNT).map(variant_color).collect();
        for i in 0..colors.len() {
            for j in i + 1..colors.len() {
                assert_ne!(colors[i], colors[j]);
            }
        }
    }

    #[test]
    fn test_unknown_variant_uses_default_color() {
        assert_eq!(variant_color(999), Color::Yellow);
    }
}
