//! Scene transitions and input routing.
//!
//! Pointer coordinates arrive in terminal cells and are mapped into the
//! logical canvas space before hit-testing, so button geometry is independent
//! of the rendered size. Keyboard input is translated by the binary into the
//! same `PlayerAction`s, keeping all transition logic in one place.

use super::types::{GameSession, Scene};
use crate::constants::*;
use crate::geometry::Rect;
use crate::settings::GameMode;
use rand::Rng;

/// A semantic input, after key/pointer translation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlayerAction {
    /// Pointer tap at logical canvas coordinates.
    Tap { x: f64, y: f64 },
    Flap,
    Start,
    SelectMode(GameMode),
    OpenLeaderboard,
    OpenVariants,
    SelectVariant(u32),
    Back,
}

/// Side effects the caller must perform after a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiEvent {
    /// The leaderboard screen was opened; fetch the top list for this mode.
    LeaderboardOpened(GameMode),
    /// A cosmetic variant was chosen; persist it locally and remotely.
    VariantPicked(u32),
}

/// Maps a terminal cell position to logical canvas coordinates, aiming at the
/// cell center.
pub fn map_pointer(col: u16, row: u16) -> (f64, f64) {
    ((col as f64 + 0.5) * CELL_PX_W, (row as f64 + 0.5) * CELL_PX_H)
}

/// Routes one action through the scene state machine.
pub fn process_action<R: Rng>(
    session: &mut GameSession,
    action: PlayerAction,
    rng: &mut R,
) -> Vec<UiEvent> {
    let mut events = Vec::new();
    match session.scene {
        Scene::ModeSelect => match action {
            PlayerAction::SelectMode(mode) => enter_welcome(session, mode),
            PlayerAction::Tap { x, y } => {
                if mode_select_classic_button(session.screen).contains(x, y) {
                    enter_welcome(session, GameMode::Classic);
                } else if mode_select_speed_run_button(session.screen).contains(x, y) {
                    enter_welcome(session, GameMode::SpeedRun);
                }
            }
            _ => {}
        },
        Scene::Welcome => match action {
            PlayerAction::Start => session.start_play(rng),
            PlayerAction::OpenLeaderboard => open_leaderboard(session, &mut events),
            PlayerAction::OpenVariants => session.scene = Scene::PickVariant,
            PlayerAction::Tap { x, y } => {
                if start_button(session.screen, Scene::Welcome).contains(x, y) {
                    session.start_play(rng);
                } else if leaderboard_button(session.screen, Scene::Welcome).contains(x, y) {
                    open_leaderboard(session, &mut events);
                } else if variants_button(session.screen).contains(x, y) {
                    session.scene = Scene::PickVariant;
                }
            }
            PlayerAction::Back => session.scene = Scene::ModeSelect,
            _ => {}
        },
        Scene::Play => match action {
            PlayerAction::Flap | PlayerAction::Tap { .. } => session.bird.request_flap(),
            _ => {}
        },
        Scene::GameOver => match action {
            PlayerAction::Start => session.start_play(rng),
            PlayerAction::OpenLeaderboard => open_leaderboard(session, &mut events),
            PlayerAction::Tap { x, y } => {
                if start_button(session.screen, Scene::GameOver).contains(x, y) {
                    session.start_play(rng);
                } else if leaderboard_button(session.screen, Scene::GameOver).contains(x, y) {
                    open_leaderboard(session, &mut events);
                }
            }
            _ => {}
        },
        // Any tap or key returns to the welcome screen.
        Scene::Leaderboard => match action {
            PlayerAction::Tap { .. }
            | PlayerAction::Back
            | PlayerAction::Start
            | PlayerAction::Flap => session.scene = Scene::Welcome,
            _ => {}
        },
        Scene::PickVariant => match action {
            PlayerAction::SelectVariant(v) if v < VARIANT_COUNT => {
                session.variant = v;
                session.scene = Scene::Welcome;
                events.push(UiEvent::VariantPicked(v));
            }
            PlayerAction::Tap { x, y } => {
                for (i, tile) in variant_tiles(session.screen).iter().enumerate() {
                    if tile.contains(x, y) {
                        session.variant = i as u32;
                        session.scene = Scene::Welcome;
                        events.push(UiEvent::VariantPicked(i as u32));
                        break;
                    }
                }
            }
            PlayerAction::Back => session.scene = Scene::Welcome,
            _ => {}
        },
    }
    events
}

fn enter_welcome(session: &mut GameSession, mode: GameMode) {
    session.mode = mode;
    session.settings = mode.base_settings();
    session.scene = Scene::Welcome;
}

fn open_leaderboard(session: &mut GameSession, events: &mut Vec<UiEvent>) {
    session.scene = Scene::Leaderboard;
    events.push(UiEvent::LeaderboardOpened(session.mode));
}

// Button geometry, in logical pixels. Shared by hit-testing and rendering.

pub fn mode_select_classic_button(screen: super::types::ScreenSize) -> Rect {
    Rect::new(screen.width / 2.0 - BUTTON_W / 2.0, screen.height * 0.6, BUTTON_W, BUTTON_H)
}

pub fn mode_select_speed_run_button(screen: super::types::ScreenSize) -> Rect {
    Rect::new(screen.width / 2.0 - BUTTON_W / 2.0, screen.height * 0.7, BUTTON_W, BUTTON_H)
}

/// Start button. On the game-over screen the two buttons sit side by side.
pub fn start_button(screen: super::types::ScreenSize, scene: Scene) -> Rect {
    match scene {
        Scene::GameOver => Rect::new(screen.width / 2.0 - 160.0, screen.height * 0.6, BUTTON_W, BUTTON_H),
        _ => Rect::new(screen.width / 2.0 - BUTTON_W / 2.0, screen.height * 0.6, BUTTON_W, BUTTON_H),
    }
}

pub fn leaderboard_button(screen: super::types::ScreenSize, scene: Scene) -> Rect {
    match scene {
        Scene::GameOver => Rect::new(screen.width / 2.0 + 10.0, screen.height * 0.6, BUTTON_W, BUTTON_H),
        _ => Rect::new(screen.width / 2.0 - BUTTON_W / 2.0, screen.height * 0.7, BUTTON_W, BUTTON_H),
    }
}

pub fn variants_button(screen: super::types::ScreenSize) -> Rect {
    Rect::new(screen.width / 2.0 - BUTTON_W / 2.0, screen.height * 0.8, BUTTON_W, BUTTON_H)
}

/// Tile rects for the variant gallery: a centered 3x2 grid.
pub fn variant_tiles(screen: super::types::ScreenSize) -> Vec<Rect> {
    let cols = 3;
    let tile_w = 120.0;
    let tile_h = 90.0;
    let gap = 20.0;
    let grid_w = cols as f64 * tile_w + (cols - 1) as f64 * gap;
    let x0 = (screen.width - grid_w) / 2.0;
    let y0 = screen.height * 0.3;
    (0..VARIANT_COUNT)
        .map(|i| {
            let col = (i % cols) as f64;
            let row = (i / cols) as f64;
            Rect::new(
                x0 + col * (tile_w + gap),
                y0 + row * (tile_h + gap),
                tile_w,
                tile_h,
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::types::ScreenSize;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn session() -> GameSession {
        GameSession::new(GameMode::Classic, ScreenSize::new(640.0, 480.0))
    }

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(9)
    }

    fn tap_center(rect: Rect) -> PlayerAction {
        PlayerAction::Tap {
            x: rect.x + rect.w / 2.0,
            y: rect.y + rect.h / 2.0,
        }
    }

    #[test]
    fn test_mode_select_to_welcome() {
        let mut s = session();
        let mut r = rng();
        process_action(&mut s, PlayerAction::SelectMode(GameMode::SpeedRun), &mut r);
        assert_eq!(s.scene, Scene::Welcome);
        assert_eq!(s.mode, GameMode::SpeedRun);
        assert_eq!(s.settings.pipe_speed, 320.0);
    }

    #[test]
    fn test_mode_select_by_tap() {
        let mut s = session();
        let mut r = rng();
        let tap = tap_center(mode_select_classic_button(s.screen));
        process_action(&mut s, tap, &mut r);
        assert_eq!(s.scene, Scene::Welcome);
        assert_eq!(s.mode, GameMode::Classic);
    }

    #[test]
    fn test_tap_outside_buttons_is_ignored() {
        let mut s = session();
        let mut r = rng();
        process_action(&mut s, PlayerAction::Tap { x: 1.0, y: 1.0 }, &mut r);
        assert_eq!(s.scene, Scene::ModeSelect);
    }

    #[test]
    fn test_welcome_start_enters_play() {
        let mut s = session();
        let mut r = rng();
        s.scene = Scene::Welcome;
        process_action(&mut s, PlayerAction::Start, &mut r);
        assert_eq!(s.scene, Scene::Play);
        assert_eq!(s.obstacles.len(), 2);
    }

    #[test]
    fn test_welcome_leaderboard_emits_fetch_event() {
        let mut s = session();
        let mut r = rng();
        s.scene = Scene::Welcome;
        let events = process_action(&mut s, PlayerAction::OpenLeaderboard, &mut r);
        assert_eq!(s.scene, Scene::Leaderboard);
        assert_eq!(events, vec![UiEvent::LeaderboardOpened(GameMode::Classic)]);
    }

    #[test]
    fn test_play_tap_flaps() {
        let mut s = session();
        let mut r = rng();
        s.scene = Scene::Welcome;
        process_action(&mut s, PlayerAction::Start, &mut r);
        process_action(&mut s, PlayerAction::Tap { x: 300.0, y: 200.0 }, &mut r);
        assert!(s.bird.flap_pending);
    }

    #[test]
    fn test_game_over_restart() {
        let mut s = session();
        let mut r = rng();
        s.scene = Scene::GameOver;
        s.score = 12;
        let tap = tap_center(start_button(s.screen, Scene::GameOver));
        process_action(&mut s, tap, &mut r);
        assert_eq!(s.scene, Scene::Play);
        assert_eq!(s.score, 0);
    }

    #[test]
    fn test_game_over_buttons_do_not_overlap() {
        let s = session();
        let start = start_button(s.screen, Scene::GameOver);
        let lb = leaderboard_button(s.screen, Scene::GameOver);
        assert!(!start.intersects(&lb));
    }

    #[test]
    fn test_leaderboard_any_tap_returns_to_welcome() {
        let mut s = session();
        let mut r = rng();
        s.scene = Scene::Leaderboard;
        process_action(&mut s, PlayerAction::Tap { x: 5.0, y: 5.0 }, &mut r);
        assert_eq!(s.scene, Scene::Welcome);
    }

    #[test]
    fn test_pick_variant_flow() {
        let mut s = session();
        let mut r = rng();
        s.scene = Scene::Welcome;
        process_action(&mut s, PlayerAction::OpenVariants, &mut r);
        assert_eq!(s.scene, Scene::PickVariant);

        let events = process_action(&mut s, PlayerAction::SelectVariant(3), &mut r);
        assert_eq!(s.scene, Scene::Welcome);
        assert_eq!(s.variant, 3);
        assert_eq!(events, vec![UiEvent::VariantPicked(3)]);
    }

    #[test]
    fn test_pick_variant_by_tap() {
        let mut s = session();
        let mut r = rng();
        s.scene = Scene::PickVariant;
        let tiles = variant_tiles(s.screen);
        let tap = tap_center(tiles[4]);
        let events = process_action(&mut s, tap, &mut r);
        assert_eq!(s.variant, 4);
        assert_eq!(events, vec![UiEvent::VariantPicked(4)]);
    }

    #[test]
    fn test_out_of_range_variant_ignored() {
        let mut s = session();
        let mut r = rng();
        s.scene = Scene::PickVariant;
        let events = process_action(&mut s, PlayerAction::SelectVariant(99), &mut r);
        assert!(events.is_empty());
        assert_eq!(s.scene, Scene::PickVariant);
    }

    #[test]
    fn test_variant_tiles_are_disjoint() {
        let tiles = variant_tiles(ScreenSize::new(640.0, 480.0));
        assert_eq!(tiles.len(), VARIANT_COUNT as usize);
        for i in 0..tiles.len() {
            for j in i + 1..tiles.len() {
                assert!(!tiles[i].intersects(&tiles[j]));
            }
        }
    }

    #[test]
    fn test_map_pointer_scales_cells_to_logical_px() {
        let (x, y) = map_pointer(10, 5);
        assert_eq!(x, 10.5 * 8.0);
        assert_eq!(y, 5.5 * 16.0);
    }

    #[test]
    fn test_mapped_tap_hits_centered_button() {
        // A tap on the cell containing the button center must route correctly
        let mut s = session();
        let mut r = rng();
        let btn = mode_select_classic_button(s.screen);
        let col = ((btn.x + btn.w / 2.0) / 8.0) as u16;
        let row = ((btn.y + btn.h / 2.0) / 16.0) as u16;
        let (x, y) = map_pointer(col, row);
        process_action(&mut s, PlayerAction::Tap { x, y }, &mut r);
        assert_eq!(s.scene, Scene::Welcome);
    }
}
