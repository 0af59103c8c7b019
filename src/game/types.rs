//! Core data structures for a game session.

use crate::constants::*;
use crate::geometry::Rect;
use crate::leaderboard::LeaderboardEntry;
use crate::settings::{GameMode, GameSettings};
use rand::Rng;

/// The player's bird.
///
/// Mutated once per frame by the physics step and by flap input; rebuilt at
/// every play start.
#[derive(Debug, Clone)]
pub struct Bird {
    pub x: f64,
    pub y: f64,
    /// Vertical velocity in px/s (positive = downward).
    pub velocity: f64,
    pub width: f64,
    pub height: f64,
    /// Cosmetic skin index.
    pub variant: u32,
    /// Flap requested since the last physics step.
    pub flap_pending: bool,
}

impl Bird {
    /// Bird at rest, centered vertically, 20% in from the left edge.
    pub fn at_start(screen: ScreenSize, variant: u32) -> Self {
        let size = BIRD_SPRITE_SIZE * BIRD_SCALE;
        Self {
            x: screen.width * BIRD_X_FRACTION,
            y: (screen.height - size) / 2.0,
            velocity: 0.0,
            width: size,
            height: size,
            variant,
            flap_pending: false,
        }
    }

    /// Queues a flap to be consumed by the next physics step.
    pub fn request_flap(&mut self) {
        self.flap_pending = true;
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

/// A pipe pair with a passable gap.
#[derive(Debug, Clone)]
pub struct Obstacle {
    /// X of the left edge.
    pub x: f64,
    /// Y of the top edge of the gap.
    pub gap_y: f64,
    /// Set once the bird passes; guards double-counting.
    pub scored: bool,
}

impl Obstacle {
    /// Spawns an obstacle at `x` with the gap top drawn uniformly from
    /// `[floor(0.2*H), H - gap - floor(0.2*H)]`, keeping both the gap and a
    /// margin on screen for any screen height.
    pub fn spawn<R: Rng>(x: f64, screen_height: f64, gap: f64, rng: &mut R) -> Self {
        let margin = (screen_height * GAP_MARGIN_FRACTION).floor();
        let max_y = (screen_height - gap - margin).max(margin);
        let gap_y = rng.gen_range(margin..=max_y);
        Self {
            x,
            gap_y,
            scored: false,
        }
    }

    /// The pipe hanging from above, ending at the gap top.
    pub fn upper_rect(&self) -> Rect {
        Rect::new(self.x, self.gap_y - PIPE_BODY_HEIGHT, PIPE_WIDTH, PIPE_BODY_HEIGHT)
    }

    /// The pipe rising from below, starting under the gap.
    pub fn lower_rect(&self, gap: f64) -> Rect {
        Rect::new(self.x, self.gap_y + gap, PIPE_WIDTH, PIPE_BODY_HEIGHT)
    }

    /// True once the right edge has passed the left screen edge.
    pub fn is_offscreen(&self) -> bool {
        self.x + PIPE_WIDTH <= 0.0
    }
}

/// Which screen is active. Exactly one at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scene {
    ModeSelect,
    Welcome,
    Play,
    GameOver,
    Leaderboard,
    PickVariant,
}

/// Logical canvas dimensions in pixels.
///
/// Recomputed on terminal resize; play state is never reset by a resize.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenSize {
    pub width: f64,
    pub height: f64,
}

impl ScreenSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Logical size for a terminal of `cols` x `rows` cells.
    pub fn from_terminal(cols: u16, rows: u16) -> Self {
        Self {
            width: cols as f64 * CELL_PX_W,
            height: rows as f64 * CELL_PX_H,
        }
    }
}

/// Events produced by one physics step, for the caller to react to
/// (sounds, score submission) without the core knowing about I/O.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickEvent {
    /// A queued flap was consumed.
    Flapped,
    /// An obstacle was passed; carries the new score.
    Scored(u32),
    /// The run ended; carries the final score.
    Crashed(u32),
    /// The difficulty ramp fired.
    DifficultyRaised(RampStep),
}

/// One step of the rotating difficulty cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RampStep {
    ShrinkGap,
    RaiseSpeed,
    TightenSpawn,
}

/// All state for one game session, passed explicitly to every subsystem.
#[derive(Debug, Clone)]
pub struct GameSession {
    pub mode: GameMode,
    pub scene: Scene,
    /// Active settings snapshot; replaced wholesale by the difficulty ramp.
    pub settings: GameSettings,
    pub score: u32,
    pub bird: Bird,
    pub obstacles: Vec<Obstacle>,
    /// Spawn cadence accumulator in seconds.
    pub spawn_timer: f64,
    pub difficulty_cycle: u32,
    /// Score at which the ramp last fired; prevents re-triggering within a
    /// threshold band.
    pub last_difficulty_score: u32,
    pub screen: ScreenSize,
    /// Last fetched top list for the leaderboard screen.
    pub top_list: Vec<LeaderboardEntry>,
    /// Chosen cosmetic skin.
    pub variant: u32,
}

impl GameSession {
    pub fn new(mode: GameMode, screen: ScreenSize) -> Self {
        Self {
            mode,
            scene: Scene::ModeSelect,
            settings: mode.base_settings(),
            score: 0,
            bird: Bird::at_start(screen, 0),
            obstacles: Vec::new(),
            spawn_timer: 0.0,
            difficulty_cycle: 0,
            last_difficulty_score: 0,
            screen,
            top_list: Vec::new(),
            variant: 0,
        }
    }

    /// Resets run state and enters Play: fresh settings snapshot, bird at the
    /// start position, two obstacles seeded ahead, cadence delayed by one
    /// interval behind them.
    pub fn start_play<R: Rng>(&mut self, rng: &mut R) {
        self.settings = self.mode.base_settings();
        self.score = 0;
        self.difficulty_cycle = 0;
        self.last_difficulty_score = 0;
        self.bird = Bird::at_start(self.screen, self.variant);
        self.spawn_timer = -self.settings.spawn_interval;
        self.obstacles = vec![
            Obstacle::spawn(
                self.screen.width + PIPE_WIDTH * 3.0,
                self.screen.height,
                self.settings.pipe_gap,
                rng,
            ),
            Obstacle::spawn(
                self.screen.width + PIPE_WIDTH * 6.0,
                self.screen.height,
                self.settings.pipe_gap,
                rng,
            ),
        ];
        self.scene = Scene::Play;
    }

    /// Resize hook: logical dimensions change, game state stays put.
    pub fn set_screen(&mut self, screen: ScreenSize) {
        self.screen = screen;
    }

    /// True while some active obstacle still awaits scoring.
    pub fn has_pending_obstacle(&self) -> bool {
        self.obstacles.iter().any(|o| !o.scored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn screen() -> ScreenSize {
        ScreenSize::new(640.0, 480.0)
    }

    #[test]
    fn test_bird_start_position() {
        let bird = Bird::at_start(screen(), 2);
        assert_eq!(bird.x, 640.0 * 0.2);
        assert_eq!(bird.y, (480.0 - bird.height) / 2.0);
        assert_eq!(bird.velocity, 0.0);
        assert_eq!(bird.variant, 2);
        assert!(!bird.flap_pending);
        assert_eq!(bird.width, 34.0 * 1.8);
    }

    #[test]
    fn test_spawn_gap_within_margins() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..500 {
            let o = Obstacle::spawn(700.0, 480.0, 180.0, &mut rng);
            let margin = (480.0f64 * 0.2).floor();
            assert!(o.gap_y >= margin, "gap top {} below margin", o.gap_y);
            assert!(
                o.gap_y <= 480.0 - 180.0 - margin,
                "gap top {} leaves no lower margin",
                o.gap_y
            );
            assert!(!o.scored);
        }
    }

    #[test]
    fn test_spawn_is_deterministic_for_a_seed() {
        let mut a = ChaCha8Rng::seed_from_u64(42);
        let mut b = ChaCha8Rng::seed_from_u64(42);
        let oa = Obstacle::spawn(700.0, 480.0, 180.0, &mut a);
        let ob = Obstacle::spawn(700.0, 480.0, 180.0, &mut b);
        assert_eq!(oa.gap_y, ob.gap_y);
    }

    #[test]
    fn test_spawn_handles_tiny_screens() {
        // Gap plus margins exceeding the screen must not panic; the gap top
        // collapses onto the margin.
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let o = Obstacle::spawn(100.0, 100.0, 90.0, &mut rng);
        assert_eq!(o.gap_y, (100.0f64 * 0.2).floor());
    }

    #[test]
    fn test_obstacle_rects_bracket_the_gap() {
        let o = Obstacle {
            x: 300.0,
            gap_y: 120.0,
            scored: false,
        };
        let upper = o.upper_rect();
        let lower = o.lower_rect(180.0);
        assert_eq!(upper.y + upper.h, 120.0);
        assert_eq!(lower.y, 300.0);
        assert_eq!(upper.w, 52.0);
        assert_eq!(lower.w, 52.0);
    }

    #[test]
    fn test_offscreen_uses_right_edge() {
        let on = Obstacle {
            x: -51.0,
            gap_y: 100.0,
            scored: true,
        };
        let off = Obstacle {
            x: -52.0,
            gap_y: 100.0,
            scored: true,
        };
        assert!(!on.is_offscreen());
        assert!(off.is_offscreen());
    }

    #[test]
    fn test_start_play_resets_run_state() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut session = GameSession::new(GameMode::Classic, screen());
        session.score = 99;
        session.difficulty_cycle = 2;
        session.last_difficulty_score = 75;
        session.settings.pipe_gap = 100.0;
        session.variant = 4;

        session.start_play(&mut rng);

        assert_eq!(session.scene, Scene::Play);
        assert_eq!(session.score, 0);
        assert_eq!(session.difficulty_cycle, 0);
        assert_eq!(session.last_difficulty_score, 0);
        assert_eq!(session.settings.pipe_gap, 180.0);
        assert_eq!(session.bird.variant, 4);
        assert_eq!(session.obstacles.len(), 2);
        assert_eq!(session.spawn_timer, -1.5);
    }

    #[test]
    fn test_start_play_seeds_two_obstacles_ahead() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut session = GameSession::new(GameMode::Classic, screen());
        session.start_play(&mut rng);
        assert_eq!(session.obstacles[0].x, 640.0 + 52.0 * 3.0);
        assert_eq!(session.obstacles[1].x, 640.0 + 52.0 * 6.0);
    }

    #[test]
    fn test_resize_keeps_play_state() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut session = GameSession::new(GameMode::Classic, screen());
        session.start_play(&mut rng);
        session.score = 7;
        let pipes = session.obstacles.clone();

        session.set_screen(ScreenSize::new(1024.0, 768.0));

        assert_eq!(session.scene, Scene::Play);
        assert_eq!(session.score, 7);
        assert_eq!(session.obstacles.len(), pipes.len());
        assert_eq!(session.screen.width, 1024.0);
    }

    #[test]
    fn test_screen_from_terminal() {
        let s = ScreenSize::from_terminal(80, 24);
        assert_eq!(s.width, 640.0);
        assert_eq!(s.height, 384.0);
    }

    #[test]
    fn test_has_pending_obstacle() {
        let mut session = GameSession::new(GameMode::Classic, screen());
        assert!(!session.has_pending_obstacle());
        session.obstacles.push(Obstacle {
            x: 100.0,
            gap_y: 100.0,
            scored: true,
        });
        assert!(!session.has_pending_obstacle());
        session.obstacles.push(Obstacle {
            x: 400.0,
            gap_y: 100.0,
            scored: false,
        });
        assert!(session.has_pending_obstacle());
    }
}
