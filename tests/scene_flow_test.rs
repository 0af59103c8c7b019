//! Integration test: scene state machine
//!
//! Walks the full screen graph the way a player would: pick a mode, start a
//! run, crash, browse the leaderboard, choose a skin.

use quakks::game::types::{GameSession, Scene, ScreenSize, TickEvent};
use quakks::game::{process_action, process_tick, PlayerAction, UiEvent};
use quakks::leaderboard::LeaderboardEntry;
use quakks::reporter::{apply_net_event, NetEvent};
use quakks::settings::GameMode;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn test_rng() -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(42)
}

fn fresh_session() -> GameSession {
    GameSession::new(GameMode::Classic, ScreenSize::new(640.0, 480.0))
}

fn act(s: &mut GameSession, rng: &mut ChaCha8Rng, action: PlayerAction) -> Vec<UiEvent> {
    process_action(s, action, rng)
}

#[test]
fn test_full_session_walkthrough() {
    let mut rng = test_rng();
    let mut s = fresh_session();
    assert_eq!(s.scene, Scene::ModeSelect);

    // Mode select -> welcome
    act(&mut s, &mut rng, PlayerAction::SelectMode(GameMode::SpeedRun));
    assert_eq!(s.scene, Scene::Welcome);
    assert_eq!(s.mode, GameMode::SpeedRun);

    // Welcome -> play
    act(&mut s, &mut rng, PlayerAction::Start);
    assert_eq!(s.scene, Scene::Play);

    // Crash -> game over, with the submission trigger
    s.bird.y = -5.0;
    let events = process_tick(&mut s, 1.0 / 30.0, &mut rng);
    assert_eq!(s.scene, Scene::GameOver);
    assert!(events
        .iter()
        .any(|e| matches!(e, TickEvent::Crashed(_))));

    // Game over -> leaderboard (fetch requested for the right mode)
    let ui_events = act(&mut s, &mut rng, PlayerAction::OpenLeaderboard);
    assert_eq!(s.scene, Scene::Leaderboard);
    assert_eq!(
        ui_events,
        vec![UiEvent::LeaderboardOpened(GameMode::SpeedRun)]
    );

    // Any tap leaves the leaderboard
    act(&mut s, &mut rng, PlayerAction::Tap { x: 3.0, y: 3.0 });
    assert_eq!(s.scene, Scene::Welcome);

    // Welcome -> skin gallery -> welcome, persisting the pick
    act(&mut s, &mut rng, PlayerAction::OpenVariants);
    assert_eq!(s.scene, Scene::PickVariant);
    let ui_events = act(&mut s, &mut rng, PlayerAction::SelectVariant(5));
    assert_eq!(s.scene, Scene::Welcome);
    assert_eq!(ui_events, vec![UiEvent::VariantPicked(5)]);

    // The next run flies the chosen skin
    act(&mut s, &mut rng, PlayerAction::Start);
    assert_eq!(s.bird.variant, 5);
}

#[test]
fn test_game_over_restart_loop() {
    let mut rng = test_rng();
    let mut s = fresh_session();
    act(&mut s, &mut rng, PlayerAction::SelectMode(GameMode::Classic));

    for _ in 0..3 {
        act(&mut s, &mut rng, PlayerAction::Start);
        assert_eq!(s.scene, Scene::Play);
        s.bird.y = -5.0;
        process_tick(&mut s, 1.0 / 30.0, &mut rng);
        assert_eq!(s.scene, Scene::GameOver);
    }
}

#[test]
fn test_crash_emits_final_score() {
    let mut rng = test_rng();
    let mut s = fresh_session();
    act(&mut s, &mut rng, PlayerAction::SelectMode(GameMode::Classic));
    act(&mut s, &mut rng, PlayerAction::Start);
    s.score = 17;
    s.bird.y = -5.0;

    let events = process_tick(&mut s, 1.0 / 30.0, &mut rng);
    assert!(events.contains(&TickEvent::Crashed(17)));
}

#[test]
fn test_fetched_list_renders_after_arrival() {
    let mut rng = test_rng();
    let mut s = fresh_session();
    act(&mut s, &mut rng, PlayerAction::SelectMode(GameMode::Classic));
    act(&mut s, &mut rng, PlayerAction::OpenLeaderboard);

    // The screen opens empty; the async result fills it in
    assert!(s.top_list.is_empty());
    apply_net_event(
        &mut s,
        NetEvent::TopList {
            mode: GameMode::Classic,
            entries: vec![LeaderboardEntry {
                username: "@alice".to_string(),
                score: 10,
            }],
        },
    );
    assert_eq!(s.top_list.len(), 1);
}

#[test]
fn test_late_response_after_leaving_is_ignored() {
    let mut rng = test_rng();
    let mut s = fresh_session();
    act(&mut s, &mut rng, PlayerAction::SelectMode(GameMode::Classic));
    act(&mut s, &mut rng, PlayerAction::OpenLeaderboard);
    act(&mut s, &mut rng, PlayerAction::Back);
    assert_eq!(s.scene, Scene::Welcome);

    apply_net_event(
        &mut s,
        NetEvent::TopList {
            mode: GameMode::Classic,
            entries: vec![LeaderboardEntry {
                username: "@late".to_string(),
                score: 1,
            }],
        },
    );
    assert!(s.top_list.is_empty());
}

#[test]
fn test_flap_only_affects_play() {
    let mut rng = test_rng();
    let mut s = fresh_session();
    act(&mut s, &mut rng, PlayerAction::Flap);
    assert!(!s.bird.flap_pending);
    assert_eq!(s.scene, Scene::ModeSelect);
}

#[test]
fn test_play_is_not_interrupted_by_menu_actions() {
    let mut rng = test_rng();
    let mut s = fresh_session();
    act(&mut s, &mut rng, PlayerAction::SelectMode(GameMode::Classic));
    act(&mut s, &mut rng, PlayerAction::Start);

    let ui_events = act(&mut s, &mut rng, PlayerAction::OpenLeaderboard);
    assert!(ui_events.is_empty());
    assert_eq!(s.scene, Scene::Play);
}
