mod build_info;
mod constants;
mod game;
mod geometry;
mod leaderboard;
mod profile;
mod reporter;
mod server;
mod settings;
mod ui;
mod variants;

use constants::*;
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, MouseButton, MouseEventKind,
};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use game::input::map_pointer;
use game::{process_action, process_tick, GameSession, PlayerAction, Scene, ScreenSize, TickEvent, UiEvent};
use ratatui::{backend::CrosstermBackend, Terminal};
use reporter::{apply_net_event, ScoreReporter};
use settings::GameMode;
use std::io;
use std::sync::mpsc;
use std::time::{Duration, Instant};
use variants::VariantBag;

fn main() -> io::Result<()> {
    // Handle CLI arguments
    let args: Vec<String> = std::env::args().collect();

    if args.len() > 1 {
        match args[1].as_str() {
            "serve" => {
                let port = args
                    .get(2)
                    .and_then(|p| p.parse().ok())
                    .or_else(|| std::env::var("PORT").ok().and_then(|p| p.parse().ok()))
                    .unwrap_or(DEFAULT_SERVER_PORT);
                return run_server(port);
            }
            "--version" | "-v" => {
                println!(
                    "quakks {} ({})",
                    build_info::BUILD_DATE,
                    build_info::BUILD_COMMIT
                );
                std::process::exit(0);
            }
            "--help" | "-h" => {
                println!("Flappy Quakks - Terminal Arcade Game\n");
                println!("Usage: quakks [command]\n");
                println!("Commands:");
                println!("  serve [port]  Run the leaderboard server (PORT env also honored)");
                println!("  --version     Show version information");
                println!("  --help        Show this help message");
                println!("\nEnvironment:");
                println!("  QUAKKS_SERVER  Leaderboard server base URL for the game client");
                std::process::exit(0);
            }
            other => {
                eprintln!("Unknown command: {}", other);
                eprintln!("Run 'quakks --help' for usage.");
                std::process::exit(1);
            }
        }
    }

    run_game()
}

/// Runs the leaderboard backend until killed.
fn run_server(port: u16) -> io::Result<()> {
    let store = server::ScoreStore::open()?;
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(server::run(port, store))
}

/// Runs the playable terminal client.
fn run_game() -> io::Result<()> {
    let mut player = profile::load_profile();
    let username = player.username();

    // Background networking: results come back through this channel and are
    // drained once per loop iteration, so only this thread touches the session.
    let (net_tx, net_rx) = mpsc::channel();
    let score_reporter = ScoreReporter::new(reporter::base_url_from_env(), net_tx);
    score_reporter.fetch_variant(&username);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    stdout.execute(EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let size = terminal.size()?;
    let mut session = GameSession::new(
        GameMode::Classic,
        ScreenSize::from_terminal(size.width, size.height),
    );
    if let Some(v) = player.variant {
        session.variant = v;
    }

    let mut rng = rand::thread_rng();
    let mut bag = VariantBag::new();
    let mut last_tick = Instant::now();
    let mut last_step = Instant::now();
    let mut tick_counter: u64 = 0;

    loop {
        terminal.draw(|frame| ui::draw(frame, &session, tick_counter))?;

        // Apply completed background requests (stale ones are dropped by the
        // scene guards inside apply_net_event)
        while let Ok(net_event) = net_rx.try_recv() {
            apply_net_event(&mut session, net_event);
        }

        // Poll for input
        if event::poll(Duration::from_millis(10))? {
            match event::read()? {
                Event::Key(key_event) => {
                    if key_event.code == KeyCode::Char('q') && session.scene != Scene::Play {
                        break;
                    }
                    if let Some(action) = translate_key(&session, key_event.code, &mut bag, &mut rng)
                    {
                        let ui_events = process_action(&mut session, action, &mut rng);
                        react_to_ui_events(
                            &ui_events,
                            &score_reporter,
                            &mut player,
                            &username,
                        );
                    }
                }
                Event::Mouse(mouse_event) => {
                    if let MouseEventKind::Down(MouseButton::Left) = mouse_event.kind {
                        let (x, y) = map_pointer(mouse_event.column, mouse_event.row);
                        let ui_events =
                            process_action(&mut session, PlayerAction::Tap { x, y }, &mut rng);
                        react_to_ui_events(
                            &ui_events,
                            &score_reporter,
                            &mut player,
                            &username,
                        );
                    }
                }
                Event::Resize(cols, rows) => {
                    // Logical dimensions follow the terminal; play state stays
                    session.set_screen(ScreenSize::from_terminal(cols, rows));
                }
                _ => {}
            }
        }

        // Physics tick at the fixed frame rate
        if last_tick.elapsed() >= Duration::from_millis(TICK_INTERVAL_MS) {
            let dt = last_step.elapsed().as_secs_f64().min(MAX_FRAME_DT);
            last_step = Instant::now();

            for tick_event in process_tick(&mut session, dt, &mut rng) {
                if let TickEvent::Crashed(score) = tick_event {
                    // Best-effort submission; failures only get logged
                    score_reporter.submit_score(session.mode, &username, score);
                }
            }

            last_tick = Instant::now();
            tick_counter += 1;
        }
    }

    // Restore terminal
    disable_raw_mode()?;
    terminal.backend_mut().execute(DisableMouseCapture)?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;

    Ok(())
}

/// Maps a key press to a semantic action for the current scene.
fn translate_key<R: rand::Rng>(
    session: &GameSession,
    code: KeyCode,
    bag: &mut VariantBag,
    rng: &mut R,
) -> Option<PlayerAction> {
    let action = match session.scene {
        Scene::ModeSelect => match code {
            KeyCode::Char('c') | KeyCode::Char('1') => {
                PlayerAction::SelectMode(GameMode::Classic)
            }
            KeyCode::Char('s') | KeyCode::Char('2') => {
                PlayerAction::SelectMode(GameMode::SpeedRun)
            }
            _ => return None,
        },
        Scene::Welcome => match code {
            KeyCode::Enter | KeyCode::Char(' ') => PlayerAction::Start,
            KeyCode::Char('l') => PlayerAction::OpenLeaderboard,
            KeyCode::Char('v') => PlayerAction::OpenVariants,
            KeyCode::Esc => PlayerAction::Back,
            _ => return None,
        },
        Scene::Play => match code {
            KeyCode::Char(' ') | KeyCode::Up => PlayerAction::Flap,
            _ => return None,
        },
        Scene::GameOver => match code {
            KeyCode::Enter | KeyCode::Char(' ') => PlayerAction::Start,
            KeyCode::Char('l') => PlayerAction::OpenLeaderboard,
            _ => return None,
        },
        // Any key leaves the leaderboard
        Scene::Leaderboard => PlayerAction::Back,
        Scene::PickVariant => match code {
            KeyCode::Char(c @ '1'..='6') => {
                PlayerAction::SelectVariant(c as u32 - '1' as u32)
            }
            KeyCode::Char('r') => PlayerAction::SelectVariant(bag.draw(rng)),
            KeyCode::Esc => PlayerAction::Back,
            _ => return None,
        },
    };
    Some(action)
}

/// Performs the side effects a scene transition asked for.
fn react_to_ui_events(
    ui_events: &[UiEvent],
    score_reporter: &ScoreReporter,
    player: &mut profile::Profile,
    username: &str,
) {
    for ui_event in ui_events {
        match *ui_event {
            UiEvent::LeaderboardOpened(mode) => score_reporter.fetch_top(mode),
            UiEvent::VariantPicked(variant) => {
                player.variant = Some(variant);
                if let Err(e) = profile::save_profile(player) {
                    eprintln!("Profile save failed: {}", e);
                }
                score_reporter.push_variant(username, variant);
            }
        }
    }
}
