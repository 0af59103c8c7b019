//! Client-side score reporting and leaderboard fetching.
//!
//! Every call is fire-and-forget: a background thread does the blocking HTTP
//! request and posts the outcome into a channel the game loop drains once per
//! tick. Game state is only ever touched from that loop, and a response that
//! arrives after the player moved on is dropped by an explicit scene guard.

use crate::game::types::{GameSession, Scene};
use crate::leaderboard::LeaderboardEntry;
use crate::settings::GameMode;
use serde::Deserialize;
use std::sync::mpsc::Sender;
use std::thread;

/// Outcome of a background request, delivered to the game loop.
#[derive(Debug, Clone)]
pub enum NetEvent {
    TopList {
        mode: GameMode,
        entries: Vec<LeaderboardEntry>,
    },
    TopListFailed {
        mode: GameMode,
        reason: String,
    },
    VariantLoaded {
        variant: Option<u32>,
    },
    SubmitFailed {
        mode: GameMode,
        reason: String,
    },
}

#[derive(Deserialize)]
struct VariantResponse {
    variant: Option<u32>,
}

/// Spawns the background requests against the leaderboard server.
pub struct ScoreReporter {
    base_url: String,
    tx: Sender<NetEvent>,
}

/// Server base URL from the environment, with the local default.
pub fn base_url_from_env() -> String {
    std::env::var("QUAKKS_SERVER").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

impl ScoreReporter {
    pub fn new(base_url: String, tx: Sender<NetEvent>) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            tx,
        }
    }

    /// Submits a finished run. Failures are reported on the channel and
    /// logged; they never block the game-over transition.
    pub fn submit_score(&self, mode: GameMode, username: &str, score: u32) {
        let url = format!("{}{}", self.base_url, mode.submit_path());
        let tx = self.tx.clone();
        let username = username.to_string();
        thread::spawn(move || {
            let result = ureq::post(&url).send_json(serde_json::json!({
                "username": username,
                "score": score,
            }));
            if let Err(e) = result {
                let _ = tx.send(NetEvent::SubmitFailed {
                    mode,
                    reason: e.to_string(),
                });
            }
        });
    }

    /// Fetches the top list for the leaderboard screen.
    pub fn fetch_top(&self, mode: GameMode) {
        let url = format!("{}{}", self.base_url, mode.leaderboard_path());
        let tx = self.tx.clone();
        thread::spawn(move || {
            let event = match ureq::get(&url).call() {
                Ok(response) => match response.into_json::<Vec<LeaderboardEntry>>() {
                    Ok(entries) => NetEvent::TopList { mode, entries },
                    Err(e) => NetEvent::TopListFailed {
                        mode,
                        reason: e.to_string(),
                    },
                },
                Err(e) => NetEvent::TopListFailed {
                    mode,
                    reason: e.to_string(),
                },
            };
            let _ = tx.send(event);
        });
    }

    /// Fetches the remotely persisted skin for this player.
    pub fn fetch_variant(&self, username: &str) {
        let url = format!(
            "{}/getQuakk?username={}",
            self.base_url,
            encode_query_value(username)
        );
        let tx = self.tx.clone();
        thread::spawn(move || {
            if let Ok(response) = ureq::get(&url).call() {
                if let Ok(parsed) = response.into_json::<VariantResponse>() {
                    let _ = tx.send(NetEvent::VariantLoaded {
                        variant: parsed.variant,
                    });
                }
            }
        });
    }

    /// Persists a chosen skin remotely. Best-effort, outcome ignored.
    pub fn push_variant(&self, username: &str, variant: u32) {
        let url = format!("{}/selectQuakk", self.base_url);
        let username = username.to_string();
        thread::spawn(move || {
            let result = ureq::post(&url).send_json(serde_json::json!({
                "username": username,
                "variant": variant,
            }));
            if let Err(e) = result {
                eprintln!("Variant save failed: {}", e);
            }
        });
    }
}

/// Applies one delivered event to the session, dropping anything that no
/// longer matches the current scene.
pub fn apply_net_event(session: &mut GameSession, event: NetEvent) {
    match event {
        NetEvent::TopList { mode, entries } => {
            // Only while still looking at this mode's leaderboard
            if session.scene == Scene::Leaderboard && session.mode == mode {
                session.top_list = entries;
            }
        }
        NetEvent::TopListFailed { mode, reason } => {
            eprintln!("Leaderboard load failed ({}): {}", mode.label(), reason);
        }
        NetEvent::VariantLoaded { variant } => {
            // Never stomp an in-progress selection
            if session.scene != Scene::PickVariant {
                if let Some(v) = variant {
                    session.variant = v;
                }
            }
        }
        NetEvent::SubmitFailed { mode, reason } => {
            eprintln!("Submit error ({}): {}", mode.label(), reason);
        }
    }
}

/// Percent-encodes a query value (everything but unreserved characters).
fn encode_query_value(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for b in raw.bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(b as char)
            }
            _ => out.push_str(&format!("%{:02X}", b)),
        }
    }
    out
}
