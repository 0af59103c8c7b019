//! Game modes and their tunable physics settings.
//!
//! Each mode owns an immutable base preset. The difficulty ramp never mutates
//! a preset in place; it builds a fresh `GameSettings` value and swaps it into
//! the session wholesale, so "current settings" can never alias "base
//! settings" between the two modes.

use serde::{Deserialize, Serialize};

/// The two playable modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameMode {
    Classic,
    SpeedRun,
}

impl GameMode {
    pub const ALL: [GameMode; 2] = [GameMode::Classic, GameMode::SpeedRun];

    pub fn label(&self) -> &'static str {
        match self {
            GameMode::Classic => "Classic",
            GameMode::SpeedRun => "Speed Run",
        }
    }

    /// Path of the score submission endpoint for this mode.
    pub fn submit_path(&self) -> &'static str {
        match self {
            GameMode::Classic => "/submit",
            GameMode::SpeedRun => "/sr-submit",
        }
    }

    /// Path of the top-list endpoint for this mode.
    pub fn leaderboard_path(&self) -> &'static str {
        match self {
            GameMode::Classic => "/leaderboard",
            GameMode::SpeedRun => "/sr-leaderboard",
        }
    }

    /// Base settings snapshot for this mode.
    pub fn base_settings(&self) -> GameSettings {
        match self {
            GameMode::Classic => GameSettings::classic(),
            GameMode::SpeedRun => GameSettings::speed_run(),
        }
    }
}

/// Tunable per-mode physics constants, in logical pixels and seconds.
///
/// Read every frame, replaced (never mutated) by the difficulty ramp.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GameSettings {
    /// Downward acceleration in px/s².
    pub gravity: f64,
    /// Velocity a flap resets to, in px/s (negative = upward).
    pub flap_velocity: f64,
    /// Horizontal obstacle speed in px/s.
    pub pipe_speed: f64,
    /// Seconds between cadence spawns.
    pub spawn_interval: f64,
    /// Vertical gap size in px.
    pub pipe_gap: f64,
    /// Hitbox inset in px on every side (forgiving collisions).
    pub hitbox_padding: f64,
}

impl GameSettings {
    pub fn classic() -> Self {
        Self {
            gravity: 950.0,
            flap_velocity: -250.0,
            pipe_speed: 200.0,
            spawn_interval: 1.5,
            pipe_gap: 180.0,
            hitbox_padding: 4.0,
        }
    }

    pub fn speed_run() -> Self {
        Self {
            gravity: 950.0,
            flap_velocity: -250.0,
            pipe_speed: 320.0,
            spawn_interval: 0.9,
            pipe_gap: 160.0,
            hitbox_padding: 4.0,
        }
    }
}
