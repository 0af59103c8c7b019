//! Flappy Quakks - Terminal Arcade Game Library
//!
//! This module exposes the game core and leaderboard backend for testing and
//! external use.

// Allow dead code in library - some functions are only used by the binary
#![allow(dead_code)]

pub mod build_info;
pub mod constants;
pub mod game;
pub mod geometry;
pub mod leaderboard;
pub mod profile;
pub mod reporter;
pub mod server;
pub mod settings;
pub mod variants;

// UI module is not exposed as it's tightly coupled to the terminal
mod ui;
