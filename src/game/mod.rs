//! The playable core: session state, physics, difficulty and scene routing.

pub mod difficulty;
pub mod input;
pub mod physics;
pub mod types;

pub use input::{process_action, PlayerAction, UiEvent};
pub use physics::process_tick;
#[allow(unused_imports)]
pub use types::{Bird, GameSession, Obstacle, RampStep, Scene, ScreenSize, TickEvent};
