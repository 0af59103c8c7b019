//! Score-driven difficulty ramp.
//!
//! Every 25 points the game tightens one screw, rotating through gap size,
//! pipe speed and spawn cadence. The ramp waits until every active obstacle
//! has been scored so geometry never changes mid-approach to a gap.

use super::types::{GameSession, RampStep};
use crate::constants::*;
use crate::settings::GameSettings;

/// Fires the ramp if a 25-point boundary has been crossed and no obstacle is
/// pending a score. Swaps a fresh settings snapshot into the session and
/// returns the step taken.
pub fn apply_ramp(session: &mut GameSession) -> Option<RampStep> {
    if session.score < DIFFICULTY_SCORE_STEP
        || session.score % DIFFICULTY_SCORE_STEP != 0
        || session.score <= session.last_difficulty_score
        || session.has_pending_obstacle()
    {
        return None;
    }

    let step = match session.difficulty_cycle % 3 {
        0 => RampStep::ShrinkGap,
        1 => RampStep::RaiseSpeed,
        _ => RampStep::TightenSpawn,
    };
    session.settings = tightened(session.settings, step);
    session.difficulty_cycle += 1;
    session.last_difficulty_score = session.score;
    Some(step)
}

/// A copy of `settings` with one screw turned, clamped to its limit.
fn tightened(settings: GameSettings, step: RampStep) -> GameSettings {
    let mut next = settings;
    match step {
        RampStep::ShrinkGap => {
            next.pipe_gap = (settings.pipe_gap - GAP_SHRINK_PX).max(MIN_PIPE_GAP);
        }
        RampStep::RaiseSpeed => {
            next.pipe_speed = (settings.pipe_speed + SPEED_BOOST).min(MAX_PIPE_SPEED);
        }
        RampStep::TightenSpawn => {
            next.spawn_interval = (settings.spawn_interval - SPAWN_INTERVAL_CUT).max(MIN_SPAWN_INTERVAL);
        }
    }
    next
}
