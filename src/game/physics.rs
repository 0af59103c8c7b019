//! The per-frame physics step: gravity, flap impulse, collision, scoring,
//! obstacle advance and spawn cadence.

use super::difficulty;
use super::types::{GameSession, Obstacle, Scene, TickEvent};
use crate::constants::*;
use rand::Rng;

/// Advances the session by `dt` seconds of play time.
///
/// Does nothing outside the Play scene. Returns the events that occurred so
/// the caller can react (sounds, score submission) without the physics step
/// knowing about I/O.
pub fn process_tick<R: Rng>(session: &mut GameSession, dt: f64, rng: &mut R) -> Vec<TickEvent> {
    let mut events = Vec::new();
    if session.scene != Scene::Play {
        return events;
    }

    if let Some(step) = difficulty::apply_ramp(session) {
        events.push(TickEvent::DifficultyRaised(step));
    }

    let settings = session.settings;

    // Gravity, then a pending flap overrides the fall outright.
    session.bird.velocity += settings.gravity * dt;
    if session.bird.flap_pending {
        session.bird.velocity = settings.flap_velocity;
        session.bird.flap_pending = false;
        events.push(TickEvent::Flapped);
    }
    session.bird.y += session.bird.velocity * dt;

    // Ceiling and ground; the ground line sits above the tiled base strip.
    let floor = GROUND_FRACTION * session.screen.height;
    if session.bird.y < 0.0 || session.bird.y + session.bird.height > floor {
        crash(session, &mut events);
        return events;
    }

    // Pipe collisions and scoring.
    let bird_box = session.bird.rect().inset(settings.hitbox_padding);
    let bird_x = session.bird.x;
    let mut crashed = false;
    for obstacle in &mut session.obstacles {
        let upper = obstacle.upper_rect().inset(settings.hitbox_padding);
        let lower = obstacle.lower_rect(settings.pipe_gap).inset(settings.hitbox_padding);
        if bird_box.intersects(&upper) || bird_box.intersects(&lower) {
            crashed = true;
            break;
        }
        if !obstacle.scored && obstacle.x + PIPE_WIDTH < bird_x {
            obstacle.scored = true;
            session.score += 1;
            events.push(TickEvent::Scored(session.score));
        }
    }
    if crashed {
        crash(session, &mut events);
        return events;
    }

    // Advance and cull.
    for obstacle in &mut session.obstacles {
        obstacle.x -= settings.pipe_speed * dt;
    }
    session.obstacles.retain(|o| !o.is_offscreen());

    // Spawn cadence: subtract the interval rather than resetting to zero so
    // leftover time carries over and the cadence never drifts.
    session.spawn_timer += dt;
    if session.spawn_timer >= settings.spawn_interval {
        session.spawn_timer -= settings.spawn_interval;
        session.obstacles.push(Obstacle::spawn(
            session.screen.width + SPAWN_LEAD_X,
            session.screen.height,
            settings.pipe_gap,
            rng,
        ));
    }

    events
}

/// Ends the run. Only fires from Play, so a frame that already crashed
/// cannot crash again.
fn crash(session: &mut GameSession, events: &mut Vec<TickEvent>) {
    if session.scene != Scene::Play {
        return;
    }
    session.scene = Scene::GameOver;
    events.push(TickEvent::Crashed(session.score));
}
