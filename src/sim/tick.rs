//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically.

use super::collision::{Verdict, check_collision};
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::RETIRE_MARGIN;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Flap before integrating this tick (click/tap/space)
    pub flap: bool,
    /// Idle/demo mode - the simulation flaps for itself
    pub idle_mode: bool,
}

/// Advance the game state by one fixed timestep.
///
/// Does nothing outside `Playing`. Inside, the order is fixed: impulse,
/// physics, obstacle spawn/advance/retire, collision, scoring, victory. A
/// collision ends the tick before scoring, so it beats a same-tick victory.
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    if state.phase != GamePhase::Playing {
        return;
    }

    let flap = input.flap || (input.idle_mode && idle_wants_flap(state));
    if flap {
        let power = state.config().flap_power;
        state.actor.apply_impulse(power);
        state.emit(GameEvent::Flapped);
    }

    step(state, dt);
    state.time_ticks += 1;
}

fn step(state: &mut GameState, dt: f32) {
    let gravity = state.config().gravity;
    state.actor.advance(gravity, dt);

    // Obstacles
    let config = state.config().clone();
    let playfield = state.playfield();
    let spawned = state
        .obstacles
        .spawn_if_due(state.time_ticks, &config, playfield, &mut state.rng)
        .map(|o| o.id);
    if let Some(id) = spawned {
        state.emit(GameEvent::ObstacleSpawned { id });
    }
    state.obstacles.advance(config.obstacle_speed * dt);
    state
        .obstacles
        .retire_offscreen(config.obstacle_width, RETIRE_MARGIN);

    // Collision
    let verdict = check_collision(
        &state.actor,
        state.obstacles.iter(),
        config.obstacle_width,
        playfield.height,
    );
    if let Verdict::Collided(hit) = verdict {
        state.phase = GamePhase::GameOver;
        state.emit(GameEvent::Collided(hit));
        log::info!(
            "Game over at tick {} with score {} ({:?})",
            state.time_ticks,
            state.score,
            hit
        );
        return;
    }

    // Scoring
    let passed = state
        .obstacles
        .detect_passes(state.actor.x(), config.obstacle_width);
    for id in passed {
        state.score += 1;
        let score = state.score;
        state.emit(GameEvent::ObstaclePassed { id, score });
        log::debug!("Passed obstacle {} (score {})", id, score);
    }

    // Victory
    if state.score >= config.target_score {
        state.phase = GamePhase::Victory;
        let score = state.score;
        state.emit(GameEvent::Victory { score });
        log::info!("Victory at tick {} with score {}", state.time_ticks, score);
    }
}

/// Idle pilot: aim for the middle of the next gap still ahead of the actor's
/// back edge, flapping when the actor's bottom sinks past a point just above
/// that gap's floor.
fn idle_wants_flap(state: &GameState) -> bool {
    let config = state.config();
    let actor = &state.actor;

    // Only react while falling, a flap resets velocity anyway
    if actor.vel_y < 0.0 {
        return false;
    }

    let target_bottom = state
        .obstacles
        .iter()
        .find(|o| o.right(config.obstacle_width) >= actor.x())
        .map(|o| o.gap_bottom() - (o.gap_bottom() - o.gap_top() - actor.size) * 0.25)
        .unwrap_or(state.playfield().height * 0.6);

    // Predict where the bottom edge lands next tick
    let next_bottom = actor.bottom() + actor.vel_y + config.gravity;
    next_bottom > target_bottom
}
