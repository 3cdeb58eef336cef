//! Fixed timestep simulation tick
//!
//! One call advances the whole session by a single step: commands, motion,
//! spawning, scrolling, scoring, collisions.

use super::collision::{entity_hitbox, player_hitbox};
use super::state::{GameEvent, GamePhase, GameState};
use super::track::EntityKind;
use crate::consts::*;

/// Input commands for a single tick
///
/// All flags are one-shot discrete commands; the embedder clears them after
/// each processed step. Invalid commands (moving off the edge lane, jumping
/// mid-air) are silently ignored downstream.
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    pub move_left: bool,
    pub move_right: bool,
    pub jump: bool,
    pub roll: bool,
}

/// Advance the game state by one fixed timestep
///
/// Does nothing unless the session is `Running`. Obstacle collisions are
/// resolved before coins: a hit ends the run immediately and the rest of the
/// frame is skipped.
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    if state.phase != GamePhase::Running {
        return;
    }

    state.time_ticks += 1;

    if input.move_left {
        state.player.move_left();
    }
    if input.move_right {
        state.player.move_right();
    }
    if input.jump && state.player.jump() {
        state.events.push(GameEvent::Jumped);
    }
    if input.roll && state.player.roll() {
        state.events.push(GameEvent::Rolled);
    }

    state.player.ease_lateral();
    state.player.integrate(dt);

    // Scheduled spawns for this tick
    for due in state.spawner.advance(dt, &mut state.rng) {
        state.entities.spawn(due.kind, due.lane);
    }

    // Scroll the track and drop whatever slid behind the camera
    state.entities.advance(state.track_speed * dt);
    state.entities.reap(REAP_Z);

    // Obstacles first: any hit ends the run before coins or score are touched
    let player_box = player_hitbox(&state.player);
    let crashed = state
        .entities
        .iter()
        .any(|e| e.kind.is_obstacle() && player_box.intersects(&entity_hitbox(e)));
    if crashed {
        state.game_over();
        return;
    }

    // Coins: collect every one the player overlaps this tick
    let collected: Vec<u32> = state
        .entities
        .iter()
        .filter(|&e| e.kind == EntityKind::Coin && player_box.intersects(&entity_hitbox(e)))
        .map(|e| e.id)
        .collect();
    for id in collected {
        state.entities.remove(id);
        state.coins += 1;
        state.events.push(GameEvent::CoinCollected { total: state.coins });
    }

    state.score += SCORE_PER_TICK;
}
