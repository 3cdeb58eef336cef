//! Spawn scheduling for obstacles and coins
//!
//! Both schedulers are accumulated-delta timers advanced from inside the
//! tick, so spawning is deterministic and testable without wall clocks.

use rand::Rng;
use rand_pcg::Pcg32;

use super::track::{EntityKind, ObstacleTier};
use crate::consts::*;

/// A spawn decision produced by the schedulers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpawnEvent {
    pub kind: EntityKind,
    pub lane: usize,
}

/// Periodic spawn timers for one run
#[derive(Debug, Clone, Default)]
pub struct SpawnTimers {
    /// Seconds since the run started
    elapsed: f32,
    coin_accum: f32,
    obstacle_accum: f32,
}

impl SpawnTimers {
    /// Zero all timers (on session start/restart)
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Seconds of run time the timers have seen
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Advance the timers and return any spawns due this tick
    ///
    /// Coins fire from the first second of the run; obstacles only begin
    /// accumulating once the grace delay has passed. Each firing picks a
    /// uniformly random lane, and obstacles a uniformly random height tier,
    /// with no memory of prior spawns.
    pub fn advance(&mut self, dt: f32, rng: &mut Pcg32) -> Vec<SpawnEvent> {
        let mut due = Vec::new();
        self.elapsed += dt;

        self.coin_accum += dt;
        while self.coin_accum >= COIN_SPAWN_INTERVAL {
            self.coin_accum -= COIN_SPAWN_INTERVAL;
            due.push(SpawnEvent {
                kind: EntityKind::Coin,
                lane: random_lane(rng),
            });
        }

        if self.elapsed >= OBSTACLE_GRACE_DELAY {
            self.obstacle_accum += dt;
            while self.obstacle_accum >= OBSTACLE_SPAWN_INTERVAL {
                self.obstacle_accum -= OBSTACLE_SPAWN_INTERVAL;
                due.push(SpawnEvent {
                    kind: EntityKind::Obstacle(random_tier(rng)),
                    lane: random_lane(rng),
                });
            }
        }

        due
    }
}

fn random_lane(rng: &mut Pcg32) -> usize {
    rng.random_range(0..LANE_POSITIONS.len())
}

fn random_tier(rng: &mut Pcg32) -> ObstacleTier {
    match rng.random_range(0..3) {
        0 => ObstacleTier::Ground,
        1 => ObstacleTier::Air,
        _ => ObstacleTier::Elevated,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn run_for(timers: &mut SpawnTimers, rng: &mut Pcg32, seconds: f32) -> Vec<SpawnEvent> {
        let ticks = (seconds / SIM_DT).round() as u32;
        let mut all = Vec::new();
        for _ in 0..ticks {
            all.extend(timers.advance(SIM_DT, rng));
        }
        all
    }

    #[test]
    fn no_obstacles_during_the_grace_window() {
        let mut timers = SpawnTimers::default();
        let mut rng = Pcg32::seed_from_u64(1);

        let events = run_for(&mut timers, &mut rng, 4.9);
        assert!(events.iter().all(|e| e.kind == EntityKind::Coin));
        // Coins fire on their own cadence from the start
        assert_eq!(events.len(), 4);
    }

    #[test]
    fn obstacles_fire_after_grace_plus_interval() {
        let mut timers = SpawnTimers::default();
        let mut rng = Pcg32::seed_from_u64(1);

        let events = run_for(&mut timers, &mut rng, 7.5);
        let obstacles = events.iter().filter(|e| e.kind.is_obstacle()).count();
        assert_eq!(obstacles, 1);
    }

    #[test]
    fn cadence_is_steady_over_a_long_run() {
        let mut timers = SpawnTimers::default();
        let mut rng = Pcg32::seed_from_u64(7);

        let events = run_for(&mut timers, &mut rng, 30.5);
        let coins = events.iter().filter(|e| !e.kind.is_obstacle()).count();
        let obstacles = events.iter().filter(|e| e.kind.is_obstacle()).count();
        // 1.2s cadence from the start; 2s cadence after the 5s grace
        assert_eq!(coins, 25);
        assert_eq!(obstacles, 12);
    }

    #[test]
    fn lanes_cover_the_whole_track() {
        let mut timers = SpawnTimers::default();
        let mut rng = Pcg32::seed_from_u64(99);

        let events = run_for(&mut timers, &mut rng, 60.0);
        for lane in 0..LANE_POSITIONS.len() {
            assert!(events.iter().any(|e| e.lane == lane));
        }
    }

    #[test]
    fn reset_rearms_the_grace_window() {
        let mut timers = SpawnTimers::default();
        let mut rng = Pcg32::seed_from_u64(1);
        run_for(&mut timers, &mut rng, 10.0);

        timers.reset();
        assert_eq!(timers.elapsed(), 0.0);
        let events = run_for(&mut timers, &mut rng, 4.0);
        assert!(events.iter().all(|e| !e.kind.is_obstacle()));
    }
}
