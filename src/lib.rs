//! Lane Runner - a 3-lane endless runner for the browser
//!
//! Core modules:
//! - `sim`: Deterministic simulation (lane movement, jump/roll physics, spawning, collisions)
//! - `render`: Canvas2D scene painter (wasm)
//! - `audio`: Procedural sound effects via Web Audio (wasm)
//! - `settings`: Player preferences persisted to LocalStorage

pub mod settings;
pub mod sim;

#[cfg(target_arch = "wasm32")]
pub mod audio;
#[cfg(target_arch = "wasm32")]
pub mod render;

pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Lane offsets from the track centerline, left to right
    pub const LANE_POSITIONS: [f32; 3] = [-1.5, 0.0, 1.5];
    /// Starting lane
    pub const CENTER_LANE: usize = 1;
    /// Per-tick exponential smoothing factor for lateral easing
    pub const LANE_SMOOTHING: f32 = 0.15;

    /// Track dimensions
    pub const TRACK_LENGTH: f32 = 30.0;
    pub const TRACK_WIDTH: f32 = 5.0;
    /// Forward scroll speed (units/sec)
    pub const TRACK_SPEED: f32 = 12.0;

    /// Entities enter at the far edge of the visible track
    pub const SPAWN_Z: f32 = -TRACK_LENGTH;
    /// Entities scrolled past this plane (just behind the camera) are discarded
    pub const REAP_Z: f32 = 5.0;

    /// Downward acceleration while airborne (units/sec^2)
    pub const GRAVITY: f32 = -90.0;
    /// Upward velocity applied by a jump (units/sec)
    pub const JUMP_IMPULSE: f32 = 21.0;
    /// Resting height of the player's base above the track
    pub const PLAYER_GROUND_Y: f32 = 0.5;

    /// Roll duration, counted in simulation ticks (0.5 s at the fixed step)
    pub const ROLL_DURATION_TICKS: u32 = 30;
    pub const PLAYER_NORMAL_SCALE: f32 = 1.0;
    pub const PLAYER_ROLL_SCALE: f32 = 0.5;

    /// Player hitbox edge length at normal scale
    pub const PLAYER_SIZE: f32 = 1.0;

    /// Coin spawn cadence (seconds)
    pub const COIN_SPAWN_INTERVAL: f32 = 1.2;
    /// Obstacle spawn cadence (seconds)
    pub const OBSTACLE_SPAWN_INTERVAL: f32 = 2.0;
    /// Obstacles hold off this long after session start
    pub const OBSTACLE_GRACE_DELAY: f32 = 5.0;

    /// Score awarded each simulation tick while running
    pub const SCORE_PER_TICK: u64 = 1;
}

/// Exponentially ease `current` toward `target` by `factor`
#[inline]
pub fn ease_toward(current: f32, target: f32, factor: f32) -> f32 {
    current + (target - current) * factor
}
