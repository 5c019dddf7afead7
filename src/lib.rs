//! Skyline Dash - A side-scrolling jump-and-shoot arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, spawning, collisions, game state)
//! - `renderer`: Frame snapshots and the WebGPU quad pipeline
//! - `persistence`: Key-value storage slots (LocalStorage, files, memory)
//! - `highscores`: Top-10 leaderboard
//! - `settings`: Persisted player preferences

pub mod highscores;
pub mod persistence;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use highscores::{HighScoreEntry, HighScores};
pub use settings::Settings;

/// Game configuration constants
///
/// Motion constants are expressed per simulation step, timers in whole steps.
pub mod consts {
    /// Fixed simulation timestep (one step per 60 Hz animation frame)
    pub const STEPS_PER_SECOND: u32 = 60;
    pub const SIM_DT: f32 = 1.0 / STEPS_PER_SECOND as f32;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Playfield dimensions
    pub const PLAYFIELD_WIDTH: f32 = 800.0;
    pub const PLAYFIELD_HEIGHT: f32 = 400.0;

    /// Player defaults
    pub const PLAYER_X: f32 = 50.0;
    pub const PLAYER_WIDTH: f32 = 50.0;
    pub const PLAYER_HEIGHT: f32 = 80.0;
    pub const MAX_JUMPS: u8 = 2;
    pub const GRAVITY: f32 = 0.5;
    pub const JUMP_FORCE: f32 = -12.0;
    pub const START_HEALTH: i32 = 100;

    /// Obstacles
    pub const OBSTACLE_SIZE: f32 = 40.0;
    pub const OBSTACLE_SPEED: f32 = 5.0;
    pub const OBSTACLE_DAMAGE: i32 = 10;
    /// Air obstacles spawn in [0, PLAYFIELD_HEIGHT - AIR_OBSTACLE_BAND)
    pub const AIR_OBSTACLE_BAND: f32 = 200.0;
    /// Ground obstacles sit at PLAYFIELD_HEIGHT - GROUND_OBSTACLE_OFFSET
    pub const GROUND_OBSTACLE_OFFSET: f32 = 60.0;

    /// Enemies
    pub const ENEMY_SIZE: f32 = 50.0;
    pub const ENEMY_SPEED: f32 = 3.0;
    pub const ENEMY_DAMAGE: i32 = 20;
    pub const ENEMY_BAND: f32 = 150.0;

    /// Projectiles
    pub const PROJECTILE_WIDTH: f32 = 30.0;
    pub const PROJECTILE_HEIGHT: f32 = 10.0;
    pub const PROJECTILE_SPEED: f32 = 7.0;
    pub const ENEMY_KILL_SCORE: u32 = 10;

    /// Spawn timer intervals
    pub const OBSTACLE_SPAWN_MS: u32 = 2000;
    pub const ENEMY_SPAWN_MS: u32 = 3000;
    pub const OBSTACLE_SPAWN_STEPS: u32 = OBSTACLE_SPAWN_MS * STEPS_PER_SECOND / 1000;
    pub const ENEMY_SPAWN_STEPS: u32 = ENEMY_SPAWN_MS * STEPS_PER_SECOND / 1000;

    /// Start button (x, y, width, height), centered on the playfield
    pub const START_BUTTON: (f32, f32, f32, f32) = (
        PLAYFIELD_WIDTH / 2.0 - 60.0,
        PLAYFIELD_HEIGHT / 2.0 - 30.0,
        120.0,
        60.0,
    );
    /// Reset button (x, y, width, height)
    pub const RESET_BUTTON: (f32, f32, f32, f32) = (
        PLAYFIELD_WIDTH / 2.0 - 50.0,
        PLAYFIELD_HEIGHT / 2.0 - 25.0,
        100.0,
        50.0,
    );
}
