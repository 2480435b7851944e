//! Grid Invaders - frame-update engine for a 2D arcade shooter
//!
//! Core modules:
//! - `entities`: Player, projectiles, enemies, particles and the session state
//! - `collision`: rectangle/circle intersection tests
//! - `formation`: collective enemy grid motion
//! - `spawn`: grid generation, enemy shooting policy, explosions
//! - `compute`: the frame driver and session state machine
//! - `render`: drawing and scoreboard seams consumed by the engine

pub mod collision;
pub mod compute;
pub mod config;
pub mod entities;
pub mod error;
pub mod formation;
pub mod render;
pub mod spawn;

pub use config::Config;
pub use error::{GameError, GameResult};

/// Game configuration constants
pub mod consts {
    /// Arena dimensions
    pub const ARENA_WIDTH: f64 = 400.0;
    pub const ARENA_HEIGHT: f64 = 300.0;

    /// Player ship
    pub const PLAYER_WIDTH: f64 = 20.0;
    pub const PLAYER_HEIGHT: f64 = 20.0;
    pub const PLAYER_LIVES: u32 = 3;
    /// Horizontal distance covered per rendered frame while a direction is held
    pub const PLAYER_STEP: f64 = 1.0;

    /// Projectiles
    pub const PROJECTILE_RADIUS: f64 = 4.0;
    pub const PLAYER_PROJECTILE_VELOCITY: f64 = 6.0;
    pub const ENEMY_PROJECTILE_VELOCITY: f64 = 3.0;

    /// Enemy grid
    pub const ENEMY_ROWS: usize = 5;
    pub const ENEMIES_PER_ROW: usize = 10;
    pub const ENEMY_WIDTH: f64 = 16.0;
    pub const ENEMY_HEIGHT: f64 = 16.0;
    /// Gap between enemies and horizontal formation step
    pub const SPACING: f64 = ENEMY_WIDTH / 2.0;

    /// Seconds between formation steps at the start of a game
    pub const INITIAL_MOVE_TIMER: f64 = 1.0;
    /// Move timer multiplier applied on every formation turn
    pub const MOVE_TIMER_SPEED_UP: f64 = 0.99;
    /// Enemy allowed to fire on the very first frame
    pub const INITIAL_SHOOTER: usize = 1;

    /// Particles
    pub const FRICTION: f64 = 0.99;
    pub const PARTICLE_FADE: f64 = 0.005;
    pub const EXPLOSION_PARTICLES: usize = 10;

    /// Score awarded per enemy destroyed
    pub const ENEMY_SCORE: u32 = 10;

    /// Default render rate
    pub const TARGET_FPS: u32 = 60;
}
