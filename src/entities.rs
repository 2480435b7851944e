//! All game entity types and their per-tick motion rules.
//!
//! Every update is pure: it takes `&self` and returns the next value, so the
//! frame driver decides when (and whether) the new value replaces the old one.

use std::time::Duration;

use crate::collision::{Circle, Rect};
use crate::consts::*;
use crate::formation::Formation;
use crate::render::{Canvas, Color};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    /// Menu shown, nothing simulated
    Idle,
    Running,
    GameOver,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Right,
    Left,
}

// ── Input ─────────────────────────────────────────────────────────────────────

/// Movement intents, sampled once at the start of every frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PlayerInput {
    pub left: bool,
    pub right: bool,
    pub shoot: bool,
}

// ── Projectiles ───────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProjectileSource {
    Player,
    Enemy,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Projectile {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub color: Color,
    /// Speed along y; the sign comes from `source`.
    pub velocity: f64,
    pub source: ProjectileSource,
}

impl Projectile {
    pub fn from_player(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            radius: PROJECTILE_RADIUS,
            color: Color::WHITE,
            velocity: PLAYER_PROJECTILE_VELOCITY,
            source: ProjectileSource::Player,
        }
    }

    pub fn from_enemy(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            radius: PROJECTILE_RADIUS,
            color: Color::WHITE,
            velocity: ENEMY_PROJECTILE_VELOCITY,
            source: ProjectileSource::Enemy,
        }
    }

    pub fn circle(&self) -> Circle {
        Circle {
            x: self.x,
            y: self.y,
            radius: self.radius,
        }
    }

    /// Player shots travel up the screen, enemy shots down.
    #[must_use]
    pub fn update(&self) -> Self {
        let y = match self.source {
            ProjectileSource::Player => self.y - self.velocity,
            ProjectileSource::Enemy => self.y + self.velocity,
        };
        Self { y, ..self.clone() }
    }

    /// Fully above the top edge.
    pub fn exited_top(&self) -> bool {
        self.y + self.radius < 0.0
    }

    /// Past the bottom edge.
    pub fn exited_bottom(&self) -> bool {
        self.y + self.radius > ARENA_HEIGHT
    }

    pub fn draw(&self, canvas: &mut impl Canvas) {
        canvas.fill_circle(self.circle(), self.color, 1.0);
    }
}

// ── Player & enemy ────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub color: Color,
    pub lives: u32,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            x: ARENA_WIDTH / 2.0 - PLAYER_WIDTH / 2.0,
            y: ARENA_HEIGHT - PLAYER_HEIGHT,
            width: PLAYER_WIDTH,
            height: PLAYER_HEIGHT,
            color: Color::PLAYER,
            lives: PLAYER_LIVES,
        }
    }
}

impl Player {
    pub fn rect(&self) -> Rect {
        Rect {
            x: self.x,
            y: self.y,
            width: self.width,
            height: self.height,
        }
    }

    /// One tick of movement, plus a new projectile when the player fires and
    /// has none in flight.
    #[must_use]
    pub fn update(&self, input: &PlayerInput, projectile_in_flight: bool) -> (Self, Option<Projectile>) {
        let mut x = self.x;
        if input.left {
            x -= PLAYER_STEP;
        }
        if input.right {
            x += PLAYER_STEP;
        }
        let x = x.clamp(0.0, ARENA_WIDTH - self.width);

        let shot = (input.shoot && !projectile_in_flight)
            .then(|| Projectile::from_player(x + self.width / 2.0, self.y - 5.0));

        (Self { x, ..self.clone() }, shot)
    }

    pub fn draw(&self, canvas: &mut impl Canvas) {
        canvas.draw_rect(self.rect(), self.color);
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub color: Color,
    /// Index of the enemy's row in the formation.
    pub row: usize,
    /// Position within its row; reassigned every frame.
    pub column: usize,
}

impl Enemy {
    pub fn new(x: f64, y: f64, row: usize, column: usize) -> Self {
        Self {
            x,
            y,
            width: ENEMY_WIDTH,
            height: ENEMY_HEIGHT,
            color: Color::WHITE,
            row,
            column,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect {
            x: self.x,
            y: self.y,
            width: self.width,
            height: self.height,
        }
    }

    /// Where an enemy projectile leaves the ship (bottom center).
    pub fn muzzle(&self) -> (f64, f64) {
        (self.x + self.width / 2.0, self.y + self.height)
    }

    pub fn draw(&self, canvas: &mut impl Canvas) {
        canvas.draw_rect(self.rect(), self.color);
    }
}

// ── Particles ─────────────────────────────────────────────────────────────────

/// A fading explosion fragment.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub color: Color,
    pub vx: f64,
    pub vy: f64,
    /// Opacity, starts at 1.0.
    pub alpha: f64,
}

impl Particle {
    /// Apply friction, integrate, fade.
    #[must_use]
    pub fn update(&self) -> Self {
        let vx = self.vx * FRICTION;
        let vy = self.vy * FRICTION;
        Self {
            x: self.x + vx,
            y: self.y + vy,
            vx,
            vy,
            alpha: self.alpha - PARTICLE_FADE,
            ..self.clone()
        }
    }

    pub fn is_spent(&self) -> bool {
        self.alpha <= 0.0
    }

    pub fn draw(&self, canvas: &mut impl Canvas) {
        let circle = Circle {
            x: self.x,
            y: self.y,
            radius: self.radius,
        };
        canvas.fill_circle(circle, self.color, self.alpha.clamp(0.0, 1.0));
    }
}

// ── Frame timing ──────────────────────────────────────────────────────────────

/// Timestamps are offsets from an arbitrary origin chosen by the front-end
/// (normally the instant the program started).
#[derive(Clone, Debug, PartialEq)]
pub struct FrameClock {
    /// Minimum time between two rendered frames.
    pub frame_interval: Duration,
    pub last_frame: Duration,
    pub last_formation_step: Duration,
    /// Rendered frames since the game started.
    pub frames: u64,
}

impl FrameClock {
    pub fn new(frame_interval: Duration) -> Self {
        Self {
            frame_interval,
            last_frame: Duration::ZERO,
            last_formation_step: Duration::ZERO,
            frames: 0,
        }
    }

    pub fn reset(&mut self, now: Duration) {
        self.last_frame = now;
        self.last_formation_step = now;
        self.frames = 0;
    }
}

// ── Master game state ─────────────────────────────────────────────────────────

/// The entire session.  Cloneable so `compute::tick` can return a brand-new
/// value without mutating its input.
#[derive(Clone, Debug)]
pub struct GameState {
    pub player: Player,
    /// The player can only have one shot in flight.
    pub player_projectile: Option<Projectile>,
    /// Enemy shots; never more than one, cleared as a batch.
    pub enemy_projectiles: Vec<Projectile>,
    pub formation: Formation,
    pub particles: Vec<Particle>,
    pub score: u32,
    /// Best score seen during this process; survives restarts.
    pub high_score: u32,
    /// Column of the frontmost-row enemy allowed to fire.
    pub shooter: usize,
    pub status: GameStatus,
    pub clock: FrameClock,
}
