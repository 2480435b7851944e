/// Spawning: the enemy grid, enemy fire and explosion bursts.
///
/// Randomness always comes through an injected `Rng`.

use rand::Rng;

use crate::consts::*;
use crate::entities::{Enemy, Particle, Projectile};
use crate::render::Color;

/// Full 5×10 grid, centered horizontally with the leftover margin split
/// evenly between both sides.
pub fn create_grid() -> Vec<Vec<Enemy>> {
    let space_left = ARENA_WIDTH - (ENEMY_WIDTH + SPACING) * ENEMIES_PER_ROW as f64;
    (0..ENEMY_ROWS)
        .map(|row| {
            let y = ENEMY_HEIGHT + ENEMY_HEIGHT * 2.0 * row as f64;
            (0..ENEMIES_PER_ROW)
                .map(|column| {
                    let x = space_left / 2.0 + (ENEMY_WIDTH + SPACING) * column as f64;
                    Enemy::new(x, y, row, column)
                })
                .collect()
        })
        .collect()
}

/// Pick the column of the frontmost-row enemy that may fire next.
pub fn roll_shooter(rows: &[Vec<Enemy>], rng: &mut impl Rng) -> usize {
    match rows.last().map(Vec::len) {
        Some(len) if len > 0 => rng.gen_range(0..len),
        _ => 0,
    }
}

/// Let `enemy` fire if it is the designated shooter of the frontmost row and
/// no enemy projectile is in flight.
pub fn enemy_turn(enemy: &Enemy, front_row: usize, shooter: usize, projectiles: &mut Vec<Projectile>) {
    if projectiles.is_empty() && enemy.row == front_row && enemy.column == shooter {
        let (x, y) = enemy.muzzle();
        fire(projectiles, x, y);
    }
}

/// Spawn exactly one enemy projectile if none exists; otherwise discard the
/// ones that have dropped below the arena.
pub fn fire(projectiles: &mut Vec<Projectile>, x: f64, y: f64) {
    if projectiles.is_empty() {
        projectiles.push(Projectile::from_enemy(x, y));
    } else {
        projectiles.retain(|p| p.y <= ARENA_HEIGHT);
    }
}

/// Burst of particles flying out from `(x, y)`.
pub fn explosion(x: f64, y: f64, color: Color, rng: &mut impl Rng) -> Vec<Particle> {
    (0..EXPLOSION_PARTICLES)
        .map(|_| Particle {
            x,
            y,
            radius: rng.gen::<f64>() * 2.0,
            color,
            vx: (rng.gen::<f64>() - 0.5) * 2.0,
            vy: (rng.gen::<f64>() - 0.5) * 2.0,
            alpha: 1.0,
        })
        .collect()
}
