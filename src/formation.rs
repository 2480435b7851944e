//! Collective motion of the enemy grid.
//!
//! The formation slides sideways by one spacing per step.  When it can go no
//! further it turns: first the loss check, then one enemy-height down, then
//! the direction flip and a small speed-up.

use crate::consts::*;
use crate::entities::{Direction, Enemy};
use crate::spawn;

/// What a single formation step did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormationStep {
    /// No enemies left
    Idle,
    Shifted,
    /// Stepped down and flipped direction
    Turned,
    /// An enemy reached the player's row; the formation did not step down.
    Landed,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Formation {
    /// Rows in back-to-front order; the last row is closest to the player.
    pub rows: Vec<Vec<Enemy>>,
    pub direction: Direction,
    /// Seconds between formation steps. Only ever shrinks.
    pub move_timer: f64,
}

impl Default for Formation {
    fn default() -> Self {
        Self {
            rows: spawn::create_grid(),
            direction: Direction::Right,
            move_timer: INITIAL_MOVE_TIMER,
        }
    }
}

impl Formation {
    pub fn is_empty(&self) -> bool {
        self.rows.iter().all(|row| row.is_empty())
    }

    pub fn enemy_count(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }

    pub fn enemies(&self) -> impl Iterator<Item = &Enemy> {
        self.rows.iter().flatten()
    }

    /// Index of the row closest to the player.
    pub fn front_row_index(&self) -> Option<usize> {
        self.rows.len().checked_sub(1)
    }

    /// Largest x among the last enemy of every row.
    pub fn far_right(&self) -> f64 {
        self.rows
            .iter()
            .filter_map(|row| row.last())
            .fold(0.0_f64, |acc, e| acc.max(e.x))
    }

    /// Smallest x among the first enemy of every row.
    pub fn far_left(&self) -> f64 {
        self.rows
            .iter()
            .filter_map(|row| row.first())
            .fold(ARENA_WIDTH, |acc, e| acc.min(e.x))
    }

    /// Give every enemy its current row and column position.
    pub fn reindex(&mut self) {
        for (r, row) in self.rows.iter_mut().enumerate() {
            for (c, enemy) in row.iter_mut().enumerate() {
                enemy.row = r;
                enemy.column = c;
            }
        }
    }

    /// Advance the formation by one step. `player_top` is the player's y.
    pub fn step(&mut self, player_top: f64) -> FormationStep {
        if self.is_empty() {
            return FormationStep::Idle;
        }
        let far_right = self.far_right();
        let far_left = self.far_left();

        match self.direction {
            Direction::Right => {
                if far_right + SPACING <= ARENA_WIDTH - ENEMY_WIDTH {
                    self.shift(SPACING);
                    FormationStep::Shifted
                } else {
                    match self.turn(Direction::Left, player_top) {
                        // The left sweep still runs this step, from the pre-turn extreme
                        FormationStep::Turned => match self.sweep_left(far_left, player_top) {
                            FormationStep::Shifted => FormationStep::Turned,
                            other => other,
                        },
                        other => other,
                    }
                }
            }
            Direction::Left => self.sweep_left(far_left, player_top),
        }
    }

    fn sweep_left(&mut self, far_left: f64, player_top: f64) -> FormationStep {
        if far_left > 0.0 {
            self.shift(-SPACING);
            // Flip one step early so the next shift cannot cross x = 0
            if far_left - SPACING < SPACING {
                self.turn(Direction::Right, player_top)
            } else {
                FormationStep::Shifted
            }
        } else {
            self.turn(Direction::Right, player_top)
        }
    }

    fn shift(&mut self, dx: f64) {
        for enemy in self.rows.iter_mut().flatten() {
            enemy.x += dx;
        }
    }

    fn turn(&mut self, direction: Direction, player_top: f64) -> FormationStep {
        if self.enemies().any(|e| e.y + e.height >= player_top) {
            return FormationStep::Landed;
        }
        for enemy in self.rows.iter_mut().flatten() {
            enemy.y += ENEMY_HEIGHT;
        }
        self.direction = direction;
        self.move_timer *= MOVE_TIMER_SPEED_UP;
        log::debug!(
            "formation turned {:?}, next step in {:.3}s",
            direction,
            self.move_timer
        );
        FormationStep::Turned
    }
}
