/// Frame driver and session state machine.
///
/// `tick` takes an immutable reference to the current `GameState` and
/// returns a brand-new one together with a `FrameOutcome`.  Side effects are
/// limited to the injected RNG and the draw requests sent to the canvas.

use std::time::Duration;

use rand::Rng;

use crate::collision::{circles_touching, rect_circle_colliding};
use crate::consts::*;
use crate::entities::{FrameClock, GameState, GameStatus, Player, PlayerInput};
use crate::formation::{Formation, FormationStep};
use crate::render::{Canvas, Scoreboard};
use crate::spawn;

/// What happened during one call to [`tick`], for the score/lives display.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameOutcome {
    pub score_delta: u32,
    pub lives_lost: u32,
    /// The session moved to `GameOver` during this tick.
    pub game_over: bool,
    /// A render pass ran (the canvas holds a fresh frame).
    pub rendered: bool,
}

/// Entities scheduled for removal during a render pass.  Applied in one go
/// once the pass is over, so no collection is shrunk while it is being read.
#[derive(Debug, Default)]
struct Removals {
    player_projectile: bool,
    enemy_projectiles: Vec<usize>,
    /// (row, column) pairs
    enemies: Vec<(usize, usize)>,
}

// ── Constructors ─────────────────────────────────────────────────────────────

/// A fresh, idle session: full grid, three lives, nothing in flight.
pub fn init_state(frame_interval: Duration) -> GameState {
    GameState {
        player: Player::default(),
        player_projectile: None,
        enemy_projectiles: Vec::new(),
        formation: Formation::default(),
        particles: Vec::new(),
        score: 0,
        high_score: 0,
        shooter: INITIAL_SHOOTER,
        status: GameStatus::Idle,
        clock: FrameClock::new(frame_interval),
    }
}

/// Reset everything except the high score and status (window resize).
pub fn reinitialize(state: &GameState) -> GameState {
    GameState {
        high_score: state.high_score,
        status: state.status,
        clock: state.clock.clone(),
        ..init_state(state.clock.frame_interval)
    }
}

/// Begin (or restart) play at time `now`.
pub fn start(state: &GameState, now: Duration) -> GameState {
    let mut next = reinitialize(state);
    next.status = GameStatus::Running;
    next.clock.reset(now);
    log::info!("new game started (high score {})", next.high_score);
    next
}

// ── Per-frame tick ───────────────────────────────────────────────────────────

/// Advance the session to time `now`.
///
/// The formation moves whenever its own timer expires; the render pass runs
/// only when a full frame interval has elapsed.  Does nothing unless the
/// session is running.
pub fn tick(
    state: &GameState,
    input: &PlayerInput,
    now: Duration,
    rng: &mut impl Rng,
    canvas: &mut impl Canvas,
) -> (GameState, FrameOutcome) {
    let mut outcome = FrameOutcome::default();
    if state.status != GameStatus::Running {
        return (state.clone(), outcome);
    }
    let mut next = state.clone();

    // ── 1. Formation step on its own timer ───────────────────────────────────
    let since_step = now.saturating_sub(next.clock.last_formation_step);
    if since_step.as_secs_f64() > next.formation.move_timer {
        next.clock.last_formation_step = now;
        if next.formation.step(next.player.y) == FormationStep::Landed {
            log::info!("formation reached the player");
            outcome.game_over = true;
        }
    }

    // ── 2. Throttled render pass ─────────────────────────────────────────────
    let elapsed = now.saturating_sub(next.clock.last_frame);
    if elapsed > next.clock.frame_interval {
        // Keep the cadence aligned to the interval rather than to `now`
        let interval = next.clock.frame_interval.as_nanos().max(1);
        let overshoot = Duration::from_nanos((elapsed.as_nanos() % interval) as u64);
        next.clock.last_frame = now - overshoot;
        next.clock.frames += 1;
        render_pass(&mut next, input, rng, canvas, &mut outcome);
    }

    // ── 3. New wave or new shooter ───────────────────────────────────────────
    if next.formation.is_empty() {
        log::info!("wave cleared at score {}, regenerating formation", next.score);
        next.formation.rows = spawn::create_grid();
    } else {
        next.shooter = spawn::roll_shooter(&next.formation.rows, rng);
    }

    // ── 4. Terminal condition ────────────────────────────────────────────────
    if next.player.lives == 0 {
        outcome.game_over = true;
    }
    if outcome.game_over {
        finish(&mut next);
    }

    (next, outcome)
}

/// One update-and-draw pass over every entity, in a fixed order: player,
/// player projectile, enemy projectiles, enemies, particles.
pub fn render_pass(
    state: &mut GameState,
    input: &PlayerInput,
    rng: &mut impl Rng,
    canvas: &mut impl Canvas,
    outcome: &mut FrameOutcome,
) {
    outcome.rendered = true;
    canvas.clear();
    let mut removals = Removals::default();

    // ── Player ────────────────────────────────────────────────────────────────
    state.player.draw(canvas);
    let (player, shot) = state
        .player
        .update(input, state.player_projectile.is_some());
    state.player = player;
    if shot.is_some() {
        state.player_projectile = shot;
    }

    // ── Player projectile ─────────────────────────────────────────────────────
    state.player_projectile = state.player_projectile.take().and_then(|p| {
        p.draw(canvas);
        let p = p.update();
        (!p.exited_top()).then_some(p)
    });

    // ── Enemy projectiles ─────────────────────────────────────────────────────
    let player_rect = state.player.rect();
    let mut exited = false;
    for (i, projectile) in state.enemy_projectiles.iter_mut().enumerate() {
        if projectile.exited_bottom() {
            exited = true;
        }
        if rect_circle_colliding(&projectile.circle(), &player_rect) {
            state.particles.extend(spawn::explosion(
                projectile.x,
                projectile.y,
                state.player.color,
                rng,
            ));
            removals.enemy_projectiles.push(i);
            state.player.lives = state.player.lives.saturating_sub(1);
            outcome.lives_lost += 1;
        }
        if let Some(shot) = &state.player_projectile {
            if circles_touching(&projectile.circle(), &shot.circle()) {
                state.particles.extend(spawn::explosion(
                    projectile.x,
                    projectile.y,
                    projectile.color,
                    rng,
                ));
                removals.enemy_projectiles.push(i);
                removals.player_projectile = true;
            }
        }
        projectile.draw(canvas);
        *projectile = projectile.update();
    }
    // Clears the whole collection, not just the offender.  Equivalent to a
    // single removal only while at most one enemy projectile can exist.
    if exited {
        state.enemy_projectiles.clear();
        // Marked indices point into the cleared collection
        removals.enemy_projectiles.clear();
    }

    // ── Enemies ───────────────────────────────────────────────────────────────
    let front_row = state.formation.front_row_index().unwrap_or(0);
    for (r, row) in state.formation.rows.iter_mut().enumerate() {
        for (c, enemy) in row.iter_mut().enumerate() {
            enemy.row = r;
            enemy.column = c;
            if let Some(shot) = &state.player_projectile {
                if rect_circle_colliding(&shot.circle(), &enemy.rect()) {
                    state
                        .particles
                        .extend(spawn::explosion(shot.x, shot.y, enemy.color, rng));
                    state.score += ENEMY_SCORE;
                    outcome.score_delta += ENEMY_SCORE;
                    removals.enemies.push((r, c));
                    removals.player_projectile = true;
                }
            }
            enemy.draw(canvas);
            spawn::enemy_turn(enemy, front_row, state.shooter, &mut state.enemy_projectiles);
        }
    }

    // ── Particles ─────────────────────────────────────────────────────────────
    state.particles = state
        .particles
        .iter()
        .filter(|p| !p.is_spent())
        .map(|p| {
            p.draw(canvas);
            p.update()
        })
        .collect();

    compact(state, removals);
}

/// Apply scheduled removals, drop rows that became empty, reindex the grid.
fn compact(state: &mut GameState, removals: Removals) {
    if removals.player_projectile {
        state.player_projectile = None;
    }

    if !removals.enemy_projectiles.is_empty() {
        state.enemy_projectiles = state
            .enemy_projectiles
            .iter()
            .enumerate()
            .filter(|(i, _)| !removals.enemy_projectiles.contains(i))
            .map(|(_, p)| p.clone())
            .collect();
    }

    if !removals.enemies.is_empty() {
        for (r, row) in state.formation.rows.iter_mut().enumerate() {
            *row = row
                .iter()
                .enumerate()
                .filter(|(c, _)| !removals.enemies.contains(&(r, *c)))
                .map(|(_, e)| e.clone())
                .collect();
        }
    }
    state.formation.rows.retain(|row| !row.is_empty());
    state.formation.reindex();
}

/// Halt play and fold the final score into the high score.
fn finish(state: &mut GameState) {
    state.status = GameStatus::GameOver;
    if state.score > state.high_score {
        state.high_score = state.score;
    }
    log::info!(
        "game over after {} frames: score {}, high score {}",
        state.clock.frames,
        state.score,
        state.high_score
    );
}

// ── Display ──────────────────────────────────────────────────────────────────

/// Push whatever changed during a tick to the score/lives display.
pub fn report(state: &GameState, outcome: &FrameOutcome, board: &mut impl Scoreboard) {
    if outcome.score_delta > 0 {
        board.show_score(state.score, state.high_score);
    }
    if outcome.lives_lost > 0 {
        board.show_lives(state.player.lives);
    }
    if outcome.game_over {
        board.show_score(state.score, state.high_score);
        board.show_menu(state.score, state.high_score, true);
    }
}
