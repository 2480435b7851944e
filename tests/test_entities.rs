use grid_invaders::entities::*;
use grid_invaders::render::Color;

fn no_input() -> PlayerInput {
    PlayerInput::default()
}

// ── Player ────────────────────────────────────────────────────────────────────

#[test]
fn player_starts_centered_on_the_bottom_edge() {
    let p = Player::default();
    assert_eq!(p.x, 190.0); // 400 / 2 - 20 / 2
    assert_eq!(p.y, 280.0); // 300 - 20
    assert_eq!(p.lives, 3);
    assert_eq!(p.color, Color::PLAYER);
}

#[test]
fn player_moves_one_unit_per_tick() {
    let p = Player::default();
    let left = PlayerInput { left: true, ..no_input() };
    let right = PlayerInput { right: true, ..no_input() };

    assert_eq!(p.update(&left, false).0.x, 189.0);
    assert_eq!(p.update(&right, false).0.x, 191.0);
}

#[test]
fn opposite_directions_cancel_out() {
    let p = Player::default();
    let both = PlayerInput { left: true, right: true, shoot: false };
    assert_eq!(p.update(&both, false).0.x, 190.0);
}

#[test]
fn player_is_clamped_to_the_arena() {
    let mut p = Player::default();
    p.x = 0.0;
    let left = PlayerInput { left: true, ..no_input() };
    assert_eq!(p.update(&left, false).0.x, 0.0);

    p.x = 380.0; // 400 - width
    let right = PlayerInput { right: true, ..no_input() };
    assert_eq!(p.update(&right, false).0.x, 380.0);
}

#[test]
fn update_leaves_source_untouched() {
    let p = Player::default();
    let _ = p.update(&PlayerInput { left: true, ..no_input() }, false);
    assert_eq!(p.x, 190.0);
}

#[test]
fn shooting_spawns_projectile_above_player_center() {
    let p = Player::default();
    let fire = PlayerInput { shoot: true, ..no_input() };
    let (moved, shot) = p.update(&fire, false);

    let shot = shot.expect("player should fire");
    assert_eq!(shot.x, moved.x + 10.0);
    assert_eq!(shot.y, 275.0);
    assert_eq!(shot.source, ProjectileSource::Player);
    assert_eq!(shot.velocity, 6.0);
    assert_eq!(shot.radius, 4.0);
}

#[test]
fn cannot_fire_with_a_projectile_in_flight() {
    let p = Player::default();
    let fire = PlayerInput { shoot: true, ..no_input() };
    assert!(p.update(&fire, true).1.is_none());
}

#[test]
fn shot_uses_position_after_movement() {
    let p = Player::default();
    let input = PlayerInput { right: true, shoot: true, left: false };
    let (_, shot) = p.update(&input, false);
    assert_eq!(shot.unwrap().x, 201.0);
}

// ── Projectiles ───────────────────────────────────────────────────────────────

#[test]
fn projectile_direction_follows_source() {
    let up = Projectile::from_player(50.0, 100.0).update();
    assert_eq!(up.y, 94.0);
    assert_eq!(up.x, 50.0);

    let down = Projectile::from_enemy(50.0, 100.0).update();
    assert_eq!(down.y, 103.0);
}

#[test]
fn projectile_exit_edges() {
    assert!(Projectile::from_player(0.0, -4.5).exited_top());
    assert!(!Projectile::from_player(0.0, -4.0).exited_top());

    assert!(Projectile::from_enemy(0.0, 297.0).exited_bottom());
    assert!(!Projectile::from_enemy(0.0, 296.0).exited_bottom());
}

// ── Enemies ───────────────────────────────────────────────────────────────────

#[test]
fn enemy_fires_from_its_bottom_center() {
    let e = Enemy::new(80.0, 16.0, 0, 0);
    assert_eq!(e.muzzle(), (88.0, 32.0));
    assert_eq!(e.width, 16.0);
    assert_eq!(e.height, 16.0);
}

// ── Particles ─────────────────────────────────────────────────────────────────

fn particle(vx: f64, vy: f64, alpha: f64) -> Particle {
    Particle {
        x: 10.0,
        y: 10.0,
        radius: 1.0,
        color: Color::WHITE,
        vx,
        vy,
        alpha,
    }
}

#[test]
fn particle_applies_friction_before_moving() {
    let p = particle(1.0, -1.0, 1.0).update();
    assert!((p.vx - 0.99).abs() < 1e-12);
    assert!((p.vy + 0.99).abs() < 1e-12);
    assert!((p.x - 10.99).abs() < 1e-12);
    assert!((p.y - 9.01).abs() < 1e-12);
    assert!((p.alpha - 0.995).abs() < 1e-12);
}

#[test]
fn particle_is_spent_once_faded_out() {
    assert!(!particle(0.0, 0.0, 0.004).is_spent());
    assert!(particle(0.0, 0.0, 0.004).update().is_spent());
    assert!(particle(0.0, 0.0, 0.0).is_spent());
}

// ── Derives ───────────────────────────────────────────────────────────────────

#[test]
fn enums_compare() {
    assert_eq!(GameStatus::Running, GameStatus::Running);
    assert_ne!(GameStatus::Idle, GameStatus::GameOver);
    assert_ne!(Direction::Left, Direction::Right);
    assert_ne!(ProjectileSource::Player, ProjectileSource::Enemy);
}
