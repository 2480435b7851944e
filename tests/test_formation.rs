use grid_invaders::entities::*;
use grid_invaders::formation::*;

const PLAYER_TOP: f64 = 280.0;

fn single(x: f64, y: f64, direction: Direction) -> Formation {
    Formation {
        rows: vec![vec![Enemy::new(x, y, 0, 0)]],
        direction,
        move_timer: 1.0,
    }
}

#[test]
fn default_formation() {
    let f = Formation::default();
    assert_eq!(f.enemy_count(), 50);
    assert_eq!(f.direction, Direction::Right);
    assert_eq!(f.move_timer, 1.0);
    assert_eq!(f.far_left(), 80.0);
    assert_eq!(f.far_right(), 296.0);
    assert_eq!(f.front_row_index(), Some(4));
}

#[test]
fn shift_right_moves_every_enemy_by_spacing() {
    let mut f = Formation::default();
    let before = f.clone();
    assert_eq!(f.step(PLAYER_TOP), FormationStep::Shifted);
    for (a, b) in f.enemies().zip(before.enemies()) {
        assert_eq!(a.x, b.x + 8.0);
        assert_eq!(a.y, b.y);
    }
    assert_eq!(f.move_timer, 1.0);
}

#[test]
fn right_wall_turns_formation_down_then_sweeps_left() {
    let mut f = Formation::default();
    // 296 → 384 takes eleven shifts
    for _ in 0..11 {
        assert_eq!(f.step(PLAYER_TOP), FormationStep::Shifted);
    }
    assert_eq!(f.far_right(), 384.0);
    let before = f.clone();

    assert_eq!(f.step(PLAYER_TOP), FormationStep::Turned);
    assert_eq!(f.direction, Direction::Left);
    assert!((f.move_timer - 0.99).abs() < 1e-12);
    for (a, b) in f.enemies().zip(before.enemies()) {
        assert_eq!(a.y, b.y + 16.0);
        assert_eq!(a.x, b.x - 8.0);
    }
    assert_eq!(f.far_left(), 160.0);
}

#[test]
fn sweep_after_right_turn_can_flip_early() {
    // far_left before the turn is 12, so the same step flips back right
    let mut f = Formation {
        rows: vec![
            vec![Enemy::new(12.0, 16.0, 0, 0)],
            vec![Enemy::new(384.0, 48.0, 1, 0)],
        ],
        direction: Direction::Right,
        move_timer: 1.0,
    };
    assert_eq!(f.step(PLAYER_TOP), FormationStep::Turned);
    assert_eq!(f.direction, Direction::Right);
    assert_eq!((f.rows[0][0].x, f.rows[0][0].y), (4.0, 48.0));
    assert_eq!((f.rows[1][0].x, f.rows[1][0].y), (376.0, 80.0));
    assert!((f.move_timer - 0.99 * 0.99).abs() < 1e-12);
}

#[test]
fn reaching_player_row_lands_without_moving() {
    // bottom edge at 264 + 16 = 280 = player top
    let mut f = single(384.0, 264.0, Direction::Right);
    let before = f.clone();
    assert_eq!(f.step(PLAYER_TOP), FormationStep::Landed);
    assert_eq!(f, before);
}

#[test]
fn early_flip_can_land_after_the_shift() {
    let mut f = single(12.0, 264.0, Direction::Left);
    assert_eq!(f.step(PLAYER_TOP), FormationStep::Landed);
    assert_eq!((f.rows[0][0].x, f.rows[0][0].y), (4.0, 264.0));
    assert_eq!(f.direction, Direction::Left);
    assert_eq!(f.move_timer, 1.0);
}

#[test]
fn loss_is_only_checked_on_turns() {
    let mut f = single(100.0, 270.0, Direction::Right);
    assert_eq!(f.step(PLAYER_TOP), FormationStep::Shifted);
    assert_eq!(f.rows[0][0].x, 108.0);
}

#[test]
fn left_shift_flips_one_step_early() {
    let mut f = single(16.0, 16.0, Direction::Left);
    assert_eq!(f.step(PLAYER_TOP), FormationStep::Shifted);
    assert_eq!(f.rows[0][0].x, 8.0);

    assert_eq!(f.step(PLAYER_TOP), FormationStep::Turned);
    assert_eq!(f.rows[0][0].x, 0.0);
    assert_eq!(f.rows[0][0].y, 32.0);
    assert_eq!(f.direction, Direction::Right);
}

#[test]
fn left_wall_turns_without_shifting() {
    let mut f = single(0.0, 16.0, Direction::Left);
    assert_eq!(f.step(PLAYER_TOP), FormationStep::Turned);
    assert_eq!(f.rows[0][0].x, 0.0);
    assert_eq!(f.direction, Direction::Right);
}

#[test]
fn timer_accelerates_geometrically_with_turns() {
    let mut f = Formation::default();
    let mut turns = 0;
    for _ in 0..500 {
        if f.step(f64::MAX) == FormationStep::Turned {
            turns += 1;
            assert!((f.move_timer - 0.99_f64.powi(turns)).abs() < 1e-12);
        }
        assert!(f.move_timer > 0.0);
    }
    assert!(turns > 10);
}

#[test]
fn empty_formation_is_idle() {
    let mut f = Formation {
        rows: Vec::new(),
        direction: Direction::Right,
        move_timer: 1.0,
    };
    assert!(f.is_empty());
    assert_eq!(f.step(PLAYER_TOP), FormationStep::Idle);
    assert_eq!(f.front_row_index(), None);
}

#[test]
fn extremes_use_row_ends() {
    let mut f = Formation::default();
    f.rows[0].remove(0);
    f.rows[2].pop();
    // other rows still span the full width
    assert_eq!(f.far_left(), 80.0);
    assert_eq!(f.far_right(), 296.0);

    for row in f.rows.iter_mut() {
        row.remove(0);
    }
    assert_eq!(f.far_left(), 104.0);
}

#[test]
fn reindex_compacts_columns() {
    let mut f = Formation::default();
    f.rows[4].remove(3);
    f.rows.remove(1);
    f.reindex();
    for (r, row) in f.rows.iter().enumerate() {
        for (c, enemy) in row.iter().enumerate() {
            assert_eq!((enemy.row, enemy.column), (r, c));
        }
    }
    assert_eq!(f.rows[3].len(), 9);
}
