use side_shooter::compute::*;
use side_shooter::entities::*;

use rand::rngs::StdRng;
use rand::SeedableRng;

fn make_state() -> GameState {
    GameState {
        player: Player { x: 100, y: 300, speed: 5 },
        enemies: vec![
            Enemy { x: 700, y: 100 },
            Enemy { x: 750, y: 300 },
            Enemy { x: 790, y: 500 },
        ],
        bullets: Vec::new(),
        score: 0,
        level: Level::Medium,
        status: GameStatus::Playing,
        frame: 0,
        width: 800,
        height: 600,
    }
}

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

// ── init_state ────────────────────────────────────────────────────────────────

#[test]
fn init_state_player_position() {
    let s = init_state(Level::Easy, 800, 600, &mut seeded_rng());
    assert_eq!(s.player.x, 100);
    assert_eq!(s.player.y, 300); // height / 2
    assert_eq!(s.player.speed, 5);
}

#[test]
fn init_state_fills_enemy_pool() {
    let s = init_state(Level::Easy, 800, 600, &mut seeded_rng());
    assert_eq!(s.enemies.len(), ENEMY_COUNT);
    for e in &s.enemies {
        assert!((800..=1000).contains(&e.x));
        assert!((50..=550).contains(&e.y));
    }
    assert!(s.bullets.is_empty());
    assert_eq!(s.score, 0);
    assert_eq!(s.frame, 0);
    assert_eq!(s.status, GameStatus::Playing);
}

#[test]
fn init_state_preserves_level_and_dims() {
    let s = init_state(Level::Hard, 1024, 480, &mut seeded_rng());
    assert_eq!(s.level, Level::Hard);
    assert_eq!(s.width, 1024);
    assert_eq!(s.height, 480);
}

// ── move_player_up / move_player_down ─────────────────────────────────────────

#[test]
fn move_up_normal() {
    let s = make_state();
    assert_eq!(move_player_up(&s).player.y, 295);
}

#[test]
fn move_up_clamps_at_top() {
    let mut s = make_state();
    s.player.y = 10;
    let s = move_player_up(&s);
    assert_eq!(s.player.y, 5);
    let s = move_player_up(&s);
    assert_eq!(s.player.y, 0);
    let s = move_player_up(&s);
    assert_eq!(s.player.y, 0);
}

#[test]
fn move_up_never_goes_negative_from_odd_offset() {
    let mut s = make_state();
    s.player.y = 3;
    assert_eq!(move_player_up(&s).player.y, 0);
}

#[test]
fn move_down_normal() {
    let s = make_state();
    assert_eq!(move_player_down(&s).player.y, 305);
}

#[test]
fn move_down_clamps_at_bottom() {
    let mut s = make_state();
    s.player.y = 540;
    let s = move_player_down(&s);
    assert_eq!(s.player.y, 545);
    let s = move_player_down(&s);
    assert_eq!(s.player.y, 550); // height - player size
    let s = move_player_down(&s);
    assert_eq!(s.player.y, 550);
}

#[test]
fn move_never_changes_player_column() {
    let s = make_state();
    assert_eq!(move_player_up(&s).player.x, 100);
    assert_eq!(move_player_down(&s).player.x, 100);
}

#[test]
fn move_does_not_mutate_original() {
    let s = make_state();
    let _s2 = move_player_up(&s);
    let _s3 = move_player_down(&s);
    assert_eq!(s.player.y, 300);
}

// ── player_shoot ──────────────────────────────────────────────────────────────

#[test]
fn shoot_adds_bullet_at_player_nose() {
    let s = make_state();
    let s2 = player_shoot(&s);
    assert_eq!(s2.bullets, vec![Bullet { x: 150, y: 325 }]);
}

#[test]
fn shoot_has_no_cap() {
    let mut s = make_state();
    for _ in 0..20 {
        s = player_shoot(&s);
    }
    assert_eq!(s.bullets.len(), 20);
}

#[test]
fn shoot_does_not_mutate_original() {
    let s = make_state();
    let _ = player_shoot(&s);
    assert!(s.bullets.is_empty());
}

// ── move_bullets ──────────────────────────────────────────────────────────────

#[test]
fn bullets_move_right_at_level_speed() {
    let mut s = make_state();
    s.bullets.push(Bullet { x: 150, y: 325 });
    for (level, expected) in [(Level::Easy, 158), (Level::Medium, 160), (Level::Hard, 162)] {
        s.level = level;
        assert_eq!(move_bullets(&s).bullets[0].x, expected);
    }
}

#[test]
fn bullet_on_right_edge_is_kept_and_past_it_dropped() {
    let mut s = make_state();
    s.bullets.push(Bullet { x: 790, y: 10 }); // → 800, kept
    s.bullets.push(Bullet { x: 791, y: 20 }); // → 801, dropped
    let s2 = move_bullets(&s);
    assert_eq!(s2.bullets, vec![Bullet { x: 800, y: 10 }]);
}

#[test]
fn bullet_exits_after_expected_tick_count() {
    // W=800, x0=150, v=10: x reaches 800 after 65 ticks and leaves on the 66th.
    let mut s = make_state();
    s.bullets.push(Bullet { x: 150, y: 0 });
    for _ in 0..65 {
        s = move_bullets(&s);
    }
    assert_eq!(s.bullets, vec![Bullet { x: 800, y: 0 }]);
    s = move_bullets(&s);
    assert!(s.bullets.is_empty());
}

// ── move_enemies ──────────────────────────────────────────────────────────────

#[test]
fn enemies_move_left_at_level_speed() {
    let mut s = make_state();
    s.level = Level::Hard;
    let s2 = move_enemies(&s, &mut seeded_rng());
    let xs: Vec<i32> = s2.enemies.iter().map(|e| e.x).collect();
    assert_eq!(xs, vec![696, 746, 786]);
    assert_eq!(s2.enemies[1].y, 300);
}

#[test]
fn enemy_at_zero_is_not_yet_recycled() {
    let mut s = make_state();
    s.level = Level::Easy;
    s.enemies[0] = Enemy { x: 1, y: 100 };
    let s2 = move_enemies(&s, &mut seeded_rng());
    assert_eq!(s2.enemies[0], Enemy { x: 0, y: 100 });
}

#[test]
fn enemy_leaving_left_edge_respawns_in_same_slot() {
    let mut s = make_state();
    s.enemies[1] = Enemy { x: 1, y: 300 }; // 1 - 2 < 0
    let s2 = move_enemies(&s, &mut seeded_rng());
    assert_eq!(s2.enemies.len(), 3);
    let e = &s2.enemies[1];
    assert!((800..=1000).contains(&e.x));
    assert!((50..=550).contains(&e.y));
    assert_eq!(s2.enemies[0].x, 698);
    assert_eq!(s2.enemies[2].x, 788);
}

#[test]
fn respawn_positions_cover_the_whole_range() {
    let mut rng = seeded_rng();
    let samples: Vec<Enemy> = (0..5000).map(|_| spawn_enemy(800, 600, &mut rng)).collect();

    assert!(samples.iter().all(|e| (800..=1000).contains(&e.x)));
    assert!(samples.iter().all(|e| (50..=550).contains(&e.y)));

    // Roughly uniform: each half of each range gets a fair share.
    let low_x = samples.iter().filter(|e| e.x < 900).count();
    let low_y = samples.iter().filter(|e| e.y < 300).count();
    assert!((2200..=2800).contains(&low_x), "low_x = {}", low_x);
    assert!((2200..=2800).contains(&low_y), "low_y = {}", low_y);

    // Endpoints are reachable.
    assert!(samples.iter().any(|e| e.x == 800));
    assert!(samples.iter().any(|e| e.x == 1000));
    assert!(samples.iter().any(|e| e.y == 50));
    assert!(samples.iter().any(|e| e.y == 550));
}

// ── resolve_collisions — bullet ↔ enemy ──────────────────────────────────────

#[test]
fn bullet_hit_kills_enemy_and_scores() {
    let mut s = make_state();
    s.bullets.push(Bullet { x: 690, y: 110 }); // inside enemy 0
    let s2 = resolve_collisions(&s, &mut seeded_rng());
    assert_eq!(s2.score, 1);
    assert!(s2.bullets.is_empty());
    assert_eq!(s2.enemies.len(), 3);
    // Survivors keep their order; the replacement goes on the end.
    assert_eq!(s2.enemies[0], Enemy { x: 750, y: 300 });
    assert_eq!(s2.enemies[1], Enemy { x: 790, y: 500 });
    assert!((800..=1000).contains(&s2.enemies[2].x));
}

#[test]
fn bullet_touching_edge_does_not_hit() {
    let mut s = make_state();
    s.bullets.push(Bullet { x: 680, y: 100 }); // right edge at 700 == enemy left edge
    let s2 = resolve_collisions(&s, &mut seeded_rng());
    assert_eq!(s2.score, 0);
    assert_eq!(s2.bullets.len(), 1);
}

#[test]
fn bullet_miss_leaves_everything_alone() {
    let mut s = make_state();
    s.bullets.push(Bullet { x: 300, y: 20 });
    let s2 = resolve_collisions(&s, &mut seeded_rng());
    assert_eq!(s2.score, 0);
    assert_eq!(s2.bullets, s.bullets);
    assert_eq!(s2.enemies, s.enemies);
}

#[test]
fn one_bullet_over_two_enemies_kills_only_the_first() {
    let mut s = make_state();
    s.enemies[0] = Enemy { x: 400, y: 200 };
    s.enemies[1] = Enemy { x: 410, y: 210 };
    s.bullets.push(Bullet { x: 420, y: 220 }); // overlaps both
    let s2 = resolve_collisions(&s, &mut seeded_rng());
    assert_eq!(s2.score, 1);
    assert_eq!(s2.enemies.len(), 3);
    assert_eq!(s2.enemies[0], Enemy { x: 410, y: 210 });
    assert!(!s2.enemies.contains(&Enemy { x: 400, y: 200 }));
}

#[test]
fn two_bullets_on_one_enemy_spend_only_one() {
    let mut s = make_state();
    s.bullets.push(Bullet { x: 690, y: 110 });
    s.bullets.push(Bullet { x: 695, y: 115 });
    let s2 = resolve_collisions(&s, &mut seeded_rng());
    assert_eq!(s2.score, 1);
    assert_eq!(s2.bullets, vec![Bullet { x: 695, y: 115 }]);
}

#[test]
fn two_bullets_on_two_enemies_kill_both() {
    let mut s = make_state();
    s.bullets.push(Bullet { x: 690, y: 110 }); // enemy 0
    s.bullets.push(Bullet { x: 740, y: 310 }); // enemy 1
    let s2 = resolve_collisions(&s, &mut seeded_rng());
    assert_eq!(s2.score, 2);
    assert!(s2.bullets.is_empty());
    assert_eq!(s2.enemies.len(), 3);
    assert_eq!(s2.enemies[0], Enemy { x: 790, y: 500 });
}

// ── resolve_collisions — player ↔ enemy ──────────────────────────────────────

#[test]
fn player_contact_ends_the_game() {
    let mut s = make_state();
    s.enemies[0] = Enemy { x: 120, y: 320 };
    let s2 = resolve_collisions(&s, &mut seeded_rng());
    assert_eq!(s2.status, GameStatus::GameOver);
}

#[test]
fn player_touching_edge_is_safe() {
    let mut s = make_state();
    s.enemies[0] = Enemy { x: 150, y: 300 }; // flush against the player's right side
    let s2 = resolve_collisions(&s, &mut seeded_rng());
    assert_eq!(s2.status, GameStatus::Playing);
}

#[test]
fn enemy_shot_before_contact_spares_the_player() {
    let mut s = make_state();
    s.enemies[0] = Enemy { x: 120, y: 320 };
    s.bullets.push(Bullet { x: 150, y: 325 });
    let s2 = resolve_collisions(&s, &mut seeded_rng());
    assert_eq!(s2.score, 1);
    assert_eq!(s2.status, GameStatus::Playing);
}

// ── tick ──────────────────────────────────────────────────────────────────────

#[test]
fn tick_increments_frame() {
    let mut s = make_state();
    s.frame = 5;
    let s2 = tick(&s, &mut seeded_rng());
    assert_eq!(s2.frame, 6);
}

#[test]
fn tick_moves_before_colliding() {
    // Bullet and enemy 0 only overlap once both have moved.
    let mut s = make_state();
    s.bullets.push(Bullet { x: 670, y: 110 }); // → 680, enemy → 698: overlap
    let s2 = tick(&s, &mut seeded_rng());
    assert_eq!(s2.score, 1);
    assert!(s2.bullets.is_empty());
}

#[test]
fn tick_on_finished_game_is_a_no_op() {
    let mut s = make_state();
    s.status = GameStatus::GameOver;
    s.bullets.push(Bullet { x: 150, y: 325 });
    let s2 = tick(&s, &mut seeded_rng());
    assert_eq!(s2.frame, s.frame);
    assert_eq!(s2.bullets, s.bullets);
    assert_eq!(s2.enemies, s.enemies);
}

#[test]
fn pool_size_and_score_hold_over_a_long_run() {
    let mut rng = seeded_rng();
    let mut s = init_state(Level::Hard, 800, 600, &mut rng);
    let mut kills = 0;
    // Run the tick stages by hand so bullets spent on enemies can be told
    // apart from bullets that flew off the playfield.
    for i in 0..3000 {
        if i % 3 == 0 {
            s = player_shoot(&s);
        }
        // Nobody steers the player here; pin the status so the run keeps going.
        s.status = GameStatus::Playing;
        let moved = move_enemies(&move_bullets(&s), &mut rng);
        let resolved = resolve_collisions(&moved, &mut rng);
        let spent = (moved.bullets.len() - resolved.bullets.len()) as u32;
        assert_eq!(resolved.enemies.len(), ENEMY_COUNT);
        assert_eq!(resolved.score, moved.score + spent);
        assert_eq!(moved.score, s.score);
        kills += spent;
        s = resolved;
    }
    assert_eq!(s.score, kills);
}
