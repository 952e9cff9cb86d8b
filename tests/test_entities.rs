use side_shooter::entities::*;

#[test]
fn difficulty_table() {
    assert_eq!((Level::Easy.enemy_speed(), Level::Easy.bullet_speed()), (1, 8));
    assert_eq!((Level::Medium.enemy_speed(), Level::Medium.bullet_speed()), (2, 10));
    assert_eq!((Level::Hard.enemy_speed(), Level::Hard.bullet_speed()), (4, 12));
}

#[test]
fn sprite_boxes_use_fixed_sizes() {
    assert_eq!(Player { x: 100, y: 300, speed: 5 }.rect(), Rect::new(100, 300, 50, 50));
    assert_eq!(Enemy { x: 7, y: 8 }.rect(), Rect::new(7, 8, 50, 50));
    assert_eq!(Bullet { x: 1, y: 2 }.rect(), Rect::new(1, 2, 20, 20));
}

#[test]
fn rect_overlap_is_strict() {
    let a = Rect::new(0, 0, 50, 50);
    assert!(a.overlaps(&Rect::new(49, 49, 20, 20)));
    assert!(a.overlaps(&Rect::new(10, 10, 5, 5))); // contained
    assert!(!a.overlaps(&Rect::new(50, 0, 20, 20))); // shares the right edge
    assert!(!a.overlaps(&Rect::new(0, 50, 20, 20))); // shares the bottom edge
    assert!(!a.overlaps(&Rect::new(-20, 0, 20, 20))); // shares the left edge
}

#[test]
fn rect_overlap_is_symmetric() {
    let a = Rect::new(100, 300, 50, 50);
    let b = Rect::new(140, 330, 20, 20);
    assert_eq!(a.overlaps(&b), b.overlaps(&a));
}

#[test]
fn game_state_clone_is_independent() {
    let original = GameState {
        player: Player { x: 100, y: 300, speed: 5 },
        enemies: Vec::new(),
        bullets: Vec::new(),
        score: 0,
        level: Level::Easy,
        status: GameStatus::Playing,
        frame: 0,
        width: 800,
        height: 600,
    };
    let mut cloned = original.clone();

    // Mutating the clone must not affect the original
    cloned.player.y = 99;
    cloned.score = 999;
    cloned.enemies.push(Enemy { x: 5, y: 5 });

    assert_eq!(original.player.y, 300);
    assert_eq!(original.score, 0);
    assert!(original.enemies.is_empty());
}
