/// Pure game-logic functions.
///
/// Every public function takes an immutable reference to the current
/// `GameState` (and, where needed, an RNG handle) and returns a brand-new
/// `GameState`.  Side effects are limited to the injected RNG.

use log::debug;
use rand::Rng;

use crate::entities::{
    Bullet, Enemy, GameState, GameStatus, Level, Player, ENEMY_COUNT, PLAYER_SIZE, PLAYER_SPEED,
    PLAYER_X,
};

/// How far past the right edge a fresh enemy may appear.
const SPAWN_DEPTH: i32 = 200;
/// Vertical margin kept clear at the top and bottom when spawning enemies.
const SPAWN_MARGIN: i32 = 50;

// ── Constructors ─────────────────────────────────────────────────────────────

/// A fresh enemy just beyond the right edge of the playfield.
pub fn spawn_enemy(width: i32, height: i32, rng: &mut impl Rng) -> Enemy {
    Enemy {
        x: rng.gen_range(width..=width + SPAWN_DEPTH),
        y: rng.gen_range(SPAWN_MARGIN..=height - SPAWN_MARGIN),
    }
}

/// Build the initial game state for a given level and playfield size.
pub fn init_state(level: Level, width: i32, height: i32, rng: &mut impl Rng) -> GameState {
    GameState {
        player: Player {
            x: PLAYER_X,
            y: height / 2,
            speed: PLAYER_SPEED,
        },
        enemies: (0..ENEMY_COUNT)
            .map(|_| spawn_enemy(width, height, rng))
            .collect(),
        bullets: Vec::new(),
        score: 0,
        level,
        status: GameStatus::Playing,
        frame: 0,
        width,
        height,
    }
}

// ── Input-driven state transitions (pure) ───────────────────────────────────

pub fn move_player_up(state: &GameState) -> GameState {
    if state.player.y <= 0 {
        return state.clone();
    }
    let new_y = (state.player.y - state.player.speed).max(0);
    GameState {
        player: Player {
            y: new_y,
            ..state.player.clone()
        },
        ..state.clone()
    }
}

pub fn move_player_down(state: &GameState) -> GameState {
    let bottom = state.height - PLAYER_SIZE;
    if state.player.y >= bottom {
        return state.clone();
    }
    let new_y = (state.player.y + state.player.speed).min(bottom);
    GameState {
        player: Player {
            y: new_y,
            ..state.player.clone()
        },
        ..state.clone()
    }
}

/// Fire a bullet from the player's nose.  No cap on bullets in flight.
pub fn player_shoot(state: &GameState) -> GameState {
    let new_bullet = Bullet {
        x: state.player.x + PLAYER_SIZE,
        y: state.player.y + PLAYER_SIZE / 2,
    };
    let mut bullets = state.bullets.clone();
    bullets.push(new_bullet);
    GameState {
        bullets,
        ..state.clone()
    }
}

// ── Movement step ────────────────────────────────────────────────────────────

/// Advance every bullet rightward and drop the ones past the right edge.
/// A bullet sitting exactly on the edge is kept.
pub fn move_bullets(state: &GameState) -> GameState {
    let speed = state.level.bullet_speed();
    let bullets: Vec<Bullet> = state
        .bullets
        .iter()
        .map(|b| Bullet { x: b.x + speed, ..b.clone() })
        .filter(|b| b.x <= state.width)
        .collect();
    GameState {
        bullets,
        ..state.clone()
    }
}

/// Advance every enemy leftward; any that leave the left edge respawn in
/// their own slot.
pub fn move_enemies(state: &GameState, rng: &mut impl Rng) -> GameState {
    let speed = state.level.enemy_speed();
    let enemies: Vec<Enemy> = state
        .enemies
        .iter()
        .map(|e| {
            let x = e.x - speed;
            if x < 0 {
                spawn_enemy(state.width, state.height, rng)
            } else {
                Enemy { x, ..e.clone() }
            }
        })
        .collect();
    GameState {
        enemies,
        ..state.clone()
    }
}

// ── Collision resolver ───────────────────────────────────────────────────────

/// Resolve bullet ↔ enemy hits, then player ↔ enemy contact.
///
/// Hits are collected by index during the scan and applied afterwards: each
/// bullet kills at most the first live enemy it overlaps (pool order), and
/// every kill appends exactly one respawned enemy so the pool size holds.
pub fn resolve_collisions(state: &GameState, rng: &mut impl Rng) -> GameState {
    let mut killed_enemies: Vec<usize> = Vec::new();
    let mut used_bullets: Vec<usize> = Vec::new();

    for (bi, bullet) in state.bullets.iter().enumerate() {
        let hit = bullet.rect();
        let target = state
            .enemies
            .iter()
            .enumerate()
            .find(|(ei, enemy)| !killed_enemies.contains(ei) && enemy.rect().overlaps(&hit));
        if let Some((ei, _)) = target {
            killed_enemies.push(ei);
            used_bullets.push(bi);
        }
    }

    let kills = killed_enemies.len();
    if kills > 0 {
        debug!("{} enemy kill(s) on frame {}", kills, state.frame);
    }

    let mut enemies: Vec<Enemy> = state
        .enemies
        .iter()
        .enumerate()
        .filter(|(i, _)| !killed_enemies.contains(i))
        .map(|(_, e)| e.clone())
        .collect();
    for _ in 0..kills {
        enemies.push(spawn_enemy(state.width, state.height, rng));
    }

    let bullets: Vec<Bullet> = state
        .bullets
        .iter()
        .enumerate()
        .filter(|(i, _)| !used_bullets.contains(i))
        .map(|(_, b)| b.clone())
        .collect();

    let player_box = state.player.rect();
    let status = if enemies.iter().any(|e| e.rect().overlaps(&player_box)) {
        GameStatus::GameOver
    } else {
        state.status.clone()
    };

    GameState {
        enemies,
        bullets,
        score: state.score + kills as u32,
        status,
        ..state.clone()
    }
}

// ── Per-frame tick (nearly pure — RNG is injected) ──────────────────────────

/// Advance the simulation by one frame: bullets, then enemies, then
/// collisions.  A finished game is returned unchanged.
pub fn tick(state: &GameState, rng: &mut impl Rng) -> GameState {
    if state.status == GameStatus::GameOver {
        return state.clone();
    }

    let moved = move_bullets(state);
    let moved = move_enemies(&moved, rng);
    let resolved = resolve_collisions(&moved, rng);

    GameState {
        frame: state.frame + 1,
        ..resolved
    }
}
