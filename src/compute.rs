/// Pure game-logic functions.
///
/// Every public function takes immutable references to the current state
/// (and, where needed, an RNG handle) and returns a brand-new value.  Side
/// effects are limited to the injected RNG.

use std::rc::Rc;

use glam::Vec2;
use rand::Rng;

use crate::animation::{AnimatedSprite, AnimationSet};
use crate::assets::Assets;
use crate::clock::SimClock;
use crate::config::GameConfig;
use crate::entities::{
    Difficulty, Direction, Edge, Enemy, EnemyAnim, GameSession, Player, Rect,
};

// ── Difficulty curve ─────────────────────────────────────────────────────────

/// Difficulty after `secs` survived seconds.
///
/// A step function: it only changes on multiples of
/// `difficulty_step_secs`, so speed never decreases and the spawn interval
/// never increases nor drops below `min_spawn_interval`.
pub fn difficulty_at(secs: u64, config: &GameConfig) -> Difficulty {
    let step = config.difficulty_step_secs.max(1);
    let t = secs - secs % step;
    let shortened = (config.base_spawn_interval as u64).saturating_sub(t);
    Difficulty {
        enemy_speed: config.enemy_base_speed + t as f32 / 10.0,
        spawn_interval: shortened.max(config.min_spawn_interval as u64) as u32,
    }
}

// ── Constructors ─────────────────────────────────────────────────────────────

pub fn init_player(config: &GameConfig, set: Rc<AnimationSet<Direction>>) -> Player {
    Player {
        pos: config.player_start(),
        size: config.player_size,
        facing: Direction::Down,
        sprite: AnimatedSprite::new(set, Direction::Down, 0),
    }
}

/// Build a fresh session: centred player, no enemies, base difficulty.
pub fn init_session(config: &GameConfig, assets: &Assets) -> GameSession {
    GameSession {
        player: init_player(config, Rc::clone(&assets.player)),
        enemies: Vec::new(),
        difficulty: difficulty_at(0, config),
        spawn_counter: 0,
        clock: SimClock::new(config.tick_rate),
        game_over: false,
    }
}

// ── Player controller ────────────────────────────────────────────────────────

/// Move the player one tick.  `dx` and `dy` are each -1, 0 or 1.
///
/// Facing follows the horizontal axis first and only falls back to the
/// vertical one when there is no horizontal input.
pub fn move_player(player: &Player, dx: i32, dy: i32, now_ms: u64, config: &GameConfig) -> Player {
    let facing = match (dx.signum(), dy.signum()) {
        (-1, _) => Direction::Left,
        (1, _) => Direction::Right,
        (_, -1) => Direction::Up,
        (_, 1) => Direction::Down,
        _ => player.facing,
    };

    let step = Vec2::new(dx.signum() as f32, dy.signum() as f32) * config.player_speed;
    let max = Vec2::new(config.width, config.height) - player.size;
    let pos = (player.pos + step).clamp(Vec2::ZERO, max.max(Vec2::ZERO));

    let mut sprite = player.sprite.clone();
    if dx == 0 && dy == 0 {
        sprite.set_active(Direction::Idle);
    } else {
        sprite.set_active(facing);
    }
    sprite.advance(now_ms, config.animation_interval_ms);

    Player {
        pos,
        facing,
        sprite,
        ..player.clone()
    }
}

// ── Spawner ──────────────────────────────────────────────────────────────────

/// Spawn an enemy on a uniformly chosen edge.
pub fn spawn_enemy(
    config: &GameConfig,
    speed: f32,
    set: &Rc<AnimationSet<EnemyAnim>>,
    now_ms: u64,
    rng: &mut impl Rng,
) -> Enemy {
    let edge = Edge::ALL[rng.gen_range(0..Edge::ALL.len())];
    spawn_from_edge(edge, config, speed, set, now_ms, rng)
}

/// Place an enemy just outside `edge`, heading into the field.
///
/// The inward component of the heading is fixed at 1 and the lateral one is
/// uniform in [-1, 1]; the heading is normalised and scaled to `speed`.
pub fn spawn_from_edge(
    edge: Edge,
    config: &GameConfig,
    speed: f32,
    set: &Rc<AnimationSet<EnemyAnim>>,
    now_ms: u64,
    rng: &mut impl Rng,
) -> Enemy {
    let size = config.enemy_size;
    let max_x = (config.width - size.x).max(0.0) as i32;
    let max_y = (config.height - size.y).max(0.0) as i32;

    let pos = match edge {
        Edge::Top => Vec2::new(rng.gen_range(0..=max_x) as f32, -size.y),
        Edge::Bottom => Vec2::new(rng.gen_range(0..=max_x) as f32, config.height + size.y),
        Edge::Left => Vec2::new(-size.x, rng.gen_range(0..=max_y) as f32),
        Edge::Right => Vec2::new(config.width + size.x, rng.gen_range(0..=max_y) as f32),
    };

    let heading = loop {
        let lateral: f32 = rng.gen_range(-1.0..=1.0);
        let raw = match edge {
            Edge::Top => Vec2::new(lateral, 1.0),
            Edge::Bottom => Vec2::new(lateral, -1.0),
            Edge::Left => Vec2::new(1.0, lateral),
            Edge::Right => Vec2::new(-1.0, lateral),
        };
        if let Some(unit) = raw.try_normalize() {
            break unit;
        }
    };

    Enemy {
        pos,
        velocity: heading * speed,
        size,
        sprite: AnimatedSprite::new(Rc::clone(set), EnemyAnim::Walk, now_ms),
    }
}

// ── Enemies ──────────────────────────────────────────────────────────────────

pub fn move_enemy(enemy: &Enemy, now_ms: u64, config: &GameConfig) -> Enemy {
    let mut sprite = enemy.sprite.clone();
    sprite.advance(now_ms, config.animation_interval_ms);
    Enemy {
        pos: enemy.pos + enemy.velocity,
        sprite,
        ..enemy.clone()
    }
}

/// Whether the enemy has drifted more than `cull_margin` outside the screen.
pub fn is_out_of_play(enemy: &Enemy, config: &GameConfig) -> bool {
    let r = enemy.rect();
    let m = config.cull_margin;
    r.right() < -m || r.bottom() < -m || r.x > config.width + m || r.y > config.height + m
}

// ── Collision checker ────────────────────────────────────────────────────────

/// Index of the first enemy overlapping `player`, if any.
pub fn first_collision(player: &Rect, enemies: &[Enemy]) -> Option<usize> {
    enemies.iter().position(|e| e.rect().intersects(player))
}

// ── Per-tick update (nearly pure — RNG is injected) ─────────────────────────

/// Advance a session by one tick with the given movement axes.
/// A session that is already over is returned unchanged.
pub fn tick(
    session: &GameSession,
    dx: i32,
    dy: i32,
    config: &GameConfig,
    assets: &Assets,
    rng: &mut impl Rng,
) -> GameSession {
    if session.game_over {
        return session.clone();
    }

    let mut clock = session.clock;
    clock.advance();
    let now_ms = clock.elapsed_ms();
    let secs = clock.elapsed_secs();

    // ── 1. Player ────────────────────────────────────────────────────────────
    let player = move_player(&session.player, dx, dy, now_ms, config);

    // ── 2. Difficulty, re-evaluated on step boundaries ──────────────────────
    let difficulty = if secs > 0 && secs % config.difficulty_step_secs.max(1) == 0 {
        difficulty_at(secs, config)
    } else {
        session.difficulty
    };

    // ── 3. Spawn ─────────────────────────────────────────────────────────────
    let mut enemies = session.enemies.clone();
    let mut spawn_counter = session.spawn_counter + 1;
    if spawn_counter >= difficulty.spawn_interval {
        spawn_counter = 0;
        enemies.push(spawn_enemy(config, difficulty.enemy_speed, &assets.enemy, now_ms, rng));
    }

    // ── 4. Move enemies, then check collisions ──────────────────────────────
    let enemies: Vec<Enemy> = enemies
        .iter()
        .map(|e| move_enemy(e, now_ms, config))
        .collect();
    let game_over = first_collision(&player.rect(), &enemies).is_some();

    // ── 5. Drop enemies that wandered off ────────────────────────────────────
    let enemies: Vec<Enemy> = enemies
        .into_iter()
        .filter(|e| !is_out_of_play(e, config))
        .collect();

    GameSession {
        player,
        enemies,
        difficulty,
        spawn_counter,
        clock,
        game_over,
    }
}
