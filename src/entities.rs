/// All game entity types — pure data, almost no logic.

use glam::Vec2;

use crate::animation::AnimatedSprite;
use crate::clock::SimClock;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Idle,
    Up,
    Down,
    Left,
    Right,
}

/// Enemies only ever walk.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EnemyAnim {
    Walk,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Edge {
    Top,
    Bottom,
    Left,
    Right,
}

impl Edge {
    pub const ALL: [Edge; 4] = [Edge::Top, Edge::Bottom, Edge::Left, Edge::Right];
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Screen {
    Start,
    Playing,
    Paused,
    GameOver,
    Quit,
}

// ── Geometry ──────────────────────────────────────────────────────────────────

/// Axis-aligned rectangle, top-left origin, y grows downward.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Rect {
            x: pos.x,
            y: pos.y,
            w: size.x,
            h: size.y,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    /// True iff the projections overlap on both axes.  Rectangles that only
    /// share an edge do not intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}

// ── Player & enemy ────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Player {
    /// Top-left corner.
    pub pos: Vec2,
    pub size: Vec2,
    /// Last direction moved in; never `Idle` once the player has moved.
    pub facing: Direction,
    pub sprite: AnimatedSprite<Direction>,
}

impl Player {
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }
}

#[derive(Clone, Debug)]
pub struct Enemy {
    /// Top-left corner.
    pub pos: Vec2,
    /// Pixels per tick; its length is the speed the enemy spawned with.
    pub velocity: Vec2,
    pub size: Vec2,
    pub sprite: AnimatedSprite<EnemyAnim>,
}

impl Enemy {
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }
}

// ── Difficulty & session ──────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Difficulty {
    /// Speed given to newly spawned enemies, pixels per tick.
    pub enemy_speed: f32,
    /// Ticks between spawns.
    pub spawn_interval: u32,
}

/// One play-through, from pressing start until the first hit.
#[derive(Clone, Debug)]
pub struct GameSession {
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub difficulty: Difficulty,
    /// Ticks since the last spawn.
    pub spawn_counter: u32,
    pub clock: SimClock,
    pub game_over: bool,
}

impl GameSession {
    /// Survival time shown on the HUD and the game-over screen.
    pub fn survived_secs(&self) -> u64 {
        self.clock.elapsed_secs()
    }
}

/// Everything the game loop owns between frames.
#[derive(Clone, Debug)]
pub struct AppState {
    pub screen: Screen,
    pub session: Option<GameSession>,
}

impl AppState {
    pub fn new() -> Self {
        AppState {
            screen: Screen::Start,
            session: None,
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
