/// Game tuning — every constant the simulation reads lives in `GameConfig`.
///
/// Nothing here is read from disk or the command line; `GameConfig::default()`
/// is the game.  Tests build their own configs to shrink the field or speed
/// things up.

use std::path::PathBuf;

use glam::Vec2;

/// Logical screen size, in pixels.
pub const SCREEN_WIDTH: f32 = 800.0;
pub const SCREEN_HEIGHT: f32 = 600.0;

/// Simulation ticks per second.
pub const TICK_RATE: u32 = 60;

/// Milliseconds between animation frame changes.
pub const ANIMATION_INTERVAL_MS: u64 = 150;

#[derive(Clone, Debug, PartialEq)]
pub struct GameConfig {
    pub width: f32,
    pub height: f32,
    pub tick_rate: u32,

    pub player_size: Vec2,
    /// Pixels per tick along each pressed axis.
    pub player_speed: f32,

    pub enemy_size: Vec2,
    pub enemy_base_speed: f32,
    /// Ticks between spawns at the start of a session.
    pub base_spawn_interval: u32,
    /// Spawn interval never drops below this.
    pub min_spawn_interval: u32,
    /// Difficulty is re-evaluated every this many survived seconds.
    pub difficulty_step_secs: u64,

    pub animation_interval_ms: u64,
    /// Enemies this far outside the screen are dropped.
    pub cull_margin: f32,

    pub assets_dir: PathBuf,
    /// One-shot played on the hit, relative to `assets_dir`.
    pub hit_sound: PathBuf,
    /// Music candidates, relative to `assets_dir`; the first playable wins.
    pub music_tracks: Vec<PathBuf>,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            width: SCREEN_WIDTH,
            height: SCREEN_HEIGHT,
            tick_rate: TICK_RATE,
            player_size: Vec2::new(64.0, 64.0),
            player_speed: 4.0,
            enemy_size: Vec2::new(40.0, 40.0),
            enemy_base_speed: 1.5,
            base_spawn_interval: 90,
            min_spawn_interval: 30,
            difficulty_step_secs: 5,
            animation_interval_ms: ANIMATION_INTERVAL_MS,
            cull_margin: 100.0,
            assets_dir: PathBuf::from("assets"),
            hit_sound: PathBuf::from("hit.wav"),
            music_tracks: vec![PathBuf::from("background.mp3"), PathBuf::from("background.wav")],
        }
    }
}

impl GameConfig {
    pub fn hit_sound_path(&self) -> PathBuf {
        self.assets_dir.join(&self.hit_sound)
    }

    pub fn music_paths(&self) -> Vec<PathBuf> {
        self.music_tracks.iter().map(|t| self.assets_dir.join(t)).collect()
    }

    /// Where the player starts: centred on the screen.
    pub fn player_start(&self) -> Vec2 {
        Vec2::new(
            ((self.width - self.player_size.x) / 2.0).floor(),
            ((self.height - self.player_size.y) / 2.0).floor(),
        )
    }
}
