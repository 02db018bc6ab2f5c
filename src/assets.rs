/// Sprite loading.
///
/// Frames are small text-art files at `<assets>/<folder>/<prefix>_<i>.txt`.
/// Loading never fails the game: a missing or empty file is logged and
/// skipped, and a sequence with no frames falls back to a blank
/// placeholder of the right size.

use std::path::Path;
use std::rc::Rc;

use anyhow::{bail, Context};
use glam::Vec2;
use log::{debug, warn};

use crate::animation::{AnimationSet, Frame};
use crate::config::GameConfig;
use crate::entities::{Direction, EnemyAnim};

/// Animation sets for every entity kind, loaded once and shared.
#[derive(Clone, Debug)]
pub struct Assets {
    pub player: Rc<AnimationSet<Direction>>,
    pub enemy: Rc<AnimationSet<EnemyAnim>>,
}

impl Assets {
    /// Load everything from `config.assets_dir`.
    pub fn load(config: &GameConfig) -> Self {
        let dir = config.assets_dir.as_path();
        let size = config.player_size;

        let player = AnimationSet::new(size)
            .with_sequence(Direction::Idle, load_animation(dir, "player", "idle", 1, size))
            .with_sequence(Direction::Up, load_animation(dir, "player", "walk_up", 2, size))
            .with_sequence(Direction::Down, load_animation(dir, "player", "walk_down", 2, size))
            .with_sequence(Direction::Left, load_animation(dir, "player", "walk_left", 2, size))
            .with_sequence(Direction::Right, load_animation(dir, "player", "walk_right", 2, size));

        let size = config.enemy_size;
        let enemy = AnimationSet::new(size)
            .with_sequence(EnemyAnim::Walk, load_animation(dir, "enemy", "walk", 2, size));

        Assets {
            player: Rc::new(player),
            enemy: Rc::new(enemy),
        }
    }

    /// Placeholder-only assets; no file system access.
    pub fn placeholder(config: &GameConfig) -> Self {
        Assets {
            player: Rc::new(AnimationSet::new(config.player_size)),
            enemy: Rc::new(AnimationSet::new(config.enemy_size)),
        }
    }
}

/// Load `count` frames named `<prefix>_0.txt` .. in `<dir>/<folder>`.
/// Frames that cannot be read are skipped; if none load, the result is a
/// single placeholder.
pub fn load_animation(dir: &Path, folder: &str, prefix: &str, count: usize, size: Vec2) -> Vec<Frame> {
    let frames: Vec<Frame> = (0..count)
        .filter_map(|i| match load_frame(dir, folder, prefix, i, size) {
            Ok(frame) => Some(frame),
            Err(e) => {
                warn!("{:#}", e);
                None
            }
        })
        .collect();

    if frames.is_empty() {
        debug!("using placeholder for {}/{}", folder, prefix);
        vec![Frame::placeholder(size)]
    } else {
        frames
    }
}

pub fn load_frame(dir: &Path, folder: &str, prefix: &str, index: usize, size: Vec2) -> anyhow::Result<Frame> {
    let path = dir.join(folder).join(format!("{}_{}.txt", prefix, index));
    let text = std::fs::read_to_string(&path)
        .with_context(|| format!("sprite frame {} not found", path.display()))?;
    parse_frame(&text, size).with_context(|| format!("bad sprite frame {}", path.display()))
}

/// Text art → frame.  Trailing blank lines are dropped; a file with no
/// visible characters is rejected.
pub fn parse_frame(text: &str, size: Vec2) -> anyhow::Result<Frame> {
    let mut rows: Vec<String> = text.lines().map(|l| l.trim_end().to_string()).collect();
    while rows.last().map_or(false, |r| r.is_empty()) {
        rows.pop();
    }
    if rows.is_empty() {
        bail!("frame has no art");
    }
    Ok(Frame::new(size, rows))
}
