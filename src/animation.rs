/// Sprite frames and frame cycling shared by the player and enemies.

use std::collections::HashMap;
use std::hash::Hash;
use std::rc::Rc;

use glam::Vec2;

// ── Frames ───────────────────────────────────────────────────────────────────

/// One animation frame: a fixed logical size plus optional text art.
///
/// A frame without rows is a placeholder and renders as a blank box of the
/// same size, so nothing downstream has to special-case missing art.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    pub size: Vec2,
    pub rows: Vec<String>,
}

impl Frame {
    pub fn new(size: Vec2, rows: Vec<String>) -> Self {
        Frame { size, rows }
    }

    pub fn placeholder(size: Vec2) -> Self {
        Frame {
            size,
            rows: Vec::new(),
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.rows.is_empty()
    }
}

// ── Animation sets ───────────────────────────────────────────────────────────

/// Named frame sequences for one kind of entity.  Every sequence is
/// non-empty and all frames share `frame_size`.
#[derive(Clone, Debug)]
pub struct AnimationSet<K> {
    frame_size: Vec2,
    sequences: HashMap<K, Vec<Frame>>,
    fallback: Vec<Frame>,
}

impl<K: Copy + Eq + Hash> AnimationSet<K> {
    pub fn new(frame_size: Vec2) -> Self {
        AnimationSet {
            frame_size,
            sequences: HashMap::new(),
            fallback: vec![Frame::placeholder(frame_size)],
        }
    }

    /// Register a sequence.  An empty list becomes a single placeholder
    /// frame; every frame is forced to the set's size.
    pub fn insert(&mut self, key: K, frames: Vec<Frame>) {
        let frames: Vec<Frame> = if frames.is_empty() {
            self.fallback.clone()
        } else {
            frames
                .into_iter()
                .map(|f| Frame {
                    size: self.frame_size,
                    ..f
                })
                .collect()
        };
        self.sequences.insert(key, frames);
    }

    pub fn with_sequence(mut self, key: K, frames: Vec<Frame>) -> Self {
        self.insert(key, frames);
        self
    }

    /// The frames for `key`, or the placeholder sequence if none were loaded.
    pub fn sequence(&self, key: K) -> &[Frame] {
        self.sequences
            .get(&key)
            .map(Vec::as_slice)
            .unwrap_or(self.fallback.as_slice())
    }

    pub fn frame_size(&self) -> Vec2 {
        self.frame_size
    }
}

// ── Animated sprite ──────────────────────────────────────────────────────────

/// Position-free animation state composed into both `Player` and `Enemy`.
#[derive(Clone, Debug)]
pub struct AnimatedSprite<K> {
    set: Rc<AnimationSet<K>>,
    active: K,
    frame_index: usize,
    last_change_ms: u64,
}

impl<K: Copy + Eq + Hash> AnimatedSprite<K> {
    pub fn new(set: Rc<AnimationSet<K>>, active: K, now_ms: u64) -> Self {
        AnimatedSprite {
            set,
            active,
            frame_index: 0,
            last_change_ms: now_ms,
        }
    }

    pub fn active(&self) -> K {
        self.active
    }

    pub fn frame_index(&self) -> usize {
        self.frame_index
    }

    pub fn sequence_len(&self) -> usize {
        self.set.sequence(self.active).len()
    }

    pub fn current_frame(&self) -> &Frame {
        &self.set.sequence(self.active)[self.frame_index]
    }

    /// Switch the active sequence.  The frame index carries over, clamped
    /// to the new sequence's last frame.
    pub fn set_active(&mut self, key: K) {
        if key == self.active {
            return;
        }
        self.active = key;
        self.frame_index = self.frame_index.min(self.sequence_len() - 1);
    }

    /// Step to the next frame if `interval_ms` has passed since the last
    /// change.  Returns whether the frame changed.
    pub fn advance(&mut self, now_ms: u64, interval_ms: u64) -> bool {
        if now_ms.saturating_sub(self.last_change_ms) < interval_ms {
            return false;
        }
        self.last_change_ms = now_ms;
        self.frame_index = (self.frame_index + 1) % self.sequence_len();
        true
    }
}
