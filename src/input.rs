/// Keyboard tracking — crossterm key events in, one `Input` per tick out.
///
/// Terminals report key *events*, not key *state*.  To get level-triggered
/// movement we remember the tick on which each key was last pressed or
/// repeated; a key counts as held while that tick is recent enough.
///
/// Works on two classes of terminal:
/// * **Keyboard-enhancement capable** (kitty protocol): real `Release`
///   events remove the key immediately.
/// * **Classic terminals**: only `Press` events, with OS key-repeat showing
///   up as repeated presses.  Keys expire after `HOLD_WINDOW` ticks of
///   silence.

use std::collections::{HashMap, HashSet};

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::flow::Input;

/// A key is considered held if its last press/repeat arrived within this
/// many ticks (≈133 ms at 60 Hz).
pub const HOLD_WINDOW: u64 = 8;

#[derive(Debug, Default)]
pub struct KeyTracker {
    /// Each held key → the tick it was last seen (press or repeat).
    key_frame: HashMap<KeyCode, u64>,
    /// Keys pressed since the last `begin_tick`.
    pressed: HashSet<KeyCode>,
    close: bool,
    frame: u64,
}

impl KeyTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new tick: forget one-shot presses from the previous one.
    pub fn begin_tick(&mut self) {
        self.frame += 1;
        self.pressed.clear();
        self.close = false;
    }

    pub fn handle(&mut self, event: &Event) {
        let Event::Key(KeyEvent { code, kind, modifiers, .. }) = event else {
            return;
        };
        let code = normalize(*code);
        match kind {
            KeyEventKind::Press => {
                if code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
                    self.close = true;
                    return;
                }
                // Classic terminals report auto-repeat as another press.
                let repeat = self.held(code);
                self.key_frame.insert(code, self.frame);
                if !repeat {
                    self.pressed.insert(code);
                }
            }
            KeyEventKind::Repeat => {
                self.key_frame.insert(code, self.frame);
            }
            KeyEventKind::Release => {
                self.key_frame.remove(&code);
            }
        }
    }

    fn held(&self, key: KeyCode) -> bool {
        self.key_frame
            .get(&key)
            .map(|&last| self.frame.saturating_sub(last) <= HOLD_WINDOW)
            .unwrap_or(false)
    }

    fn pressed(&self, key: KeyCode) -> bool {
        self.pressed.contains(&key)
    }

    /// Snapshot of this tick's input.
    pub fn input(&self) -> Input {
        Input {
            left: self.held(KeyCode::Left) || self.held(KeyCode::Char('a')),
            right: self.held(KeyCode::Right) || self.held(KeyCode::Char('d')),
            up: self.held(KeyCode::Up) || self.held(KeyCode::Char('w')),
            down: self.held(KeyCode::Down) || self.held(KeyCode::Char('s')),
            pause: self.pressed(KeyCode::Char('p')),
            confirm: self.pressed(KeyCode::Char(' ')) || self.pressed(KeyCode::Enter),
            cancel: self.pressed(KeyCode::Esc),
            restart: self.pressed(KeyCode::Char('r')),
            close: self.close || self.pressed(KeyCode::Char('q')),
        }
    }
}

/// Fold upper-case letters onto lower-case so Caps Lock doesn't matter.
fn normalize(code: KeyCode) -> KeyCode {
    match code {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        other => other,
    }
}
