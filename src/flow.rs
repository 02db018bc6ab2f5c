/// The screen state machine.
///
/// `step` is pure like everything in `compute`: it takes the current
/// `AppState` and this tick's `Input` and returns the next state plus the
/// side effects (`Cue`s) the I/O loop should perform.

use log::info;
use rand::Rng;

use crate::assets::Assets;
use crate::compute::{init_session, tick};
use crate::config::GameConfig;
use crate::entities::{AppState, Screen};

/// One tick of player input.
///
/// Direction flags are level-triggered (key currently held); the menu flags
/// are edge-triggered (key pressed on this tick).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Input {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub pause: bool,
    pub confirm: bool,
    pub cancel: bool,
    pub restart: bool,
    /// Terminate the program from anywhere.
    pub close: bool,
}

impl Input {
    /// Movement axes; left wins over right and up over down.
    pub fn axes(&self) -> (i32, i32) {
        let dx = if self.left {
            -1
        } else if self.right {
            1
        } else {
            0
        };
        let dy = if self.up {
            -1
        } else if self.down {
            1
        } else {
            0
        };
        (dx, dy)
    }
}

/// Side effects requested by a transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cue {
    /// A fresh session began; start the background music.
    SessionStarted,
    /// The player was hit; play the hit sound.
    PlayerHit,
}

fn start_session(config: &GameConfig, assets: &Assets) -> (AppState, Vec<Cue>) {
    info!("session started");
    let state = AppState {
        screen: Screen::Playing,
        session: Some(init_session(config, assets)),
    };
    (state, vec![Cue::SessionStarted])
}

fn quit() -> (AppState, Vec<Cue>) {
    info!("quit requested");
    let state = AppState {
        screen: Screen::Quit,
        session: None,
    };
    (state, Vec::new())
}

fn with_screen(app: &AppState, screen: Screen) -> (AppState, Vec<Cue>) {
    let state = AppState {
        screen,
        ..app.clone()
    };
    (state, Vec::new())
}

/// Advance the state machine by one tick.
pub fn step(
    app: &AppState,
    input: &Input,
    config: &GameConfig,
    assets: &Assets,
    rng: &mut impl Rng,
) -> (AppState, Vec<Cue>) {
    if app.screen == Screen::Quit {
        return (app.clone(), Vec::new());
    }
    if input.close {
        return quit();
    }

    match app.screen {
        Screen::Start => {
            if input.confirm {
                start_session(config, assets)
            } else if input.cancel {
                quit()
            } else {
                (app.clone(), Vec::new())
            }
        }

        Screen::Playing => {
            let Some(session) = &app.session else {
                // Playing without a session cannot be reached through `step`;
                // recover by starting one.
                return start_session(config, assets);
            };
            if input.pause {
                info!("paused at {}s", session.survived_secs());
                return with_screen(app, Screen::Paused);
            }

            let (dx, dy) = input.axes();
            let session = tick(session, dx, dy, config, assets, rng);
            if session.game_over {
                info!("player hit after {}s", session.survived_secs());
                let state = AppState {
                    screen: Screen::GameOver,
                    session: Some(session),
                };
                (state, vec![Cue::PlayerHit])
            } else {
                let state = AppState {
                    screen: Screen::Playing,
                    session: Some(session),
                };
                (state, Vec::new())
            }
        }

        Screen::Paused => {
            if input.pause {
                with_screen(app, Screen::Playing)
            } else if input.restart {
                start_session(config, assets)
            } else if input.cancel {
                quit()
            } else {
                (app.clone(), Vec::new())
            }
        }

        Screen::GameOver => {
            if input.confirm || input.restart {
                start_session(config, assets)
            } else if input.cancel {
                quit()
            } else {
                (app.clone(), Vec::new())
            }
        }

        Screen::Quit => (app.clone(), Vec::new()),
    }
}
