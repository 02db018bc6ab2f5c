//! Dodge Survival — a top-down terminal arcade game.
//!
//! The library holds everything that can run without a terminal:
//! - `config`: tunable constants bundled into `GameConfig`
//! - `clock`: fixed-step simulation clock
//! - `animation`: frames, animation sets and the shared animated sprite
//! - `entities`: pure data (player, enemies, session, screens)
//! - `compute`: player movement, difficulty curve, spawning, collisions, tick
//! - `flow`: the screen state machine
//! - `assets` / `audio`: best-effort loaders that never fail the game
//! - `input`: keyboard tracking that turns crossterm events into an `Input`

pub mod animation;
pub mod assets;
pub mod audio;
pub mod clock;
pub mod compute;
pub mod config;
pub mod entities;
pub mod flow;
pub mod input;
