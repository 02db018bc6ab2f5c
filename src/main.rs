mod display;

use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context;
use crossterm::{
    cursor,
    event::{self, Event, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    terminal, ExecutableCommand,
};
use log::info;
use rand::thread_rng;

use dodge_survival::assets::Assets;
use dodge_survival::audio::{load_first, load_sound, Audio};
use dodge_survival::config::GameConfig;
use dodge_survival::entities::{AppState, Screen};
use dodge_survival::flow::{step, Cue};
use dodge_survival::input::KeyTracker;

use display::Viewport;

const FRAME: Duration = Duration::from_micros(16_667); // ≈60 FPS

const LOG_FILE: &str = "dodge_survival.log";

// ── Logging ───────────────────────────────────────────────────────────────────

/// The terminal is taken over by the game, so logs go to a file in the temp
/// directory.  Falls back to stderr if the file can't be created.
fn init_logging() {
    let mut builder = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    let path = std::env::temp_dir().join(LOG_FILE);
    if let Ok(file) = File::create(&path) {
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }
    builder.init();
    info!("logging to {}", path.display());
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Run screens until the player quits.
///
/// Each frame: drain pending key events, step the state machine once,
/// perform the cues it returned, redraw, then sleep out the rest of the
/// frame.
fn game_loop<W: Write>(out: &mut W, rx: &mpsc::Receiver<Event>, config: &GameConfig) -> std::io::Result<()> {
    let mut rng = thread_rng();
    let assets = Assets::load(config);
    let hit_sound = load_sound(&config.hit_sound_path());
    let music = load_first(&config.music_paths());
    let mut audio = Audio::open();

    let mut keys = KeyTracker::new();
    let mut app = AppState::new();

    loop {
        let frame_start = Instant::now();
        keys.begin_tick();

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            keys.handle(&ev);
        }

        let (next, cues) = step(&app, &keys.input(), config, &assets, &mut rng);
        app = next;

        for cue in cues {
            match cue {
                Cue::SessionStarted => audio.start_music(music.as_ref()),
                Cue::PlayerHit => audio.play(hit_sound.as_ref()),
            }
        }

        if app.screen == Screen::Quit {
            return Ok(());
        }

        let (cols, rows) = terminal::size()?;
        display::render(out, &app, &Viewport::new(cols, rows, config))?;

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            std::thread::sleep(FRAME - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    init_logging();
    let config = GameConfig::default();

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode().context("failed to enable raw mode")?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(_) => break,
        }
    });

    let result = game_loop(&mut out, &rx, &config);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    info!("exiting");
    result.context("terminal error in game loop")
}
