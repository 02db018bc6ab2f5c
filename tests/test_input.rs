use dodge_survival::input::*;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

fn press(code: KeyCode) -> Event {
    Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
}

fn with_kind(code: KeyCode, kind: KeyEventKind) -> Event {
    Event::Key(KeyEvent::new_with_kind(code, KeyModifiers::NONE, kind))
}

#[test]
fn pressed_arrow_is_held() {
    let mut keys = KeyTracker::new();
    keys.begin_tick();
    keys.handle(&press(KeyCode::Left));
    assert!(keys.input().left);
    assert!(!keys.input().right);
}

#[test]
fn held_key_expires_without_repeats() {
    let mut keys = KeyTracker::new();
    keys.begin_tick();
    keys.handle(&press(KeyCode::Right));
    for _ in 0..HOLD_WINDOW {
        keys.begin_tick();
        assert!(keys.input().right);
    }
    keys.begin_tick();
    assert!(!keys.input().right);
}

#[test]
fn repeat_keeps_key_alive() {
    let mut keys = KeyTracker::new();
    keys.begin_tick();
    keys.handle(&press(KeyCode::Up));
    for _ in 0..(HOLD_WINDOW * 3) {
        keys.begin_tick();
        keys.handle(&with_kind(KeyCode::Up, KeyEventKind::Repeat));
    }
    assert!(keys.input().up);
}

#[test]
fn release_drops_key_immediately() {
    let mut keys = KeyTracker::new();
    keys.begin_tick();
    keys.handle(&press(KeyCode::Down));
    keys.begin_tick();
    keys.handle(&with_kind(KeyCode::Down, KeyEventKind::Release));
    assert!(!keys.input().down);
}

#[test]
fn wasd_moves_too() {
    let mut keys = KeyTracker::new();
    keys.begin_tick();
    keys.handle(&press(KeyCode::Char('a')));
    keys.handle(&press(KeyCode::Char('W')));
    let input = keys.input();
    assert!(input.left);
    assert!(input.up);
}

#[test]
fn menu_keys_fire_once() {
    let mut keys = KeyTracker::new();
    keys.begin_tick();
    keys.handle(&press(KeyCode::Char('P')));
    keys.handle(&press(KeyCode::Char(' ')));
    keys.handle(&press(KeyCode::Esc));
    keys.handle(&press(KeyCode::Char('r')));
    let input = keys.input();
    assert!(input.pause && input.confirm && input.cancel && input.restart);

    keys.begin_tick();
    let input = keys.input();
    assert!(!input.pause && !input.confirm && !input.cancel && !input.restart);
}

#[test]
fn holding_pause_on_classic_terminal_fires_once() {
    // Auto-repeat arrives as a fresh Press every couple of ticks.
    let mut keys = KeyTracker::new();
    let mut fired = 0;
    for tick in 0..40 {
        keys.begin_tick();
        if tick % 2 == 0 {
            keys.handle(&press(KeyCode::Char('p')));
        }
        if keys.input().pause {
            fired += 1;
        }
    }
    assert_eq!(fired, 1);
}

#[test]
fn pause_fires_again_after_key_expires() {
    let mut keys = KeyTracker::new();
    keys.begin_tick();
    keys.handle(&press(KeyCode::Char('p')));
    assert!(keys.input().pause);

    for _ in 0..=HOLD_WINDOW {
        keys.begin_tick();
    }
    keys.handle(&press(KeyCode::Char('p')));
    assert!(keys.input().pause);
}

#[test]
fn press_after_release_fires_again() {
    let mut keys = KeyTracker::new();
    keys.begin_tick();
    keys.handle(&press(KeyCode::Char('p')));
    keys.begin_tick();
    keys.handle(&with_kind(KeyCode::Char('p'), KeyEventKind::Release));
    keys.handle(&press(KeyCode::Char('p')));
    assert!(keys.input().pause);
}

#[test]
fn ctrl_c_and_q_close() {
    let mut keys = KeyTracker::new();
    keys.begin_tick();
    keys.handle(&Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)));
    assert!(keys.input().close);

    keys.begin_tick();
    assert!(!keys.input().close);
    keys.handle(&press(KeyCode::Char('q')));
    assert!(keys.input().close);
}

#[test]
fn non_key_events_are_ignored() {
    let mut keys = KeyTracker::new();
    keys.begin_tick();
    keys.handle(&Event::Resize(80, 24));
    keys.handle(&Event::FocusLost);
    assert_eq!(keys.input(), dodge_survival::flow::Input::default());
}
