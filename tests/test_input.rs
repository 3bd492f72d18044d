use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use fight_kokaton::input::*;

fn press(code: KeyCode) -> KeyEvent {
    KeyEvent::new_with_kind(code, KeyModifiers::NONE, KeyEventKind::Press)
}

fn release(code: KeyCode) -> KeyEvent {
    KeyEvent::new_with_kind(code, KeyModifiers::NONE, KeyEventKind::Release)
}

fn repeat(code: KeyCode) -> KeyEvent {
    KeyEvent::new_with_kind(code, KeyModifiers::NONE, KeyEventKind::Repeat)
}

// ── Key mapping ───────────────────────────────────────────────────────────────

#[test]
fn arrows_and_wasd_map_to_directions() {
    assert_eq!(key_for(&KeyCode::Up), Some(Key::Up));
    assert_eq!(key_for(&KeyCode::Char('w')), Some(Key::Up));
    assert_eq!(key_for(&KeyCode::Char('S')), Some(Key::Down));
    assert_eq!(key_for(&KeyCode::Left), Some(Key::Left));
    assert_eq!(key_for(&KeyCode::Char('d')), Some(Key::Right));
    assert_eq!(key_for(&KeyCode::Char(' ')), Some(Key::Fire));
    assert_eq!(key_for(&KeyCode::Char('x')), None);
}

#[test]
fn move_keys_are_unit_steps() {
    for (_, (dx, dy)) in MOVE_KEYS {
        assert_eq!(dx.abs() + dy.abs(), 1);
    }
}

#[test]
fn pressed_keys_of_sets_only_listed() {
    let keys = PressedKeys::of(&[Key::Up, Key::Fire]);
    assert!(keys.is_pressed(Key::Up));
    assert!(keys.is_pressed(Key::Fire));
    assert!(!keys.is_pressed(Key::Down));
    assert!(!keys.is_pressed(Key::Left));
    assert!(!keys.is_pressed(Key::Right));
}

// ── KeyTracker ────────────────────────────────────────────────────────────────

#[test]
fn key_held_within_window() {
    let now = Instant::now();
    let mut tracker = KeyTracker::new(Duration::from_millis(150));
    tracker.record(Key::Left, KeyEventKind::Press, now);
    assert!(tracker.is_held(Key::Left, now + Duration::from_millis(100)));
    assert!(tracker.pressed(now).left);
}

#[test]
fn key_expires_after_window() {
    let now = Instant::now();
    let mut tracker = KeyTracker::new(Duration::from_millis(150));
    tracker.record(Key::Left, KeyEventKind::Press, now);
    assert!(!tracker.is_held(Key::Left, now + Duration::from_millis(200)));
}

#[test]
fn repeat_refreshes_window() {
    let now = Instant::now();
    let mut tracker = KeyTracker::new(Duration::from_millis(150));
    tracker.record(Key::Up, KeyEventKind::Press, now);
    tracker.record(Key::Up, KeyEventKind::Repeat, now + Duration::from_millis(100));
    assert!(tracker.is_held(Key::Up, now + Duration::from_millis(200)));
}

#[test]
fn release_drops_key_immediately() {
    let now = Instant::now();
    let mut tracker = KeyTracker::default();
    tracker.record(Key::Right, KeyEventKind::Press, now);
    tracker.record(Key::Right, KeyEventKind::Release, now);
    assert!(!tracker.is_held(Key::Right, now));
}

#[test]
fn unseen_key_is_not_held() {
    let tracker = KeyTracker::default();
    assert_eq!(tracker.pressed(Instant::now()), PressedKeys::default());
}

// ── KeyTracker::apply ─────────────────────────────────────────────────────────

#[test]
fn fire_presses_are_counted() {
    let now = Instant::now();
    let mut tracker = KeyTracker::default();
    let mut input = FrameInput::idle();
    tracker.apply(&mut input, &press(KeyCode::Char(' ')), now);
    tracker.apply(&mut input, &repeat(KeyCode::Char(' ')), now);
    tracker.apply(&mut input, &press(KeyCode::Char(' ')), now);
    assert_eq!(input.fire_presses, 2);
    assert!(tracker.is_held(Key::Fire, now));
}

#[test]
fn fire_release_is_not_a_shot() {
    let now = Instant::now();
    let mut tracker = KeyTracker::default();
    let mut input = FrameInput::idle();
    tracker.apply(&mut input, &release(KeyCode::Char(' ')), now);
    assert_eq!(input.fire_presses, 0);
}

#[test]
fn quit_keys_set_quit() {
    let now = Instant::now();
    for event in [
        press(KeyCode::Char('q')),
        press(KeyCode::Char('Q')),
        press(KeyCode::Esc),
        KeyEvent::new_with_kind(KeyCode::Char('c'), KeyModifiers::CONTROL, KeyEventKind::Press),
    ] {
        let mut tracker = KeyTracker::default();
        let mut input = FrameInput::idle();
        tracker.apply(&mut input, &event, now);
        assert!(input.quit, "{:?}", event);
    }
}

#[test]
fn plain_c_is_not_quit() {
    let mut tracker = KeyTracker::default();
    let mut input = FrameInput::idle();
    tracker.apply(&mut input, &press(KeyCode::Char('c')), Instant::now());
    assert!(!input.quit);
}

#[test]
fn quit_release_is_ignored() {
    let mut tracker = KeyTracker::default();
    let mut input = FrameInput::idle();
    tracker.apply(&mut input, &release(KeyCode::Esc), Instant::now());
    assert!(!input.quit);
}

#[test]
fn movement_keys_are_tracked() {
    let now = Instant::now();
    let mut tracker = KeyTracker::default();
    let mut input = FrameInput::idle();
    tracker.apply(&mut input, &press(KeyCode::Up), now);
    tracker.apply(&mut input, &press(KeyCode::Char('a')), now);
    assert_eq!(tracker.pressed(now), PressedKeys::of(&[Key::Up, Key::Left]));
    assert_eq!(input.fire_presses, 0);
    assert!(!input.quit);
}

// ── FrameInput helpers ────────────────────────────────────────────────────────

#[test]
fn fire_helper_is_one_press_held() {
    let input = FrameInput::fire();
    assert_eq!(input.fire_presses, 1);
    assert!(input.keys.fire);
    assert!(!input.quit);
}

#[test]
fn idle_is_empty() {
    assert_eq!(FrameInput::idle(), FrameInput::default());
    assert!(FrameInput::quit().quit);
}
