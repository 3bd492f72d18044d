/// Keyboard input: which keys are held this frame, plus the discrete
/// events (quit, fire key-down) that arrived since the last frame.
///
/// Works on two classes of terminal:
/// * **Keyboard-enhancement capable** (kitty protocol): proper
///   `Press` / `Repeat` / `Release` events, so keys drop on release.
/// * **Classic terminals**: only `Press` events (OS key-repeat shows as
///   repeated `Press`).  A key counts as held while its last event is
///   younger than the hold window, which is longer than the OS repeat
///   interval.
use std::collections::HashMap;
use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// A key is held if its last press/repeat arrived within this window.
pub const HOLD_WINDOW: Duration = Duration::from_millis(150);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Fire,
}

/// Directional keys and the unit step each contributes.
pub const MOVE_KEYS: [(Key, (i32, i32)); 4] = [
    (Key::Up, (0, -1)),
    (Key::Down, (0, 1)),
    (Key::Left, (-1, 0)),
    (Key::Right, (1, 0)),
];

pub fn key_for(code: &KeyCode) -> Option<Key> {
    match code {
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Some(Key::Up),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Some(Key::Down),
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(Key::Left),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(Key::Right),
        KeyCode::Char(' ') => Some(Key::Fire),
        _ => None,
    }
}

fn is_quit(event: &KeyEvent) -> bool {
    match event.code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => true,
        KeyCode::Char('c') => event.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

// ── Per-frame input ───────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PressedKeys {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub fire: bool,
}

impl PressedKeys {
    pub fn of(keys: &[Key]) -> Self {
        let mut pressed = Self::default();
        for &key in keys {
            pressed.set(key, true);
        }
        pressed
    }

    pub fn is_pressed(&self, key: Key) -> bool {
        match key {
            Key::Up => self.up,
            Key::Down => self.down,
            Key::Left => self.left,
            Key::Right => self.right,
            Key::Fire => self.fire,
        }
    }

    pub fn set(&mut self, key: Key, down: bool) {
        match key {
            Key::Up => self.up = down,
            Key::Down => self.down = down,
            Key::Left => self.left = down,
            Key::Right => self.right = down,
            Key::Fire => self.fire = down,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FrameInput {
    pub quit: bool,
    /// Fire key-down events since the previous frame.
    pub fire_presses: u32,
    pub keys: PressedKeys,
    /// New terminal size, if it changed.
    pub resized: Option<(u16, u16)>,
}

impl FrameInput {
    pub fn idle() -> Self {
        Self::default()
    }

    pub fn holding(keys: &[Key]) -> Self {
        Self {
            keys: PressedKeys::of(keys),
            ..Self::default()
        }
    }

    /// A single fire key-down with the key still held.
    pub fn fire() -> Self {
        Self {
            fire_presses: 1,
            keys: PressedKeys::of(&[Key::Fire]),
            ..Self::default()
        }
    }

    pub fn quit() -> Self {
        Self {
            quit: true,
            ..Self::default()
        }
    }
}

// ── Held-key tracking ─────────────────────────────────────────────────────────

/// Records when each key was last seen (press or repeat).
#[derive(Debug)]
pub struct KeyTracker {
    last_seen: HashMap<Key, Instant>,
    hold_window: Duration,
}

impl Default for KeyTracker {
    fn default() -> Self {
        Self::new(HOLD_WINDOW)
    }
}

impl KeyTracker {
    pub fn new(hold_window: Duration) -> Self {
        Self {
            last_seen: HashMap::new(),
            hold_window,
        }
    }

    pub fn record(&mut self, key: Key, kind: KeyEventKind, now: Instant) {
        match kind {
            KeyEventKind::Press | KeyEventKind::Repeat => {
                self.last_seen.insert(key, now);
            }
            KeyEventKind::Release => {
                self.last_seen.remove(&key);
            }
        }
    }

    pub fn is_held(&self, key: Key, now: Instant) -> bool {
        self.last_seen
            .get(&key)
            .map(|&last| now.saturating_duration_since(last) <= self.hold_window)
            .unwrap_or(false)
    }

    pub fn pressed(&self, now: Instant) -> PressedKeys {
        let mut pressed = PressedKeys::default();
        for key in [Key::Up, Key::Down, Key::Left, Key::Right, Key::Fire] {
            pressed.set(key, self.is_held(key, now));
        }
        pressed
    }

    /// Fold one terminal key event into this frame's input.
    pub fn apply(&mut self, input: &mut FrameInput, event: &KeyEvent, now: Instant) {
        if event.kind == KeyEventKind::Press && is_quit(event) {
            input.quit = true;
            return;
        }
        let Some(key) = key_for(&event.code) else {
            return;
        };
        if key == Key::Fire && event.kind == KeyEventKind::Press {
            input.fire_presses += 1;
        }
        self.record(key, event.kind, now);
    }
}

// ── Sources ───────────────────────────────────────────────────────────────────

pub trait InputSource {
    /// Everything that happened since the last call.  Must not block.
    fn poll(&mut self) -> io::Result<FrameInput>;
}

/// Reads crossterm events without blocking.
#[derive(Debug, Default)]
pub struct TerminalInput {
    tracker: KeyTracker,
}

impl TerminalInput {
    pub fn new() -> Self {
        Self::default()
    }
}

impl InputSource for TerminalInput {
    fn poll(&mut self) -> io::Result<FrameInput> {
        let mut input = FrameInput::idle();
        while event::poll(Duration::ZERO)? {
            match event::read()? {
                Event::Key(key) => self.tracker.apply(&mut input, &key, Instant::now()),
                Event::Resize(cols, rows) => input.resized = Some((cols, rows)),
                _ => {}
            }
        }
        input.keys = self.tracker.pressed(Instant::now());
        Ok(input)
    }
}
