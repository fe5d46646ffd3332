/// Keyboard state for the game loop.
///
/// Terminals deliver key *events*, but the game wants to know which keys are
/// *held* on a given frame.  `KeyTracker` records the frame number of the
/// last press/repeat event for every key and reports a key as held while
/// that record is fresh.
///
/// Works on two classes of terminal:
/// * **Keyboard-enhancement capable** (kitty protocol): proper
///   `Press` / `Repeat` / `Release` events, so keys stay held until released.
/// * **Classic terminals**: only `Press` events (OS key-repeat shows up as
///   repeated presses).  Keys expire after `HOLD_WINDOW` frames of silence,
///   except a freshly pressed fire key, which waits out the repeat delay.

use std::collections::HashMap;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// A key counts as held if it was seen within this many frames.
/// 8 frames @ 60 FPS ≈ 133 ms, longer than the OS key-repeat interval.
pub const HOLD_WINDOW: u64 = 8;

/// Hold window for the fire key between its first press and the first
/// OS key-repeat.  36 frames @ 60 FPS = 600 ms, past the usual 250–500 ms
/// repeat delay, so holding Space on a classic terminal fires once.
pub const FIRST_REPEAT_WINDOW: u64 = 36;

const FIRE_KEY: KeyCode = KeyCode::Char(' ');

/// The held-control snapshot the game consumes each frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Controls {
    pub up: bool,
    pub down: bool,
    pub fire: bool,
    pub quit: bool,
}

#[derive(Clone, Copy, Debug)]
struct Hold {
    /// Frame of the last press/repeat.
    last: u64,
    /// An OS repeat (or a second press while held) has been seen.
    repeating: bool,
}

#[derive(Debug, Default)]
pub struct KeyTracker {
    holds: HashMap<KeyCode, Hold>,
    /// Terminal reports release events, so keys are held until released.
    release_events: bool,
    /// Window-close equivalent (Ctrl+C); sticky once seen.
    closed: bool,
}

impl KeyTracker {
    /// Tracker for classic terminals: held keys expire when they go quiet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Tracker for terminals that report key releases.
    pub fn with_release_events() -> Self {
        KeyTracker {
            release_events: true,
            ..Self::default()
        }
    }

    /// Feed one terminal event observed during `frame`.  Non-key events are
    /// ignored.
    pub fn record(&mut self, event: &Event, frame: u64) {
        let Event::Key(KeyEvent {
            code,
            kind,
            modifiers,
            ..
        }) = event
        else {
            return;
        };

        match kind {
            KeyEventKind::Press | KeyEventKind::Repeat => {
                if *code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
                    self.closed = true;
                    return;
                }
                let repeating = *kind == KeyEventKind::Repeat || self.is_held(code, frame);
                self.holds.insert(*code, Hold { last: frame, repeating });
            }
            KeyEventKind::Release => {
                self.holds.remove(code);
            }
        }
    }

    /// Device-level close signal, independent of the quit control.
    pub fn close_requested(&self) -> bool {
        self.closed
    }

    fn is_held(&self, key: &KeyCode, frame: u64) -> bool {
        let Some(hold) = self.holds.get(key) else {
            return false;
        };
        if self.release_events {
            return true;
        }
        let window = if *key == FIRE_KEY && !hold.repeating {
            FIRST_REPEAT_WINDOW
        } else {
            HOLD_WINDOW
        };
        frame.saturating_sub(hold.last) <= window
    }

    fn any_held(&self, keys: &[KeyCode], frame: u64) -> bool {
        keys.iter().any(|k| self.is_held(k, frame))
    }

    /// Which controls are held on `frame`.
    pub fn snapshot(&self, frame: u64) -> Controls {
        Controls {
            up: self.any_held(&[KeyCode::Up, KeyCode::Char('w'), KeyCode::Char('W')], frame),
            down: self.any_held(&[KeyCode::Down, KeyCode::Char('s'), KeyCode::Char('S')], frame),
            fire: self.is_held(&FIRE_KEY, frame),
            quit: self.any_held(&[KeyCode::Esc, KeyCode::Char('q'), KeyCode::Char('Q')], frame),
        }
    }
}
