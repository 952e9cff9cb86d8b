/// Input mapping — held keys in, movement and fire intents out.
///
/// Terminals do not report a held-key state directly, so `KeyTracker`
/// rebuilds one from press / repeat / release events and hands the game a
/// plain `InputSnapshot` each frame.

use std::collections::HashMap;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::compute::{move_player_down, move_player_up, player_shoot};
use crate::entities::{GameState, Level};
use crate::flow::MenuKey;

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames.  Covers terminals that don't emit key-release events:
/// OS key-repeat runs at ≥ 15 Hz, so 8 frames (≈133 ms at 60 FPS) is always
/// refreshed before expiry.
pub const HOLD_WINDOW: u64 = 8;

/// Which logical actions are active this frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputSnapshot {
    pub up: bool,
    pub down: bool,
    pub fire: bool,
}

/// Everything the running loop polls once per frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameInput {
    pub quit: bool,
    pub keys: InputSnapshot,
}

// ── Fire-rate gate ───────────────────────────────────────────────────────────

/// Optional minimum spacing between shots while fire is held.
/// A cooldown of 0 lets a bullet out every frame.
#[derive(Clone, Debug)]
pub struct FireGate {
    cooldown_frames: u32,
    remaining: u32,
}

impl FireGate {
    pub fn new(cooldown_frames: u32) -> Self {
        FireGate {
            cooldown_frames,
            remaining: 0,
        }
    }

    /// Called once per frame with the fire key state; returns whether a
    /// bullet may be spawned this frame.
    pub fn allow(&mut self, fire: bool) -> bool {
        let ready = self.remaining == 0;
        self.remaining = self.remaining.saturating_sub(1);
        if fire && ready {
            self.remaining = self.cooldown_frames;
            true
        } else {
            false
        }
    }
}

// ── Mapping ──────────────────────────────────────────────────────────────────

/// Apply one frame of input to the state.  The vertical axes are applied
/// independently, so holding both directions is a no-op once clamping is
/// out of the picture.
pub fn apply_input(state: &GameState, keys: &InputSnapshot, gate: &mut FireGate) -> GameState {
    let mut next = state.clone();
    if keys.up {
        next = move_player_up(&next);
    }
    if keys.down {
        next = move_player_down(&next);
    }
    if gate.allow(keys.fire) {
        next = player_shoot(&next);
    }
    next
}

// ── Terminal key tracking ────────────────────────────────────────────────────

pub fn is_quit_key(key: &KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => true,
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

/// Menu keys: 1 / 2 / 3 pick a difficulty, Enter confirms.
pub fn menu_key(key: &KeyEvent) -> MenuKey {
    if is_quit_key(key) {
        return MenuKey::Quit;
    }
    match key.code {
        KeyCode::Char('1') => MenuKey::Select(Level::Easy),
        KeyCode::Char('2') => MenuKey::Select(Level::Medium),
        KeyCode::Char('3') => MenuKey::Select(Level::Hard),
        KeyCode::Enter => MenuKey::Confirm,
        _ => MenuKey::Other,
    }
}

/// Which terminal events the menu reacts to.  A resize maps to
/// `MenuKey::Other` so the menu is redrawn at the new size.
pub fn menu_event(event: &Event) -> Option<MenuKey> {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => Some(menu_key(key)),
        Event::Resize(_, _) => Some(MenuKey::Other),
        _ => None,
    }
}

/// Maps each held key to the frame it was last seen (press or repeat).
///
/// Works on two classes of terminal:
/// * **Keyboard-enhancement capable** (kitty protocol): proper
///   `Press` / `Repeat` / `Release` events, keys are removed on release.
/// * **Classic terminals**: only `Press` events.  Keys expire after
///   `HOLD_WINDOW` frames of silence.
#[derive(Debug, Default)]
pub struct KeyTracker {
    key_frame: HashMap<KeyCode, u64>,
    frame: u64,
}

impl KeyTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new frame; keys seen before now age by one.
    pub fn begin_frame(&mut self) {
        self.frame += 1;
    }

    /// Record one key event.  Returns `true` when it asks to quit.
    pub fn record(&mut self, key: &KeyEvent) -> bool {
        match key.kind {
            KeyEventKind::Press => {
                self.key_frame.insert(key.code, self.frame);
                is_quit_key(key)
            }
            KeyEventKind::Repeat => {
                self.key_frame.insert(key.code, self.frame);
                false
            }
            KeyEventKind::Release => {
                self.key_frame.remove(&key.code);
                false
            }
        }
    }

    fn is_held(&self, key: KeyCode) -> bool {
        self.key_frame
            .get(&key)
            .map(|&last| self.frame.saturating_sub(last) <= HOLD_WINDOW)
            .unwrap_or(false)
    }

    fn any_held(&self, keys: &[KeyCode]) -> bool {
        keys.iter().any(|&k| self.is_held(k))
    }

    pub fn snapshot(&self) -> InputSnapshot {
        InputSnapshot {
            up: self.any_held(&[KeyCode::Up, KeyCode::Char('w'), KeyCode::Char('W')]),
            down: self.any_held(&[KeyCode::Down, KeyCode::Char('s'), KeyCode::Char('S')]),
            fire: self.is_held(KeyCode::Char(' ')),
        }
    }
}
