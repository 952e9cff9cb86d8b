/// Top-level state machine: MenuSelect → Running → GameOver.
///
/// The menu and the running game are two polling contexts of the same
/// machine: the menu consumes discrete key presses, the running game
/// consumes one `FrameInput` per tick.

use rand::Rng;

use crate::compute::{init_state, tick};
use crate::entities::{GameState, GameStatus, Level};
use crate::input::{apply_input, FireGate, FrameInput};

/// Rules and controls shown on the menu screen.
pub const MENU_LINES: &[&str] = &[
    "WELCOME TO THE BATTLEFIELD!",
    "Rules and Controls:",
    "- Use UP and DOWN arrows to move the player.",
    "- Press SPACE to shoot bullets.",
    "- Kill enemies by shooting them. Enemies respawn after being killed.",
    "- Avoid touching enemies, or you'll lose the game.",
    "",
    "Select Difficulty:",
    "1. Easy (Enemies move slowly)",
    "2. Medium (Normal enemy speed)",
    "3. Hard (Enemies move fast)",
    "",
    "Press ENTER to start.",
];

/// A discrete key press while the menu is up.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuKey {
    Select(Level),
    Confirm,
    Quit,
    Other,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Menu {
    pub selected: Option<Level>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum MenuOutcome {
    Pending,
    Start(Level),
    Quit,
}

impl Menu {
    pub fn new() -> Self {
        Self::default()
    }

    /// Selecting replaces any earlier choice; confirming needs a choice.
    pub fn handle(&mut self, key: MenuKey) -> MenuOutcome {
        match key {
            MenuKey::Select(level) => {
                self.selected = Some(level);
                MenuOutcome::Pending
            }
            MenuKey::Confirm => match self.selected {
                Some(level) => MenuOutcome::Start(level),
                None => MenuOutcome::Pending,
            },
            MenuKey::Quit => MenuOutcome::Quit,
            MenuKey::Other => MenuOutcome::Pending,
        }
    }
}

#[derive(Clone, Debug)]
pub enum Phase {
    MenuSelect(Menu),
    Running(GameState),
    /// Terminal.  Carries the final state for the score screen.
    GameOver(GameState),
    /// The player asked to leave.  Terminal.
    Quit,
}

impl Phase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Phase::GameOver(_) | Phase::Quit)
    }

    /// Menu context.  Any key outside the menu leaves the phase untouched.
    pub fn on_menu_key(
        self,
        key: MenuKey,
        width: i32,
        height: i32,
        player_speed: i32,
        rng: &mut impl Rng,
    ) -> Phase {
        match self {
            Phase::MenuSelect(mut menu) => match menu.handle(key) {
                MenuOutcome::Pending => Phase::MenuSelect(menu),
                MenuOutcome::Quit => Phase::Quit,
                MenuOutcome::Start(level) => {
                    let mut state = init_state(level, width, height, rng);
                    state.player.speed = player_speed;
                    Phase::Running(state)
                }
            },
            other => other,
        }
    }

    /// Simulation half of a running tick: movement then collisions.
    pub fn advance(self, rng: &mut impl Rng) -> Phase {
        match self {
            Phase::Running(state) => {
                let next = tick(&state, rng);
                if next.status == GameStatus::GameOver {
                    Phase::GameOver(next)
                } else {
                    Phase::Running(next)
                }
            }
            other => other,
        }
    }

    /// Input half of a running tick, polled after the frame is presented.
    pub fn on_frame_input(self, input: &FrameInput, gate: &mut FireGate) -> Phase {
        match self {
            Phase::Running(_) if input.quit => Phase::Quit,
            Phase::Running(state) => Phase::Running(apply_input(&state, &input.keys, gate)),
            other => other,
        }
    }
}
