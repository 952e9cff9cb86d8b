/// Game loop driver.
///
/// The loop only talks to the outside world through three small traits, so
/// the same code runs against the terminal in `main` and against fakes in
/// tests.

use std::time::Duration;

use log::info;
use rand::Rng;

use crate::config::GameConfig;
use crate::entities::{GameState, Level};
use crate::error::GameError;
use crate::flow::{Menu, MenuKey, Phase, MENU_LINES};
use crate::input::{FireGate, FrameInput};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sprite {
    Player,
    Enemy,
    Bullet,
}

/// Where frames are drawn.  Coordinates are playfield units, top-left origin.
pub trait Surface {
    fn draw_background(&mut self) -> Result<(), GameError>;
    fn draw_score(&mut self, score: u32) -> Result<(), GameError>;
    fn draw_sprite(&mut self, sprite: Sprite, x: i32, y: i32) -> Result<(), GameError>;
    fn draw_menu(&mut self, lines: &[&str], selected: Option<Level>) -> Result<(), GameError>;
    fn draw_game_over(&mut self, score: u32) -> Result<(), GameError>;
    /// Marks the frame complete.
    fn present(&mut self) -> Result<(), GameError>;
}

pub trait InputSource {
    /// Blocks until the next key press relevant to the menu.
    fn next_menu_key(&mut self) -> Result<MenuKey, GameError>;
    /// Non-blocking: drain pending events and report this frame's state.
    fn poll_frame(&mut self) -> Result<FrameInput, GameError>;
}

pub trait Clock {
    /// Sleeps off whatever is left of the current frame.
    fn tick(&mut self);
    fn delay(&mut self, duration: Duration);
}

/// How a run ended.  Both are normal exits.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Quit,
    GameOver { score: u32 },
}

/// Draw one scene: background, score, player, enemies, bullets.
pub fn render_scene<S: Surface>(surface: &mut S, state: &GameState) -> Result<(), GameError> {
    surface.draw_background()?;
    surface.draw_score(state.score)?;
    surface.draw_sprite(Sprite::Player, state.player.x, state.player.y)?;
    for enemy in &state.enemies {
        surface.draw_sprite(Sprite::Enemy, enemy.x, enemy.y)?;
    }
    for bullet in &state.bullets {
        surface.draw_sprite(Sprite::Bullet, bullet.x, bullet.y)?;
    }
    Ok(())
}

/// Run the whole game, menu first, until the player quits or loses.
pub fn run<S, I, C, R>(
    surface: &mut S,
    input: &mut I,
    clock: &mut C,
    rng: &mut R,
    config: &GameConfig,
) -> Result<Outcome, GameError>
where
    S: Surface,
    I: InputSource,
    C: Clock,
    R: Rng,
{
    let mut phase = Phase::MenuSelect(Menu::new());
    let mut gate = FireGate::new(config.fire_cooldown_frames);

    loop {
        match phase {
            Phase::MenuSelect(menu) => {
                surface.draw_menu(MENU_LINES, menu.selected)?;
                surface.present()?;
                let key = input.next_menu_key()?;
                phase = Phase::MenuSelect(menu).on_menu_key(
                    key,
                    config.width,
                    config.height,
                    config.player_speed,
                    rng,
                );
                if let Phase::Running(state) = &phase {
                    info!("starting on {} difficulty", state.level.label());
                }
            }
            Phase::Running(state) => {
                render_scene(surface, &state)?;
                phase = Phase::Running(state).advance(rng);
                if phase.is_terminal() {
                    continue;
                }
                surface.present()?;
                clock.tick();
                let frame = input.poll_frame()?;
                phase = phase.on_frame_input(&frame, &mut gate);
            }
            Phase::GameOver(state) => {
                info!("game over on frame {}, final score {}", state.frame, state.score);
                surface.draw_game_over(state.score)?;
                surface.present()?;
                clock.delay(config.game_over_delay());
                return Ok(Outcome::GameOver { score: state.score });
            }
            Phase::Quit => {
                info!("player quit");
                return Ok(Outcome::Quit);
            }
        }
    }
}
