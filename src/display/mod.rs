/// Rendering layer — all terminal output lives here.
///
/// The simulation works in logical playfield units; this module scales them
/// onto whatever terminal grid is available.  No game logic is performed.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal, QueueableCommand,
};

use crate::driver::{Sprite, Surface};
use crate::entities::Level;
use crate::error::GameError;

pub const TITLE: &str = "Dynamic Battleground";

// ── Colour palette ───────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD_SCORE: Color = Color::Rgb { r: 50, g: 168, b: 82 };
const C_TITLE: Color = Color::Cyan;
const C_PLAYER: Color = Color::White;
const C_ENEMY: Color = Color::Red;
const C_BULLET: Color = Color::Yellow;
const C_HINT: Color = Color::DarkGrey;
const C_MENU: Color = Color::White;
const C_SELECTED: Color = Color::Yellow;

const CONTROLS_HINT: &str = "↑ ↓ / W S : Move   SPACE : Shoot   Q : Quit";

// ── Sprites ──────────────────────────────────────────────────────────────────

fn glyph(sprite: Sprite) -> (&'static str, Color) {
    match sprite {
        Sprite::Player => ("=█>", C_PLAYER),
        Sprite::Enemy => ("<◉]", C_ENEMY),
        Sprite::Bullet => ("•", C_BULLET),
    }
}

/// Maps the logical playfield onto the terminal.
///
/// Layout:
///   row 0          HUD (score, title)
///   row 1          top border
///   rows 2..h-2    playfield
///   row h-2        bottom border
///   row h-1        controls hint
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Viewport {
    pub cols: u16,
    pub rows: u16,
    pub width: i32,
    pub height: i32,
}

impl Viewport {
    fn inner_cols(&self) -> i32 {
        (self.cols as i32 - 2).max(1)
    }

    fn inner_rows(&self) -> i32 {
        (self.rows as i32 - 4).max(1)
    }

    /// Terminal cell for a playfield point, or `None` when it is off-screen.
    pub fn to_cell(&self, x: i32, y: i32) -> Option<(u16, u16)> {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return None;
        }
        let col = 1 + x as i64 * self.inner_cols() as i64 / self.width as i64;
        let row = 2 + y as i64 * self.inner_rows() as i64 / self.height as i64;
        Some((col as u16, row as u16))
    }
}

pub struct TerminalSurface<W: Write> {
    out: W,
    viewport: Viewport,
}

impl<W: Write> TerminalSurface<W> {
    pub fn new(out: W, width: i32, height: i32) -> Result<Self, GameError> {
        let (cols, rows) = terminal::size()?;
        Ok(TerminalSurface {
            out,
            viewport: Viewport {
                cols,
                rows,
                width,
                height,
            },
        })
    }

    fn refresh_size(&mut self) -> Result<(), GameError> {
        let (cols, rows) = terminal::size()?;
        self.viewport.cols = cols;
        self.viewport.rows = rows;
        Ok(())
    }

    fn print_centered(&mut self, row: u16, text: &str, color: Color) -> Result<(), GameError> {
        let col = (self.viewport.cols / 2).saturating_sub(text.chars().count() as u16 / 2);
        self.out.queue(cursor::MoveTo(col, row))?;
        self.out.queue(style::SetForegroundColor(color))?;
        self.out.queue(Print(text))?;
        Ok(())
    }

    // ── Border ───────────────────────────────────────────────────────────────

    fn draw_border(&mut self) -> Result<(), GameError> {
        let w = self.viewport.cols as usize;
        let h = self.viewport.rows;

        self.out.queue(style::SetForegroundColor(C_BORDER))?;

        self.out.queue(cursor::MoveTo(0, 1))?;
        self.out
            .queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

        self.out.queue(cursor::MoveTo(0, h.saturating_sub(2)))?;
        self.out
            .queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

        for row in 2..h.saturating_sub(2) {
            self.out.queue(cursor::MoveTo(0, row))?;
            self.out.queue(Print("│"))?;
            self.out
                .queue(cursor::MoveTo(self.viewport.cols.saturating_sub(1), row))?;
            self.out.queue(Print("│"))?;
        }

        Ok(())
    }
}

impl<W: Write> Surface for TerminalSurface<W> {
    fn draw_background(&mut self) -> Result<(), GameError> {
        self.refresh_size()?;
        self.out.queue(terminal::Clear(terminal::ClearType::All))?;
        self.draw_border()?;

        let rx = self
            .viewport
            .cols
            .saturating_sub(TITLE.chars().count() as u16 + 1);
        self.out.queue(cursor::MoveTo(rx, 0))?;
        self.out.queue(style::SetForegroundColor(C_TITLE))?;
        self.out.queue(Print(TITLE))?;

        self.out
            .queue(cursor::MoveTo(1, self.viewport.rows.saturating_sub(1)))?;
        self.out.queue(style::SetForegroundColor(C_HINT))?;
        self.out.queue(Print(CONTROLS_HINT))?;
        Ok(())
    }

    fn draw_score(&mut self, score: u32) -> Result<(), GameError> {
        self.out.queue(cursor::MoveTo(1, 0))?;
        self.out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
        self.out.queue(Print(format!("Score: {}", score)))?;
        Ok(())
    }

    fn draw_sprite(&mut self, sprite: Sprite, x: i32, y: i32) -> Result<(), GameError> {
        let Some((col, row)) = self.viewport.to_cell(x, y) else {
            return Ok(());
        };
        let (text, color) = glyph(sprite);
        // Keep the right border intact.
        let room = self.viewport.cols.saturating_sub(1).saturating_sub(col) as usize;
        let visible: String = text.chars().take(room).collect();
        if visible.is_empty() {
            return Ok(());
        }
        self.out.queue(cursor::MoveTo(col, row))?;
        self.out.queue(style::SetForegroundColor(color))?;
        self.out.queue(Print(visible))?;
        Ok(())
    }

    fn draw_menu(&mut self, lines: &[&str], selected: Option<Level>) -> Result<(), GameError> {
        self.refresh_size()?;
        self.out.queue(terminal::Clear(terminal::ClearType::All))?;

        let highlight = selected.map(|level| match level {
            Level::Easy => "1.",
            Level::Medium => "2.",
            Level::Hard => "3.",
        });

        let total = lines.len() as u16 + 2;
        let start = (self.viewport.rows / 2).saturating_sub(total / 2);
        self.print_centered(start, TITLE, C_TITLE)?;

        let left = (self.viewport.cols / 2).saturating_sub(36);
        for (i, line) in lines.iter().enumerate() {
            let row = start + 2 + i as u16;
            let chosen = highlight.map_or(false, |tag| line.starts_with(tag));
            self.out.queue(cursor::MoveTo(left, row))?;
            if chosen {
                self.out.queue(style::SetForegroundColor(C_SELECTED))?;
                self.out.queue(Print(format!("> {}", line)))?;
            } else {
                self.out.queue(style::SetForegroundColor(C_MENU))?;
                self.out.queue(Print(format!("  {}", line)))?;
            }
        }
        Ok(())
    }

    fn draw_game_over(&mut self, score: u32) -> Result<(), GameError> {
        self.out.queue(terminal::Clear(terminal::ClearType::All))?;
        let mid = self.viewport.rows / 2;
        self.print_centered(mid.saturating_sub(2), "GAME OVER!", Color::Red)?;
        self.print_centered(mid, &format!("Final Score: {}", score), Color::White)?;
        Ok(())
    }

    fn present(&mut self) -> Result<(), GameError> {
        // Park cursor in a harmless spot and flush
        self.out.queue(style::ResetColor)?;
        self.out
            .queue(cursor::MoveTo(0, self.viewport.rows.saturating_sub(1)))?;
        self.out.flush()?;
        Ok(())
    }
}
