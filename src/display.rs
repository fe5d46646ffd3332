/// Rendering layer — all terminal output lives here.
///
/// Each function receives a mutable writer and an immutable view of the
/// session.  No game logic is performed; this module only translates
/// logical field coordinates into terminal cells and queues crossterm
/// commands.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal, QueueableCommand,
};

use crate::entities::{Field, GameSession, GameStatus, Rect, SpriteKind};
use crate::error::GameError;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BACKGROUND: Color = Color::White;
const C_TEXT: Color = Color::Black;
const C_PLAYER: Color = Color::Blue;
const C_TARGET: Color = Color::Red;
const C_PROJECTILE: Color = Color::DarkGrey;

const WIN_MESSAGE: &str = "You win!";

// ── Viewport ──────────────────────────────────────────────────────────────────

/// Terminal area the field is scaled onto.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Viewport {
    pub cols: u16,
    pub rows: u16,
}

impl Viewport {
    pub const MIN_COLS: u16 = 40;
    pub const MIN_ROWS: u16 = 15;

    pub fn new(cols: u16, rows: u16) -> Result<Self, GameError> {
        if cols < Self::MIN_COLS || rows < Self::MIN_ROWS {
            return Err(GameError::TerminalTooSmall {
                cols,
                rows,
                min_cols: Self::MIN_COLS,
                min_rows: Self::MIN_ROWS,
            });
        }
        Ok(Viewport { cols, rows })
    }

    /// Map a logical rectangle to `(col, row, width, height)` in cells.
    /// Every sprite covers at least one cell and never spills off screen.
    pub fn cells(&self, rect: &Rect, field: &Field) -> (u16, u16, u16, u16) {
        let scale = |v: i32, extent: i32, cells: u16| -> i64 {
            (v as i64 * cells as i64 / extent.max(1) as i64).clamp(0, cells as i64)
        };

        let x0 = scale(rect.x, field.width, self.cols).min(self.cols as i64 - 1);
        let y0 = scale(rect.y, field.height, self.rows).min(self.rows as i64 - 1);
        let x1 = scale(rect.x + rect.w, field.width, self.cols).max(x0 + 1);
        let y1 = scale(rect.y + rect.h, field.height, self.rows).max(y0 + 1);

        (x0 as u16, y0 as u16, (x1 - x0) as u16, (y1 - y0) as u16)
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, state: &GameSession, view: &Viewport) -> std::io::Result<()> {
    clear(out, view)?;

    match state.status {
        GameStatus::Playing => {
            for (kind, rect) in state.sprites() {
                draw_sprite(out, kind, &rect, &state.field, view)?;
            }
            draw_hud(out, state)?;
        }
        GameStatus::Won => draw_win(out, view)?,
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, view.rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Background ────────────────────────────────────────────────────────────────

fn clear<W: Write>(out: &mut W, view: &Viewport) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    out.queue(style::SetBackgroundColor(C_BACKGROUND))?;
    let blank = " ".repeat(view.cols as usize);
    for row in 0..view.rows {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print(&blank))?;
    }
    Ok(())
}

// ── Sprites ───────────────────────────────────────────────────────────────────

fn draw_sprite<W: Write>(
    out: &mut W,
    kind: SpriteKind,
    rect: &Rect,
    field: &Field,
    view: &Viewport,
) -> std::io::Result<()> {
    let (color, glyph) = match kind {
        SpriteKind::Player => (C_PLAYER, '█'),
        SpriteKind::Target => (C_TARGET, '●'),
        SpriteKind::Projectile => (C_PROJECTILE, '═'),
    };
    let (col, row, w, h) = view.cells(rect, field);
    let line: String = std::iter::repeat(glyph).take(w as usize).collect();

    out.queue(style::SetForegroundColor(color))?;
    for dy in 0..h {
        out.queue(cursor::MoveTo(col, row + dy))?;
        out.queue(Print(&line))?;
    }
    Ok(())
}

// ── HUD (top-left) ────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, state: &GameSession) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(0, 0))?;
    out.queue(style::SetForegroundColor(C_TEXT))?;
    out.queue(Print(format!("Missed shots: {}", state.player.missed_shots)))?;
    Ok(())
}

// ── Win screen ────────────────────────────────────────────────────────────────

fn draw_win<W: Write>(out: &mut W, view: &Viewport) -> std::io::Result<()> {
    let col = (view.cols / 2).saturating_sub(WIN_MESSAGE.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, view.rows / 2))?;
    out.queue(style::SetForegroundColor(C_TEXT))?;
    out.queue(Print(WIN_MESSAGE))?;
    Ok(())
}
