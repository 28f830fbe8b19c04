//! Terminal rendering.  All crossterm output lives here.
//!
//! The game renders into a logical 480×960 pixel playfield.  `TerminalSurface`
//! scales every draw call down to character cells in an off-screen buffer,
//! then `present` writes the buffer, the HUD and any overlay in one flush.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal, QueueableCommand,
};
use tracing::trace;

use spaceships::entities::{Rect, SoundId, TextureId};
use spaceships::game::{GameSession, GameStatus};
use spaceships::surface::{Rgba, Surface};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_HEALTH: Color = Color::Red;
const C_HINT: Color = Color::DarkGrey;
const C_PLAYER: Color = Color::White;
const C_ENEMY: Color = Color::Green;
const C_LASER: Color = Color::Cyan;
const C_EXPLOSION: Color = Color::Yellow;

// ── Asset cache ───────────────────────────────────────────────────────────────

/// How a texture looks in the terminal.
#[derive(Clone, Copy, Debug)]
pub struct Sprite {
    pub glyph: char,
    /// Glyph used when the texture is drawn upside down.
    pub flipped: char,
    pub color: Color,
}

/// Resolves logical asset ids to terminal sprites and plays sounds.
/// Built once at startup and shared by reference for the whole session.
pub struct AssetCache {
    ship: Sprite,
    enemy: Sprite,
    laser: Sprite,
    explosion: Sprite,
    muted: bool,
    bell: bool,
}

impl AssetCache {
    pub fn load(muted: bool) -> Self {
        AssetCache {
            ship: Sprite { glyph: '▲', flipped: '▼', color: C_PLAYER },
            enemy: Sprite { glyph: '▲', flipped: '▼', color: C_ENEMY },
            laser: Sprite { glyph: '│', flipped: '│', color: C_LASER },
            explosion: Sprite { glyph: '*', flipped: '*', color: C_EXPLOSION },
            muted,
            bell: false,
        }
    }

    /// Enemies share the ship texture but face down; colour them apart.
    pub fn texture(&self, id: TextureId, rotation: f64) -> Sprite {
        match id {
            TextureId::Spaceship if is_upside_down(rotation) => self.enemy,
            TextureId::Spaceship => self.ship,
            TextureId::Laser => self.laser,
            TextureId::Explosion => self.explosion,
        }
    }

    /// The terminal only has a bell, so only the loud sounds ring it.
    pub fn play_sound(&mut self, id: SoundId) {
        trace!(?id, "play sound");
        if self.muted {
            return;
        }
        if matches!(id, SoundId::Explosion | SoundId::GameOver) {
            self.bell = true;
        }
    }

    /// Write a pending bell, if any sound asked for one since the last call.
    pub fn ring<W: Write>(&mut self, out: &mut W) -> std::io::Result<()> {
        if std::mem::take(&mut self.bell) {
            out.queue(Print('\x07'))?;
            out.flush()?;
        }
        Ok(())
    }
}

fn is_upside_down(rotation: f64) -> bool {
    let r = rotation.rem_euclid(360.0);
    r > 90.0 && r < 270.0
}

fn to_color(c: Rgba) -> Color {
    Color::Rgb { r: c.r, g: c.g, b: c.b }
}

// ── Cell buffer surface ───────────────────────────────────────────────────────

#[derive(Clone, Copy, PartialEq)]
struct Cell {
    ch: char,
    color: Color,
}

const BLANK: Cell = Cell { ch: ' ', color: Color::Reset };

/// First terminal row of the playfield; row 0 is the HUD.
const FIELD_TOP: u16 = 1;

pub struct TerminalSurface<'a> {
    assets: &'a AssetCache,
    cells: Vec<Cell>,
    cols: u16,
    rows: u16,
    logical_w: i32,
    logical_h: i32,
}

impl<'a> TerminalSurface<'a> {
    /// `cols`×`rows` is the whole terminal; the playfield gets every row
    /// except the HUD line and the hint line.
    pub fn new(assets: &'a AssetCache, cols: u16, rows: u16, logical_w: i32, logical_h: i32) -> Self {
        let cols = cols.max(1);
        let field_rows = rows.saturating_sub(2).max(1);
        TerminalSurface {
            assets,
            cells: vec![BLANK; cols as usize * field_rows as usize],
            cols,
            rows: field_rows,
            logical_w: logical_w.max(1),
            logical_h: logical_h.max(1),
        }
    }

    fn to_col(&self, x: i32) -> i32 {
        (i64::from(x) * i64::from(self.cols) / i64::from(self.logical_w)) as i32
    }

    fn to_row(&self, y: i32) -> i32 {
        (i64::from(y) * i64::from(self.rows) / i64::from(self.logical_h)) as i32
    }

    fn put(&mut self, col: i32, row: i32, cell: Cell) {
        if col < 0 || row < 0 || col >= i32::from(self.cols) || row >= i32::from(self.rows) {
            return;
        }
        self.cells[row as usize * self.cols as usize + col as usize] = cell;
    }

    /// Cell-space bounds of a logical rectangle; always at least one cell.
    fn cell_bounds(&self, rect: Rect) -> (i32, i32, i32, i32) {
        let left = self.to_col(rect.x);
        let top = self.to_row(rect.y);
        let right = self.to_col(rect.right() - 1).max(left);
        let bottom = self.to_row(rect.bottom() - 1).max(top);
        (left, top, right, bottom)
    }

    fn fill_cells(&mut self, rect: Rect, cell: Cell) {
        let (left, top, right, bottom) = self.cell_bounds(rect);
        for row in top..=bottom {
            for col in left..=right {
                self.put(col, row, cell);
            }
        }
    }

    /// Write the frame to `out`.
    pub fn present<W: Write>(&self, out: &mut W, session: &GameSession) -> std::io::Result<()> {
        out.queue(terminal::Clear(terminal::ClearType::All))?;

        for row in 0..self.rows {
            out.queue(cursor::MoveTo(0, FIELD_TOP + row))?;
            let start = row as usize * self.cols as usize;
            let mut current = Color::Reset;
            for cell in &self.cells[start..start + self.cols as usize] {
                if cell.color != current {
                    out.queue(style::SetForegroundColor(cell.color))?;
                    current = cell.color;
                }
                out.queue(Print(cell.ch))?;
            }
        }

        draw_hud(out, session, self.cols)?;
        draw_controls_hint(out, FIELD_TOP + self.rows)?;
        if session.status == GameStatus::GameOver {
            draw_game_over(out, session, self.cols, self.rows)?;
        }
        out.queue(style::ResetColor)?;
        out.queue(cursor::MoveTo(0, FIELD_TOP + self.rows))?;
        out.flush()
    }
}

impl Surface for TerminalSurface<'_> {
    fn draw_rect(&mut self, rect: Rect, color: Rgba) {
        let (left, top, right, bottom) = self.cell_bounds(rect);
        let cell = Cell { ch: '·', color: to_color(color) };
        for col in left..=right {
            self.put(col, top, cell);
            self.put(col, bottom, cell);
        }
        for row in top..=bottom {
            self.put(left, row, cell);
            self.put(right, row, cell);
        }
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgba) {
        self.fill_cells(rect, Cell { ch: '▬', color: to_color(color) });
    }

    fn draw_textured_rect(&mut self, texture: TextureId, _src: Option<Rect>, dst: Rect, rotation: f64) {
        let sprite = self.assets.texture(texture, rotation);
        let ch = if is_upside_down(rotation) { sprite.flipped } else { sprite.glyph };
        self.fill_cells(dst, Cell { ch, color: sprite.color });
    }

    fn draw_line(&mut self, from: (i32, i32), to: (i32, i32), color: Rgba) {
        let (c0, r0) = (self.to_col(from.0), self.to_row(from.1));
        let (c1, r1) = (self.to_col(to.0), self.to_row(to.1));
        let steps = (c1 - c0).abs().max((r1 - r0).abs()).max(1);
        let cell = Cell { ch: '.', color: to_color(color) };
        for i in 0..=steps {
            let col = c0 + (c1 - c0) * i / steps;
            let row = r0 + (r1 - r0) * i / steps;
            self.put(col, row, cell);
        }
    }
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, session: &GameSession, cols: u16) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!("Score:{:>6}", session.score)))?;

    let player = session.roster.player();
    let health = format!("HP:{:>4}/{}", player.health, player.max_health);
    let col = cols.saturating_sub(health.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(col, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_HEALTH))?;
    out.queue(Print(&health))?;
    Ok(())
}

fn draw_controls_hint<W: Write>(out: &mut W, row: u16) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, row))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("← ↑ ↓ → / WASD : Move   SPACE : Shoot   Q : Quit"))?;
    Ok(())
}

// ── Game-over overlay ─────────────────────────────────────────────────────────

fn draw_game_over<W: Write>(
    out: &mut W,
    session: &GameSession,
    cols: u16,
    rows: u16,
) -> std::io::Result<()> {
    let score_line = format!("Score: {}", session.score);
    let lines: [(&str, Color); 5] = [
        ("╔════════════════════╗", Color::Red),
        ("║     GAME  OVER     ║", Color::Red),
        ("╚════════════════════╝", Color::Red),
        (&score_line, Color::Yellow),
        ("(Q)uit or (R)estart", Color::White),
    ];

    let cx = cols / 2;
    let start_row = FIELD_TOP + (rows / 3).saturating_sub(lines.len() as u16 / 2);
    for (i, (msg, color)) in lines.iter().enumerate() {
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, start_row + i as u16))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(*msg))?;
    }
    Ok(())
}
