//! Rendering layer — the presentation sink and the one function that feeds it.
//!
//! `render` receives a canvas and an immutable view of the game state.  No
//! game logic is performed; this module only translates state into draw
//! commands.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal, QueueableCommand,
};

use crate::entities::GameState;
use crate::geometry::Rect;

// ── Colour palette ────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl From<Rgb> for Color {
    fn from(c: Rgb) -> Self {
        Color::Rgb { r: c.r, g: c.g, b: c.b }
    }
}

pub const C_BACKGROUND: Rgb = Rgb::new(0, 0, 0);
pub const C_PLAYER: Rgb = Rgb::new(255, 0, 0);
pub const C_ENEMY: Rgb = Rgb::new(0, 0, 255);
pub const C_COLLECTABLE: Rgb = Rgb::new(255, 255, 0);

// ── Sink ──────────────────────────────────────────────────────────────────────

/// Anything that can paint solid rectangles and show a finished frame.
pub trait Canvas {
    fn clear(&mut self, color: Rgb) -> std::io::Result<()>;
    fn fill_rect(&mut self, rect: &Rect, color: Rgb) -> std::io::Result<()>;
    fn present(&mut self) -> std::io::Result<()>;

    /// The output grid changed size.  Sinks without a grid ignore it.
    fn resize(&mut self, _cols: u16, _rows: u16) {}
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame: background, player, enemy, then collectables.
pub fn render<C: Canvas + ?Sized>(canvas: &mut C, state: &GameState) -> std::io::Result<()> {
    canvas.clear(C_BACKGROUND)?;
    canvas.fill_rect(&state.player.bounds(), C_PLAYER)?;
    canvas.fill_rect(&state.enemy.bounds(), C_ENEMY)?;
    for item in &state.collectables {
        canvas.fill_rect(&item.bounds(), C_COLLECTABLE)?;
    }
    canvas.present()
}

// ── Recording canvas ──────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DrawCommand {
    Clear(Rgb),
    Fill(Rect, Rgb),
    Present,
    Resize(u16, u16),
}

/// Canvas that only remembers what it was asked to draw.
#[derive(Clone, Debug, Default)]
pub struct RecordingCanvas {
    pub commands: Vec<DrawCommand>,
}

impl RecordingCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of frames presented so far.
    pub fn frames(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| **c == DrawCommand::Present)
            .count()
    }

    /// Commands issued since the most recent `Clear`.
    pub fn last_frame(&self) -> &[DrawCommand] {
        let start = self
            .commands
            .iter()
            .rposition(|c| matches!(c, DrawCommand::Clear(_)))
            .unwrap_or(0);
        &self.commands[start..]
    }
}

impl Canvas for RecordingCanvas {
    fn clear(&mut self, color: Rgb) -> std::io::Result<()> {
        self.commands.push(DrawCommand::Clear(color));
        Ok(())
    }

    fn fill_rect(&mut self, rect: &Rect, color: Rgb) -> std::io::Result<()> {
        self.commands.push(DrawCommand::Fill(*rect, color));
        Ok(())
    }

    fn present(&mut self) -> std::io::Result<()> {
        self.commands.push(DrawCommand::Present);
        Ok(())
    }

    fn resize(&mut self, cols: u16, rows: u16) {
        self.commands.push(DrawCommand::Resize(cols, rows));
    }
}

// ── Terminal canvas ───────────────────────────────────────────────────────────

/// Paints the playfield onto a terminal cell grid.
///
/// The `width × height` playfield is scaled to `cols × rows` cells and every
/// rectangle becomes a block of background-coloured spaces.  Anything outside
/// the playfield is clipped.
pub struct TerminalCanvas<W: Write> {
    out: W,
    cols: u16,
    rows: u16,
    width: i32,
    height: i32,
}

impl<W: Write> TerminalCanvas<W> {
    pub fn new(out: W, cols: u16, rows: u16, width: i32, height: i32) -> Self {
        Self {
            out,
            cols,
            rows,
            width,
            height,
        }
    }

    /// Cells covered by `rect` as `(col, row, cols_wide, rows_high)`, or
    /// `None` if it is entirely off the playfield.
    pub fn cell_span(&self, rect: &Rect) -> Option<(u16, u16, u16, u16)> {
        let x0 = rect.x.max(0);
        let y0 = rect.y.max(0);
        let x1 = rect.right().min(self.width);
        let y1 = rect.bottom().min(self.height);
        if x0 >= x1 || y0 >= y1 || self.cols == 0 || self.rows == 0 {
            return None;
        }

        let (cols, rows) = (i64::from(self.cols), i64::from(self.rows));
        let (w, h) = (i64::from(self.width), i64::from(self.height));

        let c0 = i64::from(x0) * cols / w;
        let r0 = i64::from(y0) * rows / h;
        // Round the far edge up so thin boxes still cover one cell.
        let c1 = ((i64::from(x1) * cols + w - 1) / w).clamp(c0 + 1, cols);
        let r1 = ((i64::from(y1) * rows + h - 1) / h).clamp(r0 + 1, rows);

        Some((c0 as u16, r0 as u16, (c1 - c0) as u16, (r1 - r0) as u16))
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Canvas for TerminalCanvas<W> {
    fn clear(&mut self, color: Rgb) -> std::io::Result<()> {
        self.out.queue(style::SetBackgroundColor(color.into()))?;
        self.out.queue(terminal::Clear(terminal::ClearType::All))?;
        Ok(())
    }

    fn fill_rect(&mut self, rect: &Rect, color: Rgb) -> std::io::Result<()> {
        let Some((col, row, wide, high)) = self.cell_span(rect) else {
            return Ok(());
        };
        let strip = " ".repeat(wide as usize);
        self.out.queue(style::SetBackgroundColor(color.into()))?;
        for r in row..row + high {
            self.out.queue(cursor::MoveTo(col, r))?;
            self.out.queue(Print(&strip))?;
        }
        Ok(())
    }

    fn present(&mut self) -> std::io::Result<()> {
        // Park cursor in a harmless spot and flush
        self.out.queue(style::ResetColor)?;
        self.out.queue(cursor::MoveTo(0, self.rows.saturating_sub(1)))?;
        self.out.flush()
    }

    fn resize(&mut self, cols: u16, rows: u16) {
        log::debug!("canvas resized to {}x{} cells", cols, rows);
        self.cols = cols;
        self.rows = rows;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canvas() -> TerminalCanvas<Vec<u8>> {
        // 8 px per column, 16 px per row.
        TerminalCanvas::new(Vec::new(), 160, 45, 1280, 720)
    }

    #[test]
    fn player_box_maps_to_cells() {
        let c = canvas();
        let span = c.cell_span(&Rect::new(615, 335, 50, 50)).unwrap();
        assert_eq!(span, (76, 20, 8, 5));
    }

    #[test]
    fn tiny_box_still_covers_a_cell() {
        let c = canvas();
        let span = c.cell_span(&Rect::new(0, 0, 1, 1)).unwrap();
        assert_eq!(span, (0, 0, 1, 1));
    }

    #[test]
    fn offscreen_box_is_clipped() {
        let c = canvas();
        assert!(c.cell_span(&Rect::new(-60, 100, 50, 50)).is_none());
        assert!(c.cell_span(&Rect::new(1280, 100, 50, 50)).is_none());
        let partial = c.cell_span(&Rect::new(1260, 700, 50, 50)).unwrap();
        assert_eq!(partial, (157, 43, 3, 2));
    }

    #[test]
    fn resize_rescales_cells() {
        let mut c = canvas();
        c.resize(80, 45);
        let span = c.cell_span(&Rect::new(615, 335, 50, 50)).unwrap();
        assert_eq!(span, (38, 20, 4, 5));
        c.resize(0, 0);
        assert!(c.cell_span(&Rect::new(615, 335, 50, 50)).is_none());
    }

    #[test]
    fn fill_writes_to_writer() {
        let mut c = canvas();
        c.fill_rect(&Rect::new(0, 0, 16, 16), C_PLAYER).unwrap();
        c.present().unwrap();
        let bytes = c.into_inner();
        assert!(!bytes.is_empty());
    }

    #[test]
    fn render_draws_in_order() {
        let state = GameState::default();
        let mut rec = RecordingCanvas::new();
        render(&mut rec, &state).unwrap();
        assert_eq!(rec.commands.first(), Some(&DrawCommand::Clear(C_BACKGROUND)));
        assert_eq!(
            rec.commands[1],
            DrawCommand::Fill(state.player.bounds(), C_PLAYER)
        );
        assert_eq!(rec.commands[2], DrawCommand::Fill(state.enemy.bounds(), C_ENEMY));
        assert_eq!(rec.commands.len(), 3 + state.collectables.len() + 1);
        assert_eq!(rec.commands.last(), Some(&DrawCommand::Present));
    }
}
