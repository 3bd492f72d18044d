/// Drawing surfaces.  All terminal output lives here.
///
/// The game draws onto a `Surface`.  `TerminalSurface` projects the pixel
/// field onto the terminal grid and paints each image's box with its glyph.
/// No game logic is performed here.
use std::io::Write;

use crossterm::{
    cursor,
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    style::{self, Color, Print},
    terminal, ExecutableCommand, QueueableCommand,
};

use crate::assets::{Image, Rgb, Shape};
use crate::scene::{DrawOp, Scene};

const C_HINT: Color = Color::DarkGrey;
const HINT: &str = "←↑↓→ / WASD : Move   SPACE : Shoot   Q : Quit";

pub trait Surface {
    /// Paint `image` with its top-left corner at pixel `(x, y)`.
    fn blit(&mut self, image: &Image, x: i32, y: i32) -> std::io::Result<()>;
    fn text(&mut self, text: &str, color: Rgb, x: i32, y: i32) -> std::io::Result<()>;
    /// Show everything drawn since the last present.
    fn present(&mut self) -> std::io::Result<()>;
    /// The output area changed size.
    fn resize(&mut self, _cols: u16, _rows: u16) {}
}

/// Replay a frame's draw list, in order.
pub fn render<S: Surface + ?Sized>(surface: &mut S, scene: &Scene) -> std::io::Result<()> {
    for op in &scene.ops {
        match op {
            DrawOp::Blit { image, x, y } => surface.blit(image, *x, *y)?,
            DrawOp::Text { text, color, x, y } => surface.text(text, *color, *x, *y)?,
        }
    }
    Ok(())
}

fn to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.0,
        g: rgb.1,
        b: rgb.2,
    }
}

// ── Field → cell projection ───────────────────────────────────────────────────

/// Maps field pixels onto a `cols`×`rows` terminal grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Projection {
    pub field_w: i32,
    pub field_h: i32,
    pub cols: u16,
    pub rows: u16,
}

impl Projection {
    pub fn new(field_w: i32, field_h: i32, cols: u16, rows: u16) -> Self {
        Self {
            field_w,
            field_h,
            cols,
            rows,
        }
    }

    /// Cells `[first, last)` covered by the pixel range `[start, start + len)`
    /// along one axis, clipped to the grid.  Any visible sliver of a box
    /// gets at least one cell.
    fn span(start: i32, len: i32, extent: i32, cells: u16) -> Option<(u16, u16)> {
        if len <= 0 || extent <= 0 || cells == 0 {
            return None;
        }
        let cells_i = cells as i64;
        let scale = |px: i32| (px as i64 * cells_i).div_euclid(extent as i64);
        let first = scale(start);
        let last = (scale(start + len - 1) + 1).max(first + 1);
        let (first, last) = (first.max(0), last.min(cells_i));
        (first < last).then_some((first as u16, last as u16))
    }

    pub fn columns(&self, x: i32, w: i32) -> Option<(u16, u16)> {
        Self::span(x, w, self.field_w, self.cols)
    }

    pub fn rows(&self, y: i32, h: i32) -> Option<(u16, u16)> {
        Self::span(y, h, self.field_h, self.rows)
    }

    /// The cell containing pixel `(x, y)`, if on screen.
    pub fn cell(&self, x: i32, y: i32) -> Option<(u16, u16)> {
        let (col, _) = self.columns(x, 1)?;
        let (row, _) = self.rows(y, 1)?;
        Some((col, row))
    }
}

/// Column range of one row of a disc spanning `cols` × `rows` cells.
/// `row` is relative to the disc's first row.
fn disc_row(cols: (u16, u16), rows: (u16, u16), row: u16) -> Option<(u16, u16)> {
    let width = (cols.1 - cols.0) as f32;
    let height = (rows.1 - rows.0) as f32;
    // vertical offset of this row's centre from the disc centre, in radii
    let v = ((row as f32 + 0.5) - height / 2.0) / (height / 2.0);
    if v.abs() > 1.0 {
        return None;
    }
    let half = (1.0 - v * v).sqrt() * width / 2.0;
    let centre = cols.0 as f32 + width / 2.0;
    let first = (centre - half).round() as u16;
    let last = ((centre + half).round() as u16).max(first + 1).min(cols.1);
    (first < last).then_some((first, last))
}

// ── Terminal backend ──────────────────────────────────────────────────────────

pub struct TerminalSurface<W: Write> {
    out: W,
    projection: Projection,
}

impl<W: Write> TerminalSurface<W> {
    pub fn new(out: W, field_w: i32, field_h: i32, (cols, rows): (u16, u16)) -> Self {
        Self {
            out,
            // last row is reserved for the controls hint
            projection: Projection::new(field_w, field_h, cols, rows.saturating_sub(1)),
        }
    }

    pub fn projection(&self) -> Projection {
        self.projection
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn covers_field(&self, image: &Image, x: i32, y: i32) -> bool {
        x <= 0
            && y <= 0
            && x + image.width >= self.projection.field_w
            && y + image.height >= self.projection.field_h
    }

    fn fill_row(&mut self, glyph: char, row: u16, (first, last): (u16, u16)) -> std::io::Result<()> {
        let run: String = std::iter::repeat(glyph)
            .take((last - first) as usize)
            .collect();
        self.out.queue(cursor::MoveTo(first, row))?;
        self.out.queue(Print(run))?;
        Ok(())
    }

    fn draw_controls_hint(&mut self) -> std::io::Result<()> {
        let row = self.projection.rows;
        let hint: String = HINT.chars().take(self.projection.cols as usize).collect();
        self.out.queue(style::ResetColor)?;
        self.out.queue(cursor::MoveTo(0, row))?;
        self.out.queue(terminal::Clear(terminal::ClearType::CurrentLine))?;
        self.out.queue(style::SetForegroundColor(C_HINT))?;
        self.out.queue(Print(hint))?;
        Ok(())
    }
}

impl<W: Write> Surface for TerminalSurface<W> {
    fn blit(&mut self, image: &Image, x: i32, y: i32) -> std::io::Result<()> {
        // a field-sized image is the backdrop: repaint everything in its colour
        if self.covers_field(image, x, y) && image.glyph == ' ' {
            self.out.queue(style::SetBackgroundColor(to_color(image.color)))?;
            self.out.queue(terminal::Clear(terminal::ClearType::All))?;
            return Ok(());
        }

        let (Some(cols), Some(rows)) = (
            self.projection.columns(x, image.width),
            self.projection.rows(y, image.height),
        ) else {
            return Ok(());
        };

        self.out.queue(style::SetForegroundColor(to_color(image.color)))?;
        for row in rows.0..rows.1 {
            let span = match image.shape {
                Shape::Box => Some(cols),
                Shape::Disc => disc_row(cols, rows, row - rows.0),
            };
            if let Some(span) = span {
                self.fill_row(image.glyph, row, span)?;
            }
        }
        Ok(())
    }

    fn text(&mut self, text: &str, color: Rgb, x: i32, y: i32) -> std::io::Result<()> {
        let Some((col, row)) = self.projection.cell(x.max(0), y.max(0)) else {
            return Ok(());
        };
        let room = (self.projection.cols - col) as usize;
        let clipped: String = text.chars().take(room).collect();
        self.out.queue(cursor::MoveTo(col, row))?;
        self.out.queue(style::SetForegroundColor(to_color(color)))?;
        self.out.queue(Print(clipped))?;
        Ok(())
    }

    fn present(&mut self) -> std::io::Result<()> {
        self.draw_controls_hint()?;
        self.out.queue(style::ResetColor)?;
        self.out.queue(cursor::MoveTo(0, self.projection.rows))?;
        self.out.flush()
    }

    fn resize(&mut self, cols: u16, rows: u16) {
        self.projection.cols = cols;
        self.projection.rows = rows.saturating_sub(1);
    }
}

// ── Screen setup / teardown ───────────────────────────────────────────────────

/// Switch `out` to the game screen, run `body`, and put the screen back.
///
/// The screen is restored on every path: when `body` fails and when the
/// setup itself fails part-way.  Raw mode is the caller's concern.
pub fn with_game_screen<W, T, F>(out: &mut W, title: &str, body: F) -> anyhow::Result<T>
where
    W: Write,
    F: FnOnce(&mut W) -> anyhow::Result<T>,
{
    if let Err(e) = enter_screen(out, title) {
        leave_screen(out, false);
        return Err(anyhow::Error::new(e).context("preparing the terminal"));
    }

    // Key release/repeat reporting; kitty-protocol terminals only, the
    // others fall back to the hold window.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    let result = body(out);
    leave_screen(out, keyboard_enhanced);
    result
}

fn enter_screen<W: Write>(out: &mut W, title: &str) -> std::io::Result<()> {
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;
    out.execute(terminal::SetTitle(title))?;
    Ok(())
}

/// Best effort: every step is attempted even if an earlier one failed.
fn leave_screen<W: Write>(out: &mut W, keyboard_enhanced: bool) {
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(style::ResetColor);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
}
