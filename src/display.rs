//! Rendering layer — all terminal output lives here.
//!
//! The 1000×1000 play area is squeezed onto the terminal grid. Every cell
//! shows two vertical pixels with an upper-half block (`▀`): foreground is
//! the top pixel, background the bottom one. Text is kept on its own layer
//! and wins over pixels. Only cells that changed since the last frame are
//! written.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Attribute, Color, Print},
    terminal, QueueableCommand,
};
use space_shooter::assets::{Rgb, Sprite};
use space_shooter::config::{HEIGHT, WIDTH};
use space_shooter::platform::{Rect, Renderer, TextStyle};

const HALF_BLOCK: char = '▀';

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Glyph {
    ch: char,
    colour: Rgb,
    bold: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Cell {
    ch: char,
    fg: Rgb,
    bg: Rgb,
    bold: bool,
}

pub struct TerminalRenderer<W: Write> {
    out: W,
    cols: u16,
    rows: u16,
    /// `cols × rows * 2` sub-pixels, row-major.
    pixels: Vec<Rgb>,
    text: Vec<Option<Glyph>>,
    previous: Vec<Option<Cell>>,
    /// Follow the real terminal's size between frames.
    track_resize: bool,
}

impl<W: Write> TerminalRenderer<W> {
    /// Renderer sized to the current terminal.
    pub fn new(out: W) -> std::io::Result<Self> {
        let (cols, rows) = terminal::size()?;
        let mut r = Self::with_size(out, cols, rows);
        r.track_resize = true;
        Ok(r)
    }

    pub fn with_size(out: W, cols: u16, rows: u16) -> Self {
        let mut r = Self {
            out,
            cols: 0,
            rows: 0,
            pixels: Vec::new(),
            text: Vec::new(),
            previous: Vec::new(),
            track_resize: false,
        };
        r.resize(cols, rows);
        r
    }

    fn resize(&mut self, cols: u16, rows: u16) {
        self.cols = cols.max(1);
        self.rows = rows.max(1);
        let cells = self.cols as usize * self.rows as usize;
        self.pixels = vec![Rgb::BLACK; cells * 2];
        self.text = vec![None; cells];
        // Unknown contents: every cell is redrawn on the next present.
        self.previous = vec![None; cells];
    }

    fn sub_rows(&self) -> usize {
        self.rows as usize * 2
    }

    /// Column range covering play-area x-span `[x0, x1)`.
    fn col_span(&self, x0: i32, x1: i32) -> (usize, usize) {
        span(x0, x1, WIDTH, self.cols as usize)
    }

    /// Sub-pixel row range covering play-area y-span `[y0, y1)`.
    fn sub_row_span(&self, y0: i32, y1: i32) -> (usize, usize) {
        span(y0, y1, HEIGHT, self.sub_rows())
    }

    fn cell_width_px(&self) -> f32 {
        WIDTH as f32 / self.cols as f32
    }

    fn cell_of(&self, x: i32, y: i32) -> Option<(usize, usize)> {
        if x < 0 || y < 0 || x >= WIDTH || y >= HEIGHT {
            return None;
        }
        let col = x as usize * self.cols as usize / WIDTH as usize;
        let row = y as usize * self.rows as usize / HEIGHT as usize;
        Some((col, row))
    }

    fn compose(&self, col: usize, row: usize) -> Cell {
        let cols = self.cols as usize;
        let top = self.pixels[(row * 2) * cols + col];
        let bottom = self.pixels[(row * 2 + 1) * cols + col];
        match self.text[row * cols + col] {
            Some(g) => Cell {
                ch: g.ch,
                fg: g.colour,
                bg: top,
                bold: g.bold,
            },
            None => Cell {
                ch: HALF_BLOCK,
                fg: top,
                bg: bottom,
                bold: false,
            },
        }
    }
}

/// Map a play-area span onto `cells` cells spread over `extent` pixels,
/// returning the half-open index range it touches (clipped).
fn span(p0: i32, p1: i32, extent: i32, cells: usize) -> (usize, usize) {
    if p1 <= p0 || p1 <= 0 || p0 >= extent {
        return (0, 0);
    }
    let scale = cells as f32 / extent as f32;
    let start = (p0.max(0) as f32 * scale).floor() as usize;
    let end = (p1.min(extent) as f32 * scale).ceil() as usize;
    (start.min(cells), end.min(cells))
}

fn to_color(c: Rgb) -> Color {
    Color::Rgb { r: c.0, g: c.1, b: c.2 }
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    fn blit(&mut self, sprite: &Sprite, x: i32, y: i32) -> std::io::Result<()> {
        let w = sprite.width() as i32;
        let h = sprite.height() as i32;
        let (c0, c1) = self.col_span(x, x + w);
        let (r0, r1) = self.sub_row_span(y, y + h);
        let px_w = WIDTH as f32 / self.cols as f32;
        let px_h = HEIGHT as f32 / self.sub_rows() as f32;
        let cols = self.cols as usize;

        // Sample the sprite at the centre of every sub-pixel it covers.
        for r in r0..r1 {
            let sy = ((r as f32 + 0.5) * px_h) as i32 - y;
            if sy < 0 || sy >= h {
                continue;
            }
            for c in c0..c1 {
                let sx = ((c as f32 + 0.5) * px_w) as i32 - x;
                if sx < 0 || sx >= w {
                    continue;
                }
                if let Some(colour) = sprite.pixel(sx as u32, sy as u32) {
                    self.pixels[r * cols + c] = colour;
                }
            }
        }
        Ok(())
    }

    fn fill_rect(&mut self, colour: Rgb, rect: Rect) -> std::io::Result<()> {
        // Any touched sub-pixel is filled so thin bars stay visible.
        let (c0, c1) = self.col_span(rect.x, rect.x + rect.w);
        let (r0, r1) = self.sub_row_span(rect.y, rect.y + rect.h);
        let cols = self.cols as usize;
        for r in r0..r1 {
            for c in c0..c1 {
                self.pixels[r * cols + c] = colour;
            }
        }
        Ok(())
    }

    fn draw_text(&mut self, text: &str, x: i32, y: i32, style: TextStyle, colour: Rgb) -> std::io::Result<()> {
        let Some((col, row)) = self.cell_of(x.max(0), y) else {
            return Ok(());
        };
        let bold = matches!(style, TextStyle::Banner | TextStyle::Title);
        let cols = self.cols as usize;
        for (i, ch) in text.chars().enumerate() {
            let c = col + i;
            if c >= cols {
                break;
            }
            self.text[row * cols + c] = Some(Glyph { ch, colour, bold });
        }
        Ok(())
    }

    fn text_width(&self, text: &str, _style: TextStyle) -> i32 {
        (text.chars().count() as f32 * self.cell_width_px()).ceil() as i32
    }

    fn present(&mut self) -> std::io::Result<()> {
        let cols = self.cols as usize;
        let mut cursor_at: Option<(usize, usize)> = None;
        let mut pen: Option<(Rgb, Rgb, bool)> = None;

        for row in 0..self.rows as usize {
            for col in 0..cols {
                let cell = self.compose(col, row);
                let idx = row * cols + col;
                if self.previous[idx] == Some(cell) {
                    continue;
                }
                if cursor_at != Some((col, row)) {
                    self.out.queue(cursor::MoveTo(col as u16, row as u16))?;
                }
                if pen != Some((cell.fg, cell.bg, cell.bold)) {
                    self.out.queue(style::SetAttribute(if cell.bold {
                        Attribute::Bold
                    } else {
                        Attribute::NormalIntensity
                    }))?;
                    self.out.queue(style::SetForegroundColor(to_color(cell.fg)))?;
                    self.out.queue(style::SetBackgroundColor(to_color(cell.bg)))?;
                    pen = Some((cell.fg, cell.bg, cell.bold));
                }
                self.out.queue(Print(cell.ch))?;
                self.previous[idx] = Some(cell);
                cursor_at = Some((col + 1, row));
            }
        }
        self.out.queue(style::ResetColor)?;
        self.out.flush()?;

        self.text.iter_mut().for_each(|g| *g = None);

        // Pick up terminal resizes for the next frame.
        if !self.track_resize {
            return Ok(());
        }
        if let Ok((cols, rows)) = terminal::size() {
            if (cols.max(1), rows.max(1)) != (self.cols, self.rows) {
                self.out.queue(terminal::Clear(terminal::ClearType::All))?;
                self.resize(cols, rows);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
impl<W: Write> TerminalRenderer<W> {
    fn pixel_at(&self, col: usize, sub_row: usize) -> Rgb {
        self.pixels[sub_row * self.cols as usize + col]
    }
}
