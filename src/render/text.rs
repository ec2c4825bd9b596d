//! Bitmap text from the `font8x8` glyph tables.
//!
//! Glyphs are 8x8 cells scaled by a whole factor chosen from the requested
//! pixel size. Latin-1 is covered, so accented French text renders as is.

use font8x8::{UnicodeFonts, BASIC_FONTS, LATIN_FONTS};
use tiny_skia::{Path, PathBuilder};

use super::canvas::{Canvas, Color, BLACK};

const CELL: u32 = 8;

/// Font size, colour and weight of a piece of text
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    /// Size in points
    pub size_pt: f64,
    pub color: Color,
    pub bold: bool,
}

impl TextStyle {
    pub fn new(size_pt: f64) -> Self {
        Self {
            size_pt,
            color: BLACK,
            bold: false,
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HAlign {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VAlign {
    Top,
    Center,
    Bottom,
}

/// Text style resolved to pixels for one output resolution
#[derive(Debug, Clone, Copy)]
struct Metrics {
    scale: u32,
    bold_offset: u32,
}

impl Metrics {
    fn new(style: &TextStyle, px_per_pt: f64) -> Self {
        let size_px = style.size_pt * px_per_pt;
        let scale = (size_px / CELL as f64).round().max(1.0) as u32;
        let bold_offset = if style.bold { (scale / 4).max(1) } else { 0 };
        Self { scale, bold_offset }
    }

    fn advance(&self) -> u32 {
        CELL * self.scale
    }

    fn line_height(&self) -> u32 {
        // 1.25 line spacing
        CELL * self.scale + 2 * self.scale
    }
}

fn glyph(c: char) -> [u8; 8] {
    BASIC_FONTS
        .get(c)
        .or_else(|| LATIN_FONTS.get(c))
        .or_else(|| BASIC_FONTS.get('?'))
        .unwrap_or([0; 8])
}

/// Width and height in pixels of `text` once rendered
pub fn measure(text: &str, style: &TextStyle, px_per_pt: f64) -> (u32, u32) {
    let metrics = Metrics::new(style, px_per_pt);
    let lines: Vec<&str> = text.split('\n').collect();
    let widest = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0) as u32;

    let width = widest * metrics.advance() + metrics.bold_offset;
    let height = match lines.len() as u32 {
        0 => 0,
        n => (n - 1) * metrics.line_height() + CELL * metrics.scale,
    };
    (width, height)
}

/// Outline of `text` as pixel-aligned blocks with the top-left corner at the
/// origin; lines are centred on each other. `None` for blank text.
pub fn text_path(text: &str, style: &TextStyle, px_per_pt: f64) -> Option<Path> {
    let metrics = Metrics::new(style, px_per_pt);
    let (width, _) = measure(text, style, px_per_pt);
    let mut pb = PathBuilder::new();

    for (row, line) in text.split('\n').enumerate() {
        let line_width = line.chars().count() as u32 * metrics.advance() + metrics.bold_offset;
        let x0 = (width - line_width) / 2;
        let y0 = row as u32 * metrics.line_height();

        for (col, c) in line.chars().enumerate() {
            let gx = x0 + col as u32 * metrics.advance();
            for (gy, bits) in glyph(c).iter().enumerate() {
                let py = y0 + gy as u32 * metrics.scale;
                // One block per run of set bits
                let mut bit = 0;
                while bit < CELL {
                    if bits & (1 << bit) == 0 {
                        bit += 1;
                        continue;
                    }
                    let start = bit;
                    while bit < CELL && bits & (1 << bit) != 0 {
                        bit += 1;
                    }
                    let px = gx + start * metrics.scale;
                    let run = (bit - start) * metrics.scale + metrics.bold_offset;
                    push_block(&mut pb, px, py, run, metrics.scale);
                }
            }
        }
    }

    pb.finish()
}

fn push_block(pb: &mut PathBuilder, x: u32, y: u32, width: u32, height: u32) {
    let (x0, y0) = (x as f32, y as f32);
    let (x1, y1) = ((x + width) as f32, (y + height) as f32);
    pb.move_to(x0, y0);
    pb.line_to(x1, y0);
    pb.line_to(x1, y1);
    pb.line_to(x0, y1);
    pb.close();
}

/// Draw `text` anchored at `(x, y)`; returns the pixel box it covers as
/// `(left, top, width, height)`
#[allow(clippy::too_many_arguments)]
pub fn draw_text(
    canvas: &mut Canvas,
    text: &str,
    x: f64,
    y: f64,
    style: &TextStyle,
    px_per_pt: f64,
    halign: HAlign,
    valign: VAlign,
) -> (f64, f64, f64, f64) {
    let (width, height) = measure(text, style, px_per_pt);
    let (width, height) = (width as f64, height as f64);
    let (left, top) = anchor_box(x, y, width, height, halign, valign);
    if let Some(path) = text_path(text, style, px_per_pt) {
        canvas.fill_path_at(&path, left.round(), top.round(), style.color);
    }
    (left, top, width, height)
}

/// Top-left corner of a `width` x `height` box anchored at `(x, y)`
pub fn anchor_box(
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    halign: HAlign,
    valign: VAlign,
) -> (f64, f64) {
    let left = match halign {
        HAlign::Left => x,
        HAlign::Center => x - width / 2.0,
        HAlign::Right => x - width,
    };
    let top = match valign {
        VAlign::Top => y,
        VAlign::Center => y - height / 2.0,
        VAlign::Bottom => y - height,
    };
    (left, top)
}
