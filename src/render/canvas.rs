//! Drawing surface for figures, backed by a `tiny_skia` pixmap.
//!
//! Coordinates are pixels with y growing downward. Shapes are filled or
//! stroked as one anti-aliased path each, so a translucent layer covers a
//! pixel once even where its own outlines overlap.

use image::{Rgba, RgbaImage};
use std::fmt;
use tiny_skia::{
    ColorU8, FillRule, IntRect, LineCap, LineJoin, Paint, Path, PathBuilder, Pixmap, PixmapPaint,
    Rect, Stroke, StrokeDash, Transform,
};

use crate::error::{CartoError, Result};

/// RGBA colour, straight alpha
pub type Color = [u8; 4];

pub const WHITE: Color = [255, 255, 255, 255];
pub const BLACK: Color = [0, 0, 0, 255];

/// Apply an opacity factor to a colour
pub fn with_alpha(color: Color, alpha: f32) -> Color {
    let [r, g, b, a] = color;
    [r, g, b, (a as f32 * alpha.clamp(0.0, 1.0)).round() as u8]
}

/// Axis-aligned rectangle in pixel coordinates (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl PixelRect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn center_x(&self) -> f64 {
        self.x + self.width / 2.0
    }

    pub fn center_y(&self) -> f64 {
        self.y + self.height / 2.0
    }

    pub fn contains(&self, px: f64, py: f64) -> bool {
        px >= self.x && px < self.right() && py >= self.y && py < self.bottom()
    }

    fn to_skia(self) -> Option<Rect> {
        Rect::from_xywh(self.x as f32, self.y as f32, self.width as f32, self.height as f32)
    }
}

/// Width and optional `[on, off]` dash lengths of a stroke, in pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeStyle {
    pub width_px: f64,
    pub dash: Option<[f64; 2]>,
}

impl StrokeStyle {
    pub fn solid(width_px: f64) -> Self {
        Self {
            width_px,
            dash: None,
        }
    }

    fn to_skia(self) -> Stroke {
        Stroke {
            width: self.width_px as f32,
            line_cap: LineCap::Butt,
            line_join: LineJoin::Round,
            dash: self
                .dash
                .and_then(|[on, off]| StrokeDash::new(vec![on as f32, off as f32], 0.0)),
            ..Stroke::default()
        }
    }
}

fn paint(color: Color) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color_rgba8(color[0], color[1], color[2], color[3]);
    paint.anti_alias = true;
    paint
}

/// One path through every polyline; `close` joins each back to its start.
///
/// Non-finite vertices are skipped. Returns `None` when nothing is left.
pub fn polyline_path(lines: &[Vec<(f64, f64)>], close: bool) -> Option<Path> {
    let mut pb = PathBuilder::new();
    for line in lines {
        let mut points = line.iter().filter(|(x, y)| x.is_finite() && y.is_finite());
        let Some(&(x, y)) = points.next() else {
            continue;
        };
        pb.move_to(x as f32, y as f32);
        for &(x, y) in points {
            pb.line_to(x as f32, y as f32);
        }
        if close {
            pb.close();
        }
    }
    pb.finish()
}

/// Rectangle with corners rounded by quadratic arcs of `radius`
pub fn rounded_rect_path(rect: PixelRect, radius: f64) -> Option<Path> {
    let r = radius.min(rect.width / 2.0).min(rect.height / 2.0).max(0.0) as f32;
    let (left, top) = (rect.x as f32, rect.y as f32);
    let (right, bottom) = (rect.right() as f32, rect.bottom() as f32);

    let mut pb = PathBuilder::new();
    pb.move_to(left + r, top);
    pb.line_to(right - r, top);
    pb.quad_to(right, top, right, top + r);
    pb.line_to(right, bottom - r);
    pb.quad_to(right, bottom, right - r, bottom);
    pb.line_to(left + r, bottom);
    pb.quad_to(left, bottom, left, bottom - r);
    pb.line_to(left, top + r);
    pb.quad_to(left, top, left + r, top);
    pb.close();
    pb.finish()
}

/// An opaque drawing surface
#[derive(Clone)]
pub struct Canvas {
    pixmap: Pixmap,
}

impl fmt::Debug for Canvas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Canvas")
            .field("width", &self.width())
            .field("height", &self.height())
            .finish()
    }
}

impl Canvas {
    pub fn new(width: u32, height: u32, background: Color) -> Result<Self> {
        let mut pixmap = Pixmap::new(width, height).ok_or_else(|| CartoError::Render {
            message: format!("Cannot allocate a {}x{} canvas", width, height),
        })?;
        let [r, g, b, a] = background;
        pixmap.fill(tiny_skia::Color::from_rgba8(r, g, b, a));
        Ok(Self { pixmap })
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Straight-alpha colour of one pixel
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        let c = self.pixmap.pixel(x, y)?.demultiply();
        Some([c.red(), c.green(), c.blue(), c.alpha()])
    }

    /// Copy out as a straight-alpha image buffer for encoding
    pub fn to_image(&self) -> RgbaImage {
        let mut image = RgbaImage::new(self.width(), self.height());
        for (dst, src) in image.pixels_mut().zip(self.pixmap.pixels()) {
            let c = src.demultiply();
            *dst = Rgba([c.red(), c.green(), c.blue(), c.alpha()]);
        }
        image
    }

    /// Fill closed rings with the even-odd rule, so inner rings cut holes
    pub fn fill_rings(&mut self, rings: &[Vec<(f64, f64)>], color: Color) {
        if let Some(path) = polyline_path(rings, true) {
            self.pixmap.fill_path(
                &path,
                &paint(color),
                FillRule::EvenOdd,
                Transform::identity(),
                None,
            );
        }
    }

    /// Stroke open polylines as a single path
    pub fn stroke_lines(&mut self, lines: &[Vec<(f64, f64)>], style: StrokeStyle, color: Color) {
        if let Some(path) = polyline_path(lines, false) {
            self.stroke(&path, style, color);
        }
    }

    /// Stroke closed rings as a single path
    pub fn stroke_rings(&mut self, rings: &[Vec<(f64, f64)>], style: StrokeStyle, color: Color) {
        if let Some(path) = polyline_path(rings, true) {
            self.stroke(&path, style, color);
        }
    }

    fn stroke(&mut self, path: &Path, style: StrokeStyle, color: Color) {
        self.pixmap.stroke_path(
            path,
            &paint(color),
            &style.to_skia(),
            Transform::identity(),
            None,
        );
    }

    /// Fill a path given relative to `(dx, dy)`
    pub fn fill_path_at(&mut self, path: &Path, dx: f64, dy: f64, color: Color) {
        self.pixmap.fill_path(
            path,
            &paint(color),
            FillRule::Winding,
            Transform::from_translate(dx as f32, dy as f32),
            None,
        );
    }

    pub fn fill_rect(&mut self, rect: PixelRect, color: Color) {
        if let Some(rect) = rect.to_skia() {
            self.pixmap
                .fill_rect(rect, &paint(color), Transform::identity(), None);
        }
    }

    /// Rectangle outline centred on the edges of `rect`
    pub fn stroke_rect(&mut self, rect: PixelRect, width_px: f64, color: Color) {
        if let Some(rect) = rect.to_skia() {
            let path = PathBuilder::from_rect(rect);
            self.stroke(&path, StrokeStyle::solid(width_px), color);
        }
    }

    pub fn fill_rounded_rect(&mut self, rect: PixelRect, radius: f64, color: Color) {
        if let Some(path) = rounded_rect_path(rect, radius) {
            self.fill_path_at(&path, 0.0, 0.0, color);
        }
    }

    /// Filled disc centred on a point
    pub fn fill_circle(&mut self, cx: f64, cy: f64, radius: f64, color: Color) {
        if let Some(path) = PathBuilder::from_circle(cx as f32, cy as f32, radius as f32) {
            self.fill_path_at(&path, 0.0, 0.0, color);
        }
    }

    /// Composite a premultiplied layer with its top-left corner at `(x, y)`
    pub fn draw_layer(&mut self, layer: &Pixmap, x: i32, y: i32) {
        self.pixmap.draw_pixmap(
            x,
            y,
            layer.as_ref(),
            &PixmapPaint::default(),
            Transform::identity(),
            None,
        );
    }

    /// Inclusive pixel bounds `(x0, y0, x1, y1)` of everything that differs
    /// from `background`
    pub fn content_bounds(&self, background: Color) -> Option<(u32, u32, u32, u32)> {
        let [r, g, b, a] = background;
        let background = ColorU8::from_rgba(r, g, b, a).premultiply();
        let width = self.width() as usize;

        self.pixmap
            .pixels()
            .iter()
            .enumerate()
            .filter(|(_, p)| **p != background)
            .map(|(i, _)| ((i % width) as u32, (i / width) as u32))
            .fold(None, |acc, (x, y)| {
                Some(match acc {
                    None => (x, y, x, y),
                    Some((x0, y0, x1, y1)) => (x0.min(x), y0.min(y), x1.max(x), y1.max(y)),
                })
            })
    }

    /// Copy of a sub-rectangle of pixels
    pub fn crop(&self, x: u32, y: u32, width: u32, height: u32) -> Result<Canvas> {
        let inside = x.checked_add(width).is_some_and(|right| right <= self.width())
            && y.checked_add(height).is_some_and(|bottom| bottom <= self.height());
        inside
            .then(|| IntRect::from_xywh(x as i32, y as i32, width, height))
            .flatten()
            .and_then(|rect| self.pixmap.clone_rect(rect))
            .map(|pixmap| Canvas { pixmap })
            .ok_or_else(|| CartoError::Render {
                message: format!(
                    "Crop {}x{}+{}+{} is outside the {}x{} canvas",
                    width,
                    height,
                    x,
                    y,
                    self.width(),
                    self.height()
                ),
            })
    }
}
