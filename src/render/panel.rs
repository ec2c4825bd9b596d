//! Map panels and the layers drawn on them.
//!
//! A panel is bound to one target projection. Every layer states the
//! projection its own coordinates are expressed in, and the panel reprojects
//! them while rasterising: vector layers vertex by vertex, the filled contour
//! pixel by pixel through the inverse transform.

use std::sync::Arc;
use tiny_skia::{ColorU8, Pixmap};

use crate::colormaps::ColorScale;
use crate::error::{CartoError, Result};
use crate::geodata::{GeoFeatures, LonLat};
use crate::grid::AnomalyField;
use crate::interpolation::{common, get_interpolator};
use crate::projection::MapProjection;

use super::canvas::{with_alpha, Canvas, Color, PixelRect, StrokeStyle, BLACK};
use super::text::{anchor_box, draw_text, measure, HAlign, TextStyle, VAlign};

/// Matplotlib-style `--` pattern, in multiples of the line width
const DASH_PATTERN: [f64; 2] = [3.7, 1.6];

/// Width of the map frame
const FRAME_WIDTH_PT: f64 = 0.8;

/// Distance between the map frame and gridline labels
const LABEL_GAP_PT: f64 = 3.0;

/// Densification step for curves, in degrees
const CURVE_STEP_DEG: f64 = 1.0;

/// Stroke colour, width and pattern
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineStyle {
    pub color: Color,
    pub width_pt: f64,
    pub alpha: f32,
    pub dashed: bool,
}

impl LineStyle {
    pub fn solid(color: Color, width_pt: f64) -> Self {
        Self {
            color,
            width_pt,
            alpha: 1.0,
            dashed: false,
        }
    }

    pub fn alpha(mut self, alpha: f32) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn dashed(mut self) -> Self {
        self.dashed = true;
        self
    }

    fn stroke(&self, px_per_pt: f64) -> StrokeStyle {
        let dash = self.dashed.then(|| {
            let unit = self.width_pt.max(0.5) * px_per_pt;
            [DASH_PATTERN[0] * unit, DASH_PATTERN[1] * unit]
        });
        StrokeStyle {
            width_px: self.width_pt * px_per_pt,
            dash,
        }
    }
}

/// Pixel placement of a projected map inside the figure
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapFrame {
    projection: MapProjection,
    rect: PixelRect,
}

impl MapFrame {
    pub fn new(projection: MapProjection, rect: PixelRect) -> Self {
        Self { projection, rect }
    }

    pub fn projection(&self) -> MapProjection {
        self.projection
    }

    pub fn rect(&self) -> PixelRect {
        self.rect
    }

    /// Map coordinates to pixel coordinates
    pub fn to_pixel(&self, x: f64, y: f64) -> (f64, f64) {
        let (hw, hh) = self.projection.extent();
        (
            self.rect.x + (x + hw) / (2.0 * hw) * self.rect.width,
            self.rect.y + (hh - y) / (2.0 * hh) * self.rect.height,
        )
    }

    /// Pixel coordinates to map coordinates
    pub fn from_pixel(&self, px: f64, py: f64) -> (f64, f64) {
        let (hw, hh) = self.projection.extent();
        (
            (px - self.rect.x) / self.rect.width * 2.0 * hw - hw,
            hh - (py - self.rect.y) / self.rect.height * 2.0 * hh,
        )
    }

    /// Pixel position of a point expressed in `source` coordinates
    pub fn point_to_pixel(&self, source: MapProjection, x: f64, y: f64) -> Option<(f64, f64)> {
        let (mx, my) = self.projection.transform_from(source, x, y)?;
        Some(self.to_pixel(mx, my))
    }

    /// Densify, project and place a longitude/latitude path
    pub fn project_path(&self, path: &[LonLat]) -> Vec<(f64, f64)> {
        self.projection
            .project_path(path, CURVE_STEP_DEG)
            .into_iter()
            .map(|(x, y)| self.to_pixel(x, y))
            .collect()
    }

    /// As `project_path`, with the closing edge of the ring included
    pub fn project_ring(&self, ring: &[LonLat]) -> Vec<(f64, f64)> {
        let mut closed = ring.to_vec();
        if let (Some(&first), Some(&last)) = (ring.first(), ring.last()) {
            if first != last {
                closed.push(first);
            }
        }
        self.project_path(&closed)
    }

    pub fn project_rings(&self, rings: &[Vec<LonLat>]) -> Vec<Vec<(f64, f64)>> {
        rings.iter().map(|ring| self.project_ring(ring)).collect()
    }

    /// Outline of the globe in pixels
    pub fn boundary(&self) -> Vec<(f64, f64)> {
        self.projection
            .boundary()
            .into_iter()
            .map(|(x, y)| self.to_pixel(x, y))
            .collect()
    }
}

/// A shaded field, sampled at every pixel of the globe
#[derive(Debug, Clone)]
pub struct ContourLayer {
    xs: Vec<f64>,
    ys: Vec<f64>,
    values: Arc<Vec<f32>>,
    scale: ColorScale,
    transform: MapProjection,
    interpolation: String,
}

impl ContourLayer {
    /// Values are row-major with rows along `ys`, all in `transform`
    /// coordinates
    pub fn new(
        xs: Vec<f64>,
        ys: Vec<f64>,
        values: Vec<f32>,
        scale: ColorScale,
        transform: MapProjection,
        interpolation: &str,
    ) -> Result<Self> {
        if values.len() != xs.len() * ys.len() {
            return Err(CartoError::ShapeMismatch {
                expected: (ys.len(), xs.len()),
                actual: (values.len(), 1),
            });
        }
        let interpolation = get_interpolator(interpolation)?.name().to_string();

        Ok(Self {
            xs,
            ys,
            values: Arc::new(values),
            scale,
            transform,
            interpolation,
        })
    }

    /// Contour layer of an anomaly field given in plain longitude/latitude
    pub fn from_field(
        field: &AnomalyField,
        scale: ColorScale,
        interpolation: &str,
    ) -> Result<Self> {
        Self::new(
            field.lons().to_vec(),
            field.lats().to_vec(),
            field.to_flat(),
            scale,
            MapProjection::PlateCarree,
            interpolation,
        )
    }

    pub fn scale(&self) -> &ColorScale {
        &self.scale
    }

    pub fn transform(&self) -> MapProjection {
        self.transform
    }

    pub fn interpolation(&self) -> &str {
        &self.interpolation
    }

    fn render(&self, canvas: &mut Canvas, frame: &MapFrame) -> Result<()> {
        let interpolator = get_interpolator(&self.interpolation)?;
        let shape = [self.ys.len(), self.xs.len()];
        let rect = frame.rect();

        let x0 = rect.x.floor().max(0.0) as u32;
        let y0 = rect.y.floor().max(0.0) as u32;
        let x1 = (rect.right().ceil() as u32).min(canvas.width());
        let y1 = (rect.bottom().ceil() as u32).min(canvas.height());
        if x1 <= x0 || y1 <= y0 {
            return Ok(());
        }

        // Shade into a transparent layer, then composite it in one pass
        let mut layer = Pixmap::new(x1 - x0, y1 - y0).ok_or_else(|| CartoError::Render {
            message: "Cannot allocate the contour layer".to_string(),
        })?;
        let stride = layer.width();
        let pixels = layer.pixels_mut();

        for py in y0..y1 {
            for px in x0..x1 {
                let (cx, cy) = (px as f64 + 0.5, py as f64 + 0.5);
                if !rect.contains(cx, cy) {
                    continue;
                }
                let (mx, my) = frame.from_pixel(cx, cy);
                let Some((lon, lat)) = frame.projection().inverse(mx, my) else {
                    continue;
                };
                let (sx, sy) = self.transform.forward(lon, lat);
                let i = common::coord_to_index(sx, &self.xs)?;
                let j = common::coord_to_index(sy, &self.ys)?;
                let value = interpolator.interpolate(&self.values, &shape, &[j, i])?;
                let [r, g, b, a] = self.scale.color_for(value);
                pixels[((py - y0) * stride + (px - x0)) as usize] =
                    ColorU8::from_rgba(r, g, b, a).premultiply();
            }
        }

        canvas.draw_layer(&layer, x0 as i32, y0 as i32);
        Ok(())
    }
}

/// Which sides of the frame carry gridline labels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LabelSides {
    pub left: bool,
    pub right: bool,
    pub top: bool,
    pub bottom: bool,
}

impl LabelSides {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn all() -> Self {
        Self {
            left: true,
            right: true,
            top: true,
            bottom: true,
        }
    }
}

/// Meridians and parallels at fixed steps
#[derive(Debug, Clone, PartialEq)]
pub struct Gridlines {
    pub style: LineStyle,
    pub lon_step: f64,
    pub lat_step: f64,
    pub labels: LabelSides,
    pub label_style: TextStyle,
}

impl Gridlines {
    pub fn new(style: LineStyle) -> Self {
        Self {
            style,
            lon_step: 60.0,
            lat_step: 30.0,
            labels: LabelSides::none(),
            label_style: TextStyle::new(10.0),
        }
    }

    pub fn labels(mut self, labels: LabelSides) -> Self {
        self.labels = labels;
        self
    }

    pub fn meridians(&self) -> Vec<f64> {
        steps(-180.0, 180.0, self.lon_step)
    }

    /// Parallels strictly between the poles
    pub fn parallels(&self) -> Vec<f64> {
        steps(-90.0, 90.0, self.lat_step)
            .into_iter()
            .filter(|lat| lat.abs() < 90.0)
            .collect()
    }

    /// Space the labels need outside the frame: `(left, right, top, bottom)`
    pub fn label_margins(&self, px_per_pt: f64) -> (f64, f64, f64, f64) {
        let gap = LABEL_GAP_PT * px_per_pt;
        let widest = |labels: Vec<String>| {
            labels
                .iter()
                .map(|l| measure(l, &self.label_style, px_per_pt).0)
                .max()
                .unwrap_or(0) as f64
        };
        let lat_width = widest(self.parallels().into_iter().map(format_lat).collect()) + gap;
        let lon_height = measure("0", &self.label_style, px_per_pt).1 as f64 + gap;

        (
            if self.labels.left { lat_width } else { 0.0 },
            if self.labels.right { lat_width } else { 0.0 },
            if self.labels.top { lon_height } else { 0.0 },
            if self.labels.bottom { lon_height } else { 0.0 },
        )
    }

    fn render(&self, canvas: &mut Canvas, frame: &MapFrame, px_per_pt: f64) {
        let meridians = self
            .meridians()
            .into_iter()
            .map(|lon| frame.project_path(&[(lon, -90.0), (lon, 90.0)]));
        let parallels = self
            .parallels()
            .into_iter()
            .map(|lat| frame.project_path(&[(-180.0, lat), (180.0, lat)]));
        let lines: Vec<_> = meridians.chain(parallels).collect();
        stroke_paths(canvas, &lines, &self.style, px_per_pt);

        self.render_labels(canvas, frame, px_per_pt);
    }

    fn render_labels(&self, canvas: &mut Canvas, frame: &MapFrame, px_per_pt: f64) {
        let gap = LABEL_GAP_PT * px_per_pt;
        let pc = MapProjection::PlateCarree;
        let style = self.label_style;
        let mut label_at = |text: &str, (x, y): (f64, f64), halign, valign| {
            draw_text(canvas, text, x, y, &style, px_per_pt, halign, valign);
        };

        for lat in self.parallels() {
            let label = format_lat(lat);
            if self.labels.left {
                if let Some((x, y)) = frame.point_to_pixel(pc, -180.0, lat) {
                    label_at(&label, (x - gap, y), HAlign::Right, VAlign::Center);
                }
            }
            if self.labels.right {
                if let Some((x, y)) = frame.point_to_pixel(pc, 180.0, lat) {
                    label_at(&label, (x + gap, y), HAlign::Left, VAlign::Center);
                }
            }
        }

        for lon in self.meridians() {
            let label = format_lon(lon);
            if self.labels.bottom {
                if let Some((x, y)) = frame.point_to_pixel(pc, lon, -90.0) {
                    label_at(&label, (x, y + gap), HAlign::Center, VAlign::Top);
                }
            }
            if self.labels.top {
                if let Some((x, y)) = frame.point_to_pixel(pc, lon, 90.0) {
                    label_at(&label, (x, y - gap), HAlign::Center, VAlign::Bottom);
                }
            }
        }
    }
}

fn steps(start: f64, end: f64, step: f64) -> Vec<f64> {
    if step <= 0.0 {
        return Vec::new();
    }
    let count = ((end - start) / step).floor() as usize;
    (0..=count).map(|k| start + step * k as f64).collect()
}

/// Longitude label such as `60°W`
pub fn format_lon(lon: f64) -> String {
    let lon = lon.round();
    if lon == 0.0 || lon.abs() == 180.0 {
        format!("{}°", lon.abs())
    } else if lon < 0.0 {
        format!("{}°W", -lon)
    } else {
        format!("{}°E", lon)
    }
}

/// Latitude label such as `30°N`
pub fn format_lat(lat: f64) -> String {
    let lat = lat.round();
    if lat == 0.0 {
        "0°".to_string()
    } else if lat < 0.0 {
        format!("{}°S", -lat)
    } else {
        format!("{}°N", lat)
    }
}

/// A filled circular marker
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Marker {
    pub x: f64,
    pub y: f64,
    pub transform: MapProjection,
    /// Diameter in points
    pub size_pt: f64,
    pub color: Color,
}

impl Marker {
    /// Pixel box of the disc, `None` when the point is off the map
    pub fn pixel_bounds(&self, frame: &MapFrame, px_per_pt: f64) -> Option<PixelRect> {
        let (px, py) = frame.point_to_pixel(self.transform, self.x, self.y)?;
        let r = self.size_pt * px_per_pt / 2.0;
        Some(PixelRect::new(px - r, py - r, 2.0 * r, 2.0 * r))
    }

    fn render(&self, canvas: &mut Canvas, frame: &MapFrame, px_per_pt: f64) {
        if let Some(disc) = self.pixel_bounds(frame, px_per_pt) {
            canvas.fill_circle(disc.center_x(), disc.center_y(), disc.width / 2.0, self.color);
        }
    }
}

/// Background box behind a text label
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextBox {
    pub facecolor: Color,
    pub alpha: f32,
    /// Padding in multiples of the font size; also the corner radius
    pub pad_em: f64,
}

/// Text placed at a map position
#[derive(Debug, Clone, PartialEq)]
pub struct TextLabel {
    pub x: f64,
    pub y: f64,
    pub transform: MapProjection,
    pub text: String,
    pub style: TextStyle,
    pub halign: HAlign,
    pub valign: VAlign,
    pub bbox: Option<TextBox>,
}

impl TextLabel {
    fn pad_px(&self, px_per_pt: f64) -> f64 {
        self.bbox
            .map_or(0.0, |bbox| bbox.pad_em * self.style.size_pt * px_per_pt)
    }

    /// Pixel area covered by the text and its padded box, `None` when the
    /// anchor is off the map
    pub fn pixel_bounds(&self, frame: &MapFrame, px_per_pt: f64) -> Option<PixelRect> {
        let (px, py) = frame.point_to_pixel(self.transform, self.x, self.y)?;
        let (w, h) = measure(&self.text, &self.style, px_per_pt);
        let (w, h) = (w as f64, h as f64);
        let (left, top) = anchor_box(px, py, w, h, self.halign, self.valign);
        let pad = self.pad_px(px_per_pt);
        Some(PixelRect::new(left - pad, top - pad, w + 2.0 * pad, h + 2.0 * pad))
    }

    fn render(&self, canvas: &mut Canvas, frame: &MapFrame, px_per_pt: f64) {
        let Some((px, py)) = frame.point_to_pixel(self.transform, self.x, self.y) else {
            return;
        };

        if let (Some(bbox), Some(rect)) = (&self.bbox, self.pixel_bounds(frame, px_per_pt)) {
            let color = with_alpha(bbox.facecolor, bbox.alpha);
            canvas.fill_rounded_rect(rect, self.pad_px(px_per_pt), color);
        }

        draw_text(
            canvas,
            &self.text,
            px,
            py,
            &self.style,
            px_per_pt,
            self.halign,
            self.valign,
        );
    }
}

/// Everything a panel can draw
#[derive(Debug, Clone)]
pub enum Layer {
    Land {
        features: Arc<GeoFeatures>,
        facecolor: Color,
        edge: Option<LineStyle>,
    },
    /// The globe minus the land polygons
    Ocean {
        features: Arc<GeoFeatures>,
        facecolor: Color,
    },
    Coastline {
        features: Arc<GeoFeatures>,
        style: LineStyle,
    },
    Borders {
        features: Arc<GeoFeatures>,
        style: LineStyle,
    },
    FilledContour(ContourLayer),
    Gridlines(Gridlines),
    Marker(Marker),
    Text(TextLabel),
}

impl Layer {
    /// Drawing order; equal values keep insertion order
    pub fn zorder(&self) -> i32 {
        match self {
            Layer::Land { .. }
            | Layer::Ocean { .. }
            | Layer::Coastline { .. }
            | Layer::Borders { .. }
            | Layer::FilledContour(_) => 1,
            Layer::Gridlines(_) => 2,
            Layer::Text(_) => 3,
            Layer::Marker(_) => 5,
        }
    }

    fn render(&self, canvas: &mut Canvas, frame: &MapFrame, px_per_pt: f64) -> Result<()> {
        match self {
            // The edge is stroked separately by `render_land_edge`
            Layer::Land {
                features,
                facecolor,
                ..
            } => canvas.fill_rings(&frame.project_rings(features.land()), *facecolor),
            Layer::Ocean {
                features,
                facecolor,
            } => {
                let mut rings = vec![frame.boundary()];
                rings.extend(frame.project_rings(features.land()));
                canvas.fill_rings(&rings, *facecolor);
            }
            Layer::Coastline { features, style } => {
                let rings = frame.project_rings(features.coastlines());
                stroke_paths(canvas, &rings, style, px_per_pt);
            }
            Layer::Borders { features, style } => {
                let lines: Vec<_> = features
                    .borders()
                    .iter()
                    .map(|l| frame.project_path(l))
                    .collect();
                stroke_paths(canvas, &lines, style, px_per_pt);
            }
            Layer::FilledContour(contour) => contour.render(canvas, frame)?,
            Layer::Gridlines(gridlines) => gridlines.render(canvas, frame, px_per_pt),
            Layer::Marker(marker) => marker.render(canvas, frame, px_per_pt),
            Layer::Text(label) => label.render(canvas, frame, px_per_pt),
        }
        Ok(())
    }

    fn render_land_edge(&self, canvas: &mut Canvas, frame: &MapFrame, px_per_pt: f64) {
        if let Layer::Land {
            features,
            edge: Some(edge),
            ..
        } = self
        {
            stroke_paths(canvas, &frame.project_rings(features.land()), edge, px_per_pt);
        }
    }
}

fn stroke_paths(
    canvas: &mut Canvas,
    paths: &[Vec<(f64, f64)>],
    style: &LineStyle,
    px_per_pt: f64,
) {
    let color = with_alpha(style.color, style.alpha);
    canvas.stroke_lines(paths, style.stroke(px_per_pt), color);
}

/// Panel title, drawn centred above the map
#[derive(Debug, Clone, PartialEq)]
pub struct Title {
    pub text: String,
    pub style: TextStyle,
    pub pad_pt: f64,
}

/// One map of a figure
#[derive(Debug, Clone)]
pub struct Panel {
    projection: MapProjection,
    title: Option<Title>,
    layers: Vec<Layer>,
}

impl Panel {
    pub fn new(projection: MapProjection) -> Self {
        Self {
            projection,
            title: None,
            layers: Vec::new(),
        }
    }

    pub fn projection(&self) -> MapProjection {
        self.projection
    }

    pub fn set_title(&mut self, text: &str, style: TextStyle, pad_pt: f64) {
        self.title = Some(Title {
            text: text.to_string(),
            style,
            pad_pt,
        });
    }

    pub fn title(&self) -> Option<&Title> {
        self.title.as_ref()
    }

    pub fn add_layer(&mut self, layer: Layer) {
        self.layers.push(layer);
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// The first filled contour layer, if any
    pub fn contour(&self) -> Option<&ContourLayer> {
        self.layers.iter().find_map(|layer| match layer {
            Layer::FilledContour(contour) => Some(contour),
            _ => None,
        })
    }

    pub fn markers(&self) -> Vec<&Marker> {
        self.layers
            .iter()
            .filter_map(|layer| match layer {
                Layer::Marker(marker) => Some(marker),
                _ => None,
            })
            .collect()
    }

    pub fn text_labels(&self) -> Vec<&TextLabel> {
        self.layers
            .iter()
            .filter_map(|layer| match layer {
                Layer::Text(label) => Some(label),
                _ => None,
            })
            .collect()
    }

    /// Pixel height of the title band above the map
    pub fn title_height(&self, px_per_pt: f64) -> f64 {
        self.title.as_ref().map_or(0.0, |title| {
            measure(&title.text, &title.style, px_per_pt).1 as f64 + title.pad_pt * px_per_pt
        })
    }

    /// Space gridline labels need around the frame: `(left, right, top, bottom)`
    pub fn label_margins(&self, px_per_pt: f64) -> (f64, f64, f64, f64) {
        self.layers
            .iter()
            .filter_map(|layer| match layer {
                Layer::Gridlines(gridlines) => Some(gridlines.label_margins(px_per_pt)),
                _ => None,
            })
            .fold((0.0, 0.0, 0.0, 0.0), |acc, m| {
                (acc.0.max(m.0), acc.1.max(m.1), acc.2.max(m.2), acc.3.max(m.3))
            })
    }

    /// Draw the layers by z-order, then the frame and the title.
    ///
    /// Land edges wait until every later ocean fill has been drawn.
    pub fn render(&self, canvas: &mut Canvas, frame: &MapFrame, px_per_pt: f64) -> Result<()> {
        let mut ordered: Vec<&Layer> = self.layers.iter().collect();
        ordered.sort_by_key(|layer| layer.zorder());

        let mut pending_edges: Vec<&Layer> = Vec::new();
        for (i, layer) in ordered.iter().enumerate() {
            layer.render(canvas, frame, px_per_pt)?;
            if matches!(layer, Layer::Land { .. }) {
                pending_edges.push(*layer);
            }
            let ocean_ahead = ordered[i + 1..]
                .iter()
                .any(|later| matches!(later, Layer::Ocean { .. }));
            if !ocean_ahead {
                for land in pending_edges.drain(..) {
                    land.render_land_edge(canvas, frame, px_per_pt);
                }
            }
        }

        let outline = [frame.boundary()];
        canvas.stroke_rings(&outline, StrokeStyle::solid(FRAME_WIDTH_PT * px_per_pt), BLACK);

        if let Some(title) = &self.title {
            let rect = frame.rect();
            let (_, top_margin, _, _) = self.label_margins(px_per_pt);
            draw_text(
                canvas,
                &title.text,
                rect.center_x(),
                rect.y - top_margin - title.pad_pt * px_per_pt,
                &title.style,
                px_per_pt,
                HAlign::Center,
                VAlign::Bottom,
            );
        }

        Ok(())
    }
}
