//! Figures: a stack of map panels, a title, an optional colour bar, and
//! export to PNG.
//!
//! Panels are addressed through the handles `add_panel` returns; there is no
//! notion of a "current" panel.

use image::RgbaImage;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use tracing::{debug, info};

use super::canvas::{Canvas, Color, PixelRect, WHITE};
use super::legend::{Colorbar, ColorbarConfig};
use super::panel::{MapFrame, Panel};
use super::text::{draw_text, measure, HAlign, TextStyle, VAlign};
use crate::error::{CartoError, Result};
use crate::projection::MapProjection;

/// Fixed margins as fractions of the figure: left, right, top, bottom
const SUBPLOT_MARGINS: (f64, f64, f64, f64) = (0.125, 0.1, 0.12, 0.11);

/// Vertical gap between panels, as a share of a panel slot
const SUBPLOT_HSPACE: f64 = 0.2;

/// Vertical position of the figure title in fixed layout, from the top
const SUPTITLE_Y: f64 = 0.02;

/// Padding used by the tight layout, in points
const TIGHT_PAD_PT: f64 = 1.08 * 10.0;

/// Largest supported side of the rendered figure, in pixels
const MAX_SIDE_PX: f64 = 32_768.0;

const METERS_PER_INCH: f64 = 0.0254;

/// Index of a panel within its figure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PanelHandle(pub(crate) usize);

impl PanelHandle {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// How panel positions are derived
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutMode {
    /// Fixed fractional margins and spacing
    SubplotParams,
    /// Margins fitted to titles and labels
    Tight,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SaveOptions {
    /// Crop the saved image to the drawn content
    pub tight_bbox: bool,
    /// Padding kept around the content when cropping
    pub pad_inches: f64,
}

impl Default for SaveOptions {
    fn default() -> Self {
        Self {
            tight_bbox: false,
            pad_inches: 0.1,
        }
    }
}

/// Pixel positions of everything on a figure
#[derive(Debug, Clone, PartialEq)]
pub struct FigureLayout {
    pub frames: Vec<MapFrame>,
    pub colorbar: Option<PixelRect>,
    pub suptitle_y: f64,
}

#[derive(Debug, Clone)]
struct Suptitle {
    text: String,
    style: TextStyle,
}

#[derive(Debug, Clone)]
pub struct Figure {
    width_in: f64,
    height_in: f64,
    dpi: u32,
    background: Color,
    panels: Vec<Panel>,
    suptitle: Option<Suptitle>,
    colorbar: Option<Colorbar>,
    layout: LayoutMode,
}

impl Figure {
    pub fn new(width_in: f64, height_in: f64, dpi: u32) -> Result<Self> {
        let finite = width_in.is_finite() && height_in.is_finite();
        if !finite || width_in <= 0.0 || height_in <= 0.0 {
            return Err(CartoError::InvalidParameter {
                param: "figsize".to_string(),
                message: format!(
                    "Figure size must be positive, got {}x{} in",
                    width_in, height_in
                ),
            });
        }
        if dpi == 0 {
            return Err(CartoError::InvalidParameter {
                param: "dpi".to_string(),
                message: "Resolution must be positive".to_string(),
            });
        }
        let (w, h) = (width_in * dpi as f64, height_in * dpi as f64);
        if w.round() < 1.0 || h.round() < 1.0 || w > MAX_SIDE_PX || h > MAX_SIDE_PX {
            return Err(CartoError::InvalidParameter {
                param: "figsize".to_string(),
                message: format!("Figure of {:.0}x{:.0} pixels cannot be rendered", w, h),
            });
        }

        Ok(Self {
            width_in,
            height_in,
            dpi,
            background: WHITE,
            panels: Vec::new(),
            suptitle: None,
            colorbar: None,
            layout: LayoutMode::SubplotParams,
        })
    }

    pub fn dpi(&self) -> u32 {
        self.dpi
    }

    /// Size in inches
    pub fn size_inches(&self) -> (f64, f64) {
        (self.width_in, self.height_in)
    }

    /// Size of the rendered canvas in pixels, before any cropping
    pub fn pixel_size(&self) -> (u32, u32) {
        (
            (self.width_in * self.dpi as f64).round() as u32,
            (self.height_in * self.dpi as f64).round() as u32,
        )
    }

    pub fn px_per_pt(&self) -> f64 {
        self.dpi as f64 / 72.0
    }

    /// Add a panel below the existing ones
    pub fn add_panel(&mut self, projection: MapProjection) -> PanelHandle {
        self.panels.push(Panel::new(projection));
        PanelHandle(self.panels.len() - 1)
    }

    pub fn panel(&self, handle: PanelHandle) -> Result<&Panel> {
        self.panels.get(handle.0).ok_or_else(|| unknown_panel(handle))
    }

    pub fn panel_mut(&mut self, handle: PanelHandle) -> Result<&mut Panel> {
        self.panels.get_mut(handle.0).ok_or_else(|| unknown_panel(handle))
    }

    pub fn panels(&self) -> &[Panel] {
        &self.panels
    }

    pub fn suptitle(&mut self, text: &str, style: TextStyle) {
        self.suptitle = Some(Suptitle {
            text: text.to_string(),
            style,
        });
    }

    pub fn suptitle_text(&self) -> Option<&str> {
        self.suptitle.as_ref().map(|s| s.text.as_str())
    }

    /// Attach the figure's colour bar, describing the contour layer of
    /// `source` and laid out under the `span` panels.
    pub fn add_colorbar(
        &mut self,
        source: PanelHandle,
        span: &[PanelHandle],
        config: ColorbarConfig,
    ) -> Result<&Colorbar> {
        if self.colorbar.is_some() {
            return Err(CartoError::Render {
                message: "Figure already has a colour bar".to_string(),
            });
        }
        if span.is_empty() {
            return Err(CartoError::Render {
                message: "A colour bar must span at least one panel".to_string(),
            });
        }
        for handle in span {
            self.panel(*handle)?;
        }
        let scale = self
            .panel(source)?
            .contour()
            .map(|contour| contour.scale().clone())
            .ok_or_else(|| CartoError::Render {
                message: format!("Panel {} has no filled contour layer", source.0),
            })?;

        Ok(self
            .colorbar
            .insert(Colorbar::new(scale, config, source, span.to_vec())))
    }

    pub fn colorbar(&self) -> Option<&Colorbar> {
        self.colorbar.as_ref()
    }

    /// Fit margins and spacing to the content
    pub fn tight_layout(&mut self) {
        self.layout = LayoutMode::Tight;
    }

    pub fn layout_mode(&self) -> LayoutMode {
        self.layout
    }

    /// Resolve panel frames, colour bar and title positions
    pub fn compute_layout(&self) -> Result<FigureLayout> {
        let (width, height) = self.pixel_size();
        let (w, h) = (width as f64, height as f64);
        let ppt = self.px_per_pt();

        let suptitle_height = self
            .suptitle
            .as_ref()
            .map_or(0.0, |s| measure(&s.text, &s.style, ppt).1 as f64);

        let (left, right, top, bottom, suptitle_y) = match self.layout {
            LayoutMode::SubplotParams => {
                let (l, r, t, b) = SUBPLOT_MARGINS;
                (l * w, r * w, t * h, b * h, SUPTITLE_Y * h)
            }
            LayoutMode::Tight => {
                let pad = TIGHT_PAD_PT * ppt;
                let (labels_left, labels_right) =
                    self.panels.iter().fold((0.0_f64, 0.0_f64), |acc, p| {
                        let (l, r, _, _) = p.label_margins(ppt);
                        (acc.0.max(l), acc.1.max(r))
                    });
                let top = if self.suptitle.is_some() {
                    2.0 * pad + suptitle_height
                } else {
                    pad
                };
                // Ticks and labels under the colour bar stay on the figure
                let decoration = self
                    .colorbar
                    .as_ref()
                    .map_or(0.0, |colorbar| colorbar.decoration_height(ppt));
                (pad + labels_left, pad + labels_right, top, pad + decoration, pad)
            }
        };

        let area = PixelRect::new(left, top, w - left - right, h - top - bottom);
        if area.width <= 0.0 || area.height <= 0.0 {
            return Err(CartoError::Render {
                message: format!(
                    "Figure of {}x{} pixels is too small for its margins",
                    width, height
                ),
            });
        }

        let panels_height = match &self.colorbar {
            Some(colorbar) => {
                let config = colorbar.config();
                area.height * (1.0 - config.fraction - config.pad)
            }
            None => area.height,
        };

        let n = self.panels.len();
        let (slot, gap) = match self.layout {
            LayoutMode::SubplotParams => {
                let slot = panels_height / (n as f64 + SUBPLOT_HSPACE * n.saturating_sub(1) as f64);
                (slot, SUBPLOT_HSPACE * slot)
            }
            LayoutMode::Tight => {
                let gap = TIGHT_PAD_PT * ppt;
                ((panels_height - gap * n.saturating_sub(1) as f64) / n.max(1) as f64, gap)
            }
        };

        let mut frames = Vec::with_capacity(n);
        for (i, panel) in self.panels.iter().enumerate() {
            let slot_y = area.y + i as f64 * (slot + gap);
            let (_, _, labels_top, labels_bottom) = panel.label_margins(ppt);
            let title = panel.title_height(ppt);
            let bbox = PixelRect::new(
                area.x,
                slot_y + title + labels_top,
                area.width,
                slot - title - labels_top - labels_bottom,
            );
            if bbox.height <= 1.0 {
                return Err(CartoError::Render {
                    message: format!("No room left for panel {} at {} dpi", i, self.dpi),
                });
            }

            let aspect = panel.projection().aspect_ratio();
            let frame_width = bbox.width.min(bbox.height * aspect);
            let frame_height = frame_width / aspect;
            frames.push(MapFrame::new(
                panel.projection(),
                PixelRect::new(
                    bbox.center_x() - frame_width / 2.0,
                    bbox.y + (bbox.height - frame_height) / 2.0,
                    frame_width,
                    frame_height,
                ),
            ));
        }

        let colorbar = self.colorbar.as_ref().map(|colorbar| {
            let config = colorbar.config();
            let (x0, x1) = colorbar
                .span()
                .iter()
                .filter_map(|handle| frames.get(handle.0))
                .fold((f64::INFINITY, f64::NEG_INFINITY), |acc, frame| {
                    (acc.0.min(frame.rect().x), acc.1.max(frame.rect().right()))
                });
            let (x0, x1) = if x0 < x1 { (x0, x1) } else { (area.x, area.right()) };

            let length = config.shrink * (x1 - x0);
            let thickness = (length / config.aspect).min(config.fraction * area.height);
            PixelRect::new(
                (x0 + x1) / 2.0 - length / 2.0,
                area.y + panels_height + config.pad * area.height,
                length,
                thickness,
            )
        });

        Ok(FigureLayout {
            frames,
            colorbar,
            suptitle_y,
        })
    }

    /// Draw the whole figure onto a fresh canvas
    pub fn render(&self) -> Result<Canvas> {
        let (width, height) = self.pixel_size();
        let ppt = self.px_per_pt();
        let layout = self.compute_layout()?;
        let mut canvas = Canvas::new(width, height, self.background)?;

        for (index, (panel, frame)) in self.panels.iter().zip(&layout.frames).enumerate() {
            debug!(
                panel = index,
                projection = %panel.projection(),
                layers = panel.layers().len(),
                "Rendering panel"
            );
            panel.render(&mut canvas, frame, ppt)?;
        }

        if let Some(suptitle) = &self.suptitle {
            draw_text(
                &mut canvas,
                &suptitle.text,
                width as f64 / 2.0,
                layout.suptitle_y,
                &suptitle.style,
                ppt,
                HAlign::Center,
                VAlign::Top,
            );
        }

        if let (Some(colorbar), Some(rect)) = (&self.colorbar, layout.colorbar) {
            colorbar.render(&mut canvas, rect, ppt);
        }

        Ok(canvas)
    }

    /// Render and write a PNG; returns the saved pixel size
    pub fn savefig(&self, path: &Path, options: &SaveOptions) -> Result<(u32, u32)> {
        let mut canvas = self.render()?;
        if options.tight_bbox {
            let pad = (options.pad_inches * self.dpi as f64).round().max(0.0) as u32;
            canvas = crop_to_content(&canvas, self.background, pad)?;
        }

        let image = canvas.to_image();
        write_png(path, &image, self.dpi)?;

        info!(
            path = %path.display(),
            width = image.width(),
            height = image.height(),
            dpi = self.dpi,
            "Figure saved"
        );

        Ok(image.dimensions())
    }

    /// Display the figure. Rendering here is file-based only, so there is
    /// no window to open.
    pub fn show(&self) {
        debug!(panels = self.panels.len(), "No interactive display available, skipping show");
    }
}

fn unknown_panel(handle: PanelHandle) -> CartoError {
    CartoError::InvalidParameter {
        param: "panel".to_string(),
        message: format!("No panel with index {}", handle.0),
    }
}

/// Crop to the bounding box of non-background pixels plus `pad` pixels
pub fn crop_to_content(canvas: &Canvas, background: Color, pad: u32) -> Result<Canvas> {
    match canvas.content_bounds(background) {
        Some((x0, y0, x1, y1)) => {
            let left = x0.saturating_sub(pad);
            let top = y0.saturating_sub(pad);
            let right = (x1 + 1 + pad).min(canvas.width());
            let bottom = (y1 + 1 + pad).min(canvas.height());
            canvas.crop(left, top, right - left, bottom - top)
        }
        None => Ok(canvas.clone()),
    }
}

/// Pixels per metre for a resolution in dots per inch
pub fn pixels_per_meter(dpi: u32) -> u32 {
    (dpi as f64 / METERS_PER_INCH).round() as u32
}

/// Encode an 8-bit RGBA PNG whose `pHYs` chunk records `dpi`
pub fn write_png(path: &Path, image: &RgbaImage, dpi: u32) -> Result<()> {
    let writer = BufWriter::new(File::create(path)?);
    let mut encoder = png::Encoder::new(writer, image.width(), image.height());
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    let ppm = pixels_per_meter(dpi);
    encoder.set_pixel_dims(Some(png::PixelDimensions {
        xppu: ppm,
        yppu: ppm,
        unit: png::Unit::Meter,
    }));

    let mut writer = encoder.write_header()?;
    writer.write_image_data(image.as_raw())?;
    writer.finish()?;
    Ok(())
}
