//! Horizontal colour bar shared by several panels.

use super::canvas::{Canvas, PixelRect, BLACK};
use super::figure::PanelHandle;
use super::text::{draw_text, measure, HAlign, TextStyle, VAlign};
use crate::colormaps::ColorScale;

const OUTLINE_PT: f64 = 0.8;
const TICK_LENGTH_PT: f64 = 3.5;
const TICK_PAD_PT: f64 = 3.5;
const LABEL_PAD_PT: f64 = 4.0;

/// Placement and labelling of a colour bar.
///
/// `fraction` and `pad` are shares of the height of the area the bar is
/// carved from; `shrink` scales its length relative to the spanned panels
/// and `aspect` is length over thickness.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorbarConfig {
    pub fraction: f64,
    pub pad: f64,
    pub shrink: f64,
    pub aspect: f64,
    pub label: String,
    pub label_style: TextStyle,
    pub tick_style: TextStyle,
}

impl Default for ColorbarConfig {
    fn default() -> Self {
        Self {
            fraction: 0.15,
            pad: 0.05,
            shrink: 1.0,
            aspect: 20.0,
            label: String::new(),
            label_style: TextStyle::new(10.0),
            tick_style: TextStyle::new(10.0),
        }
    }
}

impl ColorbarConfig {
    pub fn shrink(mut self, shrink: f64) -> Self {
        self.shrink = shrink;
        self
    }

    pub fn aspect(mut self, aspect: f64) -> Self {
        self.aspect = aspect;
        self
    }

    pub fn pad(mut self, pad: f64) -> Self {
        self.pad = pad;
        self
    }

    pub fn label(mut self, label: &str, style: TextStyle) -> Self {
        self.label = label.to_string();
        self.label_style = style;
        self
    }
}

/// A colour bar bound to the colour scale of one panel's contour layer
#[derive(Debug, Clone)]
pub struct Colorbar {
    scale: ColorScale,
    config: ColorbarConfig,
    source: PanelHandle,
    span: Vec<PanelHandle>,
}

impl Colorbar {
    pub(crate) fn new(
        scale: ColorScale,
        config: ColorbarConfig,
        source: PanelHandle,
        span: Vec<PanelHandle>,
    ) -> Self {
        Self {
            scale,
            config,
            source,
            span,
        }
    }

    pub fn scale(&self) -> &ColorScale {
        &self.scale
    }

    pub fn config(&self) -> &ColorbarConfig {
        &self.config
    }

    pub fn label(&self) -> &str {
        &self.config.label
    }

    /// Panel whose contour layer the bar describes
    pub fn source(&self) -> PanelHandle {
        self.source
    }

    /// Panels the bar is laid out under
    pub fn span(&self) -> &[PanelHandle] {
        &self.span
    }

    pub fn ticks(&self) -> Vec<f32> {
        self.scale.levels().integer_ticks()
    }

    /// Space below the bar taken by ticks, tick labels and the label
    pub fn decoration_height(&self, px_per_pt: f64) -> f64 {
        let tick_labels = measure("0", &self.config.tick_style, px_per_pt).1 as f64;
        let label = if self.config.label.is_empty() {
            0.0
        } else {
            let (_, height) = measure(&self.config.label, &self.config.label_style, px_per_pt);
            LABEL_PAD_PT * px_per_pt + height as f64
        };
        (TICK_LENGTH_PT + TICK_PAD_PT) * px_per_pt + tick_labels + label
    }

    pub fn render(&self, canvas: &mut Canvas, rect: PixelRect, px_per_pt: f64) {
        let levels = self.scale.levels();
        let bands = levels.bands();
        let span = levels.vmax() - levels.vmin();
        let range = span as f64;
        let step = rect.width / bands as f64;

        // Band edges on whole pixels so neighbours meet without a seam
        let edge = |band: usize| (rect.x + band as f64 * step).round();
        for band in 0..bands {
            let value = levels.vmin() + (band as f32 + 0.5) * span / bands as f32;
            let (x0, x1) = (edge(band), edge(band + 1));
            let swatch = PixelRect::new(x0, rect.y, x1 - x0, rect.height);
            canvas.fill_rect(swatch, self.scale.color_for(value));
        }
        canvas.stroke_rect(rect, OUTLINE_PT * px_per_pt, BLACK);

        let tick_bottom = rect.bottom() + TICK_LENGTH_PT * px_per_pt;
        for tick in self.ticks() {
            let x = rect.x + (tick - levels.vmin()) as f64 / range * rect.width;
            let tick_rect = PixelRect::new(
                x - OUTLINE_PT * px_per_pt / 2.0,
                rect.bottom(),
                (OUTLINE_PT * px_per_pt).max(1.0),
                TICK_LENGTH_PT * px_per_pt,
            );
            canvas.fill_rect(tick_rect, BLACK);
            draw_text(
                canvas,
                &format!("{}", tick),
                x,
                tick_bottom + TICK_PAD_PT * px_per_pt,
                &self.config.tick_style,
                px_per_pt,
                HAlign::Center,
                VAlign::Top,
            );
        }

        if !self.config.label.is_empty() {
            let tick_labels = measure("0", &self.config.tick_style, px_per_pt).1 as f64;
            draw_text(
                canvas,
                &self.config.label,
                rect.center_x(),
                tick_bottom + TICK_PAD_PT * px_per_pt + tick_labels + LABEL_PAD_PT * px_per_pt,
                &self.config.label_style,
                px_per_pt,
                HAlign::Center,
                VAlign::Top,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colormaps::{get_colormap, ContourLevels};
    use crate::render::canvas::WHITE;

    fn colorbar(label: &str) -> Colorbar {
        let colormap = get_colormap("rdylbu_r").unwrap();
        let levels = ContourLevels::new(0.0, 5.0, 15).unwrap();
        let scale = ColorScale::new(colormap.as_ref(), levels, 0.75);
        let config = ColorbarConfig::default()
            .shrink(0.6)
            .aspect(30.0)
            .label(label, TextStyle::new(12.0).bold());
        Colorbar::new(scale, config, PanelHandle(1), vec![PanelHandle(0), PanelHandle(1)])
    }

    #[test]
    fn test_ticks_are_integers() {
        assert_eq!(colorbar("").ticks(), vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0]);
    }

    #[test]
    fn test_label_adds_height() {
        assert!(colorbar("Anomalie").decoration_height(1.0) > colorbar("").decoration_height(1.0));
    }

    #[test]
    fn test_render_bands_low_to_high() {
        let bar = colorbar("T");
        let mut canvas = Canvas::new(320, 80, WHITE).unwrap();
        let rect = PixelRect::new(10.0, 5.0, 300.0, 10.0);
        bar.render(&mut canvas, rect, 1.0);

        let cold = canvas.pixel(20, 10).unwrap();
        let warm = canvas.pixel(300, 10).unwrap();
        assert!(cold[2] > cold[0], "left end should be blue: {:?}", cold);
        assert!(warm[0] > warm[2], "right end should be red: {:?}", warm);

        // Tick labels and the label sit below the bar
        let below = (21..80).any(|y| (0..320).any(|x| canvas.pixel(x, y) != Some(WHITE)));
        assert!(below);
    }

    #[test]
    fn test_span_and_source() {
        let bar = colorbar("");
        assert_eq!(bar.source(), PanelHandle(1));
        assert_eq!(bar.span().len(), 2);
        assert_eq!(bar.config().shrink, 0.6);
    }
}
