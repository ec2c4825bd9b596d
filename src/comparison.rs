//! The two-panel projection comparison.
//!
//! One anomaly field is drawn twice, on an equirectangular map and on a
//! Robinson map, with identical base layers, colour scale, gridlines and
//! reference zones. A single colour bar under both maps serves as the legend.

use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};

use crate::annotation::{annotate_zones, EXAMPLE_ZONES};
use crate::colormaps::{get_colormap, ColorScale, ContourLevels};
use crate::config::{Config, RenderConfig};
use crate::error::Result;
use crate::geodata::GeoFeatures;
use crate::grid::{make_rng, AnomalyField, Grid};
use crate::interpolation::get_interpolator;
use crate::logging::log_timed_operation;
use crate::projection::MapProjection;
use crate::render::{
    Color, ColorbarConfig, ContourLayer, Figure, Gridlines, LabelSides, Layer, LineStyle, Panel,
    PanelHandle, SaveOptions, TextStyle,
};

pub const SUPTITLE: &str = "Impact des Projections Cartographiques sur l'Analyse Climatologique";

pub const TITLE_PLATE_CARREE: &str = "Projection PlateCarree (Cylindrique Équirectangulaire)\n\
     /!\\ Distorsions importantes aux hautes latitudes - Groenland surdimensionné";

pub const TITLE_ROBINSON: &str = "Projection Robinson (Pseudo-Cylindrique)\n\
     [OK] Compromis optimal - Préserve mieux les surfaces et formes";

pub const COLORBAR_LABEL: &str = "Anomalie de température moyenne (°C) - Scénario SSP5-8.5";

/// Display range and band count shared by both contour layers
pub const VMIN: f32 = 0.0;
pub const VMAX: f32 = 5.0;
pub const LEVELS: usize = 15;
pub const CONTOUR_ALPHA: f32 = 0.75;

const DARK_RED: Color = [139, 0, 0, 255];
const DARK_GREEN: Color = [0, 100, 0, 255];
const LIGHT_GRAY: Color = [211, 211, 211, 255];
const GRAY: Color = [128, 128, 128, 255];
const OCEAN_BLUE: Color = [230, 242, 255, 255];
const BLACK: Color = [0, 0, 0, 255];

const TITLE_PAD_PT: f64 = 15.0;

/// A composed comparison figure and the handles of its two maps
#[derive(Debug)]
pub struct Comparison {
    pub figure: Figure,
    pub plate_carree: PanelHandle,
    pub robinson: PanelHandle,
}

/// Outcome of a completed run
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub output: PathBuf,
    /// Saved image size in pixels
    pub width: u32,
    pub height: u32,
    /// Smallest and largest anomaly of the generated field
    pub value_range: (f32, f32),
}

/// The colour scale both maps and the colour bar share
pub fn anomaly_scale(colormap: &str) -> Result<ColorScale> {
    let colormap = get_colormap(colormap)?;
    let levels = ContourLevels::new(VMIN, VMAX, LEVELS)?;
    Ok(ColorScale::new(colormap.as_ref(), levels, CONTOUR_ALPHA))
}

/// Land, ocean, coastlines and borders, in that order
pub fn add_base_features(panel: &mut Panel, features: &Arc<GeoFeatures>) {
    panel.add_layer(Layer::Land {
        features: Arc::clone(features),
        facecolor: LIGHT_GRAY,
        edge: Some(LineStyle::solid(BLACK, 0.3)),
    });
    panel.add_layer(Layer::Ocean {
        features: Arc::clone(features),
        facecolor: OCEAN_BLUE,
    });
    panel.add_layer(Layer::Coastline {
        features: Arc::clone(features),
        style: LineStyle::solid(BLACK, 0.5),
    });
    panel.add_layer(Layer::Borders {
        features: Arc::clone(features),
        style: LineStyle::solid(GRAY, 0.3).alpha(0.5),
    });
}

#[allow(clippy::too_many_arguments)]
fn draw_map(
    panel: &mut Panel,
    title: &str,
    title_color: Color,
    features: &Arc<GeoFeatures>,
    field: &AnomalyField,
    scale: &ColorScale,
    interpolation: &str,
    labels: LabelSides,
) -> Result<()> {
    panel.set_title(title, TextStyle::new(13.0).bold().color(title_color), TITLE_PAD_PT);

    add_base_features(panel, features);

    panel.add_layer(Layer::FilledContour(ContourLayer::from_field(
        field,
        scale.clone(),
        interpolation,
    )?));

    let gridlines = Gridlines::new(LineStyle::solid(GRAY, 0.5).alpha(0.5).dashed()).labels(labels);
    panel.add_layer(Layer::Gridlines(gridlines));

    annotate_zones(panel, &EXAMPLE_ZONES);
    Ok(())
}

/// Build the full figure for one field
pub fn compose_figure(
    field: &AnomalyField,
    features: Arc<GeoFeatures>,
    config: &RenderConfig,
) -> Result<Comparison> {
    let mut figure = Figure::new(config.width_in as f64, config.height_in as f64, config.dpi)?;
    figure.suptitle(SUPTITLE, TextStyle::new(18.0).bold());

    let scale = anomaly_scale(&config.colormap)?;

    // Top: equirectangular, labelled on the left and bottom edges only
    let plate_carree = figure.add_panel(MapProjection::PlateCarree);
    draw_map(
        figure.panel_mut(plate_carree)?,
        TITLE_PLATE_CARREE,
        DARK_RED,
        &features,
        field,
        &scale,
        &config.interpolation,
        LabelSides {
            left: true,
            bottom: true,
            ..LabelSides::none()
        },
    )?;

    // Bottom: Robinson, unlabeled gridlines
    let robinson = figure.add_panel(MapProjection::Robinson);
    draw_map(
        figure.panel_mut(robinson)?,
        TITLE_ROBINSON,
        DARK_GREEN,
        &features,
        field,
        &scale,
        &config.interpolation,
        LabelSides::none(),
    )?;

    let colorbar = ColorbarConfig::default()
        .pad(0.05)
        .shrink(0.6)
        .aspect(30.0)
        .label(COLORBAR_LABEL, TextStyle::new(12.0).bold());
    figure.add_colorbar(robinson, &[plate_carree, robinson], colorbar)?;

    figure.tight_layout();

    Ok(Comparison {
        figure,
        plate_carree,
        robinson,
    })
}

/// Generate the field, draw both maps and save the figure
pub fn run(config: &Config) -> Result<RunSummary> {
    let grid = Grid::global();
    let mut rng = make_rng(config.data.seed);
    let field = log_timed_operation("generate_anomaly", || AnomalyField::generate(&grid, &mut rng));

    let (min, max) = field.min_max();
    info!(
        rows = field.shape().0,
        cols = field.shape().1,
        min = min,
        max = max,
        seeded = config.data.seed.is_some(),
        "Generated anomaly field"
    );

    let interpolator = get_interpolator(&config.render.interpolation)?;
    for zone in &EXAMPLE_ZONES {
        let anomaly = field.sample(zone.lon, zone.lat, interpolator.as_ref())?;
        debug!(
            zone = %zone.label.replace('\n', " "),
            lon = zone.lon,
            lat = zone.lat,
            anomaly,
            "Reference zone"
        );
    }

    let features = GeoFeatures::load(config.geo.land.as_deref(), config.geo.borders.as_deref())?;
    let comparison = compose_figure(&field, features, &config.render)?;

    let options = SaveOptions {
        tight_bbox: true,
        pad_inches: 0.1,
    };
    let (width, height) = log_timed_operation("savefig", || {
        comparison.figure.savefig(&config.render.output, &options)
    })?;

    comparison.figure.show();

    Ok(RunSummary {
        output: config.render.output.clone(),
        width,
        height,
        value_range: (min, max),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn low_res() -> RenderConfig {
        RenderConfig {
            dpi: 20,
            ..RenderConfig::default()
        }
    }

    fn compose() -> Comparison {
        let grid = Grid::new(72, 36).unwrap();
        let field = AnomalyField::generate(&grid, &mut make_rng(Some(7)));
        compose_figure(&field, GeoFeatures::builtin(), &low_res()).unwrap()
    }

    #[test]
    fn test_panels_and_projections() {
        let comparison = compose();
        let figure = &comparison.figure;
        assert_eq!(figure.panels().len(), 2);
        assert_eq!(
            figure.panel(comparison.plate_carree).unwrap().projection(),
            MapProjection::PlateCarree
        );
        assert_eq!(
            figure.panel(comparison.robinson).unwrap().projection(),
            MapProjection::Robinson
        );
        assert_eq!(figure.suptitle_text(), Some(SUPTITLE));
    }

    #[test]
    fn test_single_shared_colorbar() {
        let comparison = compose();
        let colorbar = comparison.figure.colorbar().unwrap();
        assert_eq!(colorbar.source(), comparison.robinson);
        assert_eq!(colorbar.span(), &[comparison.plate_carree, comparison.robinson]);
        assert_eq!(colorbar.label(), COLORBAR_LABEL);

        // Both maps use exactly the scale the colour bar shows
        for panel in comparison.figure.panels() {
            assert_eq!(panel.contour().unwrap().scale(), colorbar.scale());
        }
    }

    #[test]
    fn test_layer_order() {
        let comparison = compose();
        let panel = comparison.figure.panel(comparison.plate_carree).unwrap();
        let kinds: Vec<&str> = panel
            .layers()
            .iter()
            .take(6)
            .map(|layer| match layer {
                Layer::Land { .. } => "land",
                Layer::Ocean { .. } => "ocean",
                Layer::Coastline { .. } => "coastline",
                Layer::Borders { .. } => "borders",
                Layer::FilledContour(_) => "contour",
                Layer::Gridlines(_) => "gridlines",
                Layer::Marker(_) => "marker",
                Layer::Text(_) => "text",
            })
            .collect();
        assert_eq!(
            kinds,
            vec!["land", "ocean", "coastline", "borders", "contour", "gridlines"]
        );
    }

    #[test]
    fn test_gridline_labels_only_on_plate_carree() {
        let comparison = compose();
        let figure = &comparison.figure;
        let margins = |handle| figure.panel(handle).unwrap().label_margins(1.0);

        let (left, right, top, bottom) = margins(comparison.plate_carree);
        assert!(left > 0.0 && bottom > 0.0);
        assert_eq!((right, top), (0.0, 0.0));
        assert_eq!(margins(comparison.robinson), (0.0, 0.0, 0.0, 0.0));
    }

    #[test]
    fn test_marker_parity() {
        let comparison = compose();
        let a = comparison.figure.panel(comparison.plate_carree).unwrap();
        let b = comparison.figure.panel(comparison.robinson).unwrap();
        assert_eq!(a.markers(), b.markers());
        assert_eq!(a.text_labels(), b.text_labels());
        assert_eq!(a.markers().len(), 4);
    }

    #[test]
    fn test_zone_labels_clear_their_markers() {
        let grid = Grid::new(72, 36).unwrap();
        let field = AnomalyField::deterministic(&grid);
        let config = RenderConfig {
            dpi: 100,
            ..RenderConfig::default()
        };
        let comparison = compose_figure(&field, GeoFeatures::builtin(), &config).unwrap();
        let figure = &comparison.figure;
        let layout = figure.compute_layout().unwrap();
        let ppt = figure.px_per_pt();

        for (panel, frame) in figure.panels().iter().zip(&layout.frames) {
            let markers = panel.markers();
            let labels = panel.text_labels();
            assert_eq!(markers.len(), labels.len());
            for (marker, label) in markers.iter().zip(&labels) {
                let disc = marker.pixel_bounds(frame, ppt).unwrap();
                let text_box = label.pixel_bounds(frame, ppt).unwrap();
                assert!(
                    text_box.y > disc.bottom(),
                    "{:?} label box at {} covers its marker ending at {} on {}",
                    label.text,
                    text_box.y,
                    disc.bottom(),
                    panel.projection()
                );
            }
        }
    }

    #[test]
    fn test_unknown_colormap_fails() {
        let grid = Grid::new(8, 4).unwrap();
        let field = AnomalyField::deterministic(&grid);
        let config = RenderConfig {
            colormap: "nope".to_string(),
            ..low_res()
        };
        assert!(compose_figure(&field, GeoFeatures::builtin(), &config).is_err());
    }

    #[test]
    fn test_run_writes_png() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.render.output = dir.path().join("comparaison_projections.png");
        config.render.dpi = 20;
        config.data.seed = Some(42);

        let summary = run(&config).unwrap();
        assert!(summary.output.exists());
        assert!(summary.width > 0 && summary.width <= 360);
        assert!(summary.height > 0 && summary.height <= 280);
        assert!(summary.value_range.0 < summary.value_range.1);
    }
}
