//! Integration tests for cartocompare
//!
//! These tests run the whole pipeline at low resolution and check the
//! written image, plus the invariants shared by both maps.

mod common;

use cartocompare::comparison::{compose_figure, COLORBAR_LABEL};
use cartocompare::config::{Args, Config, RenderConfig};
use cartocompare::geodata::GeoFeatures;
use cartocompare::grid::{deterministic_anomaly, make_rng, AnomalyField, Grid};
use cartocompare::interpolation::get_interpolator;
use cartocompare::{run, CartoError, MapProjection};
use common::assertions::{assert_approx_eq, assert_in_range, assert_point_approx_eq};
use common::{image_utils, test_data};
use image::ImageFormat;
use pretty_assertions::assert_eq;

#[test]
fn test_run_writes_single_png() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_data::low_res_config(dir.path(), "comparaison_projections.png", Some(42));

    let summary = run(&config).unwrap();
    assert_eq!(summary.output, dir.path().join("comparaison_projections.png"));

    // Exactly one file, non-empty, a PNG
    let entries: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
    assert_eq!(entries.len(), 1);
    assert!(std::fs::metadata(&summary.output).unwrap().len() > 0);
    assert_eq!(image_utils::detect_file_format(&summary.output), Some(ImageFormat::Png));

    // Cropped to content: never larger than 18 x 14 inches at the test dpi
    let image = image_utils::load_image(&summary.output).unwrap();
    assert_eq!((image.width(), image.height()), (summary.width, summary.height));
    assert!(image.width() <= 18 * test_data::TEST_DPI);
    assert!(image.height() <= 14 * test_data::TEST_DPI);
    assert!(image_utils::ink_fraction(&image) > 0.3);

    // The output resolution travels with the file
    let dpi = image_utils::png_dpi(&summary.output).unwrap();
    assert_approx_eq(dpi, test_data::TEST_DPI as f64, Some(0.05));
}

#[test]
fn test_both_maps_are_shaded() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_data::low_res_config(dir.path(), "maps.png", Some(1));
    run(&config).unwrap();

    let image = image_utils::load_image(&config.render.output).unwrap();
    let half = image.height() / 2;
    assert!(image_utils::has_colour_in_rows(&image, 0, half));
    assert!(image_utils::has_colour_in_rows(&image, half, image.height()));
}

#[test]
fn test_seeded_runs_are_identical() {
    let dir = tempfile::tempdir().unwrap();
    let first = test_data::low_res_config(dir.path(), "first.png", Some(2024));
    let second = test_data::low_res_config(dir.path(), "second.png", Some(2024));
    run(&first).unwrap();
    run(&second).unwrap();

    let a = image_utils::load_image(&first.render.output).unwrap();
    let b = image_utils::load_image(&second.render.output).unwrap();
    image_utils::assert_images_approx_eq(&a, &b, Some(0)).unwrap();
}

#[test]
fn test_unseeded_fields_differ() {
    let grid = Grid::global();
    let a = AnomalyField::generate(&grid, &mut make_rng(None));
    let b = AnomalyField::generate(&grid, &mut make_rng(None));
    assert_ne!(a.values(), b.values());
}

#[test]
fn test_field_invariants() {
    let grid = Grid::global();
    let field = AnomalyField::generate(&grid, &mut make_rng(Some(5)));
    assert_eq!(field.shape(), (180, 360));
    assert_eq!(grid.lon_mesh().dim(), field.shape());

    // Pole example without noise
    assert_approx_eq(deterministic_anomaly(0.0, 90.0), 5.0, Some(1e-12));

    // Noise is small: the field stays near its deterministic part
    let (min, max) = field.min_max();
    assert_in_range(min as f64, 2.5 - 2.0, 2.5);
    assert_in_range(max as f64, 5.0, 5.0 + 2.0);
}

#[test]
fn test_field_sampling_matches_formula() {
    let grid = Grid::new(361, 181).unwrap();
    let field = AnomalyField::deterministic(&grid);
    let bilinear = get_interpolator("bilinear").unwrap();

    for (lon, lat) in [(-80.0, 10.0), (20.0, -20.0), (100.0, 50.0), (-100.0, 60.0)] {
        let sampled = field.sample(lon, lat, bilinear.as_ref()).unwrap();
        assert_approx_eq(sampled as f64, deterministic_anomaly(lon, lat), Some(1e-4));
    }
}

#[test]
fn test_projections_round_trip() {
    for (lon, lat) in [(0.0, 0.0), (-100.0, 60.0), (170.0, -75.0)] {
        let (x, y) = MapProjection::Robinson.forward(lon, lat);
        let back = MapProjection::Robinson.inverse(x, y).unwrap();
        assert_point_approx_eq(back, (lon, lat), Some(1e-6));
        assert_eq!(MapProjection::PlateCarree.forward(lon, lat), (lon, lat));
    }
}

#[test]
fn test_composed_figure_structure() {
    let grid = Grid::new(72, 36).unwrap();
    let field = AnomalyField::generate(&grid, &mut make_rng(Some(3)));
    let config = RenderConfig {
        dpi: test_data::TEST_DPI,
        ..RenderConfig::default()
    };
    let comparison = compose_figure(&field, GeoFeatures::builtin(), &config).unwrap();
    let figure = &comparison.figure;

    let projections: Vec<MapProjection> = figure.panels().iter().map(|p| p.projection()).collect();
    assert_eq!(projections, vec![MapProjection::PlateCarree, MapProjection::Robinson]);

    // Same markers, in the same order, on both maps
    let a = figure.panel(comparison.plate_carree).unwrap();
    let b = figure.panel(comparison.robinson).unwrap();
    assert_eq!(a.markers(), b.markers());
    assert_eq!(a.markers().len(), 4);

    // One legend, for the Robinson contour, laid out under both maps
    let colorbar = figure.colorbar().unwrap();
    assert_eq!(colorbar.source(), comparison.robinson);
    assert_eq!(colorbar.label(), COLORBAR_LABEL);
    assert_eq!(colorbar.ticks(), vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0]);
}

#[test]
fn test_geojson_overrides() {
    let dir = tempfile::tempdir().unwrap();
    let land = test_data::write_land_geojson(dir.path()).unwrap();
    let borders = test_data::write_borders_geojson(dir.path()).unwrap();

    let features = GeoFeatures::load(Some(land.as_path()), Some(borders.as_path())).unwrap();
    assert_eq!(features.land().len(), 1);
    assert_eq!(features.borders().len(), 2);
    assert!(features.contains_land(0.0, 0.0));
    assert!(!features.contains_land(100.0, 50.0));

    let mut config = test_data::low_res_config(dir.path(), "custom.png", Some(9));
    config.geo.land = Some(land);
    config.geo.borders = Some(borders);
    assert!(run(&config).unwrap().output.exists());
}

#[test]
fn test_invalid_configurations() {
    let args = Args {
        dpi: Some(5),
        ..Args::default()
    };
    let config = Config::from_args(args).unwrap();
    assert!(matches!(config.validate(), Err(CartoError::Config { .. })));

    let args = Args {
        log_level: Some("loud".to_string()),
        ..Args::default()
    };
    assert!(Config::from_args(args).unwrap().validate().is_err());
}

#[test]
fn test_unwritable_output_fails() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_data::low_res_config(&dir.path().join("missing"), "out.png", Some(1));
    assert!(run(&config).is_err());
    assert!(!config.render.output.exists());
}
