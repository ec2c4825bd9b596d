//! Synthetic longitude/latitude grid and temperature-anomaly field.
//!
//! The anomaly at each grid cell is
//!
//! ```text
//! anomaly(lon, lat) = 2.5 * (1 + 0.8 * |sin(lat)|)     polar amplification
//!                   + 0.5 * cos(lon) * sin(lat)         longitudinal structure
//!                   + 0.3 * N(0, 1)                     natural variability
//! ```
//!
//! The random source is injected, so a seeded generator reproduces a field
//! exactly while the default entropy-seeded one gives a new field per run.

use ndarray::{Array1, Array2, ArrayView1, ArrayView2};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;

use crate::error::{CartoError, Result};
use crate::interpolation::{common, Interpolator};

/// Number of longitude samples of the global grid
pub const N_LON: usize = 360;

/// Number of latitude samples of the global grid
pub const N_LAT: usize = 180;

/// Standard deviation of the per-cell noise term
pub const NOISE_AMPLITUDE: f64 = 0.3;

/// A regular longitude/latitude grid and its 2D coordinate mesh.
///
/// Rows follow latitude (south to north), columns follow longitude (west to
/// east).
#[derive(Debug, Clone)]
pub struct Grid {
    lons: Array1<f64>,
    lats: Array1<f64>,
    lon_mesh: Array2<f64>,
    lat_mesh: Array2<f64>,
}

impl Grid {
    /// The 360 x 180 grid covering the whole globe
    pub fn global() -> Self {
        Self::build(N_LON, N_LAT)
    }

    /// A global grid with custom sample counts
    pub fn new(n_lon: usize, n_lat: usize) -> Result<Self> {
        if n_lon < 2 || n_lat < 2 {
            return Err(CartoError::InvalidParameter {
                param: "grid".to_string(),
                message: format!(
                    "Grid needs at least 2 samples per axis, got {}x{}",
                    n_lon, n_lat
                ),
            });
        }
        Ok(Self::build(n_lon, n_lat))
    }

    fn build(n_lon: usize, n_lat: usize) -> Self {
        let lons = Array1::linspace(-180.0, 180.0, n_lon);
        let lats = Array1::linspace(-90.0, 90.0, n_lat);

        let lon_mesh = Array2::from_shape_fn((n_lat, n_lon), |(_, i)| lons[i]);
        let lat_mesh = Array2::from_shape_fn((n_lat, n_lon), |(j, _)| lats[j]);

        Self {
            lons,
            lats,
            lon_mesh,
            lat_mesh,
        }
    }

    /// Shape of the mesh as (latitudes, longitudes)
    pub fn shape(&self) -> (usize, usize) {
        (self.lats.len(), self.lons.len())
    }

    pub fn lons(&self) -> ArrayView1<'_, f64> {
        self.lons.view()
    }

    pub fn lats(&self) -> ArrayView1<'_, f64> {
        self.lats.view()
    }

    /// Longitude component of the mesh
    pub fn lon_mesh(&self) -> ArrayView2<'_, f64> {
        self.lon_mesh.view()
    }

    /// Latitude component of the mesh
    pub fn lat_mesh(&self) -> ArrayView2<'_, f64> {
        self.lat_mesh.view()
    }
}

/// Polar amplification term: grows toward both poles
pub fn polar_amplification(lat: f64) -> f64 {
    2.5 * (1.0 + 0.8 * lat.to_radians().sin().abs())
}

/// Longitudinal structure coupled to the hemisphere sign
pub fn longitudinal_structure(lon: f64, lat: f64) -> f64 {
    0.5 * lon.to_radians().cos() * lat.to_radians().sin()
}

/// Anomaly without its noise term
pub fn deterministic_anomaly(lon: f64, lat: f64) -> f64 {
    polar_amplification(lat) + longitudinal_structure(lon, lat)
}

/// Create the random source for the noise term.
///
/// With a seed the field is reproducible; without one every run differs.
pub fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Temperature anomaly values (degrees) on a grid.
#[derive(Debug, Clone)]
pub struct AnomalyField {
    lons: Vec<f64>,
    lats: Vec<f64>,
    values: Array2<f32>,
}

impl AnomalyField {
    /// Generate the full field, drawing one noise sample per cell in
    /// row-major order.
    pub fn generate<R: Rng>(grid: &Grid, rng: &mut R) -> Self {
        let lon_mesh = grid.lon_mesh();
        let lat_mesh = grid.lat_mesh();

        let values = Array2::from_shape_fn(grid.shape(), |idx| {
            let noise: f64 = rng.sample(StandardNormal);
            let base = deterministic_anomaly(lon_mesh[idx], lat_mesh[idx]);
            (base + NOISE_AMPLITUDE * noise) as f32
        });

        Self::from_parts(grid, values)
    }

    /// The noise-free field
    pub fn deterministic(grid: &Grid) -> Self {
        let lon_mesh = grid.lon_mesh();
        let lat_mesh = grid.lat_mesh();

        let values = Array2::from_shape_fn(grid.shape(), |idx| {
            deterministic_anomaly(lon_mesh[idx], lat_mesh[idx]) as f32
        });

        Self::from_parts(grid, values)
    }

    /// Wrap externally computed values, checking them against the grid
    pub fn from_values(grid: &Grid, values: Array2<f32>) -> Result<Self> {
        if values.dim() != grid.shape() {
            return Err(CartoError::ShapeMismatch {
                expected: grid.shape(),
                actual: values.dim(),
            });
        }
        Ok(Self::from_parts(grid, values))
    }

    fn from_parts(grid: &Grid, values: Array2<f32>) -> Self {
        Self {
            lons: grid.lons().to_vec(),
            lats: grid.lats().to_vec(),
            values,
        }
    }

    /// Shape as (latitudes, longitudes)
    pub fn shape(&self) -> (usize, usize) {
        self.values.dim()
    }

    pub fn values(&self) -> ArrayView2<'_, f32> {
        self.values.view()
    }

    pub fn lons(&self) -> &[f64] {
        &self.lons
    }

    pub fn lats(&self) -> &[f64] {
        &self.lats
    }

    /// Smallest and largest finite values
    pub fn min_max(&self) -> (f32, f32) {
        self.values
            .iter()
            .filter(|v| v.is_finite())
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            })
    }

    /// Values flattened in row-major order
    pub fn to_flat(&self) -> Vec<f32> {
        self.values.iter().copied().collect()
    }

    /// Sample the field at an arbitrary point in degrees
    pub fn sample(&self, lon: f64, lat: f64, interpolator: &dyn Interpolator) -> Result<f32> {
        let (n_lat, n_lon) = self.shape();
        let i = common::coord_to_index(lon, &self.lons)?;
        let j = common::coord_to_index(lat, &self.lats)?;
        let flat = self.values.as_slice().ok_or_else(|| CartoError::Interpolation {
            message: "Anomaly values are not stored in row-major order".to_string(),
        })?;
        interpolator.interpolate(flat, &[n_lat, n_lon], &[j, i])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpolation::get_interpolator;

    #[test]
    fn test_global_grid_shape() {
        let grid = Grid::global();
        assert_eq!(grid.shape(), (180, 360));
        assert_eq!(grid.lon_mesh().dim(), (180, 360));
        assert_eq!(grid.lat_mesh().dim(), (180, 360));

        assert_eq!(grid.lons()[0], -180.0);
        assert!((grid.lons()[359] - 180.0).abs() < 1e-9);
        assert_eq!(grid.lats()[0], -90.0);
        assert!((grid.lats()[179] - 90.0).abs() < 1e-9);
    }

    #[test]
    fn test_mesh_layout() {
        let grid = Grid::new(4, 3).unwrap();
        // Longitude varies along columns, latitude along rows
        assert_eq!(grid.lon_mesh()[[0, 0]], -180.0);
        assert_eq!(grid.lon_mesh()[[2, 3]], 180.0);
        assert_eq!(grid.lat_mesh()[[0, 3]], -90.0);
        assert_eq!(grid.lat_mesh()[[1, 0]], 0.0);
        assert_eq!(grid.lat_mesh()[[2, 1]], 90.0);
    }

    #[test]
    fn test_invalid_grid() {
        assert!(Grid::new(1, 10).is_err());
        assert!(Grid::new(10, 0).is_err());
    }

    #[test]
    fn test_pole_example() {
        assert!((polar_amplification(90.0) - 4.5).abs() < 1e-12);
        assert!((longitudinal_structure(0.0, 90.0) - 0.5).abs() < 1e-12);
        assert!((deterministic_anomaly(0.0, 90.0) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_hemisphere_symmetry() {
        for lat in [10.0, 35.0, 60.0, 85.0] {
            assert!((polar_amplification(lat) - polar_amplification(-lat)).abs() < 1e-12);
            assert!(
                (longitudinal_structure(30.0, lat) + longitudinal_structure(30.0, -lat)).abs()
                    < 1e-12
            );
        }
        assert!((polar_amplification(0.0) - 2.5).abs() < 1e-12);
    }

    #[test]
    fn test_field_shape_matches_grid() {
        let grid = Grid::global();
        let mut rng = make_rng(Some(1));
        let field = AnomalyField::generate(&grid, &mut rng);
        assert_eq!(field.shape(), grid.shape());
    }

    #[test]
    fn test_seeded_generation_is_reproducible() {
        let grid = Grid::new(36, 18).unwrap();
        let a = AnomalyField::generate(&grid, &mut make_rng(Some(99)));
        let b = AnomalyField::generate(&grid, &mut make_rng(Some(99)));
        let c = AnomalyField::generate(&grid, &mut make_rng(Some(100)));

        assert_eq!(a.values(), b.values());
        assert_ne!(a.values(), c.values());
    }

    #[test]
    fn test_noise_is_small() {
        let grid = Grid::global();
        let field = AnomalyField::generate(&grid, &mut make_rng(Some(3)));
        let base = AnomalyField::deterministic(&grid);

        let residuals: Vec<f64> = field
            .values()
            .iter()
            .zip(base.values().iter())
            .map(|(v, b)| (*v - *b) as f64)
            .collect();
        let n = residuals.len() as f64;
        let mean = residuals.iter().sum::<f64>() / n;
        let std = (residuals.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / n).sqrt();

        assert!(mean.abs() < 0.01, "mean residual {}", mean);
        assert!((std - NOISE_AMPLITUDE).abs() < 0.01, "residual std {}", std);
    }

    #[test]
    fn test_from_values_shape_check() {
        let grid = Grid::new(4, 3).unwrap();
        assert!(AnomalyField::from_values(&grid, Array2::zeros((3, 4))).is_ok());
        let err = AnomalyField::from_values(&grid, Array2::zeros((4, 3))).unwrap_err();
        assert!(matches!(err, CartoError::ShapeMismatch { .. }));
    }

    #[test]
    fn test_sample_deterministic_field() {
        let grid = Grid::new(361, 181).unwrap();
        let field = AnomalyField::deterministic(&grid);
        let bilinear = get_interpolator("bilinear").unwrap();

        // Grid nodes sample exactly
        let north_pole = field.sample(0.0, 90.0, bilinear.as_ref()).unwrap();
        assert!((north_pole - 5.0).abs() < 1e-5);

        let equator = field.sample(45.0, 0.0, bilinear.as_ref()).unwrap();
        assert!((equator - 2.5).abs() < 1e-5);

        let (lo, hi) = field.min_max();
        assert!(lo >= 2.5 - 1e-5);
        assert!(hi <= 5.0 + 1e-5);
    }
}
