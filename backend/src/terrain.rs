use shared::Coordinate;

use crate::error::ProviderError;
use crate::provider::ElevationProvider;

const METERS_PER_DEGREE_LAT: f64 = 111_000.0;

/// Deterministic rolling hills, for demos and tests without elevation data.
///
/// Height is a sum of two sine ridges over a base altitude; wavelengths are
/// in meters so the relief looks the same at any latitude.
#[derive(Debug, Clone, Copy)]
pub struct SyntheticTerrain {
    pub base_m: f64,
    pub amplitude_m: f64,
    pub wavelength_m: f64,
}

impl Default for SyntheticTerrain {
    fn default() -> Self {
        Self {
            base_m: 400.0,
            amplitude_m: 120.0,
            wavelength_m: 4_000.0,
        }
    }
}

impl SyntheticTerrain {
    pub fn height_at(&self, point: Coordinate) -> f64 {
        let north = point.lat * METERS_PER_DEGREE_LAT;
        let east = point.lng * METERS_PER_DEGREE_LAT * point.lat.to_radians().cos();
        let k = std::f64::consts::TAU / self.wavelength_m.max(1.0);

        let ridges = (north * k).sin() + 0.5 * (east * k * 1.7).cos();
        (self.base_m + self.amplitude_m * ridges).max(0.0)
    }
}

impl ElevationProvider for SyntheticTerrain {
    async fn get_elevations(&self, points: &[Coordinate]) -> Result<Vec<f64>, ProviderError> {
        Ok(points.iter().map(|p| self.height_at(*p)).collect())
    }
}
