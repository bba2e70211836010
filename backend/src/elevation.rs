use shared::{Coordinate, RoutePoint};

use crate::dem::DemElevation;
use crate::error::ProviderError;
use crate::geodesy::haversine_m;
use crate::open_elevation::OpenElevationClient;
use crate::provider::ElevationProvider;
use crate::terrain::SyntheticTerrain;

/// The elevation backends the server can be configured with.
#[derive(Debug, Clone)]
pub enum ElevationSource {
    Dem(DemElevation),
    OpenElevation(OpenElevationClient),
    Synthetic(SyntheticTerrain),
}

impl ElevationProvider for ElevationSource {
    async fn get_elevations(&self, points: &[Coordinate]) -> Result<Vec<f64>, ProviderError> {
        match self {
            ElevationSource::Dem(dem) => dem.get_elevations(points).await,
            ElevationSource::OpenElevation(client) => client.get_elevations(points).await,
            ElevationSource::Synthetic(terrain) => terrain.get_elevations(points).await,
        }
    }
}

/// Attach elevations to `path` with a single batched provider call and
/// accumulate along-path distance.
pub async fn enrich_path<E: ElevationProvider>(
    provider: &E,
    path: &[Coordinate],
) -> Result<Vec<RoutePoint>, ProviderError> {
    if path.is_empty() {
        return Ok(Vec::new());
    }

    let elevations = provider.get_elevations(path).await?;
    if elevations.len() != path.len() {
        tracing::warn!(
            "Elevation provider returned {} values for {} coordinates",
            elevations.len(),
            path.len()
        );
        return Err(ProviderError::LengthMismatch {
            expected: path.len(),
            actual: elevations.len(),
        });
    }

    tracing::debug!("Fetched {} elevations", elevations.len());
    Ok(build_route_points(path, &elevations))
}

/// Pair coordinates with elevations positionally. `distance` of point `i` is
/// the running haversine total up to and including the segment ending at `i`.
pub fn build_route_points(path: &[Coordinate], elevations: &[f64]) -> Vec<RoutePoint> {
    let mut points = Vec::with_capacity(path.len());
    let mut travelled = 0.0;

    for (idx, (coord, &elevation)) in path.iter().zip(elevations).enumerate() {
        if idx > 0 {
            travelled += haversine_m(path[idx - 1], *coord);
        }
        points.push(RoutePoint {
            lat: coord.lat,
            lng: coord.lng,
            elevation,
            distance: travelled,
        });
    }

    points
}
