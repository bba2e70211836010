use std::{future::Future, time::Duration};

use futures::future::join_all;
use shared::{
    AmenityCategory, CategoryPlaces, ComfortAmenities, Coordinate, RouteData, RoutePoint,
    RouteRequest,
};

use crate::{
    elevation::enrich_path,
    error::{AnalyticsError, ProviderError},
    provider::{DirectionsProvider, ElevationProvider, PathQuery, PlacesProvider, ProviderPath},
    sampling::sample_path,
    stats::compute_route_stats,
};

pub const DEFAULT_SAMPLE_COUNT: usize = 100;
pub const DEFAULT_PROVIDER_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_MAX_ALTERNATIVES: usize = 3;
pub const DEFAULT_AMENITY_RADIUS_M: f64 = 5_000.0;

#[derive(Debug, Clone, Copy)]
pub struct EngineConfig {
    /// Points kept per route after sampling. Must be at least 2.
    pub sample_count: usize,
    pub provider_timeout: Duration,
    pub max_alternatives: usize,
    pub amenity_radius_m: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            sample_count: DEFAULT_SAMPLE_COUNT,
            provider_timeout: DEFAULT_PROVIDER_TIMEOUT,
            max_alternatives: DEFAULT_MAX_ALTERNATIVES,
            amenity_radius_m: DEFAULT_AMENITY_RADIUS_M,
        }
    }
}

/// Route-to-statistics pipeline over injected providers.
///
/// # Pipeline
/// ```text
/// directions -> sample_path -> elevation batch -> RoutePoint[] -> RouteStats
/// ```
/// Every provider call is bounded by `EngineConfig::provider_timeout` and is
/// never retried here; failures surface as [`AnalyticsError::Provider`].
pub struct RouteAnalyticsEngine<D, E, P> {
    directions: D,
    elevation: E,
    places: P,
    config: EngineConfig,
}

impl<D, E, P> RouteAnalyticsEngine<D, E, P>
where
    D: DirectionsProvider,
    E: ElevationProvider,
    P: PlacesProvider,
{
    pub fn new(
        directions: D,
        elevation: E,
        places: P,
        config: EngineConfig,
    ) -> Result<Self, AnalyticsError> {
        if config.sample_count < 2 {
            return Err(AnalyticsError::DegenerateInput(format!(
                "sample count must be at least 2, got {}",
                config.sample_count
            )));
        }
        Ok(Self {
            directions,
            elevation,
            places,
            config,
        })
    }

    /// Plan the preferred route, or up to `max_alternatives` routes when the
    /// request asks for alternatives. The first entry is the provider's
    /// preferred path.
    pub async fn plan(&self, req: &RouteRequest) -> Result<Vec<RouteData>, AnalyticsError> {
        validate_request(req)?;

        let query = PathQuery {
            start: req.start,
            end: req.end,
            mode: req.mode,
            waypoints: req.waypoints.clone(),
            optimize_waypoints: req.optimize_waypoints,
            alternatives: req.alternatives,
        };

        let mut paths = self
            .bounded("directions lookup", self.directions.get_paths(&query))
            .await?;
        if paths.is_empty() {
            return Err(ProviderError::NoRoute.into());
        }
        let limit = if req.alternatives {
            self.config.max_alternatives.max(1)
        } else {
            1
        };
        paths.truncate(limit);

        tracing::info!(
            "Directions returned {} path(s) for {:?} -> {:?} ({:?})",
            paths.len(),
            req.start,
            req.end,
            req.mode
        );

        // Sequential on purpose: one elevation batch per alternative.
        let mut routes = Vec::with_capacity(paths.len());
        for path in paths {
            let waypoints = waypoints_for(&path, &query);
            routes.push(self.build_route_data(&path.coordinates, waypoints).await?);
        }
        Ok(routes)
    }

    /// Sample, enrich and aggregate one raw path.
    pub async fn build_route_data(
        &self,
        path: &[Coordinate],
        waypoints: Option<Vec<Coordinate>>,
    ) -> Result<RouteData, AnalyticsError> {
        let sampled = sample_path(path, self.config.sample_count);
        tracing::debug!("Sampled {} of {} path coordinates", sampled.len(), path.len());

        let points = self
            .bounded("elevation lookup", enrich_path(&self.elevation, &sampled))
            .await?;
        let stats = compute_route_stats(&points);

        tracing::debug!(
            "Route stats: {:.0}m, +{:.0}m/-{:.0}m, grade {:.1}%..{:.1}%",
            stats.total_distance,
            stats.total_elevation_gain,
            stats.total_elevation_loss,
            stats.min_grade,
            stats.max_grade
        );

        Ok(RouteData {
            points,
            stats,
            waypoints,
        })
    }

    /// Nearby places for every amenity category around the route midpoint.
    ///
    /// Categories are queried concurrently. A failed or timed-out category
    /// yields an empty list; it never fails the batch.
    pub async fn comfort_amenities(
        &self,
        points: &[RoutePoint],
        radius_m: Option<f64>,
    ) -> Option<ComfortAmenities> {
        let midpoint = route_midpoint(points)?;
        let radius_m = radius_m.unwrap_or(self.config.amenity_radius_m);

        let lookups = AmenityCategory::ALL.iter().map(|&category| async move {
            let result = self
                .bounded(
                    "places lookup",
                    self.places.find_nearby(midpoint, category, radius_m),
                )
                .await;
            let places = match result {
                Ok(places) => places,
                Err(err) => {
                    tracing::warn!("Amenity lookup for {} failed: {}", category.as_str(), err);
                    Vec::new()
                }
            };
            CategoryPlaces { category, places }
        });

        let categories = join_all(lookups).await;
        Some(ComfortAmenities {
            midpoint,
            categories,
        })
    }

    async fn bounded<T, F>(&self, operation: &'static str, fut: F) -> Result<T, ProviderError>
    where
        F: Future<Output = Result<T, ProviderError>>,
    {
        let after = self.config.provider_timeout;
        match tokio::time::timeout(after, fut).await {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!("{} timed out after {:?}", operation, after);
                Err(ProviderError::Timeout { operation, after })
            }
        }
    }
}

fn validate_request(req: &RouteRequest) -> Result<(), AnalyticsError> {
    let all = [req.start, req.end]
        .into_iter()
        .chain(req.waypoints.iter().copied());
    for coord in all {
        let valid = coord.lat.is_finite()
            && coord.lng.is_finite()
            && (-90.0..=90.0).contains(&coord.lat)
            && (-180.0..=180.0).contains(&coord.lng);
        if !valid {
            return Err(AnalyticsError::DegenerateInput(format!(
                "coordinate out of range: {coord:?}"
            )));
        }
    }
    Ok(())
}

fn waypoints_for(path: &ProviderPath, query: &PathQuery) -> Option<Vec<Coordinate>> {
    if query.waypoints.is_empty() {
        None
    } else {
        Some(path.ordered_waypoints(query))
    }
}

/// The route point closest to half of the total distance.
pub fn route_midpoint(points: &[RoutePoint]) -> Option<Coordinate> {
    let last = points.last()?;
    let half = last.distance / 2.0;
    points
        .iter()
        .min_by(|a, b| {
            let da = (a.distance - half).abs();
            let db = (b.distance - half).abs();
            da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
        })
        .map(RoutePoint::coordinate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{directions::SyntheticDirections, places::PlaceCatalog, terrain::SyntheticTerrain};
    use shared::TravelMode;

    fn engine(
        config: EngineConfig,
    ) -> RouteAnalyticsEngine<SyntheticDirections, SyntheticTerrain, PlaceCatalog> {
        RouteAnalyticsEngine::new(
            SyntheticDirections,
            SyntheticTerrain::default(),
            PlaceCatalog::default(),
            config,
        )
        .unwrap()
    }

    fn request(alternatives: bool) -> RouteRequest {
        RouteRequest {
            start: Coordinate::new(45.0, 5.0),
            end: Coordinate::new(45.05, 5.05),
            mode: TravelMode::Walking,
            waypoints: vec![],
            optimize_waypoints: false,
            alternatives,
        }
    }

    fn point(distance: f64) -> RoutePoint {
        RoutePoint {
            lat: 0.0,
            lng: distance / 1000.0,
            elevation: 0.0,
            distance,
        }
    }

    #[test]
    fn rejects_sample_count_below_two() {
        let result = RouteAnalyticsEngine::new(
            SyntheticDirections,
            SyntheticTerrain::default(),
            PlaceCatalog::default(),
            EngineConfig {
                sample_count: 1,
                ..Default::default()
            },
        );
        assert!(matches!(result, Err(AnalyticsError::DegenerateInput(_))));
    }

    #[tokio::test]
    async fn plans_single_route_with_sampled_points() {
        let config = EngineConfig {
            sample_count: 10,
            ..Default::default()
        };
        let routes = engine(config).plan(&request(false)).await.unwrap();

        assert_eq!(routes.len(), 1);
        let route = &routes[0];
        assert_eq!(route.points.len(), 10);
        assert_eq!(route.points[0].distance, 0.0);
        assert!(route.stats.total_distance > 6_000.0);
        assert!(route.waypoints.is_none());
    }

    #[tokio::test]
    async fn plans_limited_alternatives() {
        let config = EngineConfig {
            max_alternatives: 2,
            ..Default::default()
        };
        let routes = engine(config).plan(&request(true)).await.unwrap();
        assert_eq!(routes.len(), 2);
    }

    #[tokio::test]
    async fn keeps_waypoints_on_route() {
        let mut req = request(false);
        req.waypoints = vec![Coordinate::new(45.02, 5.01)];
        let routes = engine(EngineConfig::default()).plan(&req).await.unwrap();
        assert_eq!(routes[0].waypoints, Some(vec![Coordinate::new(45.02, 5.01)]));
    }

    #[tokio::test]
    async fn rejects_out_of_range_coordinates() {
        let mut req = request(false);
        req.end = Coordinate::new(95.0, 5.0);
        let err = engine(EngineConfig::default()).plan(&req).await.unwrap_err();
        assert!(matches!(err, AnalyticsError::DegenerateInput(_)));
    }

    #[tokio::test]
    async fn empty_path_yields_zero_stats() {
        let route = engine(EngineConfig::default())
            .build_route_data(&[], None)
            .await
            .unwrap();
        assert!(route.points.is_empty());
        assert_eq!(route.stats, shared::RouteStats::default());
    }

    #[test]
    fn midpoint_is_closest_to_half_distance() {
        let points = [point(0.0), point(400.0), point(1100.0), point(2000.0)];
        assert_eq!(route_midpoint(&points), Some(points[2].coordinate()));
        assert_eq!(route_midpoint(&[]), None);
    }

    #[tokio::test]
    async fn amenities_cover_every_category() {
        let amenities = engine(EngineConfig::default())
            .comfort_amenities(&[point(0.0), point(1000.0)], None)
            .await
            .unwrap();
        assert_eq!(amenities.categories.len(), AmenityCategory::ALL.len());
        assert!(amenities.categories.iter().all(|c| c.places.is_empty()));
    }
}
