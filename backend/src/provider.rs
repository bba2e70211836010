//! Capability traits for the external collaborators of the engine.
//!
//! The engine never talks to a concrete vendor: it is handed one
//! implementation per capability. This allows:
//! - **Testing**: fakes that fail, stall or return fixed data
//! - **Deployment**: swapping a local DEM for a remote elevation API
//!
//! # Contract
//! All implementations must:
//! - Report failures as [`ProviderError`] instead of panicking
//! - Return exactly one elevation per input coordinate, in order
//! - Never block the async runtime

use std::future::Future;

use shared::{AmenityCategory, Coordinate, Place, TravelMode};

use crate::error::ProviderError;

#[derive(Debug, Clone)]
pub struct PathQuery {
    pub start: Coordinate,
    pub end: Coordinate,
    pub mode: TravelMode,
    pub waypoints: Vec<Coordinate>,
    /// Allow the provider to visit waypoints in a different order.
    pub optimize_waypoints: bool,
    /// Ask for several alternative paths instead of one.
    pub alternatives: bool,
}

#[derive(Debug, Clone)]
pub struct ProviderPath {
    pub coordinates: Vec<Coordinate>,
    /// Order in which the query waypoints are visited, as indices into
    /// `PathQuery::waypoints`.
    pub waypoint_order: Vec<usize>,
}

impl ProviderPath {
    /// Query waypoints in visiting order.
    pub fn ordered_waypoints(&self, query: &PathQuery) -> Vec<Coordinate> {
        self.waypoint_order
            .iter()
            .filter_map(|&idx| query.waypoints.get(idx).copied())
            .collect()
    }
}

pub trait DirectionsProvider: Send + Sync {
    /// Paths from start to end through the query waypoints; the first entry is
    /// the provider's preferred path.
    fn get_paths(
        &self,
        query: &PathQuery,
    ) -> impl Future<Output = Result<Vec<ProviderPath>, ProviderError>> + Send;
}

pub trait ElevationProvider: Send + Sync {
    /// One batched lookup; the result is positionally paired with `points`.
    fn get_elevations(
        &self,
        points: &[Coordinate],
    ) -> impl Future<Output = Result<Vec<f64>, ProviderError>> + Send;
}

pub trait PlacesProvider: Send + Sync {
    fn find_nearby(
        &self,
        point: Coordinate,
        category: AmenityCategory,
        radius_m: f64,
    ) -> impl Future<Output = Result<Vec<Place>, ProviderError>> + Send;
}
