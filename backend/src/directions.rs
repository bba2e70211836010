use shared::{Coordinate, TravelMode};

use crate::error::ProviderError;
use crate::geodesy::haversine_m;
use crate::provider::{DirectionsProvider, PathQuery, ProviderPath};

const STEPS_PER_LEG: usize = 32;
/// Lateral offset per alternative, in units of the mode's base wiggle.
const ALTERNATIVE_OFFSETS: [f64; 3] = [1.0, -2.0, 3.0];

/// Offline directions: each leg is a straight interpolation bent by a
/// sinusoidal wiggle, so paths look like roads without any network data.
#[derive(Debug, Clone, Default)]
pub struct SyntheticDirections;

impl DirectionsProvider for SyntheticDirections {
    async fn get_paths(&self, query: &PathQuery) -> Result<Vec<ProviderPath>, ProviderError> {
        let waypoint_order = if query.optimize_waypoints {
            nearest_neighbour_order(query.start, &query.waypoints)
        } else {
            (0..query.waypoints.len()).collect()
        };

        let mut stops = Vec::with_capacity(query.waypoints.len() + 2);
        stops.push(query.start);
        stops.extend(waypoint_order.iter().map(|&idx| query.waypoints[idx]));
        stops.push(query.end);

        let count = if query.alternatives {
            ALTERNATIVE_OFFSETS.len()
        } else {
            1
        };

        let paths = ALTERNATIVE_OFFSETS
            .iter()
            .take(count)
            .map(|offset| ProviderPath {
                coordinates: generate_path(&stops, mode_wiggle(query.mode) * offset),
                waypoint_order: waypoint_order.clone(),
            })
            .collect();

        Ok(paths)
    }
}

/// Base lateral wiggle amplitude in degrees; roads bend more than trails.
fn mode_wiggle(mode: TravelMode) -> f64 {
    match mode {
        TravelMode::Walking => 0.002,
        TravelMode::Bicycling => 0.003,
        TravelMode::Driving => 0.005,
    }
}

pub fn generate_path(stops: &[Coordinate], amplitude: f64) -> Vec<Coordinate> {
    let Some(&first) = stops.first() else {
        return Vec::new();
    };

    let mut path = Vec::with_capacity((stops.len().saturating_sub(1)) * STEPS_PER_LEG + 1);
    path.push(first);

    for leg in stops.windows(2) {
        let (start, end) = (leg[0], leg[1]);
        let perp = perpendicular_unit(start, end);

        for i in 1..=STEPS_PER_LEG {
            let t = i as f64 / STEPS_PER_LEG as f64;
            let mut point = start.interpolate(end, t);
            // sin(pi * t) pins both leg ends in place
            let wiggle = (std::f64::consts::PI * t).sin() * ((i as f64) * 0.45).cos() * amplitude;
            point.lat += perp.lat * wiggle;
            point.lng += perp.lng * wiggle;
            path.push(point);
        }
    }

    path
}

fn perpendicular_unit(start: Coordinate, end: Coordinate) -> Coordinate {
    let dx = end.lng - start.lng;
    let dy = end.lat - start.lat;
    let len = (dx * dx + dy * dy).sqrt().max(f64::EPSILON);
    Coordinate {
        lng: -dy / len,
        lat: dx / len,
    }
}

/// Greedy visiting order: always go to the closest unvisited waypoint.
fn nearest_neighbour_order(start: Coordinate, waypoints: &[Coordinate]) -> Vec<usize> {
    let mut remaining: Vec<usize> = (0..waypoints.len()).collect();
    let mut order = Vec::with_capacity(waypoints.len());
    let mut current = start;

    while !remaining.is_empty() {
        let (pos, _) = remaining
            .iter()
            .enumerate()
            .map(|(pos, &idx)| (pos, haversine_m(current, waypoints[idx])))
            .fold((0, f64::INFINITY), |best, candidate| {
                if candidate.1 < best.1 {
                    candidate
                } else {
                    best
                }
            });
        let idx = remaining.remove(pos);
        current = waypoints[idx];
        order.push(idx);
    }

    order
}
