use shared::{RoutePoint, RouteStats};

/// Walking pace used for the base time estimate.
pub const MINUTES_PER_KM: f64 = 15.0;
/// Naismith-style climbing penalty.
pub const MINUTES_PER_100M_GAIN: f64 = 10.0;

/// Percent grade of the segment `prev -> curr`, or `None` for stationary or
/// backtracking samples.
pub fn segment_grade(prev: &RoutePoint, curr: &RoutePoint) -> Option<f64> {
    let distance_change = curr.distance - prev.distance;
    if distance_change > 0.0 {
        Some((curr.elevation - prev.elevation) / distance_change * 100.0)
    } else {
        None
    }
}

/// Aggregate a point sequence in a single pass.
///
/// `average_grade` averages the absolute grade over moving segments only; it
/// is not weighted by distance. An empty sequence yields the all-zero stats.
pub fn compute_route_stats(points: &[RoutePoint]) -> RouteStats {
    let Some(first) = points.first() else {
        return RouteStats::default();
    };

    let mut elevation_gain = 0.0;
    let mut elevation_loss = 0.0;
    let mut max_elevation = first.elevation;
    let mut min_elevation = first.elevation;
    let mut max_grade = 0.0_f64;
    let mut min_grade = 0.0_f64;
    let mut grade_sum = 0.0;
    let mut grade_count = 0usize;

    for pair in points.windows(2) {
        let (prev, curr) = (&pair[0], &pair[1]);

        max_elevation = max_elevation.max(curr.elevation);
        min_elevation = min_elevation.min(curr.elevation);

        let elevation_change = curr.elevation - prev.elevation;
        if elevation_change > 0.0 {
            elevation_gain += elevation_change;
        } else {
            elevation_loss += elevation_change.abs();
        }

        if let Some(grade) = segment_grade(prev, curr) {
            max_grade = max_grade.max(grade);
            min_grade = min_grade.min(grade);
            grade_sum += grade.abs();
            grade_count += 1;
        }
    }

    let total_distance = points[points.len() - 1].distance;
    let average_grade = if grade_count > 0 {
        grade_sum / grade_count as f64
    } else {
        0.0
    };

    RouteStats {
        total_distance,
        total_elevation_gain: elevation_gain,
        total_elevation_loss: elevation_loss,
        max_elevation,
        min_elevation,
        max_grade,
        min_grade,
        average_grade,
        estimated_time: estimate_time_minutes(total_distance, elevation_gain),
    }
}

pub fn estimate_time_minutes(distance_m: f64, elevation_gain_m: f64) -> f64 {
    let base_time = (distance_m / 1000.0) * MINUTES_PER_KM;
    let elevation_time = (elevation_gain_m / 100.0) * MINUTES_PER_100M_GAIN;
    base_time + elevation_time
}
