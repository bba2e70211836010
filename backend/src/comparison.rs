use std::cmp::Ordering;

use shared::{ComparisonEntry, RouteComparison, RouteData};

use crate::alerts::safety_score;
use crate::difficulty::classify_difficulty;

/// Side-by-side summary of route alternatives, or `None` without any.
///
/// Ties keep the lowest index.
pub fn compare_routes(routes: &[RouteData]) -> Option<RouteComparison> {
    if routes.is_empty() {
        return None;
    }

    let entries: Vec<ComparisonEntry> = routes
        .iter()
        .enumerate()
        .map(|(index, route)| ComparisonEntry {
            index,
            distance_km: route.stats.distance_km(),
            elevation_gain: route.stats.total_elevation_gain,
            estimated_time: route.stats.estimated_time,
            difficulty: classify_difficulty(&route.stats),
            safety_score: safety_score(&route.stats),
        })
        .collect();

    let shortest = pick_min(&entries, |a, b| total_cmp(a.distance_km, b.distance_km));
    let fastest = pick_min(&entries, |a, b| total_cmp(a.estimated_time, b.estimated_time));
    let flattest = pick_min(&entries, |a, b| total_cmp(a.elevation_gain, b.elevation_gain));
    let easiest = pick_min(&entries, |a, b| {
        a.difficulty
            .cmp(&b.difficulty)
            .then_with(|| b.safety_score.cmp(&a.safety_score))
    });

    Some(RouteComparison {
        entries,
        shortest,
        fastest,
        flattest,
        easiest,
    })
}

fn total_cmp(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

fn pick_min<F>(entries: &[ComparisonEntry], cmp: F) -> usize
where
    F: Fn(&ComparisonEntry, &ComparisonEntry) -> Ordering,
{
    let mut best = 0;
    for (idx, entry) in entries.iter().enumerate().skip(1) {
        if cmp(entry, &entries[best]) == Ordering::Less {
            best = idx;
        }
    }
    best
}
