use shared::{
    AlertKind, AlertSeverity, HikingInfo, RouteAlert, RouteAnalysis, RouteData, RoutePoint,
    RouteStats, TrafficLikelihood, TravelMode,
};

use crate::difficulty::{classify_difficulty, classify_hiking};
use crate::stats::segment_grade;

/// Absolute grade (percent) above which a segment counts as steep.
pub const STEEP_GRADE_PERCENT: f64 = 15.0;
/// Steep-section count above which a caution alert is raised.
pub const STEEP_SECTION_ALERT_COUNT: usize = 5;
/// Safety scores below this raise a warning.
pub const LOW_SAFETY_SCORE: u32 = 60;

const HIGH_ALTITUDE_M: f64 = 2000.0;
const STEEP_CLIMB_GRADE: f64 = 20.0;
const LONG_DISTANCE_KM: f64 = 10.0;
const SIGNIFICANT_GAIN_M: f64 = 500.0;

const MORNING_PEAK: std::ops::RangeInclusive<u32> = 7..=9;
const EVENING_PEAK: std::ops::RangeInclusive<u32> = 16..=19;

pub fn safety_score(stats: &RouteStats) -> u32 {
    let grade = stats.max_abs_grade();
    let gain = stats.total_elevation_gain;
    let distance_km = stats.distance_km();

    let mut score: i32 = 100;
    score -= if grade > 20.0 {
        20
    } else if grade > 15.0 {
        15
    } else if grade > 10.0 {
        10
    } else {
        0
    };
    score -= if gain > 1000.0 {
        15
    } else if gain > 500.0 {
        10
    } else {
        0
    };
    score -= if distance_km > 20.0 {
        10
    } else if distance_km > 10.0 {
        5
    } else {
        0
    };

    score.max(0) as u32
}

pub fn count_steep_sections(points: &[RoutePoint]) -> usize {
    points
        .windows(2)
        .filter_map(|pair| segment_grade(&pair[0], &pair[1]))
        .filter(|grade| grade.abs() > STEEP_GRADE_PERCENT)
        .count()
}

pub fn terrain_tags(stats: &RouteStats) -> Vec<String> {
    let mut tags = Vec::new();
    if stats.max_elevation > HIGH_ALTITUDE_M {
        tags.push("High altitude".to_string());
    }
    if stats.max_grade > STEEP_CLIMB_GRADE {
        tags.push("Steep climbs".to_string());
    }
    if stats.distance_km() > LONG_DISTANCE_KM {
        tags.push("Long distance".to_string());
    }
    if stats.total_elevation_gain > SIGNIFICANT_GAIN_M {
        tags.push("Significant elevation gain".to_string());
    }
    if tags.is_empty() {
        tags.push("Moderate terrain".to_string());
    }
    tags
}

/// Simulated traffic: only driving routes see congestion, worse at rush hour
/// and on longer trips. `hour` is the local hour of day (0-23).
pub fn traffic_likelihood(mode: TravelMode, stats: &RouteStats, hour: u32) -> TrafficLikelihood {
    if mode != TravelMode::Driving {
        return TrafficLikelihood::Low;
    }

    let distance_km = stats.distance_km();
    let peak = MORNING_PEAK.contains(&hour) || EVENING_PEAK.contains(&hour);
    match (peak, distance_km) {
        (true, d) if d > 5.0 => TrafficLikelihood::High,
        (true, _) => TrafficLikelihood::Moderate,
        (false, d) if d > 20.0 => TrafficLikelihood::Moderate,
        (false, _) => TrafficLikelihood::Low,
    }
}

pub fn hiking_info(route: &RouteData, steep_sections: usize) -> HikingInfo {
    let stats = &route.stats;
    let mut tips = Vec::new();
    if steep_sections > 0 {
        tips.push("Use trekking poles on steep sections".to_string());
    }
    if stats.max_elevation > HIGH_ALTITUDE_M {
        tips.push("Pack warm layers for high altitude".to_string());
    }
    if stats.distance_km() > LONG_DISTANCE_KM {
        tips.push("Carry extra water".to_string());
    }
    if stats.total_elevation_gain > SIGNIFICANT_GAIN_M {
        tips.push("Plan rest stops on long climbs".to_string());
    }
    if tips.is_empty() {
        tips.push("Suitable for most fitness levels".to_string());
    }

    HikingInfo {
        difficulty: classify_hiking(stats),
        estimated_time_minutes: stats.estimated_time,
        terrain_tags: terrain_tags(stats),
        tips,
    }
}

fn build_alerts(
    traffic: TrafficLikelihood,
    steep_sections: usize,
    safety: u32,
) -> Vec<RouteAlert> {
    let mut alerts = Vec::new();

    match traffic {
        TrafficLikelihood::High => alerts.push(RouteAlert {
            kind: AlertKind::Traffic,
            severity: AlertSeverity::Warning,
            message: "Heavy traffic likely along this route".to_string(),
        }),
        TrafficLikelihood::Moderate => alerts.push(RouteAlert {
            kind: AlertKind::Traffic,
            severity: AlertSeverity::Info,
            message: "Some traffic expected along this route".to_string(),
        }),
        TrafficLikelihood::Low => {}
    }

    if steep_sections > STEEP_SECTION_ALERT_COUNT {
        alerts.push(RouteAlert {
            kind: AlertKind::SteepSections,
            severity: AlertSeverity::Warning,
            message: format!(
                "{steep_sections} steep sections above {STEEP_GRADE_PERCENT}% grade, take care"
            ),
        });
    }

    if safety < LOW_SAFETY_SCORE {
        alerts.push(RouteAlert {
            kind: AlertKind::Safety,
            severity: AlertSeverity::Warning,
            message: format!("Low safety score ({safety}/100): plan carefully"),
        });
    }

    alerts
}

/// Run every deriver over one route.
pub fn analyze_route(route: &RouteData, mode: TravelMode, hour: u32) -> RouteAnalysis {
    let steep_sections = count_steep_sections(&route.points);
    let safety = safety_score(&route.stats);
    let traffic = traffic_likelihood(mode, &route.stats, hour);

    RouteAnalysis {
        difficulty: classify_difficulty(&route.stats),
        hiking: hiking_info(route, steep_sections),
        safety_score: safety,
        steep_sections,
        terrain_tags: terrain_tags(&route.stats),
        traffic,
        alerts: build_alerts(traffic, steep_sections, safety),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(distance_m: f64, gain_m: f64, max_grade: f64) -> RouteStats {
        RouteStats {
            total_distance: distance_m,
            total_elevation_gain: gain_m,
            max_grade,
            ..Default::default()
        }
    }

    fn zigzag(segments: usize, rise: f64) -> Vec<RoutePoint> {
        (0..=segments)
            .map(|i| RoutePoint {
                lat: 0.0,
                lng: i as f64 * 0.001,
                elevation: if i % 2 == 0 { 0.0 } else { rise },
                distance: i as f64 * 100.0,
            })
            .collect()
    }

    #[test]
    fn safety_penalties_accumulate() {
        assert_eq!(safety_score(&stats(25_000.0, 1200.0, 22.0)), 55);
        assert_eq!(safety_score(&stats(1_000.0, 10.0, 2.0)), 100);
        assert_eq!(safety_score(&stats(12_000.0, 600.0, 16.0)), 70);
    }

    #[test]
    fn safety_counts_steep_descents() {
        let descent = RouteStats {
            min_grade: -18.0,
            ..Default::default()
        };
        assert_eq!(safety_score(&descent), 85);
    }

    #[test]
    fn counts_segments_steeper_than_threshold() {
        // every segment is +/-20% grade
        assert_eq!(count_steep_sections(&zigzag(6, 20.0)), 6);
        // exactly 15% is not steep
        assert_eq!(count_steep_sections(&zigzag(6, 15.0)), 0);
    }

    #[test]
    fn stationary_segments_are_not_steep() {
        let points = vec![
            RoutePoint {
                lat: 0.0,
                lng: 0.0,
                elevation: 0.0,
                distance: 0.0,
            },
            RoutePoint {
                lat: 0.0,
                lng: 0.0,
                elevation: 50.0,
                distance: 0.0,
            },
        ];
        assert_eq!(count_steep_sections(&points), 0);
    }

    #[test]
    fn tags_can_co_occur() {
        let stats = RouteStats {
            total_distance: 12_000.0,
            total_elevation_gain: 900.0,
            max_elevation: 2500.0,
            max_grade: 25.0,
            ..Default::default()
        };
        assert_eq!(
            terrain_tags(&stats),
            vec![
                "High altitude",
                "Steep climbs",
                "Long distance",
                "Significant elevation gain"
            ]
        );
    }

    #[test]
    fn default_tag_when_nothing_applies() {
        assert_eq!(terrain_tags(&stats(2_000.0, 50.0, 4.0)), vec!["Moderate terrain"]);
    }

    #[test]
    fn traffic_only_affects_driving() {
        let long = stats(30_000.0, 0.0, 0.0);
        assert_eq!(
            traffic_likelihood(TravelMode::Walking, &long, 8),
            TrafficLikelihood::Low
        );
        assert_eq!(
            traffic_likelihood(TravelMode::Driving, &long, 8),
            TrafficLikelihood::High
        );
        assert_eq!(
            traffic_likelihood(TravelMode::Driving, &long, 13),
            TrafficLikelihood::Moderate
        );
        assert_eq!(
            traffic_likelihood(TravelMode::Driving, &stats(3_000.0, 0.0, 0.0), 17),
            TrafficLikelihood::Moderate
        );
        assert_eq!(
            traffic_likelihood(TravelMode::Driving, &stats(3_000.0, 0.0, 0.0), 23),
            TrafficLikelihood::Low
        );
    }

    #[test]
    fn analysis_raises_steep_and_safety_alerts() {
        let points = zigzag(8, 25.0);
        let route = RouteData {
            stats: RouteStats {
                total_distance: 25_000.0,
                total_elevation_gain: 1200.0,
                max_grade: 25.0,
                min_grade: -25.0,
                ..Default::default()
            },
            points,
            waypoints: None,
        };

        let analysis = analyze_route(&route, TravelMode::Walking, 12);

        assert_eq!(analysis.steep_sections, 8);
        assert_eq!(analysis.safety_score, 55);
        assert_eq!(analysis.traffic, TrafficLikelihood::Low);
        let kinds: Vec<AlertKind> = analysis.alerts.iter().map(|a| a.kind).collect();
        assert_eq!(kinds, vec![AlertKind::SteepSections, AlertKind::Safety]);
        assert!(analysis
            .hiking
            .tips
            .contains(&"Use trekking poles on steep sections".to_string()));
    }

    #[test]
    fn easy_route_has_no_alerts() {
        let route = RouteData {
            points: zigzag(2, 1.0),
            stats: stats(200.0, 1.0, 1.0),
            waypoints: None,
        };
        let analysis = analyze_route(&route, TravelMode::Driving, 3);
        assert!(analysis.alerts.is_empty());
        assert_eq!(analysis.hiking.tips, vec!["Suitable for most fitness levels"]);
    }

    fn flat_route(stats: RouteStats) -> RouteData {
        RouteData {
            points: zigzag(2, 1.0),
            stats,
            waypoints: None,
        }
    }

    #[test]
    fn rush_hour_driving_raises_traffic_warning() {
        let route = flat_route(stats(30_000.0, 0.0, 0.0));
        let analysis = analyze_route(&route, TravelMode::Driving, 8);

        assert_eq!(analysis.traffic, TrafficLikelihood::High);
        let traffic: Vec<&RouteAlert> = analysis
            .alerts
            .iter()
            .filter(|a| a.kind == AlertKind::Traffic)
            .collect();
        assert_eq!(traffic.len(), 1);
        assert_eq!(traffic[0].severity, AlertSeverity::Warning);
    }

    #[test]
    fn short_rush_hour_drive_raises_traffic_info() {
        let route = flat_route(stats(3_000.0, 0.0, 0.0));
        let analysis = analyze_route(&route, TravelMode::Driving, 17);

        assert_eq!(analysis.traffic, TrafficLikelihood::Moderate);
        assert_eq!(analysis.alerts.len(), 1);
        assert_eq!(analysis.alerts[0].kind, AlertKind::Traffic);
        assert_eq!(analysis.alerts[0].severity, AlertSeverity::Info);
    }

    #[test]
    fn steep_alert_needs_more_than_threshold_sections() {
        let at_threshold = RouteData {
            points: zigzag(STEEP_SECTION_ALERT_COUNT, 20.0),
            stats: stats(500.0, 60.0, 20.0),
            waypoints: None,
        };
        let analysis = analyze_route(&at_threshold, TravelMode::Walking, 12);
        assert_eq!(analysis.steep_sections, STEEP_SECTION_ALERT_COUNT);
        assert!(analysis.alerts.is_empty());

        let above = RouteData {
            points: zigzag(STEEP_SECTION_ALERT_COUNT + 1, 20.0),
            ..at_threshold
        };
        let analysis = analyze_route(&above, TravelMode::Walking, 12);
        let kinds: Vec<AlertKind> = analysis.alerts.iter().map(|a| a.kind).collect();
        assert_eq!(kinds, vec![AlertKind::SteepSections]);
    }

    #[test]
    fn safety_alert_only_below_threshold() {
        // 100 - 20 (grade) - 15 (gain) - 5 (distance)
        let borderline = stats(12_000.0, 1200.0, 22.0);
        assert_eq!(safety_score(&borderline), LOW_SAFETY_SCORE);
        assert!(build_alerts(TrafficLikelihood::Low, 0, LOW_SAFETY_SCORE).is_empty());

        let alerts = build_alerts(TrafficLikelihood::Low, 0, LOW_SAFETY_SCORE - 1);
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].kind, AlertKind::Safety);
        assert_eq!(alerts[0].severity, AlertSeverity::Warning);
    }

    #[test]
    fn hiking_tips_follow_route_profile() {
        let route = RouteData {
            points: zigzag(2, 40.0),
            stats: RouteStats {
                total_distance: 12_000.0,
                total_elevation_gain: 900.0,
                max_elevation: 2500.0,
                max_grade: 18.0,
                estimated_time: 270.0,
                ..Default::default()
            },
            waypoints: None,
        };

        let info = hiking_info(&route, count_steep_sections(&route.points));

        assert_eq!(
            info.tips,
            vec![
                "Use trekking poles on steep sections",
                "Pack warm layers for high altitude",
                "Carry extra water",
                "Plan rest stops on long climbs"
            ]
        );
        assert_eq!(info.estimated_time_minutes, 270.0);
        assert_eq!(info.difficulty, classify_hiking(&route.stats));
    }
}
