use shared::{Difficulty, HikingDifficulty, RouteStats};

/// General difficulty for route comparison.
///
/// Each factor contributes points so that several moderate factors can add
/// up to a harder rating than any one of them alone.
pub fn classify_difficulty(stats: &RouteStats) -> Difficulty {
    let score = distance_points(stats.distance_km())
        + gain_points(stats.total_elevation_gain)
        + grade_points(stats.max_abs_grade());

    match score {
        7.. => Difficulty::Extreme,
        5..=6 => Difficulty::Hard,
        3..=4 => Difficulty::Moderate,
        _ => Difficulty::Easy,
    }
}

fn distance_points(distance_km: f64) -> u32 {
    if distance_km > 20.0 {
        3
    } else if distance_km > 10.0 {
        2
    } else if distance_km > 5.0 {
        1
    } else {
        0
    }
}

fn gain_points(gain_m: f64) -> u32 {
    if gain_m > 1000.0 {
        3
    } else if gain_m > 500.0 {
        2
    } else if gain_m > 200.0 {
        1
    } else {
        0
    }
}

fn grade_points(grade: f64) -> u32 {
    if grade > 20.0 {
        3
    } else if grade > 15.0 {
        2
    } else if grade > 10.0 {
        1
    } else {
        0
    }
}

/// Hiking difficulty: the most severe tier any single factor reaches.
pub fn classify_hiking(stats: &RouteStats) -> HikingDifficulty {
    let distance_km = stats.distance_km();
    let gain = stats.total_elevation_gain;
    let grade = stats.max_abs_grade();

    if distance_km > 15.0 || gain > 800.0 || grade > 25.0 {
        HikingDifficulty::Expert
    } else if distance_km > 10.0 || gain > 500.0 || grade > 20.0 {
        HikingDifficulty::Advanced
    } else if distance_km > 5.0 || gain > 300.0 || grade > 15.0 {
        HikingDifficulty::Intermediate
    } else {
        HikingDifficulty::Beginner
    }
}
