use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    #[serde(alias = "lon")]
    pub lng: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    pub fn interpolate(self, other: Self, t: f64) -> Self {
        Self {
            lat: self.lat + (other.lat - self.lat) * t,
            lng: self.lng + (other.lng - self.lng) * t,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TravelMode {
    #[default]
    Walking,
    Bicycling,
    Driving,
}

/// A sampled path position enriched with terrain height and the distance
/// travelled from the route start, both in meters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoutePoint {
    pub lat: f64,
    pub lng: f64,
    pub elevation: f64,
    pub distance: f64,
}

impl RoutePoint {
    pub fn coordinate(&self) -> Coordinate {
        Coordinate {
            lat: self.lat,
            lng: self.lng,
        }
    }
}

/// Aggregate statistics over a full point sequence.
///
/// Distances and elevations are meters, grades are percent, time is minutes.
/// `Default` is the all-zero value reported for an empty route.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RouteStats {
    pub total_distance: f64,
    pub total_elevation_gain: f64,
    pub total_elevation_loss: f64,
    pub max_elevation: f64,
    pub min_elevation: f64,
    pub max_grade: f64,
    pub min_grade: f64,
    pub average_grade: f64,
    pub estimated_time: f64,
}

impl RouteStats {
    pub fn distance_km(&self) -> f64 {
        self.total_distance / 1000.0
    }

    /// Steepest grade regardless of direction.
    pub fn max_abs_grade(&self) -> f64 {
        self.max_grade.abs().max(self.min_grade.abs())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteData {
    pub points: Vec<RoutePoint>,
    pub stats: RouteStats,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub waypoints: Option<Vec<Coordinate>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Moderate,
    Hard,
    Extreme,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HikingDifficulty {
    Beginner,
    Intermediate,
    Advanced,
    Expert,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub name: String,
    pub coordinate: Coordinate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vicinity: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub open_now: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AmenityCategory {
    Restaurant,
    GasStation,
    Lodging,
    RestArea,
    Hospital,
}

impl AmenityCategory {
    pub const ALL: [AmenityCategory; 5] = [
        AmenityCategory::Restaurant,
        AmenityCategory::GasStation,
        AmenityCategory::Lodging,
        AmenityCategory::RestArea,
        AmenityCategory::Hospital,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            AmenityCategory::Restaurant => "restaurant",
            AmenityCategory::GasStation => "gas_station",
            AmenityCategory::Lodging => "lodging",
            AmenityCategory::RestArea => "rest_area",
            AmenityCategory::Hospital => "hospital",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrafficLikelihood {
    Low,
    Moderate,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    Traffic,
    SteepSections,
    Safety,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    Info,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteAlert {
    pub kind: AlertKind,
    pub severity: AlertSeverity,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HikingInfo {
    pub difficulty: HikingDifficulty,
    pub estimated_time_minutes: f64,
    pub terrain_tags: Vec<String>,
    pub tips: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteAnalysis {
    pub difficulty: Difficulty,
    pub hiking: HikingInfo,
    pub safety_score: u32,
    pub steep_sections: usize,
    pub terrain_tags: Vec<String>,
    pub traffic: TrafficLikelihood,
    pub alerts: Vec<RouteAlert>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzedRoute {
    pub route: RouteData,
    pub analysis: RouteAnalysis,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonEntry {
    pub index: usize,
    pub distance_km: f64,
    pub elevation_gain: f64,
    pub estimated_time: f64,
    pub difficulty: Difficulty,
    pub safety_score: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteComparison {
    pub entries: Vec<ComparisonEntry>,
    pub shortest: usize,
    pub fastest: usize,
    pub flattest: usize,
    pub easiest: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteRequest {
    pub start: Coordinate,
    pub end: Coordinate,
    #[serde(default)]
    pub mode: TravelMode,
    #[serde(default)]
    pub waypoints: Vec<Coordinate>,
    #[serde(default)]
    pub optimize_waypoints: bool,
    #[serde(default)]
    pub alternatives: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteResponse {
    pub request_id: u64,
    pub routes: Vec<AnalyzedRoute>,
    pub selected: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comparison: Option<RouteComparison>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SelectRouteRequest {
    pub index: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryPlaces {
    pub category: AmenityCategory,
    pub places: Vec<Place>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComfortAmenities {
    pub midpoint: Coordinate,
    pub categories: Vec<CategoryPlaces>,
}

impl ComfortAmenities {
    pub fn places(&self, category: AmenityCategory) -> &[Place] {
        self.categories
            .iter()
            .find(|entry| entry.category == category)
            .map(|entry| entry.places.as_slice())
            .unwrap_or(&[])
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    pub message: String,
}
