use std::{fs::File, io::Read, path::Path};

use serde::Deserialize;
use shared::{AmenityCategory, Coordinate, Place};

use crate::error::ProviderError;
use crate::geodesy::haversine_m;
use crate::provider::PlacesProvider;

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read place catalog: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid place catalog: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Deserialize)]
struct CatalogEntry {
    category: AmenityCategory,
    #[serde(flatten)]
    place: Place,
}

/// In-memory points of interest loaded from a JSON array of places, each
/// tagged with its amenity `category`.
#[derive(Debug, Clone, Default)]
pub struct PlaceCatalog {
    entries: Vec<CatalogEntry>,
}

impl PlaceCatalog {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let file = File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader(reader: impl Read) -> Result<Self, CatalogError> {
        let entries: Vec<CatalogEntry> = serde_json::from_reader(reader)?;
        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Places of `category` within `radius_m`, nearest first.
    pub fn nearby(
        &self,
        point: Coordinate,
        category: AmenityCategory,
        radius_m: f64,
    ) -> Vec<Place> {
        let mut hits: Vec<(f64, &Place)> = self
            .entries
            .iter()
            .filter(|entry| entry.category == category)
            .map(|entry| (haversine_m(point, entry.place.coordinate), &entry.place))
            .filter(|(distance, _)| *distance <= radius_m)
            .collect();

        hits.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));
        hits.into_iter().map(|(_, place)| place.clone()).collect()
    }
}

impl PlacesProvider for PlaceCatalog {
    async fn find_nearby(
        &self,
        point: Coordinate,
        category: AmenityCategory,
        radius_m: f64,
    ) -> Result<Vec<Place>, ProviderError> {
        Ok(self.nearby(point, category, radius_m))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CATALOG: &str = r#"[
        {"category": "restaurant", "name": "Far Bistro", "coordinate": {"lat": 45.03, "lng": 5.0}},
        {"category": "restaurant", "name": "Corner Cafe", "coordinate": {"lat": 45.001, "lng": 5.0}, "rating": 4.5, "open_now": true},
        {"category": "hospital", "name": "General", "coordinate": {"lat": 45.002, "lng": 5.0}, "vicinity": "Main street"},
        {"category": "restaurant", "name": "Distant Diner", "coordinate": {"lat": 46.0, "lng": 5.0}}
    ]"#;

    fn catalog() -> PlaceCatalog {
        PlaceCatalog::from_reader(CATALOG.as_bytes()).unwrap()
    }

    #[test]
    fn loads_entries() {
        assert_eq!(catalog().len(), 4);
        assert!(PlaceCatalog::default().is_empty());
    }

    #[test]
    fn filters_by_category_and_radius_nearest_first() {
        let places = catalog().nearby(
            Coordinate::new(45.0, 5.0),
            AmenityCategory::Restaurant,
            5_000.0,
        );
        let names: Vec<&str> = places.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Corner Cafe", "Far Bistro"]);
        assert_eq!(places[0].rating, Some(4.5));
        assert_eq!(places[0].open_now, Some(true));
    }

    #[test]
    fn keeps_optional_fields() {
        let places = catalog().nearby(
            Coordinate::new(45.0, 5.0),
            AmenityCategory::Hospital,
            1_000.0,
        );
        assert_eq!(places.len(), 1);
        assert_eq!(places[0].vicinity.as_deref(), Some("Main street"));
    }

    #[test]
    fn rejects_malformed_catalog() {
        assert!(matches!(
            PlaceCatalog::from_reader("{not json".as_bytes()),
            Err(CatalogError::Parse(_))
        ));
    }

    #[tokio::test]
    async fn provider_returns_empty_for_unknown_category() {
        let places = catalog()
            .find_nearby(Coordinate::new(45.0, 5.0), AmenityCategory::Lodging, 10_000.0)
            .await
            .unwrap();
        assert!(places.is_empty());
    }
}
