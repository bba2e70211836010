//! Server configuration from command-line flags or environment.

use std::{path::PathBuf, time::Duration};

use clap::{Parser, ValueEnum};

use crate::{
    dem::{DemElevation, DemLoadError},
    elevation::ElevationSource,
    engine::{
        EngineConfig, DEFAULT_AMENITY_RADIUS_M, DEFAULT_MAX_ALTERNATIVES, DEFAULT_SAMPLE_COUNT,
    },
    open_elevation::OpenElevationClient,
    places::{CatalogError, PlaceCatalog},
    terrain::SyntheticTerrain,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ElevationBackend {
    /// Local ESRI ASCII grid
    Dem,
    /// Open-Elevation compatible HTTP service
    OpenElevation,
    /// Generated rolling hills, no data needed
    Synthetic,
}

#[derive(Debug, Clone, Parser)]
#[command(author, version, about = "Route elevation and difficulty analytics server")]
pub struct Config {
    #[arg(long, env = "PORT", default_value_t = 8080)]
    pub port: u16,

    /// Points kept per route after sampling
    #[arg(long, env = "SAMPLE_COUNT", default_value_t = DEFAULT_SAMPLE_COUNT)]
    pub sample_count: usize,

    /// Upper bound for every directions, elevation or places call
    #[arg(long, env = "PROVIDER_TIMEOUT_MS", default_value_t = 10_000)]
    pub provider_timeout_ms: u64,

    #[arg(long, env = "MAX_ALTERNATIVES", default_value_t = DEFAULT_MAX_ALTERNATIVES)]
    pub max_alternatives: usize,

    /// Search radius around the route midpoint for comfort amenities
    #[arg(long, env = "AMENITY_RADIUS_M", default_value_t = DEFAULT_AMENITY_RADIUS_M)]
    pub amenity_radius_m: f64,

    #[arg(
        long,
        env = "ELEVATION_SOURCE",
        value_enum,
        default_value_t = ElevationBackend::Synthetic
    )]
    pub elevation_source: ElevationBackend,

    #[arg(long, env = "LOCAL_DEM_PATH", default_value = "backend/data/dem/region.asc")]
    pub dem_path: PathBuf,

    #[arg(long, env = "OPEN_ELEVATION_URL", default_value = "https://api.open-elevation.com")]
    pub open_elevation_url: String,

    /// JSON array of places tagged with an amenity category
    #[arg(long, env = "PLACES_CATALOG")]
    pub places_catalog: Option<PathBuf>,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error(transparent)]
    Dem(#[from] DemLoadError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

impl Config {
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            sample_count: self.sample_count,
            provider_timeout: Duration::from_millis(self.provider_timeout_ms),
            max_alternatives: self.max_alternatives,
            amenity_radius_m: self.amenity_radius_m,
        }
    }

    pub fn elevation(&self) -> Result<ElevationSource, ConfigError> {
        Ok(match self.elevation_source {
            ElevationBackend::Dem => ElevationSource::Dem(DemElevation::from_path(&self.dem_path)?),
            ElevationBackend::OpenElevation => {
                ElevationSource::OpenElevation(OpenElevationClient::new(&self.open_elevation_url))
            }
            ElevationBackend::Synthetic => ElevationSource::Synthetic(SyntheticTerrain::default()),
        })
    }

    pub fn places(&self) -> Result<PlaceCatalog, ConfigError> {
        match &self.places_catalog {
            Some(path) => {
                let catalog = PlaceCatalog::from_file(path)?;
                if catalog.is_empty() {
                    tracing::warn!("Place catalog {} has no entries", path.display());
                } else {
                    tracing::info!("Loaded {} places from {}", catalog.len(), path.display());
                }
                Ok(catalog)
            }
            None => Ok(PlaceCatalog::default()),
        }
    }
}
