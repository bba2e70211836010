use serde::{Deserialize, Serialize};
use shared::Coordinate;

use crate::error::ProviderError;
use crate::provider::ElevationProvider;

/// Client for an Open-Elevation compatible lookup service.
#[derive(Debug, Clone)]
pub struct OpenElevationClient {
    http: reqwest::Client,
    base_url: String,
}

#[derive(Debug, Serialize)]
struct LookupRequest {
    locations: Vec<LookupLocation>,
}

#[derive(Debug, Serialize)]
struct LookupLocation {
    latitude: f64,
    longitude: f64,
}

#[derive(Debug, Deserialize)]
struct LookupResponse {
    results: Vec<LookupResult>,
}

#[derive(Debug, Deserialize)]
struct LookupResult {
    elevation: f64,
}

impl OpenElevationClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn lookup_url(&self) -> String {
        format!("{}/api/v1/lookup", self.base_url)
    }
}

impl ElevationProvider for OpenElevationClient {
    async fn get_elevations(&self, points: &[Coordinate]) -> Result<Vec<f64>, ProviderError> {
        let body = LookupRequest {
            locations: points
                .iter()
                .map(|p| LookupLocation {
                    latitude: p.lat,
                    longitude: p.lng,
                })
                .collect(),
        };

        tracing::debug!("Requesting {} elevations from {}", points.len(), self.base_url);
        let response = self.http.post(self.lookup_url()).json(&body).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::Status {
                provider: "open-elevation",
                status: status.to_string(),
            });
        }

        let payload: LookupResponse = response.json().await?;
        if payload.results.len() != points.len() {
            return Err(ProviderError::LengthMismatch {
                expected: points.len(),
                actual: payload.results.len(),
            });
        }

        Ok(payload.results.into_iter().map(|r| r.elevation).collect())
    }
}
