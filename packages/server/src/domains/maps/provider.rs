//! Google Maps provider client (geocoding, distance matrix, places
//! autocomplete).

use anyhow::anyhow;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use tracing::instrument;

use crate::common::geo::Coordinates;
use crate::domains::maps::models::TripEstimate;

/// The upstream provider could not produce an answer. Never surfaced to
/// lifecycle callers; the adapter logs it and falls back.
#[derive(Debug, Error)]
#[error("maps provider degraded: {0}")]
pub struct UpstreamDegraded(#[from] anyhow::Error);

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    status: String,
    results: Vec<GeocodeResult>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    geometry: Geometry,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    location: Location,
}

#[derive(Debug, Deserialize)]
struct Location {
    lat: f64,
    lng: f64,
}

#[derive(Debug, Deserialize)]
struct DistanceMatrixResponse {
    status: String,
    rows: Vec<DistanceMatrixRow>,
}

#[derive(Debug, Deserialize)]
struct DistanceMatrixRow {
    elements: Vec<DistanceMatrixElement>,
}

#[derive(Debug, Deserialize)]
struct DistanceMatrixElement {
    status: String,
    distance: Option<TextValue>,
    duration: Option<TextValue>,
}

#[derive(Debug, Deserialize)]
struct TextValue {
    text: String,
    value: u32,
}

#[derive(Debug, Deserialize)]
struct AutocompleteResponse {
    status: String,
    predictions: Vec<Prediction>,
}

#[derive(Debug, Deserialize)]
struct Prediction {
    description: String,
}

/// Thin client over the Google Maps web APIs.
pub struct GoogleMapsClient {
    client: Client,
    api_key: String,
}

impl GoogleMapsClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
        }
    }

    #[instrument(skip(self))]
    pub async fn geocode(&self, address: &str) -> Result<Coordinates, UpstreamDegraded> {
        let url = format!(
            "https://maps.googleapis.com/maps/api/geocode/json?address={}&key={}",
            urlencoding::encode(address),
            self.api_key
        );

        let response: GeocodeResponse = self.get(&url).await?;
        if response.status != "OK" {
            return Err(anyhow!("geocoding API status {}", response.status).into());
        }

        let location = response
            .results
            .first()
            .map(|result| &result.geometry.location)
            .ok_or_else(|| anyhow!("geocoding API returned no results"))?;

        Ok(Coordinates::new(location.lat, location.lng))
    }

    #[instrument(skip(self))]
    pub async fn distance_matrix(
        &self,
        origin: &str,
        destination: &str,
    ) -> Result<TripEstimate, UpstreamDegraded> {
        let url = format!(
            "https://maps.googleapis.com/maps/api/distancematrix/json?origins={}&destinations={}&key={}",
            urlencoding::encode(origin),
            urlencoding::encode(destination),
            self.api_key
        );

        let response: DistanceMatrixResponse = self.get(&url).await?;
        if response.status != "OK" {
            return Err(anyhow!("distance matrix API status {}", response.status).into());
        }

        let element = response
            .rows
            .first()
            .and_then(|row| row.elements.first())
            .ok_or_else(|| anyhow!("distance matrix API returned no elements"))?;
        if element.status != "OK" {
            // Covers ZERO_RESULTS and friends.
            return Err(anyhow!("distance matrix element status {}", element.status).into());
        }

        let distance = element
            .distance
            .as_ref()
            .ok_or_else(|| anyhow!("distance matrix element missing distance"))?;
        let duration = element
            .duration
            .as_ref()
            .ok_or_else(|| anyhow!("distance matrix element missing duration"))?;

        Ok(TripEstimate {
            distance_m: distance.value,
            duration_s: duration.value,
            distance_text: distance.text.clone(),
            duration_text: duration.text.clone(),
        })
    }

    #[instrument(skip(self))]
    pub async fn autocomplete(&self, input: &str) -> Result<Vec<String>, UpstreamDegraded> {
        let url = format!(
            "https://maps.googleapis.com/maps/api/place/autocomplete/json?input={}&key={}",
            urlencoding::encode(input),
            self.api_key
        );

        let response: AutocompleteResponse = self.get(&url).await?;
        if response.status != "OK" {
            return Err(anyhow!("places API status {}", response.status).into());
        }

        Ok(response
            .predictions
            .into_iter()
            .map(|prediction| prediction.description)
            .filter(|description| !description.is_empty())
            .collect())
    }

    async fn get<T: for<'de> Deserialize<'de>>(&self, url: &str) -> Result<T, UpstreamDegraded> {
        let response = self
            .client
            .get(url)
            .timeout(Duration::from_secs(10))
            .send()
            .await
            .map_err(|e| anyhow!("provider request failed: {e}"))?;

        if !response.status().is_success() {
            return Err(anyhow!("provider returned HTTP {}", response.status()).into());
        }

        response
            .json::<T>()
            .await
            .map_err(|e| anyhow!("provider response unparsable: {e}"))
            .map_err(Into::into)
    }
}
