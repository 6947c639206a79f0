use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    /// Google Maps API key. Absent in development; the maps adapter then
    /// serves deterministic synthetic estimates instead.
    pub google_maps_api_key: Option<String>,
    /// Radius (km) used for captain discovery after a ride is created.
    pub dispatch_radius_km: f64,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            google_maps_api_key: env::var("GOOGLE_MAPS_API_KEY")
                .ok()
                .filter(|key| !key.is_empty()),
            dispatch_radius_km: env::var("DISPATCH_RADIUS_KM")
                .unwrap_or_else(|_| "2.0".to_string())
                .parse()
                .context("DISPATCH_RADIUS_KM must be a valid number")?,
        })
    }
}
