use crate::config::WeatherConfig;
use crate::error::{HumidCheckError, Result};
use crate::models::{Coordinates, CurrentConditions};
use chrono::Utc;
use serde::Deserialize;
use std::time::Duration;

const CURRENT_FIELDS: &str = "temperature_2m,relative_humidity_2m";

#[derive(Clone)]
pub struct OpenMeteoClient {
    client: reqwest::Client,
    base_url: String,
}

// Open-Meteo API response structures
#[derive(Debug, Deserialize)]
struct OpenMeteoResponse {
    current: OpenMeteoCurrent,
}

#[derive(Debug, Deserialize)]
struct OpenMeteoCurrent {
    temperature_2m: f64,
    #[serde(default)]
    relative_humidity_2m: Option<f64>,
}

impl OpenMeteoClient {
    pub fn new(config: &WeatherConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetch current temperature and relative humidity at the given coordinates.
    pub async fn fetch_current(&self, coordinates: Coordinates) -> Result<CurrentConditions> {
        let url = format!(
            "{}/forecast?latitude={}&longitude={}&current={}",
            self.base_url, coordinates.latitude, coordinates.longitude, CURRENT_FIELDS
        );
        tracing::debug!("Requesting current conditions for {}", coordinates);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| HumidCheckError::DataSourceUnavailable(format!("Open-Meteo: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(HumidCheckError::DataSourceUnavailable(format!(
                "Open-Meteo returned {}: {}",
                status, body
            )));
        }

        let body: OpenMeteoResponse = response.json().await.map_err(|e| {
            HumidCheckError::InvalidData(format!("Failed to parse Open-Meteo response: {}", e))
        })?;

        Ok(Self::convert(coordinates, body.current))
    }

    /// Test connection to the Open-Meteo API
    pub async fn test_connection(&self, coordinates: Coordinates) -> Result<bool> {
        match self.fetch_current(coordinates).await {
            Ok(_) => Ok(true),
            Err(HumidCheckError::InvalidData(_)) => Ok(false),
            Err(e) => Err(e),
        }
    }

    fn convert(coordinates: Coordinates, current: OpenMeteoCurrent) -> CurrentConditions {
        CurrentConditions {
            coordinates,
            temperature_c: current.temperature_2m,
            relative_humidity: current
                .relative_humidity_2m
                .filter(|h| h.is_finite() && (0.0..=100.0).contains(h)),
            fetched_at: Utc::now(),
        }
    }
}
