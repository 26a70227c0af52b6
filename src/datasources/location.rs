use crate::config::LocationConfig;
use crate::error::{HumidCheckError, Result};
use crate::models::Coordinates;
use serde::Deserialize;
use std::time::Duration;

const USER_AGENT: &str = concat!("humidcheck/", env!("CARGO_PKG_VERSION"));

/// How the device position is obtained.
#[derive(Debug, Clone, PartialEq)]
pub enum LocationStrategy {
    /// Location sharing is off.
    Disabled,
    Fixed(Coordinates),
    GeoIp(String),
    /// Nothing configured that could produce a position.
    Unsupported,
}

impl LocationStrategy {
    pub fn from_config(config: &LocationConfig) -> Self {
        if !config.enabled {
            return LocationStrategy::Disabled;
        }
        if let Some(coords) = config.coordinates() {
            return LocationStrategy::Fixed(coords);
        }
        if config.use_geoip && !config.geoip_url.is_empty() {
            return LocationStrategy::GeoIp(config.geoip_url.clone());
        }
        LocationStrategy::Unsupported
    }
}

#[derive(Debug, Deserialize)]
struct GeoIpResponse {
    latitude: Option<f64>,
    longitude: Option<f64>,
    #[serde(default)]
    city: Option<String>,
    #[serde(default)]
    error: Option<bool>,
    #[serde(default)]
    reason: Option<String>,
}

/// Resolves device coordinates from configuration or IP geolocation.
#[derive(Clone)]
pub struct Locator {
    client: reqwest::Client,
    strategy: LocationStrategy,
}

impl Locator {
    pub fn new(config: &LocationConfig, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            strategy: LocationStrategy::from_config(config),
        })
    }

    pub fn strategy(&self) -> &LocationStrategy {
        &self.strategy
    }

    /// Resolve coordinates for a strategy that can produce them.
    ///
    /// Callers are expected to handle `Disabled` and `Unsupported` before
    /// asking; both return `LocationUnavailable` here.
    pub async fn locate(&self) -> Result<Coordinates> {
        match &self.strategy {
            LocationStrategy::Fixed(coords) => Ok(*coords),
            LocationStrategy::GeoIp(url) => self.geoip_lookup(url).await,
            LocationStrategy::Disabled => Err(HumidCheckError::LocationUnavailable(
                "location sharing is disabled".into(),
            )),
            LocationStrategy::Unsupported => Err(HumidCheckError::LocationUnavailable(
                "no location source configured".into(),
            )),
        }
    }

    async fn geoip_lookup(&self, url: &str) -> Result<Coordinates> {
        let response = self.client.get(url).send().await.map_err(|e| {
            HumidCheckError::LocationUnavailable(format!("geolocation request failed: {}", e))
        })?;

        if !response.status().is_success() {
            return Err(HumidCheckError::LocationUnavailable(format!(
                "geolocation returned {}",
                response.status()
            )));
        }

        let body: GeoIpResponse = response.json().await.map_err(|e| {
            HumidCheckError::LocationUnavailable(format!("unreadable geolocation response: {}", e))
        })?;

        if body.error.unwrap_or(false) {
            return Err(HumidCheckError::LocationUnavailable(
                body.reason.unwrap_or_else(|| "geolocation refused".into()),
            ));
        }

        let coords = match (body.latitude, body.longitude) {
            (Some(lat), Some(lon)) => Coordinates::new(lat, lon),
            _ => {
                return Err(HumidCheckError::LocationUnavailable(
                    "geolocation response has no coordinates".into(),
                ))
            }
        };

        if !coords.is_valid() {
            return Err(HumidCheckError::LocationUnavailable(format!(
                "geolocation returned out-of-range coordinates {}",
                coords
            )));
        }

        match body.city {
            Some(city) => tracing::info!("Located near {} ({})", city, coords),
            None => tracing::info!("Located at {}", coords),
        }
        Ok(coords)
    }
}
