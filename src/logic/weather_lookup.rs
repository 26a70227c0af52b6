use crate::config::Config;
use crate::datasources::{LocationStrategy, Locator, OpenMeteoClient};
use crate::error::{HumidCheckError, Result};
use crate::models::{DenialReason, LookupOutcome};
use std::time::Duration;

/// Location-gated weather lookup.
///
/// Every call ends in exactly one `LookupOutcome`; transport and parse errors
/// are folded into `Failure`, location problems into `Denied`.
#[derive(Clone)]
pub struct WeatherLookupService {
    locator: Locator,
    weather: OpenMeteoClient,
}

impl WeatherLookupService {
    pub fn new(config: &Config) -> Result<Self> {
        let timeout = Duration::from_secs(config.weather.timeout_secs);
        let locator = Locator::new(&config.location, timeout)?;
        let weather = OpenMeteoClient::new(&config.weather)?;

        match locator.strategy() {
            LocationStrategy::Disabled => tracing::info!("Location sharing disabled"),
            LocationStrategy::Fixed(c) => tracing::info!("Using fixed location {}", c),
            LocationStrategy::GeoIp(url) => tracing::info!("Using IP geolocation via {}", url),
            LocationStrategy::Unsupported => {
                tracing::warn!("No location source configured - lookups will be denied")
            }
        }

        Ok(Self { locator, weather })
    }

    pub fn strategy(&self) -> &LocationStrategy {
        self.locator.strategy()
    }

    pub async fn lookup(&self) -> LookupOutcome {
        match self.locator.strategy() {
            LocationStrategy::Disabled => {
                return LookupOutcome::Denied {
                    reason: DenialReason::PermissionDenied,
                }
            }
            LocationStrategy::Unsupported => {
                return LookupOutcome::Denied {
                    reason: DenialReason::Unsupported,
                }
            }
            LocationStrategy::Fixed(_) | LocationStrategy::GeoIp(_) => {}
        }

        let coordinates = match self.locator.locate().await {
            Ok(c) => c,
            Err(HumidCheckError::LocationUnavailable(detail)) => {
                tracing::warn!("Location lookup failed: {}", detail);
                return LookupOutcome::Denied {
                    reason: DenialReason::Unavailable(detail),
                };
            }
            Err(e) => {
                tracing::warn!("Location lookup failed: {}", e);
                return LookupOutcome::Denied {
                    reason: DenialReason::Unavailable(e.to_string()),
                };
            }
        };

        match self.weather.fetch_current(coordinates).await {
            Ok(conditions) => {
                tracing::debug!(
                    temperature = conditions.temperature_c,
                    humidity = ?conditions.relative_humidity,
                    "Weather lookup succeeded"
                );
                LookupOutcome::Success { conditions }
            }
            Err(e) => {
                tracing::warn!("Failed to fetch weather data: {}", e);
                LookupOutcome::Failure {
                    reason: e.to_string(),
                }
            }
        }
    }

    /// Probe geolocation and the weather API, for `humidcheck check`.
    pub async fn check_connections(&self) -> ConnectionStatus {
        let mut status = ConnectionStatus::default();

        let coordinates = match self.locator.locate().await {
            Ok(c) => {
                status.location = true;
                c
            }
            Err(e) => {
                status.location_error = Some(e.to_string());
                return status;
            }
        };

        match self.weather.test_connection(coordinates).await {
            Ok(ok) => status.weather = ok,
            Err(e) => status.weather_error = Some(e.to_string()),
        }

        status
    }
}

#[derive(Debug, Clone, Default)]
pub struct ConnectionStatus {
    pub location: bool,
    pub weather: bool,
    pub location_error: Option<String>,
    pub weather_error: Option<String>,
}

impl ConnectionStatus {
    pub fn all_connected(&self) -> bool {
        self.location && self.weather
    }
}
