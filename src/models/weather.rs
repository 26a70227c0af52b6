use chrono::{DateTime, Utc};
use serde::Serialize;

/// Geographic coordinates of the device.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }
}

impl std::fmt::Display for Coordinates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

/// Current conditions reported by the weather API.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrentConditions {
    pub coordinates: Coordinates,
    pub temperature_c: f64,
    /// Not every response carries humidity.
    pub relative_humidity: Option<f64>,
    pub fetched_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum DenialReason {
    /// Location sharing is switched off.
    PermissionDenied,
    /// No way to locate this device.
    Unsupported,
    /// Locating was attempted and did not produce a position.
    Unavailable(String),
}

impl DenialReason {
    pub fn message(&self) -> String {
        match self {
            DenialReason::PermissionDenied => "Location access was denied".to_string(),
            DenialReason::Unsupported => {
                "Location is not supported: set latitude/longitude or enable geoip".to_string()
            }
            DenialReason::Unavailable(detail) => {
                format!("Could not determine your location: {}", detail)
            }
        }
    }
}

/// Result of one location-based weather lookup.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum LookupOutcome {
    Success { conditions: CurrentConditions },
    Failure { reason: String },
    Denied { reason: DenialReason },
}

impl LookupOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, LookupOutcome::Success { .. })
    }
}
