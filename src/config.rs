use crate::error::{HumidCheckError, Result};
use crate::models::Coordinates;
use dialoguer::{Confirm, Input};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const DEFAULT_GEOIP_URL: &str = "https://ipapi.co/json/";
const DEFAULT_WEATHER_URL: &str = "https://api.open-meteo.com/v1";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub location: LocationConfig,
    #[serde(default)]
    pub weather: WeatherConfig,
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LocationConfig {
    /// Master switch for location sharing. Off means every lookup is denied.
    #[serde(default = "default_true")]
    pub enabled: bool,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    #[serde(default = "default_true")]
    pub use_geoip: bool,
    #[serde(default = "default_geoip_url")]
    pub geoip_url: String,
}

impl LocationConfig {
    /// Fixed coordinates, when both halves are configured.
    pub fn coordinates(&self) -> Option<Coordinates> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => Some(Coordinates::new(lat, lon)),
            _ => None,
        }
    }
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            latitude: None,
            longitude: None,
            use_geoip: true,
            geoip_url: default_geoip_url(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WeatherConfig {
    #[serde(default = "default_weather_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            base_url: default_weather_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Initial input values shown when the checker opens.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DefaultsConfig {
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    #[serde(default = "default_relative_humidity")]
    pub relative_humidity: f64,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            temperature: default_temperature(),
            relative_humidity: default_relative_humidity(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_geoip_url() -> String {
    DEFAULT_GEOIP_URL.to_string()
}

fn default_weather_url() -> String {
    DEFAULT_WEATHER_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_temperature() -> f64 {
    22.0
}

fn default_relative_humidity() -> f64 {
    50.0
}

impl Config {
    /// Load configuration from the override path or the standard locations.
    /// A missing file yields the built-in defaults; an unreadable or invalid
    /// one is an error.
    pub fn load(config_override: Option<&PathBuf>) -> Result<Self> {
        let config_path = match config_override {
            Some(p) => {
                if !p.exists() {
                    return Err(HumidCheckError::Config(format!(
                        "Config file not found at {:?}",
                        p
                    )));
                }
                p.clone()
            }
            None => Self::find_config_path()?,
        };

        if !config_path.exists() {
            tracing::info!("No config file found, using defaults");
            return Ok(Self::default());
        }

        let config_str = std::fs::read_to_string(&config_path)
            .map_err(|e| HumidCheckError::Config(format!("Failed to read config: {}", e)))?;

        let config = Self::from_yaml(&config_str)?;
        tracing::info!("Loaded config from {}", config_path.display());
        Ok(config)
    }

    /// Parse YAML after substituting `${VAR}` placeholders from the environment.
    pub fn from_yaml(content: &str) -> Result<Self> {
        let content = Self::substitute_env_vars(content)?;

        let config: Config = serde_yaml::from_str(&content)
            .map_err(|e| HumidCheckError::Config(format!("Failed to parse config: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.location.latitude.is_some() != self.location.longitude.is_some() {
            return Err(HumidCheckError::Config(
                "location.latitude and location.longitude must be set together".into(),
            ));
        }
        if let Some(coords) = self.location.coordinates() {
            if !coords.is_valid() {
                return Err(HumidCheckError::Config(format!(
                    "coordinates out of range: {}",
                    coords
                )));
            }
        }
        if self.weather.timeout_secs == 0 {
            return Err(HumidCheckError::Config(
                "weather.timeout_secs must be greater than zero".into(),
            ));
        }
        Ok(())
    }

    /// Search for config.yaml in standard locations.
    /// Returns the path of the first found config, or the XDG default path if none found.
    fn find_config_path() -> Result<PathBuf> {
        let local_config = PathBuf::from("config/config.yaml");
        if local_config.exists() {
            return Ok(local_config);
        }

        Self::default_config_path()
    }

    /// Default path for writing new config files (~/.config/humidcheck/config.yaml).
    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| HumidCheckError::Config("Cannot determine config directory".into()))?
            .join("humidcheck");
        Ok(config_dir.join("config.yaml"))
    }

    /// Run interactive setup prompts and write config to disk.
    pub fn setup_interactive() -> Result<(Self, PathBuf)> {
        println!();
        println!("Let's set up humidcheck!");
        println!();

        println!("Location");
        let enabled = Confirm::new()
            .with_prompt("  Allow location-based weather lookups?")
            .default(true)
            .interact()
            .map_err(|e| HumidCheckError::Config(format!("Input error: {}", e)))?;

        let mut location = LocationConfig {
            enabled,
            ..LocationConfig::default()
        };

        if enabled {
            let fixed = Confirm::new()
                .with_prompt("  Use fixed coordinates instead of IP geolocation?")
                .default(false)
                .interact()
                .map_err(|e| HumidCheckError::Config(format!("Input error: {}", e)))?;

            if fixed {
                let latitude: f64 = Input::new()
                    .with_prompt("  Latitude")
                    .default(35.68)
                    .validate_with(|v: &f64| {
                        if (-90.0..=90.0).contains(v) {
                            Ok(())
                        } else {
                            Err("latitude must be within -90..90")
                        }
                    })
                    .interact_text()
                    .map_err(|e| HumidCheckError::Config(format!("Input error: {}", e)))?;

                let longitude: f64 = Input::new()
                    .with_prompt("  Longitude")
                    .default(139.69)
                    .validate_with(|v: &f64| {
                        if (-180.0..=180.0).contains(v) {
                            Ok(())
                        } else {
                            Err("longitude must be within -180..180")
                        }
                    })
                    .interact_text()
                    .map_err(|e| HumidCheckError::Config(format!("Input error: {}", e)))?;

                location.latitude = Some(latitude);
                location.longitude = Some(longitude);
                location.use_geoip = false;
            }
        }

        println!();

        println!("Default inputs");
        let temperature: f64 = Input::new()
            .with_prompt("  Temperature (°C)")
            .default(default_temperature())
            .interact_text()
            .map_err(|e| HumidCheckError::Config(format!("Input error: {}", e)))?;

        let relative_humidity: f64 = Input::new()
            .with_prompt("  Relative humidity (%)")
            .default(default_relative_humidity())
            .interact_text()
            .map_err(|e| HumidCheckError::Config(format!("Input error: {}", e)))?;

        println!();

        let config = Config {
            location,
            weather: WeatherConfig::default(),
            defaults: DefaultsConfig {
                temperature,
                relative_humidity,
            },
        };

        let config_path = Self::default_config_path()?;
        config.write_to(&config_path)?;

        println!("Configuration saved to {}", config_path.display());
        println!();

        Ok((config, config_path))
    }

    pub fn write_to(&self, path: &PathBuf) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let yaml = serde_yaml::to_string(self)
            .map_err(|e| HumidCheckError::Config(format!("Failed to serialize config: {}", e)))?;

        let content = format!(
            "# humidcheck configuration\n# Generated by `humidcheck init`\n# Environment variable substitution (${{VAR}}) is supported.\n\n{}",
            yaml
        );
        std::fs::write(path, content)?;
        Ok(())
    }

    fn substitute_env_vars(content: &str) -> Result<String> {
        let mut result = content.to_string();

        let re = regex_lite::Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
            .map_err(|e| HumidCheckError::Config(format!("Invalid substitution pattern: {}", e)))?;

        for cap in re.captures_iter(content) {
            let var_name = &cap[1];
            let placeholder = &cap[0];
            if let Ok(value) = std::env::var(var_name) {
                result = result.replace(placeholder, &value);
            }
        }

        Ok(result)
    }

    pub fn data_dir() -> Result<PathBuf> {
        if let Ok(dir) = std::env::var("HUMIDCHECK_DATA_DIR") {
            let p = PathBuf::from(dir);
            std::fs::create_dir_all(&p)?;
            return Ok(p);
        }

        let data_dir = dirs::data_dir()
            .ok_or_else(|| HumidCheckError::Config("Cannot determine data directory".into()))?
            .join("humidcheck");

        std::fs::create_dir_all(&data_dir)?;
        Ok(data_dir)
    }

    pub fn log_path() -> Result<PathBuf> {
        Ok(Self::data_dir()?.join("humidcheck.log"))
    }
}
