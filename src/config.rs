use crate::datasources::openweathermap::API_BASE_URL;
use crate::error::{PumpwiseError, Result};
use crate::logic::rules::EngineThresholds;
use crate::models::{CropProfile, CropTable, FieldState};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable that overrides the configured OpenWeatherMap key.
pub const API_KEY_ENV: &str = "PUMPWISE_OWM_API_KEY";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub field: FieldConfig,
    pub openweathermap: Option<OpenWeatherMapConfig>,
    #[serde(default)]
    pub engine: EngineThresholds,
    /// Extra crops, or replacements for built-in ones with the same name.
    #[serde(default)]
    pub crops: Vec<CropProfile>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FieldConfig {
    pub location: String,
    pub crop: String,
    pub area_m2: f64,
    pub pump_flow_rate_lpm: f64,
    pub tank_capacity_liters: f64,
    /// Sensor readings used when none are given on the command line.
    #[serde(default = "default_soil_moisture")]
    pub soil_moisture_percent: f64,
    #[serde(default = "default_tank_level")]
    pub tank_level_percent: f64,
}

fn default_soil_moisture() -> f64 {
    35.0
}

fn default_tank_level() -> f64 {
    70.0
}

impl FieldConfig {
    pub fn field_state(&self) -> FieldState {
        FieldState {
            crop_name: self.crop.clone(),
            soil_moisture_percent: self.soil_moisture_percent,
            tank_level_percent: self.tank_level_percent,
            field_area_m2: self.area_m2,
            pump_flow_rate_lpm: self.pump_flow_rate_lpm,
            tank_capacity_liters: self.tank_capacity_liters,
        }
    }
}

#[derive(Clone, Deserialize, Serialize)]
pub struct OpenWeatherMapConfig {
    pub api_key: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_base_url() -> String {
    API_BASE_URL.to_string()
}

impl std::fmt::Debug for OpenWeatherMapConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenWeatherMapConfig")
            .field("api_key", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl Config {
    /// Load config from `config_override`, or search the standard locations.
    /// Falls back to built-in defaults when searching finds nothing.
    pub fn load(config_override: Option<PathBuf>) -> Result<Self> {
        let config_path = match config_override {
            Some(p) if !p.exists() => {
                return Err(PumpwiseError::Config(format!(
                    "Config file not found at {:?}",
                    p
                )));
            }
            Some(p) => Some(p),
            None => Self::find_config_path(),
        };

        let mut config = match config_path {
            Some(path) => {
                tracing::debug!("Loading config from {}", path.display());
                let config_str = std::fs::read_to_string(&path)
                    .map_err(|e| PumpwiseError::Config(format!("Failed to read config: {}", e)))?;
                Self::from_yaml_str(&config_str)?
            }
            None => {
                tracing::info!("No config file found, using defaults");
                Self::default()
            }
        };

        if let Ok(key) = std::env::var(API_KEY_ENV) {
            if !key.is_empty() {
                let base_url = config
                    .openweathermap
                    .take()
                    .map(|c| c.base_url)
                    .unwrap_or_else(default_base_url);
                config.openweathermap = Some(OpenWeatherMapConfig {
                    api_key: key,
                    base_url,
                });
            }
        }

        Ok(config)
    }

    /// Parse YAML after substituting `${VAR}` references from the environment.
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let content = Self::substitute_env_vars(content)?;
        let config: Config = serde_yaml::from_str(&content)
            .map_err(|e| PumpwiseError::Config(format!("Failed to parse config: {}", e)))?;
        config.engine.validate()?;
        Ok(config)
    }

    /// Search for config.yaml in the working directory, then the XDG config directory.
    fn find_config_path() -> Option<PathBuf> {
        let local_config = PathBuf::from("config/config.yaml");
        if local_config.exists() {
            return Some(local_config);
        }

        dirs::config_dir()
            .map(|dir| dir.join("pumpwise").join("config.yaml"))
            .filter(|p| p.exists())
    }

    fn substitute_env_vars(content: &str) -> Result<String> {
        let mut result = content.to_string();

        let re = regex_lite::Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
            .map_err(|e| PumpwiseError::Config(format!("Invalid substitution pattern: {}", e)))?;

        for cap in re.captures_iter(content) {
            let var_name = &cap[1];
            let placeholder = &cap[0];
            if let Ok(value) = std::env::var(var_name) {
                result = result.replace(placeholder, &value);
            }
        }

        Ok(result)
    }

    /// Built-in crops merged with any configured ones.
    pub fn crop_table(&self) -> Result<CropTable> {
        Ok(CropTable::with_overrides(&self.crops)?)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            field: FieldConfig {
                location: "Hyderabad".into(),
                crop: "Rice".into(),
                area_m2: 50.0,
                pump_flow_rate_lpm: 10.0,
                tank_capacity_liters: 500.0,
                soil_moisture_percent: default_soil_moisture(),
                tank_level_percent: default_tank_level(),
            },
            openweathermap: None,
            engine: EngineThresholds::default(),
            crops: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigurationError;

    const SAMPLE: &str = r#"
field:
  location: Nagpur
  crop: Cotton
  area_m2: 120
  pump_flow_rate_lpm: 25
  tank_capacity_liters: 2000
openweathermap:
  api_key: ${PUMPWISE_TEST_OWM_KEY}
engine:
  rain_skip_mm: 3.5
crops:
  - name: Sorghum
    soil_moisture_threshold: 33
    water_need_per_m2: 4.5
"#;

    #[test]
    fn parse_sample_config() {
        std::env::set_var("PUMPWISE_TEST_OWM_KEY", "secret-key");
        let config = Config::from_yaml_str(SAMPLE).unwrap();

        assert_eq!(config.field.location, "Nagpur");
        assert_eq!(config.field.soil_moisture_percent, 35.0);
        assert_eq!(config.field.tank_level_percent, 70.0);

        let owm = config.openweathermap.as_ref().unwrap();
        assert_eq!(owm.api_key, "secret-key");
        assert_eq!(owm.base_url, API_BASE_URL);

        assert_eq!(config.engine.low_tank_percent, 20.0);
        assert_eq!(config.engine.rain_skip_mm, 3.5);

        let table = config.crop_table().unwrap();
        assert_eq!(table.lookup("sorghum").water_need_per_m2, 4.5);
    }

    #[test]
    fn invalid_engine_thresholds_rejected() {
        let negative_rain = SAMPLE.replace("rain_skip_mm: 3.5", "rain_skip_mm: -1");
        assert!(matches!(
            Config::from_yaml_str(&negative_rain),
            Err(PumpwiseError::Configuration(
                ConfigurationError::ThresholdOutOfRange {
                    name: "rain_skip_mm",
                    ..
                }
            ))
        ));

        let nan_tank = SAMPLE.replace("rain_skip_mm: 3.5", "low_tank_percent: .nan");
        assert!(matches!(
            Config::from_yaml_str(&nan_tank),
            Err(PumpwiseError::Configuration(
                ConfigurationError::ThresholdOutOfRange {
                    name: "low_tank_percent",
                    ..
                }
            ))
        ));
    }

    #[test]
    fn unset_variables_left_in_place() {
        let out = Config::substitute_env_vars("key: ${PUMPWISE_TEST_SURELY_UNSET}").unwrap();
        assert_eq!(out, "key: ${PUMPWISE_TEST_SURELY_UNSET}");
    }

    #[test]
    fn api_key_redacted_in_debug() {
        let owm = OpenWeatherMapConfig {
            api_key: "super-secret".into(),
            base_url: default_base_url(),
        };
        let debug = format!("{:?}", owm);
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn invalid_configured_crop_rejected() {
        let mut config = Config::default();
        config
            .crops
            .push(CropProfile::new("Rice", 150.0, 8.0, None));
        assert!(matches!(
            config.crop_table(),
            Err(PumpwiseError::Configuration(_))
        ));
    }

    #[test]
    fn defaults_match_dashboard() {
        let field = Config::default().field.field_state();
        assert_eq!(field.crop_name, "Rice");
        assert_eq!(field.soil_moisture_percent, 35.0);
        assert_eq!(field.tank_level_percent, 70.0);
        assert_eq!(field.field_area_m2, 50.0);
        assert_eq!(field.pump_flow_rate_lpm, 10.0);
        assert_eq!(field.tank_capacity_liters, 500.0);
    }
}
