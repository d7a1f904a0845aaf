use crate::error::ConfigurationError;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Crop returned when a lookup does not match any entry.
pub const DEFAULT_CROP: &str = "Wheat";

/// Irrigation constants for a single crop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CropProfile {
    pub name: String,
    /// Soil at or above this moisture (%) is considered adequately watered.
    pub soil_moisture_threshold: f64,
    /// Liters per square meter for one full irrigation cycle.
    pub water_need_per_m2: f64,
    /// Descriptive only; the decision engine does not read it.
    #[serde(default)]
    pub optimal_temp_c: Option<f64>,
}

impl CropProfile {
    pub fn new(
        name: impl Into<String>,
        soil_moisture_threshold: f64,
        water_need_per_m2: f64,
        optimal_temp_c: Option<f64>,
    ) -> Self {
        Self {
            name: name.into(),
            soil_moisture_threshold,
            water_need_per_m2,
            optimal_temp_c,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if !(0.0..=100.0).contains(&self.soil_moisture_threshold) {
            return Err(ConfigurationError::SoilThresholdOutOfRange {
                crop: self.name.clone(),
                value: self.soil_moisture_threshold,
            });
        }
        if !self.water_need_per_m2.is_finite() || self.water_need_per_m2 <= 0.0 {
            return Err(ConfigurationError::NonPositiveWaterNeed {
                crop: self.name.clone(),
                value: self.water_need_per_m2,
            });
        }
        Ok(())
    }

    fn matches(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name.trim())
    }
}

impl std::fmt::Display for CropProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Fixed crop lookup table with one designated fallback entry.
#[derive(Debug, Clone)]
pub struct CropTable {
    profiles: Vec<CropProfile>,
    fallback: usize,
}

impl CropTable {
    /// Build a table, checking every profile and that `fallback` names one of them.
    pub fn new(profiles: Vec<CropProfile>, fallback: &str) -> Result<Self, ConfigurationError> {
        for (i, profile) in profiles.iter().enumerate() {
            profile.validate()?;
            if profiles[..i].iter().any(|p| p.matches(&profile.name)) {
                return Err(ConfigurationError::DuplicateCrop(profile.name.clone()));
            }
        }

        let fallback = profiles
            .iter()
            .position(|p| p.matches(fallback))
            .ok_or_else(|| ConfigurationError::UnknownFallbackCrop(fallback.to_string()))?;

        Ok(Self { profiles, fallback })
    }

    /// The built-in table. Unknown crops fall back to Wheat.
    pub fn builtin() -> Self {
        Self {
            profiles: vec![
                CropProfile::new("Wheat", 35.0, 4.0, Some(25.0)),
                CropProfile::new("Rice", 45.0, 8.0, Some(30.0)),
                CropProfile::new("Cotton", 40.0, 5.0, Some(32.0)),
                CropProfile::new("Corn", 38.0, 6.0, Some(28.0)),
                CropProfile::new("Tomato", 42.0, 3.5, Some(27.0)),
            ],
            fallback: 0,
        }
    }

    /// Built-in table with `extra` profiles replacing same-named entries or appended.
    pub fn with_overrides(extra: &[CropProfile]) -> Result<Self, ConfigurationError> {
        let mut profiles = Self::builtin().profiles;
        for profile in extra {
            match profiles.iter_mut().find(|p| p.matches(&profile.name)) {
                Some(existing) => *existing = profile.clone(),
                None => profiles.push(profile.clone()),
            }
        }
        Self::new(profiles, DEFAULT_CROP)
    }

    /// Find a crop by name, ignoring case and surrounding whitespace.
    /// Unrecognized names resolve to the fallback profile.
    pub fn lookup(&self, name: &str) -> &CropProfile {
        self.find(name).unwrap_or_else(|| self.fallback())
    }

    /// Exact lookup without fallback.
    pub fn find(&self, name: &str) -> Option<&CropProfile> {
        self.profiles.iter().find(|p| p.matches(name))
    }

    pub fn fallback(&self) -> &CropProfile {
        &self.profiles[self.fallback]
    }

    pub fn profiles(&self) -> &[CropProfile] {
        &self.profiles
    }
}

impl Default for CropTable {
    fn default() -> Self {
        Self::builtin()
    }
}

static BUILTIN_CROPS: LazyLock<CropTable> = LazyLock::new(CropTable::builtin);

/// Look up a crop in the built-in table, falling back to [`DEFAULT_CROP`].
pub fn lookup_crop_profile(name: &str) -> &'static CropProfile {
    BUILTIN_CROPS.lookup(name)
}
