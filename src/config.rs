use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

use crate::models::{FactorCaps, MatchThresholds};

/// Errors raised while loading or validating settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid scoring settings: {0}")]
    InvalidScoring(String),
}

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    #[serde(default)]
    pub scoring: ScoringSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoringSettings {
    #[serde(default)]
    pub thresholds: ThresholdsConfig,
    #[serde(default)]
    pub caps: CapsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ThresholdsConfig {
    #[serde(default = "default_qualification")]
    pub qualification: u8,
    #[serde(default = "default_strong_match")]
    pub strong_match: u8,
    #[serde(default = "default_excellent_match")]
    pub excellent_match: u8,
    #[serde(default = "default_closing_soon_days")]
    pub closing_soon_days: i64,
    #[serde(default = "default_urgent_deadline_days")]
    pub urgent_deadline_days: i64,
}

impl Default for ThresholdsConfig {
    fn default() -> Self {
        Self {
            qualification: default_qualification(),
            strong_match: default_strong_match(),
            excellent_match: default_excellent_match(),
            closing_soon_days: default_closing_soon_days(),
            urgent_deadline_days: default_urgent_deadline_days(),
        }
    }
}

fn default_qualification() -> u8 {
    40
}

fn default_strong_match() -> u8 {
    75
}

fn default_excellent_match() -> u8 {
    80
}

fn default_closing_soon_days() -> i64 {
    30
}

fn default_urgent_deadline_days() -> i64 {
    60
}

#[derive(Debug, Clone, Deserialize)]
pub struct CapsConfig {
    #[serde(default = "default_category_cap")]
    pub category: f64,
    #[serde(default = "default_budget_cap")]
    pub budget: f64,
    #[serde(default = "default_geographic_cap")]
    pub geographic: f64,
    #[serde(default = "default_population_cap")]
    pub population: f64,
    #[serde(default = "default_experience_cap")]
    pub experience: f64,
}

impl Default for CapsConfig {
    fn default() -> Self {
        Self {
            category: default_category_cap(),
            budget: default_budget_cap(),
            geographic: default_geographic_cap(),
            population: default_population_cap(),
            experience: default_experience_cap(),
        }
    }
}

fn default_category_cap() -> f64 {
    30.0
}

fn default_budget_cap() -> f64 {
    25.0
}

fn default_geographic_cap() -> f64 {
    20.0
}

fn default_population_cap() -> f64 {
    15.0
}

fn default_experience_cap() -> f64 {
    10.0
}

impl ScoringSettings {
    /// Reject settings that would break the 0-100 score contract
    pub fn validate(&self) -> Result<(), SettingsError> {
        let t = &self.thresholds;
        if t.qualification > 100 || t.strong_match > 100 || t.excellent_match > 100 {
            return Err(SettingsError::InvalidScoring(
                "thresholds must be between 0 and 100".to_string(),
            ));
        }
        if t.strong_match > t.excellent_match {
            return Err(SettingsError::InvalidScoring(format!(
                "strong_match ({}) must not exceed excellent_match ({})",
                t.strong_match, t.excellent_match
            )));
        }

        let c = &self.caps;
        let caps = [c.category, c.budget, c.geographic, c.population, c.experience];
        if caps.iter().any(|cap| !cap.is_finite() || *cap < 0.0) {
            return Err(SettingsError::InvalidScoring(
                "factor caps must be non-negative".to_string(),
            ));
        }
        let sum: f64 = caps.iter().sum();
        if sum > 100.0 {
            return Err(SettingsError::InvalidScoring(format!(
                "factor caps sum to {sum}, above 100"
            )));
        }

        Ok(())
    }

    pub fn factor_caps(&self) -> FactorCaps {
        FactorCaps {
            category: self.caps.category,
            budget: self.caps.budget,
            geographic: self.caps.geographic,
            population: self.caps.population,
            experience: self.caps.experience,
        }
    }

    pub fn match_thresholds(&self) -> MatchThresholds {
        MatchThresholds {
            qualification: self.thresholds.qualification,
            strong_match: self.thresholds.strong_match,
            excellent_match: self.thresholds.excellent_match,
            closing_soon_days: self.thresholds.closing_soon_days,
            urgent_deadline_days: self.thresholds.urgent_deadline_days,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "json".to_string()
}

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with GRANT_MATCH__)
    pub fn load() -> Result<Self, SettingsError> {
        let settings = Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8080)?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., GRANT_MATCH__SERVER__PORT -> server.port
            .add_source(environment())
            .build()?;

        Self::finish(settings)
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(environment())
            .build()?;

        Self::finish(settings)
    }

    fn finish(config: Config) -> Result<Self, SettingsError> {
        let settings: Settings = config.try_deserialize()?;
        settings.scoring.validate()?;
        Ok(settings)
    }
}

fn environment() -> Environment {
    Environment::with_prefix("GRANT_MATCH")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_caps() {
        let caps = ScoringSettings::default().factor_caps();
        assert_eq!(caps, FactorCaps::default());
        assert_eq!(caps.category, 30.0);
        assert_eq!(caps.experience, 10.0);
    }

    #[test]
    fn test_default_thresholds() {
        let thresholds = ScoringSettings::default().match_thresholds();
        assert_eq!(thresholds, MatchThresholds::default());
        assert_eq!(thresholds.qualification, 40);
    }

    #[test]
    fn test_default_logging() {
        let level = default_log_level();
        let format = default_log_format();
        assert_eq!(level, "info");
        assert_eq!(format, "json");
    }

    #[test]
    fn test_validate_rejects_caps_above_100() {
        let mut scoring = ScoringSettings::default();
        scoring.caps.category = 60.0;
        assert!(matches!(scoring.validate(), Err(SettingsError::InvalidScoring(_))));
    }

    #[test]
    fn test_validate_rejects_inverted_thresholds() {
        let mut scoring = ScoringSettings::default();
        scoring.thresholds.strong_match = 90;
        assert!(scoring.validate().is_err());
        assert!(ScoringSettings::default().validate().is_ok());
    }

    #[test]
    fn test_default_config_file() {
        let raw = include_str!("../config/default.toml");
        let settings: Settings = toml::from_str(raw).unwrap();
        assert_eq!(settings.server.port, 8080);
        assert_eq!(settings.scoring.thresholds.qualification, 40);
        assert!(settings.scoring.validate().is_ok());
    }

    #[test]
    fn test_partial_scoring_section_uses_defaults() {
        let settings: Settings = toml::from_str(
            r#"
            [server]
            host = "127.0.0.1"
            port = 9000

            [scoring.thresholds]
            qualification = 50
            "#,
        )
        .unwrap();
        assert_eq!(settings.scoring.thresholds.qualification, 50);
        assert_eq!(settings.scoring.thresholds.strong_match, 75);
        assert_eq!(settings.scoring.caps.budget, 25.0);
        assert_eq!(settings.logging.format, "json");
    }
}
