//! Calculator Configuration - numeric options as operator-tunable TOML values
//!
//! Each struct implements `Default` with values that reproduce the reference
//! survey and IPR calculations, so behaviour is unchanged when no config file
//! is present.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

use super::defaults;

// ============================================================================
// Top-Level Config
// ============================================================================

/// Root configuration.
///
/// Load with `CalcConfig::load()` which searches:
/// 1. `$PETRO_CALC_CONFIG` env var
/// 2. `./petro_calc.toml`
/// 3. Built-in defaults
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CalcConfig {
    /// Trajectory integration options
    #[serde(default)]
    pub survey: SurveyConfig,

    /// Inflow performance options
    #[serde(default)]
    pub ipr: IprConfig,
}

impl CalcConfig {
    /// Load configuration using the standard search order:
    /// 1. `$PETRO_CALC_CONFIG` environment variable
    /// 2. `./petro_calc.toml` in the current working directory
    /// 3. Built-in defaults
    ///
    /// A file that fails to load is logged and the search moves on.
    pub fn load() -> Self {
        if let Ok(path) = std::env::var(defaults::CONFIG_ENV_VAR) {
            let p = PathBuf::from(&path);
            if p.exists() {
                match Self::load_from_file(&p) {
                    Ok(config) => {
                        info!(path = %p.display(), "Loaded config from {}", defaults::CONFIG_ENV_VAR);
                        return config;
                    }
                    Err(e) => {
                        warn!(path = %p.display(), error = %e, "Failed to load config from {}, falling back", defaults::CONFIG_ENV_VAR);
                    }
                }
            } else {
                warn!(path = %path, "{} points to non-existent file, falling back", defaults::CONFIG_ENV_VAR);
            }
        }

        let local = PathBuf::from(defaults::CONFIG_FILE_NAME);
        if local.exists() {
            match Self::load_from_file(&local) {
                Ok(config) => {
                    info!("Loaded config from ./{}", defaults::CONFIG_FILE_NAME);
                    return config;
                }
                Err(e) => {
                    warn!(error = %e, "Failed to load ./{}, using defaults", defaults::CONFIG_FILE_NAME);
                }
            }
        }

        info!("No {} found, using built-in defaults", defaults::CONFIG_FILE_NAME);
        Self::default()
    }

    /// Load from a specific TOML file path.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        Self::from_toml_str(&contents).map_err(|e| match e {
            ConfigError::Parse(_, err) => ConfigError::Parse(path.to_path_buf(), err),
            other => other,
        })
    }

    /// Parse and validate a TOML document.
    ///
    /// Unknown keys are logged as warnings and never fail the load.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        for w in &super::validation::validate_unknown_keys(contents) {
            warn!("{}", w);
        }

        let config: Self =
            toml::from_str(contents).map_err(|e| ConfigError::Parse(PathBuf::new(), e))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the current config to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Save config to a file.
    pub fn save_to_file(&self, path: &Path) -> Result<(), ConfigError> {
        let contents = self.to_toml()?;
        std::fs::write(path, contents).map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        info!(path = %path.display(), "Config saved");
        Ok(())
    }

    /// Validate all options.
    ///
    /// Rules:
    /// - `survey.dls_course_length` must be finite and > 0
    /// - `ipr.curve_points` must be >= 2 (a curve needs both endpoints)
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors: Vec<String> = Vec::new();

        let course = self.survey.dls_course_length;
        if !course.is_finite() || course <= 0.0 {
            errors.push(format!(
                "survey.dls_course_length must be a finite value > 0, got {course}"
            ));
        }

        if self.ipr.curve_points < 2 {
            errors.push(format!(
                "ipr.curve_points must be >= 2, got {}",
                self.ipr.curve_points
            ));
        }

        let (range_errors, range_warnings) = super::validation::validate_physical_ranges(self);
        errors.extend(range_errors);
        for w in &range_warnings {
            warn!("{}", w);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Cannot read or write config file {}: {1}", .0.display())]
    Io(PathBuf, #[source] std::io::Error),

    #[error("Invalid TOML in config file {}: {1}", .0.display())]
    Parse(PathBuf, #[source] toml::de::Error),

    #[error("Cannot serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Config rejected: {}", .0.join("; "))]
    Validation(Vec<String>),
}

// ============================================================================
// Survey
// ============================================================================

/// Quantity the ratio factor is computed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RatioFactorBasis {
    /// RF = (2 / DLS) · tan(DLS / 2) with DLS = β / ΔMD (reference behaviour)
    #[default]
    DoglegSeverity,
    /// RF = (2 / β) · tan(β / 2), the textbook circular-arc factor
    DoglegAngle,
}

/// How the mean heading of a segment is formed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AzimuthAveraging {
    /// (A₁ + A₂) / 2 (reference behaviour, wrong across north)
    #[default]
    Arithmetic,
    /// Shortest-arc mean via atan2
    Circular,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurveyConfig {
    #[serde(default)]
    pub ratio_factor_basis: RatioFactorBasis,

    #[serde(default)]
    pub azimuth_averaging: AzimuthAveraging,

    /// Reject surveys whose measured depth decreases
    #[serde(default = "default_validate_depths")]
    pub validate_depths: bool,

    /// Course length for reported dogleg severity
    #[serde(default = "default_dls_course_length")]
    pub dls_course_length: f64,
}

const fn default_validate_depths() -> bool {
    true
}
const fn default_dls_course_length() -> f64 {
    defaults::DLS_COURSE_LENGTH
}

impl Default for SurveyConfig {
    fn default() -> Self {
        Self {
            ratio_factor_basis: RatioFactorBasis::default(),
            azimuth_averaging: AzimuthAveraging::default(),
            validate_depths: default_validate_depths(),
            dls_course_length: default_dls_course_length(),
        }
    }
}

// ============================================================================
// Inflow Performance
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IprConfig {
    /// Points in a generated IPR curve, from p_wf = 0 to p_wf = p_r inclusive
    #[serde(default = "default_curve_points")]
    pub curve_points: usize,
}

const fn default_curve_points() -> usize {
    defaults::IPR_CURVE_POINTS
}

impl Default for IprConfig {
    fn default() -> Self {
        Self {
            curve_points: default_curve_points(),
        }
    }
}
