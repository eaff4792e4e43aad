//! # Application Configuration
//!
//! Settings read from `printcost.toml`. Every field has a default, so an
//! absent file or an absent key is never an error:
//!
//! ```toml
//! data_dir = "."
//! language = "en"
//! default_electricity_cost_per_kwh = 0.30
//!
//! [wear]
//! mechanical_per_gram = 0.0001
//! time_per_hour = 0.05
//! electronic_fraction = 0.005
//! ```
//!
//! A file that exists but does not parse is a `ConfigError`.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::engine::WearRates;
use crate::errors::{CalcError, CalcResult};
use crate::file_io::write_atomic;

/// Default configuration file name
pub const CONFIG_FILE_NAME: &str = "printcost.toml";

/// Languages with bundled translation tables
pub const SUPPORTED_LANGUAGES: &[&str] = &["en", "de"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Directory holding the catalog files
    pub data_dir: PathBuf,
    /// Language code for user-facing text
    pub language: String,
    /// Rate filled into new projects when none is given
    pub default_electricity_cost_per_kwh: f64,
    pub wear: WearRates,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            data_dir: PathBuf::from("."),
            language: "en".to_string(),
            default_electricity_cost_per_kwh: 0.30,
            wear: WearRates::default(),
        }
    }
}

impl AppConfig {
    /// Load from `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> CalcResult<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(AppConfig::default());
        }

        let shown = path.display().to_string();
        let contents =
            fs::read_to_string(path).map_err(|e| CalcError::config(shown.clone(), e.to_string()))?;
        let config = AppConfig::from_toml_str(&contents).map_err(|e| match e {
            CalcError::ConfigError { reason, .. } => CalcError::config(shown.clone(), reason),
            other => other,
        })?;

        debug!(path = %path.display(), language = %config.language, "config loaded");
        Ok(config)
    }

    /// Parse configuration from TOML text.
    pub fn from_toml_str(contents: &str) -> CalcResult<Self> {
        let config: AppConfig = toml::from_str(contents)
            .map_err(|e| CalcError::config("<string>", format!("TOML parsing error: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Write atomically to `path`.
    pub fn save(&self, path: &Path) -> CalcResult<()> {
        let contents = toml::to_string_pretty(self)
            .map_err(|e| CalcError::config(path.display().to_string(), e.to_string()))?;
        write_atomic(path, contents.as_bytes())
    }

    /// Catalog directory, resolved against `base` when relative.
    pub fn catalogs_dir(&self, base: &Path) -> PathBuf {
        if self.data_dir.is_absolute() {
            self.data_dir.clone()
        } else {
            base.join(&self.data_dir)
        }
    }

    /// Switch the language. Unknown codes are rejected.
    pub fn set_language(&mut self, code: &str) -> CalcResult<()> {
        let code = code.trim().to_lowercase();
        if !SUPPORTED_LANGUAGES.contains(&code.as_str()) {
            return Err(CalcError::invalid_input(
                "language",
                code,
                format!("Supported languages: {}", SUPPORTED_LANGUAGES.join(", ")),
            ));
        }
        self.language = code;
        Ok(())
    }

    fn validate(&self) -> CalcResult<()> {
        let rates = [
            ("default_electricity_cost_per_kwh", self.default_electricity_cost_per_kwh),
            ("wear.mechanical_per_gram", self.wear.mechanical_per_gram),
            ("wear.time_per_hour", self.wear.time_per_hour),
            ("wear.electronic_fraction", self.wear.electronic_fraction),
        ];
        for (field, value) in rates {
            if !value.is_finite() || value < 0.0 {
                return Err(CalcError::config(
                    "<string>",
                    format!("{field} must be a non-negative number"),
                ));
            }
        }
        Ok(())
    }
}
