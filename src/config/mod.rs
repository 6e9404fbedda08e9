//! Configuration for the craps table
//!
//! Settings come from a TOML file (a missing file means defaults), then
//! `CRAPS_*` environment variables, then validation.

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{Error, Result};

/// Table configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TableConfig {
    /// Table surface width in layout units
    pub width: i32,
    /// Table surface height in layout units
    pub height: i32,
    /// Opening bank in cents
    pub starting_bank: i64,
    /// Chip denominations in cents, in tray order
    pub chip_denominations: Vec<u64>,
    /// Log a warning each tick while more nodes than this are alive
    pub component_warn_threshold: usize,
    /// Upper bound on event passes in one drain
    pub max_dispatch_passes: usize,
    /// Seed for reproducible dice
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dice_seed: Option<u64>,
    #[serde(with = "humantime_serde")]
    pub frame_interval: Duration,
    pub log_level: String,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            width: 100,
            height: 40,
            starting_bank: 10_000,
            chip_denominations: vec![100, 500, 2500, 10_000],
            component_warn_threshold: 1000,
            max_dispatch_passes: 10_000,
            dice_seed: None,
            frame_interval: Duration::from_millis(16),
            log_level: "info".to_string(),
        }
    }
}

impl TableConfig {
    /// Load from `path` (or the default location), apply env overrides, validate.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = path.map(Path::to_path_buf).or_else(Self::default_path);

        let mut config = match path {
            Some(path) if path.exists() => Self::load_from_file(&path)?,
            _ => Self::default(),
        };

        config.override_from_env()?;
        config.validate()?;
        Ok(config)
    }

    /// `<config dir>/craps-table/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("craps-table").join("config.toml"))
    }

    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read config file: {}", e)))?;

        let config: TableConfig = toml::from_str(&contents)
            .map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))?;

        Ok(config)
    }

    pub fn override_from_env(&mut self) -> Result<()> {
        self.override_from(|key| env::var(key).ok())
    }

    /// Apply `CRAPS_*` overrides read through `lookup`.
    pub fn override_from(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(val) = lookup("CRAPS_STARTING_BANK") {
            self.starting_bank = val
                .parse()
                .map_err(|_| Error::Config("Invalid starting bank".to_string()))?;
        }

        if let Some(val) = lookup("CRAPS_DICE_SEED") {
            self.dice_seed = Some(
                val.parse()
                    .map_err(|_| Error::Config("Invalid dice seed".to_string()))?,
            );
        }

        if let Some(val) = lookup("CRAPS_LOG_LEVEL") {
            self.log_level = val;
        }

        if let Some(val) = lookup("CRAPS_COMPONENT_WARN_THRESHOLD") {
            self.component_warn_threshold = val
                .parse()
                .map_err(|_| Error::Config("Invalid component warn threshold".to_string()))?;
        }

        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.width < 40 || self.height < 20 {
            return Err(Error::Config(format!(
                "Table must be at least 40x20, got {}x{}",
                self.width, self.height
            )));
        }

        if self.starting_bank <= 0 {
            return Err(Error::Config("Starting bank must be > 0".to_string()));
        }

        if self.chip_denominations.is_empty() || self.chip_denominations.len() > 8 {
            return Err(Error::Config("Chip tray must hold 1 to 8 denominations".to_string()));
        }

        if self.chip_denominations.contains(&0) {
            return Err(Error::Config("Chip denominations must be > 0".to_string()));
        }

        let mut seen = self.chip_denominations.clone();
        seen.sort_unstable();
        seen.dedup();
        if seen.len() != self.chip_denominations.len() {
            return Err(Error::Config("Chip denominations must be distinct".to_string()));
        }

        if self.component_warn_threshold == 0 {
            return Err(Error::Config("Component warn threshold must be > 0".to_string()));
        }

        if self.max_dispatch_passes == 0 {
            return Err(Error::Config("Max dispatch passes must be > 0".to_string()));
        }

        if self.frame_interval.is_zero() {
            return Err(Error::Config("Frame interval must be > 0".to_string()));
        }

        if self.log_level.trim().is_empty() {
            return Err(Error::Config("Log level cannot be empty".to_string()));
        }

        Ok(())
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, contents)
            .map_err(|e| Error::Config(format!("Failed to write config: {}", e)))?;

        Ok(())
    }
}
