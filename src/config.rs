// Application settings.
// Loads config.toml from the platform config dir and applies KPIDASH_* overrides.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::error::{DashError, Result};

/// Runtime settings for the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Delay between login and revealing the dashboard.
    pub loading_delay_ms: u64,
    /// Delay before the red KPI report opens after a senior executive commit.
    pub red_kpi_delay_ms: u64,
    /// Event loop tick used to advance timers.
    pub tick_rate_ms: u64,
    /// Default tracing filter directive.
    pub log_filter: String,
    /// Overrides the platform data directory (flags and logs).
    pub data_dir: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            loading_delay_ms: 1500,
            red_kpi_delay_ms: 100,
            tick_rate_ms: 50,
            log_filter: "info".to_string(),
            data_dir: None,
        }
    }
}

impl Settings {
    /// Load settings from the default config path, then the environment.
    pub fn load() -> Result<Self> {
        let mut settings = match crate::prefs::config_path() {
            Some(path) => Self::from_file(&path)?,
            None => Self::default(),
        };
        settings.apply_env(|name| std::env::var(name).ok())?;
        Ok(settings)
    }

    /// Read settings from a TOML file. A missing file yields defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = fs::read_to_string(path)?;
        Self::from_toml(&raw)
    }

    pub fn from_toml(raw: &str) -> Result<Self> {
        Ok(toml::from_str(raw)?)
    }

    /// Apply `KPIDASH_*` overrides using the given variable lookup.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("KPIDASH_LOADING_DELAY_MS") {
            self.loading_delay_ms = parse_millis("KPIDASH_LOADING_DELAY_MS", v)?;
        }
        if let Some(v) = lookup("KPIDASH_RED_KPI_DELAY_MS") {
            self.red_kpi_delay_ms = parse_millis("KPIDASH_RED_KPI_DELAY_MS", v)?;
        }
        if let Some(v) = lookup("KPIDASH_TICK_MS") {
            self.tick_rate_ms = parse_millis("KPIDASH_TICK_MS", v)?.max(1);
        }
        if let Some(v) = lookup("KPIDASH_DATA_DIR") {
            self.data_dir = Some(PathBuf::from(v));
        }
        if let Some(v) = lookup("KPIDASH_LOG") {
            self.log_filter = v;
        }
        Ok(())
    }

    pub fn loading_delay(&self) -> Duration {
        Duration::from_millis(self.loading_delay_ms)
    }

    pub fn red_kpi_delay(&self) -> Duration {
        Duration::from_millis(self.red_kpi_delay_ms)
    }

    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms.max(1))
    }
}

fn parse_millis(name: &'static str, value: String) -> Result<u64> {
    value
        .trim()
        .parse()
        .map_err(|_| DashError::InvalidSetting { name, value })
}
