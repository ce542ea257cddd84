//! Configuration loading for Pressline services
//!
//! TOML file resolution priority:
//! 1. Explicit path (command-line argument, highest priority)
//! 2. `PRESSLINE_CONFIG` environment variable
//! 3. Platform config directory (`<config dir>/pressline/pressline.toml`)
//! 4. Compiled defaults (fallback)
//!
//! A missing config file degrades to defaults with a warning; it never
//! terminates startup. A malformed or invalid file is an error.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::warn;

/// Environment variable naming an explicit config file path
pub const CONFIG_ENV_VAR: &str = "PRESSLINE_CONFIG";

/// Top-level TOML configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub logging: LoggingConfig,
    pub processing: ProcessingConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level directive (`error`, `warn`, `info`, `debug`, `trace`,
    /// or any `tracing_subscriber::EnvFilter` expression)
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_string() }
    }
}

/// Tuning for the simulated processing pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessingConfig {
    pub transcode: StageSettings,
    pub metadata_extract: StageSettings,
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            transcode: StageSettings::transcode_defaults(),
            metadata_extract: StageSettings::metadata_extract_defaults(),
        }
    }
}

/// Latency range and failure probability for one simulated stage
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageSettings {
    pub min_latency_ms: u64,
    pub max_latency_ms: u64,
    /// Probability in [0, 1] that a stage run fails
    pub failure_probability: f64,
}

impl StageSettings {
    /// Stand-in for real audio transcoding: 5-10 s, 10% failure
    pub fn transcode_defaults() -> Self {
        Self {
            min_latency_ms: 5_000,
            max_latency_ms: 10_000,
            failure_probability: 0.10,
        }
    }

    /// Stand-in for real metadata extraction: 1-3 s, 5% failure
    pub fn metadata_extract_defaults() -> Self {
        Self {
            min_latency_ms: 1_000,
            max_latency_ms: 3_000,
            failure_probability: 0.05,
        }
    }

    /// Zero-latency settings, useful for tests and demos
    pub fn instant(failure_probability: f64) -> Self {
        Self {
            min_latency_ms: 0,
            max_latency_ms: 0,
            failure_probability,
        }
    }

    fn validate(&self, stage: &str) -> Result<()> {
        if self.min_latency_ms > self.max_latency_ms {
            return Err(Error::Config(format!(
                "{}: min_latency_ms ({}) exceeds max_latency_ms ({})",
                stage, self.min_latency_ms, self.max_latency_ms
            )));
        }
        if !(0.0..=1.0).contains(&self.failure_probability) {
            return Err(Error::Config(format!(
                "{}: failure_probability ({}) must be within [0, 1]",
                stage, self.failure_probability
            )));
        }
        Ok(())
    }
}

impl TomlConfig {
    pub fn validate(&self) -> Result<()> {
        self.processing.transcode.validate("processing.transcode")?;
        self.processing
            .metadata_extract
            .validate("processing.metadata_extract")?;
        Ok(())
    }
}

/// Resolve the config file path without touching the filesystem.
///
/// Returns `None` when neither an explicit path, the environment variable,
/// nor a platform config directory is available.
pub fn resolve_config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }

    if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
        return Some(PathBuf::from(path));
    }

    dirs::config_dir().map(|d| d.join("pressline").join("pressline.toml"))
}

/// Load configuration from the resolved path, falling back to defaults.
pub fn load_config(explicit: Option<&Path>) -> Result<TomlConfig> {
    let config = match resolve_config_path(explicit) {
        Some(path) if path.exists() => {
            let content = std::fs::read_to_string(&path)?;
            let config: TomlConfig = toml::from_str(&content).map_err(|e| {
                Error::Config(format!("Failed to parse {}: {}", path.display(), e))
            })?;
            config
        }
        Some(path) => {
            warn!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            TomlConfig::default()
        }
        None => {
            warn!("No config directory available, using defaults");
            TomlConfig::default()
        }
    };

    config.validate()?;
    Ok(config)
}

/// Write configuration to a TOML file, creating parent directories.
pub fn write_config(config: &TomlConfig, path: &Path) -> Result<()> {
    let content = toml::to_string_pretty(config)
        .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content)?;
    Ok(())
}
