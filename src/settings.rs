use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::relay::RelayConfig;

/// Environment variable naming a directory whose `Settings.toml` overrides the local one
pub const SECRETS_DIR_ENV: &str = "RELAY_SECRETS_DIR";

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct RelaySettings {
    pub webauthn: WebAuthnClientSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct WebAuthnClientSettings {
    /// Client identifier reported to the authentication service; empty if unset
    pub client_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LoggingSettings {
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl RelaySettings {
    /// Load settings from configuration files and environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Settings file cannot be read or parsed
    /// - TOML parsing fails
    pub fn load() -> Result<Self> {
        let mut sources = Vec::new();
        let mut settings = Self::load_base_settings(Path::new("."), &mut sources)?;
        Self::apply_env_overrides(&mut settings);

        // The logging level is only known once the files are read
        Self::initialize_logging(&settings.logging);
        for source in &sources {
            log::info!("{source}");
        }
        Ok(settings)
    }

    /// Parse settings from TOML text
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid settings TOML
    pub fn from_toml(toml: &str) -> Result<Self> {
        basic_toml::from_str(toml).context("Failed to parse settings TOML")
    }

    /// Configuration for a [`WebAuthnRelay`](crate::relay::WebAuthnRelay)
    #[must_use]
    pub fn relay_config(&self) -> RelayConfig {
        RelayConfig::new(self.webauthn.client_id.clone())
    }

    /// Initialize the logger once; later calls keep the first logger
    fn initialize_logging(logging: &LoggingSettings) {
        let result = env_logger::Builder::new()
            .parse_filters(&logging.level)
            .try_init();
        if result.is_err() {
            log::debug!("Logger already initialized, keeping existing configuration");
        }
    }

    /// Load base settings from TOML file(s) or use defaults
    /// Settings are loaded with the following priority (highest to lowest):
    /// 1. Environment variables (applied separately after loading base settings)
    /// 2. Settings.toml in `RELAY_SECRETS_DIR` (if specified and exists)
    /// 3. Settings.toml in `base_dir` (if exists)
    /// 4. Default settings
    ///
    /// Each file consulted is described in `sources` for logging once the
    /// logger is up.
    fn load_base_settings(base_dir: &Path, sources: &mut Vec<String>) -> Result<Self> {
        let mut settings = Self::default();

        let default_config_path = base_dir.join("Settings.toml");
        if default_config_path.exists() {
            settings = Self::read_file(&default_config_path)?;
            sources.push(format!(
                "Loaded base settings from {}",
                default_config_path.display()
            ));
        }

        if let Ok(secrets_dir) = std::env::var(SECRETS_DIR_ENV) {
            let secrets_path = Path::new(&secrets_dir).join("Settings.toml");
            if secrets_path.exists() {
                settings = Self::read_file(&secrets_path)?;
                sources.push(format!("Overriding settings from {}", secrets_path.display()));
            } else {
                sources.push(format!(
                    "{SECRETS_DIR_ENV} set but no Settings.toml found at: {}",
                    secrets_path.display()
                ));
            }
        }

        Ok(settings)
    }

    fn read_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_toml(&content).with_context(|| format!("Invalid settings in {}", path.display()))
    }

    /// Apply environment variable overrides to settings
    fn apply_env_overrides(settings: &mut Self) {
        if let Ok(client_id) = std::env::var("WEBAUTHN_CLIENT_ID") {
            settings.webauthn.client_id = client_id;
        }
        if let Ok(log_level) = std::env::var("RUST_LOG") {
            settings.logging.level = log_level;
        }
    }
}
