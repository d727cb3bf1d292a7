use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::TolkError;
use crate::locale::LocaleSet;

/// Top-level Tolk configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub tolk: TolkConfig,
    #[serde(default)]
    pub locales: LocalesConfig,
    #[serde(default)]
    pub chain: ChainConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub detect: DetectConfig,
}

/// General settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TolkConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for TolkConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Supported locales and the base locale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocalesConfig {
    #[serde(default = "default_supported")]
    pub supported: Vec<String>,
    #[serde(default = "default_base")]
    pub base: String,
}

impl Default for LocalesConfig {
    fn default() -> Self {
        Self {
            supported: default_supported(),
            base: default_base(),
        }
    }
}

/// Chain builder behaviour.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChainConfig {
    /// Collapse a chain to a plain string as soon as every locale is supplied.
    #[serde(default)]
    pub return_primitive: bool,
}

/// Where the current locale is persisted.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// JSON document on disk (default).
    #[default]
    File,
    /// Process memory; lost on exit.
    Memory,
    /// No persistence.
    None,
}

/// Storage adapter config.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,
    #[serde(default = "default_storage_path")]
    pub path: String,
    /// Key the current locale is stored under.
    #[serde(default = "default_storage_key")]
    pub key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            path: default_storage_path(),
            key: default_storage_key(),
        }
    }
}

/// A locale detection strategy, named in `[detect].order`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetectorKind {
    /// Previously persisted preference.
    Storage,
    /// URL query parameter.
    Query,
    /// `LANGUAGE` / `LC_ALL` / `LC_MESSAGES` / `LANG`.
    Env,
    /// Browser language list or an Accept-Language header.
    AcceptLanguage,
}

/// Locale detection config.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectConfig {
    /// Detectors in priority order; the first accepted answer wins.
    #[serde(default = "default_detect_order")]
    pub order: Vec<DetectorKind>,
    #[serde(default = "default_query_param")]
    pub query_param: String,
}

impl Default for DetectConfig {
    fn default() -> Self {
        Self {
            order: default_detect_order(),
            query_param: default_query_param(),
        }
    }
}

impl Config {
    /// Build the validated locale set from `[locales]`.
    pub fn locale_set(&self) -> Result<LocaleSet, TolkError> {
        LocaleSet::new(self.locales.supported.iter().cloned(), &self.locales.base)
            .map_err(|e| TolkError::Config(e.to_string()))
    }
}

// --- Defaults ---

fn default_log_level() -> String {
    "info".to_string()
}
fn default_supported() -> Vec<String> {
    vec!["en".to_string()]
}
fn default_base() -> String {
    "en".to_string()
}
fn default_storage_path() -> String {
    "~/.tolk/state.json".to_string()
}
fn default_storage_key() -> String {
    "locale".to_string()
}
fn default_detect_order() -> Vec<DetectorKind> {
    vec![
        DetectorKind::Storage,
        DetectorKind::Query,
        DetectorKind::Env,
        DetectorKind::AcceptLanguage,
    ]
}
fn default_query_param() -> String {
    "lang".to_string()
}

/// Expand `~` to home directory.
pub fn shellexpand(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = std::env::var_os("HOME") {
            return format!("{}/{rest}", home.to_string_lossy());
        }
    }
    path.to_string()
}

/// Load configuration from a TOML file, falling back to defaults when the
/// file does not exist.
pub fn load(path: &str) -> Result<Config, TolkError> {
    let path = Path::new(path);
    if !path.exists() {
        tracing::info!(
            "Config file not found at {}, using defaults",
            path.display()
        );
        return Ok(Config::default());
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| TolkError::Config(format!("failed to read {}: {}", path.display(), e)))?;

    let config: Config = toml::from_str(&content)
        .map_err(|e| TolkError::Config(format!("failed to parse config: {}", e)))?;

    config.locale_set()?;
    Ok(config)
}
