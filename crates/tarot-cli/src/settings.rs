//! Config file discovery and merging.
//!
//! Sources, lowest priority first: built-in defaults, the TOML file, then
//! `TAROT_*` environment variables. The file is the first of `--config`,
//! `./tarot.toml`, and `<config_dir>/tarot/config.toml` that exists; with
//! none of them the defaults stand. API keys never come from the file.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tarot_oracle::{InterpretationSettings, ProviderSettings};
use tracing::debug;

/// Config file name looked up in the working directory.
const LOCAL_FILE: &str = "tarot.toml";

/// Contents of a config file. Every key is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    /// Provider used when `--provider` is not given.
    pub default_provider: Option<String>,
    /// Alternative card dataset.
    pub data: Option<PathBuf>,
    /// Reading history options.
    pub history: HistoryFileConfig,
    /// Provider entries; each replaces the built-in entry of the same id.
    pub providers: BTreeMap<String, ProviderSettings>,
}

/// `[history]` table.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HistoryFileConfig {
    /// Save readings after each draw.
    pub enabled: Option<bool>,
    /// History file location.
    pub path: Option<PathBuf>,
}

/// Where and whether readings are saved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistorySettings {
    /// Save readings after each draw.
    pub enabled: bool,
    /// JSONL file the readings are appended to.
    pub path: PathBuf,
}

impl Default for HistorySettings {
    fn default() -> Self {
        let path = dirs::data_dir()
            .map(|d| d.join("tarot"))
            .unwrap_or_else(|| PathBuf::from(".tarot"))
            .join("readings.jsonl");
        Self {
            enabled: true,
            path,
        }
    }
}

/// Fully resolved CLI settings.
#[derive(Debug, Clone, Default)]
pub struct CliSettings {
    pub interpretation: InterpretationSettings,
    pub data: Option<PathBuf>,
    pub history: HistorySettings,
}

impl CliSettings {
    /// Discover, read, and merge settings from disk and the environment.
    pub fn load(explicit: Option<&Path>) -> Result<Self, String> {
        let file = match discover(explicit)? {
            Some(path) => {
                debug!(path = %path.display(), "loading config file");
                Some(read_file(&path)?)
            }
            None => None,
        };
        Self::resolve(file, |key| std::env::var(key).ok())
    }

    /// Merge a parsed file and an environment lookup over the defaults.
    pub fn resolve(
        file: Option<FileConfig>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, String> {
        let mut settings = Self::default();

        if let Some(file) = file {
            if let Some(provider) = file.default_provider {
                settings.interpretation.default_provider = provider;
            }
            settings.interpretation.providers.extend(file.providers);
            settings.data = file.data;
            if let Some(enabled) = file.history.enabled {
                settings.history.enabled = enabled;
            }
            if let Some(path) = file.history.path {
                settings.history.path = path;
            }
        }

        let env = |key: &str| env(key).filter(|v| !v.trim().is_empty());
        if let Some(provider) = env("TAROT_PROVIDER") {
            settings.interpretation.default_provider = provider;
        }
        if let Some(data) = env("TAROT_DATA") {
            settings.data = Some(PathBuf::from(data));
        }
        if let Some(path) = env("TAROT_HISTORY") {
            settings.history.path = PathBuf::from(path);
        }
        if let Some(flag) = env("TAROT_HISTORY_ENABLED") {
            settings.history.enabled = parse_flag(&flag)
                .ok_or_else(|| format!("TAROT_HISTORY_ENABLED: expected true or false, got '{flag}'"))?;
        }

        Ok(settings)
    }
}

/// The config file to read, if any.
fn discover(explicit: Option<&Path>) -> Result<Option<PathBuf>, String> {
    if let Some(path) = explicit {
        if !path.is_file() {
            return Err(format!("config file not found: {}", path.display()));
        }
        return Ok(Some(path.to_path_buf()));
    }

    let local = PathBuf::from(LOCAL_FILE);
    if local.is_file() {
        return Ok(Some(local));
    }

    Ok(dirs::config_dir()
        .map(|d| d.join("tarot").join("config.toml"))
        .filter(|p| p.is_file()))
}

fn read_file(path: &Path) -> Result<FileConfig, String> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
    parse_file(&text).map_err(|e| format!("invalid config {}: {e}", path.display()))
}

/// Parse config file text.
pub fn parse_file(text: &str) -> Result<FileConfig, toml::de::Error> {
    toml::from_str(text)
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
