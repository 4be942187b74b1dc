//! # Configuration Loader
//!
//! `load_config` reads the TOML file into the `AppConfig` DTO without
//! validation. `resolve_config` is the single place where defaults and
//! environment overrides are applied.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use sv_core::config::AppConfig;

pub const CONFIG_PATH_VAR: &str = "SOLVILO_CONFIG";
pub const API_URL_VAR: &str = "SOLVILO_API_URL";
pub const USE_API_MOCK_VAR: &str = "SOLVILO_USE_API_MOCK";

const DEFAULT_AUTOSAVE_DELAY_MS: u64 = 800;
const DEFAULT_UPLOAD_LATENCY_MS: u64 = 800;

/// Load configuration from a TOML file
///
/// Pure data loading: empty strings and missing sections are accepted as facts.
///
/// # Errors
///
/// Returns error if the file cannot be read or is not valid TOML.
pub fn load_config(config_path: PathBuf) -> anyhow::Result<AppConfig> {
    let content = std::fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;
    let toml_value: toml::Value =
        toml::from_str(&content).context("Failed to parse config as TOML")?;
    AppConfig::from_toml(&toml_value)
}

/// Load `config_path` when it exists, otherwise start from system defaults.
pub fn load_or_default(config_path: &Path, data_dir: PathBuf) -> anyhow::Result<AppConfig> {
    if config_path.exists() {
        load_config(config_path.to_path_buf())
    } else {
        Ok(AppConfig::with_system_defaults(data_dir))
    }
}

/// Settings the host actually runs with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    pub api_base_url: String,
    pub use_api_mock: bool,
    pub draft_path: PathBuf,
    pub autosave_delay: Duration,
    pub upload_latency: Duration,
    pub log_dir: Option<PathBuf>,
}

/// Apply defaults and environment overrides to the loaded DTO.
///
/// `env` looks up a variable by name; the host passes `std::env::var`.
/// Mocks stay on unless the mock flag is exactly `false`.
pub fn resolve_config(
    config: AppConfig,
    data_dir: &Path,
    env: impl Fn(&str) -> Option<String>,
) -> ResolvedConfig {
    let api_base_url = env(API_URL_VAR).unwrap_or(config.api_base_url);
    let use_api_mock = match env(USE_API_MOCK_VAR) {
        Some(flag) => flag != "false",
        None => config.use_api_mock.unwrap_or(true),
    };
    let draft_path = if config.draft_path.as_os_str().is_empty() {
        data_dir.join(sv_infra::draft_store::DEFAULT_DRAFT_FILE)
    } else {
        config.draft_path
    };
    let log_dir = if config.log_dir.as_os_str().is_empty() {
        None
    } else {
        Some(config.log_dir)
    };

    ResolvedConfig {
        api_base_url,
        use_api_mock,
        draft_path,
        autosave_delay: Duration::from_millis(
            config.autosave_debounce_ms.unwrap_or(DEFAULT_AUTOSAVE_DELAY_MS),
        ),
        upload_latency: Duration::from_millis(
            config.upload_latency_ms.unwrap_or(DEFAULT_UPLOAD_LATENCY_MS),
        ),
        log_dir,
    }
}

/// Application data directory, e.g. `~/.local/share/solvilo`.
pub fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("solvilo")
}
