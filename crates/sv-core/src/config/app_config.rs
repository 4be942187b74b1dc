use std::path::PathBuf;

/// Application configuration DTO (pure data, no logic)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Backend base URL (may be empty when only mocks are used)
    pub api_base_url: String,

    /// Whether to use local mock adapters instead of the HTTP API
    pub use_api_mock: Option<bool>,

    /// Local draft file (path info only, no existence check)
    pub draft_path: PathBuf,

    /// Autosave quiet period in milliseconds
    pub autosave_debounce_ms: Option<u64>,

    /// Base latency of simulated uploads in milliseconds
    pub upload_latency_ms: Option<u64>,

    /// Log file directory; empty disables file logging
    pub log_dir: PathBuf,
}

impl AppConfig {
    /// Create AppConfig from TOML value
    ///
    /// Must not validate or compute defaults. Empty strings are valid facts.
    pub fn from_toml(toml_value: &toml::Value) -> anyhow::Result<Self> {
        let str_at = |section: &str, key: &str| {
            toml_value
                .get(section)
                .and_then(|s| s.get(key))
                .and_then(|v| v.as_str())
                .unwrap_or("")
                .to_string()
        };
        let u64_at = |section: &str, key: &str| {
            toml_value
                .get(section)
                .and_then(|s| s.get(key))
                .and_then(|v| v.as_integer())
                .map(|v| v.max(0) as u64)
        };

        Ok(Self {
            api_base_url: str_at("api", "base_url"),
            use_api_mock: toml_value
                .get("api")
                .and_then(|a| a.get("use_mock"))
                .and_then(|v| v.as_bool()),
            draft_path: PathBuf::from(str_at("storage", "draft_path")),
            autosave_debounce_ms: u64_at("autosave", "debounce_ms"),
            upload_latency_ms: u64_at("uploads", "simulated_latency_ms"),
            log_dir: PathBuf::from(str_at("logging", "dir")),
        })
    }

    /// Create empty AppConfig (all empty/unset values)
    pub fn empty() -> Self {
        Self {
            api_base_url: String::new(),
            use_api_mock: None,
            draft_path: PathBuf::new(),
            autosave_debounce_ms: None,
            upload_latency_ms: None,
            log_dir: PathBuf::new(),
        }
    }

    /// Create AppConfig with paths under `data_dir`
    ///
    /// The base directory is computed by the caller (e.g. with the `dirs` crate).
    pub fn with_system_defaults(data_dir: PathBuf) -> Self {
        Self {
            draft_path: data_dir.join("draft.json"),
            log_dir: data_dir.join("logs"),
            ..Self::empty()
        }
    }
}
