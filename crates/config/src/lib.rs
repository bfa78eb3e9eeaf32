//! Configuration loading for the Odonto admin portal.
//!
//! Settings are layered: built-in defaults, then an optional TOML file
//! (explicit via `ODONTO_CONFIG` or discovered from a fixed candidate list),
//! then `ODONTO`-prefixed environment overrides.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::debug;

const DEFAULT_CONFIG_FILES: &[&str] = &[
    "odonto.toml",
    "config/odonto.toml",
    "crates/config/odonto.toml",
    "../odonto.toml",
    "../config/odonto.toml",
];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub import: ImportConfig,
}

/// Settings for the backend API the portal talks to
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the clinic backend
    pub base_url: String,
    /// Per-request timeout applied to every call
    #[serde(default = "ApiConfig::default_request_timeout")]
    pub request_timeout_seconds: u64,
}

impl ApiConfig {
    const fn default_request_timeout() -> u64 {
        10
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            request_timeout_seconds: Self::default_request_timeout(),
        }
    }
}

/// Settings for the bulk-import flow
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportConfig {
    /// Valid records shown in the pre-confirmation preview
    #[serde(default = "ImportConfig::default_preview_rows")]
    pub preview_rows: usize,
}

impl ImportConfig {
    const fn default_preview_rows() -> usize {
        10
    }
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            preview_rows: Self::default_preview_rows(),
        }
    }
}

/// Load the application configuration by combining defaults, files, and
/// environment overrides.
///
/// ```
/// use odonto_config::load;
///
/// std::env::remove_var("ODONTO_CONFIG");
///
/// let config = load().expect("configuration should load with defaults");
/// assert!(!config.api.base_url.is_empty());
/// assert_eq!(config.api.request_timeout_seconds, 10);
/// ```
pub fn load() -> anyhow::Result<AppConfig> {
    let defaults = AppConfig::default();

    let timeout = defaults.api.request_timeout_seconds;
    let timeout_i64 = i64::try_from(timeout).unwrap_or(i64::MAX);

    let mut builder = config::Config::builder();
    builder = builder
        .set_default("api.base_url", defaults.api.base_url.clone())
        .unwrap()
        .set_default("api.request_timeout_seconds", timeout_i64)
        .unwrap()
        .set_default(
            "import.preview_rows",
            i64::try_from(defaults.import.preview_rows).unwrap_or(i64::MAX),
        )
        .unwrap();

    let environment_overrides = config::Environment::with_prefix("ODONTO").separator("__");

    let mut config_file_attached = false;

    if let Ok(path) = std::env::var("ODONTO_CONFIG") {
        builder = builder.add_source(config::File::from(PathBuf::from(&path)));
        config_file_attached = true;
        debug!(path, "loading configuration via ODONTO_CONFIG");
    } else if let Ok(cwd) = std::env::current_dir() {
        let fallback = DEFAULT_CONFIG_FILES
            .iter()
            .map(|candidate| cwd.join(candidate))
            .find(|path| path.exists());

        if let Some(path) = fallback {
            debug!(path = %path.display(), "loading configuration file");
            builder = builder.add_source(config::File::from(path));
            config_file_attached = true;
        }
    }

    if !config_file_attached {
        debug!("no configuration file found, relying on defaults and environment overrides");
    }

    builder = builder.add_source(environment_overrides);

    let cfg = builder.build().context("unable to build configuration")?;

    let config = cfg
        .try_deserialize::<AppConfig>()
        .context("invalid configuration")?;

    debug!(?config, "loaded portal configuration");
    Ok(config)
}
