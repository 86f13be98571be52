//! Layered configuration
//!
//! Sources, later ones winning: built-in defaults, the user config file
//! (`<config dir>/bookify/config.toml`), `./bookify.toml`, then `BOOKIFY_*`
//! environment variables (a `.env` file is loaded first if present).

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{anyhow, Context};
use serde::{Deserialize, Serialize};

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";
const ENV_PREFIX: &str = "BOOKIFY";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "Settings::default_backend_url")]
    pub backend_url: String,
    #[serde(default = "Settings::default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Used when `RUST_LOG` is not set
    #[serde(default = "Settings::default_log_filter")]
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            backend_url: Self::default_backend_url(),
            request_timeout_secs: Self::default_request_timeout_secs(),
            log_filter: Self::default_log_filter(),
        }
    }
}

impl Settings {
    fn default_backend_url() -> String {
        DEFAULT_BACKEND_URL.to_string()
    }

    fn default_request_timeout_secs() -> u64 {
        60
    }

    fn default_log_filter() -> String {
        "bookify=info".to_string()
    }

    /// Per-user config file location
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("bookify").join("config.toml"))
    }

    pub fn load() -> anyhow::Result<Self> {
        // Allow missing `.env` files without failing.
        let _ = dotenvy::dotenv();

        let mut builder = config::Config::builder();
        if let Some(path) = Self::user_config_path() {
            builder = builder.add_source(config::File::from(path).required(false));
        }
        let builder = builder
            .add_source(config::File::with_name("bookify").required(false))
            .add_source(config::Environment::with_prefix(ENV_PREFIX).try_parsing(true));

        Self::from_builder(builder)
    }

    fn from_builder(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> anyhow::Result<Self> {
        let cfg = builder
            .build()
            .with_context(|| "failed to build configuration")?;
        let settings: Settings = cfg
            .try_deserialize()
            .with_context(|| "failed to deserialize configuration")?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> anyhow::Result<()> {
        if !(self.backend_url.starts_with("http://") || self.backend_url.starts_with("https://")) {
            return Err(anyhow!(
                "backend_url '{}' must start with http:// or https://",
                self.backend_url
            ));
        }
        if self.request_timeout_secs == 0 {
            return Err(anyhow!("request_timeout_secs must be greater than zero"));
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
