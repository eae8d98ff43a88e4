use anyhow::Result;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration structure for state-sync
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct StateSyncConfig {
    /// Remote machine client settings
    pub client: ClientConfig,
    /// Observability settings
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ClientConfig {
    /// Page URL the status resource is derived from
    pub page_url: Option<String>,
    /// Outbound requests allowed per second
    pub requests_per_second: u32,
    /// Burst capacity for outbound requests
    pub burst_capacity: u32,
    /// Per-request timeout; unset leaves the transport default
    pub request_timeout_seconds: Option<u64>,
    /// Background refresh interval for `watch`
    pub poll_interval_seconds: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ObservabilityConfig {
    /// Log level or filter directive, overridden by RUST_LOG
    pub log_level: String,
    /// Emit JSON log lines instead of compact text
    pub json_logs: bool,
    /// Log sync counters at shutdown
    pub metrics_enabled: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            page_url: None,
            requests_per_second: 10,
            burst_capacity: 20,
            request_timeout_seconds: None,
            poll_interval_seconds: None,
        }
    }
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_logs: false,
            metrics_enabled: true,
        }
    }
}

impl StateSyncConfig {
    /// Load configuration from multiple sources with precedence:
    /// 1. Default values
    /// 2. Configuration files (state-sync.toml, .state-sync-rc)
    /// 3. Environment variables (prefixed with STATE_SYNC_, nested keys joined by __)
    pub fn load() -> Result<Self> {
        Self::load_from(Path::new("."))
    }

    /// Same as [`load`](Self::load) but looks for configuration files in `dir`
    pub fn load_from(dir: &Path) -> Result<Self> {
        let mut builder = Config::builder().add_source(Config::try_from(&Self::default())?);

        let toml_path = dir.join("state-sync.toml");
        if toml_path.exists() {
            builder = builder.add_source(File::from(toml_path));
        }

        let rc_path = dir.join(".state-sync-rc");
        if rc_path.exists() {
            builder = builder.add_source(File::from(rc_path).format(config::FileFormat::Toml));
        }

        builder = builder.add_source(
            Environment::with_prefix("STATE_SYNC")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        Ok(config.try_deserialize()?)
    }

    /// Save configuration to file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        std::fs::write(path, self.to_toml()?)?;
        Ok(())
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Load .env file if it exists
    pub fn load_env_file() -> Result<()> {
        if Path::new(".env").exists() {
            dotenvy::dotenv()?;
            tracing::info!("Loaded environment variables from .env file");
        }
        Ok(())
    }
}

/// Global configuration instance
static CONFIG: std::sync::LazyLock<Result<StateSyncConfig, anyhow::Error>> =
    std::sync::LazyLock::new(|| {
        // Load .env file first
        let _ = StateSyncConfig::load_env_file();
        StateSyncConfig::load()
    });

/// Get the global configuration
pub fn config() -> Result<&'static StateSyncConfig> {
    CONFIG
        .as_ref()
        .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))
}
