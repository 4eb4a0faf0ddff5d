use once_cell::sync::Lazy;
use serde::Deserialize;

use super::security::SecurityLimits;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub upload: SecurityLimits,
    #[serde(default)]
    pub rate_limit: RateLimitSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RateLimitSettings {
    /// Window length in milliseconds
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,
    /// Upload requests allowed per caller per window
    #[serde(default = "default_max_requests")]
    pub max_requests_per_interval: u32,
}

fn default_interval_ms() -> u64 {
    60_000
}

fn default_max_requests() -> u32 {
    10
}

impl Default for RateLimitSettings {
    fn default() -> Self {
        Self {
            interval_ms: default_interval_ms(),
            max_requests_per_interval: default_max_requests(),
        }
    }
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[upload]
max_file_size_bytes = 5242880
max_row_count = 1000
max_cell_length = 1000

[rate_limit]
interval_ms = 60000
max_requests_per_interval = 10
"#;

/// Load configuration from config.toml file
///
/// Search order:
/// 1. Next to the executable (for production)
/// 2. Falls back to embedded default config
pub fn load_config() -> anyhow::Result<Config> {
    // Try to find config.toml next to the executable
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let config_path = exe_dir.join("config.toml");

            if config_path.exists() {
                tracing::info!("Loading config from: {}", config_path.display());
                let contents = std::fs::read_to_string(&config_path)?;
                let config: Config = toml::from_str(&contents)?;
                return Ok(config);
            } else {
                tracing::warn!("config.toml not found at: {}", config_path.display());
            }
        }
    }

    // Fall back to default config
    tracing::info!("Using default embedded configuration");
    let config: Config = toml::from_str(DEFAULT_CONFIG)?;
    Ok(config)
}

/// Process-wide configuration, loaded once on first access.
pub fn get() -> &'static Config {
    static CONFIG: Lazy<Config> = Lazy::new(|| match load_config() {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!("Config load failed, using compiled defaults: {}", e);
            Config::default()
        }
    });
    &CONFIG
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config: Result<Config, _> = toml::from_str(DEFAULT_CONFIG);
        assert!(config.is_ok());
        let config = config.unwrap();
        assert_eq!(config.upload.max_file_size_bytes, 5 * 1024 * 1024);
        assert_eq!(config.upload.max_row_count, 1000);
        assert_eq!(config.rate_limit.max_requests_per_interval, 10);
    }

    #[test]
    fn test_partial_config_uses_field_defaults() {
        let config: Config = toml::from_str("[upload]\nmax_row_count = 50\n").unwrap();
        assert_eq!(config.upload.max_row_count, 50);
        assert_eq!(config.upload.max_cell_length, 1000);
        assert_eq!(config.rate_limit.interval_ms, 60_000);
    }
}
