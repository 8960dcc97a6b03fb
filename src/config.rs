use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use pitwall::fetch::FetcherConfig;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub log_level: Option<String>,
    pub http: HttpConfig,
    pub cache: CacheConfig,
    pub fallback: FallbackConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub timeout_ms: u64,
    pub user_agent: Option<String>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_ms: 10000,
            user_agent: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub ttl_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { ttl_secs: 600 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FallbackConfig {
    pub max_fallback_years: u16,
}

impl Default for FallbackConfig {
    fn default() -> Self {
        Self { max_fallback_years: 3 }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: Some("info".to_string()),
            http: HttpConfig::default(),
            cache: CacheConfig::default(),
            fallback: FallbackConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration with fallback chain
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        // If explicit config path provided, try to load it
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        // Try primary location: ~/.config/<project>/<project>.yml
        if let Some(config_dir) = dirs::config_dir() {
            let project_name = env!("CARGO_PKG_NAME");
            let primary_config = config_dir.join(project_name).join(format!("{}.yml", project_name));
            if primary_config.exists() {
                match Self::load_from_file(&primary_config) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        log::warn!("Failed to load config from {}: {}", primary_config.display(), e);
                    }
                }
            }
        }

        // Try fallback location: ./<project>.yml
        let project_name = env!("CARGO_PKG_NAME");
        let fallback_config = PathBuf::from(format!("{}.yml", project_name));
        if fallback_config.exists() {
            match Self::load_from_file(&fallback_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    log::warn!("Failed to load config from {}: {}", fallback_config.display(), e);
                }
            }
        }

        // No config file found, use defaults
        log::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        log::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }

    pub fn fetcher_config(&self) -> FetcherConfig {
        FetcherConfig {
            timeout: Duration::from_millis(self.http.timeout_ms),
            user_agent: self.http.user_agent.clone(),
            cache_ttl: Duration::from_secs(self.cache.ttl_secs),
            max_fallback_years: self.fallback.max_fallback_years,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.log_level.as_deref(), Some("info"));
        assert_eq!(config.http.timeout_ms, 10000);
        assert_eq!(config.cache.ttl_secs, 600);
        assert_eq!(config.fallback.max_fallback_years, 3);
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "http:\n  timeout_ms: 5000").unwrap();

        let config = Config::load(Some(&file.path().to_path_buf())).unwrap();
        assert_eq!(config.http.timeout_ms, 5000);
        assert_eq!(config.cache.ttl_secs, 600);
        assert_eq!(config.fallback.max_fallback_years, 3);
    }

    #[test]
    fn test_explicit_missing_path_is_error() {
        let path = PathBuf::from("/nonexistent/pitwall.yml");
        assert!(Config::load(Some(&path)).is_err());
    }

    #[test]
    fn test_fetcher_config_conversion() {
        let mut config = Config::default();
        config.http.timeout_ms = 2500;
        config.cache.ttl_secs = 60;
        config.fallback.max_fallback_years = 1;

        let fetcher_config = config.fetcher_config();
        assert_eq!(fetcher_config.timeout, Duration::from_millis(2500));
        assert_eq!(fetcher_config.cache_ttl, Duration::from_secs(60));
        assert_eq!(fetcher_config.max_fallback_years, 1);
    }

    #[test]
    fn test_user_agent_override_parses() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "http:\n  user_agent: \"pitwall-test/1.0\"").unwrap();

        let config = Config::load(Some(&file.path().to_path_buf())).unwrap();
        assert_eq!(config.http.user_agent.as_deref(), Some("pitwall-test/1.0"));
    }
}
