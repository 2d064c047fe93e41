use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

use crate::core::matcher::DEFAULT_PARALLEL_THRESHOLD;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub storage: StorageSettings,
    #[serde(default)]
    pub cache: CacheSettings,
    #[serde(default)]
    pub matching: MatchingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String { "127.0.0.1".to_string() }
fn default_port() -> u16 { 8080 }

#[derive(Debug, Clone, Deserialize)]
pub struct StorageSettings {
    /// JSON file holding tutors and students; in-memory only when unset
    pub data_file: Option<String>,
    #[serde(default = "default_seed_examples")]
    pub seed_examples: bool,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            data_file: None,
            seed_examples: default_seed_examples(),
        }
    }
}

fn default_seed_examples() -> bool { true }

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CacheSettings {
    pub l1_cache_size: Option<u64>,
    pub ttl_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MatchingSettings {
    pub parallel_threshold: Option<usize>,
    pub default_limit: Option<usize>,
    pub max_limit: Option<usize>,
}

impl MatchingSettings {
    pub fn parallel_threshold(&self) -> usize {
        self.parallel_threshold.unwrap_or(DEFAULT_PARALLEL_THRESHOLD)
    }

    pub fn max_limit(&self) -> usize {
        self.max_limit.unwrap_or(100)
    }

    pub fn default_limit(&self) -> usize {
        self.default_limit.unwrap_or(20).min(self.max_limit())
    }
}

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with TUTOR_MATCH)
    pub fn load() -> Result<Self, ConfigError> {
        let mut settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., TUTOR_MATCH__SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("TUTOR_MATCH")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings = substitute_env_vars(settings)?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("TUTOR_MATCH")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}

/// Apply short-form environment overrides
///
/// `DATA_FILE` sets `storage.data_file`.
fn substitute_env_vars(settings: Config) -> Result<Config, ConfigError> {
    let mut builder = Config::builder().add_source(settings);

    if let Ok(data_file) = std::env::var("DATA_FILE") {
        builder = builder.set_override("storage.data_file", data_file)?;
    }

    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.server.host, "127.0.0.1");
        assert_eq!(settings.server.port, 8080);
        assert!(settings.storage.data_file.is_none());
        assert!(settings.storage.seed_examples);
        assert_eq!(settings.matching.parallel_threshold(), DEFAULT_PARALLEL_THRESHOLD);
        assert_eq!(settings.matching.max_limit(), 100);
        assert_eq!(settings.matching.default_limit(), 20);
    }

    #[test]
    fn test_default_limit_capped_by_max() {
        let matching = MatchingSettings {
            parallel_threshold: None,
            default_limit: Some(50),
            max_limit: Some(10),
        };
        assert_eq!(matching.default_limit(), 10);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[server]
port = 9090

[storage]
data_file = "data/matchmaking.json"
seed_examples = false

[matching]
parallel_threshold = 8
"#
        )
        .unwrap();

        let settings = Settings::load_from(file.path()).unwrap();
        assert_eq!(settings.server.port, 9090);
        assert_eq!(settings.server.host, "127.0.0.1");
        assert_eq!(settings.storage.data_file.as_deref(), Some("data/matchmaking.json"));
        assert!(!settings.storage.seed_examples);
        assert_eq!(settings.matching.parallel_threshold(), 8);
        assert!(settings.cache.ttl_secs.is_none());
    }
}
