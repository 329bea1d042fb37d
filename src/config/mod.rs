use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::item::{ShoppingListItem, validate_count};

/// Default HTTP port
pub const DEFAULT_PORT: u16 = 3001;

/// Log configuration
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct LogConfig {
  /// Log file path, if not set, logs will be printed to stdout
  pub file: Option<PathBuf>,
  /// Log level, default is "info"
  #[serde(default = "default_log_level")]
  pub level: String,
}

fn default_log_level() -> String {
  "info".to_string()
}

impl Default for LogConfig {
  fn default() -> Self {
    Self {
      file: None,
      level: default_log_level(),
    }
  }
}

/// An item loaded into the store at startup
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct SeedItem {
  pub id: String,
  pub name: String,
  pub count: i64,
}

impl SeedItem {
  fn new(id: &str, name: &str, count: i64) -> Self {
    Self {
      id: id.to_string(),
      name: name.to_string(),
      count,
    }
  }

  pub fn item(&self) -> ShoppingListItem {
    ShoppingListItem::new(self.name.clone(), self.count)
  }
}

/// Items present when no config file is given
fn default_seed() -> Vec<SeedItem> {
  vec![
    SeedItem::new("d2c0baa1-3da2-450a-bb53-93d3f3987e5b", "Bread", 2),
    SeedItem::new("c32de34e-6fa5-49bb-8435-734d066b9937", "Whole Milk 2L", 1),
    SeedItem::new("483f12ba-217f-4f5f-b65e-19f5f2c8955e", "Eggs", 12),
  ]
}

#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("failed to read config file '{path}': {source}")]
  Read {
    path: PathBuf,
    source: std::io::Error,
  },

  #[error("failed to parse config file '{path}': {source}")]
  Parse {
    path: PathBuf,
    source: toml::de::Error,
  },

  #[error("seed item has an empty id")]
  EmptySeedId,

  #[error("duplicate seed item id '{0}'")]
  DuplicateSeedId(String),

  #[error("seed item '{id}' has invalid count {count}")]
  InvalidSeedCount { id: String, count: i64 },
}

/// Shopping list service configuration
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
  /// HTTP listening address
  #[serde(default = "default_server_addr")]
  pub server_addr: String,

  /// Log configuration
  #[serde(default)]
  pub log: LogConfig,

  /// Items loaded at startup
  #[serde(default)]
  pub seed: Vec<SeedItem>,
}

fn default_server_addr() -> String {
  format!("0.0.0.0:{}", DEFAULT_PORT)
}

impl Default for Config {
  fn default() -> Self {
    Self {
      server_addr: default_server_addr(),
      log: LogConfig::default(),
      seed: default_seed(),
    }
  }
}

impl Config {
  /// Load configuration from TOML file
  pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
    let config_str = fs::read_to_string(path).map_err(|source| ConfigError::Read {
      path: path.to_path_buf(),
      source,
    })?;

    let config: Config = toml::from_str(&config_str).map_err(|source| ConfigError::Parse {
      path: path.to_path_buf(),
      source,
    })?;

    config.validate()?;

    Ok(config)
  }

  /// Check seed items before they reach the store
  pub fn validate(&self) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();
    for seed in &self.seed {
      if seed.id.is_empty() {
        return Err(ConfigError::EmptySeedId);
      }
      if !seen.insert(seed.id.as_str()) {
        return Err(ConfigError::DuplicateSeedId(seed.id.clone()));
      }
      if validate_count(seed.count).is_err() {
        return Err(ConfigError::InvalidSeedCount {
          id: seed.id.clone(),
          count: seed.count,
        });
      }
    }
    Ok(())
  }

  /// Replace the host and/or port of `server_addr`
  pub fn with_listen_overrides(mut self, host: Option<String>, port: Option<u16>) -> Self {
    if host.is_none() && port.is_none() {
      return self;
    }

    let (current_host, current_port) = match self.server_addr.rsplit_once(':') {
      Some((h, p)) => (h.to_string(), p.parse().unwrap_or(DEFAULT_PORT)),
      None => (self.server_addr.clone(), DEFAULT_PORT),
    };

    self.server_addr = format!(
      "{}:{}",
      host.unwrap_or(current_host),
      port.unwrap_or(current_port)
    );
    self
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_default_config() {
    let config = Config::default();
    assert_eq!(config.server_addr, "0.0.0.0:3001");
    assert_eq!(config.log.level, "info");
    assert_eq!(config.seed.len(), 3);
    assert_eq!(config.seed[0].item(), ShoppingListItem::new("Bread", 2));
    assert!(config.validate().is_ok());
  }

  #[test]
  fn test_parse_config() {
    let config_str = r#"
server_addr = "127.0.0.1:8080"

[log]
level = "debug"
file = "/tmp/shoplist.log"

[[seed]]
id = "A"
name = "Bread"
count = 2
"#;

    let config: Config = toml::from_str(config_str).unwrap();
    assert_eq!(config.server_addr, "127.0.0.1:8080");
    assert_eq!(config.log.level, "debug");
    assert_eq!(config.log.file, Some(PathBuf::from("/tmp/shoplist.log")));
    assert_eq!(config.seed, vec![SeedItem::new("A", "Bread", 2)]);
  }

  #[test]
  fn test_empty_file_uses_defaults_without_seed() {
    let config: Config = toml::from_str("").unwrap();
    assert_eq!(config.server_addr, "0.0.0.0:3001");
    assert_eq!(config.log, LogConfig::default());
    assert!(config.seed.is_empty());
  }

  #[test]
  fn test_validate_rejects_bad_seed() {
    let mut config = Config::default();
    config.seed.push(SeedItem::new("d2c0baa1-3da2-450a-bb53-93d3f3987e5b", "Rye", 1));
    assert!(matches!(
      config.validate(),
      Err(ConfigError::DuplicateSeedId(_))
    ));

    config.seed = vec![SeedItem::new("A", "Bread", 0)];
    assert!(matches!(
      config.validate(),
      Err(ConfigError::InvalidSeedCount { count: 0, .. })
    ));

    config.seed = vec![SeedItem::new("", "Bread", 1)];
    assert!(matches!(config.validate(), Err(ConfigError::EmptySeedId)));
  }

  #[test]
  fn test_example_config_matches_defaults() {
    let config: Config = toml::from_str(include_str!("../../shoplist.example.toml")).unwrap();
    assert!(config.validate().is_ok());
    assert_eq!(config, Config::default());
  }

  #[test]
  fn test_from_file_missing() {
    let err = Config::from_file(Path::new("/nonexistent/shoplist.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::Read { .. }));
  }

  #[test]
  fn test_listen_overrides() {
    let config = Config::default().with_listen_overrides(None, Some(8080));
    assert_eq!(config.server_addr, "0.0.0.0:8080");

    let config = Config::default().with_listen_overrides(Some("127.0.0.1".to_string()), None);
    assert_eq!(config.server_addr, "127.0.0.1:3001");

    let config = Config::default().with_listen_overrides(None, None);
    assert_eq!(config.server_addr, "0.0.0.0:3001");
  }
}
