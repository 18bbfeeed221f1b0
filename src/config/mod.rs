use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::warn;

/// Complete channel admin configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChannelConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub pagination: PaginationConfig,
    #[serde(default)]
    pub flash: FlashConfig,
    #[serde(default)]
    pub adapters: AdaptersConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
}

fn default_bind_addr() -> String {
    "0.0.0.0:3000".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
        }
    }
}

/// Which config manager backs the admin pages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Sqlite,
    Memory,
}

/// Config persistence
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,
    /// SQLite database file (`:memory:` allowed). Ignored by the memory backend.
    #[serde(default = "default_database_path")]
    pub database_path: String,
}

fn default_database_path() -> String {
    "channel.db".to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            database_path: default_database_path(),
        }
    }
}

/// Pagination service. Disabling it makes the list page fail with 500.
#[derive(Debug, Clone, Deserialize)]
pub struct PaginationConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_per_page")]
    pub per_page: usize,
}

fn default_per_page() -> usize {
    10
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            per_page: default_per_page(),
        }
    }
}

/// Flash messages. When disabled, success notifications are skipped.
#[derive(Debug, Clone, Deserialize)]
pub struct FlashConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl Default for FlashConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Adapter registry
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AdaptersConfig {
    /// Built-in adapters left out of the registry.
    #[serde(default)]
    pub disabled: Vec<String>,
}

fn default_true() -> bool {
    true
}

impl ChannelConfig {
    /// Applies `CHANNEL_*` environment overrides.
    pub fn apply_env(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies overrides from `lookup`. Unparsable values are logged and
    /// leave the setting unchanged.
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(v) = lookup("CHANNEL_BIND_ADDR") {
            self.server.bind_addr = v;
        }
        if let Some(v) = lookup("CHANNEL_DATABASE") {
            self.storage.database_path = v;
        }
        if let Some(v) = lookup("CHANNEL_PER_PAGE") {
            match v.trim().parse::<usize>() {
                Ok(n) => self.pagination.per_page = n,
                Err(e) => warn!(
                    value = %v,
                    error = %e,
                    per_page = self.pagination.per_page,
                    "Ignoring invalid CHANNEL_PER_PAGE"
                ),
            }
        }
    }
}

/// Load configuration from TOML file
pub fn load_config(path: &str) -> Result<ChannelConfig> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path))?;
    let config: ChannelConfig =
        toml::from_str(&contents).with_context(|| format!("Failed to parse config file {}", path))?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = ChannelConfig::default();
        assert_eq!(config.server.bind_addr, "0.0.0.0:3000");
        assert_eq!(config.storage.backend, StorageBackend::Sqlite);
        assert_eq!(config.storage.database_path, "channel.db");
        assert!(config.pagination.enabled);
        assert_eq!(config.pagination.per_page, 10);
        assert!(config.flash.enabled);
        assert!(config.adapters.disabled.is_empty());
    }

    #[test]
    fn test_config_deserialization() {
        let toml = r#"
            [server]
            bind_addr = "127.0.0.1:8080"

            [storage]
            backend = "memory"
            database_path = "/var/lib/channel/channel.db"

            [pagination]
            enabled = false
            per_page = 25

            [flash]
            enabled = false

            [adapters]
            disabled = ["twitter"]
        "#;

        let config: ChannelConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.server.bind_addr, "127.0.0.1:8080");
        assert_eq!(config.storage.backend, StorageBackend::Memory);
        assert_eq!(config.storage.database_path, "/var/lib/channel/channel.db");
        assert!(!config.pagination.enabled);
        assert_eq!(config.pagination.per_page, 25);
        assert!(!config.flash.enabled);
        assert_eq!(config.adapters.disabled, vec!["twitter".to_string()]);
    }

    #[test]
    fn test_partial_config() {
        // Missing sections and keys use defaults
        let toml = r#"
            [pagination]
            per_page = 3
        "#;

        let config: ChannelConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.pagination.per_page, 3);
        assert!(config.pagination.enabled); // Default
        assert_eq!(config.server.bind_addr, "0.0.0.0:3000"); // Default
    }

    #[test]
    fn test_env_overrides() {
        let mut config = ChannelConfig::default();
        config.apply_overrides(|key| match key {
            "CHANNEL_BIND_ADDR" => Some("127.0.0.1:9000".to_string()),
            "CHANNEL_DATABASE" => Some(":memory:".to_string()),
            "CHANNEL_PER_PAGE" => Some(" 25 ".to_string()),
            _ => None,
        });

        assert_eq!(config.server.bind_addr, "127.0.0.1:9000");
        assert_eq!(config.storage.database_path, ":memory:");
        assert_eq!(config.pagination.per_page, 25);
    }

    #[test]
    fn test_invalid_per_page_override_is_ignored() {
        let mut config = ChannelConfig::default();
        config.apply_overrides(|key| match key {
            "CHANNEL_PER_PAGE" => Some("lots".to_string()),
            _ => None,
        });

        assert_eq!(config.pagination.per_page, 10);
        assert_eq!(config.server.bind_addr, "0.0.0.0:3000");
    }

    #[test]
    fn test_load_config_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[flash]\nenabled = false").unwrap();

        let config = load_config(file.path().to_str().unwrap()).unwrap();
        assert!(!config.flash.enabled);
    }

    #[test]
    fn test_load_config_missing_file() {
        assert!(load_config("/nonexistent/channel.toml").is_err());
    }
}
