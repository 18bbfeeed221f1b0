//! Config manager - persistence interface for [`Config`] records.

use crate::Config;
use anyhow::Result;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

/// Returned (inside `anyhow::Error`) by [`ConfigManager::create`] when the
/// name is already taken.
#[derive(Debug, PartialEq)]
pub struct ConfigExists(pub String);

impl std::fmt::Display for ConfigExists {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Config '{}' already exists", self.0)
    }
}

impl std::error::Error for ConfigExists {}

/// Persistence of connector configs, keyed by config name.
///
/// Implementations are internally synchronized and give read-your-writes:
/// a `find` after a successful `persist` sees the persisted record.
pub trait ConfigManager: Send + Sync {
    /// Returns every config ordered by name.
    fn find_all(&self) -> Result<Vec<Config>>;

    /// Returns the config with this name, or `None`.
    fn find(&self, id: &str) -> Result<Option<Config>>;

    /// Inserts a new config. Fails with [`ConfigExists`] if the name is
    /// taken, atomically with respect to concurrent `create` calls.
    fn create(&self, config: &Config) -> Result<()>;

    /// Inserts the config, or replaces the one with the same name.
    fn persist(&self, config: &Config) -> Result<()>;

    /// Removes the config. No-op if it does not exist.
    fn remove(&self, config: &Config) -> Result<()>;
}

/// Non-durable config manager, used for `":memory:"`-style setups and tests.
#[derive(Default)]
pub struct MemoryConfigManager {
    configs: DashMap<String, Config>,
}

impl MemoryConfigManager {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ConfigManager for MemoryConfigManager {
    fn find_all(&self) -> Result<Vec<Config>> {
        let mut configs: Vec<Config> = self
            .configs
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        configs.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(configs)
    }

    fn find(&self, id: &str) -> Result<Option<Config>> {
        Ok(self.configs.get(id).map(|entry| entry.value().clone()))
    }

    fn create(&self, config: &Config) -> Result<()> {
        match self.configs.entry(config.name.clone()) {
            Entry::Occupied(_) => Err(ConfigExists(config.name.clone()).into()),
            Entry::Vacant(entry) => {
                entry.insert(config.clone());
                Ok(())
            }
        }
    }

    fn persist(&self, config: &Config) -> Result<()> {
        self.configs.insert(config.name.clone(), config.clone());
        Ok(())
    }

    fn remove(&self, config: &Config) -> Result<()> {
        self.configs.remove(&config.name);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_config(name: &str) -> Config {
        let mut config = Config::new("webhook");
        config.name = name.to_string();
        config
            .options
            .insert("url".to_string(), "https://example.com/hook".to_string());
        config
    }

    #[test]
    fn test_persist_and_find() {
        let manager = MemoryConfigManager::new();
        manager.persist(&sample_config("alpha")).unwrap();

        let found = manager.find("alpha").unwrap().unwrap();
        assert_eq!(found.name, "alpha");
        assert_eq!(found.adapter, "webhook");
        assert_eq!(found.option("url"), Some("https://example.com/hook"));
    }

    #[test]
    fn test_find_all_sorted_by_name() {
        let manager = MemoryConfigManager::new();
        manager.persist(&sample_config("gamma")).unwrap();
        manager.persist(&sample_config("alpha")).unwrap();
        manager.persist(&sample_config("beta")).unwrap();

        let names: Vec<String> = manager
            .find_all()
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["alpha", "beta", "gamma"]);
    }

    #[test]
    fn test_persist_replaces_same_name() {
        let manager = MemoryConfigManager::new();
        manager.persist(&sample_config("alpha")).unwrap();

        let mut updated = sample_config("alpha");
        updated
            .options
            .insert("url".to_string(), "https://example.org".to_string());
        manager.persist(&updated).unwrap();

        assert_eq!(manager.find_all().unwrap().len(), 1);
        let found = manager.find("alpha").unwrap().unwrap();
        assert_eq!(found.option("url"), Some("https://example.org"));
    }

    #[test]
    fn test_create_rejects_taken_name() {
        let manager = MemoryConfigManager::new();
        manager.create(&sample_config("alpha")).unwrap();

        let mut other = sample_config("alpha");
        other
            .options
            .insert("url".to_string(), "https://example.org".to_string());
        let err = manager.create(&other).unwrap_err();

        assert_eq!(
            err.downcast_ref::<ConfigExists>(),
            Some(&ConfigExists("alpha".to_string()))
        );
        let found = manager.find("alpha").unwrap().unwrap();
        assert_eq!(found.option("url"), Some("https://example.com/hook"));
    }

    #[test]
    fn test_remove_nonexistent_is_noop() {
        let manager = MemoryConfigManager::new();
        manager.remove(&sample_config("ghost")).unwrap();
        assert!(manager.find("ghost").unwrap().is_none());
    }

    #[test]
    fn test_remove() {
        let manager = MemoryConfigManager::new();
        let config = sample_config("alpha");
        manager.persist(&config).unwrap();
        manager.remove(&config).unwrap();
        assert!(manager.find("alpha").unwrap().is_none());
    }
}
