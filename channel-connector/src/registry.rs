//! Adapter registry - Looks up available adapters by name.
//!
//! The registry is immutable once built. An adapter that is disabled in
//! configuration is simply absent, so configs that still reference it
//! resolve to "not found".

use crate::adapters::builtin_adapters;
use crate::Adapter;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;

/// Registry errors
#[derive(Debug, PartialEq)]
pub enum RegistryError {
    /// No adapter registered under this name
    NotFound(String),
    /// An adapter with this name is already registered
    Duplicate(String),
}

impl std::fmt::Display for RegistryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RegistryError::NotFound(name) => write!(f, "Adapter '{}' not found", name),
            RegistryError::Duplicate(name) => write!(f, "Adapter '{}' already registered", name),
        }
    }
}

impl std::error::Error for RegistryError {}

/// Adapters keyed by manifest name.
#[derive(Default)]
pub struct Registry {
    adapters: BTreeMap<String, Arc<dyn Adapter>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a registry of all built-in adapters except the `disabled` names.
    pub fn with_builtin_adapters(disabled: &[String]) -> Result<Self, RegistryError> {
        let mut registry = Self::new();
        for adapter in builtin_adapters() {
            let name = adapter.manifest().name();
            if disabled.iter().any(|d| d == name) {
                debug!(adapter = %name, "Adapter disabled by configuration");
                continue;
            }
            registry.add_adapter(adapter)?;
        }
        Ok(registry)
    }

    /// Registers an adapter. Fails if the name is taken.
    pub fn add_adapter(&mut self, adapter: Arc<dyn Adapter>) -> Result<(), RegistryError> {
        let name = adapter.manifest().name().to_string();
        if self.adapters.contains_key(&name) {
            return Err(RegistryError::Duplicate(name));
        }
        self.adapters.insert(name, adapter);
        Ok(())
    }

    pub fn get_adapter(&self, name: &str) -> Result<Arc<dyn Adapter>, RegistryError> {
        self.adapters
            .get(name)
            .cloned()
            .ok_or_else(|| RegistryError::NotFound(name.to_string()))
    }

    pub fn has_adapter(&self, name: &str) -> bool {
        self.adapters.contains_key(name)
    }

    /// All adapters ordered by name.
    pub fn get_adapters(&self) -> Vec<Arc<dyn Adapter>> {
        self.adapters.values().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::WebhookAdapter;

    #[test]
    fn test_builtin_registry() {
        let registry = Registry::with_builtin_adapters(&[]).unwrap();
        assert!(registry.has_adapter("webhook"));
        assert!(registry.has_adapter("twitter"));
        assert_eq!(registry.get_adapters().len(), 2);
    }

    #[test]
    fn test_disabled_adapter_is_absent() {
        let registry = Registry::with_builtin_adapters(&["twitter".to_string()]).unwrap();
        assert!(!registry.has_adapter("twitter"));
        assert_eq!(
            registry.get_adapter("twitter").err(),
            Some(RegistryError::NotFound("twitter".to_string()))
        );
    }

    #[test]
    fn test_get_adapter() {
        let registry = Registry::with_builtin_adapters(&[]).unwrap();
        let adapter = registry.get_adapter("webhook").unwrap();
        assert_eq!(adapter.manifest().name(), "webhook");
    }

    #[test]
    fn test_duplicate_rejected() {
        let mut registry = Registry::new();
        registry.add_adapter(Arc::new(WebhookAdapter::new())).unwrap();
        let result = registry.add_adapter(Arc::new(WebhookAdapter::new()));
        assert_eq!(result, Err(RegistryError::Duplicate("webhook".to_string())));
    }

    #[test]
    fn test_adapters_sorted_by_name() {
        let registry = Registry::with_builtin_adapters(&[]).unwrap();
        let names: Vec<String> = registry
            .get_adapters()
            .iter()
            .map(|a| a.manifest().name().to_string())
            .collect();
        assert_eq!(names, vec!["twitter", "webhook"]);
    }

    #[test]
    fn test_error_display() {
        let err = RegistryError::NotFound("rss".to_string());
        assert_eq!(err.to_string(), "Adapter 'rss' not found");
    }
}
