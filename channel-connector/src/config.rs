//! Connector config record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A named connector configuration bound to one adapter.
///
/// The name is the record's identity: it is used as the storage key and
/// as the `:id` path segment of the admin pages.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Unique, user-chosen name.
    pub name: String,
    /// Manifest name of the adapter (e.g. `"webhook"`).
    pub adapter: String,
    /// Adapter-specific settings keyed by `OptionField::key`.
    #[serde(default)]
    pub options: BTreeMap<String, String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Config {
    /// Creates an unnamed config for the given adapter.
    pub fn new(adapter: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            name: String::new(),
            adapter: adapter.into(),
            options: BTreeMap::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn option(&self, key: &str) -> Option<&str> {
        self.options.get(key).map(String::as_str)
    }

    /// Marks the record as modified now.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
