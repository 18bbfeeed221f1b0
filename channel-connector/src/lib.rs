//! Channel connector - adapters, adapter registry and config persistence.
//!
//! A channel connector pushes content from the platform to an external
//! channel (a webhook, a social network, ...). Each connector is described by
//! an [`Adapter`] and configured by one or more named [`Config`] records.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │       Registry                           │
//! │  - Adapters looked up by manifest name   │
//! │  - Built-ins minus disabled names        │
//! └─────────────────────────────────────────┘
//!          ↓ option schema
//! ┌─────────────────────────────────────────┐
//! │       Config                             │
//! │  - name (identity)                       │
//! │  - adapter name                          │
//! │  - adapter-specific options              │
//! └─────────────────────────────────────────┘
//!          ↓
//! ┌─────────────────────────────────────────┐
//! │       ConfigManager                      │
//! │  - SQLite or in-memory persistence       │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Core Types
//!
//! - [`Adapter`] - Trait that all connector adapters implement
//! - [`Manifest`] - Descriptive metadata (name, label, version)
//! - [`OptionField`] - One entry of an adapter's configuration schema
//! - [`Registry`] - Lookup of adapters by name
//! - [`ConfigManager`] - Persistence of [`Config`] records
//!
//! # Creating an Adapter
//!
//! ```
//! use channel_connector::{Adapter, Manifest, OptionField, OptionKind};
//!
//! struct MyAdapter {
//!     manifest: Manifest,
//! }
//!
//! impl Adapter for MyAdapter {
//!     fn manifest(&self) -> &Manifest {
//!         &self.manifest
//!     }
//!
//!     fn options(&self) -> Vec<OptionField> {
//!         vec![OptionField::new("api_key", "API key", OptionKind::Secret).required()]
//!     }
//! }
//! ```

mod adapter;
mod types;
pub mod adapters;
pub mod config;
pub mod manager;
pub mod registry;
pub mod sqlite_store;

// Re-export public types
pub use adapter::Adapter;
pub use config::Config;
pub use manager::{ConfigExists, ConfigManager, MemoryConfigManager};
pub use registry::{Registry, RegistryError};
pub use sqlite_store::SqliteConfigManager;
pub use types::{Manifest, OptionField, OptionKind};
