//! SQLite-backed config manager.
//!
//! One row per config, keyed by name. Adapter options are stored as a JSON
//! object in `options_json` so adding an option to an adapter's schema needs
//! no migration.

use crate::{Config, ConfigExists, ConfigManager};
use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Utc};
use rusqlite::types::Type;
use rusqlite::{params, Connection, ErrorCode};
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

const SELECT_COLUMNS: &str = "SELECT name, adapter, options_json, created_at, updated_at FROM channel_configs";

/// Persists connector configs in SQLite.
pub struct SqliteConfigManager {
    conn: Mutex<Connection>,
}

impl SqliteConfigManager {
    /// Opens (or creates) the SQLite database and ensures the table exists.
    pub fn new(db_path: &str) -> Result<Self> {
        let conn = Connection::open(db_path)
            .with_context(|| format!("Failed to open channel config DB at {}", db_path))?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.create_table()?;
        Ok(store)
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| anyhow!("Channel config DB lock poisoned"))
    }

    /// Creates the `channel_configs` table if it does not already exist.
    fn create_table(&self) -> Result<()> {
        let conn = self.conn()?;
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS channel_configs (
                name          TEXT PRIMARY KEY,
                adapter       TEXT NOT NULL,
                options_json  TEXT NOT NULL,
                created_at    TEXT NOT NULL,
                updated_at    TEXT NOT NULL
            );",
        )
        .context("Failed to create channel_configs table")?;
        Ok(())
    }
}

impl ConfigManager for SqliteConfigManager {
    fn find_all(&self) -> Result<Vec<Config>> {
        let conn = self.conn()?;
        let mut stmt = conn
            .prepare(&format!("{} ORDER BY name ASC", SELECT_COLUMNS))
            .context("Failed to prepare find_all query")?;
        let rows = stmt
            .query_map([], row_to_config)
            .context("Failed to query channel configs")?;
        rows.collect::<rusqlite::Result<Vec<_>>>()
            .context("Failed to read channel config rows")
    }

    fn find(&self, id: &str) -> Result<Option<Config>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!("{} WHERE name = ?1", SELECT_COLUMNS))?;
        let mut rows = stmt.query(params![id])?;
        let config = match rows.next()? {
            Some(row) => Some(
                row_to_config(row).with_context(|| format!("Failed to read config {}", id))?,
            ),
            None => None,
        };
        Ok(config)
    }

    fn create(&self, config: &Config) -> Result<()> {
        let options_json =
            serde_json::to_string(&config.options).context("Failed to serialize options")?;
        let conn = self.conn()?;
        let inserted = conn.execute(
            "INSERT INTO channel_configs (name, adapter, options_json, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                config.name,
                config.adapter,
                options_json,
                config.created_at.to_rfc3339(),
                config.updated_at.to_rfc3339(),
            ],
        );
        match inserted {
            Ok(_) => Ok(()),
            Err(rusqlite::Error::SqliteFailure(e, _)) if e.code == ErrorCode::ConstraintViolation => {
                Err(ConfigExists(config.name.clone()).into())
            }
            Err(e) => Err(e).with_context(|| format!("Failed to create config {}", config.name)),
        }
    }

    fn persist(&self, config: &Config) -> Result<()> {
        let options_json =
            serde_json::to_string(&config.options).context("Failed to serialize options")?;
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO channel_configs (name, adapter, options_json, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5)
             ON CONFLICT(name) DO UPDATE SET
                adapter = excluded.adapter,
                options_json = excluded.options_json,
                updated_at = excluded.updated_at",
            params![
                config.name,
                config.adapter,
                options_json,
                config.created_at.to_rfc3339(),
                config.updated_at.to_rfc3339(),
            ],
        )
        .with_context(|| format!("Failed to persist config {}", config.name))?;
        Ok(())
    }

    fn remove(&self, config: &Config) -> Result<()> {
        let conn = self.conn()?;
        conn.execute(
            "DELETE FROM channel_configs WHERE name = ?1",
            params![config.name],
        )
        .with_context(|| format!("Failed to remove config {}", config.name))?;
        Ok(())
    }
}

fn row_to_config(row: &rusqlite::Row<'_>) -> rusqlite::Result<Config> {
    let name: String = row.get(0)?;
    let adapter: String = row.get(1)?;
    let options_json: String = row.get(2)?;
    let created_at_str: String = row.get(3)?;
    let updated_at_str: String = row.get(4)?;

    let options: BTreeMap<String, String> = serde_json::from_str(&options_json)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(2, Type::Text, Box::new(e)))?;

    Ok(Config {
        name,
        adapter,
        options,
        created_at: parse_timestamp(3, &created_at_str)?,
        updated_at: parse_timestamp(4, &updated_at_str)?,
    })
}

fn parse_timestamp(idx: usize, value: &str) -> rusqlite::Result<DateTime<Utc>> {
    value
        .parse()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
