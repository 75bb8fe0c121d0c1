// src/store.rs
//
// Durable key-value backends for historical stats.

use crate::database;
use crate::error::Result;
use crate::models::StatsMap;
use crate::repository;
use chrono::Utc;
use log::{debug, info};
use rusqlite::Connection;
use std::fs;
use std::path::{Path, PathBuf};

pub trait StatsStore {
    /// Returns every persisted record. A store with nothing saved yet
    /// returns an empty map.
    fn load(&self) -> Result<StatsMap>;

    /// Replaces the persisted records with `stats`.
    fn save(&mut self, stats: &StatsMap) -> Result<()>;
}

// --- In-memory ---

#[derive(Debug, Default)]
pub struct MemoryStore {
    stats: StatsMap,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_stats(stats: StatsMap) -> Self {
        MemoryStore { stats }
    }
}

impl StatsStore for MemoryStore {
    fn load(&self) -> Result<StatsMap> {
        Ok(self.stats.clone())
    }

    fn save(&mut self, stats: &StatsMap) -> Result<()> {
        self.stats = stats.clone();
        Ok(())
    }
}

// --- JSON file ---

/// Stores the whole map as one JSON object.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl StatsStore for JsonFileStore {
    fn load(&self) -> Result<StatsMap> {
        if !self.path.exists() {
            debug!("No stats file at {:?}, starting fresh", self.path);
            return Ok(StatsMap::new());
        }

        let content = fs::read_to_string(&self.path)?;
        let stats: StatsMap = serde_json::from_str(&content)?;
        info!("Loaded {} records from {:?}", stats.len(), self.path);
        Ok(stats)
    }

    fn save(&mut self, stats: &StatsMap) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        // Sibling temp file, then rename into place.
        let tmp = self.temp_path();
        fs::write(&tmp, serde_json::to_string_pretty(stats)?)?;
        fs::rename(&tmp, &self.path)?;
        debug!("Saved {} records to {:?}", stats.len(), self.path);
        Ok(())
    }
}

// --- SQLite ---

pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }
        info!("Database path: {:?}", path);
        Self::from_connection(Connection::open(path)?)
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        database::init_db(&conn)?;
        Ok(SqliteStore { conn })
    }
}

impl StatsStore for SqliteStore {
    fn load(&self) -> Result<StatsMap> {
        Ok(repository::load_all_stats(&self.conn)?)
    }

    fn save(&mut self, stats: &StatsMap) -> Result<()> {
        let now = Utc::now().timestamp();
        repository::replace_all_stats(&mut self.conn, stats, now)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::WordStats;

    #[test]
    fn test_memory_store_replaces_contents() {
        let mut store = MemoryStore::new();
        assert!(store.load().unwrap().is_empty());

        let mut stats = StatsMap::new();
        stats.insert("a:b".to_string(), WordStats::new(1));
        store.save(&stats).unwrap();
        assert_eq!(store.load().unwrap(), stats);

        store.save(&StatsMap::new()).unwrap();
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_sqlite_store_in_memory() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        let mut stats = StatsMap::new();
        let mut record = WordStats::new(4);
        record.sorta_count = 2;
        stats.insert("a:b".to_string(), record);

        store.save(&stats).unwrap();
        assert_eq!(store.load().unwrap(), stats);
    }
}
