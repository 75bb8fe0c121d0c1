// src/config.rs

use crate::constants::*;
use crate::error::Result;
use crate::store::{JsonFileStore, SqliteStore, StatsStore};
use clap::ValueEnum;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum StoreBackend {
    #[default]
    Json,
    Sqlite,
}

impl StoreBackend {
    fn default_file(&self) -> &'static str {
        match self {
            StoreBackend::Json => JSON_STORE_FILE,
            StoreBackend::Sqlite => SQLITE_STORE_FILE,
        }
    }
}

/// Runtime settings for a study session.
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub backend: StoreBackend,
    /// Falls back to the per-user data directory when unset.
    pub store_path: Option<PathBuf>,
    /// Fixed clock seed; random when unset.
    pub seed: Option<i64>,
    pub autosave: bool,
}

impl Config {
    pub fn resolved_store_path(&self) -> PathBuf {
        match &self.store_path {
            Some(path) => path.clone(),
            None => dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(APP_DIR_NAME)
                .join(self.backend.default_file()),
        }
    }

    pub fn open_store(&self) -> Result<Box<dyn StatsStore>> {
        let path = self.resolved_store_path();
        Ok(match self.backend {
            StoreBackend::Json => Box::new(JsonFileStore::new(path)),
            StoreBackend::Sqlite => Box::new(SqliteStore::open(path)?),
        })
    }
}
