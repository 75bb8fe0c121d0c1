// src/lib.rs

pub mod config;
pub mod constants;
pub mod database;
pub mod deck;
pub mod error;
pub mod models;
pub mod repository;
pub mod scheduler;
pub mod store;

pub use error::{Result, SchedulerError};
pub use models::{Item, ResponseType, StatsMap, StatsSummary, WordStats};
pub use scheduler::Scheduler;
pub use store::{JsonFileStore, MemoryStore, SqliteStore, StatsStore};
