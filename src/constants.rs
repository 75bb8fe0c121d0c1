// src/constants.rs

// --- Review Intervals (measured in cards seen, not seconds) ---
pub const CORRECT_INTERVAL: f64 = 90.0;
pub const SORTA_INTERVAL: f64 = 30.0;
pub const INCORRECT_INTERVAL: f64 = 15.0;

// --- Importance ---
pub const IMPORTANCE_MIN: i64 = 1;
pub const IMPORTANCE_MAX: i64 = 5;
pub const IMPORTANCE_DEFAULT: i64 = 3;

// Interval scaling: 1.5 - importance * 0.1 (importance 1 -> 1.4, 5 -> 1.0)
pub const INTERVAL_FACTOR_BASE: f64 = 1.5;
pub const INTERVAL_FACTOR_STEP: f64 = 0.1;

// --- Priority Scoring ---
// Due items: (6 - importance) * 10
pub const DUE_SCORE_CEILING: i64 = 6;
pub const DUE_SCORE_MULTIPLIER: f64 = 10.0;
// Not-yet-due items: 1 - (importance - 1) * 0.15
pub const PENDING_FACTOR_STEP: f64 = 0.15;

// --- Logical Clock ---
// Seed range for the session clock, exclusive upper bound.
pub const CLOCK_SEED_MAX: i64 = 10;

// --- Storage ---
pub const APP_DIR_NAME: &str = "flashcard-trainer";
pub const JSON_STORE_FILE: &str = "stats.json";
pub const SQLITE_STORE_FILE: &str = "stats.db";
