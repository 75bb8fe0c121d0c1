// src/scheduler.rs

use crate::constants::*;
use crate::error::{Result, SchedulerError};
use crate::models::{resolve_importance, Item, ResponseType, StatsMap, StatsSummary, WordStats};
use crate::store::StatsStore;
use log::{debug, error, info, warn};
use rand::Rng;

/// Priority scheduler for one study session.
///
/// Owns the logical clock and two stats maps: `session` (reset every run,
/// the only input to scheduling decisions) and `history` (the durable
/// baseline loaded from the store, only ever merged for display and saving).
pub struct Scheduler {
    store: Box<dyn StatsStore>,
    history: StatsMap,
    session: StatsMap,
    global_word_counter: i64,
    autosave: bool,
}

// --- Public Interface ---

impl Scheduler {
    /// Opens a session with the clock seeded to a small random offset.
    pub fn open(store: Box<dyn StatsStore>) -> Self {
        let seed = rand::thread_rng().gen_range(0..CLOCK_SEED_MAX);
        Self::with_seed(store, seed)
    }

    /// Opens a session with an explicit clock seed.
    pub fn with_seed(store: Box<dyn StatsStore>, seed: i64) -> Self {
        let history = match store.load() {
            Ok(stats) => stats,
            Err(e) => {
                warn!("Failed to load stats, starting with empty history: {}", e);
                StatsMap::new()
            }
        };
        info!(
            "Session opened: {} historical records, clock seeded at {}",
            history.len(),
            seed
        );

        Scheduler {
            store,
            history,
            session: StatsMap::new(),
            global_word_counter: seed,
            autosave: true,
        }
    }

    /// Persist after every graded response (on by default).
    pub fn set_autosave(&mut self, enabled: bool) {
        self.autosave = enabled;
    }

    pub fn global_word_counter(&self) -> i64 {
        self.global_word_counter
    }

    pub fn store(&self) -> &dyn StatsStore {
        self.store.as_ref()
    }

    /// Creates the session record for `item` or refreshes its importance.
    /// Counters of an existing record are never touched.
    pub fn init_item_stats(&mut self, item: &Item) -> Result<&WordStats> {
        let key = require_key(item)?;
        Ok(self.upsert(&key, item.importance))
    }

    /// Records a graded response and schedules the next review.
    ///
    /// A missing record is created first. When autosave is on and the store
    /// write fails, the error is returned but the in-memory update stands.
    pub fn update_stats(&mut self, item: &Item, response: ResponseType) -> Result<WordStats> {
        let key = require_key(item)?;
        let counter = self.global_word_counter;
        let stats = self.upsert(&key, item.importance);

        match response {
            ResponseType::Correct => stats.correct_count += 1,
            ResponseType::Sorta => stats.sorta_count += 1,
            ResponseType::Incorrect => stats.incorrect_count += 1,
        }

        let factor = interval_factor(stats.importance);
        let adjusted_interval = (response.base_interval() * factor).round() as i64;
        debug!(
            "[Schedule Input] {}: response {}, importance {}, factor {:.2}",
            key, response, stats.importance, factor
        );

        stats.next_review_count = counter + adjusted_interval;
        stats.last_seen_count = counter;
        let updated = stats.clone();

        self.global_word_counter += 1;

        info!(
            "[Schedule Result] {}: next review at {} (interval {}), clock -> {}",
            key, updated.next_review_count, adjusted_interval, self.global_word_counter
        );

        if self.autosave {
            self.save_stats()?;
        }
        Ok(updated)
    }

    /// Orders items so the one to show next comes first.
    ///
    /// `None` entries and items without a usable key are dropped. Items with
    /// no session record are initialised and scored in the same pass.
    pub fn sort_by_priority<I, T>(&mut self, items: I) -> Vec<Item>
    where
        I: IntoIterator<Item = T>,
        T: Into<Option<Item>>,
    {
        let clock = self.global_word_counter;
        let mut scored: Vec<(f64, Item)> = Vec::new();

        for entry in items {
            let item: Option<Item> = entry.into();
            let Some(item) = item else {
                continue;
            };
            let Some(key) = item.key() else {
                warn!("Skipping malformed item: {:?}", item);
                continue;
            };

            if !self.session.contains_key(&key) {
                self.upsert(&key, item.importance);
            }
            let Some(stats) = self.session.get_mut(&key) else {
                continue;
            };

            stats.priority_score = priority_score(stats, clock);
            scored.push((stats.priority_score, item));
        }

        // sort_by is stable: equal scores keep their input order.
        scored.sort_by(|a, b| a.0.total_cmp(&b.0));
        debug!("Sorted {} items at clock {}", scored.len(), clock);

        scored.into_iter().map(|(_, item)| item).collect()
    }

    /// Whether the item is due in this session. Unknown items are due.
    pub fn is_due(&self, item: &Item) -> bool {
        item.key()
            .and_then(|key| self.session.get(&key))
            .map_or(true, |s| s.next_review_count <= self.global_word_counter)
    }

    pub fn due_items<'a>(&self, items: &'a [Item]) -> Vec<&'a Item> {
        items.iter().filter(|item| self.is_due(item)).collect()
    }

    /// Session record only, as used by the scheduling math.
    pub fn session_stats(&self, item: &Item) -> Option<&WordStats> {
        item.key().and_then(|key| self.session.get(&key))
    }

    /// Lifetime totals: historical counters plus this session's.
    pub fn get_word_stats(&self, item: &Item) -> Option<StatsSummary> {
        let key = item.key()?;
        merge_summary(self.history.get(&key), self.session.get(&key))
    }

    pub fn get_stats_display(&self, item: &Item) -> String {
        let Some(total) = self.get_word_stats(item) else {
            return "New word".to_string();
        };
        match self.session_stats(item) {
            Some(session) => format!("Session: {}\nAll time: {}", session.summary(), total),
            None => format!("All time: {}", total),
        }
    }

    /// Persists history merged with the session. The in-memory baseline is
    /// left alone, so saving twice writes the same data.
    pub fn save_stats(&mut self) -> Result<()> {
        let merged = self.merged_stats();
        match self.store.save(&merged) {
            Ok(()) => {
                debug!("Saved {} records", merged.len());
                Ok(())
            }
            Err(e) => {
                error!("Failed to save stats: {}", e);
                Err(e)
            }
        }
    }

    /// Zeroes counters and clock positions for every known item, keeping
    /// importance, and resets the clock to 0. Nothing changes in memory
    /// unless the reset state was persisted.
    pub fn reset_stats(&mut self) -> Result<()> {
        let session: StatsMap = self
            .session
            .iter()
            .map(|(key, stats)| (key.clone(), stats.reset()))
            .collect();

        let mut history: StatsMap = self
            .history
            .iter()
            .map(|(key, stats)| (key.clone(), stats.reset()))
            .collect();
        for (key, stats) in &session {
            history.insert(key.clone(), stats.clone());
        }

        if let Err(e) = self.store.save(&history) {
            error!("Failed to persist reset, keeping current stats: {}", e);
            return Err(e);
        }

        info!("Reset {} records", history.len());
        self.history = history;
        self.session = session;
        self.global_word_counter = 0;
        Ok(())
    }
}

// --- Internal Logic ---

impl Scheduler {
    fn upsert(&mut self, key: &str, importance: Option<i64>) -> &mut WordStats {
        let declared = resolve_importance(importance);
        let history = &self.history;

        let stats = self.session.entry(key.to_string()).or_insert_with(|| {
            let importance = declared
                .or_else(|| history.get(key).map(|h| h.importance))
                .unwrap_or(IMPORTANCE_DEFAULT);
            debug!("New session record for {} (importance {})", key, importance);
            WordStats::new(importance)
        });

        if let Some(importance) = declared {
            stats.importance = importance;
        }
        stats
    }

    fn merged_stats(&self) -> StatsMap {
        let mut merged = self.history.clone();
        for (key, session) in &self.session {
            merged
                .entry(key.clone())
                .and_modify(|h| {
                    h.correct_count += session.correct_count;
                    h.sorta_count += session.sorta_count;
                    h.incorrect_count += session.incorrect_count;
                    h.importance = session.importance;
                    if session.total_reviews() > 0 {
                        h.last_seen_count = session.last_seen_count;
                        h.next_review_count = session.next_review_count;
                    }
                })
                .or_insert_with(|| session.clone());
        }
        merged
    }
}

fn require_key(item: &Item) -> Result<String> {
    item.key().ok_or_else(|| {
        SchedulerError::InvalidArgument(format!("item has no usable key: {:?}", item))
    })
}

/// 1.5 - importance * 0.1: importance 1 -> 1.4, importance 5 -> 1.0.
fn interval_factor(importance: i64) -> f64 {
    INTERVAL_FACTOR_BASE - importance as f64 * INTERVAL_FACTOR_STEP
}

/// Lower is shown sooner. Due items rank purely by importance; pending
/// items by distance to their review slot, shortened for important items.
fn priority_score(stats: &WordStats, clock: i64) -> f64 {
    let review_score = stats.next_review_count - clock;
    if review_score <= 0 {
        (DUE_SCORE_CEILING - stats.importance) as f64 * DUE_SCORE_MULTIPLIER
    } else {
        let factor = 1.0 - (stats.importance - 1) as f64 * PENDING_FACTOR_STEP;
        review_score as f64 * factor
    }
}

fn merge_summary(history: Option<&WordStats>, session: Option<&WordStats>) -> Option<StatsSummary> {
    match (history, session) {
        (None, None) => None,
        (Some(h), None) => Some(h.summary()),
        (None, Some(s)) => Some(s.summary()),
        (Some(h), Some(s)) => Some(StatsSummary {
            correct: h.correct_count + s.correct_count,
            sorta: h.sorta_count + s.sorta_count,
            incorrect: h.incorrect_count + s.incorrect_count,
            importance: s.importance,
        }),
    }
}
