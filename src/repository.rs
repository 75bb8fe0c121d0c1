// src/repository.rs

use crate::models::{StatsMap, WordStats};
use log::debug;
use rusqlite::{params, Connection, OptionalExtension, Result};

/// Reads every stats row into a map keyed by item key.
pub fn load_all_stats(conn: &Connection) -> Result<StatsMap> {
    let mut stmt = conn.prepare(
        "SELECT word_key, correct_count, sorta_count, incorrect_count,
                last_seen_count, next_review_count, importance
         FROM word_stats",
    )?;

    let rows = stmt.query_map([], |row| {
        let key: String = row.get(0)?;
        Ok((
            key,
            WordStats {
                correct_count: row.get(1)?,
                sorta_count: row.get(2)?,
                incorrect_count: row.get(3)?,
                last_seen_count: row.get(4)?,
                next_review_count: row.get(5)?,
                importance: row.get(6)?,
                priority_score: 0.0,
            },
        ))
    })?;

    let stats = rows.collect::<Result<StatsMap>>()?;
    debug!("[DB] Loaded {} stats rows", stats.len());
    Ok(stats)
}

/// Fetches a single record, if present.
pub fn get_word_stats(conn: &Connection, key: &str) -> Result<Option<WordStats>> {
    conn.query_row(
        "SELECT correct_count, sorta_count, incorrect_count,
                last_seen_count, next_review_count, importance
         FROM word_stats WHERE word_key = ?",
        [key],
        |row| {
            Ok(WordStats {
                correct_count: row.get(0)?,
                sorta_count: row.get(1)?,
                incorrect_count: row.get(2)?,
                last_seen_count: row.get(3)?,
                next_review_count: row.get(4)?,
                importance: row.get(5)?,
                priority_score: 0.0,
            })
        },
    )
    .optional()
}

/// Replaces the table contents with `stats` in a single transaction.
pub fn replace_all_stats(conn: &mut Connection, stats: &StatsMap, timestamp: i64) -> Result<()> {
    let tx = conn.transaction()?;
    tx.execute("DELETE FROM word_stats", [])?;
    {
        let mut stmt = tx.prepare(
            "INSERT INTO word_stats (word_key, correct_count, sorta_count, incorrect_count,
                last_seen_count, next_review_count, importance, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )?;
        for (key, s) in stats {
            stmt.execute(params![
                key,
                s.correct_count,
                s.sorta_count,
                s.incorrect_count,
                s.last_seen_count,
                s.next_review_count,
                s.importance,
                timestamp
            ])?;
        }
    }
    tx.commit()?;
    debug!("[DB] Persisted {} stats rows", stats.len());
    Ok(())
}
