// src/database.rs

use log::debug;
use rusqlite::{Connection, Result};

pub fn init_db(conn: &Connection) -> Result<()> {
    debug!("init_db: Checking stats schema...");

    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS word_stats (
            word_key TEXT PRIMARY KEY,
            correct_count INTEGER NOT NULL DEFAULT 0,
            sorta_count INTEGER NOT NULL DEFAULT 0,
            incorrect_count INTEGER NOT NULL DEFAULT 0,
            last_seen_count INTEGER NOT NULL DEFAULT 0,
            next_review_count INTEGER NOT NULL DEFAULT 0,
            importance INTEGER NOT NULL DEFAULT 3
                CHECK (importance BETWEEN 1 AND 5),
            updated_at INTEGER NOT NULL
        );
        ",
    )?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_db_is_repeatable() {
        let conn = Connection::open_in_memory().unwrap();
        init_db(&conn).unwrap();
        init_db(&conn).unwrap();

        let count: i64 = conn
            .query_row("SELECT count(*) FROM word_stats", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 0);
    }
}
