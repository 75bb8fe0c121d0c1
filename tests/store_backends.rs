use flashcard_trainer::{
    Item, JsonFileStore, ResponseType, Scheduler, SqliteStore, StatsStore,
};
use std::fs;
use tempfile::TempDir;

fn house() -> Item {
    Item::new("house", "rumah").with_importance(4)
}

#[test]
fn json_history_carries_across_sessions() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("stats.json");

    {
        let mut s = Scheduler::with_seed(Box::new(JsonFileStore::new(&path)), 0);
        s.update_stats(&house(), ResponseType::Correct).unwrap();
        s.update_stats(&house(), ResponseType::Incorrect).unwrap();
    }
    assert!(path.exists());

    let mut s = Scheduler::with_seed(Box::new(JsonFileStore::new(&path)), 0);
    // New session: nothing reviewed yet, so the item is due and unscheduled.
    assert!(s.session_stats(&house()).is_none());
    let totals = s.get_word_stats(&house()).unwrap();
    assert_eq!((totals.correct, totals.incorrect), (1, 1));

    s.update_stats(&house(), ResponseType::Sorta).unwrap();
    let stored = JsonFileStore::new(&path).load().unwrap();
    let record = &stored["house:rumah"];
    assert_eq!(record.correct_count, 1);
    assert_eq!(record.sorta_count, 1);
    assert_eq!(record.incorrect_count, 1);
    assert_eq!(record.importance, 4);
}

#[test]
fn json_missing_file_loads_empty() {
    let dir = TempDir::new().unwrap();
    let store = JsonFileStore::new(dir.path().join("absent.json"));
    assert!(store.load().unwrap().is_empty());
}

#[test]
fn corrupt_json_starts_fresh_and_is_overwritten() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("stats.json");
    fs::write(&path, "{ not json").unwrap();

    assert!(JsonFileStore::new(&path).load().is_err());

    let mut s = Scheduler::with_seed(Box::new(JsonFileStore::new(&path)), 3);
    assert_eq!(s.get_word_stats(&house()), None);

    s.update_stats(&house(), ResponseType::Correct).unwrap();
    let stored = JsonFileStore::new(&path).load().unwrap();
    assert_eq!(stored["house:rumah"].correct_count, 1);
    assert_eq!(stored["house:rumah"].next_review_count, 3 + 99);
}

#[test]
fn sqlite_history_carries_across_sessions() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("stats.db");

    {
        let store = SqliteStore::open(&path).unwrap();
        let mut s = Scheduler::with_seed(Box::new(store), 0);
        s.set_autosave(false);
        s.update_stats(&house(), ResponseType::Correct).unwrap();
        s.update_stats(&house(), ResponseType::Correct).unwrap();
        s.save_stats().unwrap();
    }

    let s = Scheduler::with_seed(Box::new(SqliteStore::open(&path).unwrap()), 0);
    let totals = s.get_word_stats(&house()).unwrap();
    assert_eq!(totals.correct, 2);
    assert_eq!(totals.accuracy(), 100);
    assert!(s.get_stats_display(&house()).starts_with("All time: Times seen: 2"));
}

#[test]
fn reset_is_persisted_with_importance() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("stats.db");

    let mut s = Scheduler::with_seed(Box::new(SqliteStore::open(&path).unwrap()), 0);
    let water = Item::new("water", "air").with_importance(2);
    s.update_stats(&house(), ResponseType::Incorrect).unwrap();
    s.update_stats(&water, ResponseType::Correct).unwrap();
    s.reset_stats().unwrap();
    drop(s);

    let stored = SqliteStore::open(&path).unwrap().load().unwrap();
    assert_eq!(stored.len(), 2);
    assert_eq!(stored["house:rumah"].total_reviews(), 0);
    assert_eq!(stored["house:rumah"].importance, 4);
    assert_eq!(stored["water:air"].next_review_count, 0);
    assert_eq!(stored["water:air"].importance, 2);
}
