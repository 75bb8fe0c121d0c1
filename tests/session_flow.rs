use flashcard_trainer::deck::parse_deck;
use flashcard_trainer::{MemoryStore, ResponseType, Scheduler};

const DECK: &str = r#"[
    {"english": "to eat", "indonesian": "makan", "importance": 5},
    {"english": "house", "indonesian": "rumah", "importance": 3},
    {"english": "slowly", "indonesian": "pelan-pelan", "importance": 1},
    {"indonesian": "tanpa arti"}
]"#;

#[test]
fn drill_cycles_through_the_deck_by_priority() {
    let deck = parse_deck(DECK).unwrap();
    let mut s = Scheduler::with_seed(Box::new(MemoryStore::new()), 0);

    // Everything is due at the start, so importance decides.
    let order: Vec<String> = s
        .sort_by_priority(deck.clone())
        .into_iter()
        .map(|item| item.back)
        .collect();
    assert_eq!(order, vec!["makan", "rumah", "pelan-pelan"]);

    // Answering the top card drops it behind the next due card.
    let first = s.sort_by_priority(deck.clone()).remove(0);
    s.update_stats(&first, ResponseType::Correct).unwrap();
    let next = s.sort_by_priority(deck.clone()).remove(0);
    assert_eq!(next.back, "rumah");

    // A missed card comes back quickly, even ahead of a due low-importance card.
    s.update_stats(&next, ResponseType::Incorrect).unwrap();
    let again = s.sort_by_priority(deck.clone()).remove(0);
    assert_eq!(again.back, "rumah");

    s.update_stats(&again, ResponseType::Sorta).unwrap();
    assert_eq!(s.global_word_counter(), 3);

    let upcoming = s.sort_by_priority(deck.clone());
    let order: Vec<&str> = upcoming.iter().map(|item| item.back.as_str()).collect();
    assert_eq!(order, vec!["rumah", "makan", "pelan-pelan"]);

    let due = s.due_items(&upcoming);
    assert_eq!(due.len(), 1);
    assert_eq!(due[0].back, "pelan-pelan");
}
