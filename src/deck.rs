// src/deck.rs

use crate::error::Result;
use crate::models::Item;
use log::{info, warn};
use serde::Deserialize;
use std::fs;
use std::path::Path;

// Entries are read loosely so one bad card doesn't reject the whole deck.
#[derive(Deserialize)]
struct JsonCard {
    #[serde(default, alias = "english")]
    front: Option<String>,
    #[serde(default, alias = "indonesian")]
    back: Option<String>,
    #[serde(default)]
    importance: Option<i64>,
}

/// Reads a JSON array of cards. Entries missing a text field come back as
/// `None` so the caller can hand the list straight to the scheduler.
pub fn load_deck(path: &Path) -> Result<Vec<Option<Item>>> {
    let data = fs::read_to_string(path)?;
    let deck = parse_deck(&data)?;
    info!("Loaded deck {:?}: {} entries", path, deck.len());
    Ok(deck)
}

pub fn parse_deck(data: &str) -> Result<Vec<Option<Item>>> {
    let cards: Vec<Option<JsonCard>> = serde_json::from_str(data)?;

    let deck = cards
        .into_iter()
        .enumerate()
        .map(|(idx, card)| {
            let card = card?;
            match (card.front, card.back) {
                (Some(front), Some(back)) => Some(Item {
                    front,
                    back,
                    importance: card.importance,
                }),
                _ => {
                    warn!("Deck entry {} is missing a text field, skipping", idx);
                    None
                }
            }
        })
        .collect();

    Ok(deck)
}
