// src/models.rs

use crate::constants::*;
use crate::error::SchedulerError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Stats records keyed by `Item::key()`.
pub type StatsMap = HashMap<String, WordStats>;

// --- Items ---

/// A flashcard as supplied by the deck source.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Item {
    #[serde(alias = "english")]
    pub front: String,
    #[serde(alias = "indonesian")]
    pub back: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub importance: Option<i64>,
}

impl Item {
    pub fn new(front: impl Into<String>, back: impl Into<String>) -> Self {
        Item {
            front: front.into(),
            back: back.into(),
            importance: None,
        }
    }

    pub fn with_importance(mut self, importance: i64) -> Self {
        self.importance = Some(importance);
        self
    }

    /// Stable identity of the item. `None` when either text field is blank.
    pub fn key(&self) -> Option<String> {
        if self.front.trim().is_empty() || self.back.trim().is_empty() {
            return None;
        }
        Some(format!("{}:{}", self.front, self.back))
    }
}

/// Clamps a caller-declared importance into [1, 5]. Zero counts as unset.
pub fn resolve_importance(importance: Option<i64>) -> Option<i64> {
    match importance {
        Some(0) | None => None,
        Some(i) => Some(i.clamp(IMPORTANCE_MIN, IMPORTANCE_MAX)),
    }
}

// --- Responses ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseType {
    Correct,
    Sorta,
    Incorrect,
}

impl ResponseType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseType::Correct => "correct",
            ResponseType::Sorta => "sorta",
            ResponseType::Incorrect => "incorrect",
        }
    }

    /// Base review interval before importance scaling.
    pub fn base_interval(&self) -> f64 {
        match self {
            ResponseType::Correct => CORRECT_INTERVAL,
            ResponseType::Sorta => SORTA_INTERVAL,
            ResponseType::Incorrect => INCORRECT_INTERVAL,
        }
    }
}

impl FromStr for ResponseType {
    type Err = SchedulerError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "correct" | "c" => Ok(ResponseType::Correct),
            "sorta" | "s" => Ok(ResponseType::Sorta),
            "incorrect" | "i" => Ok(ResponseType::Incorrect),
            other => Err(SchedulerError::InvalidArgument(format!(
                "unknown response type '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for ResponseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// --- Stats ---

/// Per-item review record. Clock fields are logical-clock positions.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WordStats {
    #[serde(default)]
    pub correct_count: u32,
    #[serde(default)]
    pub sorta_count: u32,
    #[serde(default)]
    pub incorrect_count: u32,
    #[serde(default)]
    pub last_seen_count: i64,
    #[serde(default)]
    pub next_review_count: i64,
    #[serde(default = "default_importance")]
    pub importance: i64,
    /// Recomputed on every sort, never persisted.
    #[serde(skip)]
    pub priority_score: f64,
}

fn default_importance() -> i64 {
    IMPORTANCE_DEFAULT
}

impl WordStats {
    pub fn new(importance: i64) -> Self {
        WordStats {
            correct_count: 0,
            sorta_count: 0,
            incorrect_count: 0,
            last_seen_count: 0,
            next_review_count: 0,
            importance: importance.clamp(IMPORTANCE_MIN, IMPORTANCE_MAX),
            priority_score: 0.0,
        }
    }

    pub fn total_reviews(&self) -> u32 {
        self.correct_count + self.sorta_count + self.incorrect_count
    }

    /// Copy with counters and clock positions zeroed, importance kept.
    pub fn reset(&self) -> Self {
        WordStats::new(self.importance)
    }

    pub fn summary(&self) -> StatsSummary {
        StatsSummary {
            correct: self.correct_count,
            sorta: self.sorta_count,
            incorrect: self.incorrect_count,
            importance: self.importance,
        }
    }
}

/// Read-side view of counters, used for display and history merging.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatsSummary {
    pub correct: u32,
    pub sorta: u32,
    pub incorrect: u32,
    pub importance: i64,
}

impl StatsSummary {
    pub fn total(&self) -> u32 {
        self.correct + self.sorta + self.incorrect
    }

    /// Percentage of correct answers, rounded. 0 when nothing was graded.
    pub fn accuracy(&self) -> u32 {
        let total = self.total();
        if total == 0 {
            return 0;
        }
        (self.correct as f64 / total as f64 * 100.0).round() as u32
    }
}

impl fmt::Display for StatsSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Times seen: {} | Correct: {} | Sorta: {} | Incorrect: {} | Accuracy: {}%",
            self.total(),
            self.correct,
            self.sorta,
            self.incorrect,
            self.accuracy()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_key_joins_fields() {
        let item = Item::new("house", "rumah");
        assert_eq!(item.key().as_deref(), Some("house:rumah"));
    }

    #[test]
    fn test_item_key_rejects_blank_fields() {
        assert_eq!(Item::new("", "rumah").key(), None);
        assert_eq!(Item::new("house", "  ").key(), None);
    }

    #[test]
    fn test_item_deserializes_legacy_field_names() {
        let item: Item =
            serde_json::from_str(r#"{"english":"water","indonesian":"air","importance":5}"#)
                .unwrap();
        assert_eq!(item.front, "water");
        assert_eq!(item.back, "air");
        assert_eq!(item.importance, Some(5));
    }

    #[test]
    fn test_resolve_importance() {
        assert_eq!(resolve_importance(None), None);
        assert_eq!(resolve_importance(Some(0)), None);
        assert_eq!(resolve_importance(Some(9)), Some(5));
        assert_eq!(resolve_importance(Some(-2)), Some(1));
        assert_eq!(resolve_importance(Some(4)), Some(4));
    }

    #[test]
    fn test_response_type_parsing() {
        assert_eq!("correct".parse::<ResponseType>().unwrap(), ResponseType::Correct);
        assert_eq!("Sorta".parse::<ResponseType>().unwrap(), ResponseType::Sorta);
        assert_eq!("i".parse::<ResponseType>().unwrap(), ResponseType::Incorrect);

        let err = "maybe".parse::<ResponseType>().unwrap_err();
        assert!(matches!(err, SchedulerError::InvalidArgument(_)));
    }

    #[test]
    fn test_stats_ignore_legacy_fields_and_skip_priority() {
        let stats: WordStats = serde_json::from_str(
            r#"{"correctCount":2,"sortaCount":1,"incorrectCount":0,"lastSeenCount":4,
                "nextReviewCount":94,"importance":5,"level":1,"priorityScore":12.5}"#,
        )
        .unwrap();
        assert_eq!(stats.correct_count, 2);
        assert_eq!(stats.next_review_count, 94);
        assert_eq!(stats.priority_score, 0.0);

        let json = serde_json::to_string(&stats).unwrap();
        assert!(!json.contains("priorityScore"));
    }

    #[test]
    fn test_summary_display_and_accuracy() {
        let summary = StatsSummary {
            correct: 2,
            sorta: 0,
            incorrect: 1,
            importance: 3,
        };
        assert_eq!(summary.accuracy(), 67);
        assert_eq!(
            summary.to_string(),
            "Times seen: 3 | Correct: 2 | Sorta: 0 | Incorrect: 1 | Accuracy: 67%"
        );

        let empty = WordStats::new(3).summary();
        assert_eq!(empty.accuracy(), 0);
    }
}
