//! Data models for the flashcard system

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Type of flashcard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardType {
    /// Heading plus the first paragraph below it
    Definition,
    /// `Q:` line immediately followed by an `A:` line
    Qa,
    /// A linked term blanked out of its surrounding text
    Cloze,
}

impl CardType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Definition => "definition",
            Self::Qa => "qa",
            Self::Cloze => "cloze",
        }
    }

    /// Prefix used in card ids
    pub fn id_prefix(&self) -> &'static str {
        match self {
            Self::Definition => "def",
            Self::Qa => "qa",
            Self::Cloze => "cloze",
        }
    }
}

impl fmt::Display for CardType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CardType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "definition" | "def" => Ok(Self::Definition),
            "qa" | "q/a" => Ok(Self::Qa),
            "cloze" => Ok(Self::Cloze),
            other => Err(format!(
                "unknown card type '{}' (expected definition, qa or cloze)",
                other
            )),
        }
    }
}

/// Where a card was extracted from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardSource {
    pub path: String,
    pub note_id: String,
}

/// A study card derived from note text.
///
/// Cards are recomputed from notes on demand and never stored; only their
/// review state is persisted, keyed by `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: String,
    #[serde(rename = "type")]
    pub card_type: CardType,
    pub front: String,
    pub back: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    pub sources: Vec<CardSource>,
}

impl Card {
    pub fn first_source(&self) -> Option<&CardSource> {
        self.sources.first()
    }
}

/// Spaced repetition state for one card
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewState {
    /// Current interval in milliseconds
    pub interval_ms: i64,
    /// SM-2 ease factor, never below 1.3
    pub ease_factor: f64,
    /// Consecutive successful reviews
    pub repetitions: u32,
    /// Epoch milliseconds at which the card is next due
    pub due_at: i64,
}

impl Default for ReviewState {
    /// State of a card that was never reviewed; `due_at` 0 makes it due now.
    fn default() -> Self {
        Self {
            interval_ms: 0,
            ease_factor: 2.5,
            repetitions: 0,
            due_at: 0,
        }
    }
}

impl ReviewState {
    pub fn is_due(&self, now: i64) -> bool {
        self.due_at <= now
    }
}

/// Statistics over a set of cards
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewStats {
    pub total_cards: usize,
    /// Never reviewed
    pub new_cards: usize,
    /// Reviewed, fewer than two successful repetitions in a row
    pub learning_cards: usize,
    /// Two or more successful repetitions in a row
    pub mature_cards: usize,
    pub due_cards: usize,
}

/// A card with its current state, used for review sessions
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardWithState<'a> {
    pub card: &'a Card,
    pub state: ReviewState,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_type_parsing() {
        assert_eq!("qa".parse::<CardType>(), Ok(CardType::Qa));
        assert_eq!(" Cloze ".parse::<CardType>(), Ok(CardType::Cloze));
        assert_eq!("def".parse::<CardType>(), Ok(CardType::Definition));
        assert!("basic".parse::<CardType>().is_err());
    }

    #[test]
    fn test_card_serializes_type_field() {
        let card = Card {
            id: "qa_1".to_string(),
            card_type: CardType::Qa,
            front: "F".to_string(),
            back: "B".to_string(),
            tags: Vec::new(),
            sources: vec![CardSource { path: "a.md".to_string(), note_id: "a".to_string() }],
        };

        let json = serde_json::to_value(&card).unwrap();
        assert_eq!(json["type"], "qa");
        assert_eq!(json["sources"][0]["noteId"], "a");
        assert!(json.get("tags").is_none());
    }

    #[test]
    fn test_default_state_is_due_immediately() {
        let state = ReviewState::default();
        assert_eq!(state.ease_factor, 2.5);
        assert!(state.is_due(0));
        assert!(state.is_due(1_700_000_000_000));
    }
}
