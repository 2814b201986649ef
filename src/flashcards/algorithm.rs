//! SM-2 Spaced Repetition Algorithm
//!
//! Review grades use the four-button scale:
//! - 1: Again, not recalled
//! - 2: Hard, recalled only with great effort
//! - 3: Good, recalled after hesitation
//! - 4: Easy, recalled instantly
//!
//! Again and Hard reset the repetition run and schedule a short retry.
//! Good and Easy grow the interval (1 day, 6 days, then interval × ease)
//! and adjust the ease factor.
//!
//! Every function here is pure: the caller passes `now` in epoch
//! milliseconds.

use thiserror::Error;

use super::models::{Card, CardWithState, ReviewState, ReviewStats};
use super::progress::ProgressStore;

/// Minimum ease factor allowed
pub const MIN_EASE_FACTOR: f64 = 1.3;

const MINUTE_MS: i64 = 60 * 1000;
const DAY_MS: i64 = 24 * 60 * MINUTE_MS;

/// Interval after an Again or Hard grade
pub const RETRY_INTERVAL_MS: i64 = 10 * MINUTE_MS;
/// Interval after the first successful repetition
pub const FIRST_INTERVAL_MS: i64 = DAY_MS;
/// Interval after the second successful repetition
pub const SECOND_INTERVAL_MS: i64 = 6 * DAY_MS;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("Invalid grade {0}: expected 1 (again), 2 (hard), 3 (good) or 4 (easy)")]
    InvalidGrade(i32),
}

/// Review outcome chosen by the learner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Grade {
    Again = 1,
    Hard = 2,
    Good = 3,
    Easy = 4,
}

impl Grade {
    pub const ALL: [Grade; 4] = [Grade::Again, Grade::Hard, Grade::Good, Grade::Easy];

    pub fn value(self) -> i32 {
        self as i32
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Again => "Again",
            Self::Hard => "Hard",
            Self::Good => "Good",
            Self::Easy => "Easy",
        }
    }

    pub fn is_pass(self) -> bool {
        self.value() >= 3
    }
}

impl TryFrom<i32> for Grade {
    type Error = ScheduleError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Again),
            2 => Ok(Self::Hard),
            3 => Ok(Self::Good),
            4 => Ok(Self::Easy),
            other => Err(ScheduleError::InvalidGrade(other)),
        }
    }
}

/// Calculate the state that follows `state` after a review graded `grade`
pub fn calculate_next_review(state: &ReviewState, grade: Grade, now: i64) -> ReviewState {
    let mut interval_ms = state.interval_ms;
    let mut ease_factor = state.ease_factor;
    let mut repetitions = state.repetitions;

    if grade.is_pass() {
        repetitions += 1;
        interval_ms = match repetitions {
            1 => FIRST_INTERVAL_MS,
            2 => SECOND_INTERVAL_MS,
            _ => (interval_ms as f64 * ease_factor).round().min(i64::MAX as f64) as i64,
        };

        // EF' = EF + (0.1 - (4-g) * (0.08 + (4-g) * 0.02))
        let miss = f64::from(4 - grade.value());
        ease_factor += 0.1 - miss * (0.08 + miss * 0.02);
        ease_factor = ease_factor.max(MIN_EASE_FACTOR);
    } else {
        repetitions = 0;
        interval_ms = RETRY_INTERVAL_MS;
    }

    ReviewState {
        interval_ms,
        ease_factor,
        repetitions,
        due_at: now.saturating_add(interval_ms),
    }
}

/// Ids from `card_ids` that are due at `now`, in input order.
///
/// Cards without stored state are always due.
pub fn due_card_ids<'a, I>(card_ids: I, store: &ProgressStore, now: i64) -> Vec<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    card_ids
        .into_iter()
        .filter(|id| store.state(id).is_due(now))
        .collect()
}

/// Cards that are due at `now` with their states, in input order
pub fn due_cards<'a>(cards: &'a [Card], store: &ProgressStore, now: i64) -> Vec<CardWithState<'a>> {
    cards
        .iter()
        .map(|card| CardWithState {
            card,
            state: store.state(&card.id),
        })
        .filter(|c| c.state.is_due(now))
        .collect()
}

/// Interval each grade would give, ordered Again, Hard, Good, Easy
pub fn preview_intervals(state: &ReviewState) -> [i64; 4] {
    Grade::ALL.map(|grade| calculate_next_review(state, grade, 0).interval_ms)
}

/// Count new, learning, mature and due cards
pub fn review_stats(cards: &[Card], store: &ProgressStore, now: i64) -> ReviewStats {
    let mut stats = ReviewStats {
        total_cards: cards.len(),
        ..ReviewStats::default()
    };

    for card in cards {
        match store.get(&card.id) {
            None => stats.new_cards += 1,
            Some(state) if state.repetitions < 2 => stats.learning_cards += 1,
            Some(_) => stats.mature_cards += 1,
        }

        if store.state(&card.id).is_due(now) {
            stats.due_cards += 1;
        }
    }

    stats
}

/// Format an interval in milliseconds to a short human-readable string
pub fn format_interval(interval_ms: i64) -> String {
    let minutes = interval_ms / MINUTE_MS;
    let days = interval_ms / DAY_MS;

    if interval_ms <= 0 {
        "now".to_string()
    } else if minutes < 60 {
        format!("{}m", minutes.max(1))
    } else if days < 1 {
        format!("{}h", minutes / 60)
    } else if days < 7 {
        format!("{}d", days)
    } else if days < 30 {
        format!("{}w", days / 7)
    } else if days < 365 {
        format!("{}mo", days / 30)
    } else {
        format!("{}y", days / 365)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOW: i64 = 1_700_000_000_000;

    #[test]
    fn test_grade_from_rating() {
        assert_eq!(Grade::try_from(1), Ok(Grade::Again));
        assert_eq!(Grade::try_from(4), Ok(Grade::Easy));
        assert_eq!(Grade::try_from(0), Err(ScheduleError::InvalidGrade(0)));
        assert_eq!(Grade::try_from(5), Err(ScheduleError::InvalidGrade(5)));
    }

    #[test]
    fn test_first_review_good() {
        let result = calculate_next_review(&ReviewState::default(), Grade::Good, NOW);

        assert_eq!(result.repetitions, 1);
        assert_eq!(result.interval_ms, 86_400_000);
        assert_eq!(result.due_at, NOW + 86_400_000);
        // Good leaves the ease factor where it was
        assert!((result.ease_factor - 2.5).abs() < 1e-9);
    }

    #[test]
    fn test_second_review_good() {
        let state = ReviewState {
            interval_ms: FIRST_INTERVAL_MS,
            repetitions: 1,
            ..ReviewState::default()
        };

        let result = calculate_next_review(&state, Grade::Good, NOW);

        assert_eq!(result.repetitions, 2);
        assert_eq!(result.interval_ms, 6 * 86_400_000);
    }

    #[test]
    fn test_subsequent_review_multiplies_by_ease() {
        let state = ReviewState {
            interval_ms: 10 * DAY_MS,
            ease_factor: 2.5,
            repetitions: 5,
            due_at: 0,
        };

        let result = calculate_next_review(&state, Grade::Good, NOW);

        assert_eq!(result.interval_ms, 25 * DAY_MS);
        assert_eq!(result.due_at, NOW + 25 * DAY_MS);
    }

    #[test]
    fn test_again_always_resets() {
        let states = [
            ReviewState::default(),
            ReviewState { interval_ms: 30 * DAY_MS, ease_factor: 2.9, repetitions: 7, due_at: 5 },
            ReviewState { interval_ms: DAY_MS, ease_factor: 1.3, repetitions: 1, due_at: 0 },
        ];

        for state in states {
            let result = calculate_next_review(&state, Grade::Again, NOW);
            assert_eq!(result.repetitions, 0);
            assert_eq!(result.interval_ms, 600_000);
            assert_eq!(result.due_at, NOW + 600_000);
            assert_eq!(result.ease_factor, state.ease_factor);
        }
    }

    #[test]
    fn test_hard_is_a_lapse() {
        let state = ReviewState { interval_ms: 6 * DAY_MS, ease_factor: 2.5, repetitions: 2, due_at: 0 };
        let result = calculate_next_review(&state, Grade::Hard, NOW);
        assert_eq!(result.repetitions, 0);
        assert_eq!(result.interval_ms, RETRY_INTERVAL_MS);
    }

    #[test]
    fn test_easy_raises_ease() {
        let result = calculate_next_review(&ReviewState::default(), Grade::Easy, NOW);
        assert!((result.ease_factor - 2.6).abs() < 1e-9);
    }

    #[test]
    fn test_ease_factor_minimum() {
        let state = ReviewState { interval_ms: 0, ease_factor: 1.3, repetitions: 0, due_at: 0 };

        // Good at the floor keeps it there
        let result = calculate_next_review(&state, Grade::Good, NOW);
        assert!(result.ease_factor >= MIN_EASE_FACTOR);

        let mut current = state;
        for _ in 0..10 {
            current = calculate_next_review(&current, Grade::Again, NOW);
            assert!(current.ease_factor >= MIN_EASE_FACTOR);
        }
    }

    #[test]
    fn test_consecutive_easy_reviews_never_shrink_interval() {
        let mut state = ReviewState::default();
        let mut intervals = Vec::new();

        for _ in 0..4 {
            state = calculate_next_review(&state, Grade::Easy, NOW);
            assert!(state.ease_factor >= MIN_EASE_FACTOR);
            intervals.push(state.interval_ms);
        }

        assert_eq!(intervals[0], FIRST_INTERVAL_MS);
        assert_eq!(intervals[1], SECOND_INTERVAL_MS);
        assert!(intervals[2] >= intervals[1]);
        assert!(intervals[3] >= intervals[2]);
    }

    #[test]
    fn test_long_easy_streak_stays_in_range() {
        let mut state = ReviewState::default();

        for _ in 0..40 {
            let next = calculate_next_review(&state, Grade::Easy, NOW);
            assert!(next.interval_ms >= state.interval_ms);
            assert!(next.due_at >= NOW);
            state = next;
        }

        assert_eq!(state.repetitions, 40);
        assert_eq!(state.due_at, i64::MAX);
        assert!(!state.is_due(NOW));
    }

    #[test]
    fn test_due_selection_keeps_input_order() {
        let mut store = ProgressStore::new();
        store.insert("past", ReviewState { due_at: NOW - 1, ..ReviewState::default() });
        store.insert("future", ReviewState { due_at: NOW + 1, ..ReviewState::default() });
        store.insert("exact", ReviewState { due_at: NOW, ..ReviewState::default() });

        let due = due_card_ids(["never", "future", "past", "exact"], &store, NOW);

        assert_eq!(due, ["never", "past", "exact"]);
    }

    #[test]
    fn test_preview_intervals() {
        let intervals = preview_intervals(&ReviewState::default());
        assert_eq!(
            intervals,
            [RETRY_INTERVAL_MS, RETRY_INTERVAL_MS, FIRST_INTERVAL_MS, FIRST_INTERVAL_MS]
        );
    }

    #[test]
    fn test_format_interval() {
        assert_eq!(format_interval(0), "now");
        assert_eq!(format_interval(RETRY_INTERVAL_MS), "10m");
        assert_eq!(format_interval(3 * 60 * MINUTE_MS), "3h");
        assert_eq!(format_interval(DAY_MS), "1d");
        assert_eq!(format_interval(6 * DAY_MS), "6d");
        assert_eq!(format_interval(14 * DAY_MS), "2w");
        assert_eq!(format_interval(90 * DAY_MS), "3mo");
        assert_eq!(format_interval(730 * DAY_MS), "2y");
    }
}
