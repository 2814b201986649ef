//! Study session
//!
//! A session owns the progress store for one reviewer. Each grade is
//! persisted before the next one is computed, so overlapping saves cannot
//! drop a review.

use super::algorithm::{due_cards, review_stats, Grade};
use super::models::{Card, CardWithState, ReviewState, ReviewStats};
use super::progress::{load_progress, save_progress, ProgressBackend, ProgressStore, Result};

pub struct StudySession<B: ProgressBackend> {
    backend: B,
    store: ProgressStore,
}

impl<B: ProgressBackend> StudySession<B> {
    /// Load progress from `backend`; unreadable progress starts empty
    pub async fn open(backend: B) -> Self {
        let store = load_progress(&backend).await;
        log::info!("Opened study session with {} reviewed cards", store.len());
        Self { backend, store }
    }

    pub fn store(&self) -> &ProgressStore {
        &self.store
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn state(&self, card_id: &str) -> ReviewState {
        self.store.state(card_id)
    }

    /// Cards due at `now`, in the order given
    pub fn due_queue<'a>(&self, cards: &'a [Card], now: i64) -> Vec<CardWithState<'a>> {
        due_cards(cards, &self.store, now)
    }

    pub fn stats(&self, cards: &[Card], now: i64) -> ReviewStats {
        review_stats(cards, &self.store, now)
    }

    /// Grade a card and persist the result.
    ///
    /// The in-memory store only changes once the save succeeded.
    pub async fn grade(&mut self, card_id: &str, grade: Grade, now: i64) -> Result<ReviewState> {
        let next = self.store.review(card_id, grade, now);
        save_progress(&self.backend, &next).await?;

        let state = next.state(card_id);
        self.store = next;
        log::info!(
            "Reviewed {} as {}: next due in {} ms",
            card_id,
            grade.label(),
            state.interval_ms
        );
        Ok(state)
    }
}
