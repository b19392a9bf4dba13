//! Write-behind recording of study results.
//!
//! The evaluation core emits a result value and moves on; persisting the
//! learner's progress is somebody else's problem. That somebody is a
//! [`ProgressStore`] behind a [`CoalescingProgressSink`]: updates are
//! queued without blocking the request path, coalesced per card between
//! flushes, and written out on a fixed interval. A failed flush carries
//! the batch over to the next tick, so delivery is at-least-once.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use uuid::Uuid;

/// One graded submission, keyed by deck and card position.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressUpdate {
    pub deck_id: Uuid,
    pub card_index: u32,
    pub score: u8,
    pub correct: bool,
    pub recorded_at: DateTime<Utc>,
}

/// Accumulated progress for one card between flushes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardProgress {
    pub attempts: u32,
    pub correct: u32,
    /// Score history in submission order.
    pub scores: Vec<u8>,
}

impl CardProgress {
    fn absorb(&mut self, update: &ProgressUpdate) {
        self.attempts += 1;
        if update.correct {
            self.correct += 1;
        }
        self.scores.push(update.score);
    }

    fn merge_after(&mut self, earlier: Self) {
        self.attempts += earlier.attempts;
        self.correct += earlier.correct;
        let mut scores = earlier.scores;
        scores.append(&mut self.scores);
        self.scores = scores;
    }
}

/// A batch of coalesced progress, one entry per `(deck, card)`.
pub type ProgressBatch = HashMap<(Uuid, u32), CardProgress>;

/// The persistent progress store. Out of scope for this service beyond the
/// interface; implementations must tolerate repeated delivery of the same
/// attempts (upsert, not insert).
#[async_trait]
pub trait ProgressStore: Send + Sync {
    async fn upsert(&self, batch: ProgressBatch) -> anyhow::Result<()>;
}

/// Non-blocking entry point handlers use to report a graded submission.
pub trait ProgressSink: Send + Sync {
    fn record(&self, update: ProgressUpdate);
}

/// Queues updates on an unbounded channel and flushes them to the store
/// from a background task.
#[derive(Debug, Clone)]
pub struct CoalescingProgressSink {
    tx: mpsc::UnboundedSender<ProgressUpdate>,
}

impl CoalescingProgressSink {
    /// Spawn the flush task on the current tokio runtime.
    pub fn spawn(store: Arc<dyn ProgressStore>, flush_interval: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        tokio::spawn(flush_loop(rx, store, flush_interval));
        Self { tx }
    }
}

impl ProgressSink for CoalescingProgressSink {
    fn record(&self, update: ProgressUpdate) {
        // Only fails when the flush task is gone, i.e. during shutdown
        if self.tx.send(update).is_err() {
            tracing::warn!("progress sink closed; dropping update");
        }
    }
}

async fn flush_loop(
    mut rx: mpsc::UnboundedReceiver<ProgressUpdate>,
    store: Arc<dyn ProgressStore>,
    flush_interval: Duration,
) {
    let mut pending = ProgressBatch::new();
    let mut ticker = tokio::time::interval(flush_interval);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            received = rx.recv() => match received {
                Some(update) => {
                    pending
                        .entry((update.deck_id, update.card_index))
                        .or_default()
                        .absorb(&update);
                }
                None => {
                    // Channel closed: final flush, then stop
                    if !pending.is_empty() {
                        if let Err(e) = store.upsert(pending).await {
                            tracing::error!("final progress flush failed: {e}");
                        }
                    }
                    return;
                }
            },
            _ = ticker.tick() => {
                if pending.is_empty() {
                    continue;
                }
                let batch = std::mem::take(&mut pending);
                let retry = batch.clone();
                let cards = batch.len();
                match store.upsert(batch).await {
                    Ok(()) => tracing::debug!(cards, "progress flushed"),
                    Err(e) => {
                        tracing::error!("progress flush failed, retrying next tick: {e}");
                        // Anything recorded during the failed upsert wins
                        // the merge order
                        for (key, earlier) in retry {
                            pending.entry(key).or_default().merge_after(earlier);
                        }
                    }
                }
            }
        }
    }
}

/// Store used in tests and when running without a backing database.
#[derive(Debug, Default)]
pub struct InMemoryProgressStore {
    cards: Mutex<ProgressBatch>,
}

impl InMemoryProgressStore {
    pub fn snapshot(&self) -> ProgressBatch {
        self.cards.lock().expect("progress store poisoned").clone()
    }
}

#[async_trait]
impl ProgressStore for InMemoryProgressStore {
    async fn upsert(&self, batch: ProgressBatch) -> anyhow::Result<()> {
        let mut cards = self.cards.lock().expect("progress store poisoned");
        for (key, incoming) in batch {
            match cards.get_mut(&key) {
                Some(existing) => {
                    existing.attempts += incoming.attempts;
                    existing.correct += incoming.correct;
                    existing.scores.extend(incoming.scores);
                }
                None => {
                    cards.insert(key, incoming);
                }
            }
        }
        Ok(())
    }
}
