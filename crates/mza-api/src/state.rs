use std::sync::Arc;

use crate::config::{ApiConfig, Environment};
use crate::progress::{CoalescingProgressSink, InMemoryProgressStore, ProgressSink, ProgressStore};

#[derive(Clone)]
pub struct ApiState {
    pub environment: Environment,
    pub progress: Arc<dyn ProgressSink>,
}

impl ApiState {
    /// Build the state for a running server. Must be called on a tokio
    /// runtime: the progress sink spawns its flush task immediately.
    ///
    /// The service itself owns no persistence; until an external store is
    /// wired in, progress accumulates in memory.
    pub fn new(config: &ApiConfig) -> Self {
        let store: Arc<dyn ProgressStore> = Arc::new(InMemoryProgressStore::default());
        let sink = CoalescingProgressSink::spawn(store, config.progress_flush_interval);
        Self {
            environment: config.env,
            progress: Arc::new(sink),
        }
    }

    /// Build a state around a caller-supplied sink (used by tests to
    /// observe what the handlers record).
    pub fn with_sink(environment: Environment, progress: Arc<dyn ProgressSink>) -> Self {
        Self {
            environment,
            progress,
        }
    }
}
