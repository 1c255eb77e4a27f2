//! Application state for the web server.
//!
//! The dataset is immutable once built. Handlers clone the current
//! `Arc<Dataset>` and work on that snapshot; a reload builds a complete new
//! dataset off the async runtime and swaps the pointer, so a request sees
//! either the old index or the new one, never a mix.

use relmap::prelude::*;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::{broadcast, Mutex, RwLock};
use tracing::info;

/// Notifications pushed to WebSocket clients.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DatasetEvent {
    Reloaded { researchers: usize, edges: usize },
}

#[derive(Debug, thiserror::Error)]
pub enum ReloadError {
    #[error("no data source configured")]
    NoSource,

    #[error(transparent)]
    Load(#[from] LoadError),

    #[error("reload task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    dataset: Arc<RwLock<Arc<Dataset>>>,
    source: Option<PathBuf>,
    weights: ScoringWeights,
    /// Serializes reloads; readers never take it.
    reload_lock: Arc<Mutex<()>>,
    /// Broadcast channel for dataset events.
    pub event_tx: broadcast::Sender<DatasetEvent>,
}

impl AppState {
    /// Load `source`, or fall back to the built-in sample when there is none.
    pub fn new(source: Option<PathBuf>, weights: ScoringWeights) -> LoadResult<Self> {
        let dataset = match &source {
            Some(path) => Dataset::load(path, weights)?,
            None => Dataset::with_weights(sample_records(), weights),
        };
        info!(researchers = dataset.len(), "Dataset ready");
        Ok(Self::build(dataset, source))
    }

    /// Serve an already built dataset. Reloading is unavailable.
    pub fn from_dataset(dataset: Dataset) -> Self {
        Self::build(dataset, None)
    }

    fn build(dataset: Dataset, source: Option<PathBuf>) -> Self {
        let (event_tx, _) = broadcast::channel(64);
        Self {
            weights: *dataset.weights(),
            dataset: Arc::new(RwLock::new(Arc::new(dataset))),
            source,
            reload_lock: Arc::new(Mutex::new(())),
            event_tx,
        }
    }

    /// The current dataset snapshot.
    pub async fn dataset(&self) -> Arc<Dataset> {
        self.dataset.read().await.clone()
    }

    pub fn has_source(&self) -> bool {
        self.source.is_some()
    }

    /// Re-read the source, rebuild the relevance index and publish it.
    pub async fn reload(&self) -> Result<DatasetStats, ReloadError> {
        let _guard = self.reload_lock.lock().await;
        let source = self.source.clone().ok_or(ReloadError::NoSource)?;
        let weights = self.weights;

        let dataset = tokio::task::spawn_blocking(move || Dataset::load(&source, weights)).await??;
        let stats = dataset.stats();
        *self.dataset.write().await = Arc::new(dataset);

        info!(researchers = stats.researchers, edges = stats.edges, "Dataset reloaded");
        let _ = self.event_tx.send(DatasetEvent::Reloaded {
            researchers: stats.researchers,
            edges: stats.edges,
        });
        Ok(stats)
    }

    /// Subscribe to events.
    pub fn subscribe(&self) -> broadcast::Receiver<DatasetEvent> {
        self.event_tx.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn sample_is_served_without_source() {
        let state = AppState::new(None, ScoringWeights::default()).unwrap();
        assert!(!state.has_source());
        assert_eq!(state.dataset().await.len(), 12);
        assert!(matches!(state.reload().await, Err(ReloadError::NoSource)));
    }

    #[tokio::test]
    async fn reload_swaps_dataset_and_notifies() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("researchers.csv");
        std::fs::write(&path, "id,field\n1,F\n2,F\n").unwrap();

        let state = AppState::new(Some(path.clone()), ScoringWeights::default()).unwrap();
        let before = state.dataset().await;
        let mut events = state.subscribe();

        let mut file = std::fs::OpenOptions::new().append(true).open(&path).unwrap();
        writeln!(file, "3,F").unwrap();
        drop(file);

        let stats = state.reload().await.unwrap();
        assert_eq!(stats.researchers, 3);
        assert_eq!(stats.edges, 3);

        // Earlier snapshots stay intact.
        assert_eq!(before.len(), 2);
        assert_eq!(state.dataset().await.len(), 3);

        match events.recv().await.unwrap() {
            DatasetEvent::Reloaded { researchers, edges } => {
                assert_eq!(researchers, 3);
                assert_eq!(edges, 3);
            }
        }
    }

    #[tokio::test]
    async fn failed_reload_keeps_current_dataset() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("researchers.json");
        std::fs::write(&path, r#"[{"id": "1"}]"#).unwrap();

        let state = AppState::new(Some(path.clone()), ScoringWeights::default()).unwrap();
        std::fs::write(&path, "not json").unwrap();

        assert!(matches!(state.reload().await, Err(ReloadError::Load(_))));
        assert_eq!(state.dataset().await.len(), 1);
    }
}
