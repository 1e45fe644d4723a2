#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, Once};
use std::time::Duration;

use bytes::Bytes;
use catalog_core::{Artwork, Category, Query, ResultItem, RowSlot, Snapshot};
use catalog_engine::{CatalogClient, FetchError, ImageFetcher, PresentationSink};

pub fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(catalog_logging::initialize_for_tests);
}

pub fn item(id: u64, category: Category) -> ResultItem {
    ResultItem {
        id,
        name: format!("item {id}"),
        artist: format!("artist {id}"),
        artwork_url: format!("https://img.example.com/{id}.jpg"),
        category,
    }
}

/// Counts futures dropped before they finished.
struct CancelGuard {
    cancelled: Arc<AtomicUsize>,
    finished: bool,
}

impl CancelGuard {
    fn new(cancelled: Arc<AtomicUsize>) -> Self {
        Self {
            cancelled,
            finished: false,
        }
    }
}

impl Drop for CancelGuard {
    fn drop(&mut self) {
        if !self.finished {
            self.cancelled.fetch_add(1, Ordering::SeqCst);
        }
    }
}

#[derive(Clone)]
struct Scripted {
    delay: Duration,
    result: Result<Vec<ResultItem>, FetchError>,
}

/// Catalog whose per-category answers and latencies are fixed up front.
#[derive(Default)]
pub struct ScriptedCatalog {
    script: HashMap<Category, Scripted>,
    calls: Mutex<Vec<Query>>,
    cancelled: Arc<AtomicUsize>,
}

impl ScriptedCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(mut self, category: Category, delay_ms: u64, items: Vec<ResultItem>) -> Self {
        self.script.insert(
            category,
            Scripted {
                delay: Duration::from_millis(delay_ms),
                result: Ok(items),
            },
        );
        self
    }

    pub fn fail(mut self, category: Category, delay_ms: u64, error: FetchError) -> Self {
        self.script.insert(
            category,
            Scripted {
                delay: Duration::from_millis(delay_ms),
                result: Err(error),
            },
        );
        self
    }

    pub fn calls(&self) -> Vec<Query> {
        self.calls.lock().unwrap().clone()
    }

    pub fn cancelled(&self) -> usize {
        self.cancelled.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl CatalogClient for ScriptedCatalog {
    async fn search(&self, query: &Query) -> Result<Vec<ResultItem>, FetchError> {
        self.calls.lock().unwrap().push(query.clone());
        let mut guard = CancelGuard::new(self.cancelled.clone());
        let scripted = self.script.get(&query.category).cloned().unwrap_or(Scripted {
            delay: Duration::ZERO,
            result: Ok(Vec::new()),
        });
        tokio::time::sleep(scripted.delay).await;
        guard.finished = true;
        scripted.result
    }
}

/// Serves the url itself as image bytes after a fixed delay; urls containing
/// "broken" fail.
pub struct EchoImages {
    delay: Duration,
    calls: Mutex<Vec<String>>,
    cancelled: Arc<AtomicUsize>,
}

impl EchoImages {
    pub fn new(delay_ms: u64) -> Self {
        Self {
            delay: Duration::from_millis(delay_ms),
            calls: Mutex::new(Vec::new()),
            cancelled: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn cancelled(&self) -> usize {
        self.cancelled.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl ImageFetcher for EchoImages {
    async fn fetch_image(&self, url: &str) -> Result<Bytes, FetchError> {
        self.calls.lock().unwrap().push(url.to_string());
        let mut guard = CancelGuard::new(self.cancelled.clone());
        tokio::time::sleep(self.delay).await;
        guard.finished = true;
        if url.contains("broken") {
            return Err(FetchError::new(
                catalog_engine::FailureKind::HttpStatus(404),
                "not found",
            ));
        }
        Ok(Bytes::copy_from_slice(url.as_bytes()))
    }
}

#[derive(Default)]
pub struct RecordingSink {
    snapshots: Mutex<Vec<Snapshot>>,
    artwork: Mutex<Vec<(RowSlot, Artwork)>>,
}

impl RecordingSink {
    pub fn snapshots(&self) -> Vec<Snapshot> {
        self.snapshots.lock().unwrap().clone()
    }

    pub fn last(&self) -> Option<Snapshot> {
        self.snapshots.lock().unwrap().last().cloned()
    }

    pub fn artwork(&self) -> Vec<(RowSlot, Artwork)> {
        self.artwork.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl PresentationSink for RecordingSink {
    async fn apply(&self, snapshot: Snapshot) {
        self.snapshots.lock().unwrap().push(snapshot);
    }

    async fn show_artwork(&self, slot: RowSlot, artwork: Artwork) {
        self.artwork.lock().unwrap().push((slot, artwork));
    }
}
