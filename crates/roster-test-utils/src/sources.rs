//! Stub record sources

use async_trait::async_trait;
use parking_lot::Mutex;
use roster_client::{FetchError, RecordSource, SEARCH_PATH};
use roster_model::{SearchQuery, SearchResults};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::{oneshot, Notify};

/// Every read stays pending forever
#[derive(Debug, Default)]
pub struct PendingSource {
    calls: AtomicUsize,
}

impl PendingSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads issued so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RecordSource for PendingSource {
    async fn fetch_json(&self, _path: &str) -> Result<Value, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        futures::future::pending().await
    }

    async fn search(&self, _query: &SearchQuery) -> Result<SearchResults, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        futures::future::pending().await
    }
}

/// Every read fails with the same error
#[derive(Debug)]
pub struct FailingSource {
    error: FetchError,
    calls: AtomicUsize,
}

impl FailingSource {
    pub fn new(error: FetchError) -> Self {
        Self {
            error,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RecordSource for FailingSource {
    async fn fetch_json(&self, _path: &str) -> Result<Value, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(self.error.clone())
    }

    async fn search(&self, _query: &SearchQuery) -> Result<SearchResults, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(self.error.clone())
    }
}

/// Answers from a fixed table; unknown paths are 404
#[derive(Debug, Default)]
pub struct StaticSource {
    records: HashMap<String, Value>,
    search: Option<SearchResults>,
    requests: Mutex<Vec<String>>,
}

impl StaticSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `body` at `path` (e.g. `/companies/1/`)
    #[must_use]
    pub fn with_record(mut self, path: impl Into<String>, body: Value) -> Self {
        self.records.insert(path.into(), body);
        self
    }

    /// Serve `results` for every search
    #[must_use]
    pub fn with_search(mut self, results: SearchResults) -> Self {
        self.search = Some(results);
        self
    }

    /// Paths requested so far, in order; searches log as `/search/?k=v&...`
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().clone()
    }

    /// How many times `path` was requested
    pub fn request_count(&self, path: &str) -> usize {
        self.requests.lock().iter().filter(|p| *p == path).count()
    }
}

#[async_trait]
impl RecordSource for StaticSource {
    async fn fetch_json(&self, path: &str) -> Result<Value, FetchError> {
        self.requests.lock().push(path.to_string());
        self.records
            .get(path)
            .cloned()
            .ok_or_else(|| FetchError::Status {
                url: path.to_string(),
                status: 404,
            })
    }

    async fn search(&self, query: &SearchQuery) -> Result<SearchResults, FetchError> {
        let encoded = query
            .to_pairs()
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("&");
        self.requests.lock().push(format!("{SEARCH_PATH}?{encoded}"));
        self.search.clone().ok_or_else(|| FetchError::Status {
            url: SEARCH_PATH.to_string(),
            status: 404,
        })
    }
}

type Reply<T> = oneshot::Sender<Result<T, FetchError>>;

/// Holds each read until the test releases it
///
/// Lets a test interleave a response with unmounts and identifier
/// changes. Searches are gated under [`SEARCH_PATH`].
#[derive(Debug, Default)]
pub struct GatedSource {
    records: Mutex<HashMap<String, Vec<Reply<Value>>>>,
    searches: Mutex<Vec<Reply<SearchResults>>>,
    arrived: Notify,
}

impl GatedSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads currently held for `path`
    pub fn held(&self, path: &str) -> usize {
        if path == SEARCH_PATH {
            return self.searches.lock().len();
        }
        self.records.lock().get(path).map_or(0, Vec::len)
    }

    /// Wait until at least one read for `path` is held
    pub async fn wait_for(&self, path: &str) {
        loop {
            let arrived = self.arrived.notified();
            if self.held(path) > 0 {
                return;
            }
            arrived.await;
        }
    }

    /// Complete the oldest held read for `path`; false if none was held
    pub fn release(&self, path: &str, reply: Result<Value, FetchError>) -> bool {
        let sender = {
            let mut records = self.records.lock();
            records
                .get_mut(path)
                .filter(|held| !held.is_empty())
                .map(|held| held.remove(0))
        };
        sender.is_some_and(|tx| tx.send(reply).is_ok())
    }

    /// Complete the oldest held search; false if none was held
    pub fn release_search(&self, reply: Result<SearchResults, FetchError>) -> bool {
        let sender = {
            let mut searches = self.searches.lock();
            (!searches.is_empty()).then(|| searches.remove(0))
        };
        sender.is_some_and(|tx| tx.send(reply).is_ok())
    }
}

#[async_trait]
impl RecordSource for GatedSource {
    async fn fetch_json(&self, path: &str) -> Result<Value, FetchError> {
        let (tx, rx) = oneshot::channel();
        {
            self.records
                .lock()
                .entry(path.to_string())
                .or_default()
                .push(tx);
        }
        self.arrived.notify_waiters();
        rx.await.unwrap_or_else(|_| {
            Err(FetchError::Transport {
                url: path.to_string(),
                message: "gate dropped".to_string(),
            })
        })
    }

    async fn search(&self, _query: &SearchQuery) -> Result<SearchResults, FetchError> {
        let (tx, rx) = oneshot::channel();
        {
            self.searches.lock().push(tx);
        }
        self.arrived.notify_waiters();
        rx.await.unwrap_or_else(|_| {
            Err(FetchError::Transport {
                url: SEARCH_PATH.to_string(),
                message: "gate dropped".to_string(),
            })
        })
    }
}
