//! Shared in-memory doubles for feed controller integration tests.

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use fg_app::{FeedController, FeedDeps};
use fg_core::ports::{FeedErrorReporterPort, PhotoCachePort, PhotoServicePort};
use fg_core::{
    FeedConfig, FeedError, FeedState, PageRequest, Photo, PhotoDetail, PhotoId, PhotoPage,
};
use tokio::sync::oneshot;

pub fn photo(id: &str) -> Photo {
    Photo::new(PhotoId::from(id), Some(format!("Photo {id}")), None, None)
}

/// Polls `done` until it holds, yielding first and then sleeping briefly so
/// work parked on the blocking pool (file cache reads) can finish.
pub async fn wait_until(done: impl Fn() -> bool) -> bool {
    for attempt in 0..5_000 {
        if done() {
            return true;
        }
        if attempt < 100 {
            tokio::task::yield_now().await;
        } else {
            tokio::time::sleep(Duration::from_millis(1)).await;
        }
    }
    done()
}

pub fn page_of(ids: &[&str], page: u32, total_pages: u32) -> PhotoPage {
    PhotoPage {
        photos: ids.iter().map(|id| photo(id)).collect(),
        page,
        total_pages,
        total: (total_pages as u64) * (ids.len() as u64),
    }
}

pub fn ids(state: &FeedState) -> Vec<String> {
    state.items().iter().map(|p| p.id.to_string()).collect()
}

enum Scripted {
    Ready(Result<PhotoPage, FeedError>),
    Held(oneshot::Receiver<()>, Result<PhotoPage, FeedError>),
}

/// Photo service answering from a per-`(query, page)` script.
///
/// Responses for the same key are consumed in order. An unscripted request
/// fails with a transport error.
#[derive(Default)]
pub struct FakePhotoService {
    calls: Mutex<Vec<PageRequest>>,
    script: Mutex<HashMap<(String, u32), VecDeque<Scripted>>>,
}

impl FakePhotoService {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn push(&self, query: &str, page: u32, scripted: Scripted) {
        self.script
            .lock()
            .unwrap()
            .entry((query.to_string(), page))
            .or_default()
            .push_back(scripted);
    }

    pub fn script(&self, query: &str, page: u32, result: Result<PhotoPage, FeedError>) {
        self.push(query, page, Scripted::Ready(result));
    }

    /// The response is returned only after the sender fires (or is dropped).
    pub fn script_held(
        &self,
        query: &str,
        page: u32,
        result: Result<PhotoPage, FeedError>,
    ) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.push(query, page, Scripted::Held(rx, result));
        tx
    }

    pub fn calls(&self) -> Vec<PageRequest> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Waits until at least `n` requests have reached the service.
    pub async fn wait_for_calls(&self, n: usize) {
        if !wait_until(|| self.call_count() >= n).await {
            panic!(
                "expected {n} service calls, saw {}: {:?}",
                self.call_count(),
                self.calls()
            );
        }
    }
}

#[async_trait]
impl PhotoServicePort for FakePhotoService {
    async fn fetch_page(&self, request: &PageRequest) -> Result<PhotoPage, FeedError> {
        self.calls.lock().unwrap().push(request.clone());
        let next = self
            .script
            .lock()
            .unwrap()
            .get_mut(&(request.query.as_str().to_string(), request.page))
            .and_then(VecDeque::pop_front);

        match next {
            Some(Scripted::Ready(result)) => result,
            Some(Scripted::Held(rx, result)) => {
                let _ = rx.await;
                result
            }
            None => Err(FeedError::transport(format!(
                "unscripted request {:?} page {}",
                request.query.as_str(),
                request.page
            ))),
        }
    }

    async fn fetch_detail(&self, id: &PhotoId) -> Result<PhotoDetail, FeedError> {
        Err(FeedError::InvalidRequest(format!("no detail for {id}")))
    }
}

/// In-memory cache that records every write.
///
/// Reads can be held open with [`RecordingCache::hold_next_read`]; a held
/// read returns the contents stored at the moment it is released.
#[derive(Default)]
pub struct RecordingCache {
    stored: Mutex<Vec<Photo>>,
    writes: Mutex<Vec<Vec<Photo>>>,
    reads: Mutex<usize>,
    held_reads: Mutex<VecDeque<oneshot::Receiver<()>>>,
}

impl RecordingCache {
    pub fn with(photos: Vec<Photo>) -> Arc<Self> {
        Arc::new(Self {
            stored: Mutex::new(photos),
            ..Self::default()
        })
    }

    pub fn writes(&self) -> Vec<Vec<Photo>> {
        self.writes.lock().unwrap().clone()
    }

    pub fn stored(&self) -> Vec<Photo> {
        self.stored.lock().unwrap().clone()
    }

    pub fn read_count(&self) -> usize {
        *self.reads.lock().unwrap()
    }

    pub fn hold_next_read(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.held_reads.lock().unwrap().push_back(rx);
        tx
    }

    /// Waits until at least `n` reads have started.
    pub async fn wait_for_reads(&self, n: usize) {
        if !wait_until(|| self.read_count() >= n).await {
            panic!("expected {n} cache reads, saw {}", self.read_count());
        }
    }
}

#[async_trait]
impl PhotoCachePort for RecordingCache {
    async fn read(&self) -> Vec<Photo> {
        *self.reads.lock().unwrap() += 1;
        let held = self.held_reads.lock().unwrap().pop_front();
        if let Some(rx) = held {
            let _ = rx.await;
        }
        self.stored.lock().unwrap().clone()
    }

    async fn write(&self, photos: &[Photo]) {
        *self.stored.lock().unwrap() = photos.to_vec();
        self.writes.lock().unwrap().push(photos.to_vec());
    }
}

#[derive(Default)]
pub struct RecordingReporter {
    reports: Mutex<Vec<(String, FeedError)>>,
}

impl RecordingReporter {
    pub fn reports(&self) -> Vec<(String, FeedError)> {
        self.reports.lock().unwrap().clone()
    }
}

impl FeedErrorReporterPort for RecordingReporter {
    fn report(&self, context: &str, error: &FeedError) {
        self.reports
            .lock()
            .unwrap()
            .push((context.to_string(), error.clone()));
    }
}

pub struct Harness {
    pub controller: FeedController,
    pub service: Arc<FakePhotoService>,
    pub cache: Arc<RecordingCache>,
    pub reporter: Arc<RecordingReporter>,
}

pub fn harness_with_cache(cached: Vec<Photo>) -> Harness {
    let service = FakePhotoService::new();
    let cache = RecordingCache::with(cached);
    let reporter = Arc::new(RecordingReporter::default());
    let controller = FeedController::new(
        FeedDeps {
            service: service.clone(),
            cache: cache.clone(),
            reporter: reporter.clone(),
        },
        FeedConfig::default(),
    );
    Harness {
        controller,
        service,
        cache,
        reporter,
    }
}

pub fn harness() -> Harness {
    harness_with_cache(Vec::new())
}
