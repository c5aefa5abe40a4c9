//! Photo feed controller.
//!
//! Owns the single [`FeedState`] and decides what to fetch, when to fetch it
//! and how results are merged and persisted.
//!
//! ## Concurrency
//!
//! Every operation takes the inner lock only for short synchronous sections;
//! no lock is held across a network or storage await. Each accepted load
//! carries a generation from [`LoadGate`]; a response whose generation is no
//! longer current (superseded, or the controller was shut down) is dropped
//! without touching state. Cache reconciliation re-checks ownership after
//! its cache read, so a superseded reset never writes the snapshot.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use fg_core::feed::CacheSnapshot;
use fg_core::{FeedConfig, FeedError, FeedState, LoadMode, PageRequest, Photo, PhotoPage, SearchQuery};
use tokio::sync::watch;
use tokio::task::AbortHandle;
use tracing::{debug, info};

use super::gate::{LoadGate, Ticket};
use super::outcome::{LoadOutcome, LoadRequest, RejectReason};
use crate::deps::FeedDeps;

/// Cloneable handle to one feed.
///
/// All clones share the same state. Debounced searches spawn onto the
/// ambient tokio runtime.
#[derive(Clone)]
pub struct FeedController {
    shared: Arc<Shared>,
}

struct Shared {
    deps: FeedDeps,
    config: FeedConfig,
    inner: Mutex<Inner>,
    state_tx: watch::Sender<FeedState>,
}

struct Inner {
    state: FeedState,
    gate: LoadGate,
    last_request: Option<LoadRequest>,
    /// Last snapshot known to be in the cache; fallback for failed resets.
    /// `None` until the cache has been read once.
    known_snapshot: Option<Vec<Photo>>,
    /// Generation of the newest accepted `Initial`/`Refresh`.
    reset_generation: u64,
    debounce: Option<PendingSearch>,
    debounce_seq: u64,
    closed: bool,
}

struct PendingSearch {
    seq: u64,
    handle: AbortHandle,
}

impl FeedController {
    pub fn new(deps: FeedDeps, config: FeedConfig) -> Self {
        let state = FeedState::new();
        let (state_tx, _) = watch::channel(state.clone());
        Self {
            shared: Arc::new(Shared {
                deps,
                config,
                inner: Mutex::new(Inner {
                    state,
                    gate: LoadGate::default(),
                    last_request: None,
                    known_snapshot: None,
                    reset_generation: 0,
                    debounce: None,
                    debounce_seq: 0,
                    closed: false,
                }),
                state_tx,
            }),
        }
    }

    /// Receives every published state change.
    pub fn subscribe(&self) -> watch::Receiver<FeedState> {
        self.shared.state_tx.subscribe()
    }

    pub fn state(&self) -> FeedState {
        self.shared.lock().state.clone()
    }

    pub fn has_more(&self) -> bool {
        self.shared.lock().state.has_more()
    }

    pub fn is_fetching(&self) -> bool {
        self.shared.lock().gate.in_flight().is_some()
    }

    pub fn is_closed(&self) -> bool {
        self.shared.lock().closed
    }

    /// Cold start: show the cached snapshot, then fetch recent photos.
    ///
    /// Seeding from cache never changes `status` and does not count as a
    /// successful load. A failed or missing cache simply seeds nothing.
    pub async fn start(&self) -> LoadOutcome {
        if self.is_closed() {
            return LoadOutcome::Rejected(RejectReason::Closed);
        }
        let cached = self.shared.deps.cache.read().await;
        {
            let mut inner = self.shared.lock();
            if inner.closed {
                return LoadOutcome::Rejected(RejectReason::Closed);
            }
            inner.known_snapshot = Some(cached.clone());
            // A load issued before start() already owns the items.
            if inner.gate.generation() == 0 {
                debug!(count = cached.len(), "seeding feed from cached snapshot");
                inner.state.seed_from_cache(cached);
                self.shared.publish(&inner);
            }
        }
        self.load("", 1, LoadMode::Initial).await
    }

    /// Fetches `page` of `query` and merges it according to `mode`.
    ///
    /// `Append` requires `page == current_page + 1`, the active query, more
    /// pages and no load in flight; otherwise it is rejected without a
    /// request. `Initial` and `Refresh` supersede any in-flight load.
    pub async fn load(&self, query: &str, page: u32, mode: LoadMode) -> LoadOutcome {
        let request = LoadRequest {
            query: SearchQuery::normalize(query),
            page: page.max(1),
            mode,
        };

        let ticket = match self.shared.begin(&request) {
            Ok(ticket) => ticket,
            Err(reason) => {
                debug!(
                    query = %request.query,
                    page = request.page,
                    mode = %mode,
                    %reason,
                    "load rejected"
                );
                return LoadOutcome::Rejected(reason);
            }
        };

        debug!(
            query = %request.query,
            page = request.page,
            mode = %mode,
            generation = ticket.generation,
            "load started"
        );

        let page_request = PageRequest::new(
            request.query.clone(),
            request.page,
            self.shared.config.page_size,
        );
        let mut in_flight = InFlight::new(&self.shared, ticket);
        let result = self.shared.deps.service.fetch_page(&page_request).await;
        let fallback = if result.is_err() && mode != LoadMode::Append {
            self.read_fallback().await
        } else {
            None
        };
        in_flight.disarm();

        self.finish(ticket, &request, result, fallback).await
    }

    /// Coalesces rapid input: only the last call inside the debounce window
    /// issues `load(query, 1, Initial)`.
    pub fn search_debounced(&self, query: &str) {
        let mut inner = self.shared.lock();
        if inner.closed {
            return;
        }
        if let Some(pending) = inner.debounce.take() {
            pending.handle.abort();
            debug!(seq = pending.seq, "pending search superseded");
        }

        inner.debounce_seq += 1;
        let seq = inner.debounce_seq;
        let weak = Arc::downgrade(&self.shared);
        let delay = self.shared.config.debounce();
        let query = query.to_string();

        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if let Some(shared) = weak.upgrade() {
                FeedController { shared }.fire_debounced(seq, query).await;
            }
        });
        inner.debounce = Some(PendingSearch {
            seq,
            handle: handle.abort_handle(),
        });
    }

    /// Appends the next page of the active query.
    pub async fn load_more(&self) -> LoadOutcome {
        let (query, next_page) = {
            let inner = self.shared.lock();
            (
                inner.state.query().clone(),
                inner.state.current_page() + 1,
            )
        };
        self.load(query.as_str(), next_page, LoadMode::Append).await
    }

    /// Reloads page 1 of the active query. Allowed from any status.
    pub async fn refresh(&self) -> LoadOutcome {
        let query = self.shared.lock().state.query().clone();
        self.load(query.as_str(), 1, LoadMode::Refresh).await
    }

    /// Re-issues the most recently attempted load with identical arguments.
    pub async fn retry_last(&self) -> LoadOutcome {
        let last = self.shared.lock().last_request.clone();
        match last {
            Some(request) => {
                self.load(request.query.as_str(), request.page, request.mode)
                    .await
            }
            None => LoadOutcome::Rejected(RejectReason::NothingToRetry),
        }
    }

    /// Teardown. Cancels the pending search and orphans any in-flight load;
    /// every later operation is rejected.
    pub fn shutdown(&self) {
        let mut inner = self.shared.lock();
        if inner.closed {
            return;
        }
        inner.closed = true;
        inner.gate.invalidate();
        if let Some(pending) = inner.debounce.take() {
            pending.handle.abort();
        }
        info!("feed controller shut down");
    }

    async fn fire_debounced(&self, seq: u64, query: String) {
        {
            let mut inner = self.shared.lock();
            let ours = inner.debounce.as_ref().map(|p| p.seq) == Some(seq);
            if !ours || inner.closed {
                return;
            }
            // Detach so a newer keystroke cannot abort this load mid-flight;
            // the generation check handles supersession from here on.
            inner.debounce = None;
        }
        let outcome = self.load(&query, 1, LoadMode::Initial).await;
        debug!(seq, ?outcome, "debounced search settled");
    }

    /// Reads the cached snapshot for a failed reset when no earlier read
    /// (cold start or reconciliation) has recorded one.
    async fn read_fallback(&self) -> Option<Vec<Photo>> {
        if self.shared.lock().known_snapshot.is_some() {
            return None;
        }
        Some(self.shared.deps.cache.read().await)
    }

    async fn finish(
        &self,
        ticket: Ticket,
        request: &LoadRequest,
        result: Result<PhotoPage, FeedError>,
        cached: Option<Vec<Photo>>,
    ) -> LoadOutcome {
        let (outcome, reconcile) = {
            let mut inner = self.shared.lock();
            if inner.closed || !inner.gate.release(&ticket) {
                debug!(
                    generation = ticket.generation,
                    current = inner.gate.generation(),
                    "discarding stale response"
                );
                return LoadOutcome::Discarded;
            }

            let outcome = match result {
                Ok(page) => match inner.state.apply_page(request.mode, page) {
                    Ok(()) => LoadOutcome::Applied,
                    Err(err) => LoadOutcome::Failed(err),
                },
                Err(err) => {
                    if inner.known_snapshot.is_none() {
                        inner.known_snapshot = cached;
                    }
                    let fallback = inner.known_snapshot.clone().unwrap_or_default();
                    inner
                        .state
                        .apply_failure(request.mode, err.clone(), &fallback);
                    LoadOutcome::Failed(err)
                }
            };
            self.shared.publish(&inner);

            let reconcile = (outcome.is_applied() && request.mode == LoadMode::Initial)
                .then(|| inner.state.items().to_vec());

            if outcome.is_applied() {
                info!(
                    query = %request.query,
                    mode = %request.mode,
                    page = inner.state.current_page(),
                    total_pages = inner.state.total_pages(),
                    items = inner.state.items().len(),
                    "feed page applied"
                );
            }
            (outcome, reconcile)
        };

        if let LoadOutcome::Failed(err) = &outcome {
            let context = format!("feed.load.{}", request.mode);
            self.shared.deps.reporter.report(&context, err);
        }

        if let Some(items) = reconcile {
            self.reconcile_cache(ticket.generation, items).await;
        }
        outcome
    }

    /// Rewrites the cache only when the ordered id sequence changed.
    ///
    /// Skipped once a newer reset was accepted or the controller shut down
    /// while the cache read was pending.
    async fn reconcile_cache(&self, generation: u64, items: Vec<Photo>) {
        let cached = self.shared.deps.cache.read().await;
        if !self.shared.lock().owns_reset(generation) {
            debug!(generation, "skipping cache reconciliation for superseded load");
            return;
        }

        if CacheSnapshot::same_ids(&cached, &items) {
            debug!(count = items.len(), "cached snapshot unchanged");
        } else {
            info!(
                previous = cached.len(),
                current = items.len(),
                "updating cached snapshot"
            );
            self.shared.deps.cache.write(&items).await;
        }
        let mut inner = self.shared.lock();
        if inner.owns_reset(generation) {
            inner.known_snapshot = Some(items);
        }
    }
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn publish(&self, inner: &Inner) {
        self.state_tx.send_replace(inner.state.clone());
    }

    /// Entry guard. On success the state is already in the loading status.
    fn begin(&self, request: &LoadRequest) -> Result<Ticket, RejectReason> {
        let mut inner = self.lock();
        if inner.closed {
            return Err(RejectReason::Closed);
        }

        if request.mode == LoadMode::Append {
            let state = &inner.state;
            if request.query != *state.query() {
                return Err(RejectReason::QueryMismatch);
            }
            if !state.has_more() {
                return Err(RejectReason::NoMorePages);
            }
            let expected = state.current_page() + 1;
            if request.page != expected {
                return Err(RejectReason::PageOutOfSequence {
                    expected,
                    requested: request.page,
                });
            }
        }

        let ticket = inner.gate.try_acquire(request.mode)?;
        if request.mode != LoadMode::Append {
            inner.reset_generation = ticket.generation;
        }
        inner.last_request = Some(request.clone());
        inner.state.begin(request.mode, &request.query);
        self.publish(&inner);
        Ok(ticket)
    }
}

impl Inner {
    /// Whether the reset tagged `generation` is still the newest one.
    fn owns_reset(&self, generation: u64) -> bool {
        !self.closed && self.reset_generation == generation
    }
}

impl Drop for Shared {
    fn drop(&mut self) {
        let inner = self
            .inner
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(pending) = inner.debounce.take() {
            pending.handle.abort();
        }
    }
}

/// Releases the gate when a `load` future is dropped before its response
/// arrives, so the feed never stays stuck in a loading status.
struct InFlight<'a> {
    shared: &'a Shared,
    ticket: Option<Ticket>,
}

impl<'a> InFlight<'a> {
    fn new(shared: &'a Shared, ticket: Ticket) -> Self {
        Self {
            shared,
            ticket: Some(ticket),
        }
    }

    fn disarm(&mut self) {
        self.ticket = None;
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        let Some(ticket) = self.ticket.take() else {
            return;
        };
        let mut inner = self.shared.lock();
        if inner.gate.release(&ticket) {
            debug!(generation = ticket.generation, "in-flight load abandoned");
            inner.state.abandon_load();
            self.shared.publish(&inner);
        }
    }
}
