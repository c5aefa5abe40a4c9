//! Feed state and its merge rules.
//!
//! `FeedState` only changes through the methods below. The controller owns
//! the single mutable instance; everything else sees clones.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::error::FeedError;
use super::query::{LoadMode, PhotoPage, SearchQuery};
use crate::ids::PhotoId;
use crate::photo::Photo;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeedStatus {
    Idle,
    LoadingInitial,
    LoadingMore,
    Refreshing,
    Error,
}

impl FeedStatus {
    pub fn for_mode(mode: LoadMode) -> Self {
        match mode {
            LoadMode::Initial => FeedStatus::LoadingInitial,
            LoadMode::Append => FeedStatus::LoadingMore,
            LoadMode::Refresh => FeedStatus::Refreshing,
        }
    }

    pub fn is_fetching(self) -> bool {
        matches!(
            self,
            FeedStatus::LoadingInitial | FeedStatus::LoadingMore | FeedStatus::Refreshing
        )
    }
}

/// Ordered, de-duplicated feed plus pagination bookkeeping.
///
/// Invariants:
/// - every `id` in `items` is unique
/// - `current_page >= 1` and `total_pages >= 1`
/// - `last_error` is `Some` exactly when `status == Error`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedState {
    query: SearchQuery,
    items: Vec<Photo>,
    current_page: u32,
    total_pages: u32,
    status: FeedStatus,
    last_error: Option<FeedError>,
}

impl Default for FeedState {
    fn default() -> Self {
        Self::new()
    }
}

impl FeedState {
    pub fn new() -> Self {
        Self {
            query: SearchQuery::recent(),
            items: Vec::new(),
            current_page: 1,
            total_pages: 1,
            status: FeedStatus::Idle,
            last_error: None,
        }
    }

    pub fn query(&self) -> &SearchQuery {
        &self.query
    }

    pub fn items(&self) -> &[Photo] {
        &self.items
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    pub fn status(&self) -> FeedStatus {
        self.status
    }

    pub fn last_error(&self) -> Option<&FeedError> {
        self.last_error.as_ref()
    }

    pub fn has_more(&self) -> bool {
        self.current_page < self.total_pages
    }

    pub fn is_fetching(&self) -> bool {
        self.status.is_fetching()
    }

    /// Fills items from a cached snapshot without touching status or pagination.
    pub fn seed_from_cache(&mut self, photos: Vec<Photo>) {
        self.items = dedup_by_id(photos);
    }

    /// Enters the loading status for `mode`.
    ///
    /// `Initial` and `Refresh` adopt `query` as the active query; `Append`
    /// keeps the current one.
    pub fn begin(&mut self, mode: LoadMode, query: &SearchQuery) {
        if mode != LoadMode::Append {
            self.query = query.clone();
        }
        self.status = FeedStatus::for_mode(mode);
        self.last_error = None;
    }

    /// Merges a successful page.
    ///
    /// Returns `Err(EmptyResult)` when a non-append load came back empty; the
    /// state is already in `Error` with cleared items in that case.
    pub fn apply_page(&mut self, mode: LoadMode, page: PhotoPage) -> Result<(), FeedError> {
        self.current_page = page.page.max(1);
        self.total_pages = page.total_pages.max(1);

        match mode {
            LoadMode::Initial | LoadMode::Refresh => {
                self.items = dedup_by_id(page.photos);
                if self.items.is_empty() {
                    let err = FeedError::EmptyResult {
                        query: self.query.as_str().to_string(),
                    };
                    self.fail(err.clone());
                    return Err(err);
                }
            }
            LoadMode::Append => append_unique(&mut self.items, page.photos),
        }

        self.status = FeedStatus::Idle;
        self.last_error = None;
        Ok(())
    }

    /// Records a failed load.
    ///
    /// `Append` failures keep already-loaded items. `Initial`/`Refresh`
    /// failures fall back to `fallback` (empty when no cache exists).
    ///
    /// Page bookkeeping is reset on `Initial`/`Refresh` failures so a later
    /// append cannot continue a query that never loaded.
    pub fn apply_failure(&mut self, mode: LoadMode, error: FeedError, fallback: &[Photo]) {
        if mode != LoadMode::Append {
            self.items = dedup_by_id(fallback.to_vec());
            self.current_page = 1;
            self.total_pages = 1;
        }
        self.fail(error);
    }

    /// Leaves a loading status whose request was abandoned before completing.
    pub fn abandon_load(&mut self) {
        if self.status.is_fetching() {
            self.status = FeedStatus::Idle;
        }
    }

    fn fail(&mut self, error: FeedError) {
        self.status = FeedStatus::Error;
        self.last_error = Some(error);
    }
}

/// Keeps the first occurrence of every id, preserving order.
pub fn dedup_by_id(photos: Vec<Photo>) -> Vec<Photo> {
    let mut items = Vec::with_capacity(photos.len());
    append_unique(&mut items, photos);
    items
}

/// Appends photos whose id is not yet in `items`.
pub fn append_unique(items: &mut Vec<Photo>, photos: Vec<Photo>) {
    let mut seen: HashSet<PhotoId> = items.iter().map(|p| p.id.clone()).collect();
    let mut skipped = 0usize;
    for photo in photos {
        if seen.insert(photo.id.clone()) {
            items.push(photo);
        } else {
            skipped += 1;
        }
    }

    #[cfg(feature = "tracing")]
    {
        if skipped > 0 {
            tracing::trace!(skipped, "dropped duplicate photo ids");
        }
    }
    #[cfg(not(feature = "tracing"))]
    {
        let _ = skipped;
    }
}
