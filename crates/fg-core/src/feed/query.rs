use serde::{Deserialize, Serialize};

use crate::photo::Photo;

/// Normalized search text. Empty means "recent photos" mode.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SearchQuery(String);

impl SearchQuery {
    pub fn normalize(text: &str) -> Self {
        Self(text.trim().to_string())
    }

    pub fn recent() -> Self {
        Self(String::new())
    }

    pub fn is_recent(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SearchQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// How a page result is merged into the feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LoadMode {
    /// Replace items with page 1 of a (new) query.
    Initial,
    /// Concatenate the next page onto existing items.
    Append,
    /// Re-fetch page 1 of the current query.
    Refresh,
}

impl std::fmt::Display for LoadMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            LoadMode::Initial => "initial",
            LoadMode::Append => "append",
            LoadMode::Refresh => "refresh",
        };
        f.write_str(s)
    }
}

/// One page request against the remote photo service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub query: SearchQuery,
    /// 1-based.
    pub page: u32,
    pub per_page: u32,
}

impl PageRequest {
    pub fn new(query: SearchQuery, page: u32, per_page: u32) -> Self {
        Self {
            query,
            page: page.max(1),
            per_page: per_page.max(1),
        }
    }
}

/// One page of photos as returned by the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoPage {
    pub photos: Vec<Photo>,
    pub page: u32,
    pub total_pages: u32,
    pub total: u64,
}
