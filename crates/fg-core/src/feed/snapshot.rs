use serde::{Deserialize, Serialize};

use crate::photo::Photo;

pub const SNAPSHOT_SCHEMA_VERSION: u32 = 1;

/// Persisted form of the most recent successfully fetched photo list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheSnapshot {
    pub schema: u32,
    pub photos: Vec<Photo>,
}

impl CacheSnapshot {
    pub fn new(photos: Vec<Photo>) -> Self {
        Self {
            schema: SNAPSHOT_SCHEMA_VERSION,
            photos,
        }
    }

    /// Ordered id comparison. Titles and URLs are ignored.
    pub fn same_ids(a: &[Photo], b: &[Photo]) -> bool {
        a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.id == y.id)
    }
}
