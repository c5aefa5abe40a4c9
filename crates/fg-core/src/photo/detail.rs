use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::PhotoId;

/// Named URL variants of one photo.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoUrls {
    pub medium: Option<String>,
    pub large: Option<String>,
    pub original: Option<String>,
}

/// Extended record fetched lazily for one photo.
///
/// One-to-one with a [`crate::Photo`] by id. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoDetail {
    pub id: PhotoId,
    pub title: String,
    pub description: String,
    pub owner_name: Option<String>,
    pub urls: PhotoUrls,
    /// Capture time as reported by the camera; carries no timezone.
    pub taken_at: Option<NaiveDateTime>,
    pub posted_at: Option<DateTime<Utc>>,
    pub views: u64,
    pub comments: u64,
    pub tags: Vec<String>,
}

impl PhotoDetail {
    /// Largest available variant: original, then large, then medium.
    pub fn best_share_url(&self) -> Option<&str> {
        self.urls
            .original
            .as_deref()
            .or(self.urls.large.as_deref())
            .or(self.urls.medium.as_deref())
    }
}
