//! Photo domain models.

pub mod detail;
pub mod url_policy;

pub use detail::{PhotoDetail, PhotoUrls};
pub use url_policy::SizeVariants;

use serde::{Deserialize, Serialize};

use crate::ids::PhotoId;

/// Title shown when the service does not provide one.
pub const UNTITLED_PLACEHOLDER: &str = "Untitled";

/// A single gallery entry.
///
/// Same shape is used for feed items and for the persisted cache snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Photo {
    pub id: PhotoId,
    pub title: String,
    pub thumbnail_url: Option<String>,
    pub owner_name: Option<String>,
}

impl Photo {
    /// Builds a photo, applying the title placeholder and dropping blank owner names.
    pub fn new(
        id: PhotoId,
        title: Option<String>,
        thumbnail_url: Option<String>,
        owner_name: Option<String>,
    ) -> Self {
        Self {
            id,
            title: non_blank(title).unwrap_or_else(|| UNTITLED_PLACEHOLDER.to_string()),
            thumbnail_url: non_blank(thumbnail_url),
            owner_name: non_blank(owner_name),
        }
    }
}

pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
